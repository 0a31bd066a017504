//! Capability interface implemented once per widget kind.

use crate::geometry::{Geometry, SizeLimits};
use crate::params::{ParamValue, ParameterSet};
use std::any::Any;
use std::fmt;

/// Variant-specific behaviour of a widget.
///
/// The registry's factory produces one boxed implementation per widget; the instance
/// calls into it instead of branching on its type tag.
pub trait WidgetKind: fmt::Debug + Any {
    /// Add this kind's descriptors. Runs after the common descriptors, so a kind may replace
    /// one of them (typically `backgroundColor`) with its own default.
    fn define_parameters(&self, params: &mut ParameterSet);

    /// Property names whose change requires a content refresh.
    fn visual_properties(&self) -> &'static [&'static str] {
        &[]
    }

    /// Mirror a stored value onto the kind's own state.
    ///
    /// Returns false when the kind does not track `name`.
    fn apply_property_change(&mut self, _name: &str, _value: &ParamValue) -> bool {
        false
    }

    /// Rebuild any state derived from parameters and geometry.
    fn refresh_content(&mut self, _params: &ParameterSet, _geometry: Geometry) {}

    fn size_limits(&self) -> SizeLimits {
        SizeLimits::DEFAULT
    }

    /// Whether the content depends on the widget's size.
    fn refreshes_on_resize(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any;
}
