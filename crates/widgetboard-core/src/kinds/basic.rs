//! Plain colored rectangle.

use crate::params::ParameterSet;
use crate::widget::WidgetKind;
use std::any::Any;

/// A rectangle with only the common parameters.
#[derive(Debug, Default)]
pub struct BasicWidget;

impl WidgetKind for BasicWidget {
    fn define_parameters(&self, _params: &mut ParameterSet) {}

    fn refreshes_on_resize(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
