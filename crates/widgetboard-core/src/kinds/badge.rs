//! Small label badge.

use super::int_value;
use crate::geometry::SizeLimits;
use crate::params::{ParamValue, Parameter, ParameterSet};
use crate::widget::WidgetKind;
use std::any::Any;

const VISUAL: &[&str] = &["label", "labelColor", "fontSize", "bold", "rounded", "backgroundColor"];

#[derive(Debug, Clone)]
pub struct BadgeWidget {
    pub label: String,
    pub label_color: String,
    pub font_size: i64,
    pub bold: bool,
    /// Pill-shaped corners.
    pub rounded: bool,
    pub background_color: String,
}

impl Default for BadgeWidget {
    fn default() -> Self {
        Self {
            label: "Badge".to_string(),
            label_color: "#ffffff".to_string(),
            font_size: 14,
            bold: true,
            rounded: true,
            background_color: "#ff6b6b".to_string(),
        }
    }
}

impl BadgeWidget {
    pub fn corner_radius(&self) -> i64 {
        if self.rounded { 12 } else { 0 }
    }
}

impl WidgetKind for BadgeWidget {
    fn define_parameters(&self, params: &mut ParameterSet) {
        params.insert("label", Parameter::text("Label", &self.label).max_length(40));
        params.insert("labelColor", Parameter::color("Label Color", &self.label_color));
        params.insert("fontSize", Parameter::slider("Font Size", self.font_size, 10.0, 48.0, 1.0));
        params.insert("bold", Parameter::boolean("Bold", self.bold));
        params.insert("rounded", Parameter::boolean("Rounded Corners", self.rounded));
        params.insert("backgroundColor", Parameter::color("Badge Color", &self.background_color));
    }

    fn visual_properties(&self) -> &'static [&'static str] {
        VISUAL
    }

    fn apply_property_change(&mut self, name: &str, value: &ParamValue) -> bool {
        match name {
            "label" => self.label = value.to_string(),
            "labelColor" => self.label_color = value.to_string(),
            "fontSize" => self.font_size = int_value(value),
            "bold" => self.bold = value.truthy(),
            "rounded" => self.rounded = value.truthy(),
            "backgroundColor" => self.background_color = value.to_string(),
            _ => return false,
        }
        true
    }

    fn size_limits(&self) -> SizeLimits {
        SizeLimits { min: 20, max: 600 }
    }

    fn refreshes_on_resize(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
