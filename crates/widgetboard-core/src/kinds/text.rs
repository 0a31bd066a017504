//! Free text block.

use super::int_value;
use crate::params::{ParamValue, Parameter, ParameterSet};
use crate::widget::WidgetKind;
use std::any::Any;

const VISUAL: &[&str] = &[
    "text",
    "fontSize",
    "fontWeight",
    "textAlign",
    "textColor",
    "backgroundColor",
];

/// A text container with font and alignment controls.
#[derive(Debug, Clone)]
pub struct TextWidget {
    pub text: String,
    /// Font size in pixels.
    pub font_size: i64,
    pub text_color: String,
    pub background_color: String,
    /// CSS font weight (`normal`, `bold`, `300`, `600`).
    pub font_weight: String,
    pub text_align: String,
}

impl Default for TextWidget {
    fn default() -> Self {
        Self {
            text: "Sample Text".to_string(),
            font_size: 16,
            text_color: "#333".to_string(),
            background_color: "#f0f0f0".to_string(),
            font_weight: "normal".to_string(),
            text_align: "center".to_string(),
        }
    }
}

impl WidgetKind for TextWidget {
    fn define_parameters(&self, params: &mut ParameterSet) {
        params.insert(
            "text",
            Parameter::multiline("Text Content", &self.text, 3).max_length(500),
        );
        params.insert("fontSize", Parameter::slider("Font Size", self.font_size, 8.0, 72.0, 1.0));
        params.insert("textColor", Parameter::color("Text Color", &self.text_color));
        params.insert(
            "backgroundColor",
            Parameter::color("Background Color", &self.background_color),
        );
        params.insert(
            "fontWeight",
            Parameter::select(
                "Font Weight",
                self.font_weight.as_str(),
                &[("normal", "Normal"), ("bold", "Bold"), ("300", "Light"), ("600", "Semi-Bold")],
            ),
        );
        params.insert(
            "textAlign",
            Parameter::select(
                "Text Align",
                self.text_align.as_str(),
                &[("left", "Left"), ("center", "Center"), ("right", "Right")],
            ),
        );
    }

    fn visual_properties(&self) -> &'static [&'static str] {
        VISUAL
    }

    fn apply_property_change(&mut self, name: &str, value: &ParamValue) -> bool {
        match name {
            "text" => self.text = value.to_string(),
            "fontSize" => self.font_size = int_value(value),
            "textColor" => self.text_color = value.to_string(),
            "backgroundColor" => self.background_color = value.to_string(),
            "fontWeight" => self.font_weight = value.to_string(),
            "textAlign" => self.text_align = value.to_string(),
            _ => return false,
        }
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
