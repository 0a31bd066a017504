//! Image from a URL.

use super::{float_value, int_value};
use crate::params::{ParamValue, Parameter, ParameterSet};
use crate::widget::WidgetKind;
use std::any::Any;

const VISUAL: &[&str] = &["imageSrc", "borderRadius", "opacity", "objectFit", "backgroundColor"];

/// Displays an image with customizable fit and appearance.
#[derive(Debug, Clone)]
pub struct ImageWidget {
    /// Image URL; empty shows a placeholder.
    pub image_src: String,
    /// Corner radius in pixels.
    pub border_radius: i64,
    pub opacity: f64,
    /// CSS `object-fit` mode.
    pub object_fit: String,
    pub background_color: String,
}

impl Default for ImageWidget {
    fn default() -> Self {
        Self {
            image_src: String::new(),
            border_radius: 8,
            opacity: 1.0,
            object_fit: "cover".to_string(),
            background_color: "#84fab0".to_string(),
        }
    }
}

impl ImageWidget {
    /// Whether an image source is set.
    pub fn has_image(&self) -> bool {
        !self.image_src.is_empty()
    }
}

impl WidgetKind for ImageWidget {
    fn define_parameters(&self, params: &mut ParameterSet) {
        params.insert("backgroundColor", Parameter::color("Background", &self.background_color));
        params.insert("imageSrc", Parameter::text("Image URL", &self.image_src));
        params.insert(
            "borderRadius",
            Parameter::slider("Border Radius", self.border_radius, 0.0, 50.0, 1.0),
        );
        params.insert("opacity", Parameter::slider("Opacity", self.opacity, 0.1, 1.0, 0.1));
        params.insert(
            "objectFit",
            Parameter::select(
                "Image Fit",
                self.object_fit.as_str(),
                &[
                    ("cover", "Cover"),
                    ("contain", "Contain"),
                    ("fill", "Fill"),
                    ("scale-down", "Scale Down"),
                ],
            ),
        );
    }

    fn visual_properties(&self) -> &'static [&'static str] {
        VISUAL
    }

    fn apply_property_change(&mut self, name: &str, value: &ParamValue) -> bool {
        match name {
            "imageSrc" => self.image_src = value.to_string(),
            "borderRadius" => self.border_radius = int_value(value),
            "opacity" => self.opacity = float_value(value),
            "objectFit" => self.object_fit = value.to_string(),
            "backgroundColor" => self.background_color = value.to_string(),
            _ => return false,
        }
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
