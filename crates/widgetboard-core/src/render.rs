//! Seams for the external content and export renderers.

use crate::geometry::Geometry;
use crate::params::ParameterSet;
use crate::widget::Widget;
use serde::{Deserialize, Serialize};

/// Produces the visual markup of one widget from its parameters and box.
pub trait ContentRenderer {
    fn render(&self, kind: &str, parameters: &ParameterSet, geometry: Geometry) -> String;
}

/// Renders every widget as its capitalised type name.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl ContentRenderer for PlaceholderRenderer {
    fn render(&self, kind: &str, _parameters: &ParameterSet, _geometry: Geometry) -> String {
        let mut chars = kind.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// A finished widget as handed to export renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub z_index: i64,
    pub rendered_markup: String,
}

impl ExportRecord {
    pub fn new(widget: &Widget, rendered_markup: String) -> Self {
        let geometry = widget.geometry();
        Self {
            kind: widget.kind().to_string(),
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            z_index: widget.z_index(),
            rendered_markup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_label() {
        let params = ParameterSet::new();
        let geometry = Geometry::new(0, 0, 10, 10);
        assert_eq!(PlaceholderRenderer.render("todo", &params, geometry), "Todo");
        assert_eq!(PlaceholderRenderer.render("", &params, geometry), "");
    }

    #[test]
    fn test_export_record_json() {
        let record = ExportRecord {
            kind: "badge".into(),
            x: 1,
            y: 2,
            width: 100,
            height: 40,
            z_index: 7,
            rendered_markup: "Badge".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "badge");
        assert_eq!(json["zIndex"], 7);
        assert_eq!(json["renderedMarkup"], "Badge");
    }
}
