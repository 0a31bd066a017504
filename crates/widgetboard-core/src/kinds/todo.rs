//! Fixed-height to-do list.

use super::int_value;
use crate::geometry::Geometry;
use crate::params::{ParamValue, Parameter, ParameterSet};
use crate::widget::WidgetKind;
use std::any::Any;

const VISUAL: &[&str] = &["rows", "showBullets", "bulletStyle", "items", "backgroundColor"];

/// Most rows a list shows.
pub const MAX_ROWS: i64 = 50;

/// A list showing up to `rows` items, one per line of the `items` parameter.
#[derive(Debug, Clone)]
pub struct TodoWidget {
    pub rows: i64,
    pub show_bullets: bool,
    pub bullet_style: String,
    /// Raw multi-line item text.
    pub items: String,
    pub background_color: String,
    visible: Vec<String>,
}

impl Default for TodoWidget {
    fn default() -> Self {
        Self {
            rows: 5,
            show_bullets: true,
            bullet_style: "checkbox".to_string(),
            items: String::new(),
            background_color: "#d0ebff".to_string(),
            visible: Vec::new(),
        }
    }
}

impl TodoWidget {
    /// Row texts after the last refresh: exactly `rows` entries, blank past the last item.
    pub fn visible_items(&self) -> &[String] {
        &self.visible
    }

    /// Bullet glyph drawn before each item, if bullets are shown.
    pub fn bullet(&self) -> Option<char> {
        if !self.show_bullets {
            return None;
        }
        Some(bullet_symbol(&self.bullet_style))
    }
}

fn row_count(rows: i64) -> usize {
    usize::try_from(rows.clamp(0, MAX_ROWS)).unwrap_or(0)
}

fn bullet_symbol(style: &str) -> char {
    match style {
        "checkbox" => '☐',
        "circle" => '◦',
        "square" => '▪',
        "dash" => '–',
        _ => '•',
    }
}

/// Non-empty trimmed lines of `items`, limited to `rows` (at most [`MAX_ROWS`]).
pub fn parse_items(items: &str, rows: i64) -> Vec<String> {
    let limit = row_count(rows);
    items
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(limit)
        .map(str::to_string)
        .collect()
}

impl WidgetKind for TodoWidget {
    fn define_parameters(&self, params: &mut ParameterSet) {
        params.insert(
            "rows",
            Parameter::integer("Number of Rows", self.rows)
                .min(1.0)
                .max(MAX_ROWS as f64),
        );
        params.insert("showBullets", Parameter::boolean("Show Bullets", self.show_bullets));
        params.insert(
            "bulletStyle",
            Parameter::select(
                "Bullet Style",
                self.bullet_style.as_str(),
                &[
                    ("checkbox", "Checkbox"),
                    ("disc", "Disc"),
                    ("circle", "Circle"),
                    ("square", "Square"),
                    ("dash", "Dash"),
                ],
            ),
        );
        params.insert(
            "items",
            Parameter::multiline("List Items (one per line)", &self.items, 6),
        );
        params.insert(
            "backgroundColor",
            Parameter::color("Background Color", &self.background_color),
        );
    }

    fn visual_properties(&self) -> &'static [&'static str] {
        VISUAL
    }

    fn apply_property_change(&mut self, name: &str, value: &ParamValue) -> bool {
        match name {
            "rows" => self.rows = int_value(value),
            "showBullets" => self.show_bullets = value.truthy(),
            "bulletStyle" => self.bullet_style = value.to_string(),
            "items" => self.items = value.to_string(),
            "backgroundColor" => self.background_color = value.to_string(),
            _ => return false,
        }
        true
    }

    fn refresh_content(&mut self, _params: &ParameterSet, _geometry: Geometry) {
        self.visible = parse_items(&self.items, self.rows);
        self.visible.resize(row_count(self.rows), String::new());
    }

    fn refreshes_on_resize(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
