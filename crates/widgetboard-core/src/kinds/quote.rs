//! Quote card.
//!
//! The quote text and author are supplied by the host at runtime and are not part of the
//! saved parameters.

use super::int_value;
use crate::params::{ParamValue, Parameter, ParameterSet};
use crate::widget::WidgetKind;
use std::any::Any;

const VISUAL: &[&str] = &[
    "quote",
    "author",
    "textColor",
    "authorColor",
    "showAuthor",
    "quoteFontSize",
    "authorFontSize",
    "backgroundColor",
];

#[derive(Debug, Clone)]
pub struct QuoteWidget {
    pub quote: String,
    pub author: String,
    pub text_color: String,
    pub author_color: String,
    pub show_author: bool,
    pub quote_font_size: i64,
    pub author_font_size: i64,
    pub background_color: String,
}

impl Default for QuoteWidget {
    fn default() -> Self {
        Self {
            quote: String::new(),
            author: String::new(),
            text_color: "#333".to_string(),
            author_color: "#555".to_string(),
            show_author: true,
            quote_font_size: 18,
            author_font_size: 14,
            background_color: "#fff".to_string(),
        }
    }
}

impl QuoteWidget {
    /// Author line, when there is one to show.
    pub fn attribution(&self) -> Option<&str> {
        (self.show_author && !self.author.is_empty()).then_some(self.author.as_str())
    }
}

impl WidgetKind for QuoteWidget {
    fn define_parameters(&self, params: &mut ParameterSet) {
        params.insert("textColor", Parameter::color("Quote Text Color", &self.text_color));
        params.insert("authorColor", Parameter::color("Author Color", &self.author_color));
        params.insert("showAuthor", Parameter::boolean("Show Author", self.show_author));
        params.insert(
            "quoteFontSize",
            Parameter::integer("Quote Font Size", self.quote_font_size).min(10.0).max(64.0),
        );
        params.insert(
            "authorFontSize",
            Parameter::integer("Author Font Size", self.author_font_size).min(8.0).max(48.0),
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
            "quote" => self.quote = value.to_string(),
            "author" => self.author = value.to_string(),
            "textColor" => self.text_color = value.to_string(),
            "authorColor" => self.author_color = value.to_string(),
            "showAuthor" => self.show_author = value.truthy(),
            "quoteFontSize" => self.quote_font_size = int_value(value),
            "authorFontSize" => self.author_font_size = int_value(value),
            "backgroundColor" => self.background_color = value.to_string(),
            _ => return false,
        }
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::widget::Widget;

    #[test]
    fn test_host_supplied_quote_is_not_a_parameter() {
        let mut widget = Widget::new(
            "quote",
            Box::new(QuoteWidget::default()),
            Geometry::new(0, 0, 280, 180),
            1,
        );
        let change = widget.update_property("author", "Ada Lovelace".into());
        assert!(change.content_refreshed);
        assert!(widget.parameter("author").is_none());
        assert!(widget.attribute("author").is_none());

        let quote = widget.behavior_as::<QuoteWidget>().unwrap();
        assert_eq!(quote.attribution(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_hidden_author() {
        let mut quote = QuoteWidget::default();
        quote.author = "Someone".to_string();
        quote.apply_property_change("showAuthor", &false.into());
        assert_eq!(quote.attribution(), None);
    }
}
