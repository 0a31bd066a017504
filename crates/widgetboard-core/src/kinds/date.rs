//! Date display with an offset from today.

use super::int_value;
use crate::geometry::Geometry;
use crate::params::{ParamValue, Parameter, ParameterSet, parse_int_prefix};
use crate::widget::WidgetKind;
use chrono::{Days, Local, NaiveDate};
use std::any::Any;

const VISUAL: &[&str] = &[
    "dateOffset",
    "dateFormat",
    "fontSize",
    "fontStyle",
    "textDecoration",
    "backgroundColor",
];

const DEFAULT_FORMAT: &str = "YYYY-MM-DD";

/// Font size of the date text: fitted to the widget, or fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFontSize {
    Auto,
    Pixels(i64),
}

impl DateFontSize {
    /// `"auto"` (any case) or a leading pixel count; anything else falls back to auto.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return DateFontSize::Auto;
        }
        match parse_int_prefix(trimmed) {
            Some(px) if px > 0 => DateFontSize::Pixels(px),
            _ => DateFontSize::Auto,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DateWidget {
    /// Days from today, negative for the past.
    pub date_offset: i64,
    pub date_format: String,
    pub font_size: DateFontSize,
    pub font_style: String,
    pub text_decoration: String,
    pub background_color: String,
    formatted: String,
}

impl Default for DateWidget {
    fn default() -> Self {
        Self {
            date_offset: 0,
            date_format: DEFAULT_FORMAT.to_string(),
            font_size: DateFontSize::Auto,
            font_style: "normal".to_string(),
            text_decoration: "none".to_string(),
            background_color: "#ffeaa7".to_string(),
            formatted: String::new(),
        }
    }
}

impl DateWidget {
    pub fn is_bold(&self) -> bool {
        self.font_style.contains("bold")
    }

    pub fn is_italic(&self) -> bool {
        self.font_style.contains("italic")
    }

    /// Date text computed on the last refresh.
    pub fn formatted(&self) -> &str {
        &self.formatted
    }
}

/// Format `today` moved by `offset` days. Unknown formats use `YYYY-MM-DD`; an offset past
/// the calendar range leaves the date unchanged.
pub fn format_date(today: NaiveDate, offset: i64, format: &str) -> String {
    let days = Days::new(offset.unsigned_abs());
    let date = if offset < 0 {
        today.checked_sub_days(days)
    } else {
        today.checked_add_days(days)
    }
    .unwrap_or(today);

    let pattern = match format {
        "YY-MM-DD" => "%y-%m-%d",
        "dddd, MMMM D" => "%A, %B %-d",
        "ddd, MMM D, YYYY" => "%a, %b %-d, %Y",
        _ => "%Y-%m-%d",
    };
    date.format(pattern).to_string()
}

impl WidgetKind for DateWidget {
    fn define_parameters(&self, params: &mut ParameterSet) {
        params.insert(
            "dateOffset",
            Parameter::integer("Day Offset", self.date_offset).min(-365.0).max(365.0),
        );
        params.insert(
            "dateFormat",
            Parameter::select(
                "Date Format",
                self.date_format.as_str(),
                &[
                    ("YYYY-MM-DD", "YYYY-MM-DD"),
                    ("YY-MM-DD", "YY-MM-DD"),
                    ("dddd, MMMM D", "Weekday, Month Day"),
                    ("ddd, MMM D, YYYY", "Short Weekday, Month Day, Year"),
                ],
            ),
        );
        params.insert("fontSize", Parameter::text("Font Size (px or auto)", "auto"));
        params.insert(
            "fontStyle",
            Parameter::select(
                "Font Style",
                self.font_style.as_str(),
                &[
                    ("normal", "Normal"),
                    ("bold", "Bold"),
                    ("italic", "Italic"),
                    ("bold italic", "Bold Italic"),
                ],
            ),
        );
        params.insert(
            "textDecoration",
            Parameter::select(
                "Text Decoration",
                self.text_decoration.as_str(),
                &[("none", "None"), ("underline", "Underline"), ("line-through", "Strikethrough")],
            ),
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
            "dateOffset" => self.date_offset = int_value(value),
            "dateFormat" => self.date_format = value.to_string(),
            "fontSize" => self.font_size = DateFontSize::parse(&value.to_string()),
            "fontStyle" => self.font_style = value.to_string(),
            "textDecoration" => self.text_decoration = value.to_string(),
            "backgroundColor" => self.background_color = value.to_string(),
            _ => return false,
        }
        true
    }

    fn refresh_content(&mut self, _params: &ParameterSet, _geometry: Geometry) {
        let today = Local::now().date_naive();
        self.formatted = format_date(today, self.date_offset, &self.date_format);
    }

    fn refreshes_on_resize(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Widget;

    fn leap_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    #[test]
    fn test_formats() {
        assert_eq!(format_date(leap_day(), 0, "YYYY-MM-DD"), "2024-02-29");
        assert_eq!(format_date(leap_day(), 0, "YY-MM-DD"), "24-02-29");
        assert_eq!(format_date(leap_day(), 0, "dddd, MMMM D"), "Thursday, February 29");
        assert_eq!(format_date(leap_day(), 0, "ddd, MMM D, YYYY"), "Thu, Feb 29, 2024");
        assert_eq!(format_date(leap_day(), 0, "D/M"), "2024-02-29");
    }

    #[test]
    fn test_offsets() {
        assert_eq!(format_date(leap_day(), 1, "dddd, MMMM D"), "Friday, March 1");
        assert_eq!(format_date(leap_day(), -60, "YYYY-MM-DD"), "2023-12-31");
        assert_eq!(format_date(leap_day(), 366, "YYYY-MM-DD"), "2025-03-01");
        assert_eq!(format_date(leap_day(), i64::MIN, "YYYY-MM-DD"), "2024-02-29");
    }

    #[test]
    fn test_refresh_formats_today() {
        let mut widget = Widget::new(
            "date",
            Box::new(DateWidget::default()),
            Geometry::new(0, 0, 160, 50),
            1,
        );
        let today = Local::now().date_naive();
        assert_eq!(
            widget.behavior_as::<DateWidget>().unwrap().formatted(),
            format_date(today, 0, DEFAULT_FORMAT)
        );

        widget.update_property("dateOffset", "-7".into());
        let today = Local::now().date_naive();
        assert_eq!(
            widget.behavior_as::<DateWidget>().unwrap().formatted(),
            format_date(today, -7, DEFAULT_FORMAT)
        );
    }

    #[test]
    fn test_font_size_parse() {
        assert_eq!(DateFontSize::parse("auto"), DateFontSize::Auto);
        assert_eq!(DateFontSize::parse(" AUTO "), DateFontSize::Auto);
        assert_eq!(DateFontSize::parse("24"), DateFontSize::Pixels(24));
        assert_eq!(DateFontSize::parse("18px"), DateFontSize::Pixels(18));
        assert_eq!(DateFontSize::parse("big"), DateFontSize::Auto);
        assert_eq!(DateFontSize::parse("0"), DateFontSize::Auto);
    }

    #[test]
    fn test_font_style_flags() {
        let mut date = DateWidget::default();
        date.apply_property_change("fontStyle", &"bold italic".into());
        assert!(date.is_bold());
        assert!(date.is_italic());
    }
}
