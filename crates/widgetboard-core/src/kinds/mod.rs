//! Built-in widget kinds.

mod badge;
mod basic;
mod calendar;
mod date;
mod image;
mod quote;
mod text;
mod todo;

pub use badge::BadgeWidget;
pub use basic::BasicWidget;
pub use calendar::{CalendarWidget, slot_labels};
pub use date::{DateFontSize, DateWidget, format_date};
pub use image::ImageWidget;
pub use quote::QuoteWidget;
pub use text::TextWidget;
pub use todo::{TodoWidget, parse_items};

use crate::params::{ParamValue, parse_float_prefix, parse_int_prefix};
use crate::widget::WidgetKind;

/// Factory usable as a registry entry constructor.
pub fn factory<K: WidgetKind + Default>() -> Box<dyn WidgetKind> {
    Box::<K>::default()
}

/// Integer reading of a mirrored value; select and slider values may still be text.
fn int_value(value: &ParamValue) -> i64 {
    match value {
        ParamValue::Text(s) => parse_int_prefix(s).unwrap_or(0),
        other => other.as_i64().unwrap_or(0),
    }
}

fn float_value(value: &ParamValue) -> f64 {
    match value {
        ParamValue::Text(s) => parse_float_prefix(s).unwrap_or(0.0),
        other => other.as_f64().unwrap_or(0.0),
    }
}
