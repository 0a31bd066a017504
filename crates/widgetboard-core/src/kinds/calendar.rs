//! Single-day calendar divided into time slots.

use super::int_value;
use crate::geometry::Geometry;
use crate::params::{ParamValue, Parameter, ParameterSet};
use crate::widget::WidgetKind;
use std::any::Any;

const VISUAL: &[&str] = &[
    "startTime",
    "endTime",
    "granularity",
    "showTime",
    "timePosition",
    "textColor",
    "labelColor",
    "borderColor",
    "labelFontSize",
    "backgroundColor",
];

const GRANULARITIES: &[i64] = &[10, 15, 30, 60, 120];

const HOURS_PER_DAY: i64 = 24;

const TIME_POSITIONS: &[(&str, &str)] = &[
    ("left-top", "Left Top"),
    ("left-middle", "Left Middle"),
    ("left-bottom", "Left Bottom"),
    ("center-top", "Center Top"),
    ("center-middle", "Center Middle"),
    ("center-bottom", "Center Bottom"),
    ("right-top", "Right Top"),
    ("right-middle", "Right Middle"),
    ("right-bottom", "Right Bottom"),
];

/// A day view with one row per time slot between `start_hour` and `end_hour`.
#[derive(Debug, Clone)]
pub struct CalendarWidget {
    pub start_hour: i64,
    pub end_hour: i64,
    /// Slot length in minutes.
    pub granularity: i64,
    pub show_time: bool,
    pub time_position: String,
    pub text_color: String,
    pub label_color: String,
    pub border_color: String,
    pub label_font_size: i64,
    pub background_color: String,
    slots: Vec<String>,
    slot_height: f64,
}

impl Default for CalendarWidget {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 23,
            granularity: 60,
            show_time: true,
            time_position: "left-top".to_string(),
            text_color: "#000000".to_string(),
            label_color: "#000000".to_string(),
            border_color: "#000000".to_string(),
            label_font_size: 10,
            background_color: "#dfe4ff".to_string(),
            slots: Vec::new(),
            slot_height: 0.0,
        }
    }
}

impl CalendarWidget {
    /// `HH:MM` label of every slot, computed on the last refresh.
    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Height of one slot row in pixels.
    pub fn slot_height(&self) -> f64 {
        self.slot_height
    }
}

/// Slot start labels for a day running from `start_hour` to `end_hour`.
///
/// Hours are held to a single day (0..=24). A trailing partial slot is kept. A non-positive
/// range or granularity yields no slots.
pub fn slot_labels(start_hour: i64, end_hour: i64, granularity: i64) -> Vec<String> {
    let start_hour = start_hour.clamp(0, HOURS_PER_DAY);
    let end_hour = end_hour.clamp(0, HOURS_PER_DAY);
    if granularity <= 0 || end_hour <= start_hour {
        return Vec::new();
    }
    let total_minutes = (end_hour - start_hour) * 60;
    let count = total_minutes / granularity + i64::from(total_minutes % granularity != 0);
    (0..count)
        .map(|i| {
            let minutes = start_hour * 60 + i * granularity;
            format!("{:02}:{:02}", minutes / 60, minutes % 60)
        })
        .collect()
}

impl WidgetKind for CalendarWidget {
    fn define_parameters(&self, params: &mut ParameterSet) {
        params.insert(
            "startTime",
            Parameter::integer("Start Hour", self.start_hour).min(0.0).max(23.0),
        );
        params.insert(
            "endTime",
            Parameter::integer("End Hour", self.end_hour).min(1.0).max(24.0),
        );
        let granularities: Vec<(i64, String)> = GRANULARITIES
            .iter()
            .map(|g| (*g, format!("{} min", g)))
            .collect();
        let options: Vec<(i64, &str)> = granularities
            .iter()
            .map(|(g, label)| (*g, label.as_str()))
            .collect();
        params.insert(
            "granularity",
            Parameter::select("Granularity", self.granularity, options.as_slice()),
        );
        params.insert("showTime", Parameter::boolean("Show Hour Labels", self.show_time));
        params.insert(
            "timePosition",
            Parameter::select("Time Label Position", self.time_position.as_str(), TIME_POSITIONS),
        );
        params.insert("textColor", Parameter::color("Text Color", &self.text_color));
        params.insert("labelColor", Parameter::color("Hour Label Color", &self.label_color));
        params.insert("borderColor", Parameter::color("Border Color", &self.border_color));
        params.insert(
            "labelFontSize",
            Parameter::integer("Hour Label Font Size", self.label_font_size).min(6.0).max(32.0),
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
            "startTime" => self.start_hour = int_value(value),
            "endTime" => self.end_hour = int_value(value),
            "granularity" => self.granularity = int_value(value),
            "showTime" => self.show_time = value.truthy(),
            "timePosition" => self.time_position = value.to_string(),
            "textColor" => self.text_color = value.to_string(),
            "labelColor" => self.label_color = value.to_string(),
            "borderColor" => self.border_color = value.to_string(),
            "labelFontSize" => self.label_font_size = int_value(value),
            "backgroundColor" => self.background_color = value.to_string(),
            _ => return false,
        }
        true
    }

    fn refresh_content(&mut self, _params: &ParameterSet, geometry: Geometry) {
        self.slots = slot_labels(self.start_hour, self.end_hour, self.granularity);
        self.slot_height = if self.slots.is_empty() {
            0.0
        } else {
            geometry.height as f64 / self.slots.len() as f64
        };
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Widget;

    #[test]
    fn test_hourly_slots() {
        let slots = slot_labels(6, 9, 60);
        assert_eq!(slots, vec!["06:00", "07:00", "08:00"]);
    }

    #[test]
    fn test_quarter_hour_slots() {
        let slots = slot_labels(9, 10, 15);
        assert_eq!(slots, vec!["09:00", "09:15", "09:30", "09:45"]);
    }

    #[test]
    fn test_partial_trailing_slot() {
        // 60 minutes in 120-minute slots still shows one row
        assert_eq!(slot_labels(8, 9, 120), vec!["08:00"]);
    }

    #[test]
    fn test_empty_range() {
        assert!(slot_labels(10, 10, 60).is_empty());
        assert!(slot_labels(12, 9, 60).is_empty());
        assert!(slot_labels(9, 12, 0).is_empty());
    }

    #[test]
    fn test_hours_held_to_one_day() {
        assert_eq!(slot_labels(-5, 2, 60), vec!["00:00", "01:00"]);
        assert_eq!(slot_labels(22, i64::MAX, 60), vec!["22:00", "23:00"]);
        assert_eq!(slot_labels(i64::MIN, i64::MAX, i64::MAX), vec!["00:00"]);
    }

    #[test]
    fn test_granularity_change_recomputes_slots() {
        let mut widget = Widget::new(
            "calendar",
            Box::new(CalendarWidget::default()),
            Geometry::new(0, 0, 200, 170),
            1,
        );
        let calendar = widget.behavior_as::<CalendarWidget>().unwrap();
        assert_eq!(calendar.slots().len(), 17);
        assert_eq!(calendar.slot_height(), 10.0);

        let change = widget.update_property("granularity", "30".into());
        assert!(change.content_refreshed);
        assert_eq!(widget.behavior_as::<CalendarWidget>().unwrap().slots().len(), 34);
    }

    #[test]
    fn test_extreme_end_hour_is_bounded() {
        let mut widget = Widget::new(
            "calendar",
            Box::new(CalendarWidget::default()),
            Geometry::new(0, 0, 200, 360),
            1,
        );
        widget.update_property("endTime", "9223372036854775807".into());
        let calendar = widget.behavior_as::<CalendarWidget>().unwrap();
        assert_eq!(calendar.end_hour, 24);
        assert_eq!(calendar.slots().len(), 18);
        assert_eq!(calendar.slot_height(), 20.0);

        widget.update_property("granularity", "-15".into());
        assert!(widget.behavior_as::<CalendarWidget>().unwrap().slots().is_empty());
    }

    #[test]
    fn test_time_label_positions() {
        let widget = Widget::new(
            "calendar",
            Box::new(CalendarWidget::default()),
            Geometry::new(0, 0, 200, 400),
            1,
        );
        let position = widget.parameter("timePosition").unwrap();
        assert_eq!(position.label, "Time Label Position");
        let values: Vec<String> = position
            .constraints
            .options
            .iter()
            .map(|option| option.value.to_string())
            .collect();
        assert!(values.contains(&"left-middle".to_string()));
        assert!(values.contains(&"center-middle".to_string()));
        assert!(values.contains(&"right-middle".to_string()));
        assert!(!values.iter().any(|v| v.ends_with("-center")));
        assert_eq!(widget.parameter("showTime").unwrap().label, "Show Hour Labels");
        assert_eq!(widget.parameter("labelColor").unwrap().label, "Hour Label Color");
        assert_eq!(widget.parameter("labelFontSize").unwrap().label, "Hour Label Font Size");
    }
}
