//! A live widget: identity, geometry, layer, parameters and kind behaviour.

use super::kind::WidgetKind;
use crate::geometry::{Geometry, MAX_WIDGET_SIZE, MIN_WIDGET_SIZE};
use crate::params::{ParamValue, Parameter, ParameterSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Default background of a widget that does not choose its own.
pub const DEFAULT_BACKGROUND: &str = "#667eea";

/// Unique identifier for widgets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Generate a fresh, never-reused id.
    pub fn generate() -> Self {
        Self(format!("widget_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Positional and identity record of a widget, as stored in documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRecord {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub z_index: i64,
}

/// What an `update_property` call changed.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange {
    /// The value after coercion.
    pub value: ParamValue,
    pub geometry_changed: bool,
    pub content_refreshed: bool,
}

/// A positioned, sized, parameterized widget.
#[derive(Debug)]
pub struct Widget {
    id: WidgetId,
    kind: String,
    geometry: Geometry,
    z_index: i64,
    parameters: ParameterSet,
    /// Instance-level mirror for property names without a descriptor.
    attributes: BTreeMap<String, ParamValue>,
    selected: bool,
    attached: bool,
    content_revision: u64,
    behavior: Box<dyn WidgetKind>,
}

impl Widget {
    /// Create a widget of the given kind. Common descriptors are defined first, then the
    /// kind's own.
    pub fn new(kind: impl Into<String>, behavior: Box<dyn WidgetKind>, geometry: Geometry, z_index: i64) -> Self {
        let mut parameters = common_parameters(geometry);
        behavior.define_parameters(&mut parameters);

        let mut widget = Self {
            id: WidgetId::generate(),
            kind: kind.into(),
            geometry,
            z_index,
            parameters,
            attributes: BTreeMap::new(),
            selected: false,
            attached: true,
            content_revision: 0,
            behavior,
        };

        // Bring the kind's typed state in line with the final descriptor values
        let defaults: Vec<(String, ParamValue)> = widget.parameters.values().into_iter().collect();
        for (name, value) in &defaults {
            widget.behavior.apply_property_change(name, value);
        }
        widget.refresh_content();
        widget
    }

    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    /// Type tag selecting this widget's registry entry.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn z_index(&self) -> i64 {
        self.z_index
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn attributes(&self) -> &BTreeMap<String, ParamValue> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&ParamValue> {
        self.attributes.get(name)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Whether the visual representation is still live.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Number of times the content-refresh hook has run.
    pub fn content_revision(&self) -> u64 {
        self.content_revision
    }

    pub fn behavior(&self) -> &dyn WidgetKind {
        self.behavior.as_ref()
    }

    /// Typed access to the kind behaviour.
    pub fn behavior_as<T: WidgetKind>(&self) -> Option<&T> {
        self.behavior.as_any().downcast_ref::<T>()
    }

    /// Coerce and store a property, mirror it onto the instance, and refresh the content if
    /// the kind declares the property visually relevant. Never fails.
    ///
    /// The descriptor keeps the coerced value; the kind sees it held to the descriptor's
    /// numeric bounds.
    pub fn update_property(&mut self, name: &str, raw: ParamValue) -> PropertyChange {
        let (value, bounded) = match self.parameters.get_mut(name) {
            Some(param) => {
                let value = param.kind.coerce(raw);
                param.value = value.clone();
                let bounded = param.constraints.bound(&value);
                (value, bounded)
            }
            None => (raw.clone(), raw),
        };

        let geometry_changed = self.mirror_geometry(name, &value);
        let tracked = self.behavior.apply_property_change(name, &bounded);
        if !geometry_changed && !tracked && !self.parameters.contains(name) {
            log::debug!("Widget {} has no parameter {:?}; kept as attribute", self.id, name);
            self.attributes.insert(name.to_string(), value.clone());
        }

        let content_refreshed = self.behavior.visual_properties().contains(&name);
        if content_refreshed {
            self.refresh_content();
        }

        PropertyChange {
            value,
            geometry_changed,
            content_refreshed,
        }
    }

    fn mirror_geometry(&mut self, name: &str, value: &ParamValue) -> bool {
        let pixels = to_pixels(value);
        match name {
            "x" => self.geometry.x = pixels,
            "y" => self.geometry.y = pixels,
            "width" => self.geometry.width = pixels,
            "height" => self.geometry.height = pixels,
            _ => return false,
        }
        true
    }

    /// Move the widget without going through coercion. Descriptor values follow.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.geometry.x = x;
        self.geometry.y = y;
        self.parameters.set_value("x", ParamValue::Int(x as i64));
        self.parameters.set_value("y", ParamValue::Int(y as i64));
    }

    /// Replace the whole box without going through coercion. Descriptor values follow.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.set_position(geometry.x, geometry.y);
        self.geometry.width = geometry.width;
        self.geometry.height = geometry.height;
        self.parameters.set_value("width", ParamValue::Int(geometry.width as i64));
        self.parameters.set_value("height", ParamValue::Int(geometry.height as i64));
    }

    /// Run the kind's content-refresh hook.
    pub fn refresh_content(&mut self) {
        self.behavior.refresh_content(&self.parameters, self.geometry);
        self.content_revision += 1;
    }

    /// Positional and identity record; parameters are stored separately.
    pub fn serialize(&self) -> WidgetRecord {
        WidgetRecord {
            id: self.id.clone(),
            kind: self.kind.clone(),
            x: self.geometry.x,
            y: self.geometry.y,
            width: self.geometry.width,
            height: self.geometry.height,
            z_index: self.z_index,
        }
    }

    /// Release the visual representation. The canvas store entry is removed separately.
    pub fn destroy(&mut self) {
        self.attached = false;
        self.selected = false;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_z_index(&mut self, z_index: i64) {
        self.z_index = z_index;
    }

    pub(crate) fn override_id(&mut self, id: WidgetId) {
        self.id = id;
    }
}

/// Descriptors every widget carries.
fn common_parameters(geometry: Geometry) -> ParameterSet {
    let mut params = ParameterSet::new();
    params.insert("x", Parameter::integer("X Position", geometry.x as i64).min(0.0));
    params.insert("y", Parameter::integer("Y Position", geometry.y as i64).min(0.0));
    params.insert(
        "width",
        Parameter::integer("Width", geometry.width as i64)
            .min(MIN_WIDGET_SIZE as f64)
            .max(MAX_WIDGET_SIZE as f64),
    );
    params.insert(
        "height",
        Parameter::integer("Height", geometry.height as i64)
            .min(MIN_WIDGET_SIZE as f64)
            .max(MAX_WIDGET_SIZE as f64),
    );
    params.insert("backgroundColor", Parameter::color("Background", DEFAULT_BACKGROUND));
    params
}

fn to_pixels(value: &ParamValue) -> i32 {
    let v = value.as_i64().unwrap_or(0);
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CanvasSize;
    use kurbo::Point;
    use std::any::Any;

    /// Minimal kind that tracks one visual property.
    #[derive(Debug, Default)]
    struct Label {
        caption: String,
        lines: i64,
        refreshes: usize,
    }

    impl WidgetKind for Label {
        fn define_parameters(&self, params: &mut ParameterSet) {
            params.insert("caption", Parameter::text("Caption", "hello"));
            params.insert("lines", Parameter::integer("Lines", 1).min(1.0).max(10.0));
            params.insert("backgroundColor", Parameter::color("Background", "#fff"));
        }

        fn visual_properties(&self) -> &'static [&'static str] {
            &["caption"]
        }

        fn apply_property_change(&mut self, name: &str, value: &ParamValue) -> bool {
            match name {
                "caption" => self.caption = value.to_string(),
                "lines" => self.lines = value.as_i64().unwrap_or(0),
                _ => return false,
            }
            true
        }

        fn refresh_content(&mut self, _params: &ParameterSet, _geometry: Geometry) {
            self.refreshes += 1;
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn label_widget() -> Widget {
        Widget::new("label", Box::new(Label::default()), Geometry::new(10, 20, 100, 80), 1)
    }

    #[test]
    fn test_new_widget_defaults() {
        let widget = label_widget();
        assert!(widget.id().as_str().starts_with("widget_"));
        assert_eq!(widget.kind(), "label");
        assert_eq!(widget.parameters().value("x"), Some(&ParamValue::Int(10)));
        assert_eq!(widget.parameters().value("backgroundColor"), Some(&ParamValue::from("#fff")));
        assert_eq!(widget.behavior_as::<Label>().unwrap().caption, "hello");
        assert_eq!(widget.content_revision(), 1);
        assert!(widget.is_attached());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(label_widget().id(), label_widget().id());
    }

    #[test]
    fn test_update_integer_parse_failure_defaults_to_zero() {
        let mut widget = label_widget();
        let change = widget.update_property("width", "abc".into());
        assert_eq!(change.value, ParamValue::Int(0));
        assert!(change.geometry_changed);
        assert_eq!(widget.geometry().width, 0);
        assert_eq!(widget.parameters().value("width"), Some(&ParamValue::Int(0)));
    }

    #[test]
    fn test_kind_sees_bounded_integer() {
        let mut widget = label_widget();
        let change = widget.update_property("lines", "9223372036854775807".into());
        assert_eq!(change.value, ParamValue::Int(i64::MAX));
        assert_eq!(widget.parameters().value("lines"), Some(&ParamValue::Int(i64::MAX)));
        assert_eq!(widget.behavior_as::<Label>().unwrap().lines, 10);

        widget.update_property("lines", "-40".into());
        assert_eq!(widget.behavior_as::<Label>().unwrap().lines, 1);
    }

    #[test]
    fn test_extreme_geometry_values_saturate() {
        let mut widget = label_widget();
        let change = widget.update_property("width", "99999999999".into());
        assert!(change.geometry_changed);
        assert_eq!(widget.geometry().width, i32::MAX);
        assert!(widget.geometry().contains(Point::new(10.0, 30.0)));
        assert!(!widget.geometry().fits_within(CanvasSize::new(800, 600)));

        widget.update_property("x", "-99999999999".into());
        assert_eq!(widget.geometry().x, i32::MIN);
        assert!(widget.geometry().contains(Point::new(-5.0, 30.0)));
        assert!(!widget.geometry().fits_within(CanvasSize::new(800, 600)));
    }

    #[test]
    fn test_update_visual_property_refreshes() {
        let mut widget = label_widget();
        let change = widget.update_property("caption", "bye".into());
        assert!(change.content_refreshed);
        assert_eq!(widget.content_revision(), 2);
        assert_eq!(widget.behavior_as::<Label>().unwrap().caption, "bye");
        assert_eq!(widget.behavior_as::<Label>().unwrap().refreshes, 2);
    }

    #[test]
    fn test_update_non_visual_property_does_not_refresh() {
        let mut widget = label_widget();
        let change = widget.update_property("backgroundColor", "#000".into());
        assert!(!change.content_refreshed);
        assert_eq!(widget.content_revision(), 1);
    }

    #[test]
    fn test_unknown_property_goes_to_attributes() {
        let mut widget = label_widget();
        widget.update_property("mood", "sunny".into());
        assert_eq!(widget.attribute("mood"), Some(&ParamValue::from("sunny")));
        assert!(widget.parameter("mood").is_none());
    }

    #[test]
    fn test_serialize_record() {
        let widget = label_widget();
        let record = widget.serialize();
        assert_eq!(record.kind, "label");
        assert_eq!((record.x, record.y, record.width, record.height), (10, 20, 100, 80));
        assert_eq!(record.z_index, 1);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "label");
        assert_eq!(json["zIndex"], 1);
    }

    #[test]
    fn test_set_geometry_mirrors_descriptors() {
        let mut widget = label_widget();
        widget.set_geometry(Geometry::new(1, 2, 30, 40));
        assert_eq!(widget.parameters().value("height"), Some(&ParamValue::Int(40)));
        assert_eq!(widget.parameters().value("x"), Some(&ParamValue::Int(1)));
    }

    #[test]
    fn test_destroy_detaches() {
        let mut widget = label_widget();
        widget.set_selected(true);
        widget.destroy();
        assert!(!widget.is_attached());
        assert!(!widget.is_selected());
    }
}
