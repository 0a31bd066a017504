//! Versioned document format for saving and restoring a canvas.
//!
//! ```json
//! {
//!   "version": "2.0",
//!   "canvas": { "width": 800, "height": 600, "backgroundColor": "#ffffff" },
//!   "widgetStates": [ { "id": "...", "type": "text", "x": 0, "y": 0, "width": 100, "height": 80, "zIndex": 1 } ],
//!   "widgetProps": { "<id>": { "text": "Hello", "fontSize": 16 } }
//! }
//! ```
//!
//! Positions and identities live in `widgetStates`; parameter values live in `widgetProps`
//! keyed by widget id.

use crate::canvas::{CanvasStore, CanvasSurface};
use crate::params::ParamValue;
use crate::registry::WidgetRegistry;
use crate::widget::{WidgetId, WidgetRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// The only document version this codec reads and writes.
pub const DOCUMENT_VERSION: &str = "2.0";

/// Parameter values of one widget, by parameter name.
pub type WidgetProps = BTreeMap<String, ParamValue>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid document JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Document has no version")]
    MissingVersion,
    #[error("Unsupported document version: {0}")]
    UnsupportedVersion(String),
    #[error("Malformed document: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("Failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A saved canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub version: String,
    pub canvas: CanvasSurface,
    pub widget_states: Vec<WidgetRecord>,
    #[serde(default)]
    pub widget_props: BTreeMap<WidgetId, WidgetProps>,
}

impl Document {
    /// An empty document for the given surface.
    pub fn new(canvas: CanvasSurface) -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            canvas,
            widget_states: Vec::new(),
            widget_props: BTreeMap::new(),
        }
    }

    /// Snapshot a store. Widgets appear in insertion order.
    pub fn from_store(store: &CanvasStore) -> Self {
        let mut document = Self::new(store.surface().clone());
        for widget in store.widgets() {
            document.widget_states.push(widget.serialize());
            document
                .widget_props
                .insert(widget.id().clone(), widget.parameters().values());
        }
        document
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string_pretty(self).map_err(CodecError::Serialize)
    }

    /// Parse and validate a document without touching any store.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let value = parse_versioned(json)?;
        serde_json::from_value(value).map_err(CodecError::Malformed)
    }

    fn check_version(&self) -> Result<(), CodecError> {
        if self.version == DOCUMENT_VERSION {
            Ok(())
        } else {
            Err(CodecError::UnsupportedVersion(self.version.clone()))
        }
    }
}

/// Outcome of restoring a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub restored: usize,
    /// Entries dropped for an unregistered type or a repeated id.
    pub skipped: usize,
}

/// Serialize a store to document JSON.
pub fn save(store: &CanvasStore) -> Result<String, CodecError> {
    let document = Document::from_store(store);
    let json = document.to_json()?;
    log::info!("Saved canvas with {} widgets", document.widget_states.len());
    Ok(json)
}

/// Replace the store's contents with a JSON document.
///
/// Syntax and version are checked first and leave the store untouched on failure. The store
/// is then cleared; if the rest of the document turns out to be malformed the store stays
/// empty.
pub fn load(store: &mut CanvasStore, registry: &WidgetRegistry, json: &str) -> Result<LoadReport, CodecError> {
    let value = parse_versioned(json)?;

    store.clear();
    let document: Document = serde_json::from_value(value).map_err(CodecError::Malformed)?;
    Ok(restore_entries(store, registry, &document))
}

/// Replace the store's contents with an already decoded document.
pub fn restore(
    store: &mut CanvasStore,
    registry: &WidgetRegistry,
    document: &Document,
) -> Result<LoadReport, CodecError> {
    document.check_version()?;
    store.clear();
    Ok(restore_entries(store, registry, document))
}

fn parse_versioned(json: &str) -> Result<Value, CodecError> {
    let value: Value = serde_json::from_str(json).map_err(CodecError::Parse)?;
    match value.get("version") {
        None | Some(Value::Null) => Err(CodecError::MissingVersion),
        Some(Value::String(version)) if version == DOCUMENT_VERSION => Ok(value),
        Some(Value::String(version)) => Err(CodecError::UnsupportedVersion(version.clone())),
        Some(other) => Err(CodecError::UnsupportedVersion(other.to_string())),
    }
}

fn restore_entries(store: &mut CanvasStore, registry: &WidgetRegistry, document: &Document) -> LoadReport {
    store.set_surface(document.canvas.clone());

    let mut report = LoadReport::default();
    for record in &document.widget_states {
        if store.get(&record.id).is_some() {
            log::warn!("Skipping repeated widget id {}", record.id);
            report.skipped += 1;
            continue;
        }
        let mut widget = match registry.create(
            &record.kind,
            record.x,
            record.y,
            Some(record.width),
            Some(record.height),
            record.z_index,
        ) {
            Ok(widget) => widget,
            Err(e) => {
                log::warn!("Skipping widget {}: {}", record.id, e);
                report.skipped += 1;
                continue;
            }
        };

        if let Some(props) = document.widget_props.get(&record.id) {
            for (name, value) in props {
                widget.update_property(name, value.clone());
            }
        }
        store.restore_widget(widget, record.id.clone(), record.z_index);
        report.restored += 1;
    }

    log::info!(
        "Loaded canvas: {} widgets restored, {} skipped",
        report.restored,
        report.skipped
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Widget;

    fn sample_store(registry: &WidgetRegistry) -> CanvasStore {
        let mut store = CanvasStore::new(CanvasSurface {
            width: 1024,
            height: 768,
            background_color: "#fafafa".to_string(),
        });
        let text = store.add_widget(registry, "text", 10, 20, Some(200), Some(60)).unwrap();
        store.update_property(&text, "text", "Hello".into());
        store.update_property(&text, "fontSize", "24".into());
        let todo = store.add_widget(registry, "todo", 300, 40, None, None).unwrap();
        store.update_property(&todo, "items", "milk\neggs".into());
        store.add_widget(registry, "calendar", 600, 0, None, None).unwrap();
        store.send_to_back(&todo);
        store
    }

    fn records(store: &CanvasStore) -> Vec<WidgetRecord> {
        store.widgets().iter().map(Widget::serialize).collect()
    }

    #[test]
    fn test_round_trip() {
        let registry = WidgetRegistry::builtin();
        let store = sample_store(&registry);
        let json = save(&store).unwrap();

        let mut loaded = CanvasStore::default();
        let report = load(&mut loaded, &registry, &json).unwrap();
        assert_eq!(report, LoadReport { restored: 3, skipped: 0 });
        assert_eq!(loaded.surface(), store.surface());
        assert_eq!(records(&loaded), records(&store));
        for widget in store.widgets() {
            let restored = loaded.get(widget.id()).unwrap();
            assert_eq!(restored.parameters().values(), widget.parameters().values());
        }
        assert!(loaded.next_z_index() > loaded.widgets().iter().map(Widget::z_index).max().unwrap());
    }

    #[test]
    fn test_document_shape() {
        let registry = WidgetRegistry::builtin();
        let store = sample_store(&registry);
        let value: Value = serde_json::from_str(&save(&store).unwrap()).unwrap();

        assert_eq!(value["version"], "2.0");
        assert_eq!(value["canvas"]["backgroundColor"], "#fafafa");
        let first = &value["widgetStates"][0];
        assert_eq!(first["type"], "text");
        assert_eq!(first["width"], 200);
        let id = first["id"].as_str().unwrap();
        assert_eq!(value["widgetProps"][id]["text"], "Hello");
        assert_eq!(value["widgetProps"][id]["fontSize"], "24");
    }

    #[test]
    fn test_unregistered_type_is_skipped() {
        let registry = WidgetRegistry::builtin();
        let json = r##"{
            "version": "2.0",
            "canvas": { "width": 800, "height": 600, "backgroundColor": "#fff" },
            "widgetStates": [
                { "id": "a", "type": "basic", "x": 0, "y": 0, "width": 50, "height": 50, "zIndex": 4 },
                { "id": "b", "type": "clock", "x": 0, "y": 0, "width": 50, "height": 50, "zIndex": 5 },
                { "id": "c", "type": "badge", "x": 10, "y": 10, "width": 100, "height": 40, "zIndex": 9 }
            ],
            "widgetProps": { "c": { "label": "New" } }
        }"##;

        let mut store = CanvasStore::default();
        let report = load(&mut store, &registry, json).unwrap();
        assert_eq!(report, LoadReport { restored: 2, skipped: 1 });
        assert!(store.get(&"b".into()).is_none());

        let badge = store.get(&"c".into()).unwrap();
        assert_eq!(badge.z_index(), 9);
        assert_eq!(badge.parameters().value("label"), Some(&ParamValue::from("New")));
        assert_eq!(store.next_z_index(), 10);
    }

    #[test]
    fn test_missing_props_keep_defaults() {
        let registry = WidgetRegistry::builtin();
        let json = r#"{
            "version": "2.0",
            "canvas": { "width": 800, "height": 600, "backgroundColor": "white" },
            "widgetStates": [
                { "id": "t", "type": "text", "x": 5, "y": 6, "width": 120, "height": 90, "zIndex": 1 }
            ]
        }"#;
        let mut store = CanvasStore::default();
        load(&mut store, &registry, json).unwrap();
        let text = store.get(&"t".into()).unwrap();
        assert_eq!(text.geometry().width, 120);
        assert_eq!(text.parameters().value("text"), Some(&ParamValue::from("Sample Text")));
    }

    #[test]
    fn test_version_rejected_before_clear() {
        let registry = WidgetRegistry::builtin();
        let mut store = sample_store(&registry);

        let result = load(&mut store, &registry, r#"{ "version": "1.0", "canvas": {} }"#);
        assert!(matches!(result, Err(CodecError::UnsupportedVersion(v)) if v == "1.0"));
        assert_eq!(store.len(), 3);

        let result = load(&mut store, &registry, r#"{ "canvas": {} }"#);
        assert!(matches!(result, Err(CodecError::MissingVersion)));

        let result = load(&mut store, &registry, "{ not json");
        assert!(matches!(result, Err(CodecError::Parse(_))));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_malformed_after_clear_leaves_store_empty() {
        let registry = WidgetRegistry::builtin();
        let mut store = sample_store(&registry);

        // No canvas section
        let result = load(&mut store, &registry, r#"{ "version": "2.0", "widgetStates": [] }"#);
        assert!(matches!(result, Err(CodecError::Malformed(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_restore_typed_document() {
        let registry = WidgetRegistry::builtin();
        let source = sample_store(&registry);
        let document = Document::from_store(&source);

        let mut store = CanvasStore::default();
        let report = restore(&mut store, &registry, &document).unwrap();
        assert_eq!(report.restored, 3);

        let mut old = document.clone();
        old.version = "1.5".to_string();
        assert!(matches!(
            restore(&mut store, &registry, &old),
            Err(CodecError::UnsupportedVersion(_))
        ));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_from_json_validates() {
        let registry = WidgetRegistry::builtin();
        let json = save(&sample_store(&registry)).unwrap();
        let document = Document::from_json(&json).unwrap();
        assert_eq!(document.widget_states.len(), 3);
        assert!(matches!(
            Document::from_json(r#"{ "version": 2 }"#),
            Err(CodecError::UnsupportedVersion(v)) if v == "2"
        ));
    }

    #[test]
    fn test_load_clears_selection() {
        let registry = WidgetRegistry::builtin();
        let mut store = sample_store(&registry);
        let json = save(&store).unwrap();
        let first = store.widgets()[0].id().clone();
        assert!(store.select(&first));

        load(&mut store, &registry, &json).unwrap();
        assert!(store.selected().is_none());
        assert!(store.selected_id().is_none());
        assert!(store.widgets().iter().all(|w| !w.is_selected()));
        assert!(store.get(&first).is_some());
    }

    #[test]
    fn test_out_of_range_props_load() {
        let registry = WidgetRegistry::builtin();
        let json = r##"{
            "version": "2.0",
            "canvas": { "width": 800, "height": 600, "backgroundColor": "#fff" },
            "widgetStates": [
                { "id": "cal", "type": "calendar", "x": 0, "y": 0, "width": 200, "height": 400, "zIndex": 1 },
                { "id": "list", "type": "todo", "x": 300, "y": 0, "width": 220, "height": 180, "zIndex": 2 }
            ],
            "widgetProps": {
                "cal": { "endTime": 9223372036854775807, "startTime": -3 },
                "list": { "rows": "10000000000", "items": "a\nb" }
            }
        }"##;

        let mut store = CanvasStore::default();
        let report = load(&mut store, &registry, json).unwrap();
        assert_eq!(report.restored, 2);

        let calendar = store.get(&WidgetId::from("cal")).unwrap();
        assert_eq!(calendar.parameters().value("endTime"), Some(&ParamValue::Int(i64::MAX)));
        let slots = calendar.behavior_as::<crate::kinds::CalendarWidget>().unwrap().slots();
        assert_eq!(slots.len(), 24);
        assert_eq!(slots[0], "00:00");

        let todo = store.get(&WidgetId::from("list")).unwrap();
        let visible = todo.behavior_as::<crate::kinds::TodoWidget>().unwrap().visible_items();
        assert_eq!(visible.len(), 50);
    }
}
