//! Canvas store: the live widget collection, selection and layer counter.

use crate::events::CanvasEvent;
use crate::geometry::{CanvasSize, Geometry};
use crate::params::ParamValue;
use crate::registry::{RegistryError, WidgetRegistry};
use crate::render::{ContentRenderer, ExportRecord};
use crate::widget::{PropertyChange, Widget, WidgetId};
use crate::zorder;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default canvas background.
pub const DEFAULT_CANVAS_BACKGROUND: &str = "#ffffff";

/// The fixed-size drawing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSurface {
    pub width: i32,
    pub height: i32,
    pub background_color: String,
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background_color: DEFAULT_CANVAS_BACKGROUND.to_string(),
        }
    }
}

impl CanvasSurface {
    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }
}

/// Single source of truth for the widgets on a canvas.
///
/// Widgets are kept in insertion order; layering comes from their z-index alone. The
/// selection is held by id so removing a widget can never leave it dangling.
#[derive(Debug)]
pub struct CanvasStore {
    surface: CanvasSurface,
    widgets: Vec<Widget>,
    selected: Option<WidgetId>,
    /// Strictly greater than every assigned z-index.
    next_z_index: i64,
    events: Vec<CanvasEvent>,
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new(CanvasSurface::default())
    }
}

impl CanvasStore {
    pub fn new(surface: CanvasSurface) -> Self {
        Self {
            surface,
            widgets: Vec::new(),
            selected: None,
            next_z_index: 1,
            events: Vec::new(),
        }
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    pub fn set_surface(&mut self, surface: CanvasSurface) {
        self.surface = surface;
    }

    /// Widgets in insertion order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn get(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id() == id)
    }

    pub fn get_mut(&mut self, id: &WidgetId) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id() == id)
    }

    fn index_of(&self, id: &WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id() == id)
    }

    pub fn next_z_index(&self) -> i64 {
        self.next_z_index
    }

    /// Add an already constructed widget. The counter is advanced past its z-index.
    pub fn insert(&mut self, widget: Widget) -> WidgetId {
        let id = widget.id().clone();
        self.widgets.push(widget);
        zorder::raise_counter(&self.widgets, &mut self.next_z_index);
        self.events.push(CanvasEvent::WidgetAdded { id: id.clone() });
        id
    }

    /// Create a widget through the registry on top of the stack and add it.
    pub fn add_widget(
        &mut self,
        registry: &WidgetRegistry,
        kind: &str,
        x: i32,
        y: i32,
        width: Option<i32>,
        height: Option<i32>,
    ) -> Result<WidgetId, RegistryError> {
        let z_index = self.next_z_index;
        let widget = registry.create(kind, x, y, width, height, z_index)?;
        self.next_z_index += 1;
        log::debug!("Added {} widget {}", kind, widget.id());
        Ok(self.insert(widget))
    }

    /// Destroy a widget and drop it from the store, clearing the selection if it pointed here.
    pub fn remove(&mut self, id: &WidgetId) -> Option<Widget> {
        let index = self.index_of(id)?;
        let mut widget = self.widgets.remove(index);
        widget.destroy();
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
            self.events.push(CanvasEvent::SelectionChanged { selected: None });
        }
        self.events.push(CanvasEvent::WidgetRemoved { id: id.clone() });
        Some(widget)
    }

    /// Destroy every widget. The z-index counter keeps its value.
    pub fn clear(&mut self) {
        for widget in &mut self.widgets {
            widget.destroy();
        }
        self.widgets.clear();
        self.selected = None;
        self.events.push(CanvasEvent::CanvasCleared);
    }

    /// Select one widget exclusively. Returns false for unknown ids.
    pub fn select(&mut self, id: &WidgetId) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        for widget in &mut self.widgets {
            let selected = widget.id() == id;
            widget.set_selected(selected);
        }
        self.selected = Some(id.clone());
        self.events.push(CanvasEvent::SelectionChanged {
            selected: Some(id.clone()),
        });
        true
    }

    pub fn deselect_all(&mut self) {
        for widget in &mut self.widgets {
            widget.set_selected(false);
        }
        if self.selected.take().is_some() {
            self.events.push(CanvasEvent::SelectionChanged { selected: None });
        }
    }

    /// The selected widget, looked up in the live collection.
    pub fn selected(&self) -> Option<&Widget> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn selected_id(&self) -> Option<&WidgetId> {
        self.selected.as_ref()
    }

    /// Write a property through the coercing update path.
    pub fn update_property(
        &mut self,
        id: &WidgetId,
        name: &str,
        value: ParamValue,
    ) -> Option<PropertyChange> {
        let widget = self.get_mut(id)?;
        let change = widget.update_property(name, value);
        let geometry = widget.geometry();

        self.events.push(CanvasEvent::PropertyChanged {
            id: id.clone(),
            name: name.to_string(),
            value: change.value.clone(),
        });
        if change.geometry_changed {
            self.events.push(CanvasEvent::GeometryChanged {
                id: id.clone(),
                geometry,
            });
        }
        if change.content_refreshed {
            self.events.push(CanvasEvent::ContentRefreshed { id: id.clone() });
        }
        Some(change)
    }

    /// Move a widget through the position fast path, skipping coercion.
    pub fn set_position(&mut self, id: &WidgetId, x: i32, y: i32) -> bool {
        let Some(widget) = self.get_mut(id) else {
            return false;
        };
        widget.set_position(x, y);
        let geometry = widget.geometry();
        self.geometry_committed(id, geometry);
        true
    }

    /// Replace a widget's box, refreshing its content if the kind depends on size.
    pub fn set_geometry(&mut self, id: &WidgetId, geometry: Geometry) -> bool {
        let Some(widget) = self.get_mut(id) else {
            return false;
        };
        let resized = widget.geometry().width != geometry.width
            || widget.geometry().height != geometry.height;
        widget.set_geometry(geometry);
        let refresh = resized && widget.behavior().refreshes_on_resize();
        if refresh {
            widget.refresh_content();
        }

        self.geometry_committed(id, geometry);
        if refresh {
            self.events.push(CanvasEvent::ContentRefreshed { id: id.clone() });
        }
        true
    }

    fn geometry_committed(&mut self, id: &WidgetId, geometry: Geometry) {
        self.events.push(CanvasEvent::GeometryChanged {
            id: id.clone(),
            geometry,
        });
        if self.selected.as_ref() == Some(id) {
            self.events.push(CanvasEvent::PanelSync {
                id: id.clone(),
                geometry,
            });
        }
    }

    pub fn bring_to_front(&mut self, id: &WidgetId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        zorder::bring_to_front(&mut self.widgets, index, &mut self.next_z_index);
        self.layer_changed(index);
        true
    }

    pub fn send_to_back(&mut self, id: &WidgetId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let changed = zorder::send_to_back(&mut self.widgets, index);
        if changed {
            self.layer_changed(index);
        }
        changed
    }

    pub fn move_up(&mut self, id: &WidgetId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let changed = zorder::move_up(&mut self.widgets, index, &mut self.next_z_index);
        if changed {
            self.layer_changed(index);
        }
        changed
    }

    pub fn move_down(&mut self, id: &WidgetId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let changed = zorder::move_down(&mut self.widgets, index);
        if changed {
            self.layer_changed(index);
        }
        changed
    }

    fn layer_changed(&mut self, index: usize) {
        let widget = &self.widgets[index];
        log::debug!("Widget {} now at z-index {}", widget.id(), widget.z_index());
        self.events.push(CanvasEvent::LayerChanged {
            id: widget.id().clone(),
            z_index: widget.z_index(),
        });
    }

    /// Widgets from the top layer down.
    pub fn layers(&self) -> Vec<&Widget> {
        zorder::layer_order(&self.widgets)
            .into_iter()
            .map(|i| &self.widgets[i])
            .collect()
    }

    /// Topmost widget containing a canvas point.
    pub fn widget_at(&self, point: Point) -> Option<&WidgetId> {
        self.layers()
            .into_iter()
            .find(|w| w.geometry().contains(point))
            .map(Widget::id)
    }

    /// Take the queued change notifications.
    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only export records, top layer first.
    pub fn export(&self, renderer: &dyn ContentRenderer) -> Vec<ExportRecord> {
        self.layers()
            .into_iter()
            .map(|w| ExportRecord::new(w, renderer.render(w.kind(), w.parameters(), w.geometry())))
            .collect()
    }

    pub(crate) fn restore_widget(&mut self, mut widget: Widget, id: WidgetId, z_index: i64) -> WidgetId {
        widget.override_id(id);
        widget.set_z_index(z_index);
        self.insert(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PlaceholderRenderer;

    fn store_with(kinds: &[&str]) -> (CanvasStore, Vec<WidgetId>) {
        let registry = WidgetRegistry::builtin();
        let mut store = CanvasStore::default();
        let ids = kinds
            .iter()
            .map(|kind| store.add_widget(&registry, kind, 50, 50, None, None).unwrap())
            .collect();
        store.drain_events();
        (store, ids)
    }

    fn assert_z_distinct(store: &CanvasStore) {
        let mut zs: Vec<i64> = store.widgets().iter().map(Widget::z_index).collect();
        zs.sort();
        zs.dedup();
        assert_eq!(zs.len(), store.len());
        assert!(store.widgets().iter().all(|w| w.z_index() < store.next_z_index()));
    }

    #[test]
    fn test_add_assigns_increasing_z() {
        let (store, ids) = store_with(&["basic", "text", "badge"]);
        let zs: Vec<i64> = ids.iter().map(|id| store.get(id).unwrap().z_index()).collect();
        assert_eq!(zs, vec![1, 2, 3]);
        assert_eq!(store.next_z_index(), 4);
        assert_eq!(store.layers()[0].id(), &ids[2]);
    }

    #[test]
    fn test_add_unknown_type() {
        let registry = WidgetRegistry::builtin();
        let mut store = CanvasStore::default();
        let result = store.add_widget(&registry, "clock", 0, 0, None, None);
        assert!(matches!(result, Err(RegistryError::UnknownType(_))));
        assert!(store.is_empty());
        assert_eq!(store.next_z_index(), 1);
    }

    #[test]
    fn test_select_is_exclusive() {
        let (mut store, ids) = store_with(&["basic", "basic"]);
        assert!(store.select(&ids[0]));
        assert!(store.select(&ids[1]));
        assert!(!store.get(&ids[0]).unwrap().is_selected());
        assert!(store.get(&ids[1]).unwrap().is_selected());
        assert_eq!(store.selected().unwrap().id(), &ids[1]);
        assert!(!store.select(&WidgetId::from("missing")));
    }

    #[test]
    fn test_remove_clears_selection() {
        let (mut store, ids) = store_with(&["basic", "text"]);
        store.select(&ids[1]);
        let removed = store.remove(&ids[1]).unwrap();
        assert!(!removed.is_attached());
        assert!(store.selected().is_none());
        assert!(store.get(&ids[1]).is_none());

        let events = store.drain_events();
        assert!(events.contains(&CanvasEvent::SelectionChanged { selected: None }));
        assert!(events.contains(&CanvasEvent::WidgetRemoved { id: ids[1].clone() }));
    }

    #[test]
    fn test_clear_keeps_counter() {
        let (mut store, _) = store_with(&["basic", "basic"]);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.next_z_index(), 3);
    }

    #[test]
    fn test_bring_to_front_is_max() {
        let (mut store, ids) = store_with(&["basic", "text", "image"]);
        store.bring_to_front(&ids[0]);
        let top = store
            .widgets()
            .iter()
            .max_by_key(|w| w.z_index())
            .unwrap();
        assert_eq!(top.id(), &ids[0]);
        assert_z_distinct(&store);
    }

    #[test]
    fn test_layer_commands_keep_z_distinct() {
        let (mut store, ids) = store_with(&["basic", "text", "image", "badge"]);
        store.move_up(&ids[0]);
        assert_z_distinct(&store);
        store.move_down(&ids[3]);
        assert_z_distinct(&store);
        store.send_to_back(&ids[2]);
        assert_z_distinct(&store);
        store.bring_to_front(&ids[1]);
        assert_z_distinct(&store);

        assert_eq!(store.layers()[0].id(), &ids[1]);
        assert_eq!(store.layers()[3].id(), &ids[2]);
    }

    #[test]
    fn test_update_property_events() {
        let (mut store, ids) = store_with(&["text"]);
        let change = store
            .update_property(&ids[0], "width", "abc".into())
            .unwrap();
        assert_eq!(change.value, ParamValue::Int(0));
        assert_eq!(store.get(&ids[0]).unwrap().geometry().width, 0);

        let events = store.drain_events();
        assert!(matches!(events[0], CanvasEvent::PropertyChanged { .. }));
        assert!(matches!(events[1], CanvasEvent::GeometryChanged { .. }));
    }

    #[test]
    fn test_position_fast_path_syncs_panel_when_selected() {
        let (mut store, ids) = store_with(&["basic"]);
        store.set_position(&ids[0], 10, 20);
        assert!(
            !store
                .drain_events()
                .iter()
                .any(|e| matches!(e, CanvasEvent::PanelSync { .. }))
        );

        store.select(&ids[0]);
        store.set_position(&ids[0], 30, 40);
        let widget = store.get(&ids[0]).unwrap();
        assert_eq!(widget.parameters().value("x"), Some(&ParamValue::Int(30)));
        assert!(
            store
                .drain_events()
                .iter()
                .any(|e| matches!(e, CanvasEvent::PanelSync { .. }))
        );
    }

    #[test]
    fn test_resize_refreshes_size_dependent_content() {
        let (mut store, ids) = store_with(&["calendar", "basic"]);
        let before = store.get(&ids[0]).unwrap().content_revision();
        store.set_geometry(&ids[0], Geometry::new(50, 50, 200, 300));
        assert_eq!(store.get(&ids[0]).unwrap().content_revision(), before + 1);

        let before = store.get(&ids[1]).unwrap().content_revision();
        store.set_geometry(&ids[1], Geometry::new(50, 50, 200, 300));
        assert_eq!(store.get(&ids[1]).unwrap().content_revision(), before);
    }

    #[test]
    fn test_widget_at_picks_topmost() {
        let (mut store, ids) = store_with(&["basic", "basic"]);
        let point = Point::new(60.0, 60.0);
        assert_eq!(store.widget_at(point), Some(&ids[1]));
        store.bring_to_front(&ids[0]);
        assert_eq!(store.widget_at(point), Some(&ids[0]));
        assert_eq!(store.widget_at(Point::new(700.0, 500.0)), None);
    }

    #[test]
    fn test_export_in_layer_order() {
        let (store, ids) = store_with(&["basic", "text"]);
        let records = store.export(&PlaceholderRenderer);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, "text");
        assert_eq!(records[1].z_index, store.get(&ids[0]).unwrap().z_index());
    }
}
