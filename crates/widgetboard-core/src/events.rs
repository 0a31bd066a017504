//! Notifications from the canvas store to outside collaborators.
//!
//! The store queues events as it mutates; the host drains them after each input callback
//! to update the property panel, layer list and renderers.

use crate::geometry::Geometry;
use crate::params::ParamValue;
use crate::widget::WidgetId;

/// Change notifications emitted by the canvas store.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// A widget was added or restored.
    WidgetAdded { id: WidgetId },
    /// A widget was destroyed and removed from the store.
    WidgetRemoved { id: WidgetId },
    /// Selection moved to another widget, or was cleared.
    SelectionChanged { selected: Option<WidgetId> },
    /// Position or size changed.
    GeometryChanged { id: WidgetId, geometry: Geometry },
    /// A parameter was written through the coercing update path.
    PropertyChanged { id: WidgetId, name: String, value: ParamValue },
    /// The widget's content-refresh hook ran.
    ContentRefreshed { id: WidgetId },
    /// Stacking order changed.
    LayerChanged { id: WidgetId, z_index: i64 },
    /// Live geometry of the selected widget during a drag or resize, for an open panel.
    PanelSync { id: WidgetId, geometry: Geometry },
    /// Every widget was removed.
    CanvasCleared,
}

impl CanvasEvent {
    /// Widget the event is about, if any.
    pub fn widget_id(&self) -> Option<&WidgetId> {
        match self {
            CanvasEvent::WidgetAdded { id }
            | CanvasEvent::WidgetRemoved { id }
            | CanvasEvent::GeometryChanged { id, .. }
            | CanvasEvent::PropertyChanged { id, .. }
            | CanvasEvent::ContentRefreshed { id }
            | CanvasEvent::LayerChanged { id, .. }
            | CanvasEvent::PanelSync { id, .. } => Some(id),
            CanvasEvent::SelectionChanged { selected } => selected.as_ref(),
            CanvasEvent::CanvasCleared => None,
        }
    }
}
