//! Pointer-driven drag and resize.
//!
//! Each widget under interaction gets an `InteractionController`; the `PointerRouter` owns
//! at most one active controller and routes canvas-wide pointer events to it, so a fast
//! pointer leaving the widget mid-gesture still moves it and a release anywhere ends it.

use crate::canvas::CanvasStore;
use crate::geometry::{
    BORDER_BAND, Geometry, ResizeDirection, border_direction, clamp_position, resize_from_edge,
};
use crate::input::{MouseButton, PointerEvent};
use crate::widget::WidgetId;
use kurbo::{Point, Vec2};
use std::fmt;

/// Gesture state of one widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Moving the whole widget. `offset` is pointer minus widget origin at pointer-down.
    Dragging { offset: Vec2 },
    /// Dragging one or two edges.
    Resizing {
        direction: ResizeDirection,
        start_pointer: Point,
        start_geometry: Geometry,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

/// Pointer affordance shown over a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Move,
    Grabbing,
    Resize(ResizeDirection),
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Default => f.write_str("default"),
            Cursor::Move => f.write_str("move"),
            Cursor::Grabbing => f.write_str("grabbing"),
            Cursor::Resize(direction) => write!(f, "{}-resize", direction),
        }
    }
}

/// Cursor for a pointer over `geometry`: resize in the border band, move elsewhere.
pub fn hover_cursor(geometry: Geometry, position: Point) -> Cursor {
    let local = geometry.to_local(position);
    match border_direction(local, geometry.width as f64, geometry.height as f64, BORDER_BAND) {
        Some(direction) => Cursor::Resize(direction),
        None => Cursor::Move,
    }
}

/// Drag/resize state machine for one widget.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
    cursor: Cursor,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Start a drag or resize. Returns false when a gesture is already running or the widget
    /// is gone.
    pub fn pointer_down(&mut self, store: &mut CanvasStore, id: &WidgetId, position: Point) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        let Some(geometry) = store.get(id).map(|w| w.geometry()) else {
            return false;
        };

        let local = geometry.to_local(position);
        let band = border_direction(local, geometry.width as f64, geometry.height as f64, BORDER_BAND);
        store.bring_to_front(id);

        match band {
            Some(direction) => {
                log::debug!("Resizing {} from {}", id, direction);
                self.state = InteractionState::Resizing {
                    direction,
                    start_pointer: position,
                    start_geometry: geometry,
                };
                self.cursor = Cursor::Resize(direction);
            }
            None => {
                log::debug!("Dragging {}", id);
                self.state = InteractionState::Dragging {
                    offset: position - geometry.origin(),
                };
                self.cursor = Cursor::Grabbing;
            }
        }
        true
    }

    /// Advance the gesture, or update the hover cursor while idle.
    pub fn pointer_move(&mut self, store: &mut CanvasStore, id: &WidgetId, position: Point) {
        match self.state {
            InteractionState::Idle => {
                if let Some(widget) = store.get(id) {
                    self.cursor = hover_cursor(widget.geometry(), position);
                }
            }
            InteractionState::Dragging { offset } => {
                let Some(geometry) = store.get(id).map(|w| w.geometry()) else {
                    return;
                };
                let target = position - offset;
                let canvas = store.surface().size();
                let (x, y) = clamp_position(
                    target.x.round() as i32,
                    target.y.round() as i32,
                    geometry.width,
                    geometry.height,
                    canvas.width,
                    canvas.height,
                );
                store.set_position(id, x, y);
            }
            InteractionState::Resizing {
                direction,
                start_pointer,
                start_geometry,
            } => {
                let Some(limits) = store.get(id).map(|w| w.behavior().size_limits()) else {
                    return;
                };
                let next = resize_from_edge(
                    direction,
                    position - start_pointer,
                    start_geometry,
                    limits,
                    store.surface().size(),
                );
                store.set_geometry(id, next);
            }
        }
    }

    /// End any gesture.
    pub fn pointer_up(&mut self) {
        if !self.state.is_idle() {
            log::debug!("Gesture ended");
        }
        self.state = InteractionState::Idle;
        self.cursor = match self.cursor {
            Cursor::Grabbing => Cursor::Move,
            other => other,
        };
    }
}

/// The widget currently being dragged or resized.
#[derive(Debug, Clone)]
struct ActiveGesture {
    id: WidgetId,
    controller: InteractionController,
}

/// Canvas-level pointer dispatcher.
#[derive(Debug, Clone, Default)]
pub struct PointerRouter {
    active: Option<ActiveGesture>,
    cursor: Cursor,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widget being dragged or resized.
    pub fn active(&self) -> Option<&WidgetId> {
        self.active.as_ref().map(|gesture| &gesture.id)
    }

    /// State of the active gesture, `Idle` when there is none.
    pub fn state(&self) -> InteractionState {
        self.active
            .as_ref()
            .map_or(InteractionState::Idle, |gesture| gesture.controller.state())
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn handle(&mut self, store: &mut CanvasStore, event: PointerEvent) {
        let position = event.position();
        match event {
            PointerEvent::Down { button, .. } => self.pointer_down(store, position, button),
            PointerEvent::Move { .. } => self.pointer_move(store, position),
            PointerEvent::Up { .. } => self.pointer_up(store, position),
        }
    }

    fn pointer_down(&mut self, store: &mut CanvasStore, position: Point, button: MouseButton) {
        if button != MouseButton::Left || self.active.is_some() {
            return;
        }
        let Some(id) = store.widget_at(position).cloned() else {
            store.deselect_all();
            self.cursor = Cursor::Default;
            return;
        };

        let mut controller = InteractionController::new();
        if controller.pointer_down(store, &id, position) {
            self.cursor = controller.cursor();
            self.active = Some(ActiveGesture { id, controller });
        }
    }

    fn pointer_move(&mut self, store: &mut CanvasStore, position: Point) {
        if let Some(gesture) = &mut self.active {
            gesture.controller.pointer_move(store, &gesture.id, position);
            return;
        }
        self.cursor = store
            .widget_at(position)
            .and_then(|id| store.get(id))
            .map_or(Cursor::Default, |w| hover_cursor(w.geometry(), position));
    }

    fn pointer_up(&mut self, store: &mut CanvasStore, position: Point) {
        let Some(mut gesture) = self.active.take() else {
            return;
        };
        gesture.controller.pointer_up();

        // Releasing over the widget the gesture started on is a click
        let released_on_widget = store
            .get(&gesture.id)
            .is_some_and(|w| w.geometry().contains(position));
        if released_on_widget {
            store.select(&gesture.id);
        }
        self.cursor = gesture.controller.cursor();
    }
}
