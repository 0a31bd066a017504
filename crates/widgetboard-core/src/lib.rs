//! WidgetBoard Core Library
//!
//! Widget model, layering, pointer interaction and document format for the WidgetBoard
//! canvas editor. Rendering and UI chrome live outside this crate and read its state.

pub mod canvas;
pub mod codec;
pub mod config;
pub mod events;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod kinds;
pub mod params;
pub mod registry;
pub mod render;
pub mod storage;
pub mod widget;
mod zorder;

pub use canvas::{CanvasStore, CanvasSurface};
pub use codec::{CodecError, DOCUMENT_VERSION, Document, LoadReport};
pub use config::{ConfigError, EditorConfig};
pub use events::CanvasEvent;
pub use geometry::{Geometry, ResizeDirection, clamp_position, resize_from_edge};
pub use input::{MouseButton, PointerEvent};
pub use interaction::{Cursor, InteractionController, InteractionState, PointerRouter};
pub use params::{ParamKind, ParamValue, Parameter, ParameterSet};
pub use registry::{RegistryError, WidgetRegistry};
pub use render::{ContentRenderer, ExportRecord, PlaceholderRenderer};
pub use widget::{Widget, WidgetId, WidgetKind};
