//! Widget instances and the per-kind capability interface.
//!
//! - `Widget` holds identity, geometry, layer and the parameter bag
//! - `WidgetKind` is implemented once per widget kind and selected through the registry
//!
//! Widgets know nothing about the canvas they live on; selection and layering across the
//! collection are owned by the canvas store.

mod instance;
mod kind;

pub use instance::{DEFAULT_BACKGROUND, PropertyChange, Widget, WidgetId, WidgetRecord};
pub use kind::WidgetKind;
