//! Widget kind registry.
//!
//! All kinds are registered during startup; after that the registry is only read.

use crate::geometry::{Geometry, Size};
use crate::kinds::{
    BadgeWidget, BasicWidget, CalendarWidget, DateWidget, ImageWidget, QuoteWidget, TextWidget,
    TodoWidget, factory,
};
use crate::widget::{Widget, WidgetKind};
use thiserror::Error;

/// Constructor for a kind's behaviour.
pub type WidgetFactory = fn() -> Box<dyn WidgetKind>;

/// Position of a newly added widget when none is given.
pub const DEFAULT_PLACEMENT: (i32, i32) = (50, 50);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown widget type: {0}")]
    UnknownType(String),
    #[error("widget type already registered: {0}")]
    Duplicate(String),
}

/// Metadata and constructor for one widget kind.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub name: String,
    pub factory: WidgetFactory,
    pub label: String,
    pub description: String,
    pub default_size: Size,
}

#[derive(Debug, Default)]
pub struct WidgetRegistry {
    entries: Vec<RegistryEntry>,
}

impl WidgetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in kind.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let builtins: [(&str, WidgetFactory, &str, &str, Option<Size>); 8] = [
            ("basic", factory::<BasicWidget>, "Basic Rectangle", "Simple colored rectangle", None),
            ("text", factory::<TextWidget>, "Text Widget", "Text container", None),
            (
                "image",
                factory::<ImageWidget>,
                "Image Widget",
                "Displays an image with customizable fit and appearance",
                None,
            ),
            (
                "calendar",
                factory::<CalendarWidget>,
                "Day Calendar",
                "Displays a vertical day calendar with customizable times",
                Some(Size::new(200, 400)),
            ),
            (
                "date",
                factory::<DateWidget>,
                "Date Widget",
                "Displays the current date with optional offset and formatting",
                Some(Size::new(160, 50)),
            ),
            (
                "quote",
                factory::<QuoteWidget>,
                "Quote",
                "Displays a daily quote",
                Some(Size::new(280, 180)),
            ),
            (
                "todo",
                factory::<TodoWidget>,
                "To-Do List",
                "A customizable to-do checklist",
                Some(Size::new(220, 180)),
            ),
            (
                "badge",
                factory::<BadgeWidget>,
                "Badge Widget",
                "Custom label badge",
                Some(Size::new(100, 40)),
            ),
        ];

        for (name, factory, label, description, size) in builtins {
            let result = registry.register(name, factory, Some(label), description, size);
            debug_assert!(result.is_ok(), "built-in kind {} registered twice", name);
        }
        registry
    }

    /// Register a kind. The label defaults to the capitalised name and the size to 100x80.
    pub fn register(
        &mut self,
        name: &str,
        factory: WidgetFactory,
        label: Option<&str>,
        description: &str,
        default_size: Option<Size>,
    ) -> Result<(), RegistryError> {
        if self.contains(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        log::debug!("Registered widget type {}", name);
        self.entries.push(RegistryEntry {
            name: name.to_string(),
            factory,
            label: label.map_or_else(|| capitalize(name), str::to_string),
            description: description.to_string(),
            default_size: default_size.unwrap_or_default(),
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entries in registration order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Construct a widget of a registered kind.
    ///
    /// A missing or zero width or height falls back to the kind's default size.
    pub fn create(
        &self,
        kind: &str,
        x: i32,
        y: i32,
        width: Option<i32>,
        height: Option<i32>,
        z_index: i64,
    ) -> Result<Widget, RegistryError> {
        let entry = self
            .get(kind)
            .ok_or_else(|| RegistryError::UnknownType(kind.to_string()))?;

        let width = width.filter(|w| *w != 0).unwrap_or(entry.default_size.width);
        let height = height.filter(|h| *h != 0).unwrap_or(entry.default_size.height);
        let geometry = Geometry::new(x, y, width, height);
        Ok(Widget::new(kind, (entry.factory)(), geometry, z_index))
    }
}

/// Upper-case the first character.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
