//! Application state and command execution.

use crate::commands::Command;
use thiserror::Error;
use widgetboard_core::canvas::{CanvasStore, CanvasSurface};
use widgetboard_core::codec::{self, CodecError, Document};
use widgetboard_core::config::{ConfigError, EditorConfig};
use widgetboard_core::params::ParamValue;
use widgetboard_core::registry::{DEFAULT_PLACEMENT, RegistryError, WidgetRegistry};
use widgetboard_core::render::PlaceholderRenderer;
use widgetboard_core::storage::{FileStorage, Storage, StorageError};
use widgetboard_core::widget::WidgetId;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no widget {0} in this document")]
    UnknownWidget(String),
    #[error("document {0} already exists")]
    DocumentExists(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// The command-line application: configuration, widget kinds and document storage.
pub struct App {
    config: EditorConfig,
    registry: WidgetRegistry,
    storage: Box<dyn Storage>,
}

impl App {
    /// Create the app with file storage in the configured (or default) directory.
    pub fn new(config: EditorConfig) -> Result<Self, AppError> {
        let storage = match &config.storage_dir {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        log::info!("Documents in {}", storage.base_path().display());
        Ok(Self::with_storage(config, Box::new(storage)))
    }

    pub fn with_storage(config: EditorConfig, storage: Box<dyn Storage>) -> Self {
        Self {
            config,
            registry: WidgetRegistry::builtin(),
            storage,
        }
    }

    /// Execute a command and return its printable output.
    pub fn run(&self, command: &Command) -> Result<String, AppError> {
        match command {
            Command::Kinds => Ok(self.kinds()),
            Command::List => Ok(pollster::block_on(self.storage.list())?.join("\n")),
            Command::New { doc, width, height } => self.create(doc, (*width).zip(*height)),
            Command::Add { doc, kind, x, y } => {
                let kind = kind.as_deref().unwrap_or(&self.config.default_kind);
                let (x, y) = (*x).zip(*y).unwrap_or(DEFAULT_PLACEMENT);
                let mut store = self.open(doc)?;
                let id = store.add_widget(&self.registry, kind, x, y, None, None)?;
                self.persist(doc, &store)?;
                Ok(id.to_string())
            }
            Command::Remove { doc, id } => self.edit(doc, id, |store, id| {
                store.remove(id);
            }),
            Command::Layers { doc } => {
                let store = self.open(doc)?;
                let lines: Vec<String> = store
                    .layers()
                    .into_iter()
                    .map(|w| {
                        let g = w.geometry();
                        format!(
                            "{:>4}  {}  {:<10} {},{} {}x{}",
                            w.z_index(),
                            w.id(),
                            w.kind(),
                            g.x,
                            g.y,
                            g.width,
                            g.height
                        )
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
            Command::Show { doc, id } => {
                let store = self.open(doc)?;
                let widget = store
                    .get(&WidgetId::from(id.as_str()))
                    .ok_or_else(|| AppError::UnknownWidget(id.clone()))?;
                Ok(serde_json::to_string_pretty(widget.parameters())?)
            }
            Command::Raise { doc, id } => self.edit(doc, id, |store, id| {
                store.move_up(id);
            }),
            Command::Lower { doc, id } => self.edit(doc, id, |store, id| {
                store.move_down(id);
            }),
            Command::Front { doc, id } => self.edit(doc, id, |store, id| {
                store.bring_to_front(id);
            }),
            Command::Back { doc, id } => self.edit(doc, id, |store, id| {
                store.send_to_back(id);
            }),
            Command::Set {
                doc,
                id,
                name,
                value,
            } => {
                let raw = parse_value(value);
                let mut stored = None;
                self.edit(doc, id, |store, id| {
                    stored = store.update_property(id, name, raw).map(|change| change.value);
                })?;
                Ok(stored.map(|v| format!("{} = {}", name, v)).unwrap_or_default())
            }
            Command::Export { doc } => {
                let store = self.open(doc)?;
                let records = store.export(&PlaceholderRenderer);
                Ok(serde_json::to_string_pretty(&records)?)
            }
        }
    }

    fn kinds(&self) -> String {
        self.registry
            .entries()
            .iter()
            .map(|entry| {
                format!(
                    "{:<10} {:<16} {:>4}x{:<4} {}",
                    entry.name,
                    entry.label,
                    entry.default_size.width,
                    entry.default_size.height,
                    entry.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn create(&self, doc: &str, size: Option<(i32, i32)>) -> Result<String, AppError> {
        if pollster::block_on(self.storage.exists(doc))? {
            return Err(AppError::DocumentExists(doc.to_string()));
        }
        let mut surface = self.config.canvas.clone();
        if let Some((width, height)) = size {
            surface.width = width;
            surface.height = height;
        }
        let document = Document::new(surface);
        pollster::block_on(self.storage.save(doc, &document))?;
        log::info!("Created document {}", doc);
        Ok(String::new())
    }

    /// Load a document into a fresh store.
    fn open(&self, doc: &str) -> Result<CanvasStore, AppError> {
        let document = pollster::block_on(self.storage.load(doc))?;
        let mut store = CanvasStore::new(CanvasSurface::default());
        let report = codec::restore(&mut store, &self.registry, &document)?;
        if report.skipped > 0 {
            log::warn!("{} widgets in {} could not be restored", report.skipped, doc);
        }
        Ok(store)
    }

    fn persist(&self, doc: &str, store: &CanvasStore) -> Result<(), AppError> {
        let document = Document::from_store(store);
        pollster::block_on(self.storage.save(doc, &document))?;
        Ok(())
    }

    /// Open a document, apply `f` to one of its widgets, and save it back.
    fn edit(
        &self,
        doc: &str,
        id: &str,
        f: impl FnOnce(&mut CanvasStore, &WidgetId),
    ) -> Result<String, AppError> {
        let mut store = self.open(doc)?;
        let id = WidgetId::from(id);
        if store.get(&id).is_none() {
            return Err(AppError::UnknownWidget(id.to_string()));
        }
        f(&mut store, &id);
        for event in store.drain_events() {
            log::debug!("{:?}", event);
        }
        self.persist(doc, &store)?;
        Ok(String::new())
    }
}

/// Read a command-line value as a JSON scalar when it is one, else as text.
fn parse_value(raw: &str) -> ParamValue {
    serde_json::from_str(raw).unwrap_or_else(|_| ParamValue::Text(raw.to_string()))
}
