//! Command-line arguments.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "widgetboard", version, about = "Edit WidgetBoard canvas documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List widget types
    Kinds,
    /// List saved documents
    List,
    /// Create an empty canvas
    New {
        doc: String,
        /// Canvas width in pixels
        #[arg(requires = "height", value_parser = clap::value_parser!(i32).range(1..))]
        width: Option<i32>,
        /// Canvas height in pixels
        #[arg(value_parser = clap::value_parser!(i32).range(1..))]
        height: Option<i32>,
    },
    /// Add a widget on top
    Add {
        doc: String,
        /// Widget type; the configured default when omitted
        kind: Option<String>,
        #[arg(requires = "y", allow_negative_numbers = true)]
        x: Option<i32>,
        #[arg(allow_negative_numbers = true)]
        y: Option<i32>,
    },
    /// Delete a widget
    Remove { doc: String, id: String },
    /// List widgets, top layer first
    Layers { doc: String },
    /// Print a widget's parameters
    Show { doc: String, id: String },
    /// Move a widget up one layer
    Raise { doc: String, id: String },
    /// Move a widget down one layer
    Lower { doc: String, id: String },
    /// Bring a widget to the front
    Front { doc: String, id: String },
    /// Send a widget to the back
    Back { doc: String, id: String },
    /// Set a widget parameter
    Set {
        doc: String,
        id: String,
        name: String,
        /// Read as a JSON scalar when it is one, else as text
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Print export records as JSON
    Export { doc: String },
}
