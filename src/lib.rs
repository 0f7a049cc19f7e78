// ABOUTME: Library module for the revealkit program.
// ABOUTME: Layered content resolution, config cascade, slide rendering, live reload and export.

// Reexport modules
pub mod bundle;
pub mod config;
pub mod errors;
pub mod export;
pub mod html;
pub mod markdown;
pub mod options;
pub mod preset;
pub mod project;
pub mod server;
pub mod settings;
pub mod slides;
pub mod utils;
pub mod vfs;
pub mod watch;

// Reexport common types and functions
pub use config::{Config, Plugin, PluginSpec, Presentation};
pub use errors::{Result, SlideError};
pub use export::export;
pub use html::{generate_index_html, write_html_to_file};
pub use options::OptionValue;
pub use preset::{GenerateOptions, Preset};
pub use project::{Project, Snapshot};
pub use server::PreviewServer;
pub use settings::Settings;
pub use slides::{EmbedMode, SlideDocument, SlideKind};
pub use vfs::{ContentFilterView, DiskFs, FileSource, MemoryFs, OverlayFs};
pub use watch::{ChangeEvent, ChangeKind, ChangeWatcher, Revision, WatchBackend, spawn_watcher};
