// ABOUTME: Compiled-in defaults and starter presets
// ABOUTME: Exposes the embedded files as read-only in-memory file sources

use crate::errors::{Result, SlideError};
use crate::vfs::MemoryFs;

/// Default presentation configuration, the base of every cascade.
pub const DEFAULT_CONFIG: &str = include_str!("../assets/config.yml");
pub const DEFAULT_INDEX_TEMPLATE: &str = include_str!("../assets/index.html.tmpl");

pub const PRESET_NAMES: &[&str] = &["default", "demo"];

static DEFAULT_FILES: &[(&str, &[u8])] = &[
    ("config.yml", DEFAULT_CONFIG.as_bytes()),
    ("index.html.tmpl", DEFAULT_INDEX_TEMPLATE.as_bytes()),
];

static PRESET_DEFAULT: &[(&str, &[u8])] = &[(
    "slides.md",
    include_bytes!("../assets/presets/default/slides.md"),
)];

static PRESET_DEMO: &[(&str, &[u8])] = &[
    ("config.yml", include_bytes!("../assets/presets/demo/config.yml")),
    (
        "slides/01-intro.md",
        include_bytes!("../assets/presets/demo/slides/01-intro.md"),
    ),
    (
        "slides/02-layout.html",
        include_bytes!("../assets/presets/demo/slides/02-layout.html"),
    ),
    (
        "slides/03-code.md",
        include_bytes!("../assets/presets/demo/slides/03-code.md"),
    ),
    (
        "assets/css/custom.css",
        include_bytes!("../assets/presets/demo/assets/css/custom.css"),
    ),
];

/// Bundled `config.yml` and `index.html.tmpl`, layered under every project.
pub fn defaults() -> MemoryFs {
    MemoryFs::from_static(DEFAULT_FILES)
}

/// Files of a named starter preset, without the defaults.
pub fn preset(name: &str) -> Result<MemoryFs> {
    match name {
        "default" => Ok(MemoryFs::from_static(PRESET_DEFAULT)),
        "demo" => Ok(MemoryFs::from_static(PRESET_DEMO)),
        _ => Err(SlideError::UnsupportedPreset(name.to_string())),
    }
}
