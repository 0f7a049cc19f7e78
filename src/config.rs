// ABOUTME: Presentation configuration and the cascade that derives it
// ABOUTME: Merges bundled defaults, the project config.yml and per-slide metadata blocks

use crate::bundle;
use crate::errors::{Result, SlideError};
use crate::options::{OptionValue, render_option};
use crate::slides::{self, SlideDocument};
use crate::vfs::filter::FILE_CONFIG;
use crate::vfs::{self, FileSource};
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Presentation configuration. The same schema is used for the bundled
/// defaults, the project `config.yml` and markdown metadata blocks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Explicit slide order. Empty means auto-discover.
    pub slides: Vec<String>,
    pub title: String,
    pub theme: String,
    /// Base URL or path of the presentation engine files.
    pub engine: String,
    #[serde(rename = "revealjs")]
    pub options: BTreeMap<String, OptionValue>,
    /// `None` when the source does not mention plugins at all.
    pub plugins: Option<Vec<PluginSpec>>,
}

/// A plugin entry as written: a bare name or a name with an explicit source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PluginSpec {
    Name(String),
    Entry {
        name: String,
        #[serde(default)]
        src: Option<String>,
    },
}

/// A plugin with its source resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    pub name: String,
    pub src: String,
    /// True when `src` came from the built-in table and lives in the engine tree.
    pub bundled: bool,
}

/// Script path of a built-in engine plugin, relative to the engine root.
pub fn builtin_plugin_src(name: &str) -> Option<&'static str> {
    let src = match name {
        "RevealHighlight" => "plugin/highlight/highlight.js",
        "RevealMarkdown" => "plugin/markdown/markdown.js",
        "RevealSearch" => "plugin/search/search.js",
        "RevealNotes" => "plugin/notes/notes.js",
        "RevealMath" => "plugin/math/math.js",
        "RevealZoom" => "plugin/zoom/zoom.js",
        _ => return None,
    };
    Some(src)
}

impl Config {
    /// Parse a YAML document. An empty document yields an empty config.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }

    /// The compiled-in defaults.
    pub fn defaults() -> Result<Self> {
        Self::from_yaml(bundle::DEFAULT_CONFIG)
            .map_err(|e| SlideError::ConfigError(format!("bundled defaults are invalid: {}", e)))
    }

    /// Overlay `other` onto `self`: non-empty scalars and lists of `other` win,
    /// options are merged key by key.
    pub fn override_with(&mut self, other: &Config) {
        if !other.slides.is_empty() {
            self.slides = other.slides.clone();
        }
        if !other.title.is_empty() {
            self.title = other.title.clone();
        }
        if !other.theme.is_empty() {
            self.theme = other.theme.clone();
        }
        if !other.engine.is_empty() {
            self.engine = other.engine.clone();
        }
        if other.plugins.is_some() {
            self.plugins = other.plugins.clone();
        }
        for (key, value) in &other.options {
            self.options.insert(key.clone(), value.clone());
        }
    }

    /// Resolve plugin entries, filling in sources from the built-in table.
    pub fn plugins(&self) -> Result<Vec<Plugin>> {
        let Some(specs) = &self.plugins else {
            return Ok(Vec::new());
        };
        specs
            .iter()
            .map(|spec| {
                let (name, src) = match spec {
                    PluginSpec::Name(name) => (name, None),
                    PluginSpec::Entry { name, src } => (name, src.as_deref()),
                };
                match src.filter(|s| !s.is_empty()) {
                    Some(src) => Ok(Plugin {
                        name: name.clone(),
                        src: src.to_string(),
                        bundled: false,
                    }),
                    None => builtin_plugin_src(name)
                        .map(|src| Plugin {
                            name: name.clone(),
                            src: src.to_string(),
                            bundled: true,
                        })
                        .ok_or_else(|| SlideError::UnknownPlugin(name.clone())),
                }
            })
            .collect()
    }

    /// Engine options rendered as `(key, javascript literal)` pairs, sorted by key.
    pub fn engine_options(&self) -> Result<Vec<(String, String)>> {
        self.options
            .iter()
            .map(|(key, value)| Ok((key.clone(), render_option(key, value)?)))
            .collect()
    }
}

/// A fully resolved presentation: the cascaded config and the slide documents
/// it was derived from. Always rebuilt as a whole.
#[derive(Debug, Clone)]
pub struct Presentation {
    pub config: Config,
    pub slides: Vec<SlideDocument>,
}

/// Run the whole configuration cascade against a project's content view.
///
/// Order: defaults, then `config.yml`, then the metadata block of every
/// markdown slide in slide order. A malformed `config.yml`, an unknown plugin
/// or an invalid engine option is fatal; a malformed metadata block only
/// drops that document's overrides.
pub fn load(content: &dyn FileSource) -> Result<Presentation> {
    let mut config = Config::defaults()?;

    match vfs::read_to_string(content, FILE_CONFIG) {
        Ok(text) => {
            let project = Config::from_yaml(&text)
                .map_err(|e| SlideError::ConfigError(format!("{}: {}", FILE_CONFIG, e)))?;
            config.override_with(&project);
        }
        Err(e) if vfs::is_not_found(&e) => {
            info!("No {} found, using defaults", FILE_CONFIG);
        }
        Err(e) => return Err(SlideError::FileReadError(e)),
    }

    let documents = slides::resolve(&config, content)?;
    for doc in documents.iter().filter(|d| d.is_markdown()) {
        match doc.metadata() {
            Ok(Some(mut meta)) => {
                if !meta.slides.is_empty() {
                    warn!("Ignoring 'slides' in metadata block of {}", doc.path);
                    meta.slides.clear();
                }
                debug!("Applying metadata block of {}", doc.path);
                config.override_with(&meta);
            }
            Ok(None) => {}
            Err(e) => warn!("{}", e),
        }
    }

    config.plugins()?;
    config.engine_options()?;

    Ok(Presentation {
        config,
        slides: documents,
    })
}
