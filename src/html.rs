// ABOUTME: Index page generation for the revealkit application
// ABOUTME: Fills the index template with config, rendered sections and the hot reload script

use crate::config::{Config, Presentation};
use crate::errors::{Result, SlideError};
use crate::slides::{EmbedMode, escape_html, render_sections};
use crate::vfs::filter::FILE_INDEX_TEMPLATE;
use crate::vfs::{self, FileSource};
use log::info;
use std::fs;
use std::path::Path;

/// Polls the revision endpoint and reloads the page once the token changes.
const HOT_RELOAD_SCRIPT: &str = r#"<script>
const revision = "__REVISION__";
async function reloadCheck() {
	const baseUrl = window.location.href.split("/").slice(0, 3).join("/");
	const response = await fetch(baseUrl + "/revision");
	const newRevision = await response.text();
	if (revision !== newRevision) {
		window.location.reload();
	}
}
setInterval(function() {
	reloadCheck().catch(console.error);
}, 1000);
</script>"#;

pub fn hot_reload_script(revision: &str) -> String {
    HOT_RELOAD_SCRIPT.replace("__REVISION__", revision)
}

/// Engine base with a trailing slash, or empty for paths relative to the page.
pub fn engine_base(config: &Config) -> String {
    let engine = config.engine.trim();
    if engine.is_empty() || engine.ends_with('/') {
        engine.to_string()
    } else {
        format!("{}/", engine)
    }
}

/// Substitute `{{ name }}` placeholders in a single pass. Substituted values
/// are never scanned again, so slide text containing braces is safe.
pub fn render_template(template: &str, values: &[(&str, String)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| {
            SlideError::TemplateError("unterminated '{{' in template".to_string())
        })?;
        let name = after[..end].trim();
        let value = values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| SlideError::TemplateError(format!("unknown placeholder '{}'", name)))?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Generate the index page of a presentation.
///
/// The template is looked up through `source`, so a project `index.html.tmpl`
/// takes precedence over the bundled one. `revision` enables the hot reload
/// script when set.
pub fn generate_index_html(
    source: &dyn FileSource,
    presentation: &Presentation,
    embed: EmbedMode,
    revision: Option<&str>,
) -> Result<String> {
    let config = &presentation.config;
    let template = vfs::read_to_string(source, FILE_INDEX_TEMPLATE)
        .map_err(|e| SlideError::from_source(e, FILE_INDEX_TEMPLATE))?;

    let engine = engine_base(config);
    let plugins = config.plugins()?;
    let plugin_scripts = plugins
        .iter()
        .map(|p| {
            let src = if p.bundled {
                format!("{}{}", engine, p.src)
            } else {
                p.src.clone()
            };
            format!(r#"  <script src="{}"></script>"#, escape_html(&src))
        })
        .collect::<Vec<_>>()
        .join("\n");
    let plugin_names = plugins
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let options = config
        .engine_options()?
        .into_iter()
        .map(|(key, value)| format!("      {}: {},\n", key, value))
        .collect::<String>();

    let values = [
        ("title", escape_html(&config.title)),
        ("theme", escape_html(&config.theme)),
        ("engine", escape_html(&engine)),
        (
            "sections",
            render_sections(&presentation.slides, embed).join("\n"),
        ),
        ("options", options.trim_end_matches('\n').to_string()),
        ("plugin_scripts", plugin_scripts),
        ("plugins", format!("[{}]", plugin_names)),
        (
            "hot_reload",
            revision.map(hot_reload_script).unwrap_or_default(),
        ),
    ];
    render_template(&template, &values)
}

/// Utility function to write HTML content to a file
pub fn write_html_to_file(html_content: &str, output_path: &Path) -> Result<()> {
    info!("Writing HTML to file: {:?}", output_path);

    // Ensure parent directory exists
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(SlideError::FileReadError)?;
        }
    }

    fs::write(output_path, html_content).map_err(SlideError::FileReadError)?;

    Ok(())
}
