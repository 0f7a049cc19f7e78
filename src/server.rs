// ABOUTME: Live preview server for a presentation project
// ABOUTME: Serves the index page, the revision endpoint and layered files while a watcher reloads

use log::{debug, error, info};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use percent_encoding::percent_decode_str;
use tiny_http::{Header, Request, Response, Server, StatusCode};
use url::Url;

use crate::errors::{Result, SlideError};
use crate::markdown::Markdown;
use crate::project::Project;
use crate::vfs::{self, is_markdown};
use crate::watch::{self, Revision};

pub const REVISION_PATH: &str = "/revision";

pub struct PreviewServer {
    server: Server,
    project: Arc<Project>,
    revision: Revision,
}

impl PreviewServer {
    /// Bind `addr`, load the project and start watching its data directory.
    /// A configuration error here is fatal; later ones are reported per request.
    pub fn bind(project: Arc<Project>, addr: &str, debounce: Duration) -> Result<Self> {
        project.reload()?;

        let server = Server::http(addr)
            .map_err(|e| SlideError::ServerError(format!("Failed to start HTTP server: {}", e)))?;

        let watched = Arc::clone(&project);
        let revision = watch::spawn_watcher(
            project.data_dir().to_path_buf(),
            debounce,
            Box::new(move || {
                // The config file or slide metadata may have changed.
                if let Err(e) = watched.reload() {
                    error!("Reload failed: {}", e);
                }
            }),
        )?;

        Ok(Self {
            server,
            project,
            revision,
        })
    }

    /// Port actually bound, useful when binding port 0.
    pub fn port(&self) -> Option<u16> {
        self.server.server_addr().to_ip().map(|addr| addr.port())
    }

    pub fn revision(&self) -> &Revision {
        &self.revision
    }

    /// Serve requests on the current thread until the listener closes.
    pub fn serve(&self) {
        if let Some(port) = self.port() {
            info!("Start server on http://localhost:{}", port);
        }
        for request in self.server.incoming_requests() {
            self.handle(request);
        }
    }

    /// Serve on a background thread.
    pub fn spawn(self) -> thread::JoinHandle<()> {
        thread::spawn(move || self.serve())
    }

    fn handle(&self, request: Request) {
        let path = match request_path(request.url()) {
            Some(path) => path,
            None => {
                respond(request, 400, "text/plain", b"400 Bad Request".to_vec());
                return;
            }
        };
        debug!("Request for {:?}", path);

        if path == REVISION_PATH {
            respond(request, 200, "text/plain", self.revision.value().into_bytes());
            return;
        }

        if path == "/" || path == "/index.html" {
            let revision = self.revision.value();
            match self.project.generate_index_html(Some(&revision)) {
                Ok(page) => respond(request, 200, "text/html", page.into_bytes()),
                Err(e) => {
                    error!("Failed to generate index.html: {}", e);
                    let body = format!("failed to generate index.html: {}", e);
                    respond(request, 500, "text/plain", body.into_bytes());
                }
            }
            return;
        }

        let file_path = path.trim_start_matches('/');
        match vfs::read(self.project.file_system(), file_path) {
            Ok(content) => {
                // Markdown is fetched by the engine; hide the metadata block from it.
                let content = if is_markdown(file_path) {
                    let text = String::from_utf8_lossy(&content);
                    Markdown::new(&text).body().as_bytes().to_vec()
                } else {
                    content
                };
                respond(request, 200, content_type(file_path), content);
            }
            Err(e) if vfs::is_not_found(&e) => {
                respond(request, 404, "text/plain", b"404 Not Found".to_vec());
            }
            Err(e) => {
                error!("Failed to read file {:?}: {}", file_path, e);
                let body = format!("Failed to read file: {}", e);
                respond(request, 500, "text/plain", body.into_bytes());
            }
        }
    }
}

/// Decoded path of a request target, without query or fragment.
fn request_path(target: &str) -> Option<String> {
    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(target).ok()?;
    let path = percent_decode_str(url.path()).decode_utf8().ok()?;
    Some(path.into_owned())
}


fn content_type(path: &str) -> &'static str {
    let ext = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    match ext.to_ascii_lowercase().as_str() {
        "html" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "md" => "text/markdown",
        "txt" => "text/plain",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        _ => "application/octet-stream",
    }
}

fn respond(request: Request, status: u16, content_type: &str, body: Vec<u8>) {
    let mut response = Response::from_data(body).with_status_code(StatusCode(status));
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()) {
        response = response.with_header(header);
    }
    if let Err(e) = request.respond(response) {
        error!("Failed to send response: {}", e);
    }
}
