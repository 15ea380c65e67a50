//! Static preview server for the built site.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use tower_http::services::ServeDir;

/// Configuration for the preview server.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Directory containing the built site
    pub dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("build"),
            port: 4000,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur while serving.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("Directory not found: {0}. Run 'lectern build' first.")]
    MissingDir(PathBuf),

    #[error("Invalid address {0}")]
    InvalidAddr(String),

    #[error("Failed to serve on {addr}: {message}")]
    Bind { addr: SocketAddr, message: String },
}

/// Preview server for a built site directory.
pub struct PreviewServer {
    config: PreviewConfig,
}

impl PreviewServer {
    /// Create a new preview server.
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    /// Serve the directory until the process is terminated.
    pub async fn start(self) -> Result<(), ServeError> {
        if !self.config.dir.exists() {
            return Err(ServeError::MissingDir(self.config.dir));
        }

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| ServeError::InvalidAddr(self.config.host.clone()))?;

        tracing::info!("Serving {} at http://{}", self.config.dir.display(), addr);

        let app = Router::new().fallback_service(ServeDir::new(&self.config.dir));

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServeError::Bind {
                addr,
                message: e.to_string(),
            })?;

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServeError::Bind {
                addr,
                message: e.to_string(),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let server = PreviewServer::new(PreviewConfig::default());
        assert_eq!(server.config.port, 4000);
        assert_eq!(server.config.dir, PathBuf::from("build"));
    }

    #[tokio::test]
    async fn errors_on_missing_dir() {
        let server = PreviewServer::new(PreviewConfig {
            dir: PathBuf::from("/nonexistent/build"),
            open: false,
            ..Default::default()
        });

        let result = server.start().await;

        assert!(matches!(result, Err(ServeError::MissingDir(_))));
    }
}
