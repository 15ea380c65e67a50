//! File watching for the pipeline inputs.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the input watcher.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// The OpenAPI spec changed
    SpecChanged(PathBuf),

    /// The FAQ data file changed
    FaqChanged(PathBuf),

    /// The lectern config file changed
    ConfigChanged(PathBuf),
}

/// The input files the pipeline depends on.
#[derive(Debug, Clone)]
pub struct InputPaths {
    /// OpenAPI spec path
    pub spec: PathBuf,

    /// FAQ data path
    pub faq_data: PathBuf,

    /// lectern.toml path
    pub config: PathBuf,
}

impl InputPaths {
    /// Resolve a configured path into its absolute form, if it exists.
    fn resolve(path: &Path) -> Option<PathBuf> {
        // A bare relative path like "openapi.json" has an empty parent
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let name = path.file_name()?;
        parent.canonicalize().ok().map(|p| p.join(name))
    }
}

/// Watcher over the pipeline input files.
pub struct InputWatcher {
    _watcher: RecommendedWatcher,
}

impl InputWatcher {
    /// Create a watcher for the given inputs.
    ///
    /// Watches the parent directories non-recursively so editors that
    /// replace files on save are still seen. Returns the watcher and a
    /// channel of classified events; changes to unrelated files in those
    /// directories are dropped.
    pub fn new(
        inputs: &InputPaths,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        let mut watch_dirs: Vec<PathBuf> = [&inputs.spec, &inputs.faq_data, &inputs.config]
            .iter()
            .filter_map(|p| p.parent().map(Path::to_path_buf))
            .map(|p| if p.as_os_str().is_empty() { PathBuf::from(".") } else { p })
            .collect();
        watch_dirs.sort();
        watch_dirs.dedup();

        for dir in &watch_dirs {
            if dir.exists() {
                watcher
                    .watch(dir, RecursiveMode::NonRecursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        let spec = InputPaths::resolve(&inputs.spec);
        let faq = InputPaths::resolve(&inputs.faq_data);
        let config = InputPaths::resolve(&inputs.config);

        // Forward and classify events on a bridge thread
        std::thread::spawn(move || {
            let debounce_duration = Duration::from_millis(100);
            // Start outside the window so the first event always passes
            let mut last_event_time = std::time::Instant::now() - debounce_duration;

            while let Ok(event) = sync_rx.recv() {
                let now = std::time::Instant::now();
                if now.duration_since(last_event_time) < debounce_duration {
                    continue;
                }
                last_event_time = now;

                for path in event.paths {
                    let classified =
                        classify_event(&path, spec.as_deref(), faq.as_deref(), config.as_deref());
                    if let Some(e) = classified {
                        let _ = async_tx.blocking_send(e);
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Match an event path against the configured inputs.
fn classify_event(
    path: &Path,
    spec: Option<&Path>,
    faq: Option<&Path>,
    config: Option<&Path>,
) -> Option<WatchEvent> {
    if Some(path) == spec {
        Some(WatchEvent::SpecChanged(path.to_path_buf()))
    } else if Some(path) == faq {
        Some(WatchEvent::FaqChanged(path.to_path_buf()))
    } else if Some(path) == config {
        Some(WatchEvent::ConfigChanged(path.to_path_buf()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_known_inputs() {
        let spec = Path::new("/project/openapi.json");
        let faq = Path::new("/project/faq.yml");
        let config = Path::new("/project/lectern.toml");

        assert!(matches!(
            classify_event(spec, Some(spec), Some(faq), Some(config)),
            Some(WatchEvent::SpecChanged(_))
        ));
        assert!(matches!(
            classify_event(faq, Some(spec), Some(faq), Some(config)),
            Some(WatchEvent::FaqChanged(_))
        ));
        assert!(matches!(
            classify_event(config, Some(spec), Some(faq), Some(config)),
            Some(WatchEvent::ConfigChanged(_))
        ));
        assert!(classify_event(
            Path::new("/project/README.md"),
            Some(spec),
            Some(faq),
            Some(config)
        )
        .is_none());
    }

    #[tokio::test]
    async fn watches_spec_changes() {
        let temp = tempdir().unwrap();
        let spec = temp.path().join("openapi.json");
        fs::write(&spec, "{}").unwrap();

        let inputs = InputPaths {
            spec: spec.clone(),
            faq_data: temp.path().join("faq.yml"),
            config: temp.path().join("lectern.toml"),
        };

        let (watcher, mut rx) = InputWatcher::new(&inputs).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&spec, "{\"openapi\": \"3.0.0\"}").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for watch event");
        assert!(matches!(
            event.unwrap(),
            Some(WatchEvent::SpecChanged(_))
        ));
    }
}
