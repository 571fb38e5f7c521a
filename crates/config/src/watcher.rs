use notify::{Event, EventKind};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Bursts of writes closer together than this collapse into one reload.
const DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches the dashboard config file and signals on every change.
///
/// The parent directory is watched rather than the file itself, so editors
/// that save via rename and a config file created after startup both trigger
/// a reload.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// let (_watcher, mut rx) = wx_config::ConfigWatcher::spawn(wx_config::default_path());
/// while rx.recv().await.is_some() {
///     println!("config changed, reloading");
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path`.
    /// Returns the watcher handle and a receiver that fires on every detected change.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let watcher = Self { path: path.clone() };

        tokio::spawn(watch_loop(path, tx));

        (watcher, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};

    let Some(dir) = path.parent().map(Path::to_path_buf) else {
        error!("Config path '{}' has no parent directory", path.display());
        return;
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("Cannot create config directory '{}': {e}", dir.display());
    }

    let (sync_tx, mut sync_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = sync_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = sync_rx.recv().await {
        match event {
            Ok(e) if touches_config(&e, &path) => {
                // Swallow the rest of the burst before signalling.
                tokio::time::sleep(DEBOUNCE).await;
                while sync_rx.try_recv().is_ok() {}

                debug!("Config change detected: {:?}", e.kind);
                if tx.send(()).await.is_err() {
                    break; // receiver dropped
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}

/// Whether `event` is a write/create/rename that involves `config`.
fn touches_config(event: &Event, config: &Path) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_)
    );
    relevant_kind
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == config.file_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RenameMode};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn write_to_config_is_relevant() {
        let cfg = Path::new("/home/u/.config/wxdash/wxdash.toml");
        let e = event(EventKind::Modify(ModifyKind::Any), "/home/u/.config/wxdash/wxdash.toml");
        assert!(touches_config(&e, cfg));
    }

    #[test]
    fn rename_into_place_is_relevant() {
        let cfg = Path::new("/home/u/.config/wxdash/wxdash.toml");
        let e = event(
            EventKind::Modify(ModifyKind::Name(RenameMode::To)),
            "/home/u/.config/wxdash/wxdash.toml",
        );
        assert!(touches_config(&e, cfg));
    }

    #[test]
    fn sibling_files_are_ignored() {
        let cfg = Path::new("/home/u/.config/wxdash/wxdash.toml");
        let e = event(EventKind::Create(CreateKind::File), "/home/u/.config/wxdash/.wxdash.toml.swp");
        assert!(!touches_config(&e, cfg));
    }

    #[test]
    fn reads_are_ignored() {
        let cfg = Path::new("/home/u/.config/wxdash/wxdash.toml");
        let e = event(EventKind::Access(AccessKind::Any), "/home/u/.config/wxdash/wxdash.toml");
        assert!(!touches_config(&e, cfg));
    }
}
