use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;

/// `watch` is the config file to reload from, if any.
pub fn start_background_services(tx: Sender<AppEvent>, watch: Option<PathBuf>) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            if let Some(path) = watch {
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = crate::config::run_async_watcher(path, tx).await {
                        log::error!("Config watcher stopped: {}", e);
                    }
                });
            }

            // stdin closing ends the session
            crate::sys::input::run_input(tx).await;
        });
    });
}
