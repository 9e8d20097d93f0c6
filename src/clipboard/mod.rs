use std::{
    sync::{
        mpsc::{self, Sender},
        Arc, Mutex,
    },
    thread,
};

use anyhow::{anyhow, Context, Result};
use log::{error, info};

/// Accepts text for the system clipboard. Fire-and-forget: success means the
/// text was queued, not that another application can already paste it.
pub trait ClipboardSink: Send + Sync {
    fn copy_text(&self, text: String) -> Result<()>;
}

enum ClipboardCommand {
    SetText(String),
}

/// Owns the OS clipboard on a dedicated thread.
///
/// On X11 and Wayland the copied text is served by the process that set it,
/// so the `arboard::Clipboard` must outlive the command that wrote it.
pub struct ClipboardHandle {
    tx: Arc<Mutex<Option<Sender<ClipboardCommand>>>>,
}

impl ClipboardHandle {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<ClipboardCommand>> {
        let mut guard = self.tx.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<ClipboardCommand>();

        thread::Builder::new()
            .name("clipboard".to_string())
            .spawn(move || {
                let mut clipboard: Option<arboard::Clipboard> = None;

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        ClipboardCommand::SetText(text) => {
                            if clipboard.is_none() {
                                match arboard::Clipboard::new() {
                                    Ok(opened) => clipboard = Some(opened),
                                    Err(err) => {
                                        error!("Failed to open system clipboard: {}", err);
                                        continue;
                                    }
                                }
                            }

                            if let Some(board) = clipboard.as_mut() {
                                match board.set_text(text) {
                                    Ok(()) => info!("Post text copied to clipboard"),
                                    Err(err) => {
                                        error!("Failed to set clipboard text: {}", err);
                                        // Reopen on the next copy.
                                        clipboard = None;
                                    }
                                }
                            }
                        }
                    }
                }
            })
            .context("failed to spawn clipboard thread")?;

        *guard = Some(tx.clone());
        Ok(tx)
    }
}

impl Default for ClipboardHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for ClipboardHandle {
    fn copy_text(&self, text: String) -> Result<()> {
        let tx = self.ensure_thread()?;
        if tx.send(ClipboardCommand::SetText(text)).is_err() {
            // Thread is gone; drop the sender so the next copy respawns it.
            self.tx
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .take();
            return Err(anyhow!("clipboard thread is not running"));
        }
        Ok(())
    }
}
