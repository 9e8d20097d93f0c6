use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Utc;
use tauri::{AppHandle, Emitter, Runtime};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    clipboard::ClipboardSink,
    content::{self, ImageRef},
    log_error, log_info, log_warn,
    provider::ContentProvider,
    week::DayOfWeek,
};

use super::{
    state::{PostBoard, PostRecord},
    view::{BoardView, PostView},
};

const ENABLE_LOGS: bool = true;

/// The only failure text the user ever sees; causes go to the log.
pub const GENERATION_FAILED_MESSAGE: &str = "Error al generar el contenido. Inténtalo de nuevo.";

pub const POST_STATE_CHANGED_EVENT: &str = "post-state-changed";
pub const SELECTED_DAY_CHANGED_EVENT: &str = "selected-day-changed";

/// Receives board changes as they happen.
pub trait PostEvents: Send + Sync {
    fn post_changed(&self, post: &PostRecord);
    fn selection_changed(&self, day: DayOfWeek);
}

impl<R: Runtime> PostEvents for AppHandle<R> {
    fn post_changed(&self, post: &PostRecord) {
        let _ = self.emit(POST_STATE_CHANGED_EVENT, post);
    }

    fn selection_changed(&self, day: DayOfWeek) {
        let _ = self.emit(SELECTED_DAY_CHANGED_EVENT, day);
    }
}

#[derive(Clone)]
pub struct PostController {
    board: Arc<Mutex<PostBoard>>,
    provider: Arc<dyn ContentProvider>,
    events: Arc<dyn PostEvents>,
}

impl PostController {
    pub fn new(provider: Arc<dyn ContentProvider>, events: Arc<dyn PostEvents>) -> Self {
        Self {
            board: Arc::new(Mutex::new(PostBoard::new())),
            provider,
            events,
        }
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> PostBoard {
        self.board.lock().await.clone()
    }

    pub async fn board_view(&self) -> BoardView {
        BoardView::new(&*self.board.lock().await)
    }

    pub async fn post(&self, day: DayOfWeek) -> PostRecord {
        self.board.lock().await.post(day).clone()
    }

    pub async fn current_post(&self) -> PostView {
        let board = self.board.lock().await;
        PostView::new(board.current_post(), true)
    }

    /// Changes the selected day. Generation in flight for another day keeps
    /// running and lands in that day's record.
    pub async fn select_day(&self, day: DayOfWeek) -> PostView {
        let mut board = self.board.lock().await;
        board.select_day(day);
        self.events.selection_changed(day);
        PostView::new(board.current_post(), true)
    }

    /// Generates text then image for `day` and folds the outcome into its
    /// record. Never fails: provider errors end as `Failed` with a fixed
    /// message.
    ///
    /// A call for a day that is already generating is ignored and returns the
    /// in-flight record unchanged.
    pub async fn generate_for_day(&self, day: DayOfWeek) -> PostRecord {
        let attempt_id = Uuid::new_v4();

        {
            let mut board = self.board.lock().await;
            let post = board.post_mut(day);
            if post.is_generating() {
                log_warn!("Generation for {} already in progress; ignoring request", day);
                return post.clone();
            }
            post.begin_generation();
            self.events.post_changed(post);
        }

        log_info!("[{}] Generating post for {}", attempt_id, day);
        let outcome = self.run_adapters(day).await;

        let mut board = self.board.lock().await;
        let post = board.post_mut(day);
        match outcome {
            Ok((text, image)) => {
                log_info!(
                    "[{}] Post for {} ready ({} chars of text)",
                    attempt_id,
                    day,
                    text.chars().count()
                );
                post.complete(text, image, Utc::now());
            }
            Err(err) => {
                log_error!("[{}] Generation for {} failed: {:#}", attempt_id, day, err);
                post.fail(GENERATION_FAILED_MESSAGE);
            }
        }
        self.events.post_changed(post);
        post.clone()
    }

    /// Text for the copy action; `None` means the selected day.
    pub async fn text_to_copy(&self, day: Option<DayOfWeek>) -> Result<String> {
        let board = self.board.lock().await;
        let day = day.unwrap_or_else(|| board.selected_day());
        let text = &board.post(day).text;
        if text.is_empty() {
            bail!("no text generated for {day} yet");
        }
        Ok(text.clone())
    }

    /// Hands the post text for `day` (or the selected day) to `sink`.
    pub async fn copy_text(&self, day: Option<DayOfWeek>, sink: &dyn ClipboardSink) -> Result<()> {
        let text = self.text_to_copy(day).await?;
        sink.copy_text(text)
    }

    async fn run_adapters(&self, day: DayOfWeek) -> Result<(String, ImageRef)> {
        let provider = self.provider.as_ref();

        let text = content::generate_post_text(provider, day).await?;
        let image = content::generate_post_image(provider, day).await?;
        Ok((text, image))
    }
}
