use serde::Serialize;

use super::state::{PostBoard, PostRecord, PostStatus};

pub const LABEL_GENERATING: &str = "Generando...";
pub const LABEL_REGENERATE: &str = "Regenerar Todo";
pub const LABEL_GENERATE: &str = "Generar Post";

/// What the card for one day needs besides the raw record.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub post: PostRecord,
    pub selected: bool,
    pub action_label: &'static str,
    pub can_generate: bool,
    pub can_copy: bool,
    pub has_image: bool,
    /// Banner stays up until the next attempt starts.
    pub show_error: bool,
    pub image_url: Option<String>,
}

impl PostView {
    pub fn new(post: &PostRecord, selected: bool) -> Self {
        let generating = post.status == PostStatus::Generating;
        let action_label = if generating {
            LABEL_GENERATING
        } else if !post.text.is_empty() {
            LABEL_REGENERATE
        } else {
            LABEL_GENERATE
        };

        Self {
            post: post.clone(),
            selected,
            action_label,
            can_generate: !generating,
            can_copy: !post.text.is_empty(),
            has_image: post.image.is_some(),
            show_error: post.error_message().is_some(),
            image_url: post.image.as_ref().map(|image| image.data_url()),
        }
    }
}

/// Whole-week view: every day in order plus the selected one.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub days: Vec<PostView>,
    pub current: PostView,
}

impl BoardView {
    pub fn new(board: &PostBoard) -> Self {
        let selected = board.selected_day();
        Self {
            days: board
                .posts()
                .map(|post| PostView::new(post, post.day == selected))
                .collect(),
            current: PostView::new(board.current_post(), true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{content::ImageRef, week::DayOfWeek};
    use chrono::Utc;

    #[test]
    fn labels_follow_status_and_content() {
        let mut post = PostRecord::new(DayOfWeek::Monday);
        let view = PostView::new(&post, true);
        assert_eq!(view.action_label, LABEL_GENERATE);
        assert!(view.can_generate);
        assert!(!view.can_copy);
        assert!(!view.has_image);
        assert!(!view.show_error);

        post.fail("Error");
        assert!(PostView::new(&post, true).show_error);

        post.begin_generation();
        let view = PostView::new(&post, true);
        assert_eq!(view.action_label, LABEL_GENERATING);
        assert!(!view.can_generate);

        post.complete("texto".into(), ImageRef::png("aGVsbG8="), Utc::now());
        let view = PostView::new(&post, false);
        assert_eq!(view.action_label, LABEL_REGENERATE);
        assert!(view.can_copy);
        assert!(view.has_image);
        assert_eq!(view.image_url.as_deref(), Some("data:image/png;base64,aGVsbG8="));
    }

    #[test]
    fn board_view_marks_selected_day() {
        let mut board = PostBoard::new();
        board.select_day(DayOfWeek::Saturday);

        let view = BoardView::new(&board);
        assert_eq!(view.days.len(), 7);
        assert_eq!(view.current.post.day, DayOfWeek::Saturday);
        let selected: Vec<DayOfWeek> = view
            .days
            .iter()
            .filter(|day| day.selected)
            .map(|day| day.post.day)
            .collect();
        assert_eq!(selected, vec![DayOfWeek::Saturday]);
    }
}
