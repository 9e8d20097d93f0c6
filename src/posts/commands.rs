use tauri::State;

use crate::{
    posts::{BoardView, PostController, PostRecord, PostView},
    week::DayOfWeek,
    AppState,
};

fn controller_from_state(state: &State<'_, AppState>) -> PostController {
    state.posts.clone()
}

#[tauri::command]
pub async fn get_board_state(state: State<'_, AppState>) -> Result<BoardView, String> {
    let controller = controller_from_state(&state);
    Ok(controller.board_view().await)
}

#[tauri::command]
pub async fn get_current_post(state: State<'_, AppState>) -> Result<PostView, String> {
    let controller = controller_from_state(&state);
    Ok(controller.current_post().await)
}

#[tauri::command]
pub async fn get_post(state: State<'_, AppState>, day: DayOfWeek) -> Result<PostRecord, String> {
    let controller = controller_from_state(&state);
    Ok(controller.post(day).await)
}

#[tauri::command]
pub async fn select_day(state: State<'_, AppState>, day: DayOfWeek) -> Result<PostView, String> {
    let controller = controller_from_state(&state);
    Ok(controller.select_day(day).await)
}

/// Resolves once both provider calls finish; progress arrives through
/// `post-state-changed` events in the meantime.
#[tauri::command]
pub async fn generate_post(
    state: State<'_, AppState>,
    day: DayOfWeek,
) -> Result<PostRecord, String> {
    let controller = controller_from_state(&state);
    Ok(controller.generate_for_day(day).await)
}

#[tauri::command]
pub async fn copy_post_text(
    state: State<'_, AppState>,
    day: Option<DayOfWeek>,
) -> Result<(), String> {
    let controller = controller_from_state(&state);
    controller
        .copy_text(day, &state.clipboard)
        .await
        .map_err(|e| e.to_string())
}
