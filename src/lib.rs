mod clipboard;
mod content;
mod posts;
mod provider;
mod settings;
mod utils;
mod week;

use std::sync::Arc;

use clipboard::ClipboardHandle;
use posts::{
    commands::{
        copy_post_text, generate_post, get_board_state, get_current_post, get_post, select_day,
    },
    PostController,
};
use provider::GeminiClient;
use settings::{ProviderSettings, SettingsStore};
use tauri::{Manager, State};

pub(crate) struct AppState {
    pub(crate) posts: PostController,
    pub(crate) settings: Arc<SettingsStore>,
    pub(crate) clipboard: ClipboardHandle,
}

#[tauri::command]
fn get_provider_settings(state: State<AppState>) -> Result<ProviderSettings, String> {
    Ok(state.settings.provider())
}

/// Only transport settings (base URL, timeout) are editable.
#[tauri::command]
fn set_provider_settings(
    settings: ProviderSettings,
    state: State<AppState>,
) -> Result<ProviderSettings, String> {
    state
        .settings
        .update_provider(settings)
        .map_err(|e| e.to_string())?;
    Ok(state.settings.provider())
}

#[tauri::command]
fn has_api_key() -> bool {
    settings::api_key_from_env().is_ok()
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // A local .env may carry the provider key during development.
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    utils::logging::init();

    log::info!("OnAir Posts starting up...");
    if dotenv_loaded {
        log::info!("Loaded environment from .env");
    }

    tauri::Builder::default()
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings_path = app_data_dir.join("settings.json");
                let settings_store = Arc::new(SettingsStore::new(settings_path)?);

                if settings::api_key_from_env().is_err() {
                    log::warn!(
                        "No provider API key in the environment; generation will fail until one is set"
                    );
                }

                let provider = Arc::new(GeminiClient::new(settings_store.clone())?);
                let posts = PostController::new(provider, Arc::new(app.handle().clone()));

                app.manage(AppState {
                    posts,
                    settings: settings_store,
                    clipboard: ClipboardHandle::new(),
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_board_state,
            get_current_post,
            get_post,
            select_day,
            generate_post,
            copy_post_text,
            get_provider_settings,
            set_provider_settings,
            has_api_key,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
