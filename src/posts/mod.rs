pub mod commands;
pub mod controller;
pub mod state;
pub mod view;

pub use controller::PostController;
pub use state::PostRecord;
pub use view::{BoardView, PostView};
