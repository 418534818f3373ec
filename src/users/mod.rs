pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo::{PgUserStore, UserStore};
pub use repo_types::User;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
