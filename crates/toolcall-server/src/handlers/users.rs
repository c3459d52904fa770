//! Users listing backed by the optional SQLite database.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::error;

use crate::db;
use crate::dto::UsersResponse;
use crate::error::AppError;
use crate::state::ServerState;

/// Lists all users.
pub async fn list(State(state): State<Arc<ServerState>>) -> Result<Json<UsersResponse>, AppError> {
    let conn = state.users_db_lock()?;
    let users = db::list_users(&conn).map_err(|e| {
        error!("Failed to list users: {:#}", e);
        AppError::Internal("Failed to list users".into())
    })?;
    Ok(Json(UsersResponse { users }))
}
