//! Shared server state handed to every handler.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use toolcall_llm::{InferenceBinding, WorkersAiClient};

use crate::config::ServerConfig;
use crate::error::AppError;

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub config: ServerConfig,
    pub binding: Arc<dyn InferenceBinding>,
    pub users_db: Option<Mutex<Connection>>,
}

impl ServerState {
    /// Creates state around an explicit inference binding.
    pub fn new(config: ServerConfig, binding: Arc<dyn InferenceBinding>) -> Self {
        Self { config, binding, users_db: None }
    }

    /// Creates state backed by the Workers AI REST API described by `config`.
    pub fn with_workers_ai(config: ServerConfig) -> Self {
        let client = WorkersAiClient::new(&config.account_id, &config.api_token)
            .with_api_base(&config.api_base)
            .with_timeout(config.timeout);
        Self::new(config, Arc::new(client))
    }

    /// Attaches the users database, enabling the users listing.
    pub fn with_users_db(mut self, conn: Connection) -> Self {
        self.users_db = Some(Mutex::new(conn));
        self
    }

    /// Acquires the users database lock, converting poison errors to AppError.
    pub fn users_db_lock(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        let db = self
            .users_db
            .as_ref()
            .ok_or_else(|| AppError::Internal("users database not configured".into()))?;
        db.lock().map_err(|e| {
            tracing::error!("DB lock poisoned: {}", e);
            AppError::Internal("database lock error".into())
        })
    }
}
