//! Shared server state.

use scout_chat::ChatSession;
use scout_core::AppResult;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Builds a fresh chat session for `POST /api/init`.
pub type SessionFactory = Arc<dyn Fn() -> AppResult<ChatSession> + Send + Sync>;

/// State passed to every handler.
///
/// The server hosts a single conversation. Its lock is held for a whole chat
/// turn, so concurrent chat requests are answered one after another. Direct
/// searches only hold it long enough to grab the pipeline.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Option<ChatSession>>>,
    pub factory: SessionFactory,
}

impl AppState {
    pub fn new(factory: SessionFactory) -> Self {
        Self {
            session: Arc::new(Mutex::new(None)),
            factory,
        }
    }
}
