use chrono::{DateTime, Utc};

use crate::api::TaskClient;
use crate::model::{Task, Token};
use crate::transition::merge_updated;

/// Explicit per-session state: token material plus the process-lifetime task
/// cache. Created at session start, cleared at logout; passed by reference
/// to the core's entry points instead of living in ambient globals. Nothing
/// here ever touches disk.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<Token>,
    tasks: Vec<Task>,
    last_refresh: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a pre-provisioned bearer token.
    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.login(Token::bearer_only(access_token));
        session
    }

    pub fn login(&mut self, token: Token) {
        self.token = Some(token);
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.tasks.clear();
        self.last_refresh = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.token.as_ref().map(|token| token.access_token.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.token.as_ref().and_then(|token| token.refresh_token.as_deref())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    /// Pull-based sync: replace the cache with a fresh aggregate fetch.
    pub fn refresh_tasks(&mut self, client: &TaskClient) -> usize {
        self.tasks = client.list_all_tasks();
        self.last_refresh = Some(Utc::now());
        self.tasks.len()
    }

    /// Fold a successful write back into the cache. Callers must only pass
    /// the server's updated representation, never an optimistic guess.
    pub fn record_write(&mut self, updated: Task) -> bool {
        merge_updated(&mut self.tasks, updated)
    }
}
