use std::collections::HashMap;

use log::{trace, warn};

use crate::model::GameResult;

pub const RESULT_KEY_PREFIX: &str = "miniGameResult_";

pub fn result_key(code: &str) -> String {
    format!("{}{}", RESULT_KEY_PREFIX, code)
}

/// Session-scoped key/value store provided by the host (browser session
/// storage or equivalent). Lives as long as the host session does.
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: String);
}

#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    items: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
    }
}

pub fn store_result(store: &mut dyn SessionStore, result: &GameResult) {
    match serde_json::to_string(result) {
        Ok(json) => {
            trace!(target: "session", "Storing result {}", result.code);
            store.set_item(&result_key(&result.code), json);
        }
        Err(e) => warn!(target: "session", "Could not serialize result {}: {}", result.code, e),
    }
}

pub fn load_result(store: &dyn SessionStore, code: &str) -> Option<GameResult> {
    let stored = store.get_item(&result_key(code))?;
    match serde_json::from_str(&stored) {
        Ok(result) => Some(result),
        Err(e) => {
            warn!(target: "session", "Stored result for {} is unreadable: {}", code, e);
            None
        }
    }
}
