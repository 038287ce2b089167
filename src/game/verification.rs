use log::debug;

use super::storage::{load_result, SessionStore};
use crate::codec;
use crate::model::GameResult;

/// Resolves an administrator-supplied code to a result.
///
/// Stored results are looked up by exact code first; failing that the code
/// is decoded as a self-contained token, which only counts if it carries a
/// non-empty `code` field. `None` means unverifiable. Tokens are not signed,
/// so a decoded result proves nothing about who produced it.
pub fn verify_game_code(store: &dyn SessionStore, code: &str) -> Option<GameResult> {
    if let Some(result) = load_result(store, code) {
        debug!(target: "session", "Verified {} from session storage", code);
        return Some(result);
    }
    verify_token(code)
}

/// Token-only verification, for callers without access to session storage.
pub fn verify_token(token: &str) -> Option<GameResult> {
    let payload: serde_json::Value = codec::decode(token)?;
    let has_code = payload
        .get("code")
        .and_then(|c| c.as_str())
        .is_some_and(|c| !c.is_empty());
    if !has_code {
        debug!(target: "session", "Decoded payload has no result code");
        return None;
    }
    serde_json::from_value(payload).ok()
}
