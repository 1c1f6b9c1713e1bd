//! Session identifiers

use uuid::Uuid;

/// Fresh random (v4) session identifier in hyphenated form
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Keep a caller-supplied session id, or generate one when it is absent or empty
pub fn resolve_session_id(session_id: Option<String>) -> String {
    session_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(new_session_id)
}
