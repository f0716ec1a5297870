//! ID and timestamp utilities.

use chrono::Utc;
use uuid::Uuid;

/// Generate a unique message ID.
///
/// Returns a UUID v4 string prefixed with "msg_".
///
/// # Example
///
/// ```rust
/// use agui_bridge_core::identifier::generate_message_id;
///
/// let id = generate_message_id();
/// assert!(id.starts_with("msg_"));
/// assert_eq!(id.len(), 36); // "msg_" + 32 hex chars
/// ```
#[must_use]
pub fn generate_message_id() -> String {
    format!("msg_{}", Uuid::new_v4().simple())
}

/// Generate a unique run ID.
///
/// Returns a UUID v4 string prefixed with "run_".
#[must_use]
pub fn generate_run_id() -> String {
    format!("run_{}", Uuid::new_v4().simple())
}

/// Current time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(generate_message_id(), generate_message_id());
        assert!(generate_run_id().starts_with("run_"));
    }

    #[test]
    fn test_now_millis() {
        assert!(now_millis() > 0);
    }
}
