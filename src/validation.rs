//! Input validation for chat messages before they are sent

/// The server rejects edits longer than this.
pub const MAX_EDIT_CHARS: usize = 2000;

/// Validates a message about to be sent. Returns the trimmed text.
pub fn validate_message(text: &str, max_chars: usize) -> Result<&str, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("Message cannot be empty".to_string());
    }
    let len = trimmed.chars().count();
    if len > max_chars {
        return Err(format!(
            "Message too long ({} characters, max {})",
            len, max_chars
        ));
    }
    Ok(trimmed)
}

/// Validates the replacement text of an edited message.
pub fn validate_edit(text: &str) -> Result<&str, String> {
    validate_message(text, MAX_EDIT_CHARS)
}
