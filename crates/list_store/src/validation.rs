//! Name validation shared by lists and todos

use crate::error::{Result, StoreError, Subject};

/// Longest accepted name, counted in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Trim `raw` and check its length, returning the name to store.
pub fn normalize_name(raw: &str, subject: Subject) -> Result<String> {
    let name = raw.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(StoreError::InvalidLength(subject));
    }
    Ok(name.to_string())
}
