use std::fmt;

use crate::error::{AppError, AppResult};

/// Validated anchor identifier, the stable handle a page exposes for each
/// widget the tour can target (`avatar-male`, `submit-intake`, ...).
///
/// Raw step definitions keep selectors as plain strings; parsing happens at
/// probe time so a malformed selector degrades to "anchor not present"
/// instead of failing the tour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchorSelector(String);

impl AnchorSelector {
    pub fn parse(raw: &str) -> AppResult<Self> {
        if raw.is_empty() {
            return Err(AppError::invalid_argument("anchor selector is empty"));
        }
        if raw.starts_with('-') || raw.ends_with('-') {
            return Err(AppError::invalid_argument(format!(
                "anchor selector has a dangling dash: {raw}"
            )));
        }
        if !raw
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
        {
            return Err(AppError::invalid_argument(format!(
                "anchor selector contains invalid characters: {raw}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnchorSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
