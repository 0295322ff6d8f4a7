//! Item Validation
//!
//! Gatekeeping rules applied to a candidate record before the store commits it.
//! Rules are checked in a fixed order and the first failure is reported.

use super::types::ItemDraft;

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// A violated validation rule. The `Display` output is the message returned to
/// API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Item name is required")]
    NameRequired,

    #[error("Item name cannot exceed 100 characters")]
    NameTooLong,

    #[error("Item description cannot exceed 1000 characters")]
    DescriptionTooLong,
}

impl ValidationError {
    /// Stable identifier of the violated rule.
    pub fn rule(&self) -> &'static str {
        match self {
            Self::NameRequired => "name_required",
            Self::NameTooLong => "name_too_long",
            Self::DescriptionTooLong => "description_too_long",
        }
    }
}

// Byte-order marks count as blank alongside Unicode whitespace.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

pub fn validate_item(candidate: &ItemDraft) -> Result<(), ValidationError> {
    let name = match candidate.name.as_deref() {
        Some(name) if !name.trim_matches(is_blank).is_empty() => name,
        _ => return Err(ValidationError::NameRequired),
    };

    // Length is measured on the raw, untrimmed name.
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong);
    }

    if let Some(description) = candidate.description.as_deref()
        && description.chars().count() > MAX_DESCRIPTION_CHARS
    {
        return Err(ValidationError::DescriptionTooLong);
    }

    Ok(())
}
