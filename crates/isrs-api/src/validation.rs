//! Field rules shared by request payloads, used through `#[derive(Validate)]`.

use std::borrow::Cow;

use validator::ValidationError;

use crate::generation::practice::Proficiency;

pub const MAX_WORD_LEN: u64 = 100;
pub const MAX_LANGUAGE_LEN: usize = 50;
pub const MAX_DECK_NAME_LEN: u64 = 255;
pub const MAX_SENTENCE_LEN: u64 = 1000;

const ACCESS_LEVELS: &[&str] = &["view", "edit"];

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

/// Language names such as `Spanish` or `Haitian Creole`
///
/// # Examples
/// ```
/// use isrs_api::validation::validate_language;
///
/// assert!(validate_language("Spanish").is_ok());
/// assert!(validate_language("es_ES").is_err());
/// ```
pub fn validate_language(language: &str) -> Result<(), ValidationError> {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        return Err(invalid("language", "Language cannot be empty".to_string()));
    }

    if trimmed.chars().count() > MAX_LANGUAGE_LEN {
        return Err(invalid(
            "language",
            format!("Language must be at most {MAX_LANGUAGE_LEN} characters long"),
        ));
    }

    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-')
    {
        return Err(invalid(
            "language",
            format!("Invalid language: '{language}'. Only letters, spaces and hyphens are allowed"),
        ));
    }

    Ok(())
}

pub fn validate_proficiency(level: &str) -> Result<(), ValidationError> {
    level
        .parse::<Proficiency>()
        .map(|_| ())
        .map_err(|e| invalid("proficiency_level", e))
}

pub fn validate_access_level(level: &str) -> Result<(), ValidationError> {
    if ACCESS_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(invalid(
            "access_level",
            format!("Invalid access level: '{level}'. Must be 'view' or 'edit'"),
        ))
    }
}

/// Words must contain something other than whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("blank", "Value cannot be blank".to_string()))
    } else {
        Ok(())
    }
}
