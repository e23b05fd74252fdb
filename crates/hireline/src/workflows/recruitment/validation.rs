use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::domain::CandidateDraft;

/// Per-field rejection messages for a create or update attempt. Either every
/// rule passes and the trimmed draft is applied, or nothing is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub fields: BTreeMap<String, String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "candidate fields rejected: ")?;
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Rejection raised when a signature send targets a missing or malformed email.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRecipient {
    #[error("candidate has no email address on file")]
    Missing,
    #[error("'{email}' is not a valid email address")]
    Malformed { email: String },
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

/// Validate a draft and return it with every field trimmed.
///
/// Name and role are required (two characters minimum). Phone and address are
/// optional but checked when present. Email is deliberately not validated
/// here; only the signature path cares about its shape.
pub fn validated(draft: CandidateDraft) -> Result<CandidateDraft, ValidationError> {
    let mut fields = BTreeMap::new();

    let name = draft.name.trim();
    if name.is_empty() {
        fields.insert("name".to_string(), "Name is required".to_string());
    } else if name.chars().count() < 2 {
        fields.insert(
            "name".to_string(),
            "Name must be at least 2 characters long".to_string(),
        );
    }

    let role = draft.role.trim();
    if role.is_empty() {
        fields.insert("role".to_string(), "Role is required".to_string());
    } else if role.chars().count() < 2 {
        fields.insert(
            "role".to_string(),
            "Role must be at least 2 characters long".to_string(),
        );
    }

    let phone = draft.phone.trim();
    if !phone.is_empty() && !phone_pattern().is_match(phone) {
        fields.insert(
            "phone".to_string(),
            "Please enter a valid phone number (minimum 10 digits)".to_string(),
        );
    }

    let address = draft.address.trim();
    if !address.is_empty() && address.chars().count() < 10 {
        fields.insert(
            "address".to_string(),
            "Address must be at least 10 characters long".to_string(),
        );
    }

    if !fields.is_empty() {
        return Err(ValidationError { fields });
    }

    Ok(CandidateDraft {
        name: name.to_string(),
        role: role.to_string(),
        availability: draft.availability,
        readiness: draft.readiness,
        email: draft.email.trim().to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
    })
}

/// Resolve the recipient address for a signature send.
pub fn signature_recipient(email: &str) -> Result<String, InvalidRecipient> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(InvalidRecipient::Missing);
    }
    if !email_pattern().is_match(trimmed) {
        return Err(InvalidRecipient::Malformed {
            email: trimmed.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
