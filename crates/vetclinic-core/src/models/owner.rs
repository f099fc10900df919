//! Owner models.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}-\d$").expect("valid regex"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid regex")
});

/// A pet owner. The id is caller-supplied (national-id style) and the
/// repository enforces its uniqueness at insert time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Owner {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Owner {
    pub const MIN_NAME_LEN: usize = 3;
    pub const MIN_PHONE_DIGITS: usize = 8;

    pub fn new(id: String, name: String, phone: String, email: String) -> Self {
        Self {
            id,
            name,
            phone,
            email,
        }
    }

    /// Id must match the `digits-dash-digit` format, e.g. `12-3`.
    pub fn validate_id(&self) -> bool {
        ID_PATTERN.is_match(&self.id)
    }

    /// Basic well-formedness check on the trimmed address.
    pub fn validate_email(&self) -> bool {
        EMAIL_PATTERN.is_match(self.email.trim())
    }

    /// Name must be non-blank and at least three characters.
    pub fn validate_name(&self) -> bool {
        !self.name.trim().is_empty() && self.name.chars().count() >= Self::MIN_NAME_LEN
    }

    /// Phone must carry at least eight digits, any formatting allowed.
    pub fn validate_phone(&self) -> bool {
        let digits = self.phone.chars().filter(|c| c.is_ascii_digit()).count();
        digits >= Self::MIN_PHONE_DIGITS
    }

    /// Check every business rule at once.
    pub fn is_valid(&self) -> bool {
        self.validate_id() && self.validate_email() && self.validate_name() && self.validate_phone()
    }
}
