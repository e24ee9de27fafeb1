//! Street addresses the caller wants to find in listings.

use serde::{Deserialize, Serialize};

/// A known street address from the caller's address book.
///
/// Immutable for the duration of a crawl run. The engine only ever
/// references addresses by `id`; ownership stays with the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// Caller-assigned identifier
    pub id: u64,

    /// Street name, e.g. "Hauptstrasse"
    pub street: String,

    /// House number, possibly a range ("10-16") or with a letter suffix ("12a")
    pub house_number: String,

    /// Postal code, matched verbatim against raw listing text
    pub postal_code: String,

    /// City name
    pub city: String,

    /// Free-form notes, not used for matching
    #[serde(default)]
    pub notes: String,
}

impl Address {
    /// Create a new address.
    pub fn new(
        id: u64,
        street: impl Into<String>,
        house_number: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id,
            street: street.into(),
            house_number: house_number.into(),
            postal_code: postal_code.into(),
            city: city.into(),
            notes: String::new(),
        }
    }

    /// Attach free-form notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Human-readable one-line form, used in match output.
    pub fn display_line(&self) -> String {
        format!(
            "{} {}, {} {}",
            self.street, self.house_number, self.postal_code, self.city
        )
    }
}
