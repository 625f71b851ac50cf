//! Supplier domain models for the procurement accountability suite.
//!
//! A supplier is either the paid winner recorded on the financial
//! transaction or one of the competing proponents attached to a process.
//! Registry linkage is optional: a proponent typed by hand or pulled from an
//! imported document may carry a display name only until it is resolved
//! against the supplier registry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A supplier identity as attached to a process or transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Supplier {
    /// Registry id; `None` until the proponent is linked to a registered supplier.
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "Supplier name must be between 1 and 255 characters"))]
    pub name: String,
    pub cnpj: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub uf: Option<String>,
}

impl Default for Supplier {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            cnpj: None,
            email: None,
            phone: None,
            address: None,
            city: None,
            uf: None,
        }
    }
}

impl Supplier {
    /// Creates an unresolved supplier carrying a display name only.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates a registry-resolved supplier.
    pub fn registered(id: Uuid, name: impl Into<String>, cnpj: Option<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            cnpj,
            ..Default::default()
        }
    }

    /// Whether this supplier has been resolved against the registry.
    pub fn is_resolved(&self) -> bool {
        self.id.is_some()
    }

    /// CNPJ reduced to bare digits, if one is recorded.
    pub fn cnpj_digits(&self) -> Option<String> {
        self.cnpj
            .as_ref()
            .map(|c| c.chars().filter(|ch| ch.is_ascii_digit()).collect::<String>())
    }

    /// Whether two supplier entries point at the same registry identity.
    /// Unresolved entries never match anything.
    pub fn same_identity(&self, other: &Supplier) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }

    /// Validates the phone number format if present
    pub fn validate_phone(&self) -> bool {
        if let Some(phone) = &self.phone {
            let phone_regex = regex::Regex::new(r"^\+?[\d\s\-\(\)]{7,20}$").unwrap();
            phone_regex.is_match(phone)
        } else {
            true
        }
    }
}
