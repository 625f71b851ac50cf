//! Identification block for the executing unit (UEx) that issues the
//! procurement documents. Consumed by document assembly only.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct SchoolProfile {
    #[validate(length(min = 1, max = 255, message = "School name is required"))]
    pub name: String,
    pub cnpj: Option<String>,
    /// State education registry code.
    pub seec: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub uf: Option<String>,
    /// Council president signing the documents.
    pub director: Option<String>,
    /// First secretary recording the meeting minutes.
    pub secretary: Option<String>,
}

impl SchoolProfile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cnpj: None,
            seec: None,
            address: None,
            city: None,
            uf: None,
            director: None,
            secretary: None,
        }
    }
}
