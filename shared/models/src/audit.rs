//! Hash-chained audit entries recording every state-changing operation on a
//! process, so the accountability record itself leaves a verifiable trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub user_id: Option<Uuid>,
    pub details: AuditDetails,
    pub hash: String,
    pub previous_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AuditAction {
    ProcessCreated,
    ProcessSaved,
    ItemsImported,
    ProcessCompleted,
    DocumentIssued,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditDetails {
    pub entity_type: String,
    pub entity_id: Uuid,
    pub metadata: std::collections::HashMap<String, String>,
}

impl AuditEntry {
    pub fn new(
        action: AuditAction,
        entity_type: impl Into<String>,
        entity_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Self {
        let timestamp = Utc::now();
        let details = AuditDetails {
            entity_type: entity_type.into(),
            entity_id,
            metadata: std::collections::HashMap::new(),
        };

        let hash = Self::calculate_hash(&action, &details, &timestamp);

        Self {
            id: Uuid::new_v4(),
            timestamp,
            action,
            user_id,
            details,
            hash,
            previous_hash: None,
        }
    }

    /// Attaches a metadata key and recomputes the entry hash.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.metadata.insert(key.into(), value.into());
        self.hash = Self::calculate_hash(&self.action, &self.details, &self.timestamp);
        self
    }

    /// Chains this entry after a previous one.
    pub fn chained_after(mut self, previous: &AuditEntry) -> Self {
        self.previous_hash = Some(previous.hash.clone());
        self
    }

    fn calculate_hash(
        action: &AuditAction,
        details: &AuditDetails,
        timestamp: &DateTime<Utc>,
    ) -> String {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_string(action).unwrap_or_default());
        hasher.update(serde_json::to_string(details).unwrap_or_default());
        hasher.update(timestamp.to_rfc3339());

        hex::encode(hasher.finalize())
    }

    pub fn verify_integrity(&self) -> bool {
        let calculated_hash = Self::calculate_hash(&self.action, &self.details, &self.timestamp);
        calculated_hash == self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_hash_verifies() {
        let entry = AuditEntry::new(
            AuditAction::ProcessSaved,
            "procurement_process",
            Uuid::new_v4(),
            None,
        )
        .with_metadata("items", "3");

        assert!(!entry.hash.is_empty());
        assert!(entry.verify_integrity());
    }

    #[test]
    fn test_tampering_breaks_integrity() {
        let mut entry =
            AuditEntry::new(AuditAction::ItemsImported, "procurement_process", Uuid::new_v4(), None);
        entry
            .details
            .metadata
            .insert("rows".to_string(), "99".to_string());

        assert!(!entry.verify_integrity());
    }

    #[test]
    fn test_chaining_records_previous_hash() {
        let first = AuditEntry::new(
            AuditAction::ProcessCreated,
            "procurement_process",
            Uuid::new_v4(),
            None,
        );
        let second = AuditEntry::new(
            AuditAction::ProcessSaved,
            "procurement_process",
            Uuid::new_v4(),
            None,
        )
        .chained_after(&first);

        assert_eq!(second.previous_hash.as_deref(), Some(first.hash.as_str()));
    }
}
