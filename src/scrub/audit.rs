//! Scrub records and audit logging
//!
//! Every scrub call produces a [`ScrubRecord`]: the ordered list of applied
//! substitutions plus call metadata. The record itself is caller-owned and
//! may carry original span text; the [`AuditLogger`] never persists that
//! text in plaintext, only a SHA-256 hash.

use crate::domain::errors::LedactError;
use crate::domain::result::Result;
use crate::scrub::model::EntityType;
use crate::scrub::policy::Direction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// One applied substitution, in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedSubstitution {
    /// Category of the replaced span
    pub entity_type: EntityType,
    /// Original span text (never persisted by the audit logger)
    pub original_text: String,
    /// Replacement that now occupies the span
    pub replacement_text: String,
    /// Confidence of the detection
    pub confidence: f32,
    /// Original start byte offset
    pub start: usize,
    /// Original end byte offset
    pub end: usize,
}

/// Audit output of a scrub call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubRecord {
    /// Unique id of this scrub call
    pub id: Uuid,
    /// Direction the text was flowing
    pub direction: Direction,
    /// When the scrub ran
    pub timestamp: DateTime<Utc>,
    /// Wall time of the call in milliseconds
    pub elapsed_ms: u64,
    /// Applied substitutions in document order
    pub substitutions: Vec<AppliedSubstitution>,
    /// Substitution counts by entity type
    pub counts: BTreeMap<EntityType, usize>,
}

impl ScrubRecord {
    /// Build a record from applied substitutions.
    pub fn new(direction: Direction, substitutions: Vec<AppliedSubstitution>, elapsed_ms: u64) -> Self {
        let mut counts = BTreeMap::new();
        for substitution in &substitutions {
            *counts.entry(substitution.entity_type).or_insert(0) += 1;
        }

        Self {
            id: Uuid::new_v4(),
            direction,
            timestamp: Utc::now(),
            elapsed_ms,
            substitutions,
            counts,
        }
    }

    /// Total number of substitutions applied.
    pub fn total_substitutions(&self) -> usize {
        self.substitutions.len()
    }

    /// True if anything was replaced.
    pub fn has_substitutions(&self) -> bool {
        !self.substitutions.is_empty()
    }
}

/// Audit log entry (with hashed span values).
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    scrub_id: String,
    direction: String,
    substitution_count: usize,
    elapsed_ms: u64,
    substitutions: Vec<AuditSubstitution>,
}

#[derive(Debug, Serialize)]
struct AuditSubstitution {
    entity_type: String,
    /// SHA-256 hash of the original value; plaintext is never written
    value_hash: String,
    replacement: String,
    confidence: f32,
}

/// Append-only audit logger for scrub operations.
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create an audit logger, ensuring the log directory exists.
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LedactError::Audit(format!(
                        "failed to create audit log directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Log a scrub record.
    pub fn log_scrub(&self, record: &ScrubRecord) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: record.timestamp.to_rfc3339(),
            scrub_id: record.id.to_string(),
            direction: record.direction.to_string(),
            substitution_count: record.substitutions.len(),
            elapsed_ms: record.elapsed_ms,
            substitutions: record
                .substitutions
                .iter()
                .map(|s| AuditSubstitution {
                    entity_type: s.entity_type.label().to_string(),
                    value_hash: hash_value(&s.original_text),
                    replacement: s.replacement_text.clone(),
                    confidence: s.confidence,
                })
                .collect(),
        };

        self.write_entry(&entry)
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                LedactError::Audit(format!(
                    "failed to open audit log {}: {e}",
                    self.log_path.display()
                ))
            })?;

        if self.json_format {
            let json_line = serde_json::to_string(entry)
                .map_err(|e| LedactError::Audit(format!("failed to serialize audit entry: {e}")))?;
            writeln!(file, "{json_line}")
                .map_err(|e| LedactError::Audit(format!("failed to write audit entry: {e}")))?;
        } else {
            writeln!(
                file,
                "[{}] Scrub: {} | Direction: {} | Substitutions: {} | Time: {}ms",
                entry.timestamp,
                entry.scrub_id,
                entry.direction,
                entry.substitution_count,
                entry.elapsed_ms
            )
            .map_err(|e| LedactError::Audit(format!("failed to write audit entry: {e}")))?;
        }

        Ok(())
    }
}

/// SHA-256 hash of a span value, hex encoded.
fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn substitution(entity_type: EntityType, original: &str, replacement: &str) -> AppliedSubstitution {
        AppliedSubstitution {
            entity_type,
            original_text: original.to_string(),
            replacement_text: replacement.to_string(),
            confidence: 0.9,
            start: 0,
            end: original.len(),
        }
    }

    #[test]
    fn test_record_counts_by_type() {
        let record = ScrubRecord::new(
            Direction::Outbound,
            vec![
                substitution(EntityType::EmailAddress, "a@b.com", "[EMAIL_ADDRESS]"),
                substitution(EntityType::EmailAddress, "c@d.com", "[EMAIL_ADDRESS]"),
                substitution(EntityType::LawFirm, "Smith & Associates", "[LAW_FIRM]"),
            ],
            12,
        );

        assert_eq!(record.total_substitutions(), 3);
        assert_eq!(record.counts.get(&EntityType::EmailAddress), Some(&2));
        assert_eq!(record.counts.get(&EntityType::LawFirm), Some(&1));
    }

    #[test]
    fn test_hash_value_stable() {
        let h1 = hash_value("jennifer.martinez@firm.com");
        let h2 = hash_value("jennifer.martinez@firm.com");
        let h3 = hash_value("other@firm.com");
        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_log_never_contains_plaintext() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true, true).unwrap();

        let record = ScrubRecord::new(
            Direction::Inbound,
            vec![substitution(
                EntityType::EmailAddress,
                "jennifer.martinez@firm.com",
                "[EMAIL_ADDRESS]",
            )],
            5,
        );
        logger.log_scrub(&record).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains(&record.id.to_string()));
        assert!(content.contains("EMAIL_ADDRESS"));
        assert!(!content.contains("jennifer.martinez@firm.com"));
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true, false).unwrap();

        let record = ScrubRecord::new(Direction::Inbound, Vec::new(), 1);
        logger.log_scrub(&record).unwrap();

        assert!(!log_path.exists());
    }

    #[test]
    fn test_plain_text_format() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), false, true).unwrap();

        let record = ScrubRecord::new(Direction::Outbound, Vec::new(), 3);
        logger.log_scrub(&record).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Direction: outbound"));
    }
}
