//! Merge diagnostics returned alongside the merged document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A merged document together with the report of how it was produced.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeOutcome {
    pub document: Value,
    pub report: MergeReport,
}

/// Anomalies absorbed while merging.
///
/// None of these abort a merge; they are surfaced here and through `tracing`
/// so callers can decide whether a degraded document is acceptable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Number of input documents.
    pub documents: usize,
    /// Non-first documents skipped because their root was not an object.
    pub ignored_documents: usize,
    /// `@odata.type` values replaced by the unknown sentinel.
    pub type_conflicts: Vec<TypeConflict>,
    /// Collections whose members were normalized.
    pub collections_normalized: usize,
    /// Members dropped as duplicates by `@odata.id`.
    pub duplicate_members_removed: usize,
}

impl MergeReport {
    /// Returns `true` if any type identifier degraded to the sentinel.
    pub fn is_degraded(&self) -> bool {
        !self.type_conflicts.is_empty()
    }
}

/// Two agents reported `@odata.type` values that cannot be ordered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConflict {
    /// JSON pointer to the field.
    pub pointer: String,
    pub current: String,
    pub incoming: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_report_is_clean() {
        let report = MergeReport::default();
        assert!(!report.is_degraded());
        assert_eq!(report.documents, 0);
    }

    #[test]
    fn conflict_marks_degraded() {
        let report = MergeReport {
            type_conflicts: vec![TypeConflict {
                pointer: "/@odata.type".into(),
                current: "#Czarek.v1_11_0.Czarek".into(),
                incoming: "#Marek.v1_11_0.Marek".into(),
            }],
            ..Default::default()
        };
        assert!(report.is_degraded());
    }

    #[test]
    fn serializes_field_names() {
        let report = MergeReport {
            documents: 2,
            ..Default::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["documents"], 2);
        assert_eq!(json["type_conflicts"], serde_json::json!([]));
    }
}
