//! Left fold of agent documents into one resource.
//!
//! The first document seeds the accumulator. Each later document is folded
//! into it field by field through [`FieldRule`], in declaration order. Input
//! order matters: the fold is not associative, so it is never reordered.
//! Collections are normalized once, after the last document.

use rsm_types::ValueKind;
use serde_json::{Map, Value};
use tracing::debug;

use crate::collection::normalize_collections;
use crate::report::{MergeOutcome, MergeReport};
use crate::rules::FieldRule;

/// Merge agent documents into one.
///
/// Returns `Value::Null` for no documents and a copy of the document for one.
/// Never fails: anomalies are absorbed into the result. Use
/// [`merge_documents_with_report`] to inspect them.
///
/// # Examples
///
/// ```
/// use rsm_merge::merge_documents;
/// use serde_json::json;
///
/// let merged = merge_documents(&[
///     json!({ "SerialNumber": null, "Model": "A" }),
///     json!({ "SerialNumber": "123", "Model": "B" }),
/// ]);
/// assert_eq!(merged, json!({ "SerialNumber": "123", "Model": "A" }));
/// ```
pub fn merge_documents(documents: &[Value]) -> Value {
    merge_documents_with_report(documents).document
}

/// Merge agent documents and report what the merge absorbed.
pub fn merge_documents_with_report(documents: &[Value]) -> MergeOutcome {
    let mut report = MergeReport {
        documents: documents.len(),
        ..Default::default()
    };

    let Some((first, rest)) = documents.split_first() else {
        return MergeOutcome {
            document: Value::Null,
            report,
        };
    };
    let mut merged = first.clone();
    if rest.is_empty() {
        return MergeOutcome {
            document: merged,
            report,
        };
    }

    for (index, incoming) in rest.iter().enumerate() {
        let position = index + 1;
        match incoming {
            Value::Object(fields) => {
                debug!(document = position, fields = fields.len(), "folding document");
                fold_into(&mut merged, fields, "", &mut report);
            }
            other => {
                debug!(
                    document = position,
                    kind = ?ValueKind::of(other),
                    "document root is not an object; ignoring"
                );
                report.ignored_documents += 1;
            }
        }
    }

    let stats = normalize_collections(&mut merged);
    report.collections_normalized = stats.collections;
    report.duplicate_members_removed = stats.duplicates_removed;

    MergeOutcome {
        document: merged,
        report,
    }
}

/// Fold `incoming` into `accumulator`, which is located at `pointer`.
///
/// An object accumulator is merged field by field. Any other accumulator,
/// `null` included, is replaced by the incoming object.
pub(crate) fn fold_into(
    accumulator: &mut Value,
    incoming: &Map<String, Value>,
    pointer: &str,
    report: &mut MergeReport,
) {
    match accumulator {
        Value::Object(target) => {
            for (key, value) in incoming {
                FieldRule::classify(key, value).apply(target, key, pointer, report);
            }
        }
        other => {
            if !other.is_null() {
                debug!(
                    pointer = %pointer_or_root(pointer),
                    kind = ?ValueKind::of(other),
                    "replacing non-object with incoming object"
                );
            }
            *other = Value::Object(incoming.clone());
        }
    }
}

fn pointer_or_root(pointer: &str) -> &str {
    if pointer.is_empty() {
        "/"
    } else {
        pointer
    }
}
