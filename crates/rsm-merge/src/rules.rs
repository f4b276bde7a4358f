//! Per-field merge rules.
//!
//! Every `(key, incoming)` pair of a folded document is classified into one
//! [`FieldRule`] by the incoming value's own shape, then applied to the
//! accumulator. The accumulated value is always the earlier agent's view.
//!
//! | incoming | rule |
//! |---|---|
//! | string at `@odata.type` | higher version wins, incomparable types degrade to `#UNKNOWN` |
//! | object | merge recursively if the slot holds an object, otherwise take it |
//! | array | union by structural equality if the slot holds an array, otherwise take it |
//! | scalar or `null` | take it only if the slot is empty |
//!
//! A slot is empty when the key is missing or holds `null`.

use rsm_types::{is_absent, pointer_push, VersionedTypeId, ODATA_TYPE, UNKNOWN_TYPE};
use serde_json::{Map, Value};
use tracing::warn;

use crate::merger::fold_into;
use crate::report::{MergeReport, TypeConflict};

/// The rule selected for one incoming field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldRule<'a> {
    /// A string at the reserved `@odata.type` key.
    VersionedType(&'a str),
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
    /// Bool, number, string, or `null`.
    Scalar(&'a Value),
}

impl<'a> FieldRule<'a> {
    /// Pick the rule for an incoming field.
    pub fn classify(key: &str, incoming: &'a Value) -> Self {
        match incoming {
            Value::String(raw) if key == ODATA_TYPE => FieldRule::VersionedType(raw.as_str()),
            Value::Object(fields) => FieldRule::Object(fields),
            Value::Array(items) => FieldRule::Array(items.as_slice()),
            scalar => FieldRule::Scalar(scalar),
        }
    }

    /// Apply the rule to `target[key]`.
    ///
    /// `parent` is the JSON pointer of `target`, used to locate diagnostics.
    pub(crate) fn apply(
        self,
        target: &mut Map<String, Value>,
        key: &str,
        parent: &str,
        report: &mut MergeReport,
    ) {
        match self {
            FieldRule::VersionedType(incoming) => {
                merge_versioned_type(target, key, incoming, parent, report)
            }
            FieldRule::Object(incoming) => merge_object(target, key, incoming, parent, report),
            FieldRule::Array(incoming) => merge_array(target, key, incoming),
            FieldRule::Scalar(incoming) => merge_scalar(target, key, incoming),
        }
    }
}

fn merge_versioned_type(
    target: &mut Map<String, Value>,
    key: &str,
    incoming: &str,
    parent: &str,
    report: &mut MergeReport,
) {
    let current = target.get(key);
    if current.and_then(Value::as_str) == Some(incoming) {
        return;
    }
    // Opaque incoming values never overwrite.
    let Some(incoming_id) = VersionedTypeId::parse(incoming) else {
        return;
    };
    let current_id = current.and_then(Value::as_str).and_then(VersionedTypeId::parse);
    let Some(current_id) = current_id else {
        target.insert(key.to_owned(), Value::String(incoming.to_owned()));
        return;
    };

    let current_raw = current_id.as_str().to_owned();
    let winner = match current_id.higher_of(incoming_id) {
        Ok(winner) => String::from(winner),
        Err(error) => {
            let pointer = pointer_push(parent, key);
            warn!(
                pointer = %pointer,
                current = %current_raw,
                incoming = %incoming,
                error = %error,
                "incomparable type identifiers; substituting {UNKNOWN_TYPE}"
            );
            report.type_conflicts.push(TypeConflict {
                pointer,
                current: current_raw,
                incoming: incoming.to_owned(),
            });
            UNKNOWN_TYPE.to_owned()
        }
    };
    target.insert(key.to_owned(), Value::String(winner));
}

fn merge_object(
    target: &mut Map<String, Value>,
    key: &str,
    incoming: &Map<String, Value>,
    parent: &str,
    report: &mut MergeReport,
) {
    if let Some(existing) = target.get_mut(key).filter(|existing| !existing.is_null()) {
        fold_into(existing, incoming, &pointer_push(parent, key), report);
    } else {
        target.insert(key.to_owned(), Value::Object(incoming.clone()));
    }
}

fn merge_array(target: &mut Map<String, Value>, key: &str, incoming: &[Value]) {
    if let Some(Value::Array(existing)) = target.get_mut(key) {
        for item in incoming {
            if !existing.contains(item) {
                existing.push(item.clone());
            }
        }
    } else {
        target.insert(key.to_owned(), Value::Array(incoming.to_vec()));
    }
}

fn merge_scalar(target: &mut Map<String, Value>, key: &str, incoming: &Value) {
    if is_absent(target.get(key)) {
        target.insert(key.to_owned(), incoming.clone());
    }
}
