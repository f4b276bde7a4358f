//! Collection normalization.
//!
//! An object carrying `Members@odata.count` is a collection. If it also has a
//! `Members` array, duplicate members are dropped by `@odata.id` (first
//! occurrence wins) and the count is rewritten to the remaining length. The
//! walk descends into every nested object and array, so embedded collections
//! are normalized too.

use std::collections::HashSet;

use rsm_types::{identity_of, is_collection, pointer_push, MEMBERS, MEMBERS_COUNT};
use serde_json::Value;
use tracing::debug;

/// Totals from one normalization pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectionStats {
    /// Collections whose `Members` array was normalized.
    pub collections: usize,
    /// Members removed as duplicates.
    pub duplicates_removed: usize,
    /// JSON pointers of the normalized collections, in walk order.
    pub pointers: Vec<String>,
}

/// Normalize every collection in `document`.
pub fn normalize_collections(document: &mut Value) -> CollectionStats {
    let mut stats = CollectionStats::default();
    normalize(document, "", &mut stats);
    stats
}

fn normalize(value: &mut Value, pointer: &str, stats: &mut CollectionStats) {
    match value {
        Value::Object(fields) => {
            if is_collection(fields) {
                let normalized = match fields.get_mut(MEMBERS) {
                    Some(Value::Array(members)) => Some((dedup_members(members), members.len())),
                    _ => None,
                };
                if let Some((removed, count)) = normalized {
                    let at = if pointer.is_empty() { "/" } else { pointer };
                    debug!(pointer = %at, removed, count, "normalized collection members");
                    fields.insert(MEMBERS_COUNT.to_owned(), Value::from(count));
                    stats.collections += 1;
                    stats.duplicates_removed += removed;
                    stats.pointers.push(at.to_owned());
                }
            }
            for (key, child) in fields.iter_mut() {
                normalize(child, &pointer_push(pointer, key), stats);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter_mut().enumerate() {
                normalize(item, &pointer_push(pointer, &index.to_string()), stats);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

/// Members without an identity key are deduplicated by their whole value.
#[derive(PartialEq, Eq, Hash)]
enum MemberKey {
    Identity(String),
    Value(String),
}

/// Drop repeated members in place, returning how many were removed.
fn dedup_members(members: &mut Vec<Value>) -> usize {
    let before = members.len();
    let mut seen = HashSet::new();
    members.retain(|member| {
        let key = match identity_of(member) {
            Some(id) => MemberKey::Identity(id.to_string()),
            None => MemberKey::Value(member.to_string()),
        };
        seen.insert(key)
    });
    before - members.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deduplicates_by_odata_id() {
        let mut doc = json!({
            "Members": [
                { "@odata.id": "/redfish/v1/Chassis/abc" },
                { "@odata.id": "/redfish/v1/Chassis/def" },
                { "@odata.id": "/redfish/v1/Chassis/abc", "Name": "again" }
            ],
            "Members@odata.count": 3
        });
        let stats = normalize_collections(&mut doc);
        assert_eq!(
            doc,
            json!({
                "Members": [
                    { "@odata.id": "/redfish/v1/Chassis/abc" },
                    { "@odata.id": "/redfish/v1/Chassis/def" }
                ],
                "Members@odata.count": 2
            })
        );
        assert_eq!(
            stats,
            CollectionStats { collections: 1, duplicates_removed: 1, pointers: vec!["/".to_owned()] }
        );
    }

    #[test]
    fn count_is_corrected_without_duplicates() {
        let mut doc = json!({
            "Members": [{ "@odata.id": "/a" }],
            "Members@odata.count": 9
        });
        normalize_collections(&mut doc);
        assert_eq!(doc["Members@odata.count"], 1);
    }

    #[test]
    fn count_without_members_is_left_alone() {
        let mut doc = json!({ "Members@odata.count": 5 });
        let stats = normalize_collections(&mut doc);
        assert_eq!(doc, json!({ "Members@odata.count": 5 }));
        assert_eq!(stats, CollectionStats::default());
    }

    #[test]
    fn members_without_count_are_left_alone() {
        let mut doc = json!({ "Members": [{ "@odata.id": "/a" }, { "@odata.id": "/a" }] });
        let before = doc.clone();
        normalize_collections(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn non_array_members_are_left_alone() {
        let mut doc = json!({ "Members": "none", "Members@odata.count": 2 });
        let before = doc.clone();
        normalize_collections(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn nested_collections_are_normalized() {
        let mut doc = json!({
            "Links": {
                "Drives": {
                    "Members": [{ "@odata.id": "/d/1" }, { "@odata.id": "/d/1" }],
                    "Members@odata.count": 2
                }
            },
            "Zones": [
                {
                    "Members": [{ "@odata.id": "/z/1" }, { "@odata.id": "/z/2" }, { "@odata.id": "/z/2" }],
                    "Members@odata.count": 3
                }
            ]
        });
        let stats = normalize_collections(&mut doc);
        assert_eq!(doc["Links"]["Drives"]["Members@odata.count"], 1);
        assert_eq!(doc["Zones"][0]["Members@odata.count"], 2);
        assert_eq!(stats.collections, 2);
        assert_eq!(stats.duplicates_removed, 2);
        assert_eq!(stats.pointers, ["/Links/Drives", "/Zones/0"]);
    }

    #[test]
    fn collection_pointers_escape_keys() {
        let mut doc = json!({
            "Oem": {
                "Vendor/Rack~1": {
                    "Members": [{ "@odata.id": "/r/1" }],
                    "Members@odata.count": 1
                }
            }
        });
        let stats = normalize_collections(&mut doc);
        assert_eq!(stats.pointers, ["/Oem/Vendor~1Rack~01"]);
    }

    #[test]
    fn members_without_identity_dedup_by_value() {
        let mut doc = json!({
            "Members": ["/a", "/a", { "Id": 1 }, { "Id": 1 }, { "@odata.id": "/a" }],
            "Members@odata.count": 5
        });
        normalize_collections(&mut doc);
        assert_eq!(
            doc,
            json!({
                "Members": ["/a", { "Id": 1 }, { "@odata.id": "/a" }],
                "Members@odata.count": 3
            })
        );
    }

    #[test]
    fn count_keeps_its_position() {
        let mut doc = json!({
            "Members@odata.count": 2,
            "Members": [{ "@odata.id": "/a" }, { "@odata.id": "/a" }],
            "Name": "Chassis Collection"
        });
        normalize_collections(&mut doc);
        let keys: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["Members@odata.count", "Members", "Name"]);
    }
}
