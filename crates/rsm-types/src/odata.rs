//! Reserved OData field names and the sentinel emitted for degraded types.
//!
//! These strings are part of the wire vocabulary shared with every agent and
//! consumer. They are matched byte-for-byte and never case-folded.

use serde_json::{Map, Value};

/// Versioned resource type tag, e.g. `#Chassis.v1_9_0.Chassis`.
pub const ODATA_TYPE: &str = "@odata.type";

/// Link identity of a resource or collection member.
pub const ODATA_ID: &str = "@odata.id";

/// Member array of a collection resource.
pub const MEMBERS: &str = "Members";

/// Member count accompanying [`MEMBERS`].
pub const MEMBERS_COUNT: &str = "Members@odata.count";

/// Written to [`ODATA_TYPE`] when two agents report types that cannot be ordered.
pub const UNKNOWN_TYPE: &str = "#UNKNOWN";

/// The identity key of a collection member, if it has one.
///
/// Only object elements carrying [`ODATA_ID`] have an identity.
pub fn identity_of(member: &Value) -> Option<&Value> {
    match member {
        Value::Object(fields) => fields.get(ODATA_ID),
        _ => None,
    }
}

/// Returns `true` if the object announces itself as a collection by carrying
/// the member count key.
pub fn is_collection(object: &Map<String, Value>) -> bool {
    object.contains_key(MEMBERS_COUNT)
}
