//! Versioned OData type identifiers.
//!
//! A versioned identifier has the shape `#<Namespace>.v<Major>_<Minor>_<Patch>.<TypeName>`,
//! for example `#ComputerSystem.v1_11_0.ComputerSystem`. The namespace may
//! itself be dotted (`#Intel.Oem.v1_0_0.Chassis`) and the version may carry any
//! number of `_`-separated numeric segments.
//!
//! Versions compare numerically segment by segment, so `v1_11_0` is higher than
//! `v1_1_0`. Missing trailing segments count as zero: `v1_1` equals `v1_1_0`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A parsed `@odata.type` value.
///
/// Only identifiers with the same namespace and type name can be ordered; see
/// [`VersionedTypeId::compare`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionedTypeId {
    namespace: String,
    version: Vec<u64>,
    type_name: String,
    raw: String,
}

impl VersionedTypeId {
    /// Parse a versioned identifier.
    ///
    /// Returns `None` for anything that does not match the versioned shape.
    /// That is not an error: such values are opaque and never take part in
    /// version comparison.
    ///
    /// # Examples
    ///
    /// ```
    /// use rsm_types::VersionedTypeId;
    ///
    /// let id = VersionedTypeId::parse("#Chassis.v1_9_0.Chassis").unwrap();
    /// assert_eq!(id.namespace(), "Chassis");
    /// assert_eq!(id.version(), &[1, 9, 0]);
    /// assert!(VersionedTypeId::parse("#ChassisCollection.ChassisCollection").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let body = raw.strip_prefix('#')?;
        let segments: Vec<&str> = body.split('.').collect();
        // namespace (one or more), version, type name
        if segments.len() < 3 {
            return None;
        }

        let (type_name, rest) = segments.split_last()?;
        let (version, namespace) = rest.split_last()?;

        if !is_word(type_name) || !namespace.iter().all(|s| is_word(s)) {
            return None;
        }
        let version = parse_version(version)?;

        Some(Self {
            namespace: namespace.join("."),
            version,
            type_name: (*type_name).to_string(),
            raw: raw.to_string(),
        })
    }

    /// The namespace, e.g. `ComputerSystem` or `Intel.Oem`.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Numeric version segments, most significant first.
    pub fn version(&self) -> &[u64] {
        &self.version
    }

    /// The type name following the version.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The original text this identifier was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if both identifiers name the same namespace and type.
    pub fn is_comparable_with(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.type_name == other.type_name
    }

    /// Order two identifiers by version.
    ///
    /// Fails with [`TypeError::IncomparableIdentifiers`] when namespace or type
    /// name differ.
    pub fn compare(&self, other: &Self) -> Result<Ordering, TypeError> {
        if !self.is_comparable_with(other) {
            return Err(TypeError::IncomparableIdentifiers {
                left: self.raw.clone(),
                right: other.raw.clone(),
            });
        }

        let len = self.version.len().max(other.version.len());
        let segment = |v: &[u64], i: usize| v.get(i).copied().unwrap_or(0);
        let ordering = (0..len)
            .map(|i| segment(&self.version, i).cmp(&segment(&other.version, i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal);
        Ok(ordering)
    }

    /// Return the higher of two identifiers, preferring `self` on a tie.
    pub fn higher_of(self, other: Self) -> Result<Self, TypeError> {
        match self.compare(&other)? {
            Ordering::Less => Ok(other),
            Ordering::Equal | Ordering::Greater => Ok(self),
        }
    }
}

/// One or more ASCII alphanumerics or underscores.
fn is_word(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse `v<digits>(_<digits>)*` into numeric segments.
fn parse_version(segment: &str) -> Option<Vec<u64>> {
    let digits = segment.strip_prefix('v')?;
    digits
        .split('_')
        .map(|group| {
            if group.is_empty() || !group.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            group.parse::<u64>().ok()
        })
        .collect()
}

impl fmt::Display for VersionedTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for VersionedTypeId {
    type Error = TypeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or(TypeError::InvalidIdentifier(raw))
    }
}

impl From<VersionedTypeId> for String {
    fn from(id: VersionedTypeId) -> Self {
        id.raw
    }
}
