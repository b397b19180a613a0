// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The attributes reconciliation manages.
///
/// Ordering is significant: `Member` sorts last so that it always occupies
/// the final position of a canonical group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKey {
    /// Free-form group description.
    Description,
    /// Group membership.
    Member,
}

impl AttributeKey {
    /// Recognizes an attribute name.
    ///
    /// Returns `None` for attributes outside the managed set.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "description" => Some(Self::Description),
            "member" => Some(Self::Member),
            _ => None,
        }
    }

    /// The attribute's directory name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Member => "member",
        }
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A canonical attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Declared but empty.
    Null,
    /// A single text value.
    Text(String),
    /// A member list, sorted ascending.
    Members(Vec<String>),
}

impl AttributeValue {
    /// Builds a member list, sorting it.
    ///
    /// Duplicates are preserved so that validation can still see them.
    #[must_use]
    pub fn members<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut members: Vec<String> = items.into_iter().map(Into::into).collect();
        members.sort();
        Self::Members(members)
    }

    /// Whether this value carries nothing: null or an empty member list.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Members(members) => members.is_empty(),
            Self::Text(_) => false,
        }
    }
}

/// A group restricted to the managed attributes in deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanonicalGroup {
    attributes: BTreeMap<AttributeKey, AttributeValue>,
}

impl CanonicalGroup {
    /// Creates a group with no attributes declared.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: BTreeMap::new(),
        }
    }

    /// Returns this group with an attribute set.
    #[must_use]
    pub fn with(mut self, key: AttributeKey, value: AttributeValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets an attribute. Member lists are sorted on the way in.
    pub fn insert(&mut self, key: AttributeKey, value: AttributeValue) {
        let value: AttributeValue = match value {
            AttributeValue::Members(mut members) => {
                members.sort();
                AttributeValue::Members(members)
            }
            other => other,
        };
        self.attributes.insert(key, value);
    }

    /// Looks up an attribute.
    #[must_use]
    pub fn get(&self, key: AttributeKey) -> Option<&AttributeValue> {
        self.attributes.get(&key)
    }

    /// Iterates attributes in canonical order (`member` last).
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (*k, v))
    }

    /// The declared member identifiers, if the group declares any.
    #[must_use]
    pub fn members(&self) -> &[String] {
        match self.attributes.get(&AttributeKey::Member) {
            Some(AttributeValue::Members(members)) => members,
            _ => &[],
        }
    }
}

/// Canonical groups keyed by name, always iterated in name order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupSet {
    groups: BTreeMap<String, CanonicalGroup>,
}

impl GroupSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Adds a group, returning the one it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        group: CanonicalGroup,
    ) -> Option<CanonicalGroup> {
        self.groups.insert(name.into(), group)
    }

    /// Returns this set with a group added.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, group: CanonicalGroup) -> Self {
        self.insert(name, group);
        self
    }

    /// Looks up a group by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CanonicalGroup> {
        self.groups.get(name)
    }

    /// Whether a group with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Iterates groups in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CanonicalGroup)> {
        self.groups.iter()
    }

    /// Iterates group names in order.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.groups.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<(String, CanonicalGroup)> for GroupSet {
    fn from_iter<T: IntoIterator<Item = (String, CanonicalGroup)>>(iter: T) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}
