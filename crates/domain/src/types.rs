// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use std::collections::BTreeMap;
use std::str::FromStr;
use time::Date;
use time::macros::format_description;

/// The kind of group a directory entry represents.
///
/// The category decides which organizational unit the entry lives under.
/// The declaration order is the lookup priority used when classifying names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupCategory {
    /// Organizational groups (teams, departments).
    Organizational,
    /// Functional groups (roles).
    Functional,
    /// Permission groups.
    Permission,
    /// Location groups (offices, sites).
    Location,
}

impl GroupCategory {
    /// Every category in lookup priority order.
    pub const ALL: [Self; 4] = [
        Self::Organizational,
        Self::Functional,
        Self::Permission,
        Self::Location,
    ];

    /// The name used for this category in local state layouts.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Organizational => "organizational",
            Self::Functional => "functional",
            Self::Permission => "permissions",
            Self::Location => "locations",
        }
    }
}

impl FromStr for GroupCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organizational" => Ok(Self::Organizational),
            "functional" => Ok(Self::Functional),
            "permissions" => Ok(Self::Permission),
            "locations" => Ok(Self::Location),
            _ => Err(DomainError::UnknownCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for GroupCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The classification of an arbitrary entry name.
///
/// Names not declared as a local group are assumed to denote users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryCategory {
    /// A locally declared group of the given category.
    Group(GroupCategory),
    /// A user identity.
    User,
}

/// An untyped attribute value as loaded from configuration or observed
/// in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// An absent or explicitly empty value.
    Null,
    /// Any scalar, rendered as text.
    Text(String),
    /// A sequence of values.
    List(Vec<Self>),
    /// A nested mapping.
    Map(BTreeMap<String, Self>),
}

impl RawValue {
    /// Builds a list of text values.
    #[must_use]
    pub fn text_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Self::Text(s.into())).collect())
    }

    /// A short name for the shape of this value, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "mapping",
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A group's attributes as loaded or observed, keyed by attribute name.
///
/// Unrecognized attributes are kept here and only discarded during
/// canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawGroup {
    attributes: BTreeMap<String, RawValue>,
}

impl RawGroup {
    /// Creates a group with no attributes.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: BTreeMap::new(),
        }
    }

    /// Returns this group with an attribute set.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Sets an attribute, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) -> Option<RawValue> {
        self.attributes.insert(key.into(), value)
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.attributes.get(key)
    }

    /// Iterates attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawValue)> {
        self.attributes.iter()
    }

    /// Whether the group has no attributes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl FromIterator<(String, RawValue)> for RawGroup {
    fn from_iter<T: IntoIterator<Item = (String, RawValue)>>(iter: T) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

/// Raw groups keyed by name, as observed in the remote directory.
pub type RawGroupMap = BTreeMap<String, RawGroup>;

/// Locally declared raw groups, keyed by category and then by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategorizedGroups {
    categories: BTreeMap<GroupCategory, RawGroupMap>,
}

impl CategorizedGroups {
    /// Creates an empty declaration set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            categories: BTreeMap::new(),
        }
    }

    /// Adds a group under a category, returning any group it replaced
    /// within that same category.
    pub fn insert(
        &mut self,
        category: GroupCategory,
        name: impl Into<String>,
        group: RawGroup,
    ) -> Option<RawGroup> {
        self.categories
            .entry(category)
            .or_default()
            .insert(name.into(), group)
    }

    /// Returns this set with a group added.
    #[must_use]
    pub fn with(
        mut self,
        category: GroupCategory,
        name: impl Into<String>,
        group: RawGroup,
    ) -> Self {
        self.insert(category, name, group);
        self
    }

    /// The groups of one category, if any were declared.
    #[must_use]
    pub fn category(&self, category: GroupCategory) -> Option<&RawGroupMap> {
        self.categories.get(&category)
    }

    /// Iterates categories in priority order with their groups.
    pub fn iter(&self) -> impl Iterator<Item = (GroupCategory, &RawGroupMap)> {
        self.categories.iter().map(|(c, groups)| (*c, groups))
    }

    /// Total number of declared groups across all categories.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }
}

/// A membership entry that only becomes effective on or after a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalMember {
    /// The member identifier.
    pub identifier: String,
    /// The first date on which the membership applies.
    pub not_before: Option<Date>,
}

impl ConditionalMember {
    /// Whether the membership applies on the given date.
    #[must_use]
    pub fn is_effective(&self, today: Date) -> bool {
        self.not_before.is_none_or(|not_before| today >= not_before)
    }
}

/// A single entry of a declared member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberEntry {
    /// A plain identifier.
    Plain(String),
    /// A time-gated member.
    Conditional(ConditionalMember),
}

impl MemberEntry {
    /// Interprets a raw value as a member entry.
    ///
    /// A conditional entry is a mapping with a required `identifier` and an
    /// optional `not_before` date; no other keys are allowed.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the value is neither a
    /// plain identifier nor a well-formed conditional entry.
    pub fn from_raw(value: &RawValue) -> Result<Self, String> {
        match value {
            RawValue::Text(identifier) => Ok(Self::Plain(identifier.clone())),
            RawValue::Map(fields) => {
                if let Some(unknown) = fields
                    .keys()
                    .find(|k| !matches!(k.as_str(), "identifier" | "not_before"))
                {
                    return Err(format!("unexpected key '{unknown}' in conditional member"));
                }

                let identifier: String = match fields.get("identifier") {
                    Some(RawValue::Text(identifier)) if identifier.is_empty() => {
                        return Err(String::from("conditional member identifier is empty"));
                    }
                    Some(RawValue::Text(identifier)) => identifier.clone(),
                    Some(other) => {
                        return Err(format!(
                            "conditional member identifier must be text, found {}",
                            other.kind()
                        ));
                    }
                    None => return Err(String::from("conditional member has no identifier")),
                };

                let not_before: Option<Date> = match fields.get("not_before") {
                    None | Some(RawValue::Null) => None,
                    Some(RawValue::Text(text)) => {
                        Some(parse_date(text).map_err(|e| e.to_string())?)
                    }
                    Some(other) => {
                        return Err(format!(
                            "not_before of '{identifier}' must be a date, found {}",
                            other.kind()
                        ));
                    }
                };

                Ok(Self::Conditional(ConditionalMember {
                    identifier,
                    not_before,
                }))
            }
            other => Err(format!(
                "expected an identifier or a conditional member, found {}",
                other.kind()
            )),
        }
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the text is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}
