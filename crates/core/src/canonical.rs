// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canonicalization of raw group data.
//!
//! Local declarations and remote observations pass through the same rules
//! so that equal content always yields identical canonical groups:
//!
//! - Only the managed attributes (`description`, `member`) survive
//! - Member lists are sorted ascending, `member` is the last attribute
//! - Groups are keyed and iterated by name
//!
//! Canonicalization never de-duplicates members. Duplicates in the local
//! declaration are reported by validation instead.

use crate::error::CoreError;
use groupsync_domain::{
    AttributeKey, AttributeValue, CanonicalGroup, CategorizedGroups, DomainError, GroupCategory,
    GroupSet, RawGroup, RawGroupMap, RawValue,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Flattens and canonicalizes the local declarations.
///
/// Member lists must already be resolved to plain identifiers.
///
/// # Errors
///
/// Returns an error if:
/// - The same group name is declared in two categories
/// - A group carries a malformed `member` or `description` value
pub fn canonicalize(groups: &CategorizedGroups) -> Result<GroupSet, CoreError> {
    let mut declared_in: BTreeMap<&str, GroupCategory> = BTreeMap::new();
    let mut set: GroupSet = GroupSet::new();

    for (category, declared) in groups.iter() {
        for (name, group) in declared {
            // Rule: a group name belongs to exactly one category
            if let Some(first) = declared_in.insert(name.as_str(), category) {
                return Err(DomainError::ConfigConflict {
                    group: name.clone(),
                    first,
                    second: category,
                }
                .into());
            }

            set.insert(name.clone(), canonicalize_group(name, Some(category), group)?);
        }
    }

    Ok(set)
}

/// Canonicalizes groups observed in the directory.
///
/// # Errors
///
/// Returns an error if a group carries a malformed `member` or
/// `description` value.
pub fn canonicalize_remote(groups: &RawGroupMap) -> Result<GroupSet, CoreError> {
    groups
        .iter()
        .map(|(name, group)| -> Result<(String, CanonicalGroup), CoreError> {
            Ok((name.clone(), canonicalize_group(name, None, group)?))
        })
        .collect()
}

fn canonicalize_group(
    name: &str,
    category: Option<GroupCategory>,
    group: &RawGroup,
) -> Result<CanonicalGroup, CoreError> {
    let mut canonical: CanonicalGroup = CanonicalGroup::new();

    for (key, value) in group.iter() {
        let Some(attribute) = AttributeKey::from_name(key) else {
            debug!(group = %name, attribute = %key, "Ignoring unmanaged attribute");
            continue;
        };

        let value: AttributeValue = match attribute {
            AttributeKey::Description => canonical_description(name, value)?,
            AttributeKey::Member => canonical_members(name, category, value)?,
        };
        canonical.insert(attribute, value);
    }

    Ok(canonical)
}

fn canonical_description(name: &str, value: &RawValue) -> Result<AttributeValue, CoreError> {
    match value {
        RawValue::Null => Ok(AttributeValue::Null),
        RawValue::Text(text) => Ok(AttributeValue::Text(text.clone())),
        other => Err(DomainError::MalformedAttribute {
            group: name.to_string(),
            attribute: AttributeKey::Description.to_string(),
            reason: format!("expected text, found {}", other.kind()),
        }
        .into()),
    }
}

fn canonical_members(
    name: &str,
    category: Option<GroupCategory>,
    value: &RawValue,
) -> Result<AttributeValue, CoreError> {
    let malformed = |reason: String| -> CoreError {
        DomainError::MalformedMember {
            group: name.to_string(),
            category,
            reason,
        }
        .into()
    };

    match value {
        RawValue::Null => Ok(AttributeValue::Null),
        RawValue::List(entries) => {
            let members: Vec<String> = entries
                .iter()
                .map(|entry| match entry {
                    RawValue::Text(identifier) => Ok(identifier.clone()),
                    other => Err(malformed(format!(
                        "expected a plain identifier, found {}",
                        other.kind()
                    ))),
                })
                .collect::<Result<Vec<String>, CoreError>>()?;
            Ok(AttributeValue::members(members))
        }
        other => Err(malformed(format!(
            "member must be a list, found {}",
            other.kind()
        ))),
    }
}
