// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conditional membership resolution.
//!
//! Local declarations may list members that only apply from a given date
//! onward. Resolution turns every member list into plain identifiers for a
//! fixed reference date, dropping members whose date has not yet come.

use crate::error::CoreError;
use groupsync_domain::{
    CategorizedGroups, DomainError, GroupCategory, MemberEntry, RawGroup, RawValue,
};
use time::Date;
use tracing::{debug, info};

/// Resolves conditional members of every declared group.
///
/// The input is left untouched; a new declaration set is returned in which
/// every `member` list contains only plain identifiers. Attributes other
/// than `member` are carried over as-is.
///
/// # Arguments
///
/// * `groups` - The local declarations, by category
/// * `today` - The reference date for time-gated members
///
/// # Errors
///
/// Returns `DomainError::MalformedMember` if a member list is not a list,
/// or if an entry is neither a plain identifier nor a well-formed
/// conditional member.
pub fn resolve_members(
    groups: &CategorizedGroups,
    today: Date,
) -> Result<CategorizedGroups, CoreError> {
    let mut resolved: CategorizedGroups = CategorizedGroups::new();

    for (category, declared) in groups.iter() {
        for (name, group) in declared {
            let group: RawGroup = resolve_group(category, name, group, today)?;
            resolved.insert(category, name.clone(), group);
        }
    }

    Ok(resolved)
}

fn resolve_group(
    category: GroupCategory,
    name: &str,
    group: &RawGroup,
    today: Date,
) -> Result<RawGroup, CoreError> {
    let mut resolved: RawGroup = RawGroup::new();

    for (key, value) in group.iter() {
        let value: RawValue = if key == "member" {
            resolve_member_list(category, name, value, today)?
        } else {
            value.clone()
        };
        resolved.insert(key.clone(), value);
    }

    Ok(resolved)
}

fn resolve_member_list(
    category: GroupCategory,
    name: &str,
    value: &RawValue,
    today: Date,
) -> Result<RawValue, CoreError> {
    let entries: &[RawValue] = match value {
        RawValue::Null => return Ok(RawValue::Null),
        RawValue::List(entries) => entries,
        other => {
            return Err(DomainError::MalformedMember {
                group: name.to_string(),
                category: Some(category),
                reason: format!("member must be a list, found {}", other.kind()),
            }
            .into());
        }
    };

    let mut members: Vec<RawValue> = Vec::with_capacity(entries.len());

    for entry in entries {
        let entry: MemberEntry =
            MemberEntry::from_raw(entry).map_err(|reason| DomainError::MalformedMember {
                group: name.to_string(),
                category: Some(category),
                reason,
            })?;

        match entry {
            MemberEntry::Plain(identifier) => members.push(RawValue::Text(identifier)),
            MemberEntry::Conditional(member) if member.is_effective(today) => {
                debug!(
                    group = %name,
                    %category,
                    member = %member.identifier,
                    "Conditional member is in effect"
                );
                members.push(RawValue::Text(member.identifier));
            }
            MemberEntry::Conditional(member) => {
                info!(
                    group = %name,
                    %category,
                    member = %member.identifier,
                    not_before = ?member.not_before,
                    "Skipping member that is not yet in effect"
                );
            }
        }
    }

    Ok(RawValue::List(members))
}
