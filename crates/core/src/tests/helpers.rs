// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use groupsync_domain::{
    AttributeKey, AttributeValue, CanonicalGroup, CategorizedGroups, GroupCategory, RawGroup,
    RawValue,
};
use std::collections::BTreeMap;
use time::Date;
use time::macros::date;

pub const fn test_today() -> Date {
    date!(2026 - 10 - 18)
}

pub fn raw_members(members: &[&str]) -> RawGroup {
    RawGroup::new().with("member", RawValue::text_list(members.iter().copied()))
}

pub fn conditional_member(identifier: &str, not_before: Option<&str>) -> RawValue {
    let mut fields: BTreeMap<String, RawValue> = BTreeMap::new();
    fields.insert(String::from("identifier"), RawValue::from(identifier));
    if let Some(not_before) = not_before {
        fields.insert(String::from("not_before"), RawValue::from(not_before));
    }
    RawValue::Map(fields)
}

pub fn canonical_members(members: &[&str]) -> CanonicalGroup {
    CanonicalGroup::new().with(
        AttributeKey::Member,
        AttributeValue::members(members.iter().copied()),
    )
}

pub fn organizational(groups: &[(&str, RawGroup)]) -> CategorizedGroups {
    groups
        .iter()
        .fold(CategorizedGroups::new(), |acc, (name, group)| {
            acc.with(GroupCategory::Organizational, *name, group.clone())
        })
}
