// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{conditional_member, organizational, raw_members, test_today};
use crate::{CoreError, resolve_members};
use groupsync_domain::{
    CategorizedGroups, DomainError, GroupCategory, RawGroup, RawGroupMap, RawValue,
};

fn resolved_members(resolved: &CategorizedGroups, name: &str) -> Option<RawValue> {
    resolved
        .category(GroupCategory::Organizational)
        .and_then(|groups: &RawGroupMap| groups.get(name))
        .and_then(|group: &RawGroup| group.get("member"))
        .cloned()
}

#[test]
fn test_plain_members_pass_through() {
    let groups: CategorizedGroups = organizational(&[("eng", raw_members(&["bob", "alice"]))]);

    let resolved: CategorizedGroups = resolve_members(&groups, test_today()).unwrap();

    assert_eq!(
        resolved_members(&resolved, "eng"),
        Some(RawValue::text_list(["bob", "alice"]))
    );
}

#[test]
fn test_future_conditional_member_is_dropped() {
    let group: RawGroup = RawGroup::new().with(
        "member",
        RawValue::List(vec![
            RawValue::from("alice"),
            conditional_member("carol", Some("2026-11-01")),
        ]),
    );
    let groups: CategorizedGroups = organizational(&[("eng", group)]);

    let resolved: CategorizedGroups = resolve_members(&groups, test_today()).unwrap();

    assert_eq!(
        resolved_members(&resolved, "eng"),
        Some(RawValue::text_list(["alice"]))
    );
}

#[test]
fn test_past_conditional_member_becomes_plain() {
    let group: RawGroup = RawGroup::new().with(
        "member",
        RawValue::List(vec![
            conditional_member("carol", Some("2026-01-01")),
            RawValue::from("alice"),
        ]),
    );
    let groups: CategorizedGroups = organizational(&[("eng", group)]);

    let resolved: CategorizedGroups = resolve_members(&groups, test_today()).unwrap();

    assert_eq!(
        resolved_members(&resolved, "eng"),
        Some(RawValue::text_list(["carol", "alice"]))
    );
}

#[test]
fn test_conditional_member_applies_on_its_start_date() {
    let group: RawGroup = RawGroup::new().with(
        "member",
        RawValue::List(vec![conditional_member("carol", Some("2026-10-18"))]),
    );
    let groups: CategorizedGroups = organizational(&[("eng", group)]);

    let resolved: CategorizedGroups = resolve_members(&groups, test_today()).unwrap();

    assert_eq!(
        resolved_members(&resolved, "eng"),
        Some(RawValue::text_list(["carol"]))
    );
}

#[test]
fn test_undated_conditional_member_becomes_plain() {
    let group: RawGroup = RawGroup::new().with(
        "member",
        RawValue::List(vec![conditional_member("carol", None)]),
    );
    let groups: CategorizedGroups = organizational(&[("eng", group)]);

    let resolved: CategorizedGroups = resolve_members(&groups, test_today()).unwrap();

    assert_eq!(
        resolved_members(&resolved, "eng"),
        Some(RawValue::text_list(["carol"]))
    );
}

#[test]
fn test_all_members_pending_leaves_empty_list() {
    let group: RawGroup = RawGroup::new().with(
        "member",
        RawValue::List(vec![conditional_member("carol", Some("2027-01-01"))]),
    );
    let groups: CategorizedGroups = organizational(&[("eng", group)]);

    let resolved: CategorizedGroups = resolve_members(&groups, test_today()).unwrap();

    assert_eq!(
        resolved_members(&resolved, "eng"),
        Some(RawValue::List(Vec::new()))
    );
}

#[test]
fn test_null_member_list_is_preserved() {
    let group: RawGroup = RawGroup::new().with("member", RawValue::Null);
    let groups: CategorizedGroups = organizational(&[("eng", group)]);

    let resolved: CategorizedGroups = resolve_members(&groups, test_today()).unwrap();

    assert_eq!(resolved_members(&resolved, "eng"), Some(RawValue::Null));
}

#[test]
fn test_other_attributes_are_carried_over() {
    let group: RawGroup = raw_members(&["alice"])
        .with("description", "Engineering")
        .with("mail", "eng@example.com");
    let groups: CategorizedGroups = organizational(&[("eng", group)]);

    let resolved: CategorizedGroups = resolve_members(&groups, test_today()).unwrap();
    let eng: &RawGroup = resolved
        .category(GroupCategory::Organizational)
        .unwrap()
        .get("eng")
        .unwrap();

    assert_eq!(eng.get("description"), Some(&RawValue::from("Engineering")));
    assert_eq!(eng.get("mail"), Some(&RawValue::from("eng@example.com")));
}

#[test]
fn test_input_is_not_modified() {
    let group: RawGroup = RawGroup::new().with(
        "member",
        RawValue::List(vec![conditional_member("carol", Some("2026-01-01"))]),
    );
    let groups: CategorizedGroups = organizational(&[("eng", group)]);
    let before: CategorizedGroups = groups.clone();

    let _resolved: CategorizedGroups = resolve_members(&groups, test_today()).unwrap();

    assert_eq!(groups, before);
}

#[test]
fn test_malformed_member_entry_names_group() {
    let group: RawGroup = RawGroup::new().with(
        "member",
        RawValue::List(vec![RawValue::text_list(["nested"])]),
    );
    let groups: CategorizedGroups =
        CategorizedGroups::new().with(GroupCategory::Permission, "admins", group);

    let result: Result<CategorizedGroups, CoreError> = resolve_members(&groups, test_today());

    match result {
        Err(CoreError::DomainViolation(DomainError::MalformedMember {
            group, category, ..
        })) => {
            assert_eq!(group, "admins");
            assert_eq!(category, Some(GroupCategory::Permission));
        }
        other => panic!("expected MalformedMember, got {other:?}"),
    }
}

#[test]
fn test_scalar_member_attribute_is_malformed() {
    let group: RawGroup = RawGroup::new().with("member", "alice");
    let groups: CategorizedGroups = organizational(&[("eng", group)]);

    let result: Result<CategorizedGroups, CoreError> = resolve_members(&groups, test_today());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::MalformedMember { .. }
        ))
    ));
}

#[test]
fn test_conditional_member_with_bad_date_is_malformed() {
    let group: RawGroup = RawGroup::new().with(
        "member",
        RawValue::List(vec![conditional_member("carol", Some("soon"))]),
    );
    let groups: CategorizedGroups = organizational(&[("eng", group)]);

    let result: Result<CategorizedGroups, CoreError> = resolve_members(&groups, test_today());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::MalformedMember { .. }
        ))
    ));
}
