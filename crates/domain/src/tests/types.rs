// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CategorizedGroups, ConditionalMember, DomainError, GroupCategory, MemberEntry, RawGroup,
    RawValue, parse_date,
};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::macros::date;

fn conditional(fields: &[(&str, RawValue)]) -> RawValue {
    RawValue::Map(
        fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect::<BTreeMap<String, RawValue>>(),
    )
}

#[test]
fn test_group_category_parses_local_state_names() {
    assert_eq!(
        GroupCategory::from_str("organizational").unwrap(),
        GroupCategory::Organizational
    );
    assert_eq!(
        GroupCategory::from_str("functional").unwrap(),
        GroupCategory::Functional
    );
    assert_eq!(
        GroupCategory::from_str("permissions").unwrap(),
        GroupCategory::Permission
    );
    assert_eq!(
        GroupCategory::from_str("locations").unwrap(),
        GroupCategory::Location
    );
}

#[test]
fn test_group_category_rejects_unknown_name() {
    let result: Result<GroupCategory, DomainError> = GroupCategory::from_str("teams");
    assert_eq!(result, Err(DomainError::UnknownCategory(String::from("teams"))));
}

#[test]
fn test_group_category_round_trips_through_display() {
    for category in GroupCategory::ALL {
        assert_eq!(
            GroupCategory::from_str(&category.to_string()).unwrap(),
            category
        );
    }
}

#[test]
fn test_group_category_priority_order() {
    assert_eq!(
        GroupCategory::ALL,
        [
            GroupCategory::Organizational,
            GroupCategory::Functional,
            GroupCategory::Permission,
            GroupCategory::Location,
        ]
    );
}

#[test]
fn test_plain_member_entry() {
    let entry: MemberEntry = MemberEntry::from_raw(&RawValue::from("alice")).unwrap();
    assert_eq!(entry, MemberEntry::Plain(String::from("alice")));
}

#[test]
fn test_conditional_member_entry_with_date() {
    let raw: RawValue = conditional(&[
        ("identifier", RawValue::from("bob")),
        ("not_before", RawValue::from("2026-03-01")),
    ]);

    let entry: MemberEntry = MemberEntry::from_raw(&raw).unwrap();
    assert_eq!(
        entry,
        MemberEntry::Conditional(ConditionalMember {
            identifier: String::from("bob"),
            not_before: Some(date!(2026 - 03 - 01)),
        })
    );
}

#[test]
fn test_conditional_member_entry_without_date() {
    let raw: RawValue = conditional(&[("identifier", RawValue::from("bob"))]);

    let entry: MemberEntry = MemberEntry::from_raw(&raw).unwrap();
    assert_eq!(
        entry,
        MemberEntry::Conditional(ConditionalMember {
            identifier: String::from("bob"),
            not_before: None,
        })
    );
}

#[test]
fn test_conditional_member_requires_identifier() {
    let raw: RawValue = conditional(&[("not_before", RawValue::from("2026-03-01"))]);
    assert!(MemberEntry::from_raw(&raw).is_err());
}

#[test]
fn test_conditional_member_rejects_unknown_key() {
    let raw: RawValue = conditional(&[
        ("identifier", RawValue::from("bob")),
        ("until", RawValue::from("2026-03-01")),
    ]);

    let reason: String = MemberEntry::from_raw(&raw).unwrap_err();
    assert!(reason.contains("until"));
}

#[test]
fn test_conditional_member_rejects_bad_date() {
    let raw: RawValue = conditional(&[
        ("identifier", RawValue::from("bob")),
        ("not_before", RawValue::from("next tuesday")),
    ]);
    assert!(MemberEntry::from_raw(&raw).is_err());
}

#[test]
fn test_conditional_member_rejects_empty_identifier() {
    let raw: RawValue = conditional(&[("identifier", RawValue::from(""))]);
    assert!(MemberEntry::from_raw(&raw).is_err());
}

#[test]
fn test_list_and_null_are_not_member_entries() {
    assert!(MemberEntry::from_raw(&RawValue::text_list(["a"])).is_err());
    assert!(MemberEntry::from_raw(&RawValue::Null).is_err());
}

#[test]
fn test_conditional_member_is_effective_on_its_date() {
    let member: ConditionalMember = ConditionalMember {
        identifier: String::from("bob"),
        not_before: Some(date!(2026 - 03 - 01)),
    };

    assert!(!member.is_effective(date!(2026 - 02 - 28)));
    assert!(member.is_effective(date!(2026 - 03 - 01)));
    assert!(member.is_effective(date!(2026 - 03 - 02)));
}

#[test]
fn test_undated_conditional_member_is_always_effective() {
    let member: ConditionalMember = ConditionalMember {
        identifier: String::from("bob"),
        not_before: None,
    };
    assert!(member.is_effective(date!(1970 - 01 - 01)));
}

#[test]
fn test_parse_date_accepts_iso_dates() {
    assert_eq!(parse_date("2026-10-18").unwrap(), date!(2026 - 10 - 18));
    assert_eq!(parse_date(" 2026-10-18 ").unwrap(), date!(2026 - 10 - 18));
}

#[test]
fn test_parse_date_rejects_invalid_dates() {
    assert!(matches!(
        parse_date("2026-02-30"),
        Err(DomainError::InvalidDate { .. })
    ));
    assert!(matches!(
        parse_date("18/10/2026"),
        Err(DomainError::InvalidDate { .. })
    ));
}

#[test]
fn test_categorized_groups_keep_categories_apart() {
    let groups: CategorizedGroups = CategorizedGroups::new()
        .with(GroupCategory::Location, "montreal", RawGroup::new())
        .with(GroupCategory::Organizational, "eng", RawGroup::new())
        .with(GroupCategory::Organizational, "ops", RawGroup::new());

    assert_eq!(groups.group_count(), 3);
    assert_eq!(
        groups.category(GroupCategory::Organizational).unwrap().len(),
        2
    );
    assert!(groups.category(GroupCategory::Functional).is_none());

    let order: Vec<GroupCategory> = groups.iter().map(|(c, _)| c).collect();
    assert_eq!(
        order,
        vec![GroupCategory::Organizational, GroupCategory::Location]
    );
}

#[test]
fn test_raw_group_builder() {
    let group: RawGroup = RawGroup::new()
        .with("description", "Engineering")
        .with("member", RawValue::text_list(["alice", "bob"]));

    assert_eq!(group.get("description"), Some(&RawValue::from("Engineering")));
    assert_eq!(group.iter().count(), 2);
    assert!(!group.is_empty());
}
