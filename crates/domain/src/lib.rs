// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod group;
mod plan;
mod types;

#[cfg(test)]
mod tests;

pub use error::{DomainError, DuplicateMember};
pub use group::{AttributeKey, AttributeValue, CanonicalGroup, GroupSet};
pub use plan::{Modification, Operation, OperationKind, OperationsPlan};
pub use types::{
    CategorizedGroups, ConditionalMember, EntryCategory, GroupCategory, MemberEntry, RawGroup,
    RawGroupMap, RawValue, parse_date,
};
