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

mod canonical;
mod diff;
mod error;
mod lookup;
mod reconcile;
mod resolve;
mod validation;

#[cfg(test)]
mod tests;

pub use canonical::{canonicalize, canonicalize_remote};
pub use diff::{attributes_equal, diff};
pub use error::CoreError;
pub use lookup::{CategoryIndex, local_users};
pub use reconcile::{Reconciliation, reconcile};
pub use resolve::resolve_members;
pub use validation::validate_unique_members;
