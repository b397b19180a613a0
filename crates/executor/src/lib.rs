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

mod client;
mod error;
mod executor;
mod layout;
mod snapshot;

#[cfg(test)]
mod tests;

pub use client::DirectoryClient;
pub use error::{ExecutorError, Phase};
pub use executor::{ExecutionReport, Executor, verify_users};
pub use layout::{DirectoryLayout, common_name};
pub use snapshot::{SnapshotDirectory, SnapshotEntry, SnapshotError};
