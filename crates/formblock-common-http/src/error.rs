// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Why a single attempt of a request operation was rejected.
///
/// Both variants feed the same retry decision; neither is surfaced to the
/// caller except as the `last` failure of a [`RetryError`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AttemptFailure {
	/// The operation itself returned an error.
	#[error("{0}")]
	Operation(String),

	/// The operation resolved, but with a status of 400 or above.
	#[error("Request failed with status {0}")]
	Status(u16),
}

/// Returned once every permitted attempt has failed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Request failed after {attempts} attempts: {last}")]
pub struct RetryError {
	pub attempts: u32,
	#[source]
	pub last: AttemptFailure,
}
