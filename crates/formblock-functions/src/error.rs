// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use formblock_common_http::RetryError;
use thiserror::Error;

/// Errors raised while handing form data to the submission endpoint.
#[derive(Debug, Error)]
pub enum SubmitError {
	#[error("failed to serialize form data: {0}")]
	Serialize(#[from] serde_json::Error),

	#[error("form submission failed: {0}")]
	Retry(#[from] RetryError),
}
