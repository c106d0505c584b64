// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for formblock.
//!
//! This crate provides:
//! - A pre-configured HTTP client with consistent User-Agent header
//! - A request retry executor with exponential backoff and retry metadata

mod client;
mod error;
mod options;
mod retry;
mod sleeper;

pub use client::{builder, builder_with_user_agent};
pub use error::{AttemptFailure, RetryError};
pub use options::{
	RetryBody, RetryHeaders, RetryOptions, HEADER_RETRY, HEADER_RETRY_COUNT, HEADER_RETRY_TIME,
};
pub use retry::{
	backoff_delay, retry_request, RetryExecutor, StatusResponse, BASE_DELAY, MAX_RETRIES,
};
pub use sleeper::{Sleeper, TokioSleeper};
