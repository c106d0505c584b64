// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Backoff delay capability.

use async_trait::async_trait;
use std::time::Duration;

/// Waits out a backoff delay between attempts.
///
/// Swapping the implementation lets tests run retry sequences without real
/// multi-second waits.
#[async_trait]
pub trait Sleeper: Send + Sync {
	async fn sleep(&self, delay: Duration);
}

/// Sleeps on the tokio timer. Honours `tokio::time::pause`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
	async fn sleep(&self, delay: Duration) {
		tokio::time::sleep(delay).await;
	}
}

#[async_trait]
impl<S: Sleeper + ?Sized> Sleeper for std::sync::Arc<S> {
	async fn sleep(&self, delay: Duration) {
		(**self).sleep(delay).await;
	}
}
