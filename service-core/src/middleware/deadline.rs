//! Per-request deadline.
//!
//! `deadline_middleware` stamps every request with a [`Deadline`] derived from
//! the configured budget. Handlers pull it out as an extractor and run their
//! storage call through [`Deadline::run`], so one slow database round trip
//! cannot hold a worker past the budget. When the client goes away hyper drops
//! the handler future, which cancels the bounded call with it.

use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
            budget,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Drive `operation` to completion unless the deadline passes first.
    ///
    /// An elapsed deadline is a storage failure, not a client error.
    pub async fn run<F, T>(self, operation: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout_at(self.expires_at, operation).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    budget_ms = self.budget.as_millis() as u64,
                    "Request deadline exceeded"
                );
                Err(AppError::DatabaseError(anyhow::anyhow!(
                    "operation timed out after {:?}",
                    self.budget
                )))
            }
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Deadline
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Deadline>().copied().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("route is missing deadline_middleware"))
        })
    }
}

pub async fn deadline_middleware(
    State(budget): State<Duration>,
    mut req: Request,
    next: Next,
) -> Response {
    req.extensions_mut().insert(Deadline::after(budget));
    next.run(req).await
}
