//! The asynchronous operation envelope.
//!
//! Every store operation runs through the same three-phase lifecycle:
//! `Pending` is observable immediately on invocation, then exactly one of
//! `Fulfilled` or `Rejected` on settlement. View code reads the slice's
//! phase and error flags; raw errors never cross the operation boundary.
//!
//! Concurrent invocations of the same operation are independent - there is
//! no de-duplication or cancellation, and the last settlement to write a
//! slice wins.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{AppError, Result};

/// Lifecycle phase of one operation slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Never invoked, or reset after a completed lifecycle.
    #[default]
    Idle,
    /// Invoked; awaiting settlement.
    Pending,
    /// Settled successfully.
    Fulfilled,
    /// Settled with a failure; the reason is on the slice.
    Rejected,
}

/// Observable lifecycle state for one operation.
#[derive(Debug, Clone, Default)]
pub struct OpState {
    phase: Phase,
    error: Option<String>,
}

impl OpState {
    /// Mark the operation pending. Clears any error from a previous run, so
    /// stale failures never outlive a retry.
    pub fn begin(&mut self) {
        self.phase = Phase::Pending;
        self.error = None;
    }

    /// Mark the operation fulfilled.
    pub fn fulfill(&mut self) {
        self.phase = Phase::Fulfilled;
    }

    /// Mark the operation rejected with a human-readable reason.
    pub fn reject(&mut self, reason: impl Into<String>) {
        self.phase = Phase::Rejected;
        self.error = Some(reason.into());
    }

    /// Return the slice to `Idle`, clearing success and error flags.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the operation is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Pending)
    }

    /// Whether the last run settled successfully.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.phase, Phase::Fulfilled)
    }

    /// Rejection reason from the last run, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Lock a slice mutex, recovering from poisoning.
///
/// Slices hold plain data; a panic mid-mutation cannot leave them in a state
/// worse than last-write-wins already permits.
pub(crate) fn lock<S>(slice: &Mutex<S>) -> MutexGuard<'_, S> {
    slice.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drive one operation through its lifecycle against a guarded state slice.
///
/// Marks the selected [`OpState`] pending, awaits `work`, then applies
/// `on_fulfilled` and marks fulfilled under a single lock on success, or
/// records the rejection reason on failure. Side effects beyond the state
/// mutation (persistence, dependent operations) belong to the caller's
/// success path, after this returns `Ok`.
pub(crate) async fn drive<S, T, F>(
    slice: &Mutex<S>,
    select: impl Fn(&mut S) -> &mut OpState,
    work: F,
    on_fulfilled: impl FnOnce(&mut S, &T),
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    select(&mut lock(slice)).begin();

    match work.await {
        Ok(value) => {
            let mut state = lock(slice);
            on_fulfilled(&mut state, &value);
            select(&mut state).fulfill();
            drop(state);
            Ok(value)
        }
        Err(err) => {
            let reason = err.reason();
            tracing::debug!(reason = %reason, "operation rejected");
            select(&mut lock(slice)).reject(reason);
            Err(err)
        }
    }
}

/// Run the fail-fast session check for credentialed operations.
pub(crate) fn require_token(token: Option<String>) -> Result<String> {
    token.ok_or(AppError::NotAuthenticated)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Slice {
        op: OpState,
        value: Option<u32>,
    }

    #[tokio::test]
    async fn test_drive_fulfilled() {
        let slice = Mutex::new(Slice::default());
        let result = drive(
            &slice,
            |s| &mut s.op,
            async { Ok(7u32) },
            |s, v| s.value = Some(*v),
        )
        .await;

        assert_eq!(result.unwrap(), 7);
        let s = lock(&slice);
        assert_eq!(s.op.phase(), Phase::Fulfilled);
        assert_eq!(s.value, Some(7));
        assert!(s.op.error().is_none());
    }

    #[tokio::test]
    async fn test_drive_rejected_records_reason_and_skips_handler() {
        let slice = Mutex::new(Slice::default());
        let result: Result<u32> = drive(
            &slice,
            |s| &mut s.op,
            async { Err(AppError::Api("boom".to_string())) },
            |s, v| s.value = Some(*v),
        )
        .await;

        assert!(result.is_err());
        let s = lock(&slice);
        assert_eq!(s.op.phase(), Phase::Rejected);
        assert_eq!(s.op.error(), Some("boom"));
        assert_eq!(s.value, None);
    }

    #[tokio::test]
    async fn test_begin_clears_previous_error() {
        let slice = Mutex::new(Slice::default());
        let _: Result<u32> = drive(
            &slice,
            |s| &mut s.op,
            async { Err(AppError::Api("first failure".to_string())) },
            |_, _| {},
        )
        .await;
        assert!(lock(&slice).op.error().is_some());

        // A retry's pending phase must not show the stale error.
        let pending_observed = drive(
            &slice,
            |s| &mut s.op,
            async {
                let s = lock(&slice);
                Ok((s.op.is_loading(), s.op.error().is_none()))
            },
            |_, _| {},
        )
        .await
        .unwrap();
        assert_eq!(pending_observed, (true, true));
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut op = OpState::default();
        op.begin();
        op.reject("nope");
        op.reset();
        assert_eq!(op.phase(), Phase::Idle);
        assert!(op.error().is_none());
        assert!(!op.succeeded());
    }

    #[test]
    fn test_require_token() {
        assert!(require_token(Some("t".to_string())).is_ok());
        assert!(matches!(
            require_token(None),
            Err(AppError::NotAuthenticated)
        ));
    }
}
