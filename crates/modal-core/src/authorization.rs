//! Authorization-gated operations
//!
//! [`require`] sequences an authorization status query in front of an
//! operation: the operation is only started when the resolved status is one of
//! the accepted values.

use crate::errors::{ModalError, ModalResult};
use async_trait::async_trait;
use std::fmt::Debug;
use std::future::Future;

/// Status value from a closed authorization set
pub trait AuthorizationStatus: Debug + PartialEq + Send + Sync + 'static {
    /// Whether the user has not been asked yet
    fn is_not_determined(&self) -> bool;
}

/// Platform query for an authorization status
#[async_trait]
pub trait AuthorizationSource: Send + Sync {
    /// Status type reported by this source
    type Status: AuthorizationStatus;

    /// Status as currently recorded, without prompting the user
    fn current_status(&self) -> Self::Status;

    /// Prompt the user and report the resulting status
    async fn request_authorization(&self) -> Self::Status;
}

/// Current status of `source`, prompting the user only when undetermined
pub async fn resolve_authorization<A>(source: &A) -> A::Status
where
    A: AuthorizationSource + ?Sized,
{
    let status = source.current_status();
    if !status.is_not_determined() {
        return status;
    }
    tracing::debug!(?status, "Requesting authorization");
    source.request_authorization().await
}

/// Run `operation` only when `status` resolves to one of `accepted`.
///
/// A rejected status fails with [`ModalError::AuthorizationDenied`] carrying
/// the status type; `operation` is never invoked in that case.
pub async fn require<St, F, Op, Fut, T>(status: F, accepted: &[St], operation: Op) -> ModalResult<T>
where
    St: Debug + PartialEq + 'static,
    F: Future<Output = ModalResult<St>>,
    Op: FnOnce() -> Fut,
    Fut: Future<Output = ModalResult<T>>,
{
    let status = status.await?;
    if !accepted.contains(&status) {
        tracing::debug!(?status, "Authorization status rejected");
        return Err(ModalError::authorization_denied(&status));
    }
    operation().await
}

/// [`require`] with the status resolved from an [`AuthorizationSource`]
pub async fn require_authorized<A, Op, Fut, T>(
    source: &A,
    accepted: &[A::Status],
    operation: Op,
) -> ModalResult<T>
where
    A: AuthorizationSource + ?Sized,
    Op: FnOnce() -> Fut,
    Fut: Future<Output = ModalResult<T>>,
{
    require(
        async { Ok(resolve_authorization(source).await) },
        accepted,
        operation,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Status {
        NotDetermined,
        Denied,
        Restricted,
        Authorized,
    }

    impl AuthorizationStatus for Status {
        fn is_not_determined(&self) -> bool {
            matches!(self, Self::NotDetermined)
        }
    }

    struct Source {
        current: Status,
        granted: Status,
        requests: AtomicUsize,
    }

    #[async_trait]
    impl AuthorizationSource for Source {
        type Status = Status;

        fn current_status(&self) -> Status {
            self.current
        }

        async fn request_authorization(&self) -> Status {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.granted
        }
    }

    #[tokio::test]
    async fn test_denied_status_never_starts_operation() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result: ModalResult<u8> = require(
            async { Ok(Status::Denied) },
            &[Status::Authorized, Status::Restricted],
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(1)
            },
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.is_authorization_denied_for::<Status>());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_accepted_status_runs_operation() {
        let value = require(
            async { Ok(Status::Restricted) },
            &[Status::Authorized, Status::Restricted],
            || async { Ok("picked") },
        )
        .await
        .unwrap();
        assert_eq!(value, "picked");
    }

    #[tokio::test]
    async fn test_status_failure_is_forwarded() {
        let result: ModalResult<()> = require(
            async { Err::<Status, _>(ModalError::unsupported("media library")) },
            &[Status::Authorized],
            || async { Ok(()) },
        )
        .await;
        assert!(matches!(result, Err(ModalError::Unsupported { .. })));
    }

    #[tokio::test]
    async fn test_undetermined_status_requests_once() {
        let source = Source {
            current: Status::NotDetermined,
            granted: Status::Authorized,
            requests: AtomicUsize::new(0),
        };
        assert_eq!(resolve_authorization(&source).await, Status::Authorized);
        assert_eq!(source.requests.load(Ordering::SeqCst), 1);

        let settled = Source {
            current: Status::Denied,
            granted: Status::Authorized,
            requests: AtomicUsize::new(0),
        };
        let result = require_authorized(&settled, &[Status::Authorized], || async { Ok(()) }).await;
        assert!(result.is_err());
        assert_eq!(settled.requests.load(Ordering::SeqCst), 0);
    }
}
