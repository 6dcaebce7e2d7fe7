//! Session shared between tasks

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;
use veraset_domain::{CalculationPort, CalculationResponse};

use crate::error::{SessionError, SessionResult};
use crate::session::{CalculationSession, CompletionStatus, Submission, Ticket};

/// Result of a submission made through a [`SharedSession`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The response was stored on the session
    Applied(CalculationResponse),
    /// The session was reset while the request was outstanding
    Discarded,
}

/// Cloneable handle to a session guarded by an async mutex
///
/// The lock is released for the duration of the network call, so other tasks can
/// observe the submission in flight or reset the session meanwhile.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<CalculationSession>>,
}

impl SharedSession {
    pub fn new(session: CalculationSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Exclusive access to the session for mutations and reads
    pub async fn lock(&self) -> MutexGuard<'_, CalculationSession> {
        self.inner.lock().await
    }

    pub async fn reset(&self) {
        self.inner.lock().await.reset();
    }

    /// Submit the current collection without holding the lock across the call
    ///
    /// Dropping the returned future before it resolves abandons the submission.
    pub async fn submit(&self, port: &dyn CalculationPort) -> SessionResult<SubmitOutcome> {
        let Submission { ticket, request } = self.inner.lock().await.begin_submission()?;
        let mut pending = PendingTicket {
            inner: Arc::clone(&self.inner),
            ticket,
            settled: false,
        };

        let result = port.calculate(&request).await;

        let status = {
            let mut session = self.inner.lock().await;
            pending.settled = true;
            session.complete_submission(ticket, result.clone())
        };
        match status {
            CompletionStatus::Discarded => Ok(SubmitOutcome::Discarded),
            CompletionStatus::Applied => result
                .map(SubmitOutcome::Applied)
                .map_err(SessionError::from),
        }
    }
}

/// Ticket handed out by [`SharedSession::submit`], abandoned if dropped unsettled
struct PendingTicket {
    inner: Arc<Mutex<CalculationSession>>,
    ticket: Ticket,
    settled: bool,
}

impl Drop for PendingTicket {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let ticket = self.ticket;
        if let Ok(mut session) = self.inner.try_lock() {
            session.abandon(ticket);
            return;
        }
        // Lock is busy, release the ticket once it frees up
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let inner = Arc::clone(&self.inner);
                handle.spawn(async move {
                    inner.lock().await.abandon(ticket);
                });
            }
            Err(_) => {
                warn!("Submission dropped outside a runtime; session stays in flight until reset")
            }
        }
    }
}

impl Default for SharedSession {
    fn default() -> Self {
        Self::new(CalculationSession::new())
    }
}
