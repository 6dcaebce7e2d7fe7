//! A single interactive calculation
//!
//! The session owns the relative collection and the estate value. A submission is
//! split into `begin_submission`, the network call, and `complete_submission`, so
//! callers that share the session never hold it across the call. While a ticket is
//! outstanding the collection cannot be mutated and no second submission starts.
//! `reset` bumps the generation; a response carrying a ticket from an older
//! generation is discarded.

use tracing::{debug, info, warn};
use veraset_domain::{
    CalculationPort, CalculationRequest, CalculationResponse, DegreeEligibility, DomainError,
    DomainResult, EstateValue, RelativeCollection, ResultRow, TreeBuilder,
};

use crate::error::{SessionError, SessionResult};

/// Identifies one submission within one generation of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: u64,
    sequence: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A started submission: the request to send and the ticket to complete it with
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: Ticket,
    pub request: CalculationRequest,
}

/// What happened to a completed submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    /// The result was stored on the session
    Applied,
    /// The session was reset meanwhile and the result dropped
    Discarded,
}

/// Result of the last applied submission
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationOutcome {
    Completed(CalculationResponse),
    Failed(DomainError),
}

/// One interactive calculation
#[derive(Debug)]
pub struct CalculationSession {
    id: String,
    builder: TreeBuilder,
    estate_value: Option<EstateValue>,
    relatives: RelativeCollection,
    generation: u64,
    sequence: u64,
    in_flight: Option<Ticket>,
    outcome: Option<CalculationOutcome>,
}

impl Default for CalculationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculationSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::with_builder(TreeBuilder::default())
    }

    /// Create an empty session building trees with `builder`
    pub fn with_builder(builder: TreeBuilder) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        debug!(session_id = %id, "Created calculation session");
        Self {
            id,
            builder,
            estate_value: None,
            relatives: RelativeCollection::new(),
            generation: 0,
            sequence: 0,
            in_flight: None,
            outcome: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn relatives(&self) -> &RelativeCollection {
        &self.relatives
    }

    /// Mutable access to the collection, refused while a submission is outstanding
    pub fn relatives_mut(&mut self) -> SessionResult<&mut RelativeCollection> {
        self.ensure_idle()?;
        Ok(&mut self.relatives)
    }

    /// Current degree eligibility of the collection
    pub fn eligibility(&self) -> DegreeEligibility {
        self.relatives.resolve()
    }

    pub fn estate_value(&self) -> Option<EstateValue> {
        self.estate_value
    }

    pub fn set_estate_value(&mut self, value: f64) -> SessionResult<EstateValue> {
        self.ensure_idle()?;
        let value = EstateValue::new(value)?;
        self.estate_value = Some(value);
        Ok(value)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn outcome(&self) -> Option<&CalculationOutcome> {
        self.outcome.as_ref()
    }

    /// Response of the last successful submission
    pub fn last_response(&self) -> Option<&CalculationResponse> {
        match &self.outcome {
            Some(CalculationOutcome::Completed(response)) => Some(response),
            _ => None,
        }
    }

    /// Error of the last failed submission
    pub fn last_error(&self) -> Option<&DomainError> {
        match &self.outcome {
            Some(CalculationOutcome::Failed(err)) => Some(err),
            _ => None,
        }
    }

    /// Displayable rows of the last successful submission
    pub fn rows(&self) -> Option<Vec<ResultRow>> {
        self.last_response().map(CalculationResponse::rows)
    }

    /// Validate, build the tree and hand out a ticket for the request
    pub fn begin_submission(&mut self) -> SessionResult<Submission> {
        self.ensure_idle()?;
        let estate_value = self.estate_value.ok_or(SessionError::MissingEstateValue)?;
        if !self.relatives.has_heirs() {
            return Err(DomainError::EmptyTree.into());
        }

        let tree = self.builder.build(&self.relatives)?;
        let request = CalculationRequest::new(estate_value, &tree);

        self.sequence += 1;
        let ticket = Ticket {
            generation: self.generation,
            sequence: self.sequence,
        };
        self.in_flight = Some(ticket);
        info!(
            session_id = %self.id,
            sequence = ticket.sequence,
            nodes = tree.node_count(),
            "Calculation submitted"
        );
        Ok(Submission { ticket, request })
    }

    /// Store the result of a submission unless the session moved on
    pub fn complete_submission(
        &mut self,
        ticket: Ticket,
        result: DomainResult<CalculationResponse>,
    ) -> CompletionStatus {
        if self.in_flight != Some(ticket) {
            warn!(
                session_id = %self.id,
                ticket_generation = ticket.generation,
                generation = self.generation,
                "Discarding stale calculation result"
            );
            return CompletionStatus::Discarded;
        }

        self.in_flight = None;
        self.outcome = Some(match result {
            Ok(response) => {
                info!(session_id = %self.id, sequence = ticket.sequence, "Calculation applied");
                CalculationOutcome::Completed(response)
            }
            Err(err) => {
                warn!(session_id = %self.id, error = %err, code = err.code(), "Calculation failed");
                CalculationOutcome::Failed(err)
            }
        });
        CompletionStatus::Applied
    }

    /// Give up on a submission whose result will never arrive
    ///
    /// Returns false when `ticket` is no longer the outstanding one.
    pub fn abandon(&mut self, ticket: Ticket) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        warn!(
            session_id = %self.id,
            sequence = ticket.sequence,
            "Calculation abandoned before a result arrived"
        );
        self.in_flight = None;
        true
    }

    /// Start over: empty collection, no estate value, no result
    ///
    /// An outstanding submission is abandoned and its result will be discarded.
    pub fn reset(&mut self) {
        if self.in_flight.is_some() {
            info!(session_id = %self.id, "Reset abandons an in-flight calculation");
        }
        self.generation += 1;
        self.in_flight = None;
        self.estate_value = None;
        self.relatives = RelativeCollection::new();
        self.outcome = None;
    }

    /// Begin, call the service, and complete in one step
    ///
    /// Dropping the returned future before it resolves abandons the submission.
    pub async fn submit(&mut self, port: &dyn CalculationPort) -> SessionResult<CalculationResponse> {
        let Submission { ticket, request } = self.begin_submission()?;
        let pending = PendingTicket {
            session: self,
            ticket,
            settled: false,
        };
        let result = port.calculate(&request).await;
        pending.complete(result.clone());
        result.map_err(SessionError::from)
    }

    fn ensure_idle(&self) -> SessionResult<()> {
        if self.in_flight.is_some() {
            return Err(SessionError::SubmissionInFlight);
        }
        Ok(())
    }
}

/// Outstanding ticket of [`CalculationSession::submit`], abandoned if dropped unsettled
struct PendingTicket<'a> {
    session: &'a mut CalculationSession,
    ticket: Ticket,
    settled: bool,
}

impl PendingTicket<'_> {
    fn complete(mut self, result: DomainResult<CalculationResponse>) -> CompletionStatus {
        self.settled = true;
        self.session.complete_submission(self.ticket, result)
    }
}

impl Drop for PendingTicket<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.session.abandon(self.ticket);
        }
    }
}
