//! Check-in codes and the validator contract shared by both input surfaces
//!
//! The camera scanner and the manual input only know [`CodeValidator`];
//! [`CheckInValidator`] is the implementation that talks to the ticket API.

use campus_api::ApiError;
use campus_api::ports::TicketApi;
use campus_api::types::{CheckInResponse, TicketStatus};
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};
use thiserror::Error;

#[allow(clippy::expect_used)] // Constant pattern
static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-?[0-9a-f]{4}-?[0-9a-f]{4}-?[0-9a-f]{4}-?[0-9a-f]{12}$")
        .expect("validation code pattern is valid")
});

/// Why a typed code is not accepted
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeFormatError {
    /// Nothing typed
    #[error("Informe o código do ingresso")]
    Empty,

    /// Not an 8-4-4-4-12 hex code
    #[error("Código inválido: use o formato xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx")]
    Malformed,
}

/// Trim, lowercase and drop every whitespace character
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A well-formed, normalised validation code
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValidationCode(String);

impl ValidationCode {
    /// Normalise `input` and check its shape
    ///
    /// # Errors
    ///
    /// Returns [`CodeFormatError`] when the input is blank or not UUID-shaped.
    pub fn parse(input: &str) -> Result<Self, CodeFormatError> {
        let normalized = normalize(input);
        if normalized.is_empty() {
            return Err(CodeFormatError::Empty);
        }
        if CODE_PATTERN.is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(CodeFormatError::Malformed)
        }
    }

    /// The code as typed, normalised
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The code in 8-4-4-4-12 form, as tickets carry it
    #[must_use]
    pub fn hyphenated(&self) -> String {
        let hex: String = self.0.chars().filter(|c| *c != '-').collect();
        let mut out = String::with_capacity(36);
        for (i, c) in hex.chars().enumerate() {
            if matches!(i, 8 | 12 | 16 | 20) {
                out.push('-');
            }
            out.push(c);
        }
        out
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a successful check-in reports back to the operator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckInSummary {
    /// Ticket checked in
    pub ticket_id: String,
    /// Holder, when known
    pub participant_name: Option<String>,
    /// Event, when known
    pub event_title: Option<String>,
    /// Check-in time
    pub validated_at: DateTime<Utc>,
    /// Message to show
    pub message: String,
}

impl From<CheckInResponse> for CheckInSummary {
    fn from(response: CheckInResponse) -> Self {
        Self {
            message: response
                .message
                .unwrap_or_else(|| "Check-in realizado com sucesso".to_string()),
            ticket_id: response.ticket.ticket_id,
            participant_name: response.ticket.participant_name,
            event_title: response.ticket.event_title,
            validated_at: response.validation.validated_at,
        }
    }
}

/// Why a check-in failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckInError {
    /// The submitted text is not a validation code
    #[error("{0}")]
    Format(#[from] CodeFormatError),

    /// Ticket was already checked in
    #[error("Ingresso já utilizado{}", used_suffix(.used_at))]
    AlreadyUsed {
        /// Previous check-in time
        used_at: Option<DateTime<Utc>>,
    },

    /// Ticket was voided
    #[error("Ingresso cancelado")]
    TicketCancelled,

    /// No ticket carries this code
    #[error("Ingresso não encontrado")]
    UnknownCode,

    /// API failure
    #[error("{}", .0.user_message())]
    Api(ApiError),
}

#[allow(clippy::ref_option)] // Called with a borrowed field
fn used_suffix(used_at: &Option<DateTime<Utc>>) -> String {
    used_at
        .map(|at| format!(" em {}", at.format("%d/%m/%Y %H:%M UTC")))
        .unwrap_or_default()
}

impl From<ApiError> for CheckInError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::NotFound(_) => Self::UnknownCode,
            other => Self::Api(other),
        }
    }
}

/// Result of submitting a code
pub type CheckInResult = Result<CheckInSummary, CheckInError>;

/// Outcome banner shown after a submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// Check-in succeeded
    Success(String),
    /// Check-in failed
    Failure(String),
}

impl From<&CheckInResult> for Feedback {
    fn from(outcome: &CheckInResult) -> Self {
        match outcome {
            Ok(summary) => Self::Success(match &summary.participant_name {
                Some(name) => format!("{}: {name}", summary.message),
                None => summary.message.clone(),
            }),
            Err(error) => Self::Failure(error.to_string()),
        }
    }
}

/// The asynchronous validator both input surfaces submit codes to
pub trait CodeValidator: Send + Sync {
    /// Validate and consume `code`
    fn validate(&self, code: String) -> BoxFuture<'static, CheckInResult>;
}

/// Validator backed by the ticket API
///
/// Looks the ticket up first so used or voided tickets are refused with a
/// descriptive message, then performs the check-in.
#[derive(Clone)]
pub struct CheckInValidator {
    tickets: Arc<dyn TicketApi>,
}

impl CheckInValidator {
    /// Create a validator over `tickets`
    #[must_use]
    pub fn new(tickets: Arc<dyn TicketApi>) -> Self {
        Self { tickets }
    }
}

impl CodeValidator for CheckInValidator {
    fn validate(&self, code: String) -> BoxFuture<'static, CheckInResult> {
        let tickets = Arc::clone(&self.tickets);

        Box::pin(async move {
            let code = ValidationCode::parse(&code)?.hyphenated();

            let ticket = tickets.ticket_by_validation_code(&code).await?;
            match ticket.ticket_status {
                TicketStatus::Valid => {},
                TicketStatus::Used => {
                    tracing::info!(ticket_id = %ticket.ticket_id, "Ticket already used");
                    return Err(CheckInError::AlreadyUsed {
                        used_at: ticket.used_at,
                    });
                },
                TicketStatus::Cancelled => {
                    tracing::info!(ticket_id = %ticket.ticket_id, "Ticket cancelled");
                    return Err(CheckInError::TicketCancelled);
                },
            }

            let response = tickets.check_in(&code).await?;
            tracing::info!(ticket_id = %response.ticket.ticket_id, "Check-in completed");
            Ok(CheckInSummary::from(response))
        })
    }
}
