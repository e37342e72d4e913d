//! Generic yes/no confirmation dialog
//!
//! Parents embed it with [`campus_ui_core::composition::scope`] and react to
//! [`ConfirmationAction::Confirm`] themselves; the dialog only tracks whether
//! it is open and what it says.

use crate::status::{Palette, Tone};
use campus_ui_core::{Effect, Reducer, SmallVec};

/// Visual weight of the dialog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfirmationVariant {
    /// Destructive action
    Danger,
    /// Needs attention
    Warning,
    /// Neutral question
    #[default]
    Info,
}

impl ConfirmationVariant {
    /// Classes for the confirm button and header
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Danger => Tone::Danger.palette(),
            Self::Warning => Tone::Warning.palette(),
            Self::Info => Tone::Info.palette(),
        }
    }
}

/// Text and styling of one confirmation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationRequest {
    /// Dialog title
    pub title: String,
    /// Question asked
    pub message: String,
    /// Confirm button text
    pub confirm_label: String,
    /// Dismiss button text
    pub cancel_label: String,
    /// Styling
    pub variant: ConfirmationVariant,
}

impl ConfirmationRequest {
    /// A request with the default "Confirmar"/"Cancelar" buttons
    #[must_use]
    pub fn new(title: &str, message: &str, variant: ConfirmationVariant) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            confirm_label: "Confirmar".to_string(),
            cancel_label: "Cancelar".to_string(),
            variant,
        }
    }

    /// Override the confirm button text
    #[must_use]
    pub fn confirm_label(mut self, label: &str) -> Self {
        self.confirm_label = label.to_string();
        self
    }
}

/// Dialog state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfirmationState {
    /// Content while open
    pub request: Option<ConfirmationRequest>,
    /// Disables both buttons while the parent runs the confirmed action
    pub busy: bool,
}

impl ConfirmationState {
    /// Whether the dialog is shown
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.request.is_some()
    }
}

/// Dialog actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmationAction {
    /// Show the dialog
    Open(ConfirmationRequest),
    /// User pressed confirm
    Confirm,
    /// User pressed cancel, the backdrop or Escape
    Dismiss,
}

/// Confirmation dialog reducer
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfirmationReducer;

impl Reducer for ConfirmationReducer {
    type State = ConfirmationState;
    type Action = ConfirmationAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ConfirmationAction::Open(request) => {
                state.request = Some(request);
                state.busy = false;
            },
            ConfirmationAction::Confirm | ConfirmationAction::Dismiss => {
                if !state.busy {
                    state.request = None;
                }
            },
        }
        SmallVec::new()
    }
}
