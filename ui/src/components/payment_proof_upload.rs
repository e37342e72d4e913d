//! PIX payment proof picker and upload
//!
//! Files are checked locally before anything is sent: only images up to the
//! configured size are accepted. The upload itself is a multipart request
//! to the order's payment-proof endpoint.

use crate::format;
use campus_api::ports::ProofFile;
use campus_api::{ApiResult, OrderApi};
use campus_ui_core::{Effect, Reducer, SmallVec, smallvec};
use std::sync::Arc;
use thiserror::Error;

/// Why a picked file is refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofFileError {
    /// Not an image
    #[error("Envie uma imagem (PNG, JPG ou similar)")]
    NotAnImage,

    /// Nothing in the file
    #[error("O arquivo está vazio")]
    Empty,

    /// Larger than allowed
    #[error("O arquivo excede o limite de {}", format::file_size(*.max_bytes))]
    TooLarge {
        /// Limit in bytes
        max_bytes: usize,
    },
}

/// Check a picked file against the upload rules
///
/// # Errors
///
/// Returns [`ProofFileError`] for non-images, empty files and files above
/// `max_bytes`.
pub fn check_file(file: &ProofFile, max_bytes: usize) -> Result<(), ProofFileError> {
    if !file.is_image() {
        return Err(ProofFileError::NotAnImage);
    }
    if file.is_empty() {
        return Err(ProofFileError::Empty);
    }
    if file.len() > max_bytes {
        return Err(ProofFileError::TooLarge { max_bytes });
    }
    Ok(())
}

/// Upload state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofUploadState {
    /// Order being paid
    pub order_id: String,
    /// Accepted file awaiting upload
    pub selected: Option<ProofFile>,
    /// Upload in flight
    pub uploading: bool,
    /// Last local or remote failure
    pub error: Option<String>,
    /// Stored proof after a successful upload
    pub uploaded_url: Option<String>,
}

impl ProofUploadState {
    /// Upload form for `order_id`
    #[must_use]
    pub fn new(order_id: &str) -> Self {
        Self {
            order_id: order_id.to_string(),
            selected: None,
            uploading: false,
            error: None,
            uploaded_url: None,
        }
    }
}

/// Upload actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProofUploadAction {
    /// A file was picked
    FileSelected(ProofFile),
    /// Selection removed
    ClearSelection,
    /// Send button pressed
    UploadPressed,
    /// Upload answered with the stored URL
    UploadFinished(ApiResult<String>),
}

/// Upload dependencies
#[derive(Clone)]
pub struct ProofUploadEnvironment {
    /// Order endpoints
    pub orders: Arc<dyn OrderApi>,
    /// Largest accepted file
    pub max_bytes: usize,
}

/// Upload reducer
#[derive(Clone, Copy, Debug, Default)]
pub struct ProofUploadReducer;

impl Reducer for ProofUploadReducer {
    type State = ProofUploadState;
    type Action = ProofUploadAction;
    type Environment = ProofUploadEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ProofUploadAction::FileSelected(file) => {
                if state.uploading {
                    return SmallVec::new();
                }
                match check_file(&file, env.max_bytes) {
                    Ok(()) => {
                        state.selected = Some(file);
                        state.error = None;
                    },
                    Err(error) => {
                        tracing::debug!(file_name = %file.file_name, %error, "Proof file refused");
                        state.selected = None;
                        state.error = Some(error.to_string());
                    },
                }
                SmallVec::new()
            },

            ProofUploadAction::ClearSelection => {
                if !state.uploading {
                    state.selected = None;
                    state.error = None;
                }
                SmallVec::new()
            },

            ProofUploadAction::UploadPressed => {
                if state.uploading {
                    return SmallVec::new();
                }
                let Some(file) = state.selected.clone() else {
                    return SmallVec::new();
                };
                state.uploading = true;
                state.error = None;
                tracing::info!(order_id = %state.order_id, size = file.len(), "Uploading payment proof");

                let upload = env.orders.upload_proof(&state.order_id, file);
                smallvec![Effect::future(async move {
                    Some(ProofUploadAction::UploadFinished(upload.await))
                })]
            },

            ProofUploadAction::UploadFinished(Ok(url)) => {
                state.uploading = false;
                state.selected = None;
                state.uploaded_url = Some(url);
                SmallVec::new()
            },

            ProofUploadAction::UploadFinished(Err(error)) => {
                state.uploading = false;
                tracing::warn!(order_id = %state.order_id, %error, "Payment proof upload failed");
                state.error = Some(error.user_message());
                SmallVec::new()
            },
        }
    }
}

/// Render-ready upload form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofUploadView {
    /// Picked file name
    pub file_name: Option<String>,
    /// Picked file size
    pub file_size: Option<String>,
    /// Send button enabled
    pub can_upload: bool,
    /// Spinner shown
    pub uploading: bool,
    /// Error under the picker
    pub error: Option<String>,
    /// Upload finished
    pub uploaded: bool,
    /// Picker hint
    pub hint: String,
}

/// Render the form
#[must_use]
pub fn view(state: &ProofUploadState, max_bytes: usize) -> ProofUploadView {
    ProofUploadView {
        file_name: state.selected.as_ref().map(|file| file.file_name.clone()),
        file_size: state.selected.as_ref().map(|file| format::file_size(file.len())),
        can_upload: state.selected.is_some() && !state.uploading,
        uploading: state.uploading,
        error: state.error.clone(),
        uploaded: state.uploaded_url.is_some(),
        hint: format!("Imagens até {}", format::file_size(max_bytes)),
    }
}
