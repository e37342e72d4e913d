//! Host-platform capabilities: camera decoding and clipboard
//!
//! The scanner and the manual input reach the device only through these
//! traits. In-memory fakes are provided for tests and headless hosts.

use futures::channel::mpsc;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Stream of decoded QR payloads for one camera session
pub type DecodeStream = BoxStream<'static, String>;

/// Why the camera could not be started
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// The user or the platform denied access
    #[error("Permissão para usar a câmera negada")]
    PermissionDenied,

    /// No camera on this device
    #[error("Nenhuma câmera encontrada")]
    NotFound,

    /// The camera is busy or failed
    #[error("Câmera indisponível: {0}")]
    Unavailable(String),
}

/// Camera-based QR decoding
pub trait Camera: Send + Sync {
    /// Acquire the camera and start decoding
    ///
    /// The stream yields every decoded payload and ends when the session is
    /// released.
    fn start(&self) -> BoxFuture<'static, Result<DecodeStream, CameraError>>;

    /// Release the camera; safe to call when no session is active
    fn stop(&self) -> BoxFuture<'static, ()>;
}

/// Why the clipboard could not be read
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The platform denied access
    #[error("Permissão para acessar a área de transferência negada")]
    PermissionDenied,

    /// No clipboard on this host
    #[error("Área de transferência indisponível")]
    Unavailable,
}

/// Clipboard text access
pub trait Clipboard: Send + Sync {
    /// Read the current clipboard text
    fn read_text(&self) -> BoxFuture<'static, Result<String, ClipboardError>>;
}

#[derive(Default)]
struct CameraState {
    failure: Option<CameraError>,
    session: Option<mpsc::UnboundedSender<String>>,
    starts: usize,
    stops: usize,
}

/// In-memory camera driven by the caller
///
/// Clones share one device. Use [`FakeCamera::decode`] to simulate a scan.
#[derive(Clone, Default)]
pub struct FakeCamera {
    state: Arc<Mutex<CameraState>>,
}

impl FakeCamera {
    /// A working camera
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A camera whose start always fails with `error`
    #[must_use]
    pub fn failing(error: CameraError) -> Self {
        let camera = Self::default();
        camera.lock().failure = Some(error);
        camera
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CameraState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver a decoded payload to the active session
    ///
    /// Returns `false` when no session is active.
    pub fn decode(&self, text: &str) -> bool {
        self.lock()
            .session
            .as_ref()
            .is_some_and(|session| session.unbounded_send(text.to_string()).is_ok())
    }

    /// Whether a session is active
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lock()
            .session
            .as_ref()
            .is_some_and(|session| !session.is_closed())
    }

    /// Number of `start` calls
    #[must_use]
    pub fn starts(&self) -> usize {
        self.lock().starts
    }

    /// Number of `stop` calls
    #[must_use]
    pub fn stops(&self) -> usize {
        self.lock().stops
    }
}

impl Camera for FakeCamera {
    fn start(&self) -> BoxFuture<'static, Result<DecodeStream, CameraError>> {
        let result = {
            let mut state = self.lock();
            state.starts += 1;
            match &state.failure {
                Some(error) => Err(error.clone()),
                None => {
                    let (tx, rx) = mpsc::unbounded();
                    state.session = Some(tx);
                    Ok(Box::pin(rx) as DecodeStream)
                },
            }
        };
        Box::pin(async move { result })
    }

    fn stop(&self) -> BoxFuture<'static, ()> {
        {
            let mut state = self.lock();
            state.stops += 1;
            state.session = None;
        }
        Box::pin(async {})
    }
}

/// In-memory clipboard
#[derive(Clone)]
pub struct FakeClipboard {
    content: Arc<Mutex<Result<String, ClipboardError>>>,
}

impl FakeClipboard {
    /// Clipboard holding `text`
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            content: Arc::new(Mutex::new(Ok(text.to_string()))),
        }
    }

    /// Clipboard that cannot be read
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            content: Arc::new(Mutex::new(Err(ClipboardError::Unavailable))),
        }
    }

    /// Replace the clipboard text
    pub fn set_text(&self, text: &str) {
        *self.content.lock().unwrap_or_else(PoisonError::into_inner) = Ok(text.to_string());
    }
}

impl Clipboard for FakeClipboard {
    fn read_text(&self) -> BoxFuture<'static, Result<String, ClipboardError>> {
        let content = self
            .content
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Box::pin(async move { content })
    }
}
