//! Environment for the check-in scanner reducer.

use crate::capabilities::Camera;
use crate::checkin::CodeValidator;
use campus_ui_core::environment::Clock;
use std::sync::Arc;
use std::time::Duration;

/// Dependencies of the scanner reducer.
pub trait ScannerEnvironment: Send + Sync {
    /// Camera decoding QR payloads.
    fn camera(&self) -> &dyn Camera;

    /// Validator shared with the manual input.
    fn validator(&self) -> &dyn CodeValidator;

    /// Clock used to measure the duplicate-scan cooldown.
    ///
    /// Production uses `SystemClock`, tests use `ManualClock`.
    fn clock(&self) -> &dyn Clock;

    /// Window in which an identical payload is ignored.
    fn cooldown(&self) -> Duration;
}

/// Production environment for the scanner.
#[derive(Clone)]
pub struct ProductionScannerEnvironment {
    camera: Arc<dyn Camera>,
    validator: Arc<dyn CodeValidator>,
    clock: Arc<dyn Clock>,
    cooldown: Duration,
}

impl ProductionScannerEnvironment {
    /// Create a new scanner environment.
    #[must_use]
    pub fn new(
        camera: Arc<dyn Camera>,
        validator: Arc<dyn CodeValidator>,
        clock: Arc<dyn Clock>,
        cooldown: Duration,
    ) -> Self {
        Self {
            camera,
            validator,
            clock,
            cooldown,
        }
    }
}

impl ScannerEnvironment for ProductionScannerEnvironment {
    fn camera(&self) -> &dyn Camera {
        self.camera.as_ref()
    }

    fn validator(&self) -> &dyn CodeValidator {
        self.validator.as_ref()
    }

    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn cooldown(&self) -> Duration {
        self.cooldown
    }
}
