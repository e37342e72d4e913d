//! Headless components
//!
//! Each component is a reducer over its own state and actions plus a pure
//! `view` function producing a render-ready struct. Components that talk to
//! the API receive the ports they need through their environment; the ones
//! with richer lifecycles (`qr_scanner`, `sidebar`) are split into
//! actions/environment/reducer/types modules.

pub mod achievements;
pub mod checkout;
pub mod confirmation_modal;
pub mod event_card;
pub mod events_layout;
pub mod landing;
pub mod manual_validation_input;
pub mod order_card;
pub mod payment_proof_upload;
pub mod qr_scanner;
pub mod sidebar;
pub mod ticket_card;
pub mod validation_modal;
