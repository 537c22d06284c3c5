//! Wizard Web UI Module
//!
//! Serves the walkthrough wizard: one scenario at a time with a result form,
//! a transitional page after each submission, and the generated result files
//! for download. Shuts the server down once every scenario is processed.

pub mod api;
pub mod server;
pub mod shutdown;

pub use server::{WizardConfig, WizardServer};
pub use shutdown::ShutdownGate;
