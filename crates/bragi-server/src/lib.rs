//! HTTP front for scenario persistence.
//!
//! Exposes the two endpoints the authoring client needs, backed by any
//! [`bragi_core::scenario::ScenarioRepository`].

pub mod handlers;
pub mod logging;
pub mod router;
pub mod state;

pub use router::{build_router, serve};
pub use state::AppState;
