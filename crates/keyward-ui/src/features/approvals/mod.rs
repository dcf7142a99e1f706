//! Secret approval policy feature wiring.
//!
//! # Design
//! - Keep the approver edit session DOM-free so it can be tested natively.
//! - Restrict API calls to this feature layer to honor UI boundaries.
//! - Rows read permissions and records from the shared store on every render.

pub mod actions;
#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub mod logic;
pub mod session;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
