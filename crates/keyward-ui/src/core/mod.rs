//! Core, DOM-free primitives and helpers for the Web UI.
pub mod gateway;
pub mod logic;
pub mod permissions;
pub mod store;
pub mod telemetry;
