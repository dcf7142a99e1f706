//! Feature slices for the web UI.

pub mod approvals;
