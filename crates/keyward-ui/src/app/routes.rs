//! Routing definitions for the Keyward UI.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/workspaces/:workspace_id/secret-approvals")]
    Policies { workspace_id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}
