//! Shared DTOs for the approval policy API plus UI-only payloads.

pub use keyward_api_models::{
    EnvironmentRef, MATCH_ALL_SECRET_PATH, MemberUser, PermissionAction, PermissionRule,
    PermissionRuleList, PermissionSubject, ProblemDetails, SecretApprovalPolicy,
    SecretApprovalPolicyEnvelope, SecretApprovalPolicyList, UpdateSecretApprovalPolicyRequest,
    UserApprover, WorkspaceMember, WorkspaceMemberList,
};

/// Toast variants used across the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Informational toast.
    Info,
    /// Success toast.
    Success,
    /// Error toast.
    Error,
}

impl ToastKind {
    /// Milliseconds before the toast dismisses itself. Errors linger so details can be read.
    #[must_use]
    pub const fn ttl_ms(self) -> u32 {
        match self {
            Self::Info | Self::Success => 4_000,
            Self::Error => 8_000,
        }
    }

    /// CSS modifier for the toast body.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Notification raised by a page; the shell assigns the toast id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Severity classification.
    pub kind: ToastKind,
    /// Headline, e.g. `Failed to update approvers for prod-guard`.
    pub message: String,
    /// Secondary line, typically the server's problem detail.
    pub detail: Option<String>,
}

impl Notice {
    /// Informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
            detail: None,
        }
    }

    /// Success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
            detail: None,
        }
    }

    /// Error notice with an optional detail line.
    #[must_use]
    pub fn error(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
            detail: detail.filter(|text| !text.trim().is_empty()),
        }
    }
}

/// Queued toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    /// Content shown by the host.
    pub notice: Notice,
}
