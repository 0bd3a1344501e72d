//! Capability-based authorization for the API surface.
//!
//! Callers present a set of capabilities; each route states the capability
//! it requires. The check is a pure function of the two, with no dependency
//! on any web framework's permission registry.

use std::collections::HashSet;

/// Capabilities a caller can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// View structures and statuses of every owner.
    ViewAllOwners,
    /// View the detailed per-owner service status.
    ViewServiceStatus,
    /// Add and remove owners and credentials.
    ManageOwners,
    /// Manage webhooks and alert configs.
    ManageWebhooks,
}

impl Capability {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "view-all-owners" => Some(Self::ViewAllOwners),
            "view-service-status" => Some(Self::ViewServiceStatus),
            "manage-owners" => Some(Self::ManageOwners),
            "manage-webhooks" => Some(Self::ManageWebhooks),
            _ => None,
        }
    }
}

/// The capability set of one caller.
#[derive(Debug, Clone, Default)]
pub struct UserCapabilities(HashSet<Capability>);

impl UserCapabilities {
    pub fn new(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self(capabilities.into_iter().collect())
    }

    /// Parse a comma-separated capability header. Unknown tokens are
    /// ignored, granting nothing.
    pub fn from_header(header: &str) -> Self {
        Self(
            header
                .split(',')
                .filter_map(|token| Capability::from_token(token.trim()))
                .collect(),
        )
    }

    pub fn is_allowed(&self, required: Capability) -> bool {
        self.0.contains(&required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_capabilities_deny_everything() {
        let caps = UserCapabilities::default();
        assert!(!caps.is_allowed(Capability::ViewServiceStatus));
        assert!(!caps.is_allowed(Capability::ManageOwners));
    }

    #[test]
    fn test_granted_capability_allows_only_itself() {
        let caps = UserCapabilities::new([Capability::ViewServiceStatus]);
        assert!(caps.is_allowed(Capability::ViewServiceStatus));
        assert!(!caps.is_allowed(Capability::ManageWebhooks));
    }

    #[test]
    fn test_header_parsing_ignores_unknown_tokens() {
        let caps = UserCapabilities::from_header("view-service-status, admin, view-all-owners");
        assert!(caps.is_allowed(Capability::ViewServiceStatus));
        assert!(caps.is_allowed(Capability::ViewAllOwners));
        assert!(!caps.is_allowed(Capability::ManageOwners));
    }
}
