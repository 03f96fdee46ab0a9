use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque `module:action` strings (e.g. "grn:manage",
/// "sales_invoices:void"). A special wildcard `"*"` grants everything and is
/// reserved for administrative roles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Build a `module:action` permission.
    pub fn scoped(module: &str, action: &str) -> Self {
        Self(Cow::Owned(format!("{module}:{action}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }

    /// The module half of a `module:action` permission, if it has one.
    pub fn module(&self) -> Option<&str> {
        self.as_str().split_once(':').map(|(m, _)| m)
    }

    /// The action half of a `module:action` permission, if it has one.
    pub fn action(&self) -> Option<&str> {
        self.as_str().split_once(':').map(|(_, a)| a)
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_module_and_action() {
        let p = Permission::scoped("grn", "manage");
        assert_eq!(p.as_str(), "grn:manage");
        assert_eq!(p.module(), Some("grn"));
        assert_eq!(p.action(), Some("manage"));
    }

    #[test]
    fn wildcard_has_no_parts() {
        let p = Permission::new("*");
        assert!(p.is_wildcard());
        assert_eq!(p.module(), None);
    }
}
