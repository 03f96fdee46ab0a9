//! Permission gate: the single authorization decision point.
//!
//! All policy is data held in [`PermissionGateConfig`]: which actions imply
//! which other actions within a module, and which permissions each role gets
//! by default. Nothing here is hardcoded per domain module.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use anvil_core::DomainError;

use crate::{Actor, Permission, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

impl From<AuthzError> for DomainError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::Forbidden(permission) => DomainError::PermissionDenied(permission),
        }
    }
}

/// Declarative authorization policy.
#[derive(Debug, Clone)]
pub struct PermissionGateConfig {
    /// `action -> actions it also grants` within the same module.
    /// E.g. holding `grn:manage` grants `grn:view` when "manage" maps to
    /// ["view"].
    action_implications: HashMap<String, Vec<String>>,
    /// Default permission set per role, applied when an actor carries no
    /// explicit grants.
    role_templates: HashMap<Role, Vec<Permission>>,
}

impl PermissionGateConfig {
    pub fn new() -> Self {
        Self {
            action_implications: HashMap::new(),
            role_templates: HashMap::new(),
        }
    }

    /// Standard policy: write-side actions imply read access in the same
    /// module, and the administrative role holds the wildcard.
    pub fn standard() -> Self {
        let mut config = Self::new();
        for action in ["manage", "approve", "void", "export"] {
            config = config.implies(action, "view");
        }
        config
            .role_template("admin", vec![Permission::new("*")])
            .role_template(
                "manager",
                vec![
                    Permission::scoped("products", "manage"),
                    Permission::scoped("suppliers", "manage"),
                    Permission::scoped("customers", "manage"),
                    Permission::scoped("inventory", "manage"),
                    Permission::scoped("purchase_orders", "manage"),
                    Permission::scoped("purchase_orders", "approve"),
                    Permission::scoped("grn", "manage"),
                    Permission::scoped("purchase_invoices", "manage"),
                    Permission::scoped("sales_quotations", "manage"),
                    Permission::scoped("sales_orders", "manage"),
                    Permission::scoped("sales_orders", "approve"),
                    Permission::scoped("sales_invoices", "manage"),
                    Permission::scoped("sales_invoices", "void"),
                    Permission::scoped("payments", "manage"),
                ],
            )
            .role_template(
                "accountant",
                vec![
                    Permission::scoped("purchase_invoices", "manage"),
                    Permission::scoped("sales_invoices", "manage"),
                    Permission::scoped("payments", "manage"),
                    Permission::scoped("inventory", "view"),
                ],
            )
            .role_template(
                "salesperson",
                vec![
                    Permission::scoped("sales_quotations", "manage"),
                    Permission::scoped("sales_orders", "manage"),
                    Permission::scoped("customers", "view"),
                    Permission::scoped("products", "view"),
                    Permission::scoped("inventory", "view"),
                ],
            )
            .role_template(
                "warehouse",
                vec![
                    Permission::scoped("grn", "manage"),
                    Permission::scoped("inventory", "manage"),
                    Permission::scoped("purchase_orders", "view"),
                    Permission::scoped("sales_orders", "view"),
                ],
            )
    }

    /// Declare that holding `<module>:<action>` also grants
    /// `<module>:<implied>`.
    pub fn implies(mut self, action: &str, implied: &str) -> Self {
        self.action_implications
            .entry(action.to_string())
            .or_default()
            .push(implied.to_string());
        self
    }

    /// Set the default permissions for a role.
    pub fn role_template(
        mut self,
        role: impl Into<std::borrow::Cow<'static, str>>,
        permissions: Vec<Permission>,
    ) -> Self {
        self.role_templates.insert(Role::new(role), permissions);
        self
    }

    fn template_for(&self, role: &Role) -> &[Permission] {
        self.role_templates.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    fn action_grants(&self, held: &str, required: &str) -> bool {
        held == required
            || self
                .action_implications
                .get(held)
                .is_some_and(|implied| implied.iter().any(|a| a == required))
    }
}

impl Default for PermissionGateConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Evaluates [`Actor`] grants against a required permission.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    config: PermissionGateConfig,
}

impl PermissionGate {
    pub fn new(config: PermissionGateConfig) -> Self {
        Self { config }
    }

    pub fn standard() -> Self {
        Self::new(PermissionGateConfig::standard())
    }

    /// Check whether `actor` holds `required`.
    ///
    /// Resolution order: explicit grants on the actor when present,
    /// otherwise the role template; then wildcard, exact match, and finally
    /// action implications within the same module.
    pub fn authorize(&self, actor: &Actor, required: &Permission) -> Result<(), AuthzError> {
        let effective: &[Permission] = if actor.permissions.is_empty() {
            self.config.template_for(&actor.role)
        } else {
            &actor.permissions
        };

        let granted = effective.iter().any(|held| {
            if held.is_wildcard() || held == required {
                return true;
            }
            match (held.module(), held.action(), required.module(), required.action()) {
                (Some(hm), Some(ha), Some(rm), Some(ra)) => {
                    hm == rm && self.config.action_grants(ha, ra)
                }
                _ => false,
            }
        });

        if granted {
            Ok(())
        } else {
            debug!(
                actor = %actor.id,
                role = %actor.role,
                required = %required,
                "permission denied"
            );
            Err(AuthzError::Forbidden(required.as_str().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_core::UserId;

    fn actor(role: &'static str, perms: &[&'static str]) -> Actor {
        Actor::new(UserId::new(), Role::new(role))
            .with_permissions(perms.iter().map(|p| Permission::new(*p)).collect())
    }

    #[test]
    fn wildcard_grants_everything() {
        let gate = PermissionGate::standard();
        let admin = actor("admin", &["*"]);
        assert!(gate.authorize(&admin, &Permission::scoped("grn", "manage")).is_ok());
        assert!(gate.authorize(&admin, &Permission::scoped("sales_invoices", "void")).is_ok());
    }

    #[test]
    fn exact_grant_matches() {
        let gate = PermissionGate::standard();
        let clerk = actor("user", &["grn:manage"]);
        assert!(gate.authorize(&clerk, &Permission::scoped("grn", "manage")).is_ok());
        assert!(gate.authorize(&clerk, &Permission::scoped("payments", "manage")).is_err());
    }

    #[test]
    fn manage_implies_view_in_same_module_only() {
        let gate = PermissionGate::standard();
        let clerk = actor("user", &["grn:manage"]);
        assert!(gate.authorize(&clerk, &Permission::scoped("grn", "view")).is_ok());
        assert!(gate.authorize(&clerk, &Permission::scoped("inventory", "view")).is_err());
    }

    #[test]
    fn view_does_not_imply_manage() {
        let gate = PermissionGate::standard();
        let viewer = actor("user", &["inventory:view"]);
        assert!(gate.authorize(&viewer, &Permission::scoped("inventory", "manage")).is_err());
    }

    #[test]
    fn empty_grants_fall_back_to_role_template() {
        let gate = PermissionGate::standard();
        let warehouse = Actor::new(UserId::new(), Role::new("warehouse"));
        assert!(gate.authorize(&warehouse, &Permission::scoped("grn", "manage")).is_ok());
        assert!(gate.authorize(&warehouse, &Permission::scoped("payments", "manage")).is_err());
    }

    #[test]
    fn explicit_grants_override_role_template() {
        let gate = PermissionGate::standard();
        // Admin role but narrowed to a single explicit grant.
        let narrowed = actor("admin", &["inventory:view"]);
        assert!(gate.authorize(&narrowed, &Permission::scoped("inventory", "view")).is_ok());
        assert!(gate.authorize(&narrowed, &Permission::scoped("grn", "manage")).is_err());
    }

    #[test]
    fn unknown_role_without_grants_is_denied() {
        let gate = PermissionGate::standard();
        let stranger = Actor::new(UserId::new(), Role::new("intern"));
        let err = gate
            .authorize(&stranger, &Permission::scoped("products", "view"))
            .unwrap_err();
        assert_eq!(err, AuthzError::Forbidden("products:view".to_string()));
    }
}
