//! Role-based access control.
//!
//! This is the single authoritative permission policy: the API route guards
//! consult it on every request, and `/api/auth/me` serializes it so the
//! admin UI renders from the same table the API enforces.
//!
//! Roles, modules and actions are closed enums and the matrix is an
//! exhaustive match, so a new role or module fails to compile until every
//! combination has been decided. Anything that does not parse (an unknown
//! role string in the database, a garbage module name) denies.

use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User role, stored in the `users.role` column as its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including user management
    Admin,
    /// Manages site content (news, testimonials)
    Editor,
    /// Front office: contact messages and document intake
    Secretaria,
    /// Lawyer: case documents, read-only content
    Abogado,
}

impl Role {
    /// All roles, for iteration and exhaustive tests.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Editor, Role::Secretaria, Role::Abogado];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Secretaria => "secretaria",
            Role::Abogado => "abogado",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "secretaria" => Ok(Role::Secretaria),
            "abogado" => Ok(Role::Abogado),
            _ => Err(()),
        }
    }
}

/// Admin-panel module a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Dashboard,
    News,
    Testimonials,
    Messages,
    Users,
    Documents,
}

impl Module {
    /// All modules, in the order the admin UI lists them.
    pub const ALL: [Module; 6] = [
        Module::Dashboard,
        Module::News,
        Module::Testimonials,
        Module::Messages,
        Module::Users,
        Module::Documents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::News => "news",
            Module::Testimonials => "testimonials",
            Module::Messages => "messages",
            Module::Users => "users",
            Module::Documents => "documents",
        }
    }
}

impl FromStr for Module {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Module::Dashboard),
            "news" => Ok(Module::News),
            "testimonials" => Ok(Module::Testimonials),
            "messages" => Ok(Module::Messages),
            "users" => Ok(Module::Users),
            "documents" => Ok(Module::Documents),
            _ => Err(()),
        }
    }
}

/// Action within a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "view" => Ok(Action::View),
            "create" => Ok(Action::Create),
            "edit" => Ok(Action::Edit),
            "delete" => Ok(Action::Delete),
            _ => Err(()),
        }
    }
}

/// Permission record for one (role, module) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePermissions {
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

impl ModulePermissions {
    pub const NONE: Self = Self::new(false, false, false, false);
    pub const VIEW: Self = Self::new(true, false, false, false);
    pub const FULL: Self = Self::new(true, true, true, true);

    const fn new(view: bool, create: bool, edit: bool, delete: bool) -> Self {
        Self {
            view,
            create,
            edit,
            delete,
        }
    }

    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Create => self.create,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
        }
    }
}

/// The permission table.
///
/// Dashboard is view-only by nature; create/edit/delete are false for every
/// role there.
pub fn module_permissions(role: Role, module: Module) -> ModulePermissions {
    use Module::*;
    use ModulePermissions as P;

    match (role, module) {
        (Role::Admin, Dashboard) => P::VIEW,
        (Role::Admin, _) => P::FULL,

        (Role::Editor, Dashboard) => P::VIEW,
        (Role::Editor, News) => P::FULL,
        (Role::Editor, Testimonials) => P::FULL,
        (Role::Editor, Messages) => P::VIEW,
        (Role::Editor, Users) => P::NONE,
        (Role::Editor, Documents) => P::new(true, true, false, false),

        (Role::Secretaria, Dashboard) => P::VIEW,
        (Role::Secretaria, News) => P::NONE,
        (Role::Secretaria, Testimonials) => P::VIEW,
        (Role::Secretaria, Messages) => P::FULL,
        (Role::Secretaria, Users) => P::NONE,
        (Role::Secretaria, Documents) => P::new(true, true, false, false),

        (Role::Abogado, Dashboard) => P::VIEW,
        (Role::Abogado, News) => P::VIEW,
        (Role::Abogado, Testimonials) => P::VIEW,
        (Role::Abogado, Messages) => P::VIEW,
        (Role::Abogado, Users) => P::NONE,
        (Role::Abogado, Documents) => P::new(true, true, true, false),
    }
}

/// Typed permission check.
pub fn is_allowed(role: Role, module: Module, action: Action) -> bool {
    module_permissions(role, module).allows(action)
}

/// String-level permission check, fail-closed.
///
/// Unknown role, module or action strings all deny.
pub fn has_permission(role: &str, module: &str, action: &str) -> bool {
    let (Ok(role), Ok(module), Ok(action)) = (
        Role::from_str(role),
        Module::from_str(module),
        Action::from_str(action),
    ) else {
        return false;
    };
    is_allowed(role, module, action)
}

/// Guard: the role must hold (module, action), otherwise 403.
pub fn require_permission(role: Role, module: Module, action: Action) -> Result<()> {
    if is_allowed(role, module, action) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "Role '{}' may not {:?} {}",
            role,
            action,
            module.as_str()
        )))
    }
}

/// Guard: the role must be one of `allowed`, otherwise 403.
pub fn require_role(role: Role, allowed: &[Role]) -> Result<()> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "Role '{}' may not access this resource",
            role
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_everything() {
        for module in Module::ALL {
            for action in [Action::View, Action::Create, Action::Edit, Action::Delete] {
                if module == Module::Dashboard && action != Action::View {
                    continue;
                }
                assert!(
                    is_allowed(Role::Admin, module, action),
                    "admin denied {:?} on {:?}",
                    action,
                    module
                );
            }
        }
    }

    #[test]
    fn test_secretaria_matrix_fixed_points() {
        assert!(!has_permission("secretaria", "news", "view"));
        assert!(has_permission("secretaria", "messages", "edit"));
    }

    #[test]
    fn test_editor_has_no_user_management() {
        for action in [Action::View, Action::Create, Action::Edit, Action::Delete] {
            assert!(!is_allowed(Role::Editor, Module::Users, action));
        }
    }

    #[test]
    fn test_unknown_strings_fail_closed() {
        assert!(!has_permission("root", "news", "view"));
        assert!(!has_permission("admin", "billing", "view"));
        assert!(!has_permission("admin", "news", "publish"));
        assert!(!has_permission("", "", ""));
        assert!(!has_permission("ADMIN", "news", "view"));
    }

    #[test]
    fn test_dashboard_is_view_only() {
        for role in Role::ALL {
            for action in [Action::Create, Action::Edit, Action::Delete] {
                assert!(!is_allowed(role, Module::Dashboard, action));
            }
        }
    }

    #[test]
    fn test_only_admin_touches_users() {
        for role in [Role::Editor, Role::Secretaria, Role::Abogado] {
            for action in [Action::View, Action::Create, Action::Edit, Action::Delete] {
                assert!(!is_allowed(role, Module::Users, action));
            }
        }
    }

    #[test]
    fn test_require_permission_errors_are_forbidden() {
        let err = require_permission(Role::Editor, Module::Users, Action::View).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        assert!(require_permission(Role::Editor, Module::News, Action::Create).is_ok());
    }

    #[test]
    fn test_require_role() {
        assert!(require_role(Role::Admin, &[Role::Admin]).is_ok());
        assert!(require_role(Role::Abogado, &[Role::Admin, Role::Editor]).is_err());
    }

    #[test]
    fn test_role_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_str(role.as_str()), Ok(role));
        }
        assert!(Role::from_str("superuser").is_err());
    }
}
