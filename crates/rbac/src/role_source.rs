//! RoleSource - Explicit accessor for the signed-in user's role

use shared::UserProfile;

/// Supplies the current role on demand.
///
/// Evaluators call `current_role` on every check and never cache the answer,
/// so a source backed by a live session observes logins and logouts.
pub trait RoleSource {
    /// Current role, `None` when nobody is signed in or no role is assigned
    fn current_role(&self) -> Option<String>;

    /// Whether a user is signed in, even one without a role
    fn is_authenticated(&self) -> bool {
        self.current_role().is_some()
    }
}

impl<T: RoleSource + ?Sized> RoleSource for &T {
    fn current_role(&self) -> Option<String> {
        (**self).current_role()
    }

    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
}

impl RoleSource for UserProfile {
    fn current_role(&self) -> Option<String> {
        self.role.clone()
    }

    fn is_authenticated(&self) -> bool {
        true
    }
}

impl RoleSource for Option<UserProfile> {
    fn current_role(&self) -> Option<String> {
        self.as_ref().and_then(|p| p.role.clone())
    }

    fn is_authenticated(&self) -> bool {
        self.is_some()
    }
}

impl RoleSource for Option<String> {
    fn current_role(&self) -> Option<String> {
        self.clone()
    }
}

impl RoleSource for str {
    fn current_role(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Adapts an accessor function into a [`RoleSource`]
///
/// ```
/// use rbac::{RoleFn, RoleSource};
/// use std::cell::RefCell;
///
/// let session = RefCell::new(None::<String>);
/// let source = RoleFn(|| session.borrow().clone());
///
/// assert_eq!(source.current_role(), None);
/// *session.borrow_mut() = Some("parent".to_string());
/// assert_eq!(source.current_role().as_deref(), Some("parent"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RoleFn<F>(pub F);

impl<F> RoleSource for RoleFn<F>
where
    F: Fn() -> Option<String>,
{
    fn current_role(&self) -> Option<String> {
        (self.0)()
    }
}
