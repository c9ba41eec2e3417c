//! Account lookup used to scope every birthday operation to one user.
//!
//! Sign-in flows live outside this crate; services only ask who is
//! currently signed in.

use crate::models::birthday::UserId;

/// Source of the currently signed-in user.
#[cfg_attr(test, mockall::automock)]
pub trait AuthProvider {
    fn current_user(&self) -> Option<UserId>;
}

/// A fixed local account, e.g. taken from the config file or the OS user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalSession {
    user: Option<UserId>,
}

impl LocalSession {
    pub fn signed_in(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }

    /// Use `configured` if given, otherwise the OS login name.
    pub fn from_config(configured: Option<&str>) -> Self {
        let name = configured
            .map(str::to_string)
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        match name {
            Some(name) => Self::signed_in(UserId::new(name)),
            None => {
                log::warn!("No user configured and no login name found; running signed out");
                Self::signed_out()
            }
        }
    }
}

impl AuthProvider for LocalSession {
    fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }
}
