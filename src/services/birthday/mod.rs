//! Per-user birthday service.
//! Combines the signed-in account, a record store and the occurrence
//! calculator; operations are split across focused submodules.

use crate::models::birthday::UserId;
use crate::models::settings::DEFAULT_UPCOMING_WINDOW_DAYS;
use crate::services::auth::AuthProvider;
use crate::services::occurrence::OccurrenceCalculator;
use crate::services::store::BirthdayStore;

pub mod crud;
pub mod queries;

pub use queries::BirthdayStats;

/// Birthday operations scoped to the current user.
pub struct BirthdayService<A, S> {
    auth: A,
    store: S,
    calculator: OccurrenceCalculator,
    upcoming_window_days: u32,
}

impl<A: AuthProvider, S: BirthdayStore> BirthdayService<A, S> {
    pub fn new(auth: A, store: S) -> Self {
        Self {
            auth,
            store,
            calculator: OccurrenceCalculator::default(),
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
        }
    }

    pub fn with_calculator(mut self, calculator: OccurrenceCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Window used by [`upcoming_default`](Self::upcoming_default) and stats.
    pub fn with_upcoming_window(mut self, days: u32) -> Self {
        self.upcoming_window_days = days;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn calculator(&self) -> &OccurrenceCalculator {
        &self.calculator
    }

    pub fn upcoming_window_days(&self) -> u32 {
        self.upcoming_window_days
    }

    pub fn current_user(&self) -> Option<UserId> {
        self.auth.current_user()
    }

    pub(crate) fn require_user(&self) -> anyhow::Result<UserId> {
        self.auth
            .current_user()
            .ok_or_else(|| anyhow::anyhow!("User not authenticated"))
    }
}
