use anyhow::{anyhow, Context, Result};

use super::BirthdayService;
use crate::models::birthday::{Birthday, BirthdayId, BirthdayUpdate, NewBirthday};
use crate::services::auth::AuthProvider;
use crate::services::store::BirthdayStore;

impl<A: AuthProvider, S: BirthdayStore> BirthdayService<A, S> {
    /// Every birthday of the signed-in user, ordered by stored date.
    /// Signed-out callers get an empty list.
    pub fn list(&self) -> Result<Vec<Birthday>> {
        match self.current_user() {
            Some(user) => self.store.list(&user).context("Failed to load birthdays"),
            None => Ok(Vec::new()),
        }
    }

    /// Create a birthday for the signed-in user.
    pub fn create(&self, birthday: NewBirthday) -> Result<Birthday> {
        let user = self.require_user()?;
        let created = self
            .store
            .create(&user, birthday)
            .context("Failed to create birthday")?;
        log::info!("Added birthday '{}' ({})", created.name, created.date);
        Ok(created)
    }

    /// Edit one of the signed-in user's birthdays.
    pub fn update(&self, id: BirthdayId, update: &BirthdayUpdate) -> Result<Birthday> {
        self.owned(id)?;
        self.store
            .update(id, update)
            .context("Failed to update birthday")
    }

    /// Delete one of the signed-in user's birthdays.
    pub fn delete(&self, id: BirthdayId) -> Result<()> {
        let record = self.owned(id)?;
        self.store.delete(id).context("Failed to delete birthday")?;
        log::info!("Removed birthday '{}'", record.name);
        Ok(())
    }

    /// Fetch a record, treating other users' records as missing.
    fn owned(&self, id: BirthdayId) -> Result<Birthday> {
        let user = self.require_user()?;
        match self.store.get(id)? {
            Some(record) if record.user_id.as_ref() == Some(&user) => Ok(record),
            _ => Err(anyhow!("Birthday with id {} not found", id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::birthday::{BirthdayId, BirthdayUpdate, NewBirthday, UserId};
    use crate::services::auth::{LocalSession, MockAuthProvider};
    use crate::services::birthday::BirthdayService;
    use crate::services::store::{MemoryBirthdayStore, MockBirthdayStore};
    use crate::services::store::BirthdayStore;

    fn signed_in() -> BirthdayService<LocalSession, MemoryBirthdayStore> {
        BirthdayService::new(
            LocalSession::signed_in(UserId::new("alice")),
            MemoryBirthdayStore::new(),
        )
    }

    #[test]
    fn test_create_requires_user() {
        let service = BirthdayService::new(LocalSession::signed_out(), MemoryBirthdayStore::new());
        let err = service
            .create(NewBirthday::new("Ada", "1815-12-10"))
            .unwrap_err();
        assert!(err.to_string().contains("User not authenticated"));
        assert!(service.store().is_empty());
    }

    #[test]
    fn test_list_signed_out_is_empty() {
        let mut auth = MockAuthProvider::new();
        auth.expect_current_user().returning(|| None);

        let mut store = MockBirthdayStore::new();
        store.expect_list().never();

        let service = BirthdayService::new(auth, store);
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_then_list() {
        let service = signed_in();
        service.create(NewBirthday::new("Ada", "1815-12-10")).unwrap();
        service.create(NewBirthday::new("Grace", "1906-12-09")).unwrap();

        let names: Vec<String> = service.list().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Ada", "Grace"]);
    }

    #[test]
    fn test_update_own_record() {
        let service = signed_in();
        let created = service.create(NewBirthday::new("Ada", "1815-12-10")).unwrap();

        let update = BirthdayUpdate {
            reminder_days: Some(10),
            ..BirthdayUpdate::default()
        };
        let updated = service.update(created.id.unwrap(), &update).unwrap();
        assert_eq!(updated.reminder_days, 10);
    }

    #[test]
    fn test_cannot_touch_other_users_records() {
        let store = MemoryBirthdayStore::new();
        let foreign = store
            .create(&UserId::new("bob"), NewBirthday::new("Bob's mum", "1950-01-01"))
            .unwrap();

        let service = BirthdayService::new(LocalSession::signed_in(UserId::new("alice")), store);
        let id = foreign.id.unwrap();

        assert!(service.update(id, &BirthdayUpdate::default()).is_err());
        assert!(service.delete(id).is_err());
        assert!(service.store().get(id).unwrap().is_some());
    }

    #[test]
    fn test_delete() {
        let service = signed_in();
        let created = service.create(NewBirthday::new("Ada", "1815-12-10")).unwrap();

        service.delete(created.id.unwrap()).unwrap();
        assert!(service.list().unwrap().is_empty());
        assert!(service.delete(BirthdayId(999)).is_err());
    }

    #[test]
    fn test_store_errors_are_propagated() {
        let mut store = MockBirthdayStore::new();
        store
            .expect_create()
            .returning(|_, _| Err(anyhow::anyhow!("disk full")));

        let service = BirthdayService::new(LocalSession::signed_in(UserId::new("alice")), store);
        let err = service
            .create(NewBirthday::new("Ada", "1815-12-10"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to create birthday");
        assert!(format!("{:#}", err).contains("disk full"));
    }
}
