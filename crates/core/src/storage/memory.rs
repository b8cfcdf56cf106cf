use std::collections::HashMap;
use std::sync::RwLock;

use crate::errors::CoreError;
use crate::models::user::UserRecord;

use super::repository::UserRepository;

/// Process-local repository keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    records: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate from existing records (later duplicates win).
    pub fn with_records(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let map = records.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            records: RwLock::new(map),
        }
    }

    pub fn len(&self) -> Result<usize, CoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.read()?.is_empty())
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, UserRecord>>, CoreError> {
        self.records
            .read()
            .map_err(|_| CoreError::Storage("user store lock poisoned".into()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, UserRecord>>, CoreError> {
        self.records
            .write()
            .map_err(|_| CoreError::Storage("user store lock poisoned".into()))
    }
}

impl UserRepository for InMemoryUserRepository {
    fn get(&self, user_id: &str) -> Result<Option<UserRecord>, CoreError> {
        Ok(self.read()?.get(user_id).cloned())
    }

    fn put(&self, record: UserRecord) -> Result<(), CoreError> {
        self.write()?.insert(record.id.clone(), record);
        Ok(())
    }

    fn insert(&self, record: UserRecord) -> Result<(), CoreError> {
        let mut records = self.write()?;
        if records.contains_key(&record.id) {
            return Err(CoreError::UserAlreadyExists(record.id));
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }

    fn update(
        &self,
        user_id: &str,
        apply: &mut dyn FnMut(&mut UserRecord) -> Result<(), CoreError>,
    ) -> Result<(), CoreError> {
        let mut records = self.write()?;
        let mut updated = records
            .get(user_id)
            .cloned()
            .ok_or_else(|| CoreError::UserNotFound(user_id.to_string()))?;
        apply(&mut updated)?;
        records.insert(user_id.to_string(), updated);
        Ok(())
    }

    fn remove(&self, user_id: &str) -> Result<bool, CoreError> {
        Ok(self.write()?.remove(user_id).is_some())
    }

    fn list(&self) -> Result<Vec<UserRecord>, CoreError> {
        Ok(self.read()?.values().cloned().collect())
    }
}
