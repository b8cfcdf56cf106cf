use crate::errors::CoreError;
use crate::models::user::UserRecord;

/// Persistence boundary for user records.
///
/// The metrics engine never touches a repository; only the tracker facade
/// does. Implementations must be safe to share between threads, and every
/// facade mutation goes through `insert` or `update` so concurrent callers
/// never lose each other's changes.
pub trait UserRepository: Send + Sync {
    /// Fetch a record by user id. `Ok(None)` when no such user exists.
    fn get(&self, user_id: &str) -> Result<Option<UserRecord>, CoreError>;

    /// Insert or replace the record stored under `record.id`.
    fn put(&self, record: UserRecord) -> Result<(), CoreError>;

    /// Store a record under a new id. Fails with `UserAlreadyExists` if the
    /// id is taken; the check and the write are one atomic step.
    fn insert(&self, record: UserRecord) -> Result<(), CoreError>;

    /// Read-modify-write one record atomically.
    ///
    /// `apply` runs on a copy while concurrent writers are excluded; the copy
    /// is stored only if `apply` succeeds. Fails with `UserNotFound` when no
    /// record exists.
    fn update(
        &self,
        user_id: &str,
        apply: &mut dyn FnMut(&mut UserRecord) -> Result<(), CoreError>,
    ) -> Result<(), CoreError>;

    /// Delete a record. Returns whether it existed.
    fn remove(&self, user_id: &str) -> Result<bool, CoreError>;

    /// All stored records, in unspecified order.
    fn list(&self) -> Result<Vec<UserRecord>, CoreError>;
}
