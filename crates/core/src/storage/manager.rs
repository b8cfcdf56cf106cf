use crate::errors::CoreError;
use crate::models::user::UserRecord;

/// Converts user records to and from their portable JSON form.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a record to pretty-printed JSON.
    pub fn record_to_json(record: &UserRecord) -> Result<String, CoreError> {
        serde_json::to_string_pretty(record)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize user record: {e}")))
    }

    /// Parse a record from JSON and restore its invariants.
    ///
    /// Flow: JSON → UserRecord → check id → sort and dedupe snapshots by date
    pub fn record_from_json(json: &str) -> Result<UserRecord, CoreError> {
        let mut record: UserRecord = serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse user record: {e}")))?;

        if record.id.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "User record must have a non-empty id".into(),
            ));
        }

        // Last snapshot for a date wins, matching upsert semantics.
        let snapshots = std::mem::take(&mut record.snapshots);
        for snapshot in snapshots {
            record.upsert_snapshot(snapshot);
        }

        Ok(record)
    }
}
