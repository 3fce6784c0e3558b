//! Key-value capability over the `kv_store` table.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::settings::OptionalExt;
use crate::{Database, DbError};

/// String-keyed storage of serialized text values.
///
/// The typed helpers encode values as JSON, which is the format every
/// persisted blob in [`crate::keys`] uses.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, DbError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), DbError>;

    fn remove_item(&self, key: &str) -> Result<(), DbError>;

    /// Read and decode a JSON blob. Missing keys yield `Ok(None)`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DbError> {
        let Some(raw) = self.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| DbError::Json {
                key: key.to_string(),
                source,
            })
    }

    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DbError> {
        let raw = serde_json::to_string(value).map_err(|source| DbError::Json {
            key: key.to_string(),
            source,
        })?;
        self.set_item(key, &raw)
    }

    /// Current value of an integer counter; absent counters read as zero.
    fn read_counter(&self, key: &str) -> Result<u64, DbError> {
        Ok(self.get_json::<u64>(key)?.unwrap_or(0))
    }

    /// Add one to an integer counter and return the new value.
    fn increment_counter(&self, key: &str) -> Result<u64, DbError> {
        let next = self.read_counter(key)?.saturating_add(1);
        self.set_json(key, &next)?;
        Ok(next)
    }
}

impl KeyValueStore for Database {
    fn get_item(&self, key: &str) -> Result<Option<String>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;
            let value = stmt
                .query_row([key], |row| row.get::<_, String>(0))
                .optional()?;
            Ok(value)
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
                rusqlite::params![key, value],
            )?;
            Ok(())
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
            Ok(())
        })
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, DbError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), DbError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), DbError> {
        (**self).remove_item(key)
    }
}
