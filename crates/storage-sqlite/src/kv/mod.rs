//! Key/value access to the `app_settings` table.
//!
//! Each value is a single string stored under a single key. The functions
//! take a bare connection so they compose inside writer-actor jobs.

mod model;

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use spendsync_core::errors::Result;

pub use model::AppSettingDB;

/// Reads the value stored under `key`, if any.
pub fn read_value(conn: &mut SqliteConnection, key: &str) -> Result<Option<String>> {
    let value = app_settings
        .filter(setting_key.eq(key))
        .select(setting_value)
        .first::<String>(conn)
        .optional()
        .map_err(StorageError::from)?;
    Ok(value)
}

/// Stores `value` under `key`, replacing any previous value.
pub fn write_value(conn: &mut SqliteConnection, key: &str, value: &str) -> Result<()> {
    diesel::replace_into(app_settings)
        .values(AppSettingDB {
            setting_key: key.to_string(),
            setting_value: value.to_string(),
        })
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(())
}
