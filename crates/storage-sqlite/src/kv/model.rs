//! Database model for key/value entries.

use diesel::prelude::*;

/// Database model for app_settings key-value pairs
#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::app_settings)]
pub struct AppSettingDB {
    pub setting_key: String,
    pub setting_value: String,
}
