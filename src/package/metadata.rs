//! Access to the `_MetaData` table of a Mendix project database

use std::path::Path;

use rusqlite::{Connection, OpenFlags, params};
use tracing::debug;

use crate::package::error::PackageError;

/// Version fields of a project database.
///
/// The `_MetaData` table holds exactly one row; updates are applied to every
/// row since the table has no key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    pub product_version: String,
    pub build_version: String,
}

const SELECT_METADATA: &str = "SELECT _ProductVersion, _BuildVersion FROM _MetaData";
const UPDATE_METADATA: &str =
    "UPDATE _MetaData SET _ProductVersion = ?1, _BuildVersion = ?2";

/// Read the version fields. NULL columns read as empty strings.
pub fn read_metadata(db_path: &Path) -> Result<MetadataRecord, PackageError> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    let record = conn.query_row(SELECT_METADATA, [], |row| {
        Ok(MetadataRecord {
            product_version: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
            build_version: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        })
    })?;

    conn.close().map_err(|(_, e)| e)?;

    debug!("Read metadata from {:?}: {:?}", db_path, record);
    Ok(record)
}

/// Overwrite the version fields of every row. Returns the number of rows
/// updated.
pub fn write_metadata(db_path: &Path, record: &MetadataRecord) -> Result<usize, PackageError> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    let updated = conn.execute(
        UPDATE_METADATA,
        params![record.product_version, record.build_version],
    )?;

    conn.close().map_err(|(_, e)| e)?;

    debug!("Updated {} metadata rows in {:?}", updated, db_path);
    Ok(updated)
}
