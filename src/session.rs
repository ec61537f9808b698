use std::path::Path;
use tracing::info;
use uuid::Uuid;

use crate::{errors, schema, storage};

/// One loaded schema bound to one data file for the lifetime of the process.
pub struct Session {
    pub id: Uuid,
    pub schema: schema::TableSchema,
    pub table: storage::Table,
}

impl Session {
    pub fn open(schema_path: &Path, data_path: &Path) -> Result<Self, errors::Error> {
        let session = Session {
            id: Uuid::new_v4(),
            schema: schema::load(schema_path)?,
            table: storage::Table::new(data_path),
        };
        info!(
            session_id = %session.id,
            data = %data_path.display(),
            "Opened session"
        );
        Ok(session)
    }

    pub fn close(&mut self) {
        info!(session_id = %self.id, "Closed session");
    }
}
