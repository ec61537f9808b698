pub mod column;
pub mod row;

use crate::{err, errors};
use crate::schema::{ColumnSchema, TableSchema};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Append-only CSV data file, opened and closed on every operation.
pub struct Table {
    pub path: PathBuf,
}

impl Table {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Index for the next row: one past the index of the last line, or 1 when
    /// the file is missing or its last line is empty.
    ///
    /// Scans the whole file on every call.
    pub fn next_index(&self) -> Result<u64, errors::Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(_) => return Ok(1),
        };

        let mut last = String::new();
        for line in BufReader::new(file).lines() {
            last = line?;
        }

        if last.is_empty() {
            return Ok(1);
        }
        let index = row::parse_index(&last)?;
        index
            .checked_add(1)
            .ok_or_else(|| err!(Serialization, "Row index {} overflows", index))
    }

    /// Opens the data file for appending, creating it if absent.
    pub fn open_append(&self) -> Result<File, errors::Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(file)
    }

    /// Builds the next row and appends it as one line.
    ///
    /// Nothing is written if building the row fails. Returns the written line.
    pub fn insert_row<F>(
        &self,
        schema: &TableSchema,
        read_field: F,
    ) -> Result<String, errors::Error>
    where
        F: FnMut(&ColumnSchema) -> Result<String, errors::Error>,
    {
        let mut file = self.open_append()?;
        let index = self.next_index()?;
        debug!(index, "Building row");

        let line = row::serialize_row(schema, index, read_field)?;
        file.write_all(format!("{}\n", line).as_bytes())?;
        file.flush()?;

        info!(index, path = %self.path.display(), "Appended row");
        Ok(line)
    }

    /// Reads every line of the data file back as a row.
    pub fn select_rows(&self, schema: &TableSchema) -> Result<Vec<row::Row>, errors::Error> {
        let file = File::open(&self.path)?;
        let mut rows = Vec::new();
        for line in BufReader::new(file).lines() {
            rows.push(row::deserialize_row(schema, &line?));
        }
        debug!(rows = rows.len(), path = %self.path.display(), "Read rows");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn taxables() -> TableSchema {
        schema::parse(Cursor::new(
            "CREATE TABLE taxables (\nitem VARCHAR(20),\ncost DECIMAL(10,2),\ntax DECIMAL(10,2),\ntotal DECIMAL(10,2)\n);\n",
        ))
        .unwrap()
    }

    fn fixed(
        values: &'static [&'static str],
    ) -> impl FnMut(&schema::ColumnSchema) -> Result<String, errors::Error> {
        let mut iter = values.iter();
        move |_: &schema::ColumnSchema| {
            iter.next()
                .map(|v| v.to_string())
                .ok_or_else(|| errors::Error::Input("no more input".into()))
        }
    }

    #[test]
    fn test_next_index_missing_file() {
        let dir = tempdir().unwrap();
        let table = Table::new(&dir.path().join("taxables.csv"));
        assert_eq!(table.next_index().unwrap(), 1);
    }

    #[test]
    fn test_next_index_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("taxables.csv");
        fs::write(&path, "").unwrap();
        assert_eq!(Table::new(&path).next_index().unwrap(), 1);
    }

    #[test]
    fn test_next_index_from_last_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("taxables.csv");
        fs::write(&path, "6,bar,1.00,1.00,2.00\n7,foo,1.00,2.00,3.00\n").unwrap();
        assert_eq!(Table::new(&path).next_index().unwrap(), 8);
    }

    #[test]
    fn test_next_index_corrupt_last_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("taxables.csv");
        fs::write(&path, "abc,foo\n").unwrap();
        assert_eq!(Table::new(&path).next_index().unwrap_err().code(), 6000);
    }

    #[test]
    fn test_next_index_overflow() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("taxables.csv");
        fs::write(&path, "18446744073709551615,x\n").unwrap();
        let err = Table::new(&path).next_index().unwrap_err();
        assert_eq!(err.code(), 6000);
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_sequential_inserts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("taxables.csv");
        let table = Table::new(&path);
        let schema = taxables();

        table.insert_row(&schema, fixed(&["pen", "1.5", "0.25"])).unwrap();
        table.insert_row(&schema, fixed(&["ink", "2", "0.5"])).unwrap();
        table.insert_row(&schema, fixed(&["pad", "3", "0"])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "1,pen,1.50,0.25,1.75\n2,ink,2.00,0.50,2.50\n3,pad,3.00,0.00,3.00\n"
        );
        assert_eq!(table.next_index().unwrap(), 4);
    }

    #[test]
    fn test_failed_insert_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("taxables.csv");
        let table = Table::new(&path);
        let schema = taxables();

        table.insert_row(&schema, fixed(&["pen", "1", "1"])).unwrap();
        assert!(table.insert_row(&schema, fixed(&["ink", "oops", "1"])).is_err());

        assert_eq!(fs::read_to_string(&path).unwrap(), "1,pen,1.00,1.00,2.00\n");
    }

    #[test]
    fn test_insert_then_select_round_trip() {
        let dir = tempdir().unwrap();
        let table = Table::new(&dir.path().join("taxables.csv"));
        let schema = taxables();

        table.insert_row(&schema, fixed(&["apple", "10.006", "2.004"])).unwrap();
        let rows = table.select_rows(&schema).unwrap();

        assert_eq!(rows.len(), 1);
        // The index occupies the first column and the total is dropped.
        let values: Vec<&str> = rows[0].fields.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["1", "apple", "10.01", "2.00"]);
        assert_eq!(
            rows[0].to_string(),
            "[ (1, 1 bytes) (apple, 8 bytes) (10.01, 8 bytes) (2.00, 8 bytes) ]"
        );
    }

    #[test]
    fn test_select_missing_file() {
        let dir = tempdir().unwrap();
        let table = Table::new(&dir.path().join("missing.csv"));
        assert_eq!(table.select_rows(&taxables()).unwrap_err().code(), 1000);
    }
}
