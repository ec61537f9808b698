use crate::errors;
use crate::storage::column::ColumnType;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Marker of the header line, which is skipped.
const HEADER_MARKER: &str = "CREATE TABLE";
/// Marker of the terminator line, which ends the column list.
const TERMINATOR_MARKER: &str = ");";
/// The only column whose value is derived instead of entered.
pub const CALCULATED_COLUMN: &str = "total";

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    /// Raw type token as written in the definition file.
    pub type_: String,
    pub kind: ColumnType,
    pub size: usize,
    pub is_calculated: bool,
}

impl ColumnSchema {
    pub fn new(name: &str, type_: &str) -> Result<Self, errors::Error> {
        let kind = ColumnType::resolve(type_)?;
        Ok(ColumnSchema {
            name: name.to_string(),
            type_: type_.to_string(),
            size: kind.size(),
            kind,
            is_calculated: name == CALCULATED_COLUMN,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableSchema {
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Headers and rows describing the schema, ready for `console::build_table`.
    pub fn describe(&self) -> (Vec<String>, Vec<Vec<String>>) {
        let headers = ["Column", "Type", "Size", "Calculated"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let rows = self
            .columns
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.type_.clone(),
                    c.size.to_string(),
                    if c.is_calculated { "yes" } else { "" }.to_string(),
                ]
            })
            .collect();
        (headers, rows)
    }
}

/// Parses a pseudo-DDL table definition.
///
/// Lines containing `CREATE TABLE` are skipped and parsing stops at the first
/// line containing `);`. Every other non-blank line yields one column from its
/// first two whitespace-separated tokens; further tokens are ignored and a
/// missing type becomes an empty string.
pub fn parse<R: BufRead>(reader: R) -> Result<TableSchema, errors::Error> {
    let mut schema = TableSchema::default();

    for line in reader.lines() {
        let line = line?;
        if line.contains(HEADER_MARKER) {
            continue;
        }
        if line.contains(TERMINATOR_MARKER) {
            break;
        }

        let mut tokens = line.split_whitespace();
        let name = match tokens.next() {
            Some(name) => name,
            None => continue,
        };
        let type_ = tokens.next().unwrap_or("");

        let column = ColumnSchema::new(name, type_)?;
        debug!(name = %column.name, kind = %column.kind, size = column.size, "Parsed column");
        schema.columns.push(column);
    }

    Ok(schema)
}

/// Loads a table definition file.
pub fn load(path: &Path) -> Result<TableSchema, errors::Error> {
    let file = File::open(path).map_err(|e| {
        errors::Error::Schema(format!("Could not open '{}': {}", path.display(), e))
    })?;
    let schema = parse(BufReader::new(file))?;
    info!(
        path = %path.display(),
        columns = schema.len(),
        "Loaded table schema"
    );
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const DEFINITION: &str = "CREATE TABLE taxables (\n\
        item VARCHAR(30),\n\
        cost DECIMAL(10,2),\n\
        tax DECIMAL(10,2),\n\
        total DECIMAL(10,2)\n\
        );\n\
        ignored INTEGER\n";

    #[test]
    fn test_parse_columns() {
        let schema = parse(Cursor::new(DEFINITION)).unwrap();
        let names: Vec<&str> = schema.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["item", "cost", "tax", "total"]);

        assert_eq!(schema.columns[0].type_, "VARCHAR(30),");
        assert_eq!(schema.columns[0].kind, ColumnType::VARCHAR(30));
        assert_eq!(schema.columns[0].size, 30);
        assert_eq!(schema.columns[1].size, 8);
    }

    #[test]
    fn test_only_total_is_calculated() {
        let schema = parse(Cursor::new(DEFINITION)).unwrap();
        let calculated: Vec<&str> = schema
            .columns
            .iter()
            .filter(|c| c.is_calculated)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(calculated, vec!["total"]);
    }

    #[test]
    fn test_missing_type_yields_empty() {
        let schema = parse(Cursor::new("CREATE TABLE t (\nnote\n);\n")).unwrap();
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.columns[0].name, "note");
        assert_eq!(schema.columns[0].type_, "");
        assert_eq!(schema.columns[0].size, 0);
        assert!(!schema.columns[0].is_calculated);
    }

    #[test]
    fn test_extra_tokens_and_blank_lines() {
        let schema = parse(Cursor::new("id INTEGER NOT NULL\n\n   \ncost DECIMAL\n")).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.columns[0].type_, "INTEGER");
        assert_eq!(schema.columns[0].size, 4);
    }

    #[test]
    fn test_malformed_varchar_fails() {
        let err = parse(Cursor::new("name VARCHAR\n);\n")).unwrap_err();
        assert_eq!(err.code(), 5000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", DEFINITION).unwrap();
        let schema = load(file.path()).unwrap();
        assert_eq!(schema.len(), 4);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/struct_table.txt")).unwrap_err();
        assert_eq!(err.category(), "Schema");
    }

    #[test]
    fn test_describe() {
        let schema = parse(Cursor::new(DEFINITION)).unwrap();
        let (headers, rows) = schema.describe();
        assert_eq!(headers.len(), 4);
        assert_eq!(rows[3], vec!["total", "DECIMAL(10,2)", "8", "yes"]);
    }
}
