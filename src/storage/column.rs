use crate::{err, errors};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref LENGTH_REGEX: Regex = Regex::new(r#"\(([^)]*)\)"#).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    INTEGER,        // 4 bytes
    DECIMAL,        // 8 bytes
    VARCHAR(usize), // Variable-length string with declared capacity
    UNKNOWN,        // Anything else, sized 0
}

impl ColumnType {
    /// Resolves a raw type token (e.g. `VARCHAR(30),`) into a column type.
    ///
    /// Keywords are matched by containment, in the order INTEGER, DECIMAL, VARCHAR.
    /// A VARCHAR without a readable length between the first `(` and the first `)`
    /// is a schema error.
    pub fn resolve(type_: &str) -> Result<ColumnType, errors::Error> {
        if type_.contains("INTEGER") {
            return Ok(ColumnType::INTEGER);
        }
        if type_.contains("DECIMAL") {
            return Ok(ColumnType::DECIMAL);
        }
        if type_.contains("VARCHAR") {
            let length = LENGTH_REGEX
                .captures(type_)
                .and_then(|c| c.get(1))
                .ok_or_else(|| err!(Schema, "Missing length in '{}'", type_))?;
            let length = length.as_str().trim().parse::<usize>().map_err(|e| {
                errors::Error::Schema(format!("Invalid length in '{}': {}", type_, e))
            })?;
            return Ok(ColumnType::VARCHAR(length));
        }
        Ok(ColumnType::UNKNOWN)
    }

    /// Static byte-size estimate for this type.
    pub fn size(&self) -> usize {
        match self {
            ColumnType::INTEGER => 4,
            ColumnType::DECIMAL => 8,
            ColumnType::VARCHAR(capacity) => *capacity,
            ColumnType::UNKNOWN => 0,
        }
    }

    pub fn is_varchar(&self) -> bool {
        matches!(self, ColumnType::VARCHAR(_))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::INTEGER => write!(f, "INTEGER"),
            ColumnType::DECIMAL => write!(f, "DECIMAL"),
            ColumnType::VARCHAR(capacity) => write!(f, "VARCHAR({})", capacity),
            ColumnType::UNKNOWN => write!(f, "UNKNOWN"),
        }
    }
}
