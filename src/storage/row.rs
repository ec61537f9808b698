use crate::errors;
use crate::schema::{ColumnSchema, TableSchema};
use std::fmt;

/// Field separator of the data file. It cannot be escaped.
pub const SEPARATOR: &str = ",";

const COST_COLUMN: &str = "cost";
const TAX_COLUMN: &str = "tax";

/// Rounds to two fraction digits, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Running amounts captured while one row is being built.
#[derive(Debug, Default, Clone, Copy)]
struct Amounts {
    cost: f64,
    tax: f64,
}

impl Amounts {
    fn total(&self) -> f64 {
        round2(self.cost + self.tax)
    }
}

/// Builds one data line: the row index followed by one field per schema column.
///
/// `read_field` is called for every column that is not calculated. `cost` and `tax`
/// are parsed, rounded and formatted with two fraction digits; the calculated column
/// is the rounded sum of the `cost` and `tax` seen so far in this row (0 if not seen).
pub fn serialize_row<F>(
    schema: &TableSchema,
    index: u64,
    mut read_field: F,
) -> Result<String, errors::Error>
where
    F: FnMut(&ColumnSchema) -> Result<String, errors::Error>,
{
    let mut amounts = Amounts::default();
    let mut fields = Vec::with_capacity(schema.len());

    for column in &schema.columns {
        if column.is_calculated {
            fields.push(format_amount(amounts.total()));
            continue;
        }

        let raw = read_field(column)?;
        let field = match column.name.as_str() {
            COST_COLUMN | TAX_COLUMN => {
                let value = round2(raw.trim().parse::<f64>().map_err(|e| {
                    errors::Error::Value(format!("'{}' for '{}': {}", raw, column.name, e))
                })?);
                if column.name == COST_COLUMN {
                    amounts.cost = value;
                } else {
                    amounts.tax = value;
                }
                format_amount(value)
            }
            _ => raw,
        };
        fields.push(field);
    }

    Ok(format!("{}{}{}", index, SEPARATOR, fields.join(SEPARATOR)))
}

/// Reads the row index from the first field of a data line.
pub fn parse_index(line: &str) -> Result<u64, errors::Error> {
    let first = line.split(SEPARATOR).next().unwrap_or("").trim();
    first.parse::<u64>().map_err(|e| {
        errors::Error::Serialization(format!("Invalid row index '{}': {}", first, e))
    })
}

/// A stored value with its effective size in bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub value: String,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub fields: Vec<Field>,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for field in &self.fields {
            write!(f, "({}, {} bytes) ", field.value, field.size)?;
        }
        write!(f, "]")
    }
}

/// Decodes a data line against the schema, one field per column.
///
/// Fields are taken positionally from the start of the line, so the row index
/// lands on the first schema column and trailing fields beyond the schema are
/// dropped. Missing fields are empty. VARCHAR columns report the byte length of
/// the stored value; every other column reports its static size.
pub fn deserialize_row(schema: &TableSchema, line: &str) -> Row {
    let mut parts = line.split(SEPARATOR);
    let fields = schema
        .columns
        .iter()
        .map(|column| {
            let value = parts.next().unwrap_or("").to_string();
            let size = if column.kind.is_varchar() {
                value.len()
            } else {
                column.size
            };
            Field { value, size }
        })
        .collect();
    Row { fields }
}
