//! Identifiers and literals of the generated SQL.
//!
//! Table and column names are folded to lower case, which is what PostgreSQL does with
//! unquoted identifiers anyway; the generated statements never quote identifiers.

/// `<schema>.<table>`, both lower case
pub fn qualified(schema: &str, table: &str) -> String {
    format!("{}.{}", schema.to_lowercase(), table.to_lowercase())
}

/// Name of the list partition holding subtype `code`
pub fn partition_table(table: &str, code: &str) -> String {
    format!("{}_{}", table.to_lowercase(), code)
}

/// `<table>_FK_<n>`; `n` starts at 1
pub fn foreign_key_name(table: &str, n: usize) -> String {
    format!("{}_FK_{}", table.to_lowercase(), n)
}

/// Staging table the rows of a layer are imported into before being copied
pub fn staging_table(table: &str) -> String {
    format!("{}_tmp", table.to_lowercase())
}

/// Single-quoted SQL string literal, with embedded quotes doubled.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
