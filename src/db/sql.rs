//! INSERT statement generation.
//!
//! Single-row inserts always use `?` markers with bound values. Batch inserts
//! bind every value too unless the connection asks for [`BindStyle::Literals`],
//! in which case values are rendered and escaped inline.

use crate::db::driver::BindStyle;
use crate::error::{OrmError, OrmResult};
use crate::models::{Field, Value};

/// SQL text plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Quote an identifier with backticks. `schema.table` is quoted per part.
pub fn quote_ident(name: &str) -> String {
    name.split('.')
        .map(|part| format!("`{}`", part.replace('`', "``")))
        .collect::<Vec<_>>()
        .join(".")
}

/// Quote a string as a MySQL literal.
///
/// Backslashes are escaped, which assumes the server runs without the
/// `NO_BACKSLASH_ESCAPES` SQL mode. Under that mode a backslash would be stored
/// twice; connections that enable it should keep [`BindStyle::Parameters`].
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn literal(value: &Value) -> String {
    if value.is_null() {
        "NULL".to_string()
    } else {
        quote_literal(&value.render())
    }
}

/// Single-row form: ``INSERT INTO `t` SET `a` = ?, `b` = ?``.
pub fn insert_statement(table: &str, fields: Vec<Field>) -> OrmResult<Statement> {
    if fields.is_empty() {
        return Err(OrmError::invalid_input(format!(
            "Record for table '{}' has no fields",
            table
        )));
    }

    let mut assignments = Vec::with_capacity(fields.len());
    let mut params = Vec::with_capacity(fields.len());
    for field in fields {
        assignments.push(format!("{} = ?", quote_ident(&field.column)));
        params.push(field.value.into_param());
    }

    Ok(Statement {
        sql: format!(
            "INSERT INTO {} SET {}",
            quote_ident(table),
            assignments.join(", ")
        ),
        params,
    })
}

/// Multi-row form: ``INSERT INTO `t` (`a`, `b`) VALUES (..), (..)``.
///
/// `first_row` is the batch index of `rows[0]`, used in shape errors.
pub fn batch_insert_statement(
    table: &str,
    columns: &[String],
    rows: Vec<Vec<Value>>,
    first_row: usize,
    style: BindStyle,
) -> OrmResult<Statement> {
    if columns.is_empty() {
        return Err(OrmError::invalid_input(format!(
            "Records for table '{}' have no fields",
            table
        )));
    }
    if rows.is_empty() {
        return Err(OrmError::invalid_input("Batch contains no records"));
    }

    let placeholders = format!("({})", vec!["?"; columns.len()].join(", "));
    let mut tuples = Vec::with_capacity(rows.len());
    let mut params = Vec::new();

    for (i, row) in rows.into_iter().enumerate() {
        if row.len() != columns.len() {
            return Err(OrmError::shape(first_row + i, columns.len(), row.len()));
        }
        match style {
            BindStyle::Parameters => {
                tuples.push(placeholders.clone());
                params.extend(row.into_iter().map(Value::into_param));
            }
            BindStyle::Literals => {
                let values: Vec<String> = row.iter().map(literal).collect();
                tuples.push(format!("({})", values.join(", ")));
            }
        }
    }

    let column_list = columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Statement {
        sql: format!(
            "INSERT INTO {} ({}) VALUES {}",
            quote_ident(table),
            column_list,
            tuples.join(", ")
        ),
        params,
    })
}
