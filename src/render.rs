//! Table rendering
//!
//! Turns the interpreted query result into text: an aliased, upper-cased
//! header and one stringified record per row. The cells are joined with tabs
//! at this level; column padding and width computation are delegated to
//! `tabled`, which gets the cells with a minimum two-space column gap.

use fe2o3_amqp_types::primitives::Value;
use tabled::builder::Builder;
use tabled::settings::{Padding, Style};

use crate::mgmt::query::AttributeSelection;
use crate::mgmt::response::QueryResult;

/// Generic textual form of an AMQP value. Scalars render in their natural
/// display form, null as empty; anything nested falls back to its debug form.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(v) => v.to_string(),
        Value::Ubyte(v) => v.to_string(),
        Value::Ushort(v) => v.to_string(),
        Value::Uint(v) => v.to_string(),
        Value::Ulong(v) => v.to_string(),
        Value::Byte(v) => v.to_string(),
        Value::Short(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Long(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Double(v) => v.to_string(),
        Value::Char(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Symbol(v) => v.0.clone(),
        other => format!("{other:?}"),
    }
}

/// Header cells for the returned attribute names: each name is aliased via
/// the originally resolved selection (raw name when unmatched) and
/// upper-cased.
pub fn header_cells(names: &[String], selection: &AttributeSelection) -> Vec<String> {
    names
        .iter()
        .map(|name| selection.display_name(name).to_uppercase())
        .collect()
}

/// Row cells: one stringified value per column.
pub fn row_cells(values: &[Value]) -> Vec<String> {
    values.iter().map(stringify).collect()
}

/// The header as one tab-joined line.
pub fn render_header(names: &[String], selection: &AttributeSelection) -> String {
    header_cells(names, selection).join("\t")
}

/// A result row as one tab-joined line.
pub fn render_row(values: &[Value]) -> String {
    row_cells(values).join("\t")
}

/// Render the full result as an aligned table: header first, then rows in
/// server order, columns left-aligned with a two-space minimum gap.
pub fn format_table(result: &QueryResult, selection: &AttributeSelection) -> String {
    let mut builder = Builder::default();
    builder.push_record(header_cells(&result.header, selection));
    for row in &result.rows {
        builder.push_record(row_cells(row));
    }

    let mut table = builder.build();
    table.with(Style::blank()).with(Padding::new(0, 2, 0, 0));

    // tabled pads every column including the last; keep line ends clean.
    table
        .to_string()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the table to stdout.
pub fn print_table(result: &QueryResult, selection: &AttributeSelection) {
    println!("{}", format_table(result, selection));
}
