use crate::processor::IngestionError;
use smartreco_core::model::{InteractionRecord, ProductAttributes, ProductRecord};
use std::io::Read;

const INTERACTION_FIELDS: usize = 2;
const PRODUCT_FIELDS: usize = 4;

/// CSV reader shared by every source: header skipped, fields trimmed, and
/// short rows let through so they can be reported with their row index.
pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Parse every interaction row of `reader`, failing on the first malformed one.
///
/// Rows are `(user, product, ...)`; trailing columns such as timestamps are
/// ignored.
pub fn read_interactions<R: Read>(
    source_name: &str,
    reader: R,
) -> Result<Vec<InteractionRecord>, IngestionError> {
    let mut csv = csv_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv.records().enumerate() {
        let row_number = index + 1;
        let row = row.map_err(|error| IngestionError::Csv {
            source_name: source_name.to_string(),
            error,
        })?;
        records.push(parse_interaction(source_name, row_number, &row)?);
    }

    Ok(records)
}

/// Parse every product row of `reader`: `(product, category, price_range, brand, ...)`.
pub fn read_products<R: Read>(
    source_name: &str,
    reader: R,
) -> Result<Vec<ProductRecord>, IngestionError> {
    let mut csv = csv_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv.records().enumerate() {
        let row_number = index + 1;
        let row = row.map_err(|error| IngestionError::Csv {
            source_name: source_name.to_string(),
            error,
        })?;
        records.push(parse_product(source_name, row_number, &row)?);
    }

    Ok(records)
}

fn parse_interaction(
    source_name: &str,
    row_number: usize,
    row: &csv::StringRecord,
) -> Result<InteractionRecord, IngestionError> {
    ensure_field_count(source_name, row_number, row, INTERACTION_FIELDS)?;
    let user = required_field(source_name, row_number, row, 0, "user id")?;
    let product = required_field(source_name, row_number, row, 1, "product id")?;
    Ok(InteractionRecord::new(user, product))
}

fn parse_product(
    source_name: &str,
    row_number: usize,
    row: &csv::StringRecord,
) -> Result<ProductRecord, IngestionError> {
    ensure_field_count(source_name, row_number, row, PRODUCT_FIELDS)?;
    let product = required_field(source_name, row_number, row, 0, "product id")?;
    let attributes = ProductAttributes::new(&row[1], &row[2], &row[3]);
    Ok(ProductRecord::new(product, attributes))
}

fn ensure_field_count(
    source_name: &str,
    row_number: usize,
    row: &csv::StringRecord,
    expected: usize,
) -> Result<(), IngestionError> {
    if row.len() < expected {
        return Err(IngestionError::Malformed {
            source_name: source_name.to_string(),
            row: row_number,
            reason: format!("expected at least {} fields, found {}", expected, row.len()),
        });
    }
    Ok(())
}

fn required_field<'r>(
    source_name: &str,
    row_number: usize,
    row: &'r csv::StringRecord,
    position: usize,
    label: &str,
) -> Result<&'r str, IngestionError> {
    match row.get(position) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(IngestionError::Malformed {
            source_name: source_name.to_string(),
            row: row_number,
            reason: format!("empty {}", label),
        }),
    }
}
