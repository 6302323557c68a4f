//! Response shaping: merging validated records and projecting them
//! through output schemas

use super::types::{ObjectSchema, Record};

/// Merges records in the given order.
///
/// Later records overwrite earlier values for the same key; key order
/// is first-seen.
pub fn merge(records: &[Record]) -> Record {
    let mut merged = Record::new();
    for record in records {
        for (name, value) in record.iter() {
            merged.insert(name.clone(), value.clone());
        }
    }
    merged
}

/// Projects a record through an output schema.
///
/// Only fields the output schema declares are copied, in output-schema
/// order. Everything else is dropped, so a source record holding
/// credentials never leaks them through a narrower output schema.
/// Optional output fields absent from the source are skipped.
///
/// # Panics
///
/// Panics if a required output field is absent from the source. Output
/// schemas must declare a subset of what their source schema produces,
/// so a miss is a programming defect.
pub fn project(record: &Record, output: &ObjectSchema) -> Record {
    let mut projected = Record::new();
    for field in &output.fields {
        match record.get(&field.name) {
            Some(value) => projected.insert(field.name.clone(), value.clone()),
            None if field.required => panic!(
                "projection through '{}' misses required field '{}'",
                output.name, field.name
            ),
            None => {}
        }
    }
    projected
}
