//! Conversion from Arrow record batches

use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use tracing::debug;

use super::Dataset;
use crate::DataError;

impl Dataset {
    /// Build a dataset from every numeric column of a record batch
    ///
    /// Non-numeric columns are skipped. Numeric columns with nulls are
    /// rejected, and so are Int64 values beyond +/-2^53, which would lose
    /// precision as f64.
    pub fn from_record_batch(batch: &RecordBatch) -> Result<Self, DataError> {
        let schema = batch.schema();
        let mut dataset = Dataset::new(batch.num_rows());

        for (field, column) in schema.fields().iter().zip(batch.columns()) {
            if !is_numeric(column.data_type()) {
                debug!(column = %field.name(), data_type = %column.data_type(), "skipping non-numeric column");
                continue;
            }
            dataset.insert_field(field.name().as_str(), column_values(field.name(), column.as_ref())?)?;
        }

        Ok(dataset)
    }

    /// Build a dataset from the named columns of a record batch
    pub fn from_record_batch_columns(batch: &RecordBatch, columns: &[&str]) -> Result<Self, DataError> {
        let mut dataset = Dataset::new(batch.num_rows());

        for &name in columns {
            let column = batch.column_by_name(name).ok_or_else(|| DataError::MissingField {
                field: name.to_string(),
            })?;
            dataset.insert_field(name, column_values(name, column.as_ref())?)?;
        }

        Ok(dataset)
    }
}

fn is_numeric(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Float64 | DataType::Float32 | DataType::Int64 | DataType::Int32
    )
}

/// Beyond this magnitude not every integer has an exact f64
const MAX_EXACT_INTEGER: i64 = 1 << 53;

fn exact_integers(name: &str, values: &[i64]) -> Result<Vec<f64>, DataError> {
    values
        .iter()
        .map(|&value| match value.checked_abs() {
            Some(abs) if abs <= MAX_EXACT_INTEGER => Ok(value as f64),
            _ => Err(DataError::InexactInteger {
                field: name.to_string(),
                value,
            }),
        })
        .collect()
}

fn column_values(name: &str, column: &dyn Array) -> Result<Vec<f64>, DataError> {
    if column.null_count() > 0 {
        return Err(DataError::NullValues {
            field: name.to_string(),
            count: column.null_count(),
        });
    }

    let any = column.as_any();
    let values = match column.data_type() {
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| a.values().iter().copied().collect()),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.values().iter().map(|&v| v as f64).collect()),
        DataType::Int64 => match any.downcast_ref::<Int64Array>() {
            Some(a) => Some(exact_integers(name, a.values())?),
            None => None,
        },
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| a.values().iter().map(|&v| v as f64).collect()),
        _ => None,
    };

    values.ok_or_else(|| DataError::UnsupportedColumn {
        field: name.to_string(),
        data_type: column.data_type().to_string(),
    })
}
