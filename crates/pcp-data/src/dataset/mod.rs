//! Struct-of-arrays dataset keyed by field name

mod record_batch;

use indexmap::IndexMap;

use crate::DataError;

/// Named numeric fields sharing one sample count
///
/// Every field holds exactly [`Dataset::len`] values and names are unique.
/// Field order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    fields: IndexMap<String, Vec<f64>>,
    len: usize,
}

impl Dataset {
    /// Create an empty dataset expecting `len` samples per field
    pub fn new(len: usize) -> Self {
        Self {
            fields: IndexMap::new(),
            len,
        }
    }

    /// Build a dataset from `(name, values)` pairs
    ///
    /// The sample count is taken from the first field; no fields means zero
    /// samples.
    pub fn from_fields<I, S>(fields: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut fields = fields.into_iter().peekable();
        let len = fields.peek().map(|(_, values)| values.len()).unwrap_or(0);

        let mut dataset = Self::new(len);
        for (name, values) in fields {
            dataset.insert_field(name, values)?;
        }
        Ok(dataset)
    }

    /// Add a field, checking its length and name uniqueness
    pub fn insert_field(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<(), DataError> {
        let name = name.into();

        if values.len() != self.len {
            return Err(DataError::FieldLength {
                field: name,
                expected: self.len,
                actual: values.len(),
            });
        }
        if self.fields.contains_key(&name) {
            return Err(DataError::DuplicateField { field: name });
        }

        self.fields.insert(name, values);
        Ok(())
    }

    /// Builder form of [`Dataset::insert_field`]
    pub fn with_field(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self, DataError> {
        self.insert_field(name, values)?;
        Ok(self)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Values of a field, failing clearly when it does not exist
    pub fn field(&self, name: &str) -> Result<&[f64], DataError> {
        self.get(name).ok_or_else(|| DataError::MissingField {
            field: name.to_string(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.fields.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Keep the samples whose mask entry is true, preserving their order
    pub fn filter(&self, mask: &[bool]) -> Result<Dataset, DataError> {
        if mask.len() != self.len {
            return Err(DataError::MaskLength {
                expected: self.len,
                actual: mask.len(),
            });
        }

        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter(|(_, &keep)| keep)
            .map(|(i, _)| i)
            .collect();

        Ok(self.take(&indices))
    }

    /// New dataset made of the given samples, in the given order
    ///
    /// Indices may repeat.
    pub fn select(&self, indices: &[usize]) -> Result<Dataset, DataError> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.len) {
            return Err(DataError::IndexOutOfRange { index, len: self.len });
        }
        Ok(self.take(indices))
    }

    /// Gather without bounds validation; callers check indices first
    pub(crate) fn take(&self, indices: &[usize]) -> Dataset {
        let fields = self
            .fields
            .iter()
            .map(|(name, values)| {
                let taken = indices.iter().map(|&i| values[i]).collect();
                (name.clone(), taken)
            })
            .collect();

        Dataset {
            fields,
            len: indices.len(),
        }
    }
}
