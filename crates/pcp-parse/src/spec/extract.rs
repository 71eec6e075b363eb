//! Extraction of one numeric sequence from a dataset

use pcp_data::Dataset;

use crate::{ParseError, SpecKind};

/// Maps a dataset to one value per sample
pub trait Extract: Send + Sync {
    fn extract(&self, dataset: &Dataset) -> anyhow::Result<Vec<f64>>;
}

impl<F> Extract for F
where
    F: Fn(&Dataset) -> anyhow::Result<Vec<f64>> + Send + Sync,
{
    fn extract(&self, dataset: &Dataset) -> anyhow::Result<Vec<f64>> {
        self(dataset)
    }
}

/// Extractor reading a named field as is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field(pub String);

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Extract for Field {
    fn extract(&self, dataset: &Dataset) -> anyhow::Result<Vec<f64>> {
        Ok(dataset.field(&self.0)?.to_vec())
    }
}

/// Run an extractor and check it produced one value per sample
pub(crate) fn extract_checked(
    kind: SpecKind,
    name: &str,
    extract: &dyn Extract,
    dataset: &Dataset,
) -> Result<Vec<f64>, ParseError> {
    let values = extract.extract(dataset).map_err(|source| ParseError::Extract {
        kind,
        name: name.to_string(),
        source,
    })?;

    if values.len() != dataset.len() {
        return Err(ParseError::ExtractLength {
            kind,
            name: name.to_string(),
            expected: dataset.len(),
            actual: values.len(),
        });
    }
    Ok(values)
}
