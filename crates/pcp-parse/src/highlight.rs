//! Highlight resolution

use pcp_core::report::{Diagnostic, HighlightSummary, Reporter};
use pcp_data::Dataset;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use tracing::debug;

use crate::palette::ColorTag;
use crate::spec::HighlightSpec;
use crate::ParseError;

/// Indices of highlighted samples in the filtered and sorted dataset
///
/// The same sample may appear under several names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightBlock {
    pub indices: Vec<usize>,
    pub colors: Vec<ColorTag>,
    pub names: Vec<String>,
}

impl HighlightBlock {
    pub fn count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// `(name, index, color)` per highlight, in spec order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, &ColorTag)> {
        self.names
            .iter()
            .zip(&self.indices)
            .zip(&self.colors)
            .map(|((name, &index), color)| (name.as_str(), index, color))
    }
}

// Serialized with its count so persisted results carry it alongside the lists.
impl Serialize for HighlightBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("HighlightBlock", 4)?;
        state.serialize_field("count", &self.count())?;
        state.serialize_field("indices", &self.indices)?;
        state.serialize_field("colors", &self.colors)?;
        state.serialize_field("names", &self.names)?;
        state.end()
    }
}

/// Resolve every highlight against the current sample order
pub fn resolve_highlights(
    dataset: &Dataset,
    specs: &[HighlightSpec],
    reporter: &dyn Reporter,
) -> Result<HighlightBlock, ParseError> {
    let mut block = HighlightBlock::default();

    for spec in specs {
        let index = spec.select.select(dataset).map_err(|source| ParseError::Select {
            name: spec.name.clone(),
            source,
        })?;

        if index >= dataset.len() {
            return Err(ParseError::HighlightOutOfRange {
                name: spec.name.clone(),
                index,
                len: dataset.len(),
            });
        }
        debug!(name = %spec.name, index, "highlight resolved");

        reporter.report(&Diagnostic::Highlight(HighlightSummary {
            name: spec.name.clone(),
            color: spec.color.to_string(),
            index,
        }));

        block.indices.push(index);
        block.colors.push(spec.color.clone());
        block.names.push(spec.name.clone());
    }

    Ok(block)
}
