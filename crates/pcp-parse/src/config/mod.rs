//! Declarative plot configuration
//!
//! A [`PlotConfig`] names built-in rules and selectors instead of holding
//! closures, so it can be stored as JSON and turned into a [`ParseConfig`].

use pcp_core::{Range, ScaleKind};
use pcp_data::rules::{Identity, KeepAll, KeepWithin, RandomSubset, Reverse, Shuffle, SortByField};
use serde::{Serialize, Deserialize};

use crate::palette::ColorTag;
use crate::pipeline::ParseConfig;
use crate::spec::{ArgMax, ArgMin, ColorSpec, Field, FixedIndex, HighlightSpec, VariableSpec};
use crate::ParseError;

/// Serializable description of a parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotConfig {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub sort: SortConfig,
    pub variables: Vec<VariableConfig>,
    pub color: ColorConfig,
    #[serde(default)]
    pub highlights: Vec<HighlightConfig>,
}

/// One axis; `field` defaults to `name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub range: Range,
    #[serde(default)]
    pub scale: ScaleKind,
    /// Defaults to the palette color at the axis position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorTag>,
}

/// Color axis; `range` lists the colorbar ticks in ascending order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub range: Vec<f64>,
    #[serde(default)]
    pub scale: ScaleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HighlightConfig {
    pub name: String,
    pub selector: SelectorConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorTag>,
}

/// `{"max": field}`, `{"min": field}` or `{"index": i}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorConfig {
    Max(String),
    Min(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterConfig {
    #[default]
    All,
    Within { field: String, lo: f64, hi: f64 },
    Random {
        count: usize,
        #[serde(default)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortConfig {
    #[default]
    Identity,
    Reverse,
    Ascending(String),
    Descending(String),
    Shuffle(Option<u64>),
}

impl PlotConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Turn the description into runtime specs and rules
    pub fn build(&self) -> ParseConfig {
        let color = &self.color;
        let field = color.field.clone().unwrap_or_else(|| color.name.clone());
        let mut config = ParseConfig::new(
            ColorSpec::new(color.name.clone(), Field(field), color.range.clone()).with_scale(color.scale),
        );

        config = match &self.filter {
            FilterConfig::All => config.with_filter(KeepAll),
            FilterConfig::Within { field, lo, hi } => config.with_filter(KeepWithin::new(field.clone(), *lo, *hi)),
            FilterConfig::Random { count, seed } => config.with_filter(RandomSubset { count: *count, seed: *seed }),
        };

        config = match &self.sort {
            SortConfig::Identity => config.with_sort(Identity),
            SortConfig::Reverse => config.with_sort(Reverse),
            SortConfig::Ascending(field) => config.with_sort(SortByField::ascending(field.clone())),
            SortConfig::Descending(field) => config.with_sort(SortByField::descending(field.clone())),
            SortConfig::Shuffle(seed) => config.with_sort(Shuffle { seed: *seed }),
        };

        for (i, variable) in self.variables.iter().enumerate() {
            let field = variable.field.clone().unwrap_or_else(|| variable.name.clone());
            let spec = VariableSpec::new(variable.name.clone(), Field(field), variable.range)
                .with_scale(variable.scale)
                .with_color(variable.color.clone().unwrap_or_else(|| ColorTag::palette(i)));
            config = config.with_variable(spec);
        }

        for highlight in &self.highlights {
            let color = highlight.color.clone().unwrap_or_default();
            let spec = match &highlight.selector {
                SelectorConfig::Max(field) => HighlightSpec::new(highlight.name.clone(), ArgMax(field.clone()), color),
                SelectorConfig::Min(field) => HighlightSpec::new(highlight.name.clone(), ArgMin(field.clone()), color),
                SelectorConfig::Index(index) => HighlightSpec::new(highlight.name.clone(), FixedIndex(*index), color),
            };
            config = config.with_highlight(spec);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "filter": {"within": {"field": "mass", "lo": 0.0, "hi": 10.0}},
        "sort": {"descending": "cost"},
        "variables": [
            {"name": "mass", "range": [0.0, 10.0], "color": "red"},
            {"name": "log cost", "field": "cost", "range": [1.0, 1000.0], "scale": "log"}
        ],
        "color": {"name": "cost", "range": [0.0, 500.0, 1000.0]},
        "highlights": [
            {"name": "cheapest", "selector": {"min": "cost"}, "color": [0, 200, 0]}
        ]
    }"#;

    #[test]
    fn test_parse_config_file() {
        let config = PlotConfig::from_json_str(CONFIG).unwrap();

        assert_eq!(config.filter, FilterConfig::Within { field: "mass".to_string(), lo: 0.0, hi: 10.0 });
        assert_eq!(config.sort, SortConfig::Descending("cost".to_string()));
        assert_eq!(config.variables[1].field.as_deref(), Some("cost"));
        assert_eq!(config.variables[1].scale, ScaleKind::Logarithmic);
        assert_eq!(config.variables[0].range, Range::new(0.0, 10.0));
        assert_eq!(config.highlights[0].selector, SelectorConfig::Min("cost".to_string()));
    }

    #[test]
    fn test_defaults() {
        let config = PlotConfig::from_json_str(
            r#"{"variables": [], "color": {"name": "c", "range": [0, 1]}}"#,
        )
        .unwrap();

        assert_eq!(config.filter, FilterConfig::All);
        assert_eq!(config.sort, SortConfig::Identity);
        assert!(config.highlights.is_empty());
        assert_eq!(config.color.scale, ScaleKind::Linear);
    }

    #[test]
    fn test_json_round_trip() {
        let config = PlotConfig::from_json_str(CONFIG).unwrap();
        let json = config.to_json_string().unwrap();
        assert_eq!(PlotConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = PlotConfig::from_json_str(
            r#"{"variables": [], "color": {"name": "c", "range": [0, 1]}, "colour": {}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::Config(_)));
    }

    #[test]
    fn test_build() {
        let built = PlotConfig::from_json_str(CONFIG).unwrap().build();

        assert_eq!(built.variables.len(), 2);
        assert_eq!(built.variables[0].color, ColorTag::from("red"));
        assert_eq!(built.variables[1].color, ColorTag::palette(1));
        assert_eq!(built.variables[1].scale, ScaleKind::Logarithmic);
        assert_eq!(built.color.ticks, vec![0.0, 500.0, 1000.0]);
        assert_eq!(built.highlights[0].name, "cheapest");
    }
}
