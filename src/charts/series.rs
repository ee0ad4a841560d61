//! Series Payload Module
//! The reshaped data structures consumed by the chart backends.

use serde::{Deserialize, Serialize};

/// One pie slice or named counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: i64,
}

impl NamedValue {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One word-cloud term with its render color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedTerm {
    pub name: String,
    pub value: i64,
    pub color: [u8; 3],
}

/// An education-by-income style cross tabulation: category labels on both
/// axes and `(x_index, y_index, count)` cells. `max` is the largest cell
/// count and anchors the color scale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeatmapGrid {
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    pub cells: Vec<(usize, usize, i64)>,
    pub max: i64,
}

/// A chart's full series configuration. Applying a payload to a handle
/// replaces the previous configuration wholesale; there is no incremental
/// merge.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesPayload {
    /// Parallel ordered label/value sequences for histogram and bar charts.
    Categorical {
        labels: Vec<String>,
        values: Vec<i64>,
    },
    /// Name/value pairs for pie charts. Duplicate names stay duplicated.
    Slices(Vec<NamedValue>),
    /// Weighted, colored terms for word clouds.
    WeightedTerms(Vec<WeightedTerm>),
    /// Cross-tabulated counts for heatmaps.
    Heatmap(HeatmapGrid),
}

impl SeriesPayload {
    /// Number of data points carried by the payload.
    pub fn len(&self) -> usize {
        match self {
            SeriesPayload::Categorical { values, .. } => values.len(),
            SeriesPayload::Slices(slices) => slices.len(),
            SeriesPayload::WeightedTerms(terms) => terms.len(),
            SeriesPayload::Heatmap(grid) => grid.cells.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
