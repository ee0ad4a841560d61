//! Charts module - dispatch, payloads, and rendering backends

mod dispatcher;
mod handle;
mod plotter;
mod population;
mod renderer;
mod series;

pub use dispatcher::{
    categorical_payload, dispatch, sample_term_color, slice_payload, update_survey_charts,
    word_cloud_payload,
};
pub use handle::{ChartHandle, ChartKind, ChartRegistry};
pub use plotter::{ChartPlotter, PanelChart, PALETTE};
pub use population::{update_population_charts, PopulationStats};
pub use renderer::{RenderError, StaticChartRenderer};
pub use series::{HeatmapGrid, NamedValue, SeriesPayload, WeightedTerm};
