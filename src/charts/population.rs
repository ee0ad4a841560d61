//! Population Charts Module
//! Population-statistics payloads and their chart updates.

use serde::Deserialize;

use crate::charts::{ChartHandle, ChartKind, ChartRegistry, HeatmapGrid, NamedValue, SeriesPayload};

/// Demographic breakdown of the surveyed population, as carried by the
/// `population` section of a results export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PopulationStats {
    #[serde(default)]
    pub age_groups: Vec<NamedValue>,
    #[serde(default)]
    pub gender_distribution: Vec<NamedValue>,
    #[serde(default)]
    pub marital_status: Vec<NamedValue>,
    #[serde(default)]
    pub hobbies: Vec<NamedValue>,
    /// Sorted education levels, indexed by the first element of each
    /// `education_income` cell.
    #[serde(default)]
    pub education_levels: Vec<String>,
    /// Sorted income levels, indexed by the second element of each cell.
    #[serde(default)]
    pub income_levels: Vec<String>,
    /// `(education_index, income_index, count)` cross-tabulation cells.
    #[serde(default)]
    pub education_income: Vec<(usize, usize, i64)>,
}

impl PopulationStats {
    /// The education/income cross tabulation as a heatmap payload, with the
    /// color scale anchored at the largest cell count.
    pub fn education_income_grid(&self) -> HeatmapGrid {
        let max = self
            .education_income
            .iter()
            .map(|&(_, _, count)| count)
            .max()
            .unwrap_or(0);
        HeatmapGrid {
            x_labels: self.education_levels.clone(),
            y_labels: self.income_levels.clone(),
            cells: self.education_income.clone(),
            max,
        }
    }
}

/// Replace every population chart's series from the given breakdown.
/// Missing handles are per-chart no-ops, same as the survey dispatcher.
pub fn update_population_charts<H: ChartHandle>(
    registry: &mut ChartRegistry<H>,
    stats: &PopulationStats,
) {
    registry.apply(
        ChartKind::AgeGroups,
        SeriesPayload::Slices(stats.age_groups.clone()),
    );
    registry.apply(
        ChartKind::GenderDistribution,
        SeriesPayload::Slices(stats.gender_distribution.clone()),
    );
    registry.apply(
        ChartKind::MaritalStatus,
        SeriesPayload::Slices(stats.marital_status.clone()),
    );
    registry.apply(ChartKind::Hobbies, hobby_payload(&stats.hobbies));
    registry.apply(
        ChartKind::EducationIncome,
        SeriesPayload::Heatmap(stats.education_income_grid()),
    );
}

/// Hobby counts as a bar payload, export order preserved.
fn hobby_payload(hobbies: &[NamedValue]) -> SeriesPayload {
    SeriesPayload::Categorical {
        labels: hobbies.iter().map(|h| h.name.clone()).collect(),
        values: hobbies.iter().map(|h| h.value).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        last: Option<SeriesPayload>,
    }

    impl ChartHandle for Recorder {
        fn set_series(&mut self, payload: SeriesPayload) {
            self.last = Some(payload);
        }
    }

    fn stats() -> PopulationStats {
        PopulationStats {
            age_groups: vec![NamedValue::new("20-29", 14), NamedValue::new("30-39", 9)],
            gender_distribution: vec![NamedValue::new("Female", 12)],
            marital_status: vec![NamedValue::new("Single", 8)],
            hobbies: vec![NamedValue::new("Reading", 5), NamedValue::new("Hiking", 3)],
            education_levels: vec!["High School".into(), "Bachelor".into()],
            income_levels: vec!["Low".into(), "High".into()],
            education_income: vec![(0, 0, 3), (1, 0, 1), (1, 1, 8)],
        }
    }

    #[test]
    fn heatmap_grid_anchors_color_scale_at_max_cell() {
        let grid = stats().education_income_grid();
        assert_eq!(grid.max, 8);
        assert_eq!(grid.x_labels.len(), 2);
        assert_eq!(grid.cells.len(), 3);
    }

    #[test]
    fn empty_cross_tab_has_zero_max() {
        assert_eq!(PopulationStats::default().education_income_grid().max, 0);
    }

    #[test]
    fn update_fills_every_registered_population_chart() {
        let mut registry = ChartRegistry::new();
        for kind in ChartKind::ALL.into_iter().filter(|k| k.is_population()) {
            registry.insert(kind, Recorder::default());
        }

        update_population_charts(&mut registry, &stats());

        let hobby = registry.get(ChartKind::Hobbies).unwrap().last.clone();
        assert_eq!(
            hobby,
            Some(SeriesPayload::Categorical {
                labels: vec!["Reading".to_string(), "Hiking".to_string()],
                values: vec![5, 3],
            })
        );
        for kind in ChartKind::ALL.into_iter().filter(|k| k.is_population()) {
            assert!(registry.get(kind).unwrap().last.is_some(), "{kind:?}");
        }
    }

    #[test]
    fn missing_population_handle_is_scoped_no_op() {
        let mut registry = ChartRegistry::new();
        registry.insert(ChartKind::AgeGroups, Recorder::default());

        update_population_charts(&mut registry, &stats());

        let slices = registry.get(ChartKind::AgeGroups).unwrap().last.clone();
        assert_eq!(
            slices,
            Some(SeriesPayload::Slices(vec![
                NamedValue::new("20-29", 14),
                NamedValue::new("30-39", 9),
            ]))
        );
    }
}
