//! Chart Handle Module
//! Chart handles and the registry that owns them.

use std::collections::HashMap;

use crate::charts::SeriesPayload;

/// A live, mutable reference to a rendered chart. Implementations hold
/// whatever the backing chart library needs; the dispatcher only ever
/// replaces the series configuration.
pub trait ChartHandle {
    /// Replace the chart's series configuration wholesale.
    fn set_series(&mut self, payload: SeriesPayload);
}

/// Stable keys for every chart on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    // Survey analysis charts
    Histogram,
    WordCloud,
    Pie,
    Bar,
    // Population statistics charts
    AgeGroups,
    GenderDistribution,
    MaritalStatus,
    Hobbies,
    EducationIncome,
}

impl ChartKind {
    pub const ALL: [ChartKind; 9] = [
        ChartKind::Histogram,
        ChartKind::WordCloud,
        ChartKind::Pie,
        ChartKind::Bar,
        ChartKind::AgeGroups,
        ChartKind::GenderDistribution,
        ChartKind::MaritalStatus,
        ChartKind::Hobbies,
        ChartKind::EducationIncome,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Histogram => "Response Distribution",
            ChartKind::WordCloud => "Word Cloud",
            ChartKind::Pie => "Choice Distribution",
            ChartKind::Bar => "Mean Rank",
            ChartKind::AgeGroups => "Age Groups",
            ChartKind::GenderDistribution => "Gender Distribution",
            ChartKind::MaritalStatus => "Marital Status",
            ChartKind::Hobbies => "Hobbies",
            ChartKind::EducationIncome => "Education / Income",
        }
    }

    /// Stable file-name key, used for chart exports.
    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::Histogram => "histogram",
            ChartKind::WordCloud => "word_cloud",
            ChartKind::Pie => "pie_chart",
            ChartKind::Bar => "bar_chart",
            ChartKind::AgeGroups => "age_groups",
            ChartKind::GenderDistribution => "gender_distribution",
            ChartKind::MaritalStatus => "marital_status",
            ChartKind::Hobbies => "hobbies",
            ChartKind::EducationIncome => "education_income",
        }
    }

    pub fn is_population(self) -> bool {
        matches!(
            self,
            ChartKind::AgeGroups
                | ChartKind::GenderDistribution
                | ChartKind::MaritalStatus
                | ChartKind::Hobbies
                | ChartKind::EducationIncome
        )
    }
}

/// Explicit registry mapping chart kinds to live handles. Owned by the
/// application's composition root; handles are created once at startup and
/// mutated in place on each update.
pub struct ChartRegistry<H> {
    handles: HashMap<ChartKind, H>,
}

impl<H> Default for ChartRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ChartRegistry<H> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    pub fn insert(&mut self, kind: ChartKind, handle: H) {
        self.handles.insert(kind, handle);
    }

    pub fn get(&self, kind: ChartKind) -> Option<&H> {
        self.handles.get(&kind)
    }

    pub fn get_mut(&mut self, kind: ChartKind) -> Option<&mut H> {
        self.handles.get_mut(&kind)
    }

    pub fn contains(&self, kind: ChartKind) -> bool {
        self.handles.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<H: ChartHandle> ChartRegistry<H> {
    /// Apply a payload to the chart of the given kind. A missing handle is
    /// a no-op scoped to that chart; returns whether a handle was updated.
    pub fn apply(&mut self, kind: ChartKind, payload: SeriesPayload) -> bool {
        match self.handles.get_mut(&kind) {
            Some(handle) => {
                handle.set_series(payload);
                true
            }
            None => false,
        }
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

    #[test]
    fn apply_updates_only_the_registered_handle() {
        let mut registry = ChartRegistry::new();
        registry.insert(ChartKind::Pie, Recorder::default());

        let payload = SeriesPayload::Slices(vec![]);
        assert!(registry.apply(ChartKind::Pie, payload.clone()));
        assert!(!registry.apply(ChartKind::Histogram, payload));

        assert!(registry.get(ChartKind::Pie).unwrap().last.is_some());
        assert_eq!(registry.len(), 1);
    }
}
