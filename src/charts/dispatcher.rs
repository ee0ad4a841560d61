//! Response Chart Dispatcher Module
//! Routes survey response records to the chart matching their schema.

use rand::Rng;
use tracing::{error, warn};

use crate::charts::{
    ChartHandle, ChartKind, ChartRegistry, NamedValue, SeriesPayload, WeightedTerm,
};
use crate::data::{ResponseRecord, SchemaTag};

/// Update the survey-analysis charts for one question's records.
///
/// Dispatches on the wire schema tag: scale questions feed the histogram,
/// open-ended questions the word cloud, multiple-choice and yes/no
/// questions the pie, ranking questions the bar chart. An unrecognized tag
/// logs one error and mutates nothing; faults never propagate to the
/// caller. Empty records produce an empty-series update.
pub fn update_survey_charts<H, R>(
    registry: &mut ChartRegistry<H>,
    records: &[ResponseRecord],
    schema: &str,
    rng: &mut R,
) where
    H: ChartHandle,
    R: Rng + ?Sized,
{
    let tag: SchemaTag = match schema.parse() {
        Ok(tag) => tag,
        Err(err) => {
            error!(%err, "survey charts left untouched");
            return;
        }
    };
    dispatch(registry, records, tag, rng);
}

/// Statically-typed entry point for callers that already hold a `SchemaTag`.
pub fn dispatch<H, R>(
    registry: &mut ChartRegistry<H>,
    records: &[ResponseRecord],
    tag: SchemaTag,
    rng: &mut R,
) where
    H: ChartHandle,
    R: Rng + ?Sized,
{
    match tag {
        SchemaTag::Scale => {
            registry.apply(ChartKind::Histogram, categorical_payload(records));
        }
        SchemaTag::OpenEnded => {
            registry.apply(ChartKind::WordCloud, word_cloud_payload(records, rng));
        }
        SchemaTag::MultipleChoice | SchemaTag::YesNo => {
            registry.apply(ChartKind::Pie, slice_payload(records));
        }
        SchemaTag::Ranking => {
            registry.apply(ChartKind::Bar, categorical_payload(records));
        }
    }
}

/// Parallel label/value sequences for histogram and bar charts, input order
/// preserved. Malformed records are dropped (label and value together) with
/// a warning.
pub fn categorical_payload(records: &[ResponseRecord]) -> SeriesPayload {
    let mut labels = Vec::with_capacity(records.len());
    let mut values = Vec::with_capacity(records.len());
    for record in records {
        match record.parse_response() {
            Some(value) => {
                labels.push(record.item.clone());
                values.push(value);
            }
            None => drop_record(record),
        }
    }
    SeriesPayload::Categorical { labels, values }
}

/// Name/value pairs for pie charts. One slice per record; duplicate items
/// yield duplicate slices.
pub fn slice_payload(records: &[ResponseRecord]) -> SeriesPayload {
    let slices = records
        .iter()
        .filter_map(|record| match record.parse_response() {
            Some(value) => Some(NamedValue::new(record.item.clone(), value)),
            None => {
                drop_record(record);
                None
            }
        })
        .collect();
    SeriesPayload::Slices(slices)
}

/// Weighted terms for the word cloud, one per record. Term colors are drawn
/// from `rng` at transform time, so re-dispatching recolors the cloud.
pub fn word_cloud_payload<R>(records: &[ResponseRecord], rng: &mut R) -> SeriesPayload
where
    R: Rng + ?Sized,
{
    let terms = records
        .iter()
        .filter_map(|record| match record.parse_response() {
            Some(value) => Some(WeightedTerm {
                name: record.item.clone(),
                value,
                color: sample_term_color(rng),
            }),
            None => {
                drop_record(record);
                None
            }
        })
        .collect();
    SeriesPayload::WeightedTerms(terms)
}

/// Three independent uniform channel draws in `[0, 160)`. The cap keeps
/// terms legible against a light background.
pub fn sample_term_color<R>(rng: &mut R) -> [u8; 3]
where
    R: Rng + ?Sized,
{
    [
        rng.random_range(0..160),
        rng.random_range(0..160),
        rng.random_range(0..160),
    ]
}

fn drop_record(record: &ResponseRecord) {
    warn!(
        item = %record.item,
        response = %record.response,
        "dropping record with non-integer response"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    /// Records every payload it receives.
    #[derive(Default)]
    struct Recorder {
        payloads: Vec<SeriesPayload>,
    }

    impl ChartHandle for Recorder {
        fn set_series(&mut self, payload: SeriesPayload) {
            self.payloads.push(payload);
        }
    }

    fn full_registry() -> ChartRegistry<Recorder> {
        let mut registry = ChartRegistry::new();
        for kind in [
            ChartKind::Histogram,
            ChartKind::WordCloud,
            ChartKind::Pie,
            ChartKind::Bar,
        ] {
            registry.insert(kind, Recorder::default());
        }
        registry
    }

    fn update_counts(registry: &ChartRegistry<Recorder>) -> HashMap<ChartKind, usize> {
        [
            ChartKind::Histogram,
            ChartKind::WordCloud,
            ChartKind::Pie,
            ChartKind::Bar,
        ]
        .into_iter()
        .map(|kind| (kind, registry.get(kind).unwrap().payloads.len()))
        .collect()
    }

    fn records(pairs: &[(&str, &str)]) -> Vec<ResponseRecord> {
        pairs
            .iter()
            .map(|(item, response)| ResponseRecord::new(*item, *response))
            .collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn each_tag_routes_to_exactly_one_chart() {
        let expected = [
            ("ScaleSchema", ChartKind::Histogram),
            ("OpenEndedSchema", ChartKind::WordCloud),
            ("MultipleChoiceSchema", ChartKind::Pie),
            ("YesNoSchema", ChartKind::Pie),
            ("RankingSchema", ChartKind::Bar),
        ];
        for (schema, target) in expected {
            let mut registry = full_registry();
            update_survey_charts(
                &mut registry,
                &records(&[("A", "1")]),
                schema,
                &mut rng(),
            );
            for (kind, count) in update_counts(&registry) {
                assert_eq!(count, usize::from(kind == target), "{schema} -> {kind:?}");
            }
        }
    }

    #[test]
    fn unknown_tag_mutates_nothing() {
        let mut registry = full_registry();
        update_survey_charts(
            &mut registry,
            &records(&[("A", "1")]),
            "UnknownType",
            &mut rng(),
        );
        assert!(update_counts(&registry).values().all(|&count| count == 0));
    }

    #[test]
    fn empty_records_produce_an_empty_series_update() {
        let mut registry = full_registry();
        update_survey_charts(&mut registry, &[], "ScaleSchema", &mut rng());
        let payloads = &registry.get(ChartKind::Histogram).unwrap().payloads;
        assert_eq!(
            payloads.as_slice(),
            &[SeriesPayload::Categorical {
                labels: vec![],
                values: vec![]
            }]
        );
    }

    #[test]
    fn missing_handle_is_a_scoped_no_op() {
        let mut registry: ChartRegistry<Recorder> = ChartRegistry::new();
        registry.insert(ChartKind::Pie, Recorder::default());
        // No histogram handle registered; nothing to update, nothing panics.
        update_survey_charts(
            &mut registry,
            &records(&[("A", "1")]),
            "ScaleSchema",
            &mut rng(),
        );
        assert!(registry.get(ChartKind::Pie).unwrap().payloads.is_empty());
    }

    #[test]
    fn categorical_payload_preserves_order_and_length() {
        let input = records(&[("Mon", "3"), ("Tue", "1"), ("Wed", "8"), ("Mon", "2")]);
        let payload = categorical_payload(&input);
        match payload {
            SeriesPayload::Categorical { labels, values } => {
                assert_eq!(labels, vec!["Mon", "Tue", "Wed", "Mon"]);
                assert_eq!(values, vec![3, 1, 8, 2]);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn malformed_records_are_dropped_label_and_value_together() {
        let input = records(&[("Good", "12"), ("Odd", "n/a"), ("Bad", "3")]);
        match categorical_payload(&input) {
            SeriesPayload::Categorical { labels, values } => {
                assert_eq!(labels, vec!["Good", "Bad"]);
                assert_eq!(values, vec![12, 3]);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn pie_slices_keep_duplicates() {
        let input = records(&[("Good", "12"), ("Bad", "3"), ("Good", "5")]);
        assert_eq!(
            slice_payload(&input),
            SeriesPayload::Slices(vec![
                NamedValue::new("Good", 12),
                NamedValue::new("Bad", 3),
                NamedValue::new("Good", 5),
            ])
        );
    }

    #[test]
    fn categorical_and_slice_transforms_are_idempotent() {
        let input = records(&[("Good", "12"), ("Bad", "3")]);
        assert_eq!(categorical_payload(&input), categorical_payload(&input));
        assert_eq!(slice_payload(&input), slice_payload(&input));
    }

    #[test]
    fn word_cloud_emits_one_term_per_record() {
        let input = records(&[("support", "9"), ("slow", "4"), ("support", "9")]);
        match word_cloud_payload(&input, &mut rng()) {
            SeriesPayload::WeightedTerms(terms) => {
                assert_eq!(terms.len(), 3);
                assert_eq!(terms[0].name, "support");
                assert_eq!(terms[0].value, 9);
                assert_eq!(terms[2].name, "support");
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn term_colors_are_capped_and_seed_deterministic() {
        let input = records(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let first = word_cloud_payload(&input, &mut StdRng::seed_from_u64(42));
        let second = word_cloud_payload(&input, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);

        match first {
            SeriesPayload::WeightedTerms(terms) => {
                for term in terms {
                    assert!(term.color.iter().all(|&channel| channel < 160));
                }
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
