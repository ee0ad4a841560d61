//! Answer Summarizer Module
//! Aggregates raw per-respondent answers into chartable response records.

use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::warn;

use crate::data::{RawAnswer, ResponseRecord, SchemaTag, SurveyDocument};

/// Word-cloud size cap: only the 30 most frequent words are charted.
pub const TOP_WORDS: usize = 30;

/// Common English stop words plus survey-specific filler terms.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her", "was", "one", "our",
    "out", "has", "have", "had", "this", "that", "with", "they", "them", "then", "than", "there",
    "their", "what", "when", "which", "would", "could", "should", "will", "just", "very", "from",
    "about", "into", "more", "most", "some", "such", "were", "been", "being", "because", "while",
    "survey", "question", "answer", "think", "feel", "believe", "opinion",
];

/// Summarize one question's raw answers according to its schema.
pub fn records_for(tag: SchemaTag, answers: &[RawAnswer]) -> Vec<ResponseRecord> {
    match tag {
        SchemaTag::Scale | SchemaTag::MultipleChoice | SchemaTag::YesNo => {
            frequency_records(answers)
        }
        SchemaTag::OpenEnded => word_frequency_records(answers),
        SchemaTag::Ranking => mean_rank_records(answers),
    }
}

/// Fill in `responses` for every question that only carries raw answers.
/// Questions are independent, so they summarize in parallel.
pub fn normalize_document(document: &mut SurveyDocument) {
    document.questions.par_iter_mut().for_each(|question| {
        if !question.responses.is_empty() || question.answers.is_empty() {
            return;
        }
        match question.schema.parse::<SchemaTag>() {
            Ok(tag) => question.responses = records_for(tag, &question.answers),
            Err(err) => warn!(%err, question = %question.text, "cannot summarize answers"),
        }
    });
}

/// Count occurrences per distinct answer, ordered by answer label
/// (numerically when every label is a number, as with scale ratings).
pub fn frequency_records(answers: &[RawAnswer]) -> Vec<ResponseRecord> {
    let mut counts: HashMap<String, i64> = HashMap::new();
    for answer in answers {
        let label = match answer {
            RawAnswer::Rating(rating) => rating.to_string(),
            RawAnswer::Text(text) => text.clone(),
            RawAnswer::Ranked(_) => continue,
        };
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut entries: Vec<(String, i64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| label_order(&a.0, &b.0));
    entries
        .into_iter()
        .map(|(label, count)| ResponseRecord::new(label, count.to_string()))
        .collect()
}

/// Top words across all free-text answers: lowercase alphabetic tokens
/// longer than two characters, stop words removed, most frequent first.
pub fn word_frequency_records(answers: &[RawAnswer]) -> Vec<ResponseRecord> {
    let mut counts: HashMap<String, i64> = HashMap::new();
    for answer in answers {
        let RawAnswer::Text(text) = answer else {
            continue;
        };
        for token in text.to_lowercase().split(|c: char| !c.is_alphabetic()) {
            if token.len() > 2 && !STOP_WORDS.contains(&token) {
                *counts.entry(token.to_string()).or_insert(0) += 1;
            }
        }
    }

    let mut entries: Vec<(String, i64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(TOP_WORDS);
    entries
        .into_iter()
        .map(|(word, count)| ResponseRecord::new(word, count.to_string()))
        .collect()
}

/// Average 1-based position per ranked item, rounded to the nearest
/// integer, best-ranked (lowest mean) first.
pub fn mean_rank_records(answers: &[RawAnswer]) -> Vec<ResponseRecord> {
    let mut positions: HashMap<String, (i64, i64)> = HashMap::new();
    for answer in answers {
        let RawAnswer::Ranked(ranking) = answer else {
            continue;
        };
        for (index, item) in ranking.iter().enumerate() {
            let entry = positions.entry(item.clone()).or_insert((0, 0));
            entry.0 += index as i64 + 1;
            entry.1 += 1;
        }
    }

    let mut entries: Vec<(String, f64)> = positions
        .into_iter()
        .map(|(item, (sum, count))| (item, sum as f64 / count as f64))
        .collect();
    entries.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    entries
        .into_iter()
        .map(|(item, mean)| ResponseRecord::new(item, (mean.round() as i64).to_string()))
        .collect()
}

fn label_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Question;

    fn texts(values: &[&str]) -> Vec<RawAnswer> {
        values.iter().map(|v| RawAnswer::Text(v.to_string())).collect()
    }

    #[test]
    fn frequency_counts_ratings_in_numeric_order() {
        let answers: Vec<RawAnswer> = [2, 10, 2, 1, 10, 2].iter().map(|&r| RawAnswer::Rating(r)).collect();
        let records = frequency_records(&answers);
        assert_eq!(
            records,
            vec![
                ResponseRecord::new("1", "1"),
                ResponseRecord::new("2", "3"),
                ResponseRecord::new("10", "2"),
            ]
        );
    }

    #[test]
    fn frequency_counts_choices_in_label_order() {
        let records = frequency_records(&texts(&["Yes", "No", "Yes", "Yes"]));
        assert_eq!(
            records,
            vec![ResponseRecord::new("No", "1"), ResponseRecord::new("Yes", "3")]
        );
    }

    #[test]
    fn word_frequency_filters_stop_and_short_words() {
        let records = word_frequency_records(&texts(&[
            "The support team is great, support rocks!",
            "I think the support was slow...",
        ]));
        assert_eq!(records[0], ResponseRecord::new("support", "3"));
        let words: Vec<&str> = records.iter().map(|r| r.item.as_str()).collect();
        assert!(!words.contains(&"the"), "stop word leaked: {words:?}");
        assert!(!words.contains(&"think"), "survey filler leaked: {words:?}");
        assert!(!words.contains(&"is"), "short word leaked: {words:?}");
    }

    #[test]
    fn word_frequency_is_capped() {
        let many: Vec<String> = (0..50).map(|i| format!("unique{i:02}word")).collect();
        let answers = texts(&[many.join(" ").as_str()]);
        assert_eq!(word_frequency_records(&answers).len(), TOP_WORDS);
    }

    #[test]
    fn mean_rank_averages_one_based_positions() {
        let answers = vec![
            RawAnswer::Ranked(vec!["Search".into(), "Export".into(), "Themes".into()]),
            RawAnswer::Ranked(vec!["Export".into(), "Search".into(), "Themes".into()]),
        ];
        let records = mean_rank_records(&answers);
        // Search and Export both average 1.5 -> rounds to 2; Themes averages 3.
        assert_eq!(
            records,
            vec![
                ResponseRecord::new("Export", "2"),
                ResponseRecord::new("Search", "2"),
                ResponseRecord::new("Themes", "3"),
            ]
        );
    }

    #[test]
    fn normalize_fills_only_questions_without_records() {
        let mut document = SurveyDocument {
            title: "T".into(),
            questions: vec![
                Question {
                    text: "raw".into(),
                    schema: "MultipleChoiceSchema".into(),
                    responses: vec![],
                    answers: texts(&["A", "A", "B"]),
                },
                Question {
                    text: "ready".into(),
                    schema: "ScaleSchema".into(),
                    responses: vec![ResponseRecord::new("1", "99")],
                    answers: texts(&["ignored"]),
                },
                Question {
                    text: "odd".into(),
                    schema: "MysterySchema".into(),
                    responses: vec![],
                    answers: texts(&["A"]),
                },
            ],
            population: None,
        };

        normalize_document(&mut document);

        assert_eq!(
            document.questions[0].responses,
            vec![ResponseRecord::new("A", "2"), ResponseRecord::new("B", "1")]
        );
        assert_eq!(
            document.questions[1].responses,
            vec![ResponseRecord::new("1", "99")]
        );
        assert!(document.questions[2].responses.is_empty());
    }
}
