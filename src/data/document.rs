//! Survey Document Module
//! Wire model of a survey-results export.

use serde::Deserialize;

use crate::charts::PopulationStats;
use crate::data::ResponseRecord;

/// A decoded survey-results export: the questions with their responses and,
/// optionally, a population-statistics section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveyDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub population: Option<PopulationStats>,
}

/// One survey question. A question carries either pre-aggregated
/// `responses` (ready to chart) or raw per-respondent `answers` that still
/// need summarizing.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub text: String,
    pub schema: String,
    #[serde(default)]
    pub responses: Vec<ResponseRecord>,
    #[serde(default)]
    pub answers: Vec<RawAnswer>,
}

impl Question {
    pub fn has_chart_data(&self) -> bool {
        !self.responses.is_empty()
    }
}

/// A raw per-respondent answer. The variant in play is dictated by the
/// question schema: ratings for scale questions, free text for open-ended
/// ones, choice labels for multiple-choice and yes/no, ranked item lists
/// for ranking questions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAnswer {
    Rating(i64),
    Ranked(Vec<String>),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"{
        "title": "Customer Pulse",
        "questions": [
            {
                "text": "How satisfied are you?",
                "schema": "ScaleSchema",
                "responses": [
                    {"item": "1", "response": 4},
                    {"item": "2", "response": 9}
                ]
            },
            {
                "text": "Rank the features",
                "schema": "RankingSchema",
                "answers": [["Search", "Export"], ["Export", "Search"]]
            },
            {
                "text": "Anything else?",
                "schema": "OpenEndedSchema",
                "answers": ["great support team", "support was slow"]
            }
        ],
        "population": {
            "age_groups": [{"name": "20-29", "value": 14}],
            "education_levels": ["High School", "Bachelor"],
            "income_levels": ["Low", "High"],
            "education_income": [[0, 0, 3], [1, 1, 8]]
        }
    }"#;

    #[test]
    fn export_decodes_with_mixed_question_shapes() {
        let doc: SurveyDocument = serde_json::from_str(EXPORT).unwrap();
        assert_eq!(doc.title, "Customer Pulse");
        assert_eq!(doc.questions.len(), 3);

        assert!(doc.questions[0].has_chart_data());
        assert_eq!(doc.questions[0].responses[0].response, "4");

        assert!(!doc.questions[1].has_chart_data());
        assert_eq!(
            doc.questions[1].answers[0],
            RawAnswer::Ranked(vec!["Search".to_string(), "Export".to_string()])
        );
        assert_eq!(
            doc.questions[2].answers[1],
            RawAnswer::Text("support was slow".to_string())
        );

        let population = doc.population.unwrap();
        assert_eq!(population.age_groups[0].value, 14);
        assert_eq!(population.education_income, vec![(0, 0, 3), (1, 1, 8)]);
    }
}
