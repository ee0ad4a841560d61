//! Response Records Module
//! The survey response record and the schema tag that selects its chart shape.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single aggregated survey response: a category label and a numeric
/// value encoded as text. The value is a count, a weight, or a mean rank
/// depending on the question schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub item: String,
    #[serde(deserialize_with = "stringly")]
    pub response: String,
}

impl ResponseRecord {
    pub fn new(item: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            response: response.into(),
        }
    }

    /// Parse the response value as an integer. `None` for malformed values;
    /// the caller decides whether to drop or report the record.
    pub fn parse_response(&self) -> Option<i64> {
        self.response.trim().parse::<i64>().ok()
    }
}

/// Accept both `"12"` and `12` for the response field. Results exports
/// produced straight from aggregation queries carry bare numbers.
fn stringly<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

/// The five recognized question schemas. Each kind maps to exactly one
/// chart-shape transform; adding a kind is a compile-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaTag {
    Scale,
    OpenEnded,
    MultipleChoice,
    YesNo,
    Ranking,
}

impl SchemaTag {
    pub const ALL: [SchemaTag; 5] = [
        SchemaTag::Scale,
        SchemaTag::OpenEnded,
        SchemaTag::MultipleChoice,
        SchemaTag::YesNo,
        SchemaTag::Ranking,
    ];

    /// The tag as it appears in results exports.
    pub fn wire_name(self) -> &'static str {
        match self {
            SchemaTag::Scale => "ScaleSchema",
            SchemaTag::OpenEnded => "OpenEndedSchema",
            SchemaTag::MultipleChoice => "MultipleChoiceSchema",
            SchemaTag::YesNo => "YesNoSchema",
            SchemaTag::Ranking => "RankingSchema",
        }
    }
}

impl fmt::Display for SchemaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown schema tag '{0}'")]
pub struct UnknownSchema(pub String);

impl FromStr for SchemaTag {
    type Err = UnknownSchema;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ScaleSchema" => Ok(SchemaTag::Scale),
            "OpenEndedSchema" => Ok(SchemaTag::OpenEnded),
            "MultipleChoiceSchema" => Ok(SchemaTag::MultipleChoice),
            "YesNoSchema" => Ok(SchemaTag::YesNo),
            "RankingSchema" => Ok(SchemaTag::Ranking),
            other => Err(UnknownSchema(other.to_string())),
        }
    }
}
