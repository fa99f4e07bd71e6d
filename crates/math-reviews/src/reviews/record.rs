use super::catalog::{Part, TopicGrid, DEFAULT_DOMAINS};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_DOMAIN: &str = "misc";
pub const PLACEHOLDER_LINK: &str = "#";

/// A single review as it appears in the data file.
///
/// Decoding never fails on field contents: values of the wrong JSON type
/// are kept as "absent" and the accessors apply the documented defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub overall_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub part_one_informal: Option<PartScores>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub part_two_formal: Option<PartScores>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub part_three_transferability: Option<PartScores>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub required_math_background: Option<TopicFlags>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub concepts_that_show_up: Option<TopicFlags>,
    /// Index of the entry in the document's `reviews` array.
    #[serde(skip)]
    pub position: usize,
}

impl ReviewRecord {
    pub fn title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(DEFAULT_TITLE)
    }

    pub fn domain(&self) -> &str {
        non_empty(self.domain.as_deref()).unwrap_or(DEFAULT_DOMAIN)
    }

    pub fn link(&self) -> &str {
        non_empty(self.link.as_deref()).unwrap_or(PLACEHOLDER_LINK)
    }

    pub fn notes(&self) -> Option<&str> {
        non_empty(self.notes.as_deref())
    }

    /// The link worth showing as a standalone line, if the record has one.
    pub fn external_link(&self) -> Option<&str> {
        non_empty(self.link.as_deref()).filter(|link| *link != PLACEHOLDER_LINK)
    }

    pub fn part(&self, part: Part) -> Option<&PartScores> {
        match part {
            Part::Informal => self.part_one_informal.as_ref(),
            Part::Formal => self.part_two_formal.as_ref(),
            Part::Transferability => self.part_three_transferability.as_ref(),
        }
    }

    pub fn topics(&self, grid: TopicGrid) -> Option<&TopicFlags> {
        match grid {
            TopicGrid::RequiredBackground => self.required_math_background.as_ref(),
            TopicGrid::ConceptsShowingUp => self.concepts_that_show_up.as_ref(),
        }
    }
}

/// Sub-scores of one part, kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartScores(Map<String, Value>);

impl PartScores {
    pub const OVERALL_KEY: &'static str = "overall";

    /// The part's explicit overall, when it is a finite number.
    pub fn overall(&self) -> Option<f64> {
        self.0.get(Self::OVERALL_KEY).and_then(numeric_value)
    }

    /// Every field other than `overall`, with its value when it is numeric.
    pub fn sub_scores(&self) -> impl Iterator<Item = (&str, Option<f64>)> + '_ {
        self.0
            .iter()
            .filter(|(key, _)| key.as_str() != Self::OVERALL_KEY)
            .map(|(key, value)| (key.as_str(), numeric_value(value)))
    }
}

impl From<Map<String, Value>> for PartScores {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// A yes/no mapping of math topics, kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicFlags(Map<String, Value>);

impl TopicFlags {
    pub fn entries(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), truthy(value)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for TopicFlags {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// The whole data file: an optional domain ordering plus the reviews.
#[derive(Debug, Clone, Default)]
pub struct ReviewDocument {
    pub domains: Option<Vec<String>>,
    pub reviews: Vec<ReviewRecord>,
}

impl ReviewDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_value(value))
    }

    /// Builds a document from arbitrary JSON; a missing or malformed
    /// `reviews` array yields an empty document rather than an error.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut root) = value else {
            warn!("review data is not a JSON object; treating it as empty");
            return Self::default();
        };

        let domains = root
            .get("meta")
            .and_then(|meta| meta.get("domains"))
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            });

        let reviews = match root.remove("reviews") {
            Some(Value::Array(entries)) => entries
                .into_iter()
                .enumerate()
                .filter_map(|(position, entry)| decode_record(position, entry))
                .collect(),
            _ => Vec::new(),
        };

        Self { domains, reviews }
    }

    /// Domain display order: the listed domains, then any other domain
    /// found in the reviews in order of first appearance.
    pub fn domain_order(&self) -> Vec<String> {
        let listed: Vec<&str> = match &self.domains {
            Some(listed) => listed.iter().map(String::as_str).collect(),
            None => DEFAULT_DOMAINS.to_vec(),
        };

        let mut order: Vec<String> = Vec::new();
        for domain in listed
            .into_iter()
            .chain(self.reviews.iter().map(ReviewRecord::domain))
        {
            if !order.iter().any(|known| known == domain) {
                order.push(domain.to_string());
            }
        }

        order
    }
}

fn decode_record(position: usize, entry: Value) -> Option<ReviewRecord> {
    if !entry.is_object() {
        warn!(position, "skipping review entry that is not an object");
        return None;
    }

    match serde_json::from_value::<ReviewRecord>(entry) {
        Ok(record) => Some(ReviewRecord { position, ..record }),
        Err(error) => {
            warn!(position, %error, "skipping undecodable review entry");
            None
        }
    }
}

/// Interprets a JSON value as a finite number: numbers and numeric strings
/// count, everything else is "no data".
pub fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(numeric_value(&value))
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<Map<String, Value>>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(Some(T::from(map))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> ReviewRecord {
        serde_json::from_value(value).expect("record decodes")
    }

    #[test]
    fn defaults_apply_to_missing_and_empty_fields() {
        let review = record(json!({ "title": "", "link": "" }));
        assert_eq!(review.title(), "Untitled");
        assert_eq!(review.domain(), "misc");
        assert_eq!(review.link(), "#");
        assert!(review.notes().is_none());
        assert!(review.external_link().is_none());
    }

    #[test]
    fn wrong_types_degrade_to_absent() {
        let review = record(json!({
            "title": 42,
            "overall_rating": "not a number",
            "part_one_informal": [1, 2, 3],
            "required_math_background": "yes",
        }));
        assert_eq!(review.title(), "Untitled");
        assert!(review.overall_rating.is_none());
        assert!(review.part(Part::Informal).is_none());
        assert!(review.topics(TopicGrid::RequiredBackground).is_none());
    }

    #[test]
    fn numeric_strings_count_but_null_and_bool_do_not() {
        assert_eq!(numeric_value(&json!("3.5")), Some(3.5));
        assert_eq!(numeric_value(&json!(" 4 ")), Some(4.0));
        assert_eq!(numeric_value(&json!(null)), None);
        assert_eq!(numeric_value(&json!(true)), None);
        assert_eq!(numeric_value(&json!("inf")), None);
    }

    #[test]
    fn sub_scores_skip_overall_and_keep_document_order() {
        let review = record(json!({
            "part_two_formal": { "rigor_rating": 4, "overall": 3, "mathematical_systems": "n/a" }
        }));
        let part = review.part(Part::Formal).expect("part present");
        let scores: Vec<(&str, Option<f64>)> = part.sub_scores().collect();
        assert_eq!(
            scores,
            vec![("rigor_rating", Some(4.0)), ("mathematical_systems", None)]
        );
        assert_eq!(part.overall(), Some(3.0));
    }

    #[test]
    fn topic_flags_use_truthiness() {
        let review = record(json!({
            "concepts_that_show_up": { "algebra": true, "proofs": 0, "geometry": "yes", "calculus": null }
        }));
        let flags: Vec<(&str, bool)> = review
            .topics(TopicGrid::ConceptsShowingUp)
            .expect("flags present")
            .entries()
            .collect();
        assert_eq!(
            flags,
            vec![
                ("algebra", true),
                ("proofs", false),
                ("geometry", true),
                ("calculus", false)
            ]
        );
    }

    #[test]
    fn document_tolerates_missing_reviews_and_skips_non_objects() {
        let empty = ReviewDocument::from_value(json!({ "meta": {} }));
        assert!(empty.reviews.is_empty());

        let malformed = ReviewDocument::from_value(json!({ "reviews": "nope" }));
        assert!(malformed.reviews.is_empty());

        let mixed = ReviewDocument::from_value(json!({
            "reviews": [ { "title": "A" }, 7, null, { "title": "B" } ]
        }));
        let titles: Vec<&str> = mixed.reviews.iter().map(ReviewRecord::title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn domain_order_appends_unlisted_domains() {
        let document = ReviewDocument::from_value(json!({
            "meta": { "domains": ["movies", 3, "games"] },
            "reviews": [ { "domain": "games" }, { "domain": "cooking" }, {} ]
        }));
        assert_eq!(
            document.domain_order(),
            vec!["movies", "games", "cooking", "misc"]
        );

        let defaulted = ReviewDocument::from_value(json!({ "reviews": [] }));
        assert_eq!(
            defaulted.domain_order(),
            vec!["games", "movies", "sewing", "music", "art"]
        );
    }
}
