//! Canonical enumeration of the keys the review data is expected to use.
//!
//! Every lookup (part categories, math topics, domains) goes through this
//! module; unknown keys fall back to a humanized form of the raw key.

use serde::Serialize;
use std::borrow::Cow;

/// One of the three rating dimensions a review is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Informal,
    Formal,
    Transferability,
}

impl Part {
    pub const fn ordered() -> [Self; 3] {
        [Self::Informal, Self::Formal, Self::Transferability]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Informal => 0,
            Self::Formal => 1,
            Self::Transferability => 2,
        }
    }

    /// Field name of the part inside a review record.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Informal => "part_one_informal",
            Self::Formal => "part_two_formal",
            Self::Transferability => "part_three_transferability",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Informal => "Part I — Informal Mathematics",
            Self::Formal => "Part II — Formal Mathematics",
            Self::Transferability => "Part III — Transferability",
        }
    }

    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Informal => "Informal",
            Self::Formal => "Formal",
            Self::Transferability => "Transfer",
        }
    }

    pub const fn categories(self) -> &'static [Category] {
        match self {
            Self::Informal => PART_ONE_CATEGORIES,
            Self::Formal => PART_TWO_CATEGORIES,
            Self::Transferability => PART_THREE_CATEGORIES,
        }
    }

    pub fn category(self, key: &str) -> Option<&'static Category> {
        self.categories().iter().find(|category| category.key == key)
    }

    /// Display label for a sub-score key of this part.
    pub fn category_label(self, key: &str) -> Cow<'static, str> {
        match self.category(key) {
            Some(category) => Cow::Borrowed(category.label),
            None => Cow::Owned(humanize_key(key)),
        }
    }
}

/// A known sub-score of a part, with what the ends of the 1–5 scale mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: &'static str,
    pub label: &'static str,
    pub one_star: &'static str,
    pub five_star: &'static str,
}

const PART_ONE_CATEGORIES: &[Category] = &[
    Category {
        key: "expressive_mathematics_rating",
        label: "Expressive Mathematics",
        one_star: "Little to no intuitive mathematical play; math is incidental.",
        five_star: "Rich, intuitive mathematical play is core to the experience.",
    },
    Category {
        key: "mathematical_intuition_development",
        label: "Mathematical Intuition",
        one_star: "No growth in intuitive math skills.",
        five_star: "Strong growth through practice and feedback.",
    },
    Category {
        key: "noticeable_math",
        label: "Noticeable Math",
        one_star: "Math is largely invisible.",
        five_star: "Math is obvious and discussed openly.",
    },
    Category {
        key: "accessibility",
        label: "Accessibility",
        one_star: "Barriers for many learners.",
        five_star: "Highly accessible across abilities.",
    },
];

const PART_TWO_CATEGORIES: &[Category] = &[
    Category {
        key: "formal_mathematics_exposure",
        label: "Formal Math Exposure",
        one_star: "No explicit math concepts or terminology.",
        five_star: "Frequent, explicit engagement with formal math ideas.",
    },
    Category {
        key: "rigor_rating",
        label: "Rigor",
        one_star: "Informal, imprecise references.",
        five_star: "Precise, well-defined structures.",
    },
    Category {
        key: "mathematical_systems",
        label: "Mathematical Systems",
        one_star: "No consistent system.",
        five_star: "Clear, coherent systems in play.",
    },
];

const PART_THREE_CATEGORIES: &[Category] = &[
    Category {
        key: "breadth_of_application",
        label: "Breadth of Application",
        one_star: "Narrow, context-bound.",
        five_star: "Broad cross-domain relevance.",
    },
    Category {
        key: "ease_of_transfer",
        label: "Ease of Transfer",
        one_star: "Hard to apply elsewhere.",
        five_star: "Concepts transfer naturally.",
    },
    Category {
        key: "math_depth",
        label: "Math Depth",
        one_star: "Surface-only.",
        five_star: "Layered depth and insight.",
    },
];

/// The two yes/no grids shown in the details region of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicGrid {
    RequiredBackground,
    ConceptsShowingUp,
}

impl TopicGrid {
    pub const fn ordered() -> [Self; 2] {
        [Self::RequiredBackground, Self::ConceptsShowingUp]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::RequiredBackground => "required_math_background",
            Self::ConceptsShowingUp => "concepts_that_show_up",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::RequiredBackground => "Required Math Background",
            Self::ConceptsShowingUp => "Math Concepts That Show Up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MathTopic {
    Counting,
    Arithmetic,
    Algebra,
    Geometry,
    StatisticsProbability,
    Proofs,
    Trigonometry,
    Calculus,
    DataRepresentation,
    MeasurementUnits,
    SpecializedMath,
    AdvancedConcepts,
}

impl MathTopic {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::Counting,
            Self::Arithmetic,
            Self::Algebra,
            Self::Geometry,
            Self::StatisticsProbability,
            Self::Proofs,
            Self::Trigonometry,
            Self::Calculus,
            Self::DataRepresentation,
            Self::MeasurementUnits,
            Self::SpecializedMath,
            Self::AdvancedConcepts,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Counting => "counting",
            Self::Arithmetic => "arithmetic",
            Self::Algebra => "algebra",
            Self::Geometry => "geometry",
            Self::StatisticsProbability => "statistics_probability",
            Self::Proofs => "proofs",
            Self::Trigonometry => "trigonometry",
            Self::Calculus => "calculus",
            Self::DataRepresentation => "data_representation",
            Self::MeasurementUnits => "measurement_units",
            Self::SpecializedMath => "specialized_math",
            Self::AdvancedConcepts => "advanced_concepts",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Counting => "Counting",
            Self::Arithmetic => "Arithmetic",
            Self::Algebra => "Algebra",
            Self::Geometry => "Geometry",
            Self::StatisticsProbability => "Statistics / Probability",
            Self::Proofs => "Proofs",
            Self::Trigonometry => "Trigonometry",
            Self::Calculus => "Calculus",
            Self::DataRepresentation => "Data Representation",
            Self::MeasurementUnits => "Measurement & Units",
            Self::SpecializedMath => "Specialized Math",
            Self::AdvancedConcepts => "Advanced Concepts",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|topic| topic.key() == key)
    }
}

pub fn topic_label(key: &str) -> Cow<'static, str> {
    match MathTopic::from_key(key) {
        Some(topic) => Cow::Borrowed(topic.label()),
        None => Cow::Owned(humanize_key(key)),
    }
}

/// Domains rendered, in order, when the document does not list its own.
pub const DEFAULT_DOMAINS: [&str; 5] = ["games", "movies", "sewing", "music", "art"];

/// Section title for a domain tag; unknown domains pass through verbatim.
pub fn domain_title(domain: &str) -> Cow<'_, str> {
    match domain {
        "games" => Cow::Borrowed("Games"),
        "movies" => Cow::Borrowed("Movies"),
        "sewing" => Cow::Borrowed("Sewing"),
        "music" => Cow::Borrowed("Music"),
        "art" => Cow::Borrowed("Art"),
        other => Cow::Owned(other.to_string()),
    }
}

pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
}
