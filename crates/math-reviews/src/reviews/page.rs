use super::aggregate::aggregate;
use super::card::{render_card_in, CardContext, CardView};
use super::catalog::domain_title;
use super::disclosure::DisclosureStates;
pub use super::disclosure::card_id;
use super::markup::{slug, EscapedText};
use super::record::ReviewDocument;
use chrono::Datelike;
use serde::Serialize;

pub const NO_REVIEWS_MESSAGE: &str = "No reviews available yet.";
pub const LOAD_FAILURE_MESSAGE: &str = "Sorry, something went wrong loading reviews.";
pub const DEFAULT_BASE_PATH: &str = "/reviews";
const PAGE_NAME: &str = "Reviews";

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub site_title: String,
    /// Path the disclosure links point back to.
    pub base_path: String,
    pub year: i32,
}

impl PageOptions {
    pub fn new(site_title: impl Into<String>) -> Self {
        Self {
            site_title: site_title.into(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            year: chrono::Local::now().year(),
        }
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }
}

/// The "all reviews" page: one section per domain that has reviews.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub site_title: EscapedText,
    pub page_title: &'static str,
    pub sections: Vec<DomainSection>,
    /// Shown instead of the sections when there is nothing to list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainSection {
    pub section_id: String,
    pub title: EscapedText,
    pub cards: Vec<CardView>,
}

pub fn card_ids(document: &ReviewDocument) -> impl Iterator<Item = String> + '_ {
    document.reviews.iter().map(|record| card_id(record.position))
}

pub fn build_listing(
    document: &ReviewDocument,
    states: &DisclosureStates,
    options: &PageOptions,
) -> ListingView {
    let sections: Vec<DomainSection> = document
        .domain_order()
        .into_iter()
        .filter_map(|domain| domain_section(document, &domain, states, options))
        .collect();

    let status = sections.is_empty().then_some(NO_REVIEWS_MESSAGE);

    ListingView {
        site_title: EscapedText::new(&options.site_title),
        page_title: PAGE_NAME,
        sections,
        status,
        year: options.year,
    }
}

/// The page shown when the review data could not be loaded.
pub fn failed_listing(options: &PageOptions) -> ListingView {
    ListingView {
        site_title: EscapedText::new(&options.site_title),
        page_title: PAGE_NAME,
        sections: Vec::new(),
        status: Some(LOAD_FAILURE_MESSAGE),
        year: options.year,
    }
}

fn domain_section(
    document: &ReviewDocument,
    domain: &str,
    states: &DisclosureStates,
    options: &PageOptions,
) -> Option<DomainSection> {
    let cards: Vec<CardView> = document
        .reviews
        .iter()
        .filter(|record| record.domain() == domain)
        .map(|record| {
            let id = card_id(record.position);
            let context = CardContext {
                card_id: &id,
                base_path: &options.base_path,
                states,
            };
            render_card_in(record, &aggregate(record), &context)
        })
        .collect();

    if cards.is_empty() {
        return None;
    }

    Some(DomainSection {
        section_id: format!("sec-{}", slug(domain)),
        title: EscapedText::new(&domain_title(domain)),
        cards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reviews::disclosure::DisclosureState;
    use serde_json::json;

    fn options() -> PageOptions {
        PageOptions {
            site_title: "EverydayMathReviews.com".to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            year: 2026,
        }
    }

    #[test]
    fn groups_cards_by_domain_in_listed_order() {
        let document = ReviewDocument::from_value(json!({
            "meta": { "domains": ["movies", "games"] },
            "reviews": [
                { "title": "Catan", "domain": "games" },
                { "title": "Hidden Figures", "domain": "movies" },
                { "title": "Pie Crusts", "domain": "cooking" },
                { "title": "Set", "domain": "games" }
            ]
        }));

        let listing = build_listing(&document, &DisclosureStates::default(), &options());
        let layout: Vec<(&str, Vec<&str>)> = listing
            .sections
            .iter()
            .map(|section| {
                (
                    section.title.as_str(),
                    section
                        .cards
                        .iter()
                        .map(|card| card.header.title.as_str())
                        .collect(),
                )
            })
            .collect();

        assert_eq!(
            layout,
            vec![
                ("Movies", vec!["Hidden Figures"]),
                ("Games", vec!["Catan", "Set"]),
                ("cooking", vec!["Pie Crusts"]),
            ]
        );
        assert!(listing.status.is_none());
        assert_eq!(listing.sections[1].cards[1].id, "card-3");
        assert_eq!(listing.sections[1].section_id, "sec-games");
    }

    #[test]
    fn empty_document_reports_no_reviews() {
        let listing = build_listing(
            &ReviewDocument::default(),
            &DisclosureStates::default(),
            &options(),
        );
        assert!(listing.sections.is_empty());
        assert_eq!(listing.status, Some(NO_REVIEWS_MESSAGE));
    }

    #[test]
    fn failure_page_carries_static_message() {
        let listing = failed_listing(&options());
        assert_eq!(listing.status, Some(LOAD_FAILURE_MESSAGE));
        assert!(listing.sections.is_empty());
    }

    #[test]
    fn disclosure_states_reach_the_right_card() {
        let document = ReviewDocument::from_value(json!({
            "reviews": [ { "domain": "games" }, { "domain": "games" } ]
        }));
        let states = DisclosureStates::from_query(Some("card-1"));
        let listing = build_listing(&document, &states, &options());
        let cards = &listing.sections[0].cards;
        assert_eq!(cards[0].disclosure.state, DisclosureState::Collapsed);
        assert_eq!(cards[1].disclosure.state, DisclosureState::Expanded);
        assert_eq!(cards[1].disclosure.toggle_label, "Hide full review");
    }

    #[test]
    fn card_ids_keep_array_positions_past_skipped_entries() {
        let document = ReviewDocument::from_value(json!({
            "reviews": [ "stray", { "title": "Catan", "domain": "games" }, null, { "title": "Set", "domain": "games" } ]
        }));
        assert_eq!(card_ids(&document).collect::<Vec<_>>(), vec!["card-1", "card-3"]);

        let states = DisclosureStates::from_query(Some("card-3"));
        let listing = build_listing(&document, &states, &options());
        let cards = &listing.sections[0].cards;
        assert_eq!(cards[0].id, "card-1");
        assert_eq!(cards[1].id, "card-3");
        assert_eq!(cards[1].disclosure.state, DisclosureState::Expanded);
    }
}
