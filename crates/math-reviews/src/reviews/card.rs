use super::aggregate::{format_score, AggregateResult, Band, MAX_STARS};
use super::catalog::{domain_title, topic_label, Part, TopicGrid};
use super::disclosure::{region_id, toggle_id, DisclosureAction, DisclosureState, DisclosureStates};
use super::markup::{truncate_notes, EscapedText};
use super::record::ReviewRecord;
use serde::Serialize;

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';

/// Renderer-agnostic description of one review card.
///
/// Every piece of text that can originate from the data file is carried
/// as [`EscapedText`].
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub id: String,
    pub header: CardHeader,
    pub summary: RatingSummary,
    pub metrics: Vec<PartMetric>,
    pub parts: Vec<PartSection>,
    pub topic_grids: Vec<TopicGridView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<EscapedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_link: Option<EscapedText>,
    pub disclosure: DisclosureView,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardHeader {
    pub title: EscapedText,
    pub domain: EscapedText,
    pub domain_label: EscapedText,
    pub link: EscapedText,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingSummary {
    pub display_overall: String,
    pub stars: String,
    pub star_count: u8,
    pub band: Band,
    pub band_label: &'static str,
    pub accessible_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartMetric {
    pub part: Part,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartSection {
    pub part: Part,
    pub title: &'static str,
    pub rows: Vec<ScoreRow>,
    pub overall: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    pub label: EscapedText,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<ScaleLegend>,
}

/// What 1★ and 5★ mean for a known category.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScaleLegend {
    pub one_star: &'static str,
    pub five_star: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicGridView {
    pub grid: TopicGrid,
    pub title: &'static str,
    pub entries: Vec<TopicEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicEntry {
    pub label: EscapedText,
    pub present: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisclosureView {
    pub state: DisclosureState,
    pub toggle_id: String,
    pub region_id: String,
    pub toggle_label: &'static str,
    pub toggle_href: EscapedText,
    pub collapse_href: EscapedText,
}

/// Where a card sits on its page: its id and the disclosure states of the
/// page it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct CardContext<'a> {
    pub card_id: &'a str,
    pub base_path: &'a str,
    pub states: &'a DisclosureStates,
}

impl Default for CardContext<'_> {
    fn default() -> Self {
        static NO_EXPANDED_CARDS: DisclosureStates = DisclosureStates::none();
        Self {
            card_id: "card-0",
            base_path: "/reviews",
            states: &NO_EXPANDED_CARDS,
        }
    }
}

/// Card for a standalone record: default id, details collapsed.
pub fn render_card(record: &ReviewRecord, aggregate: &AggregateResult) -> CardView {
    render_card_in(record, aggregate, &CardContext::default())
}

pub fn render_card_in(
    record: &ReviewRecord,
    aggregate: &AggregateResult,
    context: &CardContext<'_>,
) -> CardView {
    let domain = record.domain();
    let header = CardHeader {
        title: EscapedText::new(record.title()),
        domain: EscapedText::new(domain),
        domain_label: EscapedText::new(&domain_title(domain)),
        link: EscapedText::new(record.link()),
    };

    let metrics = Part::ordered()
        .into_iter()
        .map(|part| PartMetric {
            part,
            label: part.short_label(),
            value: format_score(aggregate.part(part)),
        })
        .collect();

    let parts = Part::ordered()
        .into_iter()
        .map(|part| part_section(record, aggregate, part))
        .collect();

    let topic_grids = TopicGrid::ordered()
        .into_iter()
        .map(|grid| topic_grid(record, grid))
        .collect();

    CardView {
        id: context.card_id.to_string(),
        header,
        summary: rating_summary(aggregate),
        metrics,
        parts,
        topic_grids,
        notes: record
            .notes()
            .map(|notes| EscapedText::new(&truncate_notes(notes))),
        external_link: record.external_link().map(EscapedText::new),
        disclosure: disclosure_view(context),
    }
}

pub fn star_glyphs(star_count: u8) -> String {
    let filled = star_count.min(MAX_STARS);
    let mut glyphs = String::with_capacity(usize::from(MAX_STARS) * 3);
    glyphs.extend(std::iter::repeat(FILLED_STAR).take(usize::from(filled)));
    glyphs.extend(std::iter::repeat(EMPTY_STAR).take(usize::from(MAX_STARS - filled)));
    glyphs
}

fn rating_summary(aggregate: &AggregateResult) -> RatingSummary {
    let display_overall = format_score(aggregate.display_overall);
    let band_label = aggregate.band.label();
    RatingSummary {
        accessible_label: format!("Overall rating: {display_overall} out of 5 — {band_label}"),
        display_overall,
        stars: star_glyphs(aggregate.star_count),
        star_count: aggregate.star_count,
        band: aggregate.band,
        band_label,
    }
}

fn part_section(record: &ReviewRecord, aggregate: &AggregateResult, part: Part) -> PartSection {
    let rows = record
        .part(part)
        .map(|scores| {
            scores
                .sub_scores()
                .filter_map(|(key, value)| {
                    let value = value?;
                    Some(ScoreRow {
                        label: EscapedText::new(&part.category_label(key)),
                        value: format_score(value),
                        legend: part.category(key).map(|category| ScaleLegend {
                            one_star: category.one_star,
                            five_star: category.five_star,
                        }),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    PartSection {
        part,
        title: part.title(),
        rows,
        overall: format_score(aggregate.part(part)),
    }
}

fn topic_grid(record: &ReviewRecord, grid: TopicGrid) -> TopicGridView {
    let entries = record
        .topics(grid)
        .map(|flags| {
            flags
                .entries()
                .map(|(key, present)| TopicEntry {
                    label: EscapedText::new(&topic_label(key)),
                    present,
                })
                .collect()
        })
        .unwrap_or_default();

    TopicGridView {
        grid,
        title: grid.title(),
        entries,
    }
}

fn disclosure_view(context: &CardContext<'_>) -> DisclosureView {
    let state = context.states.state_of(context.card_id);
    DisclosureView {
        state,
        toggle_id: toggle_id(context.card_id),
        region_id: region_id(context.card_id),
        toggle_label: state.toggle_label(),
        toggle_href: EscapedText::new(&context.states.href_after(
            context.base_path,
            context.card_id,
            DisclosureAction::Toggle,
        )),
        collapse_href: EscapedText::new(&context.states.href_after(
            context.base_path,
            context.card_id,
            DisclosureAction::Collapse,
        )),
    }
}
