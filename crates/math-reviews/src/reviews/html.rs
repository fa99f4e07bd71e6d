//! HTML output for card and listing views.
//!
//! Views already hold escaped text, so the writers here only interpolate.

use super::card::{CardView, DisclosureView, PartSection, ScoreRow, TopicGridView};
use super::page::{DomainSection, ListingView};
use std::fmt;

/// Markup for a single card.
pub struct CardHtml<'a>(pub &'a CardView);

/// Markup for a complete listing document.
pub struct ListingHtml<'a>(pub &'a ListingView);

impl fmt::Display for CardHtml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let card = self.0;
        let header = &card.header;
        let summary = &card.summary;

        writeln!(
            f,
            "<article class=\"review-card\" id=\"{id}\" aria-labelledby=\"{id}-title\">",
            id = card.id
        )?;
        writeln!(f, "<header class=\"review-card-head\">")?;
        writeln!(
            f,
            "<h3 class=\"review-title\" id=\"{}-title\">{}</h3>",
            card.id, header.title
        )?;
        writeln!(
            f,
            "<div class=\"meta-row\"><span class=\"domain-pill\" data-domain=\"{}\">{}</span> \
             <a class=\"review-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Open ↗</a></div>",
            header.domain, header.domain_label, header.link
        )?;
        writeln!(f, "</header>")?;

        writeln!(f, "<div class=\"overall\" aria-label=\"Overall rating\">")?;
        writeln!(
            f,
            "<div class=\"overall-number\">{}</div>",
            summary.display_overall
        )?;
        writeln!(
            f,
            "<div class=\"overall-stars\" aria-hidden=\"true\">{}</div>",
            summary.stars
        )?;
        writeln!(f, "<div class=\"overall-band\">{}</div>", summary.band_label)?;
        writeln!(
            f,
            "<span class=\"sr-only\">{}</span>",
            summary.accessible_label
        )?;
        writeln!(f, "</div>")?;

        writeln!(f, "<dl class=\"sub-metrics\" aria-label=\"Part ratings\">")?;
        for metric in &card.metrics {
            writeln!(
                f,
                "<div class=\"metric-row\"><dt>{}</dt><dd>{}</dd></div>",
                metric.label, metric.value
            )?;
        }
        writeln!(f, "</dl>")?;

        write_toggle(f, card, &card.disclosure)?;
        write_details(f, card)?;
        writeln!(f, "</article>")
    }
}

fn write_toggle(f: &mut fmt::Formatter<'_>, card: &CardView, view: &DisclosureView) -> fmt::Result {
    writeln!(
        f,
        "<a class=\"expand-btn\" id=\"{}\" href=\"{}\" role=\"button\" aria-expanded=\"{}\" aria-controls=\"{}\" data-card=\"{}\">{}</a>",
        view.toggle_id,
        view.toggle_href,
        view.state.is_expanded(),
        view.region_id,
        card.id,
        view.toggle_label
    )
}

fn write_details(f: &mut fmt::Formatter<'_>, card: &CardView) -> fmt::Result {
    let view = &card.disclosure;
    let expanded = view.state.is_expanded();
    writeln!(
        f,
        "<div id=\"{}\" class=\"card-details\" role=\"region\" aria-labelledby=\"{}-title\" data-open=\"{}\"{}>",
        view.region_id,
        card.id,
        expanded,
        if expanded { "" } else { " hidden" }
    )?;
    writeln!(
        f,
        "<div class=\"legend\"><div><strong>1★</strong> = minimal presence</div>\
         <div><strong>5★</strong> = rich, prominent, well-developed</div></div>"
    )?;

    for section in &card.parts {
        write_part(f, section)?;
    }

    for grid in &card.topic_grids {
        write_topic_grid(f, grid)?;
    }

    if let Some(notes) = &card.notes {
        writeln!(
            f,
            "<section class=\"notes\"><h4>Notes</h4><p class=\"notes-full\">{}</p></section>",
            notes
        )?;
    }

    if let Some(link) = &card.external_link {
        writeln!(
            f,
            "<p class=\"external-link\">Find it here: <a target=\"_blank\" rel=\"noopener\" href=\"{link}\">{link}</a></p>"
        )?;
    }

    writeln!(
        f,
        "<p><a class=\"expand-btn\" href=\"{}\" data-collapse>Collapse review</a></p>",
        view.collapse_href
    )?;
    writeln!(f, "</div>")
}

fn write_part(f: &mut fmt::Formatter<'_>, section: &PartSection) -> fmt::Result {
    writeln!(
        f,
        "<section class=\"details-group\" data-part=\"{}\">",
        section.part.key()
    )?;
    writeln!(f, "<h4>{}</h4>", section.title)?;
    writeln!(f, "<ul class=\"details-list\">")?;
    for row in &section.rows {
        write_row(f, row)?;
    }
    writeln!(f, "</ul>")?;
    writeln!(
        f,
        "<p><strong>Overall for {}:</strong> {}</p>",
        section.title, section.overall
    )?;
    writeln!(f, "</section>")
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &ScoreRow) -> fmt::Result {
    write!(f, "<li><strong>{}:</strong> {}", row.label, row.value)?;
    if let Some(legend) = &row.legend {
        write!(
            f,
            " <span class=\"scale\">[1★] {} · [5★] {}</span>",
            legend.one_star, legend.five_star
        )?;
    }
    writeln!(f, "</li>")
}

fn write_topic_grid(f: &mut fmt::Formatter<'_>, grid: &TopicGridView) -> fmt::Result {
    writeln!(
        f,
        "<section aria-label=\"{title}\" data-grid=\"{key}\"><h4>{title}</h4>",
        title = grid.title,
        key = grid.grid.key()
    )?;
    if grid.entries.is_empty() {
        writeln!(f, "<p class=\"bool-empty\">Not specified</p>")?;
    } else {
        write!(f, "<div class=\"bool-grid\">")?;
        for entry in &grid.entries {
            let (class, answer) = if entry.present {
                ("bool-yes", "yes")
            } else {
                ("bool-no", "no")
            };
            write!(
                f,
                "<div class=\"bool-item {class}\" data-value=\"{answer}\"><span>{}</span></div>",
                entry.label
            )?;
        }
        writeln!(f, "</div>")?;
    }
    writeln!(f, "</section>")
}

impl fmt::Display for ListingHtml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listing = self.0;

        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html lang=\"en\">")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<meta charset=\"utf-8\">")?;
        writeln!(
            f,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
        )?;
        writeln!(
            f,
            "<title>{} — {}</title>",
            listing.site_title, listing.page_title
        )?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<a class=\"skip-link\" href=\"#main\">Skip to content</a>")?;
        writeln!(
            f,
            "<header class=\"site-header\"><div class=\"wrap\"><h1 class=\"site-title\">{}</h1></div></header>",
            listing.site_title
        )?;
        writeln!(f, "<main id=\"main\" class=\"wrap\">")?;
        writeln!(
            f,
            "<nav class=\"breadcrumb\" aria-label=\"Breadcrumb\"><ol><li><a href=\"/\">Home</a></li>\
             <li aria-current=\"page\">{}</li></ol></nav>",
            listing.page_title
        )?;
        writeln!(f, "<h2 class=\"page-title\">{}</h2>", listing.page_title)?;
        writeln!(
            f,
            "<p class=\"domain-intro\">All reviews, grouped by domain. Open a card to see full details, \
             including what 1★ and 5★ mean for each category.</p>"
        )?;
        writeln!(f, "<div id=\"sections\">")?;

        match listing.status {
            Some(message) => {
                writeln!(f, "<p class=\"notes\" role=\"status\">{message}</p>")?;
            }
            None => {
                for section in &listing.sections {
                    write_section(f, section)?;
                }
            }
        }

        writeln!(f, "</div>")?;
        writeln!(f, "</main>")?;
        writeln!(
            f,
            "<footer class=\"site-footer\"><div class=\"wrap\"><p>© {} {}</p></div></footer>",
            listing.year, listing.site_title
        )?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, section: &DomainSection) -> fmt::Result {
    writeln!(
        f,
        "<section aria-labelledby=\"{id}\"><h3 id=\"{id}\">{}</h3>",
        section.title,
        id = section.section_id
    )?;
    writeln!(f, "<div class=\"card-grid\">")?;
    for card in &section.cards {
        write!(f, "{}", CardHtml(card))?;
    }
    writeln!(f, "</div>")?;
    writeln!(f, "</section>")
}
