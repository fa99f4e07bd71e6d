use super::aggregate::{aggregate, format_score};
use super::catalog::Part;
use super::record::ReviewDocument;
use serde::Serialize;
use std::io::Write;

/// Flat per-review line of aggregate values, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub title: String,
    pub domain: String,
    pub informal: String,
    pub formal: String,
    pub transferability: String,
    pub overall: String,
    pub band: &'static str,
    pub stars: u8,
}

pub fn summary_rows(document: &ReviewDocument) -> Vec<SummaryRow> {
    document
        .reviews
        .iter()
        .map(|record| {
            let result = aggregate(record);
            SummaryRow {
                title: record.title().to_string(),
                domain: record.domain().to_string(),
                informal: format_score(result.part(Part::Informal)),
                formal: format_score(result.part(Part::Formal)),
                transferability: format_score(result.part(Part::Transferability)),
                overall: format_score(result.display_overall),
                band: result.band.label(),
                stars: result.star_count,
            }
        })
        .collect()
}

pub fn write_csv<W: Write>(rows: &[SummaryRow], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> ReviewDocument {
        ReviewDocument::from_value(json!({
            "reviews": [
                {
                    "title": "Catan",
                    "domain": "games",
                    "part_one_informal": { "noticeable_math": 5, "accessibility": 3 },
                    "part_two_formal": { "overall": 2 },
                    "part_three_transferability": {}
                },
                { "title": "Hidden Figures", "domain": "movies", "overall_rating": 4.25 }
            ]
        }))
    }

    #[test]
    fn rows_carry_formatted_aggregates() {
        let rows = summary_rows(&document());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].informal, "4.0");
        assert_eq!(rows[0].formal, "2.0");
        assert_eq!(rows[0].transferability, "0.0");
        assert_eq!(rows[0].overall, "2.0");
        assert_eq!(rows[0].band, "Low");
        assert_eq!(rows[0].stars, 2);
        assert_eq!(rows[1].overall, "4.3");
        assert_eq!(rows[1].band, "High");
    }

    #[test]
    fn csv_output_has_header_and_one_line_per_review() {
        let mut buffer = Vec::new();
        write_csv(&summary_rows(&document()), &mut buffer).expect("csv writes");
        let text = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "title,domain,informal,formal,transferability,overall,band,stars"
        );
        assert_eq!(lines[1], "Catan,games,4.0,2.0,0.0,2.0,Low,2");
        assert_eq!(lines.len(), 3);
    }
}
