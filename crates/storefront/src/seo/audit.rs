//! Heuristic scoring of built page metadata.
//!
//! Logged at debug level by the metadata builder; not user-facing. The
//! thresholds mirror what search consoles flag.

use crate::seo::meta::PageMeta;

/// Maximum achievable score.
pub const MAX_SCORE: u8 = 100;

const TITLE_RANGE: std::ops::RangeInclusive<usize> = 30..=60;
const DESCRIPTION_RANGE: std::ops::RangeInclusive<usize> = 70..=160;

/// Result of auditing a page's metadata.
#[derive(Debug, Clone)]
pub struct AuditReport {
    /// 0-100; each failed check costs 20 points.
    pub score: u8,
    /// One note per failed check.
    pub notes: Vec<&'static str>,
}

/// Score built metadata against basic search-console heuristics.
#[must_use]
pub fn audit(meta: &PageMeta) -> AuditReport {
    let mut notes = Vec::new();

    if !TITLE_RANGE.contains(&meta.title.chars().count()) {
        notes.push("title length outside 30-60 characters");
    }
    if !DESCRIPTION_RANGE.contains(&meta.description.chars().count()) {
        notes.push("description length outside 70-160 characters");
    }
    if meta.canonical.is_empty() {
        notes.push("canonical URL missing");
    }
    if meta.og_image.is_none() {
        notes.push("social preview image missing");
    }
    if meta.schemas.is_empty() {
        notes.push("no structured data");
    }

    #[allow(clippy::cast_possible_truncation)] // at most 5 notes, 20 points each
    let score = MAX_SCORE - (notes.len() as u8) * 20;

    AuditReport { score, notes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_meta() -> PageMeta {
        PageMeta {
            title: "Jamdani Scarf - Handwoven in Narayanganj".to_string(),
            description: "A handwoven jamdani scarf from Narayanganj artisans, \
                          finished with natural dyes and shipped nationwide."
                .to_string(),
            canonical: "https://padmabazar.com/product/jamdani-scarf".to_string(),
            og_title: "Jamdani Scarf".to_string(),
            og_description: "Handwoven jamdani scarf.".to_string(),
            og_type: "product".to_string(),
            og_url: "https://padmabazar.com/product/jamdani-scarf".to_string(),
            og_image: Some("https://cdn.test/scarf.jpg".to_string()),
            twitter_card: "summary_large_image".to_string(),
            twitter_title: "Jamdani Scarf".to_string(),
            twitter_description: "Handwoven jamdani scarf.".to_string(),
            twitter_image: Some("https://cdn.test/scarf.jpg".to_string()),
            schemas: vec![json!({"@type": "Product"})],
        }
    }

    #[test]
    fn test_full_metadata_scores_max() {
        let report = audit(&full_meta());
        assert_eq!(report.score, MAX_SCORE);
        assert!(report.notes.is_empty());
    }

    #[test]
    fn test_each_failed_check_costs_twenty() {
        let mut meta = full_meta();
        meta.og_image = None;
        meta.schemas.clear();
        let report = audit(&meta);
        assert_eq!(report.score, 60);
        assert_eq!(report.notes.len(), 2);
    }

    #[test]
    fn test_short_title_flagged() {
        let mut meta = full_meta();
        meta.title = "Shop".to_string();
        let report = audit(&meta);
        assert!(report.notes.contains(&"title length outside 30-60 characters"));
    }
}
