//! Catalog lookup: first-match-wins, two passes.
//!
//! 1. Containment: the pattern is inside the text, or the text is inside the pattern.
//! 2. Token overlap: any whitespace-delimited pattern token is inside the text.
//!
//! Both passes scan in catalog order and stop at the first hit. There is no
//! ranking; an earlier entry always beats a later one.

use serde::Serialize;

use crate::chatbot::catalog::{Catalog, QaEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPass {
    Containment,
    TokenOverlap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogMatch<'a> {
    pub entry: &'a QaEntry,
    pub pass: MatchPass,
}

/// Finds the catalog entry for already-normalized text.
/// Text that is empty after trimming never matches.
pub fn find_match<'a>(catalog: &'a Catalog, normalized: &str) -> Option<CatalogMatch<'a>> {
    let text = normalized.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let folded: Vec<(&QaEntry, String)> = catalog
        .entries()
        .iter()
        .map(|e| (e, e.pattern.to_lowercase()))
        .collect();

    let contained = folded
        .iter()
        .find(|(_, pattern)| pattern.contains(text.as_str()) || text.contains(pattern.as_str()))
        .map(|(entry, _)| *entry);
    if let Some(entry) = contained {
        return Some(CatalogMatch {
            entry,
            pass: MatchPass::Containment,
        });
    }

    folded
        .iter()
        .find(|(_, pattern)| pattern.split_whitespace().any(|token| text.contains(token)))
        .map(|(entry, _)| CatalogMatch {
            entry: *entry,
            pass: MatchPass::TokenOverlap,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(patterns: &[&str]) -> Catalog {
        Catalog::new(
            patterns
                .iter()
                .enumerate()
                .map(|(i, p)| QaEntry {
                    id: i as u32 + 1,
                    pattern: p.to_string(),
                    response: format!("answer {}", i + 1),
                })
                .collect(),
        )
        .unwrap()
    }

    fn matched_id(catalog: &Catalog, text: &str) -> Option<u32> {
        find_match(catalog, text).map(|m| m.entry.id)
    }

    #[test]
    fn test_exact_pattern_matches_itself() {
        let c = catalog(&["reset my password", "apply for a job", "update skills"]);
        for entry in c.entries() {
            let m = find_match(&c, &entry.pattern).unwrap();
            assert_eq!(m.entry, entry);
            assert_eq!(m.pass, MatchPass::Containment);
        }
    }

    #[test]
    fn test_builtin_exact_patterns_resolve_to_self_or_earlier_contained_entry() {
        let c = Catalog::builtin().unwrap();
        for entry in c.entries() {
            let m = find_match(&c, &entry.pattern).unwrap();
            if m.entry.id != entry.id {
                assert!(m.entry.id < entry.id);
                assert!(entry.pattern.contains(&m.entry.pattern));
            }
        }
    }

    #[test]
    fn test_builtin_entry_41_is_shadowed_by_entry_21() {
        let c = Catalog::builtin().unwrap();
        let entry_41 = c.get(41).unwrap();
        assert_eq!(matched_id(&c, &entry_41.pattern), Some(21));
    }

    #[test]
    fn test_first_contained_pattern_wins() {
        let c = catalog(&["profile photo", "jobs", "photo"]);
        assert_eq!(
            matched_id(&c, "where do I see jobs and change my profile photo"),
            Some(1)
        );
        assert_eq!(matched_id(&c, "a photo of jobs"), Some(2));
    }

    #[test]
    fn test_text_inside_pattern_matches() {
        let c = catalog(&["how do I update my availability"]);
        let m = find_match(&c, "update my availability").unwrap();
        assert_eq!(m.pass, MatchPass::Containment);
    }

    #[test]
    fn test_token_overlap_used_when_containment_misses() {
        let c = catalog(&["salary date", "contractor team invite"]);
        let m = find_match(&c, "please invite my brother").unwrap();
        assert_eq!(m.entry.id, 2);
        assert_eq!(m.pass, MatchPass::TokenOverlap);
    }

    #[test]
    fn test_token_overlap_prefers_catalog_order_over_overlap_count() {
        let c = catalog(&["open jobs", "nearby jobs filter location"]);
        assert_eq!(matched_id(&c, "filter nearby location jobs"), Some(1));
    }

    #[test]
    fn test_containment_beats_earlier_token_overlap() {
        let c = catalog(&["salary slip", "attendance"]);
        let m = find_match(&c, "salary attendance").unwrap();
        assert_eq!(m.entry.id, 2);
        assert_eq!(m.pass, MatchPass::Containment);
    }

    #[test]
    fn test_no_overlap_is_no_match() {
        let c = Catalog::builtin().unwrap();
        assert_eq!(matched_id(&c, "completely unrelated gibberish xyz123"), None);
    }

    #[test]
    fn test_empty_and_whitespace_text_never_match() {
        let c = catalog(&["anything"]);
        assert_eq!(matched_id(&c, ""), None);
        assert_eq!(matched_id(&c, "  \n\t "), None);
    }

    #[test]
    fn test_case_is_folded_on_both_sides() {
        let c = catalog(&["Upload Photo"]);
        assert_eq!(matched_id(&c, "where is UPLOAD PHOTO?"), Some(1));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let c = catalog(&["attendance"]);
        assert_eq!(
            find_match(&c, "  attendance  ").map(|m| m.pass),
            Some(MatchPass::Containment)
        );
    }

    #[test]
    fn test_matching_is_deterministic() {
        let c = Catalog::builtin().unwrap();
        let text = "میں اپنی تنخواہ کب دیکھوں";
        let first = matched_id(&c, text);
        for _ in 0..10 {
            assert_eq!(matched_id(&c, text), first);
        }
    }
}
