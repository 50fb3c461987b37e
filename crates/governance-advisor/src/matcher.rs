use crate::model::VendorRecord;

/// Return the catalog vendors mentioned in `text`.
///
/// A vendor matches when its canonical name or any alias occurs as a
/// contiguous, case-insensitive substring of the input. Matching is not
/// tokenized, so punctuation-adjacent mentions count ("gpt-4o" matches
/// inside "gpt-4o-mini"). Output preserves catalog order, and a vendor
/// matching on several aliases appears once. Empty or all-whitespace input
/// matches nothing.
pub fn match_vendors<'a>(text: &str, catalog: &'a [VendorRecord]) -> Vec<&'a VendorRecord> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let haystack = text.to_lowercase();

    catalog
        .iter()
        .filter(|vendor| {
            std::iter::once(vendor.name.as_str())
                .chain(vendor.aliases.iter().map(String::as_str))
                .any(|needle| haystack.contains(&needle.to_lowercase()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RiskItem, Severity};

    fn vendor(id: &str, name: &str, aliases: &[&str]) -> VendorRecord {
        VendorRecord {
            id: id.to_string(),
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            risk_items: vec![RiskItem {
                severity: Severity::Low,
                description: "placeholder".to_string(),
            }],
            transparency: None,
            compliance_notes: None,
        }
    }

    fn catalog() -> Vec<VendorRecord> {
        vec![
            vendor("openai", "OpenAI", &["gpt-4", "gpt4", "gpt", "chatgpt"]),
            vendor("anthropic", "Anthropic", &["claude"]),
            vendor("mistral", "Mistral AI", &["mistral", "mixtral"]),
        ]
    }

    #[test]
    fn empty_and_whitespace_input_match_nothing() {
        let catalog = catalog();
        assert!(match_vendors("", &catalog).is_empty());
        assert!(match_vendors("   ", &catalog).is_empty());
        assert!(match_vendors("\t\n", &catalog).is_empty());
    }

    #[test]
    fn unrecognized_text_matches_nothing() {
        let catalog = catalog();
        assert!(match_vendors("we built everything in-house", &catalog).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = catalog();
        let upper = match_vendors("OPENAI GPT-4", &catalog);
        let lower = match_vendors("openai gpt-4", &catalog);
        let upper_ids: Vec<&str> = upper.iter().map(|v| v.id.as_str()).collect();
        let lower_ids: Vec<&str> = lower.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(upper_ids, lower_ids);
        assert_eq!(upper_ids, vec!["openai"]);
    }

    #[test]
    fn alias_matches_as_substring() {
        let catalog = catalog();
        let matched = match_vendors("I'm using chatgpt for this", &catalog);
        assert!(matched.iter().any(|v| v.id == "openai"));
    }

    #[test]
    fn punctuation_adjacent_mentions_count() {
        let catalog = catalog();
        let matched = match_vendors("using gpt-4o-mini in production", &catalog);
        assert!(matched.iter().any(|v| v.id == "openai"));
    }

    #[test]
    fn vendor_matching_multiple_aliases_appears_once() {
        let catalog = catalog();
        let matched = match_vendors("gpt-4 gpt4 gpt", &catalog);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "openai");
    }

    #[test]
    fn canonical_name_matches_without_alias() {
        let catalog = vec![vendor("cohere", "Cohere", &[])];
        let matched = match_vendors("evaluating cohere embeddings", &catalog);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn match_then_score_end_to_end() {
        let acme = VendorRecord {
            id: "acme".to_string(),
            name: "Acme AI".to_string(),
            aliases: vec!["acme-ai".to_string()],
            risk_items: vec![
                RiskItem {
                    severity: Severity::High,
                    description: "no audit trail".to_string(),
                },
                RiskItem {
                    severity: Severity::High,
                    description: "undisclosed subprocessors".to_string(),
                },
                RiskItem {
                    severity: Severity::Medium,
                    description: "vague retention policy".to_string(),
                },
            ],
            transparency: None,
            compliance_notes: None,
        };
        let beta = VendorRecord {
            id: "beta".to_string(),
            name: "Beta Labs".to_string(),
            aliases: vec!["beta".to_string()],
            risk_items: vec![RiskItem {
                severity: Severity::Low,
                description: "single region only".to_string(),
            }],
            transparency: None,
            compliance_notes: None,
        };
        let catalog = vec![acme, beta];

        let matched = match_vendors("We integrate acme-ai and beta services", &catalog);
        let ids: Vec<&str> = matched.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["acme", "beta"]);
        // 100 - 10*2 - 5*1 - 2*1
        assert_eq!(crate::scorer::readiness_score(&matched), Some(73));
    }

    #[test]
    fn result_preserves_catalog_order() {
        let catalog = catalog();
        let matched = match_vendors("we use mistral alongside claude and chatgpt", &catalog);
        let ids: Vec<&str> = matched.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["openai", "anthropic", "mistral"]);
    }
}
