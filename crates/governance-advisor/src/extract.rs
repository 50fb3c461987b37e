use regex::Regex;

use crate::model::SelfRatings;

/// Pull self-reported ratings out of the model's markdown reply.
///
/// The prompt asks for a trailing fenced ```json block, but the generator is
/// not contractually guaranteed to emit one, put it last, or keep it well
/// formed. The last parseable ```json block wins; a bare ``` fence is
/// accepted as a fallback. Any parse failure means "ratings unavailable",
/// never an error.
pub fn extract_self_ratings(markdown: &str) -> Option<SelfRatings> {
    let tagged = Regex::new(r"(?s)```json\s*(.*?)```").expect("valid regex");
    if let Some(ratings) = last_parseable_block(&tagged, markdown) {
        return Some(ratings);
    }

    let bare = Regex::new(r"(?s)```\s*(.*?)```").expect("valid regex");
    last_parseable_block(&bare, markdown)
}

fn last_parseable_block(fence: &Regex, markdown: &str) -> Option<SelfRatings> {
    fence
        .captures_iter(markdown)
        .filter_map(|caps| {
            let body = caps.get(1)?.as_str().trim();
            serde_json::from_str::<SelfRatings>(body).ok()
        })
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_tagged_block_parses() {
        let markdown = "## Assessment\n\nSome analysis.\n\n```json\n{\"overall\": 70, \"data_governance\": 60}\n```\n";
        let ratings = extract_self_ratings(markdown).expect("should extract");
        assert_eq!(ratings.overall, 70);
        assert_eq!(ratings.data_governance, Some(60));
        assert_eq!(ratings.transparency, None);
    }

    #[test]
    fn block_in_the_middle_of_prose_parses() {
        let markdown = "Intro.\n\n```json\n{\"overall\": 55}\n```\n\nClosing remarks.";
        assert_eq!(extract_self_ratings(markdown).map(|r| r.overall), Some(55));
    }

    #[test]
    fn last_of_several_blocks_wins() {
        let markdown = "```json\n{\"overall\": 10}\n```\ntext\n```json\n{\"overall\": 90}\n```";
        assert_eq!(extract_self_ratings(markdown).map(|r| r.overall), Some(90));
    }

    #[test]
    fn bare_fence_is_accepted() {
        let markdown = "Result:\n```\n{\"overall\": 42}\n```";
        assert_eq!(extract_self_ratings(markdown).map(|r| r.overall), Some(42));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let markdown = "```json\n{\"overall\": 80, \"confidence\": \"high\"}\n```";
        assert_eq!(extract_self_ratings(markdown).map(|r| r.overall), Some(80));
    }

    #[test]
    fn malformed_json_yields_none() {
        let markdown = "```json\n{\"overall\": }\n```";
        assert!(extract_self_ratings(markdown).is_none());
    }

    #[test]
    fn missing_required_field_yields_none() {
        let markdown = "```json\n{\"data_governance\": 60}\n```";
        assert!(extract_self_ratings(markdown).is_none());
    }

    #[test]
    fn no_fence_yields_none() {
        assert!(extract_self_ratings("Plain markdown without any code block.").is_none());
        assert!(extract_self_ratings("").is_none());
    }
}
