/// Redis caching for assessment responses.
///
/// Only the model's raw markdown is cached, keyed by a digest of
/// (model, prompt). Vendor matching, scoring, and rating extraction always
/// recompute — derived scores are never stored. A cache hit skips the
/// network call; everything degrades gracefully when Redis is down.
use std::sync::Arc;

use sha2::{Digest, Sha256};

use gov_common::redis::RedisCache;

const KEY_PREFIX: &str = "govadv:v1:";
const ASSESSMENT_TTL_SECS: u64 = 3600;

pub struct AssessmentCache {
    redis: Arc<RedisCache>,
}

impl AssessmentCache {
    pub fn new(redis: Arc<RedisCache>) -> Self {
        Self { redis }
    }

    pub async fn get_assessment(&self, model: &str, prompt: &str) -> Option<String> {
        self.redis.get(&assessment_key(model, prompt)).await
    }

    pub async fn set_assessment(&self, model: &str, prompt: &str, markdown: &str) {
        self.redis
            .set_with_ttl(&assessment_key(model, prompt), markdown, ASSESSMENT_TTL_SECS)
            .await;
    }
}

/// Deterministic cache key from the model and the exact prompt text.
fn assessment_key(model: &str, prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(model.as_bytes());
    hasher.update(b"|");
    hasher.update(prompt.as_bytes());
    let hash = hasher.finalize();
    format!("{KEY_PREFIX}assessment:{:x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_depends_on_model_and_prompt() {
        let a = assessment_key("gpt-4o-mini", "prompt one");
        let b = assessment_key("gpt-4o-mini", "prompt two");
        let c = assessment_key("gpt-4o", "prompt one");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, assessment_key("gpt-4o-mini", "prompt one"));
        assert!(a.starts_with("govadv:v1:assessment:"));
    }
}
