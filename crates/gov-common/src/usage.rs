use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::openai::ChatCompletionUsage;
use crate::redis::RedisCache;

const USAGE_KEY: &str = "governance_advisor:usage";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UsageStats {
    pub models: Vec<ModelUsageStats>,
    pub redis_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ModelUsageStats {
    pub model: String,
    pub requests: u64,
    pub total_tokens: Option<u64>,
    pub token_counted_requests: u64,
    pub token_unknown_requests: u64,
}

/// Per-model request/token counters, persisted as Redis hash fields so they
/// survive restarts. Counters silently no-op when Redis is unavailable.
#[derive(Clone)]
pub struct UsageTracker {
    redis: std::sync::Arc<RedisCache>,
}

impl UsageTracker {
    pub fn new(redis: std::sync::Arc<RedisCache>) -> Self {
        Self { redis }
    }

    pub async fn record(&self, model: &str, usage: Option<&ChatCompletionUsage>) {
        let _ = self
            .redis
            .hincr_by(USAGE_KEY, &format!("requests:{model}"), 1)
            .await;

        match usage.and_then(|u| u.total_tokens) {
            Some(total) => {
                let _ = self
                    .redis
                    .hincr_by(USAGE_KEY, &format!("tokens_total:{model}"), total as i64)
                    .await;
                let _ = self
                    .redis
                    .hincr_by(USAGE_KEY, &format!("tokens_known_requests:{model}"), 1)
                    .await;
            }
            None => {
                let _ = self
                    .redis
                    .hincr_by(USAGE_KEY, &format!("tokens_unknown_requests:{model}"), 1)
                    .await;
            }
        }
    }

    pub async fn get_usage_stats(&self) -> UsageStats {
        let redis_available = self.redis.is_available().await;
        let Some(entries) = self.redis.hgetall(USAGE_KEY).await else {
            return UsageStats {
                models: vec![],
                redis_available,
            };
        };

        let mut by_model: std::collections::HashMap<String, ModelUsageStats> =
            std::collections::HashMap::new();

        for (field, value) in entries {
            let Some((kind, model)) = field.split_once(':') else {
                continue;
            };
            let stat = by_model.entry(model.to_string()).or_insert(ModelUsageStats {
                model: model.to_string(),
                requests: 0,
                total_tokens: None,
                token_counted_requests: 0,
                token_unknown_requests: 0,
            });

            let parsed = value.parse::<u64>().unwrap_or(0);
            match kind {
                "requests" => stat.requests = parsed,
                "tokens_total" => stat.total_tokens = Some(parsed),
                "tokens_known_requests" => stat.token_counted_requests = parsed,
                "tokens_unknown_requests" => stat.token_unknown_requests = parsed,
                _ => {}
            }
        }

        let mut models: Vec<ModelUsageStats> = by_model.into_values().collect();
        models.sort_by(|a, b| a.model.cmp(&b.model));
        UsageStats {
            models,
            redis_available,
        }
    }
}
