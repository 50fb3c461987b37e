/// MCP server for AI governance assessments.
///
/// Exposes six tools:
/// - `assess_system`: full pipeline — vendor match, heuristic score, prompt,
///   chat completion, self-rating extraction
/// - `match_vendors`: the two pure core functions only, no LLM call
/// - `list_vendors` / `get_vendor`: catalog lookup
/// - `list_models`: upstream model discovery
/// - `get_usage_stats`: per-model request/token counters
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use gov_common::openai::{ChatCompletionRequest, Message, ModelListResponse, OpenAiClient};
use gov_common::usage::{UsageStats, UsageTracker};

use crate::cache::AssessmentCache;
use crate::extract::extract_self_ratings;
use crate::matcher;
use crate::model::{SelfRatings, VendorRecord};
use crate::prompt::{SYSTEM_PROMPT, build_assessment_prompt};
use crate::scorer;
use crate::throttle::UpstreamThrottle;

#[derive(Clone)]
pub struct GovernanceAdvisorServer {
    catalog: Arc<Vec<VendorRecord>>,
    openai: Arc<OpenAiClient>,
    cache: Arc<AssessmentCache>,
    usage: UsageTracker,
    throttle: Option<UpstreamThrottle>,
    default_model: String,
    tool_router: ToolRouter<GovernanceAdvisorServer>,
}

impl GovernanceAdvisorServer {
    pub fn new(
        catalog: Vec<VendorRecord>,
        openai: Arc<OpenAiClient>,
        cache: Arc<AssessmentCache>,
        usage: UsageTracker,
        throttle: Option<UpstreamThrottle>,
        default_model: String,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            openai,
            cache,
            usage,
            throttle,
            default_model,
            tool_router: Self::tool_router(),
        }
    }

    async fn gate(&self) -> Result<(), String> {
        if let Some(throttle) = &self.throttle {
            throttle.check().await?;
        }
        Ok(())
    }
}

/// Structured answers describing the proposed AI system.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AssessSystemParams {
    /// Name of the proposed system.
    pub system_name: String,
    /// What the system is for and who uses it.
    pub purpose: String,
    /// Free-text mention of third-party vendors/APIs, exactly as entered.
    /// Matched against the vendor catalog; may be omitted.
    pub third_party_vendors: Option<String>,
    /// How the system collects, stores, and shares data.
    pub data_practices: Option<String>,
    /// Chat model override; defaults to the configured model.
    pub model: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct AssessSystemResponse {
    /// The model's full markdown assessment.
    markdown: String,
    /// Catalog vendors recognized in `third_party_vendors`, in catalog order.
    vendors: Vec<VendorRecord>,
    /// Heuristic readiness score from the catalog; absent when no vendors matched.
    readiness_score: Option<u8>,
    /// Ratings the model reported about its own assessment, when parseable.
    self_ratings: Option<SelfRatings>,
    model: String,
    cached: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct MatchVendorsParams {
    /// Free text to scan for known vendor names and aliases.
    text: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct MatchVendorsResponse {
    vendors: Vec<VendorRecord>,
    readiness_score: Option<u8>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct GetVendorParams {
    /// Stable vendor id such as "openai" or "anthropic".
    vendor_id: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct VendorSummary {
    id: String,
    name: String,
    high_risks: usize,
    medium_risks: usize,
    low_risks: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
struct VendorListResponse {
    vendors: Vec<VendorSummary>,
}

#[tool_router]
impl GovernanceAdvisorServer {
    #[tool(description = "Assess a proposed AI system: match its vendor mentions against the catalog, compute a heuristic readiness score, and get a markdown governance assessment (with self-reported ratings) from the configured chat model.")]
    async fn assess_system(
        &self,
        Parameters(params): Parameters<AssessSystemParams>,
    ) -> Result<Json<AssessSystemResponse>, String> {
        if params.system_name.trim().is_empty() {
            return Err("system_name must not be empty".to_string());
        }
        if params.purpose.trim().is_empty() {
            return Err("purpose must not be empty".to_string());
        }
        let model = params
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.default_model)
            .to_string();

        let vendor_text = params.third_party_vendors.clone().unwrap_or_default();
        let matched = matcher::match_vendors(&vendor_text, &self.catalog);
        let score = scorer::readiness_score(&matched);
        let prompt = build_assessment_prompt(&params, &matched, score);

        if let Some(markdown) = self.cache.get_assessment(&model, &prompt).await {
            info!(model = %model, "assessment cache hit");
            return Ok(Json(assemble(markdown, &matched, score, model, true)));
        }

        self.gate().await?;

        let request = ChatCompletionRequest {
            model: model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.clone(),
                },
            ],
            temperature: None,
            max_tokens: None,
        };
        let response = self
            .openai
            .chat_completions(request, None)
            .await
            .map_err(|e| format!("assessment failed: {e}"))?;

        let markdown = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .map(|s| s.to_string())
            .ok_or_else(|| "assessment failed: missing choices[0].message.content".to_string())?;

        self.usage.record(&model, response.usage.as_ref()).await;
        self.cache.set_assessment(&model, &prompt, &markdown).await;

        Ok(Json(assemble(markdown, &matched, score, model, false)))
    }

    #[tool(description = "Match free text against the vendor catalog and compute the heuristic readiness score. No LLM call. Empty text is valid and matches nothing.")]
    async fn match_vendors(
        &self,
        Parameters(params): Parameters<MatchVendorsParams>,
    ) -> Result<Json<MatchVendorsResponse>, String> {
        let matched = matcher::match_vendors(&params.text, &self.catalog);
        let readiness_score = scorer::readiness_score(&matched);
        Ok(Json(MatchVendorsResponse {
            vendors: matched.into_iter().cloned().collect(),
            readiness_score,
        }))
    }

    #[tool(description = "List the vendor catalog in order with per-severity risk item counts.")]
    async fn list_vendors(&self) -> Result<Json<VendorListResponse>, String> {
        let vendors = self
            .catalog
            .iter()
            .map(|v| {
                let (high_risks, medium_risks, low_risks) = v.severity_counts();
                VendorSummary {
                    id: v.id.clone(),
                    name: v.name.clone(),
                    high_risks,
                    medium_risks,
                    low_risks,
                }
            })
            .collect();
        Ok(Json(VendorListResponse { vendors }))
    }

    #[tool(description = "Get the full catalog record for one vendor by its stable id.")]
    async fn get_vendor(
        &self,
        Parameters(params): Parameters<GetVendorParams>,
    ) -> Result<Json<VendorRecord>, String> {
        let vendor_id = params.vendor_id.trim().to_string();
        if vendor_id.is_empty() {
            return Err("vendor_id must not be empty".to_string());
        }
        let vendor = self
            .catalog
            .iter()
            .find(|v| v.id.eq_ignore_ascii_case(&vendor_id))
            .ok_or_else(|| format!("vendor not found: {vendor_id}"))?;
        Ok(Json(vendor.clone()))
    }

    #[tool(description = "List models available from the upstream OpenAI-compatible endpoint (GET /models).")]
    async fn list_models(&self) -> Result<Json<ModelListResponse>, String> {
        self.gate().await?;
        let models = self
            .openai
            .list_models()
            .await
            .map_err(|e| format!("list_models failed: {e}"))?;
        Ok(Json(models))
    }

    #[tool(description = "Get usage stats aggregated per model (requests + tokens when reported by upstream).")]
    async fn get_usage_stats(&self) -> Result<Json<UsageStats>, String> {
        let stats = self.usage.get_usage_stats().await;
        Ok(Json(stats))
    }
}

fn assemble(
    markdown: String,
    matched: &[&VendorRecord],
    readiness_score: Option<u8>,
    model: String,
    cached: bool,
) -> AssessSystemResponse {
    let self_ratings = extract_self_ratings(&markdown);
    AssessSystemResponse {
        vendors: matched.iter().map(|v| (*v).clone()).collect(),
        markdown,
        readiness_score,
        self_ratings,
        model,
        cached,
    }
}

#[tool_handler]
impl ServerHandler for GovernanceAdvisorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "governance-advisor".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "AI governance advisor MCP server. Use assess_system to get a full \
markdown governance assessment of a proposed AI system (vendor risk matching, a \
heuristic 0-100 readiness score, and the model's self-reported ratings). Use \
match_vendors for the catalog matching and scoring alone, list_vendors/get_vendor \
to browse the catalog, list_models to discover upstream models, and \
get_usage_stats for request/token counters."
                    .to_string(),
            ),
        }
    }
}
