use std::fmt::Write as _;

use crate::model::VendorRecord;
use crate::server::AssessSystemParams;

pub const SYSTEM_PROMPT: &str = "You are an AI governance ideation assistant. \
You help teams think through the governance posture of proposed AI systems \
and respond in well-structured markdown.";

/// Build the assessment prompt from the caller's answers plus vendor risk
/// context. The model is always asked to end with a fenced JSON block of
/// self-reported ratings; extraction treats that block as optional.
pub fn build_assessment_prompt(
    params: &AssessSystemParams,
    vendors: &[&VendorRecord],
    readiness_score: Option<u8>,
) -> String {
    let mut prompt = String::new();

    writeln!(
        prompt,
        "Assess the governance readiness of the following proposed AI system."
    )
    .ok();
    writeln!(prompt).ok();
    writeln!(prompt, "System name: {}", params.system_name.trim()).ok();
    writeln!(prompt, "Purpose: {}", params.purpose.trim()).ok();
    if let Some(data_practices) = non_empty(params.data_practices.as_deref()) {
        writeln!(prompt, "Data practices: {data_practices}").ok();
    }
    if let Some(vendor_text) = non_empty(params.third_party_vendors.as_deref()) {
        writeln!(prompt, "Third-party vendors/APIs: {vendor_text}").ok();
    }

    if !vendors.is_empty() {
        writeln!(prompt).ok();
        writeln!(prompt, "Known vendor risk context:").ok();
        for vendor in vendors {
            writeln!(prompt, "- {} ({})", vendor.name, vendor.id).ok();
            for item in &vendor.risk_items {
                writeln!(prompt, "  - [{}] {}", item.severity.label(), item.description).ok();
            }
            if let Some(transparency) = non_empty(vendor.transparency.as_deref()) {
                writeln!(prompt, "  - transparency: {transparency}").ok();
            }
            if let Some(notes) = non_empty(vendor.compliance_notes.as_deref()) {
                writeln!(prompt, "  - compliance: {notes}").ok();
            }
        }
        if let Some(score) = readiness_score {
            writeln!(
                prompt,
                "Heuristic vendor readiness score (0-100, from the catalog above): {score}"
            )
            .ok();
        }
    }

    writeln!(prompt).ok();
    writeln!(
        prompt,
        "Respond in markdown with sections for strengths, governance gaps, and \
recommended next steps. End your response with a fenced ```json code block \
containing your self-reported ratings, shaped exactly like:"
    )
    .ok();
    writeln!(prompt, "```json").ok();
    writeln!(
        prompt,
        "{{\"overall\": 0-100, \"data_governance\": 0-100, \"transparency\": 0-100, \"accountability\": 0-100, \"summary\": \"one sentence\"}}"
    )
    .ok();
    writeln!(prompt, "```").ok();

    prompt
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RiskItem, Severity};

    fn params() -> AssessSystemParams {
        AssessSystemParams {
            system_name: "Support Copilot".to_string(),
            purpose: "Draft replies to customer tickets".to_string(),
            third_party_vendors: Some("openai gpt-4o".to_string()),
            data_practices: Some("stores ticket text for 30 days".to_string()),
            model: None,
        }
    }

    fn vendor() -> VendorRecord {
        VendorRecord {
            id: "openai".to_string(),
            name: "OpenAI".to_string(),
            aliases: vec!["gpt-4o".to_string()],
            risk_items: vec![RiskItem {
                severity: Severity::High,
                description: "training data provenance undisclosed".to_string(),
            }],
            transparency: Some("model cards published".to_string()),
            compliance_notes: None,
        }
    }

    #[test]
    fn interpolates_every_provided_field() {
        let prompt = build_assessment_prompt(&params(), &[], None);
        assert!(prompt.contains("Support Copilot"));
        assert!(prompt.contains("Draft replies to customer tickets"));
        assert!(prompt.contains("stores ticket text for 30 days"));
        assert!(prompt.contains("openai gpt-4o"));
    }

    #[test]
    fn omits_absent_optional_fields() {
        let mut p = params();
        p.data_practices = None;
        p.third_party_vendors = None;
        let prompt = build_assessment_prompt(&p, &[], None);
        assert!(!prompt.contains("Data practices:"));
        assert!(!prompt.contains("Third-party vendors/APIs:"));
    }

    #[test]
    fn vendor_context_appears_only_when_matched() {
        let without = build_assessment_prompt(&params(), &[], None);
        assert!(!without.contains("Known vendor risk context"));

        let v = vendor();
        let with = build_assessment_prompt(&params(), &[&v], Some(90));
        assert!(with.contains("Known vendor risk context"));
        assert!(with.contains("OpenAI"));
        assert!(with.contains("training data provenance undisclosed"));
        assert!(with.contains("model cards published"));
        assert!(with.contains("score (0-100, from the catalog above): 90"));
    }

    #[test]
    fn always_requests_the_json_block() {
        let prompt = build_assessment_prompt(&params(), &[], None);
        assert!(prompt.contains("```json"));
        assert!(prompt.contains("\"overall\""));
    }
}
