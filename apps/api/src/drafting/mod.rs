#![allow(dead_code)]

//! Email drafting gateway. Library surface — no route calls it yet; the
//! REST layer stays CRUD-only while outreach sending lives elsewhere.

pub mod prompts;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::llm_client::{GenerationParams, TextGenerator};
use crate::models::company::CompanyRow;
use crate::models::prospect::ProspectRow;
use crate::models::template::TemplateRow;

const DRAFT_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.7,
    max_tokens: 1000,
};
const VARIANT_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.8,
    max_tokens: 1000,
};

#[derive(Debug, Clone, Serialize)]
pub struct DraftedEmail {
    pub subject: String,
    pub body: String,
    pub generated_at: DateTime<Utc>,
}

/// An unsaved A/B variant draft. Callers persist it through the template
/// store if they want to keep it.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateDraft {
    pub name: String,
    pub subject: String,
    pub body: String,
    pub company_id: i64,
    pub variant: String,
}

/// Rewrites `template` for one prospect using the generation boundary.
pub async fn generate_personalized_email(
    generator: &dyn TextGenerator,
    prospect: &ProspectRow,
    company: &CompanyRow,
    template: &TemplateRow,
) -> Result<DraftedEmail, AppError> {
    let prompt = prompts::build_personalization_prompt(prospect, company, template);
    let content = generator
        .generate(prompts::PERSONALIZATION_SYSTEM, &prompt, DRAFT_PARAMS)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate personalized email: {e}")))?;

    let (subject, body) = parse_email_content(&content)?;
    Ok(DraftedEmail {
        subject,
        body,
        generated_at: Utc::now(),
    })
}

/// Produces `num_variants` reworded drafts of `base`, one generation call
/// each. The first failed call aborts the rest.
pub async fn create_template_variants(
    generator: &dyn TextGenerator,
    base: &TemplateRow,
    num_variants: u32,
) -> Result<Vec<TemplateDraft>, AppError> {
    let mut variants = Vec::with_capacity(num_variants as usize);
    for i in 1..=num_variants {
        let prompt = prompts::build_variant_prompt(base);
        let content = generator
            .generate(prompts::VARIANT_SYSTEM, &prompt, VARIANT_PARAMS)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to create template variant: {e}")))?;

        let (subject, body) = parse_email_content(&content)?;
        variants.push(TemplateDraft {
            name: format!("{} - Variant {i}", base.name),
            subject,
            body,
            company_id: base.company_id,
            variant: format!("variant_{i}"),
        });
    }
    Ok(variants)
}

/// Parses the SUBJECT:/BODY: response contract. Lines before BODY: that are
/// not the SUBJECT: marker are discarded; non-empty lines after BODY: become
/// the body, newline-joined. A reply without a subject is unusable.
pub fn parse_email_content(content: &str) -> Result<(String, String), AppError> {
    let mut subject = String::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut body_started = false;

    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("SUBJECT:") {
            subject = rest.trim().to_string();
        } else if line.starts_with("BODY:") {
            body_started = true;
        } else if body_started && !line.trim().is_empty() {
            body_lines.push(line);
        }
    }

    if subject.is_empty() {
        return Err(AppError::Llm(
            "Generated content has no SUBJECT line".to_string(),
        ));
    }
    Ok((subject, body_lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use chrono::Utc;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Queue-backed stand-in for the generation boundary.
    struct MockGenerator {
        responses: Mutex<VecDeque<Result<String, LlmError>>>,
    }

    impl MockGenerator {
        fn new(responses: Vec<Result<String, LlmError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait::async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate(
            &self,
            _system: &str,
            _prompt: &str,
            _params: GenerationParams,
        ) -> Result<String, LlmError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }

    fn make_template() -> TemplateRow {
        TemplateRow {
            id: 1,
            name: "Intro".to_string(),
            subject: "Quick question".to_string(),
            body: "Hi there".to_string(),
            company_id: 4,
            is_active: true,
            variant: None,
            performance_metrics: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_parse_subject_and_multiline_body() {
        let content = "SUBJECT: Hello Alice\nBODY:\nLine one\n\nLine two\n";
        let (subject, body) = parse_email_content(content).unwrap();
        assert_eq!(subject, "Hello Alice");
        assert_eq!(body, "Line one\nLine two");
    }

    #[test]
    fn test_parse_discards_preamble_before_markers() {
        let content = "Here is your email:\n\nSUBJECT: Hi\nBODY:\nBest regards\n";
        let (subject, body) = parse_email_content(content).unwrap();
        assert_eq!(subject, "Hi");
        assert_eq!(body, "Best regards");
    }

    #[test]
    fn test_parse_missing_subject_is_error() {
        let content = "BODY:\nJust a body\n";
        assert!(parse_email_content(content).is_err());
    }

    #[test]
    fn test_parse_body_may_be_empty() {
        let (subject, body) = parse_email_content("SUBJECT: Only a subject").unwrap();
        assert_eq!(subject, "Only a subject");
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_variants_named_and_tagged_sequentially() {
        let generator = MockGenerator::new(vec![
            Ok("SUBJECT: First\nBODY:\nA".to_string()),
            Ok("SUBJECT: Second\nBODY:\nB".to_string()),
        ]);
        let variants = create_template_variants(&generator, &make_template(), 2)
            .await
            .unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].name, "Intro - Variant 1");
        assert_eq!(variants[0].variant, "variant_1");
        assert_eq!(variants[1].name, "Intro - Variant 2");
        assert_eq!(variants[1].variant, "variant_2");
        assert_eq!(variants[0].company_id, 4);
        assert_eq!(variants[1].subject, "Second");
    }

    #[tokio::test]
    async fn test_variant_failure_aborts_remaining() {
        let generator = MockGenerator::new(vec![
            Ok("SUBJECT: First\nBODY:\nA".to_string()),
            Err(LlmError::Api {
                status: 500,
                message: "overloaded".to_string(),
            }),
            Ok("SUBJECT: Third\nBODY:\nC".to_string()),
        ]);
        let result = create_template_variants(&generator, &make_template(), 3).await;
        assert!(result.is_err());
        // The third canned response was never consumed.
        assert_eq!(generator.responses.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_personalized_email_parses_generated_content() {
        let generator =
            MockGenerator::new(vec![Ok("SUBJECT: Hi Alice\nBODY:\nShort pitch".to_string())]);
        let prospect = ProspectRow {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@acme.com".to_string(),
            position: Some("CTO".to_string()),
            company_id: 4,
            linkedin_url: None,
            status: "new".to_string(),
            engagement_score: 0,
            last_contacted: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        let company = CompanyRow {
            id: 4,
            name: "Acme".to_string(),
            industry: None,
            website: None,
            description: None,
            company_bio: None,
            product_info: None,
            key_insights: None,
            market_position: None,
            funding_info: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        let draft = generate_personalized_email(&generator, &prospect, &company, &make_template())
            .await
            .unwrap();
        assert_eq!(draft.subject, "Hi Alice");
        assert_eq!(draft.body, "Short pitch");
    }

    #[tokio::test]
    async fn test_unparseable_reply_propagates_error() {
        let generator = MockGenerator::new(vec![Ok("no markers at all".to_string())]);
        let result = create_template_variants(&generator, &make_template(), 1).await;
        assert!(result.is_err());
    }
}
