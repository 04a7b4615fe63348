use crate::models::company::CompanyRow;
use crate::models::prospect::ProspectRow;
use crate::models::template::TemplateRow;

pub const PERSONALIZATION_SYSTEM: &str = "You are an expert sales email writer \
    who creates highly personalized and effective outreach emails.";

pub const VARIANT_SYSTEM: &str = "You are an expert in email marketing and A/B testing.";

fn or_blank(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Personalization prompt: prospect and company facts plus the base
/// template, with the SUBJECT:/BODY: response contract the parser expects.
pub fn build_personalization_prompt(
    prospect: &ProspectRow,
    company: &CompanyRow,
    template: &TemplateRow,
) -> String {
    format!(
        "Generate a personalized email based on the following context:\n\
         \n\
         Prospect Information:\n\
         - Name: {prospect_name}\n\
         - Position: {position}\n\
         - Company: {company_name}\n\
         - Industry: {industry}\n\
         \n\
         Company Information:\n\
         - Name: {company_name}\n\
         - Industry: {industry}\n\
         - Description: {description}\n\
         - Key Insights: {key_insights}\n\
         - Market Position: {market_position}\n\
         \n\
         Base Template:\n\
         Subject: {subject}\n\
         Body: {body}\n\
         \n\
         Please generate a personalized version of this email that:\n\
         1. References specific details about the prospect's company and role\n\
         2. Includes relevant industry insights\n\
         3. Maintains a professional yet conversational tone\n\
         4. Focuses on value proposition relevant to their position\n\
         5. Includes a clear call to action\n\
         \n\
         Format the response as:\n\
         SUBJECT: [personalized subject]\n\
         BODY: [personalized body]",
        prospect_name = prospect.name,
        position = or_blank(&prospect.position),
        company_name = company.name,
        industry = or_blank(&company.industry),
        description = or_blank(&company.description),
        key_insights = or_blank(&company.key_insights),
        market_position = or_blank(&company.market_position),
        subject = template.subject,
        body = template.body,
    )
}

/// Variant prompt: rewording for A/B testing, same response contract.
pub fn build_variant_prompt(template: &TemplateRow) -> String {
    format!(
        "Create a variant of this email template for A/B testing:\n\
         \n\
         Original Subject: {subject}\n\
         Original Body: {body}\n\
         \n\
         Create a variant that:\n\
         1. Maintains the same core message\n\
         2. Uses different wording and structure\n\
         3. Tests different value propositions\n\
         4. Has a different call to action\n\
         \n\
         Format the response as:\n\
         SUBJECT: [variant subject]\n\
         BODY: [variant body]",
        subject = template.subject,
        body = template.body,
    )
}
