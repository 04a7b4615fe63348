//! CSV prospect import with company reconciliation.
//!
//! Rows are processed in file order. Each row's company is matched by exact
//! name; on a miss the company is created and committed immediately, so a
//! later row naming the same company reuses it. The first failing row aborts
//! the import; rows committed before it stay persisted (no whole-file
//! rollback).

use sqlx::PgPool;
use tracing::info;

use crate::companies;
use crate::errors::AppError;
use crate::models::company::CompanyCreate;
use crate::models::prospect::ProspectCreate;
use crate::prospects;
use crate::validation::is_valid_email;

const REQUIRED_COLUMNS: [&str; 4] = ["company", "name", "email", "title"];

/// One validated CSV row, ready for reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub company: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub company_description: Option<String>,
    pub name: String,
    pub email: String,
    pub title: String,
    pub linkedin: Option<String>,
}

#[derive(Debug, Default)]
pub struct ImportSummary {
    pub companies_created: usize,
    pub prospects_created: usize,
}

/// Parses and validates the whole file before any database work.
/// Line numbers in error messages are 1-based and count the header row.
pub fn parse_rows(text: &str) -> Result<Vec<ImportRow>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::Import(format!("Failed to read CSV header: {e}")))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    for required in REQUIRED_COLUMNS {
        if column(required).is_none() {
            return Err(AppError::Import(format!(
                "Missing required column '{required}'"
            )));
        }
    }
    let company_col = column("company").unwrap();
    let name_col = column("name").unwrap();
    let email_col = column("email").unwrap();
    let title_col = column("title").unwrap();
    let industry_col = column("industry");
    let website_col = column("website");
    let description_col = column("company_description");
    let linkedin_col = column("linkedin");

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let line = index + 2;
        let record = record.map_err(|e| AppError::Import(format!("Row {line}: {e}")))?;

        let required = |col: usize, label: &str| -> Result<String, AppError> {
            match record.get(col).map(str::trim) {
                Some(value) if !value.is_empty() => Ok(value.to_string()),
                _ => Err(AppError::Import(format!(
                    "Row {line}: missing value for '{label}'"
                ))),
            }
        };
        let optional = |col: Option<usize>| -> Option<String> {
            col.and_then(|c| record.get(c))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let email = required(email_col, "email")?;
        if !is_valid_email(&email) {
            return Err(AppError::Import(format!(
                "Row {line}: '{email}' is not a valid email address"
            )));
        }

        rows.push(ImportRow {
            company: required(company_col, "company")?,
            industry: optional(industry_col),
            website: optional(website_col),
            company_description: optional(description_col),
            name: required(name_col, "name")?,
            email,
            title: required(title_col, "title")?,
            linkedin: optional(linkedin_col),
        });
    }

    Ok(rows)
}

/// Runs the reconciling import. Storage errors become ImportError so the
/// whole request surfaces as a 400 with the row's cause, matching the
/// abort-on-first-failure policy.
pub async fn run_import(pool: &PgPool, text: &str) -> Result<ImportSummary, AppError> {
    let rows = parse_rows(text)?;
    let mut summary = ImportSummary::default();

    for row in &rows {
        let company = match companies::store::find_company_by_name(pool, &row.company)
            .await
            .map_err(|e| AppError::Import(format!("Company lookup failed: {e}")))?
        {
            Some(existing) => existing,
            None => {
                let created = companies::store::create_company(
                    pool,
                    &CompanyCreate {
                        name: row.company.clone(),
                        industry: row.industry.clone(),
                        website: row.website.clone(),
                        description: row.company_description.clone(),
                        ..Default::default()
                    },
                )
                .await
                .map_err(|e| {
                    AppError::Import(format!("Failed to create company '{}': {e}", row.company))
                })?;
                summary.companies_created += 1;
                created
            }
        };

        prospects::store::create_prospect(
            pool,
            &ProspectCreate {
                name: row.name.clone(),
                email: row.email.clone(),
                position: Some(row.title.clone()),
                company_id: company.id,
                linkedin_url: row.linkedin.clone(),
                status: None,
                notes: None,
            },
        )
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(d) if d.is_unique_violation() => AppError::Import(format!(
                "A prospect with email '{}' already exists",
                row.email
            )),
            _ => AppError::Import(format!("Failed to create prospect '{}': {e}", row.name)),
        })?;
        summary.prospects_created += 1;
    }

    info!(
        "CSV import complete: {} prospects, {} new companies",
        summary.prospects_created, summary.companies_created
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HEADER: &str =
        "company,industry,website,company_description,name,email,title,linkedin";

    #[test]
    fn test_parses_full_rows_in_order() {
        let csv = format!(
            "{FULL_HEADER}\n\
             Acme,eng,a.com,desc,Alice,alice@acme.com,CTO,li/alice\n\
             Acme,eng,a.com,desc,Bob,bob@acme.com,VP,li/bob\n"
        );
        let rows = parse_rows(&csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Alice");
        assert_eq!(rows[0].title, "CTO");
        assert_eq!(rows[1].email, "bob@acme.com");
        assert_eq!(rows[1].company, "Acme");
        assert_eq!(rows[1].linkedin.as_deref(), Some("li/bob"));
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let csv = "company,name,email,title\n\
                   Acme,Alice,alice@acme.com,CTO\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].industry.is_none());
        assert!(rows[0].website.is_none());
        assert!(rows[0].linkedin.is_none());
    }

    #[test]
    fn test_missing_required_header_fails_fast() {
        let csv = "company,name,title\nAcme,Alice,CTO\n";
        let err = parse_rows(csv).unwrap_err();
        assert!(err.to_string().contains("email"), "got: {err}");
    }

    #[test]
    fn test_empty_required_value_reports_row_number() {
        let csv = "company,name,email,title\n\
                   Acme,Alice,alice@acme.com,CTO\n\
                   ,Bob,bob@acme.com,VP\n";
        let err = parse_rows(csv).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Row 3"), "got: {message}");
        assert!(message.contains("company"), "got: {message}");
    }

    #[test]
    fn test_malformed_email_rejected() {
        let csv = "company,name,email,title\n\
                   Acme,Alice,not-an-email,CTO\n";
        let err = parse_rows(csv).unwrap_err();
        assert!(err.to_string().contains("not-an-email"), "got: {err}");
    }

    #[test]
    fn test_blank_optional_cell_becomes_none() {
        let csv = format!(
            "{FULL_HEADER}\n\
             Acme,,a.com,,Alice,alice@acme.com,CTO,\n"
        );
        let rows = parse_rows(&csv).unwrap();
        assert!(rows[0].industry.is_none());
        assert!(rows[0].company_description.is_none());
        assert!(rows[0].linkedin.is_none());
        assert_eq!(rows[0].website.as_deref(), Some("a.com"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let csv = "company,name,email,title\n\
                   Acme , Alice , alice@acme.com , CTO \n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].company, "Acme");
        assert_eq!(rows[0].name, "Alice");
    }

    #[test]
    fn test_empty_file_has_no_rows() {
        let rows = parse_rows("company,name,email,title\n").unwrap();
        assert!(rows.is_empty());
    }
}
