use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::Candidate;

/// Clock behind offer-letter issue dates and reference codes.
///
/// The reference code is derived from wall-clock time, so two renderings of
/// the same letter differ. That is accepted behavior carried over from the
/// original process; injecting the source keeps it pinnable in tests.
pub trait ReferenceSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production source reading the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemReference;

impl ReferenceSource for SystemReference {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Free-text fields substituted into the offer-letter layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferLetterTemplate {
    pub company_name: String,
    pub company_address: String,
    pub hr_manager: String,
    pub position: String,
    pub start_date: String,
    pub location: String,
    pub employment_type: String,
    pub salary: String,
    pub response_deadline: String,
    pub additional_terms: String,
}

impl Default for OfferLetterTemplate {
    fn default() -> Self {
        Self {
            company_name: "Your Organisation Name".to_string(),
            company_address: "123 Business Street, City, Postcode".to_string(),
            hr_manager: "HR Manager Name".to_string(),
            position: String::new(),
            start_date: "To be confirmed upon completion of all checks".to_string(),
            location: "To be discussed".to_string(),
            employment_type: "Full-time".to_string(),
            salary: "To be discussed".to_string(),
            response_deadline: "7 business days".to_string(),
            additional_terms: "This offer is contingent upon the successful completion of all \
                pre-employment requirements, including background checks, employment references, \
                and address verification."
                .to_string(),
        }
    }
}

/// A rendered offer letter. Never persisted; regenerated on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferLetter {
    pub reference: String,
    pub issued_on: String,
    pub body: String,
}

/// Reference code: candidate name with whitespace removed, upper-cased, plus
/// the last six digits of the issue timestamp in milliseconds.
pub fn reference_code(name: &str, issued_at: DateTime<Utc>) -> String {
    let condensed: String = name.split_whitespace().collect();
    let millis = issued_at.timestamp_millis().to_string();
    let tail_start = millis.len().saturating_sub(6);
    format!("{}-{}", condensed.to_uppercase(), &millis[tail_start..])
}

/// Render the offer document for a candidate. Pure given the injected source.
pub fn render(
    candidate: &Candidate,
    template: &OfferLetterTemplate,
    source: &dyn ReferenceSource,
) -> OfferLetter {
    let issued_at = source.now();
    let issued_on = issued_at.format("%-d %B %Y").to_string();
    let reference = reference_code(&candidate.name, issued_at);

    let position = if template.position.trim().is_empty() {
        candidate.role.as_str()
    } else {
        template.position.as_str()
    };

    let body = format!(
        "{company_name}\n\
         {company_address}\n\
         \n\
         Date: {issued_on}\n\
         \n\
         Dear {name},\n\
         \n\
         We are pleased to offer you the position of {position} at {company_name}.\n\
         \n\
         {additional_terms}\n\
         \n\
         Key Details:\n\
         - Position: {position}\n\
         - Start Date: {start_date}\n\
         - Location: {location}\n\
         - Employment Type: {employment_type}\n\
         - Salary: {salary}\n\
         \n\
         Please review this offer carefully. If you accept this offer, please respond within \
         {response_deadline}.\n\
         \n\
         We look forward to welcoming you to our team.\n\
         \n\
         Best regards,\n\
         {hr_manager}\n\
         HR Manager\n\
         \n\
         Reference: {reference}\n\
         \n\
         ---\n\
         E-Signature Required Below\n\
         Please sign this document electronically to accept the offer.\n\
         \n\
         Candidate Signature: _________________\n\
         Date: _________________\n\
         \n\
         HR Manager Signature: _________________\n\
         Date: _________________",
        company_name = template.company_name,
        company_address = template.company_address,
        issued_on = issued_on,
        name = candidate.name,
        position = position,
        additional_terms = template.additional_terms,
        start_date = template.start_date,
        location = template.location,
        employment_type = template.employment_type,
        salary = template.salary,
        response_deadline = template.response_deadline,
        hr_manager = template.hr_manager,
        reference = reference,
    );

    OfferLetter {
        reference,
        issued_on,
        body,
    }
}
