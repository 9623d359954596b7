use crate::error::{Error, Result};
use crate::models::resume::{
    ContactDetails, ParsedResume, ProviderResponse, ProviderResumeData, ProviderSkill,
    ProviderWorkExperience, ResumeFile, NO_EXPERIENCE_PLACEHOLDER, NO_SKILLS_PLACEHOLDER,
};
use regex::Regex;
use reqwest::{multipart, Client};
use std::sync::OnceLock;
use tracing::{error, info, warn};

/// Provider skill names that say nothing about a candidate's fit.
pub const EXCLUDED_SKILLS: [&str; 7] = [
    "Marketing",
    "Marketing Materials",
    "Sensors",
    "Analytics",
    "Intranet",
    "Digital Marketing",
    "Management",
];

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| {
        Regex::new(r"\b(?:\+91[-\s]?)?\d{5}[-\s]?\d{5}\b").expect("phone pattern is valid")
    })
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}\b")
            .expect("email pattern is valid")
    })
}

/// Turns uploaded resumes into form-ready fields.
///
/// PDFs get a local text pass for contact details, then every file is sent
/// to the parsing provider for the structured fields. Both passes are best
/// effort: a failure is logged and leaves the affected fields empty.
#[derive(Clone)]
pub struct ResumeService {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl ResumeService {
    pub fn new(api_url: String, api_key: Option<String>, client: Client) -> Self {
        if api_key.is_some() {
            info!("Resume parsing provider enabled at {}", api_url);
        } else {
            info!("Resume parsing provider disabled (AFFINDA_API_KEY not set)");
        }
        Self {
            client,
            api_url,
            api_key,
        }
    }

    pub fn is_remote_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn extract(&self, file: &ResumeFile) -> ParsedResume {
        let mut parsed = ParsedResume::default();

        if file.is_pdf() {
            let bytes = file.bytes.clone();
            let text = match tokio::task::spawn_blocking(move || extract_pdf_text(&bytes)).await {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    error!(file = %file.file_name, error = %e, "Error extracting text from PDF");
                    String::new()
                }
                Err(e) => {
                    error!(file = %file.file_name, error = %e, "PDF extraction task failed");
                    String::new()
                }
            };
            let contacts = extract_contact_details(&text);
            info!(
                file = %file.file_name,
                found_email = !contacts.email.is_empty(),
                found_phone = !contacts.phone.is_empty(),
                "Analyzed extracted resume text"
            );
            parsed.email = contacts.email;
            parsed.phone = contacts.phone;
        }

        match self.parse_remote(file).await {
            Ok(Some(data)) => apply_provider_data(&mut parsed, data),
            Ok(None) => warn!(file = %file.file_name, "No data received from resume parser"),
            Err(e) => error!(file = %file.file_name, error = %e, "Error parsing resume with provider"),
        }

        parsed
    }

    async fn parse_remote(&self, file: &ResumeFile) -> Result<Option<ProviderResumeData>> {
        let Some(api_key) = &self.api_key else {
            return Ok(None);
        };

        let mut part = multipart::Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
        if !file.content_type.is_empty() {
            part = part.mime_str(&file.content_type)?;
        }
        let form = multipart::Form::new().part("file", part);

        info!(file = %file.file_name, "Sending resume to parsing provider");
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let payload = response.json::<ProviderResponse>().await?;
        Ok(payload.data)
    }
}

/// Concatenates the text of every page in page order, pages separated by a
/// single space. Pages that fail to decode are skipped.
pub fn extract_pdf_text(data: &[u8]) -> Result<String> {
    let doc = lopdf::Document::load_mem(data)
        .map_err(|e| Error::BadRequest(format!("Unreadable PDF: {}", e)))?;

    let mut text = String::new();
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push(' ');
            }
            Err(e) => warn!("Failed to extract text from page {}: {}", page_num, e),
        }
    }
    Ok(text)
}

/// First phone number and first email address in document order.
pub fn extract_contact_details(text: &str) -> ContactDetails {
    ContactDetails {
        email: email_regex()
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        phone: phone_regex()
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    }
}

pub fn filter_skills(skills: Option<&[ProviderSkill]>) -> String {
    let joined = skills
        .unwrap_or_default()
        .iter()
        .filter_map(|skill| skill.name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty() && !EXCLUDED_SKILLS.contains(name))
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        NO_SKILLS_PLACEHOLDER.to_string()
    } else {
        joined
    }
}

pub fn format_experience(entries: Option<&[ProviderWorkExperience]>) -> String {
    let lines: Vec<String> = entries
        .unwrap_or_default()
        .iter()
        .map(|entry| {
            let (start, end) = entry
                .dates
                .as_ref()
                .map(|d| (d.start_date.as_deref(), d.end_date.as_deref()))
                .unwrap_or((None, None));
            format!(
                "{} at {}, {}–{}",
                entry.job_title.as_deref().unwrap_or_default(),
                entry.organisation.as_deref().unwrap_or_default(),
                start.unwrap_or_default(),
                end.filter(|e| !e.is_empty()).unwrap_or("Present"),
            )
        })
        .collect();

    if lines.is_empty() {
        NO_EXPERIENCE_PLACEHOLDER.to_string()
    } else {
        lines.join("\n")
    }
}

fn apply_provider_data(parsed: &mut ParsedResume, data: ProviderResumeData) {
    let name = data.name.unwrap_or_default();
    let location = data.location.unwrap_or_default();

    parsed.first_name = name.first.unwrap_or_default();
    parsed.last_name = name.last.unwrap_or_default();
    parsed.location = location.display().unwrap_or_default().to_string();
    parsed.pincode = location.postcode.unwrap_or_default();
    parsed.year_of_graduation = data
        .education
        .as_deref()
        .and_then(|e| e.first())
        .and_then(|e| e.completion())
        .unwrap_or_default()
        .to_string();
    parsed.gender = data
        .personal_info
        .and_then(|p| p.gender)
        .or(data.gender)
        .unwrap_or_default();
    parsed.skills = filter_skills(data.skills.as_deref());
    parsed.experience = format_experience(data.work_experience.as_deref());
}
