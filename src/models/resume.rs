use serde::{Deserialize, Deserializer, Serialize};

pub const NO_SKILLS_PLACEHOLDER: &str = "No relevant skills found";
pub const NO_EXPERIENCE_PLACEHOLDER: &str = "No work experience found";

/// Form-ready fields pulled out of an uploaded resume. Never persisted.
/// Missing values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub pincode: String,
    pub skills: String,
    pub experience: String,
    pub year_of_graduation: String,
    pub gender: String,
}

/// Contact details found by pattern matching over the document text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
}

/// In-memory copy of an uploaded resume file. Serializes as metadata only.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip)]
    pub bytes: bytes::Bytes,
}

impl ResumeFile {
    pub fn is_pdf(&self) -> bool {
        let content_type = self.content_type.to_ascii_lowercase();
        if content_type == "application/pdf" {
            return true;
        }
        let generic = content_type.is_empty() || content_type == "application/octet-stream";
        generic && self.file_name.to_ascii_lowercase().ends_with(".pdf")
    }
}

// The provider has served both snake_case and camelCase payloads over time.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderResponse {
    #[serde(default)]
    pub data: Option<ProviderResumeData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderResumeData {
    #[serde(default)]
    pub name: Option<ProviderName>,
    #[serde(default)]
    pub location: Option<ProviderLocation>,
    #[serde(default)]
    pub education: Option<Vec<ProviderEducation>>,
    #[serde(default, alias = "personalInfo")]
    pub personal_info: Option<ProviderPersonalInfo>,
    #[serde(default, deserialize_with = "loose_string")]
    pub gender: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<ProviderSkill>>,
    #[serde(default, alias = "workExperience")]
    pub work_experience: Option<Vec<ProviderWorkExperience>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderName {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderLocation {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub formatted: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub postcode: Option<String>,
}

impl ProviderLocation {
    pub fn display(&self) -> Option<&str> {
        self.text.as_deref().or(self.formatted.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderEducation {
    #[serde(default, alias = "completionDate", deserialize_with = "loose_string")]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub dates: Option<ProviderEducationDates>,
}

impl ProviderEducation {
    pub fn completion(&self) -> Option<&str> {
        self.dates
            .as_ref()
            .and_then(|d| d.completion_date.as_deref())
            .or(self.completion_date.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderEducationDates {
    #[serde(default, alias = "completionDate", deserialize_with = "loose_string")]
    pub completion_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderPersonalInfo {
    #[serde(default, deserialize_with = "loose_string")]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSkill {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderWorkExperience {
    #[serde(default, alias = "jobTitle")]
    pub job_title: Option<String>,
    #[serde(default, alias = "organization")]
    pub organisation: Option<String>,
    #[serde(default)]
    pub dates: Option<ProviderWorkDates>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderWorkDates {
    #[serde(default, alias = "startDate", deserialize_with = "loose_string")]
    pub start_date: Option<String>,
    #[serde(default, alias = "endDate", deserialize_with = "loose_string")]
    pub end_date: Option<String>,
}

fn loose_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
