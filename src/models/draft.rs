use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::resume::{ParsedResume, ResumeFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseState {
    #[default]
    Idle,
    Parsing,
    Parsed,
}

/// Editable form fields of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub year_of_graduation: String,
    pub gender: String,
    pub experience: String,
    pub skills: String,
    pub location: String,
    pub pincode: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftFieldsPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub year_of_graduation: Option<String>,
    pub gender: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    pub location: Option<String>,
    pub pincode: Option<String>,
}

/// An application form in progress, held by the portal until submission.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDraft {
    pub id: Uuid,
    pub job_id: i64,
    pub job_title: String,
    pub job_description: String,
    pub resume_name: Option<String>,
    #[serde(skip)]
    pub resume: Option<ResumeFile>,
    pub fields: DraftFields,
    pub parse_state: ParseState,
    #[serde(skip)]
    pub upload_generation: u64,
    #[serde(skip)]
    pub parsed_resume: Option<ParsedResume>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationDraft {
    pub fn new(job_id: i64, job_title: String, job_description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            job_id,
            job_title,
            job_description,
            resume_name: None,
            resume: None,
            fields: DraftFields::default(),
            parse_state: ParseState::Idle,
            upload_generation: 0,
            parsed_resume: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn clear_resume_fields(&mut self) {
        self.resume_name = None;
        self.resume = None;
        self.parsed_resume = None;
        self.fields.phone_number.clear();
        self.fields.email.clear();
        self.fields.first_name.clear();
        self.fields.last_name.clear();
        self.fields.skills.clear();
        self.fields.experience.clear();
    }

    /// Resets resume-derived state for a new file and enters `Parsing`.
    /// Returns the generation the caller must present when applying results.
    pub fn begin_upload(&mut self, file: ResumeFile) -> u64 {
        self.clear_resume_fields();
        self.parse_state = ParseState::Idle;
        self.upload_generation += 1;
        self.resume_name = Some(file.file_name.clone());
        self.resume = Some(file);
        self.parse_state = ParseState::Parsing;
        self.updated_at = Utc::now();
        self.upload_generation
    }

    /// Merges an extraction result. Results from superseded uploads are
    /// ignored and `false` is returned.
    pub fn apply_parsed(&mut self, generation: u64, parsed: ParsedResume) -> bool {
        if generation != self.upload_generation || self.parse_state != ParseState::Parsing {
            return false;
        }
        self.fields.first_name = parsed.first_name.clone();
        self.fields.last_name = parsed.last_name.clone();
        self.fields.email = parsed.email.clone();
        self.fields.phone_number = parsed.phone.clone();
        self.fields.location = parsed.location.clone();
        self.fields.pincode = parsed.pincode.clone();
        self.fields.year_of_graduation = parsed.year_of_graduation.clone();
        self.fields.gender = parsed.gender.clone();
        self.fields.skills = parsed.skills.clone();
        self.fields.experience = parsed.experience.clone();
        self.parsed_resume = Some(parsed);
        self.parse_state = ParseState::Parsed;
        self.updated_at = Utc::now();
        true
    }

    /// Drops the resume and returns to `Idle`; any in-flight parse is orphaned.
    pub fn cancel_resume(&mut self) {
        self.clear_resume_fields();
        self.upload_generation += 1;
        self.parse_state = ParseState::Idle;
        self.updated_at = Utc::now();
    }

    pub fn apply_patch(&mut self, patch: DraftFieldsPatch) {
        let fields = &mut self.fields;
        let targets = [
            (patch.first_name, &mut fields.first_name),
            (patch.last_name, &mut fields.last_name),
            (patch.email, &mut fields.email),
            (patch.phone_number, &mut fields.phone_number),
            (patch.year_of_graduation, &mut fields.year_of_graduation),
            (patch.gender, &mut fields.gender),
            (patch.experience, &mut fields.experience),
            (patch.skills, &mut fields.skills),
            (patch.location, &mut fields.location),
            (patch.pincode, &mut fields.pincode),
        ];
        for (value, slot) in targets {
            if let Some(value) = value {
                *slot = value;
            }
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> ResumeFile {
        ResumeFile {
            file_name: name.to_string(),
            content_type: "application/pdf".to_string(),
            bytes: bytes::Bytes::from_static(b"%PDF-1.4"),
        }
    }

    fn parsed(first: &str) -> ParsedResume {
        ParsedResume {
            first_name: first.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            ..Default::default()
        }
    }

    #[test]
    fn upload_then_parse_reaches_parsed() {
        let mut draft = ApplicationDraft::new(1, "QA ENGINEER".into(), "desc".into());
        let generation = draft.begin_upload(pdf("cv.pdf"));
        assert_eq!(draft.parse_state, ParseState::Parsing);
        assert!(draft.apply_parsed(generation, parsed("Ravi")));
        assert_eq!(draft.parse_state, ParseState::Parsed);
        assert_eq!(draft.fields.first_name, "Ravi");
        assert_eq!(draft.resume_name.as_deref(), Some("cv.pdf"));
    }

    #[test]
    fn stale_parse_result_is_discarded() {
        let mut draft = ApplicationDraft::new(1, "QA ENGINEER".into(), "desc".into());
        let first = draft.begin_upload(pdf("old.pdf"));
        let second = draft.begin_upload(pdf("new.pdf"));
        assert!(draft.apply_parsed(second, parsed("New")));
        assert!(!draft.apply_parsed(first, parsed("Old")));
        assert_eq!(draft.fields.first_name, "New");
    }

    #[test]
    fn cancel_resets_to_idle_and_orphans_parse() {
        let mut draft = ApplicationDraft::new(1, "QA ENGINEER".into(), "desc".into());
        let generation = draft.begin_upload(pdf("cv.pdf"));
        draft.cancel_resume();
        assert_eq!(draft.parse_state, ParseState::Idle);
        assert!(draft.resume.is_none());
        assert!(!draft.apply_parsed(generation, parsed("Late")));
        assert!(draft.fields.first_name.is_empty());
    }

    #[test]
    fn new_upload_does_not_carry_previous_values() {
        let mut draft = ApplicationDraft::new(1, "QA ENGINEER".into(), "desc".into());
        let generation = draft.begin_upload(pdf("a.pdf"));
        draft.apply_parsed(
            generation,
            ParsedResume {
                location: "Pune".into(),
                ..parsed("Anya")
            },
        );
        let generation = draft.begin_upload(pdf("b.pdf"));
        draft.apply_parsed(generation, ParsedResume::default());
        assert_eq!(draft.fields.location, "");
        assert_eq!(draft.fields.first_name, "");
    }

    #[test]
    fn patch_only_touches_provided_fields() {
        let mut draft = ApplicationDraft::new(2, "QA ENGINEER".into(), "desc".into());
        draft.fields.location = "Delhi".into();
        draft.apply_patch(DraftFieldsPatch {
            gender: Some("Female".into()),
            ..Default::default()
        });
        assert_eq!(draft.fields.gender, "Female");
        assert_eq!(draft.fields.location, "Delhi");
    }
}
