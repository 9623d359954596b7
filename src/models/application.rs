use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hiring pipeline stage of an application, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    PhoneScreen,
    TechnicalInterview,
    InterviewScheduled,
    OfferMade,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 7] = [
        ApplicationStatus::Applied,
        ApplicationStatus::PhoneScreen,
        ApplicationStatus::TechnicalInterview,
        ApplicationStatus::InterviewScheduled,
        ApplicationStatus::OfferMade,
        ApplicationStatus::Hired,
        ApplicationStatus::Rejected,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::PhoneScreen => "Phone Screen",
            ApplicationStatus::TechnicalInterview => "Technical Interview",
            ApplicationStatus::InterviewScheduled => "Interview Scheduled",
            ApplicationStatus::OfferMade => "Offer Made",
            ApplicationStatus::Hired => "Hired",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Strict parse of a pipeline label. Accepts the display label or the
    /// variant name, ignoring case and separators.
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "applied" => Some(ApplicationStatus::Applied),
            "phonescreen" => Some(ApplicationStatus::PhoneScreen),
            "technicalinterview" => Some(ApplicationStatus::TechnicalInterview),
            "interviewscheduled" => Some(ApplicationStatus::InterviewScheduled),
            "offermade" => Some(ApplicationStatus::OfferMade),
            "hired" => Some(ApplicationStatus::Hired),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    /// Lenient parse used for server data: "Pending", blanks and unknown
    /// labels all land on `Applied`.
    pub fn from_server_label(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    pub fn progress_percent(&self) -> f64 {
        ((self.index() + 1) as f64 / Self::ALL.len() as f64) * 100.0
    }

    /// No ordering is enforced between stages; only a no-op move is refused.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        *self != next
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ApplicationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ApplicationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ApplicationStatus::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("Unknown application status: {}", raw)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    High,
    Medium,
    Low,
    Unknown,
}

impl MatchBand {
    pub fn from_match(match_percentage: Option<f64>) -> Self {
        match match_percentage {
            None => MatchBand::Unknown,
            Some(m) if m > 75.0 => MatchBand::High,
            Some(m) if m >= 50.0 => MatchBand::Medium,
            Some(_) => MatchBand::Low,
        }
    }
}

/// An application record as served by the HR Desk API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub experience: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub pincode: Option<String>,
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub match_percentage: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub year_of_graduation: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub interview_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Application {
    pub fn pipeline_status(&self) -> ApplicationStatus {
        ApplicationStatus::from_server_label(self.status.as_deref())
    }

    pub fn match_band(&self) -> MatchBand {
        MatchBand::from_match(self.match_percentage)
    }

    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

/// The server stores some numeric-looking fields as numbers, some as strings.
fn deserialize_loose_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => None,
        Some(StringOrNumber::String(s)) => Some(s),
        Some(StringOrNumber::Int(i)) => Some(i.to_string()),
        Some(StringOrNumber::Float(f)) => Some(f.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_round_trip_through_parse() {
        for status in ApplicationStatus::ALL {
            assert_eq!(ApplicationStatus::parse(status.label()), Some(status));
        }
        assert_eq!(
            ApplicationStatus::parse("offer_made"),
            Some(ApplicationStatus::OfferMade)
        );
    }

    #[test]
    fn server_labels_fall_back_to_applied() {
        assert_eq!(ApplicationStatus::from_server_label(Some("Pending")), ApplicationStatus::Applied);
        assert_eq!(ApplicationStatus::from_server_label(None), ApplicationStatus::Applied);
        assert_eq!(
            ApplicationStatus::from_server_label(Some("Hired")),
            ApplicationStatus::Hired
        );
    }

    #[test]
    fn progress_follows_pipeline_order() {
        assert!((ApplicationStatus::Applied.progress_percent() - 100.0 / 7.0).abs() < 1e-9);
        assert!((ApplicationStatus::Rejected.progress_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn match_band_thresholds() {
        assert_eq!(MatchBand::from_match(Some(76.0)), MatchBand::High);
        assert_eq!(MatchBand::from_match(Some(75.0)), MatchBand::Medium);
        assert_eq!(MatchBand::from_match(Some(50.0)), MatchBand::Medium);
        assert_eq!(MatchBand::from_match(Some(49.9)), MatchBand::Low);
        assert_eq!(MatchBand::from_match(None), MatchBand::Unknown);
    }

    #[test]
    fn deserializes_sparse_server_record() {
        let raw = r#"{
            "_id": "a1",
            "firstName": "Asha",
            "pincode": 560001,
            "yearOfGraduation": 2021,
            "matchPercentage": 82,
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;
        let app: Application = serde_json::from_str(raw).unwrap();
        assert_eq!(app.id, "a1");
        assert_eq!(app.pincode.as_deref(), Some("560001"));
        assert_eq!(app.year_of_graduation.as_deref(), Some("2021"));
        assert_eq!(app.match_percentage, Some(82.0));
        assert_eq!(app.pipeline_status(), ApplicationStatus::Applied);
        assert_eq!(app.full_name(), "Asha");
    }
}
