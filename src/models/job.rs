use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub employment_type: String,
}

const CATALOG: [(i64, &str, &str); 5] = [
    (
        1,
        "SOFTWARE DEVELOPER",
        "Design and develop high-volume, low-latency applications for mission-critical systems, ensuring top-tier availability and performance.",
    ),
    (
        2,
        "QA ENGINEER",
        "Experience in manual and automation testing. Knowledge of Java Programming.",
    ),
    (
        3,
        "SALES EXECUTIVE",
        "Build rapport with contacts and understand where the prospect is in the buying process.",
    ),
    (
        4,
        "APP DEVELOPMENT",
        "Build rapport with contacts and understand where the prospect is in the buying process.",
    ),
    (
        5,
        "WEB DEVELOPMENT",
        "Build rapport with contacts and understand where the prospect is in the buying process.",
    ),
];

/// Openings advertised on the portal.
pub fn catalog() -> Vec<Job> {
    CATALOG
        .iter()
        .map(|(id, title, description)| Job {
            id: *id,
            title: title.to_string(),
            description: description.to_string(),
            employment_type: "Full time".to_string(),
        })
        .collect()
}

pub fn find(id: i64) -> Option<Job> {
    catalog().into_iter().find(|job| job.id == id)
}
