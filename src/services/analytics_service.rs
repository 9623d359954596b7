use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::application::{Application, ApplicationStatus};

pub const MATCH_BUCKETS: [&str; 4] = ["0-49%", "50-74%", "75-100%", "N/A"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketCount {
    pub range: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationAnalytics {
    pub total: usize,
    pub average_match: f64,
    pub status_counts: BTreeMap<String, usize>,
    pub match_distribution: Vec<BucketCount>,
}

pub fn average_match(applications: &[Application]) -> f64 {
    let scores: Vec<f64> = applications
        .iter()
        .filter_map(|app| app.match_percentage)
        .collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Counts by the raw status label; a missing label counts as "Applied".
pub fn status_counts(applications: &[Application]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for app in applications {
        let label = app
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(ApplicationStatus::Applied.label());
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}

pub fn match_distribution(applications: &[Application]) -> Vec<BucketCount> {
    let mut counts = [0usize; 4];
    for app in applications {
        let slot = match app.match_percentage {
            None => 3,
            Some(m) if m < 50.0 => 0,
            Some(m) if m < 75.0 => 1,
            Some(_) => 2,
        };
        counts[slot] += 1;
    }
    MATCH_BUCKETS
        .iter()
        .zip(counts)
        .map(|(range, count)| BucketCount {
            range: range.to_string(),
            count,
        })
        .collect()
}

pub fn summarize(applications: &[Application]) -> ApplicationAnalytics {
    ApplicationAnalytics {
        total: applications.len(),
        average_match: average_match(applications),
        status_counts: status_counts(applications),
        match_distribution: match_distribution(applications),
    }
}
