use crate::models::application::Application;

/// Distinct, non-empty job titles in the order they first appear.
pub fn job_titles(applications: &[Application]) -> Vec<String> {
    let mut titles: Vec<String> = Vec::new();
    for title in applications
        .iter()
        .filter_map(|app| app.job_title.as_deref())
        .filter(|t| !t.trim().is_empty())
    {
        if !titles.iter().any(|seen| seen == title) {
            titles.push(title.to_string());
        }
    }
    titles
}

/// Case-insensitive job title filter. `None` keeps everything.
pub fn filter_by_job_title(applications: Vec<Application>, job_title: Option<&str>) -> Vec<Application> {
    let Some(wanted) = job_title.map(str::trim).filter(|t| !t.is_empty()) else {
        return applications;
    };
    let wanted = wanted.to_lowercase();
    applications
        .into_iter()
        .filter(|app| {
            app.job_title
                .as_deref()
                .map(|t| t.to_lowercase() == wanted)
                .unwrap_or(false)
        })
        .collect()
}

/// Highest match first; applications without a score rank as 0.
pub fn sort_by_match_desc(applications: &mut [Application]) {
    applications.sort_by(|a, b| {
        let a = a.match_percentage.unwrap_or(0.0);
        let b = b.match_percentage.unwrap_or(0.0);
        b.total_cmp(&a)
    });
}

/// Filter then rank, as every dashboard list does.
pub fn ranked(applications: Vec<Application>, job_title: Option<&str>) -> Vec<Application> {
    let mut filtered = filter_by_job_title(applications, job_title);
    sort_by_match_desc(&mut filtered);
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: &str, title: Option<&str>, score: Option<f64>) -> Application {
        Application {
            id: id.to_string(),
            job_title: title.map(str::to_string),
            match_percentage: score,
            ..Default::default()
        }
    }

    #[test]
    fn titles_are_unique_and_ordered() {
        let apps = vec![
            app("1", Some("QA ENGINEER"), None),
            app("2", Some(""), None),
            app("3", Some("WEB DEVELOPMENT"), None),
            app("4", None, None),
            app("5", Some("QA ENGINEER"), None),
        ];
        assert_eq!(job_titles(&apps), vec!["QA ENGINEER", "WEB DEVELOPMENT"]);
    }

    #[test]
    fn filter_ignores_case_and_skips_untitled() {
        let apps = vec![
            app("1", Some("QA Engineer"), None),
            app("2", None, None),
            app("3", Some("Sales Executive"), None),
        ];
        let filtered = filter_by_job_title(apps.clone(), Some("qa engineer"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
        assert_eq!(filter_by_job_title(apps, None).len(), 3);
    }

    #[test]
    fn ranking_is_stable_and_treats_missing_as_zero() {
        let apps = vec![
            app("a", None, None),
            app("b", None, Some(40.0)),
            app("c", None, Some(90.0)),
            app("d", None, Some(0.0)),
            app("e", None, Some(40.0)),
        ];
        let ids: Vec<String> = ranked(apps, None).into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["c", "b", "e", "a", "d"]);
    }
}
