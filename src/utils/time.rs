use chrono::{DateTime, NaiveDateTime, Utc};

pub fn from_rfc3339(s: &str) -> chrono::ParseResult<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

/// Accepts RFC 3339 timestamps and the `YYYY-MM-DDTHH:MM[:SS]` form that
/// browser date-time pickers produce.
pub fn is_valid_interview_date(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() {
        return false;
    }
    from_rfc3339(raw).is_ok()
        || NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_picker_and_rfc3339_forms() {
        assert!(is_valid_interview_date("2025-03-14T09:30"));
        assert!(is_valid_interview_date("2025-03-14T09:30:00"));
        assert!(is_valid_interview_date("2025-03-14T09:30:00Z"));
        assert!(!is_valid_interview_date("next tuesday"));
        assert!(!is_valid_interview_date("  "));
    }

    #[test]
    fn rfc3339_offsets_normalize_to_utc() {
        let dt = from_rfc3339("2025-03-14T09:30:00+05:30").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-03-14T04:00:00+00:00");
        assert!(from_rfc3339("2025-03-14").is_err());
    }
}
