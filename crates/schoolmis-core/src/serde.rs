use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Parses RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` and plain dates.
pub fn parse_flexible_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_flexible_datetime(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", s))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_optional_datetime")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parses_plain_date() {
        let parsed = parse_flexible_datetime("2008-03-14").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2008, 3, 14));
    }

    #[test]
    fn test_parses_rfc3339() {
        assert!(parse_flexible_datetime("2024-01-02T10:00:00Z").is_some());
        assert!(parse_flexible_datetime("2024-01-02T10:00:00.123+02:00").is_some());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_flexible_datetime("yesterday").is_none());
        assert!(serde_json::from_str::<Holder>(r#"{"at":"not a date"}"#).is_err());
    }

    #[test]
    fn test_empty_and_missing_are_none() {
        let holder: Holder = serde_json::from_str(r#"{"at":""}"#).unwrap();
        assert!(holder.at.is_none());
        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert!(holder.at.is_none());
    }
}
