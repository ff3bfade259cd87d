use std::env;

pub const DEFAULT_LOG_DIR: &str = "storage/logs";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Where rolling log files go and how the console renders events.
#[derive(Clone, Debug)]
pub struct LogConfig {
    /// `LOG_DIR`
    pub dir: String,
    /// `LOG_FORMAT`: `json` switches the console to structured output.
    pub format: LogFormat,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            dir: env::var("LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string()),
            format: parse_format(env::var("LOG_FORMAT").ok().as_deref()),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_LOG_DIR.to_string(),
            format: LogFormat::Compact,
        }
    }
}

fn parse_format(raw: Option<&str>) -> LogFormat {
    match raw.map(str::trim) {
        Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Compact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format(Some("JSON")), LogFormat::Json);
        assert_eq!(parse_format(Some("pretty")), LogFormat::Compact);
        assert_eq!(parse_format(None), LogFormat::Compact);
    }
}
