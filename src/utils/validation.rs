use crate::utils::error::{DirectoryError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> DirectoryError {
    DirectoryError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Database endpoints are plain http(s) URLs.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }
    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    match path {
        "" => Err(invalid(field_name, path, "Path cannot be empty")),
        p if p.contains('\0') => Err(invalid(field_name, path, "Path contains null bytes")),
        _ => Ok(()),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(field_name, value, format!("Must be at least {}", min_value)));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Required"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
            .expect("static email pattern")
    })
}

fn time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("static time pattern"))
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    if !email_regex().is_match(value.trim()) {
        return Err(invalid(field_name, value, "Invalid email address"));
    }
    Ok(())
}

/// International format: a leading `+` and 10 to 15 digits. Spaces, dashes
/// and parentheses are ignored.
pub fn validate_phone(field_name: &str, value: &str) -> Result<()> {
    let compact: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    let digits = compact.strip_prefix('+').unwrap_or("");
    let ok = compact.starts_with('+')
        && (10..=15).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit());

    if !ok {
        return Err(invalid(field_name, value, "Phone must look like +380XXXXXXXXX"));
    }
    Ok(())
}

pub fn validate_time_of_day(field_name: &str, value: &str) -> Result<()> {
    if !time_regex().is_match(value.trim()) {
        return Err(invalid(field_name, value, "Time must be HH:MM (24h)"));
    }
    Ok(())
}

/// Keys the database accepts as a single path segment: non-empty, none of
/// `/ . # $ [ ]` and no control characters.
pub fn is_valid_key(value: &str) -> bool {
    !value.is_empty()
        && !value
            .chars()
            .any(|c| matches!(c, '/' | '.' | '#' | '$' | '[' | ']') || c.is_control())
}

pub fn validate_key(field_name: &str, value: &str) -> Result<()> {
    if !is_valid_key(value) {
        return Err(invalid(
            field_name,
            value,
            "Must be non-empty without / . # $ [ ] or control characters",
        ));
    }
    Ok(())
}

/// Runs every check and folds the failures into one `ValidationError`.
pub fn collect_errors(checks: Vec<Result<()>>) -> Result<()> {
    let errors: Vec<String> = checks
        .into_iter()
        .filter_map(|check| check.err())
        .map(|err| match err {
            DirectoryError::InvalidConfigValueError { field, reason, .. } => {
                format!("{}: {}", field, reason)
            }
            DirectoryError::MissingConfigError { field } => format!("{}: is required", field),
            other => other.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DirectoryError::ValidationError { errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("database_url", "https://example.firebaseio.com").is_ok());
        assert!(validate_url("database_url", "http://localhost:9000").is_ok());
        assert!(validate_url("database_url", "").is_err());
        assert!(validate_url("database_url", "invalid-url").is_err());
        assert!(validate_url("database_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path_and_range() {
        assert!(validate_path("output_path", "./output").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "out\0put").is_err());

        assert!(validate_range("child_age", 17u32, 0, 17).is_ok());
        match validate_range("child_age", 18u32, 0, 17) {
            Err(DirectoryError::InvalidConfigValueError { field, value, reason }) => {
                assert_eq!(field, "child_age");
                assert_eq!(value, "18");
                assert_eq!(reason, "Must be between 0 and 17");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("pages", 2, 1).is_ok());
        assert!(validate_positive_number("pages", 0, 1).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "mom@example.com").is_ok());
        assert!(validate_email("email", "a.b+c@mail.co.uk").is_ok());
        assert!(validate_email("email", "mom@example").is_err());
        assert!(validate_email("email", "not an email").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("phone", "+380501234567").is_ok());
        assert!(validate_phone("phone", "+38 (050) 123-45-67").is_ok());
        assert!(validate_phone("phone", "380501234567").is_err());
        assert!(validate_phone("phone", "+12345").is_err());
        assert!(validate_phone("phone", "+38050abc4567").is_err());
    }

    #[test]
    fn test_validate_time_of_day() {
        assert!(validate_time_of_day("time", "09:30").is_ok());
        assert!(validate_time_of_day("time", "23:59").is_ok());
        assert!(validate_time_of_day("time", "24:00").is_err());
        assert!(validate_time_of_day("time", "9:30").is_err());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("nanny_id", "-Nx1_a").is_ok());
        assert!(validate_key("nanny_id", "42").is_ok());
        assert!(validate_key("nanny_id", "").is_err());
        for bad in ["a/b", "..", "a.b", "a#b", "a$b", "a[0]", "a\nb"] {
            assert!(validate_key("nanny_id", bad).is_err(), "{:?} accepted", bad);
        }
    }

    #[test]
    fn test_collect_errors_keeps_every_failure() {
        let result = collect_errors(vec![
            validate_non_empty_string("address", ""),
            validate_email("email", "x@example.com"),
            validate_time_of_day("time", "99:99"),
        ]);

        match result {
            Err(DirectoryError::ValidationError { errors }) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].starts_with("address:"));
                assert!(errors[1].starts_with("time:"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
