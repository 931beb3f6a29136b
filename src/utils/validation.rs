use crate::utils::error::{AdvisorError, Result};
use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid_value(field_name: &str, value: &str, reason: impl Into<String>) -> AdvisorError {
    AdvisorError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 推薦服務的位址：必須是帶主機名稱的 http(s) URL
pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.trim().is_empty() {
        return Err(invalid_value(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid_value(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_value(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid_value(field_name, url_str, "URL has no host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid_value(
            field_name,
            url_str,
            "Base URL cannot carry a query string or fragment",
        ));
    }

    Ok(url)
}

/// 設定檔裡的額外標頭要在送出前就能被 reqwest 接受
pub fn validate_header(field_name: &str, name: &str, value: &str) -> Result<()> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| invalid_value(field_name, name, "Not a valid HTTP header name"))?;
    HeaderValue::from_str(value).map_err(|_| {
        invalid_value(
            field_name,
            value,
            format!("Not a valid HTTP header value for '{}'", name),
        )
    })?;
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid_value(
            field_name,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("service.base_url", "https://example.com").is_ok());
        assert!(validate_url("service.base_url", "").is_err());
        assert!(validate_url("service.base_url", "invalid-url").is_err());
        assert!(validate_url("service.base_url", "ftp://example.com").is_err());
        assert!(validate_url("service.base_url", "https://example.com/api?v=2").is_err());
    }

    #[test]
    fn test_validate_url_returns_parsed_url() {
        let url = validate_url("service.base_url", "http://localhost:8080/api").unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(8080));
        assert_eq!(url.path(), "/api");
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("service.timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("service.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("service.timeout_seconds", 301u64, 1, 300).is_err());
    }

    #[test]
    fn test_validate_header() {
        assert!(validate_header("service.headers", "X-Client", "cli").is_ok());
        assert!(validate_header("service.headers", "X Client", "cli").is_err());
        assert!(validate_header("service.headers", "", "cli").is_err());
        assert!(validate_header("service.headers", "X-Client", "a\r\nb").is_err());
    }
}
