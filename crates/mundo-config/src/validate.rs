//! Parsing helpers for raw environment values.

use std::net::IpAddr;

use crate::error::{ConfigError, ConfigResult};

pub(crate) fn parse_port(field: &'static str, raw: &str) -> ConfigResult<u16> {
    let port = raw
        .parse::<u16>()
        .map_err(|_| ConfigError::invalid(field, raw, "must be an integer between 1 and 65535"))?;
    if port == 0 {
        return Err(ConfigError::invalid(
            field,
            raw,
            "must be an integer between 1 and 65535",
        ));
    }
    Ok(port)
}

pub(crate) fn parse_bind_addr(field: &'static str, raw: &str) -> ConfigResult<IpAddr> {
    raw.parse::<IpAddr>()
        .map_err(|_| ConfigError::invalid(field, raw, "must be an IP address"))
}

pub(crate) fn parse_bool(field: &'static str, raw: &str) -> ConfigResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(field, raw, "must be a boolean")),
    }
}

pub(crate) fn parse_positive_u64(field: &'static str, raw: &str) -> ConfigResult<u64> {
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::invalid(field, raw, "must be a positive integer")),
    }
}

pub(crate) fn parse_site_url(field: &'static str, raw: &str) -> ConfigResult<String> {
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(ConfigError::invalid(field, raw, "must be an http(s) URL"));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

pub(crate) fn parse_phone(field: &'static str, raw: &str) -> ConfigResult<String> {
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.len() < 7 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::invalid(field, raw, "must contain only digits"));
    }
    Ok(digits.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_port_accepts_valid_range() {
        assert!(matches!(parse_port("P", "8080"), Ok(8080)));
        assert!(parse_port("P", "0").is_err());
        assert!(parse_port("P", "70000").is_err());
        assert!(parse_port("P", "http").is_err());
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(matches!(parse_bool("B", "TRUE"), Ok(true)));
        assert!(matches!(parse_bool("B", "off"), Ok(false)));
        assert!(parse_bool("B", "maybe").is_err());
    }

    #[test]
    fn parse_site_url_trims_trailing_slash() {
        assert_eq!(
            parse_site_url("U", "https://example.com/").ok().as_deref(),
            Some("https://example.com")
        );
        assert!(parse_site_url("U", "example.com").is_err());
    }

    #[test]
    fn parse_phone_strips_plus_and_rejects_letters() {
        assert_eq!(
            parse_phone("T", "+573001112233").ok().as_deref(),
            Some("573001112233")
        );
        assert!(parse_phone("T", "57-300").is_err());
    }

    #[test]
    fn parse_positive_u64_rejects_zero() {
        assert!(matches!(parse_positive_u64("N", "10"), Ok(10)));
        assert!(parse_positive_u64("N", "0").is_err());
        assert!(parse_positive_u64("N", "-1").is_err());
    }
}
