//! CheerLights feed response parsing
//!
//! The feed endpoint returns a small JSON object whose `field2` member
//! holds the latest color as a `#RRGGBB` string. The full contract is
//! one known string field, so the body is scanned directly instead of
//! pulling in a JSON deserializer.

use crate::color::{HexColorError, Rgb};

/// Recoverable failures while interpreting a feed response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedError {
    /// Response is not a parseable HTTP response
    MalformedResponse,
    /// Non-2xx HTTP status
    Status(u16),
    /// Body has no `field2` string member
    MissingField,
    /// `field2` is not a decodable hex color
    BadColor(HexColorError),
}

/// JSON member holding the latest color
const COLOR_FIELD: &str = "field2";

/// Split a raw HTTP response into status code and body
///
/// Requests are issued as HTTP/1.0, so the body runs from the blank
/// line to the end of the stream - no chunked encoding to deal with.
pub fn split_response(raw: &str) -> Result<(u16, &str), FeedError> {
    let status_line = raw.lines().next().ok_or(FeedError::MalformedResponse)?;
    if !status_line.starts_with("HTTP/1.") {
        return Err(FeedError::MalformedResponse);
    }

    let code = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or(FeedError::MalformedResponse)?;

    let body_start = raw
        .find("\r\n\r\n")
        .map(|i| i + 4)
        .ok_or(FeedError::MalformedResponse)?;

    Ok((code, &raw[body_start..]))
}

/// Extract the latest color from a full HTTP response
pub fn parse_response(raw: &str) -> Result<Rgb, FeedError> {
    let (status, body) = split_response(raw)?;
    if !(200..300).contains(&status) {
        return Err(FeedError::Status(status));
    }
    parse_last_color(body)
}

/// Extract the latest color from a feed JSON body
pub fn parse_last_color(body: &str) -> Result<Rgb, FeedError> {
    let value = json_str_member(body, COLOR_FIELD).ok_or(FeedError::MissingField)?;
    Rgb::from_hex(value).map_err(FeedError::BadColor)
}

/// Find the string value of `"key": "..."` in a flat JSON object
///
/// Hex color strings never contain escapes, so a plain scan to the
/// closing quote is sufficient.
fn json_str_member<'a>(body: &'a str, key: &str) -> Option<&'a str> {
    let mut rest = body;
    loop {
        let start = rest.find('"')? + 1;
        let end = start + rest[start..].find('"')?;
        let candidate = &rest[start..end];
        rest = &rest[end + 1..];

        if candidate != key {
            continue;
        }

        let rest_trimmed = rest.trim_start();
        let after_colon = rest_trimmed.strip_prefix(':')?.trim_start();
        let value = after_colon.strip_prefix('"')?;
        let value_end = value.find('"')?;
        return Some(&value[..value_end]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str =
        r##"{"created_at":"2024-05-01T10:00:00Z","entry_id":987654,"field2":"#00FF00"}"##;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_last_color(BODY), Ok(Rgb::new(0, 255, 0)));
    }

    #[test]
    fn test_parse_body_with_spacing() {
        let body = r##"{ "field2" : "#FF8800" }"##;
        assert_eq!(parse_last_color(body), Ok(Rgb::new(255, 136, 0)));
    }

    #[test]
    fn test_missing_field() {
        let body = r##"{"field1":"#00FF00"}"##;
        assert_eq!(parse_last_color(body), Err(FeedError::MissingField));
    }

    #[test]
    fn test_bad_color_value() {
        let body = r#"{"field2":"00112233"}"#;
        assert_eq!(
            parse_last_color(body),
            Err(FeedError::BadColor(HexColorError::Length))
        );
    }

    #[test]
    fn test_success_response() {
        let raw = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n\
                   {\"field2\":\"#00FF00\"}";
        assert_eq!(parse_response(raw), Ok(Rgb::new(0, 255, 0)));
    }

    #[test]
    fn test_server_error_response() {
        let raw = "HTTP/1.1 500 Internal Server Error\r\n\r\noops";
        assert_eq!(parse_response(raw), Err(FeedError::Status(500)));
    }

    #[test]
    fn test_garbage_response() {
        assert_eq!(
            parse_response("not http at all"),
            Err(FeedError::MalformedResponse)
        );
    }
}
