//! Plain-text report helpers

use reqwest::header::HeaderMap;
use std::io::{self, Write};

/// Write each header as `name: value`, one per line.
pub fn write_headers<W: Write>(out: &mut W, headers: &HeaderMap) -> io::Result<()> {
    for (name, value) in headers {
        writeln!(
            out,
            "{}: {}",
            name,
            String::from_utf8_lossy(value.as_bytes())
        )?;
    }
    Ok(())
}

/// Write a header dump framed by a titled rule and a closing rule of equal width.
pub fn write_header_block<W: Write>(
    out: &mut W,
    title: &str,
    headers: &HeaderMap,
) -> io::Result<()> {
    let banner = format!("--- {} ---", title);
    writeln!(out, "\n{}", banner)?;
    write_headers(out, headers)?;
    writeln!(out, "{}", "-".repeat(banner.chars().count()))
}

/// First `max` characters of `value`.
pub fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, LOCATION};

    fn render(headers: &HeaderMap, title: Option<&str>) -> String {
        let mut out = Vec::new();
        match title {
            Some(title) => write_header_block(&mut out, title, headers).unwrap(),
            None => write_headers(&mut out, headers).unwrap(),
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static("https://bucket/obj"));
        headers.insert("x-amz-request-id", HeaderValue::from_static("ABC123"));
        let text = render(&headers, None);
        assert!(text.contains("location: https://bucket/obj\n"));
        assert!(text.contains("x-amz-request-id: ABC123\n"));
    }

    #[test]
    fn test_header_block_rules() {
        let headers = HeaderMap::new();
        let text = render(&headers, Some("S3 Response Headers"));
        assert_eq!(
            text,
            "\n--- S3 Response Headers ---\n---------------------------\n"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 50), "ab");
    }
}
