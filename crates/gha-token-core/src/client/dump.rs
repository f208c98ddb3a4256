//! HTTP/1.1 style text dumps of requests and responses for verbose runs.

use std::fmt::Write;

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Request, StatusCode, Version};

/// Render the request line, `Host` and headers. The credential in
/// `Authorization` is replaced by `<REDACTED>`, keeping the scheme.
pub(crate) fn format_request(request: &Request) -> String {
    let url = request.url();
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}",
        request.method(),
        target,
        version_label(request.version())
    );

    if let Some(host) = url.host_str() {
        match url.port() {
            Some(port) => {
                let _ = writeln!(out, "Host: {}:{}", host, port);
            }
            None => {
                let _ = writeln!(out, "Host: {}", host);
            }
        }
    }

    for (name, value) in request.headers() {
        let value = if *name == AUTHORIZATION {
            redact_credential(value.to_str().unwrap_or_default())
        } else {
            String::from_utf8_lossy(value.as_bytes()).into_owned()
        };
        let _ = writeln!(out, "{}: {}", canonical_name(name.as_str()), value);
    }

    out
}

/// Render the status line, headers and body.
pub(crate) fn format_response(
    status: StatusCode,
    version: Version,
    headers: &HeaderMap,
    body: &str,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", version_label(version), status);

    for (name, value) in headers {
        let _ = writeln!(
            out,
            "{}: {}",
            canonical_name(name.as_str()),
            String::from_utf8_lossy(value.as_bytes())
        );
    }

    out.push('\n');
    out.push_str(body);
    out
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/1.1",
    }
}

/// `x-github-request-id` -> `X-Github-Request-Id`
fn canonical_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn redact_credential(value: &str) -> String {
    match value.split_once(' ') {
        Some((scheme, _)) => format!("{} <REDACTED>", scheme),
        None => "<REDACTED>".to_string(),
    }
}

#[cfg(test)]
#[path = "dump_tests.rs"]
mod tests;
