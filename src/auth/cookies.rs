//! Cookie header parsing and auth cookie naming.

use http::header::COOKIE;
use http::HeaderMap;
use std::collections::HashMap;

/// Environment variables holding the project reference, in priority order
pub const PROJECT_REF_ENV_VARS: [&str; 2] =
    ["NEXT_PUBLIC_SUPABASE_PROJECT_REF", "SUPABASE_PROJECT_ID"];

/// Name of the auth cookie for a project: `sb-<project_ref>-auth-token`
pub fn cookie_name(project_ref: &str) -> String {
    format!("sb-{}-auth-token", project_ref)
}

/// Project reference from the environment, if any
pub fn project_ref_from_env() -> Option<String> {
    PROJECT_REF_ENV_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
}

/// Parse every `Cookie` header into a name/value map
///
/// Values are percent-decoded when they decode to valid UTF-8 and kept
/// verbatim otherwise. When a name repeats, the first value wins.
pub fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for value in headers.get_all(COOKIE) {
        let Ok(raw) = value.to_str() else {
            tracing::warn!("Ignoring non-ASCII Cookie header");
            continue;
        };

        for pair in raw.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            let value = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());

            cookies.entry(name.to_string()).or_insert(value);
        }
    }

    cookies
}

/// Value of cookie `name`, joining chunked cookies (`name.0`, `name.1`, ...)
///
/// Large session cookies are split across numbered chunks; the unchunked
/// cookie takes precedence when both are present.
pub fn cookie_value(cookies: &HashMap<String, String>, name: &str) -> Option<String> {
    if let Some(value) = cookies.get(name) {
        return Some(value.clone());
    }

    let mut joined = String::new();
    for index in 0.. {
        match cookies.get(&format!("{}.{}", name, index)) {
            Some(chunk) => joined.push_str(chunk),
            None => break,
        }
    }

    (!joined.is_empty()).then_some(joined)
}
