use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

/// Prefixes of provider keys that may be echoed back in error bodies.
const KEY_PREFIXES: [&str; 4] = ["sk-", "sess-", "org-", "eyJ"];

/// Markers whose following token is a credential.
const KEY_MARKERS: [&str; 8] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "Bearer ",
    "api_key=",
    "access_token=",
    "\"api_key\":\"",
    "\"access_token\":\"",
    "\"token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|&(_, c)| !is_secret_char(c))
        .map_or(input.len(), |(i, _)| from + i)
}

fn scrub_after_marker(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        // Skip bare markers without a token value.
        if end == content_start {
            search_from = content_start;
            continue;
        }

        scrubbed.replace_range(start..end, REDACTED);
        search_from = start + REDACTED.len();
    }
}

/// Redact credential-looking tokens from provider error text.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    let needs_scrubbing = KEY_PREFIXES
        .iter()
        .chain(KEY_MARKERS.iter())
        .any(|pattern| input.contains(pattern));
    if !needs_scrubbing {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in KEY_MARKERS {
        scrub_after_marker(&mut scrubbed, marker);
    }
    for prefix in KEY_PREFIXES {
        scrub_after_marker(&mut scrubbed, prefix);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and cap the length so an error body fits on one line.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);
    let single_line = scrubbed.split_whitespace().collect::<Vec<_>>().join(" ");

    if single_line.chars().count() <= MAX_API_ERROR_CHARS {
        return single_line;
    }

    let end = single_line
        .char_indices()
        .nth(MAX_API_ERROR_CHARS)
        .map_or(single_line.len(), |(i, _)| i);
    format!("{}...", &single_line[..end])
}
