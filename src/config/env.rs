//! # Environment Variable Utilities
//!
//! Helpers for reading environment variables with a fallback default.
//! Each reader has a `*_from` twin taking a lookup function, so tests
//! can supply values without touching the process environment.
//!
//! # Examples
//! ```rust
//! use wzs_media::config::env::{read_list_from, read_string_from};
//!
//! let scope = read_string_from(|_| Some("'merge'".into()), "SCOPE");
//! assert_eq!(scope.as_deref(), Some("merge"));
//! let types = read_list_from(|_| Some("image/heic, image/jxl".into()), "TYPES");
//! assert_eq!(types, ["image/heic", "image/jxl"]);
//! ```

/// Strips surrounding whitespace and one layer of quotes.
fn unquote(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// Reads a non-empty string value through `provider`.
pub fn read_string_from<F>(provider: F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    provider(name)
        .map(|v| unquote(&v).to_string())
        .filter(|v| !v.is_empty())
}

/// Reads a comma separated list from the process environment, dropping empty items.
pub fn read_list(name: &str) -> Vec<String> {
    read_list_from(|k| std::env::var(k).ok(), name)
}

/// Same as [`read_list`], reading through `provider`.
pub fn read_list_from<F>(provider: F, name: &str) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    read_string_from(provider, name)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
