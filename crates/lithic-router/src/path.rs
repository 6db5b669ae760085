//! Path pattern compilation and matching.

use regex::Regex;

use crate::error::{Result, RouterError};

/// A compiled path pattern.
///
/// Patterns are segment based: literal segments plus `:name` parameter
/// segments. Matching is anchored (the whole path must be consumed) and
/// accepts an optional trailing slash.
///
/// # Example
///
/// ```
/// use lithic_router::Matcher;
///
/// let matcher = Matcher::compile("/posts/:id/comments/:comment_id").unwrap();
/// let captures = matcher.test("/posts/123/comments/456").unwrap();
/// assert_eq!(captures[0].as_deref(), Some("123"));
/// assert_eq!(captures[1].as_deref(), Some("456"));
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl Matcher {
    /// Compiles a path pattern string into a reusable matcher.
    pub fn compile(pattern: &str) -> Result<Self> {
        let mut param_names = Vec::new();
        let mut regex_str = String::from("^");

        for part in pattern.split('/').filter(|s| !s.is_empty()) {
            regex_str.push('/');

            if let Some(name) = part.strip_prefix(':') {
                param_names.push(name.to_string());
                regex_str.push_str("([^/]+)");
            } else {
                regex_str.push_str(&regex::escape(part));
            }
        }

        regex_str.push_str("/?$");

        let regex = Regex::new(&regex_str).map_err(|err| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            param_names,
        })
    }

    /// Tests a concrete path against this pattern.
    ///
    /// On success, returns the raw captured values in pattern-declaration
    /// order; pair them positionally with [`Matcher::param_names`].
    pub fn test(&self, path: &str) -> Option<Vec<Option<String>>> {
        let caps = self.regex.captures(path)?;

        Some(
            (1..=self.param_names.len())
                .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
                .collect(),
        )
    }

    /// Returns the original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the parameter names in declaration order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }
}

/// Percent-decodes a captured path value.
///
/// Empty values are returned untouched, and a malformed escape keeps its
/// literal text instead of failing the match.
pub(crate) fn decode_param(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let Some(hex) = value.get(i + 1..i + 3) {
                if let Ok(byte) = u8::from_str_radix(hex, 16) {
                    out.push(byte);
                    i += 3;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}
