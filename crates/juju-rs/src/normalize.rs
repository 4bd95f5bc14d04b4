//! Cleanup of raw CLI output
//!
//! The juju CLI may print warnings or banners ahead of the JSON body
//! (deprecation notices, controller upgrade hints). Everything before the
//! first opening brace is dropped; what follows is left untouched.

/// Return `raw` starting at the first `{`
///
/// Leading lines without a brace are discarded, as is any text before the
/// brace on the line that has one. Output without any brace normalizes to
/// the empty string.
///
/// # Examples
///
/// ```
/// use juju_rs::normalize::normalize_output;
///
/// let raw = "WARNING controller is out of date\n{\"machines\":{}}";
/// assert_eq!(normalize_output(raw), "{\"machines\":{}}");
/// assert_eq!(normalize_output(normalize_output(raw)), normalize_output(raw));
/// ```
pub fn normalize_output(raw: &str) -> &str {
    match raw.find('{') {
        Some(start) => &raw[start..],
        None => "",
    }
}
