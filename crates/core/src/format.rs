//! Fragment templates and human-readable number formatting

use crate::constants::{BINARY_PREFIXES, DECIMAL_PREFIXES};

/// Render a binding template
///
/// The first `%s` is replaced by `value` and `%%` collapses to `%`. Any
/// other `%` sequence is copied through unchanged.
pub fn render_template(template: &str, value: &str) -> String {
    let mut out = String::with_capacity(template.len() + value.len());
    let mut substituted = false;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') if !substituted => {
                chars.next();
                out.push_str(value);
                substituted = true;
            }
            _ => out.push('%'),
        }
    }
    out
}

/// Scale `num` by powers of `base` (1024 or 1000) and attach the prefix
///
/// `fmt_human(1536, 1024)` gives `"1.5 Ki"`. Any base other than 1024 uses
/// decimal prefixes.
pub fn fmt_human(num: u64, base: u64) -> String {
    let prefixes: &[&str] = if base == 1024 {
        &BINARY_PREFIXES
    } else {
        &DECIMAL_PREFIXES
    };
    let base = base as f64;
    let mut scaled = num as f64;
    let mut index = 0;
    while index + 1 < prefixes.len() && scaled >= base {
        scaled /= base;
        index += 1;
    }
    format!("{:.1} {}", scaled, prefixes[index])
}
