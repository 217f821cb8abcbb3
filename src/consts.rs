//! Project-wide constants.

/// Default model when `COPILOT_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Maximum characters accepted in one submission.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 5000;

/// Upper bound for `max_tokens` on each completion.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1500;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Format a number with comma separators (e.g. 1,234,567).
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}
