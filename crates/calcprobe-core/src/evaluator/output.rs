//! Stdout normalization and log previews

/// Join wrapped output lines into one string
///
/// Removes every `\r` and `\n`; with `strip_continuations`, a `\` directly
/// before a line break is removed as well.
pub fn normalize_stdout(text: &str, strip_continuations: bool) -> String {
    let joined = if strip_continuations {
        text.replace("\\\r\n", "").replace("\\\n", "")
    } else {
        text.to_string()
    };
    joined.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

pub(super) fn preview(output: &str, max_chars: usize) -> String {
    if output.chars().count() > max_chars {
        let head: String = output.chars().take(max_chars).collect();
        format!("{}... (truncated)", head)
    } else {
        output.to_string()
    }
}

pub(super) fn tail(output: &str) -> String {
    let len = output.chars().count();
    if len > 20 {
        output.chars().skip(len - 10).collect()
    } else {
        output.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_removes_line_breaks() {
        assert_eq!(normalize_stdout("4\n", true), "4");
        assert_eq!(normalize_stdout("1\r\n2\n3", false), "123");
    }

    #[test]
    fn test_normalize_strips_continuations() {
        let wrapped = "1234\\\n5678\\\r\n90\n";
        assert_eq!(normalize_stdout(wrapped, true), "1234567890");
        assert_eq!(normalize_stdout(wrapped, false), "1234\\5678\\90");
    }

    #[test]
    fn test_preview_truncates() {
        let long = "9".repeat(150);
        let shown = preview(&long, 100);
        assert!(shown.ends_with("... (truncated)"));
        assert_eq!(shown.len(), 100 + "... (truncated)".len());
        assert_eq!(preview("42", 100), "42");
    }

    #[test]
    fn test_tail() {
        assert_eq!(tail("short"), "short");
        assert_eq!(tail(&format!("{}0123456789", "x".repeat(20))), "0123456789");
    }
}
