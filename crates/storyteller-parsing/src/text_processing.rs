use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;

/// Lines that carry page furniture rather than script content.
pub(crate) static DEFAULT_IGNORE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Page numbers: "12", "12."
        r"^\d{1,4}\.?$",
        // "Page 3", "Page 3 of 40"
        r"(?i)^page \d+( of \d+)?$",
        // Screenplay continuation markers
        r"^\((MORE|CONTINUED|CONT'D)\)$",
        r"^(CONTINUED|CONTINUED:)$",
    ]
    .into_iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Expand common typographic ligatures found in PDFs.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}

/// Fold curly quotes and apostrophes to their ASCII forms.
///
/// Screenplay software emits `CONT’D` with a typographic apostrophe; folding
/// keeps cue detection to a single spelling.
pub fn fold_quotes(text: &str) -> String {
    text.replace(['\u{2018}', '\u{2019}', '\u{02BC}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
}

/// Remove Markdown emphasis markers.
///
/// - `"**Scene 1**"` → `"Scene 1"`
/// - a line made only of `*` characters is dropped entirely
pub fn strip_markdown_emphasis(text: &str) -> String {
    static STAR_ONLY_LINE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?m)^[ \t]*\*+[ \t]*$\n?").unwrap());
    static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*{1,3}|_{2,3}").unwrap());

    let without_rules = STAR_ONLY_LINE.replace_all(text, "");
    EMPHASIS.replace_all(&without_rules, "").into_owned()
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalise raw extracted text before segmentation.
pub fn normalize_script_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = expand_ligatures(&text);
    let text = fold_quotes(&text);
    strip_markdown_emphasis(&text)
}

/// Resolve the configured ignore-line patterns against the defaults.
pub(crate) fn ignore_patterns(config: &ParsingConfig) -> Vec<Regex> {
    config.ignore_line_patterns.resolve(&DEFAULT_IGNORE_PATTERNS)
}

/// Whether a (trimmed) line is page furniture that should be skipped.
pub(crate) fn is_ignored_line(line: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|re| re.is_match(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_ligatures() {
        assert_eq!(expand_ligatures("ﬁnding ﬂow"), "finding flow");
        assert_eq!(expand_ligatures("no ligatures here"), "no ligatures here");
    }

    #[test]
    fn test_fold_quotes() {
        assert_eq!(fold_quotes("JOHN (CONT\u{2019}D)"), "JOHN (CONT'D)");
        assert_eq!(fold_quotes("\u{201C}Run!\u{201D}"), "\"Run!\"");
    }

    #[test]
    fn test_strip_markdown_emphasis() {
        assert_eq!(strip_markdown_emphasis("**Scene 1**"), "Scene 1");
        assert_eq!(strip_markdown_emphasis("**John:** Hi"), "John: Hi");
        assert_eq!(
            strip_markdown_emphasis("JOHN: Hi\n***\nMARY: Hello"),
            "JOHN: Hi\nMARY: Hello"
        );
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Hello \t there\n friend "), "Hello there friend");
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_script_text("A\r\nB\rC"), "A\nB\nC");
    }

    #[test]
    fn test_default_ignored_lines() {
        let patterns = ignore_patterns(&ParsingConfig::default());
        assert!(is_ignored_line("12.", &patterns));
        assert!(is_ignored_line("Page 3 of 40", &patterns));
        assert!(is_ignored_line("(MORE)", &patterns));
        assert!(is_ignored_line("CONTINUED:", &patterns));
        assert!(!is_ignored_line("JOHN", &patterns));
        assert!(!is_ignored_line("12 angry men arrive.", &patterns));
    }

    #[test]
    fn test_replaced_ignore_patterns() {
        let config = crate::ParsingConfigBuilder::new()
            .set_ignore_line_patterns(vec![r"^SCENE \d+$".to_string()])
            .build()
            .unwrap();
        let patterns = ignore_patterns(&config);
        assert!(is_ignored_line("SCENE 4", &patterns));
        assert!(!is_ignored_line("12.", &patterns));
    }
}
