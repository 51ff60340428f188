use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::text_processing::collapse_whitespace;

/// `NAME: dialogue` or `NAME (V.O.): dialogue` on a single line.
static INLINE_SPEAKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[^:()]{1,80}?)\s*(?:\([^)]*\))?\s*:\s*(?P<text>\S.*)$").unwrap()
});

/// Trailing cue extension: `(V.O.)`, `(O.S.)`, `(CONT'D)`, ...
static CUE_EXTENSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*$").unwrap());

static SCENE_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(INT\./EXT|EXT\./INT|INT/EXT|I/E|INT|EXT)[.\s]").unwrap());

static TRANSITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(FADE (IN|OUT)|CUT TO|DISSOLVE TO|SMASH CUT|MATCH CUT)\b|\bTO[:.]$").unwrap()
});

/// A speaker label followed by dialogue on the same line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineLine {
    pub name: String,
    pub text: String,
}

/// Parse `NAME: dialogue`. Returns `None` for lines whose prefix does not
/// look like a speaker label (times, URLs, prose with a colon).
pub fn parse_inline_speaker(line: &str, config: &ParsingConfig) -> Option<InlineLine> {
    let caps = INLINE_SPEAKER_RE.captures(line.trim())?;
    let name = collapse_whitespace(&caps["name"]);
    let text = caps["text"].trim();

    if text.starts_with("//") {
        return None;
    }
    if !is_plausible_name(&name, config) || !name.starts_with(|c: char| c.is_uppercase()) {
        return None;
    }
    if is_scene_heading(&name) || is_transition(&name) {
        return None;
    }

    Some(InlineLine {
        name,
        text: text.to_string(),
    })
}

/// Parse a screenplay character cue: an all-caps name alone on its line,
/// optionally followed by an extension such as `(V.O.)`.
pub fn parse_cue(line: &str, config: &ParsingConfig) -> Option<String> {
    let line = line.trim();
    if line.ends_with(':') || is_scene_heading(line) || is_transition(line) {
        return None;
    }

    let name = collapse_whitespace(&CUE_EXTENSION_RE.replace(line, ""));
    if !is_plausible_name(&name, config) {
        return None;
    }
    let has_upper = name.chars().any(|c| c.is_uppercase());
    let has_lower = name.chars().any(|c| c.is_lowercase());
    if !has_upper || has_lower {
        return None;
    }

    Some(name)
}

/// Stage direction inside a dialogue block: `(beat)`, `(whispering)`.
pub fn is_parenthetical(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 2 && line.starts_with('(') && line.ends_with(')')
}

/// `INT. KITCHEN - DAY`, `EXT. STREET - NIGHT`, ...
pub fn is_scene_heading(line: &str) -> bool {
    SCENE_HEADING_RE.is_match(line.trim())
}

/// `CUT TO:`, `FADE OUT.`, `DISSOLVE TO:`, ...
pub fn is_transition(line: &str) -> bool {
    TRANSITION_RE.is_match(line.trim())
}

fn is_plausible_name(name: &str, config: &ParsingConfig) -> bool {
    if name.is_empty() || name.chars().count() > config.max_name_chars {
        return false;
    }
    if !name.starts_with(|c: char| c.is_alphabetic()) {
        return false;
    }
    if name.split_whitespace().count() > config.max_name_words {
        return false;
    }
    name.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '\'' | '-' | '&'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(line: &str) -> Option<InlineLine> {
        parse_inline_speaker(line, &ParsingConfig::default())
    }

    fn cue(line: &str) -> Option<String> {
        parse_cue(line, &ParsingConfig::default())
    }

    #[test]
    fn test_inline_basic() {
        assert_eq!(
            inline("JOHN: Hello there."),
            Some(InlineLine {
                name: "JOHN".into(),
                text: "Hello there.".into()
            })
        );
        assert_eq!(inline("Mary Jane:   Hi John!").unwrap().name, "Mary Jane");
    }

    #[test]
    fn test_inline_with_extension() {
        let parsed = inline("JOHN (V.O.): It was a dark night.").unwrap();
        assert_eq!(parsed.name, "JOHN");
        assert_eq!(parsed.text, "It was a dark night.");
    }

    #[test]
    fn test_inline_rejects_non_speakers() {
        assert!(inline("10:30 in the morning").is_none());
        assert!(inline("See http://example.com").is_none());
        assert!(inline("Website: //cdn").is_none());
        assert!(inline("and then he said: run").is_none());
        assert!(inline("The five people in the room all said: no").is_none());
        assert!(inline("CUT TO: the beach").is_none());
        assert!(inline("JOHN:").is_none());
    }

    #[test]
    fn test_cue_basic() {
        assert_eq!(cue("JOHN"), Some("JOHN".into()));
        assert_eq!(cue("  MARY (CONT'D)  "), Some("MARY".into()));
        assert_eq!(cue("DR. O'NEIL (V.O.)"), Some("DR. O'NEIL".into()));
    }

    #[test]
    fn test_cue_rejects_headings_and_prose() {
        assert!(cue("INT. KITCHEN - DAY").is_none());
        assert!(cue("EXT. STREET - NIGHT").is_none());
        assert!(cue("CUT TO:").is_none());
        assert!(cue("FADE OUT.").is_none());
        assert!(cue("John walks in.").is_none());
        assert!(cue("A VERY LONG SHOUTED LINE OF TEXT").is_none());
        assert!(cue("(beat)").is_none());
    }

    #[test]
    fn test_parenthetical() {
        assert!(is_parenthetical("(beat)"));
        assert!(is_parenthetical("  (whispering)  "));
        assert!(!is_parenthetical("(unfinished"));
        assert!(!is_parenthetical("JOHN (V.O.)"));
    }
}
