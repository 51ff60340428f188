use regex::Regex;

use storyteller_core::DialogueEntry;

use crate::config::ParsingConfig;
use crate::speaker::{self, InlineLine};
use crate::text_processing::{self, collapse_whitespace};

/// Classification of a single line of normalised script text.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Inline(InlineLine),
    Cue(String),
    Parenthetical,
    Heading,
    Text(&'a str),
}

/// The block currently being accumulated.
#[derive(Debug)]
enum Block {
    Idle,
    Dialogue {
        name: String,
        /// Cue line as written, used if no dialogue follows it.
        cue_line: Option<String>,
        parts: Vec<String>,
    },
    Narration {
        parts: Vec<String>,
    },
}

/// Splits script text into ordered speaker/dialogue entries.
///
/// Two layouts are recognised and may be mixed in one document:
/// - inline `NAME: dialogue`, continued on following non-blank lines
/// - screenplay blocks: an all-caps cue line, then dialogue until a blank line
pub struct DialogueParser {
    config: ParsingConfig,
    ignore_patterns: Vec<Regex>,
}

impl Default for DialogueParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueParser {
    /// Create a parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParsingConfig::default())
    }

    /// Create a parser with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        let ignore_patterns = text_processing::ignore_patterns(&config);
        Self {
            config,
            ignore_patterns,
        }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Parse script text into entries in document order, with
    /// `predicted_gender` unset.
    pub fn parse(&self, text: &str) -> Vec<DialogueEntry> {
        let normalized = text_processing::normalize_script_text(text);
        let mut entries = Vec::new();
        let mut block = Block::Idle;

        for raw in normalized.lines() {
            let trimmed = raw.trim();
            if !trimmed.is_empty()
                && text_processing::is_ignored_line(trimmed, &self.ignore_patterns)
            {
                continue;
            }

            match self.classify(trimmed, &block) {
                Line::Blank => {
                    self.flush(&mut block, &mut entries);
                }
                Line::Inline(InlineLine { name, text }) => {
                    self.flush(&mut block, &mut entries);
                    block = Block::Dialogue {
                        name,
                        cue_line: None,
                        parts: vec![text],
                    };
                }
                Line::Cue(name) => {
                    self.flush(&mut block, &mut entries);
                    block = Block::Dialogue {
                        name,
                        cue_line: Some(trimmed.to_string()),
                        parts: Vec::new(),
                    };
                }
                Line::Parenthetical => {
                    if !matches!(block, Block::Dialogue { .. }) {
                        push_narration(&mut block, trimmed);
                    }
                }
                Line::Heading => {
                    self.flush(&mut block, &mut entries);
                    push_narration(&mut block, trimmed);
                }
                Line::Text(text) => push_text(&mut block, text),
            }
        }
        self.flush(&mut block, &mut entries);

        tracing::debug!(entries = entries.len(), "parsed dialogue entries");
        entries
    }

    fn classify<'a>(&self, line: &'a str, block: &Block) -> Line<'a> {
        if line.is_empty() {
            return Line::Blank;
        }
        if let Some(inline) = speaker::parse_inline_speaker(line, &self.config) {
            return Line::Inline(inline);
        }
        if speaker::is_parenthetical(line) {
            return Line::Parenthetical;
        }
        if speaker::is_scene_heading(line) || speaker::is_transition(line) {
            return Line::Heading;
        }
        // A cue only opens a block; inside dialogue an all-caps line is shouting.
        let in_dialogue = matches!(block, Block::Dialogue { parts, .. } if !parts.is_empty());
        if self.config.screenplay_cues && !in_dialogue {
            if let Some(name) = speaker::parse_cue(line, &self.config) {
                return Line::Cue(name);
            }
        }
        Line::Text(line)
    }

    fn flush(&self, block: &mut Block, entries: &mut Vec<DialogueEntry>) {
        match std::mem::replace(block, Block::Idle) {
            Block::Idle => {}
            Block::Dialogue {
                name,
                cue_line,
                parts,
            } => {
                if parts.is_empty() {
                    // A cue with nothing under it ("THE END") is narration.
                    if let Some(line) = cue_line {
                        self.emit_narration(vec![line], entries);
                    }
                } else {
                    entries.push(DialogueEntry::new(name, join_parts(&parts)));
                }
            }
            Block::Narration { parts } => self.emit_narration(parts, entries),
        }
    }

    fn emit_narration(&self, parts: Vec<String>, entries: &mut Vec<DialogueEntry>) {
        if !self.config.include_narration {
            return;
        }
        let text = join_parts(&parts);
        if !text.is_empty() {
            entries.push(DialogueEntry::new(self.config.narrator_name.clone(), text));
        }
    }
}

/// Continue the open block, or start narration if nothing is open.
fn push_text(block: &mut Block, text: &str) {
    match block {
        Block::Dialogue { parts, .. } | Block::Narration { parts } => parts.push(text.to_string()),
        Block::Idle => push_narration(block, text),
    }
}

fn push_narration(block: &mut Block, text: &str) {
    match block {
        Block::Narration { parts } => parts.push(text.to_string()),
        _ => {
            *block = Block::Narration {
                parts: vec![text.to_string()],
            }
        }
    }
}

fn join_parts(parts: &[String]) -> String {
    collapse_whitespace(&parts.join(" "))
}
