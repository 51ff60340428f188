use regex::Regex;

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Configuration for dialogue segmentation.
///
/// Use [`ParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    /// Emit non-dialogue paragraphs as entries attributed to `narrator_name`
    /// (default: on).
    pub(crate) include_narration: bool,
    pub(crate) narrator_name: String,
    /// Longest speaker label, in words, accepted as a name (default: 4).
    pub(crate) max_name_words: usize,
    /// Longest speaker label, in characters (default: 40).
    pub(crate) max_name_chars: usize,
    /// Recognise all-caps character cues on their own line (default: on).
    pub(crate) screenplay_cues: bool,
    /// Lines dropped before segmentation (page numbers, `(MORE)`, ...).
    pub(crate) ignore_line_patterns: ListOverride<Regex>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            include_narration: true,
            narrator_name: "Narrator".to_string(),
            max_name_words: 4,
            max_name_chars: 40,
            screenplay_cues: true,
            ignore_line_patterns: ListOverride::Default,
        }
    }
}

impl ParsingConfig {
    pub fn include_narration(&self) -> bool {
        self.include_narration
    }

    pub fn narrator_name(&self) -> &str {
        &self.narrator_name
    }

    pub fn max_name_words(&self) -> usize {
        self.max_name_words
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    include_narration: Option<bool>,
    narrator_name: Option<String>,
    max_name_words: Option<usize>,
    max_name_chars: Option<usize>,
    screenplay_cues: Option<bool>,
    ignore_line_patterns: ListOverrideBuilder,
}

/// Helper for building `ListOverride<Regex>` from string patterns.
#[derive(Debug, Clone, Default)]
enum ListOverrideBuilder {
    #[default]
    Default,
    Replace(Vec<String>),
    Extend(Vec<String>),
}

impl ListOverrideBuilder {
    fn compile(self) -> Result<ListOverride<Regex>, regex::Error> {
        Ok(match self {
            ListOverrideBuilder::Default => ListOverride::Default,
            ListOverrideBuilder::Replace(v) => ListOverride::Replace(compile_all(&v)?),
            ListOverrideBuilder::Extend(v) => ListOverride::Extend(compile_all(&v)?),
        })
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|p| Regex::new(p)).collect()
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_narration(mut self, include: bool) -> Self {
        self.include_narration = Some(include);
        self
    }

    pub fn narrator_name(mut self, name: &str) -> Self {
        self.narrator_name = Some(name.to_string());
        self
    }

    pub fn max_name_words(mut self, words: usize) -> Self {
        self.max_name_words = Some(words);
        self
    }

    pub fn max_name_chars(mut self, chars: usize) -> Self {
        self.max_name_chars = Some(chars);
        self
    }

    pub fn screenplay_cues(mut self, enabled: bool) -> Self {
        self.screenplay_cues = Some(enabled);
        self
    }

    // ── Ignored lines ──

    pub fn set_ignore_line_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_line_patterns = ListOverrideBuilder::Replace(patterns);
        self
    }

    pub fn add_ignore_line_pattern(mut self, pattern: String) -> Self {
        match &mut self.ignore_line_patterns {
            ListOverrideBuilder::Extend(v) => v.push(pattern),
            _ => self.ignore_line_patterns = ListOverrideBuilder::Extend(vec![pattern]),
        }
        self
    }

    /// Compile all patterns and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let defaults = ParsingConfig::default();
        let narrator_name = self
            .narrator_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or(defaults.narrator_name);

        Ok(ParsingConfig {
            include_narration: self.include_narration.unwrap_or(defaults.include_narration),
            narrator_name,
            max_name_words: self.max_name_words.unwrap_or(defaults.max_name_words).max(1),
            max_name_chars: self.max_name_chars.unwrap_or(defaults.max_name_chars).max(1),
            screenplay_cues: self.screenplay_cues.unwrap_or(defaults.screenplay_cues),
            ignore_line_patterns: self.ignore_line_patterns.compile()?,
        })
    }
}
