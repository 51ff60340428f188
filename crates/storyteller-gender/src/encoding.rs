use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use storyteller_core::ClassifierError;

use crate::metadata::{ModelMetadata, Padding};

static EXTENSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// Character-level encoder turning a speaker name into a fixed-length
/// index sequence. `0` is padding; known characters encode as `1..=vocab`.
#[derive(Debug, Clone)]
pub struct NameEncoder {
    index: HashMap<char, usize>,
    max_len: usize,
    lowercase: bool,
    padding: Padding,
}

impl NameEncoder {
    pub fn new(metadata: &ModelMetadata) -> Self {
        let index = metadata
            .vocab
            .chars()
            .enumerate()
            .map(|(i, c)| (c, i + 1))
            .collect();
        Self {
            index,
            max_len: metadata.max_len,
            lowercase: metadata.lowercase,
            padding: metadata.padding,
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Encode a name. Cue extensions such as `(V.O.)` are removed and
    /// characters outside the vocabulary are dropped.
    pub fn encode(&self, name: &str) -> Vec<usize> {
        let stripped = EXTENSION_RE.replace_all(name, "");
        let stripped = stripped.trim();
        let normalized = if self.lowercase {
            stripped.to_lowercase()
        } else {
            stripped.to_string()
        };

        let mut codes: Vec<usize> = normalized
            .chars()
            .filter_map(|c| self.index.get(&c).copied())
            .take(self.max_len)
            .collect();

        let pad = self.max_len - codes.len();
        match self.padding {
            Padding::Post => codes.extend(std::iter::repeat_n(0, pad)),
            Padding::Pre => {
                let mut padded = vec![0; pad];
                padded.append(&mut codes);
                codes = padded;
            }
        }
        codes
    }
}

/// Map raw model scores to a label.
///
/// A single score is a sigmoid over two labels; otherwise the scores are one
/// per label and the highest wins.
pub fn pick_label<'a>(
    scores: &[f32],
    labels: &'a [String],
    threshold: f32,
) -> Result<&'a str, ClassifierError> {
    match scores {
        [] => Err(ClassifierError::Output("model produced no scores".into())),
        [p] => {
            if labels.len() != 2 {
                return Err(ClassifierError::Output(format!(
                    "single sigmoid output needs exactly 2 labels, metadata has {}",
                    labels.len()
                )));
            }
            let idx = usize::from(*p >= threshold);
            Ok(labels[idx].as_str())
        }
        _ if scores.len() == labels.len() => {
            let (idx, _) = scores
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .ok_or_else(|| ClassifierError::Output("model produced no scores".into()))?;
            Ok(labels[idx].as_str())
        }
        _ => Err(ClassifierError::Output(format!(
            "model produced {} scores for {} labels",
            scores.len(),
            labels.len()
        ))),
    }
}
