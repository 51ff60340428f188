use std::path::Path;

use mupdf::{Document, Rect, TextPageFlags};

use storyteller_core::{BackendError, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate isolates the mupdf dependency (AGPL-3.0) so that the parser
/// and the model crates do not transitively depend on it.
///
/// Screenplay PDFs carry page numbers and `(CONTINUED)` slugs in the page
/// margins; text in the top 4% and bottom 5% of each page is dropped by
/// default. Paragraph structure matters to the dialogue parser, so a blank
/// line is emitted wherever the vertical gap between two text lines is larger
/// than `paragraph_gap_ratio` times the line height.
pub struct MupdfBackend {
    /// Fraction of page height from bottom to exclude as footer (0.0–1.0).
    footer_exclusion_ratio: Option<f32>,
    /// Fraction of page height from top to exclude as header (0.0–1.0).
    header_exclusion_ratio: Option<f32>,
    /// Gap (in line heights) above which a paragraph break is inserted.
    paragraph_gap_ratio: f32,
}

impl Default for MupdfBackend {
    fn default() -> Self {
        Self {
            footer_exclusion_ratio: Some(0.05),
            header_exclusion_ratio: Some(0.04),
            paragraph_gap_ratio: 0.8,
        }
    }
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer exclusion ratio. Pass `0.0` to disable.
    pub fn with_footer_exclusion(mut self, ratio: f32) -> Self {
        self.footer_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }

    /// Set the header exclusion ratio. Pass `0.0` to disable.
    pub fn with_header_exclusion(mut self, ratio: f32) -> Self {
        self.header_exclusion_ratio = if ratio > 0.0 { Some(ratio) } else { None };
        self
    }

    /// Set the paragraph gap ratio.
    pub fn with_paragraph_gap(mut self, ratio: f32) -> Self {
        self.paragraph_gap_ratio = ratio.max(0.0);
        self
    }

    fn is_paragraph_break(&self, previous: &Rect, current: &Rect) -> bool {
        let height = (current.y1 - current.y0).max(1.0);
        current.y0 - previous.y1 > height * self.paragraph_gap_ratio
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let page_bounds = page
                .bounds()
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let page_height = page_bounds.y1 - page_bounds.y0;

            let header_threshold = self
                .header_exclusion_ratio
                .map(|r| page_bounds.y0 + page_height * r);
            let footer_threshold = self
                .footer_exclusion_ratio
                .map(|r| page_bounds.y1 - page_height * r);

            let mut page_text = String::new();
            let mut previous_line: Option<Rect> = None;

            for block in text_page.blocks() {
                let block_bounds = block.bounds();

                if let Some(threshold) = header_threshold
                    && block_bounds.y1 <= threshold
                {
                    continue;
                }
                if let Some(threshold) = footer_threshold
                    && block_bounds.y0 >= threshold
                {
                    continue;
                }

                for line in block.lines() {
                    let line_bounds = line.bounds();
                    if let Some(previous) = &previous_line
                        && self.is_paragraph_break(previous, &line_bounds)
                    {
                        page_text.push('\n');
                    }

                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(line_text.trim_end());
                    page_text.push('\n');
                    previous_line = Some(line_bounds);
                }
            }
            pages_text.push(page_text);
        }

        tracing::debug!(
            pages = pages_text.len(),
            path = %path.display(),
            "extracted PDF text"
        );

        // Page breaks always end a paragraph.
        Ok(pages_text.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(y0: f32, y1: f32) -> Rect {
        Rect {
            x0: 72.0,
            y0,
            x1: 300.0,
            y1,
        }
    }

    #[test]
    fn single_spaced_lines_stay_together() {
        let backend = MupdfBackend::new();
        assert!(!backend.is_paragraph_break(&rect(100.0, 112.0), &rect(112.5, 124.5)));
    }

    #[test]
    fn blank_line_gap_breaks_paragraph() {
        let backend = MupdfBackend::new();
        assert!(backend.is_paragraph_break(&rect(100.0, 112.0), &rect(124.0, 136.0)));
    }

    #[test]
    fn zero_ratio_disables_exclusion() {
        let backend = MupdfBackend::new()
            .with_header_exclusion(0.0)
            .with_footer_exclusion(0.0);
        assert!(backend.header_exclusion_ratio.is_none());
        assert!(backend.footer_exclusion_ratio.is_none());
    }

    #[test]
    fn unopenable_file_is_open_error() {
        let err = MupdfBackend::new()
            .extract_text(Path::new("/nonexistent/script.pdf"))
            .unwrap_err();
        assert!(matches!(err, BackendError::OpenError(_)));
    }
}
