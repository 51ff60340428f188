use std::collections::HashSet;
use std::io::Write;

use owo_colors::OwoColorize;

use storyteller_core::DialogueEntry;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the header line before the entries.
pub fn print_header(
    w: &mut dyn Write,
    file_name: &str,
    entries: &[DialogueEntry],
    dry_run: bool,
    color: ColorMode,
) -> std::io::Result<()> {
    let speakers: HashSet<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    let summary = format!(
        "{} dialogue lines from {} speakers",
        entries.len(),
        speakers.len()
    );
    match (dry_run, color.enabled()) {
        (true, true) => writeln!(
            w,
            "{} {} ({})\n",
            "DRY RUN:".bold().cyan(),
            file_name.bold(),
            summary
        ),
        (true, false) => writeln!(w, "DRY RUN: {} ({})\n", file_name, summary),
        (false, true) => writeln!(w, "{} ({})\n", file_name.bold(), summary),
        (false, false) => writeln!(w, "{} ({})\n", file_name, summary),
    }
}

/// Print one entry per line: `NAME [label]: dialogue`.
pub fn print_entries(
    w: &mut dyn Write,
    entries: &[DialogueEntry],
    color: ColorMode,
) -> std::io::Result<()> {
    for entry in entries {
        let label = entry.predicted_gender.as_deref();
        if color.enabled() {
            match label {
                Some(label) => writeln!(
                    w,
                    "{} {}: {}",
                    entry.name.bold(),
                    format!("[{label}]").dimmed(),
                    entry.dialogue
                )?,
                None => writeln!(w, "{}: {}", entry.name.bold(), entry.dialogue)?,
            }
        } else {
            match label {
                Some(label) => writeln!(w, "{} [{}]: {}", entry.name, label, entry.dialogue)?,
                None => writeln!(w, "{}: {}", entry.name, entry.dialogue)?,
            }
        }
    }
    Ok(())
}

/// Print the entries as the same JSON array the web service returns.
pub fn print_json(w: &mut dyn Write, entries: &[DialogueEntry]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *w, entries)?;
    writeln!(w)?;
    Ok(())
}
