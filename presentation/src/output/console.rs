//! Console output formatter for generation sessions

use colored::Colorize;
use jasmine_domain::{GallerySnapshot, GenerationReport, ImageViewer, Slot};
use serde::Serialize;

/// Formats sessions and the gallery for console display
pub struct ConsoleFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a GenerationReport,
    gallery: &'a GallerySnapshot,
}

impl ConsoleFormatter {
    /// Format a finished session: header, grid and summary
    pub fn format(report: &GenerationReport, snapshot: &GallerySnapshot) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Jasmine"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Prompt:".cyan().bold(),
            report.prompt
        ));
        output.push_str(&format!(
            "{} {}  {} {}\n\n",
            "Session:".cyan().bold(),
            report.tag,
            "Rounds:".cyan().bold(),
            report.rounds
        ));

        output.push_str(&Self::format_grid(snapshot));
        output.push('\n');
        output.push_str(&Self::format_summary(report));
        output.push_str(&Self::footer());

        output
    }

    /// One line per slot
    pub fn format_grid(snapshot: &GallerySnapshot) -> String {
        let mut output = String::new();
        for slot in &snapshot.slots {
            output.push_str(&Self::format_slot(slot));
            output.push('\n');
        }
        output.push_str(&format!(
            "{} of {} slots filled{}\n",
            snapshot.filled_count(),
            snapshot.slot_count(),
            if snapshot.loading {
                " (generating...)"
            } else {
                ""
            }
        ));
        output
    }

    /// Outcome line of a session
    pub fn format_summary(report: &GenerationReport) -> String {
        match report.summary() {
            Some(summary) => format!("{} {}\n", "!".yellow().bold(), summary.yellow()),
            None => format!(
                "{} All {} slots filled\n",
                "v".green().bold(),
                report.filled.len()
            ),
        }
    }

    /// Format as JSON
    pub fn format_json(report: &GenerationReport, snapshot: &GallerySnapshot) -> String {
        serde_json::to_string_pretty(&JsonOutput {
            report,
            gallery: snapshot,
        })
        .unwrap_or_else(|_| "{}".to_string())
    }

    /// Describe what the viewer is showing
    pub fn format_viewer(snapshot: &GallerySnapshot, viewer: &ImageViewer) -> String {
        let slot_count = snapshot.slot_count();
        let (Some(index), Some(label)) = (viewer.current(), viewer.position_label(slot_count))
        else {
            return format!("{}\n", "Viewer closed".dimmed());
        };

        let mut output = format!("{} {}\n", "Viewing".cyan().bold(), label);
        match snapshot.slots.get(index) {
            Some(slot) => {
                output.push_str(&Self::format_slot(slot));
                output.push('\n');
            }
            None => output.push_str(&format!("{}\n", "(no such slot)".dimmed())),
        }

        let mut hints = Vec::new();
        if viewer.has_previous() {
            hints.push("/prev");
        }
        if viewer.has_next(slot_count) {
            hints.push("/next");
        }
        hints.push("/close");
        output.push_str(&format!("{}\n", hints.join("  ").dimmed()));

        output
    }

    fn format_slot(slot: &Slot) -> String {
        let position = format!("#{:<2}", slot.index() + 1);
        let span = format!("{:>5}", slot.span().to_string());

        match (slot.image(), slot.hash()) {
            (Some(image), Some(hash)) => format!(
                "  {} {} {} {:>9}  {}",
                position.bold(),
                span.dimmed(),
                "■".green(),
                human_size(image.byte_len()),
                format!("{} {}", image.mime(), hash.short()).dimmed()
            ),
            _ => format!(
                "  {} {} {} {}",
                position.bold(),
                span.dimmed(),
                "□".dimmed(),
                "(empty)".dimmed()
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(50);
        format!(
            "{}\n{:^50}\n{}\n",
            line.cyan(),
            title.cyan().bold(),
            line.cyan()
        )
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(50).cyan())
    }
}

/// Human-readable byte count
pub fn human_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let bytes_f = bytes as f64;
    if bytes_f >= MB {
        format!("{:.1} MB", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{} B", bytes)
    }
}
