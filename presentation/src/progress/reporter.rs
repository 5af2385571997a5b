//! Progress reporting for generation sessions

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use jasmine_application::GenerationProgress;
use jasmine_domain::{
    Batch, BatchState, ContentHash, GenerationReport, GenerationSession, ImagePayload,
    SlotOutcome,
};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one bar for the session and one per batch round
pub struct ProgressReporter {
    multi: MultiProgress,
    session_bar: Mutex<Option<ProgressBar>>,
    batch_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            session_bar: Mutex::new(None),
            batch_bar: Mutex::new(None),
        }
    }

    fn session_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn batch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("  {spinner:.green} {prefix:.bold} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn with_session_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.session_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }

    fn with_batch_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.batch_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }

    fn batch_name(batch: &Batch, round: usize) -> String {
        if round > 1 {
            format!("Batch {} (retry {})", batch.index() + 1, round - 1)
        } else {
            format!("Batch {}", batch.index() + 1)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProgress for ProgressReporter {
    fn on_session_start(&self, session: &GenerationSession, total_slots: usize) {
        let pb = self.multi.add(ProgressBar::new(total_slots as u64));
        pb.set_style(Self::session_style());
        pb.set_prefix(format!("Session {}", session.tag()));
        pb.set_message(session.prompt().to_string());
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.session_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_cooldown(&self, duration: Duration) {
        self.with_session_bar(|pb| {
            pb.set_message(format!("cooling down for {}s", duration.as_secs()));
        });
    }

    fn on_batch_start(&self, batch: &Batch, round: usize, slots: &[usize]) {
        let pb = self.multi.add(ProgressBar::new(slots.len() as u64));
        pb.set_style(Self::batch_style());
        pb.set_prefix(Self::batch_name(batch, round));
        pb.set_message("requesting...");

        self.with_session_bar(|session| session.set_message("generating"));
        if let Ok(mut guard) = self.batch_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_slot_filled(&self, index: usize, _image: &ImagePayload, hash: &ContentHash) {
        self.with_batch_bar(|pb| {
            pb.set_message(format!("{} slot {} ({})", "v".green(), index + 1, hash.short()));
            pb.inc(1);
        });
        self.with_session_bar(|pb| pb.inc(1));
    }

    fn on_slot_unfilled(&self, index: usize, _outcome: &SlotOutcome) {
        self.with_batch_bar(|pb| {
            pb.set_message(format!("{} slot {}", "x".red(), index + 1));
            pb.inc(1);
        });
    }

    fn on_batch_settled(&self, _batch: &Batch, state: BatchState) {
        let Ok(mut guard) = self.batch_bar.lock() else {
            return;
        };
        if let Some(pb) = guard.take() {
            let message = match state {
                BatchState::Completed => "done".green().to_string(),
                BatchState::Pending => "retrying failed slots".yellow().to_string(),
                _ => "gave up on remaining slots".red().to_string(),
            };
            pb.finish_with_message(message);
        }
    }

    fn on_session_complete(&self, report: &GenerationReport) {
        let Ok(mut guard) = self.session_bar.lock() else {
            return;
        };
        if let Some(pb) = guard.take() {
            match report.summary() {
                Some(summary) => pb.abandon_with_message(summary.yellow().to_string()),
                None => pb.finish_with_message("complete!".green().to_string()),
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl GenerationProgress for SimpleProgress {
    fn on_session_start(&self, session: &GenerationSession, total_slots: usize) {
        println!(
            "{} {} {} ({} slots)",
            "->".cyan(),
            format!("Session {}", session.tag()).bold(),
            session.prompt(),
            total_slots
        );
    }

    fn on_cooldown(&self, duration: Duration) {
        println!("  {} cooling down for {}s", "..".dimmed(), duration.as_secs());
    }

    fn on_batch_start(&self, batch: &Batch, round: usize, slots: &[usize]) {
        println!(
            "{} {} ({} slots)",
            "->".cyan(),
            ProgressReporter::batch_name(batch, round).bold(),
            slots.len()
        );
    }

    fn on_slot_filled(&self, index: usize, _image: &ImagePayload, hash: &ContentHash) {
        println!("  {} slot {} ({})", "v".green(), index + 1, hash.short());
    }

    fn on_slot_unfilled(&self, index: usize, outcome: &SlotOutcome) {
        match outcome {
            SlotOutcome::Unfilled {
                last_failure: Some(failure),
                ..
            } => println!("  {} slot {} ({})", "x".red(), index + 1, failure),
            _ => println!("  {} slot {}", "x".red(), index + 1),
        }
    }

    fn on_session_complete(&self, report: &GenerationReport) {
        if let Some(summary) = report.summary() {
            println!("{} {}", "!".yellow(), summary);
        }
        println!();
    }
}
