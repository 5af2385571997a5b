//! REPL for the interactive studio
//!
//! Each line is a submission. Submitting the same prompt again keeps the
//! gallery's seen images, so only new images are accepted.

use crate::config::{OutputConfig, StudioConfig};
use crate::output::export::save_slot;
use crate::{ConsoleFormatter, OutputFormat, ProgressReporter};
use jasmine_application::{GenerateImagesUseCase, ImageGateway};
use jasmine_domain::ImageViewer;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

/// What a slash command asks the loop to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioCommand {
    Grid,
    View(usize),
    Save {
        index: usize,
        target: Option<PathBuf>,
    },
    Next,
    Previous,
    Close,
    Help,
    Quit,
    Unknown(String),
}

impl StudioCommand {
    /// Parse a line starting with `/`. Slot numbers are 1-based.
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match (name, arg) {
            ("/grid" | "/g", None) => Self::Grid,
            ("/view" | "/v", Some(n)) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Self::View(n - 1),
                _ => Self::Unknown(line.to_string()),
            },
            ("/save" | "/s", Some(n)) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Self::Save {
                    index: n - 1,
                    target: parts.next().map(PathBuf::from),
                },
                _ => Self::Unknown(line.to_string()),
            },
            ("/next" | "/n", None) => Self::Next,
            ("/prev" | "/p", None) => Self::Previous,
            ("/close" | "/c", None) => Self::Close,
            ("/help" | "/h" | "/?", None) => Self::Help,
            ("/quit" | "/exit" | "/q", None) => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Interactive studio REPL
pub struct StudioRepl<G: ImageGateway + 'static> {
    use_case: GenerateImagesUseCase<G>,
    viewer: ImageViewer,
    studio: StudioConfig,
    output: OutputConfig,
}

impl<G: ImageGateway + 'static> StudioRepl<G> {
    pub fn new(use_case: GenerateImagesUseCase<G>) -> Self {
        Self {
            use_case,
            viewer: ImageViewer::new(),
            studio: StudioConfig::default(),
            output: OutputConfig::default(),
        }
    }

    pub fn with_studio_config(mut self, studio: StudioConfig) -> Self {
        self.studio = studio;
        self
    }

    pub fn with_output_config(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.studio.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("jasmine> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(StudioCommand::parse(line)) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_prompt(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        let params = self.use_case.params();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              Jasmine - Studio               │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "{} slots, batches of {}, {}s cooldown",
            params.slot_count,
            params.batch_size,
            params.cooldown.as_secs()
        );
        println!("Type a prompt to fill the grid.");
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /grid, /g         - Show the grid");
        println!("  /view <n>, /v <n> - Open slot n in the viewer");
        println!("  /save <n> [path]  - Save slot n (to a file or directory)");
        println!("  /next, /n         - Next slot");
        println!("  /prev, /p         - Previous slot");
        println!("  /close, /c        - Close the viewer");
        println!("  /help, /h, /?     - Show this help");
        println!("  /quit, /exit, /q  - Exit the studio");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: StudioCommand) -> bool {
        let snapshot = self.use_case.gallery().snapshot();
        let slot_count = snapshot.slot_count();

        match command {
            StudioCommand::Quit => {
                println!("Bye!");
                return true;
            }
            StudioCommand::Help => Self::print_help(),
            StudioCommand::Grid => print!("{}", ConsoleFormatter::format_grid(&snapshot)),
            StudioCommand::View(index) => {
                let opened = self
                    .use_case
                    .gallery()
                    .with(|g| self.viewer.open(index, g.grid()));
                if opened {
                    print!("{}", ConsoleFormatter::format_viewer(&snapshot, &self.viewer));
                } else {
                    println!("Slot {} has no image", index + 1);
                }
            }
            StudioCommand::Save { index, target } => {
                match save_slot(&snapshot, index, target.as_deref()) {
                    Ok(path) => println!("Saved slot {} to {}", index + 1, path.display()),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            StudioCommand::Next => {
                self.viewer.next(slot_count);
                print!("{}", ConsoleFormatter::format_viewer(&snapshot, &self.viewer));
            }
            StudioCommand::Previous => {
                self.viewer.previous();
                print!("{}", ConsoleFormatter::format_viewer(&snapshot, &self.viewer));
            }
            StudioCommand::Close => {
                self.viewer.close();
                print!("{}", ConsoleFormatter::format_viewer(&snapshot, &self.viewer));
            }
            StudioCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_prompt(&mut self, prompt: &str) {
        println!();
        self.viewer.close();

        let result = if self.studio.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.execute_with_progress(prompt, &progress).await
        } else {
            self.use_case.execute(prompt).await
        };

        match result {
            Ok(report) => {
                let snapshot = self.use_case.gallery().snapshot();
                let output = match self.output.format {
                    OutputFormat::Full => ConsoleFormatter::format(&report, &snapshot),
                    OutputFormat::Grid => ConsoleFormatter::format_grid(&snapshot),
                    OutputFormat::Json => ConsoleFormatter::format_json(&report, &snapshot),
                };
                println!("{}", output);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(StudioCommand::parse("/grid"), StudioCommand::Grid);
        assert_eq!(StudioCommand::parse("/view 3"), StudioCommand::View(2));
        assert_eq!(StudioCommand::parse("/v 1"), StudioCommand::View(0));
        assert_eq!(StudioCommand::parse("/next"), StudioCommand::Next);
        assert_eq!(StudioCommand::parse("/prev"), StudioCommand::Previous);
        assert_eq!(StudioCommand::parse("/close"), StudioCommand::Close);
        assert_eq!(StudioCommand::parse("/q"), StudioCommand::Quit);
        assert_eq!(
            StudioCommand::parse("/save 2"),
            StudioCommand::Save {
                index: 1,
                target: None
            }
        );
        assert_eq!(
            StudioCommand::parse("/s 9 out/fox.png"),
            StudioCommand::Save {
                index: 8,
                target: Some(PathBuf::from("out/fox.png"))
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_slot_numbers() {
        assert!(matches!(StudioCommand::parse("/view"), StudioCommand::Unknown(_)));
        assert!(matches!(StudioCommand::parse("/view 0"), StudioCommand::Unknown(_)));
        assert!(matches!(StudioCommand::parse("/view x"), StudioCommand::Unknown(_)));
        assert!(matches!(StudioCommand::parse("/grid 2"), StudioCommand::Unknown(_)));
        assert!(matches!(StudioCommand::parse("/save"), StudioCommand::Unknown(_)));
        assert!(matches!(StudioCommand::parse("/save 0"), StudioCommand::Unknown(_)));
        assert!(matches!(StudioCommand::parse("/dance"), StudioCommand::Unknown(_)));
    }
}
