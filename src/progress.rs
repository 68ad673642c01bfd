use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::utils::string::{pluralize, truncate_path};

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const MAX_PATH_WIDTH: usize = 60;

/// Interactive status output on stderr.
///
/// Commands only create one when stderr is a terminal; everything here is
/// cosmetic and never affects results.
pub struct ProgressReporter {
    term: Term,
    spinner_position: AtomicUsize,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            spinner_position: AtomicUsize::new(0),
            current_bar: None,
        }
    }

    /// A reporter for interactive sessions, or `None` when stderr is piped
    pub fn for_terminal() -> Option<Self> {
        Term::stderr().is_term().then(Self::new)
    }

    pub fn create_spinner(&mut self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        let spinner_style = ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(SPINNER_FRAMES);
        pb.set_style(spinner_style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn next_frame(&self) -> &'static str {
        // The last frame is the "done" marker; cycle through the others
        let sweep = SPINNER_FRAMES.len() - 1;
        let pos = self.spinner_position.fetch_add(1, Ordering::Relaxed) % sweep;
        SPINNER_FRAMES[pos]
    }

    pub fn start_loading(&mut self) {
        let _ = self.term.clear_line();
        eprintln!("{} Loading entity manifests...", style("🔍").cyan());
        let spinner = self.create_spinner("Scanning for manifests...");
        self.current_bar = Some(spinner);
    }

    pub fn loading_manifest(&self, path: &Path) {
        let path = truncate_path(&path.display().to_string(), MAX_PATH_WIDTH);
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Reading: {path}..."));
        } else {
            let _ = self.term.clear_line();
            eprint!(
                "\r{} Reading: {}... ",
                style(self.next_frame()).cyan(),
                style(path).dim()
            );
        }
    }

    pub fn finish_loading(&mut self, entities: usize, manifests: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        if entities == 0 {
            eprintln!("\r{} No entities found", style("✗").red());
        } else {
            eprintln!(
                "\r{} Loaded {} {} from {} {}",
                style("✓").green(),
                style(entities).yellow().bold(),
                pluralize("file", entities),
                style(manifests).bold(),
                pluralize("manifest", manifests)
            );
        }
    }

    pub fn start_cycle_detection(&mut self, files: usize, edges: usize) {
        eprintln!(
            "\n{} Detecting cycles across {} {} and {} {}...",
            style("🔄").yellow(),
            style(files).bold(),
            pluralize("file", files),
            style(edges).bold(),
            pluralize("edge", edges)
        );
        let spinner = self.create_spinner("Running detectors...");
        self.current_bar = Some(spinner);
    }

    pub fn finish_cycle_detection(&mut self, cycles_found: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        if cycles_found == 0 {
            eprintln!("{} No cycles detected!", style("✓").green().bold());
        } else {
            eprintln!(
                "{} Found {} {}",
                style("⚠").yellow().bold(),
                style(cycles_found).red().bold(),
                pluralize("cycle", cycles_found)
            );
        }
    }
}
