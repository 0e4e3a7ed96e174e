use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex};
use tracing::warn;
use trajprep::progress::{Progress, ProgressCallback};

/// Bridges core workflow progress events to an indicatif display.
///
/// The external tools inherit the terminal and print freely, so this stays a
/// line-oriented display rather than a steadily ticking spinner: each step is
/// announced once and marked done once.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::step_style())
            .with_message("Initializing...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::StepStart { index, name, total } => {
                    pb_guard.reset();
                    pb_guard.set_style(Self::step_style());
                    pb_guard.set_message(format!("[{}/{}] {}", index, total, name));
                    pb_guard.println(format!("→ [{}/{}] {}", index, total, name));
                }
                Progress::StepFinish => {
                    pb_guard.finish_with_message("✓ Done");
                }
                Progress::Message(msg) => {
                    pb_guard.println(format!("  {}", msg));
                }
            }
        })
    }

    fn step_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg}").expect("Failed to create step style template")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
