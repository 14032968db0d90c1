use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Set to any value to hide progress spinners
pub const SILENT_ENV: &str = "BIOLIB_SILENT";

/// Create a spinner with consistent styling; hidden when `quiet` or silenced
pub fn create_spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet || std::env::var_os(SILENT_ENV).is_some() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
