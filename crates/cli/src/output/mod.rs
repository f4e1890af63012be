//! Command output
//!
//! Human mode prints marked result lines and plain listing lines; JSON mode
//! prints one document per command on stdout. Spinners go to stderr and only
//! appear in interactive human mode.

mod formatter;
mod progress;

pub use formatter::{Formatter, Mark};
pub use progress::ProgressBar;

/// Output settings taken from the global flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub no_color: bool,
    pub no_progress: bool,
    pub quiet: bool,
}

impl OutputConfig {
    /// Result and listing lines are printed
    pub const fn human(&self) -> bool {
        !self.json && !self.quiet
    }

    pub const fn colored(&self) -> bool {
        !self.json && !self.no_color
    }

    pub const fn spinners(&self) -> bool {
        self.human() && !self.no_progress
    }
}
