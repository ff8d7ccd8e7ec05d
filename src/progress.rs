//! Progress bar display for copying bundle files

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for the copy pass
///
/// Draws to stderr and stays hidden when stderr is not a terminal.
pub struct CopyProgress {
    file_pb: ProgressBar,
}

impl CopyProgress {
    /// Create a new progress display with total file count
    pub fn new(total_files: u64) -> Self {
        let file_style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let file_pb = ProgressBar::new(total_files);
        file_pb.set_style(file_style);

        Self { file_pb }
    }

    /// Show the file being copied and advance by one
    pub fn update_file(&self, file_path: &str) {
        // Truncate long paths for display
        let display_path = if file_path.chars().count() > 50 {
            let tail: String = file_path
                .chars()
                .rev()
                .take(47)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("...{tail}")
        } else {
            file_path.to_string()
        };
        self.file_pb.set_message(display_path);
        self.file_pb.inc(1);
    }

    pub fn finish(&self) {
        self.file_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.file_pb.abandon();
    }
}
