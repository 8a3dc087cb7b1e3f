use indicatif::{ProgressBar, ProgressStyle};
use pagefetch::fetch::ProgressSink;

/// Terminal progress bar driven by collector progress events
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::with_template(
            "Progress: [{bar:50.cyan/blue}] {pos}/{len} ({percent}%) Complete",
        ) {
            bar.set_style(style.progress_chars("█▓░"));
        }
        Self { bar }
    }
}

impl ProgressSink for BarProgress {
    fn on_progress(&self, completed: u32, total: u32) {
        self.bar.set_length(u64::from(total));
        self.bar.set_position(u64::from(completed));
        if completed == total {
            self.bar.finish();
        }
    }
}
