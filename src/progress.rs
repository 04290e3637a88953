use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ApiProgress {
    bar: ProgressBar,
}

impl ApiProgress {
    fn spinner(template: &str, tick_ms: u64, message: &str) -> Self {
        let style = ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");
        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(tick_ms));

        Self { bar }
    }

    pub fn new_upload() -> Self {
        Self::spinner(
            "🚀 {msg} {spinner:.green}",
            80,
            "Submitting verification request...",
        )
    }

    pub fn new_polling() -> Self {
        Self::spinner(
            "⏳ {msg} {spinner:.yellow}",
            120,
            "Waiting for verification result...",
        )
    }

    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}
