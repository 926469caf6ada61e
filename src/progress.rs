// src/progress.rs
use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str = "[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})";
const SPINNER_TEMPLATE: &str = "{spinner} [{elapsed_precise}] {bytes} ({bytes_per_sec})";

/// Console output for split/join: one line per chunk plus a summary,
/// optionally with a byte progress bar drawn underneath.
pub struct Reporter {
    quiet: bool,
    show_bar: bool,
    bar: Option<ProgressBar>,
}

impl Reporter {
    pub fn new(quiet: bool, show_bar: bool) -> Self {
        Self { quiet, show_bar, bar: None }
    }

    #[cfg(test)]
    pub fn silent() -> Self {
        Self::new(true, false)
    }

    /// Starts the bar if one was requested; `total` unknown draws a spinner.
    pub fn begin(&mut self, total: Option<u64>) -> Result<()> {
        if !self.show_bar {
            return Ok(());
        }
        let pb = match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(style(BAR_TEMPLATE)?);
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(style(SPINNER_TEMPLATE)?);
                pb.enable_steady_tick(Duration::from_millis(120));
                pb
            }
        };
        self.bar = Some(pb);
        Ok(())
    }

    pub fn line(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match &self.bar {
            Some(pb) => pb.println(msg),
            None => println!("{}", msg.as_ref()),
        }
    }

    pub fn advance(&self, bytes: u64) {
        if let Some(pb) = &self.bar {
            pb.inc(bytes);
        }
    }

    pub fn finish(&mut self, summary: impl AsRef<str>) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
        self.line(summary);
    }
}

fn style(template: &str) -> Result<ProgressStyle> {
    ProgressStyle::with_template(template)
        .map_err(|e| anyhow!("invalid progress bar template: {}", e))
}
