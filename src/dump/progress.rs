//! Progress tracking for dump conversion

use super::source::ConvertStats;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

/// Progress tracker for a conversion run
pub struct ConvertProgress {
    /// Progress bar (None in quiet mode)
    progress_bar: Option<ProgressBar>,
    /// Start time
    start_time: Instant,
    /// Entries written
    entries_written: AtomicUsize,
    /// Pages skipped
    pages_skipped: AtomicUsize,
    /// Bytes of the decoded stream consumed
    bytes_processed: AtomicU64,
}

impl ConvertProgress {
    /// Create a new tracker. `total_bytes` sizes the bar; quiet mode
    /// suppresses all terminal output.
    pub fn new(total_bytes: u64, quiet: bool) -> Self {
        let progress_bar = if !quiet {
            let pb = ProgressBar::new(total_bytes);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        Self {
            progress_bar,
            start_time: Instant::now(),
            entries_written: AtomicUsize::new(0),
            pages_skipped: AtomicUsize::new(0),
            bytes_processed: AtomicU64::new(0),
        }
    }

    /// Record one written entry, moving the bar to `bytes_consumed`
    pub fn entry_written(&self, title: &str, bytes_consumed: u64) {
        let written = self.entries_written.fetch_add(1, Ordering::Relaxed) + 1;
        self.bytes_processed.store(bytes_consumed, Ordering::Relaxed);

        if let Some(ref pb) = self.progress_bar {
            pb.set_position(bytes_consumed);

            let elapsed = self.start_time.elapsed().as_secs_f64();
            let rate = if elapsed > 0.0 {
                written as f64 / elapsed
            } else {
                0.0
            };

            // Truncate the title safely for UTF-8
            let display_title = if title.chars().count() > 30 {
                let truncated: String = title.chars().take(27).collect();
                format!("{}...", truncated)
            } else {
                title.to_string()
            };

            pb.set_message(format!("{:.1} entries/s | {}", rate, display_title));
        }
    }

    /// Sync the skipped-page count reported by the source
    pub fn set_pages_skipped(&self, skipped: usize) {
        self.pages_skipped.store(skipped, Ordering::Relaxed);
    }

    /// Current statistics
    pub fn get_stats(&self) -> ConvertStats {
        let mut stats = ConvertStats {
            entries_written: self.entries_written.load(Ordering::Relaxed),
            pages_skipped: self.pages_skipped.load(Ordering::Relaxed),
            bytes_processed: self.bytes_processed.load(Ordering::Relaxed),
            elapsed_seconds: self.start_time.elapsed().as_secs_f64(),
            entries_per_second: 0.0,
        };
        stats.update_rate();
        stats
    }

    /// Finish the progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            let stats = self.get_stats();
            pb.finish_with_message(format!(
                "Done! {} entries, {} skipped, {:.1} entries/s",
                stats.entries_written, stats.pages_skipped, stats.entries_per_second
            ));
        }
    }

    /// Print summary to console
    pub fn print_summary(&self) {
        let stats = self.get_stats();

        println!("\nConversion Summary");
        println!("==================");
        println!("Entries written:  {}", stats.entries_written);
        println!("Pages skipped:    {}", stats.pages_skipped);
        println!("Bytes processed:  {} MB", stats.bytes_processed / 1_000_000);
        println!("Elapsed time:     {:.1}s", stats.elapsed_seconds);
        println!("Processing rate:  {:.1} entries/s", stats.entries_per_second);
    }
}
