//! Progress indicators for the ontology download

use indicatif::{ProgressBar, ProgressStyle};

/// Byte progress bar when the size is known, spinner otherwise
pub fn create_download_progress(size: Option<u64>, message: &str) -> ProgressBar {
    let pb = match size {
        Some(size) => {
            let pb = ProgressBar::new(size);
            if let Ok(style) = ProgressStyle::default_bar().template(
                "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})",
            ) {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        },
        None => {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} {bytes}") {
                pb.set_style(style);
            }
            pb
        },
    };
    pb.set_message(message.to_string());
    pb
}

/// Format bytes into human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}
