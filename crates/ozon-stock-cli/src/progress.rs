//! Progress indicators and number formatting for terminal output

use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner for the page fetch loop
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Format a count with spaces between thousands, e.g. `12 345`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1 000");
        assert_eq!(format_count(2437), "2 437");
        assert_eq!(format_count(51_000), "51 000");
        assert_eq!(format_count(1_234_567), "1 234 567");
    }

    #[test]
    fn test_create_spinner() {
        let pb = create_spinner("Fetching...");
        assert!(!pb.is_finished());
        pb.finish_and_clear();
    }
}
