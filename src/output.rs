use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

/// Global output settings
static OUTPUT_FORMAT: AtomicU8 = AtomicU8::new(0);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    let raw = match format {
        OutputFormat::Table => 0,
        OutputFormat::Json => 1,
        OutputFormat::Compact => 2,
    };
    OUTPUT_FORMAT.store(raw, Ordering::Relaxed);
}

pub fn format() -> OutputFormat {
    match OUTPUT_FORMAT.load(Ordering::Relaxed) {
        1 => OutputFormat::Json,
        2 => OutputFormat::Compact,
        _ => OutputFormat::Table,
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

fn to_json<T: Serialize + ?Sized>(item: &T) -> Option<String> {
    match format() {
        OutputFormat::Json => serde_json::to_string_pretty(item).ok(),
        OutputFormat::Compact => serde_json::to_string(item).ok(),
        OutputFormat::Table => None,
    }
}

/// Print a table or JSON depending on output mode
pub fn print_table<T, R, F>(items: &[T], to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if let Some(json) = to_json(items) {
        println!("{json}");
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
}

/// Print a single item or JSON depending on output mode
pub fn print_item<T: Serialize>(item: &T, display: impl FnOnce(&T)) {
    if let Some(json) = to_json(item) {
        println!("{json}");
    } else {
        display(item);
    }
}

/// Print a status message (skipped when quiet or in JSON modes)
pub fn print_message(message: &str) {
    if is_quiet() || format() != OutputFormat::Table {
        return;
    }
    println!("{message}");
}

/// Render an attachment color: hex colors as a swatch, named colors by name
pub fn color_swatch(color: &str) -> String {
    if let Ok((r, g, b)) = parse_hex_color(color) {
        return format!("{} {}", "■".truecolor(r, g, b), color);
    }

    match color {
        "good" => color.green().to_string(),
        "warning" => color.yellow().to_string(),
        "danger" => color.red().to_string(),
        _ => color.to_string(),
    }
}

fn parse_hex_color(hex: &str) -> Result<(u8, u8, u8), ()> {
    let hex = hex.strip_prefix('#').ok_or(())?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(());
    }
    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| ())?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| ())?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| ())?;
    Ok((r, g, b))
}

/// Describe an optional string field, keeping "absent" and "empty" apart
pub fn presence(value: Option<&str>) -> String {
    match value {
        None => "-".bright_black().to_string(),
        Some("") => "(empty)".italic().to_string(),
        Some(text) => truncate(text, 60),
    }
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#13A554"), Ok((0x13, 0xA5, 0x54)));
        assert!(parse_hex_color("13A554").is_err());
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("good").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Available actions:", 10), "Availab...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn test_presence_distinguishes_empty() {
        colored::control::set_override(false);
        assert_eq!(presence(None), "-");
        assert_eq!(presence(Some("")), "(empty)");
        assert_eq!(presence(Some("hi")), "hi");
    }
}
