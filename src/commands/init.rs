use std::io::{self, BufRead, Write};

use slack_attachments::error::{AttachmentError, Result};

use crate::config::Config;

fn prompt(question: &str, input: &mut impl BufRead) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Build the config file contents from the interactive answers.
pub fn render_config(strict: bool, pretty: bool, format: &str) -> String {
    let mut contents = format!("strict = {strict}\npretty = {pretty}\n");
    if !format.is_empty() {
        contents.push_str(&format!("format = \"{format}\"\n"));
    }
    contents
}

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    if config_path.exists() {
        let answer = prompt(
            &format!(
                "Config file already exists at {}. Overwrite? [y/N] ",
                config_path.display()
            ),
            &mut input,
        )?;
        if !is_yes(&answer) {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("slack-attach Configuration");
    println!("==========================\n");

    let strict = is_yes(&prompt(
        "Reject unrecognized block/element types? [y/N] ",
        &mut input,
    )?);
    let pretty = is_yes(&prompt("Indent output of 'fmt' by default? [y/N] ", &mut input)?);

    let format = loop {
        let answer = prompt("Default output format (table, json, compact) [table]: ", &mut input)?;
        match answer.as_str() {
            "" | "table" | "json" | "compact" => break answer,
            other => println!("Unknown format '{other}'."),
        }
    };

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AttachmentError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, render_config(strict, pretty, &format)).map_err(|e| {
        AttachmentError::ConfigRead {
            path: config_path.clone(),
            source: e,
        }
    })?;

    println!("\nConfig saved to {}", config_path.display());

    Ok(())
}
