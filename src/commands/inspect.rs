use std::path::Path;

use colored::Colorize;
use tabled::Tabled;

use slack_attachments::codec::{self, DecodeOptions};
use slack_attachments::error::Result;
use slack_attachments::types::{Attachment, AttachmentAction, Block, BlockElement, ContentMode};

use crate::commands::read_input;
use crate::output::{self, color_swatch, presence, truncate};

#[derive(Tabled)]
struct ActionRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Text")]
    text: String,
    #[tabled(rename = "Style")]
    style: String,
}

impl From<&AttachmentAction> for ActionRow {
    fn from(action: &AttachmentAction) -> Self {
        Self {
            kind: action.kind.to_string(),
            name: action.name.clone(),
            text: presence(Some(action.text.as_str())),
            style: action.style.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Tabled)]
struct BlockRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Block ID")]
    block_id: String,
    #[tabled(rename = "Summary")]
    summary: String,
}

impl From<&Block> for BlockRow {
    fn from(block: &Block) -> Self {
        let kind = match block {
            Block::Unknown(_) => format!("{} {}", block.tag(), "(opaque)".bright_black()),
            _ => block.tag().to_string(),
        };
        Self {
            kind,
            block_id: block.block_id().unwrap_or("-").to_string(),
            summary: summarize_block(block),
        }
    }
}

/// One-line description of what a block shows.
pub fn summarize_block(block: &Block) -> String {
    let text = match block {
        Block::Section(section) => section.text.as_ref().map(|t| t.text.clone()),
        Block::Header(header) => Some(header.text.text.clone()),
        Block::Image(image) => Some(image.alt_text.clone()),
        _ => None,
    };

    let elements: Vec<String> = block.elements().into_iter().map(describe_element).collect();

    match (text, elements.is_empty()) {
        (Some(text), true) => truncate(&text, 50),
        (Some(text), false) => format!("{} [{}]", truncate(&text, 40), elements.join(", ")),
        (None, false) => elements.join(", "),
        (None, true) => String::new(),
    }
}

fn describe_element(element: &BlockElement) -> String {
    match element {
        BlockElement::StaticSelect(select) => {
            let count = select.options.as_ref().map_or(0, Vec::len);
            format!("static_select ({count} option(s))")
        }
        BlockElement::Text(text) => format!("{}: {}", text.kind, truncate(&text.text, 20)),
        other => match other.action_id() {
            Some(id) => format!("{} {}", other.tag(), truncate(id, 20)),
            None => other.tag().to_string(),
        },
    }
}

fn print_summary(attachment: &Attachment) {
    let mode = attachment.content_mode();
    println!("{} {}", "Mode:".bold(), mode);
    if let Some(id) = attachment.id {
        println!("{} {}", "ID:".bold(), id);
    }
    if let Some(color) = &attachment.color {
        println!("{} {}", "Color:".bold(), color_swatch(color));
    }
    println!("{} {}", "Fallback:".bold(), presence(attachment.fallback.as_deref()));
    println!("{} {}", "Text:".bold(), presence(attachment.text.as_deref()));
    if let Some(title) = &attachment.title {
        println!("{} {}", "Title:".bold(), truncate(title, 60));
    }
    if let Some(fields) = &attachment.fields {
        println!("{} {}", "Fields:".bold(), fields.len());
    }
    if !attachment.extra.is_empty() {
        let keys: Vec<&str> = attachment.extra.keys().map(String::as_str).collect();
        println!("{} {}", "Other keys:".bold(), keys.join(", "));
    }
    if mode == ContentMode::Mixed {
        println!(
            "{}",
            "Both legacy content and blocks are present".yellow()
        );
    }
}

pub fn run(file: &Path, options: DecodeOptions) -> Result<()> {
    let bytes = read_input(file)?;
    let attachment = codec::decode_with(&bytes, options)?;

    output::print_item(&attachment, print_summary);

    if output::format() != output::OutputFormat::Table {
        return Ok(());
    }

    if let Some(actions) = attachment.actions.as_deref().filter(|a| !a.is_empty()) {
        println!("\n{}", "Actions".bold());
        output::print_table(actions, |a| ActionRow::from(a));
    }
    if let Some(blocks) = attachment.blocks.as_deref().filter(|b| !b.is_empty()) {
        println!("\n{}", "Blocks".bold());
        output::print_table(blocks, |b| BlockRow::from(b));
    }

    Ok(())
}
