use argo_assistant::{IMAGE_DOWNLOAD_FILE_NAME, QUICK_PROMPTS};
use argo_storage::{MessageRecord, MessageRole};
use chrono::{Local, TimeZone};

use crate::chat::ImagePanel;
use crate::settings::ChatSettings;

pub const LOADING_TEXT: &str = "Analyzing ocean data...";
pub const TAGLINE: &str = "AI-powered ocean data exploration and visualization";
const USER_LABEL: &str = "You";

pub fn render_header(settings: &ChatSettings) -> String {
    let rule = "~".repeat(settings.assistant_name.chars().count().max(TAGLINE.len()));
    format!("{rule}\n{}\n{TAGLINE}\n{rule}", settings.assistant_name)
}

/// Local wall-clock time of a record, `HH:MM:SS`.
pub fn format_local_time(unix_millis: u64) -> String {
    match Local.timestamp_millis_opt(unix_millis as i64).single() {
        Some(time) => time.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

pub fn render_message(record: &MessageRecord, settings: &ChatSettings) -> String {
    let label = match record.role {
        MessageRole::User => USER_LABEL,
        MessageRole::Assistant => settings.assistant_name.as_str(),
    };

    let mut rendered = if settings.show_timestamps {
        format!("[{}] {label}:\n", format_local_time(record.created_at_unix_millis))
    } else {
        format!("{label}:\n")
    };

    for line in record.content.lines() {
        rendered.push_str("  ");
        rendered.push_str(line);
        rendered.push('\n');
    }
    if let Some(image_url) = &record.image_url {
        rendered.push_str(&format!("  [image] {image_url}\n"));
    }
    rendered
}

pub fn render_image_panel(panel: &ImagePanel) -> String {
    let mut rendered = String::from("Ocean Visualization\n");
    if panel.prompt().trim().is_empty() {
        rendered.push_str("  prompt: (empty, use /prompt <text> or /idea <n>)\n");
    } else {
        rendered.push_str(&format!("  prompt: {}\n", panel.prompt()));
    }

    rendered.push_str("  Quick ideas:\n");
    for (index, idea) in QUICK_PROMPTS.iter().enumerate() {
        rendered.push_str(&format!("    {}. {idea}\n", index + 1));
    }

    if panel.is_generating() {
        rendered.push_str("  Generating...\n");
    } else if let Some(image) = panel.generated() {
        rendered.push_str(&format!(
            "  generated: {} (save as {IMAGE_DOWNLOAD_FILE_NAME}, /use to post it)\n",
            image.url
        ));
    }
    rendered
}
