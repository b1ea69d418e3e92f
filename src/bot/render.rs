//! Markdown rendering of lookup payloads and command texts.
//!
//! The core hands over transport-agnostic (label, value) pairs; turning
//! them into chat Markdown happens here and only here.

use crate::lookup::{MissReport, RecordCard, Resolution};

/// Names per `/list` message, to stay under the message size limit.
const LIST_CHUNK_SIZE: usize = 50;

pub const PROMPT_TEXT: &str = "📝 Please send a trading point name to look up";

pub const START_TEXT: &str = "\
👋 *Hi! I look up trading point information.*

Send me a *store name* and I will reply with everything on file about it.

*How to use:*
1. Type the store name
2. Read the details
3. If nothing is found, check the spelling

*Commands:*
/start - show this message
/help - help
/list - show every known name
/reload - reload the data file";

pub const HELP_TEXT: &str = "\
*Help*

🤖 *What this bot does:*
Looks up trading point records in the data file.

🔍 *How to search:*
Just type the store name into the chat.

⚡ *Commands:*
/start - start
/help - this text
/list - show every known name
/reload - reload the data file

💡 *Tips:*
• Case and surrounding spaces do not matter
• Use /list to see every valid name";

pub const UNKNOWN_COMMAND_TEXT: &str = "Unknown command. Try /help";

/// Render a resolution as one chat message.
pub fn render(resolution: &Resolution) -> String {
    match resolution {
        Resolution::EmptyQuery => PROMPT_TEXT.to_string(),
        Resolution::Found(card) => render_card(card),
        Resolution::Miss(miss) => render_miss(miss),
    }
}

/// Success payload: the name header, then one line per schema field.
pub fn render_card(card: &RecordCard) -> String {
    let mut out = format!("🏪 *{}* ({})\n", card.display_name, card.partition);
    for (label, value) in &card.fields {
        out.push_str(&format!("\n*{}:* {}", label, value));
    }
    out
}

/// Miss payload: the echoed query plus suggestions, if any.
pub fn render_miss(miss: &MissReport) -> String {
    let mut out = format!("❌ *Trading point \"{}\" was not found*\n", miss.query);

    if !miss.suggestions.is_empty() {
        out.push_str("\n💡 *Similar names:*\n");
        for name in &miss.suggestions {
            out.push_str(&format!("• {}\n", name));
        }
    }

    out.push_str("\nCheck the spelling, or use /list to see every name.");
    out
}

/// Split the full name listing into numbered chunks.
pub fn render_list(names: &[String]) -> Vec<String> {
    if names.is_empty() {
        return vec!["📋 The data file contains no trading points.".to_string()];
    }

    let total = names.len().div_ceil(LIST_CHUNK_SIZE);
    names
        .chunks(LIST_CHUNK_SIZE)
        .enumerate()
        .map(|(i, chunk)| {
            let mut out = format!("📋 *Trading points ({}/{}):*\n\n", i + 1, total);
            for name in chunk {
                out.push_str(&format!("• {}\n", name));
            }
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::NOT_SPECIFIED;

    #[test]
    fn test_render_card() {
        let card = RecordCard {
            display_name: "Гульден".to_string(),
            partition: "North".to_string(),
            fields: vec![
                ("Format".to_string(), "Lite".to_string()),
                ("Manager".to_string(), NOT_SPECIFIED.to_string()),
            ],
        };
        let text = render_card(&card);
        assert!(text.starts_with("🏪 *Гульден* (North)"));
        assert!(text.contains("*Format:* Lite"));
        assert!(text.contains("*Manager:* not specified"));
    }

    #[test]
    fn test_render_miss_with_suggestions() {
        let miss = MissReport {
            query: "гуль".to_string(),
            suggestions: vec!["Гульден".to_string()],
        };
        let text = render_miss(&miss);
        assert!(text.contains("\"гуль\""));
        assert!(text.contains("• Гульден"));
    }

    #[test]
    fn test_render_miss_without_suggestions() {
        let miss = MissReport {
            query: "zzz".to_string(),
            suggestions: vec![],
        };
        let text = render_miss(&miss);
        assert!(!text.contains("Similar names"));
        assert!(text.contains("/list"));
    }

    #[test]
    fn test_render_list_chunks() {
        let names: Vec<String> = (1..=120).map(|i| format!("Point {i:03}")).collect();
        let chunks = render_list(&names);
        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].contains("(1/3)"));
        assert!(chunks[2].contains("(3/3)"));
        assert!(chunks[0].contains("• Point 001"));
    }
}
