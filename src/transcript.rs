use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Bot",
        }
    }
}

/// One rendered message. Image entries keep the full data URL as content and
/// display a short summary instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub sender: Sender,
    pub is_image: bool,
    pub content: String,
}

impl ChatEntry {
    pub fn display_line(&self) -> String {
        if self.is_image {
            format!(
                "{}: [image attached: {}]",
                self.sender.label(),
                summarize_data_url(&self.content)
            )
        } else {
            format!("{}: {}", self.sender.label(), self.content)
        }
    }
}

fn summarize_data_url(data_url: &str) -> String {
    let (prefix, payload) = data_url.split_once(',').unwrap_or(("", data_url));
    let mime = prefix
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .filter(|mime| !mime.is_empty())
        .unwrap_or("unknown");
    // Rough decoded size from the base64 length.
    let bytes = payload.len() / 4 * 3;
    format!("{}, {:.1} KiB", mime, bytes as f64 / 1024.0)
}

/// Append-only chat log. Every append prints the entry; the terminal itself
/// provides the scrollback.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<ChatEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, content: String, sender: Sender, is_image: bool) {
        let entry = ChatEntry {
            sender,
            is_image,
            content,
        };
        println!("{}", entry.display_line());
        let _ = io::stdout().flush();
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }
}

/// The blocking-alert analog: validation and empty-input messages go to
/// stderr and never into the transcript.
pub fn notice(message: &str) {
    eprintln!("! {message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_entries_render_sender_and_literal_content() {
        let mut transcript = Transcript::new();
        transcript.append("<b>hi</b> & bye".to_string(), Sender::User, false);
        transcript.append("reply".to_string(), Sender::Bot, false);

        let entries = transcript.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_line(), "You: <b>hi</b> & bye");
        assert_eq!(entries[1].display_line(), "Bot: reply");
    }

    #[test]
    fn image_entries_keep_data_url_and_display_summary() {
        let mut transcript = Transcript::new();
        let data_url = format!("data:image/png;base64,{}", "A".repeat(4096));
        transcript.append(data_url.clone(), Sender::User, true);

        let entry = &transcript.entries()[0];
        assert_eq!(entry.content, data_url);
        assert!(entry.display_line().starts_with("You: [image attached: image/png"));
    }

    #[test]
    fn entries_are_never_edited_or_removed() {
        let mut transcript = Transcript::new();
        transcript.append("first".to_string(), Sender::User, false);
        transcript.append("second".to_string(), Sender::Bot, false);
        transcript.append("third".to_string(), Sender::User, false);

        let contents: Vec<_> = transcript
            .entries()
            .iter()
            .map(|entry| entry.content.as_str())
            .collect();
        assert_eq!(contents, ["first", "second", "third"]);
    }
}
