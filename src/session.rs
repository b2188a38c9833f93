/// An image attached to the next outgoing message. At most one exists at a
/// time; a later attach replaces it outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    /// `data:<mime>;base64,<payload>`
    pub data_url: String,
    pub mime_type: String,
    pub file_name: String,
}

/// The session's mutable input state: the current message text and the
/// pending image, if any. Owned by the REPL and handed to the send pipeline
/// explicitly; nothing else touches it.
#[derive(Debug, Default)]
pub struct SessionState {
    pub text: String,
    pub pending_image: Option<PendingImage>,
}

impl SessionState {
    pub fn has_input(&self) -> bool {
        !self.text.trim().is_empty() || self.pending_image.is_some()
    }

    /// Clears both input fields at once. Called after the request is built
    /// and before the network call starts, so a later send cannot pick up a
    /// stale image.
    pub fn clear_input(&mut self) {
        self.text.clear();
        self.pending_image = None;
    }

    pub fn set_pending_image(&mut self, image: PendingImage) {
        self.pending_image = Some(image);
    }

    pub fn clear_pending_image(&mut self) -> Option<PendingImage> {
        self.pending_image.take()
    }

    /// Puts the failed message back so the user does not retype it. The
    /// consumed image is intentionally not restored.
    pub fn restore_text(&mut self, text: String) {
        self.text = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> PendingImage {
        PendingImage {
            data_url: "data:image/png;base64,aGVsbG8=".to_string(),
            mime_type: "image/png".to_string(),
            file_name: "cat.png".to_string(),
        }
    }

    #[test]
    fn clear_input_clears_text_and_image_together() {
        let mut session = SessionState {
            text: "hello".to_string(),
            pending_image: Some(image()),
        };

        session.clear_input();
        assert!(session.text.is_empty());
        assert!(session.pending_image.is_none());
    }

    #[test]
    fn has_input_ignores_whitespace_only_text() {
        let mut session = SessionState::default();
        session.text = "   \t".to_string();
        assert!(!session.has_input());

        session.set_pending_image(image());
        assert!(session.has_input());
    }

    #[test]
    fn reattach_replaces_previous_image() {
        let mut session = SessionState::default();
        session.set_pending_image(image());
        session.set_pending_image(PendingImage {
            data_url: "data:image/jpeg;base64,d29ybGQ=".to_string(),
            mime_type: "image/jpeg".to_string(),
            file_name: "dog.jpg".to_string(),
        });

        let pending = session.pending_image.as_ref().unwrap();
        assert_eq!(pending.file_name, "dog.jpg");
    }
}
