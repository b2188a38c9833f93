use serde::Serialize;

use crate::error::ChatError;
use crate::session::PendingImage;

/// Prompt sent when the user attaches an image without any text, so the API
/// always receives an instruction alongside a lone image.
pub const DEFAULT_IMAGE_PROMPT: &str = "Describe this image.";

const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

/// One part of the outgoing `contents[0].parts` list, in the Gemini wire
/// shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MessagePart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl MessagePart {
    pub fn text(text: impl Into<String>) -> Self {
        MessagePart::Text { text: text.into() }
    }

    pub fn inline_image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        MessagePart::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

/// Builds the ordered part list for one user turn: the image part first when
/// an image is attached, then the trimmed text, falling back to
/// [`DEFAULT_IMAGE_PROMPT`] when only an image is present.
///
/// The image checks here re-validate what the attach path already enforced;
/// they guard the wire format, not the user.
pub fn build_parts(
    text: &str,
    pending_image: Option<&PendingImage>,
) -> Result<Vec<MessagePart>, ChatError> {
    let mut parts = Vec::new();

    if let Some(image) = pending_image {
        let base64_data = image
            .data_url
            .split_once(',')
            .map(|(_, payload)| payload)
            .unwrap_or("");
        let mime_type = if image.mime_type.trim().is_empty() {
            FALLBACK_IMAGE_MIME
        } else {
            image.mime_type.as_str()
        };

        if base64_data.is_empty() || !mime_type.starts_with("image/") {
            return Err(ChatError::InvalidImageData);
        }

        parts.push(MessagePart::inline_image(mime_type, base64_data));
    }

    let trimmed = text.trim();
    if !trimmed.is_empty() {
        parts.push(MessagePart::text(trimmed));
    } else if pending_image.is_some() {
        parts.push(MessagePart::text(DEFAULT_IMAGE_PROMPT));
    }

    if parts.is_empty() {
        return Err(ChatError::EmptyRequest);
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with(data_url: &str, mime_type: &str) -> PendingImage {
        PendingImage {
            data_url: data_url.to_string(),
            mime_type: mime_type.to_string(),
            file_name: "photo.png".to_string(),
        }
    }

    fn png_image() -> PendingImage {
        image_with("data:image/png;base64,aGVsbG8=", "image/png")
    }

    #[test]
    fn text_only_produces_single_trimmed_text_part() {
        let parts = build_parts("  hello there \n", None).unwrap();
        assert_eq!(parts, vec![MessagePart::text("hello there")]);
    }

    #[test]
    fn image_only_appends_default_prompt() {
        let parts = build_parts("   ", Some(&png_image())).unwrap();
        assert_eq!(
            parts,
            vec![
                MessagePart::inline_image("image/png", "aGVsbG8="),
                MessagePart::text(DEFAULT_IMAGE_PROMPT),
            ]
        );
    }

    #[test]
    fn image_and_text_keep_image_first() {
        let parts = build_parts("what is this?", Some(&png_image())).unwrap();
        assert_eq!(parts.len(), 2);
        assert!(matches!(parts[0], MessagePart::InlineData { .. }));
        assert_eq!(parts[1], MessagePart::text("what is this?"));
    }

    #[test]
    fn empty_mime_falls_back_to_jpeg() {
        let image = image_with("data:;base64,aGVsbG8=", "");
        let parts = build_parts("", Some(&image)).unwrap();
        assert_eq!(
            parts[0],
            MessagePart::inline_image("image/jpeg", "aGVsbG8=")
        );
    }

    #[test]
    fn non_image_mime_is_rejected() {
        let image = image_with("data:text/plain;base64,aGVsbG8=", "text/plain");
        let err = build_parts("hi", Some(&image)).unwrap_err();
        assert!(matches!(err, ChatError::InvalidImageData));
    }

    #[test]
    fn empty_payload_is_rejected() {
        let image = image_with("data:image/png;base64,", "image/png");
        let err = build_parts("", Some(&image)).unwrap_err();
        assert!(matches!(err, ChatError::InvalidImageData));
    }

    #[test]
    fn no_text_and_no_image_is_an_empty_request() {
        let err = build_parts(" \t ", None).unwrap_err();
        assert!(matches!(err, ChatError::EmptyRequest));
    }

    #[test]
    fn parts_serialize_to_the_wire_shape() {
        let parts = build_parts("hi", Some(&png_image())).unwrap();
        let json = serde_json::to_value(&parts).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } },
                { "text": "hi" },
            ])
        );
    }
}
