use tracing::error;

use crate::error::ChatError;
use crate::llm::{build_parts, GeminiClient};
use crate::session::SessionState;
use crate::transcript::{notice, Sender, Transcript};

/// Runs one full send cycle: guard, render the user's entries, build the
/// request, clear the inputs, call the API, and render the reply or error.
///
/// Every pipeline failure is absorbed here: validation-style failures surface
/// as a notice, everything later as a bot transcript entry. On failure the
/// original text is restored so the user can resend it; the consumed image is
/// not.
pub async fn send_message(
    client: &GeminiClient,
    session: &mut SessionState,
    transcript: &mut Transcript,
) {
    if !session.has_input() {
        notice(&ChatError::EmptyInput.to_string());
        return;
    }

    let text = session.text.trim().to_string();
    if !text.is_empty() {
        transcript.append(text.clone(), Sender::User, false);
    }
    if let Some(image) = &session.pending_image {
        transcript.append(image.data_url.clone(), Sender::User, true);
    }

    let parts = match build_parts(&text, session.pending_image.as_ref()) {
        Ok(parts) => parts,
        Err(err) => {
            error!("Failed to build request parts: {err}");
            transcript.append(format!("Error: {err}"), Sender::Bot, false);
            session.restore_text(text);
            return;
        }
    };

    // Both input fields are cleared before the request goes out, so another
    // send cannot reuse a stale image.
    session.clear_input();

    match client.generate(&parts).await {
        Ok(reply) => transcript.append(reply, Sender::Bot, false),
        Err(err) => {
            error!("Send failed: {err}");
            transcript.append(format!("Error: {err}"), Sender::Bot, false);
            session.restore_text(text);
        }
    }
}
