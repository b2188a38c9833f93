pub mod gemini;
pub mod parts;

pub use gemini::GeminiClient;
pub use parts::{build_parts, MessagePart};
