pub mod extract;
pub mod gemini;
pub mod response;
pub mod traits;

pub use extract::{resolve_tag, TagResponse, TAG_ERROR, TAG_NOT_FOUND};
pub use gemini::GeminiClient;
pub use response::GenerateContentResponse;
pub use traits::TextGenerator;
