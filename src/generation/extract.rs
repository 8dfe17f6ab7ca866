use super::response::{Candidate, GenerateContentResponse};

/// Tag used when the service answered but no usable text was found
pub const TAG_NOT_FOUND: &str = "タグ生成失敗";

/// Tag used when the call or decoding itself failed
pub const TAG_ERROR: &str = "タグ生成エラー";

/// Where a response keeps its text, if anywhere
#[derive(Debug, Clone, PartialEq)]
pub enum TagResponse {
    DirectText(String),
    CandidateList(Vec<Candidate>),
    Neither,
}

impl From<GenerateContentResponse> for TagResponse {
    fn from(response: GenerateContentResponse) -> Self {
        if let Some(text) = response.text {
            if !text.trim().is_empty() {
                return TagResponse::DirectText(text);
            }
        }

        match response.candidates {
            Some(candidates) if !candidates.is_empty() => TagResponse::CandidateList(candidates),
            _ => TagResponse::Neither,
        }
    }
}

impl TagResponse {
    pub fn kind(&self) -> &'static str {
        match self {
            TagResponse::DirectText(_) => "direct_text",
            TagResponse::CandidateList(_) => "candidate_list",
            TagResponse::Neither => "neither",
        }
    }
}

/// Map a classified response to a tag string.
///
/// Only the first candidate is considered; its parts are scanned in order and
/// the first non-blank text wins. Falls back to [`TAG_NOT_FOUND`].
pub fn resolve_tag(response: &TagResponse) -> String {
    let found = match response {
        TagResponse::DirectText(text) => Some(text.trim()),
        TagResponse::CandidateList(candidates) => candidates.first().and_then(first_part_text),
        TagResponse::Neither => None,
    };

    found
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| TAG_NOT_FOUND.to_string())
}

fn first_part_text(candidate: &Candidate) -> Option<&str> {
    candidate
        .content
        .as_ref()?
        .parts
        .as_ref()?
        .iter()
        .filter_map(|part| part.text.as_deref())
        .map(str::trim)
        .find(|text| !text.is_empty())
}
