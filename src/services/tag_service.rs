use tracing::{debug, info, warn};

use crate::generation::{
    resolve_tag, GenerateContentResponse, TagResponse, TextGenerator, TAG_ERROR, TAG_NOT_FOUND,
};

/// Build the tagging prompt with title and summary embedded verbatim
pub fn build_prompt(title: &str, summary: &str) -> String {
    format!(
        "以下のニュース内容を1〜3語の日本語タグにしてください。\n\
         出力はタグの文字列だけにしてください。\n\
         \n\
         タイトル: {}\n\
         要約: {}\n",
        title, summary
    )
}

pub struct TagService {
    generator: Box<dyn TextGenerator>,
}

impl TagService {
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Produce a short tag for a news item. Never fails: errors become
    /// [`TAG_ERROR`], responses without usable text become [`TAG_NOT_FOUND`].
    pub async fn extract_tag(&self, title: &str, summary: &str) -> String {
        let prompt = build_prompt(title, summary);

        let response = match self.generator.generate(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%title, error = %e, "Tag generation failed");
                return TAG_ERROR.to_string();
            }
        };

        log_response(title, &response);

        let classified = TagResponse::from(response);
        let kind = classified.kind();
        let tag = resolve_tag(&classified);

        if tag == TAG_NOT_FOUND {
            info!(%title, shape = kind, "No text found in response");
        } else {
            debug!(%title, shape = kind, %tag, "Resolved tag");
        }

        tag
    }
}

fn log_response(title: &str, response: &GenerateContentResponse) {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        warn!(%title, block_reason = reason, "Prompt was blocked");
    }

    if let Some(candidate) = response.candidates.as_ref().and_then(|c| c.first()) {
        let ratings: Vec<String> = candidate
            .safety_ratings
            .iter()
            .map(|r| format!("{}={}", r.category, r.probability))
            .collect();
        debug!(
            %title,
            finish_reason = candidate.finish_reason.as_deref().unwrap_or("-"),
            safety_ratings = %ratings.join(","),
            "Candidate received"
        );
    }
}
