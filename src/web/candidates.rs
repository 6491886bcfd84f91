use super::score::MatchCandidate;
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct Snippet {
    title: String,
}

/// Candidates from a YouTube data API search response. Items that are not
/// videos are skipped.
pub fn parse_youtube_response(json: &str) -> Result<Vec<MatchCandidate>> {
    let response: SearchResponse =
        serde_json::from_str(json).context("Malformed YouTube search response")?;

    Ok(response
        .items
        .into_iter()
        .filter_map(|item| Some(MatchCandidate::new(item.id.video_id?, item.snippet.title)))
        .collect())
}

/// Candidates from scraped result links, given as `(href, text)` pairs.
pub fn candidates_from_links<H, T>(links: impl IntoIterator<Item = (H, T)>) -> Vec<MatchCandidate>
where
    H: AsRef<str>,
    T: AsRef<str>,
{
    links
        .into_iter()
        .filter_map(|(href, text)| {
            let href = urlencoding::decode(href.as_ref()).ok()?;
            if !href.contains("youtube.com/watch?v") {
                return None;
            }

            let id = href.split("watch?v=").nth(1)?.split('&').next()?;
            match id.is_empty() {
                true => None,
                false => Some(MatchCandidate::new(id, text.as_ref())),
            }
        })
        .collect()
}
