mod cache;
mod cancel;
mod candidates;
mod lyrics;
mod normalize;
mod query;
mod resolver;
mod score;
mod worker;

pub use cache::{default_cache_dir, web_cache_path};
pub use cancel::CancelToken;
pub use candidates::{candidates_from_links, parse_youtube_response};
pub use lyrics::{genius_lyrics_uri, lyrics_terms, split_radio_title, wikia_lyrics_uri};
pub use normalize::{DEFAULT_KEEP, escape, normalize};
pub use query::{
    duckduckgo_uri, search_query, startpage_uri, strip_playlist_args, youtube_api_uri,
    youtube_uri,
};
pub use resolver::{SearchProvider, WebResolver};
pub use score::{BAD_SCORE, MatchCandidate, best_match, score};
pub use worker::{SearchEvent, SearchWorker};
