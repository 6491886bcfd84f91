use crate::domain::Track;

const YOUTUBE_WATCH: &str = "https://www.youtube.com/watch?v=";

/// Search terms for a track: `"{artist} {title}"`, each word URL-escaped
/// and joined with `+`.
pub fn search_query(track: &Track) -> String {
    let unescaped = format!("{} {}", track.primary_artist(), track.title);

    unescaped
        .split_whitespace()
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}

pub fn youtube_uri(id: &str) -> String {
    format!("{YOUTUBE_WATCH}{id}")
}

/// Drop playlist arguments (`list=...`) from a watch uri.
pub fn strip_playlist_args(uri: &str) -> &str {
    match uri.find("list=") {
        Some(idx) => uri[..idx].trim_end_matches(['&', '?']),
        None => uri,
    }
}

// Search endpoints, for providers built by the embedding application

pub fn youtube_api_uri(query: &str, key: &str) -> String {
    format!(
        "https://www.googleapis.com/youtube/v3/search?part=snippet&q={query}&type=video&key={key}"
    )
}

pub fn startpage_uri(query: &str) -> String {
    format!("https://www.startpage.com/do/search?query={query}")
}

pub fn duckduckgo_uri(query: &str) -> String {
    format!("https://duckduckgo.com/lite/?q={query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_joins_artist_and_title() {
        let track = Track {
            artists: vec!["Simon & Garfunkel".into()],
            ..Track::new(1, "The Boxer")
        };
        assert_eq!(search_query(&track), "Simon+%26+Garfunkel+The+Boxer");

        let anonymous = Track::new(2, "Intro");
        assert_eq!(search_query(&anonymous), "Intro");
    }

    #[test]
    fn watch_uris() {
        assert_eq!(youtube_uri("abc123"), "https://www.youtube.com/watch?v=abc123");
        assert_eq!(
            strip_playlist_args("https://www.youtube.com/watch?v=abc&list=PL1&index=2"),
            "https://www.youtube.com/watch?v=abc"
        );
        assert_eq!(
            strip_playlist_args("https://www.youtube.com/watch?v=abc"),
            "https://www.youtube.com/watch?v=abc"
        );
    }

    #[test]
    fn provider_endpoints() {
        assert_eq!(
            duckduckgo_uri("a+b"),
            "https://duckduckgo.com/lite/?q=a+b"
        );
        assert!(youtube_api_uri("a+b", "KEY").contains("q=a+b&type=video&key=KEY"));
        assert!(startpage_uri("x").ends_with("query=x"));
    }
}
