use super::normalize::normalize;

/// Score of a candidate that cannot be the wanted track.
pub const BAD_SCORE: usize = 1_000_000;

const NOISE: [&str; 3] = ["official", "video", "audio"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    pub id: String,
    pub title: String,
}

impl MatchCandidate {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        MatchCandidate {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Distance between a result title and the known track metadata, lower is
/// better. Counts the characters left once noise words, artist, album and
/// title are removed from the normalized candidate.
pub fn score(candidate: &str, title: &str, artist: &str, album: &str) -> usize {
    let mut candidate = normalize(candidate);
    let title = normalize(title);

    // A real match carries at least the title's characters
    if candidate.chars().count() < title.chars().count() {
        return BAD_SCORE;
    }

    for noise in NOISE {
        candidate = candidate.replace(noise, "");
    }

    for needle in [normalize(artist), normalize(album), title] {
        if !needle.is_empty() {
            candidate = candidate.replacen(&needle, "", 1);
        }
    }

    candidate.chars().count()
}

/// Best scoring candidate; ties keep the earliest one.
pub fn best_match<'a>(
    candidates: &'a [MatchCandidate],
    title: &str,
    artist: &str,
    album: &str,
) -> Option<(&'a MatchCandidate, usize)> {
    let mut best: Option<(&MatchCandidate, usize)> = None;

    for candidate in candidates {
        let s = score(&candidate.title, title, artist, album);
        if s < best.map_or(BAD_SCORE, |(_, b)| b) {
            best = Some((candidate, s));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_scores_zero() {
        assert_eq!(score("The Beatles - Yesterday", "Yesterday", "The Beatles", "Help!"), 0);
        assert_eq!(score("Yesterday", "Yesterday", "The Beatles", "Help!"), 0);
    }

    #[test]
    fn noise_words_are_free() {
        assert_eq!(
            score(
                "The Beatles - Yesterday (Official Audio Video)",
                "Yesterday",
                "The Beatles",
                "Help!"
            ),
            0
        );
    }

    #[test]
    fn full_metadata_with_noise_is_perfect() {
        assert_eq!(
            score("Yesterday Beatles Help Official Video", "Yesterday", "Beatles", "Help"),
            0
        );
    }

    #[test]
    fn extra_words_cost_their_length() {
        assert_eq!(
            score("The Beatles - Yesterday (Live)", "Yesterday", "The Beatles", "Help!"),
            4
        );
    }

    #[test]
    fn short_candidates_are_rejected() {
        assert_eq!(score("Yes", "Yesterday", "The Beatles", "Help!"), BAD_SCORE);
    }

    #[test]
    fn needles_are_removed_once() {
        // The second "yesterday" stays
        assert_eq!(score("Yesterday Yesterday", "Yesterday", "", ""), 9);
    }

    #[test]
    fn accents_do_not_matter() {
        assert_eq!(score("Beyonce - Deja Vu", "Déjà Vu", "Beyoncé", "B'Day"), 0);
    }

    #[test]
    fn best_match_prefers_lowest_then_first() {
        let candidates = vec![
            MatchCandidate::new("a", "Yesterday (Live at the BBC)"),
            MatchCandidate::new("b", "The Beatles - Yesterday"),
            MatchCandidate::new("c", "Yesterday - The Beatles"),
            MatchCandidate::new("d", "Yes"),
        ];

        let (best, s) = best_match(&candidates, "Yesterday", "The Beatles", "Help!").unwrap();
        assert_eq!(best.id, "b");
        assert_eq!(s, 0);
    }

    #[test]
    fn no_valid_candidate_is_none() {
        let candidates = vec![MatchCandidate::new("d", "Yes")];
        assert!(best_match(&candidates, "Yesterday", "The Beatles", "Help!").is_none());
        assert!(best_match(&[], "Yesterday", "The Beatles", "Help!").is_none());
    }
}
