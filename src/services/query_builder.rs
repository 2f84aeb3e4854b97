//! Turns a mood/activity/genre selection into a YouTube search query.
//!
//! The first keyword of each dimension forms the primary clause, ordered
//! genre, mood, activity. The remaining keywords follow in the same order, and
//! the query always ends with [`QUERY_SUFFIX`].

use crate::models::{Selection, ACTIVITY_KEYWORDS, GENRE_KEYWORDS, MOOD_KEYWORDS};

/// Appended to every query to bias results towards playlists
pub const QUERY_SUFFIX: &str = "music playlist";

/// Returned when nothing else survives
pub const FALLBACK_QUERY: &str = QUERY_SUFFIX;

/// Builds a search query. Never fails: unknown keys contribute no keywords.
pub fn build_query(mood: &str, activity: &str, genre: &str) -> String {
    let dimensions = [
        GENRE_KEYWORDS.keywords(genre),
        MOOD_KEYWORDS.keywords(mood),
        ACTIVITY_KEYWORDS.keywords(activity),
    ];

    let primary = dimensions.iter().filter_map(|keywords| keywords.first());
    let expansion = dimensions.iter().flat_map(|keywords| keywords.iter().skip(1));

    let query = primary
        .chain(expansion)
        .copied()
        .chain(std::iter::once(QUERY_SUFFIX))
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    if query.is_empty() {
        FALLBACK_QUERY.to_string()
    } else {
        query
    }
}

impl Selection {
    pub fn query(&self) -> String {
        build_query(&self.mood, &self.activity, &self.genre)
    }
}
