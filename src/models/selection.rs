use serde::{Deserialize, Serialize};

/// One of the three categories a listener picks from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Mood,
    Activity,
    Genre,
}

/// Static mapping from a selection key to its ordered search keywords.
///
/// Lookups of unknown keys return an empty slice rather than failing.
#[derive(Debug)]
pub struct KeywordTable {
    dimension: Dimension,
    entries: &'static [(&'static str, &'static [&'static str])],
}

impl KeywordTable {
    const fn new(
        dimension: Dimension,
        entries: &'static [(&'static str, &'static [&'static str])],
    ) -> Self {
        Self { dimension, entries }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Keywords for `key`, most significant first
    pub fn keywords(&self, key: &str) -> &'static [&'static str] {
        self.entries
            .iter()
            .find(|(known, _)| *known == key)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }

    /// Known keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }
}

pub static MOOD_KEYWORDS: KeywordTable = KeywordTable::new(
    Dimension::Mood,
    &[
        ("senang", &["happy", "feel good", "uplifting"]),
        ("sedih", &["sad", "melancholy", "emotional"]),
        ("capek", &["calm", "relaxing", "soothing"]),
        ("semangat", &["energetic", "motivational", "power"]),
    ],
);

pub static ACTIVITY_KEYWORDS: KeywordTable = KeywordTable::new(
    Dimension::Activity,
    &[
        (
            "belajar",
            &["study", "focus", "concentration", "instrumental", "lofi"],
        ),
        ("olahraga", &["workout", "gym", "high energy", "cardio"]),
        ("bersantai", &["chill", "relax", "ambient", "soft"]),
        (
            "bekerja",
            &["productivity", "deep focus", "background", "instrumental"],
        ),
    ],
);

// "" (no genre) is deliberately absent and resolves to no keywords.
pub static GENRE_KEYWORDS: KeywordTable = KeywordTable::new(
    Dimension::Genre,
    &[
        ("pop", &["pop"]),
        ("rock", &["rock"]),
        ("jazz", &["jazz"]),
        ("lofi", &["lofi", "chillhop"]),
        ("edm", &["edm", "electronic", "dance"]),
        ("acoustic", &["acoustic"]),
        ("kpop", &["kpop", "k-pop"]),
        ("dangdut", &["dangdut"]),
    ],
);

/// A listener's mood/activity/genre choice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub activity: String,
    /// Empty means no genre constraint
    #[serde(default)]
    pub genre: String,
}

impl Selection {
    pub fn new(
        mood: impl Into<String>,
        activity: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            mood: mood.into(),
            activity: activity.into(),
            genre: genre.into(),
        }
    }

    /// Mood and activity are both required before a search makes sense
    pub fn is_complete(&self) -> bool {
        !self.mood.trim().is_empty() && !self.activity.trim().is_empty()
    }
}

/// Known keys for every dimension, as served to form-building clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionOptions {
    pub moods: Vec<String>,
    pub activities: Vec<String>,
    pub genres: Vec<String>,
}

impl SelectionOptions {
    pub fn known() -> Self {
        let collect =
            |table: &KeywordTable| -> Vec<String> { table.keys().map(str::to_string).collect() };
        Self {
            moods: collect(&MOOD_KEYWORDS),
            activities: collect(&ACTIVITY_KEYWORDS),
            genres: collect(&GENRE_KEYWORDS),
        }
    }
}
