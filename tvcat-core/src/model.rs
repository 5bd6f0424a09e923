use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two title variants a catalog entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    /// Title in the language of production.
    Original,
    /// Localized title shown to the catalog's audience.
    Translated,
}

impl TitleKind {
    /// Tag used in the catalog's `type` attribute.
    pub fn tag(self) -> &'static str {
        match self {
            TitleKind::Original => "original",
            TitleKind::Translated => "translated",
        }
    }

    /// Slot a title without a recognized tag falls into, by position.
    pub fn from_position(index: usize) -> Option<Self> {
        match index {
            0 => Some(TitleKind::Original),
            1 => Some(TitleKind::Translated),
            _ => None,
        }
    }

    /// Match a `type` attribute value (case-insensitive, surrounding
    /// whitespace ignored).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("original") {
            Some(TitleKind::Original)
        } else if tag.eq_ignore_ascii_case("translated") {
            Some(TitleKind::Translated)
        } else {
            None
        }
    }
}

impl fmt::Display for TitleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A fully projected TV series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub title_original: String,
    pub title_translated: String,
    /// Internal catalog identifier (a Kinopoisk key). Empty when unknown.
    pub catalog_id: String,
    pub year: i32,
    /// Content restriction label, e.g. "16+".
    pub restriction: String,
    /// Production studio, or the original broadcaster when no studio is credited.
    pub studio: String,
    pub seasons: Vec<Season>,
}

impl Series {
    /// Total number of episodes across all seasons.
    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub number: i32,
    pub year: i32,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub number: i32,
    /// Base name of the media file, e.g. `e01.mkv`.
    pub file: String,
    pub title_original: String,
    pub title_translated: String,
    /// Availability start as written in the catalog. Not validated.
    pub available: String,
}
