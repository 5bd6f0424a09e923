//! Raw catalog tree, one struct per element kind.
//!
//! Values are the decoded, entity-unescaped text exactly as found. A missing
//! element or attribute is an empty string; nothing here is validated.

/// Root `<video-data>` element.
#[derive(Debug, Clone, Default)]
pub struct CatalogDocument {
    pub title: String,
    /// Top-level `<group>` elements, in document order.
    pub series: Vec<RawSeries>,
}

impl CatalogDocument {
    pub fn season_count(&self) -> usize {
        self.series.iter().map(|s| s.seasons.len()).sum()
    }

    pub fn video_count(&self) -> usize {
        self.series
            .iter()
            .flat_map(|s| s.seasons.iter())
            .map(|s| s.videos.len())
            .sum()
    }
}

/// Text with a `type` attribute (`<title type="original">…</title>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedText {
    pub kind: String,
    pub text: String,
}

/// A series: a top-level `<group>`.
#[derive(Debug, Clone, Default)]
pub struct RawSeries {
    pub guid: String,
    pub kind: String,
    pub meta: SeriesMeta,
    /// Nested `<group>` elements.
    pub seasons: Vec<RawSeason>,
}

#[derive(Debug, Clone, Default)]
pub struct SeriesMeta {
    pub titles: Vec<TaggedText>,
    pub description: TaggedText,
    pub restriction: String,
    pub category: String,
    pub year: String,
    pub location: String,
    pub available: String,
    pub featured: String,
    pub priority: String,
    pub imdb_id: String,
    pub external_allowed: String,
    pub credits: Vec<RawCredit>,
    pub kinopoisk_id: String,
    pub quote: Quote,
    pub slogan: TaggedText,
    /// `<studio_restrictions><episodes_allowed>`.
    pub episodes_allowed: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCredit {
    pub role: String,
    pub text: String,
    pub awards: Vec<RawAward>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAward {
    pub kind: String,
    pub year: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Quote {
    pub author: String,
    pub text: String,
}

/// A season: a `<group>` nested inside a series.
#[derive(Debug, Clone, Default)]
pub struct RawSeason {
    pub number: String,
    pub kind: String,
    pub meta: SeasonMeta,
    pub videos: Vec<RawVideo>,
}

#[derive(Debug, Clone, Default)]
pub struct SeasonMeta {
    pub title: TaggedText,
    pub available_start: String,
    pub year: String,
    pub description: TaggedText,
}

/// An episode: a `<video>` inside a season.
#[derive(Debug, Clone, Default)]
pub struct RawVideo {
    pub src: String,
    pub number: String,
    pub guid: String,
    pub start: String,
    pub end: String,
    pub endtitles: String,
    pub episodesinopsys: String,
    pub multilang: String,
    pub meta: VideoMeta,
    pub logo_src: String,
    pub subtitles_src: String,
}

#[derive(Debug, Clone, Default)]
pub struct VideoMeta {
    pub titles: Vec<TaggedText>,
    pub available_start: String,
    pub available_end: String,
    pub duration: String,
    pub featured: String,
}
