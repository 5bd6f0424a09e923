//! Projection of the raw catalog tree into the domain model.
//!
//! Every string is trimmed, numeric fields are parsed as integers, the
//! catalog id is resolved (directly or through the crosswalk) and the studio
//! is picked from the credits. Each finished episode is handed to a
//! [`RecordSink`] before the next one is projected.

use std::fmt;
use std::path::{Component, Path};

use thiserror::Error;
use tvcat_core::{Episode, FileRecord, Season, Series, TitleKind};
use tvcat_xml::{RawCredit, RawSeries, RawVideo, TaggedText};

use crate::crosswalk::Crosswalk;
use crate::records::{RecordError, RecordSink};

const STUDIO_ROLE: &str = "studio";
const BROADCASTER_ROLE: &str = "original broadcaster";

/// What went wrong with a single field.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid {field}: '{value}' is not an integer")]
    InvalidNumber { field: &'static str, value: String },

    #[error("missing {variant} title")]
    MissingTitle { variant: TitleKind },

    #[error("{0}")]
    Record(#[from] RecordError),
}

impl FieldError {
    fn at(self, location: &Location) -> ProjectError {
        ProjectError {
            location: location.clone(),
            kind: self,
        }
    }
}

/// Position of a node in the catalog, 1-based, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub series: usize,
    pub guid: String,
    pub season: Option<usize>,
    pub episode: Option<usize>,
}

impl Location {
    pub fn series(position: usize, guid: &str) -> Self {
        Self {
            series: position,
            guid: guid.trim().to_string(),
            season: None,
            episode: None,
        }
    }

    pub fn season(&self, position: usize) -> Self {
        Self {
            season: Some(position),
            episode: None,
            ..self.clone()
        }
    }

    pub fn episode(&self, position: usize) -> Self {
        Self {
            episode: Some(position),
            ..self.clone()
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "series #{}", self.series)?;
        if !self.guid.is_empty() {
            write!(f, " [{}]", self.guid)?;
        }
        if let Some(season) = self.season {
            write!(f, ", season #{season}")?;
        }
        if let Some(episode) = self.episode {
            write!(f, ", episode #{episode}")?;
        }
        Ok(())
    }
}

/// A field failure together with the node it happened in.
#[derive(Debug, Error)]
#[error("{location}: {kind}")]
pub struct ProjectError {
    pub location: Location,
    #[source]
    pub kind: FieldError,
}

/// Title variants of one catalog entry, keyed by kind.
///
/// A `<title>` whose `type` is `original` or `translated` fills that slot,
/// wherever it appears. A slot no tag filled falls back to the title at its
/// position (first original, second translation) when that title carries no
/// recognised tag. Within each rule the first title wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleSet {
    original: Option<String>,
    translated: Option<String>,
}

impl TitleSet {
    pub fn from_tagged(titles: &[TaggedText]) -> Self {
        let mut set = Self::default();
        for title in titles {
            if let Some(kind) = TitleKind::from_tag(&title.kind) {
                set.fill(kind, &title.text);
            }
        }
        for (index, title) in titles.iter().enumerate() {
            if TitleKind::from_tag(&title.kind).is_some() {
                continue;
            }
            if let Some(kind) = TitleKind::from_position(index) {
                set.fill(kind, &title.text);
            }
        }
        set
    }

    fn fill(&mut self, kind: TitleKind, text: &str) {
        let slot = match kind {
            TitleKind::Original => &mut self.original,
            TitleKind::Translated => &mut self.translated,
        };
        if slot.is_none() {
            *slot = Some(text.trim().to_string());
        }
    }

    pub fn get(&self, kind: TitleKind) -> Option<&str> {
        match kind {
            TitleKind::Original => self.original.as_deref(),
            TitleKind::Translated => self.translated.as_deref(),
        }
    }

    pub fn require(&self, kind: TitleKind) -> Result<&str, FieldError> {
        self.get(kind)
            .ok_or(FieldError::MissingTitle { variant: kind })
    }
}

/// Parse a trimmed integer field.
pub fn parse_number(field: &'static str, value: &str) -> Result<i32, FieldError> {
    value
        .trim()
        .parse()
        .map_err(|_| FieldError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Base name of a media path, trimmed: `/a/b/e01.mp4 ` → `e01.mp4`.
///
/// The last path component is used as is, so `/a/..` gives `..` and `/`
/// gives `/`. An empty path stays empty rather than becoming `.`.
pub fn file_name_of(src: &str) -> String {
    match Path::new(src.trim()).components().next_back() {
        Some(Component::Normal(name)) => name.to_string_lossy().trim().to_string(),
        Some(other) => other.as_os_str().to_string_lossy().into_owned(),
        None => String::new(),
    }
}

/// Studio credit, falling back to the original broadcaster.
///
/// The first credit with the role and a non-blank name wins.
pub fn resolve_studio(credits: &[RawCredit]) -> String {
    credited(credits, STUDIO_ROLE)
        .or_else(|| credited(credits, BROADCASTER_ROLE))
        .unwrap_or_default()
}

fn credited(credits: &[RawCredit], role: &str) -> Option<String> {
    credits
        .iter()
        .filter(|c| c.role.trim() == role)
        .map(|c| c.text.trim())
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

/// Resolve the internal catalog id.
///
/// A catalog id present in the source wins. The crosswalk is consulted only
/// when both the catalog id and the IMDb id are empty, and then it is keyed
/// by that empty IMDb id. So only an entry for `""` can ever match.
pub fn resolve_catalog_id(
    kinopoisk_id: &str,
    imdb_id: &str,
    crosswalk: Option<&Crosswalk>,
) -> String {
    let kinopoisk_id = kinopoisk_id.trim();
    let imdb_id = imdb_id.trim();

    if kinopoisk_id.is_empty() && imdb_id.is_empty() {
        if let Some(found) = crosswalk.and_then(|c| c.lookup(imdb_id)) {
            return found.to_string();
        }
    }
    kinopoisk_id.to_string()
}

/// Builds domain series from raw catalog nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projector<'a> {
    crosswalk: Option<&'a Crosswalk>,
}

impl<'a> Projector<'a> {
    pub fn new(crosswalk: &'a Crosswalk) -> Self {
        Self {
            crosswalk: Some(crosswalk),
        }
    }

    /// A projector that never consults a crosswalk.
    pub fn without_crosswalk() -> Self {
        Self { crosswalk: None }
    }

    /// Project one series group. `position` is its 1-based index in the
    /// document and is used only for error locations.
    ///
    /// Records for episodes already emitted stay emitted if a later node fails.
    pub fn project_series<S>(
        &self,
        raw: &RawSeries,
        position: usize,
        records: &mut S,
    ) -> Result<Series, ProjectError>
    where
        S: RecordSink + ?Sized,
    {
        let location = Location::series(position, &raw.guid);
        let meta = &raw.meta;
        let titles = TitleSet::from_tagged(&meta.titles);

        let mut series = Series {
            title_original: titles
                .require(TitleKind::Original)
                .map_err(|e| e.at(&location))?
                .to_string(),
            title_translated: titles
                .require(TitleKind::Translated)
                .map_err(|e| e.at(&location))?
                .to_string(),
            catalog_id: resolve_catalog_id(&meta.kinopoisk_id, &meta.imdb_id, self.crosswalk),
            year: parse_number("year", &meta.year).map_err(|e| e.at(&location))?,
            restriction: meta.restriction.trim().to_string(),
            studio: resolve_studio(&meta.credits),
            seasons: Vec::with_capacity(raw.seasons.len()),
        };

        for (season_index, raw_season) in raw.seasons.iter().enumerate() {
            let location = location.season(season_index + 1);
            let mut season = Season {
                number: parse_number("season number", &raw_season.number)
                    .map_err(|e| e.at(&location))?,
                year: parse_number("season year", &raw_season.meta.year)
                    .map_err(|e| e.at(&location))?,
                episodes: Vec::with_capacity(raw_season.videos.len()),
            };

            for (episode_index, video) in raw_season.videos.iter().enumerate() {
                let location = location.episode(episode_index + 1);
                let episode = project_episode(video).map_err(|e| e.at(&location))?;

                let record = FileRecord::for_episode(&series, &season, &episode);
                records
                    .emit(&record)
                    .map_err(|e| FieldError::from(e).at(&location))?;
                season.episodes.push(episode);
            }

            log::debug!(
                "{}: season {} with {} episodes",
                location,
                season.number,
                season.episodes.len()
            );
            series.seasons.push(season);
        }

        Ok(series)
    }
}

fn project_episode(video: &RawVideo) -> Result<Episode, FieldError> {
    let number = parse_number("episode number", &video.number)?;
    let titles = TitleSet::from_tagged(&video.meta.titles);

    let file = file_name_of(&video.src);
    if file.is_empty() {
        log::warn!("Episode {number} has no media file (src=\"{}\")", video.src);
    }

    Ok(Episode {
        number,
        file,
        title_original: titles.require(TitleKind::Original)?.to_string(),
        title_translated: titles.require(TitleKind::Translated)?.to_string(),
        available: video.meta.available_start.trim().to_string(),
    })
}
