use serde::{Deserialize, Serialize};

use crate::model::{Episode, Season, Series};

/// One line of the record store: a media file tied to its series and position.
///
/// Field names match the `files.json` stores already in circulation so new
/// runs can keep appending to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "TitleOriginal")]
    pub title_original: String,
    #[serde(rename = "TitleTranslated")]
    pub title_translated: String,
    #[serde(rename = "KinopoiskID")]
    pub catalog_id: String,
    #[serde(rename = "Season")]
    pub season: i32,
    #[serde(rename = "Number")]
    pub number: i32,
}

impl FileRecord {
    /// Build the record for `episode`. Only the series' identity is read from
    /// `series`, so it may still be missing its seasons.
    pub fn for_episode(series: &Series, season: &Season, episode: &Episode) -> Self {
        Self {
            file: episode.file.clone(),
            title_original: series.title_original.clone(),
            title_translated: series.title_translated.clone(),
            catalog_id: series.catalog_id.clone(),
            season: season.number,
            number: episode.number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_store_field_names() {
        let record = FileRecord {
            file: "e01.mkv".into(),
            title_original: "Serial X".into(),
            title_translated: "Сериал Х".into(),
            catalog_id: "42".into(),
            season: 1,
            number: 2,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"File":"e01.mkv","TitleOriginal":"Serial X","TitleTranslated":"Сериал Х","KinopoiskID":"42","Season":1,"Number":2}"#
        );
    }

    #[test]
    fn for_episode_copies_identity_and_position() {
        let series = Series {
            title_original: "Serial X".into(),
            title_translated: "Сериал Х".into(),
            catalog_id: "42".into(),
            year: 2020,
            ..Default::default()
        };
        let season = Season {
            number: 3,
            year: 2022,
            episodes: vec![],
        };
        let episode = Episode {
            number: 7,
            file: "e07.mkv".into(),
            ..Default::default()
        };

        let record = FileRecord::for_episode(&series, &season, &episode);
        assert_eq!(record.file, "e07.mkv");
        assert_eq!(record.catalog_id, "42");
        assert_eq!(record.season, 3);
        assert_eq!(record.number, 7);
    }
}
