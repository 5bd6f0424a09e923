//! Text report rendering.
//!
//! ```text
//! Сериал Х (Serial X) [12345 2020 16+ Acme]
//! 	s01 2020
//! 		s01e01	e01.mkv	2020-01-01	Пилот (Pilot)
//! ```
//!
//! Blocks follow each other with no blank lines. Older `output.txt` files
//! had an empty line after every season; this layout drops it.

use tvcat_core::{Episode, ReportStyle, Season, Series};

/// Render one series block. Output depends only on `series` and `style`.
pub fn render_series(series: &Series, style: ReportStyle) -> String {
    let mut out = header(series, style);
    for season in &series.seasons {
        out.push_str(&format!("\ts{:02} {}\n", season.number, season.year));
        for episode in &season.episodes {
            out.push_str(&episode_line(season, episode, style));
        }
    }
    out
}

fn header(series: &Series, style: ReportStyle) -> String {
    match style {
        ReportStyle::Detailed => format!(
            "{} ({}) [{} {} {} {}]\n",
            series.title_translated,
            series.title_original,
            series.catalog_id,
            series.year,
            series.restriction,
            series.studio
        ),
        ReportStyle::Brief => format!(
            "{} ({}) [{} {}]\n",
            series.title_translated, series.title_original, series.year, series.restriction
        ),
    }
}

fn episode_line(season: &Season, episode: &Episode, style: ReportStyle) -> String {
    let line = format!(
        "\t\ts{:02}e{:02}\t{}\t{}",
        season.number, episode.number, episode.file, episode.available
    );
    match style {
        ReportStyle::Detailed => format!(
            "{line}\t{} ({})\n",
            episode.title_translated, episode.title_original
        ),
        ReportStyle::Brief => format!("{line}\n"),
    }
}
