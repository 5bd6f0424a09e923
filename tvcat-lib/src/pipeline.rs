//! The whole run: crosswalk, catalog, then series by series projection,
//! record emission and report output. The first error aborts the run;
//! whatever was written before it stays on disk.

use std::io::Write;

use tvcat_core::ReportStyle;
use tvcat_xml::CatalogDocument;

use crate::crosswalk::Crosswalk;
use crate::error::RunError;
use crate::projector::Projector;
use crate::records::{JsonLinesStore, NullRecordSink, RecordSink};
use crate::report::render_series;
use crate::settings::Settings;
use crate::sink::ReportSink;

/// Counts of what a run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub series: usize,
    pub seasons: usize,
    pub episodes: usize,
    /// Lines appended to the record store. Only [`run`] fills this in.
    pub records: usize,
}

/// Execute a full run with `settings`.
pub fn run(settings: &Settings) -> Result<RunSummary, RunError> {
    let crosswalk = if settings.resolve_crosswalk {
        Crosswalk::load(&settings.crosswalk)?
    } else {
        Crosswalk::default()
    };

    log::info!("Reading catalog {}", settings.input.display());
    let doc = tvcat_xml::parse_catalog_file(&settings.input)?;

    let mut report = ReportSink::create(&settings.output, settings.mirror_stdout)?;
    let projector = if settings.resolve_crosswalk {
        Projector::new(&crosswalk)
    } else {
        Projector::without_crosswalk()
    };

    let summary = if settings.emit_records {
        let mut store = JsonLinesStore::open(&settings.records)?;
        let summary = project_document(&doc, &projector, settings.style, &mut store, &mut report)?;
        RunSummary {
            records: store.written(),
            ..summary
        }
    } else {
        project_document(&doc, &projector, settings.style, &mut NullRecordSink, &mut report)?
    };

    log::info!(
        "Wrote {} series ({} seasons, {} episodes) to {}",
        summary.series,
        summary.seasons,
        summary.episodes,
        report.path().display()
    );
    if settings.emit_records {
        log::info!(
            "Appended {} records to {}",
            summary.records,
            settings.records.display()
        );
    }
    Ok(summary)
}

/// Project every series of `doc` in order, writing each rendered block to
/// `report` once the series is complete.
///
/// Records are flushed after each series, before its report block is written.
pub fn project_document<S, M>(
    doc: &CatalogDocument,
    projector: &Projector<'_>,
    style: ReportStyle,
    records: &mut S,
    report: &mut ReportSink<M>,
) -> Result<RunSummary, RunError>
where
    S: RecordSink + ?Sized,
    M: Write,
{
    let mut summary = RunSummary::default();

    for (index, raw) in doc.series.iter().enumerate() {
        let series = projector.project_series(raw, index + 1, records)?;
        records.flush()?;
        report.write_series(&render_series(&series, style))?;

        let episodes = series.episode_count();
        log::debug!(
            "{} ({}): {} seasons, {} episodes",
            series.title_original,
            series.year,
            series.seasons.len(),
            episodes
        );
        summary.series += 1;
        summary.seasons += series.seasons.len();
        summary.episodes += episodes;
    }

    Ok(summary)
}
