use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tvcat_lib::{
    FileRecord, Projector, ReportSink, ReportStyle, RunError, Settings, project_document,
    read_records, run,
};

const SERIAL_X: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<video-data>
    <group guid="ser-x" type="serial">
        <meta-info>
            <title type="original">Serial X</title>
            <title type="translated">Сериал Х</title>
            <restriction>16+</restriction>
            <year>2020</year>
            <kinopoisk_id>12345</kinopoisk_id>
            <credits>
                <credit role="director">X</credit>
                <credit role="studio"> Acme </credit>
            </credits>
        </meta-info>
        <group number="1" type="season">
            <meta-info><year>2020</year></meta-info>
            <video number="1" src="/media/serial-x/e01.mkv">
                <meta-info>
                    <title type="original">Pilot</title>
                    <title type="translated">Пилот</title>
                    <available start="2020-01-01"/>
                </meta-info>
            </video>
            <video number="2" src="/media/serial-x/e02.mkv">
                <meta-info>
                    <title type="original">Second</title>
                    <title type="translated">Вторая</title>
                    <available start="2020-01-08"/>
                </meta-info>
            </video>
        </group>
    </group>
</video-data>
"#;

const SERIAL_X_REPORT: &str = "Сериал Х (Serial X) [12345 2020 16+ Acme]\n\
                               \ts01 2020\n\
                               \t\ts01e01\te01.mkv\t2020-01-01\tПилот (Pilot)\n\
                               \t\ts01e02\te02.mkv\t2020-01-08\tВторая (Second)\n";

fn series_xml(guid: &str, title: &str, year: &str, episodes: usize) -> String {
    let videos: String = (1..=episodes)
        .map(|n| {
            format!(
                r#"<video number="{n}" src="/m/{guid}/e{n:02}.mkv"><meta-info>
                    <title type="original">Ep {n}</title><title type="translated">Эп {n}</title>
                    <available start="2021-02-0{n}"/></meta-info></video>"#
            )
        })
        .collect();
    format!(
        r#"<group guid="{guid}"><meta-info>
            <title type="original">{title}</title><title type="translated">{title} RU</title>
            <year>{year}</year><restriction>18+</restriction>
        </meta-info>
        <group number="1"><meta-info><year>2021</year></meta-info>{videos}</group>
        </group>"#
    )
}

fn catalog(series: &[String]) -> String {
    format!("<?xml version=\"1.0\"?><video-data>{}</video-data>", series.concat())
}

fn settings_in(dir: &Path, xml: &str) -> Settings {
    let input = dir.join("amedia_tv_series.xml");
    fs::write(&input, xml).unwrap();
    Settings {
        input,
        output: dir.join("output.txt"),
        crosswalk: dir.join("imdbToKP.json"),
        records: dir.join("files.json"),
        mirror_stdout: false,
        ..Default::default()
    }
}

#[test]
fn end_to_end_serial_x() {
    let tmp = TempDir::new().unwrap();
    let settings = settings_in(tmp.path(), SERIAL_X);

    let summary = run(&settings).unwrap();
    assert_eq!(summary.series, 1);
    assert_eq!(summary.seasons, 1);
    assert_eq!(summary.episodes, 2);
    assert_eq!(summary.records, 2);

    assert_eq!(fs::read_to_string(&settings.output).unwrap(), SERIAL_X_REPORT);

    let records = read_records(&settings.records).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].file, "e01.mkv");
    assert_eq!(records[0].season, 1);
    assert_eq!(records[0].number, 1);
    assert_eq!(records[1].file, "e02.mkv");
    assert_eq!(records[1].number, 2);
    assert!(records.iter().all(|r| r.title_translated == "Сериал Х"));
    assert!(records.iter().all(|r| r.catalog_id == "12345"));
}

#[test]
fn report_is_replaced_but_records_accumulate() {
    let tmp = TempDir::new().unwrap();
    let settings = settings_in(tmp.path(), SERIAL_X);

    run(&settings).unwrap();
    run(&settings).unwrap();

    assert_eq!(fs::read_to_string(&settings.output).unwrap(), SERIAL_X_REPORT);
    assert_eq!(read_records(&settings.records).unwrap().len(), 4);
}

#[test]
fn counts_are_preserved() {
    let tmp = TempDir::new().unwrap();
    let xml = catalog(&[
        series_xml("a", "Alpha", "2001", 3),
        series_xml("b", "Beta", "2002", 1),
        series_xml("c", "Gamma", "2003", 0),
    ]);
    let settings = settings_in(tmp.path(), &xml);

    let summary = run(&settings).unwrap();
    assert_eq!(summary.series, 3);
    assert_eq!(summary.seasons, 3);
    assert_eq!(summary.episodes, 4);

    let report = fs::read_to_string(&settings.output).unwrap();
    let headers: Vec<_> = report.lines().filter(|l| !l.starts_with('\t')).collect();
    assert_eq!(
        headers,
        vec![
            "Alpha RU (Alpha) [ 2001 18+ ]",
            "Beta RU (Beta) [ 2002 18+ ]",
            "Gamma RU (Gamma) [ 2003 18+ ]",
        ]
    );
    assert_eq!(read_records(&settings.records).unwrap().len(), 4);
}

#[test]
fn malformed_year_stops_at_that_series() {
    let tmp = TempDir::new().unwrap();
    let xml = catalog(&[
        series_xml("a", "Alpha", "2001", 2),
        series_xml("b", "Beta", "N/A", 2),
        series_xml("c", "Gamma", "2003", 2),
    ]);
    let settings = settings_in(tmp.path(), &xml);

    let err = run(&settings).unwrap_err();
    assert!(matches!(err, RunError::Project(_)));
    assert!(err.to_string().contains("series #2 [b]"));
    assert!(err.to_string().contains("N/A"));

    let report = fs::read_to_string(&settings.output).unwrap();
    assert!(report.starts_with("Alpha RU (Alpha)"));
    assert!(!report.contains("Beta"));
    assert!(!report.contains("Gamma"));

    let records = read_records(&settings.records).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.title_original == "Alpha"));
}

#[test]
fn brief_style_without_records() {
    let tmp = TempDir::new().unwrap();
    let mut settings = settings_in(tmp.path(), SERIAL_X);
    settings.style = ReportStyle::Brief;
    settings.emit_records = false;

    let summary = run(&settings).unwrap();
    assert_eq!(summary.episodes, 2);
    assert_eq!(summary.records, 0);
    assert!(!settings.records.exists());

    assert_eq!(
        fs::read_to_string(&settings.output).unwrap(),
        "Сериал Х (Serial X) [2020 16+]\n\
         \ts01 2020\n\
         \t\ts01e01\te01.mkv\t2020-01-01\n\
         \t\ts01e02\te02.mkv\t2020-01-08\n"
    );
}

#[test]
fn crosswalk_fills_empty_ids_only_through_empty_key() {
    let tmp = TempDir::new().unwrap();
    let xml = SERIAL_X.replace("<kinopoisk_id>12345</kinopoisk_id>", "");
    let settings = settings_in(tmp.path(), &xml);
    fs::write(&settings.crosswalk, r#"{"": "999", "tt1": "111"}"#).unwrap();

    run(&settings).unwrap();
    let records = read_records(&settings.records).unwrap();
    assert!(records.iter().all(|r| r.catalog_id == "999"));

    let mut disabled = settings.clone();
    disabled.resolve_crosswalk = false;
    run(&disabled).unwrap();
    let report = fs::read_to_string(&disabled.output).unwrap();
    assert!(report.starts_with("Сериал Х (Serial X) [ 2020 16+ Acme]"));
}

#[test]
fn unparsable_crosswalk_aborts_before_output() {
    let tmp = TempDir::new().unwrap();
    let settings = settings_in(tmp.path(), SERIAL_X);
    fs::write(&settings.crosswalk, "not json").unwrap();
    fs::write(&settings.output, "previous run\n").unwrap();

    let err = run(&settings).unwrap_err();
    assert!(matches!(err, RunError::Crosswalk(_)));
    assert_eq!(fs::read_to_string(&settings.output).unwrap(), "previous run\n");
    assert!(!settings.records.exists());
}

#[test]
fn missing_input_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let mut settings = settings_in(tmp.path(), SERIAL_X);
    settings.input = tmp.path().join("absent.xml");

    let err = run(&settings).unwrap_err();
    assert!(matches!(err, RunError::Catalog(_)));
}

#[test]
fn malformed_xml_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let settings = settings_in(tmp.path(), "<video-data><group></video-data>");

    let err = run(&settings).unwrap_err();
    assert!(matches!(err, RunError::Catalog(_)));
    assert!(!settings.output.exists());
}

#[test]
fn mirrored_report_matches_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("output.txt");
    let doc = tvcat_xml::parse_catalog(SERIAL_X.as_bytes()).unwrap();

    let mut report = ReportSink::with_mirror(&output, Some(Vec::new())).unwrap();
    let mut records: Vec<FileRecord> = Vec::new();
    let summary = project_document(
        &doc,
        &Projector::without_crosswalk(),
        ReportStyle::Detailed,
        &mut records,
        &mut report,
    )
    .unwrap();

    assert_eq!(summary.episodes, 2);
    assert_eq!(records.len(), 2);
    assert_eq!(fs::read_to_string(&output).unwrap(), SERIAL_X_REPORT);
    assert_eq!(report.mirror().unwrap().as_slice(), SERIAL_X_REPORT.as_bytes());
}

#[test]
fn padded_number_attributes_render_normally() {
    let tmp = TempDir::new().unwrap();
    let xml = SERIAL_X
        .replace(r#"<group number="1" type="season">"#, r#"<group number=" 1" type="season">"#)
        .replace(r#"<video number="2" "#, r#"<video number="2 " "#);
    let settings = settings_in(tmp.path(), &xml);

    run(&settings).unwrap();
    assert_eq!(fs::read_to_string(&settings.output).unwrap(), SERIAL_X_REPORT);
}
