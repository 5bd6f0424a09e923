use std::fs;

use tempfile::TempDir;
use tvcat_xml::{XmlError, parse_catalog, parse_catalog_file};

/// "Сериал" in windows-1251.
const SERIAL_CP1251: &[u8] = &[0xD1, 0xE5, 0xF0, 0xE8, 0xE0, 0xEB];

fn cp1251_catalog() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(br#"<?xml version="1.0" encoding="windows-1251"?>"#);
    bytes.extend_from_slice(b"<video-data><group guid=\"g1\"><meta-info>");
    bytes.extend_from_slice(b"<title type=\"original\">Serial X</title>");
    bytes.extend_from_slice(b"<title type=\"translated\">");
    bytes.extend_from_slice(SERIAL_CP1251);
    bytes.extend_from_slice(b"</title>");
    bytes.extend_from_slice(b"<year>2020</year></meta-info>");
    bytes.extend_from_slice(b"<group number=\"1\"><video number=\"1\" src=\"/m/");
    bytes.extend_from_slice(SERIAL_CP1251);
    bytes.extend_from_slice(b".mkv\"/></group>");
    bytes.extend_from_slice(b"</group></video-data>");
    bytes
}

#[test]
fn declared_windows_1251_is_decoded() {
    let doc = parse_catalog(cp1251_catalog().as_slice()).unwrap();
    let meta = &doc.series[0].meta;
    assert_eq!(meta.titles[0].text, "Serial X");
    assert_eq!(meta.titles[1].text, "Сериал");
}

#[test]
fn declared_encoding_applies_to_attributes() {
    let doc = parse_catalog(cp1251_catalog().as_slice()).unwrap();
    let video = &doc.series[0].seasons[0].videos[0];
    assert_eq!(video.src, "/m/Сериал.mkv");
}

#[test]
fn utf8_bom_is_accepted() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(
        "<video-data><group><meta-info><year>1999</year></meta-info></group></video-data>"
            .as_bytes(),
    );
    let doc = parse_catalog(bytes.as_slice()).unwrap();
    assert_eq!(doc.series[0].meta.year, "1999");
}

#[test]
fn parse_from_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("amedia_tv_series.xml");
    fs::write(&path, cp1251_catalog()).unwrap();

    let doc = parse_catalog_file(&path).unwrap();
    assert_eq!(doc.series.len(), 1);
    assert_eq!(doc.series[0].guid, "g1");
}

#[test]
fn missing_file_names_the_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("missing.xml");

    let err = parse_catalog_file(&path).unwrap_err();
    assert!(matches!(err, XmlError::Open { .. }));
    assert!(err.to_string().contains("missing.xml"));
}
