use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::document::{
    CatalogDocument, Quote, RawAward, RawCredit, RawSeason, RawSeries, RawVideo, SeasonMeta,
    SeriesMeta, TaggedText, VideoMeta,
};
use crate::error::XmlError;

/// Parse a whole catalog document from a reader.
///
/// The encoding is taken from the BOM or the XML declaration; without either
/// the input is read as UTF-8.
pub fn parse_catalog<R: BufRead>(reader: R) -> Result<CatalogDocument, XmlError> {
    let mut cursor = Cursor::new(reader);
    let root = cursor.root()?;
    if root.name() != b"video-data" {
        return Err(XmlError::UnexpectedRoot(root.display_name()));
    }

    let mut doc = CatalogDocument::default();
    cursor.content(&root, |cursor, child| {
        match child.name() {
            b"title" => doc.title = cursor.text(&child)?,
            b"group" => doc.series.push(cursor.series(&child)?),
            _ => cursor.skip(&child)?,
        }
        Ok(())
    })?;

    log::debug!(
        "Parsed catalog: {} series, {} seasons, {} videos",
        doc.series.len(),
        doc.season_count(),
        doc.video_count()
    );
    Ok(doc)
}

/// Parse a catalog document from a file path.
pub fn parse_catalog_file(path: &Path) -> Result<CatalogDocument, XmlError> {
    let file = std::fs::File::open(path).map_err(|source| XmlError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(std::io::BufReader::new(file))
}

// ---------------------------------------------------------------------------
// Event cursor
// ---------------------------------------------------------------------------

/// An element whose start tag has just been read.
struct Element {
    start: BytesStart<'static>,
    /// `<tag/>`: no content and no end event follow.
    empty: bool,
}

impl Element {
    fn name(&self) -> &[u8] {
        self.start.local_name().into_inner()
    }

    fn display_name(&self) -> String {
        String::from_utf8_lossy(self.start.name().as_ref()).into_owned()
    }
}

struct Cursor<R> {
    xml: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> Cursor<R> {
    fn new(reader: R) -> Self {
        let mut xml = Reader::from_reader(reader);
        xml.config_mut().trim_text(true);
        Self {
            xml,
            buf: Vec::new(),
        }
    }

    fn next_event(&mut self) -> Result<Event<'static>, XmlError> {
        self.buf.clear();
        Ok(self.xml.read_event_into(&mut self.buf)?.into_owned())
    }

    /// Skip the prolog (declaration, doctype, comments) up to the root element.
    fn root(&mut self) -> Result<Element, XmlError> {
        loop {
            match self.next_event()? {
                Event::Start(start) => return Ok(Element { start, empty: false }),
                Event::Empty(start) => return Ok(Element { start, empty: true }),
                Event::Eof => return Err(XmlError::invalid("Document has no root element")),
                _ => {}
            }
        }
    }

    /// Attributes of `el`, decoded and unescaped, keyed by local name.
    fn attributes(&self, el: &Element) -> Result<HashMap<String, String>, XmlError> {
        let mut attrs = HashMap::new();
        for attr in el.start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.decode_and_unescape_value(self.xml.decoder())?;
            attrs.insert(key, value.into_owned());
        }
        Ok(attrs)
    }

    /// Walk the content of `el` up to its end tag, handing every child
    /// element to `on_child`, and return the element's own text.
    ///
    /// `on_child` must consume the child it receives, either by reading it
    /// or by calling [`Cursor::skip`].
    fn content<F>(&mut self, el: &Element, mut on_child: F) -> Result<String, XmlError>
    where
        F: FnMut(&mut Self, Element) -> Result<(), XmlError>,
    {
        let mut text = String::new();
        if el.empty {
            return Ok(text);
        }

        loop {
            match self.next_event()? {
                Event::Start(start) => on_child(self, Element { start, empty: false })?,
                Event::Empty(start) => on_child(self, Element { start, empty: true })?,
                Event::Text(t) => text.push_str(&t.unescape()?),
                Event::CData(c) => {
                    let raw = c.into_inner();
                    let decoded = self.xml.decoder().decode(&raw).map_err(|e| {
                        XmlError::invalid(format!(
                            "Undecodable CDATA in <{}>: {e}",
                            el.display_name()
                        ))
                    })?;
                    text.push_str(&decoded);
                }
                Event::End(_) => return Ok(text),
                Event::Eof => {
                    return Err(XmlError::invalid(format!(
                        "Unexpected end of document inside <{}>",
                        el.display_name()
                    )));
                }
                _ => {}
            }
        }
    }

    /// Text of `el`, ignoring any nested markup.
    fn text(&mut self, el: &Element) -> Result<String, XmlError> {
        self.content(el, |cursor, child| cursor.skip(&child))
    }

    fn skip(&mut self, el: &Element) -> Result<(), XmlError> {
        if !el.empty {
            self.buf.clear();
            self.xml.read_to_end_into(el.start.name(), &mut self.buf)?;
        }
        Ok(())
    }

    fn tagged(&mut self, el: &Element) -> Result<TaggedText, XmlError> {
        let mut attrs = self.attributes(el)?;
        Ok(TaggedText {
            kind: take(&mut attrs, "type"),
            text: self.text(el)?,
        })
    }

    // -- series level --

    fn series(&mut self, el: &Element) -> Result<RawSeries, XmlError> {
        let mut attrs = self.attributes(el)?;
        let mut series = RawSeries {
            guid: take(&mut attrs, "guid"),
            kind: take(&mut attrs, "type"),
            ..Default::default()
        };

        self.content(el, |cursor, child| {
            match child.name() {
                b"meta-info" => series.meta = cursor.series_meta(&child)?,
                b"group" => series.seasons.push(cursor.season(&child)?),
                _ => cursor.skip(&child)?,
            }
            Ok(())
        })?;
        Ok(series)
    }

    fn series_meta(&mut self, el: &Element) -> Result<SeriesMeta, XmlError> {
        let mut meta = SeriesMeta::default();
        self.content(el, |cursor, child| {
            match child.name() {
                b"title" => meta.titles.push(cursor.tagged(&child)?),
                b"description" => meta.description = cursor.tagged(&child)?,
                b"slogan" => meta.slogan = cursor.tagged(&child)?,
                b"restriction" => meta.restriction = cursor.text(&child)?,
                b"category" => meta.category = cursor.text(&child)?,
                b"year" => meta.year = cursor.text(&child)?,
                b"location" => meta.location = cursor.text(&child)?,
                b"available" => meta.available = cursor.text(&child)?,
                b"featured" => meta.featured = cursor.text(&child)?,
                b"priority" => meta.priority = cursor.text(&child)?,
                b"imdb_id" => meta.imdb_id = cursor.text(&child)?,
                b"kinopoisk_id" => meta.kinopoisk_id = cursor.text(&child)?,
                b"external_allowed" => meta.external_allowed = cursor.text(&child)?,
                b"credits" => meta.credits = cursor.credits(&child)?,
                b"quote" => {
                    let mut attrs = cursor.attributes(&child)?;
                    meta.quote = Quote {
                        author: take(&mut attrs, "author"),
                        text: cursor.text(&child)?,
                    };
                }
                b"studio_restrictions" => {
                    cursor.content(&child, |cursor, inner| {
                        if inner.name() == b"episodes_allowed" {
                            meta.episodes_allowed = cursor.text(&inner)?;
                        } else {
                            cursor.skip(&inner)?;
                        }
                        Ok(())
                    })?;
                }
                _ => cursor.skip(&child)?,
            }
            Ok(())
        })?;
        Ok(meta)
    }

    fn credits(&mut self, el: &Element) -> Result<Vec<RawCredit>, XmlError> {
        let mut credits = Vec::new();
        self.content(el, |cursor, child| {
            if child.name() == b"credit" {
                credits.push(cursor.credit(&child)?);
            } else {
                cursor.skip(&child)?;
            }
            Ok(())
        })?;
        Ok(credits)
    }

    /// A credit carries its own text next to optional `<award>` children.
    fn credit(&mut self, el: &Element) -> Result<RawCredit, XmlError> {
        let mut attrs = self.attributes(el)?;
        let role = take(&mut attrs, "role");
        let mut awards = Vec::new();

        let text = self.content(el, |cursor, child| {
            if child.name() == b"award" {
                let mut attrs = cursor.attributes(&child)?;
                awards.push(RawAward {
                    kind: take(&mut attrs, "type"),
                    year: take(&mut attrs, "year"),
                    text: cursor.text(&child)?,
                });
            } else {
                cursor.skip(&child)?;
            }
            Ok(())
        })?;

        Ok(RawCredit { role, text, awards })
    }

    // -- season level --

    fn season(&mut self, el: &Element) -> Result<RawSeason, XmlError> {
        let mut attrs = self.attributes(el)?;
        let mut season = RawSeason {
            number: take(&mut attrs, "number"),
            kind: take(&mut attrs, "type"),
            ..Default::default()
        };

        self.content(el, |cursor, child| {
            match child.name() {
                b"meta-info" => season.meta = cursor.season_meta(&child)?,
                b"video" => season.videos.push(cursor.video(&child)?),
                _ => cursor.skip(&child)?,
            }
            Ok(())
        })?;
        Ok(season)
    }

    fn season_meta(&mut self, el: &Element) -> Result<SeasonMeta, XmlError> {
        let mut meta = SeasonMeta::default();
        self.content(el, |cursor, child| {
            match child.name() {
                b"title" => meta.title = cursor.tagged(&child)?,
                b"description" => meta.description = cursor.tagged(&child)?,
                b"year" => meta.year = cursor.text(&child)?,
                b"available" => {
                    let mut attrs = cursor.attributes(&child)?;
                    meta.available_start = take(&mut attrs, "start");
                    cursor.skip(&child)?;
                }
                _ => cursor.skip(&child)?,
            }
            Ok(())
        })?;
        Ok(meta)
    }

    // -- episode level --

    fn video(&mut self, el: &Element) -> Result<RawVideo, XmlError> {
        let mut attrs = self.attributes(el)?;
        let mut video = RawVideo {
            src: take(&mut attrs, "src"),
            number: take(&mut attrs, "number"),
            guid: take(&mut attrs, "guid"),
            start: take(&mut attrs, "start"),
            end: take(&mut attrs, "end"),
            endtitles: take(&mut attrs, "endtitles"),
            episodesinopsys: take(&mut attrs, "episodesinopsys"),
            multilang: take(&mut attrs, "multilang"),
            ..Default::default()
        };

        self.content(el, |cursor, child| {
            match child.name() {
                b"meta-info" => video.meta = cursor.video_meta(&child)?,
                b"logo" => {
                    video.logo_src = take(&mut cursor.attributes(&child)?, "src");
                    cursor.skip(&child)?;
                }
                b"subtitles" => {
                    video.subtitles_src = take(&mut cursor.attributes(&child)?, "src");
                    cursor.skip(&child)?;
                }
                _ => cursor.skip(&child)?,
            }
            Ok(())
        })?;
        Ok(video)
    }

    fn video_meta(&mut self, el: &Element) -> Result<VideoMeta, XmlError> {
        let mut meta = VideoMeta::default();
        self.content(el, |cursor, child| {
            match child.name() {
                b"title" => meta.titles.push(cursor.tagged(&child)?),
                b"duration" => meta.duration = cursor.text(&child)?,
                b"featured" => meta.featured = cursor.text(&child)?,
                b"available" => {
                    let mut attrs = cursor.attributes(&child)?;
                    meta.available_start = take(&mut attrs, "start");
                    meta.available_end = take(&mut attrs, "end");
                    cursor.skip(&child)?;
                }
                _ => cursor.skip(&child)?,
            }
            Ok(())
        })?;
        Ok(meta)
    }
}

fn take(attrs: &mut HashMap<String, String>, key: &str) -> String {
    attrs.remove(key).unwrap_or_default()
}
