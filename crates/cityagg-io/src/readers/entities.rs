//! Entity reader: one `Entity` per `<city>` element.
//!
//! ```xml
//! <cities>
//!   <city name="Springfield" population="30720">
//!     <area>12.5</area>
//!   </city>
//! </cities>
//! ```
//!
//! `name` and `population` come from attributes; `area` is the text of the
//! direct `<area>` child, located by tag name.

use std::path::Path;

use cityagg_core::entity::Entity;
use cityagg_core::error::Error as CoreError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{read_source, required_attr, xml_error, DocumentGuard};
use crate::error::{Error, Result};
use crate::names;

/// Read and parse an entity document from disk.
pub fn read_entities(path: &Path) -> Result<Vec<Entity>> {
    let xml = read_source(path)?;
    let entities = parse_entities(&xml)?;
    tracing::debug!(path = %path.display(), count = entities.len(), "loaded entities");
    Ok(entities)
}

/// A `<city>` whose attributes have been read but whose `<area>` is pending.
struct PendingCity {
    index: usize,
    depth: usize,
    name: String,
    population: u64,
    area: Option<String>,
    in_area: bool,
}

impl PendingCity {
    fn open(e: &BytesStart<'_>, index: usize, depth: usize) -> Result<Self> {
        let name = required_attr(e, names::NAME).map_err(|r| record_error(index, r))?;
        let raw = required_attr(e, names::POPULATION).map_err(|r| record_error(index, r))?;
        let population = parse_population(&raw).map_err(|r| record_error(index, r))?;
        Ok(Self {
            index,
            depth,
            name,
            population,
            area: None,
            in_area: false,
        })
    }

    fn close(self) -> Result<Entity> {
        let index = self.index;
        let text = self
            .area
            .ok_or_else(|| record_error(index, format!("missing <{}> child", names::AREA)))?;
        let area = text
            .trim()
            .parse::<f64>()
            .map_err(|e| record_error(index, format!("area '{}': {}", text, e)))?;
        Entity::new(self.name, self.population, area).map_err(|e| record_error(index, reason(e)))
    }
}

/// Parse an entity document held in memory.
pub fn parse_entities(xml: &str) -> Result<Vec<Entity>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut guard = DocumentGuard::default();
    let mut entities = Vec::new();
    let mut pending: Option<PendingCity> = None;
    let mut seen = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| xml_error(reader.buffer_position() as u64, e))?;
        match event {
            Event::Start(e) => {
                guard.enter()?;
                let tag = e.name();
                if tag.as_ref() == names::CITY.as_bytes() {
                    if let Some(open) = &pending {
                        return Err(record_error(
                            open.index,
                            format!("nested <{}> element", names::CITY),
                        ));
                    }
                    pending = Some(PendingCity::open(&e, seen, guard.depth())?);
                    seen += 1;
                } else if tag.as_ref() == names::AREA.as_bytes() {
                    if let Some(city) = pending.as_mut() {
                        if guard.depth() == city.depth + 1 && city.area.is_none() {
                            city.in_area = true;
                            city.area = Some(String::new());
                        }
                    }
                }
            }
            Event::Empty(e) => {
                guard.empty()?;
                let tag = e.name();
                if tag.as_ref() == names::CITY.as_bytes() {
                    // Attributes are still validated so the first problem is reported.
                    let city = PendingCity::open(&e, seen, guard.depth() + 1)?;
                    return Err(city.close().err().unwrap_or_else(|| {
                        Error::Document("self-closing <city> cannot carry an area".into())
                    }));
                }
                if tag.as_ref() == names::AREA.as_bytes() {
                    if let Some(city) = pending.as_mut() {
                        if guard.depth() == city.depth && city.area.is_none() {
                            city.area = Some(String::new());
                        }
                    }
                }
            }
            Event::Text(t) => {
                guard.text(&t)?;
                if let Some(city) = pending.as_mut().filter(|c| c.in_area) {
                    let text = t
                        .unescape()
                        .map_err(|e| xml_error(reader.buffer_position() as u64, e))?;
                    if let Some(area) = city.area.as_mut() {
                        area.push_str(&text);
                    }
                }
            }
            Event::CData(data) => {
                guard.text(&data)?;
                if let Some(city) = pending.as_mut().filter(|c| c.in_area) {
                    if let Some(area) = city.area.as_mut() {
                        area.push_str(&String::from_utf8_lossy(&data));
                    }
                }
            }
            Event::End(e) => {
                let tag = e.name();
                if tag.as_ref() == names::AREA.as_bytes() {
                    if let Some(city) = pending.as_mut() {
                        city.in_area = false;
                    }
                } else if tag.as_ref() == names::CITY.as_bytes() {
                    if let Some(city) = pending.take() {
                        entities.push(city.close()?);
                    }
                }
                guard.leave();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    guard.finish()?;
    Ok(entities)
}

/// Population is parsed verbatim: an optional sign and digits, no whitespace.
fn parse_population(raw: &str) -> std::result::Result<u64, String> {
    let value = raw
        .parse::<i64>()
        .map_err(|e| format!("population '{}': {}", raw, e))?;
    u64::try_from(value).map_err(|_| format!("population {} is negative", value))
}

fn record_error(index: usize, reason: impl Into<String>) -> Error {
    Error::Record {
        element: names::CITY,
        index,
        reason: reason.into(),
    }
}

fn reason(err: CoreError) -> String {
    match err {
        CoreError::MalformedInput(msg) => msg,
        other => other.to_string(),
    }
}
