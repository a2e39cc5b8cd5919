//! Operation reader: one `Operation` per `<operation>` element.
//!
//! ```xml
//! <operations>
//!   <operation name="avg-pop" type="aggregate" func="average" attrib="population" filter=".*"/>
//! </operations>
//! ```

use std::path::Path;

use cityagg_core::operation::Operation;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{read_source, required_attr, xml_error, DocumentGuard};
use crate::error::{Error, Result};
use crate::names;

/// Read and parse an operation document from disk.
pub fn read_operations(path: &Path) -> Result<Vec<Operation>> {
    let xml = read_source(path)?;
    let operations = parse_operations(&xml)?;
    tracing::debug!(path = %path.display(), count = operations.len(), "loaded operations");
    Ok(operations)
}

/// Parse an operation document held in memory.
pub fn parse_operations(xml: &str) -> Result<Vec<Operation>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut guard = DocumentGuard::default();
    let mut operations = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| xml_error(reader.buffer_position() as u64, e))?;
        match event {
            Event::Start(e) => {
                guard.enter()?;
                if e.name().as_ref() == names::OPERATION.as_bytes() {
                    operations.push(to_operation(&e, operations.len())?);
                }
            }
            Event::Empty(e) => {
                guard.empty()?;
                if e.name().as_ref() == names::OPERATION.as_bytes() {
                    operations.push(to_operation(&e, operations.len())?);
                }
            }
            Event::End(_) => guard.leave(),
            Event::Text(t) => guard.text(&t)?,
            Event::CData(data) => guard.text(&data)?,
            Event::Eof => break,
            _ => {}
        }
    }

    guard.finish()?;
    Ok(operations)
}

fn to_operation(e: &BytesStart<'_>, index: usize) -> Result<Operation> {
    let attr = |key: &str| {
        required_attr(e, key).map_err(|reason| Error::Record {
            element: names::OPERATION,
            index,
            reason,
        })
    };
    Ok(Operation::new(
        attr(names::NAME)?,
        attr(names::TYPE)?,
        attr(names::FUNCTION)?,
        attr(names::ATTRIBUTE)?,
        attr(names::FILTER)?,
    ))
}
