//! Results writer: `<results>` wrapping one `<result name="...">` per record.
//!
//! Output is indented, UTF-8, and carries no XML declaration:
//!
//! ```xml
//! <results>
//!     <result name="avg-pop">4030418.67</result>
//! </results>
//! ```

use std::fs;
use std::path::Path;

use cityagg_core::operation::ResultRecord;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Error, Result};
use crate::names;

/// Renders result records into an indented XML document.
#[derive(Debug, Clone, Copy)]
pub struct ResultsWriter {
    indent: usize,
}

impl Default for ResultsWriter {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

impl ResultsWriter {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    /// Render the whole document in memory, in record order.
    pub fn render(&self, records: &[ResultRecord]) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.indent);

        if records.is_empty() {
            writer
                .write_event(Event::Empty(BytesStart::new(names::RESULTS)))
                .map_err(write_error)?;
        } else {
            writer
                .write_event(Event::Start(BytesStart::new(names::RESULTS)))
                .map_err(write_error)?;
            for record in records {
                let start = BytesStart::new(names::RESULT)
                    .with_attributes([(names::NAME, record.name.as_str())]);
                writer.write_event(Event::Start(start)).map_err(write_error)?;
                writer
                    .write_event(Event::Text(BytesText::new(&record.value)))
                    .map_err(write_error)?;
                writer
                    .write_event(Event::End(BytesEnd::new(names::RESULT)))
                    .map_err(write_error)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(names::RESULTS)))
                .map_err(write_error)?;
        }

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// Render with the default indentation.
pub fn render_results(records: &[ResultRecord]) -> Result<Vec<u8>> {
    ResultsWriter::default().render(records)
}

/// Write a rendered document to `path` in a single call.
pub fn write_output(path: &Path, bytes: &[u8], create_parent_dirs: bool) -> Result<()> {
    if create_parent_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    fs::write(path, bytes).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote results");
    Ok(())
}

fn write_error(err: impl std::fmt::Display) -> Error {
    Error::Document(format!("cannot serialize results: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(records: &[ResultRecord]) -> String {
        String::from_utf8(render_results(records).unwrap()).unwrap()
    }

    #[test]
    fn renders_indented_results_without_declaration() {
        let out = render(&[
            ResultRecord::new("first", "4030418.67"),
            ResultRecord::new("second", "5.00"),
        ]);
        assert!(!out.starts_with("<?xml"));
        assert_eq!(
            out,
            "<results>\n    <result name=\"first\">4030418.67</result>\n    <result name=\"second\">5.00</result>\n</results>\n"
        );
    }

    #[test]
    fn escapes_names() {
        let out = render(&[ResultRecord::new("a<b & \"c\"", "1.00")]);
        assert!(out.contains("a&lt;b &amp; &quot;c&quot;"));
    }

    #[test]
    fn empty_record_list_renders_empty_root() {
        assert_eq!(render(&[]), "<results/>\n");
    }

    #[test]
    fn custom_indent() {
        let bytes = ResultsWriter::new(2)
            .render(&[ResultRecord::new("x", "1.00")])
            .unwrap();
        let out = String::from_utf8(bytes).unwrap();
        assert!(out.contains("\n  <result name=\"x\">1.00</result>\n"));
    }

    #[test]
    fn write_output_to_missing_directory_fails_without_create() {
        let mut path = std::env::temp_dir();
        path.push("cityagg-writer-tests-missing");
        let _ = fs::remove_dir_all(&path);
        path.push("nested/results.xml");
        assert!(write_output(&path, b"<results/>\n", false).is_err());
        assert!(write_output(&path, b"<results/>\n", true).is_ok());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<results/>\n");
    }
}
