//! XML readers producing typed records in document order.
//!
//! Both readers walk the document with a pull parser and pick out their
//! element by name at any depth, like a `getElementsByTagName` scan.

pub mod entities;
pub mod operations;

use std::fs;
use std::path::Path;

use quick_xml::events::BytesStart;

use crate::error::{Error, Result};

/// Read a whole input document. The file is closed before this returns.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Tracks nesting so a document has exactly one root element, no text
/// outside it, and no unclosed elements, even when the pull parser reaches
/// EOF quietly.
#[derive(Debug, Default)]
pub(crate) struct DocumentGuard {
    depth: usize,
    saw_root: bool,
}

impl DocumentGuard {
    pub(crate) fn enter(&mut self) -> Result<()> {
        self.check_single_root()?;
        self.depth += 1;
        self.saw_root = true;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Self-closing element: counts as content, no nesting change.
    pub(crate) fn empty(&mut self) -> Result<()> {
        self.check_single_root()?;
        self.saw_root = true;
        Ok(())
    }

    /// Character data is only allowed inside the root element.
    pub(crate) fn text(&self, raw: &[u8]) -> Result<()> {
        if self.depth == 0 && !raw.iter().all(u8::is_ascii_whitespace) {
            let place = if self.saw_root { "after" } else { "before" };
            return Err(Error::Document(format!(
                "text content {} the root element",
                place
            )));
        }
        Ok(())
    }

    // Back at depth zero after a root means the root has already closed.
    fn check_single_root(&self) -> Result<()> {
        if self.depth == 0 && self.saw_root {
            return Err(Error::Document(
                "document has more than one root element".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn finish(&self) -> Result<()> {
        if !self.saw_root {
            return Err(Error::Document("document has no root element".into()));
        }
        if self.depth != 0 {
            return Err(Error::Document(format!(
                "unexpected end of document with {} unclosed element(s)",
                self.depth
            )));
        }
        Ok(())
    }
}

pub(crate) fn xml_error(position: u64, err: impl std::fmt::Display) -> Error {
    Error::Xml {
        position,
        reason: err.to_string(),
    }
}

/// Fetch and unescape a required attribute; values are otherwise verbatim.
pub(crate) fn required_attr(
    e: &BytesStart<'_>,
    key: &str,
) -> std::result::Result<String, String> {
    match e.try_get_attribute(key) {
        Ok(Some(attr)) => attr
            .unescape_value()
            .map(|v| v.into_owned())
            .map_err(|err| format!("attribute '{}': {}", key, err)),
        Ok(None) => Err(format!("missing attribute '{}'", key)),
        Err(err) => Err(format!("attribute '{}': {}", key, err)),
    }
}
