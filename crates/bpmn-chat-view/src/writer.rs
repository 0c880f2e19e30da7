//! Writing the rendered diagram to disk.

use std::path::{Path, PathBuf};

use bpmn_chat_ai::{Annotation, ConversationLog, DiagramDocument};
use tracing::debug;

use crate::page::{render_page, PageOptions};
use crate::ViewError;

/// Write `contents` next to `path` and rename it into place, so a browser
/// reloading the page never sees a half-written file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), ViewError> {
    let wrap = |source: std::io::Error| ViewError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, contents).map_err(wrap)?;
    std::fs::rename(&tmp, path).map_err(wrap)?;
    Ok(())
}

/// Writes the page (and optionally the raw XML) after every turn.
#[derive(Debug, Clone)]
pub struct DiagramWriter {
    html_path: PathBuf,
    xml_path: Option<PathBuf>,
    options: PageOptions,
}

impl DiagramWriter {
    pub fn new(html_path: impl Into<PathBuf>) -> Self {
        Self {
            html_path: html_path.into(),
            xml_path: None,
            options: PageOptions::default(),
        }
    }

    pub fn with_xml_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.xml_path = Some(path.into());
        self
    }

    pub fn with_options(mut self, options: PageOptions) -> Self {
        self.options = options;
        self
    }

    pub fn html_path(&self) -> &Path {
        &self.html_path
    }

    pub fn write(
        &self,
        document: &DiagramDocument,
        annotations: &[Annotation],
        transcript: &ConversationLog,
    ) -> Result<(), ViewError> {
        let page = render_page(document, annotations, transcript, &self.options)?;
        write_atomic(&self.html_path, &page)?;

        if let Some(ref xml_path) = self.xml_path {
            write_atomic(xml_path, document.as_str())?;
        }

        debug!(
            path = %self.html_path.display(),
            notes = annotations.len(),
            "diagram page written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_page_and_xml() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("out").join("diagram.html");
        let xml = dir.path().join("diagram.bpmn");
        let writer = DiagramWriter::new(&html).with_xml_path(&xml);

        let doc = DiagramDocument::placeholder();
        writer.write(&doc, &[], &ConversationLog::new()).unwrap();

        let page = std::fs::read_to_string(&html).unwrap();
        assert!(page.contains("bpmn-modeler"));
        assert_eq!(std::fs::read_to_string(&xml).unwrap(), doc.as_str());
        assert!(!dir.path().join("out").join("diagram.html.tmp").exists());
    }

    #[test]
    fn overwrite_replaces_previous_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        write_atomic(&path, "old").unwrap();
        write_atomic(&path, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn unwritable_path_reports_location() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let err = write_atomic(&blocker.join("page.html"), "data").unwrap_err();
        assert!(matches!(err, ViewError::Write { .. }));
        assert!(err.to_string().contains("page.html"));
    }
}
