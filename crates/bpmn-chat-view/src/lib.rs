//! Diagram view for BPMN Chat.
//!
//! Renders the current document and its overlay annotations into a
//! standalone HTML page driven by the bpmn-js modeler, and writes it to
//! disk for a browser to pick up.

pub mod page;
pub mod sanitize;
pub mod writer;

pub use page::{render_page, PageOptions};
pub use writer::{write_atomic, DiagramWriter};

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("failed to serialize page payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to render page: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
