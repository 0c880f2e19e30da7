//! Standalone HTML page generation.

use bpmn_chat_ai::{Annotation, ConversationLog, DiagramDocument};
use handlebars::Handlebars;
use serde::Serialize;

use crate::sanitize::{script_json, validate_css_class};
use crate::ViewError;

/// bpmn-js release the page loads from unpkg.
pub const BPMN_JS_VERSION: &str = "18.6.2";

/// Page-level settings.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "BPMN Chatbot".to_string(),
        }
    }
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{title}}</title>
  <link rel="stylesheet" href="https://unpkg.com/bpmn-js@{{version}}/dist/assets/bpmn-js.css">
  <link rel="stylesheet" href="https://unpkg.com/bpmn-js@{{version}}/dist/assets/diagram-js.css">
  <link rel="stylesheet" href="https://unpkg.com/bpmn-js@{{version}}/dist/assets/bpmn-font/css/bpmn.css">
  <script src="https://unpkg.com/bpmn-js@{{version}}/dist/bpmn-modeler.development.js"></script>
  <style>
    body { font-family: sans-serif; margin: 0; display: flex; height: 100vh; }
    #chat { width: 28%; overflow-y: auto; padding: 12px; border-right: 1px solid #eee; }
    #chat .user { font-weight: bold; margin-top: 12px; }
    #chat .reply { white-space: pre-wrap; color: #444; }
    #main { flex: 1; display: flex; flex-direction: column; }
    .bpmn-container { flex: 1; border: 1px solid #eee; border-radius: 8px; background-color: #f9f9f9; }
    .bpmn-error { color: red; padding: 10px; background-color: #ffe6e6; border-radius: 4px; margin: 10px 0; }
    .bpmn-buttons { padding: 10px; display: flex; gap: 10px; }
    .bpmn-button { padding: 8px 16px; background-color: #1976d2; color: white; border: none; border-radius: 4px; cursor: pointer; }
    .bpmn-button:hover { background-color: #1565c0; }
    .bpmn-note { background: #fff59d; border: 1px solid #f9a825; border-radius: 4px; padding: 4px 6px; font-size: 12px; max-width: 180px; }
    .needs-discussion:not(.djs-connection) .djs-visual > :nth-child(1) { stroke: #f9a825 !important; }
  </style>
</head>
<body>
  <div id="chat">
    <h2>{{title}}</h2>
{{#each turns}}
    <div class="user">{{user}}</div>
    <div class="reply">{{reply}}</div>
{{/each}}
  </div>
  <div id="main">
    <div class="bpmn-buttons">
      <button class="bpmn-button" id="download-xml">Download BPMN</button>
      <button class="bpmn-button" id="download-svg">Download SVG</button>
    </div>
    <div id="bpmn-canvas" class="bpmn-container"></div>
  </div>
  <script>
    const DIAGRAM_XML = {{{xml_json}}};
    const NOTES = {{{notes_json}}};

    const modeler = new BpmnJS({ container: '#bpmn-canvas' });

    function showError(err) {
      const container = document.getElementById('bpmn-canvas');
      let box = container.querySelector('.bpmn-error');
      if (!box) {
        box = document.createElement('div');
        box.className = 'bpmn-error';
        container.appendChild(box);
      }
      box.textContent = 'BPMN Rendering Error: ' + (err.message || err);
    }

    function addNotes() {
      const overlays = modeler.get('overlays');
      const canvas = modeler.get('canvas');
      const registry = modeler.get('elementRegistry');
      for (const note of NOTES) {
        if (!registry.get(note.id)) {
          console.warn('No element for note', note.id);
          continue;
        }
        const html = document.createElement('div');
        html.className = 'bpmn-note';
        html.textContent = note.text;
        overlays.add(note.id, { position: note.position, html: html });
        if (note.markerClass) {
          canvas.addMarker(note.id, note.markerClass);
        }
      }
    }

    function download(name, type, data) {
      const link = document.createElement('a');
      link.href = URL.createObjectURL(new Blob([data], { type: type }));
      link.download = name;
      link.click();
    }

    document.getElementById('download-xml').onclick = async () => {
      const { xml } = await modeler.saveXML({ format: true });
      download('diagram.bpmn', 'application/xml', xml);
    };
    document.getElementById('download-svg').onclick = async () => {
      const { svg } = await modeler.saveSVG();
      download('diagram.svg', 'image/svg+xml', svg);
    };

    modeler.importXML(DIAGRAM_XML)
      .then(() => {
        modeler.get('canvas').zoom('fit-viewport');
        addNotes();
      })
      .catch(showError);
  </script>
</body>
</html>
"#;

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    version: &'static str,
    turns: Vec<TurnView<'a>>,
    /// Pre-escaped JavaScript literals, inserted raw.
    xml_json: String,
    notes_json: String,
}

#[derive(Serialize)]
struct TurnView<'a> {
    user: &'a str,
    reply: &'a str,
}

/// Render the page for a document, its notes and the chat so far.
///
/// Notes whose marker class is not a plain CSS identifier keep their text
/// but lose the class.
pub fn render_page(
    document: &DiagramDocument,
    annotations: &[Annotation],
    transcript: &ConversationLog,
    options: &PageOptions,
) -> Result<String, ViewError> {
    let notes: Vec<Annotation> = annotations.iter().map(sanitize_note).collect();

    let context = PageContext {
        title: &options.title,
        version: BPMN_JS_VERSION,
        turns: transcript
            .records()
            .iter()
            .map(|record| TurnView {
                user: &record.user,
                reply: record.reply.as_deref().unwrap_or("…"),
            })
            .collect(),
        xml_json: script_json(document.as_str())?,
        notes_json: script_json(&notes)?,
    };

    Ok(Handlebars::new().render_template(TEMPLATE, &context)?)
}

fn sanitize_note(note: &Annotation) -> Annotation {
    let mut note = note.clone();
    if let Some(class) = note.marker_class.take() {
        match validate_css_class(&class) {
            Ok(()) => note.marker_class = Some(class.trim().to_string()),
            Err(e) => {
                tracing::warn!(id = %note.id, error = %e, "Marker class rejected by sanitizer")
            }
        }
    }
    note
}
