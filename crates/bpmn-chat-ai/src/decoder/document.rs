//! The BPMN document type and its fallback.

use std::fmt;

use super::DecodeError;

/// Declaration prepended to documents that arrive without one.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Opening of the root element every accepted document must contain.
pub const DEFINITIONS_TAG: &str = "<bpmn:definitions";

/// Minimal valid diagram: one start event, no tasks.
pub const PLACEHOLDER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bpmn:definitions xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                  xmlns:bpmn="http://www.omg.org/spec/BPMN/20100524/MODEL"
                  xmlns:bpmndi="http://www.omg.org/spec/BPMN/20100524/DI"
                  xmlns:dc="http://www.omg.org/spec/DD/20100524/DC"
                  xmlns:di="http://www.omg.org/spec/DD/20100524/DI"
                  targetNamespace="http://bpmn.io/schema/bpmn"
                  id="Definitions_1">
  <bpmn:process id="Process_1" isExecutable="false">
    <bpmn:startEvent id="StartEvent_1"/>
  </bpmn:process>
  <bpmndi:BPMNDiagram id="BPMNDiagram_1">
    <bpmndi:BPMNPlane id="BPMNPlane_1" bpmnElement="Process_1">
      <bpmndi:BPMNShape id="_BPMNShape_StartEvent_2" bpmnElement="StartEvent_1">
        <dc:Bounds x="179" y="159" width="36" height="36" />
      </bpmndi:BPMNShape>
    </bpmndi:BPMNPlane>
  </bpmndi:BPMNDiagram>
</bpmn:definitions>
"#;

/// BPMN 2.0 XML text. Never empty; always starts with an XML declaration.
///
/// Only the textual checks below are applied. Whether the XML is actually
/// renderable is up to the diagram viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramDocument(String);

impl DiagramDocument {
    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_XML.to_string())
    }

    /// Normalize a candidate: add a declaration if it lacks one, then
    /// require the `<bpmn:definitions` root.
    pub fn from_candidate(candidate: &str) -> Result<Self, DecodeError> {
        let text = if candidate.starts_with("<?xml") {
            candidate.to_string()
        } else {
            format!("{XML_DECLARATION}\n{candidate}")
        };

        if !text.contains(DEFINITIONS_TAG) {
            return Err(DecodeError::MissingDefinitions);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_XML
    }
}

impl Default for DiagramDocument {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl AsRef<str> for DiagramDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiagramDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_self_consistent() {
        let doc = DiagramDocument::placeholder();
        assert!(doc.as_str().starts_with(XML_DECLARATION));
        assert!(doc.as_str().contains(DEFINITIONS_TAG));
        assert!(doc.as_str().contains(r#"<bpmn:startEvent id="StartEvent_1"/>"#));
        assert!(!doc.as_str().contains("bpmn:task"));
        assert!(doc.is_placeholder());
        assert_eq!(DiagramDocument::default(), doc);
    }

    #[test]
    fn candidate_with_declaration_is_kept_verbatim() {
        let xml = "<?xml version=\"1.0\"?>\n<bpmn:definitions id=\"D\"/>";
        let doc = DiagramDocument::from_candidate(xml).unwrap();
        assert_eq!(doc.as_str(), xml);
        assert!(!doc.is_placeholder());
    }

    #[test]
    fn missing_declaration_is_prepended() {
        let doc = DiagramDocument::from_candidate("<bpmn:definitions id=\"D\"/>").unwrap();
        assert_eq!(
            doc.into_string(),
            format!("{XML_DECLARATION}\n<bpmn:definitions id=\"D\"/>")
        );
    }

    #[test]
    fn missing_root_is_rejected() {
        assert!(matches!(
            DiagramDocument::from_candidate("<definitions/>"),
            Err(DecodeError::MissingDefinitions)
        ));
        assert!(DiagramDocument::from_candidate("").is_err());
    }
}
