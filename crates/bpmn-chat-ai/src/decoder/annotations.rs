//! Overlay annotations ("sticky notes") attached to diagram elements.

use serde::Serialize;
use serde_json::Value;

use super::DecodeError;

/// Pixel offsets of an overlay relative to its element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayPosition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
}

impl Default for OverlayPosition {
    /// Bottom-right corner of the element.
    fn default() -> Self {
        Self {
            top: None,
            left: None,
            right: Some(0.0),
            bottom: Some(0.0),
        }
    }
}

impl OverlayPosition {
    /// Read the numeric offsets of a `position` object. `None` when the
    /// value is not an object or carries no usable offset.
    fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let offset = |key: &str| fields.get(key).and_then(Value::as_f64);
        let position = Self {
            top: offset("top"),
            left: offset("left"),
            right: offset("right"),
            bottom: offset("bottom"),
        };
        let any = [position.top, position.left, position.right, position.bottom]
            .iter()
            .any(Option::is_some);
        any.then_some(position)
    }
}

/// A comment pinned to one diagram element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Id of the BPMN element the note belongs to.
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_class: Option<String>,
    pub position: OverlayPosition,
}

impl Annotation {
    /// Build a note from one record. Records without a string id are
    /// skipped; optional fields of the wrong type fall back to defaults.
    fn from_record(record: &Value) -> Option<Self> {
        let id = record.get("id")?.as_str()?.trim();
        if id.is_empty() {
            return None;
        }

        let text = record.get("text").and_then(Value::as_str).unwrap_or_default();
        let marker_class = record
            .get("markerClass")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from);
        let position = record
            .get("position")
            .and_then(OverlayPosition::from_value)
            .unwrap_or_default();

        Some(Self {
            id: id.to_string(),
            text: text.to_string(),
            marker_class,
            position,
        })
    }
}

/// Parse an annotation array. Only a source that is not a JSON array is an
/// error; bad records inside the array are skipped one by one.
pub fn parse_annotations(source: &str) -> Result<Vec<Annotation>, DecodeError> {
    let records: Vec<Value> = serde_json::from_str(source)?;
    Ok(records.iter().filter_map(Annotation::from_record).collect())
}
