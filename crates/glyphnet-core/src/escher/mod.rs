//! Escher map wire records.
//!
//! An Escher map is a 2-element JSON sequence `[metadata, body]`. Key order
//! inside the node/reaction maps is preserved end to end (`IndexMap` +
//! `serde_json/preserve_order`).

pub mod export;
pub mod import;

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// A complete Escher map: `[metadata, body]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EscherMap(pub MapMetadata, pub MapBody);

impl EscherMap {
    pub fn metadata(&self) -> &MapMetadata {
        &self.0
    }

    pub fn body(&self) -> &MapBody {
        &self.1
    }

    /// Parses a map from JSON text. The body is located by searching the
    /// top-level sequence for the element that carries `canvas`; the first
    /// other object is taken as metadata.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(Error::MalformedPayload);
        };
        let mut metadata: Option<MapMetadata> = None;
        let mut body: Option<MapBody> = None;
        for item in items {
            let is_body = item
                .as_object()
                .is_some_and(|obj| obj.contains_key("canvas"));
            if is_body && body.is_none() {
                body = Some(serde_json::from_value(item)?);
            } else if metadata.is_none() && item.is_object() {
                metadata = Some(serde_json::from_value(item)?);
            }
        }
        let Some(body) = body else {
            return Err(Error::MalformedPayload);
        };
        Ok(Self(metadata.unwrap_or_default(), body))
    }

    pub fn read_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Serializes with a one-space indent, the format the reference writer
    /// produces.
    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf).expect("serializer emits UTF-8"))
    }

    /// Writes the map to `path`, appending `.json` when the name does not
    /// already end in it.
    pub fn write_json_file(&self, path: &str) -> Result<()> {
        std::fs::write(valid_output_name(path), self.to_json_string()?)?;
        Ok(())
    }
}

/// Appends `.json` unless the final extension token already is `json`.
pub fn valid_output_name(name: &str) -> String {
    match name.rsplit('.').next() {
        Some("json") => name.to_string(),
        _ => format!("{name}.json"),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapMetadata {
    pub map_name: String,
    pub map_id: String,
    pub map_description: String,
    pub homepage: String,
}

impl Default for MapMetadata {
    fn default() -> Self {
        Self {
            map_name: "escher_graph".to_string(),
            map_id: String::new(),
            map_description: String::new(),
            homepage: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapBody {
    pub canvas: Canvas,
    pub nodes: IndexMap<String, EscherNode>,
    pub reactions: IndexMap<String, EscherReaction>,
    pub text_labels: Vec<Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EscherNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bigg_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_is_primary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<EscherNodeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_y: Option<f64>,
    /// Explicit node size. Read on import, never written on export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EscherNodeType {
    #[default]
    Metabolite,
    Midmarker,
    Multimarker,
    Other(String),
}

impl From<String> for EscherNodeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "metabolite" => Self::Metabolite,
            "midmarker" => Self::Midmarker,
            "multimarker" => Self::Multimarker,
            _ => Self::Other(value),
        }
    }
}

impl From<EscherNodeType> for String {
    fn from(value: EscherNodeType) -> Self {
        match value {
            EscherNodeType::Metabolite => "metabolite".to_string(),
            EscherNodeType::Midmarker => "midmarker".to_string(),
            EscherNodeType::Multimarker => "multimarker".to_string(),
            EscherNodeType::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EscherReaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bigg_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub reversibility: bool,
    pub metabolites: Vec<EscherMetabolite>,
    pub genes: Vec<EscherGene>,
    pub segments: IndexMap<String, EscherSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_y: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EscherMetabolite {
    pub bigg_id: String,
    /// Sign convention only: -1 consumed, +1 produced. The canonical side
    /// carries no stoichiometry.
    pub coefficient: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EscherGene {
    pub bigg_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EscherSegment {
    pub from_node_id: String,
    pub to_node_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b1: Option<EscherPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b2: Option<EscherPoint>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EscherPoint {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_output_name_appends_json_once() {
        assert_eq!(valid_output_name("m"), "m.json");
        assert_eq!(valid_output_name("m.json"), "m.json");
        assert_eq!(valid_output_name("m.escher"), "m.escher.json");
        assert_eq!(valid_output_name("dir.v2/map"), "dir.v2/map.json");
    }

    #[test]
    fn map_serializes_as_a_two_element_sequence() {
        let map = EscherMap::default();
        let text = map.to_json_string().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["map_name"], "escher_graph");
        assert!(items[1].get("canvas").is_some());
        assert!(items[1].get("text_labels").is_some());
    }

    #[test]
    fn one_space_indent_matches_the_reference_writer() {
        let text = EscherMap::default().to_json_string().unwrap();
        assert!(text.starts_with("[\n {\n  \"map_name\""), "got: {text:?}");
    }

    #[test]
    fn body_is_located_by_its_canvas_key_regardless_of_order() {
        let text = r#"[
            {"canvas": {"x": 1.0, "y": 2.0, "width": 10.0, "height": 20.0},
             "nodes": {}, "reactions": {}, "text_labels": []},
            {"map_name": "m", "map_id": "", "map_description": "", "homepage": ""}
        ]"#;
        let map = EscherMap::from_json_str(text).unwrap();
        assert_eq!(map.metadata().map_name, "m");
        assert_eq!(map.body().canvas.x, 1.0);
    }

    #[test]
    fn segments_accept_null_base_points() {
        let seg: EscherSegment =
            serde_json::from_str(r#"{"from_node_id":"a","to_node_id":"b","b1":null,"b2":{"x":1.0,"y":2.0}}"#)
                .unwrap();
        assert!(seg.b1.is_none());
        assert_eq!(seg.b2, Some(EscherPoint { x: 1.0, y: 2.0 }));
    }

    #[test]
    fn non_array_payload_is_rejected() {
        assert!(matches!(
            EscherMap::from_json_str("{}"),
            Err(Error::MalformedPayload)
        ));
    }
}
