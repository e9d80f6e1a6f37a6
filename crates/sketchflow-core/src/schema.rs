//! Schema validation with defaulting.
//!
//! The entry point is [`parse`]: it walks a raw `serde_json::Value`,
//! validates types and enum literals, applies defaults, and reports the
//! first violation as a schema error carrying the JSON path of the
//! offending location (`nodes[2].shape`). Unknown object keys are ignored.

use crate::color;
use crate::error::{Error, Result};
use crate::model::{
    ArrowDirection, DiagramDef, EdgeDef, EdgeStyle, FlowDiagramDef, FlowDirection, GroupDef,
    MessageDef, NodeDef, NodeShape, ParticipantDef, SequenceDiagramDef, Theme,
};
use serde_json::{Map, Value};

pub fn parse(raw: &Value) -> Result<DiagramDef> {
    let obj = as_object(raw, "")?;
    let ty = require_str(obj, "type", "")?;
    match ty {
        "flow" => Ok(DiagramDef::Flow(parse_flow(obj)?)),
        "sequence" => Ok(DiagramDef::Sequence(parse_sequence(obj)?)),
        other => Err(Error::schema(
            "type",
            format!("unknown diagram type `{other}` (expected `flow` or `sequence`)"),
        )),
    }
}

fn parse_flow(obj: &Map<String, Value>) -> Result<FlowDiagramDef> {
    let nodes_raw = require_array(obj, "nodes", "")?;
    let mut nodes = Vec::with_capacity(nodes_raw.len());
    for (i, raw) in nodes_raw.iter().enumerate() {
        nodes.push(parse_node(raw, &index_path("nodes", i))?);
    }

    let mut edges = Vec::new();
    for (i, raw) in optional_array(obj, "edges", "")?.iter().enumerate() {
        edges.push(parse_edge(raw, &index_path("edges", i))?);
    }

    let mut groups = Vec::new();
    for (i, raw) in optional_array(obj, "groups", "")?.iter().enumerate() {
        groups.push(parse_group(raw, &index_path("groups", i))?);
    }

    Ok(FlowDiagramDef {
        title: optional_str(obj, "title", "")?.map(str::to_string),
        nodes,
        edges,
        groups,
        style: parse_theme(obj, "")?,
        direction: parse_enum(obj, "direction", "", FlowDirection::parse)?.unwrap_or_default(),
    })
}

fn parse_node(raw: &Value, path: &str) -> Result<NodeDef> {
    let obj = as_object(raw, path)?;
    Ok(NodeDef {
        id: require_str(obj, "id", path)?.to_string(),
        label: require_str(obj, "label", path)?.to_string(),
        shape: parse_enum(obj, "shape", path, NodeShape::parse)?.unwrap_or_default(),
        color: optional_color(obj, "color", path)?,
        text_color: optional_color(obj, "textColor", path)?,
        width: optional_dimension(obj, "width", path)?,
        height: optional_dimension(obj, "height", path)?,
    })
}

fn parse_edge(raw: &Value, path: &str) -> Result<EdgeDef> {
    let obj = as_object(raw, path)?;
    Ok(EdgeDef {
        from: require_str(obj, "from", path)?.to_string(),
        to: require_str(obj, "to", path)?.to_string(),
        label: optional_str(obj, "label", path)?.map(str::to_string),
        style: parse_enum(obj, "style", path, EdgeStyle::parse)?.unwrap_or_default(),
        direction: parse_enum(obj, "direction", path, ArrowDirection::parse)?.unwrap_or_default(),
        color: optional_color(obj, "color", path)?,
    })
}

fn parse_group(raw: &Value, path: &str) -> Result<GroupDef> {
    let obj = as_object(raw, path)?;
    let contains_path = join(path, "contains");
    let mut contains = Vec::new();
    for (i, item) in require_array(obj, "contains", path)?.iter().enumerate() {
        let item_path = format!("{contains_path}[{i}]");
        let Some(id) = item.as_str() else {
            return Err(Error::schema(item_path, "expected a node id string"));
        };
        contains.push(id.to_string());
    }
    Ok(GroupDef {
        id: require_str(obj, "id", path)?.to_string(),
        label: optional_str(obj, "label", path)?.map(str::to_string),
        contains,
        color: optional_color(obj, "color", path)?,
    })
}

fn parse_sequence(obj: &Map<String, Value>) -> Result<SequenceDiagramDef> {
    let participants_raw = require_array(obj, "participants", "")?;
    if participants_raw.is_empty() {
        return Err(Error::schema(
            "participants",
            "a sequence diagram requires at least one participant",
        ));
    }
    let mut participants = Vec::with_capacity(participants_raw.len());
    for (i, raw) in participants_raw.iter().enumerate() {
        participants.push(parse_participant(raw, &index_path("participants", i))?);
    }

    let mut messages = Vec::new();
    for (i, raw) in optional_array(obj, "messages", "")?.iter().enumerate() {
        messages.push(parse_message(raw, &index_path("messages", i))?);
    }

    Ok(SequenceDiagramDef {
        title: optional_str(obj, "title", "")?.map(str::to_string),
        participants,
        messages,
        style: parse_theme(obj, "")?,
    })
}

fn parse_participant(raw: &Value, path: &str) -> Result<ParticipantDef> {
    let obj = as_object(raw, path)?;
    Ok(ParticipantDef {
        id: require_str(obj, "id", path)?.to_string(),
        label: require_str(obj, "label", path)?.to_string(),
        color: optional_color(obj, "color", path)?,
    })
}

fn parse_message(raw: &Value, path: &str) -> Result<MessageDef> {
    let obj = as_object(raw, path)?;
    Ok(MessageDef {
        from: require_str(obj, "from", path)?.to_string(),
        to: require_str(obj, "to", path)?.to_string(),
        label: require_str(obj, "label", path)?.to_string(),
        style: parse_enum(obj, "style", path, EdgeStyle::parse)?.unwrap_or_default(),
        color: optional_color(obj, "color", path)?,
    })
}

fn parse_theme(obj: &Map<String, Value>, path: &str) -> Result<Theme> {
    Ok(parse_enum(obj, "style", path, Theme::parse)?.unwrap_or_default())
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn index_path(key: &str, index: usize) -> String {
    format!("{key}[{index}]")
}

fn as_object<'a>(raw: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    raw.as_object().ok_or_else(|| {
        let at = if path.is_empty() { "." } else { path };
        Error::schema(at, "expected an object")
    })
}

fn require_str<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a str> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(Error::schema(join(path, key), "expected a string")),
        None => Err(Error::schema(
            join(path, key),
            format!("missing required field `{key}`"),
        )),
    }
}

fn optional_str<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> Result<Option<&'a str>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(Error::schema(join(path, key), "expected a string")),
    }
}

fn require_array<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a [Value]> {
    match obj.get(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(Error::schema(join(path, key), "expected an array")),
        None => Err(Error::schema(
            join(path, key),
            format!("missing required field `{key}`"),
        )),
    }
}

fn optional_array<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a [Value]> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(Error::schema(join(path, key), "expected an array")),
    }
}

fn parse_enum<T>(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    let Some(raw) = optional_str(obj, key, path)? else {
        return Ok(None);
    };
    match parse(raw) {
        Some(value) => Ok(Some(value)),
        None => Err(Error::schema(
            join(path, key),
            format!("unknown value `{raw}`"),
        )),
    }
}

fn optional_color(obj: &Map<String, Value>, key: &str, path: &str) -> Result<Option<String>> {
    let Some(raw) = optional_str(obj, key, path)? else {
        return Ok(None);
    };
    match color::normalize_hex(raw) {
        Some(hex) => Ok(Some(hex)),
        None => Err(Error::schema(
            join(path, key),
            format!("`{raw}` is not a hex colour (expected `#rrggbb`)"),
        )),
    }
}

fn optional_dimension(obj: &Map<String, Value>, key: &str, path: &str) -> Result<Option<f64>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let n = value.as_f64().filter(|n| n.is_finite() && *n > 0.0);
            match n {
                Some(n) => Ok(Some(n)),
                None => Err(Error::schema(
                    join(path, key),
                    "expected a positive number",
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_err(raw: Value) -> Error {
        parse(&raw).unwrap_err()
    }

    #[test]
    fn parse_applies_flow_defaults() {
        let raw = json!({
            "type": "flow",
            "nodes": [{"id": "a", "label": "A"}],
        });
        let DiagramDef::Flow(flow) = parse(&raw).unwrap() else {
            panic!("expected flow diagram");
        };
        assert_eq!(flow.style, Theme::HandDrawn);
        assert_eq!(flow.direction, FlowDirection::Tb);
        assert!(flow.edges.is_empty());
        assert!(flow.groups.is_empty());
        assert_eq!(flow.nodes[0].shape, NodeShape::Rectangle);
    }

    #[test]
    fn parse_applies_edge_defaults() {
        let raw = json!({
            "type": "flow",
            "nodes": [{"id": "a", "label": "A"}, {"id": "b", "label": "B"}],
            "edges": [{"from": "a", "to": "b"}],
        });
        let DiagramDef::Flow(flow) = parse(&raw).unwrap() else {
            panic!("expected flow diagram");
        };
        assert_eq!(flow.edges[0].style, EdgeStyle::Solid);
        assert_eq!(flow.edges[0].direction, ArrowDirection::Forward);
    }

    #[test]
    fn parse_rejects_unknown_type() {
        let err = parse_err(json!({"type": "gantt", "nodes": []}));
        assert_eq!(err.path(), "type");
    }

    #[test]
    fn parse_rejects_unknown_shape_with_path() {
        let err = parse_err(json!({
            "type": "flow",
            "nodes": [
                {"id": "a", "label": "A"},
                {"id": "b", "label": "B", "shape": "triangle"},
            ],
        }));
        assert_eq!(err.path(), "nodes[1].shape");
        assert!(err.to_string().contains("triangle"));
    }

    #[test]
    fn parse_rejects_unknown_theme_and_direction() {
        let err = parse_err(json!({"type": "flow", "nodes": [], "style": "sketchy"}));
        assert_eq!(err.path(), "style");

        let err = parse_err(json!({"type": "flow", "nodes": [], "direction": "NE"}));
        assert_eq!(err.path(), "direction");
    }

    #[test]
    fn parse_rejects_non_string_label() {
        let err = parse_err(json!({
            "type": "flow",
            "nodes": [{"id": "a", "label": 7}],
        }));
        assert_eq!(err.path(), "nodes[0].label");
    }

    #[test]
    fn parse_rejects_missing_nodes() {
        let err = parse_err(json!({"type": "flow"}));
        assert_eq!(err.path(), "nodes");
    }

    #[test]
    fn parse_accepts_empty_nodes() {
        let raw = json!({"type": "flow", "nodes": []});
        assert!(parse(&raw).is_ok());
    }

    #[test]
    fn parse_normalizes_colours() {
        let raw = json!({
            "type": "flow",
            "nodes": [{"id": "a", "label": "A", "color": "#FF6B6B"}],
        });
        let DiagramDef::Flow(flow) = parse(&raw).unwrap() else {
            panic!("expected flow diagram");
        };
        assert_eq!(flow.nodes[0].color.as_deref(), Some("#ff6b6b"));
    }

    #[test]
    fn parse_rejects_invalid_colour() {
        let err = parse_err(json!({
            "type": "flow",
            "nodes": [{"id": "a", "label": "A", "color": "tomato"}],
        }));
        assert_eq!(err.path(), "nodes[0].color");
    }

    #[test]
    fn parse_requires_a_participant() {
        let err = parse_err(json!({"type": "sequence", "participants": []}));
        assert_eq!(err.path(), "participants");
    }

    #[test]
    fn parse_sequence_messages_default_to_solid() {
        let raw = json!({
            "type": "sequence",
            "participants": [{"id": "svc", "label": "Service"}],
            "messages": [{"from": "svc", "to": "svc", "label": "tick"}],
        });
        let DiagramDef::Sequence(seq) = parse(&raw).unwrap() else {
            panic!("expected sequence diagram");
        };
        assert_eq!(seq.messages[0].style, EdgeStyle::Solid);
        assert!(seq.messages[0].is_self_message());
    }

    #[test]
    fn parse_rejects_group_contains_non_string() {
        let err = parse_err(json!({
            "type": "flow",
            "nodes": [{"id": "a", "label": "A"}],
            "groups": [{"id": "g1", "contains": ["a", 3]}],
        }));
        assert_eq!(err.path(), "groups[0].contains[1]");
    }

    #[test]
    fn parse_does_not_validate_edge_endpoints() {
        // Semantic validation is the layout stage's concern.
        let raw = json!({
            "type": "flow",
            "nodes": [{"id": "a", "label": "A"}],
            "edges": [{"from": "a", "to": "ghost"}],
        });
        assert!(parse(&raw).is_ok());
    }
}
