//! Typed diagram definitions produced by the schema layer.
//!
//! All entities are plain values: constructed once by the parser, consumed
//! by layout, discarded after rendering.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiagramDef {
    Flow(FlowDiagramDef),
    Sequence(SequenceDiagramDef),
}

impl DiagramDef {
    pub fn theme(&self) -> Theme {
        match self {
            Self::Flow(d) => d.style,
            Self::Sequence(d) => d.style,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Flow(d) => d.title.as_deref(),
            Self::Sequence(d) => d.title.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowDiagramDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub nodes: Vec<NodeDef>,
    pub edges: Vec<EdgeDef>,
    pub groups: Vec<GroupDef>,
    pub style: Theme,
    pub direction: FlowDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDef {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "textColor", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeDef {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub style: EdgeStyle,
    pub direction: ArrowDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub contains: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceDiagramDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub participants: Vec<ParticipantDef>,
    pub messages: Vec<MessageDef>,
    pub style: Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantDef {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageDef {
    pub from: String,
    pub to: String,
    pub label: String,
    pub style: EdgeStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl MessageDef {
    /// A message whose sender and receiver coincide, drawn as a small loop.
    pub fn is_self_message(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    HandDrawn,
    Clean,
    Minimal,
}

impl Theme {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hand-drawn" => Some(Self::HandDrawn),
            "clean" => Some(Self::Clean),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HandDrawn => "hand-drawn",
            Self::Clean => "clean",
            Self::Minimal => "minimal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FlowDirection {
    #[default]
    #[serde(rename = "TB")]
    Tb,
    #[serde(rename = "LR")]
    Lr,
    #[serde(rename = "BT")]
    Bt,
    #[serde(rename = "RL")]
    Rl,
}

impl FlowDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TB" => Some(Self::Tb),
            "LR" => Some(Self::Lr),
            "BT" => Some(Self::Bt),
            "RL" => Some(Self::Rl),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tb => "TB",
            Self::Lr => "LR",
            Self::Bt => "BT",
            Self::Rl => "RL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    #[default]
    Rectangle,
    Ellipse,
    Diamond,
    Cylinder,
    Cloud,
    Hexagon,
    Parallelogram,
}

impl NodeShape {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rectangle" => Some(Self::Rectangle),
            "ellipse" => Some(Self::Ellipse),
            "diamond" => Some(Self::Diamond),
            "cylinder" => Some(Self::Cylinder),
            "cloud" => Some(Self::Cloud),
            "hexagon" => Some(Self::Hexagon),
            "parallelogram" => Some(Self::Parallelogram),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Diamond => "diamond",
            Self::Cylinder => "cylinder",
            Self::Cloud => "cloud",
            Self::Hexagon => "hexagon",
            Self::Parallelogram => "parallelogram",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl EdgeStyle {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "solid" => Some(Self::Solid),
            "dashed" => Some(Self::Dashed),
            "dotted" => Some(Self::Dotted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    #[default]
    Forward,
    Backward,
    Both,
    None,
}

impl ArrowDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "forward" => Some(Self::Forward),
            "backward" => Some(Self::Backward),
            "both" => Some(Self::Both),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Both => "both",
            Self::None => "none",
        }
    }
}
