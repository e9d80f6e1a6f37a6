//! Positioned intermediates produced by layout and consumed by the SVG
//! renderer. Coordinates are absolute SVG user units, top-left anchored,
//! global padding already applied.

use sketchflow_core::{ArrowDirection, EdgeStyle, NodeShape};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub shape: NodeShape,
    pub color: Option<String>,
    pub text_color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LayoutEdge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub style: EdgeStyle,
    pub direction: ArrowDirection,
    pub color: Option<String>,
    /// Absolute waypoints, endpoints included (always at least two).
    pub points: Vec<LayoutPoint>,
}

#[derive(Debug, Clone)]
pub struct LayoutGroup {
    pub id: String,
    pub label: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub groups: Vec<LayoutGroup>,
}

#[derive(Debug, Clone)]
pub struct SequenceParticipant {
    pub id: String,
    pub label: String,
    /// Centre of the participant box.
    pub x: f64,
    pub width: f64,
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SequenceMessage {
    pub from: String,
    pub to: String,
    pub label: String,
    pub style: EdgeStyle,
    pub color: Option<String>,
    pub y: f64,
    pub self_message: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SequenceLayoutResult {
    pub width: f64,
    pub height: f64,
    /// Y of the top participant boxes.
    pub top_y: f64,
    /// Y where lifelines end and the bottom participant boxes start.
    pub lifeline_bottom: f64,
    pub participants: Vec<SequenceParticipant>,
    pub messages: Vec<SequenceMessage>,
}
