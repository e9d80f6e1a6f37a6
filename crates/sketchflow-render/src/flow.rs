//! Flow diagram layout.
//!
//! Builds a hierarchical graph (groups become compound containers), hands it
//! to the `wapiti` layered layout service, then flattens the returned tree
//! back to absolute coordinates and applies the global canvas padding.
//! Padding is added strictly after absolutisation; applying it before the
//! rebase walk double-shifts grouped nodes.

use rustc_hash::FxHashMap;
use sketchflow_core::{FlowDiagramDef, FlowDirection, NodeDef};

use crate::model::{LayoutEdge, LayoutGroup, LayoutNode, LayoutPoint, LayoutResult};
use crate::{Error, Result};

/// Uniform canvas padding around the laid-out content.
pub const PADDING: f64 = 40.0;
const NODE_MIN_WIDTH: f64 = 120.0;
const NODE_HEIGHT: f64 = 60.0;
const CHAR_WIDTH_PX: f64 = 10.0;
const LABEL_PADDING: f64 = 40.0;
const NODE_SPACING: f64 = 50.0;
const LAYER_SPACING: f64 = 80.0;
const GROUP_PADDING: f64 = 30.0;

fn estimated_size(node: &NodeDef) -> (f64, f64) {
    let width = node.width.unwrap_or_else(|| {
        (node.label.chars().count() as f64 * CHAR_WIDTH_PX + LABEL_PADDING).max(NODE_MIN_WIDTH)
    });
    let height = node.height.unwrap_or(NODE_HEIGHT);
    (width, height)
}

fn direction_of(direction: FlowDirection) -> wapiti::Direction {
    match direction {
        FlowDirection::Tb => wapiti::Direction::Down,
        FlowDirection::Lr => wapiti::Direction::Right,
        FlowDirection::Bt => wapiti::Direction::Up,
        FlowDirection::Rl => wapiti::Direction::Left,
    }
}

pub fn layout_flow(def: &FlowDiagramDef) -> Result<LayoutResult> {
    let node_index: FxHashMap<&str, usize> = def
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    // Node -> group lookup. A node listed in several groups keeps the last
    // assignment; unknown ids in `contains` are ignored.
    let mut group_of: FxHashMap<&str, &str> = FxHashMap::default();
    for group in &def.groups {
        for member in &group.contains {
            if node_index.contains_key(member.as_str()) {
                group_of.insert(member.as_str(), group.id.as_str());
            }
        }
    }

    // Compound containers first, loose nodes after, both in input order.
    let mut children: Vec<wapiti::Node> = Vec::new();
    for group in &def.groups {
        let members: Vec<wapiti::Node> = def
            .nodes
            .iter()
            .filter(|n| group_of.get(n.id.as_str()) == Some(&group.id.as_str()))
            .map(|n| {
                let (w, h) = estimated_size(n);
                wapiti::Node::leaf(n.id.clone(), w, h)
            })
            .collect();
        if !members.is_empty() {
            children.push(wapiti::Node::container(group.id.clone(), GROUP_PADDING, members));
        }
    }
    for node in &def.nodes {
        if group_of.contains_key(node.id.as_str()) {
            continue;
        }
        let (w, h) = estimated_size(node);
        children.push(wapiti::Node::leaf(node.id.clone(), w, h));
    }

    // Edges with a missing endpoint are dropped here, before routing.
    let kept_edges: Vec<&sketchflow_core::EdgeDef> = def
        .edges
        .iter()
        .filter(|e| {
            node_index.contains_key(e.from.as_str()) && node_index.contains_key(e.to.as_str())
        })
        .collect();
    let edges: Vec<wapiti::Edge> = kept_edges
        .iter()
        .enumerate()
        .map(|(i, e)| wapiti::Edge::new(format!("e{i}"), e.from.clone(), e.to.clone()))
        .collect();

    let mut graph = wapiti::Graph {
        config: wapiti::Config {
            direction: direction_of(def.direction),
            node_spacing: NODE_SPACING,
            layer_spacing: LAYER_SPACING,
        },
        children,
        edges,
        ..wapiti::Graph::default()
    };
    wapiti::layout(&mut graph).map_err(|e| Error::Layout {
        message: e.to_string(),
    })?;

    // Flatten the tree: child coordinates are relative to their container,
    // container coordinates are absolute at the root.
    struct AbsNode {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    }
    let mut abs_nodes: FxHashMap<String, AbsNode> = FxHashMap::default();
    let mut groups: Vec<LayoutGroup> = Vec::new();
    for child in &graph.children {
        if child.children.is_empty() {
            abs_nodes.insert(
                child.id.clone(),
                AbsNode {
                    x: child.x,
                    y: child.y,
                    width: child.width,
                    height: child.height,
                },
            );
            continue;
        }
        let (offset_x, offset_y) = (child.x, child.y);
        for member in &child.children {
            abs_nodes.insert(
                member.id.clone(),
                AbsNode {
                    x: offset_x + member.x,
                    y: offset_y + member.y,
                    width: member.width,
                    height: member.height,
                },
            );
        }
        let group_def = def
            .groups
            .iter()
            .find(|g| g.id == child.id)
            .map(|g| (g.label.clone(), g.color.clone()))
            .unwrap_or_default();
        groups.push(LayoutGroup {
            id: child.id.clone(),
            label: group_def.0,
            x: child.x + PADDING,
            y: child.y + PADDING,
            width: child.width,
            height: child.height,
            color: group_def.1,
        });
    }

    let nodes: Vec<LayoutNode> = def
        .nodes
        .iter()
        .filter_map(|n| {
            let abs = abs_nodes.get(n.id.as_str())?;
            Some(LayoutNode {
                id: n.id.clone(),
                x: abs.x + PADDING,
                y: abs.y + PADDING,
                width: abs.width,
                height: abs.height,
                label: n.label.clone(),
                shape: n.shape,
                color: n.color.clone(),
                text_color: n.text_color.clone(),
            })
        })
        .collect();

    let mut edges: Vec<LayoutEdge> = Vec::new();
    for (def_edge, routed) in kept_edges.iter().zip(graph.edges.iter()) {
        let mut points: Vec<LayoutPoint> = Vec::new();
        for section in &routed.sections {
            points.push(LayoutPoint {
                x: section.start_point.x + PADDING,
                y: section.start_point.y + PADDING,
            });
            for bend in &section.bend_points {
                points.push(LayoutPoint {
                    x: bend.x + PADDING,
                    y: bend.y + PADDING,
                });
            }
            points.push(LayoutPoint {
                x: section.end_point.x + PADDING,
                y: section.end_point.y + PADDING,
            });
        }
        if points.is_empty() {
            // The service returned no route: fall back to a straight line
            // between the node centres.
            let (Some(from), Some(to)) = (
                abs_nodes.get(def_edge.from.as_str()),
                abs_nodes.get(def_edge.to.as_str()),
            ) else {
                continue;
            };
            points.push(LayoutPoint {
                x: from.x + from.width / 2.0 + PADDING,
                y: from.y + from.height / 2.0 + PADDING,
            });
            points.push(LayoutPoint {
                x: to.x + to.width / 2.0 + PADDING,
                y: to.y + to.height / 2.0 + PADDING,
            });
        }
        edges.push(LayoutEdge {
            from: def_edge.from.clone(),
            to: def_edge.to.clone(),
            label: def_edge.label.clone(),
            style: def_edge.style,
            direction: def_edge.direction,
            color: def_edge.color.clone(),
            points,
        });
    }

    Ok(LayoutResult {
        width: graph.width + 2.0 * PADDING,
        height: graph.height + 2.0 * PADDING,
        nodes,
        edges,
        groups,
    })
}
