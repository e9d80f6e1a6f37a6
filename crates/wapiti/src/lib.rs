#![forbid(unsafe_code)]

//! Layered graph layout with compound containers.
//!
//! The input is a tree: a [`Graph`] owns root-level [`Node`]s, a node with
//! `children` is a compound container, and all [`Edge`]s are attached to the
//! graph. [`layout`] fills in `x`/`y`/`width`/`height` on every node and one
//! orthogonal [`Section`] per routable edge.
//!
//! Coordinate contract:
//! - a node's `x`/`y` is its top-left corner, relative to its parent
//!   container (root-level nodes are relative to the graph origin);
//! - edge section points are absolute (graph-relative);
//! - `Graph::width`/`Graph::height` cover every node, container frame and
//!   edge point.
//!
//! The algorithm is deterministic: ties everywhere resolve to input order.

use std::collections::{HashMap, HashSet};

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("duplicate node id in layout tree: {id}")]
    DuplicateNode { id: String },
}

/// Main layout direction: the axis along which ranks advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Down,
    Up,
    Right,
    Left,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub direction: Direction,
    /// Gap between neighbouring nodes within a rank.
    pub node_spacing: f64,
    /// Gap between consecutive ranks.
    pub layer_spacing: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            direction: Direction::Down,
            node_spacing: 50.0,
            layer_spacing: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub id: String,
    pub width: f64,
    pub height: f64,
    /// Inner padding applied on all four sides of a compound container.
    /// Ignored for leaves.
    pub padding: f64,
    pub children: Vec<Node>,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn leaf(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            ..Self::default()
        }
    }

    pub fn container(id: impl Into<String>, padding: f64, children: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            padding,
            children,
            ..Self::default()
        }
    }
}

/// One routed run of an edge: `start_point`, optional `bend_points`, `end_point`.
#[derive(Debug, Clone, Default)]
pub struct Section {
    pub start_point: Point,
    pub bend_points: Vec<Point>,
    pub end_point: Point,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub sections: Vec<Section>,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            sections: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub config: Config,
    pub children: Vec<Node>,
    pub edges: Vec<Edge>,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug)]
struct Leaf {
    id: String,
    width: f64,
    height: f64,
    /// Compound ancestry, outermost first (indices into `compounds`).
    chain: Vec<usize>,
    cx: f64,
    cy: f64,
}

#[derive(Debug)]
struct Compound {
    id: String,
    padding: f64,
    chain: Vec<usize>,
    direct_leaves: Vec<usize>,
    direct_compounds: Vec<usize>,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

fn collect(
    nodes: &[Node],
    chain: &mut Vec<usize>,
    leaves: &mut Vec<Leaf>,
    compounds: &mut Vec<Compound>,
    seen: &mut HashSet<String>,
) -> Result<()> {
    for node in nodes {
        if !seen.insert(node.id.clone()) {
            return Err(LayoutError::DuplicateNode {
                id: node.id.clone(),
            });
        }
        if node.children.is_empty() {
            let idx = leaves.len();
            leaves.push(Leaf {
                id: node.id.clone(),
                width: node.width,
                height: node.height,
                chain: chain.clone(),
                cx: 0.0,
                cy: 0.0,
            });
            if let Some(&parent) = chain.last() {
                compounds[parent].direct_leaves.push(idx);
            }
        } else {
            let idx = compounds.len();
            compounds.push(Compound {
                id: node.id.clone(),
                padding: node.padding,
                chain: chain.clone(),
                direct_leaves: Vec::new(),
                direct_compounds: Vec::new(),
                left: 0.0,
                top: 0.0,
                width: 0.0,
                height: 0.0,
            });
            if let Some(&parent) = chain.last() {
                compounds[parent].direct_compounds.push(idx);
            }
            chain.push(idx);
            collect(&node.children, chain, leaves, compounds, seen)?;
            chain.pop();
        }
    }
    Ok(())
}

/// Extra gap between two in-rank neighbours: the padding of every compound
/// boundary that lies between them.
fn boundary_padding(a: &Leaf, b: &Leaf, compounds: &[Compound]) -> f64 {
    let shared = a
        .chain
        .iter()
        .zip(b.chain.iter())
        .take_while(|(x, y)| x == y)
        .count();
    let mut pad = 0.0;
    for &c in &a.chain[shared..] {
        pad += compounds[c].padding;
    }
    for &c in &b.chain[shared..] {
        pad += compounds[c].padding;
    }
    pad
}

pub fn layout(graph: &mut Graph) -> Result<()> {
    let mut leaves: Vec<Leaf> = Vec::new();
    let mut compounds: Vec<Compound> = Vec::new();
    let mut chain: Vec<usize> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    collect(&graph.children, &mut chain, &mut leaves, &mut compounds, &mut seen)?;

    let horizontal = matches!(
        graph.config.direction,
        Direction::Right | Direction::Left
    );
    if horizontal {
        // Rank along X: lay out in the Down frame with swapped extents, then
        // transpose the coordinates back at the end (the dagre trick of
        // adjusting the coordinate system around a single TB pipeline).
        for leaf in &mut leaves {
            std::mem::swap(&mut leaf.width, &mut leaf.height);
        }
    }

    let index_of: HashMap<&str, usize> = leaves
        .iter()
        .enumerate()
        .map(|(i, l)| (l.id.as_str(), i))
        .collect();

    // Edges usable for ranking/routing: both endpoints are known leaves.
    let routable: Vec<(usize, usize, usize)> = graph
        .edges
        .iter()
        .enumerate()
        .filter_map(|(e, edge)| {
            let s = index_of.get(edge.source.as_str())?;
            let t = index_of.get(edge.target.as_str())?;
            Some((e, *s, *t))
        })
        .collect();

    // Kahn order, seeded and traversed in insertion order.
    let mut indegree = vec![0usize; leaves.len()];
    for &(_, s, t) in &routable {
        if s != t {
            indegree[t] += 1;
        }
    }
    let mut queue: std::collections::VecDeque<usize> = (0..leaves.len())
        .filter(|&i| indegree[i] == 0)
        .collect();
    let mut topo: Vec<usize> = Vec::with_capacity(leaves.len());
    let mut remaining = indegree.clone();
    while let Some(n) = queue.pop_front() {
        topo.push(n);
        for &(_, s, t) in &routable {
            if s != n || s == t {
                continue;
            }
            remaining[t] = remaining[t].saturating_sub(1);
            if remaining[t] == 0 {
                queue.push_back(t);
            }
        }
    }
    // Cycles leave nodes unqueued: fall back to insertion order.
    if topo.len() != leaves.len() {
        topo = (0..leaves.len()).collect();
    }

    // Longest-path ranks over the topological order.
    let mut rank = vec![0usize; leaves.len()];
    for &n in &topo {
        for &(_, s, t) in &routable {
            if s != n || s == t {
                continue;
            }
            rank[t] = rank[t].max(rank[s] + 1);
        }
    }

    let max_rank = rank.iter().copied().max().unwrap_or(0);
    let mut ranks: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    for i in 0..leaves.len() {
        ranks[rank[i]].push(i);
    }

    // Row extents; in-rank gaps include crossed compound paddings.
    let mut row_widths: Vec<f64> = Vec::with_capacity(ranks.len());
    let mut row_heights: Vec<f64> = Vec::with_capacity(ranks.len());
    for row in &ranks {
        let mut w = 0.0;
        let mut h: f64 = 0.0;
        for (i, &leaf) in row.iter().enumerate() {
            w += leaves[leaf].width;
            h = h.max(leaves[leaf].height);
            if i + 1 < row.len() {
                w += graph.config.node_spacing
                    + boundary_padding(&leaves[leaf], &leaves[row[i + 1]], &compounds);
            }
        }
        row_widths.push(w);
        row_heights.push(h);
    }
    let max_row_width = row_widths.iter().copied().fold(0.0_f64, f64::max);

    let mut y_cursor = 0.0;
    for (r, row) in ranks.iter().enumerate() {
        let cy = y_cursor + row_heights[r] / 2.0;
        let mut x_cursor = (max_row_width - row_widths[r]) / 2.0;
        for (i, &leaf) in row.iter().enumerate() {
            let gap = if i + 1 < row.len() {
                graph.config.node_spacing
                    + boundary_padding(&leaves[leaf], &leaves[row[i + 1]], &compounds)
            } else {
                0.0
            };
            let w = leaves[leaf].width;
            leaves[leaf].cx = x_cursor + w / 2.0;
            leaves[leaf].cy = cy;
            x_cursor += w + gap;
        }
        y_cursor += row_heights[r];
        if r + 1 < ranks.len() {
            y_cursor += graph.config.layer_spacing;
        }
    }
    let total_h = y_cursor;

    // Orthogonal routing in the Down frame.
    let mut sections: Vec<Option<Section>> = vec![None; graph.edges.len()];
    let loop_gap = graph.config.node_spacing / 2.0;
    for &(e, s, t) in &routable {
        let (sx, sy, sw, sh) = (leaves[s].cx, leaves[s].cy, leaves[s].width, leaves[s].height);
        let (tx, ty, tw, th) = (leaves[t].cx, leaves[t].cy, leaves[t].width, leaves[t].height);

        let section = if s == t {
            // Rectangular detour on the right-hand side of the node.
            let right = sx + sw / 2.0;
            let x_out = right + 2.0 * loop_gap;
            let y_top = sy - sh / 4.0;
            let y_bot = sy + sh / 4.0;
            Section {
                start_point: Point { x: right, y: y_top },
                bend_points: vec![
                    Point { x: x_out, y: y_top },
                    Point { x: x_out, y: y_bot },
                ],
                end_point: Point { x: right, y: y_bot },
            }
        } else if rank[s] == rank[t] {
            // Straight run between the facing sides.
            let (start, end) = if tx >= sx {
                (Point { x: sx + sw / 2.0, y: sy }, Point { x: tx - tw / 2.0, y: ty })
            } else {
                (Point { x: sx - sw / 2.0, y: sy }, Point { x: tx + tw / 2.0, y: ty })
            };
            Section {
                start_point: start,
                bend_points: Vec::new(),
                end_point: end,
            }
        } else if rank[s] < rank[t] {
            let start = Point { x: sx, y: sy + sh / 2.0 };
            let end = Point { x: tx, y: ty - th / 2.0 };
            let mid_y = (start.y + end.y) / 2.0;
            let bends = if (start.x - end.x).abs() > f64::EPSILON {
                vec![Point { x: start.x, y: mid_y }, Point { x: end.x, y: mid_y }]
            } else {
                Vec::new()
            };
            Section {
                start_point: start,
                bend_points: bends,
                end_point: end,
            }
        } else {
            // Back edge: leave the top of the source and enter the bottom of
            // the target.
            let start = Point { x: sx, y: sy - sh / 2.0 };
            let end = Point { x: tx, y: ty + th / 2.0 };
            let mid_y = (start.y + end.y) / 2.0;
            let bends = if (start.x - end.x).abs() > f64::EPSILON {
                vec![Point { x: start.x, y: mid_y }, Point { x: end.x, y: mid_y }]
            } else {
                Vec::new()
            };
            Section {
                start_point: start,
                bend_points: bends,
                end_point: end,
            }
        };
        sections[e] = Some(section);
    }

    // Direction transforms, applied to centres and section points alike.
    let transform_point = |p: Point| -> Point {
        match graph.config.direction {
            Direction::Down => p,
            Direction::Up => Point { x: p.x, y: total_h - p.y },
            Direction::Right => Point { x: p.y, y: p.x },
            Direction::Left => Point { x: total_h - p.y, y: p.x },
        }
    };
    for leaf in &mut leaves {
        let p = transform_point(Point { x: leaf.cx, y: leaf.cy });
        leaf.cx = p.x;
        leaf.cy = p.y;
        if horizontal {
            std::mem::swap(&mut leaf.width, &mut leaf.height);
        }
    }
    for section in sections.iter_mut().flatten() {
        section.start_point = transform_point(section.start_point);
        section.end_point = transform_point(section.end_point);
        for bend in &mut section.bend_points {
            *bend = transform_point(*bend);
        }
    }

    // Compound frames, innermost first so parents enclose child frames.
    for c in (0..compounds.len()).rev() {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for &l in &compounds[c].direct_leaves {
            min_x = min_x.min(leaves[l].cx - leaves[l].width / 2.0);
            min_y = min_y.min(leaves[l].cy - leaves[l].height / 2.0);
            max_x = max_x.max(leaves[l].cx + leaves[l].width / 2.0);
            max_y = max_y.max(leaves[l].cy + leaves[l].height / 2.0);
        }
        for i in 0..compounds[c].direct_compounds.len() {
            let child = compounds[c].direct_compounds[i];
            min_x = min_x.min(compounds[child].left);
            min_y = min_y.min(compounds[child].top);
            max_x = max_x.max(compounds[child].left + compounds[child].width);
            max_y = max_y.max(compounds[child].top + compounds[child].height);
        }
        let pad = compounds[c].padding;
        if min_x.is_finite() {
            compounds[c].left = min_x - pad;
            compounds[c].top = min_y - pad;
            compounds[c].width = (max_x - min_x) + 2.0 * pad;
            compounds[c].height = (max_y - min_y) + 2.0 * pad;
        } else {
            compounds[c].left = 0.0;
            compounds[c].top = 0.0;
            compounds[c].width = 2.0 * pad;
            compounds[c].height = 2.0 * pad;
        }
    }

    // Normalise so the full extent (frames and edge points included) starts
    // at the origin.
    let mut min_x = 0.0_f64;
    let mut min_y = 0.0_f64;
    let mut max_x = 0.0_f64;
    let mut max_y = 0.0_f64;
    for leaf in &leaves {
        min_x = min_x.min(leaf.cx - leaf.width / 2.0);
        min_y = min_y.min(leaf.cy - leaf.height / 2.0);
        max_x = max_x.max(leaf.cx + leaf.width / 2.0);
        max_y = max_y.max(leaf.cy + leaf.height / 2.0);
    }
    for c in &compounds {
        min_x = min_x.min(c.left);
        min_y = min_y.min(c.top);
        max_x = max_x.max(c.left + c.width);
        max_y = max_y.max(c.top + c.height);
    }
    for section in sections.iter().flatten() {
        for p in std::iter::once(&section.start_point)
            .chain(section.bend_points.iter())
            .chain(std::iter::once(&section.end_point))
        {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
    }
    let (dx, dy) = (-min_x, -min_y);
    for leaf in &mut leaves {
        leaf.cx += dx;
        leaf.cy += dy;
    }
    for c in &mut compounds {
        c.left += dx;
        c.top += dy;
    }
    for section in sections.iter_mut().flatten() {
        section.start_point.x += dx;
        section.start_point.y += dy;
        section.end_point.x += dx;
        section.end_point.y += dy;
        for bend in &mut section.bend_points {
            bend.x += dx;
            bend.y += dy;
        }
    }
    graph.width = max_x - min_x;
    graph.height = max_y - min_y;

    // Write results back into the tree, rebasing children onto their parent
    // container's frame.
    struct Out {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    }
    let mut out: HashMap<String, Out> = HashMap::new();
    for leaf in &leaves {
        let abs_left = leaf.cx - leaf.width / 2.0;
        let abs_top = leaf.cy - leaf.height / 2.0;
        let (px, py) = match leaf.chain.last() {
            Some(&parent) => (compounds[parent].left, compounds[parent].top),
            None => (0.0, 0.0),
        };
        out.insert(
            leaf.id.clone(),
            Out {
                x: abs_left - px,
                y: abs_top - py,
                width: leaf.width,
                height: leaf.height,
            },
        );
    }
    for c in &compounds {
        let (px, py) = match c.chain.last() {
            Some(&parent) => (compounds[parent].left, compounds[parent].top),
            None => (0.0, 0.0),
        };
        out.insert(
            c.id.clone(),
            Out {
                x: c.left - px,
                y: c.top - py,
                width: c.width,
                height: c.height,
            },
        );
    }

    fn apply(nodes: &mut [Node], out: &HashMap<String, Out>) {
        for node in nodes {
            if let Some(o) = out.get(&node.id) {
                node.x = o.x;
                node.y = o.y;
                node.width = o.width;
                node.height = o.height;
            }
            apply(&mut node.children, out);
        }
    }
    apply(&mut graph.children, &out);

    for (e, section) in sections.into_iter().enumerate() {
        graph.edges[e].sections = section.into_iter().collect();
    }

    Ok(())
}
