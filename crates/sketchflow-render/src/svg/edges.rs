//! Flow edge rendering: wobbly polylines, arrowheads, backed labels.

use std::fmt::Write as _;

use sketchflow_core::{ArrowDirection, EdgeStyle};

use super::sketch::{arrowhead, backed_label, sketchy_line, Stroke};
use super::escape_xml;
use crate::model::{LayoutEdge, LayoutPoint};
use crate::rng::SketchRng;
use crate::theme::ThemeConfig;

const DEFAULT_EDGE_COLOR: &str = "#333333";

pub(super) fn dash_pattern(style: EdgeStyle) -> Option<&'static str> {
    match style {
        EdgeStyle::Solid => None,
        EdgeStyle::Dashed => Some("8,4"),
        EdgeStyle::Dotted => Some("3,3"),
    }
}

pub(super) fn render_edge(
    out: &mut String,
    edge: &LayoutEdge,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    if edge.points.len() < 2 {
        return;
    }
    let _ = write!(
        out,
        r#"<g class="edge" data-from="{}" data-to="{}">"#,
        escape_xml(&edge.from),
        escape_xml(&edge.to),
    );

    let color = edge.color.as_deref().unwrap_or(DEFAULT_EDGE_COLOR);
    let stroke = Stroke {
        color,
        width: theme.stroke_width,
        dash: dash_pattern(edge.style),
    };
    for pair in edge.points.windows(2) {
        sketchy_line(
            out,
            (pair[0].x, pair[0].y),
            (pair[1].x, pair[1].y),
            &stroke,
            theme,
            rng,
        );
    }

    let first = &edge.points[0];
    let second = &edge.points[1];
    let last = &edge.points[edge.points.len() - 1];
    let penultimate = &edge.points[edge.points.len() - 2];
    match edge.direction {
        ArrowDirection::Forward => {
            arrowhead(out, (last.x, last.y), (penultimate.x, penultimate.y), color, theme, rng);
        }
        ArrowDirection::Backward => {
            arrowhead(out, (first.x, first.y), (second.x, second.y), color, theme, rng);
        }
        ArrowDirection::Both => {
            arrowhead(out, (last.x, last.y), (penultimate.x, penultimate.y), color, theme, rng);
            arrowhead(out, (first.x, first.y), (second.x, second.y), color, theme, rng);
        }
        ArrowDirection::None => {}
    }

    if let Some(label) = edge.label.as_deref() {
        let (mx, my) = mid_waypoint(&edge.points);
        backed_label(out, mx, my, label, "middle");
    }

    out.push_str("</g>");
}

/// The middle waypoint for odd point counts, the average of the two middle
/// waypoints for even counts.
fn mid_waypoint(points: &[LayoutPoint]) -> (f64, f64) {
    let n = points.len();
    if n % 2 == 1 {
        let p = &points[n / 2];
        (p.x, p.y)
    } else {
        let a = &points[n / 2 - 1];
        let b = &points[n / 2];
        ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }
}
