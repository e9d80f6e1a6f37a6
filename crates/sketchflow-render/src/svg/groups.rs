//! Group frames: dashed rectangles behind their member nodes.

use std::fmt::Write as _;

use sketchflow_core::color::darken;

use super::sketch::{fill_polygon, sketchy_line, Stroke};
use super::{escape_xml, fmt};
use crate::model::LayoutGroup;
use crate::rng::SketchRng;
use crate::theme::ThemeConfig;

const GROUP_DASH: &str = "6,4";
const GROUP_FILL_OPACITY: f64 = 0.05;
const DEFAULT_GROUP_FILL: &str = "#f5f5f5";
const DEFAULT_GROUP_STROKE: &str = "#aaaaaa";
const LABEL_COLOR: &str = "#666666";

pub(super) fn render_group(
    out: &mut String,
    group: &LayoutGroup,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    let _ = write!(out, r#"<g class="group" data-id="{}">"#, escape_xml(&group.id));

    let fill = group.color.as_deref().unwrap_or(DEFAULT_GROUP_FILL);
    let stroke_color = group
        .color
        .as_deref()
        .map(|c| darken(c, 0.3))
        .unwrap_or_else(|| DEFAULT_GROUP_STROKE.to_string());
    let stroke = Stroke {
        color: &stroke_color,
        width: theme.stroke_width,
        dash: Some(GROUP_DASH),
    };

    let (x, y, w, h) = (group.x, group.y, group.width, group.height);
    if theme.sketchy() {
        let corners = [(x, y), (x + w, y), (x + w, y + h), (x, y + h)];
        fill_polygon(out, &corners, fill, GROUP_FILL_OPACITY, theme, rng);
        for i in 0..4 {
            sketchy_line(out, corners[i], corners[(i + 1) % 4], &stroke, theme, rng);
        }
    } else {
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}" stroke-dasharray="{}"/>"#,
            fmt(x),
            fmt(y),
            fmt(w),
            fmt(h),
            fmt(theme.corner_radius),
            fill,
            GROUP_FILL_OPACITY,
            stroke.color,
            fmt(stroke.width),
            GROUP_DASH,
        );
    }

    if let Some(label) = group.label.as_deref() {
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-size="13.0" text-anchor="start" dominant-baseline="middle" fill="{}">{}</text>"#,
            fmt(x + 12.0),
            fmt(y + 14.0),
            LABEL_COLOR,
            escape_xml(label),
        );
    }

    out.push_str("</g>");
}
