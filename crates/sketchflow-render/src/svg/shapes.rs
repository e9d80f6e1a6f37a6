//! The seven node shapes.
//!
//! On sketchy themes a shape is a jittered fill plus wobbly outline strokes;
//! with jitter off, native primitives (`rect`, `ellipse`, `polygon`) are
//! used. Cylinder and cloud always emit paths.

use std::fmt::Write as _;

use sketchflow_core::color::{darken, palette_color, DEFAULT_TEXT_COLOR};
use sketchflow_core::NodeShape;

use super::sketch::{centered_label, fill_polygon, outlined_polygon, sketchy_line, Stroke};
use super::{escape_xml, fmt};
use crate::model::LayoutNode;
use crate::rng::SketchRng;
use crate::theme::ThemeConfig;

const FONT_SIZE: f64 = 14.0;
const PARALLELOGRAM_SKEW: f64 = 15.0;
const CLOUD_BULGE: f64 = 1.35;

pub(super) fn render_node(
    out: &mut String,
    node: &LayoutNode,
    index: usize,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    let fill = node
        .color
        .clone()
        .unwrap_or_else(|| palette_color(index).to_string());
    let stroke_color = darken(&fill, 0.3);
    let stroke = Stroke {
        color: &stroke_color,
        width: theme.stroke_width,
        dash: None,
    };
    let text_color = node.text_color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR);

    let _ = write!(out, r#"<g class="node" data-id="{}">"#, escape_xml(&node.id));

    let (x, y, w, h) = (node.x, node.y, node.width, node.height);
    let (cx, cy) = (x + w / 2.0, y + h / 2.0);
    let mut label_cy = cy;

    match node.shape {
        NodeShape::Rectangle => {
            super::sketch::themed_rect(
                out,
                x,
                y,
                w,
                h,
                &fill,
                &stroke,
                theme.fill_opacity,
                theme,
                rng,
            );
        }
        NodeShape::Ellipse => {
            ellipse_shape(out, cx, cy, w / 2.0, h / 2.0, &fill, &stroke, theme, rng);
        }
        NodeShape::Diamond => {
            let points = [(cx, y), (x + w, cy), (cx, y + h), (x, cy)];
            polygon_shape(out, &points, &fill, &stroke, theme, rng);
        }
        NodeShape::Cylinder => {
            let ry = cylinder(out, x, y, w, h, &fill, &stroke, theme, rng);
            label_cy += ry / 2.0;
        }
        NodeShape::Cloud => {
            cloud(out, cx, cy, w / 2.0, h / 2.0, &fill, &stroke, theme, rng);
            label_cy += h * 0.04;
        }
        NodeShape::Hexagon => {
            let inset = w * 0.25;
            let points = [
                (x + inset, y),
                (x + w - inset, y),
                (x + w, cy),
                (x + w - inset, y + h),
                (x + inset, y + h),
                (x, cy),
            ];
            polygon_shape(out, &points, &fill, &stroke, theme, rng);
        }
        NodeShape::Parallelogram => {
            let points = [
                (x + PARALLELOGRAM_SKEW, y),
                (x + w, y),
                (x + w - PARALLELOGRAM_SKEW, y + h),
                (x, y + h),
            ];
            polygon_shape(out, &points, &fill, &stroke, theme, rng);
        }
    }

    centered_label(out, cx, label_cy, &node.label, text_color, FONT_SIZE);
    out.push_str("</g>");
}

fn polygon_shape(
    out: &mut String,
    points: &[(f64, f64)],
    fill: &str,
    stroke: &Stroke<'_>,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    if theme.sketchy() {
        fill_polygon(out, points, fill, theme.fill_opacity, theme, rng);
        for i in 0..points.len() {
            sketchy_line(out, points[i], points[(i + 1) % points.len()], stroke, theme, rng);
        }
        return;
    }
    outlined_polygon(out, points, fill, theme.fill_opacity, stroke);
}

/// Closed blob path: eight samples on the parametric ellipse joined by cubic
/// segments whose control points are pushed outward by `bulge` (1.0 yields a
/// plain ellipse, more gives cloud bumps). Sketchy themes jitter samples and
/// control points alike.
fn blob_path(
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    bulge: f64,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) -> String {
    let amount = theme.jitter_amount;
    let mut points = [(0.0, 0.0); 8];
    for (k, p) in points.iter_mut().enumerate() {
        let angle = k as f64 * std::f64::consts::FRAC_PI_4;
        let sample = (cx + rx * angle.cos(), cy + ry * angle.sin());
        *p = if amount > 0.0 {
            rng.jitter_point(sample.0, sample.1, amount)
        } else {
            sample
        };
    }

    let outward = |p: (f64, f64)| -> (f64, f64) {
        (cx + (p.0 - cx) * bulge, cy + (p.1 - cy) * bulge)
    };

    let mut d = format!("M {} {}", fmt(points[0].0), fmt(points[0].1));
    for i in 0..8 {
        let a = points[i];
        let b = points[(i + 1) % 8];
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let mut c1 = outward((a.0 + 0.4 * dx, a.1 + 0.4 * dy));
        let mut c2 = outward((b.0 - 0.4 * dx, b.1 - 0.4 * dy));
        if amount > 0.0 {
            c1 = rng.jitter_point(c1.0, c1.1, amount);
            c2 = rng.jitter_point(c2.0, c2.1, amount);
        }
        let _ = write!(
            d,
            " C {} {} {} {} {} {}",
            fmt(c1.0),
            fmt(c1.1),
            fmt(c2.0),
            fmt(c2.1),
            fmt(b.0),
            fmt(b.1),
        );
    }
    d.push_str(" Z");
    d
}

#[allow(clippy::too_many_arguments)]
fn ellipse_shape(
    out: &mut String,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    fill: &str,
    stroke: &Stroke<'_>,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    if theme.sketchy() {
        let d = blob_path(cx, cy, rx, ry, 1.0, theme, rng);
        let _ = write!(
            out,
            r#"<path d="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
            d,
            fill,
            theme.fill_opacity,
            stroke.color,
            fmt(stroke.width),
        );
        if theme.double_stroke {
            // Second outline with fresh jitters, offset from the first.
            let d = blob_path(cx, cy, rx, ry, 1.0, theme, rng);
            let _ = write!(
                out,
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="0.3"/>"#,
                d,
                stroke.color,
                fmt(stroke.width * 0.5),
            );
        }
        return;
    }
    let _ = write!(
        out,
        r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
        fmt(cx),
        fmt(cy),
        fmt(rx),
        fmt(ry),
        fill,
        theme.fill_opacity,
        stroke.color,
        fmt(stroke.width),
    );
}

/// Cylinder: rectangular body between two horizontal ellipses. Returns the
/// ellipse `ry` so the caller can shift the label off the top cap.
#[allow(clippy::too_many_arguments)]
fn cylinder(
    out: &mut String,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    fill: &str,
    stroke: &Stroke<'_>,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) -> f64 {
    let ry = (h * 0.15).min(15.0);
    let rx = w / 2.0;
    let cx = x + rx;

    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}" stroke="none"/>"#,
        fmt(x),
        fmt(y + ry),
        fmt(w),
        fmt(h - 2.0 * ry),
        fill,
        theme.fill_opacity,
    );
    ellipse_shape(out, cx, y + h - ry, rx, ry, fill, stroke, theme, rng);
    sketchy_line(out, (x, y + ry), (x, y + h - ry), stroke, theme, rng);
    sketchy_line(out, (x + w, y + ry), (x + w, y + h - ry), stroke, theme, rng);
    ellipse_shape(out, cx, y + ry, rx, ry, fill, stroke, theme, rng);

    ry
}

#[allow(clippy::too_many_arguments)]
fn cloud(
    out: &mut String,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    fill: &str,
    stroke: &Stroke<'_>,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    let d = blob_path(cx, cy, rx, ry, CLOUD_BULGE, theme, rng);
    let _ = write!(
        out,
        r#"<path d="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
        d,
        fill,
        theme.fill_opacity,
        stroke.color,
        fmt(stroke.width),
    );
    if theme.sketchy() && theme.double_stroke {
        let d = blob_path(cx, cy, rx, ry, CLOUD_BULGE, theme, rng);
        let _ = write!(
            out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="0.3"/>"#,
            d,
            stroke.color,
            fmt(stroke.width * 0.5),
        );
    }
}
