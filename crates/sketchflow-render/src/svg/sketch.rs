//! Shared sketch primitives: wobbly lines, filled polygons, arrowheads and
//! backed labels. Every jittered coordinate draws from the render's RNG, so
//! the call order in here is part of the output contract.

use std::fmt::Write as _;

use super::{escape_xml, fmt};
use crate::rng::SketchRng;
use crate::theme::ThemeConfig;

const DOUBLE_STROKE_OPACITY: f64 = 0.3;

#[derive(Debug, Clone, Copy)]
pub(super) struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    pub dash: Option<&'a str>,
}

/// A line from `a` to `b`: a quadratic Bézier through a jittered midpoint on
/// sketchy themes (twice, when the theme double-strokes), a plain `<line>`
/// otherwise.
pub(super) fn sketchy_line(
    out: &mut String,
    a: (f64, f64),
    b: (f64, f64),
    stroke: &Stroke<'_>,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    if theme.sketchy() {
        sketch_pass(out, a, b, stroke, stroke.width, 1.0, theme.jitter_amount, rng);
        if theme.double_stroke {
            sketch_pass(
                out,
                a,
                b,
                stroke,
                stroke.width * 0.5,
                DOUBLE_STROKE_OPACITY,
                theme.jitter_amount,
                rng,
            );
        }
        return;
    }

    let _ = write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{}/>"#,
        fmt(a.0),
        fmt(a.1),
        fmt(b.0),
        fmt(b.1),
        stroke.color,
        fmt(stroke.width),
        dash_attr(stroke.dash),
    );
}

#[allow(clippy::too_many_arguments)]
fn sketch_pass(
    out: &mut String,
    a: (f64, f64),
    b: (f64, f64),
    stroke: &Stroke<'_>,
    width: f64,
    opacity: f64,
    amount: f64,
    rng: &mut SketchRng,
) {
    let (x1, y1) = rng.jitter_point(a.0, a.1, amount);
    let (x2, y2) = rng.jitter_point(b.0, b.1, amount);
    let (mx, my) = rng.jitter_point((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0, amount);

    // Opacities are not coordinates; they keep their natural decimal form.
    let opacity_attr = if opacity < 1.0 {
        format!(r#" stroke-opacity="{opacity}""#)
    } else {
        String::new()
    };
    let _ = write!(
        out,
        r#"<path d="M {} {} Q {} {} {} {}" fill="none" stroke="{}" stroke-width="{}"{}{}/>"#,
        fmt(x1),
        fmt(y1),
        fmt(mx),
        fmt(my),
        fmt(x2),
        fmt(y2),
        stroke.color,
        fmt(width),
        opacity_attr,
        dash_attr(stroke.dash),
    );
}

pub(super) fn dash_attr(dash: Option<&str>) -> String {
    match dash {
        Some(pattern) => format!(r#" stroke-dasharray="{pattern}""#),
        None => String::new(),
    }
}

/// Fill-only polygon; sketchy themes jitter every vertex first.
pub(super) fn fill_polygon(
    out: &mut String,
    points: &[(f64, f64)],
    fill: &str,
    fill_opacity: f64,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    let mut attr = String::new();
    for (i, &(x, y)) in points.iter().enumerate() {
        let (x, y) = if theme.sketchy() {
            rng.jitter_point(x, y, theme.jitter_amount)
        } else {
            (x, y)
        };
        if i > 0 {
            attr.push(' ');
        }
        let _ = write!(attr, "{},{}", fmt(x), fmt(y));
    }
    let _ = write!(
        out,
        r#"<polygon points="{attr}" fill="{fill}" fill-opacity="{fill_opacity}" stroke="none"/>"#,
    );
}

/// Outlined polygon for clean themes (single element carrying fill and
/// stroke).
pub(super) fn outlined_polygon(
    out: &mut String,
    points: &[(f64, f64)],
    fill: &str,
    fill_opacity: f64,
    stroke: &Stroke<'_>,
) {
    let mut attr = String::new();
    for (i, &(x, y)) in points.iter().enumerate() {
        if i > 0 {
            attr.push(' ');
        }
        let _ = write!(attr, "{},{}", fmt(x), fmt(y));
    }
    let _ = write!(
        out,
        r#"<polygon points="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"{}/>"#,
        attr,
        fill,
        fill_opacity,
        stroke.color,
        fmt(stroke.width),
        dash_attr(stroke.dash),
    );
}

/// A themed rectangle: jittered fill plus four sketchy edges, or a native
/// `<rect>` with the theme's corner radius.
#[allow(clippy::too_many_arguments)]
pub(super) fn themed_rect(
    out: &mut String,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    fill: &str,
    stroke: &Stroke<'_>,
    fill_opacity: f64,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    let corners = [(x, y), (x + w, y), (x + w, y + h), (x, y + h)];
    if theme.sketchy() {
        fill_polygon(out, &corners, fill, fill_opacity, theme, rng);
        for i in 0..4 {
            sketchy_line(out, corners[i], corners[(i + 1) % 4], stroke, theme, rng);
        }
        return;
    }
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"{}/>"#,
        fmt(x),
        fmt(y),
        fmt(w),
        fmt(h),
        fmt(theme.corner_radius),
        fill,
        fill_opacity,
        stroke.color,
        fmt(stroke.width),
        dash_attr(stroke.dash),
    );
}

/// Triangular arrowhead at `tip`, oriented away from `base`; the two base
/// corners sit at ±0.82π off the segment direction.
pub(super) fn arrowhead(
    out: &mut String,
    tip: (f64, f64),
    base: (f64, f64),
    color: &str,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    const SIZE: f64 = 10.0;
    const SPREAD: f64 = 0.82 * std::f64::consts::PI;

    let angle = (tip.1 - base.1).atan2(tip.0 - base.0);
    let mut points = [
        tip,
        (
            tip.0 + SIZE * (angle + SPREAD).cos(),
            tip.1 + SIZE * (angle + SPREAD).sin(),
        ),
        (
            tip.0 + SIZE * (angle - SPREAD).cos(),
            tip.1 + SIZE * (angle - SPREAD).sin(),
        ),
    ];
    if theme.sketchy() {
        for p in &mut points {
            *p = rng.jitter_point(p.0, p.1, theme.jitter_amount * 0.5);
        }
    }

    let _ = write!(
        out,
        r#"<polygon points="{},{} {},{} {},{}" fill="{}"/>"#,
        fmt(points[0].0),
        fmt(points[0].1),
        fmt(points[1].0),
        fmt(points[1].1),
        fmt(points[2].0),
        fmt(points[2].1),
        color,
    );
}

/// Label with a white rounded backing rect, used on edges and messages.
pub(super) fn backed_label(out: &mut String, x: f64, y: f64, label: &str, anchor: &str) {
    let width = (label.chars().count() as f64 * 7.0 + 12.0).max(30.0);
    let rect_x = if anchor == "start" { x - 6.0 } else { x - width / 2.0 };
    let _ = write!(
        out,
        r##"<rect x="{}" y="{}" width="{}" height="20.0" rx="3.0" fill="#ffffff" fill-opacity="0.9"/>"##,
        fmt(rect_x),
        fmt(y - 10.0),
        fmt(width),
    );
    let _ = write!(
        out,
        r##"<text x="{}" y="{}" font-size="12.0" text-anchor="{}" dominant-baseline="middle" fill="#333333">{}</text>"##,
        fmt(x),
        fmt(y),
        anchor,
        escape_xml(label),
    );
}

/// Centred, possibly wrapped label (nodes and participant boxes).
pub(super) fn centered_label(
    out: &mut String,
    cx: f64,
    cy: f64,
    label: &str,
    color: &str,
    font_size: f64,
) {
    let lines = crate::text::wrap_label(label);
    if lines.len() == 1 {
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="middle" fill="{}">{}</text>"#,
            fmt(cx),
            fmt(cy),
            fmt(font_size),
            color,
            escape_xml(&lines[0]),
        );
        return;
    }

    let line_height = 1.3 * font_size;
    let start_y = cy - (lines.len() - 1) as f64 * line_height / 2.0;
    let _ = write!(
        out,
        r#"<text font-size="{}" text-anchor="middle" dominant-baseline="middle" fill="{}">"#,
        fmt(font_size),
        color,
    );
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            let _ = write!(
                out,
                r#"<tspan x="{}" y="{}">{}</tspan>"#,
                fmt(cx),
                fmt(start_y),
                escape_xml(line),
            );
        } else {
            let _ = write!(
                out,
                r#"<tspan x="{}" dy="{}">{}</tspan>"#,
                fmt(cx),
                fmt(line_height),
                escape_xml(line),
            );
        }
    }
    out.push_str("</text>");
}
