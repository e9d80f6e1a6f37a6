//! Sequence diagram rendering: lifelines, participant boxes at both ends,
//! horizontal messages and right-hand self-message loops.
//!
//! Draw order (part of the deterministic random stream): lifelines, top
//! boxes, bottom boxes, then messages in input order.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;

use sketchflow_core::color::{darken, palette_color, DEFAULT_TEXT_COLOR};

use super::edges::dash_pattern;
use super::sketch::{arrowhead, backed_label, centered_label, sketchy_line, themed_rect, Stroke};
use super::escape_xml;
use crate::model::{SequenceLayoutResult, SequenceMessage, SequenceParticipant};
use crate::rng::SketchRng;
use crate::sequence::PARTICIPANT_BOX_HEIGHT;
use crate::theme::ThemeConfig;

const LIFELINE_COLOR: &str = "#999999";
const LIFELINE_DASH: &str = "6,4";
const DEFAULT_MESSAGE_COLOR: &str = "#333333";
const PARTICIPANT_FONT_SIZE: f64 = 13.0;
const SELF_LOOP_WIDTH: f64 = 30.0;
const SELF_LOOP_HEIGHT: f64 = 20.0;

pub(super) fn render_sequence_body(
    out: &mut String,
    layout: &SequenceLayoutResult,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    let lifeline_stroke = Stroke {
        color: LIFELINE_COLOR,
        width: theme.stroke_width,
        dash: Some(LIFELINE_DASH),
    };
    for p in &layout.participants {
        sketchy_line(
            out,
            (p.x, layout.top_y + PARTICIPANT_BOX_HEIGHT),
            (p.x, layout.lifeline_bottom),
            &lifeline_stroke,
            theme,
            rng,
        );
    }

    for (index, p) in layout.participants.iter().enumerate() {
        participant_box(out, p, index, layout.top_y, theme, rng);
    }
    for (index, p) in layout.participants.iter().enumerate() {
        participant_box(out, p, index, layout.lifeline_bottom, theme, rng);
    }

    let by_id: FxHashMap<&str, &SequenceParticipant> = layout
        .participants
        .iter()
        .map(|p| (p.id.as_str(), p))
        .collect();
    for msg in &layout.messages {
        // Messages naming unknown participants are skipped.
        let (Some(from), Some(to)) = (by_id.get(msg.from.as_str()), by_id.get(msg.to.as_str()))
        else {
            continue;
        };
        let _ = write!(
            out,
            r#"<g class="message" data-from="{}" data-to="{}">"#,
            escape_xml(&msg.from),
            escape_xml(&msg.to),
        );
        if msg.self_message {
            self_message(out, msg, from, theme, rng);
        } else {
            normal_message(out, msg, from, to, theme, rng);
        }
        out.push_str("</g>");
    }
}

fn participant_box(
    out: &mut String,
    p: &SequenceParticipant,
    index: usize,
    top: f64,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    let fill = p
        .color
        .clone()
        .unwrap_or_else(|| palette_color(index).to_string());
    let stroke_color = darken(&fill, 0.3);
    let stroke = Stroke {
        color: &stroke_color,
        width: theme.stroke_width,
        dash: None,
    };

    let _ = write!(
        out,
        r#"<g class="participant" data-id="{}">"#,
        escape_xml(&p.id)
    );
    themed_rect(
        out,
        p.x - p.width / 2.0,
        top,
        p.width,
        PARTICIPANT_BOX_HEIGHT,
        &fill,
        &stroke,
        theme.fill_opacity,
        theme,
        rng,
    );
    centered_label(
        out,
        p.x,
        top + PARTICIPANT_BOX_HEIGHT / 2.0,
        &p.label,
        DEFAULT_TEXT_COLOR,
        PARTICIPANT_FONT_SIZE,
    );
    out.push_str("</g>");
}

fn normal_message(
    out: &mut String,
    msg: &SequenceMessage,
    from: &SequenceParticipant,
    to: &SequenceParticipant,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    let color = msg.color.as_deref().unwrap_or(DEFAULT_MESSAGE_COLOR);
    let stroke = Stroke {
        color,
        width: theme.stroke_width,
        dash: dash_pattern(msg.style),
    };
    sketchy_line(out, (from.x, msg.y), (to.x, msg.y), &stroke, theme, rng);
    arrowhead(out, (to.x, msg.y), (from.x, msg.y), color, theme, rng);
    if !msg.label.is_empty() {
        backed_label(out, (from.x + to.x) / 2.0, msg.y - 8.0, &msg.label, "middle");
    }
}

fn self_message(
    out: &mut String,
    msg: &SequenceMessage,
    p: &SequenceParticipant,
    theme: &ThemeConfig,
    rng: &mut SketchRng,
) {
    let color = msg.color.as_deref().unwrap_or(DEFAULT_MESSAGE_COLOR);
    let stroke = Stroke {
        color,
        width: theme.stroke_width,
        dash: dash_pattern(msg.style),
    };
    let (x, y) = (p.x, msg.y);
    let points = [
        (x, y),
        (x + SELF_LOOP_WIDTH, y),
        (x + SELF_LOOP_WIDTH, y + SELF_LOOP_HEIGHT),
        (x, y + SELF_LOOP_HEIGHT),
    ];
    for pair in points.windows(2) {
        sketchy_line(out, pair[0], pair[1], &stroke, theme, rng);
    }
    // Return leg points back at the lifeline.
    arrowhead(
        out,
        (x, y + SELF_LOOP_HEIGHT),
        (x + SELF_LOOP_WIDTH, y + SELF_LOOP_HEIGHT),
        color,
        theme,
        rng,
    );
    if !msg.label.is_empty() {
        backed_label(
            out,
            x + SELF_LOOP_WIDTH + 8.0,
            y + SELF_LOOP_HEIGHT / 2.0,
            &msg.label,
            "start",
        );
    }
}
