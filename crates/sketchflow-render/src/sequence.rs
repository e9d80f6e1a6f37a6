//! Sequence diagram layout: participants along X, messages along Y.
//!
//! No layout service involved, just cursor arithmetic.

use sketchflow_core::SequenceDiagramDef;

use crate::model::{SequenceLayoutResult, SequenceMessage, SequenceParticipant};
use crate::Result;

pub const PADDING: f64 = 40.0;
pub const PARTICIPANT_BOX_HEIGHT: f64 = 40.0;
const PARTICIPANT_GAP: f64 = 60.0;
const MIN_BOX_WIDTH: f64 = 100.0;
const CHAR_WIDTH_PX: f64 = 10.0;
const LABEL_PADDING: f64 = 40.0;
const TITLE_HEIGHT: f64 = 40.0;
const MESSAGE_SPACING: f64 = 50.0;
const SELF_MESSAGE_EXTRA: f64 = 30.0;
const LIFELINE_BOTTOM_PADDING: f64 = 40.0;

pub fn layout_sequence(def: &SequenceDiagramDef) -> Result<SequenceLayoutResult> {
    let top_y = PADDING + if def.title.is_some() { TITLE_HEIGHT } else { 0.0 };

    let mut participants: Vec<SequenceParticipant> = Vec::with_capacity(def.participants.len());
    let mut cursor_x = PADDING;
    for p in &def.participants {
        let width = (p.label.chars().count() as f64 * CHAR_WIDTH_PX + LABEL_PADDING)
            .max(MIN_BOX_WIDTH);
        participants.push(SequenceParticipant {
            id: p.id.clone(),
            label: p.label.clone(),
            x: cursor_x + width / 2.0,
            width,
            color: p.color.clone(),
        });
        cursor_x += width + PARTICIPANT_GAP;
    }
    let right_edge = cursor_x - PARTICIPANT_GAP;

    let mut messages: Vec<SequenceMessage> = Vec::with_capacity(def.messages.len());
    let mut y = top_y + PARTICIPANT_BOX_HEIGHT + MESSAGE_SPACING;
    let mut last: Option<(f64, bool)> = None;
    for m in &def.messages {
        let self_message = m.is_self_message();
        messages.push(SequenceMessage {
            from: m.from.clone(),
            to: m.to.clone(),
            label: m.label.clone(),
            style: m.style,
            color: m.color.clone(),
            y,
            self_message,
        });
        last = Some((y, self_message));
        y += if self_message {
            MESSAGE_SPACING + SELF_MESSAGE_EXTRA
        } else {
            MESSAGE_SPACING
        };
    }

    let last_extent = match last {
        Some((last_y, true)) => last_y + SELF_MESSAGE_EXTRA,
        Some((last_y, false)) => last_y,
        None => f64::NEG_INFINITY,
    };
    let lifeline_bottom =
        last_extent.max(top_y + PARTICIPANT_BOX_HEIGHT) + LIFELINE_BOTTOM_PADDING;

    Ok(SequenceLayoutResult {
        width: right_edge + PADDING,
        height: lifeline_bottom + PADDING,
        top_y,
        lifeline_bottom,
        participants,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchflow_core::{EdgeStyle, MessageDef, ParticipantDef, SequenceDiagramDef, Theme};

    fn participant(id: &str, label: &str) -> ParticipantDef {
        ParticipantDef {
            id: id.to_string(),
            label: label.to_string(),
            color: None,
        }
    }

    fn message(from: &str, to: &str, label: &str) -> MessageDef {
        MessageDef {
            from: from.to_string(),
            to: to.to_string(),
            label: label.to_string(),
            style: EdgeStyle::Solid,
            color: None,
        }
    }

    fn diagram(
        participants: Vec<ParticipantDef>,
        messages: Vec<MessageDef>,
    ) -> SequenceDiagramDef {
        SequenceDiagramDef {
            title: None,
            participants,
            messages,
            style: Theme::HandDrawn,
        }
    }

    #[test]
    fn participants_advance_left_to_right() {
        let def = diagram(
            vec![participant("a", "A"), participant("b", "B")],
            Vec::new(),
        );
        let layout = layout_sequence(&def).unwrap();
        // Both labels are short, so both boxes take the minimum width.
        assert_eq!(layout.participants[0].x, 90.0);
        assert_eq!(layout.participants[1].x, 250.0);
        assert_eq!(layout.width, 340.0);
    }

    #[test]
    fn long_labels_widen_the_box() {
        let def = diagram(
            vec![participant("gw", "Authentication Gateway")],
            Vec::new(),
        );
        let layout = layout_sequence(&def).unwrap();
        // 22 chars * 10 + 40 = 260.
        assert_eq!(layout.participants[0].width, 260.0);
    }

    #[test]
    fn message_ys_step_by_spacing() {
        let def = diagram(
            vec![participant("a", "A"), participant("b", "B")],
            vec![message("a", "b", "one"), message("b", "a", "two")],
        );
        let layout = layout_sequence(&def).unwrap();
        assert_eq!(layout.messages[0].y, 130.0);
        assert_eq!(layout.messages[1].y, 180.0);
        assert_eq!(layout.lifeline_bottom, 220.0);
    }

    #[test]
    fn self_messages_reserve_extra_height() {
        let def = diagram(
            vec![participant("svc", "Service")],
            vec![message("svc", "svc", "tick"), message("svc", "svc", "tock")],
        );
        let layout = layout_sequence(&def).unwrap();
        assert!(layout.messages[0].self_message);
        assert_eq!(layout.messages[1].y - layout.messages[0].y, 80.0);
        // The trailing loop extends below the last message y.
        assert_eq!(layout.lifeline_bottom, layout.messages[1].y + 30.0 + 40.0);
    }

    #[test]
    fn title_shifts_the_top_down() {
        let mut def = diagram(vec![participant("a", "A")], Vec::new());
        let untitled = layout_sequence(&def).unwrap();
        def.title = Some("Handshake".to_string());
        let titled = layout_sequence(&def).unwrap();
        assert_eq!(titled.top_y - untitled.top_y, 40.0);
    }

    #[test]
    fn empty_message_list_still_leaves_a_lifeline() {
        let def = diagram(vec![participant("a", "A")], Vec::new());
        let layout = layout_sequence(&def).unwrap();
        assert_eq!(layout.lifeline_bottom, 40.0 + 40.0 + 40.0);
        // The bottom participant boxes sit inside the canvas padding.
        assert_eq!(layout.height, layout.lifeline_bottom + 40.0);
    }
}
