use sketchflow_core::DiagramDef;
use sketchflow_render::{layout_diagram, render_svg, DiagramLayout};
use serde_json::json;

fn diagram(raw: serde_json::Value) -> DiagramDef {
    sketchflow_core::parse(&raw).unwrap()
}

fn handshake() -> DiagramDef {
    diagram(json!({
        "type": "sequence",
        "title": "Handshake",
        "participants": [
            {"id": "cli", "label": "Client"},
            {"id": "srv", "label": "Server"},
        ],
        "messages": [
            {"from": "cli", "to": "srv", "label": "hello"},
            {"from": "srv", "to": "cli", "label": "ack", "style": "dashed"},
        ],
    }))
}

#[test]
fn participants_keep_their_input_order_along_x() {
    let DiagramLayout::Sequence(layout) = layout_diagram(&handshake()).unwrap() else {
        panic!("expected sequence layout");
    };
    let xs: Vec<f64> = layout.participants.iter().map(|p| p.x).collect();
    for pair in xs.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn message_ys_are_monotonically_non_decreasing() {
    let DiagramLayout::Sequence(layout) = layout_diagram(&handshake()).unwrap() else {
        panic!("expected sequence layout");
    };
    let ys: Vec<f64> = layout.messages.iter().map(|m| m.y).collect();
    for pair in ys.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn handshake_renders_boxes_lifelines_and_labels() {
    let svg = render_svg(&handshake()).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("Handshake"));
    assert!(svg.contains("Client"));
    assert!(svg.contains("Server"));
    assert!(svg.contains("hello"));
    assert!(svg.contains("ack"));
    // The reply is dashed; lifelines carry their own dash pattern.
    assert!(svg.contains(r#"stroke-dasharray="8,4""#));
    assert!(svg.contains(r#"stroke-dasharray="6,4""#));
    // Participant boxes are drawn twice (top and bottom).
    assert_eq!(svg.matches(r#"<g class="participant" data-id="cli">"#).count(), 2);
}

#[test]
fn self_message_renders_a_loop_with_its_label_to_the_right() {
    let def = diagram(json!({
        "type": "sequence",
        "participants": [{"id": "svc", "label": "Service"}],
        "messages": [{"from": "svc", "to": "svc", "label": "tick"}],
    }));
    let svg = render_svg(&def).unwrap();
    assert!(svg.contains(r#"<g class="message" data-from="svc" data-to="svc">"#));
    assert!(svg.contains("tick"));
    assert!(svg.contains(r#"text-anchor="start""#));

    let DiagramLayout::Sequence(layout) = layout_diagram(&def).unwrap() else {
        panic!("expected sequence layout");
    };
    assert!(layout.messages[0].self_message);
}

#[test]
fn messages_with_unknown_participants_are_skipped() {
    let svg = render_svg(&diagram(json!({
        "type": "sequence",
        "participants": [{"id": "a", "label": "A"}],
        "messages": [{"from": "a", "to": "ghost", "label": "lost"}],
    })))
    .unwrap();
    assert!(!svg.contains(r#"<g class="message""#));
    assert!(!svg.contains("lost"));
}

#[test]
fn sequence_output_is_deterministic() {
    let def = handshake();
    let first = render_svg(&def).unwrap();
    let second = render_svg(&def).unwrap();
    assert_eq!(first, second);
}

#[test]
fn clean_sequence_uses_native_rects() {
    let svg = render_svg(&diagram(json!({
        "type": "sequence",
        "style": "clean",
        "participants": [{"id": "a", "label": "A"}],
    })))
    .unwrap();
    assert!(svg.contains("<rect"));
    assert!(svg.contains("<line"));
}

#[test]
fn participant_palette_follows_input_order() {
    let svg = render_svg(&diagram(json!({
        "type": "sequence",
        "style": "clean",
        "participants": [
            {"id": "a", "label": "A"},
            {"id": "b", "label": "B"},
        ],
    })))
    .unwrap();
    assert!(svg.contains(r##"fill="#4ecdc4""##));
    assert!(svg.contains(r##"fill="#ff6b6b""##));
}
