use wapiti::{Config, Direction, Edge, Graph, Node, layout};

fn pos(graph: &Graph, id: &str) -> (f64, f64, f64, f64) {
    fn find(nodes: &[Node], id: &str) -> Option<(f64, f64, f64, f64)> {
        for n in nodes {
            if n.id == id {
                return Some((n.x, n.y, n.width, n.height));
            }
            if let Some(found) = find(&n.children, id) {
                return Some(found);
            }
        }
        None
    }
    find(&graph.children, id).unwrap()
}

#[test]
fn layout_places_a_single_node_at_the_origin() {
    let mut g = Graph {
        children: vec![Node::leaf("a", 120.0, 60.0)],
        ..Graph::default()
    };
    layout(&mut g).unwrap();
    assert_eq!(pos(&g, "a"), (0.0, 0.0, 120.0, 60.0));
    assert_eq!((g.width, g.height), (120.0, 60.0));
}

#[test]
fn layout_stacks_connected_nodes_into_ranks() {
    let mut g = Graph {
        children: vec![Node::leaf("a", 120.0, 60.0), Node::leaf("b", 120.0, 60.0)],
        edges: vec![Edge::new("e1", "a", "b")],
        ..Graph::default()
    };
    layout(&mut g).unwrap();
    assert_eq!(pos(&g, "a"), (0.0, 0.0, 120.0, 60.0));
    // One layer gap (80) below the 60-high first rank.
    assert_eq!(pos(&g, "b"), (0.0, 140.0, 120.0, 60.0));

    let section = &g.edges[0].sections[0];
    assert_eq!((section.start_point.x, section.start_point.y), (60.0, 60.0));
    assert_eq!((section.end_point.x, section.end_point.y), (60.0, 140.0));
    assert!(section.bend_points.is_empty());
}

#[test]
fn layout_separates_same_rank_nodes_by_node_spacing() {
    let mut g = Graph {
        children: vec![Node::leaf("a", 120.0, 60.0), Node::leaf("b", 200.0, 60.0)],
        ..Graph::default()
    };
    layout(&mut g).unwrap();
    assert_eq!(pos(&g, "a").0, 0.0);
    assert_eq!(pos(&g, "b").0, 170.0);
    assert_eq!(g.width, 370.0);
}

#[test]
fn layout_bends_edges_between_offset_nodes_orthogonally() {
    let mut g = Graph {
        children: vec![
            Node::leaf("a", 120.0, 60.0),
            Node::leaf("b", 120.0, 60.0),
            Node::leaf("c", 120.0, 60.0),
        ],
        edges: vec![Edge::new("e1", "a", "b"), Edge::new("e2", "a", "c")],
        ..Graph::default()
    };
    layout(&mut g).unwrap();

    let section = &g.edges[1].sections[0];
    assert_eq!(section.bend_points.len(), 2);
    // Both bends sit on the midpoint Y between the two ranks.
    let mid_y = (section.start_point.y + section.end_point.y) / 2.0;
    assert_eq!(section.bend_points[0].y, mid_y);
    assert_eq!(section.bend_points[1].y, mid_y);
    assert_eq!(section.bend_points[0].x, section.start_point.x);
    assert_eq!(section.bend_points[1].x, section.end_point.x);
}

#[test]
fn layout_wraps_container_members_with_padding() {
    let mut g = Graph {
        children: vec![Node::container(
            "g1",
            30.0,
            vec![Node::leaf("a", 120.0, 60.0), Node::leaf("b", 120.0, 60.0)],
        )],
        ..Graph::default()
    };
    layout(&mut g).unwrap();

    assert_eq!(pos(&g, "g1"), (0.0, 0.0, 350.0, 120.0));
    // Children are relative to the container frame.
    assert_eq!(pos(&g, "a"), (30.0, 30.0, 120.0, 60.0));
    assert_eq!(pos(&g, "b"), (200.0, 30.0, 120.0, 60.0));
    assert_eq!((g.width, g.height), (350.0, 120.0));
}

#[test]
fn layout_adds_container_padding_to_boundary_gaps() {
    let mut g = Graph {
        children: vec![
            Node::leaf("r", 120.0, 60.0),
            Node::container("g1", 30.0, vec![Node::leaf("a", 120.0, 60.0)]),
        ],
        ..Graph::default()
    };
    layout(&mut g).unwrap();

    let (rx, _, rw, _) = pos(&g, "r");
    let (gx, _, _, _) = pos(&g, "g1");
    // The frame's left edge clears the root node by the node spacing.
    assert_eq!(gx - (rx + rw), 50.0);
}

#[test]
fn layout_transposes_coordinates_for_right_direction() {
    let mut g = Graph {
        config: Config {
            direction: Direction::Right,
            ..Config::default()
        },
        children: vec![Node::leaf("a", 120.0, 60.0), Node::leaf("b", 120.0, 60.0)],
        edges: vec![Edge::new("e1", "a", "b")],
        ..Graph::default()
    };
    layout(&mut g).unwrap();

    let (ax, ay, aw, ah) = pos(&g, "a");
    let (bx, by, ..) = pos(&g, "b");
    assert_eq!((aw, ah), (120.0, 60.0));
    assert_eq!(ay, by);
    assert!(bx > ax, "target should be placed to the right of the source");
}

#[test]
fn layout_flips_the_main_axis_for_up_direction() {
    let mut g = Graph {
        config: Config {
            direction: Direction::Up,
            ..Config::default()
        },
        children: vec![Node::leaf("a", 120.0, 60.0), Node::leaf("b", 120.0, 60.0)],
        edges: vec![Edge::new("e1", "a", "b")],
        ..Graph::default()
    };
    layout(&mut g).unwrap();
    assert!(
        pos(&g, "a").1 > pos(&g, "b").1,
        "source should end up below the target"
    );
}

#[test]
fn layout_routes_self_loops_beside_the_node() {
    let mut g = Graph {
        children: vec![Node::leaf("a", 120.0, 60.0)],
        edges: vec![Edge::new("e1", "a", "a")],
        ..Graph::default()
    };
    layout(&mut g).unwrap();

    let section = &g.edges[0].sections[0];
    let right_edge = 120.0;
    for bend in &section.bend_points {
        assert!(bend.x > right_edge);
    }
    assert!(g.width > right_edge);
}

#[test]
fn layout_leaves_unroutable_edges_without_sections() {
    let mut g = Graph {
        children: vec![Node::leaf("a", 120.0, 60.0)],
        edges: vec![Edge::new("e1", "a", "ghost")],
        ..Graph::default()
    };
    layout(&mut g).unwrap();
    assert!(g.edges[0].sections.is_empty());
}

#[test]
fn layout_rejects_duplicate_node_ids() {
    let mut g = Graph {
        children: vec![Node::leaf("a", 120.0, 60.0), Node::leaf("a", 120.0, 60.0)],
        ..Graph::default()
    };
    assert!(layout(&mut g).is_err());
}

#[test]
fn layout_keeps_ranks_monotone_along_edges() {
    let mut g = Graph {
        children: vec![
            Node::leaf("a", 120.0, 60.0),
            Node::leaf("b", 120.0, 60.0),
            Node::leaf("c", 120.0, 60.0),
        ],
        edges: vec![Edge::new("e1", "a", "b"), Edge::new("e2", "b", "c")],
        ..Graph::default()
    };
    layout(&mut g).unwrap();
    assert!(pos(&g, "a").1 < pos(&g, "b").1);
    assert!(pos(&g, "b").1 < pos(&g, "c").1);
}
