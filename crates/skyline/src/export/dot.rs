//! Serialization of a diagram build into the Graphviz DOT AST.
//!
//! The builder does no placement of its own; this module's only job is to
//! translate the declared nodes, groups, and edges into a `digraph` that the
//! external `dot` engine can lay out. Groups become `cluster_N` subgraphs,
//! undirected edges become `dir=none`, and node styling comes from the kind
//! taxonomy.

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Stmt, Subgraph, Vertex,
};
use indexmap::IndexMap;

use crate::diagram::{Diagram, EdgeDecl, GroupRef};

/// Cluster background colors, cycled by nesting depth.
const GROUP_FILLS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

const FONT_NAME: &str = "Sans-Serif";

/// Builds the DOT graph for a finished set of declarations.
pub(crate) fn to_dot(diagram: &Diagram) -> Graph {
    let mut nodes_by_group: IndexMap<Option<GroupRef>, Vec<usize>> = IndexMap::new();
    for (index, node) in diagram.nodes().iter().enumerate() {
        nodes_by_group.entry(node.group).or_default().push(index);
    }

    let mut groups_by_parent: IndexMap<Option<GroupRef>, Vec<usize>> = IndexMap::new();
    for (index, group) in diagram.groups().iter().enumerate() {
        groups_by_parent.entry(group.parent).or_default().push(index);
    }

    let mut stmts = graph_attributes(diagram);
    stmts.extend(level_stmts(
        diagram,
        &nodes_by_group,
        &groups_by_parent,
        None,
        0,
    ));
    stmts.extend(diagram.edges().iter().map(edge_stmt));

    Graph::DiGraph {
        id: Id::Plain("skyline".to_string()),
        strict: false,
        stmts,
    }
}

/// Graph, node, and edge defaults. The graph-level values mirror the render
/// options; the rest is the house style shared by every diagram.
fn graph_attributes(diagram: &Diagram) -> Vec<Stmt> {
    let options = diagram.options();

    vec![
        Stmt::Attribute(attr("label", quoted(diagram.title()))),
        Stmt::Attribute(attr("labelloc", plain("t"))),
        Stmt::Attribute(attr("fontsize", plain(options.font_size()))),
        Stmt::Attribute(attr("fontname", quoted(FONT_NAME))),
        Stmt::Attribute(attr("fontcolor", quoted("#2D3436"))),
        Stmt::Attribute(attr("pad", plain(options.pad()))),
        Stmt::Attribute(attr("rankdir", plain(options.direction().rankdir()))),
        Stmt::Attribute(attr("splines", plain("ortho"))),
        Stmt::Attribute(attr("nodesep", plain(0.6))),
        Stmt::Attribute(attr("ranksep", plain(0.75))),
        Stmt::GAttribute(GraphAttributes::Node(vec![
            attr("shape", plain("box")),
            attr("style", quoted("rounded,filled")),
            attr("fontname", quoted(FONT_NAME)),
            attr("fontsize", plain(13)),
        ])),
        Stmt::GAttribute(GraphAttributes::Edge(vec![
            attr("color", quoted("#7B8894")),
            attr("fontname", quoted(FONT_NAME)),
            attr("fontsize", plain(11)),
        ])),
    ]
}

/// Emits the nodes and subgraphs directly under `parent`, recursing into
/// nested groups. `parent == None` is the diagram root.
fn level_stmts(
    diagram: &Diagram,
    nodes_by_group: &IndexMap<Option<GroupRef>, Vec<usize>>,
    groups_by_parent: &IndexMap<Option<GroupRef>, Vec<usize>>,
    parent: Option<GroupRef>,
    depth: usize,
) -> Vec<Stmt> {
    let mut stmts = Vec::new();

    for &index in nodes_by_group.get(&parent).into_iter().flatten() {
        stmts.push(node_stmt(diagram, index));
    }

    for &index in groups_by_parent.get(&parent).into_iter().flatten() {
        let group = &diagram.groups()[index];

        let mut group_stmts = vec![
            Stmt::Attribute(attr("label", quoted(&group.label))),
            Stmt::Attribute(attr("labeljust", plain("l"))),
            Stmt::Attribute(attr("style", quoted("rounded,filled"))),
            Stmt::Attribute(attr("fillcolor", quoted(GROUP_FILLS[depth % GROUP_FILLS.len()]))),
            Stmt::Attribute(attr("pencolor", quoted("#AEB6BE"))),
            Stmt::Attribute(attr("fontsize", plain(12))),
        ];
        group_stmts.extend(level_stmts(
            diagram,
            nodes_by_group,
            groups_by_parent,
            Some(GroupRef(index)),
            depth + 1,
        ));

        stmts.push(Stmt::Subgraph(Subgraph {
            id: Id::Plain(format!("cluster_{index}")),
            stmts: group_stmts,
        }));
    }

    stmts
}

fn node_stmt(diagram: &Diagram, index: usize) -> Stmt {
    let node = &diagram.nodes()[index];

    Stmt::Node(Node {
        id: node_id(index),
        attributes: vec![
            attr("label", quoted(&node.label)),
            attr("shape", plain(node.kind.shape())),
            attr("fillcolor", quoted(node.kind.fill_color())),
            attr("fontcolor", quoted(node.kind.font_color())),
        ],
    })
}

fn edge_stmt(edge: &EdgeDecl) -> Stmt {
    let mut attributes = Vec::new();
    if !edge.directed {
        attributes.push(attr("dir", plain("none")));
    }
    if let Some(label) = &edge.label {
        attributes.push(attr("label", quoted(label)));
    }

    Stmt::Edge(Edge {
        ty: EdgeTy::Pair(
            Vertex::N(node_id(edge.source.0)),
            Vertex::N(node_id(edge.target.0)),
        ),
        attributes,
    })
}

fn node_id(index: usize) -> NodeId {
    NodeId(Id::Plain(format!("node_{index}")), None)
}

fn attr(key: &str, value: Id) -> Attribute {
    Attribute(Id::Plain(key.to_string()), value)
}

fn plain(value: impl ToString) -> Id {
    Id::Plain(value.to_string())
}

/// Quotes and escapes free-form text for use as a DOT attribute value.
/// Literal newlines in labels become `\n` line breaks in the drawing.
fn quoted(text: &str) -> Id {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    Id::Escaped(format!("\"{escaped}\""))
}

#[cfg(test)]
mod tests {
    use crate::{config::Direction, Diagram, Link, NodeKind, RenderOptions};

    use super::*;

    fn count_stmts(stmts: &[Stmt]) -> (usize, usize, usize) {
        let (mut nodes, mut edges, mut subgraphs) = (0, 0, 0);
        for stmt in stmts {
            match stmt {
                Stmt::Node(_) => nodes += 1,
                Stmt::Edge(_) => edges += 1,
                Stmt::Subgraph(subgraph) => {
                    subgraphs += 1;
                    let (n, e, s) = count_stmts(&subgraph.stmts);
                    nodes += n;
                    edges += e;
                    subgraphs += s;
                }
                _ => {}
            }
        }
        (nodes, edges, subgraphs)
    }

    fn stmts(graph: Graph) -> Vec<Stmt> {
        match graph {
            Graph::DiGraph { stmts, .. } => stmts,
            Graph::Graph { stmts, .. } => stmts,
        }
    }

    fn zone_a_diagram() -> Diagram {
        let options = RenderOptions::new("zone-a").with_direction(Direction::TopToBottom);
        let mut d = Diagram::begin("Zone A Scenario", options).unwrap();

        let actor = d.add(NodeKind::GenericActor, "Users").unwrap();
        let gateway = d.add(NodeKind::NetworkGateway, "API Gateway").unwrap();
        d.open_group("Zone A").unwrap();
        let fn1 = d.add(NodeKind::ComputeFunction, "Fn 1").unwrap();
        let fn2 = d.add(NodeKind::ComputeFunction, "Fn 2").unwrap();
        d.close_group().unwrap();
        let db = d.add(NodeKind::ManagedDatabase, "Table").unwrap();

        d.connect(actor, gateway, Link::default()).unwrap();
        d.connect(gateway, [fn1, fn2], Link::default()).unwrap();
        d.connect([fn1, fn2], db, Link::default()).unwrap();

        d
    }

    #[test]
    fn test_counts_survive_serialization() {
        let diagram = zone_a_diagram();
        let (nodes, edges, subgraphs) = count_stmts(&stmts(to_dot(&diagram)));

        assert_eq!(nodes, 5);
        assert_eq!(edges, 5);
        assert_eq!(subgraphs, 1);
    }

    #[test]
    fn test_grouped_nodes_are_emitted_inside_their_cluster() {
        let diagram = zone_a_diagram();
        let stmts = stmts(to_dot(&diagram));

        let subgraph = stmts
            .iter()
            .find_map(|stmt| match stmt {
                Stmt::Subgraph(subgraph) => Some(subgraph),
                _ => None,
            })
            .expect("one cluster expected");

        assert_eq!(subgraph.id, Id::Plain("cluster_0".to_string()));
        let (nodes, _, _) = count_stmts(&subgraph.stmts);
        assert_eq!(nodes, 2);
    }

    #[test]
    fn test_rankdir_follows_direction() {
        let options = RenderOptions::new("lr").with_direction(Direction::LeftToRight);
        let diagram = Diagram::begin("LR", options).unwrap();
        let stmts = stmts(to_dot(&diagram));

        let rankdir = stmts.iter().find_map(|stmt| match stmt {
            Stmt::Attribute(Attribute(key, value)) if *key == Id::Plain("rankdir".to_string()) => {
                Some(value.clone())
            }
            _ => None,
        });
        assert_eq!(rankdir, Some(Id::Plain("LR".to_string())));
    }

    #[test]
    fn test_undirected_labeled_edge_attributes() {
        let mut d = Diagram::begin("repl", RenderOptions::new("repl")).unwrap();
        let a = d.add(NodeKind::ManagedDatabase, "Primary").unwrap();
        let b = d.add(NodeKind::ManagedDatabase, "Secondary").unwrap();
        d.connect(a, b, Link::undirected().with_label("Replication"))
            .unwrap();

        let stmts = stmts(to_dot(&d));
        let edge = stmts
            .iter()
            .find_map(|stmt| match stmt {
                Stmt::Edge(edge) => Some(edge),
                _ => None,
            })
            .expect("one edge expected");

        assert!(edge
            .attributes
            .contains(&Attribute(Id::Plain("dir".to_string()), Id::Plain("none".to_string()))));
        assert!(edge.attributes.contains(&Attribute(
            Id::Plain("label".to_string()),
            Id::Escaped("\"Replication\"".to_string())
        )));
    }

    #[test]
    fn test_multiline_labels_are_escaped() {
        let mut d = Diagram::begin("esc", RenderOptions::new("esc")).unwrap();
        d.add(NodeKind::DnsService, "Route 53\nDNS Failover").unwrap();

        let stmts = stmts(to_dot(&d));
        let node = stmts
            .iter()
            .find_map(|stmt| match stmt {
                Stmt::Node(node) => Some(node),
                _ => None,
            })
            .expect("one node expected");

        assert!(node.attributes.contains(&Attribute(
            Id::Plain("label".to_string()),
            Id::Escaped("\"Route 53\\nDNS Failover\"".to_string())
        )));
    }

    #[test]
    fn test_nested_group_fills_cycle_by_depth() {
        let mut d = Diagram::begin("nest", RenderOptions::new("nest")).unwrap();
        d.open_group("outer").unwrap();
        d.open_group("inner").unwrap();
        d.add(NodeKind::ComputeFunction, "fn").unwrap();
        d.close_group().unwrap();
        d.close_group().unwrap();

        let stmts = stmts(to_dot(&d));
        let outer = stmts
            .iter()
            .find_map(|stmt| match stmt {
                Stmt::Subgraph(subgraph) => Some(subgraph),
                _ => None,
            })
            .expect("outer cluster expected");
        let inner = outer
            .stmts
            .iter()
            .find_map(|stmt| match stmt {
                Stmt::Subgraph(subgraph) => Some(subgraph),
                _ => None,
            })
            .expect("inner cluster expected");

        let fill = |subgraph: &Subgraph| {
            subgraph.stmts.iter().find_map(|stmt| match stmt {
                Stmt::Attribute(Attribute(key, value))
                    if *key == Id::Plain("fillcolor".to_string()) =>
                {
                    Some(value.clone())
                }
                _ => None,
            })
        };

        assert_eq!(fill(outer), Some(Id::Escaped(format!("\"{}\"", GROUP_FILLS[0]))));
        assert_eq!(fill(inner), Some(Id::Escaped(format!("\"{}\"", GROUP_FILLS[1]))));
    }
}
