//! The declarative diagram builder.
//!
//! A [`Diagram`] collects node, group, and edge declarations and renders them
//! once via [`Diagram::finalize`]. The handle replaces the implicit "current
//! diagram" context found in diagram-as-code tools: every call is explicit,
//! and group scoping is enforced at runtime in strict last-opened-first-closed
//! order.
//!
//! References ([`NodeRef`], [`GroupRef`]) are only meaningful within the
//! build that issued them; edges are bounds-checked against the current build
//! when declared.

use std::path::{Path, PathBuf};

use log::{debug, info, trace};

use crate::{
    config::RenderOptions,
    error::DiagramError,
    export,
    taxonomy::NodeKind,
};

/// Reference to a node declared in a diagram build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(pub(crate) usize);

/// Reference to a group declared in a diagram build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupRef(pub(crate) usize);

/// A declared node: its kind, display label, and enclosing group.
#[derive(Debug)]
pub(crate) struct NodeDecl {
    pub(crate) kind: NodeKind,
    pub(crate) label: String,
    pub(crate) group: Option<GroupRef>,
}

/// A declared group: its label and parent in the containment tree.
///
/// `parent == None` means the group sits directly under the diagram root.
#[derive(Debug)]
pub(crate) struct GroupDecl {
    pub(crate) label: String,
    pub(crate) parent: Option<GroupRef>,
}

/// A declared edge between two nodes.
#[derive(Debug)]
pub(crate) struct EdgeDecl {
    pub(crate) source: NodeRef,
    pub(crate) target: NodeRef,
    pub(crate) directed: bool,
    pub(crate) label: Option<String>,
}

/// Style of a connection: direction and optional text label.
///
/// The default link is directed and unlabeled.
#[derive(Debug, Clone)]
pub struct Link {
    pub(crate) directed: bool,
    pub(crate) label: Option<String>,
}

impl Link {
    /// A directed, unlabeled link.
    pub fn directed() -> Self {
        Self {
            directed: true,
            label: None,
        }
    }

    /// An undirected, unlabeled link.
    pub fn undirected() -> Self {
        Self {
            directed: false,
            label: None,
        }
    }

    /// Attaches a text label to the link.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for Link {
    fn default() -> Self {
        Self::directed()
    }
}

/// One endpoint of a connection: a single node or an ordered collection.
///
/// Collections are fan-out/fan-in sugar; when both endpoints are collections
/// the connection expands to the full cross-product of pairings.
#[derive(Debug, Clone)]
pub enum Endpoints {
    One(NodeRef),
    Many(Vec<NodeRef>),
}

impl Endpoints {
    fn refs(&self) -> &[NodeRef] {
        match self {
            Endpoints::One(node) => std::slice::from_ref(node),
            Endpoints::Many(nodes) => nodes,
        }
    }
}

impl From<NodeRef> for Endpoints {
    fn from(node: NodeRef) -> Self {
        Endpoints::One(node)
    }
}

impl From<Vec<NodeRef>> for Endpoints {
    fn from(nodes: Vec<NodeRef>) -> Self {
        Endpoints::Many(nodes)
    }
}

impl From<&[NodeRef]> for Endpoints {
    fn from(nodes: &[NodeRef]) -> Self {
        Endpoints::Many(nodes.to_vec())
    }
}

impl<const N: usize> From<[NodeRef; N]> for Endpoints {
    fn from(nodes: [NodeRef; N]) -> Self {
        Endpoints::Many(nodes.to_vec())
    }
}

/// A diagram build in progress.
///
/// Created by [`Diagram::begin`], populated by declaration calls, and
/// consumed by [`Diagram::finalize`]. After finalization every further call
/// fails with [`DiagramError::DiagramClosed`].
#[derive(Debug)]
pub struct Diagram {
    title: String,
    options: RenderOptions,
    nodes: Vec<NodeDecl>,
    groups: Vec<GroupDecl>,
    edges: Vec<EdgeDecl>,
    open_groups: Vec<GroupRef>,
    closed: bool,
}

impl Diagram {
    /// Opens a new diagram build.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Configuration`] when the directory of the
    /// configured output path does not exist, so that a doomed build fails
    /// before any declaration work happens.
    pub fn begin(title: impl Into<String>, options: RenderOptions) -> Result<Self, DiagramError> {
        let title = title.into();

        let destination = output_directory(options.output_path());
        if !destination.is_dir() {
            return Err(DiagramError::Configuration(format!(
                "output directory {} does not exist or is not a directory",
                destination.display()
            )));
        }

        info!(title; "Opening diagram");

        Ok(Self {
            title,
            options,
            nodes: Vec::new(),
            groups: Vec::new(),
            edges: Vec::new(),
            open_groups: Vec::new(),
            closed: false,
        })
    }

    /// Registers a node of the given kind inside the innermost open group.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::DiagramClosed`] after finalization.
    pub fn add(&mut self, kind: NodeKind, label: impl Into<String>) -> Result<NodeRef, DiagramError> {
        self.ensure_open()?;

        let label = label.into();
        let group = self.open_groups.last().copied();
        trace!(kind:? = kind, label; "Declaring node");

        self.nodes.push(NodeDecl { kind, label, group });
        Ok(NodeRef(self.nodes.len() - 1))
    }

    /// Registers a node from its category string.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnknownCategory`] for a category outside the
    /// supported taxonomy; nothing is registered in that case.
    pub fn add_node(&mut self, category: &str, label: impl Into<String>) -> Result<NodeRef, DiagramError> {
        self.ensure_open()?;
        let kind: NodeKind = category.parse()?;
        self.add(kind, label)
    }

    /// Opens a nested group; nodes declared until the matching
    /// [`close_group`](Self::close_group) call land inside it.
    pub fn open_group(&mut self, label: impl Into<String>) -> Result<GroupRef, DiagramError> {
        self.ensure_open()?;

        let label = label.into();
        let parent = self.open_groups.last().copied();
        trace!(label; "Opening group");

        self.groups.push(GroupDecl { label, parent });
        let group = GroupRef(self.groups.len() - 1);
        self.open_groups.push(group);
        Ok(group)
    }

    /// Closes the innermost open group.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnbalancedGroup`] when no group is open.
    pub fn close_group(&mut self) -> Result<(), DiagramError> {
        self.ensure_open()?;

        match self.open_groups.pop() {
            Some(group) => {
                trace!(label = self.groups[group.0].label; "Closing group");
                Ok(())
            }
            None => Err(DiagramError::UnbalancedGroup(
                "close_group called with no open group".to_string(),
            )),
        }
    }

    /// Records one edge per pairing of `source` and `target` endpoints.
    ///
    /// Single refs and collections may be mixed freely; two collections expand
    /// to their full cross-product. Duplicate edges and cycles are allowed,
    /// this is a drawing rather than a dependency graph.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Configuration`] when an endpoint was not
    /// declared in this build.
    pub fn connect(
        &mut self,
        source: impl Into<Endpoints>,
        target: impl Into<Endpoints>,
        link: Link,
    ) -> Result<(), DiagramError> {
        self.ensure_open()?;

        let source = source.into();
        let target = target.into();

        for node in source.refs().iter().chain(target.refs()) {
            self.check_ref(*node)?;
        }

        for &from in source.refs() {
            for &to in target.refs() {
                self.edges.push(EdgeDecl {
                    source: from,
                    target: to,
                    directed: link.directed,
                    label: link.label.clone(),
                });
            }
        }

        trace!(edges_total = self.edges.len(); "Recorded connection");
        Ok(())
    }

    /// Lays out the accumulated graph and writes the rendered PNG.
    ///
    /// The handle is consumed: any further call, including a second
    /// `finalize`, fails with [`DiagramError::DiagramClosed`] and leaves the
    /// written file untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnbalancedGroup`] when groups are still open,
    /// and [`DiagramError::Render`] when the layout engine fails. No partial
    /// output file is left behind on failure.
    pub fn finalize(&mut self) -> Result<PathBuf, DiagramError> {
        self.finish_declarations()?;

        info!(
            title = self.title,
            nodes = self.nodes.len(),
            groups = self.groups.len(),
            edges = self.edges.len();
            "Rendering diagram"
        );

        let graph = export::dot::to_dot(self);
        let output = export::write_png(graph, &self.options)?;

        debug!(output = output.display().to_string(); "Diagram rendered");
        Ok(output)
    }

    /// Returns the number of declared nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of declared groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the number of recorded edges, after fan-out expansion.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the render options for this build.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn nodes(&self) -> &[NodeDecl] {
        &self.nodes
    }

    pub(crate) fn groups(&self) -> &[GroupDecl] {
        &self.groups
    }

    pub(crate) fn edges(&self) -> &[EdgeDecl] {
        &self.edges
    }

    /// Validates group balance and consumes the handle.
    fn finish_declarations(&mut self) -> Result<(), DiagramError> {
        self.ensure_open()?;

        if !self.open_groups.is_empty() {
            return Err(DiagramError::UnbalancedGroup(format!(
                "{} group(s) still open at finalize",
                self.open_groups.len()
            )));
        }

        self.closed = true;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), DiagramError> {
        if self.closed {
            Err(DiagramError::DiagramClosed)
        } else {
            Ok(())
        }
    }

    fn check_ref(&self, node: NodeRef) -> Result<(), DiagramError> {
        if node.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(DiagramError::Configuration(format!(
                "edge endpoint {node:?} was not declared in this diagram",
            )))
        }
    }
}

/// Directory the output file will land in; an empty parent means the
/// current working directory.
fn output_directory(output_path: &Path) -> &Path {
    match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
