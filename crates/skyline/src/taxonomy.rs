//! The fixed node taxonomy.
//!
//! Every node in a diagram belongs to one [`NodeKind`]. The kind decides the
//! Graphviz shape and color used when the diagram is rendered, so the same
//! declaration produces a consistent visual vocabulary across diagrams.

use std::{fmt, str::FromStr};

use crate::error::DiagramError;

/// Category of a diagram node.
///
/// The canonical string form (used by [`Diagram::add_node`](crate::Diagram::add_node)
/// and returned by [`Display`](fmt::Display)) is the kebab-case name, e.g.
/// `compute-function`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A human or external system interacting with the architecture.
    GenericActor,
    /// A DNS service routing traffic, possibly with failover.
    DnsService,
    /// An API gateway or similar network entry point.
    NetworkGateway,
    /// A serverless compute function.
    ComputeFunction,
    /// A managed NoSQL or relational table.
    ManagedDatabase,
    /// A metrics, alarms, or dashboard service.
    MonitoringService,
    /// A capacity scaling controller.
    AutoScaling,
    /// A publish/subscribe notification topic.
    NotificationTopic,
    /// An object storage bucket or backup vault.
    ObjectStorage,
}

impl NodeKind {
    /// All supported kinds, in taxonomy order.
    pub const ALL: [NodeKind; 9] = [
        NodeKind::GenericActor,
        NodeKind::DnsService,
        NodeKind::NetworkGateway,
        NodeKind::ComputeFunction,
        NodeKind::ManagedDatabase,
        NodeKind::MonitoringService,
        NodeKind::AutoScaling,
        NodeKind::NotificationTopic,
        NodeKind::ObjectStorage,
    ];

    /// Returns the canonical category string for this kind.
    pub fn category(&self) -> &'static str {
        match self {
            NodeKind::GenericActor => "generic-actor",
            NodeKind::DnsService => "dns",
            NodeKind::NetworkGateway => "network-gateway",
            NodeKind::ComputeFunction => "compute-function",
            NodeKind::ManagedDatabase => "managed-database",
            NodeKind::MonitoringService => "monitoring-service",
            NodeKind::AutoScaling => "auto-scaling",
            NodeKind::NotificationTopic => "notification-topic",
            NodeKind::ObjectStorage => "object-storage",
        }
    }

    /// Graphviz node shape for this kind.
    pub(crate) fn shape(&self) -> &'static str {
        match self {
            NodeKind::GenericActor => "ellipse",
            NodeKind::ManagedDatabase => "cylinder",
            _ => "box",
        }
    }

    /// Fill color for this kind, loosely following the AWS service palette.
    pub(crate) fn fill_color(&self) -> &'static str {
        match self {
            NodeKind::GenericActor => "#ECEFF1",
            NodeKind::DnsService => "#8C4FFF",
            NodeKind::NetworkGateway => "#E7157B",
            NodeKind::ComputeFunction => "#ED7100",
            NodeKind::ManagedDatabase => "#C925D1",
            NodeKind::MonitoringService => "#B0084D",
            NodeKind::AutoScaling => "#F58536",
            NodeKind::NotificationTopic => "#DD344C",
            NodeKind::ObjectStorage => "#7AA116",
        }
    }

    /// Label color contrasting with [`fill_color`](Self::fill_color).
    pub(crate) fn font_color(&self) -> &'static str {
        match self {
            NodeKind::GenericActor => "#2D3436",
            _ => "#FFFFFF",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

impl FromStr for NodeKind {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.category() == s)
            .ok_or_else(|| DiagramError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for kind in NodeKind::ALL {
            let parsed: NodeKind = kind.category().parse().unwrap();
            assert_eq!(parsed, kind);
            assert_eq!(kind.to_string(), kind.category());
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = "quantum-teleporter".parse::<NodeKind>().unwrap_err();
        match err {
            DiagramError::UnknownCategory(category) => {
                assert_eq!(category, "quantum-teleporter");
            }
            other => panic!("expected UnknownCategory, got {other:?}"),
        }
    }

    #[test]
    fn test_parsing_is_case_sensitive() {
        assert!("Generic-Actor".parse::<NodeKind>().is_err());
        assert!("generic-actor".parse::<NodeKind>().is_ok());
    }

    #[test]
    fn test_every_kind_has_a_style() {
        for kind in NodeKind::ALL {
            assert!(!kind.shape().is_empty());
            assert!(kind.fill_color().starts_with('#'));
            assert!(kind.font_color().starts_with('#'));
        }
    }
}
