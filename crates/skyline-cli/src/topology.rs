//! The TechModa topology declarations.
//!
//! Each function declares one of the five published architecture pictures:
//! which nodes exist, how they group into regions and zones, and which data
//! and control flows connect them. Rendering is left to the caller so the
//! declarations stay inspectable in tests.

use clap::ValueEnum;

use skyline::{Diagram, DiagramError, Direction, Link, NodeKind, RenderOptions};

/// The five TechModa architecture topologies.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Multi-AZ deployment behind one API gateway.
    MultiAz,
    /// Lambda and DynamoDB capacity scaling driven by CloudWatch.
    AutoScaling,
    /// Two-region disaster recovery with DNS failover.
    Dr,
    /// Dashboards, alarms, and automated alert response.
    Monitoring,
    /// The integrated HA & DR capstone picture.
    Capstone,
}

impl Topology {
    /// All topologies, in publication order.
    pub const ALL: [Topology; 5] = [
        Topology::MultiAz,
        Topology::AutoScaling,
        Topology::Dr,
        Topology::Monitoring,
        Topology::Capstone,
    ];

    /// Output file name, without extension.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Topology::MultiAz => "multi-az-architecture",
            Topology::AutoScaling => "auto-scaling-architecture",
            Topology::Dr => "dr-architecture",
            Topology::Monitoring => "monitoring-architecture",
            Topology::Capstone => "capstone-architecture",
        }
    }

    /// Layout direction; the DR picture reads left-to-right so the two
    /// regions sit side by side.
    pub fn direction(&self) -> Direction {
        match self {
            Topology::Dr => Direction::LeftToRight,
            _ => Direction::TopToBottom,
        }
    }
}

/// Declares the selected topology into a ready-to-finalize diagram.
pub fn declare(topology: Topology, options: RenderOptions) -> Result<Diagram, DiagramError> {
    match topology {
        Topology::MultiAz => multi_az(options),
        Topology::AutoScaling => auto_scaling(options),
        Topology::Dr => disaster_recovery(options),
        Topology::Monitoring => monitoring(options),
        Topology::Capstone => capstone(options),
    }
}

fn multi_az(options: RenderOptions) -> Result<Diagram, DiagramError> {
    let mut d = Diagram::begin("TechModa Multi-AZ Architecture", options)?;

    let users = d.add(NodeKind::GenericActor, "Users")?;
    let api = d.add(NodeKind::NetworkGateway, "API Gateway")?;
    let cloudwatch = d.add(NodeKind::MonitoringService, "CloudWatch\nMonitoring")?;

    d.open_group("AWS Region")?;
    d.open_group("Availability Zone 1")?;
    let lambda1 = d.add(NodeKind::ComputeFunction, "Lambda Function\n(AZ1)")?;
    d.close_group()?;
    d.open_group("Availability Zone 2")?;
    let lambda2 = d.add(NodeKind::ComputeFunction, "Lambda Function\n(AZ2)")?;
    d.close_group()?;
    // DynamoDB spans both availability zones.
    let dynamodb = d.add(
        NodeKind::ManagedDatabase,
        "DynamoDB\nPoint-in-Time Recovery enabled",
    )?;
    d.close_group()?;

    d.connect(users, api, Link::default())?;
    d.connect(api, [lambda1, lambda2], Link::default())?;
    d.connect([lambda1, lambda2], dynamodb, Link::default())?;

    // Every tier reports metrics to CloudWatch.
    d.connect([api, lambda1, lambda2, dynamodb], cloudwatch, Link::default())?;

    Ok(d)
}

fn auto_scaling(options: RenderOptions) -> Result<Diagram, DiagramError> {
    let mut d = Diagram::begin("TechModa Auto Scaling Architecture", options)?;

    let users = d.add(NodeKind::GenericActor, "Users")?;
    let api = d.add(NodeKind::NetworkGateway, "API Gateway")?;
    let cloudwatch = d.add(NodeKind::MonitoringService, "CloudWatch\nAlarms & Metrics")?;

    d.open_group("AWS Region")?;
    d.open_group("Lambda Auto Scaling")?;
    let lambda_scaling = d.add(NodeKind::AutoScaling, "Lambda\nConcurrency Scaling")?;
    let lambdas = [
        d.add(NodeKind::ComputeFunction, "Lambda\nInstance 1")?,
        d.add(NodeKind::ComputeFunction, "Lambda\nInstance 2")?,
        d.add(NodeKind::ComputeFunction, "Lambda\nInstance n")?,
    ];
    d.close_group()?;
    d.open_group("DynamoDB Auto Scaling")?;
    let db_scaling = d.add(NodeKind::AutoScaling, "DynamoDB\nCapacity Scaling")?;
    let dynamodb = d.add(NodeKind::ManagedDatabase, "DynamoDB Table")?;
    d.close_group()?;
    d.close_group()?;

    d.connect(users, api, Link::default())?;
    d.connect(api, lambdas, Link::default())?;
    d.connect(lambdas, dynamodb, Link::default())?;

    // CloudWatch drives both scaling controllers and watches the fleet.
    d.connect(cloudwatch, [lambda_scaling, db_scaling], Link::default())?;
    d.connect(cloudwatch, lambdas, Link::default())?;
    d.connect(cloudwatch, dynamodb, Link::default())?;

    Ok(d)
}

fn disaster_recovery(options: RenderOptions) -> Result<Diagram, DiagramError> {
    let mut d = Diagram::begin("TechModa Disaster Recovery Architecture", options)?;

    let dns = d.add(NodeKind::DnsService, "Route 53\nDNS Failover")?;
    let users = d.add(NodeKind::GenericActor, "Users")?;

    d.open_group("Primary Region (us-east-1)")?;
    let api_primary = d.add(NodeKind::NetworkGateway, "API Gateway\nPrimary")?;
    d.open_group("Primary Services")?;
    let lambda_primary = d.add(NodeKind::ComputeFunction, "Lambda Functions\nPrimary")?;
    let dynamodb_primary = d.add(NodeKind::ManagedDatabase, "DynamoDB Table\nPrimary")?;
    d.close_group()?;
    d.connect(lambda_primary, dynamodb_primary, Link::default())?;
    d.close_group()?;

    d.open_group("Secondary Region (us-west-2)")?;
    let api_secondary = d.add(NodeKind::NetworkGateway, "API Gateway\nSecondary")?;
    d.open_group("Secondary Services")?;
    let lambda_secondary = d.add(NodeKind::ComputeFunction, "Lambda Functions\nSecondary")?;
    let dynamodb_secondary = d.add(NodeKind::ManagedDatabase, "DynamoDB Table\nSecondary")?;
    d.close_group()?;
    d.connect(lambda_secondary, dynamodb_secondary, Link::default())?;
    d.close_group()?;

    d.connect(dynamodb_primary, dynamodb_secondary, Link::default())?;

    d.connect(users, dns, Link::default())?;
    d.connect(dns, [api_primary, api_secondary], Link::default())?;
    d.connect(api_primary, lambda_primary, Link::default())?;
    d.connect(api_secondary, lambda_secondary, Link::default())?;

    Ok(d)
}

fn monitoring(options: RenderOptions) -> Result<Diagram, DiagramError> {
    let mut d = Diagram::begin("TechModa Monitoring Architecture", options)?;

    let users = d.add(NodeKind::GenericActor, "Users")?;

    d.open_group("CloudWatch Monitoring")?;
    let dashboard = d.add(NodeKind::MonitoringService, "CloudWatch\nDashboard")?;
    let alarms = d.add(NodeKind::MonitoringService, "CloudWatch\nAlarms")?;
    let events = d.add(NodeKind::MonitoringService, "CloudWatch\nEvents")?;
    d.close_group()?;

    let sns = d.add(NodeKind::NotificationTopic, "SNS Topic\nAlerts")?;

    d.open_group("Application Architecture")?;
    let api = d.add(NodeKind::NetworkGateway, "API Gateway")?;
    let lambda = d.add(NodeKind::ComputeFunction, "Lambda\nFunctions")?;
    let db = d.add(NodeKind::ManagedDatabase, "DynamoDB")?;
    d.connect(api, lambda, Link::default())?;
    d.connect(lambda, db, Link::default())?;
    d.close_group()?;

    d.connect(users, api, Link::default())?;

    d.connect([api, lambda, db], dashboard, Link::default())?;

    d.connect(dashboard, alarms, Link::default())?;
    d.connect(alarms, [sns, events], Link::default())?;

    // Automated response to alarm events.
    let responder = d.add(NodeKind::ComputeFunction, "Error Response\nLambda")?;
    d.connect(events, responder, Link::default())?;

    Ok(d)
}

fn capstone(options: RenderOptions) -> Result<Diagram, DiagramError> {
    let mut d = Diagram::begin("TechModa Integrated HA & DR Architecture", options)?;

    let users = d.add(NodeKind::GenericActor, "Users")?;
    let dns = d.add(NodeKind::DnsService, "Route 53\nDNS Failover")?;

    d.open_group("Comprehensive Monitoring")?;
    let dashboard = d.add(NodeKind::MonitoringService, "CloudWatch\nDashboard")?;
    let alarms = d.add(NodeKind::MonitoringService, "CloudWatch\nAlarms")?;
    let sns = d.add(NodeKind::NotificationTopic, "Alert\nNotifications")?;
    d.connect(dashboard, alarms, Link::default())?;
    d.connect(alarms, sns, Link::default())?;
    d.close_group()?;

    d.open_group("Multi-Region Architecture")?;

    d.open_group("Primary Region (us-east-1)")?;
    let api_primary = d.add(NodeKind::NetworkGateway, "API Gateway\nPrimary")?;
    d.open_group("Multi-AZ Deployment")?;
    d.open_group("AZ 1")?;
    let lambda1 = d.add(NodeKind::ComputeFunction, "Lambda\nAZ1")?;
    d.close_group()?;
    d.open_group("AZ 2")?;
    let lambda2 = d.add(NodeKind::ComputeFunction, "Lambda\nAZ2")?;
    d.close_group()?;
    let lambda_scaling = d.add(NodeKind::AutoScaling, "Lambda\nAuto Scaling")?;
    let dynamodb_primary = d.add(NodeKind::ManagedDatabase, "DynamoDB\nGlobal Table\nPrimary")?;
    let db_scaling = d.add(NodeKind::AutoScaling, "DynamoDB\nAuto Scaling")?;
    d.close_group()?;
    d.close_group()?;

    d.open_group("Secondary Region (us-west-2)")?;
    let api_secondary = d.add(NodeKind::NetworkGateway, "API Gateway\nSecondary")?;
    let lambda_secondary = d.add(NodeKind::ComputeFunction, "Lambda\nSecondary")?;
    let dynamodb_secondary =
        d.add(NodeKind::ManagedDatabase, "DynamoDB\nGlobal Table\nSecondary")?;
    d.close_group()?;

    d.open_group("Backup & Recovery")?;
    let backup = d.add(NodeKind::ObjectStorage, "AWS Backup\nVault")?;
    d.close_group()?;

    d.close_group()?;

    d.connect(users, dns, Link::default())?;
    d.connect(dns, [api_primary, api_secondary], Link::default())?;

    d.connect(api_primary, [lambda1, lambda2], Link::default())?;
    d.connect([lambda1, lambda2], dynamodb_primary, Link::default())?;

    d.connect(api_secondary, lambda_secondary, Link::default())?;
    d.connect(lambda_secondary, dynamodb_secondary, Link::default())?;

    d.connect(
        dynamodb_primary,
        dynamodb_secondary,
        Link::undirected().with_label("Replication"),
    )?;

    d.connect(
        [api_primary, lambda1, lambda2, dynamodb_primary],
        dashboard,
        Link::default(),
    )?;

    // One alarm-to-controller edge per scaled target, as published.
    d.connect(alarms, lambda_scaling, Link::default())?;
    d.connect(lambda_scaling, lambda1, Link::default())?;
    d.connect(alarms, lambda_scaling, Link::default())?;
    d.connect(lambda_scaling, lambda2, Link::default())?;
    d.connect(alarms, db_scaling, Link::default())?;
    d.connect(db_scaling, dynamodb_primary, Link::default())?;

    d.connect([dynamodb_primary, dynamodb_secondary], backup, Link::default())?;

    Ok(d)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn declared(topology: Topology) -> Diagram {
        let dir = tempdir().expect("Failed to create temp directory");
        let options = RenderOptions::new(dir.path().join(topology.file_stem()))
            .with_direction(topology.direction());
        declare(topology, options).expect("declaration should succeed")
    }

    #[test]
    fn test_multi_az_declaration_counts() {
        let d = declared(Topology::MultiAz);
        assert_eq!(d.node_count(), 6);
        assert_eq!(d.group_count(), 3);
        assert_eq!(d.edge_count(), 9);
    }

    #[test]
    fn test_auto_scaling_declaration_counts() {
        let d = declared(Topology::AutoScaling);
        assert_eq!(d.node_count(), 9);
        assert_eq!(d.group_count(), 3);
        assert_eq!(d.edge_count(), 13);
    }

    #[test]
    fn test_dr_declaration_counts() {
        let d = declared(Topology::Dr);
        assert_eq!(d.node_count(), 8);
        assert_eq!(d.group_count(), 4);
        assert_eq!(d.edge_count(), 8);
    }

    #[test]
    fn test_monitoring_declaration_counts() {
        let d = declared(Topology::Monitoring);
        assert_eq!(d.node_count(), 9);
        assert_eq!(d.group_count(), 2);
        assert_eq!(d.edge_count(), 10);
    }

    #[test]
    fn test_capstone_declaration_counts() {
        let d = declared(Topology::Capstone);
        assert_eq!(d.node_count(), 15);
        assert_eq!(d.group_count(), 8);
        assert_eq!(d.edge_count(), 24);
    }

    #[test]
    fn test_only_dr_reads_left_to_right() {
        for topology in Topology::ALL {
            let expected = if topology == Topology::Dr {
                Direction::LeftToRight
            } else {
                Direction::TopToBottom
            };
            assert_eq!(topology.direction(), expected);
        }
    }

    #[test]
    fn test_file_stems_are_unique() {
        let mut stems: Vec<_> = Topology::ALL.iter().map(|t| t.file_stem()).collect();
        stems.sort_unstable();
        stems.dedup();
        assert_eq!(stems.len(), Topology::ALL.len());
    }
}
