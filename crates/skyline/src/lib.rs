//! Skyline - a declarative builder for architecture diagrams.
//!
//! Diagrams are described as typed nodes, nested groups, and labeled edges.
//! Layout is delegated to the Graphviz `dot` engine; Skyline's job is faithful
//! serialization of the declarations and rendering the result to a PNG file.
//!
//! # Examples
//!
//! ```rust,no_run
//! use skyline::{Diagram, Link, NodeKind, RenderOptions};
//!
//! let options = RenderOptions::new("out/shop-architecture");
//! let mut diagram = Diagram::begin("Shop Architecture", options)?;
//!
//! let users = diagram.add(NodeKind::GenericActor, "Users")?;
//! let api = diagram.add(NodeKind::NetworkGateway, "API Gateway")?;
//!
//! diagram.open_group("Zone A")?;
//! let worker = diagram.add(NodeKind::ComputeFunction, "Worker")?;
//! diagram.close_group()?;
//!
//! diagram.connect(users, api, Link::default())?;
//! diagram.connect(api, worker, Link::default())?;
//!
//! let png = diagram.finalize()?;
//! println!("wrote {}", png.display());
//! # Ok::<(), skyline::DiagramError>(())
//! ```

pub mod config;

mod diagram;
mod error;
mod export;
mod taxonomy;

pub use config::{Direction, RenderOptions};
pub use diagram::{Diagram, Endpoints, GroupRef, Link, NodeRef};
pub use error::DiagramError;
pub use taxonomy::NodeKind;
