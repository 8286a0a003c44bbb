mod extract;
mod fallback;
mod graph;
mod parse;
mod session;
mod store;

pub use extract::{IdentityEntry, IdentityMap, extract};
pub use fallback::synthetic_dataset;
pub use graph::{GraphData, GraphLink, GraphNode, NodeGroup, graph_from_identity, to_graph};
pub use session::{ProfileRecord, RecordSession};
pub use store::{StoreConfig, fetch_records};
