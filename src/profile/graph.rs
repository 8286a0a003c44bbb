use serde::Serialize;
use serde_json::Value;

use super::extract::{IdentityMap, extract};

const ROOT_ID: &str = "root";
const ROOT_NAME: &str = "Self";
const ROOT_VALUE: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
    Root,
    Category,
}

#[derive(Clone, Debug, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub group: NodeGroup,
    pub value: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub value: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Star-shaped node/link structure rooted at a synthetic "Self" node,
/// subject to the extractor's fallback policy.
pub fn to_graph(document: &Value) -> GraphData {
    graph_from_identity(&extract(document))
}

pub fn graph_from_identity(identity: &IdentityMap) -> GraphData {
    let mut nodes = Vec::with_capacity(identity.len() + 1);
    let mut links = Vec::with_capacity(identity.len());

    nodes.push(GraphNode {
        id: ROOT_ID.to_owned(),
        name: ROOT_NAME.to_owned(),
        group: NodeGroup::Root,
        value: ROOT_VALUE,
    });

    for entry in identity.iter() {
        let node_id = format!("node_{}", entry.label);
        nodes.push(GraphNode {
            id: node_id.clone(),
            name: entry.label.clone(),
            group: NodeGroup::Category,
            value: entry.strength,
        });
        links.push(GraphLink {
            source: ROOT_ID.to_owned(),
            target: node_id,
            value: entry.strength / 10.0,
        });
    }

    GraphData { nodes, links }
}
