//! Extraction of the union-of-instances subgraph.
//!
//! Grows the output one unique instance at a time so that only motif edges
//! are carried over — an induced subgraph on the union vertex set would drag
//! in host edges that belong to no instance.

use smallvec::SmallVec;
use tracing::debug;

use crate::dedup;
use crate::iso::IsomorphismOracle;
use crate::model::{Graph, Pattern};

/// The union subgraph plus the new-ID → host-ID map.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub graph: Graph,
    /// `node_map[new_id]` is the host vertex the new node came from.
    pub node_map: Vec<u32>,
}

/// Union of every unique instance of `pattern` in `graph`.
pub fn extract_union<O: IsomorphismOracle>(
    oracle: &O,
    graph: &Graph,
    pattern: &Pattern,
) -> Extraction {
    let instances = dedup::find_instances(oracle, graph, pattern);
    let mut out = Graph::empty(0, graph.is_directed());
    let mut node_map: Vec<u32> = Vec::new();

    for instance in instances.unique() {
        // Reuse the output ID when the host vertex is already present.
        let mut new_ids: SmallVec<[u32; 4]> = SmallVec::new();
        for k in 0..pattern.size() {
            let host = instance.vertex(k);
            let id = match node_map.iter().position(|&v| v == host) {
                Some(existing) => existing as u32,
                None => {
                    node_map.push(host);
                    out.add_nodes(1);
                    (node_map.len() - 1) as u32
                }
            };
            new_ids.push(id);
        }
        for (a, b) in pattern.graph().edges() {
            out.add_edge(new_ids[a as usize], new_ids[b as usize]);
        }
    }

    out.simplify();
    debug!(
        instances = instances.unique_count(),
        nodes = out.node_count(),
        edges = out.edge_count(),
        "extracted instance union"
    );
    Extraction { graph: out, node_map }
}
