//! The reachability tree: a DFS unfolding of the state graph from
//! `start`, bounded so that every simple path and every simple cycle surfaces at
//! least once. Nodes are stored in a flat arena and reference their parent by
//! index, so the whole tree is released together and ancestor walks are cheap
//! index hops rather than reference-counted back-pointers.

use crate::model::{State, Vass};


pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    pub state: State,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// An arena-backed reachability tree rooted at the VASS's `start` state.
#[derive(Debug)]
pub struct ReachabilityTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl ReachabilityTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// The chain of ancestor states from `id`'s parent up to (and including) the
    /// root, nearest ancestor first.
    pub fn ancestors(&self, id: NodeId) -> Vec<&State> {
        let mut out = Vec::new();
        let mut cur = self.nodes[id].parent;
        while let Some(p) = cur {
            out.push(&self.nodes[p].state);
            cur = self.nodes[p].parent;
        }
        out
    }

    /// The full chain from the root down to and including `id`.
    pub fn chain_from_root(&self, id: NodeId) -> Vec<&State> {
        let mut chain: Vec<&State> = self.ancestors(id).into_iter().rev().collect();
        chain.push(&self.nodes[id].state);
        chain
    }
}

/// Construct the reachability tree. Expansion from a node stops the moment the
/// state being added already appears among that node's ancestors; this bounds
/// every root-to-leaf chain to a simple path and surfaces each simple cycle
/// exactly as "child whose state equals an ancestor". A hard depth guard of
/// `2 * |E| * |Q|` protects against pathological inputs.
pub fn build(vass: &Vass) -> ReachabilityTree {
    let adjacency = vass.adjacency();
    let edge_count = vass.edges().len().max(1);
    let state_count = vass.states().len().max(1);
    let depth_guard = 2 * edge_count * state_count;

    let mut nodes = vec![Node {
        state: vass.start.clone(),
        parent: None,
        children: Vec::new(),
    }];
    let root = 0usize;

    expand(&mut nodes, root, &adjacency, depth_guard, 0);

    ReachabilityTree { nodes, root }
}

fn expand(
    nodes: &mut Vec<Node>,
    id: NodeId,
    adjacency: &std::collections::BTreeMap<State, Vec<State>>,
    depth_guard: usize,
    depth: usize,
) {
    if depth >= depth_guard {
        return;
    }

    let state = nodes[id].state.clone();
    let successors = adjacency.get(&state).cloned().unwrap_or_default();

    for succ in successors {
        let is_ancestor = {
            let mut cur = Some(id);
            let mut found = false;
            while let Some(c) = cur {
                if nodes[c].state == succ {
                    found = true;
                    break;
                }
                cur = nodes[c].parent;
            }
            found
        };

        let child_id = nodes.len();
        nodes.push(Node {
            state: succ,
            parent: Some(id),
            children: Vec::new(),
        });
        nodes[id].children.push(child_id);

        if !is_ancestor {
            expand(nodes, child_id, adjacency, depth_guard, depth + 1);
        }
    }
}
