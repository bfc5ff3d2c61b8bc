//! Static call graph and summary propagation.
//!
//! Nodes are function identities, edges are statically resolved call sites.
//! Indirect calls contribute no edge; the sequencing analysis accounts for
//! them conservatively at the call site instead. Propagation runs over the
//! SCC condensation in callees-first order, so call cycles are handled
//! without re-descent and the result is the least fixpoint: a function
//! touches volatile iff the direct pass marked it or some transitive callee
//! is marked. The output set is frozen before the sequencing analysis runs.

use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::ir::expr::{Callee, ExprKind};
use crate::ir::program::{FunctionId, Program};
use crate::visitor::{walk_function, VisitFlow};

pub struct CallGraph {
    graph: DiGraph<FunctionId, ()>,
    nodes: HashMap<FunctionId, NodeIndex>,
}

impl CallGraph {
    pub fn build(program: &Program) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for (id, _) in program.functions() {
            nodes.insert(id, graph.add_node(id));
        }
        for (caller, _) in program.functions() {
            let _ = walk_function(program, caller, &mut |e| {
                if let ExprKind::Call {
                    callee: Callee::Resolved(target),
                    ..
                } = &program.expr(e).kind
                {
                    graph.update_edge(nodes[&caller], nodes[target], ());
                }
                VisitFlow::Descend
            });
        }
        Self { graph, nodes }
    }

    pub fn calls(&self, caller: FunctionId, callee: FunctionId) -> bool {
        self.graph
            .find_edge(self.nodes[&caller], self.nodes[&callee])
            .is_some()
    }

    /// Propagates the direct summary to callers until fixpoint.
    pub fn propagate(&self, direct: &HashSet<FunctionId>) -> FunctionVolatility {
        let mut volatile = direct.clone();
        // tarjan_scc yields components in reverse topological order, so
        // every out-edge of the current component targets an already
        // decided one (or the component itself).
        for component in tarjan_scc(&self.graph) {
            let touches = component.iter().any(|&n| {
                volatile.contains(&self.graph[n])
                    || self
                        .graph
                        .neighbors(n)
                        .any(|m| volatile.contains(&self.graph[m]))
            });
            if touches {
                for &n in &component {
                    volatile.insert(self.graph[n]);
                }
            }
        }
        FunctionVolatility { volatile }
    }
}

/// Final per-function "touches volatile" summary, frozen after propagation.
#[derive(Debug)]
pub struct FunctionVolatility {
    volatile: HashSet<FunctionId>,
}

impl FunctionVolatility {
    pub fn touches_volatile(&self, function: FunctionId) -> bool {
        self.volatile.contains(&function)
    }

    pub fn iter(&self) -> impl Iterator<Item = FunctionId> + '_ {
        self.volatile.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.volatile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volatile.is_empty()
    }
}
