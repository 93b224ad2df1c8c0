use petgraph::dot::Dot;
use petgraph::graph::{Graph, NodeIndex};

use crate::describe::{edges, DisplayIds};
use crate::nfa::{Automaton, StateId};

impl Automaton {
    /// The reachable part of the automaton as a petgraph graph. Node `i`
    /// carries the display id `Si`, edges carry the symbol or `ε`.
    pub fn to_graph(&self) -> Graph<String, String> {
        let ids = DisplayIds::new(self);
        let mut graph: Graph<String, String> = Graph::with_capacity(ids.order().len(), 0);

        for state in ids.order().iter().copied() {
            graph.add_node(ids.name(state));
        }

        for state in ids.order().iter().copied() {
            let from = node_of(&ids, state);
            for (label, next) in edges(self, state) {
                graph.add_edge(from, node_of(&ids, next), label.to_string());
            }
        }

        graph
    }

    /// Graphviz source for the automaton, laid out left to right with the
    /// accept state drawn as a double circle.
    pub fn dot(&self) -> String {
        let graph = self.to_graph();
        let accept = DisplayIds::new(self)
            .get(self.accept())
            .map(NodeIndex::new);

        let dot = Dot::with_attr_getters(
            &graph,
            &[],
            &|_, _| String::new(),
            &|_, (node, _)| {
                if Some(node) == accept {
                    "shape = doublecircle".to_string()
                } else {
                    "shape = circle".to_string()
                }
            },
        )
        .to_string();

        match dot.split_once('\n') {
            Some((header, body)) => format!("{}\n    rankdir = LR\n{}", header, body),
            None => dot,
        }
    }
}

// every reachable state has an id, and only reachable states appear in edges
fn node_of(ids: &DisplayIds, state: StateId) -> NodeIndex {
    NodeIndex::new(ids.get(state).unwrap_or_default())
}
