//! In-degree and max call depth for every method of a [`CallGraph`].
//!
//! Depth is the longest path of calls starting at a method where a method
//! already on the current path contributes 0 instead of recursing, so cyclic
//! graphs terminate. Values are per-traversal: a method is re-explored when
//! reached along a different path. Memoizing is only sound for methods whose
//! reachable subgraph has no cycle (their depth cannot depend on the path
//! that reached them), so strongly connected components decide which results
//! may be cached.

use super::call_graph::CallGraph;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;

/// Upper bound on DFS steps per starting method. Dense cyclic graphs make the
/// exact search exponential; past this bound unexplored branches count as 0.
const DEPTH_SEARCH_BUDGET: usize = 100_000;

/// Summary of a metrics pass, used for logging and `--explain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphMetrics {
    pub methods: usize,
    pub calls: usize,
    /// Methods that sit on a call cycle (including direct recursion)
    pub cyclic_methods: usize,
    /// Starting methods whose depth search hit the step budget
    pub truncated_searches: usize,
}

/// Fill `in_degree` and `max_depth` on every record of `graph`.
pub fn compute_metrics(graph: &mut CallGraph) -> GraphMetrics {
    compute_metrics_with_budget(graph, DEPTH_SEARCH_BUDGET)
}

fn compute_metrics_with_budget(graph: &mut CallGraph, budget: usize) -> GraphMetrics {
    let count = graph.node_count();
    let (on_cycle, reaches_cycle) = cycle_flags(graph);

    let in_degrees: Vec<usize> = (0..count)
        .map(|i| graph.caller_count(NodeIndex::new(i)))
        .collect();

    let mut search = DepthSearch::new(graph, reaches_cycle, budget);
    let mut depths = Vec::with_capacity(count);
    let mut truncated_searches = 0;
    for i in 0..count {
        let (depth, truncated) = search.run(i);
        if truncated {
            truncated_searches += 1;
        }
        depths.push(depth);
    }

    for (i, method) in graph.methods_mut().iter_mut().enumerate() {
        method.in_degree = in_degrees[i];
        method.max_depth = depths[i];
    }

    let metrics = GraphMetrics {
        methods: count,
        calls: graph.edge_count(),
        cyclic_methods: on_cycle.iter().filter(|c| **c).count(),
        truncated_searches,
    };
    if truncated_searches > 0 {
        log::warn!(
            "Call depth search truncated for {} methods; depths are lower bounds",
            truncated_searches
        );
    }
    metrics
}

/// Per node: (lies on a cycle, can reach a cycle).
fn cycle_flags(graph: &CallGraph) -> (Vec<bool>, Vec<bool>) {
    let g = graph.graph();
    let count = g.node_count();
    let mut on_cycle = vec![false; count];
    let mut reaches_cycle = vec![false; count];

    // Components come out in reverse topological order, so every component a
    // node can call into has been resolved by the time it is visited.
    // kosaraju_scc is iterative; call chains can be long.
    let components = kosaraju_scc(g);
    let mut component_of = vec![0; count];
    for (id, component) in components.iter().enumerate() {
        for node in component {
            component_of[node.index()] = id;
        }
    }

    for (id, component) in components.iter().enumerate() {
        let cyclic = component.len() > 1
            || component
                .first()
                .is_some_and(|&node| g.contains_edge(node, node));
        let reaches = cyclic
            || component.iter().any(|&node| {
                g.neighbors(node).any(|target| {
                    component_of[target.index()] != id && reaches_cycle[target.index()]
                })
            });
        for node in component {
            on_cycle[node.index()] = cyclic;
            reaches_cycle[node.index()] = reaches;
        }
    }
    (on_cycle, reaches_cycle)
}

/// A method on the current DFS path and the best depth seen below it.
struct Frame {
    node: usize,
    next: usize,
    best: usize,
}

impl Frame {
    fn new(node: usize) -> Self {
        Self {
            node,
            next: 0,
            best: 0,
        }
    }
}

struct DepthSearch<'g> {
    graph: &'g CallGraph,
    /// Sorted callee indices per node
    callees: Vec<Vec<usize>>,
    reaches_cycle: Vec<bool>,
    memo: Vec<Option<usize>>,
    on_path: Vec<bool>,
    budget: usize,
}

impl<'g> DepthSearch<'g> {
    fn new(graph: &'g CallGraph, reaches_cycle: Vec<bool>, budget: usize) -> Self {
        let count = graph.node_count();
        let callees = (0..count)
            .map(|i| {
                graph
                    .callees(NodeIndex::new(i))
                    .into_iter()
                    .map(|target| target.index())
                    .collect()
            })
            .collect();
        Self {
            graph,
            callees,
            reaches_cycle,
            memo: vec![None; count],
            on_path: vec![false; count],
            budget,
        }
    }

    /// Methods reachable from `start`, itself included. No path from `start`
    /// can be deeper: it visits each of them once plus one closing edge.
    fn reachable(&self, start: usize) -> usize {
        let g = self.graph.graph();
        let mut dfs = Dfs::new(g, NodeIndex::new(start));
        let mut count = 0;
        while dfs.next(g).is_some() {
            count += 1;
        }
        count
    }

    /// Depth of `start` and whether the budget cut the search short.
    fn run(&mut self, start: usize) -> (usize, bool) {
        if let Some(depth) = self.memo[start] {
            return (depth, false);
        }
        let bound = if self.reaches_cycle[start] {
            self.reachable(start)
        } else {
            usize::MAX
        };

        let mut steps = 1;
        let mut truncated = false;
        let mut depth = 0;
        let mut stack = vec![Frame::new(start)];
        self.on_path[start] = true;

        loop {
            let path_len = stack.len().saturating_sub(1);
            let Some(frame) = stack.last_mut() else {
                break;
            };
            if path_len + frame.best >= bound {
                depth = bound;
                break;
            }

            if let Some(&target) = self.callees[frame.node].get(frame.next) {
                frame.next += 1;
                let known = if self.on_path[target] {
                    Some(0)
                } else {
                    self.memo[target]
                };
                match known {
                    Some(below) => frame.best = frame.best.max(below + 1),
                    None if steps >= self.budget => {
                        truncated = true;
                        frame.best = frame.best.max(1);
                    }
                    None => {
                        steps += 1;
                        self.on_path[target] = true;
                        stack.push(Frame::new(target));
                    }
                }
                continue;
            }

            let (node, best) = (frame.node, frame.best);
            stack.pop();
            self.on_path[node] = false;
            if !self.reaches_cycle[node] && !truncated {
                self.memo[node] = Some(best);
            }
            match stack.last_mut() {
                Some(parent) => parent.best = parent.best.max(best + 1),
                None => depth = best,
            }
        }

        for frame in &stack {
            self.on_path[frame.node] = false;
        }
        (depth, truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{extractor::extract_methods, CallGraphBuilder, ReceiverMatcher};
    use crate::core::MethodRecord;
    use crate::parser::parse_source;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn analyze(source: &str) -> (Vec<MethodRecord>, GraphMetrics) {
        let unit = parse_source("test.go", source).unwrap();
        let methods = extract_methods(&unit);
        let mut graph = CallGraphBuilder::new(&unit, ReceiverMatcher::default()).build(methods);
        let metrics = compute_metrics(&mut graph);
        (graph.into_methods(), metrics)
    }

    fn table(methods: &[MethodRecord]) -> Vec<(&str, usize, usize)> {
        methods
            .iter()
            .map(|m| (m.name.as_str(), m.in_degree, m.max_depth))
            .collect()
    }

    #[test]
    fn test_chain_depths_and_in_degrees() {
        let (methods, metrics) = analyze(indoc! {r#"
            package a

            type Database struct{}

            func (db *Database) Query() {
                db.validate()
                db.execute()
            }

            func (db *Database) execute() { db.lowLevel() }

            func (db *Database) Connect() { db.validate() }

            func (db *Database) validate() {}

            func (db *Database) lowLevel() {}
        "#});

        assert_eq!(
            table(&methods),
            vec![
                ("Query", 0, 2),
                ("execute", 1, 1),
                ("Connect", 0, 1),
                ("validate", 2, 0),
                ("lowLevel", 1, 0),
            ]
        );
        assert_eq!(metrics.calls, 4);
        assert_eq!(metrics.cyclic_methods, 0);
    }

    #[test]
    fn test_two_cycle_terminates_with_finite_depths() {
        let (methods, metrics) = analyze(indoc! {r#"
            package a

            type T struct{}

            func (t *T) ping() { t.pong() }

            func (t *T) pong() { t.ping() }
        "#});

        assert_eq!(table(&methods), vec![("ping", 1, 2), ("pong", 1, 2)]);
        assert_eq!(metrics.cyclic_methods, 2);
    }

    #[test]
    fn test_self_recursion_counts_once() {
        let (methods, _) = analyze(indoc! {r#"
            package a

            type T struct{}

            func (t *T) walk(n int) { t.walk(n - 1) }
        "#});

        assert_eq!(table(&methods), vec![("walk", 1, 1)]);
    }

    #[test]
    fn test_node_revisited_along_other_path_is_explored() {
        // Entry reaches `c` through the a <-> b cycle and directly. Starting
        // at Entry the longest path is Entry -> a -> b -> c -> d; starting at
        // b, the edge back to `a` stops at `a -> b`.
        let (methods, _) = analyze(indoc! {r#"
            package a

            type T struct{}

            func (t *T) Entry() {
                t.a()
                t.c()
            }

            func (t *T) a() { t.b() }

            func (t *T) b() {
                t.a()
                t.c()
            }

            func (t *T) c() { t.d() }

            func (t *T) d() {}
        "#});

        assert_eq!(
            table(&methods),
            vec![
                ("Entry", 0, 4),
                ("a", 2, 3),
                ("b", 1, 2),
                ("c", 2, 1),
                ("d", 1, 0),
            ]
        );
    }

    /// `count` methods that all call each other, optionally plus a `sink`
    /// every one of them calls.
    fn dense_source(count: usize, with_sink: bool) -> String {
        let mut source = String::from("package a\n\ntype T struct{}\n");
        for i in 0..count {
            source.push_str(&format!("\nfunc (t *T) m{i}() {{\n"));
            for j in (0..count).filter(|j| *j != i) {
                source.push_str(&format!("\tt.m{j}()\n"));
            }
            if with_sink {
                source.push_str("\tt.sink()\n");
            }
            source.push_str("}\n");
        }
        if with_sink {
            source.push_str("\nfunc (t *T) sink() {}\n");
        }
        source
    }

    fn analyze_with_budget(source: &str, budget: usize) -> (Vec<MethodRecord>, GraphMetrics) {
        let unit = parse_source("test.go", source).unwrap();
        let methods = extract_methods(&unit);
        let mut graph = CallGraphBuilder::new(&unit, ReceiverMatcher::default()).build(methods);
        let metrics = compute_metrics_with_budget(&mut graph, budget);
        (graph.into_methods(), metrics)
    }

    #[test]
    fn test_complete_graph_stops_at_reachable_bound() {
        let (methods, metrics) = analyze(&dense_source(12, false));

        assert_eq!(metrics.cyclic_methods, 12);
        assert_eq!(metrics.truncated_searches, 0);
        assert!(methods.iter().all(|m| m.max_depth == 12 && m.in_degree == 11));
    }

    #[test]
    fn test_budget_truncates_dense_search() {
        let (methods, metrics) = analyze_with_budget(&dense_source(10, true), 1_000);

        assert_eq!(metrics.truncated_searches, 10);
        let (cyclic, sink): (Vec<_>, Vec<_>) = methods.iter().partition(|m| m.name != "sink");
        // The first descent already finds the longest path.
        assert!(cyclic.iter().all(|m| m.max_depth == 10));
        assert_eq!(sink[0].max_depth, 0);
        assert_eq!(sink[0].in_degree, 10);
    }

    #[test]
    fn test_long_chain_on_small_stack() {
        let mut source = String::from("package a\n\ntype T struct{}\n");
        for i in 0..5_000 {
            source.push_str(&format!("\nfunc (t *T) m{i}() {{ t.m{}() }}\n", i + 1));
        }
        source.push_str("\nfunc (t *T) m5000() {}\n");

        let (methods, _) = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || analyze(&source))
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(methods[0].max_depth, 5_000);
        assert_eq!(methods[5_000].max_depth, 0);
    }

    #[test]
    fn test_empty_graph() {
        let (methods, metrics) = analyze("package a\n\nfunc main() {}\n");
        assert!(methods.is_empty());
        assert_eq!(metrics, GraphMetrics::default());
    }
}
