//! Intra-type call graph.
//!
//! Nodes are the methods of one file, keyed by receiver type and name. An
//! edge `a -> b` means the body of `a` calls `b` on its own receiver. Edges
//! are only ever added between known methods and adding one twice is a no-op.

use super::receiver::ReceiverMatcher;
use crate::core::{MethodKey, MethodRecord};
use crate::parser::ParsedUnit;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};
use tree_sitter::Node;

#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    graph: DiGraph<MethodKey, ()>,
    index: HashMap<MethodKey, NodeIndex>,
    methods: Vec<MethodRecord>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a method node. Each record gets its own node; a repeated key
    /// (a redeclared method) keeps resolving to the first declaration.
    pub fn add_method(&mut self, method: MethodRecord) -> NodeIndex {
        let key = method.key();
        let node = self.graph.add_node(key.clone());
        self.index.entry(key).or_insert(node);
        self.methods.push(method);
        node
    }

    /// Add the edge `from -> to`. Returns `false` when either endpoint is
    /// unknown or the edge already exists.
    pub fn add_call(&mut self, from: &MethodKey, to: &MethodKey) -> bool {
        let (Some(&source), Some(&target)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        self.add_edge(source, target)
    }

    fn add_edge(&mut self, source: NodeIndex, target: NodeIndex) -> bool {
        if self.graph.contains_edge(source, target) {
            return false;
        }
        self.graph.add_edge(source, target, ());
        true
    }

    pub fn node(&self, key: &MethodKey) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub fn contains_call(&self, from: &MethodKey, to: &MethodKey) -> bool {
        match (self.node(from), self.node(to)) {
            (Some(source), Some(target)) => self.graph.contains_edge(source, target),
            _ => false,
        }
    }

    /// Targets called by `node`, in a stable order.
    pub fn callees(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut targets: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        targets.sort();
        targets
    }

    /// Number of distinct methods calling `node`.
    pub fn caller_count(&self, node: NodeIndex) -> usize {
        self.graph
            .neighbors_directed(node, Direction::Incoming)
            .count()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn graph(&self) -> &DiGraph<MethodKey, ()> {
        &self.graph
    }

    /// Records in node order (node `i` is record `i`).
    pub fn methods(&self) -> &[MethodRecord] {
        &self.methods
    }

    pub(crate) fn methods_mut(&mut self) -> &mut [MethodRecord] {
        &mut self.methods
    }

    pub fn into_methods(self) -> Vec<MethodRecord> {
        self.methods
    }
}

/// Builds a [`CallGraph`] from extracted methods in two passes, so calls to
/// methods declared further down the file resolve.
pub struct CallGraphBuilder<'a> {
    unit: &'a ParsedUnit,
    matcher: ReceiverMatcher,
}

impl<'a> CallGraphBuilder<'a> {
    pub fn new(unit: &'a ParsedUnit, matcher: ReceiverMatcher) -> Self {
        Self { unit, matcher }
    }

    pub fn build(&self, methods: Vec<MethodRecord>) -> CallGraph {
        let mut graph = CallGraph::new();
        for method in methods {
            graph.add_method(method);
        }

        let mut resolved = 0usize;
        let mut dropped = 0usize;
        for i in 0..graph.methods().len() {
            let source = NodeIndex::new(i);
            let caller = &graph.methods()[i];
            let receiver_type = caller.receiver_type.clone();
            let called = self.receiver_calls(caller);

            for name in called {
                let target_key = MethodKey::new(receiver_type.clone(), name);
                match graph.node(&target_key) {
                    Some(target) => {
                        graph.add_edge(source, target);
                        resolved += 1;
                    }
                    None => dropped += 1,
                }
            }
        }

        log::debug!(
            "{}: call graph with {} methods, {} edges ({} resolved, {} unresolved receiver calls)",
            self.unit.path().display(),
            graph.node_count(),
            graph.edge_count(),
            resolved,
            dropped
        );
        graph
    }

    /// Names called on the receiver anywhere in the method's body.
    fn receiver_calls(&self, method: &MethodRecord) -> BTreeSet<String> {
        let mut called = BTreeSet::new();
        let body = self
            .unit
            .node(method.handle)
            .and_then(|node| node.child_by_field_name("body"));
        if let Some(body) = body {
            self.visit_node_for_calls(body, method.receiver_ident.as_deref(), &mut called);
        }
        called
    }

    /// Explicit stack: expression trees nest as deep as the source does.
    fn visit_node_for_calls(
        &self,
        root: Node,
        receiver_ident: Option<&str>,
        called: &mut BTreeSet<String>,
    ) {
        let mut cursor = root.walk();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.kind() == "call_expression" {
                if let Some(name) = node
                    .child_by_field_name("function")
                    .and_then(|function| self.selector_on_receiver(function, receiver_ident))
                {
                    called.insert(name.to_string());
                }
            }
            stack.extend(node.named_children(&mut cursor));
        }
    }

    /// For `recv.name`, the selected name when `recv` denotes the receiver.
    fn selector_on_receiver(
        &self,
        function: Node,
        receiver_ident: Option<&str>,
    ) -> Option<&'a str> {
        if function.kind() != "selector_expression" {
            return None;
        }
        let operand = function.child_by_field_name("operand")?;
        if operand.kind() != "identifier" {
            return None;
        }
        let unit = self.unit;
        if !self
            .matcher
            .is_receiver(unit.node_text(operand), receiver_ident)
        {
            return None;
        }
        let field = function.child_by_field_name("field")?;
        Some(unit.node_text(field)).filter(|name| !name.is_empty())
    }
}
