use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::graph::{NodeId, SceneGraph};

/// How many nodes a role may resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    Singular,
    Plural,
}

/// Names a surface role and the name fragments that identify it.
///
/// Matching is substring containment, never exact equality: imported models
/// suffix mesh names with material tags, and several nodes may share a
/// fragment (two table variants, say).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleMatcher {
    pub role: String,
    pub arity: Arity,
    pub patterns: Vec<String>,
}

impl RoleMatcher {
    pub fn singular(role: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            role: role.into(),
            arity: Arity::Singular,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn plural(role: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            role: role.into(),
            arity: Arity::Plural,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| name.contains(p.as_str()))
    }
}

/// Role resolution over one traversal of the graph.
///
/// Computed fresh each time the scene is loaded and never mutated after.
/// A role with zero matches is simply absent; callers skip the dependent
/// step rather than treating it as an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    singular: HashMap<String, NodeId>,
    plural: HashMap<String, Vec<NodeId>>,
}

impl MatchResult {
    /// The node resolved for a singular role, if any matched
    pub fn single(&self, role: &str) -> Option<NodeId> {
        self.singular.get(role).copied()
    }

    /// All nodes resolved for a plural role, in traversal order
    pub fn all(&self, role: &str) -> &[NodeId] {
        self.plural.get(role).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Resolves every role in one iterative pre-order pass over the graph.
///
/// Only drawable nodes participate. For a singular role matched by more
/// than one node, the last match in traversal order wins; the override is
/// logged so a model with duplicate surfaces stays diagnosable. This pass
/// never mutates the graph; decoration is a separate step.
pub fn locate(graph: &SceneGraph, root: NodeId, matchers: &[RoleMatcher]) -> MatchResult {
    let mut result = MatchResult::default();

    for id in graph.walk(root) {
        let node = graph.node(id);
        if !node.is_drawable() {
            continue;
        }

        for matcher in matchers {
            if !matcher.matches(&node.name) {
                continue;
            }

            match matcher.arity {
                Arity::Singular => {
                    if let Some(previous) = result.singular.insert(matcher.role.clone(), id) {
                        debug!(
                            "Role '{}' matched again by '{}'; replacing node {}",
                            matcher.role,
                            node.name,
                            previous.index()
                        );
                    }
                }
                Arity::Plural => {
                    result
                        .plural
                        .entry(matcher.role.clone())
                        .or_default()
                        .push(id);
                }
            }
        }
    }

    result
}
