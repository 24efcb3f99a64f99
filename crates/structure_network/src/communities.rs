//! Community detection over a built [`NetworkGraph`].
//!
//! The default [`detect_communities`] is a one-hop absorption pass: cheap and
//! deterministic but not a modularity-optimising partition. Stronger methods
//! are available through [`detect_communities_with`] behind the same result
//! type, a map from node id to a community id numbered from zero in order of
//! first appearance.

use crate::graph::{Adjacency, NetworkGraph};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Upper bound on label-propagation sweeps.
const MAX_PROPAGATION_ROUNDS: usize = 100;

/// Community detection strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CommunityMethod {
    /// Each unvisited node claims its unvisited direct neighbours
    #[default]
    OneHop,
    /// Transitive closure of the edge relation
    ConnectedComponents,
    /// Weighted, deterministic label propagation
    LabelPropagation,
}

impl CommunityMethod {
    /// Get the name of this method.
    pub fn name(&self) -> &'static str {
        match self {
            CommunityMethod::OneHop => "one-hop",
            CommunityMethod::ConnectedComponents => "components",
            CommunityMethod::LabelPropagation => "label-propagation",
        }
    }
}

impl std::str::FromStr for CommunityMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one-hop" | "onehop" => Ok(CommunityMethod::OneHop),
            "components" | "connected-components" => Ok(CommunityMethod::ConnectedComponents),
            "label-propagation" | "lpa" => Ok(CommunityMethod::LabelPropagation),
            other => Err(format!(
                "Unknown community method: {}. Supported: one-hop, components, label-propagation",
                other
            )),
        }
    }
}

impl std::fmt::Display for CommunityMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One-hop community grouping.
///
/// Nodes are visited in order; an unvisited node opens a new community and
/// absorbs those direct neighbours not yet assigned. Neighbours of neighbours
/// are not followed.
///
/// # Examples
/// ```
/// use structure_core::CorrelationMatrix;
/// use structure_network::{build_network_graph, detect_communities};
///
/// // Path A - B - C - D
/// let m = CorrelationMatrix::new(
///     vec!["A".into(), "B".into(), "C".into(), "D".into()],
///     vec![
///         vec![1.0, 0.9, 0.0, 0.0],
///         vec![0.9, 1.0, 0.9, 0.0],
///         vec![0.0, 0.9, 1.0, 0.9],
///         vec![0.0, 0.0, 0.9, 1.0],
///     ],
/// );
/// let communities = detect_communities(&build_network_graph(&m, 0.5, None));
/// assert_eq!(communities["A"], communities["B"]);
/// assert_eq!(communities["C"], communities["D"]);
/// assert_ne!(communities["A"], communities["C"]);
/// ```
pub fn detect_communities(graph: &NetworkGraph) -> HashMap<String, usize> {
    detect_communities_with(graph, CommunityMethod::OneHop)
}

/// Community grouping with an explicit strategy.
pub fn detect_communities_with(
    graph: &NetworkGraph,
    method: CommunityMethod,
) -> HashMap<String, usize> {
    let adjacency = Adjacency::from_graph(graph);
    let labels = match method {
        CommunityMethod::OneHop => one_hop(&adjacency),
        CommunityMethod::ConnectedComponents => connected_components(&adjacency),
        CommunityMethod::LabelPropagation => label_propagation(graph, &adjacency),
    };

    tracing::debug!(
        method = %method,
        communities = labels.iter().max().map_or(0, |m| m + 1),
        "communities detected"
    );

    graph
        .nodes
        .iter()
        .zip(labels)
        .map(|(node, label)| (node.id.clone(), label))
        .collect()
}

fn one_hop(adjacency: &Adjacency) -> Vec<usize> {
    let n = adjacency.len();
    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut next = 0;
    for i in 0..n {
        if labels[i].is_some() {
            continue;
        }
        labels[i] = Some(next);
        for &j in adjacency.neighbours(i) {
            if labels[j].is_none() {
                labels[j] = Some(next);
            }
        }
        next += 1;
    }
    labels.into_iter().map(|l| l.unwrap_or_default()).collect()
}

fn connected_components(adjacency: &Adjacency) -> Vec<usize> {
    let n = adjacency.len();
    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut queue = VecDeque::new();
    let mut next = 0;
    for start in 0..n {
        if labels[start].is_some() {
            continue;
        }
        labels[start] = Some(next);
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            for &w in adjacency.neighbours(v) {
                if labels[w].is_none() {
                    labels[w] = Some(next);
                    queue.push_back(w);
                }
            }
        }
        next += 1;
    }
    labels.into_iter().map(|l| l.unwrap_or_default()).collect()
}

fn label_propagation(graph: &NetworkGraph, adjacency: &Adjacency) -> Vec<usize> {
    let n = adjacency.len();
    let index: HashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();
    let mut weights: HashMap<(usize, usize), f64> = HashMap::new();
    for edge in &graph.edges {
        if let (Some(&a), Some(&b)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str())) {
            weights.insert((a.min(b), a.max(b)), edge.weight);
        }
    }

    let mut labels: Vec<usize> = (0..n).collect();
    for round in 0..MAX_PROPAGATION_ROUNDS {
        let mut changed = false;
        for i in 0..n {
            if adjacency.degree(i) == 0 {
                continue;
            }
            // BTreeMap keeps ties resolved toward the smallest label.
            let mut tally: BTreeMap<usize, f64> = BTreeMap::new();
            for &j in adjacency.neighbours(i) {
                let w = weights.get(&(i.min(j), i.max(j))).copied().unwrap_or(1.0);
                *tally.entry(labels[j]).or_insert(0.0) += w;
            }
            let best_weight = tally.values().copied().fold(f64::NEG_INFINITY, f64::max);
            let current_weight = tally.get(&labels[i]).copied().unwrap_or(f64::NEG_INFINITY);
            if current_weight >= best_weight {
                continue;
            }
            if let Some((&label, _)) = tally.iter().find(|(_, w)| **w >= best_weight) {
                labels[i] = label;
                changed = true;
            }
        }
        if !changed {
            tracing::trace!(rounds = round + 1, "label propagation converged");
            break;
        }
    }

    relabel_by_first_appearance(&labels)
}

fn relabel_by_first_appearance(labels: &[usize]) -> Vec<usize> {
    let mut mapping: HashMap<usize, usize> = HashMap::new();
    labels
        .iter()
        .map(|&label| {
            let next = mapping.len();
            *mapping.entry(label).or_insert(next)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_network_graph;
    use structure_core::CorrelationMatrix;

    fn matrix_from_edges(n: usize, edges: &[(usize, usize, f64)]) -> CorrelationMatrix {
        let symbols = (0..n).map(|i| format!("N{}", i)).collect();
        let mut m = vec![vec![0.0; n]; n];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        for &(a, b, rho) in edges {
            m[a][b] = rho;
            m[b][a] = rho;
        }
        CorrelationMatrix::new(symbols, m)
    }

    /// Two triangles joined by a single weak bridge N2 - N3.
    fn barbell() -> NetworkGraph {
        let m = matrix_from_edges(
            6,
            &[
                (0, 1, 0.9),
                (0, 2, 0.9),
                (1, 2, 0.9),
                (3, 4, 0.9),
                (3, 5, 0.9),
                (4, 5, 0.9),
                (2, 3, 0.55),
            ],
        );
        build_network_graph(&m, 0.5, None)
    }

    #[test]
    fn test_one_hop_does_not_follow_transitively() {
        // Path N0 - N1 - N2: N0 claims N1, N2 starts its own community.
        let m = matrix_from_edges(3, &[(0, 1, 0.9), (1, 2, 0.9)]);
        let c = detect_communities(&build_network_graph(&m, 0.5, None));
        assert_eq!(c["N0"], 0);
        assert_eq!(c["N1"], 0);
        assert_eq!(c["N2"], 1);
    }

    #[test]
    fn test_one_hop_isolated_nodes_are_singletons() {
        let m = matrix_from_edges(3, &[]);
        let c = detect_communities(&build_network_graph(&m, 0.5, None));
        assert_eq!(c["N0"], 0);
        assert_eq!(c["N1"], 1);
        assert_eq!(c["N2"], 2);
    }

    #[test]
    fn test_connected_components_follow_paths() {
        let m = matrix_from_edges(4, &[(0, 1, 0.9), (1, 2, 0.9)]);
        let c = detect_communities_with(
            &build_network_graph(&m, 0.5, None),
            CommunityMethod::ConnectedComponents,
        );
        assert_eq!(c["N0"], c["N2"]);
        assert_ne!(c["N0"], c["N3"]);
    }

    #[test]
    fn test_label_propagation_splits_barbell() {
        let c = detect_communities_with(&barbell(), CommunityMethod::LabelPropagation);
        assert_eq!(c["N0"], c["N1"]);
        assert_eq!(c["N1"], c["N2"]);
        assert_eq!(c["N3"], c["N4"]);
        assert_eq!(c["N4"], c["N5"]);
        assert_ne!(c["N0"], c["N5"]);
        assert_eq!(c["N0"], 0);
    }

    #[test]
    fn test_components_merge_barbell() {
        let c = detect_communities_with(&barbell(), CommunityMethod::ConnectedComponents);
        assert!(c.values().all(|&id| id == 0));
    }

    #[test]
    fn test_every_node_assigned() {
        let graph = barbell();
        for method in [
            CommunityMethod::OneHop,
            CommunityMethod::ConnectedComponents,
            CommunityMethod::LabelPropagation,
        ] {
            assert_eq!(detect_communities_with(&graph, method).len(), 6);
        }
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "one-hop".parse::<CommunityMethod>().unwrap(),
            CommunityMethod::OneHop
        );
        assert_eq!(
            "LPA".parse::<CommunityMethod>().unwrap(),
            CommunityMethod::LabelPropagation
        );
        assert!("louvain".parse::<CommunityMethod>().is_err());
    }

    #[test]
    fn test_relabel_by_first_appearance() {
        assert_eq!(relabel_by_first_appearance(&[5, 5, 2, 9, 2]), vec![0, 0, 1, 2, 1]);
    }
}
