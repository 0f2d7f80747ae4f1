//! Knowledge graph produced by semantic fusion
//!
//! Nodes carry one value each, tagged with the source domain; edges are
//! undirected domain-pair relations, deduplicated under a canonical ordering
//! of the pair. The graph is a value record: built once per run, never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// Source domain of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Human narratives, demographics, social signals
    Humano,
    /// Geographic layers and infrastructure
    Espacial,
    /// Historical patterns and trends
    Temporal,
    /// Biodiversity, climate, environmental constraints
    Ecologico,
}

impl Domain {
    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Humano => "humano",
            Domain::Espacial => "espacial",
            Domain::Temporal => "temporal",
            Domain::Ecologico => "ecologico",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value carried by a graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    /// Numeric field
    Number(f64),
    /// Textual field
    Text(String),
    /// Boolean field
    Flag(bool),
}

impl NodeValue {
    /// Numeric view; non-numeric values read as 0.0
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self {
            NodeValue::Number(n) => *n,
            NodeValue::Flag(true) => 1.0,
            NodeValue::Flag(false) | NodeValue::Text(_) => 0.0,
        }
    }

    /// Boolean view; numbers are truthy when non-zero
    #[inline]
    #[must_use]
    pub fn as_flag(&self) -> bool {
        match self {
            NodeValue::Flag(b) => *b,
            NodeValue::Number(n) => *n != 0.0,
            NodeValue::Text(_) => false,
        }
    }
}

/// One node of the knowledge graph: a single input field or derived entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Source domain
    #[serde(rename = "dominio")]
    pub domain: Domain,
    /// Field name within the domain
    #[serde(rename = "clave")]
    pub key: String,
    /// Field value
    #[serde(rename = "valor")]
    pub value: NodeValue,
}

impl Node {
    /// Create a node
    #[inline]
    #[must_use]
    pub fn new(domain: Domain, key: impl Into<String>, value: NodeValue) -> Self {
        Self {
            domain,
            key: key.into(),
            value,
        }
    }

    /// Numeric node
    #[inline]
    #[must_use]
    pub fn number(domain: Domain, key: impl Into<String>, value: f64) -> Self {
        Self::new(domain, key, NodeValue::Number(value))
    }
}

/// Undirected domain-pair relation
///
/// The pair is stored in canonical (sorted) order so duplicates collapse
/// regardless of insertion direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// First domain of the canonical pair
    #[serde(rename = "origen")]
    pub a: Domain,
    /// Second domain of the canonical pair
    #[serde(rename = "destino")]
    pub b: Domain,
    /// Relation label
    #[serde(rename = "relacion")]
    pub relation: String,
}

impl Edge {
    /// Create an edge with the domain pair in canonical order
    #[must_use]
    pub fn new(a: Domain, b: Domain, relation: impl Into<String>) -> Self {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        Self {
            a,
            b,
            relation: relation.into(),
        }
    }
}

/// The fused knowledge graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    /// Graph nodes, in insertion (fusion) order
    #[serde(rename = "nodos")]
    pub nodes: Vec<Node>,
    /// Deduplicated undirected edges
    #[serde(rename = "aristas")]
    pub edges: Vec<Edge>,
}

impl KnowledgeGraph {
    /// Create an empty graph
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node
    #[inline]
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Append an edge unless an equal one is already present
    pub fn add_edge(&mut self, edge: Edge) {
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    /// Find a node by domain and key
    #[must_use]
    pub fn node(&self, domain: Domain, key: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.domain == domain && n.key == key)
    }

    /// Numeric value of a node, 0.0 when absent or non-numeric
    #[inline]
    #[must_use]
    pub fn number(&self, domain: Domain, key: &str) -> f64 {
        self.node(domain, key).map_or(0.0, |n| n.value.as_number())
    }

    /// Boolean value of a node, false when absent
    #[inline]
    #[must_use]
    pub fn flag(&self, domain: Domain, key: &str) -> bool {
        self.node(domain, key).is_some_and(|n| n.value.as_flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_canonical_ordering_deduplicates() {
        let mut graph = KnowledgeGraph::new();
        graph.add_edge(Edge::new(Domain::Ecologico, Domain::Humano, "presion_ecologica"));
        graph.add_edge(Edge::new(Domain::Humano, Domain::Ecologico, "presion_ecologica"));
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].a, Domain::Humano);
        assert_eq!(graph.edges[0].b, Domain::Ecologico);
    }

    #[test]
    fn node_lookup_and_numeric_default() {
        let mut graph = KnowledgeGraph::new();
        graph.add_node(Node::number(Domain::Ecologico, "biodiversidad_perdida", 0.3));
        graph.add_node(Node::new(Domain::Humano, "acceso_desigual", NodeValue::Flag(true)));

        assert_eq!(graph.number(Domain::Ecologico, "biodiversidad_perdida"), 0.3);
        assert_eq!(graph.number(Domain::Espacial, "inexistente"), 0.0);
        assert!(graph.flag(Domain::Humano, "acceso_desigual"));
    }

    #[test]
    fn node_value_views() {
        assert_eq!(NodeValue::Number(2.5).as_number(), 2.5);
        assert_eq!(NodeValue::Flag(true).as_number(), 1.0);
        assert_eq!(NodeValue::Text("x".to_string()).as_number(), 0.0);
        assert!(NodeValue::Number(0.1).as_flag());
    }

    #[test]
    fn graph_serializes_with_spanish_keys() {
        let mut graph = KnowledgeGraph::new();
        graph.add_node(Node::number(Domain::Espacial, "area_km2", 50_000.0));
        let json = serde_json::to_value(&graph).unwrap();
        assert!(json.get("nodos").is_some());
        assert!(json.get("aristas").is_some());
        assert_eq!(json["nodos"][0]["dominio"], "espacial");
    }
}
