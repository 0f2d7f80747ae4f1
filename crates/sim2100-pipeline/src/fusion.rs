//! Semantic fusion: merge the four domain inputs into one knowledge graph
//!
//! One node per documented input field, tagged with its source domain, plus
//! a derived population-density node. The edge set is fixed and total: the
//! same inputs always produce the same graph, including edge count.

use sim2100_model::error::Diagnostic;
use sim2100_model::graph::{Domain, Edge, KnowledgeGraph, Node, NodeValue};
use sim2100_model::input::ScenarioInputs;
use sim2100_model::metrics::safe_ratio;

/// Key of the derived density node
pub const DENSITY_NODE: &str = "densidad_poblacional";

/// The fixed cross-domain relation set
const RELATIONS: [(Domain, Domain, &str); 5] = [
    (Domain::Humano, Domain::Espacial, "densidad"),
    (Domain::Humano, Domain::Ecologico, "presion_ecologica"),
    (Domain::Espacial, Domain::Ecologico, "infraestructura_verde"),
    (Domain::Temporal, Domain::Humano, "trayectoria_demografica"),
    (Domain::Temporal, Domain::Ecologico, "deriva_climatica"),
];

/// Fuse the validated inputs into a knowledge graph
///
/// Never fails: degraded derivations (zero-area density) substitute defaults
/// and record a diagnostic.
pub fn fuse(inputs: &ScenarioInputs, diagnostics: &mut Vec<Diagnostic>) -> KnowledgeGraph {
    let mut graph = KnowledgeGraph::new();

    let human = &inputs.human;
    graph.add_node(Node::number(Domain::Humano, "poblacion", human.poblacion));
    graph.add_node(Node::number(Domain::Humano, "diversidad_cultural", human.diversidad_cultural));
    graph.add_node(Node::number(Domain::Humano, "desigualdad_recursos", human.desigualdad_recursos));
    graph.add_node(Node::new(
        Domain::Humano,
        "acceso_desigual",
        NodeValue::Flag(human.acceso_desigual),
    ));
    graph.add_node(Node::number(
        Domain::Humano,
        "participacion_civica",
        human.participacion_civica,
    ));

    let spatial = &inputs.spatial;
    graph.add_node(Node::number(Domain::Espacial, "area_km2", spatial.area_km2));
    graph.add_node(Node::number(Domain::Espacial, "conectividad", spatial.conectividad));
    graph.add_node(Node::number(
        Domain::Espacial,
        "infraestructura_verde",
        spatial.infraestructura_verde,
    ));
    graph.add_node(Node::number(Domain::Espacial, "accesibilidad", spatial.accesibilidad));

    // Derived density: declared value wins, otherwise population over area
    let density = if human.densidad_urbana > 0.0 {
        human.densidad_urbana
    } else {
        safe_ratio(human.poblacion, spatial.area_km2, DENSITY_NODE, diagnostics)
    };
    graph.add_node(Node::number(Domain::Espacial, DENSITY_NODE, density));

    let temporal = &inputs.temporal;
    graph.add_node(Node::new(
        Domain::Temporal,
        "horizonte",
        NodeValue::Text(temporal.horizonte.clone()),
    ));
    graph.add_node(Node::number(
        Domain::Temporal,
        "tendencia_crecimiento",
        temporal.tendencia_crecimiento,
    ));
    graph.add_node(Node::number(
        Domain::Temporal,
        "velocidad_cambio",
        temporal.velocidad_cambio,
    ));

    let ecological = &inputs.ecological;
    graph.add_node(Node::number(
        Domain::Ecologico,
        "biodiversidad_perdida",
        ecological.biodiversidad_perdida,
    ));
    graph.add_node(Node::number(
        Domain::Ecologico,
        "temperatura_aumento",
        ecological.temperatura_aumento,
    ));
    graph.add_node(Node::number(
        Domain::Ecologico,
        "recursos_hidricos",
        ecological.recursos_hidricos,
    ));
    graph.add_node(Node::number(Domain::Ecologico, "calidad_aire", ecological.calidad_aire));

    for (a, b, relation) in RELATIONS {
        graph.add_edge(Edge::new(a, b, relation));
    }

    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "knowledge graph fused"
    );
    graph
}
