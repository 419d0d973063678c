use anyhow::Result;
use gadgraph::algo::{
    associations, common_diseases, common_genes, expand_subgraph, filtered_neighbors,
    rank_similar, top_connected,
};
use gadgraph::graph::{
    AssociationRecord, DiseaseAttributes, GeneAttributes, GraphStore, Node, NodeId, NodeKind,
};
use gadgraph::AnalysisSession;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("GADGraph v{}", gadgraph::version());
    println!("==========================================");
    println!();

    let session = AnalysisSession::default();
    let store = session.reload(demo_nodes(), demo_associations())?;

    // Demo 1: Graph
    demo_graph(&store);

    // Demo 2: Associations and overlaps
    demo_associations_and_overlaps(&store)?;

    // Demo 3: Rankings
    demo_rankings(&store)?;

    // Demo 4: Hub expansion
    demo_hubs(&store)?;

    Ok(())
}

fn demo_nodes() -> Vec<Node> {
    let gene = |key: &str, symbol: &str, dsi: f64| {
        Node::gene(
            key,
            symbol,
            GeneAttributes {
                dsi: Some(dsi),
                ..GeneAttributes::default()
            },
        )
    };
    let disease = |key: &str, name: &str, class: &str| {
        Node::disease(
            key,
            name,
            DiseaseAttributes {
                disease_type: Some("disease".to_string()),
                disease_class: Some(class.to_string()),
                ..DiseaseAttributes::default()
            },
        )
    };

    vec![
        gene("672", "BRCA1", 0.36),
        gene("7157", "TP53", 0.27),
        gene("348", "APOE", 0.32),
        gene("7124", "TNF", 0.29),
        disease("C0006142", "Malignant neoplasm of breast", "C04"),
        disease("C0002395", "Alzheimer's Disease", "C10"),
        disease("C0003873", "Rheumatoid Arthritis", "C05"),
        disease("C0007102", "Malignant tumor of colon", "C04"),
    ]
}

fn demo_associations() -> Vec<AssociationRecord> {
    vec![
        AssociationRecord::new("672", "C0006142", 1.0).with_evidence(0.98, "definitive"),
        AssociationRecord::new("672", "C0007102", 0.4),
        AssociationRecord::new("7157", "C0006142", 0.9).with_evidence(0.95, "strong"),
        AssociationRecord::new("7157", "C0007102", 0.8),
        AssociationRecord::new("7157", "C0002395", 0.3),
        AssociationRecord::new("348", "C0002395", 1.0).with_evidence(1.0, "definitive"),
        AssociationRecord::new("7124", "C0003873", 0.8),
        AssociationRecord::new("7124", "C0002395", 0.5),
    ]
}

fn demo_graph(store: &Arc<GraphStore>) {
    println!("=== Demo 1: Association Graph ===");
    let stats = store.statistics();
    println!("  Genes:        {}", stats.genes);
    println!("  Diseases:     {}", stats.diseases);
    println!("  Associations: {}", stats.associations);
}

fn demo_associations_and_overlaps(store: &Arc<GraphStore>) -> Result<()> {
    println!("\n=== Demo 2: Associations ===");

    let tp53 = NodeId::gene("7157");
    println!("\nDiseases associated with TP53 (score >= 0.5):");
    for neighbor in associations(store, &tp53, 0.5)? {
        println!("  → {} ({:.2})", neighbor.label, neighbor.score);
    }

    let strong = filtered_neighbors(store, &tp53, 0.85)?;
    println!("\nTP53 diseases at score >= 0.85: {}", strong.len());

    let shared = common_diseases(store, "672", "7157", 0.5)?;
    println!("\nDiseases shared by BRCA1 and TP53 (score >= 0.5):");
    for id in &shared {
        println!("  → {}", store.node(id)?.label);
    }

    let genes = common_genes(store, "C0006142", "C0007102", 0.0)?;
    println!("\nGenes shared by breast and colon neoplasms: {}", genes.len());

    Ok(())
}

fn demo_rankings(store: &Arc<GraphStore>) -> Result<()> {
    println!("\n=== Demo 3: Rankings ===");

    println!("\nGenes most similar to TP53 (score >= 0.3):");
    for similar in rank_similar(store, &NodeId::gene("7157"), 0.3, 3)? {
        println!("  → {} shares {} diseases", similar.label, similar.shared_count);
    }

    println!("\nMost connected diseases (score >= 0.3):");
    for ranked in top_connected(store, NodeKind::Disease, 0.3, 3) {
        println!("  → {} ({} genes)", ranked.label, ranked.count);
    }

    Ok(())
}

fn demo_hubs(store: &Arc<GraphStore>) -> Result<()> {
    println!("\n=== Demo 4: Hub Expansion ===");

    let seed = NodeId::disease("C0002395");
    let hubs = expand_subgraph(store, &seed, 1)?;
    println!("\nHub cluster around Alzheimer's Disease (degree > 1):");
    for id in &hubs {
        println!("  → {} ({})", store.node(id)?.label, id);
    }

    let edges = store.induced_edges(&hubs);
    println!("  {} associations inside the cluster", edges.len());

    Ok(())
}
