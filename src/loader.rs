//! CSV loader for DisGeNET-style association tables
//!
//! Reads three tables (genes, diseases, gene-disease associations) and builds
//! a `GraphStore` from them. Files ending in `.tsv` are read tab-separated,
//! everything else comma-separated. Empty fields and the literal `NULL` are
//! read as absent values. Columns the loader does not know are ignored.

use crate::graph::{
    AssociationRecord, BuildError, BuildOptions, DiseaseAttributes, GeneAttributes, GraphStore,
    Node,
};
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid value '{value}' for {field} on line {line}")]
    InvalidField {
        field: &'static str,
        value: String,
        line: u64,
    },

    #[error("Graph build failed: {0}")]
    Build(#[from] BuildError),
}

pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug, Deserialize)]
struct GeneRow {
    #[serde(rename = "geneId")]
    gene_id: String,
    #[serde(rename = "geneSymbol")]
    gene_symbol: String,
    #[serde(rename = "DSI", default)]
    dsi: Option<String>,
    #[serde(rename = "DPI", default)]
    dpi: Option<String>,
    #[serde(rename = "PLI", default)]
    pli: Option<String>,
    #[serde(default)]
    protein_class_name: Option<String>,
    #[serde(default)]
    protein_class: Option<String>,
    #[serde(rename = "NofDiseases", default)]
    n_diseases: Option<String>,
    #[serde(rename = "NofPmids", default)]
    n_pmids: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiseaseRow {
    #[serde(rename = "diseaseId")]
    disease_id: String,
    #[serde(rename = "diseaseName")]
    disease_name: String,
    #[serde(rename = "diseaseType", default)]
    disease_type: Option<String>,
    #[serde(rename = "diseaseClass", default)]
    disease_class: Option<String>,
    #[serde(rename = "diseaseSemanticType", default)]
    semantic_type: Option<String>,
    #[serde(rename = "NofGenes", default)]
    n_genes: Option<String>,
    #[serde(rename = "NofPmids", default)]
    n_pmids: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssociationRow {
    #[serde(rename = "geneId")]
    gene_id: String,
    #[serde(rename = "diseaseId")]
    disease_id: String,
    score: String,
    #[serde(alias = "EI", alias = "ei", default)]
    evidence_index: Option<String>,
    #[serde(alias = "EL", alias = "el", default)]
    evidence_level: Option<String>,
    #[serde(alias = "yearInitial", default)]
    year_initial: Option<String>,
    #[serde(alias = "yearFinal", default)]
    year_final: Option<String>,
    #[serde(alias = "g_source", default)]
    source: Option<String>,
}

/// Drop empty and `NULL` fields
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "NULL")
}

fn parse_field<T: FromStr>(
    value: Option<String>,
    field: &'static str,
    line: u64,
) -> LoadResult<Option<T>> {
    match present(value) {
        None => Ok(None),
        Some(text) => text
            .parse::<T>()
            .map(Some)
            .map_err(|_| LoadError::InvalidField {
                field,
                value: text,
                line,
            }),
    }
}

/// Whole-number counts are sometimes exported as floats (`12.0`)
fn parse_count(value: Option<String>, field: &'static str, line: u64) -> LoadResult<Option<u32>> {
    match present(value) {
        None => Ok(None),
        Some(text) => match text.parse::<u32>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => match text.parse::<f64>() {
                Ok(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(Some(f as u32)),
                _ => Err(LoadError::InvalidField {
                    field,
                    value: text,
                    line,
                }),
            },
        },
    }
}

fn csv_reader<R: io::Read>(reader: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .from_reader(reader)
}

/// Deserialize every row of `reader`, handing each row and its line to `convert`
fn read_rows<R, Row, T, F>(reader: R, delimiter: u8, mut convert: F) -> LoadResult<Vec<T>>
where
    R: io::Read,
    Row: for<'de> Deserialize<'de>,
    F: FnMut(Row, u64) -> LoadResult<T>,
{
    let mut rdr = csv_reader(reader, delimiter);
    let headers = rdr.headers()?.clone();
    let mut out = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let row: Row = record.deserialize(Some(&headers))?;
        out.push(convert(row, line)?);
    }

    Ok(out)
}

/// Read gene nodes from a comma-separated table
pub fn read_genes<R: io::Read>(reader: R) -> LoadResult<Vec<Node>> {
    read_genes_delimited(reader, b',')
}

fn read_genes_delimited<R: io::Read>(reader: R, delimiter: u8) -> LoadResult<Vec<Node>> {
    read_rows(reader, delimiter, |row: GeneRow, line| {
        let attributes = GeneAttributes {
            dsi: parse_field(row.dsi, "DSI", line)?,
            dpi: parse_field(row.dpi, "DPI", line)?,
            pli: parse_field(row.pli, "PLI", line)?,
            protein_class_name: present(row.protein_class_name),
            protein_class: present(row.protein_class),
            n_diseases: parse_count(row.n_diseases, "NofDiseases", line)?,
            n_pmids: parse_count(row.n_pmids, "NofPmids", line)?,
        };
        Ok(Node::gene(row.gene_id.trim(), row.gene_symbol.trim(), attributes))
    })
}

/// Read disease nodes from a comma-separated table
pub fn read_diseases<R: io::Read>(reader: R) -> LoadResult<Vec<Node>> {
    read_diseases_delimited(reader, b',')
}

fn read_diseases_delimited<R: io::Read>(reader: R, delimiter: u8) -> LoadResult<Vec<Node>> {
    read_rows(reader, delimiter, |row: DiseaseRow, line| {
        let attributes = DiseaseAttributes {
            disease_type: present(row.disease_type),
            disease_class: present(row.disease_class),
            semantic_type: present(row.semantic_type),
            n_genes: parse_count(row.n_genes, "NofGenes", line)?,
            n_pmids: parse_count(row.n_pmids, "NofPmids", line)?,
        };
        Ok(Node::disease(row.disease_id.trim(), row.disease_name.trim(), attributes))
    })
}

/// Read gene-disease associations from a comma-separated table
pub fn read_associations<R: io::Read>(reader: R) -> LoadResult<Vec<AssociationRecord>> {
    read_associations_delimited(reader, b',')
}

fn read_associations_delimited<R: io::Read>(
    reader: R,
    delimiter: u8,
) -> LoadResult<Vec<AssociationRecord>> {
    read_rows(reader, delimiter, |row: AssociationRow, line| {
        let score = parse_field(Some(row.score), "score", line)?.ok_or(LoadError::InvalidField {
            field: "score",
            value: String::new(),
            line,
        })?;
        Ok(AssociationRecord {
            gene: row.gene_id.trim().to_string(),
            disease: row.disease_id.trim().to_string(),
            score,
            evidence_index: parse_field(row.evidence_index, "evidence_index", line)?,
            evidence_level: present(row.evidence_level),
            year_initial: parse_field(row.year_initial, "year_initial", line)?,
            year_final: parse_field(row.year_final, "year_final", line)?,
            source: present(row.source),
        })
    })
}

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Load the three tables and build a graph with default options
pub fn load_graph(
    genes: impl AsRef<Path>,
    diseases: impl AsRef<Path>,
    associations: impl AsRef<Path>,
) -> LoadResult<GraphStore> {
    load_graph_with(genes, diseases, associations, &BuildOptions::default())
}

/// Load the three tables and build a graph
///
/// Genes are inserted before diseases, each in file order.
pub fn load_graph_with(
    genes: impl AsRef<Path>,
    diseases: impl AsRef<Path>,
    associations: impl AsRef<Path>,
    options: &BuildOptions,
) -> LoadResult<GraphStore> {
    let (genes, diseases, associations) = (genes.as_ref(), diseases.as_ref(), associations.as_ref());

    let mut nodes = read_genes_delimited(File::open(genes)?, delimiter_for(genes))?;
    info!("Read {} genes from {:?}", nodes.len(), genes);

    let disease_nodes = read_diseases_delimited(File::open(diseases)?, delimiter_for(diseases))?;
    info!("Read {} diseases from {:?}", disease_nodes.len(), diseases);
    nodes.extend(disease_nodes);

    let records =
        read_associations_delimited(File::open(associations)?, delimiter_for(associations))?;
    info!("Read {} associations from {:?}", records.len(), associations);

    Ok(GraphStore::build_with(nodes, records, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;
    use std::io::Write;

    const GENES: &str = "geneId,geneSymbol,DSI,DPI,PLI,protein_class_name,protein_class,NofDiseases,NofPmids\n\
19,ABCA1,0.421,0.828,4.5e-11,Transporter,DTO_05007624,263,453\n\
7124,TNF,,NULL,,,,1893.0,9000\n";

    const DISEASES: &str = "diseaseId,diseaseName,diseaseType,diseaseClass,diseaseSemanticType,NofGenes,NofPmids\n\
C0039292,Tangier Disease,disease,C18,Disease or Syndrome,12,95\n\
C0003873,Rheumatoid Arthritis,disease,NULL,Disease or Syndrome,2436,22000\n";

    const GAD: &str = "geneId,diseaseId,score,EI,EL,yearInitial,yearFinal,source\n\
19,C0039292,0.9,1.0,definitive,1999,2019,CURATED\n\
7124,C0003873,0.7,0.98,,2001,2020,BEFREE\n";

    #[test]
    fn test_read_genes() {
        let genes = read_genes(GENES.as_bytes()).unwrap();
        assert_eq!(genes.len(), 2);
        assert_eq!(genes[0].label, "ABCA1");
        let attrs = genes[0].gene_attributes().unwrap();
        assert_eq!(attrs.dsi, Some(0.421));
        assert_eq!(attrs.protein_class_name.as_deref(), Some("Transporter"));

        let tnf = genes[1].gene_attributes().unwrap();
        assert_eq!(tnf.dsi, None);
        assert_eq!(tnf.dpi, None);
        assert_eq!(tnf.n_diseases, Some(1893));
    }

    #[test]
    fn test_read_diseases() {
        let diseases = read_diseases(DISEASES.as_bytes()).unwrap();
        assert_eq!(diseases[1].id, NodeId::disease("C0003873"));
        let attrs = diseases[1].disease_attributes().unwrap();
        assert_eq!(attrs.disease_class, None);
        assert_eq!(attrs.n_genes, Some(2436));
    }

    #[test]
    fn test_read_associations() {
        let records = read_associations(GAD.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].score, 0.9);
        assert_eq!(records[0].evidence_level.as_deref(), Some("definitive"));
        assert_eq!(records[0].year_initial, Some(1999));
        assert_eq!(records[1].evidence_level, None);
        assert_eq!(records[1].source.as_deref(), Some("BEFREE"));
    }

    #[test]
    fn test_invalid_score() {
        let bad = "geneId,diseaseId,score\n19,C0039292,high\n";
        let err = read_associations(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { field: "score", line: 2, .. }));
    }

    #[test]
    fn test_load_graph_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, content: &str| {
            let path = dir.path().join(name);
            let mut file = File::create(&path).unwrap();
            file.write_all(content.as_bytes()).unwrap();
            path
        };
        let genes = write("genes.csv", GENES);
        let diseases = write("diseases.tsv", &DISEASES.replace(',', "\t"));
        let gad = write("gad.csv", GAD);

        let store = load_graph(&genes, &diseases, &gad).unwrap();
        assert_eq!(store.node_count(), 4);
        assert_eq!(store.edge_count(), 2);
        assert_eq!(
            store.resolve(crate::graph::NodeKind::Disease, "Tangier Disease").unwrap().id,
            NodeId::disease("C0039292")
        );
    }

    #[test]
    fn test_load_graph_unknown_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let genes = dir.path().join("genes.csv");
        let diseases = dir.path().join("diseases.csv");
        let gad = dir.path().join("gad.csv");
        std::fs::write(&genes, GENES).unwrap();
        std::fs::write(&diseases, DISEASES).unwrap();
        std::fs::write(&gad, "geneId,diseaseId,score\n19,C9999999,0.5\n").unwrap();

        let err = load_graph(&genes, &diseases, &gad).unwrap_err();
        assert!(matches!(err, LoadError::Build(BuildError::UnknownDisease(_))));
    }
}
