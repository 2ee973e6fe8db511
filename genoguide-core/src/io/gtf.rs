use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use log::{debug, warn};
use regex::Regex;

use crate::errors::{RecordError, RecordResult};
use crate::io::parse_column;
use crate::models::{Exon, Gene, Strand, Utr};
use crate::utils::{ChromosomeIndex, get_dynamic_reader};

/// Genes, exons and UTRs read from one GTF file.
#[derive(Debug, Clone, Default)]
pub struct GtfModel {
    pub genes: Vec<Gene>,
    pub exons: Vec<Exon>,
    pub utrs: Vec<Utr>,
}

struct PendingFeature {
    gene_id: String,
    start: u32,
    end: u32,
    feature: String,
    exon_number: Option<u32>,
}

struct AttributeExtractor {
    gene_id: Regex,
    gene_name: Regex,
    exon_number: Regex,
}

impl AttributeExtractor {
    fn new() -> Self {
        // static patterns; compilation cannot fail
        AttributeExtractor {
            gene_id: Regex::new(r#"gene_id "([^"]+)""#).unwrap(),
            gene_name: Regex::new(r#"gene_name "([^"]+)""#).unwrap(),
            exon_number: Regex::new(r#"exon_number "?(\d+)"?"#).unwrap(),
        }
    }

    fn capture<'a>(re: &Regex, attrs: &'a str) -> Option<&'a str> {
        re.captures(attrs)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }
}

///
/// Read `gene`, `exon` and `*utr*` features from a GTF (or GTF.gz) file.
///
/// GTF coordinates are already 1-based inclusive and are kept as-is.
/// Genes are deduplicated by `gene_id` (first occurrence wins). Exons and
/// UTRs are linked to their gene through `gene_id`; features whose gene is
/// unknown, or which sit on a chromosome that is not in `index`, are dropped.
///
pub fn read_gtf(path: &Path, index: &ChromosomeIndex) -> RecordResult<GtfModel> {
    let reader = get_dynamic_reader(path)?;
    let path_str = path.display().to_string();
    let attrs = AttributeExtractor::new();

    let mut model = GtfModel::default();
    let mut gene_rows: HashMap<String, u32> = HashMap::new();
    let mut pending: Vec<PendingFeature> = Vec::new();
    let mut unknown_chroms: usize = 0;

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_idx + 1;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 9 {
            return Err(RecordError::MalformedRecord {
                path: path_str,
                line: line_no,
                reason: format!("expected 9 columns, found {}", fields.len()),
            });
        }

        let feature = fields[2];
        let is_utr = feature.to_ascii_lowercase().contains("utr");
        if !(feature == "gene" || feature == "exon" || is_utr) {
            continue;
        }

        let Some(chromosome_id) = index.resolve(fields[0]) else {
            unknown_chroms += 1;
            continue;
        };

        let start: u32 = parse_column(&fields, 3, "start", &path_str, line_no)?;
        let end: u32 = parse_column(&fields, 4, "end", &path_str, line_no)?;
        if start > end {
            return Err(RecordError::MalformedRecord {
                path: path_str,
                line: line_no,
                reason: format!("start {} is after end {}", start, end),
            });
        }

        let Some(gene_id) = AttributeExtractor::capture(&attrs.gene_id, fields[8]) else {
            debug!("{}:{}: {} without gene_id, skipping", path_str, line_no, feature);
            continue;
        };

        if feature == "gene" {
            if gene_rows.contains_key(gene_id) {
                continue;
            }
            let id = model.genes.len() as u32 + 1;
            gene_rows.insert(gene_id.to_string(), id);
            model.genes.push(Gene {
                id,
                chromosome_id,
                gene_id: gene_id.to_string(),
                gene_name: AttributeExtractor::capture(&attrs.gene_name, fields[8])
                    .map(|s| s.to_string()),
                start,
                end,
                strand: Strand::from_char(fields[6].chars().next().unwrap_or('.')),
            });
        } else {
            pending.push(PendingFeature {
                gene_id: gene_id.to_string(),
                start,
                end,
                feature: feature.to_string(),
                exon_number: AttributeExtractor::capture(&attrs.exon_number, fields[8])
                    .and_then(|s| s.parse().ok()),
            });
        }
    }

    let mut orphans: usize = 0;
    for feature in pending {
        let Some(&gene_ref) = gene_rows.get(&feature.gene_id) else {
            orphans += 1;
            continue;
        };
        if feature.feature == "exon" {
            model.exons.push(Exon {
                gene_ref,
                start: feature.start,
                end: feature.end,
                exon_number: feature.exon_number,
            });
        } else {
            model.utrs.push(Utr {
                gene_ref,
                start: feature.start,
                end: feature.end,
                utr_type: feature.feature,
            });
        }
    }

    if unknown_chroms > 0 {
        warn!(
            "{}: dropped {} features on chromosomes missing from the genome",
            path_str, unknown_chroms
        );
    }
    if orphans > 0 {
        warn!("{}: dropped {} features without a gene record", path_str, orphans);
    }

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Chromosome;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;

    fn index() -> ChromosomeIndex {
        ChromosomeIndex::new(&[
            Chromosome::new(1, "chr1", 300000),
            Chromosome::new(2, "chr2", 300000),
        ])
    }

    fn write_gtf(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".gtf").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[rstest]
    fn test_read_gtf_links_features_to_genes() {
        let file = write_gtf(concat!(
            "#!genome-build GRCh38\n",
            "1\thavana\tgene\t11869\t14409\t.\t+\t.\tgene_id \"ENSG00000223972\"; gene_name \"DDX11L1\";\n",
            "1\thavana\texon\t11869\t12227\t.\t+\t.\tgene_id \"ENSG00000223972\"; exon_number \"1\";\n",
            "1\thavana\tfive_prime_utr\t11869\t11900\t.\t+\t.\tgene_id \"ENSG00000223972\";\n",
            "chr2\thavana\tgene\t100\t200\t.\t-\t.\tgene_id \"ENSG0000000002\";\n",
            "chrUn\thavana\tgene\t100\t200\t.\t-\t.\tgene_id \"ENSG0000000003\";\n",
        ));

        let model = read_gtf(file.path(), &index()).unwrap();

        assert_eq!(model.genes.len(), 2);
        assert_eq!(model.genes[0].chromosome_id, 1);
        assert_eq!(model.genes[0].label(), "DDX11L1");
        assert_eq!(model.genes[0].start, 11869);
        assert_eq!(model.genes[1].strand, Strand::Minus);
        assert_eq!(model.genes[1].label(), "ENSG0000000002");

        assert_eq!(model.exons.len(), 1);
        assert_eq!(model.exons[0].gene_ref, 1);
        assert_eq!(model.exons[0].exon_number, Some(1));

        assert_eq!(model.utrs.len(), 1);
        assert_eq!(model.utrs[0].utr_type, "five_prime_utr");
    }

    #[rstest]
    fn test_duplicate_gene_ids_keep_first() {
        let file = write_gtf(concat!(
            "chr1\tx\tgene\t10\t20\t.\t+\t.\tgene_id \"G1\";\n",
            "chr1\tx\tgene\t30\t40\t.\t+\t.\tgene_id \"G1\";\n",
        ));
        let model = read_gtf(file.path(), &index()).unwrap();
        assert_eq!(model.genes.len(), 1);
        assert_eq!(model.genes[0].start, 10);
    }

    #[rstest]
    fn test_short_line_is_malformed() {
        let file = write_gtf("chr1\tx\tgene\t10\n");
        let result = read_gtf(file.path(), &index());
        assert!(matches!(
            result,
            Err(RecordError::MalformedRecord { line: 1, .. })
        ));
    }
}
