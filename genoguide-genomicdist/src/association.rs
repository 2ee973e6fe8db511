//! Spatial relations between annotation sets: CpG islands touching genes,
//! and genes nested inside other genes.

use genoguide_core::models::{CpgIsland, Gene};
use genoguide_overlaprs::{MultiChromIntervals, find_nested, overlap_counts};

use crate::errors::GenomicDistResult;
use crate::models::{IslandGeneAssociation, NestedGenePair, NestedGenes};

/// Islands overlapping at least one gene on the same chromosome.
pub fn island_gene_association(
    islands: &[CpgIsland],
    genes: &[Gene],
) -> GenomicDistResult<IslandGeneAssociation> {
    if islands.is_empty() {
        return Ok(IslandGeneAssociation {
            total_islands: 0,
            associated_with_genes: None,
            non_associated: None,
            percentage_associated: None,
        });
    }

    let islands = MultiChromIntervals::from_features(islands, |_: &CpgIsland| ())?;
    let genes = MultiChromIntervals::from_features(genes, |_: &Gene| ())?;
    let counts = overlap_counts(&islands, &genes);

    Ok(IslandGeneAssociation {
        total_islands: counts.total,
        associated_with_genes: Some(counts.overlapping),
        non_associated: Some(counts.non_overlapping),
        percentage_associated: Some(counts.percentage()),
    })
}

/// Every gene lying fully inside another gene, labelled by name or stable id.
pub fn nested_genes(genes: &[Gene]) -> GenomicDistResult<NestedGenes> {
    let by_chrom = MultiChromIntervals::from_features(genes, |g: &Gene| g.label().to_string())?;

    let nested_pairs: Vec<NestedGenePair> = find_nested(&by_chrom)
        .into_iter()
        .map(|pair| NestedGenePair {
            inner_gene: pair.inner,
            outer_gene: pair.outer,
            chromosome_id: pair.chromosome_id,
        })
        .collect();

    Ok(NestedGenes {
        total_nested_pairs: nested_pairs.len(),
        nested_pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use genoguide_core::models::Strand;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn gene(id: u32, name: Option<&str>, start: u32, end: u32) -> Gene {
        Gene {
            id,
            chromosome_id: 1,
            gene_id: format!("ENSG{:011}", id),
            gene_name: name.map(|n| n.to_string()),
            start,
            end,
            strand: Strand::Plus,
        }
    }

    fn island(start: u32, end: u32) -> CpgIsland {
        CpgIsland {
            chromosome_id: 1,
            start,
            end,
            name: None,
            length: Some(end - start + 1),
            cpg_num: None,
            gc_num: None,
            per_gc: None,
            per_cpg: None,
        }
    }

    #[rstest]
    fn test_island_overlapping_gene() {
        let result =
            island_gene_association(&[island(11000, 12000)], &[gene(1, Some("DDX11L1"), 11869, 14409)])
                .unwrap();
        assert_eq!(result.total_islands, 1);
        assert_eq!(result.associated_with_genes, Some(1));
        assert_eq!(result.non_associated, Some(0));
        assert_eq!(result.percentage_associated, Some(100.0));
    }

    #[rstest]
    fn test_no_islands_is_degenerate() {
        let result = island_gene_association(&[], &[gene(1, None, 1, 10)]).unwrap();
        assert_eq!(result.total_islands, 0);
        assert_eq!(result.associated_with_genes, None);
    }

    #[rstest]
    fn test_no_genes_means_nothing_associated() {
        let result = island_gene_association(&[island(1, 10), island(20, 30)], &[]).unwrap();
        assert_eq!(result.total_islands, 2);
        assert_eq!(result.associated_with_genes, Some(0));
        assert_eq!(result.percentage_associated, Some(0.0));
    }

    #[rstest]
    fn test_nested_gene_labels_fall_back_to_gene_id() {
        let genes = vec![
            gene(1, Some("OUTER"), 10000, 20000),
            gene(2, None, 13000, 14000),
            gene(3, Some("ELSEWHERE"), 30000, 40000),
        ];
        let result = nested_genes(&genes).unwrap();
        assert_eq!(result.total_nested_pairs, 1);
        assert_eq!(
            result.nested_pairs,
            vec![NestedGenePair {
                inner_gene: "ENSG00000000002".to_string(),
                outer_gene: "OUTER".to_string(),
                chromosome_id: 1,
            }]
        );
    }
}
