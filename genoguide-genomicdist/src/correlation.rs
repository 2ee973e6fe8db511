//! Pearson correlations between per-chromosome and per-gene annotation measures.

use std::collections::HashMap;

use statrs::distribution::{ContinuousCDF, StudentsT};

use genoguide_core::source::RecordSource;

use crate::config::AnalysisConfig;
use crate::errors::GenomicDistResult;
use crate::models::{ChromosomeGeneStats, GeneDensityCorrelation, UtrTranscriptCorrelation};
use crate::utils::{karyotype_ordered, mean};

///
/// Pearson correlation coefficient of `xs` and `ys` with its two-sided
/// p-value from a Student t distribution with `n - 2` degrees of freedom.
///
/// Fewer than two points, or a series without variance, give `(0.0, 1.0)`.
///
pub fn pearson(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return (0.0, 1.0);
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let (mx, my) = (mean(xs), mean(ys));

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx).powi(2);
        syy += (y - my).powi(2);
    }
    if sxx == 0.0 || syy == 0.0 {
        return (0.0, 1.0);
    }

    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    (r, p_value(r, n))
}

fn p_value(r: f64, n: usize) -> f64 {
    // two points always lie on a line
    if n <= 2 {
        return 1.0;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }
    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0),
        Err(_) => 1.0,
    }
}

///
/// Gene density against average gene length, one point per non-mitochondrial
/// chromosome carrying at least one gene.
///
pub fn gene_density_length_correlation<S>(
    source: &S,
    config: &AnalysisConfig,
) -> GenomicDistResult<GeneDensityCorrelation>
where
    S: RecordSource + ?Sized,
{
    let filter = config.chromosome_filter();
    let genes = source.genes()?;

    let mut lengths_by_chrom: HashMap<u32, Vec<f64>> = HashMap::new();
    for gene in genes.iter() {
        lengths_by_chrom
            .entry(gene.chromosome_id)
            .or_default()
            .push(gene.length() as f64);
    }

    let mut chromosome_data = Vec::new();
    for chrom in karyotype_ordered(&source.chromosomes()?) {
        if filter.is_mitochondrial(&chrom.name) {
            continue;
        }
        let Some(lengths) = lengths_by_chrom.get(&chrom.id) else {
            continue;
        };
        let density = match chrom.length {
            0 => 0.0,
            len => lengths.len() as f64 / len as f64,
        };
        chromosome_data.push(ChromosomeGeneStats {
            chromosome: chrom.name,
            gene_count: lengths.len(),
            density,
            average_gene_length: mean(lengths),
        });
    }

    let densities: Vec<f64> = chromosome_data.iter().map(|c| c.density).collect();
    let avg_lengths: Vec<f64> = chromosome_data.iter().map(|c| c.average_gene_length).collect();
    let (correlation_coefficient, p_value) = pearson(&densities, &avg_lengths);

    Ok(GeneDensityCorrelation {
        correlation_coefficient,
        p_value,
        chromosome_data,
    })
}

///
/// Total exon length against total UTR length, one point per gene with at
/// least one exon. Genes without UTRs count with a UTR length of 0.
///
pub fn utr_transcript_correlation<S>(source: &S) -> GenomicDistResult<UtrTranscriptCorrelation>
where
    S: RecordSource + ?Sized,
{
    let mut exon_lengths: HashMap<u32, u64> = HashMap::new();
    for exon in source.exons()?.iter() {
        *exon_lengths.entry(exon.gene_ref).or_insert(0) += (exon.end - exon.start + 1) as u64;
    }
    let mut utr_lengths: HashMap<u32, u64> = HashMap::new();
    for utr in source.utrs()?.iter() {
        *utr_lengths.entry(utr.gene_ref).or_insert(0) += (utr.end - utr.start + 1) as u64;
    }

    // gene order keeps the series deterministic
    let mut transcript = Vec::new();
    let mut utr = Vec::new();
    for gene in source.genes()?.iter() {
        if let Some(exon_len) = exon_lengths.get(&gene.id) {
            transcript.push(*exon_len as f64);
            utr.push(utr_lengths.get(&gene.id).copied().unwrap_or(0) as f64);
        }
    }

    let (correlation_coefficient, p_value) = pearson(&transcript, &utr);
    Ok(UtrTranscriptCorrelation {
        correlation_coefficient,
        p_value,
        total_genes_analyzed: transcript.len(),
        average_transcript_length: mean(&transcript),
        average_utr_length: mean(&utr),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use genoguide_core::models::{Exon, Gene, Strand, Utr};
    use genoguide_core::source::GenomeRecords;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn gene(id: u32, chromosome_id: u32, start: u32, end: u32) -> Gene {
        Gene {
            id,
            chromosome_id,
            gene_id: format!("G{}", id),
            gene_name: None,
            start,
            end,
            strand: Strand::Plus,
        }
    }

    #[rstest]
    fn test_perfectly_linear_data() {
        let (r, p) = pearson(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]);
        assert!((r - 1.0).abs() < 1e-12);
        assert_eq!(p, 0.0);

        let (r, _) = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]);
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[rstest]
    #[case(vec![1.0], vec![2.0])]
    #[case(vec![1.0, 1.0, 1.0], vec![1.0, 2.0, 3.0])]
    #[case(vec![], vec![])]
    fn test_degenerate_inputs(#[case] xs: Vec<f64>, #[case] ys: Vec<f64>) {
        assert_eq!(pearson(&xs, &ys), (0.0, 1.0));
    }

    #[rstest]
    fn test_p_value_of_noisy_data() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ys = [2.0, 1.0, 4.0, 3.0, 6.0, 5.0];
        let (r, p) = pearson(&xs, &ys);
        assert!((r - 0.8286).abs() < 1e-3);
        assert!(p > 0.03 && p < 0.05);
    }

    #[rstest]
    fn test_gene_density_length_correlation() {
        let mut genome = GenomeRecords::new()
            .with_chromosome("chr2", 1000)
            .with_chromosome("chr1", 1000)
            .with_chromosome("chrM", 100)
            .with_chromosome("chr3", 1000);
        genome.genes = vec![
            gene(1, 2, 1, 100),
            gene(2, 2, 200, 299),
            gene(3, 1, 1, 50),
            gene(4, 3, 1, 10),
        ];

        let result = gene_density_length_correlation(&genome, &AnalysisConfig::default()).unwrap();
        let names: Vec<&str> = result.chromosome_data.iter().map(|c| c.chromosome.as_str()).collect();
        assert_eq!(names, vec!["chr1", "chr2"]);
        // ids follow insertion order, so chr1 is id 2
        assert_eq!(result.chromosome_data[0].gene_count, 2);
        assert_eq!(result.chromosome_data[0].density, 0.002);
        assert_eq!(result.chromosome_data[0].average_gene_length, 100.0);
        assert_eq!(result.chromosome_data[1].gene_count, 1);
        // two points: rising density with rising length
        assert!((result.correlation_coefficient - 1.0).abs() < 1e-12);
        assert_eq!(result.p_value, 1.0);
    }

    #[rstest]
    fn test_utr_transcript_correlation() {
        let mut genome = GenomeRecords::new().with_chromosome("chr1", 10_000);
        genome.genes = vec![gene(1, 1, 1, 1000), gene(2, 1, 2000, 3000), gene(3, 1, 5000, 6000)];
        genome.exons = vec![
            Exon { gene_ref: 1, start: 1, end: 100, exon_number: Some(1) },
            Exon { gene_ref: 1, start: 201, end: 300, exon_number: Some(2) },
            Exon { gene_ref: 2, start: 2000, end: 2099, exon_number: Some(1) },
        ];
        genome.utrs = vec![Utr {
            gene_ref: 1,
            start: 1,
            end: 20,
            utr_type: "five_prime_utr".to_string(),
        }];

        let result = utr_transcript_correlation(&genome).unwrap();
        assert_eq!(result.total_genes_analyzed, 2);
        assert_eq!(result.average_transcript_length, 150.0);
        assert_eq!(result.average_utr_length, 10.0);
        assert!((result.correlation_coefficient - 1.0).abs() < 1e-12);
    }
}
