//! Named batch jobs: each pulls records from a [`RecordSource`], runs one
//! engine and returns the statistics to store.

use std::fmt::{self, Display};
use std::str::FromStr;

use log::info;

use genoguide_core::source::RecordSource;

use crate::association::{island_gene_association, nested_genes};
use crate::composition::{cpg_frequency_per_chromosome, genome_composition, genome_dinucleotide_frequency};
use crate::config::AnalysisConfig;
use crate::correlation::{gene_density_length_correlation, utr_transcript_correlation};
use crate::density::gene_density;
use crate::errors::{GenomicDistError, GenomicDistResult};
use crate::models::Statistic;
use crate::motifs::scan_genome;
use crate::rna::rna_distribution;
use crate::ssr_stats::ssr_statistics;

/// Record kinds an analysis reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Sequence,
    Genes,
    CpgIslands,
    SimpleRepeats,
    NonCodingRnas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Analysis {
    BaseComposition,
    DinucleotideFrequency,
    CpgFrequency,
    SimpleSequenceRepeats,
    CpgIslandGeneAssociation,
    NestedGenes,
    GeneDensity,
    GeneDensityLengthCorrelation,
    UtrTranscriptCorrelation,
    RnaDistribution,
    SsrStatistics,
}

impl Analysis {
    pub const ALL: [Analysis; 11] = [
        Analysis::BaseComposition,
        Analysis::DinucleotideFrequency,
        Analysis::CpgFrequency,
        Analysis::SimpleSequenceRepeats,
        Analysis::CpgIslandGeneAssociation,
        Analysis::NestedGenes,
        Analysis::GeneDensity,
        Analysis::GeneDensityLengthCorrelation,
        Analysis::UtrTranscriptCorrelation,
        Analysis::RnaDistribution,
        Analysis::SsrStatistics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Analysis::BaseComposition => "base_composition",
            Analysis::DinucleotideFrequency => "dinucleotide_frequency",
            Analysis::CpgFrequency => "cpg_frequency",
            Analysis::SimpleSequenceRepeats => "simple_sequence_repeats",
            Analysis::CpgIslandGeneAssociation => "cpg_island_gene_association",
            Analysis::NestedGenes => "nested_genes",
            Analysis::GeneDensity => "gene_density",
            Analysis::GeneDensityLengthCorrelation => "gene_density_length_correlation",
            Analysis::UtrTranscriptCorrelation => "utr_transcript_correlation",
            Analysis::RnaDistribution => "rna_distribution",
            Analysis::SsrStatistics => "ssr_statistics",
        }
    }

    /// Names of the statistics written by this analysis.
    pub fn statistic_names(&self) -> &'static [&'static str] {
        match self {
            Analysis::BaseComposition => &[
                "nuclear_base_composition",
                "mitochondrial_base_composition",
                "per_chromosome_composition",
                "gc_content_per_chromosome",
            ],
            Analysis::DinucleotideFrequency => &["dinucleotide_frequency"],
            Analysis::CpgFrequency => &["cpg_frequency_per_chromosome"],
            Analysis::SimpleSequenceRepeats => &["simple_sequence_repeats"],
            Analysis::CpgIslandGeneAssociation => &["cpg_island_gene_association"],
            Analysis::NestedGenes => &["nested_genes_statistics"],
            Analysis::GeneDensity => &["gene_density_1mb"],
            Analysis::GeneDensityLengthCorrelation => &["gene_density_length_correlation"],
            Analysis::UtrTranscriptCorrelation => &["utr_transcript_correlation"],
            Analysis::RnaDistribution => &["rna_distribution"],
            Analysis::SsrStatistics => &["ssr_statistics"],
        }
    }

    pub fn requires(&self) -> &'static [Input] {
        match self {
            Analysis::BaseComposition
            | Analysis::DinucleotideFrequency
            | Analysis::CpgFrequency
            | Analysis::SimpleSequenceRepeats => &[Input::Sequence],
            Analysis::CpgIslandGeneAssociation => &[Input::CpgIslands, Input::Genes],
            Analysis::NestedGenes
            | Analysis::GeneDensity
            | Analysis::GeneDensityLengthCorrelation
            | Analysis::UtrTranscriptCorrelation => &[Input::Genes],
            Analysis::RnaDistribution => &[Input::NonCodingRnas],
            Analysis::SsrStatistics => &[Input::SimpleRepeats],
        }
    }

    /// True when every input this analysis reads is in `available`.
    pub fn is_runnable(&self, available: &[Input]) -> bool {
        self.requires().iter().all(|input| available.contains(input))
    }

    ///
    /// Run the analysis and return its statistics, in [`Self::statistic_names`]
    /// order. Nothing is written anywhere; persisting the result is up to the
    /// caller.
    ///
    pub fn run<S>(&self, source: &S, config: &AnalysisConfig) -> GenomicDistResult<Vec<Statistic>>
    where
        S: RecordSource + ?Sized,
    {
        info!("Running {}", self);
        let names = self.statistic_names();

        let stats = match self {
            Analysis::BaseComposition => {
                let composition = genome_composition(source, config)?;
                vec![
                    Statistic::new(names[0], &composition.nuclear)?,
                    Statistic::new(names[1], &composition.mitochondrial)?,
                    Statistic::new(names[2], &composition.per_chromosome)?,
                    Statistic::new(
                        names[3],
                        &composition.gc_content_per_chromosome(config.gc_decimals),
                    )?,
                ]
            }
            Analysis::DinucleotideFrequency => {
                vec![Statistic::new(names[0], &genome_dinucleotide_frequency(source, config)?)?]
            }
            Analysis::CpgFrequency => {
                vec![Statistic::new(names[0], &cpg_frequency_per_chromosome(source, config)?)?]
            }
            Analysis::SimpleSequenceRepeats => {
                vec![Statistic::new(names[0], &scan_genome(source, config)?)?]
            }
            Analysis::CpgIslandGeneAssociation => {
                let association = island_gene_association(&source.cpg_islands()?, &source.genes()?)?;
                vec![Statistic::new(names[0], &association)?]
            }
            Analysis::NestedGenes => vec![Statistic::new(names[0], &nested_genes(&source.genes()?)?)?],
            Analysis::GeneDensity => vec![Statistic::new(names[0], &gene_density(source, config)?)?],
            Analysis::GeneDensityLengthCorrelation => {
                vec![Statistic::new(
                    names[0],
                    &gene_density_length_correlation(source, config)?,
                )?]
            }
            Analysis::UtrTranscriptCorrelation => {
                vec![Statistic::new(names[0], &utr_transcript_correlation(source)?)?]
            }
            Analysis::RnaDistribution => {
                vec![Statistic::new(names[0], &rna_distribution(source, config)?)?]
            }
            Analysis::SsrStatistics => {
                vec![Statistic::new(names[0], &ssr_statistics(&source.simple_repeats()?))?]
            }
        };

        Ok(stats)
    }
}

impl Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Analysis {
    type Err = GenomicDistError;

    /// Accepts an analysis name or the name of any statistic it writes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Analysis::ALL
            .iter()
            .find(|a| a.name() == s || a.statistic_names().contains(&s))
            .copied()
            .ok_or_else(|| GenomicDistError::UnknownAnalysis(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genoguide_core::models::{CpgIsland, Gene, Strand};
    use genoguide_core::source::GenomeRecords;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn toy_genome() -> GenomeRecords {
        let mut genome = GenomeRecords::new()
            .with_sequence("chr1", "ATGCATGCATGCATGCNNNN")
            .with_sequence("chrM", "GATCACAGG");
        genome.genes = vec![
            Gene {
                id: 1,
                chromosome_id: 1,
                gene_id: "G1".to_string(),
                gene_name: Some("OUTER".to_string()),
                start: 1,
                end: 18,
                strand: Strand::Plus,
            },
            Gene {
                id: 2,
                chromosome_id: 1,
                gene_id: "G2".to_string(),
                gene_name: None,
                start: 5,
                end: 9,
                strand: Strand::Minus,
            },
        ];
        genome.cpg_islands = vec![CpgIsland {
            chromosome_id: 1,
            start: 2,
            end: 6,
            name: None,
            length: None,
            cpg_num: None,
            gc_num: None,
            per_gc: None,
            per_cpg: None,
        }];
        genome
    }

    #[rstest]
    fn test_statistic_names_are_unique() {
        let mut seen = HashSet::new();
        for analysis in Analysis::ALL {
            for name in analysis.statistic_names() {
                assert!(seen.insert(*name), "duplicate statistic {}", name);
            }
        }
        assert_eq!(seen.len(), 14);
    }

    #[rstest]
    #[case("base_composition", Analysis::BaseComposition)]
    #[case("gc_content_per_chromosome", Analysis::BaseComposition)]
    #[case("gene_density_1mb", Analysis::GeneDensity)]
    #[case("nested_genes_statistics", Analysis::NestedGenes)]
    fn test_from_str(#[case] name: &str, #[case] expected: Analysis) {
        assert_eq!(name.parse::<Analysis>().unwrap(), expected);
    }

    #[rstest]
    fn test_unknown_analysis() {
        assert!(matches!(
            "nope".parse::<Analysis>(),
            Err(GenomicDistError::UnknownAnalysis(_))
        ));
    }

    #[rstest]
    fn test_runnable_inputs() {
        let sequence_only = [Input::Sequence];
        assert!(Analysis::BaseComposition.is_runnable(&sequence_only));
        assert!(!Analysis::CpgIslandGeneAssociation.is_runnable(&sequence_only));
        assert!(Analysis::CpgIslandGeneAssociation.is_runnable(&[Input::Genes, Input::CpgIslands]));
    }

    #[rstest]
    fn test_every_analysis_runs_on_toy_genome() {
        let genome = toy_genome();
        let config = AnalysisConfig::default();
        for analysis in Analysis::ALL {
            let stats = analysis.run(&genome, &config).unwrap();
            let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
            assert_eq!(names, analysis.statistic_names().to_vec());
        }
    }

    #[rstest]
    fn test_composition_statistics() {
        let stats = Analysis::BaseComposition
            .run(&toy_genome(), &AnalysisConfig::default())
            .unwrap();
        assert_eq!(stats[0].value, json!({"A": 4, "C": 4, "G": 4, "T": 4, "N": 4}));
        assert_eq!(stats[1].value["G"], json!(3));
        assert_eq!(stats[3].value, json!({"chr1": 50.0}));
    }

    #[rstest]
    fn test_association_and_nesting_statistics() {
        let genome = toy_genome();
        let config = AnalysisConfig::default();

        let association = Analysis::CpgIslandGeneAssociation.run(&genome, &config).unwrap();
        assert_eq!(
            association[0].value,
            json!({
                "total_islands": 1,
                "associated_with_genes": 1,
                "non_associated": 0,
                "percentage_associated": 100.0
            })
        );

        let nested = Analysis::NestedGenes.run(&genome, &config).unwrap();
        assert_eq!(
            nested[0].value,
            json!({
                "total_nested_pairs": 1,
                "nested_pairs": [{"inner_gene": "G2", "outer_gene": "OUTER", "chromosome_id": 1}]
            })
        );
    }

    #[rstest]
    fn test_ssr_scan_statistic() {
        let stats = Analysis::SimpleSequenceRepeats
            .run(&toy_genome(), &AnalysisConfig::default())
            .unwrap();
        let value = &stats[0].value;
        assert_eq!(value["truncated"], json!(false));
        assert_eq!(value["max_results"], json!(50000));
        let tetra: Vec<&serde_json::Value> = value["ssrs"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|m| m["type"] == json!("tetra"))
            .collect();
        assert_eq!(tetra.len(), 1);
        assert_eq!(tetra[0]["count"], json!(4));
    }
}
