use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use genoguide_core::models::ChromosomeFilter;
use genoguide_core::utils::default_primary_chromosomes;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MotifFamily {
    /// reported as the `type` of every match
    pub name: String,
    /// patterns of the form `(UNIT){min,}`, scanned in order
    pub patterns: Vec<String>,
}

impl MotifFamily {
    fn new(name: &str, units: &[&str], min_repeats: u32) -> Self {
        MotifFamily {
            name: name.to_string(),
            patterns: units
                .iter()
                .map(|unit| format!("({}){{{},}}", unit, min_repeats))
                .collect(),
        }
    }
}

/// The default simple sequence repeat catalogue.
pub fn default_motif_families() -> Vec<MotifFamily> {
    vec![
        MotifFamily::new(
            "di",
            &["AT", "TA", "GA", "AG", "CA", "AC", "GT", "TG", "CT", "TC", "GC", "CG"],
            4,
        ),
        MotifFamily::new("tri", &["GCA", "TGC", "CTG", "AGC", "TCG", "CGT"], 3),
        MotifFamily::new("tetra", &["ATGC"], 3),
    ]
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SsrConfig {
    /// hard cap on the number of reported matches
    pub max_results: usize,
    pub families: Vec<MotifFamily>,
}

impl Default for SsrConfig {
    fn default() -> Self {
        SsrConfig {
            max_results: 50_000,
            families: default_motif_families(),
        }
    }
}

///
/// Settings shared by every analysis. Every key is optional in the TOML file;
/// missing keys take the defaults below.
///
/// ```toml
/// threads = 8
/// mitochondrial_chromosome = "chrM"
/// density_bin_size = 1000000
///
/// [ssr]
/// max_results = 50000
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// worker threads, all cores when unset
    pub threads: Option<usize>,
    pub mitochondrial_chromosome: String,
    pub scaffold_separator: char,
    /// drop names containing `scaffold_separator` from nuclear totals
    pub exclude_scaffolds: bool,
    pub gc_decimals: u32,
    pub cpg_decimals: u32,
    pub density_bin_size: u32,
    /// chromosomes scanned for simple sequence repeats
    pub primary_chromosomes: Vec<String>,
    pub ssr: SsrConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            threads: None,
            mitochondrial_chromosome: "chrM".to_string(),
            scaffold_separator: '_',
            exclude_scaffolds: true,
            gc_decimals: 2,
            cpg_decimals: 4,
            density_bin_size: 1_000_000,
            primary_chromosomes: default_primary_chromosomes(),
            ssr: SsrConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalysisConfigError {
    #[error("Invalid analysis config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type AnalysisConfigResult<T> = std::result::Result<T, AnalysisConfigError>;

impl AnalysisConfig {
    pub fn validate(&self) -> AnalysisConfigResult<()> {
        if self.density_bin_size == 0 {
            return Err(AnalysisConfigError::Invalid(
                "density_bin_size must be positive".to_string(),
            ));
        }
        if self.threads == Some(0) {
            return Err(AnalysisConfigError::Invalid(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn chromosome_filter(&self) -> ChromosomeFilter {
        let separator = match self.exclude_scaffolds {
            true => Some(self.scaffold_separator),
            false => None,
        };
        ChromosomeFilter::new(separator, &self.mitochondrial_chromosome)
    }

    /// In `primary_chromosomes`, the name list the repeat scanner covers.
    pub fn in_scan_set(&self, name: &str) -> bool {
        self.primary_chromosomes.iter().any(|p| p == name)
    }
}

impl TryFrom<&Path> for AnalysisConfig {
    type Error = AnalysisConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: AnalysisConfig = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    fn test_default_catalogue() {
        let families = default_motif_families();
        assert_eq!(families.len(), 3);
        assert_eq!(families[0].patterns.len(), 12);
        assert_eq!(families[0].patterns[0], "(AT){4,}");
        assert_eq!(families[1].patterns[0], "(GCA){3,}");
        assert_eq!(families[2].patterns, vec!["(ATGC){3,}".to_string()]);
    }

    #[rstest]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "threads = 4\ndensity_bin_size = 500000\n\n[ssr]\nmax_results = 10").unwrap();

        let config = AnalysisConfig::try_from(file.path()).unwrap();
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.density_bin_size, 500_000);
        assert_eq!(config.ssr.max_results, 10);
        assert_eq!(config.ssr.families, default_motif_families());
        assert_eq!(config.mitochondrial_chromosome, "chrM");
        assert_eq!(config.gc_decimals, 2);
    }

    #[rstest]
    fn test_toml_round_trip() {
        let mut config = AnalysisConfig::default();
        config.mitochondrial_chromosome = "MT".to_string();
        config.ssr.families.truncate(1);

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: AnalysisConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[rstest]
    fn test_zero_bin_size_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "density_bin_size = 0").unwrap();
        let result = AnalysisConfig::try_from(file.path());
        assert!(matches!(result, Err(AnalysisConfigError::Invalid(_))));
    }

    #[rstest]
    fn test_chromosome_filter_follows_exclude_flag() {
        let mut config = AnalysisConfig::default();
        assert!(config.chromosome_filter().is_scaffold("chr1_KI270706v1_random"));

        config.exclude_scaffolds = false;
        assert!(!config.chromosome_filter().is_scaffold("chr1_KI270706v1_random"));
        assert!(config.in_scan_set("chrX"));
        assert!(!config.in_scan_set("chrM"));
    }
}
