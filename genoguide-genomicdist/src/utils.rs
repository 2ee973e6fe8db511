use genoguide_core::models::Chromosome;
use genoguide_core::utils::chrom_karyotype_key;

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `numerator / denominator * 100`, or 0 for an empty denominator.
pub fn percentage(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * 100.0
}

/// Clone and order chromosomes karyotypically (1..22, X, Y, M, then the rest by name).
pub fn karyotype_ordered(chromosomes: &[Chromosome]) -> Vec<Chromosome> {
    let mut ordered = chromosomes.to_vec();
    ordered.sort_by_cached_key(|c| chrom_karyotype_key(&c.name));
    ordered
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
