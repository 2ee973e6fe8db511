pub mod chromosome;
pub mod interval;
pub mod records;

// re-export for cleaner imports
pub use self::chromosome::{Chromosome, ChromosomeFilter};
pub use self::interval::Interval;
pub use self::records::{CpgIsland, Exon, Gene, NonCodingRna, SimpleRepeat, Strand, Utr};
