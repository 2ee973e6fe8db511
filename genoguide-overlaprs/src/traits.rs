use genoguide_core::models::{CpgIsland, Gene, NonCodingRna};

/// A record that occupies one closed interval on one chromosome.
pub trait GenomicFeature {
    fn chromosome_id(&self) -> u32;

    fn start(&self) -> u32;

    fn end(&self) -> u32;
}

impl GenomicFeature for Gene {
    fn chromosome_id(&self) -> u32 {
        self.chromosome_id
    }

    fn start(&self) -> u32 {
        self.start
    }

    fn end(&self) -> u32 {
        self.end
    }
}

impl GenomicFeature for CpgIsland {
    fn chromosome_id(&self) -> u32 {
        self.chromosome_id
    }

    fn start(&self) -> u32 {
        self.start
    }

    fn end(&self) -> u32 {
        self.end
    }
}

impl GenomicFeature for NonCodingRna {
    fn chromosome_id(&self) -> u32 {
        self.chromosome_id
    }

    fn start(&self) -> u32 {
        self.start
    }

    fn end(&self) -> u32 {
        self.end
    }
}
