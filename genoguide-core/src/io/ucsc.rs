//! UCSC table dumps (`hgdownload .../database/*.txt.gz`).
//!
//! UCSC tables are 0-based half-open; starts are shifted by one on load so
//! every record in the crate is 1-based inclusive.

use std::io::BufRead;
use std::path::Path;

use log::{debug, warn};

use crate::errors::RecordResult;
use crate::io::{parse_column, parse_optional_column};
use crate::models::{CpgIsland, NonCodingRna, SimpleRepeat, Strand};
use crate::utils::{ChromosomeIndex, get_dynamic_reader};

/// Repeat classes of the `rmsk` track that are non-coding RNA genes.
pub const RNA_CLASSES: [&str; 6] = ["rRNA", "tRNA", "snRNA", "snoRNA", "scRNA", "srpRNA"];

/// Split a data line, dropping the leading `bin` column when present.
///
/// `expected` is the column count without `bin`.
fn data_fields(line: &str, expected: usize) -> Vec<&str> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() > expected && fields[0].parse::<u32>().is_ok() {
        fields[1..].to_vec()
    } else {
        fields
    }
}

fn is_header(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("bin\t") || line.trim().is_empty()
}

///
/// Read a `cpgIslandExt` dump:
/// `[bin] chrom chromStart chromEnd name length cpgNum gcNum perCpg perGc obsExp`.
///
/// Only chrom, chromStart and chromEnd are required; trailing statistic
/// columns are kept when they parse.
///
pub fn read_cpg_islands(path: &Path, index: &ChromosomeIndex) -> RecordResult<Vec<CpgIsland>> {
    let reader = get_dynamic_reader(path)?;
    let path_str = path.display().to_string();
    let mut islands = Vec::new();
    let mut skipped: usize = 0;

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        if is_header(&line) {
            continue;
        }
        let fields = data_fields(&line, 10);
        let line_no = line_idx + 1;

        let Some(chromosome_id) = index.resolve(fields[0]) else {
            skipped += 1;
            continue;
        };
        let start: u32 = parse_column(&fields, 1, "chromStart", &path_str, line_no)?;
        let end: u32 = parse_column(&fields, 2, "chromEnd", &path_str, line_no)?;

        islands.push(CpgIsland {
            chromosome_id,
            start: start + 1,
            end,
            name: fields.get(3).map(|s| s.to_string()),
            length: parse_optional_column(&fields, 4),
            cpg_num: parse_optional_column(&fields, 5),
            gc_num: parse_optional_column(&fields, 6),
            per_cpg: parse_optional_column(&fields, 7),
            per_gc: parse_optional_column(&fields, 8),
        });
    }

    if skipped > 0 {
        warn!("{}: skipped {} islands on unknown chromosomes", path_str, skipped);
    }
    Ok(islands)
}

///
/// Read a `simpleRepeat` dump:
/// `[bin] chrom chromStart chromEnd name period copyNum consensusSize perMatch
/// perIndel score A C G T entropy sequence`.
///
/// Rows on alternate scaffolds (names containing `_`) are dropped, as are
/// rows whose numeric columns do not parse (e.g. a repeated header line).
///
pub fn read_simple_repeats(path: &Path) -> RecordResult<Vec<SimpleRepeat>> {
    let reader = get_dynamic_reader(path)?;
    let mut repeats = Vec::new();
    let mut bad_rows: usize = 0;

    for line in reader.lines() {
        let line = line?;
        if is_header(&line) {
            continue;
        }
        let fields = data_fields(&line, 16);
        if fields[0].contains('_') {
            continue;
        }

        let parsed = (
            parse_optional_column::<u32>(&fields, 1),
            parse_optional_column::<u32>(&fields, 2),
            parse_optional_column::<u32>(&fields, 4),
            parse_optional_column::<f64>(&fields, 5),
            parse_optional_column::<f64>(&fields, 10),
            fields.get(15),
        );
        match parsed {
            (Some(start), Some(end), Some(period), Some(copy_num), Some(score), Some(seq)) => {
                repeats.push(SimpleRepeat {
                    chromosome_name: fields[0].to_string(),
                    start: start + 1,
                    end,
                    unit_size: period,
                    period,
                    copy_num,
                    score,
                    sequence: seq.trim().to_string(),
                })
            }
            _ => bad_rows += 1,
        }
    }

    if bad_rows > 0 {
        debug!("{}: dropped {} unparseable rows", path.display(), bad_rows);
    }
    Ok(repeats)
}

///
/// Read the non-coding RNA rows of a RepeatMasker `rmsk` dump:
/// `[bin] swScore milliDiv milliDel milliIns genoName genoStart genoEnd genoLeft
/// strand repName repClass repFamily repStart repEnd repLeft id`.
///
/// Only rows whose `repClass` is one of [`RNA_CLASSES`] are kept.
///
pub fn read_rmsk_rnas(path: &Path, index: &ChromosomeIndex) -> RecordResult<Vec<NonCodingRna>> {
    let reader = get_dynamic_reader(path)?;
    let path_str = path.display().to_string();
    let mut rnas = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        if is_header(&line) || line.contains("genoName") {
            continue;
        }
        // rmsk always starts with the numeric swScore, so detect bin by width
        let fields: Vec<&str> = line.split('\t').collect();
        let fields = if fields.len() >= 17 { &fields[1..] } else { &fields[..] };
        let line_no = line_idx + 1;

        let Some(rep_class) = fields.get(10) else {
            continue;
        };
        if !RNA_CLASSES.contains(rep_class) {
            continue;
        }
        let Some(chromosome_id) = index.resolve(fields[4]) else {
            continue;
        };

        let start: u32 = parse_column(fields, 5, "genoStart", &path_str, line_no)?;
        let end: u32 = parse_column(fields, 6, "genoEnd", &path_str, line_no)?;
        rnas.push(NonCodingRna {
            chromosome_id,
            start: start + 1,
            end,
            strand: Strand::from_char(fields[8].chars().next().unwrap_or('.')),
            rna_type: fields.get(11).unwrap_or(rep_class).to_string(),
            rna_class: rep_class.to_string(),
            rna_name: fields[9].to_string(),
        });
    }

    Ok(rnas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Chromosome;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;

    fn index() -> ChromosomeIndex {
        ChromosomeIndex::new(&[Chromosome::new(1, "chr1", 300000)])
    }

    fn write_table(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[rstest]
    fn test_cpg_islands_with_and_without_bin() {
        let file = write_table(concat!(
            "585\tchr1\t10999\t12000\tCpG: 111\t1001\t111\t731\t22.2\t73\t0.83\n",
            "chr1\t28735\t29810\tCpG: 116\t1075\t116\t787\t21.6\t73.2\t0.83\n",
            "585\tchr9\t100\t200\tCpG: 10\t100\t10\t70\t20\t70\t0.8\n",
        ));
        let islands = read_cpg_islands(file.path(), &index()).unwrap();

        assert_eq!(islands.len(), 2);
        assert_eq!(islands[0].start, 11000);
        assert_eq!(islands[0].end, 12000);
        assert_eq!(islands[0].cpg_num, Some(111));
        assert_eq!(islands[1].start, 28736);
        assert_eq!(islands[1].name.as_deref(), Some("CpG: 116"));
    }

    #[rstest]
    fn test_simple_repeats_skip_scaffolds_and_headers() {
        let file = write_table(concat!(
            "#bin\tchrom\tchromStart\tchromEnd\tname\tperiod\tcopyNum\n",
            "585\tchr1\t10000\t10468\ttrf\t6\t77.2\t6\t95\t3\t789\t33\t51\t0\t15\t1.43\tTAACCC\n",
            "585\tchr1_KI270706v1_random\t1\t50\ttrf\t2\t25\t2\t100\t0\t100\t50\t0\t0\t50\t1\tAT\n",
            "585\tchr2\t100\t120\ttrf\t2\tcopyNum\t2\t100\t0\t40\t50\t0\t0\t50\t1\tAC\n",
        ));
        let repeats = read_simple_repeats(file.path()).unwrap();

        assert_eq!(repeats.len(), 1);
        assert_eq!(repeats[0].unit_size, 6);
        assert_eq!(repeats[0].start, 10001);
        assert_eq!(repeats[0].sequence, "TAACCC");
        assert_eq!(repeats[0].total_length(), 468);
    }

    #[rstest]
    fn test_rmsk_keeps_rna_classes_only() {
        let file = write_table(concat!(
            "1\t463\t13.4\t0.6\t1.7\tchr1\t10000\t10468\t-248945954\t+\tAluY\tSINE\tAlu\t1\t311\t0\t1\n",
            "1\t1243\t25.7\t8.9\t4.5\tchr1\t16777\t17049\t-248939373\t+\ttRNA-Ala\ttRNA\ttRNA\t1\t72\t0\t2\n",
        ));
        let rnas = read_rmsk_rnas(file.path(), &index()).unwrap();

        assert_eq!(rnas.len(), 1);
        assert_eq!(rnas[0].rna_class, "tRNA");
        assert_eq!(rnas[0].rna_name, "tRNA-Ala");
        assert_eq!(rnas[0].start, 16778);
        assert_eq!(rnas[0].strand, Strand::Plus);
    }
}
