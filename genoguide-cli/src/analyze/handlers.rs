use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};

use genoguide_core::io::{GenomeFiles, load_genome};
use genoguide_genomicdist::{Analysis, AnalysisConfig, Input, Statistic};
use genoguide_store::{JsonFileStore, StatisticBatch, StatisticStore};

/// Record kinds backed by the files given on the command line.
pub fn available_inputs(files: &GenomeFiles) -> Vec<Input> {
    let mut inputs = vec![Input::Sequence];
    if files.gtf.is_some() {
        inputs.push(Input::Genes);
    }
    if files.cpg_islands.is_some() {
        inputs.push(Input::CpgIslands);
    }
    if files.simple_repeats.is_some() {
        inputs.push(Input::SimpleRepeats);
    }
    if files.rmsk.is_some() {
        inputs.push(Input::NonCodingRnas);
    }
    inputs
}

///
/// Pick the analyses to run.
///
/// With no selection every analysis whose inputs are available runs, and the
/// rest are skipped with a log line. An explicit selection that needs a
/// missing input is an error.
///
pub fn select_analyses(only: &[String], available: &[Input]) -> Result<Vec<Analysis>> {
    if only.is_empty() {
        let (runnable, skipped): (Vec<Analysis>, Vec<Analysis>) = Analysis::ALL
            .into_iter()
            .partition(|a| a.is_runnable(available));
        for analysis in skipped {
            info!("Skipping {}: missing {:?}", analysis, analysis.requires());
        }
        return Ok(runnable);
    }

    let mut selected: Vec<Analysis> = Vec::new();
    for name in only {
        let analysis: Analysis = name.parse()?;
        if !analysis.is_runnable(available) {
            bail!("{} needs {:?}, which was not provided", analysis, analysis.requires());
        }
        if !selected.contains(&analysis) {
            selected.push(analysis);
        }
    }
    Ok(selected)
}

fn load_config(path: Option<&String>, threads: Option<usize>) -> Result<AnalysisConfig> {
    let mut config = match path {
        Some(p) => AnalysisConfig::try_from(Path::new(p))
            .with_context(|| format!("Failed to load config from {}", p))?,
        None => AnalysisConfig::default(),
    };
    if threads.is_some() {
        config.threads = threads;
    }
    config.validate()?;
    Ok(config)
}

fn commit_statistics(store: &dyn StatisticStore, stats: Vec<Statistic>) -> Result<usize> {
    let batch: StatisticBatch = stats.into_iter().map(|s| (s.name, s.value)).collect();
    let n = batch.len();
    store.commit(batch)?;
    Ok(n)
}

pub fn run_analyze(matches: &ArgMatches) -> Result<()> {
    let store_path = matches
        .get_one::<String>("store")
        .context("--store is required")?;
    let fasta = matches
        .get_one::<String>("fasta")
        .context("--fasta is required")?;

    let config = load_config(
        matches.get_one::<String>("config"),
        matches.get_one::<usize>("threads").copied(),
    )?;

    let files = GenomeFiles {
        fasta: PathBuf::from(fasta),
        gtf: matches.get_one::<String>("gtf").map(PathBuf::from),
        cpg_islands: matches.get_one::<String>("cpg-islands").map(PathBuf::from),
        simple_repeats: matches.get_one::<String>("simple-repeats").map(PathBuf::from),
        rmsk: matches.get_one::<String>("rmsk").map(PathBuf::from),
    };

    let only: Vec<String> = matches
        .get_many::<String>("only")
        .map(|names| names.cloned().collect())
        .unwrap_or_default();
    let analyses = select_analyses(&only, &available_inputs(&files))?;
    if analyses.is_empty() {
        warn!("Nothing to run");
        return Ok(());
    }

    let genome = load_genome(&files).context("Failed to load genome")?;
    let store = JsonFileStore::new(store_path);

    let pb = match log::max_level() >= log::LevelFilter::Info {
        true => ProgressBar::new(analyses.len() as u64),
        false => ProgressBar::hidden(),
    };
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}/{len:3} {msg}")?
            .progress_chars("##-"),
    );

    let mut failed: Vec<Analysis> = Vec::new();
    for analysis in &analyses {
        pb.set_message(analysis.name());

        let result = analysis
            .run(&genome, &config)
            .map_err(anyhow::Error::from)
            .and_then(|stats| commit_statistics(&store, stats));

        match result {
            Ok(n) => pb.suspend(|| info!("{}: stored {} statistics", analysis, n)),
            Err(e) => {
                pb.suspend(|| error!("{} failed: {:#}", analysis, e));
                failed.push(*analysis);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if !failed.is_empty() {
        let names: Vec<&str> = failed.iter().map(|a| a.name()).collect();
        bail!("{} of {} analyses failed: {}", failed.len(), analyses.len(), names.join(", "));
    }

    info!("Wrote {} analyses to {}", analyses.len(), store.path().display());
    Ok(())
}
