use std::io::{self, Write};

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;

use genoguide_store::{JsonFileStore, StatisticStore};

pub fn run_show(matches: &ArgMatches) -> Result<()> {
    let store_path = matches
        .get_one::<String>("store")
        .context("--store is required")?;
    let name = matches
        .get_one::<String>("name")
        .context("statistic name is required")?;

    let store = JsonFileStore::new(store_path);
    let record = store
        .get_record(name)?
        .ok_or_else(|| anyhow!("No statistic named {} in {}", name, store_path))?;

    let json = serde_json::to_string_pretty(&record)
        .context("Failed to serialize statistic to JSON")?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(json.as_bytes())?;
    writeln!(stdout)?;

    Ok(())
}
