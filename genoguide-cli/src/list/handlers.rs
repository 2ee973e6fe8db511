use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;

use genoguide_store::{JsonFileStore, StatisticStore};

pub fn run_list(matches: &ArgMatches) -> Result<()> {
    let store_path = matches
        .get_one::<String>("store")
        .context("--store is required")?;

    let names = JsonFileStore::new(store_path).names()?;
    let mut stdout = io::stdout().lock();
    for name in names {
        writeln!(stdout, "{}", name)?;
    }

    Ok(())
}
