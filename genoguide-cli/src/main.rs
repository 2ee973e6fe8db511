mod analyze;
mod list;
mod logging;
mod show;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "genoguide";
    pub const BIN_NAME: &str = "genoguide";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Descriptive statistics for reference genomes: composition, repeats and annotation summaries.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("More log output (-v debug, -vv trace)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .global(true)
                .conflicts_with("verbose")
                .help("Only log errors"),
        )
        .subcommand(analyze::cli::create_analyze_cli())
        .subcommand(show::cli::create_show_cli())
        .subcommand(list::cli::create_list_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    logging::init_logging(
        matches.get_count("verbose"),
        matches.get_flag("quiet"),
    );

    match matches.subcommand() {
        //
        // ANALYZE
        //
        Some((analyze::cli::ANALYZE_CMD, matches)) => {
            analyze::handlers::run_analyze(matches)?;
        }

        //
        // SHOW
        //
        Some((show::cli::SHOW_CMD, matches)) => {
            show::handlers::run_show(matches)?;
        }

        //
        // LIST
        //
        Some((list::cli::LIST_CMD, matches)) => {
            list::handlers::run_list(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
