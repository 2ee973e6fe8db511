use clap::{Arg, Command, arg};

pub const SHOW_CMD: &str = "show";

pub fn create_show_cli() -> Command {
    Command::new(SHOW_CMD)
        .about("Print one stored statistic as JSON.")
        .arg(arg!(--store <STORE>).required(true).help("Path to the JSON statistic store"))
        .arg(Arg::new("name").required(true).help("Statistic name"))
}
