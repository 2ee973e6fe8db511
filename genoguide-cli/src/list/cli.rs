use clap::{Command, arg};

pub const LIST_CMD: &str = "list";

pub fn create_list_cli() -> Command {
    Command::new(LIST_CMD)
        .about("List the names of stored statistics.")
        .arg(arg!(--store <STORE>).required(true).help("Path to the JSON statistic store"))
}
