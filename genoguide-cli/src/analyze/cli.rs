use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const ANALYZE_CMD: &str = "analyze";

pub fn create_analyze_cli() -> Command {
    Command::new(ANALYZE_CMD)
        .about("Compute genome statistics and write them to a statistic store.")
        .arg(
            arg!(--store <STORE>)
                .required(true)
                .help("Path to the JSON statistic store (created if missing)"),
        )
        .arg(
            arg!(--fasta <FASTA>)
                .required(true)
                .help("Path to the genome FASTA/FASTA.gz"),
        )
        .arg(
            arg!(--config <CONFIG>)
                .required(false)
                .help("Path to a TOML analysis config"),
        )
        .arg(
            arg!(--gtf <GTF>)
                .required(false)
                .help("Path to a GTF/GTF.gz gene model (enables gene analyses)"),
        )
        .arg(
            Arg::new("cpg-islands")
                .long("cpg-islands")
                .required(false)
                .help("Path to a UCSC cpgIslandExt table"),
        )
        .arg(
            Arg::new("simple-repeats")
                .long("simple-repeats")
                .required(false)
                .help("Path to a UCSC simpleRepeat table"),
        )
        .arg(
            arg!(--rmsk <RMSK>)
                .required(false)
                .help("Path to a UCSC rmsk table (non-coding RNA analyses)"),
        )
        .arg(
            arg!(--threads <THREADS>)
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Worker threads, overrides the config file"),
        )
        .arg(
            Arg::new("only")
                .long("only")
                .num_args(1..)
                .action(ArgAction::Append)
                .help("Run only these analyses (analysis or statistic names)"),
        )
}
