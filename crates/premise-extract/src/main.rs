use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use log::{debug, LevelFilter};
use premise_extract::driver::extract_corpus;
use premise_extract::options::{FeatureFormat, UserOptions};
use premise_extract::sink::DatasetSink;
use premise_extract::source_filter::{FileSourceLocator, SourceLocator};
use proof_model::CorpusEnv;
use simplelog::{Config, SimpleLogger};

#[derive(Parser)]
#[clap(
    name = env!("CARGO_BIN_NAME"),
    about = "Mines a proof corpus into aligned premise-selection training data: one labels line (the prior facts a proof used) and one features line (statement tokens) per retained theorem",
    rename_all = "kebab-case",
    author,
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Args {
    /// Corpus export to mine (JSON)
    pub corpus: PathBuf,

    /// Destination for the labels stream (truncated at start)
    pub labels: PathBuf,

    /// Destination for the features stream (truncated at start)
    pub features: PathBuf,

    /// "true" to walk the corpus imports; anything else stays in the
    /// current module
    pub recursive: String,

    /// "true" to restrict premises to those visible in theorem sources
    pub user_filter: String,

    /// Root directory of the corpus sources, used by the user filter
    #[clap(long = "source-root", global = true)]
    pub source_root: Option<PathBuf>,

    /// Keep only proofs at least this deep
    #[clap(long = "min-depth", default_value_t = 0, global = true)]
    pub min_depth: usize,

    /// Drop proofs at or beyond this depth
    #[clap(long = "max-depth", global = true)]
    pub max_depth: Option<usize>,

    /// Include bigram tokens in the features stream
    #[clap(long = "with-bigrams", global = true)]
    pub with_bigrams: bool,

    /// Leave name tokens out of the features stream
    #[clap(long = "no-names", global = true)]
    pub no_names: bool,

    /// Leave subexpression tokens out of the features stream
    #[clap(long = "no-subexpressions", global = true)]
    pub no_subexpressions: bool,

    /// Display detailed extraction progress
    #[clap(long, short = 'v', global = true)]
    pub verbose: bool,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let options = UserOptions {
        min_depth: args.min_depth,
        max_depth: args.max_depth.unwrap_or(usize::MAX),
        user_filter: args.user_filter == "true",
        format: FeatureFormat {
            names: !args.no_names,
            bigrams: args.with_bigrams,
            subexpressions: !args.no_subexpressions,
        },
    };

    let env = CorpusEnv::load(&args.corpus)?;
    let locator = args
        .source_root
        .as_ref()
        .map(|root| FileSourceLocator::new(root));
    let mut sink = DatasetSink::create(&args.labels, &args.features, options.format)
        .with_context(|| "cannot open the output destinations")?;

    let summary = extract_corpus(
        &env,
        &options,
        locator.as_ref().map(|l| l as &dyn SourceLocator),
        &mut sink,
        args.recursive == "true",
    )?;
    sink.finish()
        .with_context(|| "cannot flush the output destinations")?;

    debug!(
        "run complete: {} modules, {} records",
        summary.modules, summary.inserted
    );
    Ok(())
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(err) = SimpleLogger::init(level, Config::default()) {
        eprintln!("logger initialization failed: {err}");
    }

    if let Err(err) = run(&args) {
        let err = format!("{:?}", err);
        println!("{}", err.bold().red());
        std::process::exit(1);
    }
}
