use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bracketed::io::{ReadTree, Reader, SentenceWriter, TreeWriter, WriteTree};
use clap::{ArgAction, Parser};
use syntree_reorder::{Reorder, Rule, RuleReorderer};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Reorder German constituency trees towards English word order.
///
/// Reads parser output in bracketed notation and writes the reordered
/// sentences, one per line.
#[derive(Debug, Parser)]
#[command(name = "reorder-trees", version)]
struct Cli {
    /// Input trees in bracketed notation [default: stdin]
    input: Option<PathBuf>,

    /// Output file [default: stdout]
    output: Option<PathBuf>,

    /// Comma-separated rules to apply [default: all rules]
    #[arg(long, value_delimiter = ',')]
    rules: Vec<Rule>,

    /// Trees that are deeper are written in their original order
    #[arg(long, default_value_t = RuleReorderer::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Write reordered trees in bracketed notation instead of sentences
    #[arg(long)]
    trees: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let reorderer = if cli.rules.is_empty() {
        RuleReorderer::new()
    } else {
        RuleReorderer::with_rules(cli.rules.iter().copied())
    }
    .max_depth(cli.max_depth);
    info!(rules = ?reorderer.rules(), "reordering trees");

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("Cannot open input file: {}", path.display())
        })?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path).with_context(|| {
            format!("Cannot create output file: {}", path.display())
        })?),
        None => Box::new(io::stdout()),
    };
    let mut output = BufWriter::new(output);

    let n_trees = if cli.trees {
        reorder_trees(input, &reorderer, &mut TreeWriter::new(&mut output))?
    } else {
        reorder_trees(input, &reorderer, &mut SentenceWriter::new(&mut output))?
    };

    output.flush().context("Cannot write output")?;

    info!(n_trees, "done");

    Ok(())
}

/// Reorder every tree from `read` and write it to `writer`.
///
/// Trees that cannot be reordered are written in their original order,
/// so that the output stays aligned with the input.
fn reorder_trees(
    read: impl BufRead,
    reorderer: &impl Reorder,
    writer: &mut impl WriteTree,
) -> Result<usize> {
    let mut n_trees = 0;

    for tree in Reader::new(read).trees() {
        n_trees += 1;

        let mut tree = tree.with_context(|| format!("Cannot read tree {}", n_trees))?;

        if let Err(err) = reorderer.reorder(&mut tree) {
            warn!(tree = n_trees, error = %err, "cannot reorder tree, keeping original order");
        }

        writer
            .write_tree(&tree)
            .with_context(|| format!("Cannot write tree {}", n_trees))?;
    }

    Ok(n_trees)
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG takes precedence over the verbosity flags.
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
