//! ngram-grep - parallel n-gram corpus filter
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use ngram_grep::chain::FilterChain;
use ngram_grep::cli::Args;
use ngram_grep::corpus::CorpusTable;
use ngram_grep::output::SharedSink;
use ngram_grep::processor::{ScanConfig, Scanner};
use ngram_grep::progress::print_error;

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Configure thread pool
    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
        .ok();

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        for err in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", err));
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let table = match &args.corpus_table {
        Some(path) => CorpusTable::from_file(path)?,
        None => CorpusTable::builtin(),
    };

    // Configuration errors abort here, before any corpus file opens.
    let chain = FilterChain::from_args(&args.filters, &table.languages())?;
    let descriptor = table.descriptor(chain.language(), chain.len())?.clone();

    log::debug!(
        "language {}, order {}, {} files from {}",
        chain.language(),
        chain.len(),
        descriptor.file_count,
        descriptor.path_template
    );

    let config = ScanConfig {
        flush_threshold: args.parse_buffer_size()?,
        quiet: args.quiet,
    };

    let scanner = Scanner::new(chain, config);
    let stats = scanner.stats();
    let sink = SharedSink::new(std::io::stdout());

    scanner.scan(&descriptor, &sink)?;

    if args.stats {
        stats.print_summary(sink.bytes_written());
    }

    Ok(())
}
