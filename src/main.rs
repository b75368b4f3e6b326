//! Pattern Dict - dictionary words inside mask patterns
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use pattern_dict::cli::Args;
use pattern_dict::engine::Engine;
use pattern_dict::processor::{Processor, ProcessorConfig};
use pattern_dict::progress::{print_banner, print_error, print_header, print_info, print_warning};
use pattern_dict::wordlist::Wordlist;

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging; an explicit RUST_LOG wins
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "off"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Configure thread pool
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
    }

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let engine_config = args.engine_config()?;
    let config = ProcessorConfig::from_args(&args)?;

    // The mapping must outlive the engine and every cursor
    let wordlist = Wordlist::open(&args.wordlist)?;
    let engine = Engine::new(&engine_config, wordlist.as_bytes())?;

    if args.keyspace {
        println!("{}", engine.keyspace()?.total);
        return Ok(());
    }

    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    // Show configuration
    if !args.quiet && args.verbose {
        print_config(&args, &config, &wordlist);
    }

    if engine.keyspace()?.is_saturated() && !args.quiet {
        print_warning("Keyspace exceeds 64 bits; positions past 2^64-1 are unreachable");
    }

    let processor = Processor::new(&engine, config);
    processor.process()?;

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &ProcessorConfig, wordlist: &Wordlist) {
    print_header("Configuration");

    print_info(&format!("Pattern:      {}", args.pattern));
    for (slot, definition) in args.custom_charsets() {
        print_info(&format!("Charset ?{}:   {}", slot, definition));
    }
    print_info(&format!(
        "Wordlist:     {:?} ({})",
        wordlist.path(),
        bytesize::ByteSize(wordlist.size() as u64)
    ));
    match config.output {
        Some(ref path) => print_info(&format!("Output:       {:?}", path)),
        None => print_info("Output:       stdout"),
    }
    print_info(&format!("Max length:   {}", args.max_length));
    print_info(&format!("Skip:         {}", config.skip));
    if let Some(limit) = config.limit {
        print_info(&format!("Limit:        {}", limit));
    }
    print_info(&format!("Threads:      {}", config.threads));
    print_info(&format!("Chunk size:   {}", config.chunk_size));
    print_info(&format!("Buffer size:  {} MB", config.buffer_size / (1024 * 1024)));
}
