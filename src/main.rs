//! wikidump-glossary: convert MediaWiki XML dumps into glossary entries

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use wikidump_glossary::{
    config::{Config, LogFormat},
    dump::{ConvertProgress, EntrySource, WiktionarySource},
    glossary::{GlossaryInfo, GlossaryWriter},
};

#[derive(Parser)]
#[command(name = "wikidump-glossary")]
#[command(about = "Convert MediaWiki XML dumps into glossary entries")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a dump into a JSON-lines glossary
    Convert {
        /// Path to the dump (.xml or .xml.bz2)
        input: PathBuf,

        /// Output path
        output: PathBuf,

        /// Stop after this many entries
        #[arg(short, long)]
        limit: Option<u64>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the dump's site-info block
    Info {
        /// Path to the dump (.xml or .xml.bz2)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config when present, defaults otherwise
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    // Setup logging; -v flags override the configured level
    let log_level = match cli.verbose {
        0 => Level::from(&config.logging.level),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false);
    match config.logging.format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
    }

    match cli.command {
        Commands::Convert {
            input,
            output,
            limit,
            quiet,
        } => convert(&config, input, output, limit, quiet),
        Commands::Info { input } => show_info(&config, input),
    }
}

fn convert(
    config: &Config,
    input: PathBuf,
    output: PathBuf,
    limit: Option<u64>,
    quiet: bool,
) -> Result<()> {
    let mut source = WiktionarySource::open_with_capacity(&input, config.reader.buffer_capacity)?;
    info!("Converting {} -> {}", input.display(), output.display());

    let out_file = std::fs::File::create(&output)?;
    let info = GlossaryInfo::from_site_info(source.site_info());
    let mut writer = GlossaryWriter::new(std::io::BufWriter::new(out_file), &info)?;

    let max_entries = limit.or(config.reader.max_entries);
    let progress = ConvertProgress::new(source.total_bytes(), quiet);

    loop {
        if let Some(max) = max_entries {
            if writer.entries_written() as u64 >= max {
                info!("Reached entry limit: {}", max);
                break;
            }
        }

        let entry = match source.next_entry()? {
            Some(entry) => entry,
            None => break,
        };
        let (consumed, _) = entry.progress;
        writer.write_entry(&entry)?;
        progress.entry_written(&entry.title, consumed);
        progress.set_pages_skipped(source.pages_skipped() as usize);
    }

    // Pages skipped after the final entry still count
    progress.set_pages_skipped(source.pages_skipped() as usize);
    writer.finish()?;
    progress.finish();

    if !quiet {
        progress.print_summary();
    }

    Ok(())
}

fn show_info(config: &Config, input: PathBuf) -> Result<()> {
    let source = WiktionarySource::open_with_capacity(&input, config.reader.buffer_capacity)?;
    println!("{}", source.site_info());
    Ok(())
}
