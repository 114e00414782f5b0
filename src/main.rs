//! # chatpurge CLI
//!
//! Command-line interface for the chatpurge library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatpurge::PurgeError;
use chatpurge::cli::Args;
use chatpurge::config::{Auth, SourceConfig};
use chatpurge::core::extract_work_list;
use chatpurge::delete::{Confirm, Deleter, HttpTransport, RunSummary, WaveReport, run_waves};
use chatpurge::logging;
use chatpurge::prompt::{PromptConfirm, Prompter};
use chatpurge::source::create_source;

fn main() {
    let args = <Args as ClapParser>::parse();
    logging::init();

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), PurgeError> {
    let total_start = Instant::now();
    // Checked only once there is something to delete
    let auth = Auth::from_tokens(args.bot_token.clone(), args.user_token.clone());
    let mode = args.mode();
    let config = args.deleter_config();

    // Print header
    println!("🧹 chatpurge v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📖 Source:  {}", mode);
    match &auth {
        Ok(auth) => println!("🔑 Auth:    {} token", auth.kind()),
        Err(_) => println!("🔑 Auth:    not set"),
    }
    println!("🌐 API:     {}", config.api_base);

    // Filters, minus what this mode cannot evaluate
    let (filters, rejected) = args.filters();
    for item in &rejected {
        println!("⚠️  Ignoring invalid id '{}'", item);
    }
    let (filters, warnings) = filters.for_mode(mode);
    for warning in &warnings {
        println!("⚠️  {}", warning);
    }
    if !filters.channels.is_empty() {
        println!("💬 Channels: {}", filters.channels.len());
    }
    if !filters.guilds.is_empty() {
        println!("🏠 Guilds:   {}", filters.guilds.len());
    }
    if !filters.authors.is_empty() {
        println!("👤 Authors:  {}", filters.authors.len());
    }
    println!();

    // Step 1: Pick the export root
    let mut prompter = Prompter::stdio();
    let Some(dir) = prompter.select_dir(args.dir.as_deref(), args.dir_confirm)? else {
        println!("No directory selected, nothing to do.");
        return Ok(());
    };

    // Step 2: Discover export files
    let source = create_source(mode, &SourceConfig::default())?;
    let files = source.discover(&dir)?;
    if files.is_empty() {
        println!("📂 No export files found in {}", dir.display());
        return Ok(());
    }
    println!("📂 {} export files in {}", files.len(), dir.display());

    // Step 3: Build the work list
    let extract_start = Instant::now();
    let extraction = extract_work_list(source.as_ref(), &files, &filters);
    println!(
        "🔎 Found {} ({:.2}s)",
        extraction.work.summary(),
        extract_start.elapsed().as_secs_f64()
    );
    if extraction.stats.files_skipped > 0 || extraction.stats.records_malformed > 0 {
        println!(
            "   Skipped {} files and {} malformed entries",
            extraction.stats.files_skipped, extraction.stats.records_malformed
        );
    }
    if extraction.work.is_empty() {
        println!();
        println!("✅ Nothing to delete.");
        return Ok(());
    }

    // Step 4: Delete, in waves
    let auth = auth?;
    println!("🗑️  Deleting...");
    let mut deleter = Deleter::new(HttpTransport::new(&config)?, auth, config);
    let mut prompt = (!args.yes).then(|| PromptConfirm::new(prompter));
    let mut confirm = |wave: usize, report: &WaveReport| {
        println!(
            "   Wave {}: {} deleted, {} pending retry",
            wave,
            report.deleted,
            report.retry.summary()
        );
        prompt.as_mut().is_none_or(|p| p.confirm(wave, report))
    };
    let summary = run_waves(&mut deleter, extraction.work, &mut confirm);

    println!();
    println!("✅ Done!");
    print_summary(&summary);

    println!();
    println!("⏱️  Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("📊 Summary:");
    println!("   Waves:         {}", summary.waves);
    println!("   Requests:      {}", summary.attempted);
    println!("   Deleted:       {}", summary.deleted);
    if summary.already_gone > 0 {
        println!("   Already gone:  {}", summary.already_gone);
    }
    if summary.throttled > 0 {
        println!("   Throttled:     {}", summary.throttled);
    }
    if summary.rejected > 0 {
        println!("   Rejected:      {}", summary.rejected);
    }
    if summary.transport_errors > 0 {
        println!("   Failed:        {}", summary.transport_errors);
    }
    if summary.abandoned.messages > 0 {
        println!("   Left pending:  {}", summary.abandoned);
    }
}
