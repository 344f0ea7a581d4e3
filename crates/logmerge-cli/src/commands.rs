use std::io::{self, BufWriter, Write};

use anyhow::Context;
use colored::Colorize;
use logmerge_core::{AsyncLogSource, LoggingObserver, MergeDriver, MergeSummary};
use logmerge_sources::{
    DelayedSource, GeneratorConfig, JsonLinesSource, LogGenerator, OutputFormat, PrinterSink,
};
use tracing::info;

use crate::cli::*;
use crate::config::{RunConfig, RunMode};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let show_stats = cli.stats;
    match cli.command {
        Command::Run(args) => cmd_run(&args, show_stats),
        Command::Merge(args) => cmd_merge(&args, show_stats),
    }
}

fn cmd_run(args: &RunArgs, show_stats: bool) -> anyhow::Result<()> {
    let config = RunConfig::resolve(args)?;
    info!(
        mode = ?config.mode,
        sources = config.sources,
        entries_per_source = config.entries_per_source,
        seed = config.seed,
        "generating sources"
    );

    let mut generator = LogGenerator::new(GeneratorConfig {
        seed: config.seed,
        ..Default::default()
    });
    let sources = generator.generate(config.sources, config.entries_per_source);
    let driver = MergeDriver::new(config.driver.clone()).with_observer(LoggingObserver);

    let mut printer = stdout_printer(config.format.into());
    let summary = match config.mode {
        RunMode::Sync => {
            let mut sources = sources;
            driver.run_sync(&mut sources, &mut printer)?
        }
        RunMode::Async => {
            let mut delayed: Vec<_> = sources
                .into_iter()
                .enumerate()
                .map(|(i, source)| {
                    DelayedSource::new(source, config.delay, config.seed.wrapping_add(i as u64))
                })
                .collect();
            block_on_async(&driver, &mut delayed, &mut printer)?
        }
    };

    finish(printer, &summary, show_stats)
}

fn cmd_merge(args: &MergeArgs, show_stats: bool) -> anyhow::Result<()> {
    let mut sources = args
        .files
        .iter()
        .map(|path| {
            JsonLinesSource::open(path).with_context(|| format!("opening {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let driver = MergeDriver::default().with_observer(LoggingObserver);
    let mut printer = stdout_printer(args.format.into());
    let summary = match args.mode {
        RunMode::Sync => driver.run_sync(&mut sources, &mut printer)?,
        RunMode::Async => block_on_async(&driver, &mut sources, &mut printer)?,
    };

    finish(printer, &summary, show_stats)
}

type StdoutPrinter = PrinterSink<BufWriter<io::Stdout>>;

fn stdout_printer(format: OutputFormat) -> StdoutPrinter {
    PrinterSink::new(BufWriter::new(io::stdout()), format)
}

/// Drive an async merge on a single-threaded runtime.
fn block_on_async<S: AsyncLogSource>(
    driver: &MergeDriver,
    sources: &mut [S],
    printer: &mut StdoutPrinter,
) -> anyhow::Result<MergeSummary> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building async runtime")?;
    Ok(runtime.block_on(driver.run_async(sources, printer))?)
}

fn finish(mut printer: StdoutPrinter, summary: &MergeSummary, show_stats: bool) -> anyhow::Result<()> {
    if let Some(err) = printer.take_error() {
        if err.kind() != io::ErrorKind::BrokenPipe {
            return Err(err).context("writing merged output");
        }
    }

    if show_stats {
        let stats = printer.stats();
        let mut err = io::stderr().lock();
        writeln!(err, "\n{}", "***********************************".dimmed())?;
        writeln!(err, "{stats}")?;
        writeln!(err, "{}", "***********************************".dimmed())?;
        let verdict = if stats.out_of_order == 0 {
            format!("{} {} merge of {} sources in order", "✓".green().bold(), summary.mode, summary.sources)
        } else {
            format!("{} {} entries out of order", "✗".red().bold(), stats.out_of_order)
        };
        writeln!(err, "{verdict}")?;
    }
    Ok(())
}
