use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use scrubfile::error::ErrorReporter;
use scrubfile::{
    suggested_passes, CancelToken, EraseError, PassType, SecureEraseEngine, StrengthEvaluator,
    StrengthLabel,
};
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "scrubfile")]
#[command(about = "Securely erase a single file by overwriting it before deletion")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Overwrite and delete a file (IRREVERSIBLE!)
    Erase {
        /// Target file path
        file: String,

        /// Comma-separated pass tokens (zero, one, random); defaults to the
        /// recommended plan
        #[arg(short, long, value_delimiter = ',')]
        passes: Option<Vec<String>>,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,

        /// Hide the per-pass progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Score the strength of a pass plan
    Evaluate {
        /// Pass tokens in execution order
        tokens: Vec<String>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the recommended pass plan
    Suggest,
}

/// Reporter for interactive use: failures land on stderr in red instead of
/// the tracing subscriber
struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
    fn report(&self, error: &EraseError) {
        eprintln!("{} {}", "error:".red().bold(), error);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scrubfile=debug")),
            )
            .init();
    }

    match cli.command {
        Commands::Erase {
            file,
            passes,
            yes,
            no_progress,
        } => run_erase(&file, passes, yes, no_progress),
        Commands::Evaluate { tokens, json } => run_evaluate(&tokens, json),
        Commands::Suggest => {
            for token in suggested_passes() {
                println!("{}", token);
            }
            Ok(())
        }
    }
}

fn run_erase(file: &str, passes: Option<Vec<String>>, yes: bool, no_progress: bool) -> Result<()> {
    let tokens: Vec<String> = passes.unwrap_or_else(|| {
        suggested_passes().iter().map(|s| s.to_string()).collect()
    });
    let plan = StrengthEvaluator::parse_plan(&tokens);
    let report = StrengthEvaluator::evaluate_plan(&plan);

    println!("Target : {}", file);
    println!(
        "Passes : {} ({})",
        format_plan(&plan),
        colorize_label(report.label)
    );

    if !yes && !confirm(&format!("Permanently destroy {}?", file))? {
        println!("Aborted.");
        return Ok(());
    }

    let cancel = CancelToken::new();
    setup_signal_handlers(cancel.clone())?;

    let engine =
        SecureEraseEngine::with_reporter(Box::new(ConsoleReporter)).show_progress(!no_progress);

    if engine.erase(file, &plan, &cancel).is_err() {
        // The reporter has already described the failure
        std::process::exit(1);
    }

    println!("{} {} is gone for good", "done:".green().bold(), file);
    Ok(())
}

fn run_evaluate(tokens: &[String], json: bool) -> Result<()> {
    let report = StrengthEvaluator::evaluate(tokens);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("score  : {}", report.score);
    println!("label  : {}", colorize_label(report.label));
    println!("visual : {}/100", report.visual);
    Ok(())
}

fn format_plan(plan: &[PassType]) -> String {
    if plan.is_empty() {
        return "(none)".to_string();
    }
    plan.iter()
        .map(PassType::name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn colorize_label(label: StrengthLabel) -> colored::ColoredString {
    match label {
        StrengthLabel::Weak => label.as_str().red(),
        StrengthLabel::Moderate => label.as_str().yellow(),
        StrengthLabel::Strong | StrengthLabel::VeryStrong => label.as_str().green(),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

// Signal handler for cooperative cancellation
#[cfg(unix)]
fn setup_signal_handlers(cancel: CancelToken) -> Result<()> {
    use signal_hook::{consts::SIGINT, iterator::Signals};

    let mut signals = Signals::new([SIGINT])?;

    std::thread::spawn(move || {
        for sig in signals.forever() {
            if sig == SIGINT {
                eprintln!("\nInterrupt received; stopping after the current block...");
                cancel.cancel();
            }
        }
    });

    Ok(())
}

#[cfg(not(unix))]
fn setup_signal_handlers(_cancel: CancelToken) -> Result<()> {
    Ok(())
}
