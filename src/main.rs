mod cli;

use clap::Parser;
use cli::{Cli, Commands, ValidateArgs};
use colored::Colorize;
use extcheck::checks::{self, Validator};
use extcheck::config::Config;
use extcheck::finding::Outcome;
use extcheck::report::{Report, Status};
use extcheck::runner::{Invocation, Invoker};
use extcheck::{output, runner, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    };
    std::process::exit(code);
}

/// Diagnostics go to stderr; stdout carries results only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("EXTCHECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Structure(args) => validate(&checks::manifest::ManifestValidator, args),
        Commands::Ui(args) => validate(&checks::ui::validator(), args),
        Commands::Content(args) => validate(&checks::content::validator(), args),
        Commands::Background(args) => validate(&checks::background::validator(), args),
        Commands::RunAll {
            dir,
            markdown,
            json,
            in_process,
            config,
        } => run_all(dir, markdown, json, in_process, config),
        Commands::ListRules => {
            list_rules();
            Ok(0)
        }
    }
}

fn validate(validator: &dyn Validator, args: ValidateArgs) -> Result<i32> {
    let config = Config::load(args.config.as_deref())?;
    let dir = args.dir.unwrap_or_else(|| config.extension_dir.clone());

    let run = validator.validate(&dir, &config);
    let formatted = output::format_run(&run, &args.format)?;
    if formatted.ends_with('\n') {
        print!("{formatted}");
    } else {
        println!("{formatted}");
    }

    Ok(if run.ok() { 0 } else { 1 })
}

fn run_all(
    dir: Option<PathBuf>,
    markdown: Option<PathBuf>,
    json: Option<PathBuf>,
    in_process: bool,
    config_path: Option<PathBuf>,
) -> Result<i32> {
    let config = Config::load(config_path.as_deref())?;
    let dir = dir.unwrap_or_else(|| config.extension_dir.clone());
    let markdown = markdown.unwrap_or_else(|| config.report.markdown.clone());
    let json = json.unwrap_or_else(|| config.report.json.clone());

    println!(
        "🔍 Running comprehensive test suite for Chrome extension in {}",
        dir.display()
    );

    let report = if in_process {
        let invoker = runner::InProcessInvoker::new(&config);
        runner::run_all(&dir, &config, &Progress(&invoker))
    } else {
        let invoker = runner::ProcessInvoker::current_exe(config_path)?;
        runner::run_all(&dir, &config, &Progress(&invoker))
    };

    print!("{}", format_summary(&report));

    report.write(&markdown, &json)?;
    println!("📝 Report generated at {}", markdown.display());
    println!("   JSON data saved to {}", json.display());

    Ok(if report.passed() { 0 } else { 1 })
}

/// Announces each validator on stdout before handing it to the wrapped invoker.
struct Progress<'a>(&'a dyn Invoker);

impl Invoker for Progress<'_> {
    fn command_line(&self, validator: &dyn Validator, dir: &Path) -> String {
        self.0.command_line(validator, dir)
    }

    fn invoke(&self, validator: &dyn Validator, dir: &Path) -> std::io::Result<Invocation> {
        println!("📋 Running {}...", validator.title());
        self.0.invoke(validator, dir)
    }
}

/// Compact per-test table printed after the validators have run.
fn format_summary(report: &Report) -> String {
    let mut out = String::new();
    let separator = "─".repeat(64);

    out.push('\n');
    out.push_str(&format!("{}\n", "  Test Summary".bold().underline()));
    out.push_str(&format!("{}\n", separator.dimmed()));

    for test in &report.tests {
        let (icon, status) = match test.status {
            Status::Pass => ("✓".green().to_string(), "PASS".green().bold().to_string()),
            Status::Fail => ("✗".red().to_string(), "FAIL".red().bold().to_string()),
        };
        out.push_str(&format!(
            "  {icon}  {name:<36} {status}  {p}p {w}w {i}i\n",
            name = test.name,
            p = test.passed.len(),
            w = test.warnings.len(),
            i = test.issues.len(),
        ));
    }

    out.push_str(&format!("{}\n", separator.dimmed()));
    let overall = match report.overall_status {
        Status::Pass => "PASS".green().bold(),
        Status::Fail => "FAIL".red().bold(),
    };
    let s = &report.summary;
    out.push_str(&format!(
        "  Overall: {overall}  |  {}/{} tests passed, {} warnings, {} issues\n\n",
        s.passed_tests, s.total_tests, s.warnings, s.issues
    ));

    out
}

fn list_rules() {
    let rules = checks::all_rules();
    println!("{}", "Built-in Checks".bold().underline());
    println!();

    let mut current = "";
    for rule in &rules {
        if rule.validator != current {
            if !current.is_empty() {
                println!();
            }
            println!("  {}", rule.validator.bold());
            current = rule.validator;
        }

        let severity = match rule.on_miss {
            Outcome::Issue => "ISSUE".red().bold().to_string(),
            Outcome::Warning => " WARN".yellow().bold().to_string(),
            Outcome::Passed => " PASS".green().to_string(),
        };
        println!(
            "    [{severity}] {id:<40} {label}",
            id = rule.id,
            label = rule.label,
        );
    }

    println!();
    println!("  Total: {} checks", rules.len());
}
