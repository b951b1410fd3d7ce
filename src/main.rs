use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use replace_in_files::ReplacementEngine;
use replace_in_files::config::{
	LoadedRuleFile, RULE_FILE_NAME, discover_rule_file, generate_init_template, load_rule_file,
};
use replace_in_files::rules::Expression;

#[derive(Parser)]
#[command(name = "replace-in-files")]
#[command(
	author,
	version,
	about = "Rule-based regex substitution across files and directory trees"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Substitution rule as s/PATTERN/REPLACEMENT/FLAGS (flags: g, n = file name, p = file path)
	#[arg(short = 'e', long = "expression", value_name = "EXPR")]
	expressions: Vec<String>,

	/// Rule file to load (defaults to the nearest .replace-in-files.toml when no rules or paths are given)
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Include hidden files and directories when scanning
	#[arg(long)]
	hidden: bool,

	/// Log every file found, read and written
	#[arg(short, long)]
	verbose: bool,

	/// Create a template .replace-in-files.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .replace-in-files.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Files or directories to rewrite
	paths: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
	/// Rule file commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the rule file's targets and rules
	Show,
	/// Check the rule file for errors without rewriting anything
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing(verbose: bool) {
	// RUST_LOG overrides; --verbose => debug; else info
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		EnvFilter::new(if verbose {
			"replace_in_files=debug"
		} else {
			"replace_in_files=info"
		})
	});
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.without_time()
		.with_target(false)
		.try_init();
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	// Handle --init
	if cli.init {
		return handle_init(cli.force);
	}

	// Handle subcommands
	if let Some(command) = cli.command {
		let path = resolve_rule_file(cli.config.as_deref())?;
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(&path),
				ConfigAction::Validate => handle_config_validate(&path),
			},
		};
	}

	handle_replace(&cli)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(RULE_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{RULE_FILE_NAME} already exists. Use --force to overwrite.");
	}

	let template = generate_init_template();
	std::fs::write(&config_path, template)
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {RULE_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

/// The explicit rule file, or the nearest one above the current directory.
fn resolve_rule_file(explicit: Option<&Path>) -> Result<PathBuf> {
	if let Some(path) = explicit {
		return Ok(path.to_path_buf());
	}

	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	discover_rule_file(&cwd).ok_or_else(|| {
		anyhow::anyhow!("No {RULE_FILE_NAME} found in {} or its parents", cwd.display())
	})
}

fn handle_config_show(path: &Path) -> Result<ExitCode> {
	let loaded = load_rule_file(path).context("Failed to load rule file")?;

	println!("# Source: {}", loaded.path.display());
	println!("# hidden: {}", loaded.config.hidden);
	println!("# targets: {}", loaded.config.targets.len());
	for target in &loaded.config.targets {
		println!("  {}", loaded.base_dir().join(target).display());
	}
	println!("# rules: {}", loaded.config.rules.len());
	println!();

	for (i, rule) in loaded.config.rules.iter().enumerate() {
		println!("  Rule {}:", i + 1);
		println!("    pattern: {}", rule.pattern);
		println!("    replacement: {}", rule.replacement()?);
		println!();
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(path: &Path) -> Result<ExitCode> {
	let result = load_rule_file(path).and_then(|loaded| {
		// Compile every pattern without touching any target
		let mut engine = ReplacementEngine::new();
		for rule in &loaded.config.rules {
			engine.add_replacement(&rule.pattern, rule.replacement()?)?;
		}
		Ok(loaded)
	});

	match result {
		Ok(loaded) => {
			println!(
				"Rule file is valid: {} ({} rules, {} targets)",
				loaded.path.display(),
				loaded.config.rules.len(),
				loaded.config.targets.len()
			);
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_replace(cli: &Cli) -> Result<ExitCode> {
	let rule_file: Option<LoadedRuleFile> = match &cli.config {
		Some(path) => Some(load_rule_file(path).context("Failed to load rule file")?),
		None if cli.expressions.is_empty() && cli.paths.is_empty() => {
			let cwd = std::env::current_dir().context("Failed to get current directory")?;
			discover_rule_file(&cwd)
				.map(|path| load_rule_file(&path))
				.transpose()
				.context("Failed to load rule file")?
		}
		None => None,
	};

	let mut engine = ReplacementEngine::new();
	engine.set_allow_hidden(cli.hidden);

	// Rule file rules come first, then -e expressions in order
	if let Some(mut loaded) = rule_file {
		loaded.config.hidden |= cli.hidden;
		loaded
			.apply_to(&mut engine)
			.with_context(|| format!("Invalid rule file: {}", loaded.path.display()))?;
	}

	for expression in &cli.expressions {
		let parsed = Expression::parse(expression)
			.with_context(|| format!("Invalid expression: {expression}"))?;
		engine
			.add_replacement(&parsed.pattern, parsed.replacement)
			.with_context(|| format!("Invalid expression: {expression}"))?;
	}

	for path in &cli.paths {
		engine
			.add_target(path)
			.with_context(|| format!("Cannot add target: {}", path.display()))?;
	}

	if engine.rules().is_empty() {
		anyhow::bail!("No rules given. Use -e 's/PATTERN/REPLACEMENT/' or a {RULE_FILE_NAME}.");
	}

	if engine.targets().is_empty() {
		println!("No files to rewrite.");
		return Ok(ExitCode::SUCCESS);
	}

	let summary = engine.apply();

	for (path, error) in &summary.failed {
		eprintln!("Failed: {}: {}", path.display(), error);
	}
	println!(
		"Rewrote {} of {} file(s)",
		summary.rewritten.len(),
		engine.targets().len()
	);

	if summary.is_success() {
		Ok(ExitCode::SUCCESS)
	} else {
		Ok(ExitCode::FAILURE)
	}
}
