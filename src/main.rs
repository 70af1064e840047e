use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::info;
use std::io::Read;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use linkpaste_cli::format::{PatternOutcome, explain};
use linkpaste_cli::paste::{PasteEvent, PasteOutcome, TextBuffer, handle_paste, insert_at_selection};
use linkpaste_cli::settings::{
	FileBackend, Pattern, PatternEdit, PatternStore, Settings, SettingsBackend,
	resolve_settings_path, serialize_settings,
};

#[derive(Parser)]
#[command(name = "linkpaste")]
#[command(
	author,
	version,
	about = "Rewrite pasted URLs into Markdown links using ordered regex patterns"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	/// Settings file to use (JSON, or TOML when the extension is .toml)
	#[arg(long, global = true, value_name = "PATH")]
	settings: Option<PathBuf>,

	/// Increase log verbosity (-v for info, -vv for debug)
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Paste text, printing what would be inserted
	Paste {
		/// Pasted text (read from stdin when omitted)
		text: Option<String>,

		/// Paste into this file instead of printing
		#[arg(long, value_name = "FILE")]
		into: Option<PathBuf>,

		/// Character range to replace in --into, as START or START:END
		#[arg(long, requires = "into", value_name = "START[:END]")]
		selection: Option<String>,
	},
	/// Show how each pattern handles the given text
	Test {
		/// Text to check
		text: String,
	},
	/// Pattern list management commands
	Patterns {
		#[command(subcommand)]
		action: PatternsAction,
	},
	/// Turn formatting on
	Enable,
	/// Turn formatting off; pastes are left untouched
	Disable,
	/// Settings file commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum PatternsAction {
	/// List patterns in priority order
	List,
	/// Append a pattern
	Add {
		#[arg(long, default_value = "")]
		name: String,
		#[arg(long, default_value = "")]
		expression: String,
		#[arg(long, default_value = "")]
		template: String,
		/// Add the pattern switched off
		#[arg(long)]
		disabled: bool,
	},
	/// Remove the pattern at INDEX
	Remove { index: usize },
	/// Change one field of the pattern at INDEX
	Set {
		index: usize,
		field: PatternField,
		value: String,
	},
	/// Enable or disable the pattern at INDEX
	Toggle { index: usize },
	/// Move the pattern at FROM to position TO
	Move { from: usize, to: usize },
}

#[derive(Clone, Copy, ValueEnum)]
enum PatternField {
	Name,
	Expression,
	Template,
	Enabled,
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the effective settings and where they come from
	Show,
	/// Print the settings file path
	Path,
	/// Check the settings file and every expression for errors
	Validate,
	/// Write default settings to the settings file
	Init {
		/// Overwrite an existing settings file
		#[arg(long)]
		force: bool,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_logging(verbose: u8) {
	let default_level = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
		.format_timestamp(None)
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	let settings_path =
		resolve_settings_path(cli.settings.as_deref()).context("Failed to locate settings file")?;

	match cli.command {
		Commands::Paste {
			text,
			into,
			selection,
		} => handle_paste_command(&settings_path, text, into.as_deref(), selection.as_deref()),
		Commands::Test { text } => handle_test(&settings_path, &text),
		Commands::Patterns { action } => handle_patterns(&settings_path, action),
		Commands::Enable => handle_set_enabled(&settings_path, true),
		Commands::Disable => handle_set_enabled(&settings_path, false),
		Commands::Config { action } => match action {
			ConfigAction::Show => handle_config_show(&settings_path),
			ConfigAction::Path => {
				println!("{}", settings_path.display());
				Ok(ExitCode::SUCCESS)
			}
			ConfigAction::Validate => handle_config_validate(&settings_path),
			ConfigAction::Init { force } => handle_config_init(&settings_path, force),
		},
	}
}

fn load_store(settings_path: &Path) -> PatternStore<FileBackend> {
	info!("Using settings file {}", settings_path.display());
	PatternStore::load(FileBackend::new(settings_path))
}

fn handle_paste_command(
	settings_path: &Path,
	text: Option<String>,
	into: Option<&Path>,
	selection: Option<&str>,
) -> Result<ExitCode> {
	let text = match text {
		Some(text) => text,
		None => read_stdin()?,
	};

	let store = load_store(settings_path);
	let event = PasteEvent {
		clipboard_text: Some(text.as_str()),
	};

	let Some(file) = into else {
		let mut buffer = TextBuffer::default();
		if handle_paste(store.settings(), &event, &mut buffer) == PasteOutcome::Default {
			insert_at_selection(&mut buffer, &text);
		}
		println!("{}", buffer.text());
		return Ok(ExitCode::SUCCESS);
	};

	let content = std::fs::read_to_string(file)
		.with_context(|| format!("Failed to read {}", file.display()))?;
	let mut buffer = TextBuffer::new(content);
	if let Some(selection) = selection {
		let range = parse_selection(selection)?;
		buffer = buffer.with_selection(range);
	}

	let cursor = match handle_paste(store.settings(), &event, &mut buffer) {
		PasteOutcome::Replaced { cursor } => cursor,
		PasteOutcome::Default => insert_at_selection(&mut buffer, &text),
	};

	std::fs::write(file, buffer.text())
		.with_context(|| format!("Failed to write {}", file.display()))?;

	println!("{cursor}");
	Ok(ExitCode::SUCCESS)
}

/// Read pasted text from stdin, dropping one trailing line ending.
fn read_stdin() -> Result<String> {
	let mut text = String::new();
	std::io::stdin()
		.read_to_string(&mut text)
		.context("Failed to read pasted text from stdin")?;

	if text.ends_with('\n') {
		text.pop();
		if text.ends_with('\r') {
			text.pop();
		}
	}
	Ok(text)
}

fn parse_selection(selection: &str) -> Result<Range<usize>> {
	let parse = |part: &str| {
		part.trim()
			.parse::<usize>()
			.with_context(|| format!("Invalid selection offset: {part:?}"))
	};

	match selection.split_once(':') {
		Some((start, end)) => Ok(parse(start)?..parse(end)?),
		None => {
			let start = parse(selection)?;
			Ok(start..start)
		}
	}
}

fn handle_test(settings_path: &Path, text: &str) -> Result<ExitCode> {
	let store = load_store(settings_path);
	let settings = store.settings();
	let explanation = explain(settings, text);

	println!("Text: {text}");
	println!("  URL: {}", if explanation.is_url { "yes" } else { "no" });
	println!("  Formatting: {}", on_off(explanation.enabled));
	println!();

	if settings.patterns.is_empty() {
		println!("No patterns configured.");
	}

	for (index, (pattern, outcome)) in settings
		.patterns
		.iter()
		.zip(&explanation.outcomes)
		.enumerate()
	{
		let status = match outcome {
			PatternOutcome::Disabled => "disabled".to_string(),
			PatternOutcome::Malformed(e) => format!("malformed expression: {}", error_chain(e)),
			PatternOutcome::NoMatch => "no match".to_string(),
			PatternOutcome::Matched(label) => format!("matched -> {label:?}"),
			PatternOutcome::Skipped => "skipped (earlier pattern matched)".to_string(),
		};
		println!("  [{index}] {}: {status}", display_name(pattern));
	}

	println!();
	match explanation.replacement {
		Some(replacement) => println!("Result: {replacement}"),
		None => println!("Result: unchanged"),
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_patterns(settings_path: &Path, action: PatternsAction) -> Result<ExitCode> {
	let mut store = load_store(settings_path);

	match action {
		PatternsAction::List => {}
		PatternsAction::Add {
			name,
			expression,
			template,
			disabled,
		} => {
			let pattern = Pattern {
				enabled: !disabled,
				..Pattern::new(name, expression, template)
			};
			let index = store
				.add_pattern(pattern)
				.context("Failed to save settings")?;
			println!("Added pattern [{index}]\n");
		}
		PatternsAction::Remove { index } => {
			let removed = store
				.remove_pattern(index)
				.context("Failed to remove pattern")?;
			println!("Removed pattern [{index}] {}\n", display_name(&removed));
		}
		PatternsAction::Set {
			index,
			field,
			value,
		} => {
			let edit = match field {
				PatternField::Name => PatternEdit::Name(value),
				PatternField::Expression => PatternEdit::Expression(value),
				PatternField::Template => PatternEdit::Template(value),
				PatternField::Enabled => PatternEdit::Enabled(parse_bool(&value)?),
			};
			store
				.update_pattern(index, edit)
				.context("Failed to update pattern")?;
			println!("Updated pattern [{index}]\n");
		}
		PatternsAction::Toggle { index } => {
			let enabled = store
				.toggle_pattern(index)
				.context("Failed to toggle pattern")?;
			println!("Pattern [{index}] {}\n", on_off(enabled));
		}
		PatternsAction::Move { from, to } => {
			store
				.move_pattern(from, to)
				.context("Failed to move pattern")?;
			println!("Moved pattern [{from}] to [{to}]\n");
		}
	}

	print_settings(store.settings());
	Ok(ExitCode::SUCCESS)
}

fn handle_set_enabled(settings_path: &Path, enabled: bool) -> Result<ExitCode> {
	let mut store = load_store(settings_path);
	store
		.set_enabled(enabled)
		.context("Failed to save settings")?;
	println!("Formatting {}", on_off(enabled));
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(settings_path: &Path) -> Result<ExitCode> {
	let store = load_store(settings_path);
	let backend = store.backend();

	println!("# Source: {}", settings_path.display());
	if settings_path.exists() {
		println!("#   (exists)");
	} else {
		println!("#   (not found, using defaults)");
	}
	println!();

	let rendered = serialize_settings(store.settings(), backend.format())
		.context("Failed to render settings")?;
	print!("{rendered}");

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(settings_path: &Path) -> Result<ExitCode> {
	let backend = FileBackend::new(settings_path);

	let raw = match backend.read_raw() {
		Ok(raw) => raw,
		Err(e) => {
			eprintln!("Settings error: {e}");
			return Ok(ExitCode::FAILURE);
		}
	};

	if raw.is_none() {
		println!(
			"No settings file found at {}; defaults will be used.",
			settings_path.display()
		);
		return Ok(ExitCode::SUCCESS);
	}

	let store = PatternStore::load(backend);
	let malformed = store.settings().malformed_patterns();

	if malformed.is_empty() {
		println!(
			"Settings are valid: {} ({} patterns)",
			settings_path.display(),
			store.patterns().len()
		);
		return Ok(ExitCode::SUCCESS);
	}

	eprintln!("Malformed expressions in {}:", settings_path.display());
	for (index, e) in &malformed {
		eprintln!("  [{index}] {}", error_chain(e));
	}
	Ok(ExitCode::FAILURE)
}

fn handle_config_init(settings_path: &Path, force: bool) -> Result<ExitCode> {
	if settings_path.exists() && !force {
		anyhow::bail!(
			"{} already exists. Use --force to overwrite.",
			settings_path.display()
		);
	}

	let mut backend = FileBackend::new(settings_path);
	backend
		.save_persisted(&Settings::default())
		.with_context(|| format!("Failed to write {}", settings_path.display()))?;

	println!("Created {}", settings_path.display());
	Ok(ExitCode::SUCCESS)
}

fn print_settings(settings: &Settings) {
	println!("Formatting: {}", on_off(settings.enabled));

	if settings.patterns.is_empty() {
		println!("No patterns configured.");
		return;
	}

	println!("Patterns (first match wins):\n");
	for (index, pattern) in settings.patterns.iter().enumerate() {
		println!("  [{index}] {}", display_name(pattern));
		println!("    expression: {}", pattern.expression);
		println!("    template: {}", pattern.template);
		println!("    enabled: {}", pattern.enabled);
		println!();
	}
}

fn display_name(pattern: &Pattern) -> &str {
	if pattern.name.is_empty() {
		"(unnamed)"
	} else {
		&pattern.name
	}
}

/// Flatten an error and its sources onto one line.
fn error_chain(error: &dyn std::error::Error) -> String {
	let mut message = error.to_string();
	let mut source = error.source();
	while let Some(cause) = source {
		let cause_text = cause.to_string();
		message.push_str(": ");
		message.push_str(&cause_text.split_whitespace().collect::<Vec<_>>().join(" "));
		source = cause.source();
	}
	message
}

fn on_off(enabled: bool) -> &'static str {
	if enabled { "enabled" } else { "disabled" }
}

fn parse_bool(value: &str) -> Result<bool> {
	match value.to_lowercase().as_str() {
		"true" | "yes" | "on" | "1" => Ok(true),
		"false" | "no" | "off" | "0" => Ok(false),
		_ => anyhow::bail!("Expected a boolean (true/false), got {value:?}"),
	}
}
