use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use owo_colors::OwoColorize;
use tarjeem_cli::Commands;
use tarjeem_cli::OutputFormat;
use tarjeem_cli::TarjeemCli;
use tarjeem_core::ContentUnit;
use tarjeem_core::TarjeemError;
use tarjeem_core::TarjeemResult;
use tarjeem_core::Translator;
use tarjeem_core::process_unit;
use tokio::task::JoinSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
	let args = TarjeemCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Translate {
			files,
			out_dir,
			dry_run,
		}) => run_translate(&args, files, out_dir.as_deref(), *dry_run).await,
		Some(Commands::Check { files, format }) => run_check(&args, files, *format).await,
		Some(Commands::Lookup { key }) => run_lookup(&args, key),
		None => {
			eprintln!("No subcommand specified. Run `tarjeem --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<TarjeemError>() {
			Ok(tarjeem_err) => {
				let report: miette::Report = (*tarjeem_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so they never mix with translated output on stdout.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
	let default_directive = if verbose { "info" } else { "warn" };
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(color_enabled())
		.with_target(false)
		.init();
}

fn build_translator(args: &TarjeemCli) -> TarjeemResult<Arc<Translator>> {
	let options = args.translator_options()?;
	Ok(Arc::new(Translator::new(options)?))
}

/// The outcome of translating one input file.
struct FileOutcome {
	file: PathBuf,
	result: TarjeemResult<ContentUnit>,
}

/// Translate every file on its own task, sharing one translator. Outcomes
/// are returned in the order the files were given.
async fn translate_files(
	translator: &Arc<Translator>,
	files: &[PathBuf],
) -> Result<Vec<FileOutcome>, Box<dyn std::error::Error>> {
	let mut tasks = JoinSet::new();

	for (index, file) in files.iter().cloned().enumerate() {
		let translator = Arc::clone(translator);
		tasks.spawn(async move {
			let result = match ContentUnit::read(&file) {
				Ok(unit) => process_unit(&translator, unit).await,
				Err(error) => Err(error),
			};
			(index, FileOutcome { file, result })
		});
	}

	let mut outcomes = Vec::with_capacity(files.len());
	while let Some(joined) = tasks.join_next().await {
		outcomes.push(joined?);
	}
	outcomes.sort_by_key(|(index, _)| *index);

	Ok(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
}

fn report_failure(file: &Path, error: TarjeemError) {
	eprintln!("{} {}", colored!("failed:", red), file.display());
	let report = miette::Report::new(error);
	eprintln!("{report:?}");
}

/// Outputs are flattened into `--out-dir`, so two inputs with the same file
/// name would overwrite each other.
fn ensure_distinct_file_names(files: &[PathBuf]) -> CliResult {
	let mut seen: HashMap<&OsStr, &Path> = HashMap::new();

	for file in files {
		let Some(file_name) = file.file_name() else {
			return Err(format!("`{}` does not name a file", file.display()).into());
		};
		if let Some(previous) = seen.insert(file_name, file) {
			return Err(format!(
				"`{}` and `{}` would both be written to `{}` in the output directory",
				previous.display(),
				file.display(),
				file_name.to_string_lossy()
			)
			.into());
		}
	}

	Ok(())
}

async fn run_translate(
	args: &TarjeemCli,
	files: &[PathBuf],
	out_dir: Option<&Path>,
	dry_run: bool,
) -> CliResult {
	if !dry_run {
		ensure_distinct_file_names(files)?;
	}

	let translator = build_translator(args)?;
	let outcomes = translate_files(&translator, files).await?;

	let mut failed = 0_usize;
	let mut written = 0_usize;

	for FileOutcome { file, result } in outcomes {
		let unit = match result {
			Ok(unit) => unit,
			Err(error) => {
				report_failure(&file, error);
				failed += 1;
				continue;
			}
		};
		let text = unit.text().unwrap_or_default();

		if dry_run {
			print!("{text}");
			continue;
		}

		let Some(out_dir) = out_dir else {
			return Err("`--out-dir` is required unless `--dry-run` is set".into());
		};
		let Some(file_name) = file.file_name() else {
			return Err(format!("`{}` does not name a file", file.display()).into());
		};

		std::fs::create_dir_all(out_dir)?;
		let target = out_dir.join(file_name);
		std::fs::write(&target, text)?;
		info!(source = %file.display(), target = %target.display(), "wrote translated file");
		written += 1;

		if args.verbose {
			println!("  {} -> {}", file.display(), target.display());
		}
	}

	if failed > 0 {
		return Err(format!("{failed} file(s) failed to translate").into());
	}

	if !dry_run {
		println!(
			"{} {written} file(s).",
			colored!("Translated", green)
		);
	}

	Ok(())
}

async fn run_check(args: &TarjeemCli, files: &[PathBuf], format: OutputFormat) -> CliResult {
	let translator = build_translator(args)?;
	let outcomes = translate_files(&translator, files).await?;
	let total = outcomes.len();

	match format {
		OutputFormat::Json => {
			let mut ok = true;
			let entries: Vec<serde_json::Value> = outcomes
				.iter()
				.map(|outcome| {
					match &outcome.result {
						Ok(_) => {
							serde_json::json!({
								"file": outcome.file.display().to_string(),
								"ok": true,
							})
						}
						Err(error) => {
							ok = false;
							serde_json::json!({
								"file": outcome.file.display().to_string(),
								"ok": false,
								"error": error.root().to_string(),
							})
						}
					}
				})
				.collect();

			let output = serde_json::json!({ "ok": ok, "files": entries });
			println!("{output}");

			if !ok {
				process::exit(1);
			}
		}
		OutputFormat::Text => {
			let mut failed = 0_usize;
			for FileOutcome { file, result } in outcomes {
				match result {
					Ok(_) => {
						if args.verbose {
							println!("  {} {}", colored!("ok", green), file.display());
						}
					}
					Err(error) => {
						report_failure(&file, error);
						failed += 1;
					}
				}
			}

			if failed > 0 {
				eprintln!(
					"{} {failed} of {total} file(s) contain call-sites that do not resolve.",
					colored!("Check failed:", bold)
				);
				process::exit(1);
			}

			println!("Check passed: every call-site in {total} file(s) resolves.");
		}
	}

	Ok(())
}

fn run_lookup(args: &TarjeemCli, key: &str) -> CliResult {
	let dictionary = args.translator_options()?.load_dictionary()?;

	match dictionary.lookup(key) {
		Ok(value) => {
			println!("{value}");
			Ok(())
		}
		Err(error) => {
			eprintln!("{} {error}", colored!("error:", red));
			process::exit(1);
		}
	}
}
