use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use regex::Regex;
use tarjeem_core::TarjeemConfig;
use tarjeem_core::TarjeemError;
use tarjeem_core::TarjeemResult;
use tarjeem_core::TranslatorOptions;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Localize source files by replacing translation call-sites with dictionary values.",
	long_about = "tarjeem is a build-time localization preprocessor.\n\nIt finds call-sites like \
	              `transl(\"user.title\")` in any text file, looks each dotted key up in a locale \
	              dictionary (JSON, YAML, or TOML), and writes the translated value back as a \
	              quoted string literal.\n\nQuick start:\n  tarjeem translate --locale-dir locales \
	              --lang en --out-dir dist src/app.js\n  tarjeem check --dictionary locales/en.yml \
	              src/*.js\n  tarjeem lookup --dictionary locales/en.yml user.title"
)]
pub struct TarjeemCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Project root. `tarjeem.toml` is looked up here and relative paths in
	/// it are resolved against it.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Dictionary file to use. Overrides every dictionary source from
	/// `tarjeem.toml`.
	#[arg(long, short, global = true)]
	pub dictionary: Option<PathBuf>,

	/// Directory holding one dictionary file per locale.
	#[arg(long, global = true)]
	pub locale_dir: Option<PathBuf>,

	/// Locale identifier, used as the dictionary file stem (e.g. `en`).
	#[arg(long, short, global = true)]
	pub lang: Option<String>,

	/// Dictionary file extension. When absent `.json`, `.yml` and `.yaml`
	/// are tried in that order.
	#[arg(long, global = true)]
	pub ext: Option<String>,

	/// Call-site keyword, e.g. `t` to match `t("key")`.
	#[arg(long, global = true)]
	pub function_name: Option<String>,

	/// Custom call-site pattern. Group 1 is the boundary prefix and group 2
	/// the dictionary key.
	#[arg(long, global = true)]
	pub pattern: Option<String>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Translate files and write the localized copies.
	///
	/// Every file is read whole and translated concurrently. A file with an
	/// unresolved call-site is reported and not written; the command exits
	/// with a non-zero status if any file failed.
	Translate {
		/// Files to translate.
		#[arg(required = true)]
		files: Vec<PathBuf>,

		/// Directory the translated files are written to, keeping their file
		/// names.
		#[arg(long, short, required_unless_present = "dry_run")]
		out_dir: Option<PathBuf>,

		/// Print translated contents to stdout instead of writing files.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Check that every call-site in the given files resolves.
	///
	/// Nothing is written. Exits with status 1 when any file contains a
	/// call-site that cannot be translated. Ideal for CI pipelines.
	Check {
		/// Files to check.
		#[arg(required = true)]
		files: Vec<PathBuf>,

		/// Output format for check results.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Print the dictionary value for a dotted key.
	Lookup {
		/// Dotted key, e.g. `user.title`.
		key: String,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}

impl TarjeemCli {
	/// The project root, defaulting to the current directory.
	pub fn root(&self) -> PathBuf {
		self.path
			.clone()
			.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
	}

	/// Translator options from `tarjeem.toml` (if any) overlaid with the
	/// command-line flags.
	///
	/// `--dictionary` replaces every configured dictionary source. Any of
	/// `--locale-dir`, `--lang` or `--ext` switches to locale composition,
	/// keeping the remaining locale settings from the config file.
	/// `--function-name` discards a configured pattern and `--pattern`
	/// replaces it.
	pub fn translator_options(&self) -> TarjeemResult<TranslatorOptions> {
		let root = self.root();
		let mut options = match TarjeemConfig::load(&root)? {
			Some(config) => config.to_options(&root)?,
			None => TranslatorOptions::new(),
		};

		if let Some(dictionary) = &self.dictionary {
			options.clear_dictionary_sources();
			options.dictionary_path = Some(dictionary.clone());
		} else if self.locale_dir.is_some() || self.lang.is_some() || self.ext.is_some() {
			options.dictionary_path = None;
			options.dictionary_format = None;
			options.shorthand = None;

			if let Some(directory) = &self.locale_dir {
				options.locale_directory = Some(directory.clone());
			}
			if let Some(lang) = &self.lang {
				options.locale_lang = Some(lang.clone());
			}
			if let Some(ext) = &self.ext {
				options.locale_file_ext = Some(ext.clone());
			}
		}

		if let Some(name) = &self.function_name {
			options.pattern = None;
			options.syntax_function_name = Some(name.clone());
		}

		if let Some(source) = &self.pattern {
			options.pattern = Some(Regex::new(source).map_err(|e| {
				TarjeemError::Configuration(format!("invalid syntax pattern `{source}`: {e}"))
			})?);
		}

		Ok(options)
	}
}
