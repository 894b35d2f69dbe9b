use std::path::Path;
use std::path::PathBuf;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::Dictionary;
use crate::DictionaryFormat;
use crate::SyntaxPattern;
use crate::TarjeemError;
use crate::TarjeemResult;
use crate::Transform;
use crate::TransformRegistry;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["tarjeem.toml", ".tarjeem.toml", ".config/tarjeem.toml"];

/// Everything needed to construct a [`Translator`](crate::Translator).
///
/// Exactly one dictionary source has to resolve. When several are set they
/// are tried in this order and the first one configured wins:
///
/// 1. `dictionary`: an in-memory dictionary.
/// 2. `dictionary_path`: an explicit file.
/// 3. `locale_directory` + `locale_lang` (+ `locale_file_ext`): composed
///    into `<directory>/<lang>.<ext>`, or `<directory>/<lang>` with the
///    json/yml/yaml fallback when no extension is given.
/// 4. `shorthand`: a bare path, as produced by `TranslatorOptions::from("locales/en")`.
///
/// The call-site matcher is `pattern` when given, otherwise the default
/// template with `syntax_function_name` as the keyword.
#[derive(Debug, Clone, Default)]
pub struct TranslatorOptions {
	pub dictionary: Option<Dictionary>,
	pub dictionary_path: Option<PathBuf>,
	/// Format override for `dictionary_path`; inferred from the extension
	/// when absent.
	pub dictionary_format: Option<DictionaryFormat>,
	pub locale_directory: Option<PathBuf>,
	pub locale_lang: Option<String>,
	pub locale_file_ext: Option<String>,
	pub shorthand: Option<PathBuf>,
	pub pattern: Option<Regex>,
	pub syntax_function_name: Option<String>,
	pub transforms: TransformRegistry,
}

impl TranslatorOptions {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_dictionary(mut self, dictionary: Dictionary) -> Self {
		self.dictionary = Some(dictionary);
		self
	}

	#[must_use]
	pub fn with_dictionary_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.dictionary_path = Some(path.into());
		self
	}

	#[must_use]
	pub fn with_dictionary_format(mut self, format: DictionaryFormat) -> Self {
		self.dictionary_format = Some(format);
		self
	}

	#[must_use]
	pub fn with_locale(mut self, directory: impl Into<PathBuf>, lang: impl Into<String>) -> Self {
		self.locale_directory = Some(directory.into());
		self.locale_lang = Some(lang.into());
		self
	}

	#[must_use]
	pub fn with_locale_file_ext(mut self, extension: impl Into<String>) -> Self {
		self.locale_file_ext = Some(extension.into());
		self
	}

	#[must_use]
	pub fn with_pattern(mut self, pattern: Regex) -> Self {
		self.pattern = Some(pattern);
		self
	}

	#[must_use]
	pub fn with_syntax_function_name(mut self, name: impl Into<String>) -> Self {
		self.syntax_function_name = Some(name.into());
		self
	}

	/// Register a transform, shadowing any built-in with the same name.
	#[must_use]
	pub fn with_transform(mut self, name: impl Into<String>, transform: Transform) -> Self {
		self.transforms.register(name, transform);
		self
	}

	/// Whether any dictionary source is configured at all.
	pub fn has_dictionary_source(&self) -> bool {
		self.dictionary.is_some()
			|| self.dictionary_path.is_some()
			|| self.locale_directory.is_some()
			|| self.locale_lang.is_some()
			|| self.shorthand.is_some()
	}

	/// Drop every configured dictionary source.
	pub fn clear_dictionary_sources(&mut self) {
		self.dictionary = None;
		self.dictionary_path = None;
		self.dictionary_format = None;
		self.locale_directory = None;
		self.locale_lang = None;
		self.locale_file_ext = None;
		self.shorthand = None;
	}

	/// Resolve the configured dictionary source into a loaded dictionary.
	pub fn load_dictionary(&self) -> TarjeemResult<Dictionary> {
		if let Some(dictionary) = &self.dictionary {
			debug!(keys = dictionary.len(), "using in-memory dictionary");
			if dictionary.is_empty() {
				return Err(TarjeemError::Configuration(
					"the dictionary is an empty mapping".to_string(),
				));
			}
			return Ok(dictionary.clone());
		}

		if let Some(path) = &self.dictionary_path {
			debug!(path = %path.display(), "loading dictionary from explicit path");
			return match self.dictionary_format {
				Some(format) => Dictionary::load_with_format(path, format),
				None => Dictionary::load(path),
			};
		}

		match (&self.locale_directory, &self.locale_lang) {
			(Some(directory), Some(lang)) => {
				return self.load_locale_dictionary(directory, lang);
			}
			(Some(directory), None) => {
				return Err(TarjeemError::Configuration(format!(
					"locale directory `{}` was given without a locale language",
					directory.display()
				)));
			}
			(None, Some(lang)) => {
				return Err(TarjeemError::Configuration(format!(
					"locale language `{lang}` was given without a locale directory"
				)));
			}
			(None, None) => {}
		}

		if let Some(path) = &self.shorthand {
			debug!(path = %path.display(), "loading dictionary from shorthand path");
			return Dictionary::load(path);
		}

		Err(TarjeemError::Configuration(
			"no dictionary source was supplied".to_string(),
		))
	}

	/// Build the call-site matcher: an explicit pattern wins over a keyword
	/// override, which wins over the default keyword.
	pub fn syntax_pattern(&self) -> TarjeemResult<SyntaxPattern> {
		if let Some(pattern) = &self.pattern {
			return SyntaxPattern::from_regex(pattern.clone());
		}

		match &self.syntax_function_name {
			Some(name) => SyntaxPattern::with_keyword(name),
			None => Ok(SyntaxPattern::default()),
		}
	}

	fn load_locale_dictionary(&self, directory: &Path, lang: &str) -> TarjeemResult<Dictionary> {
		let base = directory.join(lang);
		let extension = self
			.locale_file_ext
			.as_deref()
			.map(|extension| extension.trim().trim_start_matches('.'))
			.filter(|extension| !extension.is_empty());

		let Some(extension) = extension else {
			debug!(base = %base.display(), "loading locale dictionary with extension fallback");
			return Dictionary::load(&base);
		};

		let format = extension.parse::<DictionaryFormat>()?;
		let mut file_name = base.into_os_string();
		file_name.push(".");
		file_name.push(extension);
		let path = PathBuf::from(file_name);
		debug!(path = %path.display(), "loading locale dictionary");

		Dictionary::load_with_format(&path, format)
	}
}

impl From<Dictionary> for TranslatorOptions {
	fn from(dictionary: Dictionary) -> Self {
		Self::new().with_dictionary(dictionary)
	}
}

impl From<&str> for TranslatorOptions {
	fn from(shorthand: &str) -> Self {
		Self {
			shorthand: Some(PathBuf::from(shorthand)),
			..Self::default()
		}
	}
}

impl From<&Path> for TranslatorOptions {
	fn from(shorthand: &Path) -> Self {
		Self {
			shorthand: Some(shorthand.to_path_buf()),
			..Self::default()
		}
	}
}

/// Dictionary entry of `tarjeem.toml`.
///
/// Plain string entries are paths:
///
/// ```toml
/// dictionary = "locales/en.yml"
/// ```
///
/// Typed entries provide an explicit format:
///
/// ```toml
/// dictionary = { path = "locales/en.messages", format = "yaml" }
/// ```
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
#[non_exhaustive]
pub enum DictionarySource {
	Path(PathBuf),
	Typed(TypedDictionarySource),
}

impl DictionarySource {
	pub fn path(&self) -> &Path {
		match self {
			Self::Path(path) => path.as_path(),
			Self::Typed(typed) => typed.path.as_path(),
		}
	}

	pub fn format(&self) -> Option<DictionaryFormat> {
		match self {
			Self::Path(_) => None,
			Self::Typed(typed) => Some(typed.format),
		}
	}
}

#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct TypedDictionarySource {
	pub path: PathBuf,
	pub format: DictionaryFormat,
}

/// The `[locale]` section of `tarjeem.toml`.
#[derive(Debug, Clone, Default, Deserialize, Eq, PartialEq)]
pub struct LocaleConfig {
	/// Directory holding one dictionary file per locale.
	#[serde(default)]
	pub directory: Option<PathBuf>,
	/// Locale identifier, used as the file stem (e.g. `en`).
	#[serde(default)]
	pub lang: Option<String>,
	/// File extension. When absent `.json`, `.yml` and `.yaml` are tried in
	/// that order.
	#[serde(default)]
	pub ext: Option<String>,
}

/// Configuration loaded from a `tarjeem.toml` file.
///
/// ```toml
/// dictionary = "locales/en.yml"
/// syntax_function_name = "transl"
/// pattern = '(^|\W)t\("([^"]+)"\)'
///
/// [locale]
/// directory = "locales"
/// lang = "en"
/// ext = "yml"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct TarjeemConfig {
	/// Explicit dictionary file, relative to the project root.
	#[serde(default)]
	pub dictionary: Option<DictionarySource>,
	/// Keyword of the default call-site pattern.
	#[serde(default)]
	pub syntax_function_name: Option<String>,
	/// Custom call-site pattern with a boundary group and a payload group.
	#[serde(default)]
	pub pattern: Option<String>,
	#[serde(default)]
	pub locale: LocaleConfig,
}

impl TarjeemConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> TarjeemResult<Option<TarjeemConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;
		debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	pub fn parse(content: &str) -> TarjeemResult<TarjeemConfig> {
		toml::from_str(content).map_err(|e| TarjeemError::ConfigParse(e.to_string()))
	}

	/// Convert into translator options, resolving relative paths against
	/// `root`.
	pub fn to_options(&self, root: &Path) -> TarjeemResult<TranslatorOptions> {
		let mut options = TranslatorOptions::new();

		if let Some(source) = &self.dictionary {
			options.dictionary_path = Some(root.join(source.path()));
			options.dictionary_format = source.format();
		}

		options.locale_directory = self.locale.directory.as_ref().map(|dir| root.join(dir));
		options.locale_lang.clone_from(&self.locale.lang);
		options.locale_file_ext.clone_from(&self.locale.ext);
		options.syntax_function_name.clone_from(&self.syntax_function_name);

		if let Some(source) = &self.pattern {
			options.pattern = Some(Regex::new(source).map_err(|e| {
				TarjeemError::Configuration(format!("invalid syntax pattern `{source}`: {e}"))
			})?);
		}

		Ok(options)
	}
}
