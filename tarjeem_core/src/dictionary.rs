use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use derive_more::Deref;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use tracing::debug;

use crate::TarjeemError;
use crate::TarjeemResult;

/// Extensions tried, in order, when a dictionary path has no recognised
/// extension (e.g. a bare locale path like `locales/en`).
pub const FALLBACK_EXTENSIONS: [&str; 3] = ["json", "yml", "yaml"];

/// The on-disk format of a dictionary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryFormat {
	Json,
	#[serde(alias = "yml")]
	Yaml,
	Toml,
}

impl DictionaryFormat {
	/// Infer the format from a file extension. Matching is case-insensitive.
	pub fn from_extension(extension: &str) -> Option<Self> {
		match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
			"json" => Some(Self::Json),
			"yaml" | "yml" => Some(Self::Yaml),
			"toml" => Some(Self::Toml),
			_ => None,
		}
	}

	/// Parse `content` into a `serde_json::Value`.
	pub fn parse(self, content: &str, path_display: &str) -> TarjeemResult<Value> {
		let to_error = |reason: String| {
			TarjeemError::DictionaryFile {
				path: path_display.to_string(),
				reason,
			}
		};

		match self {
			Self::Json => serde_json::from_str(content).map_err(|e| to_error(e.to_string())),
			Self::Yaml => serde_yaml_ng::from_str(content).map_err(|e| to_error(e.to_string())),
			Self::Toml => {
				let table: toml::Table =
					toml::from_str(content).map_err(|e| to_error(e.to_string()))?;
				Ok(toml_to_json(toml::Value::Table(table)))
			}
		}
	}
}

impl std::fmt::Display for DictionaryFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Json => write!(f, "json"),
			Self::Yaml => write!(f, "yaml"),
			Self::Toml => write!(f, "toml"),
		}
	}
}

impl std::str::FromStr for DictionaryFormat {
	type Err = TarjeemError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_extension(s).ok_or_else(|| TarjeemError::UnsupportedDictionaryFormat(s.to_string()))
	}
}

/// An immutable, nested mapping of locale keys to translated strings.
///
/// Every supported file format is normalized into a JSON object so that
/// lookups behave identically regardless of where the dictionary came from.
///
/// ```rust
/// use serde_json::json;
/// use tarjeem_core::Dictionary;
///
/// let dictionary = Dictionary::try_from(json!({ "user": { "title": "User" } })).unwrap();
/// assert_eq!(dictionary.lookup("user.title").unwrap(), "User");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deref, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Dictionary(Map<String, Value>);

impl Dictionary {
	/// Wrap an already-built object map.
	pub fn new(entries: Map<String, Value>) -> Self {
		Self(entries)
	}

	/// Load a dictionary file.
	///
	/// A path with a recognised extension (`.json`, `.yml`, `.yaml`,
	/// `.toml`) is parsed in that format. Anything else is treated as a base
	/// path: `<path>.json` is tried first, then `<path>.yml` and
	/// `<path>.yaml`. The first candidate that loads wins; when none do the
	/// error from the `.json` attempt is returned.
	pub fn load(path: &Path) -> TarjeemResult<Self> {
		let format = path
			.extension()
			.and_then(|extension| extension.to_str())
			.and_then(DictionaryFormat::from_extension);

		match format {
			Some(format) => Self::load_with_format(path, format),
			None => Self::load_with_fallback(path),
		}
	}

	/// Load a dictionary file using an explicit format, ignoring the
	/// extension.
	pub fn load_with_format(path: &Path, format: DictionaryFormat) -> TarjeemResult<Self> {
		let path_display = path.display().to_string();
		let content = std::fs::read_to_string(path).map_err(|e| {
			TarjeemError::DictionaryFile {
				path: path_display.clone(),
				reason: e.to_string(),
			}
		})?;

		let value = format.parse(&content, &path_display)?;
		let dictionary = Self::try_from(value)?;
		debug!(path = %path_display, %format, keys = dictionary.len(), "loaded dictionary");

		Ok(dictionary)
	}

	fn load_with_fallback(base: &Path) -> TarjeemResult<Self> {
		let mut first_error = None;

		for extension in FALLBACK_EXTENSIONS {
			let candidate = with_appended_extension(base, extension);
			let Some(format) = DictionaryFormat::from_extension(extension) else {
				continue;
			};

			match Self::load_with_format(&candidate, format) {
				Ok(dictionary) => return Ok(dictionary),
				Err(error) => {
					debug!(path = %candidate.display(), %error, "dictionary candidate rejected");
					first_error.get_or_insert(error);
				}
			}
		}

		Err(first_error.unwrap_or_else(|| {
			TarjeemError::DictionaryFile {
				path: base.display().to_string(),
				reason: "no candidate file could be loaded".to_string(),
			}
		}))
	}

	/// Resolve a dotted key path. See [`resolve`].
	pub fn resolve(&self, path: &str) -> Option<&Value> {
		resolve(path, self)
	}

	/// Resolve a dotted key path to the textual form of its leaf value.
	pub fn lookup(&self, path: &str) -> TarjeemResult<String> {
		self.resolve(path).map(leaf_text).ok_or_else(|| {
			TarjeemError::KeyNotFound {
				path: path.to_string(),
			}
		})
	}
}

impl TryFrom<Value> for Dictionary {
	type Error = TarjeemError;

	/// Only non-empty objects are accepted as dictionaries.
	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Object(entries) if !entries.is_empty() => Ok(Self(entries)),
			Value::Object(_) => {
				Err(TarjeemError::Configuration(
					"the dictionary is an empty mapping".to_string(),
				))
			}
			other => {
				Err(TarjeemError::Configuration(format!(
					"the dictionary must be a mapping, got {}",
					value_kind(&other)
				)))
			}
		}
	}
}

impl From<Map<String, Value>> for Dictionary {
	fn from(entries: Map<String, Value>) -> Self {
		Self(entries)
	}
}

/// Walk `path` through `dictionary`.
///
/// The path is trimmed and split on `.`. Descent stops with `None` as soon as
/// the current node is not a mapping, so a path running through a leaf never
/// partially matches. The final node must be a non-empty leaf: `null`,
/// `false`, `0`, `""`, mappings, and arrays all resolve to `None`.
pub fn resolve<'a>(path: &str, dictionary: &'a Dictionary) -> Option<&'a Value> {
	let mut keys = path.trim().split('.');
	let first = keys.next()?;
	let mut node = dictionary.get(first)?;

	for key in keys {
		node = node.as_object()?.get(key)?;
	}

	is_present_leaf(node).then_some(node)
}

/// The text a resolved leaf contributes to the output.
pub fn leaf_text(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

/// A short, human-readable name for the JSON type of `value`.
pub fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "mapping",
	}
}

/// `null`, `false`, zero, and the empty string.
pub(crate) fn is_falsy(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(flag) => !flag,
		Value::Number(number) => number.as_f64().is_none_or(|n| n == 0.0),
		Value::String(text) => text.is_empty(),
		Value::Array(_) | Value::Object(_) => false,
	}
}

fn is_present_leaf(value: &Value) -> bool {
	!value.is_object() && !value.is_array() && !is_falsy(value)
}

fn with_appended_extension(base: &Path, extension: &str) -> PathBuf {
	let mut raw = OsString::from(base.as_os_str());
	raw.push(".");
	raw.push(extension);
	PathBuf::from(raw)
}

/// Convert a `toml::Value` to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> Value {
	match value {
		toml::Value::String(s) => Value::String(s),
		toml::Value::Integer(i) => Value::Number(i.into()),
		toml::Value::Float(f) => {
			serde_json::Number::from_f64(f).map_or_else(|| Value::String(f.to_string()), Value::Number)
		}
		toml::Value::Boolean(b) => Value::Bool(b),
		toml::Value::Datetime(dt) => Value::String(dt.to_string()),
		toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
		toml::Value::Table(table) => {
			Value::Object(
				table
					.into_iter()
					.map(|(key, value)| (key, toml_to_json(value)))
					.collect(),
			)
		}
	}
}
