use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::Dictionary;
use crate::TarjeemError;
use crate::TarjeemResult;
use crate::dictionary::is_falsy;
use crate::dictionary::value_kind;

/// Name of the transform applied to every call-site.
pub const TRANSLATE: &str = "translate";

/// Signature shared by every transform: the matched payload and the
/// engine's dictionary in, substituted text out.
pub type TransformFn = dyn Fn(&Value, &Dictionary) -> TarjeemResult<String> + Send + Sync;

/// The transforms that ship with tarjeem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTransform {
	/// Look the payload up as a dotted path and emit the value as a quoted
	/// string literal.
	Translate,
	/// Upper-case the payload.
	Uppercase,
	/// Lower-case the payload.
	Lowercase,
	/// Upper-case the first character of the payload.
	Capitalize,
	/// Lower-case the payload, then upper-case the first character of every
	/// whitespace-delimited word.
	CapitalizeEvery,
	/// Reverse the characters of the payload.
	Reverse,
}

impl BuiltinTransform {
	pub const ALL: [Self; 6] = [
		Self::Translate,
		Self::Uppercase,
		Self::Lowercase,
		Self::Capitalize,
		Self::CapitalizeEvery,
		Self::Reverse,
	];

	/// Run the transform.
	pub fn apply(self, payload: &Value, dictionary: &Dictionary) -> TarjeemResult<String> {
		let name = self.to_string();
		let text = require_text(&name, payload)?;

		let output = match self {
			Self::Translate => format!("\"{}\"", dictionary.lookup(text)?),
			Self::Uppercase => text.to_uppercase(),
			Self::Lowercase => text.to_lowercase(),
			Self::Capitalize => capitalize(text),
			Self::CapitalizeEvery => capitalize_every(text),
			Self::Reverse => text.chars().rev().collect(),
		};

		Ok(output)
	}
}

impl std::fmt::Display for BuiltinTransform {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Translate => write!(f, "translate"),
			Self::Uppercase => write!(f, "uppercase"),
			Self::Lowercase => write!(f, "lowercase"),
			Self::Capitalize => write!(f, "capitalize"),
			Self::CapitalizeEvery => write!(f, "capitalizeEvery"),
			Self::Reverse => write!(f, "reverse"),
		}
	}
}

impl std::str::FromStr for BuiltinTransform {
	type Err = TarjeemError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let transform = match s {
			"translate" => Self::Translate,
			"uppercase" => Self::Uppercase,
			"lowercase" => Self::Lowercase,
			"capitalize" => Self::Capitalize,
			"capitalizeEvery" | "capitalize_every" => Self::CapitalizeEvery,
			"reverse" => Self::Reverse,
			_ => return Err(TarjeemError::UnsupportedTransform(s.to_string())),
		};

		Ok(transform)
	}
}

/// A callable transform, either built in or supplied by the caller.
#[derive(Clone)]
pub enum Transform {
	Builtin(BuiltinTransform),
	Custom(Arc<TransformFn>),
}

impl Transform {
	/// Wrap a closure as a custom transform.
	///
	/// ```rust
	/// use tarjeem_core::Transform;
	///
	/// let shout = Transform::custom(|payload, _dictionary| {
	/// 	Ok(format!("{}!", payload.as_str().unwrap_or_default()))
	/// });
	/// # let _ = shout;
	/// ```
	pub fn custom<F>(func: F) -> Self
	where
		F: Fn(&Value, &Dictionary) -> TarjeemResult<String> + Send + Sync + 'static,
	{
		Self::Custom(Arc::new(func))
	}

	pub fn call(&self, payload: &Value, dictionary: &Dictionary) -> TarjeemResult<String> {
		match self {
			Self::Builtin(builtin) => builtin.apply(payload, dictionary),
			Self::Custom(func) => func(payload, dictionary),
		}
	}
}

impl std::fmt::Debug for Transform {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
			Self::Custom(_) => f.debug_tuple("Custom").field(&"<fn>").finish(),
		}
	}
}

impl From<BuiltinTransform> for Transform {
	fn from(builtin: BuiltinTransform) -> Self {
		Self::Builtin(builtin)
	}
}

/// Lookup table from transform name to implementation.
///
/// Registered transforms shadow built-ins with the same name.
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
	overrides: HashMap<String, Transform>,
}

impl TransformRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `transform` under `name`, returning any transform previously
	/// registered under the same name.
	pub fn register(&mut self, name: impl Into<String>, transform: Transform) -> Option<Transform> {
		self.overrides.insert(name.into(), transform)
	}

	/// Find the transform registered under `name`, falling back to the
	/// built-ins.
	pub fn get(&self, name: &str) -> TarjeemResult<Transform> {
		if let Some(transform) = self.overrides.get(name) {
			return Ok(transform.clone());
		}

		name.parse::<BuiltinTransform>().map(Transform::Builtin)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_ok()
	}

	/// Whether `name` resolves to a caller-supplied transform.
	pub fn is_overridden(&self, name: &str) -> bool {
		self.overrides.contains_key(name)
	}

	/// Every available transform name, sorted.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = BuiltinTransform::ALL
			.iter()
			.map(ToString::to_string)
			.chain(self.overrides.keys().cloned())
			.collect();
		names.sort();
		names.dedup();
		names
	}
}

impl<S: Into<String>> FromIterator<(S, Transform)> for TransformRegistry {
	fn from_iter<I: IntoIterator<Item = (S, Transform)>>(iter: I) -> Self {
		Self {
			overrides: iter
				.into_iter()
				.map(|(name, transform)| (name.into(), transform))
				.collect(),
		}
	}
}

fn require_text<'a>(transform: &str, payload: &'a Value) -> TarjeemResult<&'a str> {
	if is_falsy(payload) {
		return Err(TarjeemError::NoContent(transform.to_string()));
	}

	payload.as_str().ok_or_else(|| {
		TarjeemError::InvalidInputType {
			transform: transform.to_string(),
			found: value_kind(payload).to_string(),
		}
	})
}

fn capitalize(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

fn capitalize_every(text: &str) -> String {
	let mut result = String::with_capacity(text.len());
	let mut at_word_start = true;

	for ch in text.to_lowercase().chars() {
		if ch.is_whitespace() {
			at_word_start = true;
			result.push(ch);
		} else if at_word_start {
			at_word_start = false;
			result.extend(ch.to_uppercase());
		} else {
			result.push(ch);
		}
	}

	result
}
