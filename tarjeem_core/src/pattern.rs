use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;

use crate::TarjeemError;
use crate::TarjeemResult;

/// The call-site keyword used when none is configured.
pub const DEFAULT_SYNTAX_FUNCTION_NAME: &str = "transl";

/// Placeholder in [`SYNTAX_TEMPLATE`] replaced by the escaped keyword.
const KEYWORD_PLACEHOLDER: &str = "{keyword}";

/// Template for the default call-site pattern.
///
/// Group 1 is the boundary: start of text or a single character that is
/// neither a word character nor `$`. Group 2 is the quoted payload.
pub const SYNTAX_TEMPLATE: &str = r#"(^|[^\w$]){keyword}\(["']([^"']+)["']\)"#;

// The template and default keyword are constants, so this always compiles.
static DEFAULT_SYNTAX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(&SYNTAX_TEMPLATE.replace(KEYWORD_PLACEHOLDER, DEFAULT_SYNTAX_FUNCTION_NAME))
		.expect("default syntax pattern is valid")
});

/// A compiled call-site matcher.
///
/// Every [`Translator`](crate::Translator) owns its own instance; matching
/// keeps no position state between calls so one pattern can serve
/// concurrent scans.
#[derive(Debug, Clone)]
pub struct SyntaxPattern {
	regex: Regex,
}

/// One match of a [`SyntaxPattern`] within a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'t> {
	/// Byte offset where the whole match (boundary included) starts.
	pub start: usize,
	/// Byte offset just past the end of the match.
	pub end: usize,
	/// The boundary character preceding the keyword, or `""` at the start
	/// of the text.
	pub prefix: &'t str,
	/// The text between the quotes.
	pub payload: &'t str,
}

impl SyntaxPattern {
	/// The default pattern for the given call-site keyword. The keyword is
	/// matched literally.
	pub fn with_keyword(keyword: &str) -> TarjeemResult<Self> {
		let keyword = keyword.trim();
		if keyword.is_empty() {
			return Err(TarjeemError::Configuration(
				"the syntax function name must not be empty".to_string(),
			));
		}

		let source = SYNTAX_TEMPLATE.replace(KEYWORD_PLACEHOLDER, &regex::escape(keyword));
		Self::from_regex(Regex::new(&source).map_err(|e| TarjeemError::Configuration(e.to_string()))?)
	}

	/// Compile a custom pattern from its source text.
	pub fn from_source(source: &str) -> TarjeemResult<Self> {
		let regex = Regex::new(source).map_err(|e| {
			TarjeemError::Configuration(format!("invalid syntax pattern `{source}`: {e}"))
		})?;

		Self::from_regex(regex)
	}

	/// Use an already-compiled pattern. It must declare at least two capture
	/// groups: the boundary prefix and the payload.
	pub fn from_regex(regex: Regex) -> TarjeemResult<Self> {
		// `captures_len` counts the implicit whole-match group.
		let groups = regex.captures_len() - 1;
		if groups < 2 {
			return Err(TarjeemError::Configuration(format!(
				"syntax pattern `{}` must have a boundary group and a payload group, found {groups} \
				 group(s)",
				regex.as_str()
			)));
		}

		Ok(Self { regex })
	}

	/// The source text of the compiled pattern.
	pub fn as_str(&self) -> &str {
		self.regex.as_str()
	}

	/// Iterate over every non-overlapping call-site in `text`, left to right.
	pub fn call_sites<'t>(&self, text: &'t str) -> impl Iterator<Item = CallSite<'t>> {
		self.regex.captures_iter(text).filter_map(call_site)
	}

	/// Whether `text` contains at least one call-site.
	pub fn is_match(&self, text: &str) -> bool {
		self.regex.is_match(text)
	}
}

impl Default for SyntaxPattern {
	fn default() -> Self {
		Self {
			regex: DEFAULT_SYNTAX_REGEX.clone(),
		}
	}
}

fn call_site(captures: Captures<'_>) -> Option<CallSite<'_>> {
	let whole = captures.get(0)?;
	let prefix = captures.get(1).map_or("", |m| m.as_str());
	let payload = captures.get(2).map_or("", |m| m.as_str());

	Some(CallSite {
		start: whole.start(),
		end: whole.end(),
		prefix,
		payload,
	})
}
