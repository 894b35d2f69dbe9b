use std::future::Ready;
use std::future::ready;

use serde_json::Value;
use tracing::debug;
use tracing::trace;

use crate::Dictionary;
use crate::SyntaxPattern;
use crate::TarjeemResult;
use crate::Transform;
use crate::TransformRegistry;
use crate::TranslatorOptions;
use crate::transform::TRANSLATE;

/// The lookup-and-substitute engine.
///
/// A translator owns its dictionary, its compiled call-site pattern, and its
/// transform registry. None of them change after construction, so a single
/// translator can be shared across threads and used for many concurrent
/// [`translate`](Self::translate) calls.
///
/// ```rust
/// use serde_json::json;
/// use tarjeem_core::Dictionary;
/// use tarjeem_core::Translator;
///
/// let dictionary = Dictionary::try_from(json!({
/// 	"title": "Title",
/// 	"user": { "title": "ENGLISH USER TITLE" }
/// }))
/// .unwrap();
/// let translator = Translator::new(dictionary.into()).unwrap();
///
/// let output = translator
/// 	.substitute(r#"transl("user.title") + transl("title")"#)
/// 	.unwrap();
/// assert_eq!(output, r#""ENGLISH USER TITLE" + "Title""#);
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
	dictionary: Dictionary,
	pattern: SyntaxPattern,
	transforms: TransformRegistry,
	translate: Transform,
}

impl Translator {
	/// Validate `options` and build a translator. Fails immediately when no
	/// dictionary source resolves or the pattern is unusable.
	pub fn new(options: TranslatorOptions) -> TarjeemResult<Self> {
		let dictionary = options.load_dictionary()?;
		let pattern = options.syntax_pattern()?;
		let transforms = options.transforms;
		let translate = transforms.get(TRANSLATE)?;

		debug!(
			pattern = pattern.as_str(),
			keys = dictionary.len(),
			custom_translate = transforms.is_overridden(TRANSLATE),
			"translator ready"
		);

		Ok(Self {
			dictionary,
			pattern,
			transforms,
			translate,
		})
	}

	pub fn dictionary(&self) -> &Dictionary {
		&self.dictionary
	}

	pub fn pattern(&self) -> &SyntaxPattern {
		&self.pattern
	}

	pub fn transforms(&self) -> &TransformRegistry {
		&self.transforms
	}

	/// Rewrite every call-site in `text`, returning a future that is already
	/// complete. The work happens synchronously inside this call; the future
	/// only lets asynchronous callers compose it with other work.
	pub fn translate(&self, text: &str) -> Ready<TarjeemResult<String>> {
		ready(self.substitute(text))
	}

	/// Rewrite every call-site in `text`.
	///
	/// Call-sites are processed left to right. The first one whose transform
	/// fails aborts the pass and its error is returned; nothing is partially
	/// rewritten. Text without call-sites is returned unchanged.
	pub fn substitute(&self, text: &str) -> TarjeemResult<String> {
		let mut result = String::with_capacity(text.len());
		let mut last_end = 0;
		let mut count = 0_usize;

		for site in self.pattern.call_sites(text) {
			let payload = Value::String(site.payload.to_string());
			let output = self.translate.call(&payload, &self.dictionary)?;
			trace!(payload = site.payload, output = %output, offset = site.start, "call-site");

			result.push_str(&text[last_end..site.start]);
			result.push_str(site.prefix);
			result.push_str(&output);
			last_end = site.end;
			count += 1;
		}

		result.push_str(&text[last_end..]);
		debug!(call_sites = count, "substitution complete");

		Ok(result)
	}

	/// Run the transform registered under `name` directly on `payload`.
	pub fn apply(&self, name: &str, payload: &Value) -> TarjeemResult<String> {
		self.transforms.get(name)?.call(payload, &self.dictionary)
	}
}
