//! `tarjeem_core` is the engine behind [tarjeem](https://github.com/arathunku/tarjeem), a build-time localization preprocessor. It finds translation call-sites such as `transl("user.title")` in any text, resolves each dotted key against a locale dictionary, and writes the translated value back as a quoted string literal.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source text
//!   → Syntax pattern (finds `keyword("dotted.path")` call-sites, left to right)
//!   → Transform registry (selects `translate`, built-in or caller-supplied)
//!   → Dictionary resolver (walks the dotted path through nested mappings)
//!   → Translator (splices `prefix + "value"` back, or aborts on the first failure)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: `TranslatorOptions` and `tarjeem.toml` loading.
//! - [`dictionary`]: Dictionary loading (JSON, YAML, TOML) and dotted-path resolution.
//! - [`pattern`]: The compiled call-site matcher.
//! - [`transform`]: Built-in transforms and the transform registry.
//! - [`unit`]: Adapter used by build pipelines to translate whole files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tarjeem_core::Translator;
//! use tarjeem_core::TranslatorOptions;
//!
//! # async fn run() -> tarjeem_core::TarjeemResult<()> {
//! let translator = Translator::new(TranslatorOptions::new().with_locale("locales", "en"))?;
//! let output = translator.translate(r#"title = transl("user.title");"#).await?;
//! println!("{output}");
//! # Ok(())
//! # }
//! ```

pub use config::*;
pub use dictionary::Dictionary;
pub use dictionary::DictionaryFormat;
pub use dictionary::resolve;
pub use engine::*;
pub use error::*;
pub use pattern::CallSite;
pub use pattern::SyntaxPattern;
pub use transform::BuiltinTransform;
pub use transform::Transform;
pub use transform::TransformRegistry;
pub use unit::ContentUnit;
pub use unit::Contents;
pub use unit::process_unit;

pub mod config;
pub mod dictionary;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod pattern;
pub mod transform;
pub mod unit;
