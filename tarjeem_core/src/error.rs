use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum TarjeemError {
	#[error(transparent)]
	#[diagnostic(code(tarjeem::io_error))]
	Io(#[from] std::io::Error),

	#[error("no content to transform ({0})")]
	#[diagnostic(
		code(tarjeem::no_content),
		help("call-sites must carry a non-empty key, e.g. `transl(\"user.title\")`")
	)]
	NoContent(String),

	#[error("no such content ({path}) in locale file")]
	#[diagnostic(
		code(tarjeem::key_not_found),
		help("add a non-empty value for `{path}` to the dictionary")
	)]
	KeyNotFound { path: String },

	#[error("transform `{transform}` expects a string, got {found}")]
	#[diagnostic(code(tarjeem::invalid_input_type))]
	InvalidInputType { transform: String, found: String },

	#[error("unsupported transform: `{0}`")]
	#[diagnostic(
		code(tarjeem::unsupported_transform),
		help(
			"available transforms: translate, uppercase, lowercase, capitalize, \
			 capitalizeEvery, reverse"
		)
	)]
	UnsupportedTransform(String),

	#[error("invalid configuration: {0}")]
	#[diagnostic(
		code(tarjeem::configuration),
		help(
			"supply a dictionary object, a `dictionary` file path, or `locale.directory` \
			 together with `locale.lang`"
		)
	)]
	Configuration(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(tarjeem::config_parse),
		help("check that tarjeem.toml is valid TOML")
	)]
	ConfigParse(String),

	#[error("failed to load dictionary file `{path}`: {reason}")]
	#[diagnostic(code(tarjeem::dictionary_file))]
	DictionaryFile { path: String, reason: String },

	#[error("unsupported dictionary file format: `{0}`")]
	#[diagnostic(
		code(tarjeem::unsupported_format),
		help("supported formats: json, yaml, yml, toml")
	)]
	UnsupportedDictionaryFormat(String),

	#[error("streaming not supported")]
	#[diagnostic(
		code(tarjeem::streaming_not_supported),
		help("buffer the whole content before translating it")
	)]
	StreamingNotSupported,

	#[error("{source} and is used in {path}")]
	#[diagnostic(code(tarjeem::unit_failed))]
	UnitFailed {
		path: String,
		#[source]
		source: Box<TarjeemError>,
	},
}

impl TarjeemError {
	/// The error at the root of any [`TarjeemError::UnitFailed`] wrapping.
	pub fn root(&self) -> &TarjeemError {
		match self {
			Self::UnitFailed { source, .. } => source.root(),
			other => other,
		}
	}
}

pub type TarjeemResult<T> = Result<T, TarjeemError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
