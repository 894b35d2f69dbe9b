//! Adapter between a build pipeline and the [`Translator`].
//!
//! Pipelines hand over one [`ContentUnit`] per file. Only fully buffered
//! contents are translated; empty units pass straight through and live
//! streams are refused.

use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::TarjeemError;
use crate::TarjeemResult;
use crate::Translator;

/// The payload carried by a [`ContentUnit`].
pub enum Contents {
	/// No contents at all, e.g. a directory entry.
	Empty,
	/// The whole text of the unit.
	Buffer(String),
	/// A live source that has not been read yet.
	Stream(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Contents {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Empty => write!(f, "Empty"),
			Self::Buffer(text) => f.debug_tuple("Buffer").field(text).finish(),
			Self::Stream(_) => f.debug_tuple("Stream").field(&"<reader>").finish(),
		}
	}
}

/// A unit of content moving through a pipeline, usually one file.
#[derive(Debug)]
pub struct ContentUnit {
	/// Where the contents came from, used to identify failures.
	pub path: Option<PathBuf>,
	pub contents: Contents,
}

impl ContentUnit {
	pub fn new(path: Option<PathBuf>, contents: Contents) -> Self {
		Self { path, contents }
	}

	/// A buffered unit.
	pub fn buffer(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
		Self::new(Some(path.into()), Contents::Buffer(text.into()))
	}

	/// Read a file fully into a buffered unit.
	pub fn read(path: &Path) -> TarjeemResult<Self> {
		let text = std::fs::read_to_string(path)?;
		Ok(Self::buffer(path, text))
	}

	/// The buffered text, if any.
	pub fn text(&self) -> Option<&str> {
		match &self.contents {
			Contents::Buffer(text) => Some(text),
			Contents::Empty | Contents::Stream(_) => None,
		}
	}

	fn path_display(&self) -> String {
		self.path
			.as_ref()
			.map_or_else(|| "<unknown>".to_string(), |path| path.display().to_string())
	}
}

/// Translate one unit.
///
/// - [`Contents::Empty`] is returned untouched and the translator is not
///   invoked.
/// - [`Contents::Stream`] fails with [`TarjeemError::StreamingNotSupported`].
/// - [`Contents::Buffer`] is replaced with the rewritten text. A failure is
///   wrapped in [`TarjeemError::UnitFailed`] naming the unit's path.
pub async fn process_unit(translator: &Translator, mut unit: ContentUnit) -> TarjeemResult<ContentUnit> {
	let text = match std::mem::replace(&mut unit.contents, Contents::Empty) {
		Contents::Empty => {
			debug!(path = %unit.path_display(), "passing through empty unit");
			return Ok(unit);
		}
		Contents::Stream(_) => return Err(TarjeemError::StreamingNotSupported),
		Contents::Buffer(text) => text,
	};

	match translator.translate(&text).await {
		Ok(translated) => {
			unit.contents = Contents::Buffer(translated);
			Ok(unit)
		}
		Err(error) => {
			Err(TarjeemError::UnitFailed {
				path: unit.path_display(),
				source: Box::new(error),
			})
		}
	}
}
