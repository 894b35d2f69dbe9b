use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;
use tarjeem_core::AnyResult;

pub fn tarjeem_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("tarjeem"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Write the english locale used across the CLI tests to
/// `<root>/locales/en.yml` and return its path.
#[allow(dead_code)]
pub fn write_english_locale(root: &Path) -> AnyResult<std::path::PathBuf> {
	let directory = root.join("locales");
	std::fs::create_dir_all(&directory)?;
	let path = directory.join("en.yml");
	std::fs::write(
		&path,
		"title: Title\nuser:\n  title: ENGLISH USER TITLE\n  count: 3\n",
	)?;
	Ok(path)
}
