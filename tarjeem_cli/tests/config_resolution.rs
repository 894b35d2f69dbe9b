mod common;

use clap::Parser;
use tarjeem_cli::Commands;
use tarjeem_cli::OutputFormat;
use tarjeem_cli::TarjeemCli;
use tarjeem_core::AnyEmptyResult;
use tarjeem_core::TarjeemError;
use tarjeem_core::TarjeemResult;
use tarjeem_core::TranslatorOptions;

fn options_for(args: &[&str]) -> TarjeemResult<TranslatorOptions> {
	let cli = TarjeemCli::try_parse_from(args.iter().copied())
		.unwrap_or_else(|e| panic!("arguments should parse: {e}"));
	cli.translator_options()
}

#[test]
fn translate_uses_dictionary_from_config_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_english_locale(tmp.path())?;
	std::fs::write(
		tmp.path().join("tarjeem.toml"),
		"dictionary = \"locales/en.yml\"\n",
	)?;
	std::fs::write(tmp.path().join("app.js"), "transl(\"user.title\")")?;

	common::tarjeem_cmd()
		.arg("translate")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.arg(tmp.path().join("app.js"))
		.assert()
		.success()
		.stdout("\"ENGLISH USER TITLE\"");

	Ok(())
}

#[test]
fn config_locale_section_and_function_name_are_applied() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_english_locale(tmp.path())?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(
		tmp.path().join(".config/tarjeem.toml"),
		"syntax_function_name = \"i18n\"\n\n[locale]\ndirectory = \"locales\"\nlang = \"en\"\n",
	)?;
	std::fs::write(tmp.path().join("app.js"), "i18n('title')")?;

	common::tarjeem_cmd()
		.arg("translate")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.arg(tmp.path().join("app.js"))
		.assert()
		.success()
		.stdout("\"Title\"");

	Ok(())
}

#[test]
fn invalid_config_file_is_reported() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("tarjeem.toml"), "dictionary = [")?;
	std::fs::write(tmp.path().join("app.js"), "")?;

	common::tarjeem_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.arg(tmp.path().join("app.js"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn dictionary_flag_replaces_every_config_source() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("tarjeem.toml"),
		"dictionary = \"locales/en.yml\"\n\n[locale]\ndirectory = \"locales\"\nlang = \"en\"\n",
	)?;
	let root = tmp.path().display().to_string();

	let options = options_for(&["tarjeem", "--path", &root, "--dictionary", "other.json", "lookup", "x"])?;

	assert_eq!(options.dictionary_path, Some("other.json".into()));
	assert_eq!(options.locale_directory, None);
	assert_eq!(options.locale_lang, None);

	Ok(())
}

#[test]
fn lang_flag_keeps_configured_locale_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("tarjeem.toml"),
		"dictionary = \"locales/en.yml\"\n\n[locale]\ndirectory = \"locales\"\nlang = \"en\"\next = \"yml\"\n",
	)?;
	let root = tmp.path().display().to_string();

	let options = options_for(&["tarjeem", "--path", &root, "--lang", "fr", "lookup", "x"])?;

	assert_eq!(options.dictionary_path, None);
	assert_eq!(options.locale_directory, Some(tmp.path().join("locales")));
	assert_eq!(options.locale_lang.as_deref(), Some("fr"));
	assert_eq!(options.locale_file_ext.as_deref(), Some("yml"));

	Ok(())
}

#[test]
fn function_name_flag_discards_configured_pattern() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("tarjeem.toml"),
		"pattern = '(^|\\W)tr\\(\"([^\"]+)\"\\)'\n",
	)?;
	let root = tmp.path().display().to_string();

	let options = options_for(&["tarjeem", "--path", &root, "--function-name", "t", "lookup", "x"])?;

	assert!(options.pattern.is_none());
	assert_eq!(options.syntax_function_name.as_deref(), Some("t"));

	Ok(())
}

#[test]
fn invalid_pattern_flag_is_a_configuration_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let root = tmp.path().display().to_string();

	let error = options_for(&["tarjeem", "--path", &root, "--pattern", "(unclosed", "lookup", "x"])
		.err()
		.ok_or("an unclosed group should not compile")?;

	assert!(matches!(error, TarjeemError::Configuration(_)));

	Ok(())
}

#[test]
fn subcommands_parse() {
	let cli = TarjeemCli::try_parse_from(["tarjeem", "check", "--format", "json", "a.js", "b.js"])
		.unwrap_or_else(|e| panic!("check should parse: {e}"));
	let Some(Commands::Check { files, format }) = cli.command else {
		panic!("expected the check subcommand");
	};
	assert_eq!(files.len(), 2);
	assert!(matches!(format, OutputFormat::Json));

	let cli = TarjeemCli::try_parse_from(["tarjeem", "translate", "--dry-run", "a.js"])
		.unwrap_or_else(|e| panic!("translate should parse: {e}"));
	let Some(Commands::Translate { out_dir, dry_run, .. }) = cli.command else {
		panic!("expected the translate subcommand");
	};
	assert!(dry_run);
	assert_eq!(out_dir, None);

	assert!(TarjeemCli::try_parse_from(["tarjeem", "translate", "a.js"]).is_err());
	assert!(TarjeemCli::try_parse_from(["tarjeem", "lookup"]).is_err());
}
