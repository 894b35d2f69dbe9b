mod common;

use rstest::rstest;
use tarjeem_core::AnyEmptyResult;

#[rstest]
#[case::top_level("title", "Title\n")]
#[case::nested("user.title", "ENGLISH USER TITLE\n")]
#[case::number("user.count", "3\n")]
#[case::surrounding_whitespace(" user.title ", "ENGLISH USER TITLE\n")]
fn lookup_prints_raw_value(#[case] key: &str, #[case] expected: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let dictionary = common::write_english_locale(tmp.path())?;

	common::tarjeem_cmd()
		.arg("lookup")
		.arg("--dictionary")
		.arg(&dictionary)
		.arg(key)
		.assert()
		.success()
		.stdout(predicates::str::diff(expected.to_string()));

	Ok(())
}

#[rstest]
#[case::missing_leaf("user.name")]
#[case::mapping("user")]
#[case::through_leaf("title.extra")]
fn lookup_exits_1_when_key_is_absent(#[case] key: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let dictionary = common::write_english_locale(tmp.path())?;

	common::tarjeem_cmd()
		.arg("lookup")
		.arg("--dictionary")
		.arg(&dictionary)
		.arg(key)
		.assert()
		.code(1)
		.stderr(predicates::str::contains(format!(
			"no such content ({key}) in locale file"
		)));

	Ok(())
}

#[test]
fn lookup_falls_back_to_yaml_when_json_is_absent() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_english_locale(tmp.path())?;

	common::tarjeem_cmd()
		.arg("lookup")
		.arg("--locale-dir")
		.arg(tmp.path().join("locales"))
		.arg("--lang")
		.arg("en")
		.arg("title")
		.assert()
		.success()
		.stdout("Title\n");

	Ok(())
}

#[test]
fn lookup_reads_toml_dictionary_with_explicit_ext() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("fr.toml"),
		"title = \"Titre\"\n\n[user]\ntitle = \"TITRE UTILISATEUR\"\n",
	)?;

	common::tarjeem_cmd()
		.arg("lookup")
		.arg("--locale-dir")
		.arg(tmp.path())
		.arg("--lang")
		.arg("fr")
		.arg("--ext")
		.arg(".toml")
		.arg("user.title")
		.assert()
		.success()
		.stdout("TITRE UTILISATEUR\n");

	Ok(())
}
