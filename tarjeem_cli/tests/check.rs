mod common;

use serde_json::Value;
use tarjeem_core::AnyEmptyResult;

#[test]
fn check_passes_when_every_call_site_resolves() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let dictionary = common::write_english_locale(tmp.path())?;
	std::fs::write(tmp.path().join("a.js"), "transl(\"title\")")?;
	std::fs::write(tmp.path().join("b.js"), "no call-sites here")?;

	common::tarjeem_cmd()
		.arg("check")
		.arg("--dictionary")
		.arg(&dictionary)
		.arg(tmp.path().join("a.js"))
		.arg(tmp.path().join("b.js"))
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Check passed: every call-site in 2 file(s) resolves.",
		));

	Ok(())
}

#[test]
fn check_fails_on_missing_key() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let dictionary = common::write_english_locale(tmp.path())?;
	let file = tmp.path().join("a.js");
	std::fs::write(&file, "transl(\"user.unknown\")")?;

	common::tarjeem_cmd()
		.arg("check")
		.arg("--dictionary")
		.arg(&dictionary)
		.arg(&file)
		.assert()
		.code(1)
		.stderr(predicates::str::contains("no such content (user.unknown)"))
		.stderr(predicates::str::contains("Check failed: 1 of 1 file(s)"));

	// Checking never writes anything.
	similar_asserts::assert_eq!(std::fs::read_to_string(&file)?, "transl(\"user.unknown\")");

	Ok(())
}

#[test]
fn check_json_output_lists_every_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let dictionary = common::write_english_locale(tmp.path())?;
	let good = tmp.path().join("good.js");
	let bad = tmp.path().join("bad.js");
	std::fs::write(&good, "transl(\"user.count\")")?;
	std::fs::write(&bad, "transl(\"user\")")?;

	let output = common::tarjeem_cmd()
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--dictionary")
		.arg(&dictionary)
		.arg(&good)
		.arg(&bad)
		.output()?;

	assert_eq!(output.status.code(), Some(1));

	let json: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["ok"], Value::Bool(false));

	let files = json["files"].as_array().ok_or("files should be an array")?;
	assert_eq!(files.len(), 2);
	assert_eq!(files[0]["file"], Value::String(good.display().to_string()));
	assert_eq!(files[0]["ok"], Value::Bool(true));
	assert_eq!(files[1]["file"], Value::String(bad.display().to_string()));
	assert_eq!(files[1]["ok"], Value::Bool(false));
	assert_eq!(
		files[1]["error"],
		Value::String("no such content (user) in locale file".to_string())
	);

	Ok(())
}

#[test]
fn check_reports_unreadable_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let dictionary = common::write_english_locale(tmp.path())?;

	common::tarjeem_cmd()
		.arg("check")
		.arg("--dictionary")
		.arg(&dictionary)
		.arg(tmp.path().join("missing.js"))
		.assert()
		.code(1)
		.stderr(predicates::str::contains("missing.js"));

	Ok(())
}
