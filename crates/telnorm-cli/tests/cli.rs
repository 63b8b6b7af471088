use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

const CONTACTS: &str = "BEGIN:VCARD\r
VERSION:3.0\r
FN:Koffi\r
TEL;TYPE=CELL:00229 12 34 56 78\r
TEL:45 678901\r
END:VCARD\r
";

const EXPECTED: &str = "BEGIN:VCARD
VERSION:3.0
FN:Koffi
TEL;TYPE=CELL:+2290112345678
TEL:0145678901
END:VCARD";

fn run(home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("telnorm")
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run command")
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let output = run(home, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn write_input(temp: &TempDir, name: &str, data: &[u8]) -> String {
    let path = temp.path().join(name);
    fs::write(&path, data).expect("write input");
    path.to_str().expect("path").to_string()
}

#[test]
fn cli_process_writes_prefixed_copy() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "contacts.vcf", CONTACTS.as_bytes());

    let stdout = run_ok(temp.path(), &["process", &input]);
    assert!(stdout.contains("1 vCard(s), 2 phone line(s) rewritten"));

    let written = fs::read_to_string(temp.path().join("processed_contacts.vcf")).expect("output");
    assert_eq!(written, EXPECTED);
    assert_eq!(
        fs::read_to_string(&input).expect("input"),
        CONTACTS,
        "input must not be modified"
    );
}

#[test]
fn cli_process_honors_out_and_stdout() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "contacts.vcf", CONTACTS.as_bytes());
    let out = temp.path().join("nested/fixed.vcf");

    run_ok(
        temp.path(),
        &["process", &input, "--out", out.to_str().expect("out")],
    );
    assert_eq!(fs::read_to_string(&out).expect("output"), EXPECTED);

    let printed = run_ok(temp.path(), &["process", &input, "--stdout"]);
    assert_eq!(printed, format!("{EXPECTED}\n"));
}

#[test]
fn cli_process_dry_run_json_reports_without_writing() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "contacts.vcf", CONTACTS.as_bytes());

    let stdout = run_ok(temp.path(), &["--json", "process", &input, "--dry-run"]);
    let report: Value = serde_json::from_str(&stdout).expect("parse json");
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["blocks"], 1);
    assert_eq!(report["eligible"], 3);
    assert_eq!(report["rewritten"], 2);
    assert_eq!(report["rules"]["international_prefix"], 1);
    assert_eq!(report["rules"]["local_number"], 1);
    assert!(!temp.path().join("processed_contacts.vcf").exists());
}

#[test]
fn cli_process_fails_on_malformed_line() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(
        &temp,
        "broken.vcf",
        b"BEGIN:VCARD\nTEL-no-colon-here\nEND:VCARD\n",
    );

    let output = run(temp.path(), &["process", &input]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("error: process vcf file"), "{stderr}");
    assert!(!temp.path().join("processed_broken.vcf").exists());

    let verbose = run(temp.path(), &["--verbose", "process", &input]);
    let stderr = String::from_utf8(verbose.stderr).expect("utf8");
    assert!(stderr.contains("malformed field on line 2"), "{stderr}");
}

#[test]
fn cli_process_skip_policy_keeps_malformed_line() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(
        &temp,
        "broken.vcf",
        b"BEGIN:VCARD\nTEL-no-colon-here\nTEL:229 87654321\nEND:VCARD\n",
    );

    let stdout = run_ok(temp.path(), &["process", &input, "--on-malformed", "skip"]);
    assert!(stdout.contains("1 skipped"));
    assert!(stdout.contains("line 2: skipped"));
    let written = fs::read_to_string(temp.path().join("processed_broken.vcf")).expect("output");
    assert_eq!(
        written,
        "BEGIN:VCARD\nTEL-no-colon-here\nTEL:+2290187654321\nEND:VCARD"
    );
}

#[test]
fn cli_process_rejects_invalid_utf8() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "latin1.vcf", b"BEGIN:VCARD\nFN:Ren\xe9\nEND:VCARD\n");

    let output = run(temp.path(), &["process", &input]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_process_reports_missing_input() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("missing.vcf");

    let output = run(
        temp.path(),
        &["process", missing.to_str().expect("path")],
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_process_uses_config_file() {
    let temp = TempDir::new().expect("temp dir");
    let config_dir = temp.path().join("config/telnorm");
    fs::create_dir_all(&config_dir).expect("config dir");
    fs::write(
        config_dir.join("config.toml"),
        "output_prefix = \"bj_\"\n[rewrite]\non_malformed = \"skip\"\n",
    )
    .expect("write config");
    let input = write_input(
        &temp,
        "contacts.vcf",
        b"BEGIN:VCARD\nTEL-no-colon-here\nEND:VCARD\n",
    );

    run_ok(temp.path(), &["process", &input]);
    assert!(temp.path().join("bj_contacts.vcf").exists());
}

#[test]
fn cli_rejects_missing_explicit_config() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "contacts.vcf", CONTACTS.as_bytes());
    let config = temp.path().join("nope.toml");

    let output = run(
        temp.path(),
        &["--config", config.to_str().expect("path"), "process", &input],
    );
    assert_eq!(output.status.code(), Some(3));
}
