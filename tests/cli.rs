use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Path to the fixture bills document
fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("bills.json")
}

/// Run the binary with the given arguments inside `dir` and capture its output
fn run(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_bill-tracker"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("BILL_TRACKER_CONFIG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Bill numbers from JSON lines output
fn bill_numbers(stdout: &str) -> String {
    stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).expect("valid JSON line");
            value["bill_number"].as_str().unwrap_or_default().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn no_command_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run(dir.path(), &[]);
    assert_eq!(code, 0);
    assert!(stdout.contains("render"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("stats"));
}

#[test]
fn list_sorts_recent_first() {
    let dir = tempfile::tempdir().unwrap();
    let source = fixture();
    let (stdout, _, code) = run(
        dir.path(),
        &["list", "--source", source.to_str().unwrap(), "--sort", "recent"],
    );
    assert_eq!(code, 0);
    insta::assert_snapshot!(bill_numbers(&stdout), @r"
    HR 5
    SB 20
    SB 3
    AB 1
    HB 99
    HB 7
    ");
}

#[test]
fn list_sorts_by_state_then_newest() {
    let dir = tempfile::tempdir().unwrap();
    let source = fixture();
    let (stdout, _, code) = run(
        dir.path(),
        &["list", "--source", source.to_str().unwrap(), "--sort", "state"],
    );
    assert_eq!(code, 0);
    insta::assert_snapshot!(bill_numbers(&stdout), @r"
    SB 3
    HB 7
    HR 5
    SB 20
    AB 1
    HB 99
    ");
}

#[test]
fn list_applies_filters_and_limit() {
    let dir = tempfile::tempdir().unwrap();
    let source = fixture();
    let source = source.to_str().unwrap();

    let (stdout, _, code) = run(
        dir.path(),
        &["list", "--source", source, "--jurisdiction", "Ohio", "--status", "enacted"],
    );
    assert_eq!(code, 0);
    assert_eq!(bill_numbers(&stdout), "AB 1");

    let (stdout, _, _) = run(
        dir.path(),
        &["list", "--source", source, "--search", "HEMP"],
    );
    assert_eq!(bill_numbers(&stdout), "HB 7");

    let (stdout, _, _) = run(
        dir.path(),
        &["list", "--source", source, "--sort", "alphabetical", "--limit", "2"],
    );
    assert_eq!(bill_numbers(&stdout), "AB 1\nHB 7");
}

#[test]
fn stats_counts_the_whole_collection() {
    let dir = tempfile::tempdir().unwrap();
    let source = fixture();
    let (stdout, _, code) = run(
        dir.path(),
        &["stats", "--source", source.to_str().unwrap(), "--search", "nothing"],
    );
    assert_eq!(code, 0);
    insta::assert_snapshot!(stdout.trim_end(), @r#"
    {
      "total_bills": 6,
      "jurisdictions": 4,
      "active_bills": 4,
      "analyzed_bills": 1
    }
    "#);
}

#[test]
fn render_writes_page_and_feed() {
    let dir = tempfile::tempdir().unwrap();
    let source = fixture();
    let (_, stderr, code) = run(
        dir.path(),
        &[
            "render",
            "--source",
            source.to_str().unwrap(),
            "--out",
            "site",
            "--title",
            "Cannabis Legislation Tracker",
            "--site-url",
            "https://tracker.example.org/",
        ],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);

    let page = fs::read_to_string(dir.path().join("site").join("index.html")).unwrap();
    assert_eq!(page.matches("<article class=\"bill-card\"").count(), 6);
    assert!(page.contains("<title>Cannabis Legislation Tracker</title>"));
    assert!(page.contains("January 15, 2025 at 02:05 PM"));
    assert!(page.contains(r#"<span class="sponsor-tag">+2 more</span>"#));
    assert!(page.contains("Expungement of &lt;Prior&gt; Convictions"));
    assert!(!page.contains("javascript:"));
    assert!(page.contains(r#"<option value="Texas">Texas</option>"#));

    let feed = fs::read_to_string(dir.path().join("site").join("feed.xml")).unwrap();
    let channel = rss::Channel::read_from(feed.as_bytes()).unwrap();
    assert_eq!(channel.items().len(), 6);
    assert_eq!(channel.link(), "https://tracker.example.org/");
}

#[test]
fn render_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = fixture();
    fs::write(
        dir.path().join("tracker.yml"),
        format!(
            "source: {}\ntitle: Federal Watch\ncoverage: single\nfeed: false\nsort: alphabetical\n",
            source.display()
        ),
    )
    .unwrap();

    let (_, stderr, code) = run(dir.path(), &["render"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let page = fs::read_to_string(dir.path().join("public").join("index.html")).unwrap();
    assert!(page.contains("<title>Federal Watch</title>"));
    assert!(!page.contains("state-badge"));
    assert!(page.contains(r#"<option value="alphabetical" selected>"#));
    assert!(!dir.path().join("public").join("feed.xml").exists());
}

#[test]
fn missing_source_renders_error_page_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run(dir.path(), &["render", "--source", "absent.json"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to load bills from absent.json"));

    let page = fs::read_to_string(dir.path().join("public").join("index.html")).unwrap();
    assert!(page.contains("Failed to load legislation data. Please try again later."));
    assert!(page.contains(r#"<p class="stat-number" id="totalBills">-</p>"#));
    assert!(!dir.path().join("public").join("feed.xml").exists());
}
