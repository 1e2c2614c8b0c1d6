use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const SAMPLE: &str = "# User Guide\n\nWelcome to the `mdedit` guide.\n\n## Getting Started\n\nSee [the site](https://example.com) for more.\n\n```\n# not a heading\n```\n\n### Next Steps\n";

fn mdedit(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mdedit"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to run mdedit")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_toc_command() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("guide.md");
    std::fs::write(&doc, SAMPLE).unwrap();

    let output = mdedit(&dir.path().join("config.toml"), &["toc", doc.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "- [User Guide](#user-guide)\n  - [Getting Started](#getting-started)\n    - [Next Steps](#next-steps)\n"
    );
}

#[test]
fn test_headings_command() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("guide.md");
    std::fs::write(&doc, SAMPLE).unwrap();

    let output = mdedit(
        &dir.path().join("config.toml"),
        &["headings", doc.to_str().unwrap()],
    );
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "1\tuser-guide\tUser Guide",
            "2\tgetting-started\tGetting Started",
            "3\tnext-steps\tNext Steps",
        ]
    );
}

#[test]
fn test_count_command() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("words.md");
    std::fs::write(&doc, "Hello `ignored code` world [link text](http://x.y)").unwrap();

    let output = mdedit(&dir.path().join("config.toml"), &["count", doc.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "4 words\n");
}

#[test]
fn test_render_command() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("guide.md");
    let html = dir.path().join("out/guide.html");
    std::fs::write(&doc, SAMPLE).unwrap();

    let output = mdedit(
        &dir.path().join("config.toml"),
        &[
            "render",
            doc.to_str().unwrap(),
            "--theme",
            "dark",
            "-o",
            html.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());

    let page = std::fs::read_to_string(&html).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>User Guide</title>"));
    assert!(page.contains("<h2 id=\"getting-started\">Getting Started</h2>"));
    assert!(page.contains("target=\"_blank\""));
    assert!(page.contains("background-color: #2d3436;"));
}

#[test]
fn test_render_fragment_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("small.md");
    std::fs::write(&doc, "# Small\n\n<i>raw</i>\n").unwrap();

    let output = mdedit(
        &dir.path().join("config.toml"),
        &["render", doc.to_str().unwrap(), "--fragment", "--safe"],
    );
    assert!(output.status.success());
    let html = stdout(&output);
    assert!(html.starts_with("<h1 id=\"small\">Small</h1>"));
    assert!(html.contains("&lt;i&gt;raw&lt;/i&gt;"));
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_empty_file_renders_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("empty.md");
    std::fs::write(&doc, "").unwrap();

    let output = mdedit(&dir.path().join("config.toml"), &["render", doc.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("missing.md");

    let output = mdedit(&dir.path().join("config.toml"), &["count", doc.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn test_stats_command() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    std::fs::create_dir_all(&docs).unwrap();
    std::fs::write(docs.join("a.md"), "# A\n\none two").unwrap();
    std::fs::write(docs.join("b.md"), "three").unwrap();
    std::fs::write(docs.join("skip.txt"), "not counted").unwrap();

    let output = mdedit(&dir.path().join("config.toml"), &["stats", docs.to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("total (2 files)"));
    assert!(!text.contains("skip.txt"));
}

#[test]
fn test_new_command_records_recent_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let target = dir.path().join("chapter");

    let output = mdedit(
        &config,
        &["new", target.to_str().unwrap(), "--title", "Chapter One"],
    );
    assert!(output.status.success());

    let created = dir.path().join("chapter.md");
    assert_eq!(
        std::fs::read_to_string(&created).unwrap(),
        "# Chapter One\n\n"
    );

    let recent = mdedit(&config, &["config", "recent"]);
    assert!(stdout(&recent).contains("chapter.md"));

    let again = mdedit(&config, &["new", target.to_str().unwrap()]);
    assert!(!again.status.success());

    let forced = mdedit(&config, &["new", target.to_str().unwrap(), "--force"]);
    assert!(forced.status.success());
    assert_eq!(std::fs::read_to_string(&created).unwrap(), "");
    assert_eq!(
        std::fs::read_to_string(dir.path().join(".chapter.md.bak")).unwrap(),
        "# Chapter One\n\n"
    );
}

#[test]
fn test_edit_command_appends_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let doc = dir.path().join("journal.md");
    std::fs::write(&doc, "# Journal\n").unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_mdedit"))
        .arg("--config")
        .arg(&config)
        .args(["edit", doc.to_str().unwrap()])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"First entry\nSecond entry\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(&doc).unwrap(),
        "# Journal\nFirst entry\nSecond entry\n"
    );
    assert!(stdout(&output).starts_with("6 words"));
}

#[test]
fn test_config_commands() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let output = mdedit(&config, &["config", "theme", "toggle"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Theme: dark\n");

    let output = mdedit(&config, &["config", "autosave", "off", "--delay", "12"]);
    assert!(output.status.success());

    let shown = stdout(&mdedit(&config, &["config", "show"]));
    assert!(shown.contains("dark_mode = true"));
    assert!(shown.contains("autosave_enabled = false"));
    assert!(shown.contains("autosave_delay = 12"));
}

#[test]
fn test_render_rejects_unknown_theme() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("guide.md");
    std::fs::write(&doc, SAMPLE).unwrap();

    let output = mdedit(
        &dir.path().join("config.toml"),
        &["render", doc.to_str().unwrap(), "--theme", "sepia"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown theme 'sepia'"));
}

#[test]
fn test_read_only_commands_skip_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().join("home");
    std::fs::create_dir_all(&home).unwrap();
    let doc = dir.path().join("guide.md");
    std::fs::write(&doc, SAMPLE).unwrap();

    for command in ["toc", "headings", "count", "render"] {
        let output = Command::new(env!("CARGO_BIN_EXE_mdedit"))
            .env("HOME", &home)
            .args([command, doc.to_str().unwrap()])
            .output()
            .expect("Failed to run mdedit");
        assert!(output.status.success(), "{} failed", command);
    }
    assert!(!home.join(".markdown-editor").exists());
}
