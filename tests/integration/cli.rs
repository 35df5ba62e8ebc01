//! End-to-end tests for the `notetitle` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    _temp: TempDir,
    vault: PathBuf,
    settings: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let vault = temp.path().join("Notes");
        fs::create_dir_all(vault.join("projects")).unwrap();
        fs::write(
            vault.join("projects/todo.md"),
            "---\nproject: Apollo\ntags: [plan, q3]\ncreated: <% tp.date.now() %>\n---\n# Todo\n",
        )
        .unwrap();
        fs::write(vault.join("photo.png"), [0u8; 4]).unwrap();

        let settings = temp.path().join("settings.toml");
        Self {
            _temp: temp,
            vault,
            settings,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("notetitle").unwrap();
        cmd.env_remove("RUST_LOG").env_remove("NOTETITLE_CONFIG").arg("--config").arg(&self.settings);
        cmd
    }

    fn write_settings(&self, content: &str) {
        fs::write(&self.settings, content).unwrap();
    }

    fn vault(&self) -> &Path {
        &self.vault
    }
}

#[test]
fn test_render_active_note() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["render", "--file", "projects/todo.md", "--base-title", "Notes - Obsidian v1.4.16"])
        .arg("--vault")
        .arg(ws.vault())
        .assert()
        .success()
        .stdout("todo - Notes - App v1.4.16\n");
}

#[test]
fn test_render_without_file_uses_empty_template() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["render", "--base-title", "Notes - Obsidian v1.4.16"])
        .arg("--vault")
        .arg(ws.vault())
        .assert()
        .success()
        .stdout("Notes - App v1.4.16\n");
}

#[test]
fn test_render_with_front_matter_template() {
    let ws = Workspace::new();
    ws.write_settings(
        "titleTemplate = \"{{frontmatter.project}}~~{{frontmatter.created}}~~{{basename}}~~{{vault}}\"\n",
    );
    ws.cmd()
        .args(["render", "--file", "projects/todo.md"])
        .arg("--vault")
        .arg(ws.vault())
        .assert()
        .success()
        .stdout("Apollo - todo - Notes\n");
}

#[test]
fn test_render_non_markdown_keeps_full_name() {
    let ws = Workspace::new();
    ws.write_settings("titleTemplate = \"{{basename}} ({{extension}})\"\n");
    ws.cmd()
        .args(["render", "--file", "photo.png"])
        .arg("--vault")
        .arg(ws.vault())
        .assert()
        .success()
        .stdout("photo.png (png)\n");
}

#[test]
fn test_render_folder_counts_as_no_file() {
    let ws = Workspace::new();
    ws.write_settings("titleTemplateEmpty = \"{{vault}} (empty)\"\n");
    ws.cmd()
        .args(["render", "--file", "projects"])
        .arg("--vault")
        .arg(ws.vault())
        .assert()
        .success()
        .stdout("Notes (empty)\n");
}

#[test]
fn test_render_reads_workspace() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.vault().join(".obsidian")).unwrap();
    fs::write(ws.vault().join(".obsidian/workspaces.json"), r#"{"active": "Writing"}"#).unwrap();
    ws.write_settings("titleTemplateEmpty = \"{{vault}}~~{{workspace}}\"\n");

    ws.cmd()
        .arg("render")
        .arg("--vault")
        .arg(ws.vault())
        .assert()
        .success()
        .stdout("Notes - Writing\n");
}

#[test]
fn test_missing_vault_fails_with_suggestion() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["render", "--vault"])
        .arg(ws.vault().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vault not found"))
        .stderr(predicate::str::contains("--vault"));
}

#[test]
fn test_invalid_settings_file_fails() {
    let ws = Workspace::new();
    ws.write_settings("titleTemplate = [");
    ws.cmd()
        .arg("render")
        .arg("--vault")
        .arg(ws.vault())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings file"));
}

#[test]
fn test_fields_json_lists_fields_in_order() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["fields", "--file", "projects/todo.md", "--format", "json"])
        .args(["--base-title", "Notes - Obsidian v1.4.16"])
        .arg("--vault")
        .arg(ws.vault())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["vault"], "Notes");
    assert_eq!(json["version"], "1.4.16");
    assert_eq!(json["filepath"], "projects/todo.md");
    assert_eq!(json["basename"], "todo");
    assert_eq!(json["frontmatter.project"], "Apollo");
    assert_eq!(json["frontmatter.tags"], "plan, q3");
    assert!(json.get("frontmatter.created").is_none());

    let vault_at = stdout.find("\"vault\"").unwrap();
    let project_at = stdout.find("\"frontmatter.project\"").unwrap();
    assert!(vault_at < project_at);
}

#[test]
fn test_fields_text() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("fields")
        .arg("--vault")
        .arg(ws.vault())
        .assert()
        .success()
        .stdout(predicate::str::contains("vault"))
        .stdout(predicate::str::contains("Notes"))
        .stdout(predicate::str::contains("filename").not());
}

#[test]
fn test_config_init_set_show() {
    let ws = Workspace::new();

    ws.cmd().args(["config", "path"]).assert().success().stdout(predicate::str::contains(
        ws.settings.to_string_lossy().as_ref(),
    ));

    ws.cmd().args(["config", "init"]).assert().success();
    assert!(ws.settings.exists());

    ws.cmd().args(["config", "set", "delimiter", "##"]).assert().success();
    ws.cmd().args(["config", "set", "separator", " | "]).assert().success();
    ws.cmd()
        .args(["config", "set", "title-template", "{{basename}}##{{vault}}"])
        .assert()
        .success();

    let saved = fs::read_to_string(&ws.settings).unwrap();
    assert!(saved.contains("delimiter = \"##\""));
    assert!(saved.contains("titleSeparator = \" | \""));

    ws.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{{basename}}##{{vault}}"));

    ws.cmd()
        .args(["render", "--file", "projects/todo.md"])
        .arg("--vault")
        .arg(ws.vault())
        .assert()
        .success()
        .stdout("todo | Notes\n");
}

#[test]
fn test_config_set_rejects_unknown_delimiter() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["config", "set", "delimiter", "**"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid delimiter"))
        .stderr(predicate::str::contains("~~, %%, ##, __"));
    assert!(!ws.settings.exists());
}
