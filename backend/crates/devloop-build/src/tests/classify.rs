use crate::{ChangeKind, touches_server_components};

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn given_no_changes_when_classified_then_untouched() {
    assert!(!touches_server_components(&[]));
}

#[test]
fn given_only_client_modules_changed_when_classified_then_untouched() {
    let dir = TempDir::new().unwrap();
    let button = write(&dir, "Button.tsx", "'use client';\nexport function Button() {}\n");

    assert!(!touches_server_components(&[(button, ChangeKind::Modified)]));
}

#[test]
fn given_server_module_changed_when_classified_then_touched() {
    let dir = TempDir::new().unwrap();
    let button = write(&dir, "Button.tsx", "'use client';\n");
    let page = write(&dir, "Page.tsx", "export default async function Page() {}\n");

    assert!(touches_server_components(&[
        (button, ChangeKind::Modified),
        (page, ChangeKind::Created),
    ]));
}

#[test]
fn given_server_action_changed_when_classified_then_touched() {
    let dir = TempDir::new().unwrap();
    let actions = write(&dir, "actions.ts", "\"use server\";\nexport async function like() {}\n");

    assert!(touches_server_components(&[(actions, ChangeKind::Modified)]));
}

#[test]
fn given_removed_module_when_classified_then_touched() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("Gone.tsx");

    assert!(touches_server_components(&[(gone, ChangeKind::Removed)]));
}

#[test]
fn given_unreadable_module_when_classified_then_touched() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("Missing.tsx");

    assert!(touches_server_components(&[(missing, ChangeKind::Modified)]));
}

#[test]
fn given_only_assets_changed_when_classified_then_untouched() {
    let dir = TempDir::new().unwrap();
    let css = write(&dir, "style.css", "body { margin: 0 }\n");

    assert!(!touches_server_components(&[
        (css, ChangeKind::Modified),
        (dir.path().join("logo.svg"), ChangeKind::Removed),
    ]));
}
