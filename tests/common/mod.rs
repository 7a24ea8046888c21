//! Common test utilities and fixtures for integration tests.

#![allow(dead_code)]

use git2::{Repository, Signature};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Creates a temporary directory for test fixtures.
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Writes files below `root`, creating parent directories.
pub fn write_files<C: AsRef<[u8]>>(root: &Path, files: &[(&str, C)]) {
    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }
}

/// Stages every listed path and commits it on top of HEAD.
pub fn commit_files<C: AsRef<[u8]>>(repo: &Repository, files: &[(&str, C)], message: &str) {
    let workdir = repo.workdir().expect("Repository should have a workdir");
    write_files(workdir, files);

    let mut index = repo.index().expect("Failed to open index");
    for (path, _) in files {
        index
            .add_path(Path::new(path))
            .expect("Failed to stage file");
    }
    index.write().expect("Failed to write index");
    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");

    let sig = Signature::now("Test", "test@example.com").expect("Failed to create signature");
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<_> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Failed to commit");
}

/// Creates a repository with one commit holding `files`.
pub fn create_committed_repo<C: AsRef<[u8]>>(files: &[(&str, C)]) -> (TempDir, PathBuf) {
    let dir = create_temp_dir();
    let repo = Repository::init(dir.path()).expect("Failed to init repository");
    commit_files(&repo, files, "initial commit");
    let path = dir.path().to_path_buf();
    (dir, path)
}

/// A small project touching every filtering rule.
pub fn sample_project_files() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Cargo.toml",
            "[package]\nname = \"sample\"\n# build metadata\nversion = \"0.1.0\"\n",
        ),
        (
            "src/main.rs",
            "// entry point\nfn main() {\n    println!(\"<hello> & goodbye\");\n}\n",
        ),
        ("src/util/mod.rs", "pub fn helper() -> u8 {\n    1\n}\n"),
        ("LICENSE", "MIT License\n"),
        ("LICENSE.header", "Header text\n"),
        (".gitignore", "target/\n"),
        ("assets/logo.png", "\u{89}PNG\r\n"),
        ("assets/ICON.PNG", "not really an image"),
        ("assets/data.bin", "abc\0def"),
        ("node_modules/pkg/index.js", "module.exports = 1;\n"),
        (".github/workflows/ci.yml", "on: push\n"),
        ("web/node_modules/dep/lib.js", "nested_dependency();\n"),
        ("web/app.js", "app();\n"),
    ]
}

/// Path to the compiled binary under test.
pub fn gitscribe_bin() -> &'static str {
    env!("CARGO_BIN_EXE_gitscribe")
}

/// Runs the binary in `cwd` with `args`, feeding `stdin`.
pub fn run_cli(cwd: &Path, args: &[&str], stdin: &str) -> Output {
    use std::io::Write;

    let mut child = Command::new(gitscribe_bin())
        .args(args)
        .current_dir(cwd)
        .env_remove("GITSCRIBE_MODEL")
        .env_remove("GITSCRIBE_CONFIG")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn gitscribe");

    {
        let mut child_stdin = child.stdin.take().expect("stdin should be piped");
        child_stdin
            .write_all(stdin.as_bytes())
            .expect("Failed to write stdin");
    }

    child.wait_with_output().expect("Failed to wait for gitscribe")
}
