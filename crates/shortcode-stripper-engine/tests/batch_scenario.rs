use pretty_assertions::assert_eq;
use shortcode_stripper_engine::{
    ActionTokens, AdministratorsOnly, BatchRunner, Caller, DocumentStore, FsDocumentStore, Role,
    STRIP_ACTION, Stripper, TriggerRequest, TriggerStatus, trigger,
};
use std::fs;
use std::time::SystemTime;
use tempfile::TempDir;

fn write(dir: &TempDir, relative_path: &str, content: &str) {
    let path = dir.path().join(relative_path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(dir: &TempDir, relative_path: &str) -> String {
    fs::read_to_string(dir.path().join(relative_path)).unwrap()
}

fn modified(dir: &TempDir, relative_path: &str) -> SystemTime {
    fs::metadata(dir.path().join(relative_path))
        .unwrap()
        .modified()
        .unwrap()
}

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "pages/home.html",
        "[vc_row full_width=\"stretch_row\"][vc_column]\n<h1>Home</h1>\n[vc_button title=\"Book\"]\n[/vc_column][/vc_row]",
    );
    write(&dir, "pages/contact.html", "<p>Call us</p>");
    write(&dir, "posts/launch.md", "We launched [caption]today[/caption].");
    dir
}

#[test]
fn only_the_document_with_markers_is_rewritten() {
    let dir = site();
    let contact_modified = modified(&dir, "pages/contact.html");
    let mut store = FsDocumentStore::open(dir.path()).unwrap();

    let report = BatchRunner::new(Stripper::default())
        .run(&mut store)
        .unwrap();

    assert_eq!(report.scanned, 3);
    assert_eq!(report.rewritten.len(), 1);
    assert_eq!(report.rewritten[0].as_str(), "pages/home.html");
    assert_eq!(read(&dir, "pages/home.html"), "\n<h1>Home</h1>\n\n");
    assert_eq!(read(&dir, "pages/contact.html"), "<p>Call us</p>");
    assert_eq!(
        read(&dir, "posts/launch.md"),
        "We launched [caption]today[/caption]."
    );
    assert_eq!(modified(&dir, "pages/contact.html"), contact_modified);
}

#[test]
fn second_run_is_a_no_op() {
    let dir = site();
    let mut store = FsDocumentStore::open(dir.path()).unwrap();
    let runner = BatchRunner::new(Stripper::default());

    runner.run(&mut store).unwrap();
    let home_modified = modified(&dir, "pages/home.html");
    let second = runner.run(&mut store).unwrap();

    assert!(second.rewritten.is_empty());
    assert_eq!(second.unchanged, 3);
    assert_eq!(modified(&dir, "pages/home.html"), home_modified);
}

#[test]
fn triggered_run_through_filesystem_store() {
    let dir = site();
    let mut store = FsDocumentStore::open(dir.path())
        .unwrap()
        .with_include(["pages/*.html"])
        .unwrap();
    assert_eq!(store.list_document_ids().unwrap().len(), 2);

    let mut tokens = ActionTokens::new();
    let request = TriggerRequest {
        caller: Caller::new("site-admin", Role::Administrator),
        token: tokens.issue(STRIP_ACTION),
    };

    let response = trigger(
        &request,
        &AdministratorsOnly,
        &mut tokens,
        &BatchRunner::default(),
        &mut store,
    )
    .unwrap();

    assert_eq!(response.status, TriggerStatus::Completed);
    assert_eq!(response.report.scanned, 2);
    assert_eq!(read(&dir, "pages/home.html"), "\n<h1>Home</h1>\n\n");
}

#[test]
fn unreadable_document_is_recorded_and_the_rest_rewritten() {
    let dir = site();
    write(&dir, "pages/about.html", "[fsn_row]About[/fsn_row]");
    fs::write(dir.path().join("pages/broken.html"), [0xff, 0xfe, b'[', 0x00]).unwrap();
    let mut store = FsDocumentStore::open(dir.path()).unwrap();

    let report = BatchRunner::default().run(&mut store).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.scanned, 5);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].id.as_str(), "pages/broken.html");
    assert_eq!(
        report
            .rewritten
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>(),
        vec!["pages/about.html", "pages/home.html"]
    );
    assert_eq!(read(&dir, "pages/about.html"), "About");
    assert_eq!(read(&dir, "pages/home.html"), "\n<h1>Home</h1>\n\n");
    assert_eq!(
        fs::read(dir.path().join("pages/broken.html")).unwrap(),
        vec![0xff, 0xfe, b'[', 0x00]
    );
}

#[cfg(unix)]
#[test]
fn directory_link_back_to_root_counts_each_document_once() {
    let dir = site();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();
    let mut store = FsDocumentStore::open(dir.path()).unwrap();

    let report = BatchRunner::default().dry_run(true).run(&mut store).unwrap();

    assert_eq!(report.scanned, 3);
    assert_eq!(report.rewritten.len(), 1);
    assert_eq!(report.rewritten[0].as_str(), "pages/home.html");
}
