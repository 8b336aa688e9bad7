//! End-to-end runs against an in-memory hosting service

mod common;

use common::{test_now, FakeHost, RecordingPainter};
use matterpress::hosting::{BlobContent, ChangeRecord, FileStatus, RepoRef};
use matterpress::pipeline::settings::{
    COVERS_COMMIT_MESSAGE, FRONT_MATTER_COMMIT_MESSAGE, JOURNAL_TRIGGER_FILE, PUBLISH_TRIGGER_FILE,
};
use matterpress::pipeline::{
    run_covers, run_front_matter, CommitPayload, CommitPublisher, RunContext, Settings, StagedKind,
};
use matterpress::{MatterPressError, Reconciler, Variant};
use pretty_assertions::assert_eq;
use std::fs;

const PROCESSED_TODAY: &str =
    "---\ntitle: Day\nogImage:\n  url: https://x/day.png\ndate: 2024-03-09\n---\nText\n";

fn ctx() -> RunContext {
    RunContext::at(test_now()).unwrap()
}

fn covers_host() -> FakeHost {
    FakeHost::new(vec![
        ChangeRecord::new("publish/my-cool_Post.md", FileStatus::Added),
        ChangeRecord::new("journal/day.md", FileStatus::Modified),
        ChangeRecord::new("drafts/old.md", FileStatus::Removed),
        ChangeRecord::new("publish/diagram.png", FileStatus::Added),
    ])
    .with_file("notes", "publish/my-cool_Post.md", "Hello\n")
    .with_file("notes", "journal/day.md", PROCESSED_TODAY)
    .with_file("notes", PUBLISH_TRIGGER_FILE, "log")
}

#[test]
fn test_covers_run_commits_covers_documents_and_triggers() {
    let host = covers_host();
    let mut painter = RecordingPainter::default();

    let summary = run_covers(&host, &Settings::default(), &mut painter, ctx()).unwrap();

    assert_eq!(painter.titles, vec!["My Cool Post"]);
    assert_eq!(summary.documents, 1);
    assert_eq!(summary.covers, 1);
    assert!(summary.flags.publish && summary.flags.journal);

    // covers land in the cover repository
    let cover_commits = host.commits_in("blog-cover-generator");
    assert_eq!(cover_commits.len(), 1);
    assert_eq!(cover_commits[0].message, COVERS_COMMIT_MESSAGE);
    assert_eq!(
        host.committed_file("blog-cover-generator", "public/assets/blog/covers/mycoolpost.png"),
        Some(BlobContent::Binary(b"\x89PNG fake".to_vec()))
    );

    // documents and triggers land in the notes repository
    let note_commits = host.commits_in("notes");
    assert_eq!(note_commits.len(), 1);
    assert_eq!(note_commits[0].message, COVERS_COMMIT_MESSAGE);
    assert_eq!(note_commits[0].parents, vec!["head-notes".to_string()]);
    assert_eq!(
        host.committed_paths("notes"),
        vec![
            JOURNAL_TRIGGER_FILE.to_string(),
            PUBLISH_TRIGGER_FILE.to_string(),
            "publish/my-cool_Post.md".to_string(),
        ]
    );

    let note = host.committed_text("notes", "publish/my-cool_Post.md").unwrap();
    assert!(note.starts_with("---\ntitle: My Cool Post\nogImage:\n  url: https://cdn.jsdelivr.net/gh/"));
    assert!(note.ends_with("mycoolpost.png\ndate: 2024-03-09\n---\n\nHello\n"));

    assert_eq!(
        host.committed_text("notes", PUBLISH_TRIGGER_FILE).unwrap(),
        "log\n Covers Updated on 2024-03-09 10:30:00"
    );
    assert_eq!(
        host.committed_text("notes", JOURNAL_TRIGGER_FILE).unwrap(),
        "\n Covers Updated on 2024-03-09 10:30:00"
    );
}

#[test]
fn test_rerun_on_processed_documents_only_touches_triggers() {
    let host = FakeHost::new(vec![ChangeRecord::new("journal/day.md", FileStatus::Modified)])
        .with_file("notes", "journal/day.md", PROCESSED_TODAY)
        .with_file("notes", JOURNAL_TRIGGER_FILE, "log");
    let mut painter = RecordingPainter::default();

    let summary = run_covers(&host, &Settings::default(), &mut painter, ctx()).unwrap();

    assert!(painter.titles.is_empty());
    assert_eq!(summary.documents, 0);
    assert!(summary.covers_commit.is_none());
    assert_eq!(host.committed_paths("notes"), vec![JOURNAL_TRIGGER_FILE.to_string()]);
    assert_eq!(
        host.committed_text("notes", JOURNAL_TRIGGER_FILE).unwrap(),
        "log\n No covers were updated: 2024-03-09 10:30:00"
    );
}

#[test]
fn test_front_matter_run() {
    let host = FakeHost::new(vec![ChangeRecord::new(
        "publish/HTMLParser2024.md",
        FileStatus::Modified,
    )])
    .with_file("notes", "publish/HTMLParser2024.md", "---\ntags: [web]\n---\nBody");

    let summary = run_front_matter(&host, &Settings::default(), ctx()).unwrap();

    assert_eq!(summary.documents, 1);
    assert!(summary.covers_commit.is_none());
    assert!(host.commits_in("blog-cover-generator").is_empty());

    let commits = host.commits_in("notes");
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].message, FRONT_MATTER_COMMIT_MESSAGE);
    assert_eq!(
        host.committed_text("notes", "publish/HTMLParser2024.md").unwrap(),
        "---\ntags:\n- web\ntitle: Htmlparser2024\ndescription: HTML Parser 2024\ndate: 2024-03-09\n---\nBody"
    );
    assert_eq!(
        host.committed_text("notes", PUBLISH_TRIGGER_FILE).unwrap(),
        "\n Front Matter Updated on 2024-03-09 10:30:00"
    );
}

#[test]
fn test_deleted_publish_file_still_touches_trigger() {
    let host = FakeHost::new(vec![
        ChangeRecord::new("README.txt", FileStatus::Modified),
        ChangeRecord::new("publish/gone.md", FileStatus::Deleted),
    ]);

    let summary = run_front_matter(&host, &Settings::default(), ctx()).unwrap();

    // a deleted publish file still flags the publish pipeline
    assert!(summary.flags.publish);
    assert_eq!(summary.documents, 0);
    assert_eq!(host.committed_paths("notes"), vec![PUBLISH_TRIGGER_FILE.to_string()]);
    assert_eq!(
        host.committed_text("notes", PUBLISH_TRIGGER_FILE).unwrap(),
        "\n No front matter was updated: 2024-03-09 10:30:00"
    );
}

#[test]
fn test_nothing_staged_means_no_commit() {
    let host = FakeHost::new(vec![ChangeRecord::new("README.txt", FileStatus::Modified)]);

    let summary = run_front_matter(&host, &Settings::default(), ctx()).unwrap();

    assert!(summary.notes_commit.is_none());
    assert!(!host.called("create_blob"));
    assert!(!host.called("update_ref"));
}

#[test]
fn test_tree_failure_leaves_branches_untouched() {
    let host = covers_host().failing_on("create_tree");
    let mut painter = RecordingPainter::default();

    let err = run_covers(&host, &Settings::default(), &mut painter, ctx()).unwrap_err();

    assert!(err.is_transport());
    assert!(!host.called("create_commit"));
    assert!(!host.called("update_ref"));
    assert_eq!(host.head("notes"), "head-notes");
    assert_eq!(host.head("blog-cover-generator"), "head-blog-cover-generator");
}

#[test]
fn test_malformed_front_matter_aborts_the_run() {
    let host = FakeHost::new(vec![ChangeRecord::new("publish/bad.md", FileStatus::Added)])
        .with_file("notes", "publish/bad.md", "---\ntitle: [oops\n---\nBody");

    let err = run_front_matter(&host, &Settings::default(), ctx()).unwrap_err();

    assert!(matches!(err, MatterPressError::MalformedFrontMatter { .. }));
    assert!(!host.called("create_blob"));
}

#[test]
fn test_publisher_commit_failure_keeps_ref() {
    let host = FakeHost::default().failing_on("create_commit");
    let repo = RepoRef::new("me", "notes");
    let run = ctx();
    let local = run.stage_text("a.md", "text").unwrap();
    let mut payload = CommitPayload::new();
    payload.insert("a.md", local, StagedKind::Text);

    let err = CommitPublisher::new(&host, &repo, "main")
        .publish("msg", &payload)
        .unwrap_err();

    assert!(err.is_transport());
    assert!(host.called("create_tree"));
    assert!(!host.called("update_ref"));
    assert_eq!(host.head("notes"), "head-notes");
}

#[test]
fn test_publisher_uploads_binary_and_text() {
    let host = FakeHost::default();
    let repo = RepoRef::new("me", "covers");
    let run = ctx();
    let image = run.scratch_path("covers/a.png");
    fs::create_dir_all(image.parent().unwrap()).unwrap();
    fs::write(&image, [0u8, 159, 146, 150]).unwrap();
    let note = run.stage_text("notes/a.md", "hi").unwrap();

    let mut payload = CommitPayload::new();
    payload.insert("covers/a.png", image, StagedKind::Binary);
    payload.insert("notes/a.md", note, StagedKind::Text);

    let sha = CommitPublisher::new(&host, &repo, "main")
        .publish("msg", &payload)
        .unwrap()
        .unwrap();

    assert_eq!(host.head("covers"), sha);
    assert_eq!(
        host.committed_file("covers", "covers/a.png"),
        Some(BlobContent::Binary(vec![0, 159, 146, 150]))
    );
    assert_eq!(host.committed_text("covers", "notes/a.md").unwrap(), "hi");
    let trees = host.trees.borrow();
    assert!(trees.values().all(|(base, _)| base == "tree-of-head-covers"));
}

#[test]
fn test_collector_reconciles_with_run_date() {
    use matterpress::pipeline::ChangeCollector;

    let host = FakeHost::new(vec![ChangeRecord::new("publish/a-b.md", FileStatus::Added)])
        .with_file("notes", "publish/a-b.md", "Body");
    let repo = RepoRef::new("me", "notes");
    let reconciler = Reconciler::new(Variant::Covers, test_now().date(), "cdn/");
    let mut run = ctx();

    let collected = ChangeCollector::new(&host, &repo, "main", &reconciler, "covers/")
        .collect(&mut run, None)
        .unwrap();

    // without a painter the cover is skipped but the document still updates
    assert!(collected.covers.is_empty());
    let staged = collected.documents.get("publish/a-b.md").unwrap();
    assert_eq!(
        fs::read_to_string(&staged.local).unwrap(),
        "---\ntitle: A B\nogImage:\n  url: cdn/ab.png\ndate: 2024-03-09\n---\n\nBody"
    );
    assert!(run.flags.publish);
}
