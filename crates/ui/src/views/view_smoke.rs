use super::test_harness::{FakeQuizApi, ViewKind, setup_view_harness};
use crate::views::{QuizIntent, SavedIntent};

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_idle_prompt() {
    let mut harness = setup_view_harness(ViewKind::Quiz, FakeQuizApi::default());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Select a tool to start."), "missing prompt in {html}");
    assert!(html.contains("Choose a tool"), "missing placeholder in {html}");
    assert!(harness.api.calls().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_question_feedback_and_save() {
    let api = FakeQuizApi::default();
    api.push_question("List local branches");
    api.push_feedback("**Correct!** `git branch` lists them.");
    let mut harness = setup_view_harness(ViewKind::Quiz, api);
    harness.rebuild();

    harness.quiz(QuizIntent::SelectTool("git".to_string()));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("List local branches"), "missing question in {html}");
    assert!(html.contains("git"), "missing tool label in {html}");

    harness.quiz(QuizIntent::SetAnswer("git branch".to_string()));
    harness.quiz(QuizIntent::Submit);
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("feedback--correct"), "missing verdict class in {html}");
    assert!(html.contains("<strong>Correct!</strong>"), "missing feedback in {html}");

    harness.quiz(QuizIntent::Save);
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Saved &quot;git branch&quot;") || html.contains("Saved \"git branch\""),
        "missing save notice in {html}");

    assert_eq!(
        harness.api.calls(),
        vec![
            "question:git".to_string(),
            "check:git:git branch".to_string(),
            "save:git:git branch".to_string(),
        ]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_question_failure_shows_retry_message() {
    let api = FakeQuizApi::default();
    api.push_question_failure();
    let mut harness = setup_view_harness(ViewKind::Quiz, api);
    harness.rebuild();

    harness.quiz(QuizIntent::SelectTool("docker".to_string()));
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Error generating question. Please try again."),
        "missing retry message in {html}"
    );
    assert!(html.contains("quiz-prompt--error"), "missing error class in {html}");

    harness.quiz(QuizIntent::Submit);
    harness.drive_async().await;
    assert_eq!(harness.api.calls(), vec!["question:docker".to_string()]);
}

#[tokio::test(flavor = "current_thread")]
async fn saved_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Saved, FakeQuizApi::default());
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No saved commands yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn saved_view_smoke_lists_and_searches_commands() {
    let api = FakeQuizApi::default();
    api.seed_command("git", "git status", "Shows the working tree state");
    api.seed_command("git", "git rebase -i HEAD~3", "Rewrites recent history");
    api.seed_command("npm", "npm ci", "Clean install");
    let mut harness = setup_view_harness(ViewKind::Saved, api);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("git status"), "missing command in {html}");
    assert!(html.contains("git rebase -i HEAD~3"), "missing command in {html}");
    assert!(!html.contains("npm ci"), "other tool leaked into {html}");

    harness.saved(SavedIntent::SetSearch("REBASE".to_string()));
    harness.saved(SavedIntent::Search);
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("git rebase -i HEAD~3"), "missing match in {html}");
    assert!(!html.contains("git status"), "search did not filter {html}");

    harness.saved(SavedIntent::SelectTool("npm".to_string()));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("npm ci"), "missing npm command in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn saved_view_ignores_tool_switch_while_search_is_in_flight() {
    let api = FakeQuizApi::default();
    api.seed_command("git", "git status", "Shows the working tree state");
    api.seed_command("git", "git rebase -i HEAD~3", "Rewrites recent history");
    api.seed_command("npm", "npm ci", "Clean install");
    let mut harness = setup_view_harness(ViewKind::Saved, api);
    harness.rebuild();
    harness.drive_async().await;

    let gate = harness.api.hold_next_list("git");
    harness.saved(SavedIntent::SetSearch("rebase".to_string()));
    harness.saved(SavedIntent::Search);
    harness.saved(SavedIntent::SelectTool("npm".to_string()));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("saved-loading"), "missing busy state in {html}");
    assert!(!html.contains("npm ci"), "tool switched mid-search in {html}");

    gate.notify_one();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("git rebase -i HEAD~3"), "search result lost in {html}");
    assert!(!html.contains("git status"), "search did not filter {html}");
    assert!(!html.contains("npm ci"), "ignored switch applied late in {html}");

    harness.saved(SavedIntent::SelectTool("npm".to_string()));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("npm ci"), "switch after search was dropped in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn saved_view_shows_retry_when_no_tool_loads() {
    let api = FakeQuizApi::default();
    api.seed_command("git", "git status", "Shows the working tree state");
    api.fail_lists();
    let mut harness = setup_view_harness(ViewKind::Saved, api);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Something went wrong."), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry button in {html}");
    assert!(!html.contains("No saved commands yet."), "error shown as empty in {html}");
}
