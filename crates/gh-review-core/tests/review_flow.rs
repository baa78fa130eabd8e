//! Full review flow against an in-memory repository client.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use gh_review_core::{
    ChangedFile, ClientError, InputMode, PendingAnnotation, RepositoryClient, ReviewAction,
    ReviewComment, ReviewDecision, ReviewDraftComment, ReviewError, ReviewSession, SessionEvent,
};
use pretty_assertions::assert_eq;
use std::sync::Mutex;

const LIB_PATCH: &str = "\
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,5 +1,5 @@
 pub fn total(items: &[u32]) -> u32 {
-    let mut sum = 0;
-    for i in items { sum += i; }
-    sum
+    items.iter().sum()
 }
+
+pub const LIMIT: u32 = 10;
";

const MAIN_PATCH: &str = "\
@@ -3,3 +3,3 @@ fn main() {
     let items = vec![1, 2, 3];
-    println!(\"{}\", total(&items));
+    println!(\"total = {}\", total(&items));
 }
";

struct FlakyHost {
    files: Vec<ChangedFile>,
    comments: Mutex<Vec<ReviewComment>>,
    failures_left: Mutex<u32>,
    reviews: Mutex<Vec<(ReviewDecision, Option<String>, Vec<ReviewDraftComment>)>>,
}

impl FlakyHost {
    fn new(failures: u32) -> Self {
        Self {
            files: vec![
                ChangedFile::new("src/lib.rs", Some(LIB_PATCH.to_string())),
                ChangedFile::new("src/main.rs", Some(MAIN_PATCH.to_string())),
            ],
            comments: Mutex::new(vec![ReviewComment {
                id: 100,
                path: "src/main.rs".into(),
                line: Some(4),
                start_line: None,
                body: "Should this print a label?".into(),
                author: "reviewer".into(),
                created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
                in_reply_to: None,
            }]),
            failures_left: Mutex::new(failures),
            reviews: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RepositoryClient for FlakyHost {
    async fn list_files(&self, _pr_number: u64) -> Result<Vec<ChangedFile>, ClientError> {
        Ok(self.files.clone())
    }

    async fn list_review_comments(
        &self,
        _pr_number: u64,
    ) -> Result<Vec<ReviewComment>, ClientError> {
        Ok(self.comments.lock().unwrap().clone())
    }

    async fn submit_review(
        &self,
        _pr_number: u64,
        decision: ReviewDecision,
        body: Option<String>,
        comments: Vec<ReviewDraftComment>,
    ) -> Result<(), ClientError> {
        let mut failures = self.failures_left.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(ClientError::Request("connection reset".into()));
        }

        // Posted comments show up on the next listing
        let mut listed = self.comments.lock().unwrap();
        for (i, draft) in comments.iter().enumerate() {
            listed.push(ReviewComment {
                id: 200 + i as u64,
                path: draft.path.clone(),
                line: Some(draft.line),
                start_line: draft.start_line,
                body: draft.body.clone(),
                author: "me".into(),
                created_at: Utc.timestamp_opt(1_700_000_100 + i as i64, 0).unwrap(),
                in_reply_to: draft.in_reply_to,
            });
        }
        self.reviews.lock().unwrap().push((decision, body, comments));
        Ok(())
    }
}

fn run(session: &mut ReviewSession, actions: &[ReviewAction]) -> Vec<SessionEvent> {
    actions
        .iter()
        .flat_map(|a| session.handle_action(a.clone()))
        .collect()
}

fn type_text(session: &mut ReviewSession, text: &str) {
    for c in text.chars() {
        session.handle_action(ReviewAction::InsertChar(c));
    }
}

#[tokio::test]
async fn test_review_flow_with_retry() {
    let host = FlakyHost::new(1);
    let mut session = ReviewSession::load(&host, 17)
        .await
        .unwrap()
        .with_approval_message("LGTM");
    run(&mut session, &[ReviewAction::SetViewport { height: 6 }]);

    // src/lib.rs: header, header, hunk, ctx, 3 removed, added, ctx, 2 added
    assert_eq!(session.view().diff.len(), 11);

    // Suggest on the added line, spanning only new code
    run(&mut session, &[ReviewAction::NextHunk]);
    for _ in 0..5 {
        run(&mut session, &[ReviewAction::CursorDown]);
    }
    assert_eq!(session.view().cursor_new_line(), Some(2));
    run(&mut session, &[ReviewAction::StartSuggestion]);
    assert_eq!(session.input_mode(), InputMode::Form);
    for _ in 0.."items.iter().sum()".len() {
        run(&mut session, &[ReviewAction::Backspace]);
    }
    type_text(&mut session, "items.iter().copied().sum()");
    run(&mut session, &[ReviewAction::SwitchField]);
    type_text(&mut session, "avoid the reference sum");
    let added = run(&mut session, &[ReviewAction::SubmitForm]);
    assert!(matches!(added.as_slice(), [SessionEvent::AnnotationAdded(_)]));

    // A selection across deleted code cannot carry a suggestion
    run(
        &mut session,
        &[
            ReviewAction::JumpTop,
            ReviewAction::CursorDown,
            ReviewAction::CursorDown,
            ReviewAction::CursorDown,
            ReviewAction::BeginSelection,
        ],
    );
    for _ in 0..4 {
        run(&mut session, &[ReviewAction::CursorDown]);
    }
    run(&mut session, &[ReviewAction::StartSuggestion]);
    assert!(session.status().unwrap().contains("deleted"));

    // But a comment on the same range is fine
    run(&mut session, &[ReviewAction::StartComment]);
    type_text(&mut session, "simpler now");
    run(&mut session, &[ReviewAction::SubmitForm]);
    assert_eq!(session.pending().count_for_file("src/lib.rs"), 2);

    // Reply on the other file's thread
    let switched = run(&mut session, &[ReviewAction::NextFile]);
    assert_eq!(
        switched,
        vec![SessionEvent::FileSelected {
            path: "src/main.rs".into(),
            index: 1,
        }]
    );
    run(
        &mut session,
        &[
            ReviewAction::CursorDown,
            ReviewAction::CursorDown,
            ReviewAction::CursorDown,
            ReviewAction::StartReply,
        ],
    );
    type_text(&mut session, "Yes, added one");
    run(&mut session, &[ReviewAction::SubmitForm]);
    assert_eq!(session.pending().count(), 3);

    // Submit: first attempt fails, store survives
    let events = run(
        &mut session,
        &[
            ReviewAction::OpenReviewForm,
            ReviewAction::ReviewOptionNext,
            ReviewAction::SubmitReview,
        ],
    );
    let [SessionEvent::SubmitReview { decision, body }] = events.as_slice() else {
        panic!("expected a submit event, got {:?}", events);
    };
    assert_eq!(*decision, ReviewDecision::Approve);
    assert_eq!(body.as_deref(), Some("LGTM"));

    let failed = session
        .submit_review(&host, *decision, body.clone())
        .await
        .unwrap_err();
    assert!(matches!(failed, ReviewError::SubmissionFailed(_)));
    assert_eq!(session.pending().count(), 3);
    assert_eq!(session.input_mode(), InputMode::Review);

    // Retry succeeds, store is cleared and threads are refreshed
    session
        .submit_review(&host, *decision, body.clone())
        .await
        .unwrap();
    assert!(session.pending().is_empty());
    assert_eq!(session.input_mode(), InputMode::Navigation);

    let reviews = host.reviews.lock().unwrap();
    assert_eq!(reviews.len(), 1);
    let drafts = &reviews[0].2;
    assert_eq!(drafts.len(), 3);
    assert_eq!(drafts[0].line, 2);
    assert!(drafts[0].body.starts_with("avoid the reference sum\n\n```suggestion\n"));
    assert_eq!((drafts[1].start_line, drafts[1].line), (Some(1), 2));
    assert_eq!(drafts[2].in_reply_to, Some(100));

    let thread = session.view().threads.get(4).unwrap();
    assert_eq!(thread.replies.len(), 1);
    assert_eq!(thread.replies[0].body, "Yes, added one");
}

#[tokio::test]
async fn test_annotations_survive_file_switches() {
    let host = FlakyHost::new(0);
    let mut session = ReviewSession::load(&host, 17).await.unwrap();

    run(
        &mut session,
        &[
            ReviewAction::NextFile,
            ReviewAction::CursorDown,
            ReviewAction::StartComment,
        ],
    );
    type_text(&mut session, "context line");
    run(&mut session, &[ReviewAction::SubmitForm]);

    run(&mut session, &[ReviewAction::PrevFile, ReviewAction::NextFile]);
    let annotations: Vec<&PendingAnnotation> = session.pending().for_file("src/main.rs");
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].line(), 3);
    assert_eq!(session.pending().lines_for_file("src/main.rs"), vec![3]);
}
