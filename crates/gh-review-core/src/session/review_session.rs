//! One pull request review: changed files, remote threads, pending
//! annotations and the interaction mode, driven by [`ReviewAction`]s.

use crate::action::ReviewAction;
use crate::event::SessionEvent;
use crate::model::{
    ChangedFile, CommentThread, DiffLine, ParsedDiff, ReviewComment, ReviewDecision,
};
use crate::parser::parse_patch;
use crate::pending::{AnnotationId, PendingAnnotation, PendingAnnotationStore};
use crate::state::{
    AnnotationForm, CommentForm, InputMode, InteractionMode, NavIntent, ReviewForm,
    SelectionState, SuggestionForm, TextEditor, Viewport,
};
use crate::threads::{threads_for_file, CommentThreads};
use crate::traits::{ClientError, RepositoryClient};
use crate::validate::{Anchor, AnnotationValidator, CommentRejection};
use log::{debug, info, warn};
use thiserror::Error;

/// Review body used for approvals submitted without text.
pub const DEFAULT_APPROVAL_MESSAGE: &str = "Approved";

/// Rows assumed for the diff pane until the front end reports its size.
const DEFAULT_VISIBLE_HEIGHT: usize = 20;

/// Errors surfaced by a review session.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Files or comments could not be fetched.
    #[error("Failed to load pull request: {0}")]
    Load(#[source] ClientError),

    /// The review was rejected by the host. Pending annotations are kept.
    #[error("Review submission failed: {0}")]
    SubmissionFailed(#[source] ClientError),

    /// A non-approving review needs a body or at least one inline comment.
    #[error("Nothing to submit: add a review body or an inline comment")]
    NothingToSubmit,
}

/// The file currently shown, with its parsed diff and cursor.
#[derive(Debug, Clone, Default)]
pub struct FileView {
    /// Index into the session's file list.
    pub index: usize,
    /// File path.
    pub path: String,
    /// Parsed patch, rebuilt whenever the file changes.
    pub diff: ParsedDiff,
    /// Remote threads on this file.
    pub threads: CommentThreads,
    /// Cursor, scroll and selection.
    pub selection: SelectionState,
    /// Which of the cursor line's threads replies go to.
    pub thread_focus: usize,
}

impl FileView {
    fn open(index: usize, file: &ChangedFile, comments: &[ReviewComment]) -> Self {
        let diff = file.patch.as_deref().map(parse_patch).unwrap_or_default();
        let threads = threads_for_file(comments, &file.path);
        debug!(
            "Opened {} ({} lines, {} threads)",
            file.path,
            diff.len(),
            threads.len()
        );
        Self {
            index,
            path: file.path.clone(),
            diff,
            threads,
            selection: SelectionState::new(),
            thread_focus: 0,
        }
    }

    /// The line under the cursor.
    pub fn cursor_line(&self) -> Option<&DiffLine> {
        self.diff.get(self.selection.absolute_index())
    }

    /// New-file line number under the cursor.
    pub fn cursor_new_line(&self) -> Option<u32> {
        self.cursor_line().and_then(|l| l.new_line)
    }

    /// Remote threads anchored at the cursor line.
    pub fn cursor_threads(&self) -> &[CommentThread] {
        self.cursor_new_line()
            .map(|line| self.threads.all_at(line))
            .unwrap_or(&[])
    }

    /// The cursor line's thread that replies go to.
    pub fn focused_thread(&self) -> Option<&CommentThread> {
        self.cursor_threads().get(self.thread_focus)
    }

    /// Display indices covered by the active selection.
    pub fn selected_span(&self) -> Option<(usize, usize)> {
        let (low, high) = self.selection.normalized_range()?;
        AnnotationValidator::new(&self.diff).span_for_range(low, high)
    }
}

/// State of one pull request review.
///
/// The session is synchronous apart from [`load`](Self::load),
/// [`submit_review`](Self::submit_review) and
/// [`refresh_comments`](Self::refresh_comments), which await the
/// [`RepositoryClient`]. Everything else is driven by
/// [`handle_action`](Self::handle_action).
#[derive(Debug)]
pub struct ReviewSession {
    pr_number: u64,
    files: Vec<ChangedFile>,
    comments: Vec<ReviewComment>,
    pending: PendingAnnotationStore,
    view: FileView,
    mode: InteractionMode,
    visible_height: usize,
    show_line_numbers: bool,
    approval_message: String,
    status: Option<String>,
    /// Set when an earlier attempt created the review but not all replies.
    review_submitted: bool,
}

impl ReviewSession {
    /// Create a session from already fetched data. The first file is opened.
    pub fn new(pr_number: u64, files: Vec<ChangedFile>, comments: Vec<ReviewComment>) -> Self {
        let view = files
            .first()
            .map(|file| FileView::open(0, file, &comments))
            .unwrap_or_default();
        Self {
            pr_number,
            files,
            comments,
            pending: PendingAnnotationStore::new(),
            view,
            mode: InteractionMode::Idle,
            visible_height: DEFAULT_VISIBLE_HEIGHT,
            show_line_numbers: true,
            approval_message: DEFAULT_APPROVAL_MESSAGE.to_string(),
            status: None,
            review_submitted: false,
        }
    }

    /// Fetch files and review comments and create a session.
    pub async fn load<C>(client: &C, pr_number: u64) -> Result<Self, ReviewError>
    where
        C: RepositoryClient + ?Sized,
    {
        let files = client
            .list_files(pr_number)
            .await
            .map_err(ReviewError::Load)?;
        let comments = client
            .list_review_comments(pr_number)
            .await
            .map_err(ReviewError::Load)?;
        info!(
            "Loaded PR #{}: {} files, {} review comments",
            pr_number,
            files.len(),
            comments.len()
        );
        Ok(Self::new(pr_number, files, comments))
    }

    /// Set the body used for approvals without text.
    pub fn with_approval_message(mut self, message: impl Into<String>) -> Self {
        self.approval_message = message.into();
        self
    }

    /// Set whether the line number gutter is shown.
    pub fn with_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    pub fn pr_number(&self) -> u64 {
        self.pr_number
    }

    pub fn files(&self) -> &[ChangedFile] {
        &self.files
    }

    pub fn comments(&self) -> &[ReviewComment] {
        &self.comments
    }

    /// The file currently shown, if the pull request has any.
    pub fn current_file(&self) -> Option<&ChangedFile> {
        self.files.get(self.view.index)
    }

    pub fn view(&self) -> &FileView {
        &self.view
    }

    pub fn pending(&self) -> &PendingAnnotationStore {
        &self.pending
    }

    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    /// Which key table the front end should apply.
    pub fn input_mode(&self) -> InputMode {
        self.mode.input_mode()
    }

    /// Last rejection reason or submission outcome.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    pub fn approval_message(&self) -> &str {
        &self.approval_message
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.view.diff.len(), self.visible_height)
    }

    /// Open the file at `index`. Any selection or open form is dropped.
    ///
    /// Returns `false` if the index is out of range or already open.
    pub fn select_file(&mut self, index: usize) -> bool {
        let Some(file) = self.files.get(index) else {
            return false;
        };
        if index == self.view.index {
            return false;
        }
        self.view = FileView::open(index, file, &self.comments);
        self.mode = InteractionMode::Idle;
        true
    }

    /// Process an action and return the events the orchestrator must handle.
    ///
    /// The interaction mode decides which actions are honoured: while a form
    /// is open only form actions reach it, and navigation is ignored.
    pub fn handle_action(&mut self, action: ReviewAction) -> Vec<SessionEvent> {
        if let ReviewAction::SetViewport { height } = action {
            self.visible_height = usize::from(height).max(1);
            self.view.selection = self.view.selection.clamp(self.viewport());
            return Vec::new();
        }

        self.status = None;
        match self.mode.input_mode() {
            InputMode::Navigation => self.handle_navigation_action(action),
            InputMode::Form if action.is_form_action() => self.handle_form_action(action),
            InputMode::Review if action.is_review_action() => self.handle_review_action(action),
            mode => {
                debug!("Ignoring {:?} in {:?} mode", action, mode);
                Vec::new()
            }
        }
    }

    /// Submit the review with every pending annotation.
    ///
    /// On success the pending store is cleared and comments are refreshed.
    /// On failure only the annotations the host did not receive are kept, so
    /// a retry never posts anything twice. If the review itself was already
    /// created, the retry sends the leftovers without a decision or body.
    pub async fn submit_review<C>(
        &mut self,
        client: &C,
        decision: ReviewDecision,
        body: Option<String>,
    ) -> Result<(), ReviewError>
    where
        C: RepositoryClient + ?Sized,
    {
        if let Err(err) = self.check_submittable(decision, body.as_deref()) {
            self.status = Some(err.to_string());
            return Err(err);
        }

        let (decision, body) = if self.review_submitted {
            info!("Review already created, sending remaining annotations only");
            (ReviewDecision::Comment, None)
        } else {
            (decision, body)
        };

        let ids: Vec<AnnotationId> = self.pending.iter().map(PendingAnnotation::id).collect();
        let drafts = self.pending.to_drafts();
        let count = drafts.len();
        info!(
            "Submitting {} review on PR #{} with {} inline comments",
            decision.label(),
            self.pr_number,
            count
        );

        match client
            .submit_review(self.pr_number, decision, body, drafts)
            .await
        {
            Ok(()) => {
                self.pending.clear();
                self.review_submitted = false;
                self.mode = InteractionMode::Idle;
                self.status = Some(format!("Review submitted ({} inline comments)", count));
                if let Err(err) = self.refresh_comments(client).await {
                    warn!("Failed to refresh comments after review: {}", err);
                }
                Ok(())
            }
            Err(err) => {
                if let ClientError::PartiallyDelivered {
                    review_submitted,
                    delivered,
                    ..
                } = &err
                {
                    self.review_submitted |= *review_submitted;
                    for id in delivered.iter().filter_map(|&i| ids.get(i)) {
                        self.pending.remove(*id);
                    }
                }
                warn!(
                    "Review submission failed, keeping {} of {} pending annotations: {}",
                    self.pending.count(),
                    count,
                    err
                );
                let err = ReviewError::SubmissionFailed(err);
                self.status = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Re-fetch remote comments and rebuild the threads of the open file.
    pub async fn refresh_comments<C>(&mut self, client: &C) -> Result<(), ReviewError>
    where
        C: RepositoryClient + ?Sized,
    {
        let comments = client
            .list_review_comments(self.pr_number)
            .await
            .map_err(ReviewError::Load)?;
        self.view.threads = threads_for_file(&comments, &self.view.path);
        self.view.thread_focus = 0;
        self.comments = comments;
        Ok(())
    }

    fn handle_navigation_action(&mut self, action: ReviewAction) -> Vec<SessionEvent> {
        match action {
            ReviewAction::CursorUp => self.navigate(NavIntent::MoveUp),
            ReviewAction::CursorDown => self.navigate(NavIntent::MoveDown),
            ReviewAction::PageUp => self.navigate(NavIntent::PageUp),
            ReviewAction::PageDown => self.navigate(NavIntent::PageDown),
            ReviewAction::JumpTop => self.navigate(NavIntent::JumpTop),
            ReviewAction::JumpBottom => self.navigate(NavIntent::JumpBottom),
            ReviewAction::NextHunk => self.jump_to_hunk(true),
            ReviewAction::PrevHunk => self.jump_to_hunk(false),
            ReviewAction::NextFile => self.open_file(self.view.index + 1),
            ReviewAction::PrevFile => match self.view.index.checked_sub(1) {
                Some(index) => self.open_file(index),
                None => Vec::new(),
            },
            ReviewAction::SelectFile(index) => self.open_file(index),
            ReviewAction::BeginSelection => {
                self.begin_selection();
                Vec::new()
            }
            ReviewAction::CancelSelection => {
                self.view.selection = self.view.selection.cancel_selection();
                self.mode = InteractionMode::Idle;
                Vec::new()
            }
            ReviewAction::StartComment => {
                self.start_comment();
                Vec::new()
            }
            ReviewAction::StartSuggestion => {
                self.start_suggestion();
                Vec::new()
            }
            ReviewAction::StartReply => {
                self.start_reply();
                Vec::new()
            }
            ReviewAction::NextThread => {
                self.next_thread();
                Vec::new()
            }
            ReviewAction::RemovePendingAtCursor => self.remove_pending_at_cursor(),
            ReviewAction::OpenReviewForm => {
                self.view.selection = self.view.selection.cancel_selection();
                self.mode = InteractionMode::Review(ReviewForm::new());
                Vec::new()
            }
            ReviewAction::ToggleLineNumbers => {
                self.show_line_numbers = !self.show_line_numbers;
                Vec::new()
            }
            ReviewAction::Close => vec![SessionEvent::Close],
            other => {
                debug!("Ignoring {:?} while navigating", other);
                Vec::new()
            }
        }
    }

    fn navigate(&mut self, intent: NavIntent) -> Vec<SessionEvent> {
        let before = self.view.selection.absolute_index();
        self.view.selection = self.view.selection.apply(intent, self.viewport());

        // Lines without a new-file number keep the previous selection end
        if self.view.selection.is_selecting() {
            if let Some(line) = self.view.cursor_new_line() {
                self.view.selection = self.view.selection.extend_selection(line);
            }
        }

        if self.view.selection.absolute_index() == before {
            return Vec::new();
        }
        self.view.thread_focus = 0;
        vec![SessionEvent::SelectionChanged {
            path: self.view.path.clone(),
            line: self.view.cursor_new_line(),
        }]
    }

    fn jump_to_hunk(&mut self, forward: bool) -> Vec<SessionEvent> {
        let current = self.view.selection.absolute_index();
        let hunks = self.view.diff.hunk_indices();
        let target = if forward {
            hunks.into_iter().find(|&i| i > current)
        } else {
            hunks.into_iter().rev().find(|&i| i < current)
        };
        match target {
            Some(index) => self.navigate(NavIntent::JumpTo(index)),
            None => Vec::new(),
        }
    }

    fn open_file(&mut self, index: usize) -> Vec<SessionEvent> {
        if !self.select_file(index) {
            return Vec::new();
        }
        vec![SessionEvent::FileSelected {
            path: self.view.path.clone(),
            index,
        }]
    }

    fn begin_selection(&mut self) {
        match self.view.cursor_new_line() {
            Some(line) => {
                self.view.selection = self.view.selection.begin_selection(line);
                self.mode = InteractionMode::Selecting;
            }
            None => self.status = Some("Selection must start on a line of the new file".into()),
        }
    }

    /// Display span the next annotation would cover.
    fn annotation_span(&self) -> Option<(usize, usize)> {
        if self.view.selection.is_selecting() {
            self.view.selected_span()
        } else {
            let index = self.view.selection.absolute_index();
            Some((index, index))
        }
    }

    fn start_comment(&mut self) {
        let Some((start, end)) = self.annotation_span() else {
            self.status = Some(CommentRejection::NoValidPosition.to_string());
            return;
        };
        let checked = AnnotationValidator::new(&self.view.diff).check_comment(start, end);
        match checked {
            Ok(anchor) => {
                let form = CommentForm::new(self.view.path.clone(), anchor);
                self.open_form(AnnotationForm::Comment(form));
            }
            Err(reason) => self.status = Some(reason.to_string()),
        }
    }

    fn start_suggestion(&mut self) {
        let Some((start, end)) = self.annotation_span() else {
            self.status = Some(CommentRejection::NoValidPosition.to_string());
            return;
        };
        let validator = AnnotationValidator::new(&self.view.diff);
        let checked = validator
            .check_suggestion(start, end)
            .map(|anchor| (anchor, validator.original_lines(start, end)));
        match checked {
            Ok((anchor, original_lines)) => {
                let form = SuggestionForm::new(self.view.path.clone(), anchor, original_lines);
                self.open_form(AnnotationForm::Suggestion(form));
            }
            Err(reason) => self.status = Some(reason.to_string()),
        }
    }

    fn next_thread(&mut self) {
        let count = self.view.cursor_threads().len();
        if count < 2 {
            self.status = Some("No other thread on this line".into());
            return;
        }
        self.view.thread_focus = (self.view.thread_focus + 1) % count;
        self.status = Some(format!("Thread {} of {}", self.view.thread_focus + 1, count));
    }

    fn start_reply(&mut self) {
        let index = self.view.selection.absolute_index();
        let target = self
            .view
            .cursor_new_line()
            .zip(self.view.focused_thread())
            .map(|(line, thread)| (line, thread.top_level.id));
        match target {
            Some((line, comment_id)) => {
                let anchor = Anchor {
                    line,
                    start_line: None,
                    span: (index, index),
                };
                let form = CommentForm::reply(self.view.path.clone(), anchor, comment_id);
                self.open_form(AnnotationForm::Comment(form));
            }
            None => self.status = Some("No comment thread on this line".into()),
        }
    }

    fn open_form(&mut self, form: AnnotationForm) {
        self.view.selection = self.view.selection.cancel_selection();
        self.mode = InteractionMode::FormOpen(form);
    }

    fn remove_pending_at_cursor(&mut self) -> Vec<SessionEvent> {
        let id = self
            .view
            .cursor_new_line()
            .and_then(|line| self.pending.last_at(&self.view.path, line))
            .map(|annotation| annotation.id());
        let Some(id) = id else {
            self.status = Some("No pending annotation on this line".into());
            return Vec::new();
        };
        self.pending.remove(id);
        self.status = Some(format!(
            "Removed pending annotation ({} pending)",
            self.pending.count()
        ));
        vec![SessionEvent::AnnotationRemoved(id)]
    }

    fn handle_form_action(&mut self, action: ReviewAction) -> Vec<SessionEvent> {
        let InteractionMode::FormOpen(form) = &mut self.mode else {
            return Vec::new();
        };
        match action {
            ReviewAction::SwitchField => {
                if let AnnotationForm::Suggestion(suggestion) = form {
                    suggestion.toggle_focus();
                }
                Vec::new()
            }
            ReviewAction::SubmitForm => self.submit_form(),
            ReviewAction::CancelForm => {
                self.mode = InteractionMode::Idle;
                Vec::new()
            }
            other => {
                edit_text(form.active_editor_mut(), other);
                Vec::new()
            }
        }
    }

    fn submit_form(&mut self) -> Vec<SessionEvent> {
        let annotation = match &self.mode {
            InteractionMode::FormOpen(AnnotationForm::Comment(form)) => form.to_annotation(),
            InteractionMode::FormOpen(AnnotationForm::Suggestion(form)) => {
                let annotation = form.to_annotation();
                if annotation.is_none() {
                    debug!("Suggestion unchanged, discarding form");
                    self.mode = InteractionMode::Idle;
                    self.status = Some("Suggestion unchanged, discarded".into());
                    return Vec::new();
                }
                annotation
            }
            _ => return Vec::new(),
        };

        // Blank comments keep the form open
        let Some(annotation) = annotation else {
            self.status = Some("Comment is empty".into());
            return Vec::new();
        };

        let kind = match annotation {
            PendingAnnotation::Comment(_) => "Comment",
            PendingAnnotation::Suggestion(_) => "Suggestion",
        };
        let id = self.pending.add(annotation);
        self.mode = InteractionMode::Idle;
        self.status = Some(format!("{} added ({} pending)", kind, self.pending.count()));
        vec![SessionEvent::AnnotationAdded(id)]
    }

    fn handle_review_action(&mut self, action: ReviewAction) -> Vec<SessionEvent> {
        let InteractionMode::Review(form) = &mut self.mode else {
            return Vec::new();
        };
        match action {
            ReviewAction::ReviewOptionNext => form.decision = form.decision.next(),
            ReviewAction::ReviewOptionPrev => form.decision = form.decision.prev(),
            ReviewAction::CancelForm => self.mode = InteractionMode::Idle,
            ReviewAction::SubmitReview => return self.request_submission(),
            other => edit_text(&mut form.body, other),
        }
        Vec::new()
    }

    fn request_submission(&mut self) -> Vec<SessionEvent> {
        let InteractionMode::Review(form) = &self.mode else {
            return Vec::new();
        };
        let decision = form.decision;
        let body = form.resolved_body(&self.approval_message);
        if let Err(err) = self.check_submittable(decision, body.as_deref()) {
            self.status = Some(err.to_string());
            return Vec::new();
        }
        vec![SessionEvent::SubmitReview { decision, body }]
    }

    fn check_submittable(
        &self,
        decision: ReviewDecision,
        body: Option<&str>,
    ) -> Result<(), ReviewError> {
        let has_body = body.is_some_and(|b| !b.trim().is_empty());
        if decision != ReviewDecision::Approve && !has_body && self.pending.is_empty() {
            return Err(ReviewError::NothingToSubmit);
        }
        Ok(())
    }
}

fn edit_text(editor: &mut TextEditor, action: ReviewAction) {
    match action {
        ReviewAction::InsertChar(c) => editor.insert_char(c),
        ReviewAction::Backspace => editor.delete_char_before(),
        ReviewAction::Delete => editor.delete_char_at(),
        ReviewAction::CursorLeft => editor.cursor_left(),
        ReviewAction::CursorRight => editor.cursor_right(),
        ReviewAction::CursorHome => editor.cursor_home(),
        ReviewAction::CursorEnd => editor.cursor_end(),
        ReviewAction::Newline => editor.insert_newline(),
        _ => {}
    }
}
