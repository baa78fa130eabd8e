//! Rebuild reply threads from the flat comment list returned by the host.

use crate::model::{CommentThread, ReviewComment};
use log::debug;
use std::collections::{BTreeMap, HashSet};

/// Threads of one file, keyed by anchor line.
///
/// Several top-level comments may share a line. [`CommentThreads::get`]
/// returns the first one encountered, [`CommentThreads::all_at`] returns all
/// of them in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentThreads {
    by_line: BTreeMap<u32, Vec<CommentThread>>,
}

impl CommentThreads {
    /// The first thread anchored at `line`.
    pub fn get(&self, line: u32) -> Option<&CommentThread> {
        self.by_line.get(&line).and_then(|threads| threads.first())
    }

    /// Every thread anchored at `line`.
    pub fn all_at(&self, line: u32) -> &[CommentThread] {
        self.by_line.get(&line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Anchor lines that carry at least one thread, ascending.
    pub fn lines(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_line.keys().copied()
    }

    /// Number of threads across all lines.
    pub fn len(&self) -> usize {
        self.by_line.values().map(Vec::len).sum()
    }

    /// Check if there are no threads.
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Iterate over all threads ordered by anchor line.
    pub fn iter(&self) -> impl Iterator<Item = &CommentThread> {
        self.by_line.values().flatten()
    }
}

/// Group comments into threads keyed by anchor line.
///
/// Replies are attached to the top-level comment they reference and ordered
/// by creation time. Replies whose parent is not a top-level comment in
/// `comments` are dropped.
pub fn group_threads(comments: &[ReviewComment]) -> CommentThreads {
    let (top_level, replies): (Vec<&ReviewComment>, Vec<&ReviewComment>) =
        comments.iter().partition(|c| !c.is_reply());

    let parents: HashSet<u64> = top_level.iter().map(|c| c.id).collect();
    for orphan in replies
        .iter()
        .filter(|r| r.in_reply_to.is_some_and(|p| !parents.contains(&p)))
    {
        debug!(
            "Dropping reply {} to unknown comment {:?}",
            orphan.id, orphan.in_reply_to
        );
    }

    let mut threads = CommentThreads::default();
    for comment in top_level {
        let mut thread_replies: Vec<ReviewComment> = replies
            .iter()
            .filter(|r| r.in_reply_to == Some(comment.id))
            .map(|r| (*r).clone())
            .collect();
        // Stable: equal timestamps keep their input order
        thread_replies.sort_by_key(|r| r.created_at);

        let line = comment.line.unwrap_or(0);
        let slot = threads.by_line.entry(line).or_default();
        if !slot.is_empty() {
            debug!(
                "Comment {} shares line {} with {} other thread(s)",
                comment.id,
                line,
                slot.len()
            );
        }
        slot.push(CommentThread {
            top_level: comment.clone(),
            replies: thread_replies,
        });
    }

    threads
}

/// Group only the comments on `path`.
pub fn threads_for_file(comments: &[ReviewComment], path: &str) -> CommentThreads {
    let on_file: Vec<ReviewComment> = comments.iter().filter(|c| c.path == path).cloned().collect();
    group_threads(&on_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn comment(id: u64, line: Option<u32>, in_reply_to: Option<u64>, secs: i64) -> ReviewComment {
        ReviewComment {
            id,
            path: "src/lib.rs".to_string(),
            line,
            start_line: None,
            body: format!("comment {}", id),
            author: "octocat".to_string(),
            created_at: at(secs),
            in_reply_to,
        }
    }

    #[test]
    fn test_replies_sorted_by_creation_time() {
        let comments = vec![
            comment(1, Some(10), None, 0),
            comment(2, Some(10), Some(1), 20),
            comment(3, Some(10), Some(1), 10),
        ];

        let threads = group_threads(&comments);
        assert_eq!(threads.len(), 1);

        let thread = threads.get(10).unwrap();
        assert_eq!(thread.top_level.id, 1);
        let reply_ids: Vec<u64> = thread.replies.iter().map(|r| r.id).collect();
        assert_eq!(reply_ids, vec![3, 2]);
    }

    #[test]
    fn test_orphan_replies_are_dropped() {
        let comments = vec![comment(1, Some(5), None, 0), comment(9, Some(5), Some(42), 1)];

        let threads = group_threads(&comments);
        assert_eq!(threads.len(), 1);
        assert!(threads.get(5).unwrap().replies.is_empty());
    }

    #[test]
    fn test_reply_to_reply_is_not_surfaced() {
        // Replies must reference a top-level comment directly
        let comments = vec![
            comment(1, Some(5), None, 0),
            comment(2, Some(5), Some(1), 1),
            comment(3, Some(5), Some(2), 2),
        ];

        let threads = group_threads(&comments);
        let ids: Vec<u64> = threads.get(5).unwrap().comments().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_same_line_threads_are_stacked() {
        let comments = vec![
            comment(1, Some(7), None, 0),
            comment(2, Some(7), None, 1),
            comment(3, Some(7), Some(2), 2),
        ];

        let threads = group_threads(&comments);
        assert_eq!(threads.get(7).unwrap().top_level.id, 1);

        let stacked = threads.all_at(7);
        assert_eq!(stacked.len(), 2);
        assert_eq!(stacked[1].top_level.id, 2);
        assert_eq!(stacked[1].replies.len(), 1);
        assert_eq!(threads.len(), 2);
    }

    #[test]
    fn test_missing_line_defaults_to_zero() {
        let threads = group_threads(&[comment(1, None, None, 0)]);
        assert_eq!(threads.lines().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_single_comment_thread_and_empty_input() {
        let threads = group_threads(&[comment(1, Some(3), None, 0)]);
        assert_eq!(threads.get(3).unwrap().comment_count(), 1);

        let empty = group_threads(&[]);
        assert!(empty.is_empty());
        assert!(empty.all_at(3).is_empty());
    }

    #[test]
    fn test_threads_for_file_filters_by_path() {
        let mut other = comment(2, Some(3), None, 0);
        other.path = "README.md".to_string();
        let comments = vec![comment(1, Some(3), None, 0), other];

        let threads = threads_for_file(&comments, "README.md");
        assert_eq!(threads.len(), 1);
        assert_eq!(threads.get(3).unwrap().top_level.id, 2);
    }
}
