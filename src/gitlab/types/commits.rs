// Commit resource types.
// Commits, diffs, comments, statuses, refs and the options that drive them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gitlab::pagination::ListOptions;

/// A repository commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub short_id: String,
    pub title: String,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub authored_date: Option<DateTime<Utc>>,
    pub committer_name: Option<String>,
    pub committer_email: Option<String>,
    pub committed_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub parent_ids: Vec<String>,
    /// Only populated when requested with `with_stats`.
    pub stats: Option<CommitStats>,
    pub status: Option<BuildState>,
    pub web_url: Option<String>,
}

/// Line counts for a commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}

/// Pipeline/build state attached to commits and commit statuses.
///
/// `Unknown` catches states this crate does not know yet. It only exists on
/// decoded values and refuses to serialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildState {
    Pending,
    Created,
    Running,
    Success,
    Failed,
    Canceled,
    Skipped,
    Manual,
    #[serde(other, skip_serializing)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListCommitsOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_stats: Option<bool>,
}

/// What to do with one file in a multi-file commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
    Create,
    Delete,
    Move,
    Update,
}

/// One file operation inside `CreateCommitOptions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitAction {
    pub action: FileAction,
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// `text` (default) or `base64`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl CommitAction {
    pub fn new(action: FileAction, file_path: impl Into<String>) -> Self {
        Self {
            action,
            file_path: file_path.into(),
            previous_path: None,
            content: None,
            encoding: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// A branch or tag containing a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    #[serde(rename = "type")]
    pub ref_type: CommitRefType,
    pub name: String,
}

/// Ref kind. `All` is only meaningful as a filter, `Unknown` only when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitRefType {
    Branch,
    Tag,
    All,
    #[serde(other, skip_serializing)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetCommitRefsOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<CommitRefType>,
}

/// Body for `CommitsService::create_commit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCommitOptions {
    pub branch: String,
    pub commit_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_branch: Option<String>,
    pub actions: Vec<CommitAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

impl CreateCommitOptions {
    pub fn new(branch: impl Into<String>, commit_message: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            commit_message: commit_message.into(),
            start_branch: None,
            actions: Vec::new(),
            author_email: None,
            author_name: None,
        }
    }

    pub fn action(mut self, action: CommitAction) -> Self {
        self.actions.push(action);
        self
    }
}

/// One file's diff within a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    pub diff: String,
    pub new_path: String,
    pub old_path: String,
    pub a_mode: Option<String>,
    pub b_mode: Option<String>,
    #[serde(default)]
    pub new_file: bool,
    #[serde(default)]
    pub renamed_file: bool,
    #[serde(default)]
    pub deleted_file: bool,
}

/// Minimal user record embedded in commit comments and statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: u64,
    pub username: String,
    pub email: Option<String>,
    pub name: String,
    pub state: Option<String>,
    #[serde(default)]
    pub blocked: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitComment {
    pub note: String,
    pub path: Option<String>,
    pub line: Option<u32>,
    pub line_type: Option<LineType>,
    pub author: Author,
}

/// Side of the diff a line comment refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    New,
    Old,
}

/// Body for `CommitsService::post_commit_comment`.
///
/// A line comment needs `path`, `line` and `line_type` together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostCommitCommentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_type: Option<LineType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetCommitStatusesOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
}

/// External CI status reported against a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStatus {
    pub id: u64,
    pub sha: String,
    #[serde(rename = "ref")]
    pub ref_name: Option<String>,
    pub status: BuildState,
    pub name: Option<String>,
    pub target_url: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub author: Option<Author>,
}

/// Body for `CommitsService::set_commit_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetCommitStatusOptions {
    pub state: BuildState,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SetCommitStatusOptions {
    pub fn new(state: BuildState) -> Self {
        Self {
            state,
            ref_name: None,
            name: None,
            context: None,
            target_url: None,
            description: None,
        }
    }
}

/// Merge request as returned for a commit.
///
/// Nested objects GitLab attaches (milestone, references, time stats, task
/// completion) are not modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub id: u64,
    pub iid: u64,
    pub project_id: u64,
    pub title: String,
    pub description: Option<String>,
    pub state: String,
    pub source_branch: String,
    pub target_branch: String,
    pub source_project_id: Option<u64>,
    pub target_project_id: Option<u64>,
    pub author: Option<Author>,
    pub assignee: Option<Author>,
    #[serde(default)]
    pub assignees: Vec<Author>,
    #[serde(default)]
    pub reviewers: Vec<Author>,
    pub merged_by: Option<Author>,
    pub closed_by: Option<Author>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub work_in_progress: bool,
    pub merge_status: Option<String>,
    pub detailed_merge_status: Option<String>,
    #[serde(default)]
    pub upvotes: u64,
    #[serde(default)]
    pub downvotes: u64,
    #[serde(default)]
    pub user_notes_count: u64,
    pub should_remove_source_branch: Option<bool>,
    pub force_remove_source_branch: Option<bool>,
    #[serde(default)]
    pub squash: bool,
    pub discussion_locked: Option<bool>,
    pub sha: Option<String>,
    pub merge_commit_sha: Option<String>,
    pub squash_commit_sha: Option<String>,
    pub web_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Body for `CommitsService::cherry_pick_commit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CherryPickCommitOptions {
    #[serde(rename = "branch", skip_serializing_if = "Option::is_none")]
    pub target_branch: Option<String>,
}
