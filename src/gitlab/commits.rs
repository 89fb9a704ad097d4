// Commits API endpoints.
// Repository commits, their refs, diffs, comments, statuses and merge requests.

use crate::error::Result;

use super::client::{GitLabClient, path_escape};
use super::pagination::{ListOptions, Page};
use super::types::{
    CherryPickCommitOptions, Commit, CommitComment, CommitRef, CommitStatus, CreateCommitOptions,
    Diff, GetCommitRefsOptions, GetCommitStatusesOptions, ListCommitsOptions, MergeRequest,
    PostCommitCommentOptions, ProjectId, SetCommitStatusOptions,
};

/// Commit related methods of the GitLab API.
///
/// Projects are addressed by numeric ID or `namespace/project` path; both are
/// escaped into a single path segment.
#[derive(Clone)]
pub struct CommitsService {
    client: GitLabClient,
}

impl CommitsService {
    pub fn new(client: GitLabClient) -> Self {
        Self { client }
    }

    /// List repository commits of a project.
    pub async fn list_commits(
        &self,
        pid: impl Into<ProjectId>,
        opts: &ListCommitsOptions,
    ) -> Result<Page<Commit>> {
        self.client
            .get_page(&format!("{}/repository/commits", project(pid)), Some(opts))
            .await
    }

    /// Branches and tags a commit was pushed to.
    pub async fn get_commit_refs(
        &self,
        pid: impl Into<ProjectId>,
        sha: &str,
        opts: &GetCommitRefsOptions,
    ) -> Result<Page<CommitRef>> {
        self.client
            .get_page(&commit_path(pid, sha, "refs"), Some(opts))
            .await
    }

    pub async fn get_commit(&self, pid: impl Into<ProjectId>, sha: &str) -> Result<Commit> {
        self.client
            .get(&format!(
                "{}/repository/commits/{}",
                project(pid),
                path_escape(sha)
            ))
            .await
    }

    /// Create a commit with several file actions in one request.
    pub async fn create_commit(
        &self,
        pid: impl Into<ProjectId>,
        opts: &CreateCommitOptions,
    ) -> Result<Commit> {
        self.client
            .post(&format!("{}/repository/commits", project(pid)), Some(opts))
            .await
    }

    pub async fn get_commit_diff(
        &self,
        pid: impl Into<ProjectId>,
        sha: &str,
        opts: &ListOptions,
    ) -> Result<Page<Diff>> {
        self.client
            .get_page(&commit_path(pid, sha, "diff"), Some(opts))
            .await
    }

    pub async fn get_commit_comments(
        &self,
        pid: impl Into<ProjectId>,
        sha: &str,
        opts: &ListOptions,
    ) -> Result<Page<CommitComment>> {
        self.client
            .get_page(&commit_path(pid, sha, "comments"), Some(opts))
            .await
    }

    /// Comment on a commit, or on one line of its diff when path, line and
    /// line type are all set.
    pub async fn post_commit_comment(
        &self,
        pid: impl Into<ProjectId>,
        sha: &str,
        opts: &PostCommitCommentOptions,
    ) -> Result<CommitComment> {
        self.client
            .post(&commit_path(pid, sha, "comments"), Some(opts))
            .await
    }

    pub async fn get_commit_statuses(
        &self,
        pid: impl Into<ProjectId>,
        sha: &str,
        opts: &GetCommitStatusesOptions,
    ) -> Result<Page<CommitStatus>> {
        self.client
            .get_page(&commit_path(pid, sha, "statuses"), Some(opts))
            .await
    }

    /// Report an external CI status. Note the path is `statuses/:sha`, not
    /// under `repository/commits`.
    pub async fn set_commit_status(
        &self,
        pid: impl Into<ProjectId>,
        sha: &str,
        opts: &SetCommitStatusOptions,
    ) -> Result<CommitStatus> {
        self.client
            .post(
                &format!("{}/statuses/{}", project(pid), path_escape(sha)),
                Some(opts),
            )
            .await
    }

    /// Merge requests that introduced a commit. Not paginated.
    pub async fn get_merge_requests_by_commit(
        &self,
        pid: impl Into<ProjectId>,
        sha: &str,
    ) -> Result<Vec<MergeRequest>> {
        self.client
            .get(&commit_path(pid, sha, "merge_requests"))
            .await
    }

    /// Cherry-pick a commit onto `opts.target_branch`.
    pub async fn cherry_pick_commit(
        &self,
        pid: impl Into<ProjectId>,
        sha: &str,
        opts: &CherryPickCommitOptions,
    ) -> Result<Commit> {
        self.client
            .post(&commit_path(pid, sha, "cherry_pick"), Some(opts))
            .await
    }
}

fn project(pid: impl Into<ProjectId>) -> String {
    format!("projects/{}", path_escape(&pid.into().to_string()))
}

fn commit_path(pid: impl Into<ProjectId>, sha: &str, tail: &str) -> String {
    format!(
        "{}/repository/commits/{}/{}",
        project(pid),
        path_escape(sha),
        tail
    )
}
