// Users API endpoints.
// Accounts, SSH keys, emails, impersonation tokens, activity and status.

use crate::error::{Error, Result};

use super::client::GitLabClient;
use super::pagination::{ListOptions, Page};
use super::transport::HttpMethod;
use super::types::{
    AddEmailOptions, AddSshKeyOptions, CreateImpersonationTokenOptions, CreateUserOptions, Email,
    GetAllImpersonationTokensOptions, GetUserActivitiesOptions, ImpersonationToken,
    ListUsersOptions, ModifyUserOptions, SshKey, User, UserActivity, UserStatus, UserStatusOptions,
};

/// User related methods of the GitLab API.
///
/// Methods marked admin-only fail with a 403 mapped to `Error::UnexpectedStatus`
/// when the token lacks admin rights.
#[derive(Clone)]
pub struct UsersService {
    client: GitLabClient,
}

impl UsersService {
    pub fn new(client: GitLabClient) -> Self {
        Self { client }
    }

    /// List users visible to the caller.
    pub async fn list_users(&self, opts: &ListUsersOptions) -> Result<Page<User>> {
        self.client.get_page("users", Some(opts)).await
    }

    pub async fn get_user(&self, user: u64) -> Result<User> {
        self.client.get(&format!("users/{}", user)).await
    }

    /// Create a user (admin only).
    pub async fn create_user(&self, opts: &CreateUserOptions) -> Result<User> {
        self.client.post("users", Some(opts)).await
    }

    /// Modify a user's attributes (admin only).
    pub async fn modify_user(&self, user: u64, opts: &ModifyUserOptions) -> Result<User> {
        self.client.put(&format!("users/{}", user), opts).await
    }

    /// Delete a user (admin only).
    ///
    /// Idempotent: GitLab answers success for users that are already gone, and
    /// the body (the deleted user, or nothing) is discarded.
    pub async fn delete_user(&self, user: u64) -> Result<()> {
        self.client.delete(&format!("users/{}", user)).await
    }

    /// The user owning the token.
    pub async fn current_user(&self) -> Result<User> {
        self.client.get("user").await
    }

    /// SSH keys of the current user.
    pub async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        self.client.get("user/keys").await
    }

    /// SSH keys of a given user (admin only).
    pub async fn list_ssh_keys_for_user(
        &self,
        user: u64,
        opts: &ListOptions,
    ) -> Result<Page<SshKey>> {
        self.client
            .get_page(&format!("users/{}/keys", user), Some(opts))
            .await
    }

    pub async fn get_ssh_key(&self, key: u64) -> Result<SshKey> {
        self.client.get(&format!("user/keys/{}", key)).await
    }

    /// Add a key for the current user.
    pub async fn add_ssh_key(&self, opts: &AddSshKeyOptions) -> Result<SshKey> {
        self.client.post("user/keys", Some(opts)).await
    }

    /// Add a key for a given user (admin only).
    pub async fn add_ssh_key_for_user(&self, user: u64, opts: &AddSshKeyOptions) -> Result<SshKey> {
        self.client
            .post(&format!("users/{}/keys", user), Some(opts))
            .await
    }

    /// Delete a key of the current user. Succeeds for keys that are already gone.
    pub async fn delete_ssh_key(&self, key: u64) -> Result<()> {
        self.client.delete(&format!("user/keys/{}", key)).await
    }

    /// Delete a key of a given user (admin only).
    pub async fn delete_ssh_key_for_user(&self, user: u64, key: u64) -> Result<()> {
        self.client
            .delete(&format!("users/{}/keys/{}", user, key))
            .await
    }

    /// Block a user (admin only).
    ///
    /// GitLab answers 201 on success. 403 means LDAP synchronization already
    /// blocked the account and 404 means the user does not exist.
    pub async fn block_user(&self, user: u64) -> Result<()> {
        let path = format!("users/{}/block", user);
        let response = self
            .client
            .send_raw(HttpMethod::Post, &path, None::<&()>)
            .await?;

        match response.status {
            201 => Ok(()),
            403 => Err(Error::UserBlockedByLdap),
            404 => Err(Error::UserNotFound),
            status => Err(Error::UnexpectedResultCode(status)),
        }
    }

    /// Unblock a user (admin only). Users blocked through LDAP stay blocked (403).
    pub async fn unblock_user(&self, user: u64) -> Result<()> {
        let path = format!("users/{}/unblock", user);
        let response = self
            .client
            .send_raw(HttpMethod::Post, &path, None::<&()>)
            .await?;

        match response.status {
            201 => Ok(()),
            403 => Err(Error::UnblockForbiddenByLdap),
            404 => Err(Error::UserNotFound),
            status => Err(Error::UnexpectedResultCode(status)),
        }
    }

    /// Emails of the current user.
    pub async fn list_emails(&self) -> Result<Vec<Email>> {
        self.client.get("user/emails").await
    }

    /// Emails of a given user (admin only).
    pub async fn list_emails_for_user(&self, user: u64, opts: &ListOptions) -> Result<Page<Email>> {
        self.client
            .get_page(&format!("users/{}/emails", user), Some(opts))
            .await
    }

    pub async fn get_email(&self, email: u64) -> Result<Email> {
        self.client.get(&format!("user/emails/{}", email)).await
    }

    pub async fn add_email(&self, opts: &AddEmailOptions) -> Result<Email> {
        self.client.post("user/emails", Some(opts)).await
    }

    /// Add an email for a given user (admin only).
    pub async fn add_email_for_user(&self, user: u64, opts: &AddEmailOptions) -> Result<Email> {
        self.client
            .post(&format!("users/{}/emails", user), Some(opts))
            .await
    }

    /// Delete an email of the current user. Succeeds for emails that are already gone.
    pub async fn delete_email(&self, email: u64) -> Result<()> {
        self.client.delete(&format!("user/emails/{}", email)).await
    }

    /// Delete an email of a given user (admin only).
    pub async fn delete_email_for_user(&self, user: u64, email: u64) -> Result<()> {
        self.client
            .delete(&format!("users/{}/emails/{}", user, email))
            .await
    }

    pub async fn get_all_impersonation_tokens(
        &self,
        user: u64,
        opts: &GetAllImpersonationTokensOptions,
    ) -> Result<Page<ImpersonationToken>> {
        self.client
            .get_page(&format!("users/{}/impersonation_tokens", user), Some(opts))
            .await
    }

    pub async fn get_impersonation_token(
        &self,
        user: u64,
        token: u64,
    ) -> Result<ImpersonationToken> {
        self.client
            .get(&format!("users/{}/impersonation_tokens/{}", user, token))
            .await
    }

    /// Create an impersonation token. The secret is only returned here.
    pub async fn create_impersonation_token(
        &self,
        user: u64,
        opts: &CreateImpersonationTokenOptions,
    ) -> Result<ImpersonationToken> {
        self.client
            .post(&format!("users/{}/impersonation_tokens", user), Some(opts))
            .await
    }

    pub async fn revoke_impersonation_token(&self, user: u64, token: u64) -> Result<()> {
        self.client
            .delete(&format!("users/{}/impersonation_tokens/{}", user, token))
            .await
    }

    /// Last activity dates of all users (admin only).
    pub async fn get_user_activities(
        &self,
        opts: &GetUserActivitiesOptions,
    ) -> Result<Vec<UserActivity>> {
        self.client.get_with_params("user/activities", opts).await
    }

    pub async fn current_user_status(&self) -> Result<UserStatus> {
        self.client.get("user/status").await
    }

    pub async fn get_user_status(&self, user: u64) -> Result<UserStatus> {
        self.client.get(&format!("users/{}/status", user)).await
    }

    /// Set the current user's status.
    pub async fn set_user_status(&self, opts: &UserStatusOptions) -> Result<UserStatus> {
        self.client.put("user/status", opts).await
    }
}
