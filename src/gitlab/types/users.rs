// User resource types.
// Users, SSH keys, emails, impersonation tokens, activities and status.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::gitlab::pagination::ListOptions;

/// A GitLab user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: Option<String>,
    pub name: String,
    pub state: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub public_email: Option<String>,
    pub skype: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub website_url: Option<String>,
    pub organization: Option<String>,
    pub extern_uid: Option<String>,
    pub provider: Option<String>,
    pub theme_id: Option<u32>,
    pub last_activity_on: Option<NaiveDate>,
    pub color_scheme_id: Option<u32>,
    #[serde(default)]
    pub is_admin: bool,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub can_create_group: bool,
    #[serde(default)]
    pub can_create_project: bool,
    pub projects_limit: Option<u32>,
    pub current_sign_in_at: Option<DateTime<Utc>>,
    pub last_sign_in_at: Option<DateTime<Utc>>,
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub two_factor_enabled: bool,
    #[serde(default)]
    pub identities: Vec<UserIdentity>,
    #[serde(default)]
    pub external: bool,
    #[serde(default)]
    pub private_profile: bool,
    pub shared_runners_minutes_limit: Option<u64>,
    #[serde(default)]
    pub custom_attributes: Vec<CustomAttribute>,
}

/// External identity linked to a user (LDAP, SAML, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub provider: String,
    pub extern_uid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAttribute {
    pub key: String,
    pub value: String,
}

/// Options for `UsersService::list_users`. Filters past `blocked` require admin.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListUsersOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "extern_uid", skip_serializing_if = "Option::is_none")]
    pub external_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_before: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_custom_attributes: Option<bool>,
}

/// Body for `UsersService::create_user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateUserOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_password: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extern_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_create_group: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_confirmation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<bool>,
}

/// Body for `UsersService::modify_user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModifyUserOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extern_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_create_group: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reconfirmation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<bool>,
}

/// A public SSH key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKey {
    pub id: u64,
    pub title: String,
    pub key: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for adding an SSH key to the current or a given user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddSshKeyOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: u64,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddEmailOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Token that lets an admin act as a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpersonationToken {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub active: bool,
    /// Only present in the response to token creation.
    pub token: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub revoked: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<NaiveDate>,
}

/// Filter for listing impersonation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpersonationTokenState {
    All,
    Active,
    Inactive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetAllImpersonationTokensOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ImpersonationTokenState>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateImpersonationTokenOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
}

/// Last activity date for one user, from `user/activities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
    pub username: String,
    pub last_activity_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetUserActivitiesOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatus {
    pub emoji: Option<String>,
    pub message: Option<String>,
    pub message_html: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserStatusOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_decodes_sparse_payload() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "username": "jdoe",
            "name": "Jane Doe",
            "state": "active",
            "bio": null,
            "created_at": "2018-03-01T10:00:00.000Z",
            "last_activity_on": "2019-01-15",
            "identities": [{"provider": "ldapmain", "extern_uid": "cn=jdoe"}]
        }))
        .unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.state.as_deref(), Some("active"));
        assert_eq!(user.bio, None);
        assert!(!user.is_admin);
        assert_eq!(user.last_activity_on, NaiveDate::from_ymd_opt(2019, 1, 15));
        assert_eq!(user.identities[0].provider, "ldapmain");
        assert!(user.custom_attributes.is_empty());
    }

    #[test]
    fn test_list_users_options_wire_names() {
        let opts = ListUsersOptions {
            list: ListOptions::new(1, 100),
            external_uid: Some("uid-1".to_string()),
            with_custom_attributes: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({
                "page": 1,
                "per_page": 100,
                "extern_uid": "uid-1",
                "with_custom_attributes": true
            })
        );
    }

    #[test]
    fn test_impersonation_token_options_encode_date_only() {
        let opts = CreateImpersonationTokenOptions {
            name: Some("ci".to_string()),
            scopes: Some(vec!["api".to_string(), "read_user".to_string()]),
            expires_at: NaiveDate::from_ymd_opt(2030, 12, 31),
        };
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({"name": "ci", "scopes": ["api", "read_user"], "expires_at": "2030-12-31"})
        );
    }
}
