//! User endpoints: `users/show` and `i`
//!
//! `users/show` is the catalogue's switched response: asked for one user it
//! returns a user object, asked for several it returns an array. The switch
//! is a schema-time concern, so the response type is a sum type the caller
//! matches on; the runtime client treats both arms as opaque JSON.

use crate::endpoint::{Endpoint, NoParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `users/show` — look up one user or several.
pub struct UsersShow;

impl Endpoint for UsersShow {
    const NAME: &'static str = "users/show";
    type Request = UsersShowRequest;
    type Response = UserOrUsers;
}

/// `i` — the account the supplied credential belongs to.
pub struct CurrentAccount;

impl Endpoint for CurrentAccount {
    const NAME: &'static str = "i";
    type Request = NoParams;
    type Response = User;
}

/// Parameters for `users/show`.
///
/// Exactly one of `user_id`, `user_ids`, or `username` identifies the
/// target; the server decides precedence, the client does not validate.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersShowRequest {
    /// Look up a single user by id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Look up several users by id; switches the response to an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<String>>,

    /// Look up a single user by username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Remote host qualifier for `username`; `None` means local.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl UsersShowRequest {
    /// Request a single user by id.
    pub fn by_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Default::default()
        }
    }

    /// Request several users by id.
    pub fn by_ids(user_ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            user_ids: Some(user_ids.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }
}

/// The two shapes `users/show` can reply with.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserOrUsers {
    /// Reply to a `user_ids` request.
    Many(Vec<User>),

    /// Reply to a `user_id` or `username` request.
    One(Box<User>),
}

/// A user account, local or remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned account id.
    pub id: String,

    /// Login name, unique per host.
    pub username: String,

    /// Display name; `None` falls back to the username.
    #[serde(default)]
    pub name: Option<String>,

    /// Host the account lives on; `None` means this instance.
    #[serde(default)]
    pub host: Option<String>,

    /// When the account was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Whether the account is flagged as a bot.
    #[serde(default)]
    pub is_bot: bool,

    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_body(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "username": "ai",
            "name": "藍",
            "createdAt": "2023-04-01T00:00:00.000Z",
            "isBot": true
        })
    }

    #[test]
    fn by_id_serializes_only_user_id() {
        let json = serde_json::to_value(UsersShowRequest::by_id("42")).unwrap();
        assert_eq!(json, json!({"userId": "42"}));
    }

    #[test]
    fn by_ids_serializes_only_user_ids() {
        let json = serde_json::to_value(UsersShowRequest::by_ids(["1", "2"])).unwrap();
        assert_eq!(json, json!({"userIds": ["1", "2"]}));
    }

    #[test]
    fn switched_response_decodes_single_user() {
        let parsed: UserOrUsers = serde_json::from_value(user_body("42")).unwrap();
        match parsed {
            UserOrUsers::One(user) => {
                assert_eq!(user.id, "42");
                assert!(user.is_bot);
            }
            UserOrUsers::Many(_) => panic!("expected the single-user arm"),
        }
    }

    #[test]
    fn switched_response_decodes_user_array() {
        let parsed: UserOrUsers =
            serde_json::from_value(json!([user_body("1"), user_body("2")])).unwrap();
        match parsed {
            UserOrUsers::Many(users) => assert_eq!(users.len(), 2),
            UserOrUsers::One(_) => panic!("expected the array arm"),
        }
    }

    #[test]
    fn user_tolerates_missing_optional_fields() {
        let user: User =
            serde_json::from_value(json!({"id": "9", "username": "syuilo"})).unwrap();
        assert!(user.name.is_none());
        assert!(!user.is_bot);
    }
}
