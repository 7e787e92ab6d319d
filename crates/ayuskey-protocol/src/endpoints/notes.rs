//! Note endpoints: `notes/create`, `notes/show`, `notes/delete`

use crate::endpoint::Endpoint;
use crate::endpoints::users::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `notes/create` — post a note.
pub struct NotesCreate;

impl Endpoint for NotesCreate {
    const NAME: &'static str = "notes/create";
    type Request = NotesCreateRequest;
    type Response = NotesCreateResponse;
}

/// `notes/show` — fetch a single note by id.
pub struct NotesShow;

impl Endpoint for NotesShow {
    const NAME: &'static str = "notes/show";
    type Request = NoteRef;
    type Response = Note;
}

/// `notes/delete` — delete a note. Replies `204 No Content`.
pub struct NotesDelete;

impl Endpoint for NotesDelete {
    const NAME: &'static str = "notes/delete";
    type Request = NoteRef;
    type Response = ();
}

/// Who can see a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to everyone, shown on public timelines.
    Public,

    /// Visible to everyone, hidden from public timelines.
    Home,

    /// Visible to followers only.
    Followers,

    /// Visible to the users named in the note.
    Specified,
}

/// Parameters for `notes/create`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesCreateRequest {
    /// Body text; `None` for pure renotes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Visibility; the server default is `public`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,

    /// Content warning shown before the body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cw: Option<String>,

    /// Note this one replies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_id: Option<String>,

    /// Note this one renotes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renote_id: Option<String>,

    /// Keep the note off federated timelines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_only: Option<bool>,
}

impl NotesCreateRequest {
    /// A plain text note with server-default visibility.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Response of `notes/create`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesCreateResponse {
    /// The note as the server persisted it.
    pub created_note: Note,
}

/// A note id, the parameter shape shared by `notes/show` and `notes/delete`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRef {
    /// Target note id.
    pub note_id: String,
}

impl NoteRef {
    /// Reference a note by id.
    pub fn new(note_id: impl Into<String>) -> Self {
        Self {
            note_id: note_id.into(),
        }
    }
}

/// A note as returned by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Server-assigned note id.
    pub id: String,

    /// When the note was posted.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Body text.
    #[serde(default)]
    pub text: Option<String>,

    /// Content warning.
    #[serde(default)]
    pub cw: Option<String>,

    /// Id of the author.
    pub user_id: String,

    /// The author, when the server inlines it.
    #[serde(default)]
    pub user: Option<User>,

    /// Visibility the note was posted with.
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,

    /// Id of the renoted note, if any.
    #[serde(default)]
    pub renote_id: Option<String>,
}

fn default_visibility() -> Visibility {
    Visibility::Public
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_omits_unset_fields() {
        let json = serde_json::to_value(NotesCreateRequest::text("hello")).unwrap();
        assert_eq!(json, json!({"text": "hello"}));
    }

    #[test]
    fn create_request_uses_camel_case_names() {
        let req = NotesCreateRequest {
            text: Some("re".into()),
            reply_id: Some("n1".into()),
            local_only: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(req).unwrap();
        assert_eq!(json, json!({"text": "re", "replyId": "n1", "localOnly": true}));
    }

    #[test]
    fn create_response_unwraps_created_note() {
        let resp: NotesCreateResponse = serde_json::from_value(json!({
            "createdNote": {
                "id": "n1",
                "userId": "u1",
                "text": "hi",
                "visibility": "home"
            }
        }))
        .unwrap();
        assert_eq!(resp.created_note.id, "n1");
        assert_eq!(resp.created_note.visibility, Visibility::Home);
    }

    #[test]
    fn note_defaults_visibility_to_public() {
        let note: Note =
            serde_json::from_value(json!({"id": "n2", "userId": "u1"})).unwrap();
        assert_eq!(note.visibility, Visibility::Public);
    }

    #[test]
    fn note_ref_serializes_note_id() {
        let json = serde_json::to_value(NoteRef::new("n3")).unwrap();
        assert_eq!(json, json!({"noteId": "n3"}));
    }

    #[test]
    fn delete_response_decodes_from_null() {
        // notes/delete replies 204; the client feeds JSON null to the
        // response type.
        let _: <NotesDelete as Endpoint>::Response =
            serde_json::from_value(serde_json::Value::Null).unwrap();
    }
}
