//! Stored document shapes

use super::Collection;
use assist_ai_shared::{
    AdminSession, FeedbackItem, Note, Reminder, Subject, Task, TeacherProfile,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered teacher account as persisted
///
/// Keyed by email in the `teachers` collection, so the store's primary key
/// is what keeps registration unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeacherRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub school: String,
    pub preferred_language: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TeacherRecord {
    /// Client-facing view without the password hash
    pub fn to_profile(&self) -> TeacherProfile {
        TeacherProfile {
            name: self.name.clone(),
            email: self.email.clone(),
            school: self.school.clone(),
            preferred_language: self.preferred_language.clone(),
            profile_picture: self.profile_picture.clone(),
        }
    }
}

/// Any persisted record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Document {
    Teacher(TeacherRecord),
    AdminSession(AdminSession),
    Note(Note),
    Task(Task),
    Subject(Subject),
    Reminder(Reminder),
    Feedback(FeedbackItem),
}

impl Document {
    pub fn collection(&self) -> Collection {
        match self {
            Document::Teacher(_) => Collection::Teachers,
            Document::AdminSession(_) => Collection::AdminSessions,
            Document::Note(_) => Collection::Notes,
            Document::Task(_) => Collection::Tasks,
            Document::Subject(_) => Collection::Subjects,
            Document::Reminder(_) => Collection::Reminders,
            Document::Feedback(_) => Collection::Feedback,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Document::Teacher(t) => &t.email,
            Document::AdminSession(s) => &s.id,
            Document::Note(n) => &n.id,
            Document::Task(t) => &t.id,
            Document::Subject(s) => &s.id,
            Document::Reminder(r) => &r.id,
            Document::Feedback(f) => &f.id,
        }
    }
}

/// A typed record that lives in exactly one collection
pub trait Entity: Sized + Send + Sync {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
    fn into_document(self) -> Document;
    fn from_document(doc: Document) -> Option<Self>;
}

macro_rules! impl_entity {
    ($ty:ty, $variant:ident, $collection:expr, |$this:ident| $id:expr) => {
        impl Entity for $ty {
            const COLLECTION: Collection = $collection;

            fn id(&self) -> &str {
                let $this = self;
                $id
            }

            fn into_document(self) -> Document {
                Document::$variant(self)
            }

            fn from_document(doc: Document) -> Option<Self> {
                match doc {
                    Document::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_entity!(TeacherRecord, Teacher, Collection::Teachers, |t| &t.email);
impl_entity!(AdminSession, AdminSession, Collection::AdminSessions, |s| &s.id);
impl_entity!(Note, Note, Collection::Notes, |n| &n.id);
impl_entity!(Task, Task, Collection::Tasks, |t| &t.id);
impl_entity!(Subject, Subject, Collection::Subjects, |s| &s.id);
impl_entity!(Reminder, Reminder, Collection::Reminders, |r| &r.id);
impl_entity!(FeedbackItem, Feedback, Collection::Feedback, |f| &f.id);
