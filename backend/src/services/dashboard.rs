//! Dashboard data: notes, tasks and subjects

use crate::error::ApiError;
use crate::repositories::Repository;
use crate::store::{DocumentStore, StoreError};
use assist_ai_shared::validation::{validate_chapters, validate_date, validate_required};
use assist_ai_shared::{CreateSubjectRequest, MessageResponse, Note, Subject, Task};
use uuid::Uuid;

/// Notes shown on the dashboard
pub const NOTES_LIMIT: usize = 20;
pub const TASKS_LIMIT: usize = 100;
pub const SUBJECTS_LIMIT: usize = 50;

pub struct DashboardService;

impl DashboardService {
    /// Newest notes first, by their `date`
    pub async fn list_notes(store: &dyn DocumentStore, owner: &str) -> Result<Vec<Note>, ApiError> {
        let mut notes = Repository::<Note>::new(store, owner).list().await?;
        // Stable sort keeps insertion order among notes on the same day
        notes.sort_by(|a, b| b.date.cmp(&a.date));
        notes.truncate(NOTES_LIMIT);
        Ok(notes)
    }

    pub async fn add_note(
        store: &dyn DocumentStore,
        owner: &str,
        note: Note,
    ) -> Result<MessageResponse, ApiError> {
        validate_required("id", &note.id).map_err(ApiError::Validation)?;
        validate_required("text", &note.text).map_err(ApiError::Validation)?;
        validate_required("type", &note.kind).map_err(ApiError::Validation)?;
        validate_date(&note.date).map_err(ApiError::Validation)?;

        Repository::new(store, owner)
            .insert(note)
            .await
            .map_err(|e| duplicate_as_conflict(e, "Note"))?;
        Ok(MessageResponse::new("Note added"))
    }

    pub async fn list_tasks(store: &dyn DocumentStore, owner: &str) -> Result<Vec<Task>, ApiError> {
        let mut tasks = Repository::<Task>::new(store, owner).list().await?;
        tasks.truncate(TASKS_LIMIT);
        Ok(tasks)
    }

    pub async fn add_task(
        store: &dyn DocumentStore,
        owner: &str,
        task: Task,
    ) -> Result<MessageResponse, ApiError> {
        validate_required("id", &task.id).map_err(ApiError::Validation)?;
        validate_required("title", &task.title).map_err(ApiError::Validation)?;
        validate_required("type", &task.kind).map_err(ApiError::Validation)?;
        validate_date(&task.date).map_err(ApiError::Validation)?;

        Repository::new(store, owner)
            .insert(task)
            .await
            .map_err(|e| duplicate_as_conflict(e, "Task"))?;
        Ok(MessageResponse::new("Task added"))
    }

    pub async fn list_subjects(
        store: &dyn DocumentStore,
        owner: &str,
    ) -> Result<Vec<Subject>, ApiError> {
        let mut subjects = Repository::<Subject>::new(store, owner).list().await?;
        subjects.truncate(SUBJECTS_LIMIT);
        Ok(subjects)
    }

    /// Create a subject with a generated `{grade}{section}-{subject}-{hex}` id
    pub async fn create_subject(
        store: &dyn DocumentStore,
        owner: &str,
        req: CreateSubjectRequest,
    ) -> Result<Subject, ApiError> {
        validate_required("grade", &req.grade).map_err(ApiError::Validation)?;
        validate_required("section", &req.section).map_err(ApiError::Validation)?;
        validate_required("subject", &req.subject).map_err(ApiError::Validation)?;

        let grade = req.grade.trim().to_string();
        let section = req.section.trim().to_string();
        let name = req.subject.trim().to_string();

        let subject = Subject {
            id: subject_id(&grade, &section, &name),
            grade,
            section,
            subject: name,
            completed_chapters: Vec::new(),
            teacher_email: Some(owner.to_string()),
        };

        Repository::new(store, owner).insert(subject.clone()).await?;
        Ok(subject)
    }

    pub async fn delete_subject(
        store: &dyn DocumentStore,
        owner: &str,
        id: &str,
    ) -> Result<MessageResponse, ApiError> {
        if !Repository::<Subject>::new(store, owner).delete(id).await? {
            return Err(subject_not_found());
        }
        Ok(MessageResponse::new("Subject deleted"))
    }

    /// Replace the completed chapter list of one of the owner's subjects
    pub async fn update_progress(
        store: &dyn DocumentStore,
        owner: &str,
        id: &str,
        completed_chapters: Vec<i32>,
    ) -> Result<MessageResponse, ApiError> {
        validate_chapters(&completed_chapters).map_err(ApiError::Validation)?;

        let repo = Repository::<Subject>::new(store, owner);
        let mut subject = repo.get(id).await?.ok_or_else(subject_not_found)?;
        subject.completed_chapters = completed_chapters;

        if !repo.replace(subject).await? {
            return Err(subject_not_found());
        }
        Ok(MessageResponse::new("Progress updated"))
    }
}

fn subject_id(grade: &str, section: &str, subject: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}{}-{}-{}",
        grade,
        section,
        subject.to_lowercase(),
        &suffix[..6]
    )
}

fn subject_not_found() -> ApiError {
    ApiError::NotFound("Subject not found or not authorized".to_string())
}

pub(crate) fn duplicate_as_conflict(err: StoreError, what: &str) -> ApiError {
    match err {
        StoreError::Duplicate { id, .. } => {
            ApiError::Conflict(format!("{} '{}' already exists", what, id))
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn note(id: &str, date: &str) -> Note {
        Note {
            id: id.to_string(),
            text: format!("note {}", id),
            date: date.to_string(),
            kind: "Observation".to_string(),
            data: None,
        }
    }

    fn subject_request() -> CreateSubjectRequest {
        CreateSubjectRequest {
            grade: "5".to_string(),
            section: "A".to_string(),
            subject: "Maths".to_string(),
        }
    }

    #[tokio::test]
    async fn test_notes_newest_first_and_capped() {
        let store = MemoryStore::new();
        for day in 1..=25 {
            let date = format!("2024-06-{:02}", day);
            DashboardService::add_note(&store, "a@x.com", note(&day.to_string(), &date))
                .await
                .unwrap();
        }

        let notes = DashboardService::list_notes(&store, "a@x.com").await.unwrap();
        assert_eq!(notes.len(), NOTES_LIMIT);
        assert_eq!(notes[0].date, "2024-06-25");
        assert_eq!(notes[19].date, "2024-06-06");
    }

    #[tokio::test]
    async fn test_note_validation_and_duplicates() {
        let store = MemoryStore::new();
        let err = DashboardService::add_note(&store, "a@x.com", note("1", "June 1st"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        DashboardService::add_note(&store, "a@x.com", note("1", "2024-06-01"))
            .await
            .unwrap();
        let err = DashboardService::add_note(&store, "a@x.com", note("1", "2024-06-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_tasks_are_owner_scoped() {
        let store = MemoryStore::new();
        let task = Task {
            id: "t1".to_string(),
            title: "Sports day".to_string(),
            date: "2024-06-10".to_string(),
            kind: "holiday".to_string(),
        };
        DashboardService::add_task(&store, "a@x.com", task.clone()).await.unwrap();

        assert_eq!(
            DashboardService::list_tasks(&store, "a@x.com").await.unwrap(),
            vec![task]
        );
        assert!(DashboardService::list_tasks(&store, "b@x.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_subject_generates_id() {
        let store = MemoryStore::new();
        let subject = DashboardService::create_subject(&store, "a@x.com", subject_request())
            .await
            .unwrap();

        assert!(subject.id.starts_with("5A-maths-"));
        assert_eq!(subject.id.len(), "5A-maths-".len() + 6);
        assert!(subject.completed_chapters.is_empty());
        assert_eq!(subject.teacher_email.as_deref(), Some("a@x.com"));
    }

    #[tokio::test]
    async fn test_create_subject_stores_trimmed_fields() {
        let store = MemoryStore::new();
        let req = CreateSubjectRequest {
            grade: " 8 ".to_string(),
            section: "B\t".to_string(),
            subject: "  Science ".to_string(),
        };
        let subject = DashboardService::create_subject(&store, "a@x.com", req)
            .await
            .unwrap();

        assert!(subject.id.starts_with("8B-science-"));
        let stored = DashboardService::list_subjects(&store, "a@x.com").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].grade, "8");
        assert_eq!(stored[0].section, "B");
        assert_eq!(stored[0].subject, "Science");
    }

    #[tokio::test]
    async fn test_progress_update_requires_ownership() {
        let store = MemoryStore::new();
        let subject = DashboardService::create_subject(&store, "a@x.com", subject_request())
            .await
            .unwrap();

        let err = DashboardService::update_progress(&store, "b@x.com", &subject.id, vec![1])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        DashboardService::update_progress(&store, "a@x.com", &subject.id, vec![1, 2, 3])
            .await
            .unwrap();
        let subjects = DashboardService::list_subjects(&store, "a@x.com").await.unwrap();
        assert_eq!(subjects[0].completed_chapters, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_delete_subject_not_owned() {
        let store = MemoryStore::new();
        let subject = DashboardService::create_subject(&store, "a@x.com", subject_request())
            .await
            .unwrap();

        let err = DashboardService::delete_subject(&store, "b@x.com", &subject.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        DashboardService::delete_subject(&store, "a@x.com", &subject.id)
            .await
            .unwrap();
        assert!(DashboardService::list_subjects(&store, "a@x.com").await.unwrap().is_empty());
    }
}
