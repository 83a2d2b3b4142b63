//! Calendar reminders

use crate::error::ApiError;
use crate::repositories::Repository;
use crate::store::DocumentStore;
use assist_ai_shared::validation::{validate_date, validate_required, validate_time};
use assist_ai_shared::{CreateReminderRequest, MessageResponse, Reminder};
use uuid::Uuid;

pub const REMINDERS_LIMIT: usize = 100;

pub struct CalendarService;

impl CalendarService {
    pub async fn list_reminders(
        store: &dyn DocumentStore,
        owner: &str,
    ) -> Result<Vec<Reminder>, ApiError> {
        let mut reminders = Repository::<Reminder>::new(store, owner).list().await?;
        reminders.truncate(REMINDERS_LIMIT);
        Ok(reminders)
    }

    pub async fn add_reminder(
        store: &dyn DocumentStore,
        owner: &str,
        req: CreateReminderRequest,
    ) -> Result<Reminder, ApiError> {
        validate_date(&req.date).map_err(ApiError::Validation)?;
        if let Some(time) = req.time.as_deref().filter(|t| !t.is_empty()) {
            validate_time(time).map_err(ApiError::Validation)?;
        }
        validate_required("text", &req.text).map_err(ApiError::Validation)?;

        let reminder = Reminder {
            id: Uuid::new_v4().simple().to_string(),
            date: req.date,
            time: req.time.filter(|t| !t.is_empty()),
            text: req.text,
            teacher_email: Some(owner.to_string()),
        };

        Repository::new(store, owner).insert(reminder.clone()).await?;
        Ok(reminder)
    }

    pub async fn delete_reminder(
        store: &dyn DocumentStore,
        owner: &str,
        id: &str,
    ) -> Result<MessageResponse, ApiError> {
        if !Repository::<Reminder>::new(store, owner).delete(id).await? {
            return Err(ApiError::NotFound("Reminder not found".to_string()));
        }
        Ok(MessageResponse::new("Deleted"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rstest::rstest;

    fn request(date: &str, time: Option<&str>, text: &str) -> CreateReminderRequest {
        CreateReminderRequest {
            date: date.to_string(),
            time: time.map(str::to_string),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_list_reminder() {
        let store = MemoryStore::new();
        let reminder = CalendarService::add_reminder(
            &store,
            "a@x.com",
            request("2024-06-12", Some("09:30"), "Parent meeting"),
        )
        .await
        .unwrap();

        assert_eq!(reminder.id.len(), 32);
        assert!(reminder.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(
            CalendarService::list_reminders(&store, "a@x.com").await.unwrap(),
            vec![reminder]
        );
    }

    #[rstest]
    #[case(request("12/06/2024", None, "x"))]
    #[case(request("2024-06-12", Some("9.30am"), "x"))]
    #[case(request("2024-06-12", None, "   "))]
    #[tokio::test]
    async fn test_invalid_reminders_rejected(#[case] req: CreateReminderRequest) {
        let store = MemoryStore::new();
        let err = CalendarService::add_reminder(&store, "a@x.com", req).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_other_owners_reminder_not_found() {
        let store = MemoryStore::new();
        let reminder =
            CalendarService::add_reminder(&store, "a@x.com", request("2024-06-12", None, "Exam"))
                .await
                .unwrap();

        let err = CalendarService::delete_reminder(&store, "b@x.com", &reminder.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        CalendarService::delete_reminder(&store, "a@x.com", &reminder.id)
            .await
            .unwrap();
    }
}
