//! Business logic services
//!
//! Services take the document store and providers by reference and return
//! `ApiError`s, so handlers stay thin and tests run against `MemoryStore`.

pub mod admin;
pub mod assistant;
pub mod calendar;
pub mod dashboard;
pub mod feedback;
pub mod teacher;

pub use admin::AdminService;
pub use assistant::{AssistantService, ChatInput};
pub use calendar::CalendarService;
pub use dashboard::DashboardService;
pub use feedback::{AnalyzeInput, FeedbackService};
pub use teacher::TeacherService;
