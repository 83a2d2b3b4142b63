//! Authentication module
//!
//! Provides JWT-based session tokens, argon2 password hashing and the
//! extractors that resolve a request to a caller identity.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, TokenSubject};
pub use middleware::{bearer_token, resolve_identity, AdminUser, AuthUser, TeacherUser};
pub use password::PasswordService;
