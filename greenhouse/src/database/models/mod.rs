pub mod password;
pub mod user_role;

pub use password::PasswordHash as UserPassword;
pub use user_role::UserRole;

pub mod startup;
pub mod tag;
pub mod user;

pub use startup::{Id as StartupId, Startup};
pub use tag::{Id as TagId, Tag};
pub use user::{Id as UserId, User};

type Id = i32;
type BigId = i64;
