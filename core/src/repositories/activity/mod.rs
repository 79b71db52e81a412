//! Activity log repository interface and mock implementation

mod mock;
mod r#trait;

pub use mock::MockActivityLogRepository;
pub use r#trait::ActivityLogRepository;
