pub mod branch_repository;
pub mod choose_us_repository;
pub mod colleague_repository;
pub mod comment_repository;
pub mod feedback_repository;
pub mod like_repository;
pub mod news_repository;
pub mod orphaned_media_repository;
pub mod user_repository;

pub use branch_repository::*;
pub use choose_us_repository::*;
pub use colleague_repository::*;
pub use comment_repository::*;
pub use feedback_repository::*;
pub use like_repository::*;
pub use news_repository::*;
pub use orphaned_media_repository::*;
pub use user_repository::*;
