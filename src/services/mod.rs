pub mod clock;
pub mod daily_task;
pub mod insights;
pub mod queries;
pub mod repository;
pub mod scorer;
