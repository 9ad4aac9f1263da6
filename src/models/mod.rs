pub mod assessment;
pub mod mood;
pub mod task;
