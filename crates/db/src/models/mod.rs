pub mod submission;
pub mod subscriber;
