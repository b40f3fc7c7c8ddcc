pub mod submission_repo;
pub mod subscriber_repo;

pub use submission_repo::SubmissionRepo;
pub use subscriber_repo::SubscriberRepo;
