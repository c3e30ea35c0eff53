pub mod application_status;
pub mod pagination;
pub mod ranking;
pub mod revenue;

pub use application_status::ApplicationStatus;
pub use pagination::PageRequest;
pub use ranking::{CompanyMetrics, Rankings};
