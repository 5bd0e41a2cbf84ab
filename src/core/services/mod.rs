pub mod allocation_service;
pub mod goal_service;
pub mod summary_service;

pub use allocation_service::{weight, Allocation, AllocationService, BUCKET_WEIGHTS};
pub use goal_service::{GoalProgress, GoalService};
pub use summary_service::{BucketAllocation, PeriodReport, SummaryService};
