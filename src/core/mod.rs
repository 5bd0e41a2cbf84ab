pub mod services;
pub mod session;
pub mod time;

pub use session::BudgetSession;
pub use time::{Clock, FixedClock, SystemClock};
