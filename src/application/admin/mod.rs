pub mod chrome;
pub mod dashboard;

pub use chrome::AdminChromeService;
pub use dashboard::{AdminDashboardService, DashboardQuery};
