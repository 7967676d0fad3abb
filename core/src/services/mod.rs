//! Business logic services for the Shamba farm records platform

pub mod alerts;
pub mod crops;
pub mod dairy;
pub mod dashboard;
pub mod finance;
pub mod reports;

pub use crops::CropService;
pub use dairy::DairyService;
pub use dashboard::DashboardService;
pub use finance::FinanceService;
pub use reports::ReportingService;
