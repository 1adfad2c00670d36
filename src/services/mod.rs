pub mod dashboard;
pub mod inventory;
pub mod session;
pub mod transactions;

pub use dashboard::DashboardService;
pub use inventory::{InventoryFilter, InventoryService};
pub use session::SessionService;
pub use transactions::TransactionService;
