mod fund;
mod holding;
pub mod number;
mod peer;
mod performance;

pub use fund::{Fund, FundId};
pub use holding::Holding;
pub use peer::{PeerComparisonData, PeerComparisonResponse};
pub use performance::{FundPerformanceData, FundPerformanceResponse};
