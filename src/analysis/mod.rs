pub mod aggregate;
pub mod chart;
pub mod integrity;
pub mod ranking;
pub mod risk;
pub mod summary;
pub mod threshold;
pub mod trend;
