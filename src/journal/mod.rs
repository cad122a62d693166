pub mod adapter;
pub mod trade;

pub use adapter::TradeRecord;
pub use trade::{Classification, Month, Trade};
