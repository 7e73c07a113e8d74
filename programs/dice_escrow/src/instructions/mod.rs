pub mod bet;
pub mod pool;
pub mod refund;
pub mod resolve;
