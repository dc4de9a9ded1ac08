pub mod listing;
pub mod log;
pub mod rank;
pub mod series;

pub use listing::*;
pub use log::*;
pub use rank::*;
pub use series::*;
