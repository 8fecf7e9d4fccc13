pub mod ids;
pub mod membership;
pub mod tally;
pub mod report;

pub use ids::*;
pub use membership::*;
pub use tally::*;
pub use report::*;
