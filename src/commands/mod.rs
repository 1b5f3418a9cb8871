pub mod daily;
pub mod recent;
pub mod stats;

pub use daily::*;
pub use recent::*;
pub use stats::*;
