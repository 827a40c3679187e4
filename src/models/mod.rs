pub mod input;
pub mod scrape;
pub mod sentiment;
pub mod analysis;

pub use input::*;
pub use scrape::*;
pub use sentiment::*;
pub use analysis::*;
