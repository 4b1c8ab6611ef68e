mod departures;
mod route;
mod search;
mod trips;
pub use departures::*;
pub use route::*;
pub use search::*;
pub use trips::*;
