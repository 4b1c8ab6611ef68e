mod departure;
mod state;
mod stop;
mod trip;
pub use departure::*;
pub use state::*;
pub use stop::*;
pub use trip::*;
