mod types;
mod error;
mod sequence;
mod thermo;
mod generator;
mod export;
mod session;

pub use types::*;
pub use error::*;
pub use sequence::*;
pub use thermo::*;
pub use generator::*;
pub use export::*;
pub use session::*;
