//! Record stores: the remote link API and an in-process stand-in

pub mod memory;
#[cfg(feature = "native")]
pub mod sheet;
pub mod traits;

pub use memory::*;
#[cfg(feature = "native")]
pub use sheet::*;
pub use traits::*;
