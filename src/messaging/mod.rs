pub mod bus;
pub mod types;

pub use bus::CommandBus;
pub use types::Command;
