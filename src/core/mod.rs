pub mod client;
pub mod wire;

pub use crate::domain::model::{Company, ComputerModel};
pub use crate::domain::ports::{ComputerDatabase, ConfigProvider};
pub use crate::utils::error::Result;
