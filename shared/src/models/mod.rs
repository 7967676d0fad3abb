//! Domain models for the Shamba farm records platform

mod animal;
mod breeding;
mod budget;
mod farm;
mod feed;
mod health;
mod input;
mod milk;
mod sale;
mod season;
mod transaction;

pub use animal::*;
pub use breeding::*;
pub use budget::*;
pub use farm::*;
pub use feed::*;
pub use health::*;
pub use input::*;
pub use milk::*;
pub use sale::*;
pub use season::*;
pub use transaction::*;
