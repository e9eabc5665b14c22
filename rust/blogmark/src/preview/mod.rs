pub mod card;
pub mod cache;
pub mod placement;
pub mod timer;
pub mod controller;

pub use card::*;
pub use cache::*;
pub use placement::*;
pub use timer::*;
pub use controller::*;

#[cfg(test)]
mod tests;
