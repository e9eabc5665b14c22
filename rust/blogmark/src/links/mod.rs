pub mod classify;
pub mod annotate;

pub use classify::*;
pub use annotate::*;
