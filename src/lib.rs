#![doc = include_str!("../README.md")]

mod body;
mod compat;
mod error;
mod functions;
mod generator;
mod policy;
mod result;
mod sequence;
mod state;

pub use crate::compat::*;
pub use body::*;
pub use error::*;
pub use functions::*;
pub use generator::*;
pub use policy::*;
pub use result::*;
pub use sequence::*;
pub use state::*;

pub mod executor;
pub mod iterator;
