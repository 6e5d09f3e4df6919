//! Block variant model: the closed set of block payloads, the block container
//! and its wire encoding.

mod block;
pub mod blocks;
mod builders;
pub(crate) mod codec;
pub mod common;

pub use block::{Block, BlockKind};
pub use blocks::*;
pub use common::*;
