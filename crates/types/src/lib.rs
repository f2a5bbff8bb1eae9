//! Primitive types shared by the module account crates: coins, amounts,
//! denominations and account addresses.

pub mod address;
pub mod coin;
pub mod errors;
pub mod serializers;

pub use address::AccAddress;
pub use coin::{Coin, Coins};
pub use errors::Error;
