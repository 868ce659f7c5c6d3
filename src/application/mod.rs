//! Application layer: catalog, cart, and checkout orchestration.
//!
//! [`shop::Shop`] ties the pieces together and is the single entry point the
//! request layer calls into.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod shop;
