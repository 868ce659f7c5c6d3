//! Domain layer: entities, payment validation, and the storage ports the
//! application layer depends on.

pub mod cart;
pub mod payment;
pub mod ports;
pub mod product;
pub mod validation;
