//! Adapters between the outside world and the [`Shop`](crate::application::shop::Shop).

pub mod api;
pub mod csv;
pub mod jsonl;
