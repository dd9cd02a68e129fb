#![allow(
    clippy::cast_lossless, // u32 -> u64
    clippy::cast_possible_truncation, // u64 -> u32
    clippy::future_not_send,
    clippy::missing_trait_methods,
    clippy::module_name_repetitions,
    async_fn_in_trait,
)]

pub mod cleaner;
pub mod config;
pub mod error;
pub mod extract;
pub mod notify;
pub mod proxy;
pub mod schedule;
pub mod scrape;
pub mod util;
