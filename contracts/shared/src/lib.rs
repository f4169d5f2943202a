//! # Shared
//!
//! Leaf library used by both the `pool_factory` and `funding_pool` contracts:
//!
//! - [`validation`]: stateless bound checks, one error code per rule.
//! - [`math`]: platform fee, proportional distribution, penalty split.
//! - [`types`]: the configuration types the factory hands to each pool.
//! - [`errors`]: validation and calculator error codes, mirrored by each
//!   contract's own error enum.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod constants;
pub mod errors;
pub mod interface;
pub mod math;
pub mod types;
pub mod validation;

pub use errors::Error;
pub use interface::FundingPoolClient;
pub use types::{Candidate, DisputePolicy, PoolConfig, PoolParams};
