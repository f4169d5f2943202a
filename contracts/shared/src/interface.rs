use soroban_sdk::{contractclient, Address, Env};

use crate::types::PoolConfig;

/// The slice of the pool contract the factory calls into.
///
/// Failures come back as the pool's raw contract error codes; the pool crate
/// owns the enum that names them.
#[contractclient(name = "FundingPoolClient")]
pub trait FundingPoolInterface {
    /// Single-use setup; `caller` must be the factory the pool was deployed by.
    fn initialize(env: Env, caller: Address, config: PoolConfig) -> Result<(), soroban_sdk::Error>;
}
