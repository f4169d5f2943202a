//! # RBAC: per-pool role table
//!
//! ```text
//! Factory   (fixed at construction, may only call `initialize`)
//! PoolAdmin (ends voting, manages approvers, resolves disputes)
//! Approver  (signs off on completed milestones, may raise disputes)
//! ```
//!
//! - `RbacKey::Role(addr)` → `PoolRole`: the role held by `addr`, if any.
//!
//! An address holds at most one role; the admin is seeded last at
//! initialization, so an admin listed among the approvers stays admin.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::errors::Error;
use crate::storage;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PoolRole {
    PoolAdmin,
    Approver,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RbacKey {
    Role(Address),
}

fn store_role(env: &Env, address: &Address, role: &PoolRole) {
    env.storage()
        .persistent()
        .set(&RbacKey::Role(address.clone()), role);
}

fn clear_role(env: &Env, address: &Address) {
    env.storage()
        .persistent()
        .remove(&RbacKey::Role(address.clone()));
}

pub fn get_role(env: &Env, address: &Address) -> Option<PoolRole> {
    env.storage()
        .persistent()
        .get(&RbacKey::Role(address.clone()))
}

/// Seed the table from the pool config. Called once from `initialize`.
pub fn init_roles(env: &Env, admin: &Address, approvers: &Vec<Address>) {
    for approver in approvers.iter() {
        store_role(env, &approver, &PoolRole::Approver);
        emit(env, symbol_short!("role_set"), &approver, &PoolRole::Approver);
    }
    store_role(env, admin, &PoolRole::PoolAdmin);
    emit(env, symbol_short!("role_set"), admin, &PoolRole::PoolAdmin);
}

/// Grant `Approver` to `target`. Caller must be the pool admin.
pub fn grant_approver(env: &Env, caller: &Address, target: &Address) -> Result<(), Error> {
    require_admin(env, caller)?;
    if get_role(env, target) == Some(PoolRole::PoolAdmin) {
        return Err(Error::NotAuthorized);
    }
    store_role(env, target, &PoolRole::Approver);
    emit(env, symbol_short!("role_set"), target, &PoolRole::Approver);
    Ok(())
}

/// Remove `Approver` from `target`. Approvals already recorded stay counted.
pub fn revoke_approver(env: &Env, caller: &Address, target: &Address) -> Result<(), Error> {
    require_admin(env, caller)?;
    match get_role(env, target) {
        Some(PoolRole::Approver) => {
            clear_role(env, target);
            env.events()
                .publish((symbol_short!("role_del"), target.clone()), caller.clone());
            Ok(())
        }
        _ => Err(Error::RoleNotFound),
    }
}

/// `caller` must be the factory that deployed this pool.
pub fn require_factory(env: &Env, caller: &Address) -> Result<(), Error> {
    if storage::get_factory(env)? != *caller {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

pub fn require_role(env: &Env, address: &Address, required: &PoolRole) -> Result<(), Error> {
    match get_role(env, address) {
        Some(ref r) if r == required => Ok(()),
        _ => Err(Error::NotAuthorized),
    }
}

pub fn require_any_of(env: &Env, address: &Address, allowed: &[PoolRole]) -> Result<(), Error> {
    if let Some(ref r) = get_role(env, address) {
        if allowed.contains(r) {
            return Ok(());
        }
    }
    Err(Error::NotAuthorized)
}

#[inline]
pub fn require_admin(env: &Env, address: &Address) -> Result<(), Error> {
    require_role(env, address, &PoolRole::PoolAdmin)
}

#[inline]
pub fn require_approver(env: &Env, address: &Address) -> Result<(), Error> {
    require_role(env, address, &PoolRole::Approver)
}

pub fn has_role(env: &Env, address: &Address, role: PoolRole) -> bool {
    get_role(env, address).map(|r| r == role).unwrap_or(false)
}

/// Topic: `(role_set, target, role_symbol)`.
fn emit(env: &Env, event: Symbol, target: &Address, role: &PoolRole) {
    let role_sym = match role {
        PoolRole::PoolAdmin => symbol_short!("admin"),
        PoolRole::Approver => symbol_short!("approver"),
    };
    env.events().publish((event, target.clone(), role_sym), ());
}
