//! # RBAC: Role-Based Access Control
//!
//! ```text
//! SuperAdmin
//!     ├── Admin        (params, pool wasm, pause, role management)
//!     ├── Reviewer     (approves or rejects pitches)
//!     └── PoolCreator  (creates pools from approved pitches)
//! ```
//!
//! ## Storage layout
//!
//! - `RbacKey::SuperAdmin` → `Address`: the one and only super-admin.
//! - `RbacKey::Role(addr)` → `Role`   : the role held by `addr`, if any.
//!
//! ## Event emissions
//!
//! | Event topic prefix | Trigger                  |
//! |--------------------|--------------------------|
//! | `role_set`         | Role granted or replaced |
//! | `role_del`         | Role revoked             |
//!
//! ## Threat model notes
//!
//! - `Admin` cannot grant `SuperAdmin`; only `SuperAdmin` may.
//! - `SuperAdmin` cannot be removed via `revoke_role`; use `transfer_super_admin`.
//! - An address holds at most one role; granting a new role replaces the old one.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    SuperAdmin,
    Admin,
    Reviewer,
    PoolCreator,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RbacKey {
    Role(Address),
    SuperAdmin,
}

fn store_role(env: &Env, address: &Address, role: &Role) {
    env.storage()
        .persistent()
        .set(&RbacKey::Role(address.clone()), role);
}

fn clear_role(env: &Env, address: &Address) {
    env.storage()
        .persistent()
        .remove(&RbacKey::Role(address.clone()));
}

pub fn get_role(env: &Env, address: &Address) -> Option<Role> {
    env.storage()
        .persistent()
        .get(&RbacKey::Role(address.clone()))
}

pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&RbacKey::SuperAdmin)
}

// ─────────────────────────────────────────────────────────
// Initialisation
// ─────────────────────────────────────────────────────────

/// Set the initial SuperAdmin. Fails with `AlreadyInitialized` on a second call.
pub fn init_super_admin(env: &Env, super_admin: &Address) -> Result<(), Error> {
    if env.storage().persistent().has(&RbacKey::SuperAdmin) {
        return Err(Error::AlreadyInitialized);
    }
    env.storage()
        .persistent()
        .set(&RbacKey::SuperAdmin, super_admin);
    store_role(env, super_admin, &Role::SuperAdmin);
    emit(env, super_admin, &Role::SuperAdmin, None);
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Role assignment
// ─────────────────────────────────────────────────────────

/// Grant `role` to `target`, replacing any role it held.
///
/// - `SuperAdmin` may only be granted by the SuperAdmin, and only through
///   [`transfer_super_admin`], so there is never more than one.
/// - Admins and the SuperAdmin may grant every other role.
/// - The SuperAdmin cannot be demoted this way.
pub fn grant_role(env: &Env, caller: &Address, target: &Address, role: Role) -> Result<(), Error> {
    if role == Role::SuperAdmin {
        return Err(Error::NotAuthorized);
    }
    require_admin_or_above(env, caller)?;

    if get_role(env, target) == Some(Role::SuperAdmin) {
        return Err(Error::NotAuthorized);
    }

    store_role(env, target, &role);
    emit(env, target, &role, Some(caller.clone()));
    Ok(())
}

/// Revoke the role held by `target`. Fails with `RoleNotFound` if it holds none.
pub fn revoke_role(env: &Env, caller: &Address, target: &Address) -> Result<(), Error> {
    require_admin_or_above(env, caller)?;

    if get_super_admin(env).as_ref() == Some(target) {
        return Err(Error::NotAuthorized);
    }
    if get_role(env, target).is_none() {
        return Err(Error::RoleNotFound);
    }
    clear_role(env, target);
    emit_revoke(env, target, Some(caller.clone()));
    Ok(())
}

/// Hand the SuperAdmin role to `new`. The only way to remove a SuperAdmin.
pub fn transfer_super_admin(env: &Env, current: &Address, new: &Address) -> Result<(), Error> {
    require_role(env, current, &Role::SuperAdmin)?;

    clear_role(env, current);
    emit_revoke(env, current, Some(current.clone()));

    env.storage().persistent().set(&RbacKey::SuperAdmin, new);
    store_role(env, new, &Role::SuperAdmin);
    emit(env, new, &Role::SuperAdmin, Some(current.clone()));
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Access guards
// ─────────────────────────────────────────────────────────

pub fn require_role(env: &Env, address: &Address, required: &Role) -> Result<(), Error> {
    match get_role(env, address) {
        Some(ref r) if r == required => Ok(()),
        _ => Err(Error::NotAuthorized),
    }
}

pub fn require_any_of(env: &Env, address: &Address, allowed: &[Role]) -> Result<(), Error> {
    if let Some(ref r) = get_role(env, address) {
        if allowed.contains(r) {
            return Ok(());
        }
    }
    Err(Error::NotAuthorized)
}

#[inline]
pub fn require_admin_or_above(env: &Env, address: &Address) -> Result<(), Error> {
    require_any_of(env, address, &[Role::SuperAdmin, Role::Admin])
}

/// Reviewers, Admins and the SuperAdmin may review pitches.
#[inline]
pub fn require_reviewer(env: &Env, address: &Address) -> Result<(), Error> {
    require_any_of(env, address, &[Role::SuperAdmin, Role::Admin, Role::Reviewer])
}

#[inline]
pub fn require_can_create_pool(env: &Env, address: &Address) -> Result<(), Error> {
    require_any_of(env, address, &[Role::SuperAdmin, Role::Admin, Role::PoolCreator])
}

pub fn has_role(env: &Env, address: &Address, role: Role) -> bool {
    get_role(env, address).map(|r| r == role).unwrap_or(false)
}

// ─────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────

/// Topic: `(role_set, target, role_symbol)`, data: granting caller.
fn emit(env: &Env, target: &Address, role: &Role, by: Option<Address>) {
    env.events().publish(
        (symbol_short!("role_set"), target.clone(), role_to_symbol(role)),
        by,
    );
}

fn emit_revoke(env: &Env, target: &Address, by: Option<Address>) {
    env.events()
        .publish((symbol_short!("role_del"), target.clone()), by);
}

fn role_to_symbol(role: &Role) -> Symbol {
    match role {
        Role::SuperAdmin => symbol_short!("supadmin"),
        Role::Admin => symbol_short!("admin"),
        Role::Reviewer => symbol_short!("reviewer"),
        Role::PoolCreator => symbol_short!("creator"),
    }
}
