//! # RBAC: protocol roles
//!
//! Protocol-wide roles sit above the per-tribe admin stored on each tribe:
//!
//! ```text
//! SuperAdmin
//!     ├── Admin       pause, cooldown settings, moderation
//!     └── Moderator   ban members in any tribe
//! ```
//!
//! Tribe administration (approving members, invite codes, points,
//! collectibles) is *not* a protocol role: it belongs to the address that
//! created the tribe and is checked by [`require_tribe_admin`].
//!
//! ## Storage layout
//!
//! - `RbacKey::SuperAdmin` → `Address`: the one and only super-admin.
//! - `RbacKey::Role(addr)` → `Role`:     the role held by `addr`, if any.
//!
//! ## Event emissions
//!
//! | Event topic prefix | Trigger |
//! |--------------------|---------|
//! | `role_set`         | Role granted or replaced |
//! | `role_del`         | Role revoked |
//!
//! An address holds **at most one role** at a time; granting a new role replaces the old one.

use soroban_sdk::{contracttype, log, panic_with_error, symbol_short, Address, Env, Symbol};

use crate::storage;
use crate::Error;

/// The set of protocol roles that can be assigned to an address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    /// Full protocol control: can grant/revoke any role and pause.
    SuperAdmin,
    /// Can grant/revoke non-SuperAdmin roles, pause and tune settings.
    Admin,
    /// Can ban members of any tribe.
    Moderator,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RbacKey {
    /// Maps an address → its current Role (if any).
    Role(Address),
    /// The one and only SuperAdmin address.
    SuperAdmin,
}

// ─────────────────────────────────────────────────────────
// Storage helpers (private)
// ─────────────────────────────────────────────────────────

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

/// Set the initial SuperAdmin. Panics with `Error::AlreadyInitialized` if
/// called again.
pub fn init_super_admin(env: &Env, super_admin: &Address) {
    if env.storage().persistent().has(&RbacKey::SuperAdmin) {
        panic_with_error!(env, Error::AlreadyInitialized);
    }
    env.storage()
        .persistent()
        .set(&RbacKey::SuperAdmin, super_admin);
    store_role(env, super_admin, &Role::SuperAdmin);
    emit(env, symbol_short!("role_set"), super_admin, &Role::SuperAdmin, None);
}

// ─────────────────────────────────────────────────────────
// Role assignment
// ─────────────────────────────────────────────────────────

/// Grant `role` to `target`.
///
/// - `caller` must hold `SuperAdmin` or `Admin`.
/// - Only `SuperAdmin` can grant `SuperAdmin`.
/// - The SuperAdmin cannot be demoted through this path.
pub fn grant_role(env: &Env, caller: &Address, target: &Address, role: Role) {
    match role {
        Role::SuperAdmin => require_role(env, caller, &Role::SuperAdmin),
        _ => require_admin_or_above(env, caller),
    }

    if let Some(Role::SuperAdmin) = get_role(env, target) {
        if role != Role::SuperAdmin {
            panic_with_error!(env, Error::NotAuthorized);
        }
    }

    store_role(env, target, &role);
    emit(env, symbol_short!("role_set"), target, &role, Some(caller.clone()));
}

/// Revoke any role from `target`. No-op if `target` holds none.
///
/// The SuperAdmin address itself cannot be revoked; use `transfer_super_admin`.
pub fn revoke_role(env: &Env, caller: &Address, target: &Address) {
    require_admin_or_above(env, caller);

    if get_super_admin(env).as_ref() == Some(target) {
        panic_with_error!(env, Error::NotAuthorized);
    }

    if get_role(env, target).is_some() {
        clear_role(env, target);
        env.events()
            .publish((symbol_short!("role_del"), target.clone()), Some(caller.clone()));
    }
}

/// Hand the SuperAdmin role to `new`. The only way to remove a SuperAdmin.
pub fn transfer_super_admin(env: &Env, current: &Address, new: &Address) {
    require_role(env, current, &Role::SuperAdmin);

    clear_role(env, current);
    env.events()
        .publish((symbol_short!("role_del"), current.clone()), Some(current.clone()));

    env.storage().persistent().set(&RbacKey::SuperAdmin, new);
    store_role(env, new, &Role::SuperAdmin);
    emit(env, symbol_short!("role_set"), new, &Role::SuperAdmin, Some(current.clone()));
}

// ─────────────────────────────────────────────────────────
// Access guards
// ─────────────────────────────────────────────────────────

/// Assert that `address` holds exactly `required_role`.
pub fn require_role(env: &Env, address: &Address, required_role: &Role) {
    match get_role(env, address) {
        Some(ref r) if r == required_role => {}
        _ => panic_with_error!(env, Error::NotAuthorized),
    }
}

/// Assert that `address` holds one of the roles in `allowed`.
pub fn require_any_of(env: &Env, address: &Address, allowed: &[Role]) {
    if let Some(ref r) = get_role(env, address) {
        if allowed.contains(r) {
            return;
        }
    }
    panic_with_error!(env, Error::NotAuthorized);
}

#[inline]
pub fn require_admin_or_above(env: &Env, address: &Address) {
    require_any_of(env, address, &[Role::SuperAdmin, Role::Admin]);
}

/// `true` if `address` may moderate every tribe.
pub fn is_moderator(env: &Env, address: &Address) -> bool {
    matches!(
        get_role(env, address),
        Some(Role::SuperAdmin) | Some(Role::Admin) | Some(Role::Moderator)
    )
}

/// Assert that `caller` administers `tribe_id`.
/// Panics with `Error::NotTribeAdmin` otherwise (or `TribeNotFound`).
pub fn require_tribe_admin(env: &Env, caller: &Address, tribe_id: u64) {
    let config = storage::load_tribe_config(env, tribe_id);
    if &config.admin != caller {
        log!(env, "not tribe admin", tribe_id, caller.clone());
        panic_with_error!(env, Error::NotTribeAdmin);
    }
}

// ─────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────

pub fn role_of(env: &Env, address: Address) -> Option<Role> {
    get_role(env, &address)
}

pub fn has_role(env: &Env, address: Address, role: Role) -> bool {
    get_role(env, &address).map(|r| r == role).unwrap_or(false)
}

// ─────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────

/// Topic: `(role_set, target_address, role_name_symbol)`
/// Data:  `Option<caller_address>`
fn emit(env: &Env, event: Symbol, target: &Address, role: &Role, by: Option<Address>) {
    env.events()
        .publish((event, target.clone(), role_to_symbol(role)), by);
}

fn role_to_symbol(role: &Role) -> Symbol {
    match role {
        Role::SuperAdmin => symbol_short!("supadmin"),
        Role::Admin => symbol_short!("admin"),
        Role::Moderator => symbol_short!("moderator"),
    }
}
