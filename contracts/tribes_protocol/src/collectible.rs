//! # Collectibles
//!
//! Capped-supply items issued by a tribe admin and claimed by members who
//! hold enough tribe points and pay the price. Balances are tracked per
//! (collectible, owner) in this contract, one unit per claimant.

use soroban_sdk::{log, panic_with_error, token, Address, Env, String};

use crate::events;
use crate::membership;
use crate::rbac;
use crate::storage;
use crate::types::Collectible;
use crate::Error;

#[allow(clippy::too_many_arguments)]
pub fn create(
    env: &Env,
    admin: &Address,
    tribe_id: u64,
    name: String,
    metadata_uri: String,
    max_supply: u32,
    price: i128,
    points_required: u128,
) -> u64 {
    rbac::require_tribe_admin(env, admin, tribe_id);

    if name.is_empty() {
        panic_with_error!(env, Error::InvalidName);
    }
    if max_supply == 0 || price < 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }

    let id = storage::next_collectible_id(env);
    let collectible = Collectible {
        id,
        tribe_id,
        name,
        metadata_uri,
        max_supply,
        current_supply: 0,
        price,
        points_required,
        is_active: true,
    };
    storage::save_collectible(env, &collectible);
    events::emit_collectible_created(env, id, tribe_id, max_supply, price, points_required);
    id
}

/// Claim one unit of `collectible_id`. Points are checked, not spent; the
/// price is transferred from `user` to the tribe admin.
pub fn claim(env: &Env, user: &Address, collectible_id: u64, payment: i128) {
    let mut collectible = storage::load_collectible(env, collectible_id);

    if !collectible.is_active {
        panic_with_error!(env, Error::CollectibleInactive);
    }
    if collectible.current_supply >= collectible.max_supply {
        panic_with_error!(env, Error::SupplyExhausted);
    }
    membership::require_active_member(env, collectible.tribe_id, user);
    if storage::get_holding(env, collectible_id, user) > 0 {
        panic_with_error!(env, Error::AlreadyClaimed);
    }

    let points = storage::get_points(env, collectible.tribe_id, user);
    if points < collectible.points_required {
        log!(env, "claim below points requirement", collectible_id, user.clone());
        panic_with_error!(env, Error::InsufficientPoints);
    }
    if payment < collectible.price {
        panic_with_error!(env, Error::InsufficientPayment);
    }
    if collectible.price > 0 {
        let admin = storage::load_tribe_config(env, collectible.tribe_id).admin;
        let token = token::Client::new(env, &storage::payment_token(env));
        token.transfer(user, &admin, &collectible.price);
    }

    collectible.current_supply += 1;
    storage::save_collectible(env, &collectible);
    storage::set_holding(env, collectible_id, user, 1);
    events::emit_collectible_claimed(env, collectible_id, user.clone(), collectible.current_supply);
}

/// One-way switch: a deactivated collectible can never be claimed again.
pub fn deactivate(env: &Env, admin: &Address, collectible_id: u64) {
    let mut collectible = storage::load_collectible(env, collectible_id);
    rbac::require_tribe_admin(env, admin, collectible.tribe_id);

    if !collectible.is_active {
        panic_with_error!(env, Error::CollectibleInactive);
    }
    collectible.is_active = false;
    storage::save_collectible(env, &collectible);
    events::emit_collectible_deactivated(env, collectible_id, admin.clone());
}

pub fn balance_of(env: &Env, owner: &Address, collectible_id: u64) -> u32 {
    storage::get_holding(env, collectible_id, owner)
}
