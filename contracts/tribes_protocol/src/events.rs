//! Event payloads and emitters.
//!
//! Every event is published as `(topic_symbol, entity_id)` with a typed
//! `#[contracttype]` payload, so indexers can filter on the entity id.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol};

use crate::types::{InteractionKind, JoinType, MemberStatus};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TribeCreated {
    pub tribe_id: u64,
    pub admin: Address,
    pub join_type: JoinType,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TribeConfigUpdated {
    pub tribe_id: u64,
    pub join_type: JoinType,
    pub entry_fee: i128,
    pub requirement_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MembershipUpdated {
    pub tribe_id: u64,
    pub member: Address,
    pub status: MemberStatus,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InviteCodeCreated {
    pub tribe_id: u64,
    pub code_hash: BytesN<32>,
    pub max_uses: u32,
    pub expiry: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InviteCodeUsed {
    pub tribe_id: u64,
    pub code_hash: BytesN<32>,
    pub member: Address,
    pub used_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PointsChanged {
    pub tribe_id: u64,
    pub member: Address,
    pub amount: u128,
    /// Action hash for awards, reason symbol for deductions.
    pub reason: PointsReason,
    pub balance: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PointsReason {
    Action(BytesN<32>),
    Deduction(Symbol),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollectibleCreated {
    pub collectible_id: u64,
    pub tribe_id: u64,
    pub max_supply: u32,
    pub price: i128,
    pub points_required: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollectibleClaimed {
    pub collectible_id: u64,
    pub owner: Address,
    pub supply: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PostCreated {
    pub post_id: u64,
    pub tribe_id: u64,
    pub author: Address,
    pub parent_id: Option<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PostInteraction {
    pub post_id: u64,
    pub user: Address,
    pub kind: InteractionKind,
    pub count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileCreated {
    pub profile_id: u64,
    pub owner: Address,
    pub username: soroban_sdk::String,
}

// ── Protocol ────────────────────────────────────────────────────────

pub fn emit_protocol_paused(env: &Env, caller: Address) {
    env.events().publish((symbol_short!("paused"),), caller);
}

pub fn emit_protocol_unpaused(env: &Env, caller: Address) {
    env.events().publish((symbol_short!("unpaused"),), caller);
}

// ── Tribes & membership ─────────────────────────────────────────────

pub fn emit_tribe_created(env: &Env, tribe_id: u64, admin: Address, join_type: JoinType) {
    let topics = (symbol_short!("tribe_new"), tribe_id);
    env.events().publish(
        topics,
        TribeCreated {
            tribe_id,
            admin,
            join_type,
        },
    );
}

pub fn emit_tribe_config_updated(
    env: &Env,
    tribe_id: u64,
    join_type: JoinType,
    entry_fee: i128,
    requirement_count: u32,
) {
    let topics = (symbol_short!("tribe_cfg"), tribe_id);
    env.events().publish(
        topics,
        TribeConfigUpdated {
            tribe_id,
            join_type,
            entry_fee,
            requirement_count,
        },
    );
}

pub fn emit_tribe_updated(env: &Env, tribe_id: u64, metadata_uri: soroban_sdk::String) {
    env.events()
        .publish((symbol_short!("tribe_upd"), tribe_id), metadata_uri);
}

pub fn emit_membership_updated(env: &Env, tribe_id: u64, member: Address, status: MemberStatus) {
    let topics = (symbol_short!("member"), tribe_id);
    env.events().publish(
        topics,
        MembershipUpdated {
            tribe_id,
            member,
            status,
        },
    );
}

// ── Invite codes ────────────────────────────────────────────────────

pub fn emit_invite_created(
    env: &Env,
    tribe_id: u64,
    code_hash: BytesN<32>,
    max_uses: u32,
    expiry: u64,
) {
    let topics = (symbol_short!("inv_new"), tribe_id);
    env.events().publish(
        topics,
        InviteCodeCreated {
            tribe_id,
            code_hash,
            max_uses,
            expiry,
        },
    );
}

pub fn emit_invite_revoked(env: &Env, tribe_id: u64, code_hash: BytesN<32>) {
    env.events()
        .publish((symbol_short!("inv_rev"), tribe_id), code_hash);
}

pub fn emit_invite_used(
    env: &Env,
    tribe_id: u64,
    code_hash: BytesN<32>,
    member: Address,
    used_count: u32,
) {
    let topics = (symbol_short!("inv_use"), tribe_id);
    env.events().publish(
        topics,
        InviteCodeUsed {
            tribe_id,
            code_hash,
            member,
            used_count,
        },
    );
}

// ── Points ──────────────────────────────────────────────────────────

pub fn emit_action_points_set(env: &Env, tribe_id: u64, action: BytesN<32>, points: u128) {
    env.events()
        .publish((symbol_short!("act_pts"), tribe_id, action), points);
}

pub fn emit_points_awarded(
    env: &Env,
    tribe_id: u64,
    member: Address,
    amount: u128,
    action: BytesN<32>,
    balance: u128,
) {
    let topics = (symbol_short!("pts_add"), tribe_id);
    env.events().publish(
        topics,
        PointsChanged {
            tribe_id,
            member,
            amount,
            reason: PointsReason::Action(action),
            balance,
        },
    );
}

pub fn emit_points_deducted(
    env: &Env,
    tribe_id: u64,
    member: Address,
    amount: u128,
    reason: Symbol,
    balance: u128,
) {
    let topics = (symbol_short!("pts_sub"), tribe_id);
    env.events().publish(
        topics,
        PointsChanged {
            tribe_id,
            member,
            amount,
            reason: PointsReason::Deduction(reason),
            balance,
        },
    );
}

// ── Collectibles ────────────────────────────────────────────────────

pub fn emit_collectible_created(
    env: &Env,
    collectible_id: u64,
    tribe_id: u64,
    max_supply: u32,
    price: i128,
    points_required: u128,
) {
    let topics = (symbol_short!("col_new"), collectible_id);
    env.events().publish(
        topics,
        CollectibleCreated {
            collectible_id,
            tribe_id,
            max_supply,
            price,
            points_required,
        },
    );
}

pub fn emit_collectible_claimed(env: &Env, collectible_id: u64, owner: Address, supply: u32) {
    let topics = (symbol_short!("col_clm"), collectible_id);
    env.events().publish(
        topics,
        CollectibleClaimed {
            collectible_id,
            owner,
            supply,
        },
    );
}

pub fn emit_collectible_deactivated(env: &Env, collectible_id: u64, by: Address) {
    env.events()
        .publish((symbol_short!("col_off"), collectible_id), by);
}

// ── Posts ───────────────────────────────────────────────────────────

pub fn emit_post_created(
    env: &Env,
    post_id: u64,
    tribe_id: u64,
    author: Address,
    parent_id: Option<u64>,
) {
    let topics = (symbol_short!("post_new"), post_id);
    env.events().publish(
        topics,
        PostCreated {
            post_id,
            tribe_id,
            author,
            parent_id,
        },
    );
}

pub fn emit_post_deleted(env: &Env, post_id: u64, by: Address) {
    env.events()
        .publish((symbol_short!("post_del"), post_id), by);
}

pub fn emit_post_interaction(
    env: &Env,
    post_id: u64,
    user: Address,
    kind: InteractionKind,
    count: u32,
) {
    let topics = (symbol_short!("interact"), post_id);
    env.events().publish(
        topics,
        PostInteraction {
            post_id,
            user,
            kind,
            count,
        },
    );
}

// ── Profiles ────────────────────────────────────────────────────────

pub fn emit_profile_created(
    env: &Env,
    profile_id: u64,
    owner: Address,
    username: soroban_sdk::String,
) {
    let topics = (symbol_short!("profile"), profile_id);
    env.events().publish(
        topics,
        ProfileCreated {
            profile_id,
            owner,
            username,
        },
    );
}

pub fn emit_profile_updated(env: &Env, profile_id: u64, metadata_uri: soroban_sdk::String) {
    env.events()
        .publish((symbol_short!("prof_upd"), profile_id), metadata_uri);
}
