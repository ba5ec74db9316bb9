//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the protocol:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key               | Type      | Description                          |
//! |-------------------|-----------|--------------------------------------|
//! | `TribeCount`      | `u64`     | Auto-increment tribe ID counter      |
//! | `CollectibleCount`| `u64`     | Auto-increment collectible ID counter|
//! | `PostCount`       | `u64`     | Auto-increment post ID counter       |
//! | `ProfileCount`    | `u64`     | Auto-increment profile ID counter    |
//! | `PaymentToken`    | `Address` | SEP-41 token for fees and prices     |
//! | `Paused`          | `bool`    | Emergency stop flag                  |
//! | `PostCooldown`    | `u64`     | Seconds between posts of one author  |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! Tribes are split into `TribeCfg` / `TribePolicy` / `TribeState` so that
//! membership churn only rewrites the small counters entry. Everything keyed
//! by tribe, member, collectible, post or profile lives here.
//!
//! Unbounded collections (tribe members, a user's tribes, post feeds) are
//! indexed lists: a `*Len` entry plus one `*At(owner, index)` entry per
//! element, so appends, removals and page reads touch a fixed number of
//! entries however large the list grows. Removable lists also keep a
//! reverse `*Slot` index and remove by swapping the last element in.
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{
    contracttype, panic_with_error, Address, BytesN, Env, IntoVal, String, TryFromVal, Val, Vec,
};

use crate::types::{
    Collectible, InteractionKind, InviteCode, JoinPolicy, MemberPoints, MemberStatus, Post,
    Profile, Tribe, TribeConfig, TribeState,
};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

/// Default minimum number of seconds between two posts of the same author.
pub const DEFAULT_POST_COOLDOWN: u64 = 60;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    // Instance tier
    TribeCount,
    CollectibleCount,
    PostCount,
    ProfileCount,
    PaymentToken,
    Paused,
    PostCooldown,

    // Tribes
    TribeCfg(u64),
    TribePolicy(u64),
    TribeState(u64),
    /// Member status keyed by (tribe, address). Absent = `None`.
    Member(u64, Address),
    /// Active members of a tribe.
    TribeMemberLen(u64),
    TribeMemberAt(u64, u32),
    TribeMemberSlot(u64, Address),
    /// Tribes in which an address is active.
    UserTribeLen(Address),
    UserTribeAt(Address, u32),
    UserTribeSlot(Address, u64),
    /// Entry fee held by the contract while a request is pending.
    HeldFee(u64, Address),

    // Invite codes keyed by (tribe, keccak256(code))
    Invite(u64, BytesN<32>),

    // Points
    Points(u64, Address),
    ActionPoints(u64, BytesN<32>),
    ActionCount(u64, Address, BytesN<32>),
    /// Bounded, sorted `Vec<MemberPoints>` per tribe.
    Leaderboard(u64),

    // Collectibles
    Collectible(u64),
    Holding(u64, Address),

    // Posts
    Post(u64),
    TribePostLen(u64),
    TribePostAt(u64, u32),
    UserPostLen(Address),
    UserPostAt(Address, u32),
    LastPostAt(Address),
    Interacted(u64, Address, InteractionKind),
    InteractionCount(u64, InteractionKind),

    // Profiles
    Profile(u64),
    ProfileOf(Address),
    Username(String),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Atomically read and increment one of the instance ID counters.
/// Returns the ID that should be used for the next entity.
fn get_and_increment(env: &Env, key: &DataKey) -> u64 {
    bump_instance(env);
    let current: u64 = env.storage().instance().get(key).unwrap_or(0);
    env.storage().instance().set(key, &(current + 1));
    current
}

pub fn next_tribe_id(env: &Env) -> u64 {
    get_and_increment(env, &DataKey::TribeCount)
}

pub fn next_collectible_id(env: &Env) -> u64 {
    get_and_increment(env, &DataKey::CollectibleCount)
}

pub fn next_post_id(env: &Env) -> u64 {
    get_and_increment(env, &DataKey::PostCount)
}

pub fn next_profile_id(env: &Env) -> u64 {
    get_and_increment(env, &DataKey::ProfileCount)
}

pub fn tribe_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TribeCount)
        .unwrap_or(0)
}

pub fn set_payment_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::PaymentToken, token);
    bump_instance(env);
}

/// The SEP-41 token used for entry fees and collectible prices.
/// Panics with `Error::NotInitialized` before `init`.
pub fn payment_token(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::PaymentToken)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
    bump_instance(env);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_post_cooldown(env: &Env, seconds: u64) {
    env.storage().instance().set(&DataKey::PostCooldown, &seconds);
    bump_instance(env);
}

pub fn post_cooldown(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::PostCooldown)
        .unwrap_or(DEFAULT_POST_COOLDOWN)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn read<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: TryFromVal<Env, Val>,
    V::Error: core::fmt::Debug,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn write<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

fn remove(env: &Env, key: &DataKey) {
    env.storage().persistent().remove(key);
}

// ── Indexed lists ───────────────────────────────────────────────────

fn list_len(env: &Env, len_key: &DataKey) -> u32 {
    read(env, len_key).unwrap_or(0)
}

/// Append `item` and return its index.
fn list_push<T, F>(env: &Env, len_key: &DataKey, slot: F, item: &T) -> u32
where
    T: IntoVal<Env, Val>,
    F: Fn(u32) -> DataKey,
{
    let index = list_len(env, len_key);
    write(env, &slot(index), item);
    write(env, len_key, &(index + 1));
    index
}

/// Elements `[offset, offset + limit)`, clamped to the list length.
fn list_page<T, F>(env: &Env, len_key: &DataKey, slot: F, offset: u32, limit: u32) -> Vec<T>
where
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
    T::Error: core::fmt::Debug,
    F: Fn(u32) -> DataKey,
{
    let len = list_len(env, len_key);
    let start = offset.min(len);
    let end = start.saturating_add(limit).min(len);

    let mut page = Vec::new(env);
    for index in start..end {
        if let Some(item) = read(env, &slot(index)) {
            page.push_back(item);
        }
    }
    page
}

/// Remove the element at `index` by moving the last element into its slot.
/// Returns the moved element so the caller can update its reverse index.
fn list_swap_remove<T, F>(env: &Env, len_key: &DataKey, slot: F, index: u32) -> Option<T>
where
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
    T::Error: core::fmt::Debug,
    F: Fn(u32) -> DataKey,
{
    let len = list_len(env, len_key);
    if index >= len {
        return None;
    }
    let last = len - 1;
    let moved: Option<T> = if index == last {
        None
    } else {
        read(env, &slot(last))
    };
    if let Some(item) = &moved {
        write(env, &slot(index), item);
    }
    remove(env, &slot(last));
    write(env, len_key, &last);
    moved
}

// ─────────────────────────────────────────────────────────
// Tribes
// ─────────────────────────────────────────────────────────

/// Save config, policy and initial state of a newly created tribe.
pub fn save_tribe(env: &Env, tribe: &Tribe) {
    let config = TribeConfig {
        id: tribe.id,
        name: tribe.name.clone(),
        metadata_uri: tribe.metadata_uri.clone(),
        admin: tribe.admin.clone(),
        created_at: tribe.created_at,
    };
    let policy = JoinPolicy {
        join_type: tribe.join_type,
        entry_fee: tribe.entry_fee,
        nft_requirements: tribe.nft_requirements.clone(),
    };
    let state = TribeState {
        member_count: tribe.member_count,
        pending_count: tribe.pending_count,
    };

    save_tribe_config(env, &config);
    save_join_policy(env, tribe.id, &policy);
    save_tribe_state(env, tribe.id, &state);
}

/// Load the full `Tribe` by combining config, policy and state.
/// Panics with `Error::TribeNotFound` if the tribe does not exist.
pub fn load_tribe(env: &Env, id: u64) -> Tribe {
    let config = load_tribe_config(env, id);
    let policy = load_join_policy(env, id);
    let state = load_tribe_state(env, id);
    Tribe {
        id: config.id,
        name: config.name,
        metadata_uri: config.metadata_uri,
        admin: config.admin,
        join_type: policy.join_type,
        entry_fee: policy.entry_fee,
        nft_requirements: policy.nft_requirements,
        member_count: state.member_count,
        pending_count: state.pending_count,
        created_at: config.created_at,
    }
}

pub fn load_tribe_config(env: &Env, id: u64) -> TribeConfig {
    read(env, &DataKey::TribeCfg(id))
        .unwrap_or_else(|| panic_with_error!(env, Error::TribeNotFound))
}

pub fn save_tribe_config(env: &Env, config: &TribeConfig) {
    write(env, &DataKey::TribeCfg(config.id), config);
}

pub fn load_join_policy(env: &Env, id: u64) -> JoinPolicy {
    read(env, &DataKey::TribePolicy(id))
        .unwrap_or_else(|| panic_with_error!(env, Error::TribeNotFound))
}

pub fn save_join_policy(env: &Env, id: u64, policy: &JoinPolicy) {
    write(env, &DataKey::TribePolicy(id), policy);
}

pub fn load_tribe_state(env: &Env, id: u64) -> TribeState {
    read(env, &DataKey::TribeState(id))
        .unwrap_or_else(|| panic_with_error!(env, Error::TribeNotFound))
}

pub fn save_tribe_state(env: &Env, id: u64, state: &TribeState) {
    write(env, &DataKey::TribeState(id), state);
}

// ─────────────────────────────────────────────────────────
// Membership
// ─────────────────────────────────────────────────────────

pub fn get_member_status(env: &Env, tribe_id: u64, member: &Address) -> MemberStatus {
    read(env, &DataKey::Member(tribe_id, member.clone())).unwrap_or(MemberStatus::None)
}

/// Persist a member status. `None` removes the entry.
pub fn set_member_status(env: &Env, tribe_id: u64, member: &Address, status: MemberStatus) {
    let key = DataKey::Member(tribe_id, member.clone());
    if status == MemberStatus::None {
        remove(env, &key);
    } else {
        write(env, &key, &status);
    }
}

/// Page of the active members of `tribe_id`. Members are appended on join;
/// a removal moves the most recent member into the freed slot.
pub fn tribe_members_page(env: &Env, tribe_id: u64, offset: u32, limit: u32) -> Vec<Address> {
    list_page(
        env,
        &DataKey::TribeMemberLen(tribe_id),
        |i| DataKey::TribeMemberAt(tribe_id, i),
        offset,
        limit,
    )
}

pub fn add_tribe_member(env: &Env, tribe_id: u64, member: &Address) {
    let index = list_push(
        env,
        &DataKey::TribeMemberLen(tribe_id),
        |i| DataKey::TribeMemberAt(tribe_id, i),
        member,
    );
    write(env, &DataKey::TribeMemberSlot(tribe_id, member.clone()), &index);

    let index = list_push(
        env,
        &DataKey::UserTribeLen(member.clone()),
        |i| DataKey::UserTribeAt(member.clone(), i),
        &tribe_id,
    );
    write(env, &DataKey::UserTribeSlot(member.clone(), tribe_id), &index);
}

pub fn remove_tribe_member(env: &Env, tribe_id: u64, member: &Address) {
    let slot_key = DataKey::TribeMemberSlot(tribe_id, member.clone());
    if let Some(index) = read::<u32>(env, &slot_key) {
        remove(env, &slot_key);
        let moved: Option<Address> = list_swap_remove(
            env,
            &DataKey::TribeMemberLen(tribe_id),
            |i| DataKey::TribeMemberAt(tribe_id, i),
            index,
        );
        if let Some(moved) = moved {
            write(env, &DataKey::TribeMemberSlot(tribe_id, moved), &index);
        }
    }

    let slot_key = DataKey::UserTribeSlot(member.clone(), tribe_id);
    if let Some(index) = read::<u32>(env, &slot_key) {
        remove(env, &slot_key);
        let moved: Option<u64> = list_swap_remove(
            env,
            &DataKey::UserTribeLen(member.clone()),
            |i| DataKey::UserTribeAt(member.clone(), i),
            index,
        );
        if let Some(moved) = moved {
            write(env, &DataKey::UserTribeSlot(member.clone(), moved), &index);
        }
    }
}

/// Tribes in which `user` is active. Bounded by the user's own joins.
pub fn get_user_tribes(env: &Env, user: &Address) -> Vec<u64> {
    list_page(
        env,
        &DataKey::UserTribeLen(user.clone()),
        |i| DataKey::UserTribeAt(user.clone(), i),
        0,
        u32::MAX,
    )
}

pub fn hold_fee(env: &Env, tribe_id: u64, member: &Address, amount: i128) {
    write(env, &DataKey::HeldFee(tribe_id, member.clone()), &amount);
}

/// Remove and return the fee held for `member`'s pending request, if any.
pub fn take_held_fee(env: &Env, tribe_id: u64, member: &Address) -> i128 {
    let key = DataKey::HeldFee(tribe_id, member.clone());
    let amount = read(env, &key).unwrap_or(0);
    if amount != 0 {
        remove(env, &key);
    }
    amount
}

// ─────────────────────────────────────────────────────────
// Invite codes
// ─────────────────────────────────────────────────────────

pub fn get_invite(env: &Env, tribe_id: u64, code_hash: &BytesN<32>) -> Option<InviteCode> {
    read(env, &DataKey::Invite(tribe_id, code_hash.clone()))
}

pub fn save_invite(env: &Env, tribe_id: u64, code_hash: &BytesN<32>, invite: &InviteCode) {
    write(env, &DataKey::Invite(tribe_id, code_hash.clone()), invite);
}

// ─────────────────────────────────────────────────────────
// Points
// ─────────────────────────────────────────────────────────

pub fn get_points(env: &Env, tribe_id: u64, member: &Address) -> u128 {
    read(env, &DataKey::Points(tribe_id, member.clone())).unwrap_or(0)
}

pub fn set_points(env: &Env, tribe_id: u64, member: &Address, points: u128) {
    write(env, &DataKey::Points(tribe_id, member.clone()), &points);
}

pub fn get_action_points(env: &Env, tribe_id: u64, action: &BytesN<32>) -> u128 {
    read(env, &DataKey::ActionPoints(tribe_id, action.clone())).unwrap_or(0)
}

pub fn set_action_points(env: &Env, tribe_id: u64, action: &BytesN<32>, points: u128) {
    write(env, &DataKey::ActionPoints(tribe_id, action.clone()), &points);
}

pub fn get_action_count(env: &Env, tribe_id: u64, member: &Address, action: &BytesN<32>) -> u32 {
    read(env, &DataKey::ActionCount(tribe_id, member.clone(), action.clone())).unwrap_or(0)
}

pub fn set_action_count(
    env: &Env,
    tribe_id: u64,
    member: &Address,
    action: &BytesN<32>,
    count: u32,
) {
    write(
        env,
        &DataKey::ActionCount(tribe_id, member.clone(), action.clone()),
        &count,
    );
}

pub fn get_leaderboard(env: &Env, tribe_id: u64) -> Vec<MemberPoints> {
    read(env, &DataKey::Leaderboard(tribe_id)).unwrap_or_else(|| Vec::new(env))
}

pub fn set_leaderboard(env: &Env, tribe_id: u64, board: &Vec<MemberPoints>) {
    write(env, &DataKey::Leaderboard(tribe_id), board);
}

// ─────────────────────────────────────────────────────────
// Collectibles
// ─────────────────────────────────────────────────────────

pub fn get_collectible(env: &Env, id: u64) -> Option<Collectible> {
    read(env, &DataKey::Collectible(id))
}

/// Panics with `Error::CollectibleNotFound` if the collectible does not exist.
pub fn load_collectible(env: &Env, id: u64) -> Collectible {
    get_collectible(env, id).unwrap_or_else(|| panic_with_error!(env, Error::CollectibleNotFound))
}

pub fn save_collectible(env: &Env, collectible: &Collectible) {
    write(env, &DataKey::Collectible(collectible.id), collectible);
}

pub fn get_holding(env: &Env, collectible_id: u64, owner: &Address) -> u32 {
    read(env, &DataKey::Holding(collectible_id, owner.clone())).unwrap_or(0)
}

pub fn set_holding(env: &Env, collectible_id: u64, owner: &Address, balance: u32) {
    write(env, &DataKey::Holding(collectible_id, owner.clone()), &balance);
}

// ─────────────────────────────────────────────────────────
// Posts
// ─────────────────────────────────────────────────────────

/// Panics with `Error::PostNotFound` if the post does not exist.
pub fn load_post(env: &Env, id: u64) -> Post {
    read(env, &DataKey::Post(id)).unwrap_or_else(|| panic_with_error!(env, Error::PostNotFound))
}

pub fn save_post(env: &Env, post: &Post) {
    write(env, &DataKey::Post(post.id), post);
}

/// Index a newly created post under its tribe and author.
pub fn index_post(env: &Env, post: &Post) {
    let tribe_id = post.tribe_id;
    list_push(
        env,
        &DataKey::TribePostLen(tribe_id),
        |i| DataKey::TribePostAt(tribe_id, i),
        &post.id,
    );
    let author = &post.author;
    list_push(
        env,
        &DataKey::UserPostLen(author.clone()),
        |i| DataKey::UserPostAt(author.clone(), i),
        &post.id,
    );
}

pub fn tribe_posts_page(env: &Env, tribe_id: u64, offset: u32, limit: u32) -> Vec<u64> {
    list_page(
        env,
        &DataKey::TribePostLen(tribe_id),
        |i| DataKey::TribePostAt(tribe_id, i),
        offset,
        limit,
    )
}

pub fn user_posts_page(env: &Env, user: &Address, offset: u32, limit: u32) -> Vec<u64> {
    list_page(
        env,
        &DataKey::UserPostLen(user.clone()),
        |i| DataKey::UserPostAt(user.clone(), i),
        offset,
        limit,
    )
}

pub fn get_last_post_at(env: &Env, author: &Address) -> Option<u64> {
    read(env, &DataKey::LastPostAt(author.clone()))
}

pub fn set_last_post_at(env: &Env, author: &Address, timestamp: u64) {
    write(env, &DataKey::LastPostAt(author.clone()), &timestamp);
}

pub fn has_interacted(env: &Env, post_id: u64, user: &Address, kind: InteractionKind) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Interacted(post_id, user.clone(), kind))
}

/// Mark the interaction and return the new count for `(post_id, kind)`.
pub fn record_interaction(env: &Env, post_id: u64, user: &Address, kind: InteractionKind) -> u32 {
    write(env, &DataKey::Interacted(post_id, user.clone(), kind), &true);
    let count = get_interaction_count(env, post_id, kind) + 1;
    write(env, &DataKey::InteractionCount(post_id, kind), &count);
    count
}

pub fn get_interaction_count(env: &Env, post_id: u64, kind: InteractionKind) -> u32 {
    read(env, &DataKey::InteractionCount(post_id, kind)).unwrap_or(0)
}

// ─────────────────────────────────────────────────────────
// Profiles
// ─────────────────────────────────────────────────────────

pub fn get_profile(env: &Env, id: u64) -> Option<Profile> {
    read(env, &DataKey::Profile(id))
}

pub fn save_profile(env: &Env, profile: &Profile) {
    write(env, &DataKey::Profile(profile.id), profile);
}

pub fn profile_id_of(env: &Env, owner: &Address) -> Option<u64> {
    read(env, &DataKey::ProfileOf(owner.clone()))
}

pub fn profile_id_by_username(env: &Env, username: &String) -> Option<u64> {
    read(env, &DataKey::Username(username.clone()))
}

/// Claim `username` and bind `owner` to profile `id`.
pub fn register_profile_keys(env: &Env, id: u64, owner: &Address, username: &String) {
    write(env, &DataKey::ProfileOf(owner.clone()), &id);
    write(env, &DataKey::Username(username.clone()), &id);
}
