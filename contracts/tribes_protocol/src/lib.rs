//! # Tribes Protocol Contract
//!
//! This is the root crate of the **Tribes** community protocol. It exposes
//! the single Soroban contract `TribesProtocol` whose entry points cover
//! the whole community lifecycle:
//!
//! | Area         | Entry Point(s)                                                        |
//! |--------------|-----------------------------------------------------------------------|
//! | Bootstrap    | [`TribesProtocol::init`]                                              |
//! | Role admin   | `grant_role`, `revoke_role`, `transfer_super_admin`, `pause`, `unpause` |
//! | Tribes       | `create_tribe`, `update_tribe`, `update_tribe_config`                 |
//! | Membership   | `join_tribe`, `request_to_join_tribe`, `join_tribe_with_code`, `approve_member`, `reject_member`, `ban_member` |
//! | Invite codes | `create_invite_code`, `revoke_invite_code`, `get_invite_code_status`  |
//! | Points       | `set_action_points`, `record_action`, `award_points`, `deduct_points`  |
//! | Collectibles | `create_collectible`, `claim_collectible`, `deactivate_collectible`   |
//! | Posts        | `create_post`, `create_reply`, `delete_post`, `interact_with_post`    |
//! | Profiles     | `create_profile`, `update_profile_metadata`                           |
//!
//! ## Architecture
//!
//! Authorization lives in [`rbac`] (protocol roles, tribe admin) and
//! [`membership`] (active-member checks). Storage access is fully delegated
//! to [`storage`]. Each feature module owns its rules; this file only
//! authenticates callers, checks the pause switch and dispatches.
//!
//! Failures surface as [`Error`] codes; [`Error::kind`] folds them into the
//! coarse classes a client reacts to.

#![no_std]

use soroban_sdk::{
    contract, contractimpl, panic_with_error, Address, Bytes, BytesN, Env, String, Symbol, Vec,
};

pub mod errors;
pub mod events;
pub mod membership;
pub mod rbac;
mod collectible;
mod invite;
mod points;
mod posts;
mod profile;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod rbac_test;
#[cfg(test)]
mod fuzz_test;
#[cfg(test)]
mod test_events;

pub use errors::{Error, ErrorKind};
pub use rbac::Role;
pub use types::{
    Collectible, InteractionKind, InviteCode, InviteCodeStatus, JoinPolicy, JoinType,
    MemberPoints, MemberStatus, NftKind, NftRequirement, Post, PostContent, Profile, Tribe,
};

#[contract]
pub struct TribesProtocol;

#[contractimpl]
impl TribesProtocol {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract, set the first SuperAdmin and the SEP-41
    /// token used for entry fees and collectible prices.
    ///
    /// Subsequent calls panic with `Error::AlreadyInitialized`.
    pub fn init(env: Env, super_admin: Address, payment_token: Address) {
        super_admin.require_auth();
        rbac::init_super_admin(&env, &super_admin);
        storage::set_payment_token(&env, &payment_token);
    }

    pub fn payment_token(env: Env) -> Address {
        storage::payment_token(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Role management
    // ─────────────────────────────────────────────────────────

    /// Grant `role` to `target`.
    ///
    /// - `caller` must hold `SuperAdmin` or `Admin`.
    /// - Only `SuperAdmin` can grant `SuperAdmin`.
    pub fn grant_role(env: Env, caller: Address, target: Address, role: Role) {
        caller.require_auth();
        rbac::grant_role(&env, &caller, &target, role);
    }

    /// Revoke any role from `target`. The SuperAdmin cannot be revoked.
    pub fn revoke_role(env: Env, caller: Address, target: Address) {
        caller.require_auth();
        rbac::revoke_role(&env, &caller, &target);
    }

    pub fn transfer_super_admin(env: Env, current_super_admin: Address, new_super_admin: Address) {
        current_super_admin.require_auth();
        rbac::transfer_super_admin(&env, &current_super_admin, &new_super_admin);
    }

    pub fn role_of(env: Env, address: Address) -> Option<Role> {
        rbac::role_of(&env, address)
    }

    pub fn has_role(env: Env, address: Address, role: Role) -> bool {
        rbac::has_role(&env, address, role)
    }

    // ─────────────────────────────────────────────────────────
    // Emergency control & settings
    // ─────────────────────────────────────────────────────────

    /// Pause the protocol, halting every state-changing community flow.
    pub fn pause(env: Env, caller: Address) {
        caller.require_auth();
        rbac::require_admin_or_above(&env, &caller);
        storage::set_paused(&env, true);
        events::emit_protocol_paused(&env, caller);
    }

    pub fn unpause(env: Env, caller: Address) {
        caller.require_auth();
        rbac::require_admin_or_above(&env, &caller);
        storage::set_paused(&env, false);
        events::emit_protocol_unpaused(&env, caller);
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    /// Set the minimum delay between two posts of the same author.
    pub fn set_post_cooldown(env: Env, caller: Address, seconds: u64) {
        caller.require_auth();
        rbac::require_admin_or_above(&env, &caller);
        storage::set_post_cooldown(&env, seconds);
    }

    pub fn post_cooldown(env: Env) -> u64 {
        storage::post_cooldown(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Tribes
    // ─────────────────────────────────────────────────────────

    /// Create a tribe. `creator` becomes its admin and first active member.
    /// Returns the new tribe id.
    pub fn create_tribe(
        env: Env,
        creator: Address,
        name: String,
        metadata_uri: String,
        join_type: JoinType,
        entry_fee: i128,
        nft_requirements: Vec<NftRequirement>,
    ) -> u64 {
        Self::require_not_paused(&env);
        creator.require_auth();
        let policy = JoinPolicy {
            join_type,
            entry_fee,
            nft_requirements,
        };
        membership::create_tribe(&env, &creator, name, metadata_uri, policy)
    }

    pub fn update_tribe(env: Env, admin: Address, tribe_id: u64, metadata_uri: String) {
        Self::require_not_paused(&env);
        admin.require_auth();
        membership::update_metadata(&env, &admin, tribe_id, metadata_uri);
    }

    /// Replace the gating policy. Memberships already granted are kept.
    pub fn update_tribe_config(
        env: Env,
        admin: Address,
        tribe_id: u64,
        join_type: JoinType,
        entry_fee: i128,
        nft_requirements: Vec<NftRequirement>,
    ) {
        Self::require_not_paused(&env);
        admin.require_auth();
        let policy = JoinPolicy {
            join_type,
            entry_fee,
            nft_requirements,
        };
        membership::update_config(&env, &admin, tribe_id, policy);
    }

    pub fn get_tribe(env: Env, tribe_id: u64) -> Tribe {
        storage::load_tribe(&env, tribe_id)
    }

    pub fn get_tribe_config_view(env: Env, tribe_id: u64) -> JoinPolicy {
        storage::load_join_policy(&env, tribe_id)
    }

    pub fn tribe_count(env: Env) -> u64 {
        storage::tribe_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Membership
    // ─────────────────────────────────────────────────────────

    /// Join a `Public` tribe, or an `NftGated` one whose requirements the
    /// user meets.
    pub fn join_tribe(env: Env, user: Address, tribe_id: u64) {
        Self::require_not_paused(&env);
        user.require_auth();
        membership::join(&env, &user, tribe_id);
    }

    /// Request to join a `Private` tribe, paying its entry fee.
    /// `payment` is the most the user agrees to pay; only the fee is charged,
    /// and it is held until the admin approves (paid out) or rejects (refunded).
    pub fn request_to_join_tribe(env: Env, user: Address, tribe_id: u64, payment: i128) {
        Self::require_not_paused(&env);
        user.require_auth();
        membership::request_to_join(&env, &user, tribe_id, payment);
    }

    /// Join an `InviteCode` / `InviteOnly` tribe with `keccak256(code)`.
    pub fn join_tribe_with_code(env: Env, user: Address, tribe_id: u64, code_hash: BytesN<32>) {
        Self::require_not_paused(&env);
        user.require_auth();
        invite::redeem(&env, &user, tribe_id, &code_hash);
    }

    pub fn approve_member(env: Env, admin: Address, tribe_id: u64, member: Address) {
        Self::require_not_paused(&env);
        admin.require_auth();
        membership::approve(&env, &admin, tribe_id, &member);
    }

    /// Reject a pending request. The address may request again.
    pub fn reject_member(env: Env, admin: Address, tribe_id: u64, member: Address) {
        Self::require_not_paused(&env);
        admin.require_auth();
        membership::reject(&env, &admin, tribe_id, &member);
    }

    /// Ban `member` for good. `caller` is the tribe admin or a protocol moderator.
    pub fn ban_member(env: Env, caller: Address, tribe_id: u64, member: Address) {
        Self::require_not_paused(&env);
        caller.require_auth();
        membership::ban(&env, &caller, tribe_id, &member);
    }

    pub fn get_member_status(env: Env, tribe_id: u64, member: Address) -> MemberStatus {
        storage::get_member_status(&env, tribe_id, &member)
    }

    /// Tribes in which `user` is currently active.
    pub fn get_user_tribes(env: Env, user: Address) -> Vec<u64> {
        storage::get_user_tribes(&env, &user)
    }

    /// Page of the active members of `tribe_id`. Members are listed in join
    /// order until a removal moves the most recent member into the gap.
    pub fn get_tribe_members(env: Env, tribe_id: u64, offset: u32, limit: u32) -> Vec<Address> {
        storage::tribe_members_page(&env, tribe_id, offset, limit)
    }

    // ─────────────────────────────────────────────────────────
    // Invite codes
    // ─────────────────────────────────────────────────────────

    /// Register `code` for `tribe_id`. Returns `keccak256(code)`, the value
    /// members pass to `join_tribe_with_code`.
    pub fn create_invite_code(
        env: Env,
        admin: Address,
        tribe_id: u64,
        code: Bytes,
        max_uses: u32,
        expiry: u64,
    ) -> BytesN<32> {
        Self::require_not_paused(&env);
        admin.require_auth();
        invite::create(&env, &admin, tribe_id, &code, max_uses, expiry)
    }

    pub fn revoke_invite_code(env: Env, admin: Address, tribe_id: u64, code: Bytes) {
        Self::require_not_paused(&env);
        admin.require_auth();
        invite::revoke(&env, &admin, tribe_id, &code);
    }

    pub fn get_invite_code_status(env: Env, tribe_id: u64, code: Bytes) -> InviteCodeStatus {
        invite::status(&env, tribe_id, &code)
    }

    // ─────────────────────────────────────────────────────────
    // Points
    // ─────────────────────────────────────────────────────────

    pub fn set_action_points(
        env: Env,
        admin: Address,
        tribe_id: u64,
        action: BytesN<32>,
        points: u128,
    ) {
        Self::require_not_paused(&env);
        admin.require_auth();
        points::set_action_points(&env, &admin, tribe_id, &action, points);
    }

    /// Credit the configured points of `action` to `member`. Returns the new balance.
    pub fn record_action(
        env: Env,
        admin: Address,
        tribe_id: u64,
        member: Address,
        action: BytesN<32>,
    ) -> u128 {
        Self::require_not_paused(&env);
        admin.require_auth();
        points::record_action(&env, &admin, tribe_id, &member, &action)
    }

    pub fn award_points(
        env: Env,
        admin: Address,
        tribe_id: u64,
        member: Address,
        amount: u128,
        action: BytesN<32>,
    ) -> u128 {
        Self::require_not_paused(&env);
        admin.require_auth();
        points::award_points(&env, &admin, tribe_id, &member, amount, &action)
    }

    pub fn deduct_points(
        env: Env,
        admin: Address,
        tribe_id: u64,
        member: Address,
        amount: u128,
        reason: Symbol,
    ) -> u128 {
        Self::require_not_paused(&env);
        admin.require_auth();
        points::deduct_points(&env, &admin, tribe_id, &member, amount, reason)
    }

    pub fn get_member_points(env: Env, tribe_id: u64, member: Address) -> u128 {
        storage::get_points(&env, tribe_id, &member)
    }

    pub fn get_action_points(env: Env, tribe_id: u64, action: BytesN<32>) -> u128 {
        storage::get_action_points(&env, tribe_id, &action)
    }

    pub fn get_action_count(env: Env, tribe_id: u64, member: Address, action: BytesN<32>) -> u32 {
        storage::get_action_count(&env, tribe_id, &member, &action)
    }

    /// Up to `limit` active members, highest points first, read from the
    /// tribe leaderboard (at most 50 rows).
    pub fn get_top_members(env: Env, tribe_id: u64, limit: u32) -> Vec<MemberPoints> {
        points::top_members(&env, tribe_id, limit)
    }

    // ─────────────────────────────────────────────────────────
    // Collectibles
    // ─────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn create_collectible(
        env: Env,
        admin: Address,
        tribe_id: u64,
        name: String,
        metadata_uri: String,
        max_supply: u32,
        price: i128,
        points_required: u128,
    ) -> u64 {
        Self::require_not_paused(&env);
        admin.require_auth();
        collectible::create(
            &env,
            &admin,
            tribe_id,
            name,
            metadata_uri,
            max_supply,
            price,
            points_required,
        )
    }

    /// Claim one unit. Requires enough tribe points (not spent) and
    /// `payment >= price`; the price is charged to `user`.
    pub fn claim_collectible(env: Env, user: Address, collectible_id: u64, payment: i128) {
        Self::require_not_paused(&env);
        user.require_auth();
        collectible::claim(&env, &user, collectible_id, payment);
    }

    pub fn deactivate_collectible(env: Env, admin: Address, collectible_id: u64) {
        Self::require_not_paused(&env);
        admin.require_auth();
        collectible::deactivate(&env, &admin, collectible_id);
    }

    pub fn get_collectible(env: Env, collectible_id: u64) -> Collectible {
        storage::load_collectible(&env, collectible_id)
    }

    pub fn balance_of(env: Env, owner: Address, collectible_id: u64) -> u32 {
        collectible::balance_of(&env, &owner, collectible_id)
    }

    // ─────────────────────────────────────────────────────────
    // Posts
    // ─────────────────────────────────────────────────────────

    /// Publish a post in `tribe_id`, optionally visible to holders of the
    /// `gate` collectible only. Returns the new post id.
    pub fn create_post(
        env: Env,
        author: Address,
        tribe_id: u64,
        content: PostContent,
        gate: Option<u64>,
    ) -> u64 {
        Self::require_not_paused(&env);
        author.require_auth();
        posts::create(&env, &author, tribe_id, content, gate)
    }

    pub fn create_reply(env: Env, author: Address, parent_id: u64, content: PostContent) -> u64 {
        Self::require_not_paused(&env);
        author.require_auth();
        posts::reply(&env, &author, parent_id, content)
    }

    pub fn delete_post(env: Env, caller: Address, post_id: u64) {
        Self::require_not_paused(&env);
        caller.require_auth();
        posts::delete(&env, &caller, post_id);
    }

    pub fn interact_with_post(
        env: Env,
        user: Address,
        post_id: u64,
        kind: InteractionKind,
    ) -> u32 {
        Self::require_not_paused(&env);
        user.require_auth();
        posts::interact(&env, &user, post_id, kind)
    }

    pub fn get_post(env: Env, post_id: u64) -> Post {
        storage::load_post(&env, post_id)
    }

    pub fn can_view_post(env: Env, viewer: Address, post_id: u64) -> bool {
        let post = storage::load_post(&env, post_id);
        posts::can_view(&env, &viewer, &post)
    }

    pub fn get_posts_by_tribe(env: Env, tribe_id: u64, offset: u32, limit: u32) -> Vec<u64> {
        storage::tribe_posts_page(&env, tribe_id, offset, limit)
    }

    pub fn get_posts_by_user(env: Env, user: Address, offset: u32, limit: u32) -> Vec<u64> {
        storage::user_posts_page(&env, &user, offset, limit)
    }

    pub fn get_interaction_count(env: Env, post_id: u64, kind: InteractionKind) -> u32 {
        storage::get_interaction_count(&env, post_id, kind)
    }

    // ─────────────────────────────────────────────────────────
    // Profiles
    // ─────────────────────────────────────────────────────────

    pub fn create_profile(env: Env, owner: Address, username: String, metadata_uri: String) -> u64 {
        Self::require_not_paused(&env);
        owner.require_auth();
        profile::create(&env, &owner, username, metadata_uri)
    }

    pub fn update_profile_metadata(env: Env, owner: Address, metadata_uri: String) {
        Self::require_not_paused(&env);
        owner.require_auth();
        profile::update_metadata(&env, &owner, metadata_uri);
    }

    pub fn get_profile(env: Env, owner: Address) -> Profile {
        profile::by_owner(&env, &owner)
    }

    pub fn get_profile_by_token_id(env: Env, profile_id: u64) -> Profile {
        profile::by_id(&env, profile_id)
    }

    pub fn get_profile_id_by_username(env: Env, username: String) -> u64 {
        profile::id_by_username(&env, &username)
    }

    pub fn is_username_available(env: Env, username: String) -> bool {
        profile::is_available(&env, &username)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn require_not_paused(env: &Env) {
        if storage::is_paused(env) {
            panic_with_error!(env, Error::ProtocolPaused);
        }
    }
}
