//! # Membership
//!
//! Per (tribe, address) membership lifecycle. [`transition`] is the pure
//! state machine; the entry-point helpers below layer the join-type policy,
//! entry fees and NFT gating on top of it and persist the result.
//!
//! | from \ event | Join / JoinWithCode | RequestJoin    | Approve    | Reject     | Ban    |
//! |--------------|---------------------|----------------|------------|------------|--------|
//! | None         | Active              | Pending        | NotPending | NotPending | Banned |
//! | Pending      | RequestPending      | RequestPending | Active     | None       | Banned |
//! | Active       | AlreadyMember       | AlreadyMember  | NotPending | NotPending | Banned |
//! | Banned       | UserBanned          | UserBanned     | UserBanned | UserBanned | Banned |
//!
//! The status check always runs before the join-type check, so a banned
//! address gets `UserBanned` whatever the tribe's policy is.

use soroban_sdk::{
    contractclient, log, panic_with_error, token, Address, Env, String, Vec,
};

use crate::events;
use crate::points;
use crate::rbac;
use crate::storage;
use crate::types::{JoinPolicy, JoinType, MemberStatus, NftKind, NftRequirement, Tribe, TribeConfig};
use crate::Error;

/// Upper bound on `nft_requirements` per tribe.
pub const MAX_NFT_REQUIREMENTS: u32 = 10;
/// Upper bound on tribe name length, in bytes.
pub const MAX_NAME_LEN: u32 = 64;

/// Interface of the non-fungible collections used for gating.
#[contractclient(name = "NftClient")]
pub trait NonFungibleToken {
    fn balance(env: Env, owner: Address) -> u32;
    fn owner_of(env: Env, token_id: u32) -> Address;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MembershipEvent {
    Join,
    RequestJoin,
    JoinWithCode,
    Approve,
    Reject,
    Ban,
}

/// Next status of a member, or the error the transition fails with.
pub fn transition(current: MemberStatus, event: MembershipEvent) -> Result<MemberStatus, Error> {
    use MemberStatus as S;
    use MembershipEvent as E;

    match (current, event) {
        (_, E::Ban) => Ok(S::Banned),
        (S::Banned, _) => Err(Error::UserBanned),

        (S::None, E::Join | E::JoinWithCode) => Ok(S::Active),
        (S::None, E::RequestJoin) => Ok(S::Pending),
        (S::Pending, E::Join | E::JoinWithCode | E::RequestJoin) => Err(Error::RequestPending),
        (S::Active, E::Join | E::JoinWithCode | E::RequestJoin) => Err(Error::AlreadyMember),

        (S::Pending, E::Approve) => Ok(S::Active),
        (S::Pending, E::Reject) => Ok(S::None),
        (S::None | S::Active, E::Approve | E::Reject) => Err(Error::NotPending),
    }
}

/// Whether `join_type` admits `event` at all. Admin-driven events are always admitted.
pub fn admits(join_type: JoinType, event: MembershipEvent) -> bool {
    match event {
        MembershipEvent::Join => matches!(join_type, JoinType::Public | JoinType::NftGated),
        MembershipEvent::RequestJoin => join_type == JoinType::Private,
        MembershipEvent::JoinWithCode => {
            matches!(join_type, JoinType::InviteCode | JoinType::InviteOnly)
        }
        MembershipEvent::Approve | MembershipEvent::Reject | MembershipEvent::Ban => true,
    }
}

// ─────────────────────────────────────────────────────────
// Tribe lifecycle
// ─────────────────────────────────────────────────────────

/// Create a tribe administered by `creator`, who also becomes its first
/// active member. Returns the new tribe id.
pub fn create_tribe(
    env: &Env,
    creator: &Address,
    name: String,
    metadata_uri: String,
    policy: JoinPolicy,
) -> u64 {
    validate_name(env, &name);
    validate_policy(env, &policy);

    let id = storage::next_tribe_id(env);
    let tribe = Tribe {
        id,
        name,
        metadata_uri,
        admin: creator.clone(),
        join_type: policy.join_type,
        entry_fee: policy.entry_fee,
        nft_requirements: policy.nft_requirements,
        member_count: 0,
        pending_count: 0,
        created_at: env.ledger().timestamp(),
    };
    storage::save_tribe(env, &tribe);
    events::emit_tribe_created(env, id, creator.clone(), tribe.join_type);

    apply(env, id, creator, MemberStatus::None, MemberStatus::Active);
    id
}

/// Replace the gating policy of a tribe. Existing memberships are untouched.
pub fn update_config(env: &Env, admin: &Address, tribe_id: u64, policy: JoinPolicy) {
    rbac::require_tribe_admin(env, admin, tribe_id);
    validate_policy(env, &policy);

    storage::save_join_policy(env, tribe_id, &policy);
    events::emit_tribe_config_updated(
        env,
        tribe_id,
        policy.join_type,
        policy.entry_fee,
        policy.nft_requirements.len(),
    );
}

pub fn update_metadata(env: &Env, admin: &Address, tribe_id: u64, metadata_uri: String) {
    rbac::require_tribe_admin(env, admin, tribe_id);
    let mut config: TribeConfig = storage::load_tribe_config(env, tribe_id);
    config.metadata_uri = metadata_uri.clone();
    storage::save_tribe_config(env, &config);
    events::emit_tribe_updated(env, tribe_id, metadata_uri);
}

// ─────────────────────────────────────────────────────────
// Joining
// ─────────────────────────────────────────────────────────

pub fn join(env: &Env, user: &Address, tribe_id: u64) {
    let policy = storage::load_join_policy(env, tribe_id);
    let (from, to) = advance(env, tribe_id, user, policy.join_type, MembershipEvent::Join);

    if policy.join_type == JoinType::NftGated
        && !requirements_met(env, user, &policy.nft_requirements)
    {
        log!(env, "nft requirements not met", tribe_id, user.clone());
        panic_with_error!(env, Error::NftRequirementsNotMet);
    }

    apply(env, tribe_id, user, from, to);
}

/// Ask to join a `Private` tribe. The entry fee is held by the contract until
/// the request is decided: approval pays it to the tribe admin, rejection or
/// a ban refunds it.
pub fn request_to_join(env: &Env, user: &Address, tribe_id: u64, payment: i128) {
    let policy = storage::load_join_policy(env, tribe_id);
    let (from, to) = advance(
        env,
        tribe_id,
        user,
        policy.join_type,
        MembershipEvent::RequestJoin,
    );

    if payment < policy.entry_fee {
        panic_with_error!(env, Error::InsufficientEntryFee);
    }
    if policy.entry_fee > 0 {
        let token = token::Client::new(env, &storage::payment_token(env));
        token.transfer(user, &env.current_contract_address(), &policy.entry_fee);
        storage::hold_fee(env, tribe_id, user, policy.entry_fee);
    }

    apply(env, tribe_id, user, from, to);
}

/// Join an invite-code tribe. The caller has already consumed a valid code.
pub fn join_with_code(env: &Env, user: &Address, tribe_id: u64) -> (MemberStatus, MemberStatus) {
    let policy = storage::load_join_policy(env, tribe_id);
    advance(
        env,
        tribe_id,
        user,
        policy.join_type,
        MembershipEvent::JoinWithCode,
    )
}

// ─────────────────────────────────────────────────────────
// Admin decisions
// ─────────────────────────────────────────────────────────

pub fn approve(env: &Env, admin: &Address, tribe_id: u64, member: &Address) {
    rbac::require_tribe_admin(env, admin, tribe_id);
    decide(env, tribe_id, member, MembershipEvent::Approve);
    release_held_fee(env, tribe_id, member, admin);
}

pub fn reject(env: &Env, admin: &Address, tribe_id: u64, member: &Address) {
    rbac::require_tribe_admin(env, admin, tribe_id);
    decide(env, tribe_id, member, MembershipEvent::Reject);
    release_held_fee(env, tribe_id, member, member);
}

/// Ban `member`. Allowed for the tribe admin and protocol moderators.
/// The tribe admin itself cannot be banned.
pub fn ban(env: &Env, caller: &Address, tribe_id: u64, member: &Address) {
    let config = storage::load_tribe_config(env, tribe_id);
    if &config.admin != caller && !rbac::is_moderator(env, caller) {
        panic_with_error!(env, Error::NotTribeAdmin);
    }
    if &config.admin == member {
        panic_with_error!(env, Error::NotAuthorized);
    }
    decide(env, tribe_id, member, MembershipEvent::Ban);
    release_held_fee(env, tribe_id, member, member);
}

/// Pay out the fee held for `member`'s request, if any, to `to`.
fn release_held_fee(env: &Env, tribe_id: u64, member: &Address, to: &Address) {
    let held = storage::take_held_fee(env, tribe_id, member);
    if held > 0 {
        let token = token::Client::new(env, &storage::payment_token(env));
        token.transfer(&env.current_contract_address(), to, &held);
    }
}

fn decide(env: &Env, tribe_id: u64, member: &Address, event: MembershipEvent) {
    let from = storage::get_member_status(env, tribe_id, member);
    let to = transition(from, event).unwrap_or_else(|e| panic_with_error!(env, e));
    apply(env, tribe_id, member, from, to);
}

// ─────────────────────────────────────────────────────────
// Guards
// ─────────────────────────────────────────────────────────

/// Panics with `Error::NotActiveMember` unless `member` is active in `tribe_id`.
pub fn require_active_member(env: &Env, tribe_id: u64, member: &Address) {
    if storage::get_member_status(env, tribe_id, member) != MemberStatus::Active {
        panic_with_error!(env, Error::NotActiveMember);
    }
}

pub fn is_active_member(env: &Env, tribe_id: u64, member: &Address) -> bool {
    storage::get_member_status(env, tribe_id, member) == MemberStatus::Active
}

// ─────────────────────────────────────────────────────────
// NFT gating
// ─────────────────────────────────────────────────────────

/// Every mandatory requirement must hold; when optional requirements exist,
/// at least one of them must hold as well.
pub fn requirements_met(env: &Env, user: &Address, requirements: &Vec<NftRequirement>) -> bool {
    let mut has_optional = false;
    let mut optional_met = false;

    for requirement in requirements.iter() {
        if requirement.mandatory {
            if !requirement_met(env, user, &requirement) {
                return false;
            }
        } else if !optional_met {
            has_optional = true;
            optional_met = requirement_met(env, user, &requirement);
        }
    }

    !has_optional || optional_met
}

fn requirement_met(env: &Env, user: &Address, requirement: &NftRequirement) -> bool {
    let min_amount = requirement.min_amount.max(1);
    match requirement.kind {
        NftKind::Fungible => {
            let balance = token::Client::new(env, &requirement.contract).balance(user);
            balance >= min_amount as i128
        }
        NftKind::NonFungible => {
            let client = NftClient::new(env, &requirement.contract);
            if requirement.token_ids.is_empty() {
                client.balance(user) >= min_amount
            } else {
                requirement
                    .token_ids
                    .iter()
                    .any(|token_id| matches!(client.try_owner_of(&token_id), Ok(Ok(owner)) if owner == *user))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────

/// Run the state machine for a self-service join and check the join type.
fn advance(
    env: &Env,
    tribe_id: u64,
    user: &Address,
    join_type: JoinType,
    event: MembershipEvent,
) -> (MemberStatus, MemberStatus) {
    let from = storage::get_member_status(env, tribe_id, user);
    let to = transition(from, event).unwrap_or_else(|e| panic_with_error!(env, e));
    if !admits(join_type, event) {
        panic_with_error!(env, Error::InvalidJoinType);
    }
    (from, to)
}

/// Persist `from → to`, keep counters and member indexes in step and emit
/// `MembershipUpdated`.
pub fn apply(env: &Env, tribe_id: u64, member: &Address, from: MemberStatus, to: MemberStatus) {
    if from == to {
        return;
    }

    let mut state = storage::load_tribe_state(env, tribe_id);
    match from {
        MemberStatus::Active => {
            state.member_count -= 1;
            storage::remove_tribe_member(env, tribe_id, member);
            points::unrank(env, tribe_id, member);
        }
        MemberStatus::Pending => state.pending_count -= 1,
        MemberStatus::None | MemberStatus::Banned => {}
    }
    match to {
        MemberStatus::Active => {
            state.member_count += 1;
            storage::add_tribe_member(env, tribe_id, member);
            let balance = storage::get_points(env, tribe_id, member);
            points::rank(env, tribe_id, member, balance);
        }
        MemberStatus::Pending => state.pending_count += 1,
        MemberStatus::None | MemberStatus::Banned => {}
    }
    storage::save_tribe_state(env, tribe_id, &state);
    storage::set_member_status(env, tribe_id, member, to);

    events::emit_membership_updated(env, tribe_id, member.clone(), to);
}

fn validate_name(env: &Env, name: &String) {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        panic_with_error!(env, Error::InvalidName);
    }
}

fn validate_policy(env: &Env, policy: &JoinPolicy) {
    if policy.entry_fee < 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }
    let count = policy.nft_requirements.len();
    if count > MAX_NFT_REQUIREMENTS {
        panic_with_error!(env, Error::InvalidRequirements);
    }
    if policy.join_type == JoinType::NftGated && count == 0 {
        panic_with_error!(env, Error::InvalidRequirements);
    }
}
