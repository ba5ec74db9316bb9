//! # Types
//!
//! Shared data structures used across all modules of the Tribes protocol.
//!
//! ## Design decisions
//!
//! ### Config / Policy / State split
//!
//! A `Tribe` is internally stored as three separate ledger entries:
//!
//! - [`TribeConfig`]: written once at creation (metadata URI aside).
//! - [`JoinPolicy`]:  rewritten by `update_tribe_config`.
//! - [`TribeState`]:  written on every membership change.
//!
//! The public API exposes the reconstructed [`Tribe`] struct for convenience.
//!
//! ### Membership as a Finite-State Machine
//!
//! [`MemberStatus`] follows the lifecycle enforced in [`crate::membership`]:
//!
//! ```text
//! None ──► Pending ──► Active
//!   │         │
//!   │         └──► None   (rejected, may re-request)
//!   └──────────────► Active
//! any ──► Banned          (absorbing)
//! ```

use soroban_sdk::{contracttype, Address, String, Vec};

/// Policy controlling how an address becomes an active member of a tribe.
///
/// Discriminants are part of the public interface and are not contiguous.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JoinType {
    /// Anyone not banned may join directly.
    Public = 0,
    /// Members request to join (paying the entry fee) and wait for approval.
    Private = 1,
    /// Joining requires an invite code handed out by the admin.
    InviteOnly = 2,
    /// Anyone holding the configured NFTs / tokens may join directly.
    NftGated = 3,
    /// Joining requires a shared, usage-bounded invite code.
    InviteCode = 6,
}

/// Membership status of an address within one tribe.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MemberStatus {
    None = 0,
    Active = 1,
    Pending = 2,
    /// Terminal. No entry point moves an address out of `Banned`.
    Banned = 3,
}

/// Token standard queried when checking an [`NftRequirement`].
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NftKind {
    /// SEP-41 token: `balance(id) -> i128`.
    Fungible = 0,
    /// Non-fungible token: `balance(owner) -> u32`, `owner_of(token_id) -> Address`.
    NonFungible = 1,
}

/// One holding condition used to gate `join_tribe` on `NftGated` tribes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NftRequirement {
    pub contract: Address,
    pub kind: NftKind,
    /// Mandatory requirements must all hold; optional ones need at least one.
    pub mandatory: bool,
    /// Minimum balance. Zero is treated as one.
    pub min_amount: u32,
    /// For `NonFungible`: owning any of these ids satisfies the requirement.
    /// Empty means any token of the collection counts.
    pub token_ids: Vec<u32>,
}

/// Tribe identity, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TribeConfig {
    pub id: u64,
    pub name: String,
    pub metadata_uri: String,
    pub admin: Address,
    pub created_at: u64,
}

/// Gating policy of a tribe. Returned by `get_tribe_config_view`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JoinPolicy {
    pub join_type: JoinType,
    /// Payment-token units charged on `request_to_join_tribe`. Only `Private`
    /// tribes charge it.
    pub entry_fee: i128,
    pub nft_requirements: Vec<NftRequirement>,
}

/// Mutable counters of a tribe.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TribeState {
    pub member_count: u32,
    pub pending_count: u32,
}

/// Full representation of a tribe, reconstructed from the split entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tribe {
    /// Auto-incremented unique ID.
    pub id: u64,
    pub name: String,
    /// Opaque JSON blob location (IPFS, HTTPS, ...).
    pub metadata_uri: String,
    pub admin: Address,
    pub join_type: JoinType,
    pub entry_fee: i128,
    pub nft_requirements: Vec<NftRequirement>,
    pub member_count: u32,
    pub pending_count: u32,
    pub created_at: u64,
}

/// A usage-bounded, optionally expiring invite code.
///
/// Stored under the keccak256 hash of the plain code; the plain code never
/// touches the ledger.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InviteCode {
    pub max_uses: u32,
    pub used_count: u32,
    /// Ledger timestamp after which the code is expired. `0` = never.
    pub expiry: u64,
    pub revoked: bool,
}

/// Answer of `get_invite_code_status`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InviteCodeStatus {
    pub valid: bool,
    pub remaining_uses: u32,
}

/// A capped-supply, price- and points-gated collectible issued by a tribe.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collectible {
    pub id: u64,
    pub tribe_id: u64,
    pub name: String,
    pub metadata_uri: String,
    pub max_supply: u32,
    /// Monotonic, never above `max_supply`.
    pub current_supply: u32,
    /// Payment-token units.
    pub price: i128,
    /// Minimum tribe points needed to claim. Points are not spent.
    pub points_required: u128,
    /// One-way: `true` until `deactivate_collectible`.
    pub is_active: bool,
}

/// Leaderboard row returned by `get_top_members`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberPoints {
    pub member: Address,
    pub points: u128,
}

/// Body of a post, discriminated by kind.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PostContent {
    Text(String),
    /// `(uri, caption)`; the caption may be empty.
    Media(String, String),
    /// `(title, starts_at)`; must start in the future when posted.
    Event(String, u64),
    Link(String),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Post {
    pub id: u64,
    pub tribe_id: u64,
    pub author: Address,
    pub content: PostContent,
    /// Set for replies.
    pub parent_id: Option<u64>,
    /// Collectible whose holders (plus author and tribe admin) may view the post.
    pub gate: Option<u64>,
    pub created_at: u64,
    pub deleted: bool,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InteractionKind {
    Like = 0,
    Share = 1,
    Report = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Profile {
    pub id: u64,
    pub owner: Address,
    pub username: String,
    pub metadata_uri: String,
    pub created_at: u64,
}
