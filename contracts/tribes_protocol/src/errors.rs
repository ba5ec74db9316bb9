//! # Errors
//!
//! Every guard in the contract fails with a variant of [`Error`]. Codes are
//! grouped by concern in blocks of ten and are stable: off-chain callers
//! decode them from `Error(Contract, #n)` instead of matching revert text.
//!
//! [`ErrorKind`] folds the codes into the coarse classes a wallet UI acts on
//! (show a toast, prompt for funds, ask to wait, ...).

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ── Protocol (1-9) ───────────────────────────────────
    AlreadyInitialized = 1,
    NotInitialized = 2,
    ProtocolPaused = 3,

    // ── Authorization (10-19) ────────────────────────────
    /// Caller lacks the required protocol role.
    NotAuthorized = 10,
    NotTribeAdmin = 11,
    NotActiveMember = 12,
    UserBanned = 13,

    // ── Tribes & membership (20-29) ──────────────────────
    TribeNotFound = 20,
    /// Tribe not public or requires invite code.
    InvalidJoinType = 21,
    NftRequirementsNotMet = 22,
    InsufficientEntryFee = 23,
    AlreadyMember = 24,
    RequestPending = 25,
    NotPending = 26,
    InvalidRequirements = 27,
    InvalidName = 28,

    // ── Invite codes (30-39) ─────────────────────────────
    InvalidInviteCode = 30,
    InviteCodeExpired = 31,
    InviteCodeExists = 32,
    InvalidExpiry = 33,

    // ── Points (40-49) ───────────────────────────────────
    InsufficientPoints = 40,
    InvalidAmount = 41,
    Overflow = 42,

    // ── Collectibles (50-59) ─────────────────────────────
    CollectibleNotFound = 50,
    CollectibleInactive = 51,
    SupplyExhausted = 52,
    InsufficientPayment = 53,
    AlreadyClaimed = 54,
    InvalidGate = 55,

    // ── Posts (60-69) ────────────────────────────────────
    PostNotFound = 60,
    CooldownActive = 61,
    InvalidContent = 62,
    PostDeleted = 63,
    AlreadyInteracted = 64,
    CannotViewPost = 65,

    // ── Profiles (70-79) ─────────────────────────────────
    ProfileNotFound = 70,
    ProfileExists = 71,
    UsernameTaken = 72,
    InvalidUsername = 73,
}

/// Coarse classification of [`Error`] for client-side handling.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Generic on-chain rejection.
    Contract,
    /// Contract not reachable or not set up yet.
    Connection,
    /// Malformed input that a client could have rejected before submitting.
    Validation,
    InsufficientFunds,
    /// Role or membership precondition not met.
    Unauthorized,
    CooldownActive,
    AlreadyExists,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            NotInitialized => ErrorKind::Connection,

            InvalidRequirements | InvalidName | InvalidExpiry | InvalidAmount
            | InvalidContent | InvalidUsername | InvalidGate => ErrorKind::Validation,

            InsufficientEntryFee | InsufficientPayment | InsufficientPoints => {
                ErrorKind::InsufficientFunds
            }

            NotAuthorized | NotTribeAdmin | NotActiveMember | UserBanned
            | NftRequirementsNotMet | CannotViewPost => ErrorKind::Unauthorized,

            CooldownActive => ErrorKind::CooldownActive,

            AlreadyInitialized | AlreadyMember | RequestPending | InviteCodeExists
            | AlreadyClaimed | AlreadyInteracted | ProfileExists | UsernameTaken => {
                ErrorKind::AlreadyExists
            }

            ProtocolPaused | TribeNotFound | InvalidJoinType | NotPending
            | InvalidInviteCode | InviteCodeExpired | Overflow | CollectibleNotFound
            | CollectibleInactive | SupplyExhausted | PostNotFound | PostDeleted
            | ProfileNotFound => ErrorKind::Contract,
        }
    }
}
