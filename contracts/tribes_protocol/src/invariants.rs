#![allow(dead_code)]

extern crate std;

use crate::types::{Collectible, InviteCode, MemberStatus, Tribe};

/// INV-1: A tribe's member counter matches its active-member index.
pub fn assert_member_count_consistent(tribe: &Tribe, active_members: u32) {
    assert_eq!(
        tribe.member_count, active_members,
        "INV-1 violated: tribe {} counts {} members but indexes {}",
        tribe.id, tribe.member_count, active_members
    );
}

/// INV-2: Entry fees are never negative.
pub fn assert_entry_fee_non_negative(tribe: &Tribe) {
    assert!(
        tribe.entry_fee >= 0,
        "INV-2 violated: tribe {} has negative entry fee ({})",
        tribe.id,
        tribe.entry_fee
    );
}

/// INV-3: Invite usage never exceeds the configured bound.
pub fn assert_invite_usage_bounded(invite: &InviteCode) {
    assert!(
        invite.used_count <= invite.max_uses,
        "INV-3 violated: invite used {} times, max {}",
        invite.used_count,
        invite.max_uses
    );
}

/// INV-4: Collectible supply never exceeds the cap.
pub fn assert_supply_bounded(collectible: &Collectible) {
    assert!(
        collectible.current_supply <= collectible.max_supply,
        "INV-4 violated: collectible {} supply {} above cap {}",
        collectible.id,
        collectible.current_supply,
        collectible.max_supply
    );
}

/// INV-5: Points are conserved: `before + awarded - deducted == after`.
pub fn assert_points_conserved(before: u128, awarded: u128, deducted: u128, after: u128) {
    assert_eq!(
        before + awarded - deducted,
        after,
        "INV-5 violated: {} + {} - {} != {}",
        before,
        awarded,
        deducted,
        after
    );
}

/// INV-6: IDs are sequential starting from 0.
pub fn assert_sequential_ids(ids: &[u64]) {
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(*id, i as u64, "INV-6 violated: expected id {}, got {}", i, id);
    }
}

/// INV-7: Only the transitions of the membership table occur:
///   None    -> Active | Pending | Banned
///   Pending -> Active | None | Banned
///   Active  -> Banned
///   Banned  -> (none)
pub fn assert_valid_membership_transition(from: MemberStatus, to: MemberStatus) {
    let valid = from == to
        || matches!(
            (from, to),
            (MemberStatus::None, MemberStatus::Active)
                | (MemberStatus::None, MemberStatus::Pending)
                | (MemberStatus::None, MemberStatus::Banned)
                | (MemberStatus::Pending, MemberStatus::Active)
                | (MemberStatus::Pending, MemberStatus::None)
                | (MemberStatus::Pending, MemberStatus::Banned)
                | (MemberStatus::Active, MemberStatus::Banned)
        );

    assert!(
        valid,
        "INV-7 violated: invalid membership transition from {:?} to {:?}",
        from, to
    );
}
