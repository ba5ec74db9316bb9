extern crate std;
use std::vec::Vec;

use proptest::prelude::*;
use soroban_sdk::{symbol_short, testutils::Address as _, Address};

use crate::invariants::*;
use crate::membership::{transition, MembershipEvent};
use crate::storage;
use crate::test_utils::*;
use crate::{Error, JoinType, MemberStatus};

const EVENTS: [MembershipEvent; 6] = [
    MembershipEvent::Join,
    MembershipEvent::RequestJoin,
    MembershipEvent::JoinWithCode,
    MembershipEvent::Approve,
    MembershipEvent::Reject,
    MembershipEvent::Ban,
];

// ── 1. Entry fee ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn fuzz_entry_fee_threshold(fee in 1i128..=10 * TENTH, payment in 0i128..=20 * TENTH) {
        let (env, client, _, token) = setup();
        let admin = Address::generate(&env);
        let user = Address::generate(&env);
        let tribe_id = create_tribe(&env, &client, &admin, JoinType::Private, fee);
        mint(&env, &token, &user, payment);

        let result = client.try_request_to_join_tribe(&user, &tribe_id, &payment);
        if payment >= fee {
            prop_assert!(result.is_ok());
            prop_assert_eq!(client.get_member_status(&tribe_id, &user), MemberStatus::Pending);
            prop_assert_eq!(balance(&env, &token, &user), payment - fee);
            prop_assert_eq!(balance(&env, &token, &client.address), fee);
            prop_assert_eq!(balance(&env, &token, &admin), 0);
        } else {
            assert_error(result, Error::InsufficientEntryFee);
            prop_assert_eq!(client.get_member_status(&tribe_id, &user), MemberStatus::None);
            prop_assert_eq!(balance(&env, &token, &user), payment);
        }
        assert_entry_fee_non_negative(&client.get_tribe(&tribe_id));
    }

    #[test]
    fn fuzz_negative_fee_rejected(fee in i128::MIN..0i128) {
        let (env, client, _, _) = setup();
        let admin = Address::generate(&env);
        let result = client.try_create_tribe(
            &admin,
            &text(&env, "Builders"),
            &text(&env, "ipfs://tribe"),
            &JoinType::Private,
            &fee,
            &soroban_sdk::vec![&env],
        );
        assert_error(result, Error::InvalidAmount);
        prop_assert_eq!(client.tribe_count(), 0);
    }
}

// ── 2. Invite codes ─────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn fuzz_invite_uses_bounded(max_uses in 1u32..=6, attempts in 1u32..=10) {
        let (env, client, _, _) = setup();
        let admin = Address::generate(&env);
        let tribe_id = create_tribe(&env, &client, &admin, JoinType::InviteCode, 0);
        let hash = client.create_invite_code(&admin, &tribe_id, &code(&env, "FUZZ"), &max_uses, &0);

        let mut joined = 0u32;
        for _ in 0..attempts {
            let user = Address::generate(&env);
            if client.try_join_tribe_with_code(&user, &tribe_id, &hash).is_ok() {
                joined += 1;
            }
        }

        prop_assert_eq!(joined, attempts.min(max_uses));
        let invite = env
            .as_contract(&client.address, || storage::get_invite(&env, tribe_id, &hash))
            .unwrap();
        assert_invite_usage_bounded(&invite);

        let status = client.get_invite_code_status(&tribe_id, &code(&env, "FUZZ"));
        prop_assert_eq!(status.remaining_uses, max_uses - joined);
        prop_assert_eq!(status.valid, joined < max_uses);

        let tribe = client.get_tribe(&tribe_id);
        let members = client.get_tribe_members(&tribe_id, &0, &u32::MAX);
        assert_member_count_consistent(&tribe, members.len());
    }

    #[test]
    fn fuzz_invite_expiry(lifetime in 1u64..=10_000, wait in 0u64..=20_000) {
        let (env, client, _, _) = setup();
        let admin = Address::generate(&env);
        let user = Address::generate(&env);
        let tribe_id = create_tribe(&env, &client, &admin, JoinType::InviteCode, 0);
        let expiry = GENESIS + lifetime;
        let hash = client.create_invite_code(&admin, &tribe_id, &code(&env, "SOON"), &5, &expiry);

        advance_time(&env, wait);
        let result = client.try_join_tribe_with_code(&user, &tribe_id, &hash);
        if GENESIS + wait < expiry {
            prop_assert!(result.is_ok());
        } else {
            assert_error(result, Error::InviteCodeExpired);
        }
    }
}

// ── 3. Points ───────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn fuzz_points_conserved(awarded in 1u128..=1_000_000, fraction in 0u8..=100) {
        let (env, client, _, _) = setup();
        let admin = Address::generate(&env);
        let member = Address::generate(&env);
        let tribe_id = create_tribe(&env, &client, &admin, JoinType::Public, 0);
        client.join_tribe(&member, &tribe_id);

        let before = client.get_member_points(&tribe_id, &member);
        client.award_points(&admin, &tribe_id, &member, &awarded, &action(&env, "BONUS"));

        let deducted = awarded * fraction as u128 / 100;
        let returned =
            client.deduct_points(&admin, &tribe_id, &member, &deducted, &symbol_short!("fuzz"));
        let after = client.get_member_points(&tribe_id, &member);
        prop_assert_eq!(returned, after);
        assert_points_conserved(before, awarded, deducted, after);

        let over = after + 1;
        assert_error(
            client.try_deduct_points(&admin, &tribe_id, &member, &over, &symbol_short!("fuzz")),
            Error::InsufficientPoints,
        );
        prop_assert_eq!(client.get_member_points(&tribe_id, &member), after);
    }
}

// ── 4. Membership state machine ─────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fuzz_transitions_follow_table(path in prop::collection::vec(0usize..6, 1..12)) {
        let mut status = MemberStatus::None;
        for index in path {
            if let Ok(next) = transition(status, EVENTS[index]) {
                assert_valid_membership_transition(status, next);
                status = next;
            }
        }
    }

    #[test]
    fn fuzz_banned_is_absorbing(path in prop::collection::vec(0usize..4, 0..8)) {
        let (env, client, _, _) = setup();
        let admin = Address::generate(&env);
        let user = Address::generate(&env);
        let public = create_tribe(&env, &client, &admin, JoinType::Public, 0);
        let private = create_tribe(&env, &client, &admin, JoinType::Private, 0);
        let invite = create_tribe(&env, &client, &admin, JoinType::InviteCode, 0);
        let hash = client.create_invite_code(&admin, &invite, &code(&env, "BAN"), &10, &0);

        client.ban_member(&admin, &public, &user);
        client.ban_member(&admin, &private, &user);
        client.ban_member(&admin, &invite, &user);

        for step in path {
            match step {
                0 => assert_error(client.try_join_tribe(&user, &public), Error::UserBanned),
                1 => assert_error(
                    client.try_request_to_join_tribe(&user, &private, &0),
                    Error::UserBanned,
                ),
                2 => assert_error(
                    client.try_join_tribe_with_code(&user, &invite, &hash),
                    Error::UserBanned,
                ),
                _ => assert_error(
                    client.try_approve_member(&admin, &private, &user),
                    Error::UserBanned,
                ),
            }
        }
        for tribe_id in [public, private, invite] {
            prop_assert_eq!(client.get_member_status(&tribe_id, &user), MemberStatus::Banned);
        }
    }
}

// ── 5. Collectibles & ids ───────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn fuzz_supply_bounded(max_supply in 1u32..=5, claimants in 1u32..=8) {
        let (env, client, _, _) = setup();
        let admin = Address::generate(&env);
        let tribe_id = create_tribe(&env, &client, &admin, JoinType::Public, 0);
        let collectible_id = client.create_collectible(
            &admin,
            &tribe_id,
            &text(&env, "Badge"),
            &text(&env, "ipfs://badge"),
            &max_supply,
            &0,
            &0,
        );

        let mut claimed = 0u32;
        for _ in 0..claimants {
            let user = Address::generate(&env);
            client.join_tribe(&user, &tribe_id);
            if client.try_claim_collectible(&user, &collectible_id, &0).is_ok() {
                claimed += 1;
            }
        }

        let collectible = client.get_collectible(&collectible_id);
        assert_supply_bounded(&collectible);
        prop_assert_eq!(claimed, claimants.min(max_supply));
        prop_assert_eq!(collectible.current_supply, claimed);
    }

    #[test]
    fn fuzz_sequential_tribe_ids(count in 1usize..=8) {
        let (env, client, _, _) = setup();
        let admin = Address::generate(&env);
        let ids: Vec<u64> = (0..count)
            .map(|_| create_tribe(&env, &client, &admin, JoinType::Public, 0))
            .collect();
        assert_sequential_ids(&ids);
        prop_assert_eq!(client.tribe_count(), count as u64);
    }
}
