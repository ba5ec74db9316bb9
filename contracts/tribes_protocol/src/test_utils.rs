extern crate std;

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error,
    testutils::{Address as _, Ledger},
    token, vec, Address, Bytes, BytesN, Env, InvokeError, String,
};

use crate::{Error, JoinType, NftRequirement, TribesProtocol, TribesProtocolClient};

/// Ledger time every test starts from.
pub const GENESIS: u64 = 1_700_000_000;

/// 0.1 units of a 7-decimal Stellar asset.
pub const TENTH: i128 = 1_000_000;

pub fn setup() -> (Env, TribesProtocolClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = GENESIS);

    let contract_id = env.register(TribesProtocol, ());
    let client = TribesProtocolClient::new(&env, &contract_id);

    let super_admin = Address::generate(&env);
    let payment_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    client.init(&super_admin, &payment_token);
    (env, client, super_admin, payment_token)
}

pub fn text(env: &Env, value: &str) -> String {
    String::from_str(env, value)
}

pub fn code(env: &Env, value: &str) -> Bytes {
    Bytes::from_slice(env, value.as_bytes())
}

pub fn code_hash(env: &Env, value: &str) -> BytesN<32> {
    env.crypto().keccak256(&code(env, value)).into()
}

pub fn action(env: &Env, name: &str) -> BytesN<32> {
    env.crypto()
        .keccak256(&Bytes::from_slice(env, name.as_bytes()))
        .into()
}

pub fn mint(env: &Env, token: &Address, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, token).mint(to, &amount);
}

pub fn balance(env: &Env, token: &Address, of: &Address) -> i128 {
    token::Client::new(env, token).balance(of)
}

pub fn advance_time(env: &Env, seconds: u64) {
    env.ledger().with_mut(|li| li.timestamp += seconds);
}

/// Create a tribe of `join_type` without NFT requirements.
pub fn create_tribe(
    env: &Env,
    client: &TribesProtocolClient,
    admin: &Address,
    join_type: JoinType,
    entry_fee: i128,
) -> u64 {
    client.create_tribe(
        admin,
        &text(env, "Builders"),
        &text(env, "ipfs://tribe-metadata"),
        &join_type,
        &entry_fee,
        &vec![env],
    )
}

pub fn create_gated_tribe(
    env: &Env,
    client: &TribesProtocolClient,
    admin: &Address,
    requirements: soroban_sdk::Vec<NftRequirement>,
) -> u64 {
    client.create_tribe(
        admin,
        &text(env, "Holders"),
        &text(env, "ipfs://holders"),
        &JoinType::NftGated,
        &0,
        &requirements,
    )
}

/// Assert that a `try_*` client call failed with `expected`.
pub fn assert_error<T: core::fmt::Debug>(
    result: Result<T, Result<soroban_sdk::Error, InvokeError>>,
    expected: Error,
) {
    match result {
        Err(Ok(err)) => assert_eq!(err, soroban_sdk::Error::from_contract_error(expected as u32)),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum MockNftError {
    NonExistentToken = 201,
}

/// Minimal non-fungible collection used to exercise NFT gating.
#[contract]
pub struct MockNft;

#[contractimpl]
impl MockNft {
    pub fn mint(env: Env, to: Address, token_id: u32) {
        env.storage().instance().set(&token_id, &to);
        let held: u32 = env.storage().instance().get(&to).unwrap_or(0);
        env.storage().instance().set(&to, &(held + 1));
    }

    pub fn balance(env: Env, owner: Address) -> u32 {
        env.storage().instance().get(&owner).unwrap_or(0)
    }

    pub fn owner_of(env: Env, token_id: u32) -> Address {
        env.storage()
            .instance()
            .get(&token_id)
            .unwrap_or_else(|| panic_with_error!(&env, MockNftError::NonExistentToken))
    }
}
