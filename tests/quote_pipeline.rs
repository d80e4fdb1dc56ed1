//! End-to-end pipeline over the public API: raw account bytes -> decoded
//! curve -> buy quote -> buy instruction, without touching RPC.

use pump_cycle_bot::constants::{
    BONDING_CURVE_DISCRIMINATOR, DEFAULT_MAX_SOL_COST_PADDING, DEFAULT_SPEND_LAMPORTS,
};
use pump_cycle_bot::instructions::{self, build_buy_instruction};
use pump_cycle_bot::{BondingCurveAccount, CurveAccounts};
use solana_sdk::pubkey::Pubkey;

/// Build a raw account buffer in the on-chain layout
fn curve_bytes(
    virtual_token_reserves: u64,
    virtual_sol_reserves: u64,
    real_token_reserves: u64,
    real_sol_reserves: u64,
    token_total_supply: u64,
    complete: bool,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(49);
    data.extend_from_slice(&BONDING_CURVE_DISCRIMINATOR);
    data.extend_from_slice(&virtual_token_reserves.to_le_bytes());
    data.extend_from_slice(&virtual_sol_reserves.to_le_bytes());
    data.extend_from_slice(&real_token_reserves.to_le_bytes());
    data.extend_from_slice(&real_sol_reserves.to_le_bytes());
    data.extend_from_slice(&token_total_supply.to_le_bytes());
    data.push(complete as u8);
    data
}

#[test]
fn raw_bytes_to_buy_instruction() {
    let data = curve_bytes(
        1_073_000_000_000_000,
        30_000_000_000,
        793_100_000_000_000,
        0,
        1_000_000_000_000_000,
        false,
    );

    let account = BondingCurveAccount::decode(&data).unwrap();
    assert_eq!(account.virtual_sol_reserves, 30_000_000_000);
    assert!(!account.complete);

    let tokens = account.buy_quote(DEFAULT_SPEND_LAMPORTS).unwrap();
    assert_eq!(tokens, 714_856_762_159);

    let mint = Pubkey::new_unique();
    let user = Pubkey::new_unique();
    let curve = CurveAccounts::derive(mint);
    let associated_user = instructions::ata_address(&user, &mint);

    let ix = build_buy_instruction(
        &curve,
        &user,
        &associated_user,
        tokens,
        DEFAULT_SPEND_LAMPORTS + DEFAULT_MAX_SOL_COST_PADDING,
    );

    assert_eq!(ix.program_id, instructions::program_id());
    assert_eq!(&ix.data[8..16], &tokens.to_le_bytes());
    assert!(ix.accounts.iter().any(|m| m.pubkey == curve.bonding_curve));
    assert!(ix.accounts.iter().any(|m| m.pubkey == associated_user));
}

#[test]
fn graduated_curve_refuses_to_quote() {
    let data = curve_bytes(1_000, 1_000, 0, 0, 1_000, true);
    let account = BondingCurveAccount::decode(&data).unwrap();
    assert!(account.buy_quote(1).is_err());
}
