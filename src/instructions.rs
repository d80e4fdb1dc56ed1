//! PumpFun instruction builders and address derivations
//!
//! Builds the raw `buy` / `sell` instructions against the bonding curve
//! program, the compute-budget priority fee instruction attached to every
//! trade, and the idempotent create instruction for associated token
//! accounts. All addresses are derived, never fetched.

use solana_sdk::compute_budget::ComputeBudgetInstruction;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::{system_program, sysvar};
use std::str::FromStr;

use crate::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, BONDING_CURVE_SEED, BUY_IX_DISCRIMINATOR, GLOBAL_SEED,
    PUMPFUN_EVENT_AUTHORITY, PUMPFUN_FEE_RECIPIENT, PUMPFUN_PROGRAM_ID, SELL_IX_DISCRIMINATOR,
};

/// PumpFun program pubkey
pub fn program_id() -> Pubkey {
    Pubkey::from_str(PUMPFUN_PROGRAM_ID).expect("invalid PumpFun program ID")
}

fn associated_token_program_id() -> Pubkey {
    Pubkey::from_str(ASSOCIATED_TOKEN_PROGRAM_ID).expect("invalid ATA program ID")
}

/// Per-mint bonding curve PDA: ["bonding-curve", mint]
pub fn bonding_curve_pda(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[BONDING_CURVE_SEED, mint.as_ref()], &program_id()).0
}

/// Program-wide global config PDA: ["global"]
pub fn global_pda() -> Pubkey {
    Pubkey::find_program_address(&[GLOBAL_SEED], &program_id()).0
}

/// Associated token account address for any owner, on or off curve
pub fn ata_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    let token_program_id = spl_token::id();
    let seeds = &[owner.as_ref(), token_program_id.as_ref(), mint.as_ref()];
    Pubkey::find_program_address(seeds, &associated_token_program_id()).0
}

/// Idempotent create instruction for an owner's associated token account
pub fn build_create_ata_instruction(payer: &Pubkey, owner: &Pubkey, mint: &Pubkey) -> Instruction {
    Instruction {
        program_id: associated_token_program_id(),
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(ata_address(owner, mint), false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
        ],
        // discriminator 1 = create_idempotent
        data: vec![1],
    }
}

/// Compute unit price instruction attached as the second instruction of
/// every trade transaction
pub fn priority_fee_instruction(micro_lamports: u64) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_price(micro_lamports)
}

/// Fixed protocol accounts for one traded mint, derived once at startup
#[derive(Debug, Clone)]
pub struct CurveAccounts {
    pub mint: Pubkey,
    pub bonding_curve: Pubkey,
    pub associated_bonding_curve: Pubkey,
    pub global: Pubkey,
    pub fee_recipient: Pubkey,
    pub event_authority: Pubkey,
}

impl CurveAccounts {
    /// Derive every protocol account for `mint`
    pub fn derive(mint: Pubkey) -> Self {
        let bonding_curve = bonding_curve_pda(&mint);
        Self {
            mint,
            bonding_curve,
            associated_bonding_curve: ata_address(&bonding_curve, &mint),
            global: global_pda(),
            fee_recipient: Pubkey::from_str(PUMPFUN_FEE_RECIPIENT)
                .expect("invalid fee recipient"),
            event_authority: Pubkey::from_str(PUMPFUN_EVENT_AUTHORITY)
                .expect("invalid event authority"),
        }
    }
}

/// Buy instruction: args are the expected token amount and the SOL cost cap
pub fn build_buy_instruction(
    curve: &CurveAccounts,
    user: &Pubkey,
    associated_user: &Pubkey,
    token_amount: u64,
    max_sol_cost: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(24);
    data.extend_from_slice(&BUY_IX_DISCRIMINATOR);
    data.extend_from_slice(&token_amount.to_le_bytes());
    data.extend_from_slice(&max_sol_cost.to_le_bytes());

    Instruction {
        program_id: program_id(),
        accounts: vec![
            AccountMeta::new_readonly(curve.global, false),
            AccountMeta::new(curve.fee_recipient, false),
            AccountMeta::new_readonly(curve.mint, false),
            AccountMeta::new(curve.bonding_curve, false),
            AccountMeta::new(curve.associated_bonding_curve, false),
            AccountMeta::new(*associated_user, false),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
            AccountMeta::new_readonly(curve.event_authority, false),
            AccountMeta::new_readonly(program_id(), false),
        ],
        data,
    }
}

/// Sell instruction: args are the token amount and the minimum SOL proceeds
pub fn build_sell_instruction(
    curve: &CurveAccounts,
    user: &Pubkey,
    associated_user: &Pubkey,
    token_amount: u64,
    min_sol_output: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(24);
    data.extend_from_slice(&SELL_IX_DISCRIMINATOR);
    data.extend_from_slice(&token_amount.to_le_bytes());
    data.extend_from_slice(&min_sol_output.to_le_bytes());

    Instruction {
        program_id: program_id(),
        accounts: vec![
            AccountMeta::new_readonly(curve.global, false),
            AccountMeta::new(curve.fee_recipient, false),
            AccountMeta::new_readonly(curve.mint, false),
            AccountMeta::new(curve.bonding_curve, false),
            AccountMeta::new(curve.associated_bonding_curve, false),
            AccountMeta::new(*associated_user, false),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(associated_token_program_id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(curve.event_authority, false),
            AccountMeta::new_readonly(program_id(), false),
        ],
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ata_address_is_deterministic() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        assert_eq!(ata_address(&owner, &mint), ata_address(&owner, &mint));
        assert_ne!(
            ata_address(&owner, &mint),
            ata_address(&owner, &Pubkey::new_unique())
        );
    }

    #[test]
    fn bonding_curve_pda_depends_on_mint() {
        let mint_a = Pubkey::new_unique();
        let mint_b = Pubkey::new_unique();
        assert_eq!(bonding_curve_pda(&mint_a), bonding_curve_pda(&mint_a));
        assert_ne!(bonding_curve_pda(&mint_a), bonding_curve_pda(&mint_b));
    }

    #[test]
    fn buy_instruction_encodes_amounts_little_endian() {
        let curve = CurveAccounts::derive(Pubkey::new_unique());
        let user = Pubkey::new_unique();
        let associated_user = Pubkey::new_unique();

        let ix = build_buy_instruction(&curve, &user, &associated_user, 714_856_762_159, 20_020_000);

        assert_eq!(ix.program_id, program_id());
        assert_eq!(&ix.data[..8], &BUY_IX_DISCRIMINATOR);
        assert_eq!(&ix.data[8..16], &714_856_762_159u64.to_le_bytes());
        assert_eq!(&ix.data[16..24], &20_020_000u64.to_le_bytes());

        // the user signs and pays
        let user_meta = ix.accounts.iter().find(|m| m.pubkey == user).unwrap();
        assert!(user_meta.is_signer && user_meta.is_writable);
    }

    #[test]
    fn sell_instruction_encodes_amounts_little_endian() {
        let curve = CurveAccounts::derive(Pubkey::new_unique());
        let user = Pubkey::new_unique();
        let associated_user = Pubkey::new_unique();

        let ix = build_sell_instruction(&curve, &user, &associated_user, 4_000, 0);

        assert_eq!(&ix.data[..8], &SELL_IX_DISCRIMINATOR);
        assert_eq!(&ix.data[8..16], &4_000u64.to_le_bytes());
        assert_eq!(&ix.data[16..24], &0u64.to_le_bytes());
    }

    #[test]
    fn create_ata_instruction_is_idempotent_variant() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let ix = build_create_ata_instruction(&payer, &payer, &mint);
        assert_eq!(ix.data, vec![1]);
        assert_eq!(ix.accounts[1].pubkey, ata_address(&payer, &mint));
    }
}
