//! PumpFun bonding curve account codec
//!
//! Decodes the fixed-layout on-chain account into an immutable snapshot and
//! exposes the constant product buy quote over it. The layout is a contract
//! with the on-chain program and must not drift:
//! - discriminator: [u8; 8] at offset 0
//! - virtual_token_reserves: u64 at offset 8
//! - virtual_sol_reserves: u64 at offset 16
//! - real_token_reserves: u64 at offset 24
//! - real_sol_reserves: u64 at offset 32
//! - token_total_supply: u64 at offset 40
//! - complete: bool at offset 48
//!
//! All integers are unsigned little-endian.

use crate::constants::BONDING_CURVE_DISCRIMINATOR;
use crate::error::{CurveStateError, DecodeError};

/// Minimum account size covering every field above
pub const BONDING_CURVE_ACCOUNT_LEN: usize = 49;

/// Decoded bonding curve state, one snapshot per fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondingCurveAccount {
    pub virtual_token_reserves: u64,
    pub virtual_sol_reserves: u64,
    pub real_token_reserves: u64,
    pub real_sol_reserves: u64,
    pub token_total_supply: u64,
    pub complete: bool,
}

impl BondingCurveAccount {
    /// Decode a raw account buffer, verifying length and discriminator
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < BONDING_CURVE_ACCOUNT_LEN {
            return Err(DecodeError::TooShort {
                got: data.len(),
                expected: BONDING_CURVE_ACCOUNT_LEN,
            });
        }

        let discriminator: [u8; 8] = data[..8].try_into().expect("slice length checked");
        if discriminator != BONDING_CURVE_DISCRIMINATOR {
            return Err(DecodeError::BadDiscriminator(discriminator));
        }

        Ok(Self {
            virtual_token_reserves: read_u64_le(data, 8),
            virtual_sol_reserves: read_u64_le(data, 16),
            real_token_reserves: read_u64_le(data, 24),
            real_sol_reserves: read_u64_le(data, 32),
            token_total_supply: read_u64_le(data, 40),
            complete: data[48] != 0,
        })
    }

    /// Token amount received for spending `sol_lamports` against the curve
    ///
    /// Constant product quote: tokens_out = R_tok - floor(R_sol * R_tok / (R_sol + d)).
    /// The reserve product can exceed u64, so the intermediate math is u128.
    /// The result is always strictly less than `virtual_token_reserves`.
    pub fn buy_quote(&self, sol_lamports: u64) -> Result<u64, CurveStateError> {
        if self.complete {
            return Err(CurveStateError::CurveComplete);
        }
        if self.virtual_sol_reserves == 0 || self.virtual_token_reserves == 0 {
            return Err(CurveStateError::ZeroReserves);
        }

        let r_sol = self.virtual_sol_reserves as u128;
        let r_tok = self.virtual_token_reserves as u128;
        let new_token_reserves = (r_sol * r_tok) / (r_sol + sol_lamports as u128);
        let tokens_out = r_tok - new_token_reserves;

        Ok(tokens_out as u64)
    }
}

#[inline]
fn read_u64_le(data: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(data[offset..offset + 8].try_into().expect("offset in bounds"))
}

/// Reference encoder, the exact inverse of `decode` for valid inputs.
/// Test-only: the bot never writes curve accounts.
#[cfg(test)]
pub(crate) fn encode(account: &BondingCurveAccount) -> Vec<u8> {
    let mut data = Vec::with_capacity(BONDING_CURVE_ACCOUNT_LEN);
    data.extend_from_slice(&BONDING_CURVE_DISCRIMINATOR);
    data.extend_from_slice(&account.virtual_token_reserves.to_le_bytes());
    data.extend_from_slice(&account.virtual_sol_reserves.to_le_bytes());
    data.extend_from_slice(&account.real_token_reserves.to_le_bytes());
    data.extend_from_slice(&account.real_sol_reserves.to_le_bytes());
    data.extend_from_slice(&account.token_total_supply.to_le_bytes());
    data.push(account.complete as u8);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> BondingCurveAccount {
        BondingCurveAccount {
            virtual_token_reserves: 1_073_000_000_000_000,
            virtual_sol_reserves: 30_000_000_000,
            real_token_reserves: 793_100_000_000_000,
            real_sol_reserves: 0,
            token_total_supply: 1_000_000_000_000_000,
            complete: false,
        }
    }

    #[test]
    fn decode_round_trips_reference_encoder() {
        let account = sample_account();
        let decoded = BondingCurveAccount::decode(&encode(&account)).unwrap();
        assert_eq!(decoded, account);

        let completed = BondingCurveAccount {
            complete: true,
            ..account
        };
        let decoded = BondingCurveAccount::decode(&encode(&completed)).unwrap();
        assert_eq!(decoded, completed);
    }

    #[test]
    fn decode_rejects_short_buffer() {
        let data = vec![0u8; BONDING_CURVE_ACCOUNT_LEN - 1];
        assert_eq!(
            BondingCurveAccount::decode(&data),
            Err(DecodeError::TooShort {
                got: 48,
                expected: 49
            })
        );
        assert!(BondingCurveAccount::decode(&[]).is_err());
    }

    #[test]
    fn decode_rejects_wrong_discriminator() {
        let mut data = encode(&sample_account());
        data[0] ^= 0xff;
        let got: [u8; 8] = data[..8].try_into().unwrap();
        assert_eq!(
            BondingCurveAccount::decode(&data),
            Err(DecodeError::BadDiscriminator(got))
        );
    }

    #[test]
    fn decode_tolerates_trailing_bytes() {
        // On-chain accounts can be padded past the known fields
        let mut data = encode(&sample_account());
        data.extend_from_slice(&[0u8; 32]);
        assert_eq!(
            BondingCurveAccount::decode(&data).unwrap(),
            sample_account()
        );
    }

    #[test]
    fn buy_quote_matches_exact_integer_formula() {
        let account = sample_account();
        let spend: u64 = 20_000_000;

        // R_tok - floor(R_sol * R_tok / (R_sol + d)), worked out by hand
        let tokens = account.buy_quote(spend).unwrap();
        assert_eq!(tokens, 714_856_762_159);

        // and against an independent u128 recomputation
        let r_sol = account.virtual_sol_reserves as u128;
        let r_tok = account.virtual_token_reserves as u128;
        let expected = r_tok - (r_sol * r_tok) / (r_sol + spend as u128);
        assert_eq!(tokens as u128, expected);
    }

    #[test]
    fn buy_quote_stays_below_virtual_token_reserves() {
        let account = sample_account();
        for spend in [1u64, 1_000, 20_000_000, u64::MAX] {
            let tokens = account.buy_quote(spend).unwrap();
            assert!(tokens < account.virtual_token_reserves);
        }
    }

    #[test]
    fn buy_quote_is_monotone_in_spend() {
        let account = sample_account();
        let spends = [1u64, 10, 1_000, 100_000, 20_000_000, 1_000_000_000];
        let quotes: Vec<u64> = spends
            .iter()
            .map(|&s| account.buy_quote(s).unwrap())
            .collect();
        for pair in quotes.windows(2) {
            assert!(pair[0] < pair[1], "quote must increase with spend");
        }
    }

    #[test]
    fn buy_quote_survives_maximal_reserves() {
        // u64::MAX reserves must not overflow the u128 product
        let account = BondingCurveAccount {
            virtual_token_reserves: u64::MAX,
            virtual_sol_reserves: u64::MAX,
            ..sample_account()
        };
        let tokens = account.buy_quote(u64::MAX).unwrap();
        assert!(tokens < account.virtual_token_reserves);
    }

    #[test]
    fn buy_quote_rejects_zero_reserves() {
        let no_sol = BondingCurveAccount {
            virtual_sol_reserves: 0,
            ..sample_account()
        };
        assert_eq!(no_sol.buy_quote(1), Err(CurveStateError::ZeroReserves));

        let no_tok = BondingCurveAccount {
            virtual_token_reserves: 0,
            ..sample_account()
        };
        assert_eq!(no_tok.buy_quote(1), Err(CurveStateError::ZeroReserves));
    }

    #[test]
    fn buy_quote_rejects_completed_curve() {
        let done = BondingCurveAccount {
            complete: true,
            ..sample_account()
        };
        assert_eq!(done.buy_quote(1), Err(CurveStateError::CurveComplete));
    }
}
