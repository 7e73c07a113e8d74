use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::program_error::ProgramError;
use solana_sha256_hasher::hash;

use crate::{constants::ROLL_RANGE, errors::DiceError};

// Ed25519SigVerify111111111111111111111111111
pub fn ed25519_program_id() -> Pubkey {
    Pubkey::new_from_array([
        3, 125, 70, 214, 124, 147, 251, 190, 18, 249, 66, 143, 131, 141, 64, 255,
        5, 112, 116, 73, 39, 244, 138, 100, 252, 202, 112, 68, 128, 0, 0, 0,
    ])
}

// -----------------
// Seeds
// -----------------
pub const POOL_SEED: &[u8] = b"pool";
pub const VAULT_SEED: &[u8] = b"vault";
pub const BET_SEED: &[u8] = b"bet";

const SIGNATURE_LEN: usize = 64;
const PUBKEY_LEN: usize = 32;
const OFFSETS_START: usize = 2;
const HEADER_LEN: usize = OFFSETS_START + 14;

/// What the ed25519 precompile checked, as read back from its instruction data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519Payload {
    pub pubkey: Pubkey,
    pub message: Vec<u8>,
    pub signature: [u8; 64],
}

fn read_u16(data: &[u8], at: usize) -> usize {
    u16::from_le_bytes([data[at], data[at + 1]]) as usize
}

// -------------------------
// ed25519 parsing
// -------------------------
pub fn parse_ed25519_ix(ix: &Instruction) -> Result<Ed25519Payload> {
    require!(
        ix.program_id == ed25519_program_id(),
        DiceError::SignatureNotVerified
    );
    require!(ix.accounts.is_empty(), DiceError::SignatureNotVerified);

    let data = &ix.data;
    require!(data.len() >= HEADER_LEN, DiceError::SignatureNotVerified);

    let num_sigs = data[0];
    require!(num_sigs == 1, DiceError::SignatureNotVerified);

    // Everything must live inside this instruction (instruction_index == u16::MAX),
    // otherwise the precompile may have checked bytes we never see.
    let o = OFFSETS_START;
    let self_contained = u16::MAX as usize;
    require!(read_u16(data, o + 2) == self_contained, DiceError::SignatureNotVerified);
    require!(read_u16(data, o + 6) == self_contained, DiceError::SignatureNotVerified);
    require!(read_u16(data, o + 12) == self_contained, DiceError::SignatureNotVerified);

    let sig_off = read_u16(data, o);
    let pk_off = read_u16(data, o + 4);
    let msg_off = read_u16(data, o + 8);
    let msg_sz = read_u16(data, o + 10);

    require!(sig_off + SIGNATURE_LEN <= data.len(), DiceError::SignatureNotVerified);
    require!(pk_off + PUBKEY_LEN <= data.len(), DiceError::SignatureNotVerified);
    require!(msg_off + msg_sz <= data.len(), DiceError::SignatureNotVerified);

    let pk_bytes: [u8; 32] = data[pk_off..pk_off + PUBKEY_LEN]
        .try_into()
        .map_err(|_| error!(DiceError::SignatureNotVerified))?;
    let signature: [u8; 64] = data[sig_off..sig_off + SIGNATURE_LEN]
        .try_into()
        .map_err(|_| error!(DiceError::SignatureNotVerified))?;

    Ok(Ed25519Payload {
        pubkey: Pubkey::new_from_array(pk_bytes),
        message: data[msg_off..msg_off + msg_sz].to_vec(),
        signature,
    })
}

/// Binds a verified ed25519 instruction to the expected signer, message and signature.
pub fn assert_ed25519_ix_matches(
    ix: &Instruction,
    expected_pubkey: &Pubkey,
    expected_msg: &[u8],
    expected_sig: &[u8; 64],
) -> Result<()> {
    let payload = parse_ed25519_ix(ix)?;

    if payload.pubkey != *expected_pubkey {
        msg!("ed25519 signer {} is not the house", payload.pubkey);
        return err!(DiceError::SignatureNotVerified);
    }
    if payload.message.as_slice() != expected_msg {
        msg!("ed25519 message does not match the bet");
        return err!(DiceError::SignatureNotVerified);
    }
    if payload.signature != *expected_sig {
        msg!("ed25519 signature does not match the argument");
        return err!(DiceError::SignatureNotVerified);
    }

    Ok(())
}

/// Tx layout must be: [ ed25519_verify(house, bet.message(), signature), resolve_bet ]
///
/// `load_ix` reads an instruction of the current transaction by index.
pub fn verify_preceding_ed25519<F>(
    current_ix: u16,
    load_ix: F,
    expected_pubkey: &Pubkey,
    expected_msg: &[u8],
    expected_sig: &[u8; 64],
) -> Result<()>
where
    F: FnOnce(usize) -> core::result::Result<Instruction, ProgramError>,
{
    let index = usize::from(current_ix)
        .checked_sub(1)
        .ok_or_else(|| error!(DiceError::SignatureNotVerified))?;
    let ix = load_ix(index).map_err(|_| error!(DiceError::SignatureNotVerified))?;

    assert_ed25519_ix_matches(&ix, expected_pubkey, expected_msg, expected_sig)
}

// -------------------------
// Roll derivation
// -------------------------

/// Maps a house signature to an outcome in 1..=100.
///
/// The signature is hashed with SHA-256 and both 16-byte halves are read as
/// little-endian u128. Their sum wraps at 2^128 before the modulo.
pub fn roll_from_signature(signature: &[u8; 64]) -> u8 {
    let digest = hash(signature).to_bytes();

    let mut half = [0u8; 16];
    half.copy_from_slice(&digest[0..16]);
    let upper = u128::from_le_bytes(half);
    half.copy_from_slice(&digest[16..32]);
    let lower = u128::from_le_bytes(half);

    (upper.wrapping_add(lower) % ROLL_RANGE) as u8 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::tests::{assert_dice_err, code_of};

    fn u16le(v: u16) -> [u8; 2] {
        v.to_le_bytes()
    }

    /// Layout used by the precompile:
    /// [num_sigs: u8, padding: u8, offsets(14 bytes), signature(64), pubkey(32), msg(N)]
    fn make_ed25519_ix(
        pubkey: [u8; 32],
        msg: &[u8],
        sig: [u8; 64],
        sig_ix: u16,
        pk_ix: u16,
        msg_ix: u16,
    ) -> Instruction {
        let sig_off: u16 = HEADER_LEN as u16;
        let pk_off: u16 = sig_off + 64;
        let msg_off: u16 = pk_off + 32;
        let msg_sz: u16 = msg.len().try_into().expect("message too long for u16 size");

        let mut data = vec![0u8; HEADER_LEN + 64 + 32 + msg.len()];
        data[0] = 1;

        let o = OFFSETS_START;
        data[o..o + 2].copy_from_slice(&u16le(sig_off));
        data[o + 2..o + 4].copy_from_slice(&u16le(sig_ix));
        data[o + 4..o + 6].copy_from_slice(&u16le(pk_off));
        data[o + 6..o + 8].copy_from_slice(&u16le(pk_ix));
        data[o + 8..o + 10].copy_from_slice(&u16le(msg_off));
        data[o + 10..o + 12].copy_from_slice(&u16le(msg_sz));
        data[o + 12..o + 14].copy_from_slice(&u16le(msg_ix));

        let sig_start = sig_off as usize;
        let pk_start = pk_off as usize;
        let msg_start = msg_off as usize;
        data[sig_start..sig_start + 64].copy_from_slice(&sig);
        data[pk_start..pk_start + 32].copy_from_slice(&pubkey);
        data[msg_start..msg_start + msg.len()].copy_from_slice(msg);

        Instruction {
            program_id: ed25519_program_id(),
            accounts: vec![],
            data,
        }
    }

    fn self_contained(pubkey: &Pubkey, msg: &[u8], sig: [u8; 64]) -> Instruction {
        make_ed25519_ix(pubkey.to_bytes(), msg, sig, u16::MAX, u16::MAX, u16::MAX)
    }

    #[test]
    fn ed25519_program_id_matches_base58() {
        use std::str::FromStr;
        let expected = Pubkey::from_str("Ed25519SigVerify111111111111111111111111111").unwrap();
        assert_eq!(ed25519_program_id(), expected);
    }

    #[test]
    fn parse_reads_pubkey_message_and_signature() {
        let house = Pubkey::new_unique();
        let msg = b"bet-message".to_vec();
        let sig = [5u8; 64];

        let payload = parse_ed25519_ix(&self_contained(&house, &msg, sig)).expect("should parse");
        assert_eq!(payload.pubkey, house);
        assert_eq!(payload.message, msg);
        assert_eq!(payload.signature, sig);
    }

    #[test]
    fn parse_rejects_external_instruction_indices() {
        let house = Pubkey::new_unique();
        let msg = b"evil".to_vec();

        for (sig_ix, pk_ix, msg_ix) in [(0, u16::MAX, u16::MAX), (u16::MAX, 1, u16::MAX), (u16::MAX, u16::MAX, 0)] {
            let ix = make_ed25519_ix(house.to_bytes(), &msg, [1u8; 64], sig_ix, pk_ix, msg_ix);
            assert_dice_err(parse_ed25519_ix(&ix), DiceError::SignatureNotVerified);
        }
    }

    #[test]
    fn parse_rejects_other_programs_and_accounts() {
        let house = Pubkey::new_unique();

        let mut ix = self_contained(&house, b"m", [1u8; 64]);
        ix.program_id = Pubkey::new_unique();
        assert_dice_err(parse_ed25519_ix(&ix), DiceError::SignatureNotVerified);

        let mut ix = self_contained(&house, b"m", [1u8; 64]);
        ix.accounts
            .push(anchor_lang::solana_program::instruction::AccountMeta::new_readonly(house, false));
        assert_dice_err(parse_ed25519_ix(&ix), DiceError::SignatureNotVerified);
    }

    #[test]
    fn parse_rejects_multiple_signatures_and_truncated_data() {
        let house = Pubkey::new_unique();

        let mut ix = self_contained(&house, b"m", [1u8; 64]);
        ix.data[0] = 2;
        assert_dice_err(parse_ed25519_ix(&ix), DiceError::SignatureNotVerified);

        let mut ix = self_contained(&house, b"message", [1u8; 64]);
        ix.data.truncate(HEADER_LEN + 64 + 32 + 2);
        assert_dice_err(parse_ed25519_ix(&ix), DiceError::SignatureNotVerified);

        let mut ix = self_contained(&house, b"m", [1u8; 64]);
        ix.data.truncate(HEADER_LEN - 1);
        assert_dice_err(parse_ed25519_ix(&ix), DiceError::SignatureNotVerified);
    }

    #[test]
    fn assert_matches_accepts_exact_binding() {
        let house = Pubkey::new_unique();
        let msg = b"good".to_vec();
        let sig = [3u8; 64];

        let ix = self_contained(&house, &msg, sig);
        assert!(assert_ed25519_ix_matches(&ix, &house, &msg, &sig).is_ok());
    }

    #[test]
    fn assert_matches_rejects_wrong_signer_message_or_signature() {
        let house = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let msg = b"good".to_vec();
        let sig = [3u8; 64];
        let ix = self_contained(&house, &msg, sig);

        assert_dice_err(
            assert_ed25519_ix_matches(&ix, &other, &msg, &sig),
            DiceError::SignatureNotVerified,
        );
        assert_dice_err(
            assert_ed25519_ix_matches(&ix, &house, b"bad", &sig),
            DiceError::SignatureNotVerified,
        );
        assert_dice_err(
            assert_ed25519_ix_matches(&ix, &house, &msg, &[4u8; 64]),
            DiceError::SignatureNotVerified,
        );
    }

    #[test]
    fn preceding_ix_is_the_one_checked() {
        let house = Pubkey::new_unique();
        let msg = b"bet".to_vec();
        let sig = [8u8; 64];

        let mut asked = None;
        let res = verify_preceding_ed25519(
            3,
            |i| {
                asked = Some(i);
                Ok(self_contained(&house, &msg, sig))
            },
            &house,
            &msg,
            &sig,
        );
        assert!(res.is_ok());
        assert_eq!(asked, Some(2));
    }

    #[test]
    fn resolve_as_first_ix_is_unverified() {
        let house = Pubkey::new_unique();
        let res = verify_preceding_ed25519(
            0,
            |_| panic!("nothing precedes the first instruction"),
            &house,
            b"bet",
            &[8u8; 64],
        );
        assert_dice_err(res, DiceError::SignatureNotVerified);
    }

    #[test]
    fn unloadable_preceding_ix_is_unverified() {
        let house = Pubkey::new_unique();
        let res = verify_preceding_ed25519(
            1,
            |_| Err(ProgramError::InvalidArgument),
            &house,
            b"bet",
            &[8u8; 64],
        );
        assert_dice_err(res, DiceError::SignatureNotVerified);

        // a non-precompile instruction sitting in front of resolve
        let mut other = self_contained(&house, b"bet", [8u8; 64]);
        other.program_id = crate::ID;
        let res = verify_preceding_ed25519(1, |_| Ok(other), &house, b"bet", &[8u8; 64]);
        assert_dice_err(res, DiceError::SignatureNotVerified);
    }

    #[test]
    fn assert_matches_rejects_non_self_contained_message() {
        let house = Pubkey::new_unique();
        let msg = b"evil-msg-2".to_vec();
        let sig = [3u8; 64];

        let ix = make_ed25519_ix(house.to_bytes(), &msg, sig, u16::MAX, u16::MAX, 7);
        let err = assert_ed25519_ix_matches(&ix, &house, &msg, &sig).unwrap_err();
        assert_eq!(code_of(err), code_of(error!(DiceError::SignatureNotVerified)));
    }

    // Vectors computed independently from SHA-256 of 64 repeated bytes.
    #[test]
    fn roll_matches_pinned_vectors() {
        assert_eq!(roll_from_signature(&[0u8; 64]), 73);
        assert_eq!(roll_from_signature(&[228u8; 64]), 1);
        assert_eq!(roll_from_signature(&[145u8; 64]), 2);
        assert_eq!(roll_from_signature(&[67u8; 64]), 4);
        assert_eq!(roll_from_signature(&[190u8; 64]), 10);
    }

    #[test]
    fn roll_sum_wraps_at_u128() {
        // upper + lower overflows u128 for these digests
        assert_eq!(roll_from_signature(&[179u8; 64]), 57);
        assert_eq!(roll_from_signature(&[96u8; 64]), 1);
    }

    #[test]
    fn roll_is_deterministic_and_in_range() {
        for b in 0..=255u8 {
            let mut sig = [b; 64];
            sig[63] = b.wrapping_mul(31);
            let first = roll_from_signature(&sig);
            assert_eq!(first, roll_from_signature(&sig));
            assert!((1..=100).contains(&first), "roll {} out of range", first);
        }
    }
}
