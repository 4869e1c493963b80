use bitcoin::{
    key::XOnlyPublicKey,
    psbt,
    secp256k1::{Secp256k1, Verification},
    ScriptBuf, TxOut,
};
use std::str::FromStr;

use super::error::PsbtBuildError;
use crate::primitives::{Satoshis, SighashFlag};

/// The per-input script derivation of a build, tagged by spend type. The
/// single-input builders use one of these; the combined builder composes a
/// `Segwit` and a `Taproot` instance in one draft.
#[derive(Debug, Clone, Copy)]
pub enum ScriptSource {
    /// P2WPKH wrapped in P2SH (nested segwit), spendable by the holder of
    /// the compressed public key.
    Segwit { public_key: bitcoin::PublicKey },
    /// Key-path-only P2TR. The internal key must travel with the input so
    /// the signer can produce a key-path spend.
    Taproot { internal_key: XOnlyPublicKey },
}

impl ScriptSource {
    pub fn segwit_from_hex(public_key: &str) -> Result<Self, PsbtBuildError> {
        let public_key = bitcoin::PublicKey::from_str(public_key)?;
        if !public_key.compressed {
            return Err(PsbtBuildError::UncompressedPublicKey);
        }
        Ok(Self::Segwit { public_key })
    }

    /// Accepts either a 32-byte x-only key or a 33-byte compressed key
    /// (wallet connectors report taproot keys in both shapes).
    pub fn taproot_from_hex(internal_key: &str) -> Result<Self, PsbtBuildError> {
        let bytes = hex::decode(internal_key)?;
        let internal_key = match bytes.len() {
            32 => XOnlyPublicKey::from_slice(&bytes)?,
            33 => {
                bitcoin::PublicKey::from_slice(&bytes)?
                    .inner
                    .x_only_public_key()
                    .0
            }
            other => return Err(PsbtBuildError::UnexpectedKeyLength(other)),
        };
        Ok(Self::Taproot { internal_key })
    }

    pub fn script_pubkey<C: Verification>(
        &self,
        secp: &Secp256k1<C>,
    ) -> Result<ScriptBuf, PsbtBuildError> {
        match self {
            Self::Segwit { public_key } => {
                let redeem_script = segwit_redeem_script(public_key)?;
                Ok(ScriptBuf::new_p2sh(&redeem_script.script_hash()))
            }
            Self::Taproot { internal_key } => {
                Ok(ScriptBuf::new_v1_p2tr(secp, *internal_key, None))
            }
        }
    }

    /// Lowers the symbolic flag to the encoding this spend type signs
    /// with. Taproot has its own sighash numbering and must not reuse the
    /// legacy enumeration.
    pub fn sighash_type(&self, flag: SighashFlag) -> psbt::PsbtSighashType {
        match self {
            Self::Segwit { .. } => flag.ecdsa().into(),
            Self::Taproot { .. } => flag.taproot().into(),
        }
    }

    /// Fills one PSBT input with the witness UTXO and the script/key
    /// records its spend type requires.
    pub(super) fn populate_input<C: Verification>(
        &self,
        secp: &Secp256k1<C>,
        input: &mut psbt::Input,
        value: Satoshis,
        flag: SighashFlag,
    ) -> Result<(), PsbtBuildError> {
        input.witness_utxo = Some(TxOut {
            value: u64::from(value),
            script_pubkey: self.script_pubkey(secp)?,
        });
        input.sighash_type = Some(self.sighash_type(flag));
        match self {
            Self::Segwit { public_key } => {
                let redeem_script = segwit_redeem_script(public_key)?;
                input.witness_script = Some(redeem_script.clone());
                input.redeem_script = Some(redeem_script);
            }
            Self::Taproot { internal_key } => {
                input.tap_internal_key = Some(*internal_key);
            }
        }
        Ok(())
    }
}

fn segwit_redeem_script(public_key: &bitcoin::PublicKey) -> Result<ScriptBuf, PsbtBuildError> {
    let wpkh = public_key
        .wpubkey_hash()
        .ok_or(PsbtBuildError::UncompressedPublicKey)?;
    Ok(ScriptBuf::new_v0_p2wpkh(&wpkh))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPRESSED_KEY: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const X_ONLY_KEY: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    #[test]
    fn segwit_source_derives_a_p2sh_script() {
        let secp = Secp256k1::verification_only();
        let source = ScriptSource::segwit_from_hex(COMPRESSED_KEY).unwrap();
        let script = source.script_pubkey(&secp).unwrap();
        assert!(script.is_p2sh());
    }

    #[test]
    fn taproot_source_accepts_x_only_and_compressed_keys() {
        let secp = Secp256k1::verification_only();
        let from_x_only = ScriptSource::taproot_from_hex(X_ONLY_KEY).unwrap();
        let from_compressed = ScriptSource::taproot_from_hex(COMPRESSED_KEY).unwrap();
        assert_eq!(
            from_x_only.script_pubkey(&secp).unwrap(),
            from_compressed.script_pubkey(&secp).unwrap()
        );
        assert!(from_x_only.script_pubkey(&secp).unwrap().is_v1_p2tr());
    }

    #[test]
    fn rejects_malformed_key_material() {
        assert!(matches!(
            ScriptSource::taproot_from_hex("abcd"),
            Err(PsbtBuildError::UnexpectedKeyLength(2))
        ));
        assert!(ScriptSource::taproot_from_hex("zz").is_err());
        assert!(ScriptSource::segwit_from_hex("deadbeef").is_err());
    }

    #[test]
    fn sighash_encoding_follows_spend_type() {
        let segwit = ScriptSource::segwit_from_hex(COMPRESSED_KEY).unwrap();
        let taproot = ScriptSource::taproot_from_hex(X_ONLY_KEY).unwrap();
        let flag = SighashFlag::SinglePlusAnyoneCanPay;
        assert_eq!(segwit.sighash_type(flag).to_u32(), 0x83);
        assert_eq!(taproot.sighash_type(flag).to_u32(), 0x83);
        // the ALL flag diverges: 0x01 for ecdsa, and still 0x01 (not the
        // taproot Default 0x00) when lowered through TapSighashType
        assert_eq!(segwit.sighash_type(SighashFlag::All).to_u32(), 0x01);
        assert_eq!(taproot.sighash_type(SighashFlag::All).to_u32(), 0x01);
    }
}
