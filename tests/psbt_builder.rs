use std::str::FromStr;

use bitcoin::{
    key::XOnlyPublicKey,
    psbt::PartiallySignedTransaction,
    secp256k1::Secp256k1,
    sighash::{EcdsaSighashType, TapSighashType},
    Address, Network, PublicKey,
};

use ordsend::{
    primitives::*,
    psbt_builder::{error::PsbtBuildError, PsbtBuilder, PsbtBuilderConfig},
    signer::*,
    utxo::UnspentOutput,
};

const PAYMENT_KEY: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const ORDINALS_KEY: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

fn unspent_outputs(values: &[u64]) -> Vec<UnspentOutput> {
    values
        .iter()
        .enumerate()
        .map(|(vout, value)| {
            serde_json::from_value(serde_json::json!({
                "txid": "2a5e9b3b66c8b81a0df80c60a149e1a3c67a9d1a4f51e156de26f8d3f0586e5e",
                "vout": vout as u32,
                "status": { "confirmed": true },
                "value": value,
            }))
            .unwrap()
        })
        .collect()
}

fn payment_address() -> Address {
    Address::p2shwpkh(&PublicKey::from_str(PAYMENT_KEY).unwrap(), Network::Testnet).unwrap()
}

fn ordinals_address() -> Address {
    let secp = Secp256k1::verification_only();
    Address::p2tr(
        &secp,
        XOnlyPublicKey::from_str(ORDINALS_KEY).unwrap(),
        None,
        Network::Testnet,
    )
}

#[test]
fn segwit_self_send_produces_creator_stage_psbt() -> anyhow::Result<()> {
    let builder = PsbtBuilder::new(BitcoinNetwork::Testnet, PsbtBuilderConfig::default());
    let recipient = payment_address();

    let psbt_base64 = builder.segwit_self_send(
        PAYMENT_KEY,
        &unspent_outputs(&[10_000, 50_000]),
        &recipient.to_string(),
    )?;

    // the base64 string parses back into a structurally identical draft
    let psbt = psbt_base64.parse::<PartiallySignedTransaction>()?;
    assert_eq!(psbt.unsigned_tx.input.len(), 1);
    // first-element selection: vout 0, value 10_000
    assert_eq!(psbt.unsigned_tx.input[0].previous_output.vout, 0);
    assert_eq!(psbt.inputs[0].witness_utxo.as_ref().unwrap().value, 10_000);

    let outputs = &psbt.unsigned_tx.output;
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].value, 2700);
    assert_eq!(outputs[1].value, 7000);
    assert_eq!(outputs[0].script_pubkey, recipient.script_pubkey());
    assert_eq!(outputs[1].script_pubkey, recipient.script_pubkey());

    let input = &psbt.inputs[0];
    assert!(input.redeem_script.is_some());
    assert!(input.witness_script.is_some());
    assert_eq!(
        input.sighash_type,
        Some(EcdsaSighashType::SinglePlusAnyoneCanPay.into())
    );
    assert!(input.partial_sigs.is_empty());
    assert!(input.final_script_witness.is_none());
    Ok(())
}

#[test]
fn ordinals_self_send_carries_the_internal_key() -> anyhow::Result<()> {
    let builder = PsbtBuilder::new(BitcoinNetwork::Testnet, PsbtBuilderConfig::default());
    let recipient = ordinals_address();

    let psbt_base64 =
        builder.taproot_self_send(ORDINALS_KEY, &unspent_outputs(&[10_000]), &recipient.to_string())?;

    let psbt = psbt_base64.parse::<PartiallySignedTransaction>()?;
    let input = &psbt.inputs[0];
    assert_eq!(
        input.tap_internal_key,
        Some(XOnlyPublicKey::from_str(ORDINALS_KEY)?)
    );
    assert!(input
        .witness_utxo
        .as_ref()
        .unwrap()
        .script_pubkey
        .is_v1_p2tr());
    assert_eq!(
        input.sighash_type,
        Some(TapSighashType::SinglePlusAnyoneCanPay.into())
    );
    assert_eq!(psbt.unsigned_tx.output.len(), 2);
    Ok(())
}

#[test]
fn combined_send_balances_across_both_inputs() -> anyhow::Result<()> {
    let builder = PsbtBuilder::new(BitcoinNetwork::Testnet, PsbtBuilderConfig::default());
    let payment_recipient = payment_address();
    let ordinals_recipient = ordinals_address();

    let psbt_base64 = builder.combined_send(
        PAYMENT_KEY,
        ORDINALS_KEY,
        &unspent_outputs(&[5000]),
        &unspent_outputs(&[2000]),
        &payment_recipient.to_string(),
        &ordinals_recipient.to_string(),
    )?;

    let psbt = psbt_base64.parse::<PartiallySignedTransaction>()?;
    assert_eq!(psbt.unsigned_tx.input.len(), 2);
    assert!(psbt.inputs[0].redeem_script.is_some());
    assert!(psbt.inputs[1].tap_internal_key.is_some());

    let outputs = &psbt.unsigned_tx.output;
    assert_eq!(
        outputs.iter().map(|o| o.value).collect::<Vec<_>>(),
        vec![2700, 2000, 2000]
    );
    assert_eq!(outputs[1].script_pubkey, ordinals_recipient.script_pubkey());
    assert_eq!(outputs[2].script_pubkey, ordinals_recipient.script_pubkey());

    let fee: u64 = 5000 + 2000 - outputs.iter().map(|o| o.value).sum::<u64>();
    assert_eq!(fee, 300);
    Ok(())
}

#[test]
fn no_psbt_is_produced_for_underfunded_or_empty_inputs() {
    let builder = PsbtBuilder::new(BitcoinNetwork::Testnet, PsbtBuilderConfig::default());
    let recipient = payment_address().to_string();

    assert!(matches!(
        builder.segwit_self_send(PAYMENT_KEY, &[], &recipient),
        Err(PsbtBuildError::UtxoSource(_))
    ));
    assert!(matches!(
        builder.segwit_self_send(PAYMENT_KEY, &unspent_outputs(&[200]), &recipient),
        Err(PsbtBuildError::Allocation(_))
    ));
    assert!(matches!(
        builder.combined_send(
            PAYMENT_KEY,
            ORDINALS_KEY,
            &unspent_outputs(&[5000]),
            &[],
            &recipient,
            &ordinals_address().to_string(),
        ),
        Err(PsbtBuildError::UtxoSource(_))
    ));
}

struct ApprovingSigner;

#[async_trait::async_trait]
impl RemoteSigningClient for ApprovingSigner {
    async fn sign_psbt(
        &mut self,
        request: SignPsbtRequest,
    ) -> Result<SignPsbtResponse, ordsend::signer::error::SigningClientError> {
        assert_eq!(request.message, "Sign Transaction");
        assert!(!request.broadcast);
        Ok(SignPsbtResponse {
            psbt_base64: request.psbt_base64,
        })
    }
}

struct CancellingSigner;

#[async_trait::async_trait]
impl RemoteSigningClient for CancellingSigner {
    async fn sign_psbt(
        &mut self,
        _request: SignPsbtRequest,
    ) -> Result<SignPsbtResponse, ordsend::signer::error::SigningClientError> {
        Err(ordsend::signer::error::SigningClientError::UserCancelled)
    }
}

#[tokio::test]
async fn signer_round_trip_and_cancellation() -> anyhow::Result<()> {
    use ordsend::app::{error::ApplicationError, App, AppConfig};

    let app = App::new(AppConfig::default());
    let psbt_base64 = "cHNidP8BAAoAAAAAAAAAAAAAAA==".to_string();
    let address = payment_address().to_string();

    let request = app.signing_request(
        psbt_base64.clone(),
        vec![app.input_to_sign(&address, vec![0])],
    );
    assert_eq!(request.inputs_to_sign[0].sig_hash, 0x83);
    assert_eq!(request.inputs_to_sign[0].signing_indexes, vec![0]);

    let signed = app.sign_with(&mut ApprovingSigner, request.clone()).await?;
    assert_eq!(signed, psbt_base64);

    let cancelled = app.sign_with(&mut CancellingSigner, request).await;
    assert!(matches!(
        cancelled,
        Err(ApplicationError::SigningClient(_))
    ));
    Ok(())
}
