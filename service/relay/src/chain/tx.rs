use bech32::{Bech32, Hrp};
use cosmos_sdk_proto::{
    cosmos::{
        base::v1beta1::Coin,
        crypto::secp256k1::PubKey,
        tx::v1beta1::{
            mode_info::{Single, Sum},
            AuthInfo, Fee, ModeInfo, SignDoc, SignerInfo, TxBody, TxRaw,
        },
    },
    cosmwasm::wasm::v1::MsgExecuteContract,
    Any,
};
use k256::ecdsa::{signature::hazmat::PrehashSigner, Signature, SigningKey};
use prost::Message;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use super::ChainError;

const SIGN_MODE_DIRECT: i32 = 1;

pub struct TxParams {
    pub chain_id: String,
    pub account_number: u64,
    pub sequence: u64,
    pub fee_denom: String,
    pub fee_amount: u128,
    pub gas_limit: u64,
}

/// Bech32 account address controlled by `key`:
/// bech32(prefix, ripemd160(sha256(compressed pubkey))).
pub fn account_address(prefix: &str, key: &SigningKey) -> Result<String, ChainError> {
    let hrp = Hrp::parse(prefix).map_err(|_| ChainError::InvalidPrefix)?;
    let pubkey = key.verifying_key().to_encoded_point(true);
    let hash = Ripemd160::digest(Sha256::digest(pubkey.as_bytes()));
    bech32::encode::<Bech32>(hrp, &hash).map_err(|err| ChainError::Signing(err.to_string()))
}

/// Builds and signs a single-message wasm execute transaction, returning
/// the broadcastable `TxRaw` bytes.
pub fn build_execute_tx(
    key: &SigningKey,
    sender: &str,
    contract: &str,
    msg: Vec<u8>,
    funds: Vec<Coin>,
    params: &TxParams,
) -> Result<Vec<u8>, ChainError> {
    let execute = MsgExecuteContract {
        sender: sender.to_string(),
        contract: contract.to_string(),
        msg,
        funds,
    };
    let body = TxBody {
        messages: vec![Any {
            type_url: String::from("/cosmwasm.wasm.v1.MsgExecuteContract"),
            value: execute.encode_to_vec(),
        }],
        memo: String::new(),
        timeout_height: 0,
        extension_options: vec![],
        non_critical_extension_options: vec![],
    };

    let pubkey = PubKey {
        key: key.verifying_key().to_encoded_point(true).as_bytes().to_vec(),
    };
    let auth_info = AuthInfo {
        signer_infos: vec![SignerInfo {
            public_key: Some(Any {
                type_url: String::from("/cosmos.crypto.secp256k1.PubKey"),
                value: pubkey.encode_to_vec(),
            }),
            mode_info: Some(ModeInfo {
                sum: Some(Sum::Single(Single {
                    mode: SIGN_MODE_DIRECT,
                })),
            }),
            sequence: params.sequence,
        }],
        fee: Some(Fee {
            amount: vec![Coin {
                denom: params.fee_denom.clone(),
                amount: params.fee_amount.to_string(),
            }],
            gas_limit: params.gas_limit,
            payer: String::new(),
            granter: String::new(),
        }),
        tip: None,
    };

    let body_bytes = body.encode_to_vec();
    let auth_info_bytes = auth_info.encode_to_vec();
    let sign_doc = SignDoc {
        body_bytes: body_bytes.clone(),
        auth_info_bytes: auth_info_bytes.clone(),
        chain_id: params.chain_id.clone(),
        account_number: params.account_number,
    };

    let digest = Sha256::digest(sign_doc.encode_to_vec());
    let signature: Signature = key
        .sign_prehash(digest.as_slice())
        .map_err(|err| ChainError::Signing(err.to_string()))?;

    Ok(TxRaw {
        body_bytes,
        auth_info_bytes,
        signatures: vec![signature.to_bytes().to_vec()],
    }
    .encode_to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::signature::hazmat::PrehashVerifier;

    fn key() -> SigningKey {
        SigningKey::from_slice(&[0x42; 32]).unwrap()
    }

    fn params() -> TxParams {
        TxParams {
            chain_id: String::from("neutron-1"),
            account_number: 7,
            sequence: 3,
            fee_denom: String::from("untrn"),
            fee_amount: 20000,
            gas_limit: 400000,
        }
    }

    #[test]
    fn account_address_is_deterministic() {
        let address = account_address("neutron", &key()).unwrap();
        assert!(address.starts_with("neutron1"));
        assert_eq!(address, account_address("neutron", &key()).unwrap());
    }

    #[test]
    fn account_address_rejects_bad_prefix() {
        assert!(matches!(
            account_address("not a prefix", &key()),
            Err(ChainError::InvalidPrefix)
        ));
    }

    #[test]
    fn built_tx_decodes_and_verifies() {
        let key = key();
        let sender = account_address("neutron", &key).unwrap();
        let msg = br#"{"mint_sponsored":{"to":"neutron1user","token_id":1,"amount":"1"}}"#.to_vec();

        let raw = build_execute_tx(&key, &sender, "neutron1registry", msg.clone(), vec![], &params())
            .unwrap();

        // RFC 6979 signing: same inputs, same bytes
        let again =
            build_execute_tx(&key, &sender, "neutron1registry", msg.clone(), vec![], &params())
                .unwrap();
        assert_eq!(raw, again);

        let tx = TxRaw::decode(raw.as_slice()).unwrap();
        assert_eq!(tx.signatures.len(), 1);
        assert_eq!(tx.signatures[0].len(), 64);

        let body = TxBody::decode(tx.body_bytes.as_slice()).unwrap();
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].type_url, "/cosmwasm.wasm.v1.MsgExecuteContract");
        let execute = MsgExecuteContract::decode(body.messages[0].value.as_slice()).unwrap();
        assert_eq!(execute.sender, sender);
        assert_eq!(execute.contract, "neutron1registry");
        assert_eq!(execute.msg, msg);

        let auth_info = AuthInfo::decode(tx.auth_info_bytes.as_slice()).unwrap();
        assert_eq!(auth_info.signer_infos[0].sequence, 3);
        let fee = auth_info.fee.unwrap();
        assert_eq!(fee.gas_limit, 400000);
        assert_eq!(fee.amount[0].amount, "20000");

        // the signature must check out against the sign doc
        let sign_doc = SignDoc {
            body_bytes: tx.body_bytes.clone(),
            auth_info_bytes: tx.auth_info_bytes.clone(),
            chain_id: String::from("neutron-1"),
            account_number: 7,
        };
        let digest = Sha256::digest(sign_doc.encode_to_vec());
        let signature = Signature::from_slice(&tx.signatures[0]).unwrap();
        key.verifying_key()
            .verify_prehash(digest.as_slice(), &signature)
            .unwrap();
    }
}
