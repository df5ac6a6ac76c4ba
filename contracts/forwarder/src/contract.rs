use bech32::{Bech32, Hrp};
use cosmwasm_std::{
    attr, to_json_binary, to_json_vec, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    WasmMsg,
};
use fridge_base::{
    error::forwarder::{ContractError, ContractResult},
    msg::forwarder::{
        ExecuteMsg, ForwardPayload, ForwardRequest, ForwardedExecuteMsg, InstantiateMsg,
        MigrateMsg, NonceResponse, QueryMsg, VerifyResponse,
    },
    state::forwarder::{ADDRESS_PREFIX, NONCES},
};
use fridge_helpers::answer::response;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

pub const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> ContractResult<Response> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Hrp::parse(&msg.address_prefix).map_err(|_| ContractError::InvalidPrefix {})?;
    ADDRESS_PREFIX.save(deps.storage, &msg.address_prefix)?;

    Ok(response(
        "instantiate",
        CONTRACT_NAME,
        [attr("address_prefix", msg.address_prefix)],
    ))
}

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> ContractResult<Response> {
    match msg {
        ExecuteMsg::Execute {
            req,
            signature,
            public_key,
        } => execute_forward(deps, env, info, req, signature, public_key),
    }
}

fn execute_forward(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    req: ForwardRequest,
    signature: Binary,
    public_key: Binary,
) -> ContractResult<Response> {
    let from = deps.api.addr_validate(&req.from)?;

    let expected = NONCES.may_load(deps.storage, &from)?.unwrap_or_default();
    if req.nonce != expected {
        return Err(ContractError::NonceMismatch {
            expected,
            actual: req.nonce,
        });
    }

    // The submitter fronts exactly the funds the signer asked to attach.
    if info.funds != req.funds {
        return Err(ContractError::FundsMismatch {});
    }

    verify_request(deps.as_ref(), &env, &req, &signature, &public_key)?;

    NONCES.save(deps.storage, &from, &(expected + 1))?;

    // A failure inside the target contract reverts the nonce bump with it,
    // so the signed request stays submittable.
    let forward_msg = WasmMsg::Execute {
        contract_addr: req.to.clone(),
        msg: to_json_binary(&ForwardedExecuteMsg::Forwarded {
            sender: req.from.clone(),
            msg: req.msg,
        })?,
        funds: req.funds,
    };

    Ok(response(
        "execute-forward",
        CONTRACT_NAME,
        [
            attr("from", req.from),
            attr("to", req.to),
            attr("nonce", expected.to_string()),
        ],
    )
    .add_message(forward_msg))
}

/// Checks that `signature` over the chain- and deployment-scoped payload
/// was produced by `public_key`, and that this key controls `req.from`.
fn verify_request(
    deps: Deps,
    env: &Env,
    req: &ForwardRequest,
    signature: &Binary,
    public_key: &Binary,
) -> ContractResult<()> {
    let digest = request_digest(&env.block.chain_id, env.contract.address.as_str(), req)?;
    if !deps
        .api
        .secp256k1_verify(&digest, signature.as_slice(), public_key.as_slice())?
    {
        return Err(ContractError::InvalidSignature {});
    }

    let prefix = ADDRESS_PREFIX.load(deps.storage)?;
    if derive_address(&prefix, public_key.as_slice())? != req.from {
        return Err(ContractError::InvalidSignature {});
    }
    Ok(())
}

/// Sha256 of the canonical JSON payload the user signs.
pub fn request_digest(
    chain_id: &str,
    forwarder: &str,
    req: &ForwardRequest,
) -> ContractResult<Vec<u8>> {
    let payload = to_json_vec(&ForwardPayload {
        chain_id: chain_id.to_string(),
        forwarder: forwarder.to_string(),
        req: req.clone(),
    })?;
    Ok(Sha256::digest(payload).to_vec())
}

/// Standard Cosmos account address for a compressed secp256k1 key:
/// bech32(prefix, ripemd160(sha256(pubkey))).
pub fn derive_address(prefix: &str, public_key: &[u8]) -> ContractResult<String> {
    let hrp = Hrp::parse(prefix).map_err(|_| ContractError::InvalidPrefix {})?;
    let hash = Ripemd160::digest(Sha256::digest(public_key));
    bech32::encode::<Bech32>(hrp, &hash)
        .map_err(|err| ContractError::Std(StdError::generic_err(err.to_string())))
}

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> ContractResult<Binary> {
    match msg {
        QueryMsg::Nonce { address } => {
            let address = deps.api.addr_validate(&address)?;
            let nonce = NONCES.may_load(deps.storage, &address)?.unwrap_or_default();
            Ok(to_json_binary(&NonceResponse { nonce })?)
        }
        QueryMsg::Verify {
            req,
            signature,
            public_key,
        } => {
            let valid = verify_request(deps, &env, &req, &signature, &public_key).is_ok();
            Ok(to_json_binary(&VerifyResponse { valid })?)
        }
    }
}

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> ContractResult<Response> {
    let version: semver::Version = CONTRACT_VERSION.parse()?;
    let storage_version: semver::Version =
        cw2::get_contract_version(deps.storage)?.version.parse()?;

    if storage_version < version {
        cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    }

    Ok(Response::new())
}
