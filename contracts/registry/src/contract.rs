use cosmwasm_std::{
    attr, ensure_eq, from_json, to_json_binary, Addr, BankMsg, Binary, Deps, DepsMut, Env,
    MessageInfo, Order, Response, StdResult, Uint128,
};
use cw_storage_plus::Bound;
use fridge_base::{
    error::registry::{ContractError, ContractResult},
    msg::registry::{
        ArtworkResponse, BalanceResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg,
        QueryMsg,
    },
    state::registry::{Artwork, Config, ARTWORKS, BALANCES, CONFIG, LAST_TOKEN_ID},
};
use fridge_helpers::{
    answer::{attr_coin, response},
    pause::{is_paused, pause_guard, set_pause, unpause, PauseInfoResponse},
};

pub const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 30;
const MAX_LIMIT: u32 = 100;

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> ContractResult<Response> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    cw_ownable::initialize_owner(deps.storage, deps.api, Some(&msg.owner))?;

    let platform = deps.api.addr_validate(&msg.platform)?;
    let forwarder = msg
        .forwarder
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    CONFIG.save(
        deps.storage,
        &Config {
            platform: platform.clone(),
            forwarder: forwarder.clone(),
            price_denom: msg.price_denom.clone(),
        },
    )?;
    LAST_TOKEN_ID.save(deps.storage, &0)?;

    Ok(response(
        "instantiate",
        CONTRACT_NAME,
        [
            attr("platform", platform),
            attr(
                "forwarder",
                forwarder.map_or_else(|| "none".to_string(), |f| f.into_string()),
            ),
            attr("price_denom", msg.price_denom),
        ],
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
        ExecuteMsg::UpdateOwnership(action) => {
            cw_ownable::update_ownership(deps, &env.block, &info.sender, action)?;
            Ok(response::<(&str, &str), _>(
                "execute-update-ownership",
                CONTRACT_NAME,
                [],
            ))
        }
        ExecuteMsg::CreateArtwork {
            max_supply,
            artist,
            price,
            uri,
        } => execute_create_artwork(deps, info, max_supply, artist, price, uri),
        ExecuteMsg::Mint {
            to,
            token_id,
            amount,
        } => execute_mint(deps, info, to, token_id, amount),
        ExecuteMsg::MintSponsored {
            to,
            token_id,
            amount,
        }
        | ExecuteMsg::MintByPlatform {
            to,
            token_id,
            amount,
        } => execute_mint_sponsored(deps, info, to, token_id, amount),
        ExecuteMsg::Forwarded { sender, msg } => execute_forwarded(deps, env, info, sender, msg),
        ExecuteMsg::UpdatePrice { token_id, price } => {
            execute_update_price(deps, info, token_id, price)
        }
        ExecuteMsg::UpdateArtist { token_id, artist } => {
            execute_update_artist(deps, info, token_id, artist)
        }
        ExecuteMsg::UpdateConfig {
            platform,
            forwarder,
        } => execute_update_config(deps, info, platform, forwarder),
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
    }
}

fn execute_create_artwork(
    deps: DepsMut,
    info: MessageInfo,
    max_supply: Uint128,
    artist: String,
    price: Uint128,
    uri: String,
) -> ContractResult<Response> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    if max_supply.is_zero() {
        return Err(ContractError::ZeroMaxSupply {});
    }
    let artist = deps.api.addr_validate(&artist)?;

    let token_id = LAST_TOKEN_ID.load(deps.storage)? + 1;
    LAST_TOKEN_ID.save(deps.storage, &token_id)?;
    ARTWORKS.save(
        deps.storage,
        token_id,
        &Artwork {
            max_supply,
            current_supply: Uint128::zero(),
            price,
            artist: artist.clone(),
            uri: uri.clone(),
        },
    )?;

    Ok(response(
        "execute-create-artwork",
        CONTRACT_NAME,
        [
            attr("token_id", token_id.to_string()),
            attr("artist", artist),
            attr("max_supply", max_supply),
            attr("price", price),
            attr("uri", uri),
        ],
    ))
}

fn load_artwork(deps: Deps, token_id: u64) -> ContractResult<Artwork> {
    ARTWORKS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::UnknownToken { token_id })
}

// Shared supply/balance bookkeeping for both mint paths. Pause and
// authorization are checked by the callers.
fn apply_mint(
    deps: &mut DepsMut,
    token_id: u64,
    artwork: &mut Artwork,
    to: &Addr,
    amount: Uint128,
) -> ContractResult<()> {
    if amount.is_zero() {
        return Err(ContractError::NothingToMint {});
    }
    let new_supply = artwork
        .current_supply
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow {})?;
    if new_supply > artwork.max_supply {
        return Err(ContractError::SupplyExceeded {});
    }
    artwork.current_supply = new_supply;
    ARTWORKS.save(deps.storage, token_id, artwork)?;

    let balance = BALANCES
        .may_load(deps.storage, (token_id, to))?
        .unwrap_or_default()
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow {})?;
    BALANCES.save(deps.storage, (token_id, to), &balance)?;
    Ok(())
}

fn execute_mint(
    mut deps: DepsMut,
    info: MessageInfo,
    to: String,
    token_id: u64,
    amount: Uint128,
) -> ContractResult<Response> {
    pause_guard(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    let mut artwork = load_artwork(deps.as_ref(), token_id)?;

    let required = artwork
        .price
        .checked_mul(amount)
        .map_err(|_| ContractError::Overflow {})?;
    let paid = cw_utils::may_pay(&info, &config.price_denom)?;
    if paid < required {
        return Err(ContractError::InsufficientPayment {
            required,
            sent: paid,
        });
    }

    let to = deps.api.addr_validate(&to)?;
    apply_mint(&mut deps, token_id, &mut artwork, &to, amount)?;

    let mut msgs = vec![];
    if !info.funds.is_empty() {
        // Whatever was attached goes to the artist, overpayment included.
        msgs.push(BankMsg::Send {
            to_address: artwork.artist.to_string(),
            amount: info.funds,
        });
    }

    Ok(response(
        "execute-mint",
        CONTRACT_NAME,
        [
            attr("token_id", token_id.to_string()),
            attr("to", to),
            attr("amount", amount),
            attr_coin("payment", paid, &config.price_denom),
            attr("artist", artwork.artist),
        ],
    )
    .add_messages(msgs))
}

fn execute_mint_sponsored(
    mut deps: DepsMut,
    info: MessageInfo,
    to: String,
    token_id: u64,
    amount: Uint128,
) -> ContractResult<Response> {
    pause_guard(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    ensure_eq!(info.sender, config.platform, ContractError::Unauthorized {});

    let mut artwork = load_artwork(deps.as_ref(), token_id)?;
    let to = deps.api.addr_validate(&to)?;
    apply_mint(&mut deps, token_id, &mut artwork, &to, amount)?;

    Ok(response(
        "execute-mint-sponsored",
        CONTRACT_NAME,
        [
            attr("token_id", token_id.to_string()),
            attr("to", to),
            attr("amount", amount),
        ],
    ))
}

fn execute_forwarded(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    sender: String,
    msg: Binary,
) -> ContractResult<Response> {
    let config = CONFIG.load(deps.storage)?;
    let forwarder = config.forwarder.ok_or(ContractError::Unauthorized {})?;
    ensure_eq!(info.sender, forwarder, ContractError::Unauthorized {});

    let sender = deps.api.addr_validate(&sender)?;
    let inner: ExecuteMsg = from_json(&msg)?;
    execute(
        deps,
        env,
        MessageInfo {
            sender,
            funds: info.funds,
        },
        inner,
    )
}

fn execute_update_price(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
    price: Uint128,
) -> ContractResult<Response> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let mut artwork = load_artwork(deps.as_ref(), token_id)?;
    artwork.price = price;
    ARTWORKS.save(deps.storage, token_id, &artwork)?;

    Ok(response(
        "execute-update-price",
        CONTRACT_NAME,
        [attr("token_id", token_id.to_string()), attr("price", price)],
    ))
}

fn execute_update_artist(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
    artist: String,
) -> ContractResult<Response> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let mut artwork = load_artwork(deps.as_ref(), token_id)?;
    artwork.artist = deps.api.addr_validate(&artist)?;
    ARTWORKS.save(deps.storage, token_id, &artwork)?;

    Ok(response(
        "execute-update-artist",
        CONTRACT_NAME,
        [
            attr("token_id", token_id.to_string()),
            attr("artist", artwork.artist),
        ],
    ))
}

fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    platform: Option<String>,
    forwarder: Option<String>,
) -> ContractResult<Response> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    let mut attrs = vec![];

    if let Some(platform) = platform {
        config.platform = deps.api.addr_validate(&platform)?;
        attrs.push(attr("platform", platform));
    }
    if let Some(forwarder) = forwarder {
        config.forwarder = Some(deps.api.addr_validate(&forwarder)?);
        attrs.push(attr("forwarder", forwarder));
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(response("execute-update-config", CONTRACT_NAME, attrs))
}

fn execute_pause(deps: DepsMut, info: MessageInfo) -> ContractResult<Response> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    set_pause(deps.storage)?;

    Ok(response::<(&str, &str), _>(
        "execute-pause",
        CONTRACT_NAME,
        [],
    ))
}

fn execute_unpause(deps: DepsMut, info: MessageInfo) -> ContractResult<Response> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    unpause(deps.storage);

    Ok(response::<(&str, &str), _>(
        "execute-unpause",
        CONTRACT_NAME,
        [],
    ))
}

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> ContractResult<Binary> {
    match msg {
        QueryMsg::Ownership {} => Ok(to_json_binary(&cw_ownable::get_ownership(deps.storage)?)?),
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            Ok(to_json_binary(&ConfigResponse {
                platform: config.platform.into_string(),
                forwarder: config.forwarder.map(Addr::into_string),
                price_denom: config.price_denom,
            })?)
        }
        QueryMsg::PauseInfo {} => {
            if is_paused(deps.storage)? {
                Ok(to_json_binary(&PauseInfoResponse::Paused {})?)
            } else {
                Ok(to_json_binary(&PauseInfoResponse::Unpaused {})?)
            }
        }
        QueryMsg::Artwork { token_id } => {
            let artwork = load_artwork(deps, token_id)?;
            Ok(to_json_binary(&artwork_response(token_id, artwork))?)
        }
        QueryMsg::Artworks { start_after, limit } => {
            let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
            let start = start_after.map(Bound::exclusive);
            let artworks = ARTWORKS
                .range(deps.storage, start, None, Order::Ascending)
                .take(limit)
                .map(|item| item.map(|(token_id, artwork)| artwork_response(token_id, artwork)))
                .collect::<StdResult<Vec<_>>>()?;
            Ok(to_json_binary(&artworks)?)
        }
        QueryMsg::Balance { address, token_id } => {
            let address = deps.api.addr_validate(&address)?;
            let balance = BALANCES
                .may_load(deps.storage, (token_id, &address))?
                .unwrap_or_default();
            Ok(to_json_binary(&BalanceResponse { balance })?)
        }
    }
}

fn artwork_response(token_id: u64, artwork: Artwork) -> ArtworkResponse {
    ArtworkResponse {
        token_id,
        is_one_of_one: artwork.is_one_of_one(),
        sold_out: artwork.sold_out(),
        uri: artwork.uri,
        max_supply: artwork.max_supply,
        current_supply: artwork.current_supply,
        price: artwork.price,
        artist: artwork.artist.into_string(),
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
