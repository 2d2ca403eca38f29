// src/console/handlers.rs
// One handler per console command. Handlers report collaborator failures as
// `Err`; `run` turns those into the one-line error reply.

use anyhow::Context;

use crate::console::context::ConsoleContext;
use crate::console::format::Report;
use crate::console::registry::Command;
use crate::console::static_nodes::{StaticNodePlan, P2P_SECTION};
use crate::constants::MINER_PRECOMPILE_ADDRESS;
use crate::events::dispatcher::emit_system;
use crate::events::model::{CommandOutcome, LogLevel};
use crate::node::types::Address;
use crate::tx::build_call;

/// Handler result before error conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Report(String),
    /// Wrong arguments; not an error.
    Usage(String),
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub outcome: CommandOutcome,
    /// Diagnostic chain when the handler failed.
    pub detail: Option<String>,
}

/// Run `command`, never failing: collaborator errors become `ERROR while <command>`.
pub async fn run(ctx: &ConsoleContext, command: Command, args: &[String]) -> Reply {
    match dispatch(ctx, command, args).await {
        Ok(Response::Report(text)) => Reply {
            text,
            outcome: CommandOutcome::Ok,
            detail: None,
        },
        Ok(Response::Usage(text)) => Reply {
            text,
            outcome: CommandOutcome::Usage,
            detail: None,
        },
        Err(err) => Reply {
            text: error_line(command, &err),
            outcome: CommandOutcome::Failed,
            detail: Some(format!("{:#}", err)),
        },
    }
}

async fn dispatch(
    ctx: &ConsoleContext,
    command: Command,
    args: &[String],
) -> anyhow::Result<Response> {
    match command {
        Command::Help => Ok(help()),
        Command::Status => status(ctx).await,
        Command::P2pPeers => p2p_peers(ctx).await,
        Command::P2pMiners => p2p_miners(ctx).await,
        Command::P2pUpdate => p2p_update(ctx).await,
        Command::AmdbSelect => amdb_select(ctx, args).await,
        Command::MinerAdd => change_miner(ctx, command, "add(string)", "add", args).await,
        Command::MinerRemove => {
            change_miner(ctx, command, "remove(string)", "remove", args).await
        }
        // closing the session is the dispatcher's job
        Command::Quit => Ok(Response::Report(String::new())),
    }
}

fn error_line(command: Command, err: &anyhow::Error) -> String {
    match command {
        Command::MinerAdd | Command::MinerRemove => {
            format!("ERROR while {} | {}", command, err)
        }
        _ => format!("ERROR while {}", command),
    }
}

pub fn help() -> Response {
    let mut report = Report::new();
    report.double_rule();
    for command in Command::ALL {
        report.line(format_args!("{:<23}{}", command.name(), command.summary()));
    }
    report.double_rule().blank();
    Response::Report(report.finish())
}

async fn status(ctx: &ConsoleContext) -> anyhow::Result<Response> {
    let state = if ctx.chain.would_seal().await.context("querying seal state")? {
        "sealing"
    } else if ctx.chain.is_syncing().await.context("querying sync state")?
        || ctx
            .chain
            .is_major_syncing()
            .await
            .context("querying major sync state")?
    {
        "syncing block..."
    } else {
        ""
    };
    let number = ctx.chain.number().await.context("reading block number")?;
    let view = ctx
        .chain
        .consensus_view()
        .await
        .context("reading consensus view")?;

    let mut report = Report::new();
    report
        .double_rule()
        .field("Status: ", state)
        .line(format_args!("Block number:{} at view:{}", number, view))
        .single_rule()
        .blank();
    Ok(Response::Report(report.finish()))
}

async fn p2p_peers(ctx: &ConsoleContext) -> anyhow::Result<Response> {
    let peers = ctx
        .host
        .peer_session_info()
        .await
        .context("listing peer sessions")?;

    let mut report = Report::new();
    report.double_rule().field("Peers number: ", peers.len());
    for peer in &peers {
        let connected = ctx
            .host
            .is_connected(&peer.id)
            .await
            .with_context(|| format!("checking connectivity of {}", peer.id))?;
        report
            .single_rule()
            .field("Nodeid: ", &peer.id)
            .field("Ip: ", &peer.host)
            .field("Port:", peer.port)
            .field("Connected: ", u8::from(connected))
            .single_rule();
    }
    report.blank();
    Ok(Response::Report(report.finish()))
}

async fn p2p_miners(ctx: &ConsoleContext) -> anyhow::Result<Response> {
    let miners = ctx.chain.miner_list().await.context("reading miner list")?;

    let mut report = Report::new();
    report
        .double_rule()
        .field("Miners number: ", miners.len())
        .single_rule();
    for miner in &miners {
        report.field("Nodeid: ", miner);
    }
    report.single_rule().blank();
    Ok(Response::Report(report.finish()))
}

async fn p2p_update(ctx: &ConsoleContext) -> anyhow::Result<Response> {
    let tree = ctx.node_config.load().context("loading node config")?;
    let plan = StaticNodePlan::from_tree(&tree)
        .with_context(|| format!("node config has no [{}] section", P2P_SECTION))?;

    for skipped in &plan.skipped {
        emit_system(
            "console",
            LogLevel::Error,
            "static_node_skipped",
            Some(format!(
                "{}={} reason={}",
                skipped.key, skipped.value, skipped.reason
            )),
        );
    }
    let accepted = plan.accepted.len();
    ctx.host
        .set_static_nodes(plan.accepted)
        .await
        .context("replacing static nodes")?;
    emit_system(
        "console",
        LogLevel::Info,
        "static_nodes_replaced",
        Some(format!(
            "accepted={} skipped={}",
            accepted,
            plan.skipped.len()
        )),
    );

    let mut report = Report::new();
    report.double_rule().line("Add staticNode: ").single_rule();
    for (key, value) in &plan.attempted {
        report.line(format_args!("{} : {}", key, value));
    }
    report
        .single_rule()
        .line("update successfully！")
        .single_rule()
        .blank();
    Ok(Response::Report(report.finish()))
}

async fn amdb_select(ctx: &ConsoleContext, args: &[String]) -> anyhow::Result<Response> {
    let [table, key] = args else {
        let mut report = Report::new();
        report
            .line("You must specify table name and table key, for example")
            .line("amdb.select t_test fruit")
            .blank();
        return Ok(Response::Usage(report.finish()));
    };

    let number = ctx.chain.number().await.context("reading block number")?;
    let hash = ctx
        .chain
        .hash_from_number(number)
        .await
        .with_context(|| format!("resolving hash of block {}", number))?;
    let entries = ctx
        .store
        .select(&hash, number, table, key)
        .await
        .with_context(|| format!("selecting {}/{} at block {}", table, key, number))?;

    let mut report = Report::new();
    report
        .double_rule()
        .field("Number of entry: ", entries.len())
        .single_rule();
    for entry in &entries {
        for (field, value) in &entry.fields {
            report.line(format_args!("{}: {}", field, value));
        }
        report.single_rule();
    }
    report.blank();
    Ok(Response::Report(report.finish()))
}

async fn change_miner(
    ctx: &ConsoleContext,
    command: Command,
    signature: &str,
    verb: &str,
    args: &[String],
) -> anyhow::Result<Response> {
    let [node_id] = args else {
        let mut report = Report::new();
        report
            .line("You must specify nodeID, for example")
            .line(format_args!("{} 123456789...", command))
            .single_rule();
        return Ok(Response::Usage(report.finish()));
    };

    let height = ctx.chain.number().await.context("reading block number")?;
    let data = ctx
        .encoder
        .encode(signature, &[node_id.as_str()])
        .with_context(|| format!("encoding {}", signature))?;
    let tx = build_call(
        Address::from_low_u64_be(MINER_PRECOMPILE_ADDRESS),
        data,
        height,
    );
    let random_id = tx.random_id;
    let tx_hash = ctx
        .chain
        .submit_transaction(tx, &ctx.signing_key)
        .await
        .context("submitting transaction")?;
    emit_system(
        "console",
        LogLevel::Info,
        "miner_tx_submitted",
        Some(format!(
            "call={} node={} random_id={:032x} tx={}",
            signature, node_id, random_id, tx_hash
        )),
    );

    let mut report = Report::new();
    report
        .line(format_args!("{} miner : {}", verb, node_id))
        .single_rule();
    Ok(Response::Report(report.finish()))
}
