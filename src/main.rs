use chainconsole::{
    config::ConsoleConfig,
    console::ConsoleContext,
    constants::*,
    emit_system_event,
    node::{
        memory::{ChainState, MemoryChain, MemoryHost, MemoryTableStore},
        AbiEncoder, IniConfigLoader, SecretKey,
    },
    ConsoleServer,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;

#[derive(Parser, Debug)]
#[command(author, version, about = "Blockchain node admin console server")]
struct Args {
    /// Optional path to config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("console.toml"));
    let mut config = if config_path.exists() {
        match ConsoleConfig::load(&config_path) {
            Ok(cfg) => {
                println!(
                    "{}Loaded config from: {}",
                    ICON_PLACEHOLDER,
                    config_path.display()
                );
                cfg
            }
            Err(err) => {
                eprintln!("❌ {}", err);
                std::process::exit(1);
            }
        }
    } else {
        println!(
            "⚠️ No config file found at '{}', falling back to default config.",
            config_path.display()
        );
        ConsoleConfig::default()
    };
    if let Some(port) = args.port {
        config.port = port;
    }

    // Initialize events AFTER config is loaded so custom logging path can be applied
    chainconsole::events::init_events_from_config(config.logging.as_ref()).await;

    let signing_key = match config.signing_key() {
        Ok(Some(key)) => key,
        Ok(None) => {
            println!(
                "⚠️ No signing_key configured, miner transactions will be signed with an ephemeral key."
            );
            SecretKey::ephemeral()
        }
        Err(err) => {
            eprintln!("❌ {}", err);
            std::process::exit(1);
        }
    };

    let ctx = ConsoleContext {
        chain: Arc::new(MemoryChain::new(ChainState::default())),
        host: Arc::new(MemoryHost::new()),
        store: Arc::new(MemoryTableStore::new()),
        encoder: Arc::new(AbiEncoder),
        node_config: Arc::new(IniConfigLoader::new(config.node_config.clone())),
        signing_key,
    };

    let app_name = config.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME);
    emit_system_event!("node", Info, "startup", "app={} version={}", app_name, full_version());

    let mut server = ConsoleServer::new(ctx);
    let bound = match server.start_listening(&config.bind_addr()).await {
        Ok(addr) => addr,
        Err(err) => {
            eprintln!("❌ Listener error: {:#}", err);
            std::process::exit(1);
        }
    };
    println!(
        "🟢 {} is listening on {}. Press Ctrl+C to shut down...",
        app_name, bound
    );

    if let Err(err) = signal::ctrl_c().await {
        eprintln!("❌ Failed to listen for shutdown signal: {}", err);
    }
    server.stop_listening();
    println!("🛑 {} shutting down gracefully.", app_name);
}
