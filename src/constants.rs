//! Central place for application-wide constants and default values.

/// Default application name (can be overridden in config)
pub const DEFAULT_APP_NAME: &str = "chainconsole";

/// Left padding used to align log lines with those that include emoji prefixes.
pub const ICON_PLACEHOLDER: &str = "   ";

/// Default console listen address and port.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 20200;

/// Node configuration file read by `p2p.update`.
pub const DEFAULT_NODE_CONFIG: &str = "config.ini";

/// Upper bound for a single framed message in either direction.
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Number of blocks a submitted transaction stays valid for.
pub const BLOCK_LIMIT_WINDOW: u64 = 100;

/// Precompiled contract managing the miner list.
pub const MINER_PRECOMPILE_ADDRESS: u64 = 0x1003;

/// Width of the separator rules in console reports.
pub const RULE_WIDTH: usize = 70;

/// Application / crate version (populated from Cargo.toml via env! macro)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Optional short git commit hash (set via build script or cargo:rustc-env). Falls back to "unknown".
pub fn git_commit() -> &'static str {
    option_env!("GIT_COMMIT").unwrap_or("unknown")
}

/// Human friendly version string used in the ctl banner and startup log.
pub fn full_version() -> String {
    format!("v{} (commit={})", APP_VERSION, git_commit())
}
