use chainconsole::console::Command;
use chainconsole::constants::{full_version, DEFAULT_LISTEN_ADDR, DEFAULT_PORT, ICON_PLACEHOLDER};
use chainconsole::network::{read_frame, write_frame, FrameError};
use clap::Parser;
use tokio::io::{ReadHalf, WriteHalf};
use tokio::net::TcpStream;

/// chainconsole-ctl: interactive client for the node admin console
///
/// With trailing arguments the command is sent once and the reply printed;
/// without them an interactive prompt with history and completion starts.
#[derive(Parser, Debug)]
#[command(
    name = "chainconsole-ctl",
    version,
    about = "Client for the node admin console"
)]
struct Cli {
    /// Console address (host:port)
    #[arg(short, long)]
    addr: Option<String>,

    /// Run a single command and exit
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

struct Connection {
    reader: ReadHalf<TcpStream>,
    writer: WriteHalf<TcpStream>,
}

impl Connection {
    async fn open(addr: &str) -> std::io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let (reader, writer) = tokio::io::split(stream);
        Ok(Self { reader, writer })
    }

    /// Send one request; `None` when the server closed the session instead of replying.
    async fn request(&mut self, line: &str) -> Result<Option<String>, FrameError> {
        write_frame(&mut self.writer, line.as_bytes()).await?;
        match read_frame(&mut self.reader).await {
            Ok(reply) => Ok(Some(String::from_utf8_lossy(&reply).into_owned())),
            Err(FrameError::Closed) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let addr = cli
        .addr
        .unwrap_or_else(|| format!("{}:{}", DEFAULT_LISTEN_ADDR, DEFAULT_PORT));

    let mut conn = match Connection::open(&addr).await {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("❌ Failed to connect to '{}': {}", addr, err);
            std::process::exit(2);
        }
    };

    if !cli.command.is_empty() {
        let line = cli.command.join(" ");
        match conn.request(&line).await {
            Ok(Some(reply)) => print!("{}", reply),
            Ok(None) => {}
            Err(err) => {
                eprintln!("❌ {}", err);
                std::process::exit(1);
            }
        }
        return;
    }

    run_prompt(&mut conn, &addr).await;
}

async fn run_prompt(conn: &mut Connection, addr: &str) {
    use rustyline::{CompletionType, Config as RLConfig, Editor};
    let rl_cfg = RLConfig::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();
    let mut rl: Editor<CommandCompleter, rustyline::history::DefaultHistory> =
        match Editor::with_config(rl_cfg) {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("❌ Failed to initialise line editor: {}", err);
                std::process::exit(1);
            }
        };
    rl.set_helper(Some(CommandCompleter));

    // Load history from HOME/USERPROFILE if available; fallback to local file
    let hist_path = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(|home| std::path::PathBuf::from(home).join(".chainconsole_history"))
        .unwrap_or_else(|_| std::path::PathBuf::from(".chainconsole_history"));
    let _ = rl.load_history(hist_path.as_path());

    println!(
        "{}chainconsole {} connected to {}. Enter 'help' for command list.",
        ICON_PLACEHOLDER,
        full_version(),
        addr
    );

    loop {
        let line = match rl.readline("console> ") {
            Ok(mut l) => {
                l.truncate(l.trim_end().len());
                l
            }
            Err(rustyline::error::ReadlineError::Eof)
            | Err(rustyline::error::ReadlineError::Interrupted) => {
                // let the server close the session cleanly
                let _ = conn.request(Command::Quit.name()).await;
                println!("👋 Exiting.");
                break;
            }
            Err(e) => {
                println!("❌ Read error: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line.as_str());

        match conn.request(&line).await {
            Ok(Some(reply)) => {
                print!("{}", reply);
                if !reply.ends_with('\n') {
                    println!();
                }
            }
            Ok(None) => {
                println!("👋 Session closed by server.");
                break;
            }
            Err(err) => {
                println!("❌ {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(&hist_path);
}

/// Completes the first token against the console's command names.
struct CommandCompleter;

impl rustyline::Helper for CommandCompleter {}

impl rustyline::hint::Hinter for CommandCompleter {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        None
    }
}

impl rustyline::highlight::Highlighter for CommandCompleter {}

impl rustyline::validate::Validator for CommandCompleter {}

impl rustyline::completion::Completer for CommandCompleter {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> Result<(usize, Vec<Self::Candidate>), rustyline::error::ReadlineError> {
        let before = &line[..pos];
        if before.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let out = Command::ALL
            .iter()
            .map(|c| c.name())
            .filter(|name| name.starts_with(before))
            .map(|name| rustyline::completion::Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((0, out))
    }
}
