use anyhow::{Context, Result, bail};
use clap::Args;
use colored::*;
use dialoguer::Input;
use fastcall_client::{
    ClientConfig, LoggingRenderer, NegotiationEngine, SessionHandle, SyntheticCapture,
    spawn_session,
};
use fastcall_core::IceServerConfig;
use fastcall_core::utils::default_ice_servers;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

#[derive(Args)]
pub struct CallArgs {
    /// Room to join; prompted for when omitted.
    #[arg(short, long)]
    room: Option<String>,

    #[arg(long, env = "FASTCALL_SIGNALING_URL", default_value = "ws://localhost:8000")]
    url: String,

    /// STUN/TURN url, repeatable. Public STUN servers are used when empty.
    #[arg(long = "ice")]
    ice: Vec<String>,

    #[arg(long)]
    no_audio: bool,

    #[arg(long)]
    no_video: bool,
}

impl CallArgs {
    fn client_config(&self) -> ClientConfig {
        let ice_servers = if self.ice.is_empty() {
            default_ice_servers()
        } else {
            vec![IceServerConfig {
                urls: self.ice.clone(),
                username: None,
                credential: None,
            }]
        };
        ClientConfig {
            signaling_url: self.url.clone(),
            ice_servers,
        }
    }
}

enum Command {
    Start,
    Hangup,
    Leave,
    Status,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "start" | "s" => Some(Command::Start),
            "hangup" | "h" => Some(Command::Hangup),
            "leave" | "l" => Some(Command::Leave),
            "status" | "?" => Some(Command::Status),
            "quit" | "q" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

pub async fn run(args: CallArgs) -> Result<()> {
    let room = match args.room.clone() {
        Some(room) => room,
        None => prompt_room().await?,
    };

    let capture = SyntheticCapture {
        audio: !args.no_audio,
        video: !args.no_video,
    };
    let engine = Arc::new(NegotiationEngine::from_config(
        &args.client_config(),
        Arc::new(capture),
        Arc::new(LoggingRenderer),
    ));
    let session = spawn_session(engine);

    session
        .join(room.as_str())
        .await
        .with_context(|| format!("Failed to join room {}", room))?;
    println!("{}", format!("Joined room {}", room).green().bold());
    println!("Commands: {}", "start | hangup | leave | status | quit".cyan());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(command) = Command::parse(&line) else {
            println!("{} {}", "Unknown command:".yellow(), line.trim());
            continue;
        };
        if let Command::Quit = command {
            break;
        }
        if let Err(e) = dispatch(&session, command).await {
            println!("{} {:#}", "Error:".red().bold(), e);
        }
    }

    session.leave().await?;
    println!("{}", "Bye".green());
    Ok(())
}

async fn dispatch(session: &SessionHandle, command: Command) -> Result<()> {
    match command {
        Command::Start => session.start().await?,
        Command::Hangup => session.hangup().await?,
        Command::Leave => session.leave().await?,
        Command::Status => {}
        Command::Quit => return Ok(()),
    }

    let snapshot = session.snapshot().await?;
    debug!("{:?}", snapshot);
    println!(
        "{} {}  local tracks: {}  remote tracks: {}",
        "State:".cyan(),
        snapshot.state.to_string().bold(),
        snapshot.local_tracks,
        snapshot.remote_tracks
    );
    Ok(())
}

async fn prompt_room() -> Result<String> {
    let room = tokio::task::spawn_blocking(|| {
        Input::<String>::new()
            .with_prompt("Room")
            .interact_text()
    })
    .await
    .context("Room prompt was interrupted")??;

    if room.trim().is_empty() {
        bail!("Room name must not be empty");
    }
    Ok(room)
}
