use clap::{Parser, Subcommand};
use glam::Vec3;
use handkit::input::{Handed, parse_vec3};
use handkit::trace::HandTrace;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(name = "handkit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Socket of a running palmring daemon
    #[arg(short = 's', long, default_value = handkit::SOCKET_PATH)]
    socket: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Open the menu at a world position, given as x,y,z
    Show {
        #[arg(value_parser = parse_position, allow_hyphen_values = true)]
        at: Vec3,
    },
    /// Close the menu
    Close,
    /// Print a summary of a recorded hand trace
    Inspect { trace: PathBuf },
}

fn parse_position(s: &str) -> Result<Vec3, String> {
    parse_vec3(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { at } => {
            send_command(&cli.socket, &format!("show {},{},{}", at.x, at.y, at.z))
        }
        Commands::Close => send_command(&cli.socket, "close"),
        Commands::Inspect { trace } => inspect(&trace),
    }
}

fn inspect(path: &PathBuf) -> anyhow::Result<()> {
    let trace = HandTrace::load(path)?;

    println!("frames:   {}", trace.len());
    println!("duration: {:.2}s", trace.duration());
    for handed in Handed::iter() {
        println!(
            "{:<6} tracked {} frames, {} grip edges",
            handed.to_string(),
            trace.tracked_frames(handed),
            trace.grip_edges(handed)
        );
    }
    Ok(())
}

fn send_command(socket: &PathBuf, cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(socket).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to palmring daemon at {}: {}. Is palmring running?",
            socket.display(),
            e
        )
    })?;

    log::debug!("sending '{}'", cmd);
    writeln!(stream, "{}", cmd)?;
    Ok(())
}
