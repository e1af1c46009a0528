use anyhow::Context;
use clap::Parser;
use handkit::sink::LogSink;
use handkit::trace::HandTrace;
use palmring::config;
use palmring::demo;
use palmring::menu::RadialController;
use palmring::sys::host::Host;
use palmring::sys::runtime;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Palm-activated radial menu host")]
struct Args {
    /// Recorded hand frames to replay in a loop. Without one the host idles and only
    /// reacts to socket commands.
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(short, long)]
    frames: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = config::load_or_default();
    let trace = match &args.trace {
        Some(path) => HandTrace::load(path)
            .with_context(|| format!("Failed to load trace {}", path.display()))?,
        None => HandTrace::still(),
    };

    let controller = RadialController::new(
        demo::demo_layers(),
        config.menu.clone(),
        Box::new(LogSink),
        Box::new(LogSink),
    );

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config.host.socket_path.clone());

    let mut host = Host::new(controller, rx, config.host.fps);
    let ran = host.run(&trace, args.frames);
    log::info!("Stopped after {} frames", ran);
    Ok(())
}
