pub(crate) mod animation;
pub(crate) mod animator;
pub(crate) mod chain;
pub(crate) mod effects;
pub(crate) mod intervaltimer;
pub(crate) mod olaoutput;
pub(crate) mod palettes;
pub(crate) mod playlist;
pub(crate) mod sequence;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use crate::animator::Animator;
use crate::chain::{Chain, Layout};
use crate::olaoutput::OlaOutput;
use crate::playlist::Playlist;
use crate::sequence::AnimSequence;

#[derive(Parser)]
struct Cli {
    /// Number of pixels on the chain
    #[arg(short = 'n', long, default_value_t = 50)]
    pixel_count: usize,

    /// Frame rate in ticks per second
    #[arg(short, long, default_value_t = 20)]
    fps: u32,

    /// The playlist file to run instead of the built-in demo show
    #[arg(short, long, value_name = "FILE")]
    playlist: Option<std::path::PathBuf>,

    /// Where the OLA daemon listens for OSC
    #[arg(long, default_value = "127.0.0.1:7770")]
    ola_addr: String,

    /// Columns per row for a folded strip (0 = straight)
    #[arg(long, default_value_t = 0)]
    columns: usize,

    /// Folded strip alternates direction every row
    #[arg(long, default_value_t = false)]
    serpentine: bool,
}

fn main() {
    env_logger::init();
    let args = Cli::parse();

    let playlist = match args.playlist.as_deref() {
        Some(path) => match Playlist::load(path) {
            Ok(playlist) => playlist,
            Err(msg) => panic!("Cannot read playlist: {}", msg),
        },
        None => Playlist::demo(),
    };

    let layout = Layout {
        columns: args.columns,
        serpentine: args.serpentine,
    };
    let chain = match Chain::with_layout(args.pixel_count, layout) {
        Ok(chain) => chain,
        Err(error) => panic!("Cannot set up chain: {}", error),
    };

    let effects = match playlist.build_effects(args.fps, args.pixel_count) {
        Ok(effects) => effects,
        Err(error) => panic!("Cannot build playlist: {}", error),
    };
    let sequence = match AnimSequence::new(effects) {
        Ok(sequence) => sequence,
        Err(error) => panic!("Cannot build sequence: {}", error),
    };

    let ola_addr = match SocketAddr::from_str(&args.ola_addr) {
        Ok(addr) => addr,
        Err(error) => panic!("Invalid OLA address: {}", error),
    };
    let ola = match OlaOutput::new(ola_addr) {
        Ok(ola) => ola,
        Err(msg) => panic!("Cannot set up OLA output: {}", msg),
    };

    let running = Arc::new(AtomicBool::new(true));
    let running_in_handler = Arc::clone(&running);
    if let Err(error) = ctrlc::set_handler(move || {
        running_in_handler.store(false, Ordering::SeqCst);
    }) {
        panic!("Cannot install signal handler: {}", error);
    }

    let mut animator = Animator::new(chain, sequence, Box::new(ola), args.fps);
    if let Err(error) = animator.run(&running) {
        panic!("Animation aborted: {}", error);
    }
}
