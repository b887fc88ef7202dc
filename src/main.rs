use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use invaders::assets::{DirectoryAtlas, FrameSet, GlyphAtlas};
use invaders::audio::{Audio, Bell, LogAudio};
use invaders::config::GameConfig;
use invaders::display::{Renderer, Terminal};
use invaders::error::GameError;
use invaders::input::command_for;
use invaders::logging;
use invaders::score_store::FileScoreStore;
use invaders::session::{Control, Session};

/// Defend the planet from a descending alien squadron.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// High-score file [default: $HOME/.invaders_score]
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Log file [default: <temp dir>/invaders.log]
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Directory of sprite sheets (<name>.txt, one frame per line)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Seed for enemy fire
    #[arg(long)]
    seed: Option<u64>,

    /// No terminal bell
    #[arg(long)]
    mute: bool,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `Ok` when the player quits.
///
/// Each frame drains every pending input event (non-blocking), feeds the
/// resulting commands to the session, runs one tick, redraws, then sleeps
/// off the rest of the quantum.  The sleep is the only suspension point, so
/// quitting is observed at frame boundaries.
fn game_loop<W: Write>(
    screen: &mut Terminal<W>,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> Result<(), GameError> {
    let frame = session.config().tick;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            match rx.try_recv() {
                Ok(Event::Key(key)) => {
                    if let Some(command) = command_for(&key) {
                        if session.handle(command, frame_start) == Control::Quit {
                            return Ok(());
                        }
                    }
                }
                Ok(Event::Resize(width, height)) => screen.resize(width, height),
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Err(GameError::InputClosed),
            }
        }

        session.tick(Instant::now(), rng);
        screen.present(session)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("invaders.log"));
    logging::init(args.verbose, &log_path)?;

    // Assets are fatal: never touch the terminal without them.
    let frames = match &args.assets {
        Some(dir) => FrameSet::load(&DirectoryAtlas::new(dir)),
        None => FrameSet::load(&GlyphAtlas::default()),
    }
    .map_err(GameError::from)?;

    let store = FileScoreStore::new(args.score_file.clone().unwrap_or_else(FileScoreStore::default_path));
    let audio: Box<dyn Audio> = if args.mute {
        Box::new(LogAudio)
    } else {
        Box::new(Bell)
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (width, height) = terminal::size()?;
    let mut screen = Terminal::new(BufWriter::new(stdout()), width, height);

    terminal::enable_raw_mode()?;
    screen.writer_mut().execute(terminal::EnterAlternateScreen)?;
    screen.writer_mut().execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = screen
        .writer_mut()
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut session = Session::new(
        GameConfig::default(),
        frames,
        Box::new(store),
        audio,
        Instant::now(),
    );
    info!(log = %log_path.display(), "game loop starting");
    let result = game_loop(&mut screen, &mut session, &rx, &mut rng);

    // Always restore the terminal
    let out = screen.writer_mut();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = result {
        error!(%err, "terminating");
        session.quit();
        eprintln!("invaders: {err}");
        std::process::exit(1);
    }
    Ok(())
}
