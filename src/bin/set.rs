use clap::Parser;
use set_rs::config::Settings;
use set_rs::selfplay::{SelfPlay, SelfPlayReport};
use set_rs::session::{FileStore, MemoryStore, Session, StateStore};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play validated random games of Set", long_about = None)]
struct Args {
    /// Number of games to play back to back
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Seed for deals and set choices; each game adds its index
    #[arg(long)]
    seed: Option<u64>,
    /// Pause between moves, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
    /// Deal extra cards only on request instead of automatically
    #[arg(long)]
    manual: bool,
    /// State string to start the first game from
    #[arg(long)]
    state: Option<String>,
    /// Directory to persist the game state in
    #[arg(long)]
    state_dir: Option<PathBuf>,
}

fn print_report(game: usize, report: &SelfPlayReport) {
    println!(
        "game {game}: {} takes, {} manual deals, finished: {}, violations: {}",
        report.takes,
        report.added,
        report.finished,
        report.violations.len()
    );
    for (takes, v) in &report.violations {
        println!("  after {takes} takes: {v}");
    }
    println!("  final state: {}", report.final_state);
}

fn play<S: StateStore>(args: &Args, mut store: S) -> std::io::Result<bool> {
    let stop = AtomicBool::new(false);
    let mut clean = true;
    for i in 0..args.games {
        let mut settings = Settings::default().with_auto_deal(!args.manual);
        let seed = args.seed.map(|s| s.wrapping_add(i as u64));
        if let Some(seed) = seed {
            settings = settings.with_seed(seed);
        }
        let shared = if i == 0 { args.state.as_deref() } else { None };
        let mut session = Session::open(store, shared, settings);
        if i > 0 || session.game().is_finished() {
            session.game_mut().new_game();
        }
        let table: Vec<String> =
            session.game().table().as_slice().iter().map(|c| c.to_string()).collect();
        println!("game {i} ({:?}): {}", session.origin(), table.join(" "));

        let report = SelfPlay::random(seed)
            .with_move_delay(Duration::from_millis(args.delay_ms))
            .run(session.game_mut(), &stop);
        session.save()?;
        print_report(i, &report);
        clean &= report.is_clean();
        store = session.into_parts().0;
    }
    Ok(clean)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let result = match &args.state_dir {
        Some(dir) => play(&args, FileStore::new(dir)),
        None => play(&args, MemoryStore::new()),
    };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("set-rs: {e}");
            ExitCode::FAILURE
        }
    }
}
