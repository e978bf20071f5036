//! Interactive terminal driver.
//!
//! A line-mode loop around the engine: pick a mode, flip cards by number,
//! restart or return to the menu. The mismatch-reset delay is a real timer
//! raced against the next input line, so typing `r` or `m` while a pair is
//! still face-up exercises the same stale-token guard the tests do.

use std::collections::HashMap;
use std::pin::Pin;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Sleep;

use memory_match::{
    BoardSize, CardIndex, CardState, CardValue, CatApiSource, FixedImageSource, FlipOutcome,
    GameConfig, GameController, GameOver, GameSession, ImageSource, JsonFileStore, ResetToken,
    SourceConfig, SystemClock, API_KEY_ENV, DEFAULT_API_BASE,
};

#[derive(Parser, Debug)]
#[command(name = "memory-match", about = "Flip cards, find the pairs, beat your best time")]
struct Args {
    /// Shuffle seed for reproducible decks.
    #[arg(long)]
    seed: Option<u64>,

    /// How long a mismatched pair stays visible, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Image provider base URL.
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Play with built-in symbols instead of fetched images.
    #[arg(long)]
    offline: bool,
}

type Driver = GameController<Box<dyn ImageSource>, JsonFileStore, SystemClock>;
type PendingReset = Option<(ResetToken, Pin<Box<Sleep>>)>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let source: Box<dyn ImageSource> = if args.offline {
        Box::new(FixedImageSource::offline())
    } else {
        Box::new(CatApiSource::new(SourceConfig::new(
            args.api_base,
            std::env::var(API_KEY_ENV).ok(),
        )))
    };

    let store = JsonFileStore::at_default_location()
        .unwrap_or_else(|| JsonFileStore::new(std::path::PathBuf::from("best_times.json")));

    let mut config =
        GameConfig::default().with_mismatch_delay(Duration::from_millis(args.delay_ms));
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut controller = Driver::new(config, source, store, SystemClock::new());

    println!("memory-match");
    print_menu(&controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: PendingReset = None;

    loop {
        let reset_armed = pending.is_some();
        tokio::select! {
            () = wait_for_reset(&mut pending), if reset_armed => {
                if let Some((token, _)) = pending.take() {
                    if controller.close_mismatch(token) {
                        print_board(&controller);
                        println!("The pair closed; keep going.");
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(&mut controller, line.trim(), &mut pending).await {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Resolve when the pending reset is due; park forever when there is none
/// (the select guard keeps this branch disabled in that case).
async fn wait_for_reset(pending: &mut PendingReset) {
    match pending.as_mut() {
        Some((_, sleep)) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}

async fn handle_line(controller: &mut Driver, line: &str, pending: &mut PendingReset) -> bool {
    match line {
        "" => {}
        "q" | "quit" => return false,
        "4" | "6" => {
            let size = if line == "4" { BoardSize::EASY } else { BoardSize::HARD };
            *pending = None;
            start(controller, size).await;
        }
        "r" => {
            *pending = None;
            match controller.last_size() {
                Some(size) => start(controller, size).await,
                None => println!("Nothing to restart yet; pick a mode first."),
            }
        }
        "m" | "menu" => {
            *pending = None;
            controller.back_to_menu();
            print_menu(controller);
        }
        "h" | "help" => print_help(),
        other => {
            if let Some(rest) = other.strip_prefix('f') {
                match rest.trim().parse::<u16>() {
                    Ok(n) => flip(controller, CardIndex::new(n), pending),
                    Err(_) => println!("Flip takes a card number, e.g. `f 3`."),
                }
            } else {
                print_help();
            }
        }
    }
    true
}

async fn start(controller: &mut Driver, size: BoardSize) {
    match controller.start_game(size).await {
        Ok(()) => {
            println!("{}", controller.best_time_label(size));
            print_board(controller);
            println!("Flip with `f <card number>`.");
        }
        Err(err) => {
            println!("Could not start the round: {}", err);
            print_menu(controller);
        }
    }
}

fn flip(controller: &mut Driver, index: CardIndex, pending: &mut PendingReset) {
    match controller.flip_card(index) {
        FlipOutcome::Ignored => println!("That card cannot be flipped right now."),
        FlipOutcome::Opened => print_board(controller),
        FlipOutcome::Matched { game_over: None } => {
            print_board(controller);
            println!("Match!");
        }
        FlipOutcome::Matched {
            game_over: Some(over),
        } => {
            print_board(controller);
            announce_win(controller, over);
        }
        FlipOutcome::Mismatched(token) => {
            print_board(controller);
            println!("No match; the pair closes shortly.");
            *pending = Some((token, Box::pin(tokio::time::sleep(token.delay))));
        }
    }
}

fn announce_win(controller: &Driver, over: GameOver) {
    println!("You won the {} round in {}s!", over.size, over.elapsed_secs);
    if over.new_best {
        match over.previous_best {
            Some(previous) => println!("New best time, beating {}s.", previous),
            None => println!("First recorded time for this mode."),
        }
    }
    println!("{}", controller.best_time_label(over.size));
    println!("`r` plays again, `m` returns to the menu.");
}

fn print_menu(controller: &Driver) {
    println!();
    println!("Modes: `4` starts 4x4, `6` starts 6x6. `h` for help, `q` quits.");
    println!("  {}", controller.best_time_label(BoardSize::EASY));
    println!("  {}", controller.best_time_label(BoardSize::HARD));
}

fn print_help() {
    println!("Commands:");
    println!("  4 / 6      start an easy or hard round");
    println!("  f <n>      flip card number n");
    println!("  r          restart the current mode");
    println!("  m          back to the menu");
    println!("  q          quit");
    println!("Closed cards show their number; open pairs show letters.");
    println!("Set {} for live images, or pass --offline.", API_KEY_ENV);
}

fn print_board(controller: &Driver) {
    let Some(session) = controller.session() else {
        return;
    };
    println!("{}", render_board(session));
    println!(
        "Pairs found: {}/{}",
        session.matches_found(),
        session.size().pairs()
    );
}

/// Stable one-letter tag per distinct value, assigned in board order.
fn value_letters(session: &GameSession) -> HashMap<&CardValue, char> {
    let mut letters = HashMap::new();
    let mut next = b'A';
    for card in session.cards() {
        letters.entry(card.value()).or_insert_with(|| {
            let letter = next as char;
            next += 1;
            letter
        });
    }
    letters
}

fn render_board(session: &GameSession) -> String {
    let letters = value_letters(session);
    let dim = session.size().dimension();
    let mut out = String::new();

    for row in 0..dim {
        for col in 0..dim {
            let index = row * dim + col;
            let card = &session.cards()[index];
            let letter = letters.get(card.value()).copied().unwrap_or('?');
            let cell = match card.state() {
                CardState::Closed => format!("{:>4} ", index),
                CardState::Open => format!("  [{}]", letter),
                CardState::Matched => format!("   {} ", letter.to_ascii_lowercase()),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}
