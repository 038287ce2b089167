use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use log::{error, info};

use housie_minigames::destroyable::Destroyable;
use housie_minigames::events::Channel;
use housie_minigames::game::settings::{MiniGameConfig, PrizeMode};
use housie_minigames::game::storage::MemorySessionStore;
use housie_minigames::model::{GameId, MiniGameEvent};
use housie_minigames::scheduler::{Scheduler, VirtualClock};
use housie_minigames::ui::{attach_surface, AutoPlayer, TextSurface, TicketLock};
use housie_minigames::{
    decode_config, encode_config, get_config_options, verify_token, ControllerPhase,
    SessionController,
};

/// Administrator tool for housie mini-game codes and configuration tokens
#[derive(Parser)]
#[command(name = "housie-minigames")]
#[command(about = "Verify mini-game result codes and manage config tokens")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a self-contained result token
    Verify { code: String },

    /// Encode a mini-game config into a token
    EncodeConfig {
        #[arg(long)]
        enabled: bool,

        #[arg(long, default_value_t = 5.0)]
        show_after_minutes: f64,

        #[arg(long, value_enum, default_value_t = PrizeMode::Fixed)]
        prize_mode: PrizeMode,

        #[arg(long, default_value_t = 10.0)]
        prize_amount: f64,

        #[arg(long, default_value_t = 2.0)]
        multiplier: f64,

        #[arg(long)]
        allow_multiple_games: bool,
    },

    /// Decode a config token and print it as JSON
    DecodeConfig { token: String },

    /// Print the default config as JSON
    Defaults,

    /// Play one game with a scripted player on a virtual clock
    Demo {
        /// quickMath, colorCatch, memoryFlash, luckyWheel or reactionTest
        #[arg(short, long)]
        game: Option<String>,

        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Could not serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_demo(game: Option<String>, seed: Option<u64>) -> ExitCode {
    let game_id = match game {
        Some(key) => match GameId::all().into_iter().find(|id| id.key() == key) {
            Some(id) => Some(id),
            None => {
                error!("Unknown game: {}", key);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let (emitter, observer) = Channel::<MiniGameEvent>::new();
    let text = Rc::new(RefCell::new(TextSurface::echoing()));
    let player = Rc::new(RefCell::new(AutoPlayer::new()));
    // both listeners are dropped by `destroy` below
    attach_surface(&observer, text.clone());
    attach_surface(&observer, player.clone());

    let mut controller = SessionController::new(
        VirtualClock::default(),
        Box::new(MemorySessionStore::new()),
        Box::new(TicketLock::new()),
        emitter,
    );
    if let Some(seed) = seed {
        controller = controller.with_seed(seed);
    }
    controller.init(Some(get_config_options()));
    controller.set_player("Demo");

    let opened = match game_id {
        Some(id) => controller.show_game(id),
        None => controller.show_random_game(),
    };
    if !opened {
        error!("Could not open a mini-game");
        return ExitCode::FAILURE;
    }

    const STEP_MS: u64 = 10;
    const GIVE_UP_MS: u64 = 60_000;
    let mut queued = Vec::new();
    while controller.phase() == ControllerPhase::GameActive
        && controller.scheduler().now_ms() < GIVE_UP_MS
    {
        let now = controller.scheduler().now_ms();
        queued.extend(
            player
                .borrow_mut()
                .drain_planned()
                .into_iter()
                .map(|(delay, input)| (now + delay, input)),
        );
        let (due, later): (Vec<_>, Vec<_>) = queued.into_iter().partition(|(at, _)| *at <= now);
        queued = later;
        for (_, input) in due {
            controller.handle_input(input);
        }
        controller.advance(STEP_MS);
    }

    let code = controller.result().map(|result| result.code.clone());
    match controller.close_game() {
        Some(summary) => info!("Summary: {}", summary),
        None => error!("Demo game did not finish"),
    }
    let verified = code.and_then(|code| controller.verify_game_code(&code));

    controller.destroy();
    let text = text.borrow();
    if text.is_modal_open() {
        error!("Modal still open after the demo closed it");
        return ExitCode::FAILURE;
    }
    info!("Rendered {} lines", text.lines().len());

    match verified {
        Some(result) => print_json(&result),
        None => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Verify { code } => match verify_token(&code) {
            Some(result) => print_json(&result),
            None => {
                println!("Unverifiable code: {}", code);
                ExitCode::FAILURE
            }
        },
        Commands::EncodeConfig {
            enabled,
            show_after_minutes,
            prize_mode,
            prize_amount,
            multiplier,
            allow_multiple_games,
        } => {
            let config = MiniGameConfig {
                enabled,
                show_after_minutes,
                prize_mode,
                prize_amount,
                multiplier,
                allow_multiple_games,
            };
            match encode_config(&config) {
                Some(token) => {
                    println!("{}", token);
                    ExitCode::SUCCESS
                }
                None => ExitCode::FAILURE,
            }
        }
        Commands::DecodeConfig { token } => match decode_config(&token) {
            Some(config) => print_json(&config),
            None => {
                println!("Invalid config token");
                ExitCode::FAILURE
            }
        },
        Commands::Defaults => print_json(&get_config_options()),
        Commands::Demo { game, seed } => run_demo(game, seed),
    }
}
