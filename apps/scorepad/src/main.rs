use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use scorepad::config::{LogFormat, StorageConfig};
use scorepad::session::states::{GameScoped, ResultsDisplay, RoundScoped};
use scorepad::{
    AppError, BetOutcome, BetResult, ErrorCode, FileStore, Game, Placing, PlayerId, Session,
    State,
};
use tracing::debug;

mod telemetry;

#[derive(Clone, Copy, ValueEnum)]
enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for BetResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => BetResult::Success,
            Outcome::Failure => BetResult::Failure,
        }
    }
}

#[derive(Parser)]
#[command(name = "scorepad")]
#[command(about = "Score keeper for trick-estimation card games")]
struct Args {
    /// Session file (overrides SCOREPAD_DATA_FILE)
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the current phase, roster, round and standings
    Status,
    /// Open a new game
    NewGame,
    /// Add a player to the game being set up
    AddPlayer { name: String },
    /// Remove a player (id or name) from the game being set up
    RemovePlayer { player: String },
    /// Rename a player (id or name)
    RenamePlayer { player: String, name: String },
    /// Deal the first round
    StartGame,
    /// Record a bet for the current round
    Bet { player: String, bet: u32 },
    /// Lock the bets and start play
    StartRound,
    /// Finish play and move on to recording results
    EndRound,
    /// Record whether a player made their bet
    Result {
        player: String,
        #[arg(value_enum)]
        outcome: Outcome,
    },
    /// Close the round and show the scores
    Submit,
    /// Start bringing hand sizes back down
    StartReturn,
    /// Deal the next round
    NextRound,
    /// Close the game and return to idle
    EndGame,
    /// List the phases this session has passed through
    History,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Status => "status",
            Command::NewGame => "new-game",
            Command::AddPlayer { .. } => "add-player",
            Command::RemovePlayer { .. } => "remove-player",
            Command::RenamePlayer { .. } => "rename-player",
            Command::StartGame => "start-game",
            Command::Bet { .. } => "bet",
            Command::StartRound => "start-round",
            Command::EndRound => "end-round",
            Command::Result { .. } => "result",
            Command::Submit => "submit",
            Command::StartReturn => "start-return",
            Command::NextRound => "next-round",
            Command::EndGame => "end-game",
            Command::History => "history",
        }
    }

    fn is_read_only(&self) -> bool {
        matches!(self, Command::Status | Command::History)
    }
}

fn main() {
    let format = match LogFormat::from_env() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    telemetry::init_tracing(format);

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("❌ [{}] {e}", e.code());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = StorageConfig::resolve(args.data)?;
    debug!(path = %config.data_file.display(), command = args.command.name(), "Running command");
    let mut session = Session::restore(FileStore::new(config.data_file))?;

    let read_only = args.command.is_read_only();
    let report = execute(&mut session, args.command)?;
    if !read_only {
        session.persist()?;
    }
    println!("{report}");
    Ok(())
}

fn execute(session: &mut Session, command: Command) -> Result<String, AppError> {
    match command {
        Command::Status => return Ok(render_status(session)),
        Command::History => return Ok(render_history(session)),
        _ => {}
    }

    let command_name = command.name();
    match (command, session.state()?) {
        (Command::NewGame, State::Idle(idle)) => {
            idle.start_game()?;
            Ok("New game open. Add players with `add-player`.".to_string())
        }
        (Command::AddPlayer { name }, State::GameSetup(mut setup)) => {
            let id = setup.add_player(&name)?;
            let added = setup.game()?.player(&id).map_or(name, |p| p.name.clone());
            Ok(format!("Added {added} ({id})"))
        }
        (Command::RemovePlayer { player }, State::GameSetup(mut setup)) => {
            let id = resolve_player(setup.game()?, &player)?;
            Ok(match setup.remove_player(&id)? {
                Some(removed) => format!("Removed {}", removed.name),
                None => format!("No player {player}"),
            })
        }
        (Command::RenamePlayer { player, name }, State::GameSetup(mut setup)) => {
            let id = resolve_player(setup.game()?, &player)?;
            setup.rename_player(&id, &name)?;
            Ok(format!("Renamed {player} to {name}"))
        }
        (Command::StartGame, State::GameSetup(setup)) => match setup.start_game()? {
            State::RoundSetup(setup) => Ok(render_round_opened(&setup)?),
            _ => Ok("Not started: at least two players are needed.".to_string()),
        },
        (Command::Bet { player, bet }, State::RoundSetup(mut setup)) => {
            let id = resolve_player(setup.game()?, &player)?;
            Ok(match setup.add_bet(&id, bet)? {
                BetOutcome::Recorded => format!("{player} bets {bet}"),
                BetOutcome::Rejected => format!(
                    "Bet rejected: bets may not add up to the hand size ({player} cannot bet {bet})"
                ),
            })
        }
        (Command::StartRound, State::RoundSetup(setup)) => match setup.start_round()? {
            State::RoundInProgress(_) => Ok("Bets locked. Play the hand.".to_string()),
            State::RoundSetup(setup) => {
                let waiting = waiting_on(&setup)?;
                Ok(format!("Not started: waiting for bets from {waiting}"))
            }
            other => Ok(format!("Now in {}", other.phase())),
        },
        (Command::EndRound, State::RoundInProgress(playing)) => {
            playing.end_round()?;
            Ok("Hand over. Record results with `result`.".to_string())
        }
        (Command::Result { player, outcome }, State::RoundEnded(mut ended)) => {
            let id = resolve_player(ended.game()?, &player)?;
            ended.register_result(&id, outcome.into())?;
            Ok(format!("{player}: {}", describe_result(outcome.into())))
        }
        (Command::Submit, State::RoundEnded(ended)) => match ended.submit_results()? {
            State::ResultsDisplay(display) => render_results(&display),
            _ => Ok(
                "Not submitted: every player needs a result and at least one must have failed."
                    .to_string(),
            ),
        },
        (Command::StartReturn, State::ResultsDisplay(mut display)) => {
            Ok(if display.start_return()? {
                "Return started: hand sizes will now come back down.".to_string()
            } else {
                "Return not started: hand sizes are not climbing.".to_string()
            })
        }
        (Command::NextRound, State::ResultsDisplay(display)) => match display.next_round()? {
            State::RoundSetup(setup) => Ok(render_round_opened(&setup)?),
            _ => Ok("The game is over. Run `end-game` to close it.".to_string()),
        },
        (Command::EndGame, State::ResultsDisplay(display)) => {
            let standings = render_placings(&display.placings()?);
            display.end_game()?;
            Ok(format!("Game over.\n{standings}"))
        }
        (_, state) => Err(AppError::phase_mismatch(command_name, state.phase())),
    }
}

fn resolve_player(game: &Game, key: &str) -> Result<PlayerId, AppError> {
    game.find_player(key)
        .map(|p| p.id.clone())
        .ok_or_else(|| AppError::not_found(ErrorCode::PlayerNotFound, format!("no player '{key}'")))
}

fn describe_result(result: BetResult) -> &'static str {
    match result {
        BetResult::Success => "made it",
        BetResult::Failure => "missed",
    }
}

fn waiting_on(handle: &impl RoundScoped) -> Result<String, AppError> {
    let round = handle.round()?;
    let missing: Vec<&str> = handle
        .players_order()?
        .into_iter()
        .filter(|p| round.bet_for(&p.id).is_none())
        .map(|p| p.name.as_str())
        .collect();
    Ok(missing.join(", "))
}

fn render_round_opened(handle: &impl RoundScoped) -> Result<String, AppError> {
    let game = handle.game()?;
    let round = handle.round()?;
    let order: Vec<&str> = handle
        .players_order()?
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();
    Ok(format!(
        "Round {}: {} card(s). Betting order: {}",
        game.rounds().len() + 1,
        round.number_of_cards(),
        order.join(", ")
    ))
}

fn render_results(display: &ResultsDisplay<'_>) -> Result<String, AppError> {
    let game = display.game()?;
    let points = display.round_points()?;
    let mut lines = vec!["Round points:".to_string()];
    for player in game.players() {
        let earned = points.get(&player.id).copied().unwrap_or(0);
        lines.push(format!("  {:<16} {earned:>4}", player.name));
    }
    lines.push(render_placings(&display.placings()?));
    if display.is_game_over() {
        lines.push("Last round played. Run `end-game`.".to_string());
    } else if display.can_start_return() && !display.is_next_direction_backward() {
        lines.push("Run `next-round`, or `start-return` to turn hand sizes around.".to_string());
    } else {
        lines.push("Run `next-round`.".to_string());
    }
    Ok(lines.join("\n"))
}

fn render_placings(placings: &[Placing]) -> String {
    let mut lines = vec!["Standings:".to_string()];
    for placing in placings {
        let name = placing
            .name
            .clone()
            .unwrap_or_else(|| placing.player_id.to_string());
        lines.push(format!("  {:>2}. {name:<16} {:>4}", placing.rank, placing.points));
    }
    lines.join("\n")
}

fn render_status(session: &Session) -> String {
    let mut lines = vec![format!("Phase: {}", session.phase())];
    let Some(game) = session.game() else {
        let finished = session.app().finished_games().len();
        lines.push(format!("No game in progress ({finished} finished)."));
        return lines.join("\n");
    };

    lines.push(format!("Game: {}", game.id()));
    for player in game.players() {
        let mut line = format!("  {} ({})", player.name, player.id);
        if let Some(round) = game.current_round() {
            if let Some(bet) = round.bet_for(&player.id) {
                line.push_str(&format!(" bet {bet}"));
            }
            if let Some(result) = round.result_for(&player.id) {
                line.push_str(&format!(", {}", describe_result(result)));
            }
        }
        lines.push(line);
    }
    if let Some(round) = game.current_round() {
        lines.push(format!(
            "Round {}: {} card(s){}",
            game.rounds().len() + usize::from(!round.is_over()),
            round.number_of_cards(),
            match round.forbidden_last_bet(game.players()) {
                Some(value) if !round.is_over() => format!(", last player may not bet {value}"),
                _ => String::new(),
            }
        ));
    }
    match game.placings() {
        Ok(placings) if !game.rounds().is_empty() => lines.push(render_placings(&placings)),
        Ok(_) => {}
        Err(e) => lines.push(format!("Standings unavailable: {e}")),
    }
    lines.join("\n")
}

fn render_history(session: &Session) -> String {
    let app = session.app();
    let mut lines: Vec<String> = app
        .history()
        .iter()
        .enumerate()
        .map(|(idx, phase)| format!("{:>3}. {phase}", idx + 1))
        .collect();
    lines.push(format!("now: {}", app.current_state()));
    lines.join("\n")
}
