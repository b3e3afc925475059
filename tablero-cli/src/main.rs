//! Command-line driver for the Tablero session engine.
//!
//! One subcommand per engine operation, persisting the session
//! collection to a single JSON file.

mod store;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use store::JsonFileStore;
use tablero_engine::{
    CardType, CreateGame, Game, GameRepository, GameStatus, PlayerSpec,
};

#[derive(Debug, Parser)]
#[command(name = "tablero", version)]
#[command(about = "Score keeper for Risk-style board game sessions")]
struct Args {
    /// Path of the session collection file
    #[arg(long, default_value = "tablero.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new game
    Create {
        /// Display name of the game
        name: String,
        /// Session date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Players as name=color pairs, e.g. Ana=#ff0000 (repeatable)
        #[arg(long = "player", required = true)]
        players: Vec<String>,
    },
    /// List all games
    List,
    /// Show one game in full
    Show { game_id: String },
    /// Rename a game
    Rename { game_id: String, name: String },
    /// Delete a game
    Delete { game_id: String },
    /// Issue a card to a player
    IssueCard {
        game_id: String,
        player_id: String,
        #[arg(value_enum)]
        card_type: CardTypeArg,
    },
    /// Remove a card from a player's hand
    RemoveCard {
        game_id: String,
        player_id: String,
        card_id: String,
    },
    /// Assign a territory to a player
    Assign {
        game_id: String,
        player_id: String,
        territory_id: String,
    },
    /// Return a territory to the unassigned pool
    Unassign {
        game_id: String,
        player_id: String,
        territory_id: String,
    },
    /// Set the garrison count on an owned territory
    Units {
        game_id: String,
        territory_id: String,
        units: u32,
    },
    /// Mark a game active or finished
    Status {
        game_id: String,
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Advance to the next player's turn
    NextTurn { game_id: String },
    /// List territories not yet assigned in a game
    Available { game_id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CardTypeArg {
    Infantry,
    Cavalry,
    Artillery,
    Wild,
}

impl From<CardTypeArg> for CardType {
    fn from(value: CardTypeArg) -> Self {
        match value {
            CardTypeArg::Infantry => Self::Infantry,
            CardTypeArg::Cavalry => Self::Cavalry,
            CardTypeArg::Artillery => Self::Artillery,
            CardTypeArg::Wild => Self::Wild,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    Active,
    Finished,
}

impl From<StatusArg> for GameStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Active => Self::Active,
            StatusArg::Finished => Self::Finished,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("session collection at {}", args.file.display());
    let repo = GameRepository::new(JsonFileStore::new(args.file));

    match args.command {
        Command::Create {
            name,
            date,
            players,
        } => {
            let players = players
                .iter()
                .map(|raw| parse_player(raw))
                .collect::<Result<Vec<_>>>()?;
            let date =
                date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            let game = repo.create(CreateGame { name, date, players })?;
            println!("{} {}", "created".green().bold(), game.id);
            print_game(&game);
        }
        Command::List => {
            let games = repo.list_all()?;
            if games.is_empty() {
                println!("{}", "no games yet".dimmed());
            }
            for game in games {
                print_game_line(&game);
            }
        }
        Command::Show { game_id } => {
            let game = repo
                .get(&game_id)?
                .with_context(|| format!("game {game_id} not found"))?;
            print_game(&game);
        }
        Command::Rename { game_id, name } => {
            let game = repo.rename(&game_id, &name)?;
            println!("{} {}", "renamed".green().bold(), game.name);
        }
        Command::Delete { game_id } => {
            repo.delete(&game_id)?;
            println!("{} {game_id}", "deleted".red().bold());
        }
        Command::IssueCard {
            game_id,
            player_id,
            card_type,
        } => {
            let game = repo.issue_card(&game_id, &player_id, card_type.into())?;
            print_hand(&game, &player_id)?;
        }
        Command::RemoveCard {
            game_id,
            player_id,
            card_id,
        } => {
            let game = repo.remove_card(&game_id, &player_id, &card_id)?;
            print_hand(&game, &player_id)?;
        }
        Command::Assign {
            game_id,
            player_id,
            territory_id,
        } => {
            let game = repo.assign_territory(&game_id, &player_id, &territory_id)?;
            print_holdings(&game, &player_id)?;
        }
        Command::Unassign {
            game_id,
            player_id,
            territory_id,
        } => {
            let game = repo.remove_territory(&game_id, &player_id, &territory_id)?;
            print_holdings(&game, &player_id)?;
        }
        Command::Units {
            game_id,
            territory_id,
            units,
        } => {
            repo.set_territory_units(&game_id, &territory_id, units)?;
            println!("{} {territory_id} = {units}", "units".green().bold());
        }
        Command::Status { game_id, status } => {
            let game = repo.set_status(&game_id, status.into())?;
            println!("{} {}", "status".green().bold(), format_status(game.status));
        }
        Command::NextTurn { game_id } => {
            let game = repo.advance_turn(&game_id)?;
            let seat = &game.players[game.current_turn];
            println!("{} {}", "turn".green().bold(), seat.name.bold());
        }
        Command::Available { game_id } => {
            let open = repo.available_territories(&game_id)?;
            if open.is_empty() {
                println!("{}", "every territory is assigned".dimmed());
            }
            for territory in open {
                println!(
                    "{}  {} ({} pts)",
                    territory.id,
                    territory.name,
                    territory.points
                );
            }
        }
    }

    Ok(())
}

fn parse_player(raw: &str) -> Result<PlayerSpec> {
    let Some((name, color)) = raw.split_once('=') else {
        bail!("expected name=color, got {raw:?}");
    };
    if name.is_empty() {
        bail!("player name must not be empty");
    }
    Ok(PlayerSpec {
        name: name.to_string(),
        color: color.to_string(),
    })
}

fn format_status(status: GameStatus) -> colored::ColoredString {
    match status {
        GameStatus::Active => status.as_str().green(),
        GameStatus::Finished => status.as_str().yellow(),
    }
}

fn print_game_line(game: &Game) {
    println!(
        "{}  {}  {} ({} players) [{}]",
        game.id,
        game.date.dimmed(),
        game.name.bold(),
        game.players.len(),
        format_status(game.status)
    );
}

fn print_game(game: &Game) {
    print_game_line(game);
    for (seat, player) in game.players.iter().enumerate() {
        let marker = if seat == game.current_turn { ">" } else { " " };
        println!(
            "  {marker} {} ({}) - {} pts, {} cards",
            player.name.bold(),
            player.color,
            player.points,
            player.cards.len()
        );
        for territory in &player.territories {
            println!(
                "      {} ({} pts, {} units)",
                territory.name, territory.points, territory.units
            );
        }
    }
}

fn print_hand(game: &Game, player_id: &str) -> Result<()> {
    let player = game
        .find_player(player_id)
        .with_context(|| format!("player {player_id} not found"))?;
    println!("{} {} holds:", "hand".green().bold(), player.name.bold());
    for card in &player.cards {
        println!("  [{}] {}", card.card_type, card.id.dimmed());
    }
    Ok(())
}

fn print_holdings(game: &Game, player_id: &str) -> Result<()> {
    let player = game
        .find_player(player_id)
        .with_context(|| format!("player {player_id} not found"))?;
    println!(
        "{} {} - {} pts",
        "holdings".green().bold(),
        player.name.bold(),
        player.points
    );
    for territory in &player.territories {
        println!(
            "  {} ({} pts, {} units)",
            territory.name, territory.points, territory.units
        );
    }
    Ok(())
}
