use anyhow::Result;
use pawns_core::engine::config::EngineConfig;
use pawns_core::logic::board::{Color, Side};
use pawns_core::logic::game::GameState;
use std::io::{BufRead, Write};
use std::sync::Arc;

/// Deepest search the shell lets the user ask for.
pub const MAX_LEVEL: u8 = 4;

const HELP: &str = "\
Welcome to Pawn Chess. Use these commands to play
NEW Generates a new game
LEVEL x  Sets the level. x must be 1, 2, 3 or 4
MOVE sourceX sourceY aimX aimY Moves your pawn from (sourceX,sourceY) to (aimX,aimY)
SWITCH Starts a new game where the player who started the last game is second
PRINT Prints out the current field
QUIT Exits the program";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    New,
    Level,
    Switch,
    Move,
    Print,
    Help,
    Quit,
}

impl Command {
    fn parse(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "NEW" | "N" => Some(Self::New),
            "LEVEL" | "L" => Some(Self::Level),
            "SWITCH" | "S" => Some(Self::Switch),
            "MOVE" | "M" => Some(Self::Move),
            "PRINT" | "P" => Some(Self::Print),
            "HELP" | "H" => Some(Self::Help),
            "QUIT" | "Q" => Some(Self::Quit),
            _ => None,
        }
    }

    const fn needs_game(self) -> bool {
        matches!(self, Self::Level | Self::Switch | Self::Move | Self::Print)
    }
}

/// Line-oriented command interpreter around a [`GameState`].
pub struct Shell<R, W> {
    input: R,
    output: W,
    config: Arc<EngineConfig>,
    size: usize,
    game: Option<GameState>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub const fn new(input: R, output: W, config: Arc<EngineConfig>, size: usize) -> Self {
        Self {
            input,
            output,
            config,
            size,
            game: None,
        }
    }

    /// Reads commands until `QUIT` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let mut line = String::new();
        loop {
            write!(self.output, "pc> ")?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let words: Vec<&str> = line.split_whitespace().collect();
            let Some((&word, args)) = words.split_first() else {
                continue;
            };
            if !self.execute(word, args)? {
                break;
            }
        }
        Ok(())
    }

    /// Runs one command. Returns `false` once the user asked to quit.
    fn execute(&mut self, word: &str, args: &[&str]) -> Result<bool> {
        let Some(command) = Command::parse(word) else {
            self.error(&format!("Unknown command: {}", word.to_uppercase()))?;
            writeln!(self.output, "Type HELP for help")?;
            return Ok(true);
        };
        tracing::debug!(?command, ?args, "executing command");
        if command.needs_game() && self.game.is_none() {
            self.error("Game not initialized")?;
            return Ok(true);
        }
        match command {
            Command::Quit => return Ok(false),
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::New => {
                let opener = self.game.as_ref().map_or(Side::Human, GameState::opener);
                self.start_game(opener)?;
            }
            Command::Switch => {
                let opener = self.game.as_ref().map_or(Side::Human, GameState::opener);
                self.start_game(opener.opponent())?;
            }
            Command::Level => self.set_level(args)?,
            Command::Move => self.human_move(args)?,
            Command::Print => {
                if let Some(game) = &self.game {
                    writeln!(self.output, "{game}")?;
                }
            }
        }
        Ok(true)
    }

    fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "Error! {message}")?;
        Ok(())
    }

    fn start_game(&mut self, opener: Side) -> Result<()> {
        let game = GameState::new(opener, self.size, self.config.clone())?;
        let color = Color::of(Side::Human, opener).map_or("", Color::name);
        tracing::info!(%opener, size = self.size, level = game.level(), "new game");
        self.game = Some(game);
        writeln!(self.output, "New game started. You are {color}.")?;
        self.machine_turn()
    }

    fn set_level(&mut self, args: &[&str]) -> Result<()> {
        let [arg] = args else {
            return self.error("Invalid number of arguments");
        };
        let Ok(level) = arg.parse::<i64>() else {
            return self.error("At least one of the parameters is not of the type INT");
        };
        let level = match u8::try_from(level) {
            Ok(level) if (1..=MAX_LEVEL).contains(&level) => level,
            _ => return self.error(&format!("Invalid level. level must be 1-{MAX_LEVEL}")),
        };
        if let Some(game) = self.game.as_mut() {
            game.set_level(level)?;
            tracing::info!(level, "level changed");
        }
        Ok(())
    }

    fn human_move(&mut self, args: &[&str]) -> Result<()> {
        let Some(game) = self.game.as_mut() else {
            return Ok(());
        };
        if game.is_game_over() {
            writeln!(self.output, "The game is over. You must start a new game.")?;
            return Ok(());
        }
        let [cf, rf, ct, rt] = match parse_coords(args, self.size) {
            Ok(coords) => coords,
            Err(message) => {
                writeln!(self.output, "Error! {message}")?;
                return Ok(());
            }
        };

        match game.make_move(cf, rf, ct, rt) {
            Ok(true) => {
                tracing::debug!(cf, rf, ct, rt, "human moved");
                match game.next() {
                    Side::Machine => self.machine_turn()?,
                    Side::Human => writeln!(self.output, "Machine must miss a turn.")?,
                    Side::None => {}
                }
            }
            Ok(false) => {
                if game.slot(cf, rf)? == Side::Human {
                    self.error(&format!("Your Pawn ({cf},{rf}) cannot move to ({ct},{rt})"))?;
                } else {
                    self.error(&format!("You don't have a Pawn at ({cf},{rf})"))?;
                }
            }
            Err(err) => self.error(&err.to_string())?,
        }
        self.report_game_over()
    }

    /// Lets the machine move for as long as it is its turn.
    fn machine_turn(&mut self) -> Result<()> {
        let Some(game) = self.game.as_mut() else {
            return Ok(());
        };
        let mut moves = 0;
        while game.next() == Side::Machine && !game.is_game_over() {
            let mv = game.machine_move()?;
            tracing::debug!(?mv, "machine moved");
            moves += 1;
            if moves > 1 {
                writeln!(self.output, "You must miss a turn.")?;
            }
        }
        Ok(())
    }

    fn report_game_over(&mut self) -> Result<()> {
        let Some(game) = &self.game else {
            return Ok(());
        };
        if !game.is_game_over() {
            return Ok(());
        }
        let message = match game.winner() {
            Side::Human => "Congratulations! You won.",
            Side::Machine => "Sorry! Machine wins.",
            Side::None => "Nobody wins. Draw.",
        };
        tracing::info!(winner = %game.winner(), "game over");
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}

/// Reads the four `MOVE` arguments as slots on a `size` board.
fn parse_coords(args: &[&str], size: usize) -> Result<[usize; 4], String> {
    let [col_from, row_from, col_to, row_to] = args else {
        return Err("Wrong number of parameters".to_owned());
    };
    let mut coords = [0usize; 4];
    for (slot, arg) in coords.iter_mut().zip([col_from, row_from, col_to, row_to]) {
        let value = arg
            .parse::<i64>()
            .map_err(|_| "At least one of the parameters is not of the type INT".to_owned())?;
        *slot = usize::try_from(value)
            .ok()
            .filter(|value| (1..=size).contains(value))
            .ok_or_else(|| format!("Invalid Number (1,...,{size}) expected."))?;
    }
    Ok(coords)
}
