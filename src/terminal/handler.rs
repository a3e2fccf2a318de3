use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use crate::{
    config::Config,
    dictionary::Dictionary,
    game::{place_letters, Backspace, BoardGenerator, GameError, GameState, GuessError},
    models::{Board, BoardSize, Phase},
    terminal::{
        messages::{parse_line, Command, Input, Key, HELP},
        notice::{wait_for_expiry, NoticeBoard},
    },
};

const CANVAS_WIDTH: usize = 29;
const CANVAS_HEIGHT: usize = 13;

/// What the event loop should do after a line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Redraw,
    /// Print some text, then redraw
    Show(String),
    Quit,
}

/// The player's side of the puzzle: one game, the dictionary as far as it
/// has loaded, and the notice currently on screen
pub struct Session {
    game: GameState,
    dictionary: Dictionary,
    dictionary_ready: bool,
    size: BoardSize,
    notices: NoticeBoard,
}

impl Session {
    pub fn new(size: BoardSize, notice_duration: std::time::Duration) -> Self {
        Self {
            game: GameState::new(),
            dictionary: Dictionary::empty(),
            dictionary_ready: false,
            size,
            notices: NoticeBoard::new(notice_duration),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Deal a fresh board, switching to `size` if given
    pub fn start_new_game(&mut self, size: Option<BoardSize>) {
        if let Some(size) = size {
            self.size = size;
        }
        self.start_with_board(BoardGenerator::generate(self.size));
    }

    pub fn start_with_board(&mut self, board: Board) {
        self.notices.clear();
        self.game.new_game(board);
    }

    pub fn dictionary_loaded(&mut self, dictionary: Dictionary) {
        tracing::info!("Word list ready with {} words", dictionary.len());
        self.dictionary = dictionary;
        self.dictionary_ready = true;
    }

    pub fn expire_notice(&mut self, now: Instant) -> bool {
        self.notices.expire(now)
    }

    pub fn handle_line(&mut self, line: &str) -> Response {
        match parse_line(line) {
            Ok(Input::Command(command)) => self.handle_command(command),
            Ok(Input::Keys(keys)) => {
                self.handle_keys(&keys);
                Response::Redraw
            }
            Err(e) => {
                self.notices.post(e.to_string());
                Response::Redraw
            }
        }
    }

    fn handle_command(&mut self, command: Command) -> Response {
        match command {
            Command::NewGame(size) => {
                self.start_new_game(size);
                Response::Redraw
            }
            Command::State => match serde_json::to_string_pretty(&self.game.snapshot()) {
                Ok(json) => Response::Show(json),
                Err(e) => {
                    tracing::error!("Failed to serialize game state: {}", e);
                    Response::Redraw
                }
            },
            Command::Help => Response::Show(HELP.to_string()),
            Command::Quit => Response::Quit,
        }
    }

    /// Feed keys to the game, stopping at the first one it refuses
    fn handle_keys(&mut self, keys: &[Key]) {
        let mut keys = keys;

        // The chain letter is already in place, so retyping it is not an error
        if let (Some(chain), Some(Key::Letter(first))) = (self.game.chain_letter(), keys.first()) {
            if *first == chain && self.game.current_word() == chain.to_string() {
                keys = &keys[1..];
            }
        }

        for key in keys {
            let result = match key {
                Key::Letter(letter) => self.game.type_letter(*letter).map(|_| ()),
                Key::Backspace => self.backspace(),
                Key::Enter => self.submit(),
            };

            if let Err(e) = result {
                tracing::debug!("Input {:?} refused: {}", key, e);
                let message = self.describe(&e);
                self.notices.post(message);
                break;
            }
        }
    }

    fn backspace(&mut self) -> Result<(), GameError> {
        if let Backspace::Undone(word) = self.game.backspace()? {
            self.notices.post(format!("Took back {}", word));
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<(), GameError> {
        let accepted = self.game.submit(&self.dictionary)?;
        if accepted.won {
            self.notices.post(format!(
                "You used every letter in {} words!",
                self.game.score()
            ));
        }
        Ok(())
    }

    fn describe(&self, error: &GameError) -> String {
        match error {
            GameError::Guess(GuessError::NotInDictionary(_)) if !self.dictionary_ready => {
                format!("{} (the word list is still loading)", error)
            }
            _ => error.to_string(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.game.phase() == Phase::Setup {
            out.push_str("Type :new to start a game\n");
            return out;
        }

        let board = self.game.board();
        out.push_str(&draw_polygon(board, self.game.used_letters()));
        out.push('\n');

        for (index, side) in board.sides().iter().enumerate() {
            out.push_str(&format!("  side {}: {}\n", index + 1, side));
        }

        let remaining: String = board
            .letters()
            .filter(|letter| !self.game.used_letters().contains(letter))
            .collect();
        out.push_str(&format!(
            "Score: {}   letters left: {}\n",
            self.game.score(),
            if remaining.is_empty() { "-".to_string() } else { remaining }
        ));

        if !self.game.guessed_words().is_empty() {
            out.push_str(&format!("Chain: {}\n", self.game.guessed_words().join(" - ")));
        }

        if self.game.is_won() {
            out.push_str("Solved! Type :new to play again\n");
        } else {
            out.push_str(&format!("> {}_\n", self.game.current_word()));
        }

        if let Some(notice) = self.notices.current() {
            out.push_str(&format!("! {}\n", notice));
        }

        out
    }
}

/// Sketch the board polygon as text. Used letters are shown in lowercase.
fn draw_polygon(board: &Board, used: &std::collections::BTreeSet<char>) -> String {
    let mut canvas = vec![vec![' '; CANVAS_WIDTH]; CANVAS_HEIGHT];

    for placement in place_letters(board) {
        let col = ((placement.x + 1.0) / 2.0 * (CANVAS_WIDTH - 1) as f64).round() as usize;
        let row = ((placement.y + 1.0) / 2.0 * (CANVAS_HEIGHT - 1) as f64).round() as usize;
        let letter = if used.contains(&placement.letter) {
            placement.letter.to_ascii_lowercase()
        } else {
            placement.letter
        };
        canvas[row.min(CANVAS_HEIGHT - 1)][col.min(CANVAS_WIDTH - 1)] = letter;
    }

    canvas
        .into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .filter(|row| !row.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run the interactive game until stdin closes or the player quits
pub async fn run(config: Config) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()?;

    // Load the word list in the background; typing works meanwhile
    let source = config.dictionary.source.clone();
    let mut loading = tokio::spawn(async move {
        match Dictionary::from_source(&source, &client).await {
            Ok(dict) => dict,
            Err(e) => {
                tracing::warn!("Failed to load dictionary: {:#}. Every word will be rejected.", e);
                tracing::warn!("Put a word list at {} or set DICTIONARY_SOURCE", source);
                Dictionary::empty()
            }
        }
    });
    let mut loaded = false;

    let mut session = Session::new(config.board.size, config.notice_duration());
    session.start_new_game(None);

    println!("{}\n", HELP);
    println!("{}", session.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                match session.handle_line(&line) {
                    Response::Quit => break,
                    Response::Show(text) => {
                        println!("{}", text);
                        println!("{}", session.render());
                    }
                    Response::Redraw => println!("{}", session.render()),
                }
            }
            joined = &mut loading, if !loaded => {
                loaded = true;
                let dictionary = joined.context("dictionary task failed")?;
                session.dictionary_loaded(dictionary);
            }
            _ = wait_for_expiry(session.notices().deadline()) => {
                if session.expire_notice(Instant::now()) {
                    println!("{}", session.render());
                }
            }
        }
    }

    if !loaded {
        loading.abort();
    }
    tracing::info!("Session ended with a chain of {} words", session.game().score());

    Ok(())
}
