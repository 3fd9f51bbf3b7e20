use std::{cmp::max, process::exit, thread::sleep, time::Duration};

use crate::food::Food;
use crate::grid;
use crate::snake::{Direction::{self, *}, Snake};
use crate::term::TermManager;
use crate::{Cell, Coords, TermInt};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use log::{debug, info};
use rand::Rng;

const TICK_INTERVAL_MS: u64 = 5; // input pump resolution
const START_DELAY_MS: u64 = 100; // ms per tick at zero food
const DELAY_STEP_MS: u64 = 5; // speed-up per food eaten
const MIN_DELAY_MS: u64 = 65;
const DEAD_DELAY_MS: u64 = 1000; // frozen frame before the restart tick
const FOOD_VALUE: u32 = 100; // score per food

const BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const HEAD_COLOR: Color = Color::DarkGreen;
const BODY_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;

/// A life is either in play with a food count or frozen awaiting the
/// restart tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing { eaten: u32 },
    Dead,
}

pub enum TickResult {
    /// Normal step. `vacated` is the cell the tail left, if any.
    Stepped { ate: bool, vacated: Option<Cell> },
    /// Collision this tick; the frame stays frozen until the restart tick.
    Died,
    /// The playfield was reset after a death freeze.
    Respawned,
}

/// All mutable game state for one process: the current life plus the
/// high score and pending input that outlive it.
pub struct GameSession {
    snake: Snake,
    food: Food,
    phase: Phase,
    high_score: u32,
    pending: Option<Direction>,
}

impl GameSession {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let snake = Snake::new();
        let food = Food::spawn(rng, &snake);

        GameSession {
            snake,
            food,
            phase: Phase::Playing { eaten: 0 },
            high_score: 0,
            pending: None,
        }
    }

    /// Single-slot overwrite; only the latest press before a tick counts.
    pub fn set_direction(&mut self, dir: Direction) {
        self.pending = Some(dir);
    }

    /// Advances the game by one tick: apply pending input, move, eat,
    /// propagate, collide. A tick that finds the session dead resets the
    /// playfield instead; movement resumes on the tick after that.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> TickResult {
        let mut eaten = match self.phase {
            Phase::Dead => {
                self.respawn(rng);
                return TickResult::Respawned;
            }
            Phase::Playing { eaten } => eaten,
        };

        let last_head = self.snake.advance(self.pending);

        let mut ate = false;
        if self.snake.head() == self.food.pos {
            eaten += 1;
            self.phase = Phase::Playing { eaten };
            self.food.relocate(rng, &self.snake, last_head, eaten);
            self.snake.grow(last_head);
            ate = true;
        }

        let vacated = self.snake.propagate(last_head);

        let crashed = (eaten > 1 && self.snake.hits_self()) || !grid::in_bounds(self.snake.head());
        if crashed {
            let score = eaten * FOOD_VALUE;
            if score > self.high_score {
                self.high_score = score;
                info!("new high score: {}", score);
            }
            info!("snake died, {} food eaten, score {}", eaten, score);
            self.phase = Phase::Dead;
            return TickResult::Died;
        }

        TickResult::Stepped { ate, vacated }
    }

    /// Delay until the next tick, computed from post-tick state. A dead
    /// session holds its frozen frame for a fixed pause.
    pub fn delay_ms(&self) -> u64 {
        match self.phase {
            Phase::Dead => DEAD_DELAY_MS,
            Phase::Playing { eaten } => step_delay_ms(eaten),
        }
    }

    pub fn score(&self) -> u32 {
        match self.phase {
            Phase::Playing { eaten } => eaten * FOOD_VALUE,
            Phase::Dead => 0,
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food_pos(&self) -> Cell {
        self.food.pos
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    fn respawn<R: Rng>(&mut self, rng: &mut R) {
        // The pending direction survives the reset: the new snake takes
        // off in the last pressed direction on the next tick
        self.snake = Snake::new();
        self.food = Food::spawn(rng, &self.snake);
        self.phase = Phase::Playing { eaten: 0 };
        debug!("playfield reset, high score {}", self.high_score);
    }
}

fn step_delay_ms(eaten: u32) -> u64 {
    max(
        START_DELAY_MS.saturating_sub(DELAY_STEP_MS * eaten as u64),
        MIN_DELAY_MS,
    )
}

pub struct SnakeGame {
    term: TermManager,
    session: GameSession,
    origin: Coords, // top-left corner of the board interior
}

impl SnakeGame {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();

        SnakeGame {
            term: TermManager::new(),
            session: GameSession::new(&mut rng),
            origin: (0, 0),
        }
    }

    pub fn initialize(&mut self) {
        self.term.setup();

        let (w, h) = self.term.get_terminal_size();
        if w < grid::BOARD_COLS || h < grid::BOARD_ROWS + 2 {
            self.term.restore();
            eprintln!(
                "Terminal too small: need at least {}x{} characters.",
                grid::BOARD_COLS,
                grid::BOARD_ROWS + 2
            );
            exit(1);
        }

        // Center the board, keeping a row above it for the score displays
        self.origin = ((w - grid::BOARD_COLS) / 2 + 1, (h - grid::BOARD_ROWS) / 2 + 1);

        info!("session started, board origin {:?}", self.origin);
        self.draw_playfield();
    }

    pub fn run(&mut self) {
        let mut rng = rand::thread_rng();
        let mut until_tick = self.session.delay_ms();

        // One-shot countdown re-armed after every tick; key events in
        // between only overwrite the pending direction
        loop {
            sleep(Duration::from_millis(TICK_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue() {
                match &key_ev {
                    ev if is_ctrl_c(ev) => self.clean_exit(),
                    KeyEvent { code, modifiers: _ } => {
                        if let Some(dir) = direction_for(code) {
                            self.session.set_direction(dir);
                        }
                    }
                }
            }

            until_tick = until_tick.saturating_sub(TICK_INTERVAL_MS);
            if until_tick == 0 {
                let result = self.session.tick(&mut rng);
                self.render(&result);
                until_tick = self.session.delay_ms();
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn clean_exit(&mut self) {
        self.term.restore();
        info!("exiting");
        exit(0);
    }

    fn render(&mut self, result: &TickResult) {
        match result {
            TickResult::Died => {} // frozen frame
            TickResult::Respawned => self.draw_playfield(),
            TickResult::Stepped { ate, vacated } => self.draw_step(*ate, *vacated),
        }
    }

    fn draw_playfield(&mut self) {
        self.term.clear();
        self.term.draw_border(
            (self.origin.0 - 1, self.origin.1 - 1),
            grid::BOARD_COLS,
            grid::BOARD_ROWS,
        );
        self.draw_high_score();
        self.draw_head();
        self.draw_cell(self.session.food_pos(), FOOD_CHAR, FOOD_COLOR);
        self.term.flush();
    }

    fn draw_step(&mut self, ate: bool, vacated: Option<Cell>) {
        if let Some(cell) = vacated {
            self.erase_cell(cell);
        }

        // The old head cell becomes the first body segment
        if let Some(&neck) = self.session.snake().segments().first() {
            self.draw_cell(neck, BODY_CHAR, BODY_COLOR);
        }
        self.draw_head();

        if ate {
            self.draw_cell(self.session.food_pos(), FOOD_CHAR, FOOD_COLOR);
            self.draw_score();
        }

        self.term.flush();
    }

    fn draw_head(&mut self) {
        let travel = self
            .session
            .snake()
            .travel()
            .or_else(|| self.session.pending().map(Direction::vector))
            .unwrap_or((0, 0));

        self.draw_cell(self.session.snake().head(), head_char(travel), HEAD_COLOR);
    }

    fn draw_score(&mut self) {
        let text = format!("Score: {}", self.session.score());
        self.term.write_text((self.origin.0 - 1, self.origin.1 - 2), &text);
    }

    fn draw_high_score(&mut self) {
        let text = format!("High Score: {}", self.session.high_score());
        let col = self.origin.0 + grid::BOARD_COLS - 1 - text.len() as TermInt;
        self.term.write_text((col, self.origin.1 - 2), &text);
    }

    fn draw_cell(&mut self, cell: Cell, ch: char, color: Color) {
        self.term.print_cell(grid::to_screen(cell, self.origin), ch, color);
    }

    fn erase_cell(&mut self, cell: Cell) {
        self.term.erase_cell(grid::to_screen(cell, self.origin));
    }
}

fn head_char(travel: Cell) -> char {
    match travel {
        (0, 1) => '^',
        (0, -1) => 'v',
        (-1, 0) => '<',
        (1, 0) => '>',
        _ => BODY_CHAR,
    }
}

fn direction_for(code: &KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Right),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
