use std::time::{Duration, Instant};

use crate::{Coords, TermInt};
use crate::config::Settings;
use crate::grid::{Cell, Grid};
use crate::input::{self, Command, Controls};
use crate::snake::Position;
use crate::state::{EndReason, GameState, Status, TickOutcome};
use crate::term::{Glyph, TermManager};
use crate::timer::Ticker;

use anyhow::{bail, Result};
use crossterm::style::Color;
use log::{debug, info, trace};

const SNAKE_BODY_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

// Terminal characters are about twice as tall as wide
const CELL_WIDTH: TermInt = 2;
const STATUS_WIDTH: TermInt = 24;
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Screen positions of the score line, the board frame and the controls.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Layout {
    status: Coords,
    board: Coords,
    board_frame: Coords,
    controls: Coords,
}

impl Layout {
    fn fit(board_size: u16, terminal: Coords) -> Result<Self> {
        let frame_w = board_size * CELL_WIDTH + 2;
        let frame_h = board_size + 2;
        let width = frame_w.max(Controls::WIDTH).max(STATUS_WIDTH);
        let height = 1 + frame_h + 1 + Controls::HEIGHT;

        let (term_w, term_h) = terminal;
        if width > term_w || height > term_h {
            bail!(
                "Terminal is {}x{} but a board of size {} needs {}x{}",
                term_w, term_h, board_size, width, height
            );
        }

        let left = (term_w - width) / 2;
        let top = (term_h - height) / 2;
        let board_left = left + (width - frame_w) / 2;

        Ok(Layout {
            status: (board_left, top),
            board: (board_left, top + 1),
            board_frame: (frame_w, frame_h),
            controls: (left + (width - Controls::WIDTH) / 2, top + 1 + frame_h + 1),
        })
    }

    /// Top left screen position of a board cell.
    fn cell(&self, pos: Position) -> Coords {
        (self.board.0 + 1 + pos.x * CELL_WIDTH, self.board.1 + 1 + pos.y)
    }
}

pub struct SnakeGame {
    term: TermManager,
    state: GameState,
    ticker: Ticker,
    controls: Controls,
    layout: Layout,
}

impl SnakeGame {
    pub fn new(settings: &Settings) -> Result<Self> {
        let state = GameState::new(settings.board_size, settings.seed)?;
        let term = TermManager::new()?;
        let layout = Layout::fit(settings.board_size, term.get_terminal_size())?;

        Ok(SnakeGame {
            term,
            state,
            ticker: Ticker::new(settings.tick_interval()),
            controls: Controls::new(layout.controls),
            layout,
        })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()
    }

    /// Waits for a key. False means the player asked to quit right away.
    pub fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "Arrow keys or WASD to move",
            "or click the arrows below the board",
            "Esc or P to pause",
            "R to restart",
            "Q or CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;
        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;

        Ok(input::command_for_key(&key) != Some(Command::Quit))
    }

    pub fn play(&mut self) -> Result<()> {
        self.start()?;

        loop {
            let wait = self.ticker.remaining(Instant::now()).unwrap_or(IDLE_POLL);

            if let Some(event) = self.term.next_event(wait)? {
                let restart_shown = self.state.is_over();
                if let Some(command) = input::command_for_event(&event, &self.controls, restart_shown) {
                    if self.apply(command)? == Flow::Quit {
                        info!("Quit with score {}", self.state.score());
                        return Ok(());
                    }
                }
            }

            if self.ticker.fire(Instant::now()) {
                self.step()?;
            }
        }
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.ticker.stop();
        self.term.restore()
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Draws a fresh game and arms the tick timer.
    fn start(&mut self) -> Result<()> {
        self.term.clear()?;
        self.term.draw_borders(self.layout.board, self.layout.board_frame)?;
        self.draw_controls()?;
        self.draw_board()?;
        self.draw_status()?;
        self.term.flush()?;

        self.ticker.start(Instant::now());
        info!(
            "New game on a {0}x{0} board, food at ({1}, {2})",
            self.state.board_size(), self.state.food().x, self.state.food().y
        );
        Ok(())
    }

    fn apply(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Turn(dir) => {
                // No steering while paused or after the game ended
                if self.ticker.is_running() && !self.state.queue_direction(dir) {
                    debug!(
                        "Turn {:?} ignored, heading {:?} with {:?} queued",
                        dir, self.state.direction(), self.state.queued_direction()
                    );
                }
            }
            Command::Restart => {
                info!("Restart requested at score {}", self.state.score());
                self.state.restart();
                self.start()?;
            }
            Command::TogglePause => self.toggle_pause()?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn step(&mut self) -> Result<()> {
        let outcome = self.state.tick();

        match outcome {
            TickOutcome::Idle => return Ok(()),
            TickOutcome::Moved { new_head, old_tail } => {
                trace!("Head to {:?}, tail left {:?}", new_head, old_tail);
            }
            TickOutcome::Ate { food, .. } => {
                info!("Ate food at ({}, {}), score {}", food.x, food.y, self.state.score());
            }
            TickOutcome::Over(_) => self.ticker.stop(),
        }

        self.draw_board()?;
        self.draw_status()?;
        self.term.flush()?;

        if let TickOutcome::Over(reason) = outcome {
            self.game_over(reason)?;
        }
        Ok(())
    }

    fn game_over(&mut self, reason: EndReason) -> Result<()> {
        let score = self.state.score();
        info!("Game over: {} Score {}, length {}", reason, score, self.state.snake().len());

        self.draw_restart_button(true)?;
        self.term.show_message(&[
            if reason.is_win() {"You won!"} else {"Game over!"},
            &*reason.to_string(),
            &*format!("Score: {}", score),
            "",
            "Press R or click Restart,",
            "or Q to quit."
        ])
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if self.state.is_over() {
            return Ok(());
        }

        if self.ticker.is_running() {
            self.ticker.stop();
            info!("Paused");
            self.term.show_message(&["Paused", "Press Esc to resume", "or CTRL+C to quit"])
        } else {
            info!("Resumed");
            self.term.hide_message()?;
            self.ticker.start(Instant::now());
            Ok(())
        }
    }

    fn draw_board(&mut self) -> Result<()> {
        let grid = Grid::project(&self.state);
        let dead = matches!(self.state.status(), Status::Over(reason) if !reason.is_win());
        let head_char = self.state.direction().head_char();

        for y in 0..grid.size() {
            for x in 0..grid.size() {
                let pos = Position::new(x, y);
                let glyph = cell_glyph(grid.get(pos), head_char, dead);
                let (sx, sy) = self.layout.cell(pos);
                for dx in 0..CELL_WIDTH {
                    self.term.print_at((sx + dx, sy), glyph)?;
                }
            }
        }

        Ok(())
    }

    fn draw_status(&mut self) -> Result<()> {
        let text = format!("Score: {}", self.state.score());
        let padded = format!("{:<width$}", text, width = self.layout.board_frame.0 as usize);
        self.term.print_str_at(self.layout.status, &padded, Color::White)
    }

    fn draw_controls(&mut self) -> Result<()> {
        for button in self.controls.pad() {
            self.term.print_str_at(button.top_left, button.label, Color::Grey)?;
        }
        self.draw_restart_button(false)
    }

    fn draw_restart_button(&mut self, shown: bool) -> Result<()> {
        let button = self.controls.restart();
        let (top_left, width) = (button.top_left, button.width() as usize);
        let text = if shown { button.label.to_string() } else { " ".repeat(width) };
        self.term.print_str_at(top_left, &text, Color::Cyan)?;
        self.term.flush()
    }
}

fn cell_glyph(cell: Cell, head_char: char, dead: bool) -> Glyph {
    match cell {
        Cell::Head | Cell::Body if dead => Glyph::new(DEAD_SNAKE_CHAR, Color::Red),
        Cell::Head => Glyph::new(head_char, Color::Green),
        Cell::Body => Glyph::new(SNAKE_BODY_CHAR, Color::DarkGreen),
        Cell::Food => Glyph::new(APPLE_CHAR, Color::Red),
        Cell::Empty => Glyph::BLANK,
    }
}
