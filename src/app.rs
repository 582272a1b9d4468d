use ggez::event::EventHandler;
use ggez::graphics;
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::mint::Point2;
use ggez::{Context, GameError, GameResult};
use rand::rngs::ThreadRng;

use crate::clock::TickClock;
use crate::config::{Difficulty, GameConfig};
use crate::scores::{ScoreStore, HIGH_SCORE_FILE};
use crate::sim::{tick, Direction, GameState, Phase, Position, TickResult};

pub const GRID_CELL_SIZE: i16 = 24;

const BACKGROUND_COLOR: graphics::Color = graphics::Color::new(0.1, 0.1, 0.15, 1.0);
const GRID_COLOR: graphics::Color = graphics::Color::new(0.15, 0.15, 0.2, 1.0);
const FOOD_COLOR: graphics::Color = graphics::Color::new(1.0, 0.3, 0.2, 1.0);
const OVERLAY_COLOR: graphics::Color = graphics::Color::new(0.0, 0.0, 0.0, 0.6);

/// The driver: owns the state, the tick clock, the RNG and the score store,
/// and wires ggez events to the simulation. All game rules live in `sim`;
/// this layer only schedules, translates input and draws.
pub struct App {
    config: GameConfig,
    difficulty: Difficulty,
    state: GameState,
    clock: TickClock,
    scores: ScoreStore,
    rng: ThreadRng,
}

impl App {
    pub fn new(config: GameConfig) -> GameResult<Self> {
        let difficulty = Difficulty::Medium;
        let mut rng = rand::thread_rng();
        let state = GameState::new(&config, &mut rng)
            .map_err(|e| GameError::CustomError(e.to_string()))?;

        Ok(Self {
            config,
            difficulty,
            state,
            clock: TickClock::new(difficulty.tick_period()),
            scores: ScoreStore::load(HIGH_SCORE_FILE),
            rng,
        })
    }

    pub fn screen_size(config: &GameConfig) -> f32 {
        (config.grid_size * GRID_CELL_SIZE) as f32
    }

    /// Fresh state, fresh clock; the old run is discarded wholesale.
    fn restart(&mut self) {
        let mut state = GameState::new(&self.config, &mut self.rng)
            .expect("config was validated when the app was built");
        state.start();
        self.state = state;
        self.clock = TickClock::new(self.difficulty.tick_period());
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty != self.difficulty {
            self.difficulty = difficulty;
            self.clock.set_period(difficulty.tick_period());
        }
    }

    fn toggle_pause(&mut self) {
        match self.state.phase() {
            Phase::Running => {
                self.state.pause();
                self.clock.pause();
            }
            Phase::Paused => {
                self.state.resume();
                self.clock.resume();
            }
            _ => {}
        }
    }

    fn cell_rect(&self, pos: Position) -> graphics::Rect {
        graphics::Rect::new(
            (pos.x * GRID_CELL_SIZE) as f32,
            (pos.y * GRID_CELL_SIZE) as f32,
            GRID_CELL_SIZE as f32,
            GRID_CELL_SIZE as f32,
        )
    }

    fn draw_board(&self, ctx: &mut Context, canvas: &mut graphics::Canvas) -> GameResult {
        // Checkerboard backdrop
        for i in 0..self.config.grid_size {
            for j in 0..self.config.grid_size {
                if (i + j) % 2 == 0 {
                    let rect = self.cell_rect(Position::new(i, j));
                    canvas.draw(
                        &graphics::Mesh::new_rectangle(
                            ctx,
                            graphics::DrawMode::fill(),
                            rect,
                            GRID_COLOR,
                        )?,
                        graphics::DrawParam::default(),
                    );
                }
            }
        }

        canvas.draw(
            &graphics::Mesh::new_rectangle(
                ctx,
                graphics::DrawMode::fill(),
                self.cell_rect(self.state.food()),
                FOOD_COLOR,
            )?,
            graphics::DrawParam::default(),
        );

        // Snake, head brightest, fading toward the tail
        let len = self.state.len() as f32;
        for (i, pos) in self.state.body().enumerate() {
            let progress = i as f32 / len;
            let color = graphics::Color::new(0.0, 0.9 - progress * 0.4, 0.1, 1.0);
            canvas.draw(
                &graphics::Mesh::new_rectangle(
                    ctx,
                    graphics::DrawMode::fill(),
                    self.cell_rect(pos),
                    color,
                )?,
                graphics::DrawParam::default(),
            );
        }

        let score_text = graphics::Text::new(format!(
            "Score: {} | High Score: {} | {}",
            self.state.score(),
            self.scores.best(),
            self.difficulty.label(),
        ));
        canvas.draw(
            &score_text,
            graphics::DrawParam::default()
                .dest(Point2 { x: 10.0, y: 6.0 })
                .color(graphics::Color::WHITE),
        );

        Ok(())
    }

    fn draw_overlay(
        &self,
        ctx: &mut Context,
        canvas: &mut graphics::Canvas,
        message: &str,
    ) -> GameResult {
        let screen = Self::screen_size(&self.config);
        canvas.draw(
            &graphics::Mesh::new_rectangle(
                ctx,
                graphics::DrawMode::fill(),
                graphics::Rect::new(0.0, 0.0, screen, screen),
                OVERLAY_COLOR,
            )?,
            graphics::DrawParam::default(),
        );

        let mut text = graphics::Text::new(message);
        let text = text.set_scale(28.0);
        canvas.draw(
            text,
            graphics::DrawParam::default()
                .dest(Point2 {
                    x: screen / 2.0 - 130.0,
                    y: screen / 2.0 - 40.0,
                })
                .color(graphics::Color::WHITE),
        );

        Ok(())
    }
}

impl EventHandler for App {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        if self.state.phase() != Phase::Running {
            return Ok(());
        }

        if self.clock.advance(ctx.time.delta()) {
            match tick(&mut self.state, &mut self.rng) {
                TickResult::Ate | TickResult::GameOver => {
                    self.scores.record(self.state.score());
                }
                TickResult::Continued => {}
            }
        }

        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, BACKGROUND_COLOR);

        self.draw_board(ctx, &mut canvas)?;

        match self.state.phase() {
            Phase::Idle => {
                self.draw_overlay(ctx, &mut canvas, "Press Enter to start\n1/2/3 difficulty")?;
            }
            Phase::Paused => {
                self.draw_overlay(ctx, &mut canvas, "Paused\nPress Space to resume")?;
            }
            Phase::Over => {
                let message = format!(
                    "Game Over!\nScore: {}\nPress R to restart",
                    self.state.score()
                );
                self.draw_overlay(ctx, &mut canvas, &message)?;
            }
            Phase::Running => {}
        }

        canvas.finish(ctx)?;
        Ok(())
    }

    fn key_down_event(&mut self, _ctx: &mut Context, input: KeyInput, _repeat: bool) -> GameResult {
        let Some(keycode) = input.keycode else {
            return Ok(());
        };

        // Difficulty is selectable at any time; mid-run it only changes the
        // tick period going forward.
        match keycode {
            KeyCode::Key1 => self.set_difficulty(Difficulty::Easy),
            KeyCode::Key2 => self.set_difficulty(Difficulty::Medium),
            KeyCode::Key3 => self.set_difficulty(Difficulty::Hard),
            _ => {}
        }

        match self.state.phase() {
            Phase::Idle => {
                if keycode == KeyCode::Return || keycode == KeyCode::Space {
                    self.state.start();
                    self.clock = TickClock::new(self.difficulty.tick_period());
                }
            }
            Phase::Running => match keycode {
                KeyCode::Up => self.state.set_intended_direction(Direction::Up),
                KeyCode::Down => self.state.set_intended_direction(Direction::Down),
                KeyCode::Left => self.state.set_intended_direction(Direction::Left),
                KeyCode::Right => self.state.set_intended_direction(Direction::Right),
                KeyCode::Space | KeyCode::Escape => self.toggle_pause(),
                _ => {}
            },
            Phase::Paused => {
                if keycode == KeyCode::Space || keycode == KeyCode::Escape {
                    self.toggle_pause();
                }
            }
            Phase::Over => {
                if keycode == KeyCode::R || keycode == KeyCode::Return {
                    self.restart();
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_replaces_the_run_with_a_fresh_running_state() {
        let mut app = App::new(GameConfig::default()).unwrap();
        assert_eq!(app.state.phase(), Phase::Idle);

        app.restart();

        assert_eq!(app.state.phase(), Phase::Running);
        assert_eq!(app.state.score(), 0);
        assert_eq!(app.state.len(), 3);
    }
}
