use ggez::event;
use ggez::GameResult;

mod app;
mod clock;
mod config;
mod scores;
mod sim;

use app::App;
use config::GameConfig;

fn main() -> GameResult {
    let config = GameConfig::default();
    let screen_size = App::screen_size(&config);

    let window_setup = ggez::conf::WindowSetup::default()
        .title("Grid Snake")
        .vsync(true);
    let window_mode = ggez::conf::WindowMode::default()
        .dimensions(screen_size, screen_size)
        .resizable(false);

    let (ctx, event_loop) = ggez::ContextBuilder::new("gridsnake", "gridsnake")
        .window_setup(window_setup)
        .window_mode(window_mode)
        .build()?;

    let game = App::new(config)?;
    event::run(ctx, event_loop, game)
}
