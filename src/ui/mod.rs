pub mod game_common;
pub mod snake_scene;

use arcade_snake::high_score::HighScoreStore;
use arcade_snake::session::ArcadeSession;
use ratatui::Frame;
use rand::Rng;

/// Draw one frame of the session.
pub fn draw<S: HighScoreStore, R: Rng>(frame: &mut Frame, session: &ArcadeSession<S, R>) {
    let area = frame.size();
    snake_scene::render_snake_scene(
        frame,
        area,
        session.game(),
        session.high_score(),
        session.notice(),
    );
}
