//! The per-frame driver: input → update → render at a fixed frame rate.

use std::io;
use std::time::{Duration, Instant};

use ratatui::{style::Color, Frame, Terminal};
use rand::Rng;

use crate::audio::Audio;
use crate::config::DisplayConfig;
use crate::game::{self, Control, FrameEvents, GameState, InputEvent, KeyTracker};
use crate::ui::{self, ViewOptions};

/// Owns the game state and everything a frame touches
pub struct GameLoop<R: Rng> {
    state: GameState,
    rng: R,
    audio: Audio,
}

impl<R: Rng> GameLoop<R> {
    /// Set up a fresh game with the ball already served in a random direction
    pub fn new(mut rng: R, audio: Audio) -> Self {
        let mut state = GameState::new();
        state.serve_random(&mut rng);

        Self { state, rng, audio }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Start the looping background track
    pub fn start(&mut self) {
        self.audio.start_music();
    }

    pub fn handle_input(&mut self, input: InputEvent) -> Control {
        game::handle_input(&mut self.state, input)
    }

    /// Advance one frame and play the matching sound
    pub fn update(&mut self) -> FrameEvents {
        let events = game::update(&mut self.state, &mut self.rng);
        self.audio.play_frame(&events);
        events
    }

    pub fn render(&self, frame: &mut Frame, display: &DisplayConfig) {
        let [r, g, b] = display.background_color;
        let view = ViewOptions {
            background: Color::Rgb(r, g, b),
            show_hint: display.show_hint,
            music_playing: self.audio.music_playing(),
        };
        ui::render(frame, &self.state, &view);
    }
}

/// Time budget for one frame at `target_fps` (0 means uncapped)
pub fn frame_duration(target_fps: u64) -> Duration {
    if target_fps == 0 {
        Duration::ZERO
    } else {
        // Anything past u32::MAX rounds down to a zero budget anyway
        Duration::from_secs(1) / u32::try_from(target_fps).unwrap_or(u32::MAX)
    }
}

/// Apply frame rate limiting to maintain consistent game speed.
///
/// Sleeps for whatever is left of `budget` since `frame_start`.
pub fn limit_frame_rate(frame_start: Instant, budget: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < budget {
        std::thread::sleep(budget - elapsed);
    }
}

/// Run until the player quits
pub fn run<B: ratatui::backend::Backend, R: Rng>(
    terminal: &mut Terminal<B>,
    game_loop: &mut GameLoop<R>,
    tracker: &mut KeyTracker,
    display_config: &DisplayConfig,
) -> Result<(), io::Error> {
    let fps = display_config.target_fps;
    tracing::info!(fps, release = ?tracker.mode(), "game started");

    let budget = frame_duration(fps);
    game_loop.start();

    loop {
        let now = Instant::now();

        for input in game::poll_input(tracker)? {
            if game_loop.handle_input(input) == Control::Quit {
                let state = game_loop.state();
                tracing::info!(
                    left = state.left_score,
                    right = state.right_score,
                    "player quit"
                );
                return Ok(());
            }
        }

        game_loop.update();

        terminal.draw(|f| game_loop.render(f, display_config))?;

        limit_frame_rate(now, budget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::tests::recording_audio;
    use crate::audio::{COLLISION_VOLUME, SCORE_VOLUME};
    use crate::game::state::{BALL_RADIUS, PADDLE_HEIGHT, PADDLE_WIDTH};
    use crate::game::input::Key;
    use crate::game::Side;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;

    fn game_loop() -> (GameLoop<StdRng>, crate::audio::tests::PlayLog) {
        let (audio, log) = recording_audio();
        (GameLoop::new(StdRng::seed_from_u64(3), audio), log)
    }

    #[test]
    fn test_new_loop_has_served() {
        let (game_loop, log) = game_loop();
        let ball = &game_loop.state().ball;

        assert!((2.0..4.0).contains(&ball.vx.abs()));
        assert!((1.0..2.0).contains(&ball.vy));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_update_plays_collision_sound() {
        let (mut game_loop, log) = game_loop();
        let paddle_mid = game_loop.state.left_paddle.y + PADDLE_HEIGHT / 2.0;
        game_loop.state.ball.x = PADDLE_WIDTH + BALL_RADIUS + 1.0;
        game_loop.state.ball.y = paddle_mid;
        game_loop.state.ball.vx = -3.0;

        let events = game_loop.update();

        assert!(events.paddle_collision);
        assert_eq!(*log.borrow(), vec![("collision.ogg", COLLISION_VOLUME)]);
    }

    #[test]
    fn test_update_plays_score_sound() {
        let (mut game_loop, log) = game_loop();
        game_loop.state.left_paddle.y = 0.0;
        game_loop.state.ball.x = PADDLE_WIDTH + BALL_RADIUS + 1.0;
        game_loop.state.ball.y = 400.0;
        game_loop.state.ball.vx = -3.0;
        game_loop.state.ball.vy = 0.5;

        let events = game_loop.update();

        assert_eq!(events.scored, Some(Side::Right));
        assert_eq!(game_loop.state().right_score, 1);
        assert_eq!(*log.borrow(), vec![("score.ogg", SCORE_VOLUME)]);
    }

    #[test]
    fn test_input_moves_paddle_over_frames() {
        let (mut game_loop, _log) = game_loop();
        let start_y = game_loop.state().right_paddle.y;

        assert_eq!(game_loop.handle_input(InputEvent::KeyDown(Key::Down)), Control::Continue);
        for _ in 0..5 {
            game_loop.update();
        }
        game_loop.handle_input(InputEvent::KeyUp(Key::Down));
        game_loop.update();

        let moved = game_loop.state().right_paddle.y - start_y;
        assert!((moved - 20.0).abs() < 1e-3);
        assert_eq!(game_loop.handle_input(InputEvent::KeyDown(Key::Escape)), Control::Quit);
    }

    #[test]
    fn test_render_reports_music() {
        let (mut game_loop, _log) = game_loop();
        game_loop.start();

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| game_loop.render(f, &DisplayConfig::default()))
            .unwrap();

        let footer: String = terminal.backend().buffer().content()[60 * 19..]
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(footer.contains('♪'));
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(frame_duration(0), Duration::ZERO);
        assert_eq!(frame_duration(50), Duration::from_millis(20));
        assert!(frame_duration(60) > Duration::from_millis(16));
    }

    #[test]
    fn test_frame_duration_huge_fps_does_not_panic() {
        let display: DisplayConfig = toml::from_str("target_fps = 4294967296").unwrap();

        assert_eq!(frame_duration(display.target_fps), Duration::ZERO);
        assert_eq!(frame_duration(u64::MAX), Duration::ZERO);
        assert_eq!(frame_duration(u32::MAX as u64 + 1), frame_duration(u32::MAX as u64));
    }
}
