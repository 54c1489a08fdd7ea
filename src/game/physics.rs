use rand::Rng;

use super::state::{
    GameState, Side, BALL_RADIUS, FIELD_HEIGHT, FIELD_WIDTH, PADDLE_HEIGHT, PADDLE_WIDTH,
};

// Ball stops accelerating on paddle hits once |vx| reaches this
pub const SPEED_CAP: f32 = 10.0;
pub const SPEED_UP: f32 = 1.1;

/// What happened during a single frame
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameEvents {
    pub wall_collision: bool,
    pub paddle_collision: bool,
    pub scored: Option<Side>,
}

impl FrameEvents {
    /// A reflection of any kind (wall or paddle)
    pub fn collided(&self) -> bool {
        self.wall_collision || self.paddle_collision
    }
}

/// Advance the game by one frame.
pub fn update<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> FrameEvents {
    let mut events = FrameEvents::default();

    state.left_paddle.step();
    state.right_paddle.step();

    state.ball.x += state.ball.vx;
    state.ball.y += state.ball.vy;

    // Reflect back into the field; a ball already heading inwards keeps its direction
    if state.ball.y - BALL_RADIUS <= 0.0 {
        state.ball.vy = state.ball.vy.abs();
        events.wall_collision = true;
    } else if state.ball.y + BALL_RADIUS >= FIELD_HEIGHT {
        state.ball.vy = -state.ball.vy.abs();
        events.wall_collision = true;
    }

    // Only the paddle the ball is travelling towards can be reached
    let side = if state.ball.vx < 0.0 {
        Side::Left
    } else {
        Side::Right
    };

    if reached_paddle_plane(state, side) {
        if within_paddle_span(state, side) {
            bounce_off_paddle(state);
            events.paddle_collision = true;
            tracing::debug!(?side, vx = state.ball.vx, vy = state.ball.vy, "paddle hit");
        } else {
            let scorer = side.opponent();
            match scorer {
                Side::Left => state.left_score += 1,
                Side::Right => state.right_score += 1,
            }
            events.scored = Some(scorer);
            tracing::info!(
                ?scorer,
                left = state.left_score,
                right = state.right_score,
                "point scored"
            );
            state.serve(scorer, rng);
        }
    }

    events
}

fn reached_paddle_plane(state: &GameState, side: Side) -> bool {
    match side {
        Side::Left => state.ball.x - BALL_RADIUS <= PADDLE_WIDTH,
        Side::Right => state.ball.x + BALL_RADIUS >= FIELD_WIDTH - PADDLE_WIDTH,
    }
}

fn within_paddle_span(state: &GameState, side: Side) -> bool {
    let top = state.paddle(side).y;
    state.ball.y >= top && state.ball.y <= top + PADDLE_HEIGHT
}

fn bounce_off_paddle(state: &mut GameState) {
    let ball = &mut state.ball;
    ball.vx = -ball.vx;

    if ball.vx.abs() < SPEED_CAP {
        ball.vx *= SPEED_UP;
        ball.vy *= SPEED_UP;
    }
}
