use rand::Rng;

// Logical field the physics runs in. The terminal view scales it to fit.
pub const FIELD_WIDTH: f32 = 640.0;
pub const FIELD_HEIGHT: f32 = 480.0;

pub const PADDLE_WIDTH: f32 = FIELD_WIDTH * 0.025;
pub const PADDLE_HEIGHT: f32 = FIELD_HEIGHT * 0.17;
pub const PADDLE_STEP: f32 = 4.0; // Velocity change per key press, units/frame

pub const BALL_RADIUS: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Ball {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub y: f32,
    pub velocity: f32,
}

impl Paddle {
    pub fn new(y: f32) -> Self {
        Self { y, velocity: 0.0 }
    }

    /// Advance by the current velocity, undoing the move if it would leave the field.
    pub fn step(&mut self) {
        self.y += self.velocity;
        if self.y < 0.0 || self.y > FIELD_HEIGHT - PADDLE_HEIGHT {
            self.y -= self.velocity;
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub left_score: u32,
    pub right_score: u32,
}

impl GameState {
    /// Fresh game: centred paddles, zero scores, ball at rest in the centre.
    /// Call [`GameState::serve`] before the first update.
    pub fn new() -> Self {
        let center_y = FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0;

        Self {
            ball: Ball::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            left_paddle: Paddle::new(center_y),
            right_paddle: Paddle::new(center_y),
            left_score: 0,
            right_score: 0,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left_paddle,
            Side::Right => &mut self.right_paddle,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }

    /// Respawn the ball at the centre heading towards `direction`.
    ///
    /// Horizontal speed is drawn from [2, 4) and vertical speed from [1, 2);
    /// the serve always heads downwards.
    pub fn serve<R: Rng + ?Sized>(&mut self, direction: Side, rng: &mut R) {
        self.ball.x = FIELD_WIDTH / 2.0;
        self.ball.y = FIELD_HEIGHT / 2.0;

        let speed_x: f32 = rng.gen_range(2.0..4.0);
        self.ball.vx = match direction {
            Side::Left => -speed_x,
            Side::Right => speed_x,
        };
        self.ball.vy = rng.gen_range(1.0..2.0);

        tracing::debug!(
            ?direction,
            vx = self.ball.vx,
            vy = self.ball.vy,
            "ball served"
        );
    }

    /// Opening serve: direction decided by a coin flip.
    pub fn serve_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let direction = if rng.gen_bool(0.5) {
            Side::Right
        } else {
            Side::Left
        };
        self.serve(direction, rng);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
