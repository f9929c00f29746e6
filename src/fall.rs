/// Vertical motion of the falling phrase. Speed is a constant number of
/// logical units per tick, not time-scaled: motion is tick-count-based under
/// the fixed cadence, a deliberate simplification.
#[derive(Debug, Clone, Copy)]
pub struct FallController {
    speed: f32,
    top: f32,
    floor: f32,
}

impl FallController {
    pub fn new(speed: f32, top: f32, floor: f32) -> Self {
        Self { speed, top, floor }
    }

    pub fn advance(&self, position: f32) -> f32 {
        position + self.speed
    }

    pub fn reached_floor(&self, position: f32) -> bool {
        position >= self.floor
    }

    /// Starting position for a freshly generated phrase.
    pub fn top(&self) -> f32 {
        self.top
    }
}
