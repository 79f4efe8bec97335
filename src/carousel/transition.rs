#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Forward,
    Backward,
}

impl SlideDirection {
    fn sign(self) -> f32 {
        match self {
            SlideDirection::Forward => 1.0,
            SlideDirection::Backward => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideFrame {
    pub offset_x: f32,
    pub opacity: f32,
}

impl SlideFrame {
    pub const REST: Self = Self {
        offset_x: 0.0,
        opacity: 1.0,
    };
}

// Sale la imagen actual desvaneciéndose y entra la nueva por el lado contrario
#[derive(Debug, Clone, Copy)]
pub struct SlideTransition {
    direction: SlideDirection,
    started_at: f64,
    half_duration: f64,
    distance: f32,
}

impl SlideTransition {
    pub fn new(direction: SlideDirection, started_at: f64, half_duration: f64, distance: f32) -> Self {
        Self {
            direction,
            started_at,
            half_duration: half_duration.max(0.0),
            distance,
        }
    }

    pub fn total_duration(&self) -> f64 {
        self.half_duration * 2.0
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now - self.started_at >= self.total_duration()
    }

    pub fn frame_at(&self, now: f64) -> SlideFrame {
        let elapsed = (now - self.started_at).max(0.0);
        if self.is_finished(now) || self.half_duration == 0.0 {
            return SlideFrame::REST;
        }

        let sign = self.direction.sign();
        if elapsed < self.half_duration {
            let t = ease_in_out_quad((elapsed / self.half_duration) as f32);
            SlideFrame {
                offset_x: -sign * self.distance * t,
                opacity: 1.0 - t,
            }
        } else {
            let t = ease_in_out_quad(((elapsed - self.half_duration) / self.half_duration) as f32);
            SlideFrame {
                offset_x: sign * self.distance * (1.0 - t),
                opacity: t,
            }
        }
    }
}

pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}
