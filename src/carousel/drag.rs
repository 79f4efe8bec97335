#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    start_x: f32,
    start_index: usize,
    displacement: f32,
}

impl DragSession {
    pub fn new(start_x: f32, start_index: usize) -> Self {
        Self {
            start_x,
            start_index,
            displacement: 0.0,
        }
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn update(&mut self, pointer_x: f32) -> f32 {
        self.displacement = pointer_x - self.start_x;
        self.displacement
    }
}

pub fn whole_steps(displacement: f32, step_threshold: f32) -> usize {
    (displacement.abs() / step_threshold).floor() as usize
}

// Siempre relativo al índice donde empezó el arrastre
pub fn target_index(start_index: usize, displacement: f32, step_threshold: f32, len: usize) -> usize {
    let last = len.saturating_sub(1);
    let steps = whole_steps(displacement, step_threshold);
    if displacement < 0.0 {
        start_index.saturating_add(steps).min(last)
    } else {
        start_index.saturating_sub(steps).min(last)
    }
}

pub fn partial_offset(displacement: f32, step_threshold: f32, damping: f32) -> f32 {
    let remainder = displacement.abs() % step_threshold;
    let sign = if displacement < 0.0 { -1.0 } else { 1.0 };
    sign * remainder * damping
}
