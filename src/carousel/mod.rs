pub mod drag;
pub mod transition;

use tracing::debug;

use crate::config::settings::CarouselConfig;
use drag::DragSession;
use transition::{SlideDirection, SlideFrame, SlideTransition};

#[derive(Debug, Clone)]
pub struct Carousel {
    images: Vec<String>,
    current_index: Option<usize>,
    drag: Option<DragSession>,
    transition: Option<SlideTransition>,
    visual_offset: f32,
    config: CarouselConfig,
}

impl Carousel {
    pub fn new(images: Vec<String>, config: CarouselConfig) -> Self {
        let current_index = if images.is_empty() { None } else { Some(0) };
        Self {
            images,
            current_index,
            drag: None,
            transition: None,
            visual_offset: 0.0,
            config,
        }
    }

    pub fn empty(config: CarouselConfig) -> Self {
        Self::new(Vec::new(), config)
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_image(&self) -> Option<&str> {
        self.current_index
            .and_then(|idx| self.images.get(idx))
            .map(String::as_str)
    }

    pub fn can_go_previous(&self) -> bool {
        matches!(self.current_index, Some(idx) if idx > 0)
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self.current_index, Some(idx) if idx + 1 < self.images.len())
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn visual_offset(&self) -> f32 {
        self.visual_offset
    }

    pub fn position_label(&self) -> Option<String> {
        self.current_index
            .map(|idx| format!("{} / {}", idx + 1, self.images.len()))
    }

    pub fn next(&mut self, now: f64) -> bool {
        self.slide(SlideDirection::Forward, now)
    }

    pub fn previous(&mut self, now: f64) -> bool {
        self.slide(SlideDirection::Backward, now)
    }

    fn slide(&mut self, direction: SlideDirection, now: f64) -> bool {
        self.settle(now);
        if self.transition.is_some() {
            debug!(?direction, "navegación ignorada: transición en curso");
            return false;
        }

        let Some(idx) = self.current_index else {
            return false;
        };
        let target = match direction {
            SlideDirection::Forward if self.can_go_next() => idx + 1,
            SlideDirection::Backward if self.can_go_previous() => idx - 1,
            _ => return false,
        };

        self.current_index = Some(target);
        self.transition = Some(SlideTransition::new(
            direction,
            now,
            self.config.slide_duration,
            self.config.slide_distance,
        ));
        debug!(from = idx, to = target, ?direction, "cambio de imagen");
        true
    }

    fn settle(&mut self, now: f64) {
        if self.transition.is_some_and(|t| t.is_finished(now)) {
            self.transition = None;
        }
    }

    // `now` en segundos, como lo da egui
    pub fn tick(&mut self, now: f64) -> SlideFrame {
        self.settle(now);
        self.transition
            .map(|t| t.frame_at(now))
            .unwrap_or(SlideFrame::REST)
    }

    // Sin transición
    pub fn go_to(&mut self, index: usize) {
        if self.images.is_empty() {
            return;
        }
        let target = index.min(self.images.len() - 1);
        if self.current_index != Some(target) {
            debug!(to = target, "salto directo");
            self.current_index = Some(target);
        }
    }

    pub fn begin_drag(&mut self, pointer_x: f32) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(idx) = self.current_index else {
            return false;
        };

        self.drag = Some(DragSession::new(pointer_x, idx));
        self.visual_offset = 0.0;
        debug!(start_x = pointer_x, index = idx, "inicio de arrastre");
        true
    }

    pub fn update_drag(&mut self, pointer_x: f32) {
        let Some(session) = self.drag.as_mut() else {
            return;
        };
        let displacement = session.update(pointer_x);
        let start_index = session.start_index();

        let threshold = self.config.step_threshold;
        let target = drag::target_index(start_index, displacement, threshold, self.images.len());
        if self.current_index != Some(target) {
            debug!(from = ?self.current_index, to = target, displacement, "arrastre cambia de imagen");
            self.current_index = Some(target);
            self.visual_offset = 0.0;
        }

        // Sin desplazamiento visual más allá de los extremos
        let can_move = if displacement < 0.0 {
            self.can_go_next()
        } else {
            self.can_go_previous()
        };
        self.visual_offset = if can_move {
            drag::partial_offset(displacement, threshold, self.config.drag_damping)
        } else {
            0.0
        };
    }

    pub fn end_drag(&mut self) {
        if self.drag.take().is_some() {
            debug!(index = ?self.current_index, "fin de arrastre");
        }
        self.visual_offset = 0.0;
    }
}
