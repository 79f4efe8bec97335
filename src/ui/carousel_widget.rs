use egui::{pos2, vec2, Align2, Color32, CursorIcon, FontId, Id, Rect, RichText, Sense};
use tracing::trace;

use crate::carousel::Carousel;
use crate::core::image_cache::{ImageCache, Slot};
use crate::i18n::es::*;

const BUTTON_SIZE: f32 = 48.0;
const BUTTON_MARGIN: f32 = 40.0;

// Estado del puntero en toda la ventana, no solo en el área del carrusel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub x: Option<f32>,
    pub primary_down: bool,
    pub gone: bool,
}

// Devuelve `true` cuando el arrastre termina
pub fn follow_pointer(carousel: &mut Carousel, sample: PointerSample) -> bool {
    if !carousel.is_dragging() {
        return true;
    }
    if let Some(x) = sample.x {
        carousel.update_drag(x);
    }
    if sample.gone || !sample.primary_down {
        carousel.end_drag();
        return true;
    }
    false
}

// Se libera al soltarse (drop)
struct PointerCapture {
    ctx: egui::Context,
    id: Id,
}

impl PointerCapture {
    fn acquire(ctx: &egui::Context, id: Id) -> Self {
        ctx.set_dragged_id(id);
        trace!(?id, "puntero capturado");
        Self { ctx: ctx.clone(), id }
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        if self.ctx.is_being_dragged(self.id) {
            self.ctx.stop_dragging();
        }
        trace!(id = ?self.id, "puntero liberado");
    }
}

#[derive(Default)]
pub struct CarouselView {
    capture: Option<PointerCapture>,
}

impl CarouselView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release(&mut self, carousel: &mut Carousel) {
        carousel.end_drag();
        self.capture = None;
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        carousel: &mut Carousel,
        cache: &mut ImageCache,
    ) -> egui::Response {
        let now = ui.input(|i| i.time);
        let frame = carousel.tick(now);
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        if carousel.is_empty() {
            self.release(carousel);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                TEXT_OPENIMG,
                FontId::proportional(16.0),
                ui.visuals().weak_text_color(),
            );
            return response;
        }

        self.handle_drag(ui, &response, carousel);

        painter.rect_filled(rect, 12.0, Color32::from_gray(18));

        let offset_x = carousel.visual_offset() + frame.offset_x;
        let source = carousel.current_image().map(str::to_owned);
        match source.and_then(|src| cache.get(&src).cloned()) {
            Some(Slot::Ready(texture)) => {
                let image_size = texture.size_vec2();
                let scale = (rect.width() / image_size.x)
                    .min(rect.height() / image_size.y)
                    .min(1.0);
                let image_rect = Rect::from_center_size(rect.center() + vec2(offset_x, 0.0), image_size * scale);
                painter.image(
                    texture.id(),
                    image_rect,
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE.gamma_multiply(frame.opacity),
                );
            }
            Some(Slot::Failed) => {
                painter.text(
                    rect.center() + vec2(offset_x, 0.0),
                    Align2::CENTER_CENTER,
                    format!("🖼 {TEXT_BROKENIMG}"),
                    FontId::proportional(16.0),
                    ui.visuals().error_fg_color.gamma_multiply(frame.opacity),
                );
            }
            None => {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    TEXT_LOADINGIMG,
                    FontId::proportional(16.0),
                    ui.visuals().weak_text_color(),
                );
            }
        }

        self.show_controls(ui, rect, carousel, now);
        Self::show_position(&painter, rect, carousel);

        if carousel.is_dragging() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }
        if carousel.is_animating() || carousel.is_dragging() {
            ui.ctx().request_repaint();
        }

        response
    }

    fn handle_drag(&mut self, ui: &egui::Ui, response: &egui::Response, carousel: &mut Carousel) {
        if self.capture.is_none() && response.drag_started_by(egui::PointerButton::Primary) {
            let start = ui
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(start) = start {
                if carousel.begin_drag(start.x) {
                    self.capture = Some(PointerCapture::acquire(ui.ctx(), response.id));
                }
            }
        }

        if self.capture.is_some() {
            let sample = ui.input(|i| PointerSample {
                x: i.pointer.latest_pos().map(|p| p.x),
                primary_down: i.pointer.primary_down(),
                gone: i.events.iter().any(|e| matches!(e, egui::Event::PointerGone)),
            });
            if follow_pointer(carousel, sample) {
                self.capture = None;
            }
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui, rect: Rect, carousel: &mut Carousel, now: f64) {
        let size = vec2(BUTTON_SIZE, BUTTON_SIZE);

        if carousel.can_go_previous() {
            let at = Rect::from_center_size(pos2(rect.left() + BUTTON_MARGIN, rect.center().y), size);
            let button = egui::Button::new(RichText::new("⬅").size(22.0));
            if ui.put(at, button).on_hover_text(BTN_PREV).clicked() {
                carousel.previous(now);
            }
        }

        if carousel.can_go_next() {
            let at = Rect::from_center_size(pos2(rect.right() - BUTTON_MARGIN, rect.center().y), size);
            let button = egui::Button::new(RichText::new("➡").size(22.0));
            if ui.put(at, button).on_hover_text(BTN_NEXT).clicked() {
                carousel.next(now);
            }
        }
    }

    fn show_position(painter: &egui::Painter, rect: Rect, carousel: &Carousel) {
        let Some(label) = carousel.position_label() else {
            return;
        };
        let galley = painter.layout_no_wrap(label, FontId::proportional(14.0), Color32::WHITE);
        let pill = Rect::from_center_size(
            pos2(rect.center().x, rect.bottom() - 28.0),
            galley.size() + vec2(24.0, 12.0),
        );
        painter.rect_filled(pill, pill.height() / 2.0, Color32::from_black_alpha(120));
        painter.galley(pill.center() - galley.size() / 2.0, galley, Color32::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::CarouselConfig;

    fn carousel(n: usize) -> Carousel {
        let images = (0..n).map(|i| format!("{i}.png")).collect();
        Carousel::new(images, CarouselConfig::default())
    }

    fn held_at(x: f32) -> PointerSample {
        PointerSample {
            x: Some(x),
            primary_down: true,
            gone: false,
        }
    }

    #[test]
    fn tracks_the_pointer_while_held() {
        let mut c = carousel(5);
        c.begin_drag(500.0);
        assert!(!follow_pointer(&mut c, held_at(380.0)));
        assert_eq!(c.current_index(), Some(1));
        // Fuera del área del carrusel sigue contando
        assert!(!follow_pointer(&mut c, held_at(-120.0)));
        assert_eq!(c.current_index(), Some(4));
        assert!(c.is_dragging());
    }

    #[test]
    fn release_ends_the_session_after_the_last_move() {
        let mut c = carousel(5);
        c.begin_drag(500.0);
        let released = PointerSample {
            x: Some(290.0),
            primary_down: false,
            gone: false,
        };
        assert!(follow_pointer(&mut c, released));
        assert_eq!(c.current_index(), Some(2));
        assert!(!c.is_dragging());
        assert_eq!(c.visual_offset(), 0.0);
    }

    #[test]
    fn leaving_the_window_ends_the_session() {
        let mut c = carousel(5);
        c.begin_drag(100.0);
        follow_pointer(&mut c, held_at(60.0));
        let gone = PointerSample {
            x: None,
            primary_down: true,
            gone: true,
        };
        assert!(follow_pointer(&mut c, gone));
        assert!(!c.is_dragging());
        assert_eq!(c.visual_offset(), 0.0);
    }

    #[test]
    fn no_session_means_nothing_to_follow() {
        let mut c = carousel(5);
        assert!(follow_pointer(&mut c, held_at(-900.0)));
        assert_eq!(c.current_index(), Some(0));
    }

    fn render(view: &mut CarouselView, carousel: &mut Carousel, cache: &mut ImageCache) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                view.show(ui, carousel, cache);
            });
        });
    }

    #[test]
    fn renders_empty_and_loading_states() {
        let mut view = CarouselView::new();
        let mut cache = ImageCache::new(2);

        let mut empty = carousel(0);
        render(&mut view, &mut empty, &mut cache);
        assert!(view.capture.is_none());

        let mut c = carousel(3);
        render(&mut view, &mut c, &mut cache);
        cache.insert_failed("0.png".into());
        render(&mut view, &mut c, &mut cache);
        assert_eq!(c.current_index(), Some(0));
    }

    #[test]
    fn release_drops_the_session() {
        let mut view = CarouselView::new();
        let mut c = carousel(3);
        c.begin_drag(10.0);
        view.release(&mut c);
        assert!(!c.is_dragging());
        assert!(view.capture.is_none());
    }
}
