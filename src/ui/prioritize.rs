use egui::{Color32, Pos2, RichText, Sense, Ui};

use crate::model::{Priority, Task};
use crate::ui::theme;

/// Actions the triage card can request.
pub enum PrioritizeAction {
    None,
    /// A drag over the card finished: (start, end) in screen points.
    Swipe((f32, f32), (f32, f32)),
    Assign(i64, Priority),
}

/// Pointer positions of a drag in progress over the card.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwipeState {
    start: Option<Pos2>,
    last: Option<Pos2>,
}

impl SwipeState {
    /// Anchor the drag where the button went down. egui reports a drag only
    /// after the pointer leaves its threshold, so the current position is a
    /// fallback.
    fn begin(&mut self, press_origin: Option<Pos2>, pointer: Option<Pos2>) {
        self.start = press_origin.or(pointer);
        self.last = pointer.or(self.start);
    }

    fn track(&mut self, pointer: Option<Pos2>) {
        if pointer.is_some() {
            self.last = pointer;
        }
    }

    /// Close the drag and hand back its endpoints.
    fn finish(&mut self, pointer: Option<Pos2>) -> Option<((f32, f32), (f32, f32))> {
        let end = pointer.or(self.last);
        let swipe = match (self.start, end) {
            (Some(start), Some(end)) => Some(((start.x, start.y), (end.x, end.y))),
            _ => None,
        };
        *self = SwipeState::default();
        swipe
    }
}

/// Render the prioritization tab: one untriaged task at a time.
pub fn show_prioritize(
    current: Option<&Task>,
    remaining: usize,
    swipe: &mut SwipeState,
    ui: &mut Ui,
) -> PrioritizeAction {
    let mut action = PrioritizeAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Prioritize")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(
            RichText::new(format!("({} left)", remaining))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(8.0);

    let Some(task) = current else {
        *swipe = SwipeState::default();
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(format!(
                    "{}  Every task has a priority!",
                    egui_phosphor::regular::CONFETTI
                ))
                .size(16.0)
                .color(theme::TEXT_SECONDARY),
            );
        });
        return action;
    };

    quadrant_hint(ui, Priority::ImportantUrgent, Priority::ImportantNotUrgent);
    ui.add_space(4.0);

    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), theme::CARD_HEIGHT),
        Sense::drag(),
    );

    if response.drag_started() {
        let origin = ui.input(|i| i.pointer.press_origin());
        swipe.begin(origin, response.interact_pointer_pos());
    }
    if response.dragged() {
        swipe.track(response.interact_pointer_pos());
    }
    if response.drag_stopped() {
        if let Some((start, end)) = swipe.finish(response.interact_pointer_pos()) {
            action = PrioritizeAction::Swipe(start, end);
        }
    }

    // Card follows the pointer a little while dragging.
    let offset = match (swipe.start, swipe.last) {
        (Some(start), Some(last)) => (last - start) * 0.35,
        _ => egui::Vec2::ZERO,
    };
    let card = rect.translate(offset);
    let painter = ui.painter();
    painter.rect(
        card,
        egui::Rounding::same(10.0),
        theme::BG_CARD,
        egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
    let galley = painter.layout(
        task.text.clone(),
        theme::font_card(),
        theme::TEXT_PRIMARY,
        card.width() - 32.0,
    );
    let text_pos = card.center() - galley.size() / 2.0;
    painter.galley(text_pos, galley, theme::TEXT_PRIMARY);
    painter.text(
        card.center_bottom() - egui::vec2(0.0, 14.0),
        egui::Align2::CENTER_CENTER,
        "Swipe up or down, left for urgent",
        theme::font_status(),
        theme::TEXT_DIM,
    );

    ui.add_space(4.0);
    quadrant_hint(ui, Priority::UrgentNotImportant, Priority::NotImportantNotUrgent);

    ui.add_space(12.0);
    ui.separator();
    ui.label(RichText::new("Or pick directly").size(10.0).color(theme::TEXT_DIM));
    ui.horizontal_wrapped(|ui| {
        for p in Priority::quadrants() {
            let btn = egui::Button::new(
                RichText::new(format!("{} {}", theme::priority_icon(*p), p.label()))
                    .size(11.0)
                    .color(Color32::WHITE),
            )
            .fill(theme::priority_color(*p))
            .rounding(egui::Rounding::same(4.0));
            if ui.add(btn).clicked() {
                action = PrioritizeAction::Assign(task.id, *p);
            }
        }
    });

    action
}

/// Labels the two quadrants reachable by swiping towards one edge.
fn quadrant_hint(ui: &mut Ui, left: Priority, right: Priority) {
    ui.columns(2, |cols| {
        for (col, p, align) in [
            (0, left, egui::Align::Min),
            (1, right, egui::Align::Max),
        ] {
            cols[col].with_layout(egui::Layout::top_down(align), |ui| {
                ui.label(
                    RichText::new(format!("{} {}", theme::priority_icon(p), p.label()))
                        .size(11.0)
                        .color(theme::priority_color(p)),
                );
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::gesture::classify_swipe;

    #[test]
    fn swipe_measures_from_press_origin() {
        let mut swipe = SwipeState::default();
        // Drag reported 8 points after the press, once past egui's threshold.
        swipe.begin(Some(Pos2::new(100.0, 100.0)), Some(Pos2::new(100.0, 92.0)));
        swipe.track(Some(Pos2::new(100.0, 60.0)));
        let (start, end) = swipe.finish(Some(Pos2::new(100.0, 48.0))).expect("swipe");
        assert_eq!(start, (100.0, 100.0));
        assert_eq!(classify_swipe(start, end), Some(Priority::ImportantNotUrgent));
        assert!(swipe.start.is_none() && swipe.last.is_none());
    }

    #[test]
    fn swipe_falls_back_to_pointer_without_origin() {
        let mut swipe = SwipeState::default();
        swipe.begin(None, Some(Pos2::new(10.0, 10.0)));
        let (start, end) = swipe.finish(None).expect("swipe");
        assert_eq!(start, (10.0, 10.0));
        assert_eq!(end, (10.0, 10.0));
        assert!(swipe.finish(None).is_none());
    }
}
