use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::Priority;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_CARD: Color32 = Color32::from_rgb(38, 40, 52);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 20, 28);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);

pub const TIMER_WORK: Color32 = Color32::from_rgb(220, 53, 69); // #dc3545
pub const TIMER_BREAK: Color32 = Color32::from_rgb(40, 167, 69); // #28a745

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const ROW_ROUNDING: f32 = 4.0;
pub const CARD_HEIGHT: f32 = 170.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_card() -> FontId {
    FontId::proportional(18.0)
}

pub fn font_clock() -> FontId {
    FontId::monospace(64.0)
}

// ── Quadrants ────────────────────────────────────────────────────────────────

pub fn priority_color(priority: Priority) -> Color32 {
    match priority {
        Priority::None => TEXT_DIM,
        Priority::ImportantUrgent => Color32::from_rgb(229, 57, 53),
        Priority::ImportantNotUrgent => Color32::from_rgb(66, 133, 244),
        Priority::UrgentNotImportant => Color32::from_rgb(251, 140, 0),
        Priority::NotImportantNotUrgent => Color32::from_rgb(120, 124, 140),
    }
}

pub fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::None => egui_phosphor::regular::CIRCLE_DASHED,
        Priority::ImportantUrgent => egui_phosphor::regular::FIRE,
        Priority::ImportantNotUrgent => egui_phosphor::regular::CALENDAR_CHECK,
        Priority::UrgentNotImportant => egui_phosphor::regular::USERS,
        Priority::NotImportantNotUrgent => egui_phosphor::regular::TRASH,
    }
}

pub fn timer_accent(is_break: bool) -> Color32 {
    if is_break {
        TIMER_BREAK
    } else {
        TIMER_WORK
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

/// Visuals for the board. Widgets sit on the card colour, text inputs on the
/// field colour, and focus strokes take the colour of the running phase.
pub fn board_visuals(phase_accent: Color32) -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_CARD;
    visuals.faint_bg_color = BG_CARD;
    visuals.extreme_bg_color = BG_FIELD;
    visuals.code_bg_color = BG_FIELD;

    let rounding = Rounding::same(ROW_ROUNDING);
    let widgets = &mut visuals.widgets;
    widgets.noninteractive.bg_fill = BG_PANEL;
    widgets.noninteractive.weak_bg_fill = BG_PANEL;
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);

    widgets.inactive.bg_fill = BG_CARD;
    widgets.inactive.weak_bg_fill = BG_CARD;
    widgets.inactive.bg_stroke = Stroke::NONE;
    widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);

    widgets.hovered.bg_fill = BG_CARD.gamma_multiply(1.25);
    widgets.hovered.weak_bg_fill = BG_CARD.gamma_multiply(1.25);
    widgets.hovered.bg_stroke = Stroke::new(1.0, phase_accent.gamma_multiply(0.7));
    widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);

    widgets.active.bg_fill = phase_accent.gamma_multiply(0.35);
    widgets.active.weak_bg_fill = phase_accent.gamma_multiply(0.35);
    widgets.active.bg_stroke = Stroke::new(1.0, phase_accent);
    widgets.active.fg_stroke = Stroke::new(1.5, TEXT_PRIMARY);

    widgets.open = widgets.hovered;

    for state in [
        &mut widgets.noninteractive,
        &mut widgets.inactive,
        &mut widgets.hovered,
        &mut widgets.active,
        &mut widgets.open,
    ] {
        state.rounding = rounding;
    }

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    visuals.hyperlink_color = ACCENT;
    visuals.warn_fg_color = priority_color(Priority::UrgentNotImportant);
    visuals.error_fg_color = TIMER_WORK;

    visuals.window_rounding = Rounding::same(ROW_ROUNDING * 2.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    visuals
}

/// Install the board visuals, accented for the current timer phase.
pub fn apply_theme(ctx: &egui::Context, is_break: bool) {
    ctx.set_visuals(board_visuals(timer_accent(is_break)));

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.interact_size.y = 26.0;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_sit_on_field_colour_and_buttons_on_card_colour() {
        let visuals = board_visuals(TIMER_WORK);
        assert_eq!(visuals.extreme_bg_color, BG_FIELD);
        assert_eq!(visuals.widgets.inactive.bg_fill, BG_CARD);
        assert_eq!(visuals.window_fill, BG_CARD);
    }

    #[test]
    fn focus_stroke_follows_timer_phase() {
        let work = board_visuals(timer_accent(false));
        let rest = board_visuals(timer_accent(true));
        assert_eq!(work.widgets.active.bg_stroke.color, TIMER_WORK);
        assert_eq!(rest.widgets.active.bg_stroke.color, TIMER_BREAK);
    }
}
