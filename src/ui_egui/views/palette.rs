use egui::Color32;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Colors for the time grid. Visual theme is a parameter of the renderer;
/// the grid logic never forks on it.
#[derive(Clone, Copy)]
pub struct GridPalette {
    pub regular_bg: Color32,
    pub today_bg: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub divider: Color32,
    pub time_label: Color32,
    pub header_text: Color32,
    pub city_text: Color32,
    pub block_text: Color32,
    pub drop_highlight: Color32,
    pub preview_ok: Color32,
    pub preview_invalid: Color32,
}

impl GridPalette {
    pub fn light() -> Self {
        Self {
            regular_bg: Color32::from_rgb(252, 252, 252),
            today_bg: Color32::from_rgb(240, 246, 255),
            hour_line: Color32::from_rgb(200, 200, 200),
            slot_line: Color32::from_rgb(230, 230, 230),
            divider: Color32::from_rgb(215, 215, 215),
            time_label: Color32::GRAY,
            header_text: Color32::from_rgb(40, 40, 40),
            city_text: Color32::from_rgb(120, 120, 120),
            block_text: Color32::WHITE,
            drop_highlight: with_alpha(Color32::from_rgb(120, 200, 120), 45),
            preview_ok: Color32::from_rgb(120, 200, 120),
            preview_invalid: Color32::from_rgb(220, 100, 100),
        }
    }

    pub fn dark() -> Self {
        Self {
            regular_bg: Color32::from_rgb(32, 33, 36),
            today_bg: Color32::from_rgb(38, 44, 58),
            hour_line: Color32::from_rgb(80, 80, 84),
            slot_line: Color32::from_rgb(52, 53, 56),
            divider: Color32::from_rgb(64, 65, 68),
            time_label: Color32::from_rgb(150, 150, 150),
            header_text: Color32::from_rgb(220, 220, 220),
            city_text: Color32::from_rgb(150, 150, 150),
            block_text: Color32::WHITE,
            drop_highlight: with_alpha(Color32::from_rgb(120, 200, 120), 45),
            preview_ok: Color32::from_rgb(120, 200, 120),
            preview_invalid: Color32::from_rgb(220, 100, 100),
        }
    }
}
