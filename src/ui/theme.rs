use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub title_fg: Color,
    pub stats_fg: Color,
    pub header_fg: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub selection_bg: Color,
    pub error_fg: Color,
    pub statusbar_bg: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub gauge_unfilled: Color,
    /// Idle, busy and saturated usage, in that order.
    pub heat_colors: [Color; 3],
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            title_fg: Color::Indexed(205),
            stats_fg: Color::Indexed(86),
            header_fg: Color::Indexed(205),
            border: Color::Indexed(240),
            text_primary: Color::White,
            text_secondary: Color::Gray,
            selection_bg: Color::Rgb(49, 50, 68),
            error_fg: Color::Red,
            statusbar_bg: Color::DarkGray,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            gauge_unfilled: Color::DarkGray,
            heat_colors: [
                Color::Rgb(16, 185, 129),
                Color::Rgb(249, 115, 22),
                Color::Rgb(239, 68, 68),
            ],
        }
    }

    /// Colour for a 0-100 utilisation value.
    pub fn heat(&self, percent: f64) -> Color {
        if percent >= 90.0 {
            self.heat_colors[2]
        } else if percent >= 60.0 {
            self.heat_colors[1]
        } else {
            self.heat_colors[0]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_thresholds() {
        let theme = Theme::dark();
        assert_eq!(theme.heat(10.0), theme.heat_colors[0]);
        assert_eq!(theme.heat(60.0), theme.heat_colors[1]);
        assert_eq!(theme.heat(95.0), theme.heat_colors[2]);
    }
}
