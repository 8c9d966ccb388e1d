//! Color constants for the TUI.

use ratatui::style::Color;

use crate::model::ProjectStatus;

/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// KPI card value color.
pub const KPI_VALUE: Color = Color::Cyan;
/// Validation error text color.
pub const ERROR_FG: Color = Color::Red;
/// Focused form field marker color.
pub const FOCUS_FG: Color = Color::Yellow;
/// Fallback notice color.
pub const NOTICE_FG: Color = Color::Yellow;

/// Returns the badge color for a project status.
pub fn status_color(status: ProjectStatus) -> Color {
    match status {
        ProjectStatus::Laufend => Color::Blue,
        ProjectStatus::Abgeschlossen => Color::Green,
        ProjectStatus::Entwurf => Color::Yellow,
    }
}
