//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Category;

/// Age-band header row.
pub const HEADER_PURPLE: Color = Color::Rgb(81, 70, 127);
/// Timeline background behind the bars.
pub const BACKGROUND_GRAY: Color = Color::Rgb(44, 44, 46);
/// Confirm dialog.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);

pub const GREEN: Color = Color::Rgb(52, 199, 89);
pub const BLUE: Color = Color::Rgb(0, 122, 255);
pub const PINK: Color = Color::Rgb(255, 45, 85);
pub const ORANGE: Color = Color::Rgb(255, 149, 0);
pub const INDIGO: Color = Color::Rgb(88, 86, 214);

/// Bar color for a category.
pub fn category_color(category: Category) -> Color {
    match category {
        Category::TransitionPlanning => GREEN,
        Category::EducationTraining => BLUE,
        Category::AdultLife => PINK,
        Category::SelfAdvocacy => ORANGE,
        Category::WorkPreparation => INDIGO,
    }
}
