use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub keyword: Color,
    pub number: Color,
    pub boolean: Color,
    pub identifier: Color,
    pub operator: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub guide: Color, // Indentation guides in the tree pane
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    keyword: Color::Rgb(137, 180, 250),        // Blue for reserved words
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    boolean: Color::Rgb(245, 194, 231),        // Pink for #t / #f
    identifier: Color::Rgb(249, 226, 175),     // Yellow for names
    operator: Color::Rgb(148, 226, 213),       // Cyan/teal for operators
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for selection
    guide: Color::Rgb(69, 71, 90),
};
