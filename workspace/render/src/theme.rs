//! Colors of the dark report theme.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub(crate) fn to_pdf(self) -> printpdf::Color {
        printpdf::Color::Rgb(printpdf::Rgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            None,
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
    pub positive: Color,
    pub negative: Color,
    /// Series colors, cycled.
    pub palette: Vec<Color>,
    /// Habit calendar colors for levels 0 to 4.
    pub levels: [Color; 5],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x0d, 0x11, 0x17),
            surface: Color::rgb(0x16, 0x1b, 0x22),
            border: Color::rgb(0x30, 0x36, 0x3d),
            text: Color::rgb(0xc9, 0xd1, 0xd9),
            muted: Color::rgb(0x8b, 0x94, 0x9e),
            positive: Color::rgb(0x39, 0xd3, 0x53),
            negative: Color::rgb(0xf8, 0x51, 0x49),
            palette: vec![
                Color::rgb(0x58, 0xa6, 0xff),
                Color::rgb(0xf0, 0x88, 0x3e),
                Color::rgb(0xbc, 0x8c, 0xff),
                Color::rgb(0x39, 0xd3, 0x53),
                Color::rgb(0xff, 0x7b, 0x72),
            ],
            levels: [
                Color::rgb(0x16, 0x1b, 0x22),
                Color::rgb(0x0e, 0x44, 0x29),
                Color::rgb(0x00, 0x6d, 0x32),
                Color::rgb(0x26, 0xa6, 0x41),
                Color::rgb(0x39, 0xd3, 0x53),
            ],
        }
    }
}

impl Theme {
    /// Calendar color of a habit level; levels above 4 use the brightest color.
    pub fn level(&self, level: u8) -> Color {
        self.levels[usize::from(level.min(4))]
    }

    pub fn series(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return self.text;
        }
        self.palette[index % self.palette.len()]
    }
}
