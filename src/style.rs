use std::ffi::OsStr;

use console::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tint {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Gray,
}

impl Tint {
    /// Foreground style. Orange has no basic ANSI slot, so it comes from
    /// the 256-color palette.
    fn style(&self) -> Style {
        match self {
            Tint::Red => Style::new().red(),
            Tint::Orange => Style::new().color256(208),
            Tint::Yellow => Style::new().yellow(),
            Tint::Green => Style::new().green(),
            Tint::Blue => Style::new().blue(),
            Tint::Gray => Style::new().black().bright(),
        }
    }
}

/// Background, text and border tint of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleDescriptor {
    // Not painted: terminals keep their own background.
    #[allow(dead_code)]
    pub background: Tint,
    pub text: Tint,
    pub border: Tint,
}

impl StyleDescriptor {
    pub const fn uniform(tint: Tint) -> Self {
        Self {
            background: tint,
            text: tint,
            border: tint,
        }
    }
}

/// Color is off when `--no-color` is given, when `NO_COLOR` is set to a
/// non-empty value, or when the terminal does not support it.
pub fn color_enabled(no_color_flag: bool, no_color_env: Option<&OsStr>, terminal_colors: bool) -> bool {
    let env_disabled = no_color_env.is_some_and(|value| !value.is_empty());
    !no_color_flag && !env_disabled && terminal_colors
}

#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Decides color from the flag, `NO_COLOR` and stdout's capabilities.
    pub fn detect(no_color_flag: bool) -> Self {
        let env = std::env::var_os("NO_COLOR");
        Self::new(color_enabled(
            no_color_flag,
            env.as_deref(),
            console::colors_enabled(),
        ))
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn apply(&self, style: Style, text: &str) -> String {
        style.force_styling(self.color).apply_to(text).to_string()
    }

    pub fn paint(&self, tint: Tint, text: &str) -> String {
        self.apply(tint.style(), text)
    }

    pub fn badge(&self, style: StyleDescriptor, text: &str) -> String {
        format!(
            "{} {} {}",
            self.paint(style.border, "["),
            self.paint(style.text, text),
            self.paint(style.border, "]")
        )
    }

    pub fn bold(&self, text: &str) -> String {
        self.apply(Style::new().bold(), text)
    }
}
