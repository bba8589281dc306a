#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    /// no preference stored, follow `prefers-color-scheme`
    System,
}

impl Theme {
    /// `None` while the theme is not ready: a stored value we can't apply
    /// leaves the page body unrendered.
    pub fn resolve(theme: Option<&str>) -> Option<Theme> {
        match theme.map(str::trim) {
            None | Some("") => Some(Theme::System),
            Some("light") => Some(Theme::Light),
            Some("dark") => Some(Theme::Dark),
            Some(_) => None,
        }
    }

    /// Class for the root `<html>` element.
    pub fn root_class(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "",
        }
    }
}
