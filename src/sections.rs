/// Offset added to the scroll position so a section counts as active a little
/// before its top reaches the viewport edge.
pub const SCROLL_OFFSET: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    About,
    Skills,
    Projects,
    Education,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Education,
        Section::Contact,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::About => "about",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Education => "education",
            Section::Contact => "contact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Education => "Education",
            Section::Contact => "Contact",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Vertical extent of a rendered section, in page pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub section: Section,
    pub top: f64,
    pub height: f64,
}

/// First section containing `scroll_y + SCROLL_OFFSET`, if any.
pub fn active_section(scroll_y: f64, bounds: &[SectionBounds]) -> Option<Section> {
    let position = scroll_y + SCROLL_OFFSET;
    bounds
        .iter()
        .find(|b| position >= b.top && position < b.top + b.height)
        .map(|b| b.section)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn from_preference(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Class applied to the page root; Tailwind's `dark:` variants key off it.
    pub fn class(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<SectionBounds> {
        Section::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| SectionBounds {
                section: *s,
                top: i as f64 * 800.0,
                height: 800.0,
            })
            .collect()
    }

    #[test]
    fn test_active_section_uses_offset() {
        let bounds = layout();
        assert_eq!(active_section(0.0, &bounds), Some(Section::Home));
        assert_eq!(active_section(699.0, &bounds), Some(Section::Home));
        assert_eq!(active_section(700.0, &bounds), Some(Section::About));
        assert_eq!(active_section(4_099.0, &bounds), Some(Section::Contact));
    }

    #[test]
    fn test_active_section_outside_layout() {
        let bounds = layout();
        assert_eq!(active_section(4_700.0, &bounds), None);
        assert_eq!(active_section(0.0, &[]), None);
    }

    #[test]
    fn test_section_order() {
        let ids = Section::ALL.iter().map(Section::id).collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec!["home", "about", "skills", "projects", "education", "contact"]
        );
        assert_eq!(Section::Projects.index(), 3);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::from_preference(true), Theme::Dark);
        assert_eq!(Theme::from_preference(false).toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().class(), "light");
    }
}
