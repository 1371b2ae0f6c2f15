mod hero;
mod homepage;
mod loading;
mod nav;
mod projects;
mod skills;

use leptos::{html, prelude::*};
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::content::PORTFOLIO;
use crate::sections::{Section, SectionBounds};
use homepage::HomePage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en" class="scroll-smooth">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark light" />
                <link rel="icon" href="/placeholder-logo.png" />
                <link rel="apple-touch-icon" href="/placeholder-logo.png" />
                <link
                    rel="stylesheet"
                    href="https://fonts.googleapis.com/css2?family=JetBrains+Mono:wght@400;500;600;700&display=swap"
                />
                <link
                    rel="stylesheet"
                    href="https://cdn.jsdelivr.net/gh/devicons/devicon@latest/devicon.min.css"
                />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let name = PORTFOLIO
        .as_ref()
        .map(|p| p.profile.name.clone())
        .unwrap_or_else(|_| "Portfolio".to_string());

    view! {
        <Title formatter=move |title| format!("{name} - {title}") />
        <Meta
            name="description"
            content="A modern portfolio website showcasing my work, skills, and experience in web development."
        />

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=path!("/") view=HomePage />
            </Routes>
        </Router>
    }
}

/// Node refs of the page sections, shared by the navigation and the section views.
#[derive(Clone, Copy)]
pub struct SectionRefs([NodeRef<html::Section>; 6]);

impl SectionRefs {
    fn new() -> Self {
        Self(std::array::from_fn(|_| NodeRef::new()))
    }

    pub fn get(&self, section: Section) -> NodeRef<html::Section> {
        self.0[section.index()]
    }

    pub fn scroll_to(&self, section: Section) {
        if let Some(el) = self.get(section).get_untracked() {
            el.scroll_into_view();
        }
    }

    /// Bounds of every section currently mounted, in page order.
    pub fn bounds(&self) -> Vec<SectionBounds> {
        Section::ALL
            .iter()
            .filter_map(|section| {
                self.get(*section).get_untracked().map(|el| SectionBounds {
                    section: *section,
                    top: el.offset_top() as f64,
                    height: el.offset_height() as f64,
                })
            })
            .collect()
    }
}
