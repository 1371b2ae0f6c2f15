use leptos::prelude::*;
use leptos_use::{use_preferred_dark, use_window_scroll};

use crate::content::{Profile, Social};
use crate::sections::{active_section, Section, Theme};

use super::loading::MediaTracker;
use super::SectionRefs;

/// In-memory theme choice layered over the system preference.
#[derive(Clone, Copy)]
pub struct ThemeState {
    chosen: RwSignal<Option<Theme>>,
    preferred: Signal<bool>,
}

impl ThemeState {
    pub fn theme(&self) -> Theme {
        self.chosen
            .get()
            .unwrap_or_else(|| Theme::from_preference(self.preferred.get()))
    }

    pub fn toggle(&self) {
        let next = self.theme().toggled();
        self.chosen.set(Some(next));
    }
}

pub fn provide_theme() -> ThemeState {
    let state = ThemeState {
        chosen: RwSignal::new(None),
        preferred: use_preferred_dark(),
    };
    provide_context(state);
    state
}

/// Tracks which section the viewport is in.
pub fn provide_active_section(refs: SectionRefs) -> RwSignal<Section> {
    let active = RwSignal::new(Section::Home);
    let (_, scroll_y) = use_window_scroll();
    Effect::new(move |_| {
        let y = scroll_y.get();
        // keep the previous section while between sections
        if let Some(section) = active_section(y, &refs.bounds()) {
            active.set(section);
        }
    });
    provide_context(active);
    active
}

#[component]
pub fn ThemeToggle(#[prop(into)] class: String) -> impl IntoView {
    let theme = expect_context::<ThemeState>();
    view! {
        <button class=class aria-label="Toggle theme" on:click=move |_| theme.toggle()>
            {move || match theme.theme() {
                Theme::Dark => "☀",
                Theme::Light => "☾",
            }}
        </button>
    }
}

#[component]
fn Logo(initials: &'static str) -> impl IntoView {
    view! {
        <div class="text-xl font-bold">
            <span class="text-primary">"<"</span>
            {initials}
            <span class="text-primary">"/>"</span>
        </div>
    }
}

#[component]
pub fn NavBar(profile: &'static Profile, socials: &'static [Social]) -> impl IntoView {
    let refs = expect_context::<SectionRefs>();
    let tracker = expect_context::<MediaTracker>();
    let active = expect_context::<RwSignal<Section>>();
    let (menu_open, set_menu_open) = signal(false);

    let nav_class = move || {
        if tracker.overlay_visible() {
            "fixed top-0 left-0 right-0 z-40 bg-background/80 backdrop-blur-md border-b transition-all duration-300 opacity-0 -translate-y-5"
        } else {
            "fixed top-0 left-0 right-0 z-40 bg-background/80 backdrop-blur-md border-b transition-all duration-300 opacity-100 translate-y-0"
        }
    };

    view! {
        <nav class=nav_class>
            <div class="container mx-auto px-4 sm:px-6 py-3">
                <div class="flex justify-between items-center">
                    <Logo initials=profile.initials.as_str() />
                    <ul class="hidden md:flex space-x-8">
                        {Section::ALL
                            .into_iter()
                            .map(|section| {
                                view! {
                                    <li>
                                        <button
                                            class=move || {
                                                if active.get() == section {
                                                    "hover:text-primary transition-colors text-primary font-bold"
                                                } else {
                                                    "hover:text-primary transition-colors"
                                                }
                                            }
                                            on:click=move |_| refs.scroll_to(section)
                                        >
                                            {section.label()}
                                        </button>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                    <div class="flex items-center gap-4">
                        <ThemeToggle class="rounded-full w-10 h-10 hover:bg-muted transition-colors" />
                        <button
                            class="md:hidden w-10 h-10 rounded-md border"
                            aria-label="Toggle mobile menu"
                            on:click=move |_| set_menu_open.update(|open| *open = !*open)
                        >
                            {move || if menu_open.get() { "✕" } else { "☰" }}
                        </button>
                    </div>
                </div>
            </div>
        </nav>
        <Show when=move || menu_open.get()>
            <div
                class="fixed inset-0 bg-background/80 backdrop-blur-sm z-40 md:hidden"
                on:click=move |_| set_menu_open(false)
            />
            <div class="fixed inset-y-0 right-0 w-64 bg-background border-l z-50 md:hidden animate-slide-in">
                <div class="flex flex-col h-full">
                    <div class="p-4 border-b">
                        <Logo initials=profile.initials.as_str() />
                    </div>
                    <nav class="flex-1 p-4 overflow-y-auto">
                        <ul class="space-y-4">
                            {Section::ALL
                                .into_iter()
                                .map(|section| {
                                    view! {
                                        <li>
                                            <button
                                                class=move || {
                                                    if active.get() == section {
                                                        "w-full text-left px-4 py-2 rounded-md transition-colors bg-primary text-primary-foreground"
                                                    } else {
                                                        "w-full text-left px-4 py-2 rounded-md transition-colors hover:bg-muted"
                                                    }
                                                }
                                                on:click=move |_| {
                                                    refs.scroll_to(section);
                                                    set_menu_open(false);
                                                }
                                            >
                                                {section.label()}
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    </nav>
                    <div class="p-4 border-t">
                        <div class="flex justify-center gap-4">
                            {socials
                                .iter()
                                .map(|social| {
                                    view! {
                                        <a
                                            href=social.url.as_str()
                                            class="bg-muted p-2 rounded-full hover:bg-primary/10 transition-colors"
                                            aria-label=social.name.as_str()
                                        >
                                            <i class=social.icon.as_str() />
                                        </a>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                </div>
            </div>
        </Show>
        // fixed theme toggle for small screens
        <div class="fixed bottom-6 right-6 md:hidden z-50">
            <ThemeToggle class="rounded-full w-12 h-12 shadow-lg bg-primary text-primary-foreground" />
        </div>
    }
}
