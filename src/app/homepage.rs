use leptos::either::Either;
use leptos::prelude::*;
use leptos_meta::Title;

use crate::content::{build_year, EducationItem, Portfolio, Profile, Social, PORTFOLIO};
use crate::sections::Section;

use super::hero::Hero;
use super::loading::{provide_media_tracker, LoadingOverlay};
use super::nav::{provide_active_section, provide_theme, NavBar};
use super::projects::Projects;
use super::skills::Skills;
use super::SectionRefs;

#[component]
pub fn HomePage() -> impl IntoView {
    match &*PORTFOLIO {
        Ok(portfolio) => Either::Left(view! { <PortfolioPage portfolio=portfolio /> }),
        Err(e) => Either::Right(view! {
            <Title text="Error" />
            <div class="min-h-screen flex items-center justify-center font-mono">
                <p class="text-red-500">{format!("Couldn't load this page: {e}")}</p>
            </div>
        }),
    }
}

#[component]
fn PortfolioPage(portfolio: &'static Portfolio) -> impl IntoView {
    let refs = SectionRefs::new();
    provide_context(refs);
    let theme = provide_theme();
    provide_active_section(refs);
    provide_media_tracker(portfolio.projects.len());

    view! {
        <Title text="Home" />
        <div class=move || {
            format!(
                "{} font-mono overflow-x-hidden bg-background text-foreground min-h-screen",
                theme.theme().class(),
            )
        }>
            <LoadingOverlay />
            <NavBar profile=&portfolio.profile socials=&portfolio.socials />
            <main>
                <Hero profile=&portfolio.profile />
                <About profile=&portfolio.profile />
                <Skills skills=&portfolio.skills technical=&portfolio.technical_skills />
                <Projects projects=&portfolio.projects />
                <Education items=&portfolio.education />
                <Contact profile=&portfolio.profile socials=&portfolio.socials />
            </main>
            <Footer profile=&portfolio.profile socials=&portfolio.socials />
        </div>
    }
}

#[component]
fn SectionHeading(title: &'static str) -> impl IntoView {
    view! {
        <div class="text-center mb-12">
            <h2 class="text-3xl font-bold mb-4">{title}</h2>
            <div class="w-20 h-1 bg-primary mx-auto" />
        </div>
    }
}

#[component]
fn About(profile: &'static Profile) -> impl IntoView {
    let refs = expect_context::<SectionRefs>();
    let facts = [
        ("Name", profile.name.as_str()),
        ("Email", profile.email.as_str()),
        ("Location", profile.location.as_str()),
        ("Availability", profile.availability.as_str()),
    ];
    view! {
        <section id=Section::About.id() node_ref=refs.get(Section::About) class="py-20 bg-muted/30">
            <div class="container mx-auto px-4 sm:px-6">
                <SectionHeading title="About Me" />
                <div class="grid grid-cols-1 md:grid-cols-2 gap-12 items-center">
                    <div class="relative mx-auto">
                        <div class="w-64 h-64 md:w-80 md:h-80 rounded-full border-4 border-primary flex items-center justify-center text-6xl font-bold text-primary">
                            {profile.initials.as_str()}
                        </div>
                    </div>
                    <div>
                        <h3 class="text-2xl font-bold mb-4">{profile.headline.as_str()}</h3>
                        {profile
                            .about
                            .iter()
                            .map(|p| view! { <p class="text-muted-foreground mb-6">{p.as_str()}</p> })
                            .collect_view()}
                        <div class="grid grid-cols-1 sm:grid-cols-2 gap-4 mb-6">
                            {facts
                                .into_iter()
                                .map(|(label, value)| {
                                    view! {
                                        <div>
                                            <p class="font-semibold">{label} ":"</p>
                                            <p class="text-muted-foreground break-all">{value}</p>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                </div>
            </div>
        </section>
    }
}

#[component]
fn Education(items: &'static [EducationItem]) -> impl IntoView {
    let refs = expect_context::<SectionRefs>();
    view! {
        <section
            id=Section::Education.id()
            node_ref=refs.get(Section::Education)
            class="py-20 bg-muted/30"
        >
            <div class="container mx-auto px-4 sm:px-6">
                <SectionHeading title="Education" />
                <div class="relative max-w-3xl mx-auto">
                    <div class="absolute left-4 md:left-1/2 top-0 bottom-0 w-0.5 bg-primary/30 md:-translate-x-1/2" />
                    {items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| {
                            // entries alternate sides on wide screens
                            let side = if i % 2 == 0 {
                                "relative mb-12 pl-12 md:pl-0 md:w-1/2 md:pr-12 md:text-right"
                            } else {
                                "relative mb-12 pl-12 md:w-1/2 md:ml-auto md:pl-12"
                            };
                            view! {
                                <div class=side>
                                    <div class="absolute left-2.5 md:left-auto top-1 w-3 h-3 rounded-full bg-primary" />
                                    <span class="text-sm text-primary font-semibold">
                                        {item.years.as_str()}
                                    </span>
                                    <h3 class="text-xl font-bold mt-1">{item.title.as_str()}</h3>
                                    <p class="text-muted-foreground">{item.organization.as_str()}</p>
                                    <p class="mt-2 text-sm">{item.description.as_str()}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn SocialLinks(socials: &'static [Social]) -> impl IntoView {
    socials
        .iter()
        .map(|social| {
            view! {
                <a
                    href=social.url.as_str()
                    target="_blank"
                    rel="noopener noreferrer"
                    class="bg-muted p-3 rounded-full hover:bg-primary/10 transition-colors"
                    aria-label=social.name.as_str()
                >
                    <i class=social.icon.as_str() />
                </a>
            }
        })
        .collect_view()
}

#[component]
fn Contact(profile: &'static Profile, socials: &'static [Social]) -> impl IntoView {
    let refs = expect_context::<SectionRefs>();
    view! {
        <section id=Section::Contact.id() node_ref=refs.get(Section::Contact) class="py-20">
            <div class="container mx-auto px-4 sm:px-6">
                <SectionHeading title="Get In Touch" />
                <div class="grid grid-cols-1 md:grid-cols-2 gap-12">
                    <div>
                        <h3 class="text-2xl font-bold mb-6">"Contact Information"</h3>
                        <p class="text-muted-foreground mb-8">
                            "Feel free to reach out. I'm always open to discussing new projects or opportunities."
                        </p>
                        <div class="space-y-4 mb-8">
                            <p>
                                <span class="font-semibold">"Email: "</span>
                                <a href=format!("mailto:{}", profile.email) class="hover:text-primary">
                                    {profile.email.as_str()}
                                </a>
                            </p>
                            <p>
                                <span class="font-semibold">"Location: "</span>
                                {profile.location.as_str()}
                            </p>
                        </div>
                        <div class="flex gap-4">
                            <SocialLinks socials=socials />
                        </div>
                    </div>
                    // the form is presentational; nothing is sent
                    <form class="space-y-4" on:submit=|ev| ev.prevent_default()>
                        <input
                            type="text"
                            placeholder="Your Name"
                            class="w-full px-4 py-2 rounded-md border bg-background"
                        />
                        <input
                            type="email"
                            placeholder="Your Email"
                            class="w-full px-4 py-2 rounded-md border bg-background"
                        />
                        <input
                            type="text"
                            placeholder="Subject"
                            class="w-full px-4 py-2 rounded-md border bg-background"
                        />
                        <textarea
                            placeholder="Your Message"
                            rows="5"
                            class="w-full px-4 py-2 rounded-md border bg-background"
                        />
                        <button
                            type="submit"
                            class="w-full bg-primary hover:bg-primary/90 text-primary-foreground px-6 py-2 rounded-md"
                        >
                            "Send Message"
                        </button>
                    </form>
                </div>
            </div>
        </section>
    }
}

#[component]
fn Footer(profile: &'static Profile, socials: &'static [Social]) -> impl IntoView {
    let year = build_year().map(|y| y.to_string()).unwrap_or_default();
    view! {
        <footer class="py-8 border-t">
            <div class="container mx-auto px-4 sm:px-6 flex flex-col md:flex-row justify-between items-center gap-4">
                <p class="text-sm text-muted-foreground">
                    "© " {year} " " {profile.name.as_str()} ". All rights reserved."
                </p>
                <div class="flex gap-4">
                    <SocialLinks socials=socials />
                </div>
            </div>
        </footer>
    }
}
