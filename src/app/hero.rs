use std::time::Duration;

use leptos::prelude::*;
use leptos_use::use_interval_fn;

use crate::content::Profile;
use crate::sections::Section;
use crate::typing::{PhraseRotator, RotatorTiming};

use super::SectionRefs;

#[component]
pub fn Hero(profile: &'static Profile) -> impl IntoView {
    let refs = expect_context::<SectionRefs>();
    let timing = RotatorTiming::default();
    let tick = timing.tick();
    let rotator = RwSignal::new(PhraseRotator::new(profile.phrases.iter().cloned(), timing));
    let clock = StoredValue::new(Duration::ZERO);

    // the subtitle loops for the life of the page; the hook clears the
    // interval when the hero unmounts
    use_interval_fn(
        move || {
            let now = clock.get_value() + tick;
            clock.set_value(now);
            rotator.maybe_update(|r| r.advance_to(now));
        },
        tick.as_millis() as u64,
    );

    view! {
        <section
            id=Section::Home.id()
            node_ref=refs.get(Section::Home)
            class="min-h-screen flex items-center justify-center relative overflow-hidden pt-16"
        >
            <div class="absolute inset-0 -z-10 bg-grid-pattern opacity-[0.03]" />
            <div class="container mx-auto px-4 sm:px-6 py-20 text-center">
                <div class="max-w-3xl mx-auto">
                    <div class="mb-6 animate-fade-in">
                        <span class="inline-block mb-4 text-sm py-1 px-3 rounded-full border">
                            {profile.role.as_str()}
                        </span>
                        <h1 class="text-3xl md:text-5xl font-bold mb-4">
                            "Hi, I'm " <span class="text-primary">{profile.name.as_str()}</span>
                        </h1>
                        <div class="text-xl md:text-2xl text-muted-foreground h-12">
                            <span>{move || rotator.with(|r| r.text().to_string())}</span>
                            <span class="animate-pulse">"|"</span>
                        </div>
                    </div>
                    <div class="flex flex-col sm:flex-row gap-4 justify-center mt-8 animate-fade-in">
                        <button
                            class="bg-primary hover:bg-primary/90 text-primary-foreground px-6 py-2 rounded-md"
                            on:click=move |_| refs.scroll_to(Section::Contact)
                        >
                            "Contact Me"
                        </button>
                        <a
                            href=profile.resume.as_str()
                            download="resume.pdf"
                            class="flex items-center justify-center gap-2 px-6 py-2 rounded-md border hover:bg-muted"
                        >
                            <i class="extra-download" />
                            "Download Resume"
                        </a>
                    </div>
                </div>
            </div>
            <button
                class="absolute bottom-8 left-1/2 -translate-x-1/2 text-primary text-3xl animate-bounce"
                aria-label="Scroll to about"
                on:click=move |_| refs.scroll_to(Section::About)
            >
                "⌄"
            </button>
        </section>
    }
}
