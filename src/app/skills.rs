use leptos::prelude::*;
use leptos_use::{use_timeout_fn, UseTimeoutFnReturn};

use crate::content::{SkillCard, TechnicalSkill};
use crate::sections::Section;

use super::SectionRefs;

const SKELETON_MS: f64 = 500.0;

#[component]
pub fn Skills(skills: &'static [SkillCard], technical: &'static [TechnicalSkill]) -> impl IntoView {
    let refs = expect_context::<SectionRefs>();
    view! {
        <section id=Section::Skills.id() node_ref=refs.get(Section::Skills) class="py-20">
            <div class="container mx-auto px-4 sm:px-6">
                <div class="text-center mb-12">
                    <h2 class="text-3xl font-bold mb-4">"My Skills"</h2>
                    <div class="w-20 h-1 bg-primary mx-auto" />
                </div>
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6 mb-16">
                    {skills.iter().map(|skill| view! { <SkillCardView skill=skill /> }).collect_view()}
                </div>
                <TechnicalSkills skills=technical />
            </div>
        </section>
    }
}

#[component]
fn SkillCardView(skill: &'static SkillCard) -> impl IntoView {
    let (loaded, set_loaded) = signal(false);
    let UseTimeoutFnReturn { start, .. } =
        use_timeout_fn(move |_: ()| set_loaded(true), SKELETON_MS);
    Effect::new(move |_| start(()));

    view! {
        <div class="bg-background border rounded-lg p-6 hover:shadow-lg transition-shadow">
            <Show
                when=move || loaded.get()
                fallback=|| {
                    view! {
                        <div class="loading-skeleton w-12 h-12 rounded-full mb-4" />
                        <div class="loading-skeleton h-6 w-2/3 rounded mb-2" />
                        <div class="loading-skeleton h-4 w-full rounded" />
                    }
                }
            >
                <div class="w-12 h-12 rounded-full bg-primary/10 flex items-center justify-center mb-4 text-primary">
                    <i class=skill.icon.class() />
                </div>
                <h3 class="text-xl font-bold mb-2">{skill.title.as_str()}</h3>
                <p class="text-muted-foreground">{skill.description.as_str()}</p>
            </Show>
        </div>
    }
}

#[component]
fn TechnicalSkills(skills: &'static [TechnicalSkill]) -> impl IntoView {
    view! {
        <div class="max-w-3xl mx-auto">
            <h3 class="text-2xl font-bold mb-6 text-center">"Technical Skills"</h3>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-x-12 gap-y-6">
                {skills
                    .iter()
                    .map(|skill| {
                        view! {
                            <div>
                                <div class="flex justify-between mb-1">
                                    <span class="font-medium">{skill.name.as_str()}</span>
                                    <span class="text-muted-foreground">{skill.level} "%"</span>
                                </div>
                                <div class="w-full bg-muted rounded-full h-2.5">
                                    <div
                                        class="bg-primary h-2.5 rounded-full"
                                        style=format!("width: {}%", skill.level)
                                    />
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
