use leptos::either::Either;
use leptos::html;
use leptos::prelude::*;

use crate::content::{MediaKind, Project};
use crate::readiness::MediaOutcome;
use crate::sections::Section;

use super::loading::MediaTracker;
use super::SectionRefs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaState {
    Loading,
    Ready,
    Failed,
}

#[component]
pub fn Projects(projects: &'static [Project]) -> impl IntoView {
    let refs = expect_context::<SectionRefs>();
    view! {
        <section
            id=Section::Projects.id()
            node_ref=refs.get(Section::Projects)
            class="py-20 bg-muted/30"
        >
            <div class="container mx-auto px-4 sm:px-6">
                <div class="text-center mb-12">
                    <h2 class="text-3xl font-bold mb-4">"My Projects"</h2>
                    <div class="w-20 h-1 bg-primary mx-auto" />
                    <p class="text-muted-foreground mt-4">"Click a card to see more."</p>
                </div>
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8">
                    {projects
                        .iter()
                        .map(|project| view! { <ProjectCard project=project /> })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn ProjectCard(project: &'static Project) -> impl IntoView {
    let tracker = expect_context::<MediaTracker>();
    let (flipped, set_flipped) = signal(false);
    let state = RwSignal::new(MediaState::Loading);

    // each card reports to the readiness counter at most once
    let report = move |outcome: MediaOutcome| {
        if state.get_untracked() != MediaState::Loading {
            return;
        }
        state.set(match outcome {
            MediaOutcome::Loaded => MediaState::Ready,
            MediaOutcome::Failed => MediaState::Failed,
        });
        if outcome == MediaOutcome::Failed {
            log::warn!("media for {} failed to load: {}", project.title, project.media);
        }
        tracker.record(outcome);
    };

    // media may settle from the server-rendered markup before hydration
    // attaches the listeners, so look at the elements once they are mounted
    let img_ref = NodeRef::<html::Img>::new();
    let video_ref = NodeRef::<html::Video>::new();
    Effect::new(move |_| {
        let settled = if let Some(img) = img_ref.get() {
            MediaOutcome::of_image(img.complete(), img.natural_width())
        } else if let Some(video) = video_ref.get() {
            MediaOutcome::of_video(video.ready_state(), video.network_state())
        } else {
            None
        };
        if let Some(outcome) = settled {
            report(outcome);
        }
    });

    let failed = Memo::new(move |_| state.get() == MediaState::Failed);
    let media_class = move || {
        if state.get() == MediaState::Ready {
            "w-full h-full object-cover transition-opacity duration-300 opacity-100"
        } else {
            "w-full h-full object-cover transition-opacity duration-300 opacity-0"
        }
    };

    let media = move || {
        if failed.get() {
            Either::Left(view! {
                <div class="w-full h-full flex items-center justify-center bg-muted text-muted-foreground text-sm">
                    "Failed to load media"
                </div>
            })
        } else {
            Either::Right(match project.media_kind {
                MediaKind::Video => Either::Left(view! {
                    <video
                        node_ref=video_ref
                        src=project.media.as_str()
                        class=media_class
                        autoplay=true
                        loop=true
                        muted=true
                        playsinline=true
                        on:loadeddata=move |_| report(MediaOutcome::Loaded)
                        on:error=move |_| report(MediaOutcome::Failed)
                    />
                }),
                MediaKind::Image => Either::Right(view! {
                    <img
                        node_ref=img_ref
                        src=project.media.as_str()
                        alt=project.title.as_str()
                        class=media_class
                        on:load=move |_| report(MediaOutcome::Loaded)
                        on:error=move |_| report(MediaOutcome::Failed)
                    />
                }),
            })
        }
    };

    let inner_class = move || {
        if flipped.get() {
            "relative w-full h-full transition-transform duration-700 [transform-style:preserve-3d] [transform:rotateY(180deg)]"
        } else {
            "relative w-full h-full transition-transform duration-700 [transform-style:preserve-3d]"
        }
    };

    view! {
        <div
            class="h-[400px] [perspective:1000px] cursor-pointer"
            on:click=move |_| set_flipped.update(|f| *f = !*f)
        >
            <div class=inner_class>
                <div class="absolute inset-0 [backface-visibility:hidden] rounded-lg border bg-background overflow-hidden">
                    <div class="relative h-3/4 overflow-hidden">
                        <Show when=move || state.get() == MediaState::Loading>
                            <div class="absolute inset-0 loading-skeleton" />
                        </Show>
                        {media}
                        {project
                            .badge
                            .as_deref()
                            .map(|badge| {
                                view! {
                                    <span class="absolute top-2 right-2 bg-primary text-primary-foreground text-xs px-2 py-1 rounded-full">
                                        {badge}
                                    </span>
                                }
                            })}
                    </div>
                    <div class="p-4">
                        <h3 class="text-xl font-bold">{project.title.as_str()}</h3>
                        <p class="text-sm text-muted-foreground">{project.category.as_str()}</p>
                    </div>
                </div>
                <div class="absolute inset-0 [backface-visibility:hidden] [transform:rotateY(180deg)] rounded-lg border bg-background p-6 flex flex-col">
                    <h3 class="text-xl font-bold mb-2">{project.title.as_str()}</h3>
                    <p class="text-muted-foreground flex-1">{project.description.as_str()}</p>
                    <div class="flex gap-4">
                        <a
                            href=project.link.as_str()
                            target="_blank"
                            rel="noopener noreferrer"
                            class="bg-primary text-primary-foreground px-4 py-2 rounded-md text-sm"
                            on:click=|ev| ev.stop_propagation()
                        >
                            "Live Demo"
                        </a>
                        {project
                            .source
                            .as_deref()
                            .map(|source| {
                                view! {
                                    <a
                                        href=source
                                        target="_blank"
                                        rel="noopener noreferrer"
                                        class="border px-4 py-2 rounded-md text-sm hover:bg-muted"
                                        on:click=|ev| ev.stop_propagation()
                                    >
                                        "Source Code"
                                    </a>
                                }
                            })}
                    </div>
                </div>
            </div>
        </div>
    }
}
