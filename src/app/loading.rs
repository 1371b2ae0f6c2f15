use std::time::Duration;

use leptos::prelude::*;
use leptos_use::{use_interval_fn, utils::Pausable};

use crate::loading::{CancelHandle, LoadingScript, Sequencer};
use crate::readiness::{MediaOutcome, OverlayGate, ReadySignal};

const OVERLAY_TICK: Duration = Duration::from_millis(100);

/// Page-level overlay state: the media counter and the fallback timeout.
#[derive(Clone, Copy)]
pub struct MediaTracker {
    gate: RwSignal<OverlayGate>,
    clock: RwSignal<Duration>,
    ready: Memo<Option<ReadySignal>>,
}

impl MediaTracker {
    pub fn record(&self, outcome: MediaOutcome) {
        let now = self.clock.get_untracked();
        self.gate.update(|g| {
            g.media.record(outcome, now);
        });
    }

    pub fn percent(&self) -> u8 {
        self.gate.with(|g| g.media.percent())
    }

    pub fn overlay_visible(&self) -> bool {
        self.ready.get().is_none()
    }
}

/// Creates the tracker, starts its clock and provides it as context.
pub fn provide_media_tracker(expected_media: usize) -> MediaTracker {
    let gate = RwSignal::new(OverlayGate::new(expected_media));
    let clock = RwSignal::new(Duration::ZERO);
    let ready = Memo::new(move |_| gate.with(|g| g.ready(clock.get())));

    let Pausable { pause, .. } = use_interval_fn(
        move || clock.update(|c| *c += OVERLAY_TICK),
        OVERLAY_TICK.as_millis() as u64,
    );
    Effect::new(move |_| {
        if let Some(signal) = ready.get() {
            log::debug!("loading overlay lifted by {signal:?}");
            pause();
        }
    });

    let tracker = MediaTracker { gate, clock, ready };
    provide_context(tracker);
    tracker
}

#[component]
pub fn LoadingOverlay() -> impl IntoView {
    let tracker = expect_context::<MediaTracker>();
    view! {
        <Show when=move || tracker.overlay_visible()>
            <div class="fixed inset-0 z-50 flex flex-col items-center justify-center bg-background">
                <LoadingScreen />
                <p class="mt-4 text-muted-foreground">
                    "Loading... " {move || tracker.percent()} "%"
                </p>
            </div>
        </Show>
    }
}

#[component]
pub fn LoadingScreen() -> impl IntoView {
    let script = LoadingScript::default();
    let tick = script.scheduler_tick();
    let cancel = CancelHandle::new();
    let sequencer = RwSignal::new(Sequencer::new(script, cancel.clone()));
    let clock = StoredValue::new(Duration::ZERO);

    let Pausable { pause, .. } = use_interval_fn(
        move || {
            let now = clock.get_value() + tick;
            clock.set_value(now);
            sequencer.maybe_update(|s| s.advance_to(now));
        },
        tick.as_millis() as u64,
    );

    // effects only run in the browser
    Effect::new(move |_| {
        sequencer.update(|s| s.start(Duration::ZERO));
    });

    let visible = Memo::new(move |_| sequencer.with(Sequencer::is_visible));
    Effect::new(move |_| {
        if !visible.get() {
            pause();
        }
    });
    on_cleanup(move || cancel.cancel());

    let phase = move || sequencer.with(|s| s.phase_label().to_string());

    view! {
        <Show when=move || visible.get()>
            <div class="fixed inset-0 flex flex-col items-center justify-center bg-background p-1 sm:p-4 z-50 overflow-hidden animate-fade-in">
                <div class="relative w-[95%] sm:max-w-md md:max-w-lg lg:max-w-xl">
                    <div class="bg-muted/50 p-2 sm:p-4 md:p-6 rounded-lg border shadow-lg backdrop-blur-sm overflow-hidden">
                        <div class="flex items-center justify-between mb-2 md:mb-4">
                            <div class="flex gap-1 sm:gap-2">
                                <div class="w-2 h-2 md:w-3 md:h-3 rounded-full bg-red-500" />
                                <div class="w-2 h-2 md:w-3 md:h-3 rounded-full bg-yellow-500" />
                                <div class="w-2 h-2 md:w-3 md:h-3 rounded-full bg-green-500" />
                            </div>
                            <div class="flex items-center gap-1 sm:gap-2 text-[10px] sm:text-xs md:text-sm text-muted-foreground">
                                <span class="capitalize truncate max-w-[150px]">{phase}</span>
                                <span class="animate-pulse">"●"</span>
                            </div>
                        </div>
                        <div class="space-y-1 md:space-y-2 max-h-[50vh] md:max-h-[60vh] overflow-y-auto">
                            {move || {
                                sequencer
                                    .with(|s| {
                                        s.revealed_lines()
                                            .map(|line| {
                                                let typed = line.typed.to_string();
                                                let row_class = if line.is_current {
                                                    "flex items-center gap-1 sm:gap-2 bg-muted/30 animate-slide-in"
                                                } else {
                                                    "flex items-center gap-1 sm:gap-2 animate-slide-in"
                                                };
                                                view! {
                                                    <div class=row_class>
                                                        <span class="text-[10px] sm:text-xs md:text-sm text-muted-foreground w-3 md:w-4 lg:w-6">
                                                            {line.index + 1}
                                                        </span>
                                                        <div class="flex-1 min-w-0">
                                                            <span class=format!(
                                                                "text-[10px] sm:text-xs md:text-sm font-mono truncate {}",
                                                                line.style.class(),
                                                            )>
                                                                {typed}
                                                                {line
                                                                    .show_cursor
                                                                    .then(|| {
                                                                        view! { <span class="animate-pulse">"▋"</span> }
                                                                    })}
                                                            </span>
                                                        </div>
                                                    </div>
                                                }
                                            })
                                            .collect_view()
                                    })
                            }}
                        </div>
                    </div>
                    <div class="mt-2 md:mt-4 lg:mt-6 text-center">
                        <p class="text-[10px] sm:text-xs md:text-sm text-muted-foreground font-mono">
                            "Loading" <span class="animate-pulse">"..."</span>
                        </p>
                    </div>
                    <div
                        class="absolute bottom-0 left-0 h-0.5 bg-primary/20 rounded-full transition-all duration-500"
                        style=move || format!("width: {}%", sequencer.with(Sequencer::progress))
                    />
                </div>
                <div class="mt-2 md:mt-4 text-[10px] sm:text-xs text-muted-foreground font-mono">
                    <div class="flex items-center gap-1 sm:gap-2">
                        <span>"Phase:"</span>
                        <span class="capitalize truncate max-w-[120px]">{phase}</span>
                        <span class=move || {
                            if sequencer.with(Sequencer::is_completed) {
                                "text-green-500"
                            } else {
                                "text-primary"
                            }
                        }>"(" {move || sequencer.with(Sequencer::percent)} "%)"</span>
                        {move || {
                            sequencer
                                .with(Sequencer::is_completed)
                                .then(|| view! { <span class="text-green-500">"✓"</span> })
                        }}
                    </div>
                </div>
            </div>
        </Show>
    }
}
