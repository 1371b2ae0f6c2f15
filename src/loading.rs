//! Staged loading-screen sequencer.
//!
//! The sequencer is a pure state machine over a virtual clock. Two timers live
//! inside it: the progress/phase ticker and the line typewriter (with its
//! inter-line pause). A driver calls [`Sequencer::start`] once and then
//! [`Sequencer::advance_to`] with the elapsed time on every scheduler tick;
//! every deadline due by then fires in order.
//!
//! Teardown goes through a [`CancelHandle`]. Once cancelled, or once the
//! screen has hidden itself, no call mutates the sequencer again.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use crate::typing::{common_tick, CharDelays, LineTyper};

pub const INITIAL_PHASE: &str = "initializing";
pub const COMPLETE_PHASE: &str = "complete";

const PHASES: [(&str, u64); 6] = [
    ("installing dependencies", 1500),
    ("starting development server", 1200),
    ("building portfolio", 1500),
    ("optimizing assets", 1200),
    ("initializing animations", 1000),
    ("finalizing", 1000),
];

const LINES: [&str; 12] = [
    "> npm install",
    "added 156 packages, and audited 234 packages in 3s",
    "> npm run dev",
    "ready - started server on 0.0.0.0:3000",
    "event - compiled client and server successfully",
    "wait compiling...",
    "> Building portfolio...",
    "> Optimizing images...",
    "> Generating static pages...",
    "> Loading assets...",
    "> Initializing animations...",
    "// Loading complete",
];

/// A named stage with a fixed display duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub name: String,
    pub duration: Duration,
}

impl Phase {
    pub fn new(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Everything the sequencer runs: phases, lines and timing.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingScript {
    pub phases: Vec<Phase>,
    pub lines: Vec<String>,
    pub progress_tick: Duration,
    /// Percentage points added on every progress tick.
    pub progress_step: f64,
    pub char_delays: CharDelays,
    pub line_pause: Duration,
    pub hide_delay: Duration,
}

impl Default for LoadingScript {
    fn default() -> Self {
        Self {
            phases: PHASES
                .iter()
                .map(|(name, ms)| Phase::new(*name, Duration::from_millis(*ms)))
                .collect(),
            lines: LINES.iter().map(|s| s.to_string()).collect(),
            progress_tick: Duration::from_millis(50),
            progress_step: 0.5,
            char_delays: CharDelays::default(),
            line_pause: Duration::from_millis(200),
            hide_delay: Duration::from_millis(1500),
        }
    }
}

impl LoadingScript {
    /// Coarsest interval that lands on every deadline the script can produce.
    pub fn scheduler_tick(&self) -> Duration {
        common_tick(
            [
                self.progress_tick,
                self.char_delays.base,
                self.char_delays.special,
                self.line_pause,
                self.hide_delay,
            ]
            .into_iter()
            .chain(self.phases.iter().map(|p| p.duration)),
        )
    }

    fn progress_tick(&self) -> Duration {
        self.progress_tick.max(Duration::from_millis(1))
    }
}

/// Shared teardown flag. Clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Where the sequencer is in the phase table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    Initializing,
    Running(usize),
    Complete,
}

/// Coloring class of a line, picked from its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Command,
    Success,
    Info,
    Event,
    Warning,
    Plain,
}

impl LineStyle {
    pub fn of(line: &str) -> Self {
        if line.starts_with('>') {
            Self::Command
        } else if line.starts_with("added") {
            Self::Success
        } else if line.starts_with("ready") {
            Self::Info
        } else if line.starts_with("event") {
            Self::Event
        } else if line.starts_with("wait") {
            Self::Warning
        } else {
            Self::Plain
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Self::Command => "text-primary",
            Self::Success => "text-green-500",
            Self::Info => "text-blue-500",
            Self::Event => "text-purple-500",
            Self::Warning => "text-yellow-500",
            Self::Plain => "text-foreground",
        }
    }
}

/// A revealed line as seen from outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedLine<'a> {
    pub index: usize,
    pub typed: &'a str,
    pub full: &'a str,
    pub style: LineStyle,
    pub is_current: bool,
    pub show_cursor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Timer {
    Progress,
    Hide,
    Type,
    Reveal,
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    script: Arc<LoadingScript>,
    cancel: CancelHandle,
    started: bool,
    progress: f64,
    phase: PhaseStatus,
    phase_started_at: Duration,
    lines: Vec<LineTyper>,
    current_line: usize,
    completed: bool,
    visible: bool,
    next_progress_at: Option<Duration>,
    next_type_at: Option<Duration>,
    next_reveal_at: Option<Duration>,
    hide_at: Option<Duration>,
}

impl Sequencer {
    pub fn new(script: impl Into<Arc<LoadingScript>>, cancel: CancelHandle) -> Self {
        Self {
            script: script.into(),
            cancel,
            started: false,
            progress: 0.0,
            phase: PhaseStatus::Initializing,
            phase_started_at: Duration::ZERO,
            lines: Vec::new(),
            current_line: 0,
            completed: false,
            visible: true,
            next_progress_at: None,
            next_type_at: None,
            next_reveal_at: None,
            hide_at: None,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Starts both timers at `now`. Later calls do nothing.
    pub fn start(&mut self, now: Duration) {
        if self.started || self.is_torn_down() {
            return;
        }
        self.started = true;
        if !self.script.phases.is_empty() {
            self.enter_phase(PhaseStatus::Running(0), now);
        }
        self.next_progress_at = Some(now + self.script.progress_tick());
        if !self.script.lines.is_empty() {
            self.reveal_line(0, now);
        }
    }

    /// Torn down either by cancellation or by hiding itself.
    pub fn is_torn_down(&self) -> bool {
        !self.visible || self.cancel.is_cancelled()
    }

    /// Fires every deadline due at or before `now`, earliest first.
    /// Returns whether any state changed.
    pub fn advance_to(&mut self, now: Duration) -> bool {
        let mut changed = false;
        while !self.is_torn_down() {
            let (at, timer) = match self.next_due() {
                Some(due) if due.0 <= now => due,
                _ => break,
            };
            match timer {
                Timer::Progress => self.on_progress_tick(at),
                Timer::Hide => self.on_hide(),
                Timer::Type => self.on_type(at),
                Timer::Reveal => self.on_reveal(at),
            }
            changed = true;
        }
        changed
    }

    /// Earliest pending deadline, `None` once torn down or idle.
    pub fn next_deadline(&self) -> Option<Duration> {
        if self.is_torn_down() {
            return None;
        }
        self.next_due().map(|(at, _)| at)
    }

    fn next_due(&self) -> Option<(Duration, Timer)> {
        [
            (self.next_progress_at, Timer::Progress),
            (self.hide_at, Timer::Hide),
            (self.next_type_at, Timer::Type),
            (self.next_reveal_at, Timer::Reveal),
        ]
        .into_iter()
        .filter_map(|(at, timer)| at.map(|at| (at, timer)))
        .min()
    }

    fn on_progress_tick(&mut self, at: Duration) {
        self.progress = (self.progress + self.script.progress_step).min(100.0);

        if let PhaseStatus::Running(i) = self.phase {
            if at.saturating_sub(self.phase_started_at) >= self.script.phases[i].duration {
                let next = if i + 1 < self.script.phases.len() {
                    PhaseStatus::Running(i + 1)
                } else {
                    PhaseStatus::Complete
                };
                self.enter_phase(next, at);
            }
        }

        if self.progress >= 100.0 {
            self.completed = true;
            if self.phase != PhaseStatus::Complete {
                self.enter_phase(PhaseStatus::Complete, at);
            }
            self.next_progress_at = None;
            self.hide_at = Some(at + self.script.hide_delay);
            log::debug!("loading sequence complete at {}ms", at.as_millis());
        } else {
            self.next_progress_at = Some(at + self.script.progress_tick());
        }
    }

    fn on_hide(&mut self) {
        self.hide_at = None;
        self.next_progress_at = None;
        self.next_type_at = None;
        self.next_reveal_at = None;
        self.visible = false;
        self.cancel.cancel();
        log::debug!("loading screen hidden");
    }

    fn on_type(&mut self, at: Duration) {
        let typer = &mut self.lines[self.current_line];
        typer.type_next();
        match typer.peek() {
            Some(c) => self.next_type_at = Some(at + self.script.char_delays.for_char(c)),
            None => self.finish_line(at),
        }
    }

    fn on_reveal(&mut self, at: Duration) {
        self.next_reveal_at = None;
        self.reveal_line(self.current_line + 1, at);
    }

    fn reveal_line(&mut self, index: usize, at: Duration) {
        self.current_line = index;
        self.lines.push(LineTyper::new(self.script.lines[index].clone()));
        match self.lines[index].peek() {
            Some(c) => self.next_type_at = Some(at + self.script.char_delays.for_char(c)),
            None => self.finish_line(at),
        }
    }

    fn finish_line(&mut self, at: Duration) {
        self.next_type_at = None;
        if self.current_line + 1 < self.script.lines.len() {
            self.next_reveal_at = Some(at + self.script.line_pause);
        }
    }

    fn enter_phase(&mut self, phase: PhaseStatus, at: Duration) {
        self.phase = phase;
        self.phase_started_at = at;
        log::debug!("loading phase: {}", self.phase_label());
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Progress rounded to a whole percent for display.
    pub fn percent(&self) -> u8 {
        self.progress.round().clamp(0.0, 100.0) as u8
    }

    pub fn phase(&self) -> PhaseStatus {
        self.phase
    }

    pub fn phase_label(&self) -> &str {
        match self.phase {
            PhaseStatus::Initializing => INITIAL_PHASE,
            PhaseStatus::Running(i) => &self.script.phases[i].name,
            PhaseStatus::Complete => COMPLETE_PHASE,
        }
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        index < self.lines.len()
    }

    /// Typed text of a revealed line.
    pub fn typed(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(LineTyper::typed)
    }

    /// True once the last line is fully typed.
    pub fn all_lines_typed(&self) -> bool {
        self.lines.len() == self.script.lines.len() && self.lines.iter().all(LineTyper::is_done)
    }

    pub fn revealed_lines(&self) -> impl Iterator<Item = RevealedLine<'_>> {
        self.lines.iter().enumerate().map(move |(index, typer)| {
            let is_current = index == self.current_line;
            RevealedLine {
                index,
                typed: typer.typed(),
                full: typer.full(),
                style: LineStyle::of(typer.full()),
                is_current,
                show_cursor: is_current && !typer.is_done(),
            }
        })
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn started() -> Sequencer {
        let mut seq = Sequencer::new(LoadingScript::default(), CancelHandle::new());
        seq.start(Duration::ZERO);
        seq
    }

    fn script_with_lines(lines: &[&str]) -> LoadingScript {
        LoadingScript {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            ..LoadingScript::default()
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Snapshot {
        progress: f64,
        phase: PhaseStatus,
        typed: Vec<String>,
        current_line: usize,
        completed: bool,
        visible: bool,
    }

    fn snapshot(seq: &Sequencer) -> Snapshot {
        Snapshot {
            progress: seq.progress(),
            phase: seq.phase(),
            typed: seq.revealed_lines().map(|l| l.typed.to_string()).collect(),
            current_line: seq.current_line(),
            completed: seq.is_completed(),
            visible: seq.is_visible(),
        }
    }

    #[test]
    fn test_initial_state() {
        let seq = Sequencer::new(LoadingScript::default(), CancelHandle::new());
        assert_eq!(seq.phase_label(), INITIAL_PHASE);
        assert_eq!(seq.progress(), 0.0);
        assert_eq!(seq.revealed_lines().count(), 0);
        assert!(seq.is_visible());
        assert_eq!(seq.next_deadline(), None);
    }

    #[test]
    fn test_start_reveals_first_line() {
        let seq = started();
        assert_eq!(seq.phase_label(), "installing dependencies");
        assert!(seq.is_revealed(0));
        assert!(!seq.is_revealed(1));
        assert_eq!(seq.typed(0), Some(""));
        // first char of "> npm install" is special
        assert_eq!(seq.next_deadline(), Some(ms(10)));
    }

    #[test]
    fn test_progress_monotonic_and_capped() {
        let mut seq = started();
        let mut last = 0.0;
        let mut t = 0;
        while seq.is_visible() && t <= 20_000 {
            t += 10;
            seq.advance_to(ms(t));
            assert!(seq.progress() >= last);
            assert!(seq.progress() <= 100.0);
            last = seq.progress();
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn test_progress_full_after_200_ticks() {
        let mut seq = started();
        seq.advance_to(ms(9_950));
        assert_eq!(seq.progress(), 99.5);
        assert!(!seq.is_completed());

        seq.advance_to(ms(10_000));
        assert_eq!(seq.progress(), 100.0);
        assert_eq!(seq.percent(), 100);
        assert!(seq.is_completed());
    }

    #[test]
    fn test_phase_scenarios() {
        let mut seq = started();
        seq.advance_to(ms(1_499));
        assert_eq!(seq.phase_label(), "installing dependencies");
        seq.advance_to(ms(1_500));
        assert_eq!(seq.phase_label(), "starting development server");
        seq.advance_to(ms(8_400));
        assert_eq!(seq.phase_label(), COMPLETE_PHASE);
        // the phase timer finishes before progress does
        assert_eq!(seq.percent(), 84);
        assert!(!seq.is_completed());
    }

    #[test]
    fn test_phases_follow_declared_order() {
        let mut seq = Sequencer::new(LoadingScript::default(), CancelHandle::new());
        let mut labels = vec![seq.phase_label().to_string()];
        seq.start(Duration::ZERO);
        let mut t = 0;
        while seq.is_visible() {
            let label = seq.phase_label().to_string();
            if labels.last() != Some(&label) {
                labels.push(label);
            }
            if seq.is_completed() {
                assert_eq!(seq.phase(), PhaseStatus::Complete);
            }
            t += 10;
            seq.advance_to(ms(t));
        }
        assert_eq!(
            labels,
            vec![
                "initializing",
                "installing dependencies",
                "starting development server",
                "building portfolio",
                "optimizing assets",
                "initializing animations",
                "finalizing",
                "complete",
            ]
        );
    }

    #[test]
    fn test_completion_forces_complete_phase() {
        let script = LoadingScript {
            phases: vec![Phase::new("slow", ms(60_000))],
            ..LoadingScript::default()
        };
        let mut seq = Sequencer::new(script, CancelHandle::new());
        seq.start(Duration::ZERO);
        seq.advance_to(ms(9_999));
        assert_eq!(seq.phase_label(), "slow");
        seq.advance_to(ms(10_000));
        assert!(seq.is_completed());
        assert_eq!(seq.phase_label(), COMPLETE_PHASE);
    }

    #[test]
    fn test_lines_typed_in_order_one_char_at_a_time() {
        let script = LoadingScript::default();
        let mut seq = started();
        let mut prev = snapshot(&seq);
        let mut t = 0;
        while seq.is_visible() {
            t += 1;
            seq.advance_to(ms(t));
            let cur = snapshot(&seq);

            assert!(cur.current_line >= prev.current_line);
            assert!(cur.typed.len() >= prev.typed.len());
            for (i, typed) in cur.typed.iter().enumerate() {
                let full = &script.lines[i];
                assert!(full.starts_with(typed.as_str()));
                let before = prev.typed.get(i).map(|s| s.chars().count()).unwrap_or(0);
                let now = typed.chars().count();
                assert!(now == before || now == before + 1, "line {i} jumped");
                // a line is only revealed once its predecessor is fully typed
                if i > 0 {
                    assert_eq!(cur.typed[i - 1], script.lines[i - 1]);
                }
            }
            prev = cur;
        }
        assert!(seq.all_lines_typed());
    }

    #[test]
    fn test_special_chars_type_faster() {
        let mut special = Sequencer::new(script_with_lines(&["> npm install"]), CancelHandle::new());
        let mut plain = Sequencer::new(script_with_lines(&["npm install"]), CancelHandle::new());
        special.start(Duration::ZERO);
        plain.start(Duration::ZERO);

        special.advance_to(ms(10));
        plain.advance_to(ms(10));
        assert_eq!(special.typed(0), Some(">"));
        assert_eq!(plain.typed(0), Some(""));

        // the space after '>' takes the regular delay
        special.advance_to(ms(29));
        assert_eq!(special.typed(0), Some(">"));
        special.advance_to(ms(30));
        assert_eq!(special.typed(0), Some("> "));

        plain.advance_to(ms(20));
        assert_eq!(plain.typed(0), Some("n"));
    }

    #[test]
    fn test_inter_line_pause() {
        let mut seq = Sequencer::new(script_with_lines(&["ab", "c"]), CancelHandle::new());
        seq.start(Duration::ZERO);
        seq.advance_to(ms(40));
        assert_eq!(seq.typed(0), Some("ab"));
        assert!(!seq.is_revealed(1));

        seq.advance_to(ms(239));
        assert!(!seq.is_revealed(1));
        seq.advance_to(ms(240));
        assert!(seq.is_revealed(1));
        assert_eq!(seq.current_line(), 1);
        assert_eq!(seq.typed(1), Some(""));

        seq.advance_to(ms(260));
        assert_eq!(seq.typed(1), Some("c"));
        assert!(seq.all_lines_typed());
    }

    #[test]
    fn test_empty_line_is_skipped_after_pause() {
        let mut seq = Sequencer::new(script_with_lines(&["", "x"]), CancelHandle::new());
        seq.start(Duration::ZERO);
        assert_eq!(seq.next_deadline(), Some(ms(50)));
        seq.advance_to(ms(200));
        assert!(seq.is_revealed(1));
    }

    #[test]
    fn test_cursor_on_current_line_only() {
        let mut seq = started();
        seq.advance_to(ms(100));
        let lines = seq.revealed_lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].show_cursor);
        assert_eq!(lines[0].style, LineStyle::Command);

        seq.advance_to(ms(2_000));
        let lines = seq.revealed_lines().collect::<Vec<_>>();
        assert!(lines.len() > 1);
        assert!(lines[..lines.len() - 1].iter().all(|l| !l.show_cursor && !l.is_current));
    }

    #[test]
    fn test_hides_after_delay() {
        let mut seq = started();
        seq.advance_to(ms(11_499));
        assert!(seq.is_completed());
        assert!(seq.is_visible());
        seq.advance_to(ms(11_500));
        assert!(!seq.is_visible());
        assert!(seq.cancel_handle().is_cancelled());
    }

    #[test]
    fn test_no_mutation_after_hide() {
        let mut seq = started();
        seq.advance_to(ms(11_500));
        assert!(!seq.is_visible());
        let before = snapshot(&seq);

        assert!(!seq.advance_to(ms(60_000)));
        assert_eq!(seq.next_deadline(), None);
        seq.start(ms(60_000));
        assert_eq!(snapshot(&seq), before);
    }

    #[test]
    fn test_cancel_mid_sequence() {
        let cancel = CancelHandle::new();
        let mut seq = Sequencer::new(LoadingScript::default(), cancel.clone());
        seq.start(Duration::ZERO);
        seq.advance_to(ms(500));
        let before = snapshot(&seq);
        assert_eq!(before.progress, 5.0);

        cancel.cancel();
        assert_eq!(seq.next_deadline(), None);
        assert!(!seq.advance_to(ms(20_000)));
        assert_eq!(snapshot(&seq), before);
    }

    #[test]
    fn test_scheduler_tick() {
        assert_eq!(LoadingScript::default().scheduler_tick(), ms(10));
        let total: Duration = LoadingScript::default().phases.iter().map(|p| p.duration).sum();
        assert_eq!(total, ms(7_400));
    }

    #[test]
    fn test_line_styles() {
        assert_eq!(LineStyle::of("> npm run dev"), LineStyle::Command);
        assert_eq!(LineStyle::of("added 156 packages"), LineStyle::Success);
        assert_eq!(LineStyle::of("ready - started"), LineStyle::Info);
        assert_eq!(LineStyle::of("event - compiled"), LineStyle::Event);
        assert_eq!(LineStyle::of("wait compiling..."), LineStyle::Warning);
        assert_eq!(LineStyle::of("// Loading complete"), LineStyle::Plain);
    }
}
