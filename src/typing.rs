use std::time::Duration;

/// Smallest step any typing timer may take, so a virtual clock always moves forward.
const MIN_STEP: Duration = Duration::from_millis(1);

/// Coarsest interval that lands on every one of `delays`.
pub(crate) fn common_tick(delays: impl IntoIterator<Item = Duration>) -> Duration {
    let ms = delays
        .into_iter()
        .map(|d| d.as_millis() as u64)
        .filter(|ms| *ms > 0)
        .fold(0, gcd);
    Duration::from_millis(ms).max(MIN_STEP)
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Characters typed with the shorter delay.
pub fn is_special(c: char) -> bool {
    matches!(c, '>' | '/')
}

/// Per-character delays of the typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharDelays {
    pub base: Duration,
    pub special: Duration,
}

impl CharDelays {
    pub const fn new(base: Duration, special: Duration) -> Self {
        Self { base, special }
    }

    /// Delay to wait before revealing `c`.
    pub fn for_char(&self, c: char) -> Duration {
        let delay = if is_special(c) { self.special } else { self.base };
        delay.max(MIN_STEP)
    }
}

impl Default for CharDelays {
    fn default() -> Self {
        Self::new(Duration::from_millis(20), Duration::from_millis(10))
    }
}

/// Reveals a single line one character at a time.
///
/// `typed()` is always a prefix of `full()` and never splits a `char`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTyper {
    text: String,
    typed_len: usize,
}

impl LineTyper {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            typed_len: 0,
        }
    }

    pub fn full(&self) -> &str {
        &self.text
    }

    pub fn typed(&self) -> &str {
        &self.text[..self.typed_len]
    }

    pub fn is_done(&self) -> bool {
        self.typed_len == self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.typed_len == 0
    }

    /// Next character to be typed, if any.
    pub fn peek(&self) -> Option<char> {
        self.text[self.typed_len..].chars().next()
    }

    /// Types exactly one character and returns it.
    pub fn type_next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.typed_len += c.len_utf8();
        Some(c)
    }

    /// Removes the last typed character and returns it.
    pub fn erase(&mut self) -> Option<char> {
        let c = self.typed().chars().next_back()?;
        self.typed_len -= c.len_utf8();
        Some(c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RotatorMode {
    Typing,
    Holding,
    Erasing,
}

/// Timing of a [`PhraseRotator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatorTiming {
    pub type_delay: Duration,
    pub erase_delay: Duration,
    pub hold: Duration,
}

impl Default for RotatorTiming {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(50),
            erase_delay: Duration::from_millis(30),
            hold: Duration::from_millis(1000),
        }
    }
}

impl RotatorTiming {
    /// Interval a driver needs so every rotator step lands on a tick.
    pub fn tick(&self) -> Duration {
        common_tick([self.type_delay, self.erase_delay, self.hold])
    }
}

/// Types a phrase, holds it, erases it, then moves on to the next one, forever.
#[derive(Debug, Clone)]
pub struct PhraseRotator {
    phrases: Vec<String>,
    index: usize,
    typer: LineTyper,
    mode: RotatorMode,
    timing: RotatorTiming,
    next_at: Option<Duration>,
}

impl PhraseRotator {
    pub fn new<I, S>(phrases: I, timing: RotatorTiming) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases = phrases.into_iter().map(Into::into).collect::<Vec<String>>();
        let typer = LineTyper::new(phrases.first().cloned().unwrap_or_default());
        let next_at = if phrases.is_empty() {
            None
        } else {
            Some(timing.type_delay.max(MIN_STEP))
        };
        Self {
            phrases,
            index: 0,
            typer,
            mode: RotatorMode::Typing,
            timing,
            next_at,
        }
    }

    pub fn text(&self) -> &str {
        self.typer.typed()
    }

    pub fn phrase_index(&self) -> usize {
        self.index
    }

    pub fn is_holding(&self) -> bool {
        self.mode == RotatorMode::Holding
    }

    /// Runs every step due at or before `now`. Returns whether the text changed.
    pub fn advance_to(&mut self, now: Duration) -> bool {
        let mut changed = false;
        while let Some(at) = self.next_at {
            if at > now {
                break;
            }
            changed |= self.step(at);
        }
        changed
    }

    fn step(&mut self, at: Duration) -> bool {
        match self.mode {
            RotatorMode::Typing => {
                let typed = self.typer.type_next().is_some();
                if self.typer.is_done() {
                    self.mode = RotatorMode::Holding;
                    self.next_at = Some(at + self.timing.hold.max(MIN_STEP));
                } else {
                    self.next_at = Some(at + self.timing.type_delay.max(MIN_STEP));
                }
                typed
            }
            RotatorMode::Holding => {
                self.mode = RotatorMode::Erasing;
                self.next_at = Some(at + self.timing.erase_delay.max(MIN_STEP));
                false
            }
            RotatorMode::Erasing => {
                let erased = self.typer.erase().is_some();
                if self.typer.is_empty() {
                    self.index = (self.index + 1) % self.phrases.len();
                    self.typer = LineTyper::new(self.phrases[self.index].clone());
                    self.mode = RotatorMode::Typing;
                    self.next_at = Some(at + self.timing.type_delay.max(MIN_STEP));
                } else {
                    self.next_at = Some(at + self.timing.erase_delay.max(MIN_STEP));
                }
                erased
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_rotator_tick() {
        assert_eq!(RotatorTiming::default().tick(), ms(10));
        let timing = RotatorTiming {
            type_delay: ms(40),
            erase_delay: ms(20),
            hold: ms(1000),
        };
        assert_eq!(timing.tick(), ms(20));
        assert_eq!(common_tick([Duration::ZERO]), ms(1));
    }

    #[test]
    fn test_special_chars_are_faster() {
        let delays = CharDelays::default();
        assert!(delays.for_char('>') < delays.for_char('n'));
        assert!(delays.for_char('/') < delays.for_char(' '));
        assert_eq!(delays.for_char('a'), ms(20));
    }

    #[test]
    fn test_line_typer_grows_by_one_char() {
        let mut typer = LineTyper::new("> ok");
        let mut seen = vec![typer.typed().to_string()];
        while typer.type_next().is_some() {
            seen.push(typer.typed().to_string());
        }
        assert_eq!(seen, vec!["", ">", "> ", "> o", "> ok"]);
        assert!(typer.is_done());
        assert_eq!(typer.type_next(), None);
    }

    #[test]
    fn test_line_typer_multibyte() {
        let mut typer = LineTyper::new("é✓");
        assert_eq!(typer.type_next(), Some('é'));
        assert_eq!(typer.typed(), "é");
        assert_eq!(typer.type_next(), Some('✓'));
        assert!(typer.is_done());
        assert_eq!(typer.erase(), Some('✓'));
        assert_eq!(typer.typed(), "é");
    }

    #[test]
    fn test_empty_line_is_done() {
        let typer = LineTyper::new("");
        assert!(typer.is_done());
        assert_eq!(typer.peek(), None);
    }

    #[test]
    fn test_rotator_cycle() {
        let timing = RotatorTiming {
            type_delay: ms(10),
            erase_delay: ms(5),
            hold: ms(100),
        };
        let mut rotator = PhraseRotator::new(["ab", "c"], timing);
        assert_eq!(rotator.text(), "");

        assert!(rotator.advance_to(ms(10)));
        assert_eq!(rotator.text(), "a");
        rotator.advance_to(ms(20));
        assert_eq!(rotator.text(), "ab");
        assert!(rotator.is_holding());

        // held for the full hold duration
        assert!(!rotator.advance_to(ms(119)));
        assert_eq!(rotator.text(), "ab");

        // hold ends at 120, first erase at 125, second at 130
        rotator.advance_to(ms(125));
        assert_eq!(rotator.text(), "a");
        rotator.advance_to(ms(130));
        assert_eq!(rotator.text(), "");
        assert_eq!(rotator.phrase_index(), 1);

        rotator.advance_to(ms(140));
        assert_eq!(rotator.text(), "c");

        // hold until 240, erase at 245, then wrap back to the first phrase
        rotator.advance_to(ms(244));
        assert_eq!(rotator.phrase_index(), 1);
        rotator.advance_to(ms(245));
        assert_eq!(rotator.phrase_index(), 0);
        assert_eq!(rotator.text(), "");
    }

    #[test]
    fn test_rotator_without_phrases() {
        let mut rotator = PhraseRotator::new(Vec::<String>::new(), RotatorTiming::default());
        assert!(!rotator.advance_to(ms(10_000)));
        assert_eq!(rotator.text(), "");
    }
}
