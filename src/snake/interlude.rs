//! Fun-fact interlude: show the fact, then count down 3, 2, 1 and resume.

/// Where the interlude is in its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterludeStage {
    Showing { remaining_ms: u64 },
    Countdown { value: u8, remaining_ms: u64 },
}

/// Progress reported by [`Interlude::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterludeProgress {
    CountdownTick(u8),
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interlude {
    pub fact_index: usize,
    pub fact: String,
    pub stage: InterludeStage,
    countdown_from: u8,
    countdown_step_ms: u64,
}

impl Interlude {
    pub fn new(
        fact_index: usize,
        fact: String,
        display_ms: u64,
        countdown_from: u8,
        countdown_step_ms: u64,
    ) -> Self {
        Self {
            fact_index,
            fact,
            stage: InterludeStage::Showing {
                remaining_ms: display_ms,
            },
            countdown_from,
            countdown_step_ms,
        }
    }

    /// Current countdown value, once the countdown has begun.
    pub fn countdown(&self) -> Option<u8> {
        match self.stage {
            InterludeStage::Showing { .. } => None,
            InterludeStage::Countdown { value, .. } => Some(value),
        }
    }

    /// Run the interlude clock forward by `dt_ms`. Once `Finished` is
    /// reported the interlude is over and further calls report nothing.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<InterludeProgress> {
        let mut progress = Vec::new();
        let mut left = dt_ms;

        loop {
            match self.stage {
                InterludeStage::Showing { remaining_ms } => {
                    if left < remaining_ms {
                        self.stage = InterludeStage::Showing {
                            remaining_ms: remaining_ms - left,
                        };
                        break;
                    }
                    left -= remaining_ms;
                    if self.countdown_from == 0 {
                        self.stage = InterludeStage::Countdown {
                            value: 0,
                            remaining_ms: 0,
                        };
                        progress.push(InterludeProgress::Finished);
                        break;
                    }
                    self.stage = InterludeStage::Countdown {
                        value: self.countdown_from,
                        remaining_ms: self.countdown_step_ms,
                    };
                    progress.push(InterludeProgress::CountdownTick(self.countdown_from));
                }
                InterludeStage::Countdown { value: 0, .. } => break,
                InterludeStage::Countdown {
                    value,
                    remaining_ms,
                } => {
                    if left < remaining_ms {
                        self.stage = InterludeStage::Countdown {
                            value,
                            remaining_ms: remaining_ms - left,
                        };
                        break;
                    }
                    left -= remaining_ms;
                    let next = value - 1;
                    self.stage = InterludeStage::Countdown {
                        value: next,
                        remaining_ms: self.countdown_step_ms,
                    };
                    if next == 0 {
                        progress.push(InterludeProgress::Finished);
                        break;
                    }
                    progress.push(InterludeProgress::CountdownTick(next));
                }
            }
        }

        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interlude() -> Interlude {
        Interlude::new(0, "fact".to_string(), 4000, 3, 1000)
    }

    #[test]
    fn test_shows_fact_before_countdown() {
        let mut i = interlude();
        assert!(i.advance(3999).is_empty());
        assert_eq!(i.countdown(), None);
        assert_eq!(i.advance(1), vec![InterludeProgress::CountdownTick(3)]);
        assert_eq!(i.countdown(), Some(3));
    }

    #[test]
    fn test_full_timeline() {
        let mut i = interlude();
        let mut all = Vec::new();
        for _ in 0..7 {
            all.extend(i.advance(1000));
        }
        assert_eq!(
            all,
            vec![
                InterludeProgress::CountdownTick(3),
                InterludeProgress::CountdownTick(2),
                InterludeProgress::CountdownTick(1),
                InterludeProgress::Finished,
            ]
        );
    }

    #[test]
    fn test_large_step_reports_everything() {
        let mut i = interlude();
        let progress = i.advance(10_000);
        assert_eq!(progress.len(), 4);
        assert_eq!(progress.last(), Some(&InterludeProgress::Finished));
        assert!(i.advance(1000).is_empty());
    }

    #[test]
    fn test_zero_countdown_finishes_after_display() {
        let mut i = Interlude::new(0, "fact".to_string(), 500, 0, 1000);
        assert_eq!(i.advance(500), vec![InterludeProgress::Finished]);
    }
}
