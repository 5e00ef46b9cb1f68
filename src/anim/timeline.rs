//! Timed cue interpreter
//!
//! A `Timeline` holds cues scheduled at offsets from its start and hands them
//! back, in schedule order, as time advances past them. It replaces chains of
//! nested "call me in N ms" callbacks with a flat list that can be inspected
//! and tested.

use smallvec::SmallVec;

#[derive(Debug, Clone)]
pub struct Timeline<C> {
    /// Cues sorted by their offset in seconds
    cues: Vec<(f32, C)>,
    next: usize,
    elapsed: f32,
}

impl<C: Clone> Timeline<C> {
    pub fn new() -> Self {
        Self {
            cues: Vec::new(),
            next: 0,
            elapsed: 0.0,
        }
    }

    /// Schedule `cue` at `at` seconds after the timeline starts.
    ///
    /// Cues sharing an offset fire in the order they were added.
    pub fn at(mut self, at: f32, cue: C) -> Self {
        let at = at.max(0.0);
        let index = self.cues.partition_point(|(offset, _)| *offset <= at);
        self.cues.insert(index, (at, cue));
        self
    }

    /// Advance by `dt` and return every cue whose offset has been reached.
    pub fn advance(&mut self, dt: f32) -> SmallVec<[C; 2]> {
        self.elapsed += dt.max(0.0);

        let mut fired = SmallVec::new();
        while let Some((offset, cue)) = self.cues.get(self.next) {
            if *offset > self.elapsed {
                break;
            }
            fired.push(cue.clone());
            self.next += 1;
        }
        fired
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.cues.len()
    }

    pub fn pending(&self) -> usize {
        self.cues.len() - self.next
    }
}

impl<C: Clone> Default for Timeline<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_fire_in_schedule_order() {
        let mut timeline = Timeline::new().at(0.27, "lethal").at(0.12, "impact");

        assert!(timeline.advance(0.1).is_empty());
        assert_eq!(timeline.advance(0.05).as_slice(), &["impact"]);
        assert_eq!(timeline.advance(0.2).as_slice(), &["lethal"]);
        assert!(timeline.is_exhausted());
    }

    #[test]
    fn test_large_step_fires_everything_once() {
        let mut timeline = Timeline::new().at(0.1, 1).at(0.2, 2).at(0.2, 3);

        assert_eq!(timeline.advance(5.0).as_slice(), &[1, 2, 3]);
        assert!(timeline.advance(5.0).is_empty());
    }

    #[test]
    fn test_zero_offset_fires_on_first_advance() {
        let mut timeline = Timeline::new().at(0.0, 'a');
        assert_eq!(timeline.pending(), 1);
        assert_eq!(timeline.advance(0.0).as_slice(), &['a']);
    }
}
