//! Seven-piece bag randomizer with anti-repeat history, backed by a
//! Mersenne-Twister-class PRNG.

use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_mt::Mt19937GenRand32;
use tetris_mcts_types::{PieceKind, BAG_HISTORY_LEN, PIECE_KIND_COUNT};

/// Draws pieces from shuffled bags of seven, avoiding immediate repeats
/// against both the piece most recently appended to the queue and a
/// short rolling history of recently activated pieces.
#[derive(Clone)]
pub struct Bag {
    rng: Mt19937GenRand32,
    last_queued: Option<PieceKind>,
    recent: ArrayVec<PieceKind, BAG_HISTORY_LEN>,
}

impl Bag {
    pub fn new(seed: u32) -> Self {
        Bag {
            rng: Mt19937GenRand32::from_seed(seed.to_le_bytes()),
            last_queued: None,
            recent: ArrayVec::new(),
        }
    }

    /// Appends pieces to `queue` until it holds at least `target_size`
    /// entries, shuffling one fresh bag of seven at a time and steering
    /// around `last_queued` and `recent` history where possible.
    pub fn refill<const CAP: usize>(
        &mut self,
        queue: &mut ArrayVec<PieceKind, CAP>,
        target_size: usize,
    ) {
        let mut last_inserted = queue.last().copied().or(self.last_queued);

        while queue.len() < target_size {
            let mut bag: [PieceKind; PIECE_KIND_COUNT] = PieceKind::ALL;
            bag.shuffle(&mut self.rng);

            let should_avoid = |candidate: PieceKind, last: Option<PieceKind>, recent: &[PieceKind]| {
                Some(candidate) == last || recent.contains(&candidate)
            };

            let mut i = 0;
            while i < bag.len() && queue.len() < target_size {
                if should_avoid(bag[i], last_inserted, &self.recent) {
                    if let Some(j) = (i + 1..bag.len())
                        .find(|&j| !should_avoid(bag[j], last_inserted, &self.recent))
                    {
                        bag.swap(i, j);
                    }
                }

                let candidate = bag[i];
                queue.push(candidate);
                last_inserted = Some(candidate);
                self.last_queued = Some(candidate);
                i += 1;
            }
        }
    }

    /// Records that `kind` has just become the active piece, so future
    /// refills steer around it for the next [`BAG_HISTORY_LEN`] draws.
    pub fn register_use(&mut self, kind: PieceKind) {
        if self.recent.is_full() {
            self.recent.remove(0);
        }
        self.recent.push(kind);
    }

    pub fn reset_history(&mut self) {
        self.last_queued = None;
        self.recent.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_mcts_types::QUEUE_PREVIEW_LEN;

    #[test]
    fn refill_reaches_target_size() {
        let mut bag = Bag::new(42);
        let mut queue: ArrayVec<PieceKind, 16> = ArrayVec::new();
        bag.refill(&mut queue, QUEUE_PREVIEW_LEN);
        assert_eq!(queue.len(), QUEUE_PREVIEW_LEN);
    }

    #[test]
    fn avoids_repeating_last_queued_piece_when_possible() {
        let mut bag = Bag::new(7);
        let mut queue: ArrayVec<PieceKind, 32> = ArrayVec::new();
        bag.refill(&mut queue, 1);
        let first = queue[0];
        bag.refill(&mut queue, 8);
        assert_ne!(queue[1], first);
    }

    #[test]
    fn thousand_draws_never_repeat_consecutively() {
        let mut bag = Bag::new(123);
        let mut queue: ArrayVec<PieceKind, 8> = ArrayVec::new();
        let mut emitted = Vec::new();
        while emitted.len() < 1000 {
            bag.refill(&mut queue, 4);
            let kind = queue.remove(0);
            bag.register_use(kind);
            emitted.push(kind);
        }
        for pair in emitted.windows(2) {
            assert_ne!(pair[0], pair[1], "consecutive pieces should not repeat");
        }
    }
}
