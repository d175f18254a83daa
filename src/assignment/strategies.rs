//! The three built-in assignment policies.

use super::config::ScoreWeights;
use super::types::{AssignContext, AssignmentStrategy};
use crate::lanes::LaneId;
use crate::units::{ColorBand, Unit};

/// First usable lane in oven-biased order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl AssignmentStrategy for FirstAvailable {
    fn name(&self) -> &str {
        "first-available"
    }

    fn choose(&self, _unit: &Unit, ctx: &AssignContext<'_>) -> Option<LaneId> {
        ctx.preferred().first().copied()
    }
}

/// First usable lane whose tail matches the unit's color, falling back to
/// the first usable lane, both in oven-biased order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMatch;

impl AssignmentStrategy for GreedyMatch {
    fn name(&self) -> &str {
        "greedy-match"
    }

    fn choose(&self, unit: &Unit, ctx: &AssignContext<'_>) -> Option<LaneId> {
        let pool = ctx.pool();
        ctx.preferred()
            .iter()
            .copied()
            .find(|&id| pool.tail_color(id) == Some(unit.color()))
            .or_else(|| ctx.preferred().first().copied())
    }
}

/// Rule cascade over usable lanes in declaration order:
///
/// 1. first lane whose tail matches the unit's color;
/// 2. for rare colors, the lane with the most free capacity;
/// 3. otherwise the highest [`ScoreWeights`] score.
///
/// Ties go to the lane declared first. Oven preference order is ignored;
/// the oven only enters through the score penalty.
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridScored {
    weights: ScoreWeights,
}

impl HybridScored {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Score of placing `unit` in `lane`.
    pub fn score(&self, unit: &Unit, lane: LaneId, ctx: &AssignContext<'_>) -> i64 {
        let l = ctx.pool().lane(lane);
        let color = unit.color();
        let mut score = l.free_capacity() as i64;
        if let Some(tail) = l.tail_color() {
            if tail == color {
                score += self.weights.tail_match;
            }
            if tail.band() == color.band() {
                score += self.weights.band_match;
            }
        }
        if ctx.is_penalized(lane) {
            score += self.weights.oven_penalty;
        }
        score
    }
}

/// First element with the strictly greatest key.
fn first_max_by_key<K: Ord>(
    ids: impl IntoIterator<Item = LaneId>,
    key: impl Fn(LaneId) -> K,
) -> Option<LaneId> {
    let mut best: Option<(LaneId, K)> = None;
    for id in ids {
        let k = key(id);
        if best.as_ref().is_none_or(|(_, b)| k > *b) {
            best = Some((id, k));
        }
    }
    best.map(|(id, _)| id)
}

impl AssignmentStrategy for HybridScored {
    fn name(&self) -> &str {
        "hybrid-scored"
    }

    fn choose(&self, unit: &Unit, ctx: &AssignContext<'_>) -> Option<LaneId> {
        let pool = ctx.pool();
        let candidates = ctx.candidates().iter().copied();

        if let Some(id) = candidates
            .clone()
            .find(|&id| pool.tail_color(id) == Some(unit.color()))
        {
            return Some(id);
        }

        if unit.color().band() == ColorBand::Rare {
            return first_max_by_key(candidates, |id| pool.lane(id).free_capacity());
        }

        first_max_by_key(candidates, |id| self.score(unit, id, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Assignment;
    use crate::lanes::{LanePool, LaneSpec, LineLayout};
    use crate::units::{Color, Oven};

    fn fill(pool: &mut LanePool, lane: usize, colors: &[Color]) {
        for (i, &c) in colors.iter().enumerate() {
            pool.append(LaneId(lane), Unit::new(1000 + i as u64, c)).unwrap();
        }
    }

    fn reference_pool() -> LanePool {
        LanePool::new(&LineLayout::reference())
    }

    // ---- FirstAvailable ----

    #[test]
    fn test_first_available_empty_pool_picks_first_lane() {
        let pool = reference_pool();
        let ctx = AssignContext::open_lanes(&pool, Oven::First);
        let decision = FirstAvailable.assign(&Unit::new(1, Color::C1), &ctx);
        assert_eq!(decision.lane, Some(LaneId(0)));
        assert!(!decision.penalty);
    }

    #[test]
    fn test_first_available_second_oven_prefers_downstream() {
        let pool = reference_pool();
        let ctx = AssignContext::open_lanes(&pool, Oven::Second);
        let decision = FirstAvailable.assign(&Unit::new(1, Color::C1), &ctx);
        assert_eq!(decision.lane, Some(LaneId(4)));
        assert!(!decision.penalty);
    }

    #[test]
    fn test_first_available_skips_full_lanes() {
        let mut pool = LanePool::new(&LineLayout::new(vec![
            LaneSpec::new("A", 1, false),
            LaneSpec::new("B", 1, true),
        ]));
        fill(&mut pool, 0, &[Color::C2]);
        let ctx = AssignContext::open_lanes(&pool, Oven::First);
        let decision = FirstAvailable.assign(&Unit::new(1, Color::C1), &ctx);
        assert_eq!(decision.lane, Some(LaneId(1)));
        assert!(decision.penalty, "first-oven unit landed downstream");
    }

    #[test]
    fn test_no_usable_lane() {
        let pool = reference_pool();
        let ctx = AssignContext::new(&pool, Oven::First, |_| false);
        let unit = Unit::new(1, Color::C1);
        assert_eq!(FirstAvailable.assign(&unit, &ctx), Assignment::none());
        assert_eq!(GreedyMatch.assign(&unit, &ctx).lane, None);
        assert_eq!(HybridScored::default().assign(&unit, &ctx).lane, None);
    }

    // ---- GreedyMatch ----

    #[test]
    fn test_greedy_prefers_tail_match() {
        let mut pool = reference_pool();
        fill(&mut pool, 2, &[Color::C3]);
        fill(&mut pool, 6, &[Color::C3]);
        let unit = Unit::new(1, Color::C3);

        let ctx = AssignContext::open_lanes(&pool, Oven::First);
        assert_eq!(GreedyMatch.choose(&unit, &ctx), Some(LaneId(2)));

        // Second oven tries downstream lanes first, so L7 wins.
        let ctx = AssignContext::open_lanes(&pool, Oven::Second);
        assert_eq!(GreedyMatch.choose(&unit, &ctx), Some(LaneId(6)));
    }

    #[test]
    fn test_greedy_falls_back_to_first_usable() {
        let mut pool = reference_pool();
        fill(&mut pool, 0, &[Color::C1]);
        let ctx = AssignContext::open_lanes(&pool, Oven::First);
        assert_eq!(GreedyMatch.choose(&Unit::new(1, Color::C2), &ctx), Some(LaneId(0)));
    }

    #[test]
    fn test_greedy_ignores_unusable_match() {
        let mut pool = reference_pool();
        fill(&mut pool, 3, &[Color::C5]);
        let ctx = AssignContext::new(&pool, Oven::First, |id| id != LaneId(3));
        assert_eq!(GreedyMatch.choose(&Unit::new(1, Color::C5), &ctx), Some(LaneId(0)));
    }

    // ---- HybridScored ----

    #[test]
    fn test_hybrid_tail_match_short_circuits() {
        let mut pool = reference_pool();
        // L1 nearly full with a C1 tail. With the match bonuses zeroed every
        // empty lane outscores it, yet the tail match must still win.
        fill(&mut pool, 0, &[Color::C4; 12]);
        fill(&mut pool, 0, &[Color::C1]);
        let ctx = AssignContext::open_lanes(&pool, Oven::First);
        let hybrid = HybridScored::new(
            ScoreWeights::default()
                .with_tail_match(0)
                .with_band_match(0),
        );
        let unit = Unit::new(1, Color::C1);

        assert_eq!(hybrid.score(&unit, LaneId(0), &ctx), 1);
        assert_eq!(hybrid.score(&unit, LaneId(1), &ctx), 14);
        assert_eq!(hybrid.choose(&unit, &ctx), Some(LaneId(0)));
    }

    #[test]
    fn test_hybrid_tail_match_ignores_oven_order() {
        let mut pool = reference_pool();
        fill(&mut pool, 1, &[Color::C2]);
        fill(&mut pool, 5, &[Color::C2]);
        let ctx = AssignContext::open_lanes(&pool, Oven::Second);
        assert_eq!(
            HybridScored::default().choose(&Unit::new(1, Color::C2), &ctx),
            Some(LaneId(1))
        );
    }

    #[test]
    fn test_hybrid_rare_goes_to_emptiest() {
        let mut pool = reference_pool();
        for lane in 0..9 {
            fill(&mut pool, lane, &[Color::C1; 10]);
        }
        // L6 (cap 16, 10 used) and L8 tie on free capacity; L6 declared first.
        pool.pop_tail(LaneId(5)).unwrap();
        pool.pop_tail(LaneId(7)).unwrap();
        let ctx = AssignContext::open_lanes(&pool, Oven::First);
        let decision = HybridScored::default().assign(&Unit::new(1, Color::C9), &ctx);
        assert_eq!(decision.lane, Some(LaneId(5)));
        assert!(decision.penalty);
    }

    #[test]
    fn test_hybrid_score_formula() {
        let mut pool = reference_pool();
        fill(&mut pool, 0, &[Color::C2]); // same band as C1
        fill(&mut pool, 5, &[Color::C1, Color::C2]); // downstream, band match
        let hybrid = HybridScored::default();
        let unit = Unit::new(1, Color::C1);

        let ctx = AssignContext::open_lanes(&pool, Oven::First);
        assert_eq!(hybrid.score(&unit, LaneId(0), &ctx), 20 + 13);
        assert_eq!(hybrid.score(&unit, LaneId(1), &ctx), 14);
        assert_eq!(hybrid.score(&unit, LaneId(5), &ctx), 20 + 14 - 30);
        assert_eq!(hybrid.score(&unit, LaneId(4), &ctx), 16 - 30);

        let ctx = AssignContext::open_lanes(&pool, Oven::Second);
        assert_eq!(hybrid.score(&unit, LaneId(5), &ctx), 20 + 14);
    }

    #[test]
    fn test_hybrid_picks_max_score() {
        let mut pool = reference_pool();
        fill(&mut pool, 0, &[Color::C2]);
        let ctx = AssignContext::open_lanes(&pool, Oven::First);
        // L1: 20 + 13 = 33 beats every empty lane (14 upstream, 16 - 30 downstream).
        assert_eq!(
            HybridScored::default().choose(&Unit::new(1, Color::C1), &ctx),
            Some(LaneId(0))
        );
    }

    #[test]
    fn test_hybrid_score_tie_goes_to_first_declared() {
        let pool = reference_pool();
        let ctx = AssignContext::open_lanes(&pool, Oven::Second);
        // Second oven: no penalty, empty downstream lanes score 16 and tie.
        assert_eq!(
            HybridScored::default().choose(&Unit::new(1, Color::C3), &ctx),
            Some(LaneId(4))
        );
    }

    #[test]
    fn test_custom_weights() {
        let mut pool = reference_pool();
        fill(&mut pool, 0, &[Color::C2]);
        let weights = ScoreWeights::default().with_band_match(0).with_oven_penalty(0);
        let ctx = AssignContext::open_lanes(&pool, Oven::First);
        // Without the band bonus and oven penalty, empty L5 (16) wins.
        assert_eq!(
            HybridScored::new(weights).choose(&Unit::new(1, Color::C1), &ctx),
            Some(LaneId(4))
        );
    }
}
