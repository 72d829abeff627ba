use serde::Serialize;

use crate::matching::scorer::{Gap, MatchResult};

/// A candidate (student or role) with its match result.
#[derive(Debug, Clone, Serialize)]
pub struct RankedMatch<C> {
    pub candidate: C,
    pub score: u32,
    pub gaps: Vec<Gap>,
}

/// Orders evaluated candidates by descending score. The sort is stable, so
/// equal scores keep the order the candidates were supplied in.
pub fn rank_by_score<C>(evaluated: Vec<(C, MatchResult)>) -> Vec<RankedMatch<C>> {
    let mut ranked: Vec<RankedMatch<C>> = evaluated
        .into_iter()
        .map(|(candidate, result)| RankedMatch {
            candidate,
            score: result.score,
            gaps: result.gaps,
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
