//! Elo estimates from match results.
use crate::wdl::WDL;

/// The average score, counting a draw as half a win. `wdl` does not have to be normalized.
pub fn score_from_wdl(wdl: WDL<f32>) -> f32 {
    (wdl.win + 0.5 * wdl.draw) / wdl.sum()
}

/// The Elo difference that predicts the score of `wdl`, infinite if one side won every game.
pub fn elo_from_wdl(wdl: WDL<f32>) -> f32 {
    let elo = -400.0 * (1.0 / score_from_wdl(wdl) - 1.0).log10();

    // no negative zero for even matches
    elo + 0.0
}
