use crate::scoring::{WIN_POINTS, LOSS_POINTS, CLEAN_WIN_POINTS, BAGEL_POINTS};

/// The points system, as shown to players
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct PointsRules
{
    pub match_win: i32,
    pub match_loss: i32,
    pub clean_win: i32,
    pub bagel_for: i32,
    pub bagel_against: i32,
}

impl PointsRules
{
    pub fn current() -> PointsRules
    {
        PointsRules::new(WIN_POINTS, LOSS_POINTS, CLEAN_WIN_POINTS, BAGEL_POINTS, -BAGEL_POINTS)
    }
}
