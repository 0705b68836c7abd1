use crate::errors::*;
use crate::model::{SetScore, Team};

/// Points for each player on the winning team
pub const WIN_POINTS: i32 = 2;
/// Points for each player on the losing team
pub const LOSS_POINTS: i32 = -1;
/// Extra points for each winner of a 2-0 match
pub const CLEAN_WIN_POINTS: i32 = 1;
/// Points per bagel set won, taken away per bagel set lost
pub const BAGEL_POINTS: i32 = 1;

pub const MIN_SETS: usize = 2;
pub const MAX_SETS: usize = 3;
pub const SETS_TO_WIN: usize = 2;
pub const MAX_GAMES: u8 = 7;

/// Counts how many sets each team won, tied sets count for nobody
///
/// # Return
/// * a tuple where `.0` is the sets won by team A and `.1` by team B
pub fn count_set_wins(sets: &[SetScore]) -> (usize, usize)
{
    sets.iter()
        .fold((0, 0), |(sets_a, sets_b), set| match set.winner()
        {
            Some(Team::A) => (sets_a + 1, sets_b),
            Some(Team::B) => (sets_a, sets_b + 1),
            None => (sets_a, sets_b),
        })
}

/// Determines who won a match and if it was a clean 2-0
///
/// # Arguments
/// * `sets` The games of every set played, in order
///
/// # Return
/// * a tuple where `.0` is the winning team and `.1` is true for a clean win
pub fn resolve(sets: &[SetScore]) -> Result<(Team, bool)>
{
    if sets.len() < MIN_SETS
    {
        bail!(ErrorKind::InvalidSets(format!("{} set(s) played, at least {} are needed", sets.len(), MIN_SETS)));
    }

    let (sets_a, sets_b) = count_set_wins(sets);
    let (winner, won, lost) = if sets_a > sets_b
    {
        (Team::A, sets_a, sets_b)
    } else if sets_b > sets_a
    {
        (Team::B, sets_b, sets_a)
    } else
    {
        bail!(ErrorKind::NoMajority(sets_a, sets_b));
    };

    let clean_win = won == SETS_TO_WIN && lost == 0 && sets.len() == MIN_SETS;
    trace!("Resolved sets: {:?} as {}-{}, winner: {}, clean: {}", sets, sets_a, sets_b, winner, clean_win);

    Ok((winner, clean_win))
}

/// Counts the 6-0 sets won by each team
///
/// # Return
/// * a tuple where `.0` is the bagels of team A and `.1` the bagels of team B
pub fn count_bagels(sets: &[SetScore]) -> (u32, u32)
{
    let bagels_a = sets.iter().filter(|set| set.is_bagel_for(Team::A)).count() as u32;
    let bagels_b = sets.iter().filter(|set| set.is_bagel_for(Team::B)).count() as u32;

    (bagels_a, bagels_b)
}

/// Drops the sets that were left at 0-0, i.e. never played
pub fn normalize_sets(sets: Vec<SetScore>) -> Vec<SetScore>
{
    sets.into_iter()
        .filter(|set| !set.is_unplayed())
        .collect()
}

/// Checks a match is a complete best-of-three before it gets recorded
pub fn validate_sets(sets: &[SetScore]) -> Result<()>
{
    if sets.len() < MIN_SETS || sets.len() > MAX_SETS
    {
        bail!(ErrorKind::InvalidSets(format!("{} set(s) entered, a match has {} or {}", sets.len(), MIN_SETS, MAX_SETS)));
    }

    for (index, set) in sets.iter().enumerate()
    {
        if set.games_a > MAX_GAMES || set.games_b > MAX_GAMES
        {
            bail!(ErrorKind::InvalidSets(format!("set {} is {}-{}, at most {} games per team", index + 1, set.games_a, set.games_b, MAX_GAMES)));
        }

        if set.winner().is_none()
        {
            bail!(ErrorKind::InvalidSets(format!("set {} is tied {}-{}", index + 1, set.games_a, set.games_b)));
        }
    }

    let (sets_a, sets_b) = count_set_wins(sets);
    if sets_a.max(sets_b) < SETS_TO_WIN || sets_a == sets_b
    {
        bail!(ErrorKind::NoMajority(sets_a, sets_b));
    }

    Ok(())
}
