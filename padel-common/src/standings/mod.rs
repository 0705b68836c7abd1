use crate::errors::*;
use crate::model::{MatchRecord, Player, PlayerId, Team};
use crate::scoring::{self, WIN_POINTS, LOSS_POINTS, CLEAN_WIN_POINTS, BAGEL_POINTS};

use std::cmp::Ordering;
use std::collections::HashMap;

/// One row of a league's standings table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlayerStanding
{
    pub player: Player,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub clean_wins: u32,
    pub bagels_for: u32,
    pub bagels_against: u32,
    pub points: i32,
}

impl PlayerStanding
{
    pub fn default(player: Player) -> PlayerStanding
    {
        PlayerStanding {
            player,
            matches_played: 0,
            wins: 0,
            losses: 0,
            clean_wins: 0,
            bagels_for: 0,
            bagels_against: 0,
            points: 0,
        }
    }

    /// Adds one match from this player's point of view
    ///
    /// # Arguments
    /// * `won` If the player's team won the match
    /// * `clean_win` If the match was won 2-0, whoever won it
    /// * `bagels_for` 6-0 sets won by the player's team
    /// * `bagels_against` 6-0 sets won by the other team
    pub fn add_match(&mut self, won: bool, clean_win: bool, bagels_for: u32, bagels_against: u32)
    {
        self.matches_played += 1;

        if won
        {
            self.wins += 1;
            self.points += WIN_POINTS;

            if clean_win
            {
                self.clean_wins += 1;
                self.points += CLEAN_WIN_POINTS;
            }
        } else
        {
            self.losses += 1;
            self.points += LOSS_POINTS;
        }

        self.bagels_for += bagels_for;
        self.bagels_against += bagels_against;
        self.points += BAGEL_POINTS * (bagels_for as i32 - bagels_against as i32);
    }
}

/// Orders two rows best first: points, then wins, then bagels won, then player id
pub fn compare_standings(a: &PlayerStanding, b: &PlayerStanding) -> Ordering
{
    b.points.cmp(&a.points)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| b.bagels_for.cmp(&a.bagels_for))
        .then_with(|| a.player.id.cmp(&b.player.id))
}

/// Computes the standings of a league from its whole match history
///
/// # Arguments
/// * `roster` Every player of the league, players without matches still get a row
/// * `matches` The league's matches, in any order
///
/// # Return
/// * one row per roster player, best first
pub fn compute_standings(roster: &[Player], matches: &[MatchRecord]) -> Result<Vec<PlayerStanding>>
{
    let mut stats: HashMap<PlayerId, PlayerStanding> = roster.iter()
        .map(|player| (player.id, PlayerStanding::default(player.clone())))
        .collect();

    for record in matches.iter()
    {
        if let Some(player) = record.duplicate_player()
        {
            bail!(ErrorKind::DuplicatePlayer(player));
        }

        for player in record.players().iter()
        {
            if !stats.contains_key(player)
            {
                error!("Match: {:?} references player: {} outside of the roster", record, player);
                bail!(ErrorKind::UnknownPlayer(*player));
            }
        }

        let (bagels_a, bagels_b) = scoring::count_bagels(&record.sets);

        for team in [Team::A, Team::B].iter()
        {
            let (bagels_for, bagels_against) = match team
            {
                Team::A => (bagels_a, bagels_b),
                Team::B => (bagels_b, bagels_a),
            };
            let won = record.winner == *team;
            let (first, second) = record.team(*team);

            for player in [first, second].iter()
            {
                match stats.get_mut(player)
                {
                    Some(standing) => standing.add_match(won, record.clean_win, bagels_for, bagels_against),
                    None => bail!(ErrorKind::UnknownPlayer(*player)),
                }
            }
        }

        trace!("Folded match: {:?}", record);
    }

    let mut standings: Vec<PlayerStanding> = stats.into_iter()
        .map(|(_, standing)| standing)
        .collect();
    standings.sort_by(compare_standings);

    Ok(standings)
}
