use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{League, LeagueMatch, MatchId, Player, PlayerId, Team};
use crate::standings::PlayerStanding;
use crate::store::LeagueStore;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct NewLeague
{
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct NewPlayer
{
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct RosterAddition
{
    pub player_ids: Vec<PlayerId>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct StandingsTable
{
    pub league: League,
    pub standings: Vec<PlayerStanding>,
}

/// A player as listed on a match, `name` is `None` once the player was removed
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MatchPlayer
{
    pub id: PlayerId,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct NumberedSet
{
    pub number: u8,
    pub games_a: u8,
    pub games_b: u8,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MatchSummary
{
    pub id: MatchId,
    pub date: NaiveDate,
    pub court: Option<String>,
    pub team_a: Vec<MatchPlayer>,
    pub team_b: Vec<MatchPlayer>,
    pub winner: Team,
    pub clean_win: bool,
    pub sets: Vec<NumberedSet>,
    pub created_at: DateTime<Utc>,
}

fn match_player(store: &LeagueStore, id: PlayerId) -> MatchPlayer
{
    MatchPlayer::new(id, store.player(id).ok().map(|player: &Player| player.name.clone()))
}

impl MatchSummary
{
    pub fn from_match(league_match: &LeagueMatch, store: &LeagueStore) -> MatchSummary
    {
        let record = &league_match.record;
        let (a1, a2) = record.team_a;
        let (b1, b2) = record.team_b;

        let sets = record.sets.iter()
            .enumerate()
            .map(|(index, set)| NumberedSet::new(index as u8 + 1, set.games_a, set.games_b))
            .collect();

        MatchSummary {
            id: league_match.id,
            date: league_match.date,
            court: league_match.court.clone(),
            team_a: vec!(match_player(store, a1), match_player(store, a2)),
            team_b: vec!(match_player(store, b1), match_player(store, b2)),
            winner: record.winner,
            clean_win: record.clean_win,
            sets,
            created_at: league_match.created_at,
        }
    }
}
