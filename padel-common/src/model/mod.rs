use chrono::{DateTime, NaiveDate, Utc};

use std::fmt;

pub type PlayerId = u64;
pub type LeagueId = u64;
pub type MatchId = u64;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player
{
    pub fn new<S>(id: PlayerId, name: S) -> Player
        where S: Into<String>
    {
        Player {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team
{
    A,
    B,
}

impl Team
{
    pub fn opponent(self) -> Team
    {
        match self
        {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl fmt::Display for Team
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self
        {
            Team::A => write!(f, "A"),
            Team::B => write!(f, "B"),
        }
    }
}

/// Games won by each team in one set
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct SetScore {
    pub games_a: u8,
    pub games_b: u8,
}

impl SetScore
{
    pub fn games_for(&self, team: Team) -> u8
    {
        match team
        {
            Team::A => self.games_a,
            Team::B => self.games_b,
        }
    }

    /// The team with strictly more games, `None` for a tied set
    pub fn winner(&self) -> Option<Team>
    {
        if self.games_a > self.games_b
        {
            Some(Team::A)
        } else if self.games_b > self.games_a
        {
            Some(Team::B)
        } else
        {
            None
        }
    }

    /// 6 games to 0 for `team`
    pub fn is_bagel_for(&self, team: Team) -> bool
    {
        self.games_for(team) == 6 && self.games_for(team.opponent()) == 0
    }

    /// An untouched set on the entry form
    pub fn is_unplayed(&self) -> bool
    {
        self.games_a == 0 && self.games_b == 0
    }

    pub fn swapped(&self) -> SetScore
    {
        SetScore::new(self.games_b, self.games_a)
    }
}

/// Everything the standings need to know about one match
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MatchRecord {
    pub team_a: (PlayerId, PlayerId),
    pub team_b: (PlayerId, PlayerId),
    pub winner: Team,
    pub clean_win: bool,
    pub sets: Vec<SetScore>,
}

impl MatchRecord
{
    pub fn team(&self, team: Team) -> (PlayerId, PlayerId)
    {
        match team
        {
            Team::A => self.team_a,
            Team::B => self.team_b,
        }
    }

    pub fn players(&self) -> [PlayerId; 4]
    {
        [self.team_a.0, self.team_a.1, self.team_b.0, self.team_b.1]
    }

    /// The first player listed more than once, if any
    pub fn duplicate_player(&self) -> Option<PlayerId>
    {
        let players = self.players();

        for (index, player) in players.iter().enumerate()
        {
            if players[index + 1..].contains(player)
            {
                return Some(*player);
            }
        }

        None
    }
}

/// A match as recorded in a league, winner and clean-win cached from the sets
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct LeagueMatch {
    pub id: MatchId,
    pub league_id: LeagueId,
    pub date: NaiveDate,
    pub court: Option<String>,
    pub record: MatchRecord,
    pub created_at: DateTime<Utc>,
}

/// A match result as submitted, before validation and resolution
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct NewMatch {
    pub date: NaiveDate,
    #[serde(default)]
    pub court: Option<String>,
    pub team_a: (PlayerId, PlayerId),
    pub team_b: (PlayerId, PlayerId),
    pub sets: Vec<SetScore>,
}
