use chrono::{DateTime, Utc};

use crate::errors::*;
use crate::model::{League, LeagueId, LeagueMatch, MatchId, MatchRecord, NewMatch, Player, PlayerId};
use crate::scoring;
use crate::standings::{self, PlayerStanding};

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

const PLAYERS_PER_MATCH: usize = 4;

/// What the standings of one league are computed from
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueSnapshot
{
    pub league: League,
    pub roster: Vec<Player>,
    pub matches: Vec<MatchRecord>,
}

impl LeagueSnapshot
{
    pub fn standings(&self) -> Result<Vec<PlayerStanding>>
    {
        standings::compute_standings(&self.roster, &self.matches)
    }
}

/// Leagues, players, rosters and recorded matches kept in memory
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct LeagueStore
{
    next_id: u64,
    leagues: BTreeMap<LeagueId, League>,
    players: BTreeMap<PlayerId, Player>,
    memberships: BTreeMap<LeagueId, BTreeSet<PlayerId>>,
    matches: BTreeMap<MatchId, LeagueMatch>,
}

fn clean_name(name: &str) -> Result<String>
{
    let name = name.trim();
    if name.is_empty()
    {
        bail!(ErrorKind::EmptyName);
    }

    Ok(name.to_string())
}

impl LeagueStore
{
    /// Loads a snapshot, refusing one whose records do not hang together
    pub fn from_json_str(raw: &str) -> Result<LeagueStore>
    {
        let mut store: LeagueStore = serde_json::from_str(raw)?;
        store.verify()?;

        Ok(store)
    }

    pub fn from_json_file<P>(path: P) -> Result<LeagueStore>
        where P: AsRef<Path>
    {
        let raw = fs::read_to_string(path.as_ref())
            .chain_err(|| format!("Failed to read store snapshot: {}", path.as_ref().display()))?;

        LeagueStore::from_json_str(&raw)
    }

    pub fn to_json_string(&self) -> Result<String>
    {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn verify(&mut self) -> Result<()>
    {
        for (league_id, league) in self.leagues.iter()
        {
            if *league_id != league.id
            {
                bail!(ErrorKind::CorruptSnapshot(format!("league: {} is filed under id: {}", league.id, league_id)));
            }

            if !self.memberships.contains_key(league_id)
            {
                bail!(ErrorKind::CorruptSnapshot(format!("league: {} has no roster", league_id)));
            }
        }

        for (player_id, player) in self.players.iter()
        {
            if *player_id != player.id
            {
                bail!(ErrorKind::CorruptSnapshot(format!("player: {} is filed under id: {}", player.id, player_id)));
            }
        }

        for (league_id, roster) in self.memberships.iter()
        {
            if !self.leagues.contains_key(league_id)
            {
                bail!(ErrorKind::CorruptSnapshot(format!("roster of unknown league: {}", league_id)));
            }

            if let Some(player_id) = roster.iter().find(|player_id| !self.players.contains_key(*player_id))
            {
                bail!(ErrorKind::CorruptSnapshot(format!("roster of league: {} lists unknown player: {}", league_id, player_id)));
            }
        }

        for (match_id, league_match) in self.matches.iter()
        {
            if *match_id != league_match.id
            {
                bail!(ErrorKind::CorruptSnapshot(format!("match: {} is filed under id: {}", league_match.id, match_id)));
            }

            let roster = self.memberships.get(&league_match.league_id)
                .ok_or_else(|| ErrorKind::CorruptSnapshot(format!("match: {} belongs to unknown league: {}", match_id, league_match.league_id)))?;

            let record = &league_match.record;
            if let Some(player_id) = record.duplicate_player()
            {
                bail!(ErrorKind::CorruptSnapshot(format!("match: {} lists player: {} more than once", match_id, player_id)));
            }

            if let Some(player_id) = record.players().iter().find(|player_id| !roster.contains(*player_id))
            {
                bail!(ErrorKind::CorruptSnapshot(format!("match: {} lists player: {} who is not on the roster", match_id, player_id)));
            }

            let resolved = scoring::validate_sets(&record.sets)
                .and_then(|_| scoring::resolve(&record.sets))
                .chain_err(|| ErrorKind::CorruptSnapshot(format!("match: {} has invalid sets", match_id)))?;

            if resolved != (record.winner, record.clean_win)
            {
                bail!(ErrorKind::CorruptSnapshot(format!("match: {} is stored as {:?} but its sets give {:?}", match_id, (record.winner, record.clean_win), resolved)));
            }
        }

        let highest_id = self.leagues.keys()
            .chain(self.players.keys())
            .chain(self.matches.keys())
            .max()
            .cloned()
            .unwrap_or(0);

        if self.next_id < highest_id
        {
            warn!("Snapshot counts ids from: {} but uses up to: {}, continuing from there", self.next_id, highest_id);
            self.next_id = highest_id;
        }

        Ok(())
    }

    fn allocate_id(&mut self) -> u64
    {
        self.next_id += 1;
        self.next_id
    }

    pub fn create_league(&mut self, name: &str, now: DateTime<Utc>) -> Result<League>
    {
        let name = clean_name(name)?;
        if self.leagues.values().any(|league| league.name == name)
        {
            bail!(ErrorKind::DuplicateName(name));
        }

        let league = League::new(self.allocate_id(), name, now);
        self.leagues.insert(league.id, league.clone());
        self.memberships.insert(league.id, BTreeSet::new());

        debug!("Created league: {:?}", league);
        Ok(league)
    }

    /// Newest first
    pub fn leagues(&self) -> Vec<&League>
    {
        let mut leagues: Vec<&League> = self.leagues.values().collect();
        leagues.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        leagues
    }

    pub fn league(&self, league_id: LeagueId) -> Result<&League>
    {
        Ok(self.leagues.get(&league_id)
            .ok_or(ErrorKind::NoSuchLeague(league_id))?)
    }

    /// Removes the league along with its matches and roster, players stay
    pub fn delete_league(&mut self, league_id: LeagueId) -> Result<League>
    {
        let league = self.leagues.remove(&league_id)
            .ok_or(ErrorKind::NoSuchLeague(league_id))?;

        self.memberships.remove(&league_id);
        let before = self.matches.len();
        self.matches.retain(|_, league_match| league_match.league_id != league_id);

        debug!("Deleted league: {:?} and {} match(es)", league, before - self.matches.len());
        Ok(league)
    }

    pub fn create_player(&mut self, name: &str) -> Result<Player>
    {
        let name = clean_name(name)?;
        if self.players.values().any(|player| player.name == name)
        {
            bail!(ErrorKind::DuplicateName(name));
        }

        let player = Player::new(self.allocate_id(), name);
        self.players.insert(player.id, player.clone());

        debug!("Created player: {:?}", player);
        Ok(player)
    }

    /// Ordered by name
    pub fn players(&self) -> Vec<&Player>
    {
        let mut players: Vec<&Player> = self.players.values().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        players
    }

    pub fn player(&self, player_id: PlayerId) -> Result<&Player>
    {
        Ok(self.players.get(&player_id)
            .ok_or(ErrorKind::NoSuchPlayer(player_id))?)
    }

    /// Removes the player and every league membership, refused while recorded matches name the player
    pub fn delete_player(&mut self, player_id: PlayerId) -> Result<Player>
    {
        self.player(player_id)?;

        let played = self.matches.values()
            .filter(|league_match| league_match.record.players().contains(&player_id))
            .count();
        if played > 0
        {
            bail!(ErrorKind::PlayerHasMatches(player_id, played));
        }

        let player = self.players.remove(&player_id)
            .ok_or(ErrorKind::NoSuchPlayer(player_id))?;

        for roster in self.memberships.values_mut()
        {
            roster.remove(&player_id);
        }

        debug!("Deleted player: {:?}", player);
        Ok(player)
    }

    /// Adding a player already on the roster does nothing
    pub fn add_player_to_league(&mut self, league_id: LeagueId, player_id: PlayerId) -> Result<()>
    {
        self.player(player_id)?;
        let roster = self.memberships.get_mut(&league_id)
            .ok_or(ErrorKind::NoSuchLeague(league_id))?;

        if roster.insert(player_id)
        {
            debug!("Added player: {} to league: {}", player_id, league_id);
        }

        Ok(())
    }

    /// Ordered by player id
    pub fn roster(&self, league_id: LeagueId) -> Result<Vec<&Player>>
    {
        let roster = self.memberships.get(&league_id)
            .ok_or(ErrorKind::NoSuchLeague(league_id))?;

        Ok(roster.iter()
            .filter_map(|player_id| self.players.get(player_id))
            .collect())
    }

    /// Validates the sets and players, resolves the winner and stores the match
    pub fn record_match(&mut self, league_id: LeagueId, new_match: NewMatch, now: DateTime<Utc>) -> Result<LeagueMatch>
    {
        let roster = self.memberships.get(&league_id)
            .ok_or(ErrorKind::NoSuchLeague(league_id))?;

        if roster.len() < PLAYERS_PER_MATCH
        {
            bail!(ErrorKind::RosterTooSmall(league_id, roster.len()));
        }

        let sets = scoring::normalize_sets(new_match.sets);
        scoring::validate_sets(&sets)?;
        let (winner, clean_win) = scoring::resolve(&sets)?;

        let record = MatchRecord::new(new_match.team_a, new_match.team_b, winner, clean_win, sets);
        if let Some(player) = record.duplicate_player()
        {
            bail!(ErrorKind::DuplicatePlayer(player));
        }

        for player in record.players().iter()
        {
            if !roster.contains(player)
            {
                bail!(ErrorKind::NotInRoster(*player, league_id));
            }
        }

        let court = new_match.court
            .map(|court| court.trim().to_string())
            .filter(|court| !court.is_empty());

        let league_match = LeagueMatch::new(self.allocate_id(), league_id, new_match.date, court, record, now);
        self.matches.insert(league_match.id, league_match.clone());

        debug!("Recorded match: {:?}", league_match);
        Ok(league_match)
    }

    /// Newest first
    pub fn matches(&self, league_id: LeagueId) -> Result<Vec<&LeagueMatch>>
    {
        self.league(league_id)?;

        let mut matches: Vec<&LeagueMatch> = self.matches.values()
            .filter(|league_match| league_match.league_id == league_id)
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        Ok(matches)
    }

    /// Removes the match along with its sets
    pub fn delete_match(&mut self, match_id: MatchId) -> Result<LeagueMatch>
    {
        let league_match = self.matches.remove(&match_id)
            .ok_or(ErrorKind::NoSuchMatch(match_id))?;

        debug!("Deleted match: {:?}", league_match);
        Ok(league_match)
    }

    pub fn snapshot(&self, league_id: LeagueId) -> Result<LeagueSnapshot>
    {
        let league = self.league(league_id)?.clone();
        let roster = self.roster(league_id)?
            .into_iter()
            .cloned()
            .collect();
        let matches = self.matches(league_id)?
            .into_iter()
            .map(|league_match| league_match.record.clone())
            .collect();

        Ok(LeagueSnapshot {
            league,
            roster,
            matches,
        })
    }

    pub fn standings(&self, league_id: LeagueId) -> Result<Vec<PlayerStanding>>
    {
        self.snapshot(league_id)?.standings()
    }
}
