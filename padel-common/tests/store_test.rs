extern crate chrono;
extern crate padel_common;
#[macro_use]
extern crate serde_json;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use padel_common::api::league::MatchSummary;
use padel_common::errors::ErrorKind;
use padel_common::model::{LeagueId, NewMatch, PlayerId, SetScore, Team};
use padel_common::store::LeagueStore;

use serde_json::Value;

use std::env;
use std::fs;

fn now() -> DateTime<Utc>
{
    Utc.with_ymd_and_hms(2025, 10, 1, 18, 0, 0).unwrap()
}

fn date(day: u32) -> NaiveDate
{
    NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
}

fn new_match(day: u32, team_a: (PlayerId, PlayerId), team_b: (PlayerId, PlayerId), scores: &[(u8, u8)]) -> NewMatch
{
    let sets = scores.iter()
        .map(|&(games_a, games_b)| SetScore::new(games_a, games_b))
        .collect();

    NewMatch::new(date(day), None, team_a, team_b, sets)
}

/// A league with four players on its roster, player ids returned in roster order
fn league_of_four(store: &mut LeagueStore) -> (LeagueId, Vec<PlayerId>)
{
    let league = store.create_league("Padel Mafia 8", now()).unwrap();

    let mut players = Vec::new();
    for name in ["Ana", "Bea", "Carla", "Dani"].iter()
    {
        let player = store.create_player(name).unwrap();
        store.add_player_to_league(league.id, player.id).unwrap();
        players.push(player.id);
    }

    (league.id, players)
}

#[test]
fn test_league_and_player_names_are_unique()
{
    let mut store = LeagueStore::default();

    store.create_league("  Autumn  ", now()).unwrap();
    match *store.create_league("Autumn", now()).unwrap_err().kind()
    {
        ErrorKind::DuplicateName(ref name) => assert_eq!(name, "Autumn"),
        ref other => panic!("Expected DuplicateName but got {:?}", other),
    }

    store.create_player("Ana").unwrap();
    assert!(store.create_player("Ana ").is_err());

    match *store.create_player("   ").unwrap_err().kind()
    {
        ErrorKind::EmptyName => {},
        ref other => panic!("Expected EmptyName but got {:?}", other),
    }
}

#[test]
fn test_leagues_listed_newest_first()
{
    let mut store = LeagueStore::default();

    store.create_league("Spring", now()).unwrap();
    store.create_league("Summer", now() + Duration::days(1)).unwrap();
    store.create_league("Winter", now() - Duration::days(1)).unwrap();

    let names: Vec<&str> = store.leagues().iter().map(|league| league.name.as_str()).collect();
    assert_eq!(names, vec!("Summer", "Spring", "Winter"));
}

#[test]
fn test_record_match_resolves_winner()
{
    let mut store = LeagueStore::default();
    let (league_id, p) = league_of_four(&mut store);

    let mut submitted = new_match(2, (p[0], p[1]), (p[2], p[3]), &[(4, 6), (6, 0), (3, 6)]);
    submitted.court = Some(" Court 2 ".to_string());
    let recorded = store.record_match(league_id, submitted, now()).unwrap();

    assert_eq!(recorded.record.winner, Team::B);
    assert!(!recorded.record.clean_win);
    assert_eq!(recorded.court, Some("Court 2".to_string()));
    assert_eq!(store.matches(league_id).unwrap().len(), 1);
}

#[test]
fn test_unplayed_third_set_is_not_stored()
{
    let mut store = LeagueStore::default();
    let (league_id, p) = league_of_four(&mut store);

    let recorded = store.record_match(league_id, new_match(2, (p[0], p[1]), (p[2], p[3]), &[(6, 4), (6, 3), (0, 0)]), now()).unwrap();

    assert_eq!(recorded.record.sets.len(), 2);
    assert!(recorded.record.clean_win);
}

#[test]
fn test_record_match_rejections()
{
    let mut store = LeagueStore::default();
    let (league_id, p) = league_of_four(&mut store);
    let outsider = store.create_player("Eva").unwrap().id;

    let split = store.record_match(league_id, new_match(2, (p[0], p[1]), (p[2], p[3]), &[(6, 4), (4, 6)]), now());
    match *split.unwrap_err().kind()
    {
        ErrorKind::NoMajority(1, 1) => {},
        ref other => panic!("Expected NoMajority but got {:?}", other),
    }

    let twice = store.record_match(league_id, new_match(2, (p[0], p[1]), (p[1], p[3]), &[(6, 4), (6, 4)]), now());
    match *twice.unwrap_err().kind()
    {
        ErrorKind::DuplicatePlayer(player) => assert_eq!(player, p[1]),
        ref other => panic!("Expected DuplicatePlayer but got {:?}", other),
    }

    let stranger = store.record_match(league_id, new_match(2, (p[0], p[1]), (p[2], outsider), &[(6, 4), (6, 4)]), now());
    match *stranger.unwrap_err().kind()
    {
        ErrorKind::NotInRoster(player, league) => assert_eq!((player, league), (outsider, league_id)),
        ref other => panic!("Expected NotInRoster but got {:?}", other),
    }

    assert!(store.matches(league_id).unwrap().is_empty());
}

#[test]
fn test_matches_need_four_rostered_players()
{
    let mut store = LeagueStore::default();
    let league = store.create_league("Tiny", now()).unwrap();
    for name in ["Ana", "Bea", "Carla"].iter()
    {
        let player = store.create_player(name).unwrap();
        store.add_player_to_league(league.id, player.id).unwrap();
    }

    match *store.record_match(league.id, new_match(2, (1, 2), (3, 4), &[(6, 4), (6, 4)]), now()).unwrap_err().kind()
    {
        ErrorKind::RosterTooSmall(_, 3) => {},
        ref other => panic!("Expected RosterTooSmall but got {:?}", other),
    }
}

#[test]
fn test_adding_player_twice_keeps_one_membership()
{
    let mut store = LeagueStore::default();
    let (league_id, p) = league_of_four(&mut store);

    store.add_player_to_league(league_id, p[0]).unwrap();

    assert_eq!(store.roster(league_id).unwrap().len(), 4);
    assert!(store.add_player_to_league(league_id, 999).is_err());
    assert!(store.add_player_to_league(999, p[0]).is_err());
}

#[test]
fn test_standings_from_recorded_matches()
{
    let mut store = LeagueStore::default();
    let (league_id, p) = league_of_four(&mut store);

    store.record_match(league_id, new_match(2, (p[0], p[1]), (p[2], p[3]), &[(6, 0), (6, 4)]), now()).unwrap();
    let standings = store.standings(league_id).unwrap();

    let points: Vec<(PlayerId, i32)> = standings.iter().map(|standing| (standing.player.id, standing.points)).collect();
    assert_eq!(points, vec!((p[0], 4), (p[1], 4), (p[2], -2), (p[3], -2)));
}

#[test]
fn test_deleting_league_cascades()
{
    let mut store = LeagueStore::default();
    let (league_id, p) = league_of_four(&mut store);
    let recorded = store.record_match(league_id, new_match(2, (p[0], p[1]), (p[2], p[3]), &[(6, 2), (6, 2)]), now()).unwrap();

    store.delete_league(league_id).unwrap();

    assert!(store.leagues().is_empty());
    assert!(store.roster(league_id).is_err());
    assert!(store.delete_match(recorded.id).is_err());
    /* players are global */
    assert_eq!(store.players().len(), 4);
}

#[test]
fn test_deleting_match_updates_standings()
{
    let mut store = LeagueStore::default();
    let (league_id, p) = league_of_four(&mut store);
    let first = store.record_match(league_id, new_match(2, (p[0], p[1]), (p[2], p[3]), &[(6, 2), (6, 2)]), now()).unwrap();
    store.record_match(league_id, new_match(3, (p[2], p[3]), (p[0], p[1]), &[(6, 2), (6, 2)]), now()).unwrap();

    store.delete_match(first.id).unwrap();

    let matches = store.matches(league_id).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].date, date(3));

    let standings = store.standings(league_id).unwrap();
    assert_eq!(standings[0].player.id, p[2]);
    assert_eq!(standings[0].points, 3);
}

#[test]
fn test_player_with_matches_cannot_be_deleted()
{
    let mut store = LeagueStore::default();
    let (league_id, p) = league_of_four(&mut store);
    store.record_match(league_id, new_match(2, (p[0], p[1]), (p[2], p[3]), &[(6, 2), (6, 2)]), now()).unwrap();

    match *store.delete_player(p[3]).unwrap_err().kind()
    {
        ErrorKind::PlayerHasMatches(player, 1) => assert_eq!(player, p[3]),
        ref other => panic!("Expected PlayerHasMatches but got {:?}", other),
    }

    /* nothing changed, the standings still read */
    assert_eq!(store.roster(league_id).unwrap().len(), 4);
    assert_eq!(store.standings(league_id).unwrap().len(), 4);

    let summary = MatchSummary::from_match(store.matches(league_id).unwrap()[0], &store);
    assert_eq!(summary.team_b[1].name, Some("Dani".to_string()));
    assert_eq!(summary.sets[1].number, 2);
}

#[test]
fn test_player_without_matches_leaves_every_roster()
{
    let mut store = LeagueStore::default();
    let (league_id, p) = league_of_four(&mut store);
    let second = store.create_league("Padel Mafia 9", now()).unwrap();
    store.add_player_to_league(second.id, p[0]).unwrap();

    assert_eq!(store.delete_player(p[0]).unwrap().name, "Ana");

    assert_eq!(store.roster(league_id).unwrap().len(), 3);
    assert!(store.roster(second.id).unwrap().is_empty());
    match *store.delete_player(p[0]).unwrap_err().kind()
    {
        ErrorKind::NoSuchPlayer(_) => {},
        ref other => panic!("Expected NoSuchPlayer but got {:?}", other),
    }
}

#[test]
fn test_snapshot_survives_json_file()
{
    let mut store = LeagueStore::default();
    let (league_id, p) = league_of_four(&mut store);
    store.record_match(league_id, new_match(2, (p[0], p[2]), (p[1], p[3]), &[(6, 0), (3, 6), (7, 5)]), now()).unwrap();

    let path = env::temp_dir().join(format!("padel-store-{}.json", std::process::id()));
    fs::write(&path, store.to_json_string().unwrap()).unwrap();
    let loaded = LeagueStore::from_json_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded, store);

    /* ids keep counting from where the snapshot stopped */
    let mut loaded = loaded;
    let player = loaded.create_player("Eva").unwrap();
    assert!(player.id > league_id);
    assert!(p.iter().all(|id| *id < player.id));
}

#[test]
fn test_missing_snapshot_file_fails()
{
    assert!(LeagueStore::from_json_file("/nonexistent/padel-store.json").is_err());
}

/// League 1 with players 2 to 5 and match 6 won 2-0 by 2 & 3
fn snapshot_json() -> Value
{
    let mut store = LeagueStore::default();
    let (league_id, p) = league_of_four(&mut store);
    store.record_match(league_id, new_match(2, (p[0], p[1]), (p[2], p[3]), &[(6, 2), (6, 2)]), now()).unwrap();

    serde_json::from_str(&store.to_json_string().unwrap()).unwrap()
}

fn assert_corrupt<F>(edit: F)
    where F: FnOnce(&mut Value)
{
    let mut snapshot = snapshot_json();
    edit(&mut snapshot);

    match LeagueStore::from_json_str(&snapshot.to_string())
    {
        Err(error) => match *error.kind()
        {
            ErrorKind::CorruptSnapshot(_) => {},
            ref other => panic!("Expected CorruptSnapshot but got {:?}", other),
        },
        Ok(_) => panic!("Expected {} to be refused", snapshot),
    }
}

#[test]
fn test_snapshot_with_stale_next_id_keeps_counting()
{
    let mut snapshot = snapshot_json();
    snapshot["next_id"] = json!(0);

    let mut store = LeagueStore::from_json_str(&snapshot.to_string()).unwrap();
    let player = store.create_player("Eva").unwrap();

    assert_eq!(player.id, 7);
    assert_eq!(store.player(2).unwrap().name, "Ana");
    assert_eq!(store.players().len(), 5);
}

#[test]
fn test_inconsistent_snapshots_are_refused()
{
    /* league without a roster */
    assert_corrupt(|snapshot| { snapshot["memberships"].as_object_mut().unwrap().remove("1"); });
    /* roster naming a player that does not exist */
    assert_corrupt(|snapshot| snapshot["memberships"]["1"].as_array_mut().unwrap().push(json!(99)));
    /* record filed under another id */
    assert_corrupt(|snapshot| snapshot["players"]["2"]["id"] = json!(3));
    /* match of a league that does not exist */
    assert_corrupt(|snapshot| snapshot["matches"]["6"]["league_id"] = json!(42));
    /* same player on both teams */
    assert_corrupt(|snapshot| snapshot["matches"]["6"]["record"]["team_b"] = json!([2, 5]));
    /* player off the roster */
    assert_corrupt(|snapshot| snapshot["memberships"]["1"] = json!([2, 3, 4]));
    /* a single set */
    assert_corrupt(|snapshot| snapshot["matches"]["6"]["record"]["sets"] = json!([{"games_a": 6, "games_b": 2}]));
    /* cached winner disagreeing with the sets */
    assert_corrupt(|snapshot| snapshot["matches"]["6"]["record"]["winner"] = json!("B"));
    assert_corrupt(|snapshot| snapshot["matches"]["6"]["record"]["clean_win"] = json!(false));
}
