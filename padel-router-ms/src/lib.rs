#[macro_use]
extern crate error_chain;

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

extern crate chrono;
extern crate rocket;
extern crate serde;

extern crate padel_common;

pub mod config;
pub mod error;

use chrono::Utc;

use rocket::http::Status;
use rocket::request::Request;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};

use padel_common::api::league::{MatchSummary, NewLeague, NewPlayer, RosterAddition, StandingsTable};
use padel_common::api::rules::PointsRules;
use padel_common::errors::Result;
use padel_common::model::{League, LeagueId, MatchId, NewMatch, Player, PlayerId};
use padel_common::store::LeagueStore;

use crate::config::RouterConfig;
use crate::error::{ApiResult, ErrorBody};

use std::sync::{Mutex, MutexGuard};

/// The one store every request works on
pub struct RouterState
{
    store: Mutex<LeagueStore>,
}

impl RouterState
{
    pub fn new(store: LeagueStore) -> RouterState
    {
        RouterState {
            store: Mutex::new(store),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LeagueStore>>
    {
        match self.store.lock()
        {
            Ok(store) => Ok(store),
            Err(error) => bail!("Failed to acquire lock because {}", error),
        }
    }
}

#[rocket::get("/leagues")]
fn list_leagues(state: &State<RouterState>) -> ApiResult<Json<Vec<League>>>
{
    let store = state.lock()?;

    Ok(Json(store.leagues().into_iter().cloned().collect()))
}

#[rocket::post("/leagues", format = "json", data = "<new_league>")]
fn create_league(state: &State<RouterState>, new_league: Json<NewLeague>) -> ApiResult<status::Created<Json<League>>>
{
    let league = state.lock()?.create_league(&new_league.name, Utc::now())?;
    info!("Created league: {} ({})", league.name, league.id);

    Ok(status::Created::new(format!("/v1/leagues/{}", league.id)).body(Json(league)))
}

///
/// Deletes a league with its matches and roster, the players themselves stay
#[rocket::delete("/leagues/<league_id>")]
fn delete_league(state: &State<RouterState>, league_id: LeagueId) -> ApiResult<Status>
{
    let league = state.lock()?.delete_league(league_id)?;
    info!("Deleted league: {} ({})", league.name, league.id);

    Ok(Status::NoContent)
}

#[rocket::get("/players")]
fn list_players(state: &State<RouterState>) -> ApiResult<Json<Vec<Player>>>
{
    let store = state.lock()?;

    Ok(Json(store.players().into_iter().cloned().collect()))
}

#[rocket::post("/players", format = "json", data = "<new_player>")]
fn create_player(state: &State<RouterState>, new_player: Json<NewPlayer>) -> ApiResult<status::Created<Json<Player>>>
{
    let player = state.lock()?.create_player(&new_player.name)?;
    info!("Created player: {} ({})", player.name, player.id);

    Ok(status::Created::new(format!("/v1/players/{}", player.id)).body(Json(player)))
}

#[rocket::delete("/players/<player_id>")]
fn delete_player(state: &State<RouterState>, player_id: PlayerId) -> ApiResult<Status>
{
    let player = state.lock()?.delete_player(player_id)?;
    info!("Deleted player: {} ({})", player.name, player.id);

    Ok(Status::NoContent)
}

#[rocket::get("/leagues/<league_id>/players")]
fn league_roster(state: &State<RouterState>, league_id: LeagueId) -> ApiResult<Json<Vec<Player>>>
{
    let store = state.lock()?;

    Ok(Json(store.roster(league_id)?.into_iter().cloned().collect()))
}

///
/// Adds existing players to a league, nothing is added unless every id is known
#[rocket::post("/leagues/<league_id>/players", format = "json", data = "<addition>")]
fn add_roster_players(state: &State<RouterState>, league_id: LeagueId, addition: Json<RosterAddition>) -> ApiResult<Json<Vec<Player>>>
{
    let mut store = state.lock()?;

    store.league(league_id)?;
    for player_id in addition.player_ids.iter()
    {
        store.player(*player_id)?;
    }

    for player_id in addition.player_ids.iter()
    {
        store.add_player_to_league(league_id, *player_id)?;
    }

    Ok(Json(store.roster(league_id)?.into_iter().cloned().collect()))
}

#[rocket::get("/leagues/<league_id>/matches")]
fn list_matches(state: &State<RouterState>, league_id: LeagueId) -> ApiResult<Json<Vec<MatchSummary>>>
{
    let store = state.lock()?;
    let summaries = store.matches(league_id)?
        .into_iter()
        .map(|league_match| MatchSummary::from_match(league_match, &store))
        .collect();

    Ok(Json(summaries))
}

///
/// Validates the sets, works out the winner and stores the match
#[rocket::post("/leagues/<league_id>/matches", format = "json", data = "<new_match>")]
fn record_match(state: &State<RouterState>, league_id: LeagueId, new_match: Json<NewMatch>) -> ApiResult<status::Created<Json<MatchSummary>>>
{
    let mut store = state.lock()?;
    let recorded = store.record_match(league_id, new_match.into_inner(), Utc::now())?;
    info!("Recorded match: {} in league: {}, winner: {}, clean: {}", recorded.id, league_id, recorded.record.winner, recorded.record.clean_win);

    let summary = MatchSummary::from_match(&recorded, &store);

    Ok(status::Created::new(format!("/v1/leagues/{}/matches", league_id)).body(Json(summary)))
}

#[rocket::delete("/matches/<match_id>")]
fn delete_match(state: &State<RouterState>, match_id: MatchId) -> ApiResult<Status>
{
    let league_match = state.lock()?.delete_match(match_id)?;
    info!("Deleted match: {} from league: {}", league_match.id, league_match.league_id);

    Ok(Status::NoContent)
}

///
/// Standings are recomputed on every request, only the snapshot is taken under the lock
#[rocket::get("/leagues/<league_id>/standings")]
fn league_standings(state: &State<RouterState>, league_id: LeagueId) -> ApiResult<Json<StandingsTable>>
{
    let snapshot = state.lock()?.snapshot(league_id)?;
    let standings = snapshot.standings()?;
    trace!("Computed standings for league: {} from {} match(es)", league_id, snapshot.matches.len());

    Ok(Json(StandingsTable::new(snapshot.league, standings)))
}

#[rocket::get("/rules")]
fn rules() -> Json<PointsRules>
{
    Json(PointsRules::current())
}

#[rocket::catch(404)]
fn not_found(request: &Request<'_>) -> status::Custom<Json<ErrorBody>>
{
    status::Custom(Status::NotFound, Json(ErrorBody::new(format!("Nothing found at {}", request.uri()))))
}

#[rocket::catch(default)]
fn default_catcher(status: Status, request: &Request<'_>) -> status::Custom<Json<ErrorBody>>
{
    warn!("Request: {} {} failed with {}", request.method(), request.uri(), status);

    status::Custom(status, Json(ErrorBody::new(status.reason().unwrap_or("Request failed"))))
}

pub fn rocket(store: LeagueStore, config: &RouterConfig) -> Rocket<Build>
{
    let figment = rocket::Config::figment()
        .merge(("address", config.address))
        .merge(("port", config.port))
        /* env_logger does the logging */
        .merge(("log_level", "off"));

    rocket::custom(figment)
        .mount("/v1", rocket::routes![
            list_leagues,
            create_league,
            delete_league,
            list_players,
            create_player,
            delete_player,
            league_roster,
            add_roster_players,
            list_matches,
            record_match,
            delete_match,
            league_standings,
            rules,
        ])
        .register("/", rocket::catchers![not_found, default_catcher])
        .manage(RouterState::new(store))
}
