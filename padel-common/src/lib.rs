// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate derive_new;

#[macro_use]
extern crate log;

extern crate chrono;
extern crate serde;
extern crate serde_json;

pub mod model;
pub mod scoring;
pub mod standings;
pub mod store;
pub mod api;

/*
    Common error_chain for all of lib to use so the ? operator passes things around real well.

    Add `use crate::errors::*;` to the sub-modules to gain access to it.
*/
pub mod errors {
    use crate::model::{LeagueId, MatchId, PlayerId};

    // Create the Error, ErrorKind, ResultExt, and Result types
    error_chain!{
        foreign_links {
            Json(::serde_json::Error);
        }

        errors {
            InvalidSets(reason: String) {
                description("invalid set scores")
                display("Invalid set scores: {}", reason)
            }
            NoMajority(sets_a: usize, sets_b: usize) {
                description("no team won a strict majority of sets")
                display("No team won a strict majority of sets ({}-{})", sets_a, sets_b)
            }
            UnknownPlayer(player: PlayerId) {
                description("match references a player outside the roster")
                display("Match references player: {} who is not in the roster", player)
            }
            DuplicatePlayer(player: PlayerId) {
                description("player appears more than once in a match")
                display("Player: {} appears more than once in the match", player)
            }
            NoSuchLeague(league: LeagueId) {
                description("league not found")
                display("League: {} was not found", league)
            }
            NoSuchPlayer(player: PlayerId) {
                description("player not found")
                display("Player: {} was not found", player)
            }
            NoSuchMatch(id: MatchId) {
                description("match not found")
                display("Match: {} was not found", id)
            }
            EmptyName {
                description("name is empty")
                display("Name must not be empty")
            }
            DuplicateName(name: String) {
                description("name already taken")
                display("Name: '{}' is already taken", name)
            }
            NotInRoster(player: PlayerId, league: LeagueId) {
                description("player is not on the league roster")
                display("Player: {} is not on the roster of league: {}", player, league)
            }
            RosterTooSmall(league: LeagueId, size: usize) {
                description("league roster is too small for a match")
                display("League: {} has {} players, at least 4 are needed for a match", league, size)
            }
            PlayerHasMatches(player: PlayerId, matches: usize) {
                description("player has recorded matches")
                display("Player: {} played in {} recorded match(es) and cannot be removed", player, matches)
            }
            CorruptSnapshot(reason: String) {
                description("store snapshot is inconsistent")
                display("Store snapshot is inconsistent: {}", reason)
            }
        }
    }
}
