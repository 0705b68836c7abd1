#[macro_use]
extern crate log;
extern crate env_logger;
extern crate error_chain;

use env_logger::{Builder, Target};

use error_chain::ChainedError;

extern crate rocket;

extern crate padel_common;
extern crate padel_router_ms;

use padel_common::store::LeagueStore;

use padel_router_ms::config::RouterConfig;

use std::env;

#[rocket::main]
async fn main()
{
    /* Log */
    let mut builder = Builder::new();
    builder.target(Target::Stdout);
    if let Ok(filters) = env::var("RUST_LOG")
    {
        builder.parse(&filters);
    }
    builder.init();

    let config = RouterConfig::from_env();
    info!("Starting router with {:?}", config);

    let store = match config.seed_file
    {
        Some(ref path) =>
        {
            let store = match LeagueStore::from_json_file(path)
            {
                Ok(store) => store,
                Err(error) =>
                {
                    error!("Failed to load seed file because {}", error.display_chain());
                    return;
                },
            };
            info!("Loaded {} league(s) and {} player(s) from {}", store.leagues().len(), store.players().len(), path.display());
            store
        },
        None => LeagueStore::default(),
    };

    if let Err(error) = padel_router_ms::rocket(store, &config).launch().await
    {
        error!("Router stopped because {}", error);
    }
}
