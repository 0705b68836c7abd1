use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8000;

/// Everything the router reads from its environment at startup
#[derive(Debug, Clone, PartialEq)]
pub struct RouterConfig
{
    pub address: IpAddr,
    pub port: u16,
    /// JSON snapshot of a `LeagueStore` to start from
    pub seed_file: Option<PathBuf>,
}

impl Default for RouterConfig
{
    fn default() -> RouterConfig
    {
        RouterConfig {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            seed_file: None,
        }
    }
}

impl RouterConfig
{
    pub fn from_env() -> RouterConfig
    {
        RouterConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Unparsable values fall back to the defaults
    pub fn from_lookup<F>(lookup: F) -> RouterConfig
        where F: Fn(&str) -> Option<String>
    {
        let defaults = RouterConfig::default();

        let address = match lookup("PADEL_ADDRESS").map(|raw| raw.parse::<IpAddr>())
        {
            Some(Ok(address)) => address,
            Some(Err(error)) =>
            {
                warn!("Ignoring PADEL_ADDRESS because {}", error);
                defaults.address
            },
            None => defaults.address,
        };

        let port = match lookup("PADEL_PORT").map(|raw| raw.parse::<u16>())
        {
            Some(Ok(port)) => port,
            Some(Err(error)) =>
            {
                warn!("Ignoring PADEL_PORT because {}", error);
                defaults.port
            },
            None => defaults.port,
        };

        let seed_file = lookup("PADEL_SEED_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        RouterConfig {
            address,
            port,
            seed_file,
        }
    }
}
