//! Method groups of the game data API.
//!
//! Endpoint code builds requests against these specs; the per-endpoint
//! response conversion lives with the caller.

use crate::types::Region;
use crate::url::MethodSpec;

const CLASSIC_REGIONS: &[Region] = &[
    Region::Br,
    Region::Eune,
    Region::Euw,
    Region::Kr,
    Region::Lan,
    Region::Las,
    Region::Na,
    Region::Oce,
    Region::Ru,
    Region::Tr,
];

pub const CHAMPION: MethodSpec = MethodSpec::new("champion", "v1.2").regions(CLASSIC_REGIONS);

pub const GAME: MethodSpec = MethodSpec::new("game", "v1.3").regions(CLASSIC_REGIONS);

pub const LEAGUE: MethodSpec = MethodSpec::new("league", "v2.5").regions(CLASSIC_REGIONS);

pub const MATCH: MethodSpec = MethodSpec::new("match", "v2.2").regions(CLASSIC_REGIONS);

pub const MATCH_HISTORY: MethodSpec =
    MethodSpec::new("matchhistory", "v2.2").regions(CLASSIC_REGIONS);

pub const STATS: MethodSpec = MethodSpec::new("stats", "v1.3").regions(CLASSIC_REGIONS);

pub const SUMMONER: MethodSpec = MethodSpec::new("summoner", "v1.4").regions(CLASSIC_REGIONS);

pub const TEAM: MethodSpec = MethodSpec::new("team", "v2.4").regions(CLASSIC_REGIONS);

/// Static game data. Served from the global host and not counted
/// against the rate limit.
pub const STATIC_DATA: MethodSpec = MethodSpec::new("", "v1.2")
    .header("api/lol/static-data")
    .global()
    .unlimited();

/// Shard status. Plain HTTP on its own host, no API key, not rate limited.
pub const STATUS: MethodSpec = MethodSpec::new("", "")
    .header("shards")
    .custom_endpoint("status.leagueoflegends.com")
    .insecure()
    .unlimited();
