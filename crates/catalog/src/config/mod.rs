mod myconfig;

pub use self::myconfig::{
    Config, DEFAULT_SELLABLE_STATUS, DEFAULT_UPSTREAM_URL, DatabaseConfig, UpstreamConfig,
    sellable_status_from,
};
