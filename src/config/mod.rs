mod manager;

pub use manager::{
    BackendConfig, ConfigFile, ConfigManager, HistoryConfig, PoolConfig, ResolveOptions,
    ResolvedConfig, resolve_config,
};
