/// Sessions in a series (anchor included) when the rule gives no count.
pub const DEFAULT_OCCURRENCES: u32 = 52;

pub const CONFIG_DIR_NAME: &str = "coachcal";
pub const CONFIG_FILE_NAME: &str = "config.toml";
