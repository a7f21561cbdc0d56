//! Default configuration values

pub struct RoutingDefaults;

impl RoutingDefaults {
    pub const PARAMETER_VALIDATION: bool = false;
    pub const NAMESPACE: &'static str = "app::controllers::";
    pub const HANDLER_SUFFIX: &'static str = "Controller";
    pub const FALLBACK_HANDLER: &'static str = "Home";
    pub const CATCH_ALL_PREFIX: &'static str = "all";
    pub const INDEX_ACTION: &'static str = "Index";
    /// Request paths arrive percent-encoded exactly once by the URI layer.
    pub const DECODE_PASSES: u8 = 1;
    pub const MAX_DECODE_PASSES: u8 = 4;
    pub const ALPHABETIC_SEGMENTS_ONLY: bool = false;
}
