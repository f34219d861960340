/// Tunables for the content scanner

/// Period of the full scan tick
pub const TICK_INTERVAL_MS: i32 = 500;

/// Videos shorter than this are treated as promotional segments
pub const SHORT_AD_MAX_SECS: f64 = 70.0;

/// Consecutive unchanged ticks tolerated before a reload
pub const STALL_TICK_LIMIT: u32 = 6;

/// Positioned overlays above this stacking order are removed
pub const OVERLAY_Z_INDEX_FLOOR: i64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub tick_interval_ms: i32,
    pub short_ad_max_secs: f64,
    pub stall_tick_limit: u32,
    pub overlay_z_index_floor: i64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            tick_interval_ms: TICK_INTERVAL_MS,
            short_ad_max_secs: SHORT_AD_MAX_SECS,
            stall_tick_limit: STALL_TICK_LIMIT,
            overlay_z_index_floor: OVERLAY_Z_INDEX_FLOOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();

        assert_eq!(config.tick_interval_ms, 500);
        assert_eq!(config.short_ad_max_secs, 70.0);
        assert_eq!(config.stall_tick_limit, 6);
        assert_eq!(config.overlay_z_index_floor, 1000);
    }
}
