/// Static selector tables and the stacking-order heuristic for overlay ads
use regex::Regex;
use std::sync::OnceLock;

/// Player-level ad containers removed on every pass
pub const PLAYER_AD_SELECTORS: &[&str] = &[
    ".video-ads",
    ".ytp-ad-module",
    "#player-ads",
    "ytd-display-ad-renderer",
    "ytd-promoted-video-renderer",
    "ytd-companion-slot-renderer",
    "ytd-action-companion-ad-renderer",
];

/// Skip controls shown over skippable ads
pub const SKIP_BUTTON_SELECTOR: &str = ".ytp-ad-skip-button, .ytp-ad-skip-button-modern";

/// The page's playback element
pub const VIDEO_SELECTOR: &str = "video";

/// Containers the universal sweep must leave intact
pub const UNIVERSAL_PROTECTED: &str = "#movie_player, .video-ads, ytd-display-ad-renderer";

/// Containers the overlay sweep must leave intact
pub const OVERLAY_PROTECTED: &str = "#movie_player, .ytp-ad-module";

/// Inline-positioned layers considered by the overlay sweep
pub const OVERLAY_CANDIDATES: &str =
    "div[style*='position: fixed'], div[style*='position: absolute']";

/// Generic banner, overlay and sponsored-content class patterns
pub const UNIVERSAL_AD_SELECTORS: &[&str] = &[
    ".ad-banner",
    ".ad-container",
    ".popup-ad",
    ".overlay-ad",
    ".sponsored-content",
    ".ad-frame",
    ".ad-slot",
    ".ad-box",
    ".ad-label",
    ".sponsored-ad",
    ".ad-marketing",
    ".ad-wrapper",
    ".promotional-ad",
    ".ad-section",
    ".ad-feature",
    ".ad-display",
    ".ad-unit",
    ".ad-placeholder",
    ".promoted-content",
    ".sponsored-link",
    ".ad-strip",
    ".ad-panel",
    ".popup-banner",
    ".ad-modal",
    ".ad-top",
    ".ad-bottom",
    ".ad-left",
    ".ad-right",
    ".ad-inline",
    ".ad-sidebar",
    ".ad-footer",
    ".ad-header",
    ".ad-middle",
    ".ad-background",
    ".ad-target",
    ".ad-click",
    ".ad-img",
    ".ad-text",
    ".ad-video",
    ".ad-iframe",
    ".ad-popout",
    ".ad-expand",
    ".ad-collapse",
    ".ad-hover",
    ".ad-hover-effect",
    ".ad-banner-top",
    ".ad-banner-bottom",
    ".ad-banner-left",
    ".ad-banner-right",
    ".ad-banner-inline",
    ".ad-banner-sidebar",
    ".ad-banner-footer",
    ".ad-banner-header",
    ".ad-overlay-top",
    ".ad-overlay-bottom",
    ".ad-overlay-left",
    ".ad-overlay-right",
    ".ad-overlay-inline",
    ".ad-overlay-sidebar",
    ".ad-overlay-footer",
    ".ad-overlay-header",
    ".sponsored-top",
    ".sponsored-bottom",
    ".sponsored-left",
    ".sponsored-right",
    ".sponsored-inline",
    ".sponsored-sidebar",
    ".sponsored-footer",
    ".sponsored-header",
    ".promotional-top",
    ".promotional-bottom",
    ".promotional-left",
    ".promotional-right",
    ".promotional-inline",
    ".promotional-sidebar",
    ".promotional-footer",
    ".promotional-header",
    ".ad-feature-top",
    ".ad-feature-bottom",
    ".ad-feature-left",
    ".ad-feature-right",
    ".ad-feature-inline",
    ".ad-feature-sidebar",
    ".ad-feature-footer",
    ".ad-feature-header",
    ".ad-section-top",
    ".ad-section-bottom",
    ".ad-section-left",
    ".ad-section-right",
    ".ad-section-inline",
    ".ad-section-sidebar",
    ".ad-section-footer",
    ".ad-section-header",
    ".ad-box-top",
    ".ad-box-bottom",
    ".ad-box-left",
    ".ad-box-right",
    ".ad-box-inline",
    ".ad-box-sidebar",
    ".ad-box-footer",
    ".ad-box-header",
    ".ad-wrapper-top",
    ".ad-wrapper-bottom",
    ".ad-wrapper-left",
    ".ad-wrapper-right",
    ".ad-wrapper-inline",
    ".ad-wrapper-sidebar",
    ".ad-wrapper-footer",
    ".ad-wrapper-header",
    ".ad-unit-top",
    ".ad-unit-bottom",
    ".ad-unit-left",
    ".ad-unit-right",
    ".ad-unit-inline",
    ".ad-unit-sidebar",
    ".ad-unit-footer",
    ".ad-unit-header",
    ".ad-placeholder-top",
    ".ad-placeholder-bottom",
    ".ad-placeholder-left",
    ".ad-placeholder-right",
    ".ad-placeholder-inline",
    ".ad-placeholder-sidebar",
    ".ad-placeholder-footer",
    ".ad-placeholder-header",
    ".ad-marketing-top",
    ".ad-marketing-bottom",
    ".ad-marketing-left",
    ".ad-marketing-right",
    ".ad-marketing-inline",
    ".ad-marketing-sidebar",
    ".ad-marketing-footer",
    ".ad-marketing-header",
    ".ad-strip-top",
    ".ad-strip-bottom",
    ".ad-strip-left",
    ".ad-strip-right",
    ".ad-strip-inline",
    ".ad-strip-sidebar",
    ".ad-strip-footer",
    ".ad-strip-header",
    ".popup-ad-top",
    ".popup-ad-bottom",
    ".popup-ad-left",
    ".popup-ad-right",
    ".popup-ad-inline",
    ".popup-ad-sidebar",
    ".popup-ad-footer",
    ".popup-ad-header",
    ".popup-banner-top",
    ".popup-banner-bottom",
    ".popup-banner-left",
    ".popup-banner-right",
    ".popup-banner-inline",
    ".popup-banner-sidebar",
    ".popup-banner-footer",
    ".popup-banner-header",
    ".ad-modal-top",
    ".ad-modal-bottom",
    ".ad-modal-left",
    ".ad-modal-right",
    ".ad-modal-inline",
    ".ad-modal-sidebar",
    ".ad-modal-footer",
    ".ad-modal-header",
    ".sponsored-modal",
    ".promoted-modal",
    ".ad-floating",
    ".ad-sticky",
    ".ad-fixed",
    ".ad-slide",
    ".ad-carousel",
    ".ad-scroll",
    ".ad-animate",
    ".ad-rotate",
    ".ad-expandable",
    ".ad-interstitial",
    ".ad-infeed",
    ".ad-native",
    ".ad-sponsored",
    ".ad-promoted",
    ".ad-clickable",
    ".ad-popular",
    ".ad-recommended",
    ".ad-related",
    ".ad-featured",
    ".ad-highlight",
    ".ad-trending",
    ".ad-topbanner",
    ".ad-bottombanner",
    ".ad-leftbanner",
    ".ad-rightbanner",
    ".ad-inlinebanner",
    ".ad-sidebarbanner",
    ".ad-footerbanner",
    ".ad-headerbanner",
    ".ad-popupbanner",
    ".ad-overlaybanner",
    ".ad-topslot",
    ".ad-bottomslot",
    ".ad-leftslot",
    ".ad-rightslot",
    ".ad-inlineslot",
    ".ad-sidebarslot",
    ".ad-headerslot",
    ".ad-footerslot",
    ".ad-main",
    ".ad-secondary",
    ".ad-tertiary",
    ".ad-mini",
    ".ad-small",
    ".ad-medium",
    ".ad-large",
    ".ad-extra",
    ".ad-huge",
    ".ad-super",
    ".ad-ultimate",
    ".ad-ultra",
    ".ad-premium",
    ".ad-elite",
    ".ad-gold",
    ".ad-silver",
    ".ad-bronze",
    ".ad-sponsored-top",
    ".ad-sponsored-bottom",
    ".ad-sponsored-left",
    ".ad-sponsored-right",
];

/// A set of selectors removed together, minus anything inside `protected`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemovalRule {
    pub selectors: &'static [&'static str],
    pub protected: Option<&'static str>,
}

/// Targeted removal: the player ad containers are themselves the targets
pub const PLAYER_AD_RULE: RemovalRule = RemovalRule {
    selectors: PLAYER_AD_SELECTORS,
    protected: None,
};

/// Broad removal: generic patterns that may collide with player UI
pub const UNIVERSAL_AD_RULE: RemovalRule = RemovalRule {
    selectors: UNIVERSAL_AD_SELECTORS,
    protected: Some(UNIVERSAL_PROTECTED),
};

fn leading_integer() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid z-index pattern"))
}

/// Parse a computed `z-index` the way `parseInt` would.
///
/// Returns `None` for `auto`, empty values, and anything without a leading
/// integer. Digit runs too long for `i64` saturate.
pub fn parse_z_index(value: &str) -> Option<i64> {
    let digits = leading_integer().captures(value)?.get(1)?.as_str();
    match digits.parse::<i64>() {
        Ok(z) => Some(z),
        Err(_) if digits.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Whether a computed `z-index` marks an element as a full-page overlay
pub fn exceeds_z_index(value: &str, floor: i64) -> bool {
    parse_z_index(value).is_some_and(|z| z > floor)
}
