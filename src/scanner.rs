/// Scan passes: skip short ads, remove ad elements, recover from stalls

use crate::config::ScanConfig;
use crate::page::{Page, Playback};
use crate::selectors::{
    OVERLAY_CANDIDATES, OVERLAY_PROTECTED, PLAYER_AD_RULE, RemovalRule, SKIP_BUTTON_SELECTOR,
    UNIVERSAL_AD_RULE, exceeds_z_index,
};
use uuid::Uuid;

/// Per-page state of one RUNNING period
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSession {
    pub id: Uuid,
    pub last_time: f64,
    pub stall_count: u32,
    pub reloaded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallVerdict {
    Progressing,
    Stalled(u32),
    /// Stall limit crossed; the single recovery reload is due
    Reload,
}

impl ScanSession {
    pub fn new() -> Self {
        ScanSession {
            id: Uuid::new_v4(),
            last_time: 0.0,
            stall_count: 0,
            reloaded: false,
        }
    }

    /// Record one tick's playback position and decide whether to reload.
    ///
    /// `Reload` is returned at most once per session.
    pub fn observe(&mut self, playback: &Playback, stall_tick_limit: u32) -> StallVerdict {
        if playback.current_time == self.last_time && !playback.paused {
            self.stall_count += 1;
        } else {
            self.stall_count = 0;
        }
        self.last_time = playback.current_time;

        if self.stall_count > stall_tick_limit && !self.reloaded {
            self.reloaded = true;
            return StallVerdict::Reload;
        }

        match self.stall_count {
            0 => StallVerdict::Progressing,
            n => StallVerdict::Stalled(n),
        }
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

/// What a pass did to the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub fast_forwarded: bool,
    pub skip_clicked: bool,
    pub removed: usize,
    pub reloaded: bool,
}

impl PassReport {
    pub fn is_quiet(&self) -> bool {
        !self.fast_forwarded && !self.skip_clicked && self.removed == 0 && !self.reloaded
    }
}

fn is_short_ad(playback: &Playback, config: &ScanConfig) -> bool {
    // NaN and zero durations mean metadata has not loaded yet
    playback.duration > 0.0 && playback.duration < config.short_ad_max_secs && !playback.ended
}

/// Fast-forward a short promotional video and press any skip control
pub fn skip_pass<P: Page>(page: &P, config: &ScanConfig) -> PassReport {
    let mut report = PassReport::default();

    if let Some(playback) = page.playback() {
        if is_short_ad(&playback, config) {
            page.seek(playback.duration);
            report.fast_forwarded = true;
        }
    }

    if let Some(button) = page.select(SKIP_BUTTON_SELECTOR) {
        page.click(&button);
        report.skip_clicked = true;
    }

    report
}

/// Remove every element matched by `rule`, returning how many went
pub fn removal_pass<P: Page>(page: &P, rule: &RemovalRule) -> usize {
    let mut removed = 0;

    for selector in rule.selectors {
        for node in page.select_all(selector) {
            if rule.protected.is_some_and(|protected| page.is_within(&node, protected)) {
                continue;
            }
            page.remove(&node);
            removed += 1;
        }
    }

    removed
}

/// Remove positioned layers stacked above the configured floor
pub fn overlay_pass<P: Page>(page: &P, config: &ScanConfig) -> usize {
    let mut removed = 0;

    for node in page.select_all(OVERLAY_CANDIDATES) {
        if page.is_within(&node, OVERLAY_PROTECTED) {
            continue;
        }
        let above_floor = page
            .computed_z_index(&node)
            .is_some_and(|z| exceeds_z_index(&z, config.overlay_z_index_floor));
        if above_floor {
            page.remove(&node);
            removed += 1;
        }
    }

    removed
}

/// Pass run on every document mutation
pub fn mutation_pass<P: Page>(page: &P, config: &ScanConfig) -> PassReport {
    let mut report = skip_pass(page, config);
    report.removed += removal_pass(page, &PLAYER_AD_RULE);
    report
}

/// Full pass run on every timer tick
pub fn tick<P: Page>(page: &P, session: &mut ScanSession, config: &ScanConfig) -> PassReport {
    let mut report = mutation_pass(page, config);

    if let Some(playback) = page.playback() {
        if session.observe(&playback, config.stall_tick_limit) == StallVerdict::Reload {
            log::warn!(
                "[{}] playback stalled for {} ticks, reloading once",
                session.id,
                session.stall_count
            );
            page.reload();
            report.reloaded = true;
        }
    }

    report.removed += removal_pass(page, &UNIVERSAL_AD_RULE);
    report.removed += overlay_pass(page, config);
    report
}
