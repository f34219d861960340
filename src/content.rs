/// Content script: the RUNNING/STOPPED blocker attached to each page

use crate::chrome;
use crate::config::ScanConfig;
use crate::errors::ExtensionError;
use crate::page::{BrowserPage, Page};
use crate::scanner::{self, PassReport, ScanSession};
use crate::settings::{self, FlagReaction, Settings, StorageChanges};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{MutationObserver, MutationObserverInit, Window};

/// Blocker state; `Running` owns whatever keeps the scan alive
#[derive(Debug)]
pub enum BlockerState<T> {
    Stopped,
    Running(T),
}

impl<T> BlockerState<T> {
    pub fn is_running(&self) -> bool {
        matches!(self, BlockerState::Running(_))
    }

    /// Enter RUNNING with the handles produced by `attach`.
    ///
    /// Returns `Ok(false)` without calling `attach` when already running.
    pub fn start_with<E>(&mut self, attach: impl FnOnce() -> Result<T, E>) -> Result<bool, E> {
        if self.is_running() {
            return Ok(false);
        }
        *self = BlockerState::Running(attach()?);
        Ok(true)
    }

    /// Enter STOPPED, dropping the running handles. Returns whether anything stopped.
    pub fn stop(&mut self) -> bool {
        match std::mem::replace(self, BlockerState::Stopped) {
            BlockerState::Running(handles) => {
                drop(handles);
                true
            }
            BlockerState::Stopped => false,
        }
    }

    /// Apply the stored flag on load: enabled starts, disabled never attaches
    pub fn apply_flag<E>(
        &mut self,
        enabled: bool,
        attach: impl FnOnce() -> Result<T, E>,
    ) -> Result<bool, E> {
        if enabled {
            self.start_with(attach)
        } else {
            self.stop();
            Ok(false)
        }
    }

    /// Apply a live flag change. Returns whether the page must be reloaded.
    pub fn apply_reaction(&mut self, reaction: FlagReaction) -> bool {
        match reaction {
            FlagReaction::ReloadPage => true,
            FlagReaction::StopScanning => {
                self.stop();
                false
            }
        }
    }
}

impl<T> Default for BlockerState<T> {
    fn default() -> Self {
        BlockerState::Stopped
    }
}

/// Observer and interval of one RUNNING period, torn down on drop
struct ActiveScan {
    window: Window,
    observer: MutationObserver,
    interval_id: i32,
    _on_mutation: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
    _on_tick: Closure<dyn FnMut()>,
}

impl ActiveScan {
    fn attach(
        page: Rc<BrowserPage>,
        session: Rc<RefCell<ScanSession>>,
        config: &ScanConfig,
    ) -> Result<Self, ExtensionError> {
        let on_mutation = {
            let page = page.clone();
            let config = config.clone();
            Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
                move |_records: js_sys::Array, _observer: MutationObserver| {
                    log_pass("mutation", &scanner::mutation_pass(&*page, &config));
                },
            )
        };

        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())
            .map_err(ExtensionError::dom)?;
        let root = page
            .document()
            .document_element()
            .ok_or(ExtensionError::MissingGlobal("document.documentElement"))?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer
            .observe_with_options(&root, &options)
            .map_err(ExtensionError::dom)?;

        let on_tick = {
            let page = page.clone();
            let config = config.clone();
            Closure::<dyn FnMut()>::new(move || {
                let mut session = session.borrow_mut();
                log_pass("tick", &scanner::tick(&*page, &mut session, &config));
            })
        };

        let interval_id = page
            .window()
            .set_interval_with_callback_and_timeout_and_arguments_0(
                on_tick.as_ref().unchecked_ref(),
                config.tick_interval_ms,
            )
            .map_err(|e| {
                observer.disconnect();
                ExtensionError::dom(e)
            })?;

        Ok(ActiveScan {
            window: page.window().clone(),
            observer,
            interval_id,
            _on_mutation: on_mutation,
            _on_tick: on_tick,
        })
    }
}

impl Drop for ActiveScan {
    fn drop(&mut self) {
        self.observer.disconnect();
        self.window.clear_interval_with_handle(self.interval_id);
    }
}

fn log_pass(trigger: &str, report: &PassReport) {
    if !report.is_quiet() {
        log::debug!("{} pass: {:?}", trigger, report);
    }
}

struct Inner {
    page: Rc<BrowserPage>,
    config: ScanConfig,
    session: Rc<RefCell<ScanSession>>,
    state: RefCell<BlockerState<ActiveScan>>,
}

/// Handle to the page's blocker, cheap to clone into listeners
#[derive(Clone)]
pub struct ContentScript {
    inner: Rc<Inner>,
}

impl ContentScript {
    pub fn new(page: BrowserPage, config: ScanConfig) -> Self {
        ContentScript {
            inner: Rc::new(Inner {
                page: Rc::new(page),
                config,
                session: Rc::new(RefCell::new(ScanSession::new())),
                state: RefCell::new(BlockerState::Stopped),
            }),
        }
    }

    /// Enter RUNNING with fresh session state when `enabled`, else stay STOPPED
    pub fn apply_flag(&self, enabled: bool) -> Result<(), ExtensionError> {
        let inner = &self.inner;
        let started = inner.state.borrow_mut().apply_flag(enabled, || {
            *inner.session.borrow_mut() = ScanSession::new();
            ActiveScan::attach(inner.page.clone(), inner.session.clone(), &inner.config)
        })?;

        if started {
            log::info!("[{}] blocking started", inner.session.borrow().id);
        } else if !enabled {
            log::info!("blocking disabled, page left untouched");
        }
        Ok(())
    }

    /// React to a flag change; stopping is final until the next page load
    pub fn react(&self, reaction: FlagReaction) {
        let was_running = self.inner.state.borrow().is_running();
        if self.inner.state.borrow_mut().apply_reaction(reaction) {
            log::info!("blocking enabled, reloading page");
            self.inner.page.reload();
        } else if was_running {
            log::info!("[{}] blocking stopped", self.inner.session.borrow().id);
        }
    }
}

/// Content script entry point
pub fn boot() {
    let page = match BrowserPage::new() {
        Ok(page) => page,
        Err(e) => {
            log::error!("content script not started: {}", e);
            return;
        }
    };
    let script = ContentScript::new(page, ScanConfig::default());

    {
        let script = script.clone();
        chrome::on_storage_changed(move |changes, _area| {
            match serde_wasm_bindgen::from_value::<StorageChanges>(changes) {
                Ok(changes) => {
                    if let Some(reaction) = settings::flag_reaction(&changes) {
                        script.react(reaction);
                    }
                }
                Err(e) => log::warn!("{}", ExtensionError::decode("storage change", e)),
            }
        });
    }

    spawn_local(async move {
        let stored = settings::load().await.unwrap_or_else(|e| {
            log::warn!("{}; assuming blocking is enabled", e);
            Settings::default()
        });

        if let Err(e) = script.apply_flag(stored.enabled) {
            log::error!("failed to start blocking: {}", e);
        }
    });
}
