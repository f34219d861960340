/// DOM access for the content scanner
///
/// The scan passes are written against [`Page`] so they run the same way on
/// the live document and on the in-memory page used by the tests.
use crate::errors::ExtensionError;
use crate::selectors::VIDEO_SELECTOR;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlMediaElement, Window};

/// Snapshot of the page's video element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    pub duration: f64,
    pub current_time: f64,
    pub ended: bool,
    pub paused: bool,
}

pub trait Page {
    type Node;

    /// All elements matching `selector`, in document order
    fn select_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First element matching `selector`
    fn select(&self, selector: &str) -> Option<Self::Node>;

    /// Whether `node` or one of its ancestors matches `selector`
    fn is_within(&self, node: &Self::Node, selector: &str) -> bool;

    fn remove(&self, node: &Self::Node);

    fn click(&self, node: &Self::Node);

    /// Computed `z-index` of `node`, unparsed
    fn computed_z_index(&self, node: &Self::Node) -> Option<String>;

    fn playback(&self) -> Option<Playback>;

    fn seek(&self, position: f64);

    fn reload(&self);
}

/// The live document of the current tab
pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    pub fn new() -> Result<Self, ExtensionError> {
        let window = web_sys::window().ok_or(ExtensionError::MissingGlobal("window"))?;
        let document = window
            .document()
            .ok_or(ExtensionError::MissingGlobal("document"))?;
        Ok(BrowserPage { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn video(&self) -> Option<HtmlMediaElement> {
        self.select(VIDEO_SELECTOR)
            .and_then(|el| el.dyn_into::<HtmlMediaElement>().ok())
    }
}

impl Page for BrowserPage {
    type Node = Element;

    fn select_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("{}", ExtensionError::dom(e));
                return Vec::new();
            }
        };

        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn select(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn is_within(&self, node: &Element, selector: &str) -> bool {
        matches!(node.closest(selector), Ok(Some(_)))
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn click(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            el.click();
        }
    }

    fn computed_z_index(&self, node: &Element) -> Option<String> {
        self.window
            .get_computed_style(node)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("z-index").ok())
    }

    fn playback(&self) -> Option<Playback> {
        self.video().map(|video| Playback {
            duration: video.duration(),
            current_time: video.current_time(),
            ended: video.ended(),
            paused: video.paused(),
        })
    }

    fn seek(&self, position: f64) {
        if let Some(video) = self.video() {
            video.set_current_time(position);
        }
    }

    fn reload(&self) {
        if let Err(e) = self.window.location().reload() {
            log::error!("{}", ExtensionError::dom(e));
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory page for exercising the scan passes on the host

    use super::{Page, Playback};
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Default)]
    pub struct FakeNode {
        /// Selectors this element matches
        pub matches: Vec<&'static str>,
        /// Selectors matched by some ancestor
        pub ancestors: Vec<&'static str>,
        pub z_index: Option<&'static str>,
        pub removed: Cell<bool>,
        pub clicks: Cell<u32>,
    }

    #[derive(Default)]
    pub struct FakePage {
        pub nodes: Vec<FakeNode>,
        pub playback: RefCell<Option<Playback>>,
        pub seeks: RefCell<Vec<f64>>,
        pub reloads: Cell<u32>,
    }

    impl FakePage {
        pub fn add(&mut self, matches: &[&'static str]) -> usize {
            self.add_node(FakeNode {
                matches: matches.to_vec(),
                ..FakeNode::default()
            })
        }

        pub fn add_inside(&mut self, matches: &[&'static str], ancestors: &[&'static str]) -> usize {
            self.add_node(FakeNode {
                matches: matches.to_vec(),
                ancestors: ancestors.to_vec(),
                ..FakeNode::default()
            })
        }

        pub fn add_node(&mut self, node: FakeNode) -> usize {
            self.nodes.push(node);
            self.nodes.len() - 1
        }

        pub fn is_removed(&self, id: usize) -> bool {
            self.nodes[id].removed.get()
        }

        pub fn removed_count(&self) -> usize {
            self.nodes.iter().filter(|n| n.removed.get()).count()
        }

        pub fn set_playback(&self, playback: Option<Playback>) {
            *self.playback.borrow_mut() = playback;
        }

        fn hits(node: &FakeNode, selector: &str, include_ancestors: bool) -> bool {
            selector.split(',').map(str::trim).any(|part| {
                node.matches.iter().any(|m| *m == part)
                    || (include_ancestors && node.ancestors.iter().any(|a| *a == part))
            })
        }
    }

    impl Page for FakePage {
        type Node = usize;

        fn select_all(&self, selector: &str) -> Vec<usize> {
            self.nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| !n.removed.get() && Self::hits(n, selector, false))
                .map(|(id, _)| id)
                .collect()
        }

        fn select(&self, selector: &str) -> Option<usize> {
            self.select_all(selector).into_iter().next()
        }

        fn is_within(&self, node: &usize, selector: &str) -> bool {
            Self::hits(&self.nodes[*node], selector, true)
        }

        fn remove(&self, node: &usize) {
            self.nodes[*node].removed.set(true);
        }

        fn click(&self, node: &usize) {
            let clicks = &self.nodes[*node].clicks;
            clicks.set(clicks.get() + 1);
        }

        fn computed_z_index(&self, node: &usize) -> Option<String> {
            self.nodes[*node].z_index.map(str::to_string)
        }

        fn playback(&self) -> Option<Playback> {
            *self.playback.borrow()
        }

        fn seek(&self, position: f64) {
            self.seeks.borrow_mut().push(position);
            if let Some(playback) = self.playback.borrow_mut().as_mut() {
                playback.current_time = position;
                if position >= playback.duration {
                    playback.ended = true;
                }
            }
        }

        fn reload(&self) {
            self.reloads.set(self.reloads.get() + 1);
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::config::ScanConfig;
    use crate::scanner::{overlay_pass, removal_pass};
    use crate::selectors::{PLAYER_AD_RULE, UNIVERSAL_AD_RULE};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(page: &BrowserPage, html: &str) -> Element {
        let host = page.document().create_element("div").unwrap();
        host.set_inner_html(html);
        page.document().body().unwrap().append_child(&host).unwrap();
        host
    }

    #[wasm_bindgen_test]
    fn test_removes_player_ads_from_live_document() {
        let page = BrowserPage::new().unwrap();
        let host = mount(
            &page,
            r#"<div id="movie_player"><div class="ytp-ad-module"></div></div>
               <ytd-promoted-video-renderer></ytd-promoted-video-renderer>"#,
        );

        assert_eq!(removal_pass(&page, &PLAYER_AD_RULE), 2);
        assert!(page.select("#movie_player").is_some());
        assert_eq!(removal_pass(&page, &PLAYER_AD_RULE), 0);
        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_universal_sweep_respects_closest() {
        let page = BrowserPage::new().unwrap();
        let host = mount(
            &page,
            r#"<div id="movie_player"><span class="ad-text"></span></div>
               <div class="ad-banner"></div>"#,
        );

        assert_eq!(removal_pass(&page, &UNIVERSAL_AD_RULE), 1);
        assert!(page.select(".ad-text").is_some());
        assert!(page.select(".ad-banner").is_none());
        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_overlay_sweep_reads_computed_z_index() {
        let page = BrowserPage::new().unwrap();
        let host = mount(
            &page,
            r#"<div id="high" style="position: fixed; z-index: 5000"></div>
               <div id="low" style="position: absolute; z-index: 10"></div>"#,
        );

        assert_eq!(overlay_pass(&page, &ScanConfig::default()), 1);
        assert!(page.select("#high").is_none());
        assert!(page.select("#low").is_some());
        host.remove();
    }
}
