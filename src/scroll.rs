use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config;

/// Vertical extent of a `section[id]` as laid out on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionExtent {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionExtent {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self { id: id.into(), top, height }
    }

    fn contains(&self, offset: f64) -> bool {
        let start = self.top - config::SECTION_LEAD;
        offset >= start && offset < start + self.height
    }
}

/// What the window reports on a scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub offset: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallax {
    pub translate_y: f64,
    pub opacity: f64,
}

impl Parallax {
    pub fn style(&self) -> String {
        format!("transform: translateY({}px); opacity: {};", self.translate_y, self.opacity)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub offset: f64,
    pub is_past_threshold: bool,
    pub active_section_id: Option<String>,
    /// Last parallax applied to the hero content, if any.
    pub parallax: Option<Parallax>,
    /// `None` when the page has no contact section.
    pub floating_cta_visible: Option<bool>,
}

impl ScrollState {
    pub fn is_active(&self, section_id: &str) -> bool {
        self.active_section_id.as_deref() == Some(section_id)
    }
}

pub fn is_past_threshold(offset: f64) -> bool {
    offset > config::SCROLL_THRESHOLD
}

/// Last section in document order whose lead-adjusted interval holds `offset`.
pub fn active_section(offset: f64, sections: &[SectionExtent]) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|section| section.contains(offset))
        .map(|section| section.id.as_str())
}

pub fn parallax(viewport: &Viewport) -> Option<Parallax> {
    if viewport.width <= config::PARALLAX_MIN_WIDTH || viewport.offset >= viewport.height {
        return None;
    }
    Some(Parallax {
        translate_y: viewport.offset * config::PARALLAX_FACTOR,
        opacity: 1.0 - viewport.offset / viewport.height,
    })
}

pub fn floating_cta_visible(viewport: &Viewport, sections: &[SectionExtent]) -> Option<bool> {
    let contact = sections.iter().find(|section| section.id == "contact")?;
    let top_in_viewport = contact.top - viewport.offset;
    Some(top_in_viewport >= viewport.height)
}

/// Owns the page's scroll state for the whole session.
#[derive(Default)]
pub struct ScrollTracker {
    state: ScrollState,
}

impl ScrollTracker {
    pub fn on_scroll(&mut self, viewport: Viewport, sections: &[SectionExtent]) -> &ScrollState {
        let offset = viewport.offset;
        self.state.offset = offset;
        self.state.is_past_threshold = is_past_threshold(offset);
        self.state.active_section_id = active_section(offset, sections).map(str::to_owned);
        if let Some(p) = parallax(&viewport) {
            self.state.parallax = Some(p);
        }
        self.state.floating_cta_visible = floating_cta_visible(&viewport, sections);
        &self.state
    }
}

fn read_viewport(window: &web_sys::Window) -> Option<Viewport> {
    Some(Viewport {
        offset: window.page_y_offset().ok()?,
        width: window.inner_width().ok()?.as_f64()?,
        height: window.inner_height().ok()?.as_f64()?,
    })
}

fn read_sections(document: &web_sys::Document) -> Vec<SectionExtent> {
    let Ok(nodes) = document.query_selector_all("section[id]") else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|el| SectionExtent::new(el.id(), el.offset_top() as f64, el.offset_height() as f64))
        .collect()
}

/// Recomputes the scroll state on every window scroll event.
#[hook]
pub fn use_scroll_state() -> ScrollState {
    let tracker = use_mut_ref(ScrollTracker::default);
    let state = use_state_eq(ScrollState::default);

    {
        let state = state.clone();
        use_effect_with_deps(move |_| {
            let window = web_sys::window();
            let scroll_callback = window.as_ref().map(|window| {
                let window_clone = window.clone();
                let callback = Closure::wrap(Box::new(move || {
                    let Some(viewport) = read_viewport(&window_clone) else {
                        return;
                    };
                    let sections = window_clone
                        .document()
                        .map(|document| read_sections(&document))
                        .unwrap_or_default();
                    let next = tracker.borrow_mut().on_scroll(viewport, &sections).clone();
                    state.set(next);
                }) as Box<dyn FnMut()>);
                let _ = window.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());
                // Pages reloaded mid-scroll start with the right header style.
                let _ = callback
                    .as_ref()
                    .unchecked_ref::<js_sys::Function>()
                    .call0(&JsValue::NULL);
                callback
            });
            debug!("scroll tracker attached");

            move || {
                if let (Some(window), Some(callback)) = (window, scroll_callback) {
                    let _ = window.remove_event_listener_with_callback(
                        "scroll",
                        callback.as_ref().unchecked_ref(),
                    );
                }
            }
        }, ());
    }

    (*state).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionExtent> {
        vec![
            SectionExtent::new("accueil", 0.0, 700.0),
            SectionExtent::new("services", 700.0, 900.0),
            SectionExtent::new("contact", 1600.0, 800.0),
        ]
    }

    fn viewport(offset: f64) -> Viewport {
        Viewport { offset, width: 1280.0, height: 800.0 }
    }

    #[test]
    fn threshold_is_strictly_greater_than_fifty() {
        for offset in [0.0, 12.5, 49.9, 50.0] {
            assert!(!is_past_threshold(offset), "{offset}");
        }
        for offset in [50.1, 51.0, 4_000.0] {
            assert!(is_past_threshold(offset), "{offset}");
        }
    }

    #[test]
    fn active_section_uses_lead_adjusted_half_open_interval() {
        let sections = page();
        assert_eq!(active_section(0.0, &sections), Some("accueil"));
        // services spans [600, 1500)
        assert_eq!(active_section(599.0, &sections), Some("accueil"));
        assert_eq!(active_section(600.0, &sections), Some("services"));
        assert_eq!(active_section(1499.0, &sections), Some("services"));
        assert_eq!(active_section(1500.0, &sections), Some("contact"));
        assert_eq!(active_section(2300.0, &sections), None);
    }

    #[test]
    fn overlapping_sections_resolve_to_last_match() {
        let sections = vec![
            SectionExtent::new("a", 200.0, 500.0),
            SectionExtent::new("b", 300.0, 500.0),
        ];
        assert_eq!(active_section(250.0, &sections), Some("b"));
        assert_eq!(active_section(150.0, &sections), Some("a"));
    }

    #[test]
    fn active_section_is_cleared_when_nothing_matches() {
        let sections = page();
        let mut tracker = ScrollTracker::default();
        assert!(tracker.on_scroll(viewport(700.0), &sections).is_active("services"));

        let state = tracker.on_scroll(viewport(5_000.0), &sections);
        assert_eq!(state.active_section_id, None);
        assert!(state.is_past_threshold);
    }

    #[test]
    fn parallax_only_on_wide_viewports_above_the_fold() {
        let p = parallax(&viewport(200.0)).expect("parallax on desktop");
        assert!((p.translate_y - 60.0).abs() < 1e-9);
        assert!((p.opacity - 0.75).abs() < 1e-9);

        let narrow = Viewport { offset: 200.0, width: 768.0, height: 800.0 };
        assert_eq!(parallax(&narrow), None);
        assert_eq!(parallax(&viewport(800.0)), None);
    }

    #[test]
    fn parallax_keeps_last_applied_value_below_the_fold() {
        let sections = page();
        let mut tracker = ScrollTracker::default();
        let applied = tracker.on_scroll(viewport(400.0), &sections).parallax;
        assert!(applied.is_some());
        assert_eq!(tracker.on_scroll(viewport(1_200.0), &sections).parallax, applied);
    }

    #[test]
    fn floating_cta_hides_once_contact_enters_viewport() {
        let sections = page();
        assert_eq!(floating_cta_visible(&viewport(0.0), &sections), Some(true));
        assert_eq!(floating_cta_visible(&viewport(800.0), &sections), Some(true));
        assert_eq!(floating_cta_visible(&viewport(801.0), &sections), Some(false));
        assert_eq!(floating_cta_visible(&viewport(0.0), &sections[..2]), None);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn reads_section_extents_from_the_document() {
        let document = web_sys::window().unwrap().document().unwrap();
        let body = document.body().unwrap();
        let section = document.create_element("section").unwrap();
        section.set_id("atelier-test");
        section.set_attribute("style", "display: block; height: 420px; margin: 0;").unwrap();
        body.append_child(&section).unwrap();

        let sections = read_sections(&document);
        let found = sections.iter().find(|s| s.id == "atelier-test").expect("section listed");
        assert_eq!(found.height, 420.0);

        body.remove_child(&section).unwrap();
    }
}
