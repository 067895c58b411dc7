use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Node, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

use crate::config;
use crate::scroll::ScrollState;

pub const NAV_SECTIONS: &[(&str, &str)] = &[
    ("accueil", "Accueil"),
    ("services", "Services"),
    ("apropos", "À propos"),
    ("realisations", "Réalisations"),
    ("contact", "Contact"),
];

/// `#contact` -> `contact`. Bare `#` and external links are not anchors.
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Page offset that puts an element just below the fixed header.
pub fn scroll_target(element_top: f64, page_offset: f64) -> f64 {
    element_top + page_offset - config::HEADER_OFFSET
}

pub fn scroll_to_anchor(href: &str) {
    let Some(id) = anchor_id(href) else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(element) = window.document().and_then(|document| document.get_element_by_id(id)) else {
        debug!("no anchor target for {}", href);
        return;
    };
    let top = element.get_bounding_client_rect().top();
    let offset = window.page_y_offset().unwrap_or(0.0);

    let options = ScrollToOptions::new();
    options.set_top(scroll_target(top, offset));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

#[derive(Properties, PartialEq)]
pub struct AnchorLinkProps {
    pub href: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub onclick: Option<Callback<MouseEvent>>,
    #[prop_or_default]
    pub children: Children,
}

/// In-page link that scrolls smoothly instead of jumping.
#[function_component(AnchorLink)]
pub fn anchor_link(props: &AnchorLinkProps) -> Html {
    let onclick = {
        let href = props.href.clone();
        let extra = props.onclick.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            scroll_to_anchor(&href);
            if let Some(extra) = extra.as_ref() {
                extra.emit(e);
            }
        })
    };

    html! {
        <a href={props.href.clone()} class={props.class.clone()} onclick={onclick}>
            { for props.children.iter() }
        </a>
    }
}

/// An open menu closes on any click outside both the menu and its toggle.
pub fn click_closes_menu(open: bool, in_menu: bool, in_toggle: bool) -> bool {
    open && !in_menu && !in_toggle
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub scroll: ScrollState,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let menu_open = use_state_eq(|| false);
    let menu = use_node_ref();
    let toggle = use_node_ref();

    // Outside-click listener, only attached while the menu is open.
    {
        let menu_open = menu_open.clone();
        let menu = menu.clone();
        let toggle = toggle.clone();
        let is_open = *menu_open;
        use_effect_with_deps(
            move |open| {
                let open = *open;
                let document = web_sys::window().and_then(|window| window.document());
                let listener = match (open, document.as_ref()) {
                    (true, Some(document)) => {
                        let callback = Closure::wrap(Box::new(move |e: MouseEvent| {
                            let target = e.target().and_then(|target| target.dyn_into::<Node>().ok());
                            let inside = |node: &NodeRef| {
                                node.cast::<Node>()
                                    .map(|node| node.contains(target.as_ref()))
                                    .unwrap_or(false)
                            };
                            if click_closes_menu(open, inside(&menu), inside(&toggle)) {
                                debug!("menu closed by outside click");
                                menu_open.set(false);
                            }
                        }) as Box<dyn FnMut(MouseEvent)>);
                        let _ = document
                            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
                        Some(callback)
                    }
                    _ => None,
                };

                move || {
                    if let (Some(document), Some(callback)) = (document, listener) {
                        let _ = document
                            .remove_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
                    }
                }
            },
            is_open,
        );
    }

    let open_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(true);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    html! {
        <header id="header" class={classes!("header", props.scroll.is_past_threshold.then_some("scrolled"))}>
            <nav class="nav container">
                <AnchorLink href="#accueil" class={classes!("nav__logo")}>
                    {"Nord Bois "}<span>{"Structure"}</span>
                </AnchorLink>

                <div id="nav-menu" ref={menu} class={classes!("nav__menu", (*menu_open).then_some("active"))}>
                    <ul class="nav__list">
                        { for NAV_SECTIONS.iter().map(|(id, label)| {
                            let active = props.scroll.is_active(id);
                            html! {
                                <li class="nav__item">
                                    <AnchorLink
                                        href={format!("#{}", id)}
                                        class={classes!("nav__link", active.then_some("active"))}
                                        onclick={close_menu.clone()}
                                    >
                                        {*label}
                                    </AnchorLink>
                                </li>
                            }
                        }) }
                    </ul>
                    <button id="nav-close" class="nav__close" aria-label="Fermer le menu" onclick={close_menu.clone()}>
                        {"×"}
                    </button>
                </div>

                <button id="nav-toggle" ref={toggle} class="nav__toggle" aria-label="Ouvrir le menu" onclick={open_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
            </nav>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_ids() {
        assert_eq!(anchor_id("#contact"), Some("contact"));
        assert_eq!(anchor_id("#"), None);
        assert_eq!(anchor_id("https://example.fr/#contact"), None);
    }

    #[test]
    fn target_sits_below_header() {
        assert_eq!(scroll_target(400.0, 1_000.0), 1_320.0);
        assert_eq!(scroll_target(-200.0, 1_000.0), 720.0);
    }

    #[test]
    fn outside_click_closes_only_an_open_menu() {
        // Clicks on the page body, hero or any other header part close it.
        assert!(click_closes_menu(true, false, false));
        // The panel itself and the toggle button keep it open.
        assert!(!click_closes_menu(true, true, false));
        assert!(!click_closes_menu(true, false, true));
        assert!(!click_closes_menu(false, false, false));
    }

    #[test]
    fn every_nav_entry_is_an_anchor() {
        for (id, _) in NAV_SECTIONS {
            let href = format!("#{}", id);
            assert_eq!(anchor_id(&href), Some(*id));
        }
    }
}
