use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent};
use yew::prelude::*;

use crate::config;
use crate::reveal::Reveal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Charpente,
    Ossature,
    Renovation,
    Amenagement,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Charpente,
        Category::Ossature,
        Category::Renovation,
        Category::Amenagement,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Charpente => "charpente",
            Category::Ossature => "ossature",
            Category::Renovation => "renovation",
            Category::Amenagement => "amenagement",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Charpente => "Charpente",
            Category::Ossature => "Ossature bois",
            Category::Renovation => "Rénovation",
            Category::Amenagement => "Aménagement",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Only(Category),
}

impl Filter {
    /// Parses a filter button's `data-filter` value.
    pub fn from_slug(slug: &str) -> Option<Filter> {
        if slug == "all" {
            return Some(Filter::All);
        }
        Category::ALL.into_iter().find(|c| c.slug() == slug).map(Filter::Only)
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Only(category) => category.slug(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "Tous",
            Filter::Only(category) => category.label(),
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => *wanted == category,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryEntry {
    pub title: &'static str,
    pub place: &'static str,
    pub category: Category,
}

pub const GALLERY: &[GalleryEntry] = &[
    GalleryEntry { title: "Charpente chêne massif", place: "Cassel", category: Category::Charpente },
    GalleryEntry { title: "Maison ossature 120 m²", place: "Villeneuve-d'Ascq", category: Category::Ossature },
    GalleryEntry { title: "Longère restaurée", place: "Bergues", category: Category::Renovation },
    GalleryEntry { title: "Terrasse en mélèze", place: "Wimereux", category: Category::Amenagement },
    GalleryEntry { title: "Extension à étage", place: "Marcq-en-Barœul", category: Category::Ossature },
    GalleryEntry { title: "Carport double", place: "Arras", category: Category::Amenagement },
    GalleryEntry { title: "Reprise de fermettes", place: "Douai", category: Category::Renovation },
    GalleryEntry { title: "Charpente de grange", place: "Hazebrouck", category: Category::Charpente },
];

/// Fade stage of a single gallery item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemFade {
    pub displayed: bool,
    pub opaque: bool,
}

impl ItemFade {
    pub const SHOWN: ItemFade = ItemFade { displayed: true, opaque: true };

    /// First step when the filter changes, and the delay before the second.
    /// An item that was never faded and is still visible keeps no inline
    /// style, so the reveal transition stays in charge of it.
    pub fn begin(current: Option<ItemFade>, visible: bool) -> Option<(ItemFade, u32)> {
        let current = match (current, visible) {
            (None, true) => return None,
            (current, _) => current.unwrap_or(ItemFade::SHOWN),
        };
        Some(if visible {
            (ItemFade { displayed: true, ..current }, config::GALLERY_SHOW_DELAY_MS)
        } else {
            (ItemFade { opaque: false, ..current }, config::GALLERY_HIDE_DELAY_MS)
        })
    }

    pub fn finish(visible: bool) -> ItemFade {
        if visible {
            ItemFade::SHOWN
        } else {
            ItemFade { displayed: false, opaque: false }
        }
    }

    pub fn style(&self) -> String {
        format!(
            "display: {}; opacity: {};",
            if self.displayed { "block" } else { "none" },
            if self.opaque { "1" } else { "0" },
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LightboxState {
    pub open: bool,
    pub index: usize,
    pub len: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxAction {
    Open(usize),
    Close,
    Next,
    Prev,
}

impl LightboxAction {
    pub fn from_key(key: &str) -> Option<LightboxAction> {
        match key {
            "Escape" => Some(LightboxAction::Close),
            "ArrowRight" => Some(LightboxAction::Next),
            "ArrowLeft" => Some(LightboxAction::Prev),
            _ => None,
        }
    }
}

impl LightboxState {
    pub fn new(len: usize) -> Self {
        Self { open: false, index: 0, len }
    }

    fn apply(&self, action: LightboxAction) -> LightboxState {
        let mut next = self.clone();
        match action {
            LightboxAction::Open(index) if index < self.len => {
                next.open = true;
                next.index = index;
            }
            LightboxAction::Close => next.open = false,
            LightboxAction::Next if self.len > 0 => next.index = (self.index + 1) % self.len,
            LightboxAction::Prev if self.len > 0 => next.index = (self.index + self.len - 1) % self.len,
            _ => {}
        }
        next
    }
}

impl Reducible for LightboxState {
    type Action = LightboxAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[derive(Properties, PartialEq)]
struct GalleryItemProps {
    entry: GalleryEntry,
    index: usize,
    reveal_index: usize,
    visible: bool,
    on_open: Callback<usize>,
}

#[function_component(GalleryItem)]
fn gallery_item(props: &GalleryItemProps) -> Html {
    let fade = use_state_eq(|| None::<ItemFade>);

    {
        let fade = fade.clone();
        use_effect_with_deps(
            move |visible| {
                let visible = *visible;
                let timeout = ItemFade::begin(*fade, visible).map(|(first, delay)| {
                    fade.set(Some(first));
                    Timeout::new(delay, move || fade.set(Some(ItemFade::finish(visible))))
                });
                move || drop(timeout)
            },
            props.visible,
        );
    }

    let onclick = {
        let on_open = props.on_open.clone();
        let index = props.index;
        Callback::from(move |_: MouseEvent| on_open.emit(index))
    };

    html! {
        <Reveal
            class={classes!("gallery__item")}
            index={props.reveal_index}
            style={fade.map(|fade| fade.style())}
            onclick={onclick}
        >
            <div class="gallery__placeholder" data-category={props.entry.category.slug()}>
                <span class="gallery__tag">{props.entry.category.label()}</span>
            </div>
            <div class="gallery__overlay">
                <h3>{props.entry.title}</h3>
                <p>{props.entry.place}</p>
            </div>
        </Reveal>
    }
}

#[derive(Properties, PartialEq)]
struct LightboxProps {
    state: LightboxState,
    dispatch: Callback<LightboxAction>,
}

#[function_component(Lightbox)]
fn lightbox(props: &LightboxProps) -> Html {
    let backdrop = use_node_ref();
    let open = props.state.open;

    // Lock page scroll while open.
    use_effect_with_deps(
        move |open| {
            let body = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.body());
            if let Some(body) = body.as_ref() {
                let style = body.style();
                let _ = if *open {
                    style.set_property("overflow", "hidden")
                } else {
                    style.remove_property("overflow").map(|_| ())
                };
            }
            || ()
        },
        open,
    );

    // Keyboard paging is only wired while the lightbox is showing.
    {
        let dispatch = props.dispatch.clone();
        use_effect_with_deps(
            move |open| {
                let document = web_sys::window().and_then(|window| window.document());
                let keydown = match (*open, document.as_ref()) {
                    (true, Some(document)) => {
                        let callback = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                            if let Some(action) = LightboxAction::from_key(&e.key()) {
                                debug!("lightbox key: {:?}", action);
                                dispatch.emit(action);
                            }
                        }) as Box<dyn FnMut(KeyboardEvent)>);
                        let _ = document
                            .add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref());
                        Some(callback)
                    }
                    _ => None,
                };

                move || {
                    if let (Some(document), Some(callback)) = (document, keydown) {
                        let _ = document
                            .remove_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref());
                    }
                }
            },
            open,
        );
    }

    let on_backdrop = {
        let dispatch = props.dispatch.clone();
        let backdrop = backdrop.clone();
        Callback::from(move |e: MouseEvent| {
            let target = e.target().and_then(|t| t.dyn_into::<Element>().ok());
            if target.is_some() && target == backdrop.cast::<Element>() {
                dispatch.emit(LightboxAction::Close);
            }
        })
    };
    let on_close = props.dispatch.reform(|_: MouseEvent| LightboxAction::Close);
    let on_prev = props.dispatch.reform(|_: MouseEvent| LightboxAction::Prev);
    let on_next = props.dispatch.reform(|_: MouseEvent| LightboxAction::Next);

    let title = GALLERY
        .get(props.state.index)
        .map(|entry| entry.title)
        .filter(|title| !title.is_empty())
        .unwrap_or("Image");

    html! {
        <div
            id="lightbox"
            ref={backdrop}
            class={classes!("lightbox", open.then_some("active"))}
            onclick={on_backdrop}
        >
            <button class="lightbox__close" aria-label="Fermer" onclick={on_close}>{"×"}</button>
            <button class="lightbox__prev" aria-label="Précédent" onclick={on_prev}>{"‹"}</button>
            <figure class="lightbox__content">
                <div class="lightbox__img" role="img" aria-label={title}></div>
                <figcaption>{title}</figcaption>
            </figure>
            <button class="lightbox__next" aria-label="Suivant" onclick={on_next}>{"›"}</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct GallerySectionProps {
    /// Position of the first item among all revealed elements of the page.
    #[prop_or_default]
    pub reveal_offset: usize,
}

#[function_component(GallerySection)]
pub fn gallery_section(props: &GallerySectionProps) -> Html {
    let reveal_offset = props.reveal_offset;
    let filter = use_state(Filter::default);
    let lightbox = use_reducer(|| LightboxState::new(GALLERY.len()));

    let dispatch = {
        let dispatcher = lightbox.dispatcher();
        Callback::from(move |action: LightboxAction| dispatcher.dispatch(action))
    };
    let on_open = dispatch.reform(LightboxAction::Open);

    let filters = std::iter::once(Filter::All).chain(Category::ALL.into_iter().map(Filter::Only));

    let on_filter = {
        let filter = filter.clone();
        Callback::from(move |e: MouseEvent| {
            let chosen = e
                .target_dyn_into::<Element>()
                .and_then(|button| button.get_attribute("data-filter"))
                .and_then(|slug| Filter::from_slug(&slug));
            if let Some(chosen) = chosen {
                debug!("gallery filter: {}", chosen.slug());
                filter.set(chosen);
            }
        })
    };

    html! {
        <section id="realisations" class="gallery section">
            <div class="container">
                <h2 class="section__title">{"Nos réalisations"}</h2>
                <div class="gallery__filters">
                    { for filters.map(|f| html! {
                        <button
                            class={classes!("gallery__filter", (*filter == f).then_some("active"))}
                            data-filter={f.slug()}
                            onclick={on_filter.clone()}
                        >
                            {f.label()}
                        </button>
                    }) }
                </div>
                <div class="gallery__grid">
                    { for GALLERY.iter().enumerate().map(|(index, entry)| html! {
                        <GalleryItem
                            key={index.to_string()}
                            entry={entry.clone()}
                            index={index}
                            reveal_index={reveal_offset + index}
                            visible={filter.matches(entry.category)}
                            on_open={on_open.clone()}
                        />
                    }) }
                </div>
            </div>
            <Lightbox state={(*lightbox).clone()} dispatch={dispatch} />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: LightboxState, actions: &[LightboxAction]) -> LightboxState {
        actions
            .iter()
            .fold(Rc::new(state), |state, action| state.reduce(*action))
            .as_ref()
            .clone()
    }

    #[test]
    fn filter_slugs() {
        assert_eq!(Filter::from_slug("all"), Some(Filter::All));
        assert_eq!(Filter::from_slug("ossature"), Some(Filter::Only(Category::Ossature)));
        assert_eq!(Filter::from_slug("piscine"), None);
        for category in Category::ALL {
            assert_eq!(Filter::from_slug(category.slug()), Some(Filter::Only(category)));
        }
    }

    #[test]
    fn filter_matching() {
        assert!(Category::ALL.iter().all(|c| Filter::All.matches(*c)));
        let only = Filter::Only(Category::Renovation);
        let shown: Vec<_> = GALLERY.iter().filter(|e| only.matches(e.category)).map(|e| e.title).collect();
        assert_eq!(shown, vec!["Longère restaurée", "Reprise de fermettes"]);
    }

    #[test]
    fn item_fade_show_and_hide() {
        let (first, delay) = ItemFade::begin(None, false).unwrap();
        assert_eq!(first, ItemFade { displayed: true, opaque: false });
        assert_eq!(delay, 300);
        assert_eq!(ItemFade::finish(false).style(), "display: none; opacity: 0;");

        let hidden = ItemFade::finish(false);
        let (first, delay) = ItemFade::begin(Some(hidden), true).unwrap();
        assert_eq!(first, ItemFade { displayed: true, opaque: false });
        assert_eq!(delay, 10);
        assert_eq!(ItemFade::finish(true), ItemFade::SHOWN);
    }

    #[test]
    fn untouched_item_leaves_reveal_style_alone() {
        assert_eq!(ItemFade::begin(None, true), None);
        let fade: Option<ItemFade> = None;
        let style = crate::reveal::reveal_style(3, fade.map(|f| f.style()).as_deref());
        assert_eq!(style, "transition-delay: 0.3s;");

        // Once filtered, only display and opacity are written; the class keeps
        // its transition and the per-item delay.
        let style = crate::reveal::reveal_style(3, Some(&ItemFade::finish(true).style()));
        assert_eq!(style, "transition-delay: 0.3s; display: block; opacity: 1;");
        assert!(!style.contains("transition:"));
    }

    #[test]
    fn lightbox_pages_wrap_around() {
        let state = reduce(LightboxState::new(3), &[LightboxAction::Open(2), LightboxAction::Next]);
        assert!(state.open);
        assert_eq!(state.index, 0);

        let state = reduce(state, &[LightboxAction::Prev, LightboxAction::Prev]);
        assert_eq!(state.index, 1);
    }

    #[test]
    fn lightbox_close_keeps_position() {
        let state = reduce(LightboxState::new(4), &[LightboxAction::Open(1), LightboxAction::Close]);
        assert!(!state.open);
        assert_eq!(state.index, 1);
    }

    #[test]
    fn lightbox_ignores_out_of_range_and_empty() {
        let state = reduce(LightboxState::new(2), &[LightboxAction::Open(5)]);
        assert!(!state.open);
        let state = reduce(LightboxState::new(0), &[LightboxAction::Next, LightboxAction::Prev]);
        assert_eq!(state.index, 0);
    }

    #[test]
    fn keyboard_mapping() {
        assert_eq!(LightboxAction::from_key("Escape"), Some(LightboxAction::Close));
        assert_eq!(LightboxAction::from_key("ArrowRight"), Some(LightboxAction::Next));
        assert_eq!(LightboxAction::from_key("ArrowLeft"), Some(LightboxAction::Prev));
        assert_eq!(LightboxAction::from_key("Enter"), None);
    }
}
