use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::config;

/// Transition delay for the `index`-th element of a revealed group.
pub fn stagger_delay(index: usize) -> f64 {
    (index % 4) as f64 * config::REVEAL_STAGGER_S
}

pub fn stagger_style(index: usize) -> String {
    format!("transition-delay: {:.1}s;", stagger_delay(index))
}

/// Inline style of a revealed element: its delay, then any caller style.
pub fn reveal_style(index: usize, extra: Option<&str>) -> String {
    match extra {
        Some(extra) => format!("{} {}", stagger_style(index), extra),
        None => stagger_style(index),
    }
}

/// Index of the first element of each group when the groups are numbered
/// one after the other in page order.
pub fn group_offsets<const N: usize>(sizes: [usize; N]) -> [usize; N] {
    let mut next = 0;
    sizes.map(|size| {
        let start = next;
        next += size;
        start
    })
}

/// Flips to `true` the first time `threshold` of the node intersects the
/// viewport, and stays there.
#[hook]
pub fn use_in_view(node: NodeRef, threshold: f64) -> bool {
    let in_view = use_state_eq(|| false);

    {
        let in_view = in_view.clone();
        use_effect_with_deps(
            move |node| {
                let observer = node.cast::<Element>().and_then(|element| {
                    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
                        let hit = entries.iter().any(|entry| {
                            entry
                                .dyn_into::<IntersectionObserverEntry>()
                                .map(|entry| entry.is_intersecting())
                                .unwrap_or(false)
                        });
                        if hit {
                            in_view.set(true);
                            observer.disconnect();
                        }
                    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

                    let options = IntersectionObserverInit::new();
                    options.set_threshold(&JsValue::from_f64(threshold));
                    let observer =
                        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
                    observer.observe(&element);
                    Some((observer, callback))
                });

                move || {
                    if let Some((observer, _callback)) = observer {
                        observer.disconnect();
                    }
                }
            },
            node,
        );
    }

    *in_view
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub index: usize,
    #[prop_or_default]
    pub onclick: Option<Callback<MouseEvent>>,
    #[prop_or_default]
    pub style: Option<String>,
    #[prop_or_default]
    pub children: Children,
}

/// Fades its children in once they scroll into view.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let visible = use_in_view(node.clone(), config::REVEAL_THRESHOLD);

    let style = reveal_style(props.index, props.style.as_deref());

    html! {
        <div
            ref={node}
            class={classes!(props.class.clone(), "fade-in", visible.then_some("visible"))}
            style={style}
            onclick={props.onclick.clone()}
        >
            { for props.children.iter() }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_cycle_every_four_elements() {
        let delays: Vec<f64> = (0..6).map(stagger_delay).collect();
        let expected = [0.0, 0.1, 0.2, 0.3, 0.0, 0.1];
        for (got, want) in delays.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
    }

    #[test]
    fn style_carries_the_delay() {
        assert_eq!(stagger_style(0), "transition-delay: 0.0s;");
        assert_eq!(stagger_style(3), "transition-delay: 0.3s;");
        assert_eq!(stagger_style(2), "transition-delay: 0.2s;");
    }

    #[test]
    fn caller_style_follows_the_delay() {
        assert_eq!(reveal_style(1, None), "transition-delay: 0.1s;");
        assert_eq!(
            reveal_style(6, Some("display: block; opacity: 0;")),
            "transition-delay: 0.2s; display: block; opacity: 0;"
        );
    }

    #[test]
    fn groups_are_numbered_in_page_order() {
        assert_eq!(group_offsets([6, 4, 3, 8, 3, 3]), [0, 6, 10, 13, 21, 24]);
        // The values block continues the services cycle instead of restarting at 0s.
        let offsets = group_offsets([6, 4]);
        assert!((stagger_delay(offsets[1]) - 0.2).abs() < 1e-9);
    }
}
