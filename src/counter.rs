use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config;

/// A statistic like `150+` split into its number and trailing decoration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterText {
    pub target: u64,
    pub suffix: String,
}

impl CounterText {
    /// Leading digits give the target; every non-digit character is kept as
    /// the suffix. Text without leading digits is not a counter.
    pub fn parse(text: &str) -> Option<CounterText> {
        let trimmed = text.trim();
        let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
        let target = digits.parse().ok()?;
        let suffix = trimmed.chars().filter(|c| !c.is_ascii_digit()).collect();
        Some(CounterText { target, suffix })
    }

    /// Every text the counter shows, ending exactly on the target.
    pub fn frames(&self) -> Vec<String> {
        let steps = u64::from(config::COUNTER_STEPS);
        (1..=steps)
            .map(|step| {
                let value = if step == steps {
                    self.target
                } else {
                    (u128::from(self.target) * u128::from(step) / u128::from(steps)) as u64
                };
                format!("{}{}", value, self.suffix)
            })
            .collect()
    }
}

pub fn step_ms() -> u32 {
    config::COUNTER_DURATION_MS / config::COUNTER_STEPS
}

#[derive(Properties, PartialEq)]
pub struct HeroStatProps {
    pub value: AttrValue,
    pub label: AttrValue,
    /// Set once the hero is sufficiently on screen.
    pub running: bool,
}

#[function_component(HeroStat)]
pub fn hero_stat(props: &HeroStatProps) -> Html {
    let initial = props.value.to_string();
    let shown = use_state(move || initial);

    {
        let shown = shown.clone();
        let value = props.value.clone();
        use_effect_with_deps(
            move |running| {
                if let (true, Some(counter)) = (*running, CounterText::parse(&value)) {
                    spawn_local(async move {
                        for (i, frame) in counter.frames().into_iter().enumerate() {
                            if i > 0 {
                                TimeoutFuture::new(step_ms()).await;
                            }
                            shown.set(frame);
                        }
                    });
                }
                || ()
            },
            props.running,
        );
    }

    html! {
        <div class="hero__stat">
            <span class="hero__stat-number">{(*shown).clone()}</span>
            <span class="hero__stat-label">{props.label.clone()}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_number_and_suffix() {
        assert_eq!(CounterText::parse("150+"), Some(CounterText { target: 150, suffix: "+".into() }));
        assert_eq!(CounterText::parse("98%"), Some(CounterText { target: 98, suffix: "%".into() }));
        assert_eq!(CounterText::parse("24h"), Some(CounterText { target: 24, suffix: "h".into() }));
        assert_eq!(CounterText::parse("Lille"), None);
    }

    #[test]
    fn fifty_frames_ending_on_target() {
        let frames = CounterText::parse("150+").unwrap().frames();
        assert_eq!(frames.len(), 50);
        assert_eq!(frames[0], "3+");
        assert_eq!(frames[24], "75+");
        assert_eq!(frames.last().map(String::as_str), Some("150+"));
    }

    #[test]
    fn small_targets_floor_intermediate_values() {
        let frames = CounterText::parse("15").unwrap().frames();
        assert_eq!(frames[0], "0");
        assert_eq!(frames[3], "1");
        assert_eq!(frames[49], "15");
    }

    #[test]
    fn forty_ms_per_step() {
        assert_eq!(step_ms(), 40);
    }

    #[test]
    fn largest_target_does_not_overflow() {
        let frames = CounterText::parse("18446744073709551615+").unwrap().frames();
        assert_eq!(frames[0], format!("{}+", u64::MAX / 50));
        assert_eq!(frames[48], format!("{}+", (u128::from(u64::MAX) * 49 / 50) as u64));
        assert_eq!(frames[49], "18446744073709551615+");
    }
}
