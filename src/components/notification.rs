use std::rc::Rc;

use chrono::{DateTime, Utc};
use gloo_timers::callback::Timeout;
use log::{debug, info};
use yew::prelude::*;

use crate::config;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }

    fn background(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#2D5A3D",
            NotificationKind::Error => "#dc3545",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Visible(Notification),
    Dismissing(Notification),
}

/// Identifies one shown notification. Timers carry the ticket they were
/// started for, so a late timer never touches a newer notification.
pub type Ticket = u64;

#[derive(Clone, Debug, PartialEq)]
pub enum PresenterAction {
    Show {
        message: String,
        kind: NotificationKind,
        at: DateTime<Utc>,
    },
    /// Close button or auto-dismiss expiry.
    Dismiss(Ticket),
    /// End of the slide-out animation.
    Teardown(Ticket),
}

/// Single toast slot: `Idle -> Visible -> Dismissing -> Idle`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Presenter {
    phase: Phase,
    ticket: Ticket,
}

impl Presenter {
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn current(&self) -> Option<&Notification> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Visible(notification) | Phase::Dismissing(notification) => Some(notification),
        }
    }

    /// The delayed action the current phase is waiting on, if any.
    pub fn pending_timer(&self) -> Option<(u32, PresenterAction)> {
        match self.phase {
            Phase::Idle => None,
            Phase::Visible(_) => Some((config::NOTIFICATION_LIFETIME_MS, PresenterAction::Dismiss(self.ticket))),
            Phase::Dismissing(_) => Some((config::NOTIFICATION_TEARDOWN_MS, PresenterAction::Teardown(self.ticket))),
        }
    }

    fn apply(&self, action: PresenterAction) -> Option<Presenter> {
        match action {
            PresenterAction::Show { message, kind, at } => Some(Presenter {
                // Whatever was showing is discarded without animation.
                phase: Phase::Visible(Notification { message, kind, created_at: at }),
                ticket: self.ticket + 1,
            }),
            PresenterAction::Dismiss(ticket) if ticket == self.ticket => match &self.phase {
                Phase::Visible(notification) => Some(Presenter {
                    phase: Phase::Dismissing(notification.clone()),
                    ticket,
                }),
                _ => None,
            },
            PresenterAction::Teardown(ticket) if ticket == self.ticket => match &self.phase {
                Phase::Dismissing(_) => Some(Presenter { phase: Phase::Idle, ticket }),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Reducible for Presenter {
    type Action = PresenterAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match self.apply(action) {
            Some(next) => Rc::new(next),
            None => self,
        }
    }
}

/// Handle other components use to raise a notification.
#[derive(Clone, PartialEq)]
pub struct Toaster {
    notify: Callback<(String, NotificationKind)>,
}

impl Toaster {
    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) {
        self.notify.emit((message.into(), kind));
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(NotificationProvider)]
pub fn notification_provider(props: &NotificationProviderProps) -> Html {
    let presenter = use_reducer(Presenter::default);

    let toaster = {
        let dispatcher = presenter.dispatcher();
        use_memo(
            move |_| Toaster {
                notify: Callback::from(move |(message, kind): (String, NotificationKind)| {
                    info!("notification shown ({}): {}", kind.as_str(), message);
                    dispatcher.dispatch(PresenterAction::Show { message, kind, at: Utc::now() });
                }),
            },
            (),
        )
    };

    // Re-runs whenever the phase or ticket changes; dropping the old
    // Timeout in the cleanup cancels it.
    {
        let dispatcher = presenter.dispatcher();
        use_effect_with_deps(
            move |pending| {
                let timeout = pending.clone().map(|(delay, action)| {
                    Timeout::new(delay, move || {
                        debug!("notification timer fired: {:?}", action);
                        dispatcher.dispatch(action);
                    })
                });
                move || drop(timeout)
            },
            presenter.pending_timer(),
        );
    }

    let on_close = {
        let dispatcher = presenter.dispatcher();
        let ticket = presenter.ticket();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(PresenterAction::Dismiss(ticket)))
    };

    let toast = match presenter.current() {
        None => html! {},
        Some(notification) => {
            let animation = if matches!(presenter.phase(), Phase::Dismissing(_)) {
                "slideOut 0.3s ease forwards"
            } else {
                "slideIn 0.3s ease"
            };
            let kind = notification.kind;
            html! {
                <div
                    key={presenter.ticket().to_string()}
                    class={classes!("notification", format!("notification--{}", kind.as_str()))}
                    role="status"
                    data-created-at={notification.created_at.to_rfc3339()}
                    style={format!(
                        "position: fixed; top: 100px; right: 20px; max-width: 400px; padding: 1rem 1.5rem; \
                         background: {}; color: white; border-radius: 8px; box-shadow: 0 4px 20px rgba(0,0,0,0.2); \
                         display: flex; align-items: center; gap: 1rem; z-index: 3000; animation: {};",
                        kind.background(),
                        animation,
                    )}
                >
                    <span>{&notification.message}</span>
                    <button class="notification__close" onclick={on_close}>{"×"}</button>
                </div>
            }
        }
    };

    html! {
        <ContextProvider<Toaster> context={(*toaster).clone()}>
            <style>
                {r#"
                    @keyframes slideIn {
                        from { transform: translateX(100%); opacity: 0; }
                        to { transform: translateX(0); opacity: 1; }
                    }
                    @keyframes slideOut {
                        from { transform: translateX(0); opacity: 1; }
                        to { transform: translateX(100%); opacity: 0; }
                    }
                    .notification__close {
                        background: none;
                        border: none;
                        color: white;
                        font-size: 1.5rem;
                        cursor: pointer;
                        line-height: 1;
                    }
                "#}
            </style>
            { for props.children.iter() }
            { toast }
        </ContextProvider<Toaster>>
    }
}
