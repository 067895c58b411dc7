use log::info;
use yew::prelude::*;

mod config;
mod contact;
mod counter;
mod gallery;
mod nav;
mod reveal;
mod scroll;
mod components {
    pub mod notification;
}
mod pages {
    pub mod home;
}

use components::notification::NotificationProvider;
use pages::home::Home;

#[function_component]
fn App() -> Html {
    html! {
        <NotificationProvider>
            <Home />
        </NotificationProvider>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Nord Bois Structure - site loaded");
    yew::Renderer::<App>::new().render();
}
