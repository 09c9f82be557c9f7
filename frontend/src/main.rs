use std::rc::Rc;

use yew::prelude::*;
use yew_router::prelude::*;
use yew_hooks::prelude::*;
use log::{debug, error, info};
use web_sys::MouseEvent;

mod config;
mod content;
mod forms {
    pub mod error;
    pub mod fields;
    pub mod profiles;
    pub mod store;
    pub mod timing;
    pub mod machine;
    pub mod session;
}
mod components {
    pub mod form_modal;
    pub mod footer;
}
mod pages {
    pub mod home;
    pub mod events;
    pub mod team;
    pub mod not_found;
}

use components::footer::Footer;
use content::SiteContent;
use forms::session::FormServices;
use pages::{
    home::Home,
    events::Events,
    team::Team,
    not_found::NotFound,
};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/events")]
    Events,
    #[at("/team")]
    Team,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Events => {
            info!("Rendering Events page");
            html! { <Events /> }
        },
        Route::Team => {
            info!("Rendering Team page");
            html! { <Team /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}


#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let (_, scroll_y) = use_window_scroll();
    let is_scrolled = scroll_y > config::NAV_SCROLL_THRESHOLD;

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", is_scrolled.then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {config::SITE_NAME}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Home} classes="nav-link">
                            {"Home"}
                        </Link<Route>>
                    </div>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Events} classes="nav-link">
                            {"Events"}
                        </Link<Route>>
                    </div>
                    <div onclick={close_menu}>
                        <Link<Route> to={Route::Team} classes="nav-link">
                            {"Team"}
                        </Link<Route>>
                    </div>
                </div>
            </div>
        </nav>
    }
}


#[function_component]
fn App() -> Html {
    let content = use_memo(|_| content::load(), ());
    let services = use_memo(|_| FormServices::browser(), ());

    html! {
        <ContextProvider<Rc<SiteContent>> context={content}>
            <ContextProvider<FormServices> context={(*services).clone()}>
                <BrowserRouter>
                    <Nav />
                    <Switch<Route> render={switch} />
                    <Footer />
                </BrowserRouter>
            </ContextProvider<FormServices>>
        </ContextProvider<Rc<SiteContent>>>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    if let Err(e) = forms::profiles::check_profiles() {
        error!("Form configuration is broken: {}", e);
    }
    debug!("{} form fields registered", forms::fields::field_ids().count());

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
