use chrono::{Datelike, Utc};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::SITE_NAME;
use crate::Route;

#[function_component(Footer)]
pub fn footer() -> Html {
    let year = Utc::now().year();
    html! {
        <footer class="site-footer">
            <div class="footer-links">
                <Link<Route> to={Route::Home} classes="footer-link">{"Home"}</Link<Route>>
                <Link<Route> to={Route::Events} classes="footer-link">{"Events"}</Link<Route>>
                <Link<Route> to={Route::Team} classes="footer-link">{"Team"}</Link<Route>>
            </div>
            <p>{format!("© {} {}. Built by students, for students.", year, SITE_NAME)}</p>
        </footer>
    }
}
