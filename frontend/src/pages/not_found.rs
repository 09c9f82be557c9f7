use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <main class="not-found-page">
            <h1>{"404"}</h1>
            <p>{"This page wandered off. Let's get you back."}</p>
            <Link<Route> to={Route::Home} classes="hero-cta">
                {"Back to Home"}
            </Link<Route>>
        </main>
    }
}
