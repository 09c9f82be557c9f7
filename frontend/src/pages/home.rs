use std::rc::Rc;

use yew::prelude::*;

use crate::components::form_modal::FormModal;
use crate::content::SiteContent;
use crate::forms::profiles;

#[function_component(Home)]
pub fn home() -> Html {
    let content = use_context::<Rc<SiteContent>>().unwrap_or_default();
    let form_open = use_state(|| false);
    let home = &content.home;
    let form_type = profiles::resolve_tag(&home.hero.cta_form).form_type;

    let open_form = {
        let form_open = form_open.clone();
        Callback::from(move |_: MouseEvent| form_open.set(true))
    };
    let close_form = {
        let form_open = form_open.clone();
        Callback::from(move |_: ()| form_open.set(false))
    };

    html! {
        <main class="home-page">
            <section class="hero">
                <h1>{&home.hero.title}</h1>
                <p class="hero-subtitle">{&home.hero.subtitle}</p>
                <button class="hero-cta" onclick={open_form}>
                    {&home.hero.cta_label}
                </button>
            </section>

            <section class="about">
                <h2>{&home.about.title}</h2>
                <p class="section-subtitle">{&home.about.subtitle}</p>
                <p>{&home.about.content}</p>
            </section>

            <section class="mission">
                <h2>{&home.mission.title}</h2>
                <div class="mission-grid">
                    { for home.mission.points.iter().map(|point| html! {
                        <div class="mission-point" key={point.title.clone()}>
                            <h3>{&point.title}</h3>
                            <p>{&point.description}</p>
                        </div>
                    }) }
                </div>
            </section>

            <FormModal
                is_open={*form_open}
                form_type={form_type}
                on_close={close_form}
            />
        </main>
    }
}
