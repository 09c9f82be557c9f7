use std::rc::Rc;

use yew::prelude::*;

use crate::components::form_modal::FormModal;
use crate::content::{ClubEvent, SiteContent};
use crate::forms::profiles::FormType;

#[derive(Properties, PartialEq)]
struct EventCardProps {
    event: ClubEvent,
    on_register: Callback<String>,
}

#[function_component(EventCard)]
fn event_card(props: &EventCardProps) -> Html {
    let event = &props.event;
    let register = {
        let on_register = props.on_register.clone();
        let title = event.title.clone();
        Callback::from(move |_: MouseEvent| on_register.emit(title.clone()))
    };

    html! {
        <div class="event-card">
            <span class={classes!("event-kind", event.kind.to_lowercase())}>{&event.kind}</span>
            <h3>{&event.title}</h3>
            <p class="event-description">{&event.description}</p>
            <ul class="event-meta">
                <li>{"📅 "}{&event.date}</li>
                <li>{"🕒 "}{&event.time}</li>
                <li>{"📍 "}{&event.location}</li>
            </ul>
            <button class="event-register" onclick={register}>{"Register"}</button>
        </div>
    }
}

#[function_component(Events)]
pub fn events() -> Html {
    let content = use_context::<Rc<SiteContent>>().unwrap_or_default();
    let selected = use_state(|| None::<String>);

    let on_register = {
        let selected = selected.clone();
        Callback::from(move |title: String| selected.set(Some(title)))
    };
    let close_form = {
        let selected = selected.clone();
        Callback::from(move |_: ()| selected.set(None))
    };

    html! {
        <main class="events-page">
            <section class="page-header">
                <span class="page-badge">{"📅 Mark Your Calendar"}</span>
                <h1>{&content.events.title}</h1>
                <p>{&content.events.subtitle}</p>
            </section>

            <div class="events-grid">
                { for content.events.items.iter().map(|event| html! {
                    <EventCard
                        key={event.title.clone()}
                        event={event.clone()}
                        on_register={on_register.clone()}
                    />
                }) }
            </div>
            <p class="events-more">{"// More events coming soon..."}</p>

            <FormModal
                is_open={selected.is_some()}
                form_type={FormType::EventRegister}
                event_title={(*selected).clone()}
                on_close={close_form}
            />
        </main>
    }
}
