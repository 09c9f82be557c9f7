use std::rc::Rc;

use yew::prelude::*;

use crate::components::form_modal::FormModal;
use crate::content::SiteContent;
use crate::forms::profiles;

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

#[function_component(Team)]
pub fn team() -> Html {
    let content = use_context::<Rc<SiteContent>>().unwrap_or_default();
    let form_open = use_state(|| false);
    let team = &content.team;
    let form_type = profiles::resolve_tag(&team.cta_form).form_type;

    let open_form = {
        let form_open = form_open.clone();
        Callback::from(move |_: MouseEvent| form_open.set(true))
    };
    let close_form = {
        let form_open = form_open.clone();
        Callback::from(move |_: ()| form_open.set(false))
    };

    html! {
        <main class="team-page">
            <section class="page-header">
                <h1>{&team.title}</h1>
                <p>{&team.subtitle}</p>
            </section>

            <div class="team-grid">
                { for team.members.iter().map(|member| html! {
                    <div class="team-card" key={member.name.clone()}>
                        <div class="team-avatar">{initials(&member.name)}</div>
                        <h3>{&member.name}</h3>
                        <span class="team-role">{&member.role}</span>
                        if !member.bio.is_empty() {
                            <p>{&member.bio}</p>
                        }
                    </div>
                }) }
            </div>

            <section class="team-cta">
                <button class="hero-cta" onclick={open_form}>{&team.cta_label}</button>
            </section>

            <FormModal
                is_open={*form_open}
                form_type={form_type}
                on_close={close_form}
            />
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::initials;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Aarav Shah"), "AS");
        assert_eq!(initials("isha"), "I");
        assert_eq!(initials("Ada King Lovelace"), "AK");
        assert_eq!(initials(""), "");
    }
}
