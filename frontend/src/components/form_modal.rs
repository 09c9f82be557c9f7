use log::error;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::forms::fields::{FieldDefinition, FieldIssue, FieldKind};
use crate::forms::machine::{Phase, SubmitAttempt, ValidationErrors};
use crate::forms::profiles::FormType;
use crate::forms::session::{FormServices, FormSession};

#[derive(Properties, PartialEq)]
pub struct FormModalProps {
    pub is_open: bool,
    pub form_type: FormType,
    #[prop_or_default]
    pub event_title: Option<String>,
    pub on_close: Callback<()>,
    /// Receives the per-field failures of every rejected submit.
    #[prop_or_default]
    pub on_invalid: Callback<ValidationErrors>,
}

pub enum FormModalMsg {
    Input(&'static str, String),
    Submit,
    Refresh,
    Dismiss,
    Finished,
}

pub struct FormModal {
    services: FormServices,
    session: Option<FormSession>,
}

impl FormModal {
    fn open_session(&self, ctx: &Context<Self>) -> Option<FormSession> {
        let props = ctx.props();
        match FormSession::open(
            props.form_type,
            props.event_title.clone(),
            self.services.clone(),
            ctx.link().callback(|_: ()| FormModalMsg::Refresh),
            ctx.link().callback(|_: ()| FormModalMsg::Finished),
        ) {
            Ok(session) => Some(session),
            Err(e) => {
                error!("Cannot open {} form: {}", props.form_type.tag(), e);
                None
            }
        }
    }

    fn render_field(
        link: &Scope<Self>,
        field: &'static FieldDefinition,
        value: &str,
        issue: Option<FieldIssue>,
    ) -> Html {
        let id = field.id;
        let control = match field.kind {
            FieldKind::SingleSelect(options) => html! {
                <select
                    id={id}
                    name={id}
                    required={field.required}
                    onchange={link.callback(move |e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        FormModalMsg::Input(id, select.value())
                    })}
                >
                    <option value="" selected={value.is_empty()}>{field.placeholder}</option>
                    { for options.iter().map(|option| html! {
                        <option value={*option} selected={*option == value}>{*option}</option>
                    }) }
                </select>
            },
            FieldKind::MultilineText { rows } => html! {
                <textarea
                    id={id}
                    name={id}
                    rows={rows.to_string()}
                    value={value.to_string()}
                    placeholder={field.placeholder}
                    required={field.required}
                    oninput={link.callback(move |e: InputEvent| {
                        let area: HtmlTextAreaElement = e.target_unchecked_into();
                        FormModalMsg::Input(id, area.value())
                    })}
                />
            },
            FieldKind::ShortText | FieldKind::Email | FieldKind::Phone | FieldKind::Url => html! {
                <input
                    id={id}
                    type={field.kind.input_type()}
                    name={id}
                    value={value.to_string()}
                    placeholder={field.placeholder}
                    required={field.required}
                    oninput={link.callback(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        FormModalMsg::Input(id, input.value())
                    })}
                />
            },
        };

        html! {
            <div class={classes!("form-field", issue.is_some().then(|| "invalid"))}>
                <label for={id}>
                    if let Some(icon) = field.icon {
                        <span class="field-icon">{icon}</span>
                    }
                    {field.label}
                </label>
                {control}
                if let Some(issue) = issue {
                    <p class="field-error">{issue.to_string()}</p>
                }
            </div>
        }
    }
}

impl Component for FormModal {
    type Message = FormModalMsg;
    type Properties = FormModalProps;

    fn create(ctx: &Context<Self>) -> Self {
        let services = ctx
            .link()
            .context::<FormServices>(Callback::noop())
            .map(|(services, _)| services)
            .unwrap_or_else(FormServices::browser);
        let mut modal = Self {
            services,
            session: None,
        };
        if ctx.props().is_open {
            modal.session = modal.open_session(ctx);
        }
        modal
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        let reopened = props.is_open
            && (!old_props.is_open
                || props.form_type != old_props.form_type
                || props.event_title != old_props.event_title);
        if !props.is_open || reopened {
            if let Some(session) = self.session.take() {
                session.dismiss();
            }
        }
        if reopened {
            self.session = self.open_session(ctx);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            FormModalMsg::Input(id, value) => match &self.session {
                Some(session) => session.input(id, value),
                None => false,
            },
            FormModalMsg::Submit => {
                if let Some(session) = &self.session {
                    if let SubmitAttempt::Rejected(errors) = session.submit() {
                        ctx.props().on_invalid.emit(errors);
                    }
                }
                true
            }
            FormModalMsg::Refresh => true,
            FormModalMsg::Dismiss => {
                if let Some(session) = self.session.take() {
                    session.dismiss();
                }
                ctx.props().on_close.emit(());
                true
            }
            FormModalMsg::Finished => {
                ctx.props().on_close.emit(());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let session = match (&self.session, ctx.props().is_open) {
            (Some(session), true) => session,
            _ => return html! {},
        };
        let link = ctx.link();
        let machine = session.machine();
        let phase = machine.phase();

        let dismiss = link.callback(|_: MouseEvent| FormModalMsg::Dismiss);
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            FormModalMsg::Submit
        });

        html! {
            <div class="form-modal">
                <style>
                    {r#"
                    .form-modal {
                        position: fixed;
                        inset: 0;
                        z-index: 50;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        padding: 1rem;
                    }
                    .form-modal-backdrop {
                        position: absolute;
                        inset: 0;
                        background: rgba(10, 10, 20, 0.8);
                        backdrop-filter: blur(4px);
                    }
                    .form-modal-panel {
                        position: relative;
                        width: 100%;
                        max-width: 32rem;
                        max-height: 90vh;
                        overflow-y: auto;
                        background: #16161f;
                        border: 1px solid rgba(126, 178, 255, 0.15);
                        border-radius: 16px;
                        padding: 2rem;
                        box-shadow: 0 16px 48px rgba(0, 0, 0, 0.4);
                    }
                    .form-modal-close {
                        position: absolute;
                        top: 1rem;
                        right: 1rem;
                        background: none;
                        border: none;
                        color: rgba(255, 255, 255, 0.6);
                        font-size: 1.25rem;
                        cursor: pointer;
                    }
                    .form-modal-header { text-align: center; margin-bottom: 2rem; }
                    .form-modal-header h2 { margin: 0 0 0.5rem; color: #fff; }
                    .form-modal-header p { margin: 0; color: rgba(255, 255, 255, 0.6); }
                    .form-field { display: flex; flex-direction: column; gap: 0.5rem; margin-bottom: 1rem; }
                    .form-field label { color: #fff; font-size: 0.875rem; display: flex; gap: 0.5rem; }
                    .form-field input, .form-field select, .form-field textarea {
                        padding: 0.75rem 1rem;
                        border-radius: 12px;
                        background: #22222e;
                        border: 1px solid #33334a;
                        color: #fff;
                        resize: none;
                    }
                    .form-field.invalid input, .form-field.invalid select, .form-field.invalid textarea {
                        border-color: #ff6b6b;
                    }
                    .field-error { margin: 0; color: #ff6b6b; font-size: 0.8rem; }
                    .form-submit {
                        width: 100%;
                        padding: 1rem;
                        border: none;
                        border-radius: 12px;
                        background: linear-gradient(45deg, #1E90FF, #7EB2FF);
                        color: #fff;
                        font-weight: 600;
                        cursor: pointer;
                    }
                    .form-submit:disabled { opacity: 0.5; cursor: default; }
                    .loading-spinner {
                        display: inline-block;
                        width: 20px;
                        height: 20px;
                        border: 3px solid rgba(255,255,255,.3);
                        border-radius: 50%;
                        border-top-color: #fff;
                        animation: spin 1s linear infinite;
                    }
                    @keyframes spin { to { transform: rotate(360deg); } }
                    .form-success { text-align: center; padding: 3rem 0; color: #fff; }
                    .form-success p { color: rgba(255, 255, 255, 0.6); }
                    "#}
                </style>
                <div class="form-modal-backdrop" onclick={dismiss.clone()}></div>
                <div class="form-modal-panel">
                    <button class="form-modal-close" onclick={dismiss}>{"✕"}</button>
                    if phase == Phase::Success {
                        <div class="form-success">
                            <div style="font-size: 2.5rem;">{"🚀"}</div>
                            <h3>{"Submitted Successfully!"}</h3>
                            <p>{"We'll get back to you soon."}</p>
                        </div>
                    } else {
                        <>
                        <div class="form-modal-header">
                            <h2>{machine.title()}</h2>
                            <p>{machine.profile().subtitle}</p>
                        </div>
                        <form onsubmit={onsubmit} novalidate={true}>
                            { for machine.fields().iter().map(|field| {
                                Self::render_field(link, *field, machine.value(field.id), machine.error(field.id))
                            }) }
                            <button type="submit" class="form-submit" disabled={phase == Phase::Submitting}>
                                if phase == Phase::Submitting {
                                    <span class="loading-spinner"></span>
                                } else {
                                    {"Submit Application"}
                                }
                            </button>
                        </form>
                        </>
                    }
                </div>
            </div>
        }
    }
}
