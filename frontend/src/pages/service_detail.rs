use std::rc::Rc;

use chrono::NaiveDateTime;
use shared::api::ServiceResponse;
use shared::forms::{error_messages, BookingForm};
use shared::InterviewSlot;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::interview_calendar::InterviewCalendar;
use crate::config::api_url;
use crate::services::api::ApiService;

/// Gallery items shown before "View more"
const GALLERY_PREVIEW: usize = 4;

#[derive(Clone, PartialEq)]
struct LoadedService {
    service: ServiceResponse,
    slots: Rc<Vec<InterviewSlot>>,
}

#[derive(Properties, PartialEq)]
pub struct ServiceDetailProps {
    pub id: String,
}

#[function_component(ServiceDetail)]
pub fn service_detail(props: &ServiceDetailProps) -> Html {
    let loaded = use_state(|| None::<LoadedService>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    {
        let loaded = loaded.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with(props.id.clone(), move |id| {
            let id = id.clone();
            loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::get_service(&id).await {
                    // Slots are validated once here; a bad record fails the page
                    Ok(service) => match service.interview_slots() {
                        Ok(slots) => {
                            tracing::info!(
                                "Loaded service {} with {} interview slots",
                                service.id,
                                slots.len()
                            );
                            loaded.set(Some(LoadedService {
                                service,
                                slots: Rc::new(slots),
                            }));
                            error.set(None);
                        }
                        Err(e) => {
                            tracing::error!("Service {} has invalid interview dates: {}", id, e);
                            error.set(Some(e.to_string()));
                        }
                    },
                    Err(e) => {
                        tracing::error!("Failed to fetch service {}: {}", id, e);
                        error.set(Some(e));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    if *loading {
        return html! {
            <div class="container">
                <div class="loading">
                    <div class="spinner"></div>
                </div>
            </div>
        };
    }

    match ((*error).clone(), (*loaded).clone()) {
        (Some(message), _) => html! {
            <div class="container">
                <p class="error">{ message }</p>
            </div>
        },
        (None, Some(loaded)) => html! {
            <main class="container service-detail">
                <Gallery service={loaded.service.clone()} />
                <div class="service-columns">
                    <ServiceInfo service={loaded.service.clone()} />
                    <BookingPanel service_id={loaded.service.id.clone()} slots={loaded.slots} />
                </div>
            </main>
        },
        (None, None) => html! {
            <div class="container">
                <div class="loading">
                    <div class="spinner"></div>
                </div>
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
struct ServiceProps {
    service: ServiceResponse,
}

#[function_component(Gallery)]
fn gallery(props: &ServiceProps) -> Html {
    let show_all = use_state(|| false);
    let media = &props.service.media;
    let visible = if *show_all {
        media.len()
    } else {
        media.len().min(GALLERY_PREVIEW)
    };

    let toggle = {
        let show_all = show_all.clone();
        Callback::from(move |_| show_all.set(!*show_all))
    };

    html! {
        <div class="gallery">
            <div class="gallery-grid">
                { for media[..visible].iter().enumerate().map(|(index, item)| html! {
                    <img
                        src={item.url.clone()}
                        alt={format!("Service media {}", index + 1)}
                    />
                })}
            </div>
            if media.len() > GALLERY_PREVIEW {
                <button class="link-button" onclick={toggle}>
                    { if *show_all { "View less" } else { "View more" } }
                </button>
            }
        </div>
    }
}

#[function_component(ServiceInfo)]
fn service_info(props: &ServiceProps) -> Html {
    let docs_open = use_state(|| false);
    let service = &props.service;

    let toggle_docs = {
        let docs_open = docs_open.clone();
        Callback::from(move |_| docs_open.set(!*docs_open))
    };

    html! {
        <div class="service-info">
            <h1>{ &service.service_name }</h1>
            <div class="service-description">
                { Html::from_html_unchecked(AttrValue::from(service.description.clone())) }
            </div>
            <div class="documents">
                <div class="documents-header" onclick={toggle_docs}>
                    <h3>{ "Documents" }</h3>
                    <span>{ if *docs_open { "▲" } else { "▼" } }</span>
                </div>
                if *docs_open {
                    <ul class="documents-list">
                        { for service.documents.iter().map(|doc| html! {
                            <li key={doc.id.clone()}>
                                <a href={api_url(&service.document_path(doc))}>
                                    { &doc.original_name }
                                </a>
                            </li>
                        })}
                    </ul>
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct BookingPanelProps {
    service_id: String,
    slots: Rc<Vec<InterviewSlot>>,
}

#[function_component(BookingPanel)]
fn booking_panel(props: &BookingPanelProps) -> Html {
    let form = use_state(BookingForm::default);
    let problems = use_state(Vec::<String>::new);
    let submitted = use_state(|| false);

    let on_select = {
        let form = form.clone();
        Callback::from(move |instant: NaiveDateTime| {
            let mut next = (*form).clone();
            next.interview_at = Some(instant);
            form.set(next);
        })
    };

    let on_name = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.name = input.value();
            form.set(next);
        })
    };

    let on_email = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.email = input.value();
            form.set(next);
        })
    };

    let on_cv = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                let mut next = (*form).clone();
                next.cv_file_name = Some(file.name());
                form.set(next);
            }
        })
    };

    let on_submit = {
        let form = form.clone();
        let problems = problems.clone();
        let submitted = submitted.clone();
        let service_id = props.service_id.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match (*form).clone().into_request(&service_id) {
                Ok(request) => {
                    tracing::info!(
                        "Booking ready for service {} at {}",
                        request.service_id,
                        request.interview_at
                    );
                    problems.set(Vec::new());
                    submitted.set(true);
                }
                Err(errors) => {
                    let messages = error_messages(&errors);
                    tracing::debug!("Booking form rejected: {:?}", messages);
                    problems.set(messages);
                    submitted.set(false);
                }
            }
        })
    };

    html! {
        <div class="booking-panel">
            <InterviewCalendar
                slots={props.slots.clone()}
                initial={form.interview_at}
                {on_select}
            />
            <form class="booking-summary" onsubmit={on_submit}>
                <h2>{ "Booking Summary" }</h2>
                <label>
                    { "Name" }
                    <input
                        type="text"
                        placeholder="Enter your name"
                        value={form.name.clone()}
                        oninput={on_name}
                    />
                </label>
                <label>
                    { "Email" }
                    <input
                        type="email"
                        placeholder="Enter your email"
                        value={form.email.clone()}
                        oninput={on_email}
                    />
                </label>
                <label class="upload">
                    { "Upload CV:" }
                    <input type="file" accept=".pdf,.doc,.docx" onchange={on_cv} />
                    if let Some(name) = form.cv_file_name.clone() {
                        <p class="upload-current">{ format!("Current CV: {}", name) }</p>
                    }
                </label>
                if !problems.is_empty() {
                    <ul class="form-errors">
                        { for problems.iter().map(|p| html! { <li>{ p }</li> }) }
                    </ul>
                }
                if *submitted {
                    <p class="form-success">{ "Your booking request is ready." }</p>
                }
                <button type="submit" class="btn btn-primary">{ "Submit" }</button>
            </form>
        </div>
    }
}
