use shared::api::ServiceResponse;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[derive(Properties, PartialEq)]
pub struct ServiceCardProps {
    pub service: ServiceResponse,
}

#[function_component(ServiceCard)]
pub fn service_card(props: &ServiceCardProps) -> Html {
    let service = &props.service;
    let cover = service
        .cover_image
        .clone()
        .or_else(|| service.media.first().map(|item| item.url.clone()));

    html! {
        <div class="service-card">
            if let Some(src) = cover {
                <img class="service-cover" {src} alt={service.service_name.clone()} />
            }
            <h3 class="service-title">{ &service.service_name }</h3>
            <div class="service-meta">
                <span class="service-badge">
                    { format!("{} interview slots", service.interview_dates.len()) }
                </span>
            </div>
            <Link<Route> to={Route::Service { id: service.id.clone() }}>
                <button class="btn btn-primary">{ "Book this Service" }</button>
            </Link<Route>>
        </div>
    }
}
