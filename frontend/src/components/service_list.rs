use shared::api::ServiceResponse;
use yew::prelude::*;

use crate::components::service_card::ServiceCard;

#[derive(Properties, PartialEq)]
pub struct ServiceListProps {
    pub services: Vec<ServiceResponse>,
}

#[function_component(ServiceList)]
pub fn service_list(props: &ServiceListProps) -> Html {
    if props.services.is_empty() {
        return html! {
            <div class="empty-state">
                <h2>{ "No services yet!" }</h2>
                <p>{ "Tours open for booking will appear here." }</p>
            </div>
        };
    }

    html! {
        <div class="service-grid">
            { for props.services.iter().map(|service| html! {
                <ServiceCard key={service.id.clone()} service={service.clone()} />
            })}
        </div>
    }
}
