use shared::api::ServiceResponse;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::service_list::ServiceList;
use crate::services::api::ApiService;

#[function_component(Home)]
pub fn home() -> Html {
    let services = use_state(Vec::<ServiceResponse>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let search = use_state(String::new);

    {
        let services = services.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::list_services().await {
                    Ok(response) => {
                        services.set(response);
                        loading.set(false);
                    }
                    Err(e) => {
                        tracing::error!("Failed to fetch services: {}", e);
                        error.set(Some(e));
                        loading.set(false);
                    }
                }
            });
            || ()
        });
    }

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let filtered: Vec<ServiceResponse> = services
        .iter()
        .filter(|service| service.matches(&search))
        .cloned()
        .collect();

    let content = match (*loading, (*error).clone()) {
        (true, _) => html! {
            <div class="loading">
                <div class="spinner"></div>
            </div>
        },
        (false, Some(message)) => html! { <p class="error">{ message }</p> },
        (false, None) => html! { <ServiceList services={filtered} /> },
    };

    html! {
        <div class="container">
            <h2>{ "Our Services" }</h2>
            <input
                type="text"
                class="service-search"
                placeholder="Search services..."
                value={(*search).clone()}
                oninput={on_search}
            />
            { content }
        </div>
    }
}
