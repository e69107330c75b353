use yew::prelude::*;

mod components;

use components::{
    button::{Button, ButtonVariant},
    upload::Upload,
};

/// Externally owned sign-in state, read-only from the widgets'
/// perspective. In the real product this comes from the auth provider;
/// the demo shell owns a toggle standing in for it.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AuthContext {
    pub signed_in: bool,
}

#[function_component(App)]
pub fn app() -> Html {
    let signed_in = use_state(|| false);
    let floor_plan = use_state(|| None::<String>);

    let toggle_sign_in = {
        let signed_in = signed_in.clone();
        Callback::from(move |_| {
            signed_in.set(!*signed_in);
        })
    };

    let on_complete = {
        let floor_plan = floor_plan.clone();
        Callback::from(move |data_url: String| {
            floor_plan.set(Some(data_url));
        })
    };

    let auth = AuthContext {
        signed_in: *signed_in,
    };

    html! {
        <ContextProvider<AuthContext> context={auth}>
            <div class="app">
                <header class="header">
                    <div class="logo">
                        <h1>{"Plansift"}</h1>
                    </div>

                    <nav class="nav">
                        <Button variant={ButtonVariant::Ghost} onclick={toggle_sign_in}>
                            { if *signed_in { "Sign out" } else { "Sign in" } }
                        </Button>
                    </nav>
                </header>

                <main class="main-content">
                    if let Some(data_url) = (*floor_plan).as_ref() {
                        <div class="analysis">
                            <img class="floor-plan" src={data_url.clone()} alt="Uploaded floor plan" />
                        </div>
                    } else {
                        <Upload {on_complete} />
                    }
                </main>
            </div>
        </ContextProvider<AuthContext>>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
