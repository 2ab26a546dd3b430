use crate::api::client::ApiClient;
use crate::config::ClientConfig;
use crate::pages::home::HomePage;
use crate::pages::login::{LoginCallback, LoginRedirect};
use crate::pages::player::VideoPlayerPage;
use crate::session::load_session;
use chrono::Utc;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/login/callback")]
    LoginCallback,
    #[at("/video/:id")]
    Video { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            let session = load_session();
            if !session.is_authenticated() || session.is_expired_at(Utc::now()) {
                html! { <Redirect<Route> to={Route::Login} /> }
            } else {
                let client = ApiClient::new(ClientConfig::from_env(), session);
                html! { <HomePage client={client} /> }
            }
        }
        Route::Login => html! { <LoginRedirect /> },
        Route::LoginCallback => html! { <LoginCallback /> },
        Route::Video { id } => html! {
            <VideoPlayerPage id={id} config={ClientConfig::from_env()} />
        },
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center bg-gray-100">
                <div class="bg-white p-8 rounded-lg shadow-lg text-center max-w-lg">
                    <h1 class="text-5xl font-bold text-gray-800 mb-2">{"404"}</h1>
                    <h2 class="text-xl text-gray-600 mb-4">{"Page not found"}</h2>
                    <p class="text-gray-500 mb-6">
                        {"The page you are looking for might have been removed, had its name changed, or is temporarily unavailable."}
                    </p>
                    <Link<Route> to={Route::Home} classes="bg-blue-600 text-white px-6 py-3 rounded hover:bg-blue-700">
                        {"Go to Home"}
                    </Link<Route>>
                </div>
            </div>
        },
    }
}
