use crate::env_variable_utils::LOGIN_URL;
use crate::router::Route;
use crate::session::{login_redirect_url, store_token, token_from_fragment};
use crate::utils::{current_origin, navigate_to};
use web_sys::window;
use yew::prelude::*;
use yew_router::prelude::*;

/// Hands the browser over to the identity provider.
#[function_component(LoginRedirect)]
pub fn login_redirect() -> Html {
    use_effect_with((), |_| {
        let url = login_redirect_url(&LOGIN_URL, &current_origin());
        log::info!("Redirecting to identity provider");
        navigate_to(&url);
    });

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100">
            <p class="text-gray-600">{"Redirecting to sign in..."}</p>
        </div>
    }
}

/// Landing page after sign-in; the provider puts the token in the fragment.
#[function_component(LoginCallback)]
pub fn login_callback() -> Html {
    let navigator = use_navigator();
    let error_message = use_state(|| None::<String>);

    {
        let error_message = error_message.clone();
        use_effect_with((), move |_| {
            let fragment = window()
                .and_then(|w| w.location().hash().ok())
                .unwrap_or_default();

            match token_from_fragment(&fragment) {
                Some(token) => match store_token(&token) {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.replace(&Route::Home);
                        }
                    }
                    Err(e) => error_message.set(Some(e)),
                },
                None => {
                    log::warn!("Login callback without access token");
                    error_message.set(Some("Sign-in did not return an access token".to_string()));
                }
            }
        });
    }

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100">
            <div class="bg-white p-8 rounded-lg shadow-lg text-center">
                {
                    if let Some(msg) = &*error_message {
                        html! {
                            <>
                                <p class="text-red-600 mb-4">{ msg.clone() }</p>
                                <Link<Route> to={Route::Login} classes="text-blue-600 hover:underline">
                                    {"Try again"}
                                </Link<Route>>
                            </>
                        }
                    } else {
                        html! { <p class="text-gray-600">{"Signing in..."}</p> }
                    }
                }
            </div>
        </div>
    }
}
