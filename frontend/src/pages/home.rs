use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::events::subscribe_processed;
use crate::api::videos::fetch_my_videos;
use crate::env_variable_utils::{get_app_name, LOGOUT_URL};
use crate::models::{Notification, Severity, VideoId, VideoRecord};
use crate::router::Route;
use crate::session::{clear_token, logout_redirect_url};
use crate::utils::{current_origin, navigate_to};
use crate::videos::components::{LoadingSpinner, NotificationBar, UploadDropzone, VideoGrid};
use crate::videos::library::{LibraryAction, VideoLibrary};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HomePageProps {
    pub client: ApiClient,
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let library = use_reducer(VideoLibrary::loading);
    let notification = use_state(|| None::<Notification>);

    // Initial load
    {
        let library = library.dispatcher();
        let client = props.client.clone();

        use_effect_with((), move |_| {
            library.dispatch(LibraryAction::LoadStarted);
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_my_videos(&client).await {
                    Ok(videos) => {
                        log::debug!("Fetched {} videos", videos.len());
                        library.dispatch(LibraryAction::Loaded(videos));
                    }
                    Err(e) => {
                        log::error!("Error fetching videos: {}", e);
                        library.dispatch(LibraryAction::LoadFailed(load_error_message(&e)));
                    }
                }
            });
            || ()
        });
    }

    // Push updates, opened alongside the initial load and closed with the view
    {
        let library = library.dispatcher();
        let notification = notification.clone();
        let client = props.client.clone();

        use_effect_with((), move |_| {
            let on_processed = Callback::from(move |record: VideoRecord| {
                library.dispatch(LibraryAction::Processed(record));
            });
            let on_error = Callback::from(move |_: ApiError| {
                notification.set(Some(Notification {
                    message: "Live updates are unavailable; reload to see processing status"
                        .to_string(),
                    severity: Severity::Warning,
                }));
            });

            let subscription = match subscribe_processed(&client, on_processed, on_error) {
                Ok(subscription) => Some(subscription),
                Err(e) => {
                    log::error!("Failed to open event stream: {}", e);
                    None
                }
            };

            move || {
                if let Some(subscription) = subscription {
                    subscription.close();
                }
            }
        });
    }

    let on_uploaded = {
        let library = library.dispatcher();
        Callback::from(move |record: VideoRecord| {
            library.dispatch(LibraryAction::Uploaded(record));
        })
    };

    let on_renamed = {
        let library = library.dispatcher();
        Callback::from(move |record: VideoRecord| {
            library.dispatch(LibraryAction::TitleUpdated(record));
        })
    };

    let on_deleted = {
        let library = library.dispatcher();
        Callback::from(move |id: VideoId| {
            library.dispatch(LibraryAction::Deleted(id));
        })
    };

    let on_notify = {
        let notification = notification.clone();
        Callback::from(move |n: Notification| notification.set(Some(n)))
    };

    let on_close_notification = {
        let notification = notification.clone();
        Callback::from(move |_: MouseEvent| notification.set(None))
    };

    let on_logout = Callback::from(|_: MouseEvent| {
        if let Err(e) = clear_token() {
            log::warn!("{}", e);
        }
        navigate_to(&logout_redirect_url(&LOGOUT_URL, &current_origin()));
    });

    html! {
        <div class="min-h-screen bg-gray-100">
            <NotificationBar
                notification={(*notification).clone()}
                on_close={on_close_notification}
            />
            <AppHeader
                user_name={props.client.session().display_name()}
                on_logout={on_logout}
            />
            <main class="max-w-7xl mx-auto p-8 text-center">
                <div class="pt-4">
                    <UploadDropzone
                        client={props.client.clone()}
                        on_uploaded={on_uploaded}
                        on_notify={on_notify.clone()}
                    />
                </div>

                {
                    if let Some(msg) = library.load_error() {
                        html! {
                            <div class="max-w-xl mx-auto mt-8 bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded">
                                { msg.to_string() }
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }

                {
                    if library.is_loading() {
                        html! {
                            <div class="flex justify-center mt-16">
                                <LoadingSpinner />
                            </div>
                        }
                    } else {
                        html! {
                            <VideoGrid
                                client={props.client.clone()}
                                videos={library.records().to_vec()}
                                on_renamed={on_renamed}
                                on_deleted={on_deleted}
                                on_notify={on_notify}
                            />
                        }
                    }
                }
            </main>
        </div>
    }
}

fn load_error_message(err: &ApiError) -> String {
    if err.is_unauthorized() {
        "Your session has expired. Please log in again.".to_string()
    } else {
        format!("Failed to load videos: {}", err.user_message())
    }
}

#[derive(Properties, PartialEq)]
pub struct AppHeaderProps {
    pub user_name: String,
    pub on_logout: Callback<MouseEvent>,
}

#[function_component(AppHeader)]
pub fn app_header(props: &AppHeaderProps) -> Html {
    html! {
        <header class="bg-blue-800 text-white shadow">
            <div class="flex items-center px-6 py-3">
                <Link<Route> to={Route::Home} classes="flex-grow text-xl font-bold text-left">
                    { get_app_name() }
                </Link<Route>>
                <span class="mr-4 font-medium">{ format!("Welcome, {}", props.user_name) }</span>
                <button
                    onclick={props.on_logout.clone()}
                    class="px-3 py-1 rounded hover:bg-blue-700"
                >
                    {"Logout"}
                </button>
            </div>
        </header>
    }
}
