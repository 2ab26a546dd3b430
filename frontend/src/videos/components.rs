use crate::api::client::ApiClient;
use crate::api::videos::{delete_video, stream_url_for, update_title, upload_video};
use crate::models::{Notification, Severity, VideoId, VideoRecord};
use crate::utils::{
    confirm, copy_to_clipboard, current_origin, format_file_size, open_in_new_tab, share_link,
    video_page_path,
};
use crate::videos::title::{TitleAction, TitleField};
use web_sys::{DragEvent, File, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VideoCardProps {
    pub client: ApiClient,
    pub video: VideoRecord,
    pub on_renamed: Callback<VideoRecord>,
    pub on_deleted: Callback<VideoId>,
    pub on_notify: Callback<Notification>,
}

#[function_component(VideoCard)]
pub fn video_card(props: &VideoCardProps) -> Html {
    let title = use_reducer(|| TitleField::new(&props.video.title));
    let deleting = use_state(|| false);

    // Keep the field in step with the canonical title
    {
        let title = title.dispatcher();
        use_effect_with(props.video.title.clone(), move |canonical| {
            title.dispatch(TitleAction::Canonical(canonical.clone()));
        });
    }

    let on_title_input = {
        let title = title.dispatcher();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            title.dispatch(TitleAction::Edit(value));
        })
    };

    let on_title_blur = {
        let title = title.clone();
        let client = props.client.clone();
        let id = props.video.id.clone();
        let on_renamed = props.on_renamed.clone();

        Callback::from(move |_: FocusEvent| {
            let Some(new_title) = (*title).clone().begin_save() else {
                return;
            };
            let title = title.dispatcher();
            let client = client.clone();
            let id = id.clone();
            let on_renamed = on_renamed.clone();

            title.dispatch(TitleAction::SaveStarted);
            wasm_bindgen_futures::spawn_local(async move {
                match update_title(&client, &id, &new_title).await {
                    Ok(record) => {
                        title.dispatch(TitleAction::SaveFinished(Ok(record.clone())));
                        on_renamed.emit(record);
                    }
                    Err(e) => {
                        log::error!("Failed to update title of {}: {}", id, e);
                        title.dispatch(TitleAction::SaveFinished(Err(e)));
                    }
                }
            });
        })
    };

    let on_delete = {
        let deleting = deleting.clone();
        let client = props.client.clone();
        let id = props.video.id.clone();
        let on_deleted = props.on_deleted.clone();
        let on_notify = props.on_notify.clone();

        Callback::from(move |_: MouseEvent| {
            if *deleting || !confirm("Are you sure you want to delete this video?") {
                return;
            }
            let deleting = deleting.clone();
            let client = client.clone();
            let id = id.clone();
            let on_deleted = on_deleted.clone();
            let on_notify = on_notify.clone();

            deleting.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match delete_video(&client, &id).await {
                    Ok(()) => on_deleted.emit(id),
                    Err(e) => {
                        log::error!("Failed to delete video {}: {}", id, e);
                        deleting.set(false);
                        on_notify.emit(Notification::error(format!(
                            "Failed to delete video: {}",
                            e.user_message()
                        )));
                    }
                }
            });
        })
    };

    let on_copy_link = {
        let id = props.video.id.clone();
        let on_notify = props.on_notify.clone();
        Callback::from(move |_: MouseEvent| {
            match copy_to_clipboard(&share_link(&current_origin(), &id)) {
                Ok(()) => on_notify.emit(Notification::info("Link copied to clipboard")),
                Err(e) => {
                    log::error!("Failed to copy video link: {}", e);
                    on_notify.emit(Notification::error("Failed to copy video link"));
                }
            }
        })
    };

    let processed = props.video.is_processed;
    let on_preview_click = {
        let id = props.video.id.clone();
        Callback::from(move |_: MouseEvent| {
            if processed {
                open_in_new_tab(&video_page_path(&id));
            }
        })
    };

    let stream_url = stream_url_for(props.client.config(), &props.video.id);

    html! {
        <div class="w-full max-w-md bg-white border border-gray-300 rounded-lg shadow overflow-hidden">
            <div
                class={classes!(
                    "relative", "w-full", "aspect-[21/10]", "group",
                    if processed { "bg-gray-300 cursor-pointer" } else { "bg-black cursor-default" }
                )}
                onclick={on_preview_click}
            >
                {
                    if processed {
                        html! {
                            <>
                                <video
                                    src={stream_url}
                                    preload="metadata"
                                    class="absolute inset-0 w-full h-full object-cover"
                                />
                                <div class="absolute inset-0 flex items-center justify-center bg-black/30 opacity-0 group-hover:opacity-100 transition-opacity z-10">
                                    <span class="bg-black/60 rounded-full p-3 text-white text-2xl">{"▶"}</span>
                                </div>
                            </>
                        }
                    } else {
                        html! {
                            <div class="absolute inset-0 flex items-center justify-center z-20">
                                <p class="text-white font-bold">{"Processing..."}</p>
                            </div>
                        }
                    }
                }
            </div>
            <div class="flex items-center gap-2 p-2 bg-gray-50 border-t border-gray-200">
                <div class="flex-1">
                    <input
                        type="text"
                        class={classes!(
                            "w-full", "px-2", "py-1", "text-sm", "font-semibold", "rounded",
                            "border", "bg-transparent", "hover:bg-white", "focus:bg-white",
                            "focus:outline-none", "focus:ring-2", "focus:ring-blue-500",
                            if title.error.is_some() { "border-red-500" } else { "border-transparent" }
                        )}
                        value={title.draft.clone()}
                        oninput={on_title_input}
                        onblur={on_title_blur}
                        disabled={title.saving}
                    />
                    {
                        if let Some(error) = title.error {
                            html! { <p class="text-xs text-red-600 mt-1">{ error }</p> }
                        } else {
                            html! {}
                        }
                    }
                </div>
                <button
                    onclick={on_copy_link}
                    title="Copy link"
                    class="w-8 h-8 rounded border border-gray-300 bg-white text-gray-600 hover:bg-gray-100"
                >
                    {"🔗"}
                </button>
                <button
                    onclick={on_delete}
                    disabled={*deleting}
                    title="Delete"
                    class="w-8 h-8 rounded border border-gray-300 bg-white text-red-600 hover:bg-red-50 hover:border-red-600 disabled:opacity-50"
                >
                    {"🗑"}
                </button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct UploadDropzoneProps {
    pub client: ApiClient,
    pub on_uploaded: Callback<VideoRecord>,
    pub on_notify: Callback<Notification>,
}

#[function_component(UploadDropzone)]
pub fn upload_dropzone(props: &UploadDropzoneProps) -> Html {
    let drag_active = use_state(|| false);
    let uploading = use_state(|| false);

    let start_upload = {
        let uploading = uploading.clone();
        let client = props.client.clone();
        let on_uploaded = props.on_uploaded.clone();
        let on_notify = props.on_notify.clone();

        Callback::from(move |file: File| {
            // one upload at a time
            if *uploading {
                return;
            }
            let uploading = uploading.clone();
            let client = client.clone();
            let on_uploaded = on_uploaded.clone();
            let on_notify = on_notify.clone();

            log::info!("Uploading {} ({})", file.name(), format_file_size(file.size()));
            uploading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match upload_video(&client, &file).await {
                    Ok(record) => {
                        log::debug!("Upload accepted as video {}", record.id);
                        on_uploaded.emit(record);
                        on_notify.emit(Notification::success("Video uploaded successfully!"));
                    }
                    Err(e) => {
                        log::error!("Error uploading file: {}", e);
                        on_notify.emit(Notification::error(e.user_message()));
                    }
                }
                uploading.set(false);
            });
        })
    };

    let on_file_selected = {
        let start_upload = start_upload.clone();
        Callback::from(move |e: Event| {
            let input = e.target_unchecked_into::<HtmlInputElement>();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                start_upload.emit(file);
            }
            // allow picking the same file again
            input.set_value("");
        })
    };

    let on_drag_over = {
        let drag_active = drag_active.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            if !*drag_active {
                drag_active.set(true);
            }
        })
    };

    let on_drag_leave = {
        let drag_active = drag_active.clone();
        Callback::from(move |_: DragEvent| drag_active.set(false))
    };

    let on_drop = {
        let drag_active = drag_active.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            drag_active.set(false);
            let file = e
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                start_upload.emit(file);
            }
        })
    };

    html! {
        <label
            class={classes!(
                "flex", "flex-col", "items-center", "justify-center", "w-full", "max-w-xl", "h-48",
                "mx-auto", "border-2", "border-dashed", "rounded-2xl", "cursor-pointer", "transition",
                if *drag_active { "border-blue-500 bg-blue-50" } else { "border-gray-300 bg-white" }
            )}
            ondragover={on_drag_over}
            ondragleave={on_drag_leave}
            ondrop={on_drop}
        >
            <input
                type="file"
                accept="video/*"
                class="hidden"
                onchange={on_file_selected}
                disabled={*uploading}
            />
            {
                if *uploading {
                    html! {
                        <div class="flex flex-col items-center">
                            <LoadingSpinner />
                            <p class="mt-2 text-sm text-gray-600">{"Uploading..."}</p>
                        </div>
                    }
                } else {
                    html! {
                        <>
                            <div class={classes!(
                                "w-12", "h-12", "rounded-full", "flex", "items-center", "justify-center", "text-2xl",
                                if *drag_active { "bg-blue-500 text-white" } else { "bg-gray-100 text-gray-500" }
                            )}>
                                {"⬆"}
                            </div>
                            <p class={classes!("mt-2", "text-lg", if *drag_active { "text-blue-700" } else { "text-gray-700" })}>
                                {
                                    if *drag_active {
                                        "Drop the files here..."
                                    } else {
                                        "Drag and drop files here, or click to select files"
                                    }
                                }
                            </p>
                        </>
                    }
                }
            }
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoGridProps {
    pub client: ApiClient,
    pub videos: Vec<VideoRecord>,
    pub on_renamed: Callback<VideoRecord>,
    pub on_deleted: Callback<VideoId>,
    pub on_notify: Callback<Notification>,
}

#[function_component(VideoGrid)]
pub fn video_grid(props: &VideoGridProps) -> Html {
    if props.videos.is_empty() {
        return html! { <EmptyLibrary /> };
    }

    html! {
        <div class="mt-6 grid gap-2 justify-items-center grid-cols-[repeat(auto-fill,minmax(400px,1fr))]">
            {
                props.videos.iter().map(|video| html! {
                    <VideoCard
                        key={video.id.to_string()}
                        client={props.client.clone()}
                        video={video.clone()}
                        on_renamed={props.on_renamed.clone()}
                        on_deleted={props.on_deleted.clone()}
                        on_notify={props.on_notify.clone()}
                    />
                }).collect::<Html>()
            }
        </div>
    }
}

#[function_component(EmptyLibrary)]
pub fn empty_library() -> Html {
    html! {
        <div class="flex flex-col items-center mt-16 opacity-70">
            <span class="text-6xl text-gray-400">{"🎞"}</span>
            <h2 class="mt-2 text-lg text-gray-600">{"No clips yet"}</h2>
            <p class="text-sm text-gray-500">{"Upload a video to get started"}</p>
        </div>
    }
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner() -> Html {
    html! {
        <div class="w-10 h-10 border-4 border-blue-200 border-t-blue-600 rounded-full animate-spin"></div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationBarProps {
    pub notification: Option<Notification>,
    pub on_close: Callback<MouseEvent>,
}

#[function_component(NotificationBar)]
pub fn notification_bar(props: &NotificationBarProps) -> Html {
    let Some(notification) = &props.notification else {
        return html! {};
    };

    let colors = match notification.severity {
        Severity::Success => "bg-green-100 border-green-400 text-green-700",
        Severity::Info => "bg-blue-100 border-blue-400 text-blue-700",
        Severity::Warning => "bg-yellow-100 border-yellow-400 text-yellow-800",
        Severity::Error => "bg-red-100 border-red-400 text-red-700",
    };

    html! {
        <div class="fixed bottom-4 left-1/2 -translate-x-1/2 z-50 w-full max-w-md px-4">
            <div class={classes!("flex", "items-center", "justify-between", "border", "px-4", "py-3", "rounded", "shadow", colors)}>
                <span>{ notification.message.clone() }</span>
                <button onclick={props.on_close.clone()} class="ml-4 font-bold">{"×"}</button>
            </div>
        </div>
    }
}
