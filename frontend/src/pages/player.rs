use crate::api::videos::stream_url_for;
use crate::config::ClientConfig;
use crate::models::VideoId;
use web_sys::{Element, HtmlInputElement, HtmlVideoElement};
use yew::prelude::*;

const SEEK_OFFSET_SECS: f64 = 10.0;
const PLAYBACK_RATES: [f64; 5] = [1.0, 1.25, 1.5, 1.75, 2.0];

/// Where a relative seek lands, kept inside the clip. `duration` is NaN until
/// the metadata has loaded.
pub fn seek_target(current: f64, delta: f64, duration: f64) -> f64 {
    let target = (current + delta).max(0.0);
    if duration.is_finite() {
        target.min(duration)
    } else {
        target
    }
}

/// Position for a drag on the time slider, which reports 0..=`duration`.
pub fn scrub_position(value: f64, duration: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    seek_target(value, 0.0, duration)
}

/// Media elements throw on volumes outside 0..=1.
pub fn clamp_volume(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

pub fn next_playback_rate(current: f64) -> f64 {
    PLAYBACK_RATES
        .iter()
        .copied()
        .find(|rate| *rate > current + f64::EPSILON)
        .unwrap_or(PLAYBACK_RATES[0])
}

pub fn format_playback_time(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0) as u64 } else { 0 };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours != 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoPlayerPageProps {
    pub id: String,
    pub config: ClientConfig,
}

#[function_component(VideoPlayerPage)]
pub fn video_player_page(props: &VideoPlayerPageProps) -> Html {
    let video_ref = use_node_ref();
    let container_ref = use_node_ref();
    let playing = use_state(|| false);
    let muted = use_state(|| false);
    let rate = use_state(|| 1.0_f64);
    let position = use_state(|| 0.0_f64);
    let duration = use_state(|| f64::NAN);
    let volume = use_state(|| 1.0_f64);

    let stream_url = stream_url_for(&props.config, &VideoId::from(props.id.as_str()));

    let on_toggle_play = {
        let video_ref = video_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                if video.paused() {
                    if let Err(e) = video.play() {
                        log::error!("Playback failed: {:?}", e);
                    }
                } else if let Err(e) = video.pause() {
                    log::error!("Pause failed: {:?}", e);
                }
            }
        })
    };

    let seek_by = {
        let video_ref = video_ref.clone();
        move |delta: f64| {
            let video_ref = video_ref.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                    video.set_current_time(seek_target(
                        video.current_time(),
                        delta,
                        video.duration(),
                    ));
                }
            })
        }
    };

    let on_scrub = {
        let video_ref = video_ref.clone();
        let position = position.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value_as_number();
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                let target = scrub_position(value, video.duration());
                video.set_current_time(target);
                position.set(target);
            }
        })
    };

    let on_toggle_mute = {
        let video_ref = video_ref.clone();
        let muted = muted.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                video.set_muted(!video.muted());
                muted.set(video.muted());
            }
        })
    };

    let on_volume = {
        let video_ref = video_ref.clone();
        let volume = volume.clone();
        let muted = muted.clone();
        Callback::from(move |e: InputEvent| {
            let input = e.target_unchecked_into::<HtmlInputElement>();
            let value = clamp_volume(input.value_as_number());
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                video.set_volume(value);
                video.set_muted(value == 0.0);
                muted.set(video.muted());
            }
            volume.set(value);
        })
    };

    let on_cycle_rate = {
        let video_ref = video_ref.clone();
        let rate = rate.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                let next = next_playback_rate(video.playback_rate());
                video.set_playback_rate(next);
                rate.set(next);
            }
        })
    };

    let on_fullscreen = {
        let container_ref = container_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(container) = container_ref.cast::<Element>() {
                if let Err(e) = container.request_fullscreen() {
                    log::warn!("Fullscreen refused: {:?}", e);
                }
            }
        })
    };

    let on_play = {
        let playing = playing.clone();
        Callback::from(move |_: Event| playing.set(true))
    };
    let on_pause = {
        let playing = playing.clone();
        Callback::from(move |_: Event| playing.set(false))
    };
    let on_time_update = {
        let video_ref = video_ref.clone();
        let position = position.clone();
        Callback::from(move |_: Event| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                position.set(video.current_time());
            }
        })
    };
    let on_metadata = {
        let video_ref = video_ref.clone();
        let duration = duration.clone();
        Callback::from(move |_: Event| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                duration.set(video.duration());
            }
        })
    };
    let on_error = Callback::from(|_: Event| log::error!("Video failed to load"));

    let button = "h-11 w-11 flex items-center justify-center rounded hover:bg-white/10";

    html! {
        <div class="max-w-5xl mx-auto my-8 p-4">
            <div ref={container_ref} class="relative w-full aspect-video rounded-xl overflow-hidden bg-black group">
                <video
                    ref={video_ref}
                    src={stream_url}
                    class="w-full h-full"
                    onplay={on_play}
                    onpause={on_pause}
                    ontimeupdate={on_time_update}
                    onloadedmetadata={on_metadata}
                    onerror={on_error}
                    onclick={on_toggle_play.clone()}
                />
                <div class="absolute bottom-0 inset-x-0 px-5 pb-2 text-white bg-gradient-to-t from-black/70 to-transparent">
                    <input
                        type="range"
                        min="0"
                        max={if duration.is_finite() { (*duration).to_string() } else { "0".to_string() }}
                        step="0.1"
                        value={(*position).to_string()}
                        oninput={on_scrub}
                        class="w-full h-1 accent-blue-500 cursor-pointer"
                    />
                    <div class="flex items-center justify-between">
                        <div class="flex items-center gap-1">
                            <button class={button} onclick={on_toggle_play}>
                                { if *playing { "⏸" } else { "▶" } }
                            </button>
                            <button class={button} onclick={seek_by(-SEEK_OFFSET_SECS)}>{"⏪"}</button>
                            <button class={button} onclick={seek_by(SEEK_OFFSET_SECS)}>{"⏩"}</button>
                            <button class={button} onclick={on_toggle_mute}>
                                { if *muted { "🔇" } else { "🔊" } }
                            </button>
                            <input
                                type="range"
                                min="0"
                                max="1"
                                step="0.05"
                                value={if *muted { "0".to_string() } else { (*volume).to_string() }}
                                oninput={on_volume}
                                class="w-20 h-1 accent-white cursor-pointer"
                            />
                            <span class="ml-2 text-sm">
                                { format!("{} / {}", format_playback_time(*position), format_playback_time(*duration)) }
                            </span>
                        </div>
                        <div class="flex items-center">
                            <button class={button} onclick={on_cycle_rate}>{ format!("{}x", *rate) }</button>
                            <button class={button} onclick={on_fullscreen}>{"⛶"}</button>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
