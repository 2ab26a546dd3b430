use crate::api::client::{check_status, ApiClient};
use crate::api::error::{ApiError, ApiResult};
use crate::config::ClientConfig;
use crate::models::{VideoId, VideoPatch, VideoRecord};
use web_sys::{File, FormData};

/// Uploads `file` as the multipart field `file`. The returned record is
/// always unprocessed; transcoding finishes later and arrives as a push event.
pub async fn upload_video(client: &ApiClient, file: &File) -> ApiResult<VideoRecord> {
    let url = client.config().endpoint("videos");

    let form = FormData::new().map_err(|_| ApiError::Transport("FormData unavailable".into()))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| ApiError::Transport("Failed to attach file".into()))?;

    let response = client.post(&url).body(form)?.send().await?;
    let response = check_status(response, false).await?;
    Ok(response.json::<VideoRecord>().await?)
}

pub async fn fetch_my_videos(client: &ApiClient) -> ApiResult<Vec<VideoRecord>> {
    let url = client.config().endpoint("videos/my-videos");

    let response = client.get(&url).send().await?;
    let response = check_status(response, false).await?;
    Ok(response.json::<Vec<VideoRecord>>().await?)
}

/// Playback source for a video. Pure; the browser fetches the bytes itself.
pub fn stream_url_for(config: &ClientConfig, id: &VideoId) -> String {
    config.video_endpoint(id)
}

/// A 400 comes back as [`ApiError::Validation`] so the caller can tell a
/// rejected title apart from a broken server.
pub async fn update_title(client: &ApiClient, id: &VideoId, title: &str) -> ApiResult<VideoRecord> {
    let url = client.config().video_endpoint(id);
    let patch = VideoPatch {
        title: Some(title.to_string()),
    };

    let response = client.patch(&url).json(&patch)?.send().await?;
    let response = check_status(response, true).await?;
    Ok(response.json::<VideoRecord>().await?)
}

pub async fn delete_video(client: &ApiClient, id: &VideoId) -> ApiResult<()> {
    let url = client.config().video_endpoint(id);

    let response = client.delete(&url).send().await?;
    check_status(response, false).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_url_is_derived_from_base_and_id() {
        let config = ClientConfig::new("http://localhost:8080/");
        assert_eq!(
            stream_url_for(&config, &VideoId::from("1")),
            "http://localhost:8080/videos/1"
        );
        assert_eq!(
            stream_url_for(&config, &VideoId::from("1")),
            stream_url_for(&config, &VideoId::from("1"))
        );
    }
}
