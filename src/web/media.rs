//! Browser media: camera streams, the `<video>` sink and picked files.

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileList, FileReader, HtmlVideoElement, MediaDevices, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::camera::{CaptureDevice, CaptureStream, VideoConstraints, VideoSink};
use crate::controller::PreviewFile;
use crate::error::PageError;
use crate::upload::PickedFile;

use super::dom;

fn camera_error(value: JsValue) -> PageError {
    PageError::Camera(dom::js_message(&value))
}

/// The browser's media devices.
pub struct BrowserCamera {
    devices: MediaDevices,
}

impl BrowserCamera {
    /// Media devices of the current window.
    pub fn new() -> Result<Self, PageError> {
        let devices = dom::window()?
            .navigator()
            .media_devices()
            .map_err(camera_error)?;
        Ok(Self { devices })
    }
}

impl CaptureDevice for BrowserCamera {
    type Stream = MediaStream;

    async fn open(&self, constraints: VideoConstraints) -> Result<MediaStream, PageError> {
        let video = Object::new();
        Reflect::set(&video, &"width".into(), &JsValue::from(constraints.width))
            .map_err(dom::js_error)?;
        Reflect::set(&video, &"height".into(), &JsValue::from(constraints.height))
            .map_err(dom::js_error)?;

        let request = MediaStreamConstraints::new();
        request.set_video(&video);

        let promise = self
            .devices
            .get_user_media_with_constraints(&request)
            .map_err(camera_error)?;
        let stream = JsFuture::from(promise).await.map_err(camera_error)?;
        stream
            .dyn_into::<MediaStream>()
            .map_err(|_| PageError::Camera("getUserMedia did not return a MediaStream".to_string()))
    }
}

impl CaptureStream for MediaStream {
    fn stop_all_tracks(&self) {
        for track in self.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                log::debug!("Stopping {} track {}", track.kind(), track.label());
                track.stop();
            }
        }
    }
}

/// A `<video>` element showing the webcam.
pub struct VideoElement(pub HtmlVideoElement);

impl VideoSink for VideoElement {
    type Stream = MediaStream;

    fn attach(&self, stream: MediaStream) -> Result<(), PageError> {
        self.0.set_src_object(Some(&stream));
        let play = self.0.play().map_err(dom::js_error)?;
        // Autoplay refusals only delay the picture; nothing to report to the user
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(play).await {
                log::warn!("Video playback did not start: {}", dom::js_message(&e));
            }
        });
        Ok(())
    }

    fn detach(&self) -> Option<MediaStream> {
        let stream = self.0.src_object()?;
        self.0.set_src_object(None);
        Some(stream)
    }
}

impl PreviewFile for File {
    fn info(&self) -> PickedFile {
        PickedFile::new(self.name(), self.type_(), self.size() as u64)
    }

    async fn read_data_url(&self) -> Result<String, PageError> {
        let reader = FileReader::new().map_err(dom::js_error)?;
        let loaded = Promise::new(&mut |resolve: Function, reject: Function| {
            reader.set_onload(Some(&resolve));
            reader.set_onerror(Some(&reject));
        });
        reader.read_as_data_url(self).map_err(dom::js_error)?;

        JsFuture::from(loaded)
            .await
            .map_err(|_| PageError::Js(format!("Could not read {}", self.name())))?;
        reader
            .result()
            .map_err(dom::js_error)?
            .as_string()
            .ok_or_else(|| PageError::Js(format!("{} did not decode to a data URL", self.name())))
    }
}

/// Files of a file list, in order.
pub fn files(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}
