//! Webcam capture.
//!
//! A capture device hands out streams; a video sink displays at most one
//! stream at a time. Starting attaches a fresh stream, stopping takes it
//! back out of the sink and stops every track so the camera light goes off.

use std::future::Future;

use crate::config::WebcamConfig;
use crate::error::PageError;

/// Video constraints for the capture request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoConstraints {
    /// Ideal width in pixels
    pub width: u32,
    /// Ideal height in pixels
    pub height: u32,
}

impl Default for VideoConstraints {
    fn default() -> Self {
        WebcamConfig::default().into()
    }
}

impl From<WebcamConfig> for VideoConstraints {
    fn from(config: WebcamConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }
}

/// A live capture stream.
pub trait CaptureStream {
    /// Stop every track of the stream.
    fn stop_all_tracks(&self);
}

/// Something that can open capture streams (the browser's media devices).
pub trait CaptureDevice {
    /// Stream type produced.
    type Stream: CaptureStream;

    /// Request a video stream. Permission or device failures are errors.
    fn open(
        &self,
        constraints: VideoConstraints,
    ) -> impl Future<Output = Result<Self::Stream, PageError>>;
}

/// Where a stream is displayed (a `<video>` element).
pub trait VideoSink {
    /// Stream type displayed.
    type Stream: CaptureStream;

    /// Attach a stream and start playback.
    fn attach(&self, stream: Self::Stream) -> Result<(), PageError>;

    /// Detach and return the current stream, leaving the sink empty.
    fn detach(&self) -> Option<Self::Stream>;
}

/// Open a stream and show it in `sink`.
///
/// A stream that was already attached is released first, so repeated starts
/// never leave an orphaned camera running.
pub async fn start<D, S>(device: &D, sink: &S, constraints: VideoConstraints) -> Result<(), PageError>
where
    D: CaptureDevice,
    S: VideoSink<Stream = D::Stream>,
{
    let stream = device.open(constraints).await?;
    if let Some(previous) = sink.detach() {
        log::debug!("Releasing previous webcam stream");
        previous.stop_all_tracks();
    }
    sink.attach(stream)
}

/// Release the stream shown in `sink`.
///
/// Returns `false` when there was nothing to stop.
pub fn stop<S: VideoSink>(sink: &S) -> bool {
    match sink.detach() {
        Some(stream) => {
            stream.stop_all_tracks();
            true
        }
        None => false,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory camera for controller tests.

    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    /// A fake track that remembers whether it was stopped.
    #[derive(Debug, Default)]
    pub struct FakeTrack {
        pub stopped: Cell<bool>,
    }

    /// A stream of shared fake tracks.
    #[derive(Debug, Clone, Default)]
    pub struct FakeStream {
        pub tracks: Vec<Rc<FakeTrack>>,
    }

    impl CaptureStream for FakeStream {
        fn stop_all_tracks(&self) {
            for track in &self.tracks {
                track.stopped.set(true);
            }
        }
    }

    /// Hands out streams with two tracks, or fails when `deny` is set.
    #[derive(Default)]
    pub struct FakeDevice {
        pub deny: bool,
        pub opened: RefCell<Vec<Rc<FakeTrack>>>,
        pub last_constraints: Cell<Option<VideoConstraints>>,
    }

    impl CaptureDevice for FakeDevice {
        type Stream = FakeStream;

        async fn open(&self, constraints: VideoConstraints) -> Result<FakeStream, PageError> {
            self.last_constraints.set(Some(constraints));
            if self.deny {
                return Err(PageError::Camera("Permission denied".into()));
            }
            let tracks = vec![Rc::new(FakeTrack::default()), Rc::new(FakeTrack::default())];
            self.opened.borrow_mut().extend(tracks.iter().cloned());
            Ok(FakeStream { tracks })
        }
    }

    /// Holds at most one stream, like `video.srcObject`.
    #[derive(Default)]
    pub struct FakeVideo {
        pub stream: RefCell<Option<FakeStream>>,
        pub plays: Cell<u32>,
    }

    impl VideoSink for FakeVideo {
        type Stream = FakeStream;

        fn attach(&self, stream: FakeStream) -> Result<(), PageError> {
            *self.stream.borrow_mut() = Some(stream);
            self.plays.set(self.plays.get() + 1);
            Ok(())
        }

        fn detach(&self) -> Option<FakeStream> {
            self.stream.borrow_mut().take()
        }
    }
}
