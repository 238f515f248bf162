// This is free and unencumbered software released into the public domain.

/// Capture request templates (`ACameraDevice_request_template`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RequestTemplate {
    Preview = 1,
    StillCapture = 2,
    Record = 3,
    VideoSnapshot = 4,
    ZeroShutterLag = 5,
    Manual = 6,
}

impl RequestTemplate {
    #[inline]
    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

#[derive(Clone, Debug)]
pub struct GroupConfig {
    pub event_capacity: usize,
    pub repeat_template: RequestTemplate,
    pub capture_template: RequestTemplate,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            event_capacity: 64,
            repeat_template: RequestTemplate::Preview,
            capture_template: RequestTemplate::StillCapture,
        }
    }
}

impl GroupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event_capacity(mut self, n: usize) -> Self {
        self.event_capacity = n.max(1);
        self
    }

    pub fn with_repeat_template(mut self, template: RequestTemplate) -> Self {
        self.repeat_template = template;
        self
    }

    pub fn with_capture_template(mut self, template: RequestTemplate) -> Self {
        self.capture_template = template;
        self
    }
}
