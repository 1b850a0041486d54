use std::fmt;

use framecrop_core::raster::CropResult;
use framecrop_core::upload::UploadFolder;

/// Background work the UI is waiting on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    Reading,
    Decoding,
    Exporting,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Task::Reading => "Reading file",
            Task::Decoding => "Decoding image",
            Task::Exporting => "Encoding crop",
        };
        f.write_str(s)
    }
}

/// Overall UI state.
pub struct UIState {
    /// Which task is currently running (None = idle).
    pub running: Option<Task>,

    /// Destination folder for uploads.
    pub folder: UploadFolder,

    /// Most recent confirmed crop, kept for saving and uploading.
    pub last_result: Option<CropResult>,
    pub upload_location: Option<String>,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn new(folder: UploadFolder) -> Self {
        Self {
            running: None,
            folder,
            last_result: None,
            upload_location: None,
            log_messages: Vec::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.running.is_some()
    }

    /// Clear `task` if it is the one running.
    pub fn finish(&mut self, task: Task) {
        if self.running == Some(task) {
            self.running = None;
        }
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
