#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tickerlink_core::clipboard::{ClipboardBackend, ClipboardError, ClipboardService};
use tickerlink_core::controller::SelectionController;
use tickerlink_core::directory::Directory;
use tickerlink_core::model::CompanyRecord;
use tickerlink_core::slot_store::open_memory;

pub type Writes = Rc<RefCell<Vec<String>>>;

struct FakeClipboard {
    fail: bool,
    writes: Writes,
}

impl ClipboardBackend for FakeClipboard {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Unavailable("not a secure context".into()));
        }
        self.writes.borrow_mut().push(text.to_string());
        Ok(())
    }
}

pub fn recording_clipboard() -> (ClipboardService, Writes) {
    let writes = Writes::default();
    let fallback = FakeClipboard {
        fail: false,
        writes: Rc::clone(&writes),
    };
    (ClipboardService::new(None, Box::new(fallback)), writes)
}

pub fn failing_clipboard() -> ClipboardService {
    let failing = || {
        Box::new(FakeClipboard {
            fail: true,
            writes: Writes::default(),
        }) as Box<dyn ClipboardBackend>
    };
    ClipboardService::new(Some(failing()), failing())
}

pub fn scenario_directory() -> Directory {
    Directory::from_records(vec![
        CompanyRecord::new("7203", "トヨタ自動車"),
        CompanyRecord::new("9984", "ソフトバンクグループ"),
    ])
    .unwrap()
}

pub fn record(code: &str, name: &str) -> CompanyRecord {
    CompanyRecord::new(code, name)
}

pub fn controller(directory: Directory) -> (SelectionController, Writes) {
    let (clipboard, writes) = recording_clipboard();
    let controller = SelectionController::new(
        directory,
        open_memory().unwrap(),
        clipboard,
        Duration::from_millis(400),
    );
    (controller, writes)
}
