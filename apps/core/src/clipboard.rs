use std::io::Write;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
    #[error("no clipboard tool found (tried {0})")]
    NoTool(String),
}

pub trait ClipboardBackend {
    fn name(&self) -> &'static str;
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(CopyPath),
    Failed,
}

impl CopyOutcome {
    pub fn is_copied(self) -> bool {
        matches!(self, Self::Copied(_))
    }
}

pub fn copied_message(text: &str) -> String {
    format!("Copied \"{text}\". Paste it into the TDnet search box with Ctrl+V.")
}

pub struct ClipboardService {
    primary: Option<Box<dyn ClipboardBackend>>,
    fallback: Box<dyn ClipboardBackend>,
}

impl ClipboardService {
    pub fn new(
        primary: Option<Box<dyn ClipboardBackend>>,
        fallback: Box<dyn ClipboardBackend>,
    ) -> Self {
        Self { primary, fallback }
    }

    pub fn system() -> Self {
        let primary = match SystemClipboard::new() {
            Ok(clipboard) => Some(Box::new(clipboard) as Box<dyn ClipboardBackend>),
            Err(error) => {
                tracing::info!(%error, "system clipboard unavailable; using fallback only");
                None
            }
        };
        Self::new(primary, Box::new(CommandClipboard))
    }

    pub fn copy(&mut self, text: &str) -> CopyOutcome {
        if let Some(primary) = self.primary.as_mut() {
            match primary.write_text(text) {
                Ok(()) => return CopyOutcome::Copied(CopyPath::Primary),
                Err(error) => {
                    tracing::debug!(backend = primary.name(), %error, "primary copy failed");
                }
            }
        }

        match self.fallback.write_text(text) {
            Ok(()) => CopyOutcome::Copied(CopyPath::Fallback),
            Err(error) => {
                tracing::error!(backend = self.fallback.name(), %error, "unable to copy text");
                CopyOutcome::Failed
            }
        }
    }
}

// X11 only serves the selection while this handle is alive.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

pub struct CommandClipboard;

impl ClipboardBackend for CommandClipboard {
    fn name(&self) -> &'static str {
        "command"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        write_fallback_clipboard_text(text)
    }
}

#[cfg(target_os = "windows")]
fn write_fallback_clipboard_text(value: &str) -> Result<(), ClipboardError> {
    use windows_sys::Win32::System::DataExchange::{
        CloseClipboard, EmptyClipboard, OpenClipboard, SetClipboardData,
    };
    use windows_sys::Win32::System::Memory::{
        GlobalAlloc, GlobalFree, GlobalLock, GlobalUnlock, GMEM_MOVEABLE,
    };
    const CF_UNICODETEXT: u32 = 13;

    let wide: Vec<u16> = value.encode_utf16().chain(std::iter::once(0)).collect();
    let bytes = wide.len() * std::mem::size_of::<u16>();
    unsafe {
        if OpenClipboard(std::ptr::null_mut()) == 0 {
            return Err(ClipboardError::Unavailable("failed to open clipboard".into()));
        }
        if EmptyClipboard() == 0 {
            CloseClipboard();
            return Err(ClipboardError::Write("failed to clear clipboard".into()));
        }

        let mem = GlobalAlloc(GMEM_MOVEABLE, bytes);
        if mem.is_null() {
            CloseClipboard();
            return Err(ClipboardError::Write("failed to allocate clipboard memory".into()));
        }

        let ptr = GlobalLock(mem) as *mut u16;
        if ptr.is_null() {
            GlobalFree(mem);
            CloseClipboard();
            return Err(ClipboardError::Write("failed to lock clipboard memory".into()));
        }
        std::ptr::copy_nonoverlapping(wide.as_ptr(), ptr, wide.len());
        GlobalUnlock(mem);

        if SetClipboardData(CF_UNICODETEXT, mem).is_null() {
            GlobalFree(mem);
            CloseClipboard();
            return Err(ClipboardError::Write("failed to set clipboard data".into()));
        }

        CloseClipboard();
    }
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn write_fallback_clipboard_text(value: &str) -> Result<(), ClipboardError> {
    let candidates = fallback_commands();
    for (program, args) in &candidates {
        match pipe_to_command(program, args, value) {
            Ok(()) => return Ok(()),
            Err(PipeError::NotFound) => continue,
            Err(PipeError::Failed(message)) => {
                return Err(ClipboardError::Write(format!("{program}: {message}")))
            }
        }
    }

    let tried = candidates
        .iter()
        .map(|(program, _)| *program)
        .collect::<Vec<_>>()
        .join(", ");
    Err(ClipboardError::NoTool(tried))
}

#[cfg(not(target_os = "windows"))]
type CopyCommand = (&'static str, &'static [&'static str]);

#[cfg(not(target_os = "windows"))]
const NO_ARGS: &[&str] = &[];

#[cfg(not(target_os = "windows"))]
fn fallback_commands() -> Vec<CopyCommand> {
    if cfg!(target_os = "macos") {
        return vec![("pbcopy", NO_ARGS)];
    }

    let mut out: Vec<CopyCommand> = Vec::new();
    if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        out.push(("wl-copy", NO_ARGS));
    }
    out.push(("xclip", &["-selection", "clipboard"]));
    out.push(("xsel", &["--clipboard", "--input"]));
    out
}

#[cfg_attr(target_os = "windows", allow(dead_code))]
enum PipeError {
    NotFound,
    Failed(String),
}

#[cfg_attr(target_os = "windows", allow(dead_code))]
fn pipe_to_command(program: &str, args: &[&str], value: &str) -> Result<(), PipeError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PipeError::NotFound,
            _ => PipeError::Failed(e.to_string()),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(value.as_bytes())
            .map_err(|e| PipeError::Failed(e.to_string()))?;
    }

    let status = child.wait().map_err(|e| PipeError::Failed(e.to_string()))?;
    if status.success() {
        Ok(())
    } else {
        Err(PipeError::Failed(format!("exit status {status}")))
    }
}
