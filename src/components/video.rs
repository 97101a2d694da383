use crate::theme::Palette;
use anyhow::Context;
use log::{debug, info, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tui::buffer::Buffer;
use tui::layout::{Alignment, Rect};
use tui::style::{Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget, Wrap};

pub const VIDEO_URL: &str = "https://www.youtube.com/watch?v=r9BPacWxJ2M";
pub const VIDEO_TITLE: &str = "Game Highlights";

/// What the running terminal can do with a video link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCapability {
    Launcher,
    Link,
    Thumbnail,
}

impl VideoCapability {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "launcher" | "open" => Some(Self::Launcher),
            "link" | "url" => Some(Self::Link),
            "thumbnail" | "none" => Some(Self::Thumbnail),
            _ => None,
        }
    }

    pub fn detect() -> (Self, Option<PathBuf>) {
        let opener = find_opener(std::env::var_os("PATH"));
        let term = std::env::var("TERM").ok();
        (Self::classify(opener.is_some(), term.as_deref()), opener)
    }

    /// A system opener wins; otherwise any real terminal gets a clickable
    /// link and dumb ones the title card.
    pub fn classify(has_opener: bool, term: Option<&str>) -> Self {
        if has_opener {
            Self::Launcher
        } else if matches!(term, Some(t) if !t.is_empty() && t != "dumb") {
            Self::Link
        } else {
            Self::Thumbnail
        }
    }
}

fn opener_name() -> &'static str {
    if cfg!(target_os = "macos") { "open" } else { "xdg-open" }
}

/// Executable opener on the given search path, if any.
fn find_opener(paths: Option<OsString>) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    which::which_in(opener_name(), paths, cwd).ok()
}

/// How the detail view presents the game video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSurface {
    Launcher { program: PathBuf },
    Link,
    Thumbnail,
}

impl VideoSurface {
    /// Pick the surface once at startup. A forced `Launcher` without an opener
    /// on `PATH` falls back to `Link`.
    pub fn select(forced: Option<VideoCapability>) -> Self {
        let (detected, opener) = VideoCapability::detect();
        let capability = forced.unwrap_or(detected);
        debug!("video capability: {capability:?} (detected {detected:?})");
        Self::from_capability(capability, opener)
    }

    pub fn from_capability(capability: VideoCapability, opener: Option<PathBuf>) -> Self {
        match (capability, opener) {
            (VideoCapability::Launcher, Some(program)) => Self::Launcher { program },
            (VideoCapability::Launcher, None) | (VideoCapability::Link, _) => Self::Link,
            (VideoCapability::Thumbnail, _) => Self::Thumbnail,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Launcher { .. } => "launcher",
            Self::Link => "link",
            Self::Thumbnail => "thumbnail",
        }
    }

    /// Play the video. Only the launcher does anything; the other surfaces
    /// return a hint for the status line.
    pub fn activate(&self) -> anyhow::Result<String> {
        match self {
            Self::Launcher { program } => {
                let _reaper = spawn_opener(program)?;
                info!("opened {VIDEO_URL} with {}", program.display());
                Ok("Opened highlights in the system player".to_string())
            }
            Self::Link => Ok("Open the link in the video panel to watch".to_string()),
            Self::Thumbnail => Ok(format!("Video playback unavailable here: {VIDEO_URL}")),
        }
    }
}

/// Launch the opener and wait on it in the background so it never lingers
/// as a zombie. Must run inside the tokio runtime.
fn spawn_opener(program: &Path) -> anyhow::Result<JoinHandle<()>> {
    let mut child = Command::new(program)
        .arg(VIDEO_URL)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to launch {}", program.display()))?;

    let name = program.display().to_string();
    Ok(tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => debug!("{name} exited with {status}"),
            Err(e) => warn!("waiting on {name} failed: {e}"),
        }
    }))
}

/// Video card for the detail view.
pub struct VideoPanel<'a> {
    pub surface: &'a VideoSurface,
    pub palette: &'a Palette,
}

impl Widget for VideoPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = Style::default().fg(self.palette.text).add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(self.palette.text_secondary);
        let link = Style::default()
            .fg(self.palette.primary)
            .add_modifier(Modifier::UNDERLINED);

        let lines = match self.surface {
            VideoSurface::Launcher { .. } => vec![
                Line::from(Span::styled(format!("▶  {VIDEO_TITLE}"), title)),
                Line::from(""),
                Line::from(Span::styled("Press v to play in the system player", dim)),
            ],
            VideoSurface::Link => vec![
                Line::from(Span::styled(format!("▶  {VIDEO_TITLE}"), title)),
                Line::from(""),
                Line::from(Span::styled(VIDEO_URL, link)),
            ],
            VideoSurface::Thumbnail => vec![
                Line::from(Span::styled("▶", title)),
                Line::from(Span::styled(VIDEO_TITLE, title)),
                Line::from(""),
                Line::from(Span::styled("Open video on YouTube", dim)),
            ],
        };

        let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
        let inner = Rect::new(area.x, top, area.width, area.bottom().saturating_sub(top));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
