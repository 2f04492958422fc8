//! UI session glue for glyphvim.
//!
//! [`Workspace`] owns the translator state, the highlight table, the
//! dispatch channels, the message log and the buffer switcher panel.

pub mod buffer_list;
pub mod buffer_switcher;
pub mod fuzzy;
pub mod host;
pub mod message_log;

pub use buffer_list::{build_buffer_list, escape_path, BufferEntry, HostBuffer};
pub use buffer_switcher::{BufferSwitcher, Phase, SwitcherInput, SwitcherRow, SwitcherView};
pub use host::{Host, HostHandle, HostRequest};
pub use message_log::MessageLog;

use dispatch::Dispatch;
use highlight::HighlightTable;
use serde_json::Value;
use settings::Config;
use ui_events::{FontDescriptor, RenderSurface, SessionState, UiContext};

pub struct Workspace {
    session: SessionState,
    highlights: HighlightTable,
    dispatch: Dispatch,
    messages: MessageLog,
    switcher: BufferSwitcher,
    surface: Box<dyn RenderSurface + Send>,
}

impl Workspace {
    pub fn new(config: &Config, surface: Box<dyn RenderSurface + Send>) -> Self {
        let mut dispatch = Dispatch::new();
        let messages = MessageLog::new(config.message_history);
        messages.attach(&mut dispatch);

        Self {
            session: SessionState::new(FontDescriptor {
                face: config.font_family.clone(),
                size: config.font_size,
                line_space: config.line_space,
            }),
            highlights: HighlightTable::new(),
            dispatch,
            messages,
            switcher: BufferSwitcher::new(),
            surface,
        }
    }

    /// Channels, for subscribing.
    pub fn dispatch_mut(&mut self) -> &mut Dispatch {
        &mut self.dispatch
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn highlights(&self) -> &HighlightTable {
        &self.highlights
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn switcher(&self) -> &BufferSwitcher {
        &self.switcher
    }

    pub fn handle_redraw(&mut self, batch: &[Value]) {
        let mut ctx = UiContext {
            surface: self.surface.as_mut(),
            highlights: &mut self.highlights,
            dispatch: &self.dispatch,
        };
        ui_events::handle_redraw(batch, &mut self.session, &mut ctx);
    }

    pub fn handle_notification(&mut self, method: &str, params: &Value) {
        let mut ctx = UiContext {
            surface: self.surface.as_mut(),
            highlights: &mut self.highlights,
            dispatch: &self.dispatch,
        };
        ui_events::handle_notification(method, params, &mut self.session, &mut ctx);
    }

    /// Fetch cwd and buffers from the host and open the switcher.
    ///
    /// Gives up quietly when the cwd is unavailable; a failed buffer list
    /// opens an empty panel.
    pub async fn open_buffer_switcher(&mut self, host: &impl Host) {
        let cwd = match host.current_dir().await {
            Ok(cwd) if !cwd.is_empty() => cwd,
            Ok(_) => {
                tracing::debug!("Host reported an empty cwd, not opening buffer switcher");
                return;
            }
            Err(e) => {
                tracing::debug!("Failed to get cwd: {:#}", e);
                return;
            }
        };

        let buffers = host.list_buffers().await.unwrap_or_else(|e| {
            tracing::debug!("Failed to list buffers: {:#}", e);
            Vec::new()
        });
        self.switcher.show(build_buffer_list(&buffers, &cwd));
    }

    /// Feed input to the switcher, sending the switch command on select.
    pub async fn switcher_input(&mut self, input: SwitcherInput, host: &impl Host) {
        let Some(command) = self.switcher.handle_input(input) else {
            return;
        };
        tracing::debug!("Switching buffer: {}", command);
        if let Err(e) = host.command(command).await {
            tracing::warn!("Buffer switch failed: {:#}", e);
        }
    }
}
