// Terminal frontend: crossterm events in, ratatui cells out

pub mod canvas;
pub mod input;

use crate::asset_loader::Atlas;
use crate::state::WindowManager;
use anyhow::Context;
use canvas::Viewport;
use chrono::Local;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use input::InputCollector;
use ratatui::layout::Rect as CellRect;
use ratatui::DefaultTerminal;
use std::io::stdout;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Run `wm` in the terminal until its session ends
pub fn run(mut wm: WindowManager) -> anyhow::Result<()> {
    let atlas = Atlas::load(&wm.config().theme);
    let mut terminal = ratatui::try_init().context("failed to initialize terminal")?;

    let result = execute!(stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|_| frame_loop(&mut terminal, &mut wm, &atlas));

    if let Err(e) = execute!(stdout(), DisableMouseCapture) {
        warn!("[Terminal] Failed to disable mouse capture: {}", e);
    }
    ratatui::restore();
    result
}

fn frame_loop(
    terminal: &mut DefaultTerminal,
    wm: &mut WindowManager,
    atlas: &Atlas,
) -> anyhow::Result<()> {
    let render = wm.render_size();
    let tick = Duration::from_millis(1000 / u64::from(wm.config().target_fps.max(1)));
    let mut input = InputCollector::new();

    info!("[Terminal] Running at {}ms per frame", tick.as_millis());
    loop {
        let size = terminal.size().context("failed to query terminal size")?;
        let viewport = Viewport::new(render, CellRect::new(0, 0, size.width, size.height));

        let deadline = Instant::now() + tick;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if event::poll(deadline - now)? {
                input.handle(&event::read()?, &viewport);
            }
        }

        if input.take_dump() {
            info!("[WM] Snapshot: {}", wm.snapshot());
        }

        let frame_input = input.take_frame(Local::now().time());
        let output = wm.frame(&frame_input);

        terminal
            .draw(|frame| {
                let viewport = Viewport::new(render, frame.area());
                let buf = frame.buffer_mut();
                canvas::paint(buf, &viewport, atlas, &output.draws);
                canvas::draw_cursor(buf, &viewport, frame_input.pointer, output.cursor);
            })
            .context("failed to draw frame")?;

        if !output.running {
            info!("[Terminal] Session ended");
            return Ok(());
        }
    }
}
