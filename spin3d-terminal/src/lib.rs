/// Terminal front-end for the spin3d rendering pipeline
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::info;
use spin3d_core::{Axis, Face, Pipeline, RotationPolicy, Shape, ToggleEvent};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    pipeline: Pipeline<AsciiRenderer>,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Build the pipeline against an ASCII renderer sized to the terminal.
    pub fn new(shape: &Shape, faces: &[Face], policy: RotationPolicy) -> Result<Self> {
        let (width, height) = terminal::size()?;

        // Reserve the top row for the status overlay.
        let renderer = AsciiRenderer::new(width as usize, height.saturating_sub(1) as usize)?;
        let pipeline = Pipeline::new(renderer, shape, faces, policy)?;

        Ok(Self {
            pipeline,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        info!("terminal restored");
        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target
        let mut last_tick = Instant::now();

        loop {
            let frame_start = Instant::now();

            // Toggle events land in the queue here, strictly between ticks.
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            let dt = last_tick.elapsed().as_secs_f32();
            last_tick = Instant::now();

            if !self.frame(dt)? {
                break;
            }

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.pipeline.request_stop();
                }
                KeyCode::Char('x') => {
                    self.pipeline.push_event(ToggleEvent::SelectAxis(Axis::X));
                }
                KeyCode::Char('y') => {
                    self.pipeline.push_event(ToggleEvent::SelectAxis(Axis::Y));
                }
                KeyCode::Char('z') => {
                    self.pipeline.push_event(ToggleEvent::SelectAxis(Axis::Z));
                }
                KeyCode::Char(' ') => {
                    self.pipeline.push_event(ToggleEvent::ToggleRun);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// One frame: clear, tick the pipeline, flush to the terminal.
    fn frame(&mut self, dt: f32) -> Result<bool> {
        self.pipeline.context_mut().clear();
        if !self.pipeline.tick(dt)? {
            return Ok(false);
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.pipeline.context().present(&mut stdout)?;

        // Status overlay
        let status = self.status_line();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(true)
    }

    fn status_line(&self) -> String {
        match self.pipeline.policy() {
            RotationPolicy::ComposedEuler { state, .. } => {
                let run = if state.is_running() { "running" } else { "paused" };
                format!(
                    "Spin3D | FPS: {:.1} | axis: {:?} ({}) | X/Y/Z=Axis Space=Run/Pause Q=Quit",
                    self.fps,
                    state.active_axis(),
                    run
                )
            }
            RotationPolicy::Accumulated { .. } => {
                format!("Spin3D | FPS: {:.1} | free-running | Q=Quit", self.fps)
            }
        }
    }
}
