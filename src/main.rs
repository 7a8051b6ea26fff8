use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use log::{info, LevelFilter};
use minifb::{Key, Scale, Window, WindowOptions};
use simplelog::{Config, WriteLogger};
use std::fs::OpenOptions;
use std::io;
use std::time::{Duration, Instant};

use orrery::{
    create_clap_command, handle_clap_matches,
    pipeline::{FrameBuffer, TermBuffer},
    DisplayTarget, Metrics, OrreryError, Viewport, ViewportConfig,
};

fn main() -> Result<(), OrreryError> {
    // Stdout belongs to the terminal renderer, so logs go to a file
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("orrery.log")?;
    let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);

    let matches = create_clap_command().get_matches();
    let (target, config) = handle_clap_matches(&matches);
    info!(
        "starting orrery: target {:?}, surface {}x{}, rig {:?}",
        target, config.width, config.height, config.light_rig
    );

    match target {
        DisplayTarget::Terminal => run_term(config),
        DisplayTarget::Window => run_window(config),
    }
}

fn run_window(config: ViewportConfig) -> Result<(), OrreryError> {
    let mut window = Window::new(
        "Orrery",
        config.width,
        config.height,
        WindowOptions {
            resize: true,
            scale: Scale::X1,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| OrreryError::GraphicsUnavailable(e.to_string()))?;

    let mut viewport: Viewport<FrameBuffer> = Viewport::new(config)?;
    let mut metrics = Metrics::new();

    while window.is_open() {
        if window.is_key_down(Key::Escape) || window.is_key_down(Key::Q) {
            break;
        }

        // The host tells us about resizes by answering get_size
        let (width, height) = window.get_size();
        if width > 0
            && height > 0
            && (width != viewport.pipeline.width || height != viewport.pipeline.height)
        {
            viewport.on_resize(width, height);
        }

        let delta = metrics.last_frame.elapsed();
        metrics.last_frame = Instant::now();
        viewport.on_tick(delta.as_secs_f32(), Some(&mut window))?;

        if let Some(fps) = metrics.update(delta) {
            info!("{}", metrics);
            window.set_title(&format!("Orrery - {:.0} FPS", fps));
        }
    }

    Ok(())
}

fn run_term(config: ViewportConfig) -> Result<(), OrreryError> {
    enable_raw_mode()?;
    execute!(
        io::stdout(),
        terminal::EnterAlternateScreen,
        Hide,
        Clear(ClearType::All)
    )?;

    // Keep the terminal usable even when the render loop errors out
    let result = term_loop(config);
    cleanup_terminal()?;
    result
}

fn term_loop(mut config: ViewportConfig) -> Result<(), OrreryError> {
    let (term_width, term_height) = terminal::size()?;
    config.width = term_width as usize;
    config.height = term_height as usize;

    let mut viewport: Viewport<TermBuffer> = Viewport::new(config)?;
    let mut metrics = Metrics::new();

    let frame_duration = Duration::from_millis(16); // ~60 FPS
    let mut last_frame = Instant::now();

    loop {
        if event::poll(Duration::from_millis(1))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                    _ => {}
                }
            }
        }

        let now = Instant::now();
        if now - last_frame < frame_duration {
            continue;
        }

        let (new_width, new_height) = terminal::size()?;
        if new_width > 0
            && new_height > 0
            && (new_width as usize != viewport.pipeline.width
                || new_height as usize != viewport.pipeline.height)
        {
            viewport.on_resize(new_width as usize, new_height as usize);
        }

        let delta = now - last_frame;
        viewport.on_tick(delta.as_secs_f32(), None)?;
        last_frame = now;

        if metrics.update(delta).is_some() {
            info!("{}", metrics);
        }
    }

    Ok(())
}

fn cleanup_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), Show, terminal::LeaveAlternateScreen)?;
    Ok(())
}
