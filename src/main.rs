mod app;
mod input;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use hero_clicker::clock::{FrameClock, SystemClock, Throttle, WallClock};
use hero_clicker::{Game, Tuning};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use tracing::{info, Level};

use app::hud::Hud;
use app::render::{render, View};
use app::App;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

/// Monotonic frame timestamp in milliseconds.
fn frame_timestamp() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(|| SystemClock.now_ms())
}

#[cfg(target_arch = "wasm32")]
fn attach_store(game: Game) -> Game {
    match hero_clicker::save::LocalStorage::open() {
        Ok(store) => game.with_store(store),
        Err(e) => {
            tracing::warn!(event = "storage_unavailable", error = %e, "playing without saves");
            game
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn attach_store(game: Game) -> Game {
    game.with_store(hero_clicker::save::MemoryStore::new())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    hero_clicker::logging::init(Level::INFO);

    let tuning = Tuning::default();
    let render_interval = tuning.render_interval;
    let max_dt = tuning.max_dt;
    let seed = SystemClock.now_ms() as u64;

    let hud = Rc::new(RefCell::new(Hud::new()));
    let game = Game::new(tuning, seed, Box::new(SystemClock))
        .with_render_sink(hud.clone())
        .with_audio_sink(hud.clone());
    let mut game = attach_store(game);
    let boot = game.boot();
    info!(
        event = "boot",
        loaded = boot.loaded,
        offline = boot.offline.is_some(),
        "game ready"
    );

    let game = Rc::new(RefCell::new(game));
    let app = Rc::new(RefCell::new(App::new()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let target = cs.hit_test(col, row);
            drop(cs);

            if let Some(action_id) = target {
                let mut game = game.borrow_mut();
                app.borrow_mut().handle_input(&mut game, &InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        let app = app.clone();
        move |key_event| {
            let key = match key_event.code {
                KeyCode::Char(c) => c,
                KeyCode::Enter => ' ',
                _ => return,
            };
            let mut game = game.borrow_mut();
            app.borrow_mut().handle_input(&mut game, &InputEvent::Key(key));
        }
    });

    let frame_clock = RefCell::new(FrameClock::new(max_dt));
    let throttle = RefCell::new(Throttle::new(render_interval));
    let view = RefCell::new(View::capture(&game.borrow()));

    terminal.draw_web(move |f| {
        let dt = frame_clock.borrow_mut().update(frame_timestamp());
        let mut game = game.borrow_mut();
        game.tick(dt);
        hud.borrow_mut().fade();

        if throttle.borrow_mut().ready(dt) {
            *view.borrow_mut() = View::capture(&game);
        }
        drop(game);

        let hud = hud.borrow();
        let app = app.borrow();
        let mut cs = click_state.borrow_mut();
        render(&view.borrow(), &hud, &app, f, &mut cs);
    });

    Ok(())
}
