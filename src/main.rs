//! Bubble Pop entry point
//!
//! On the web this wires the DOM, input and audio around the simulation and
//! drives it from `requestAnimationFrame`. Natively it runs a headless
//! session with a bot player against a file-backed leaderboard.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlInputElement, PointerEvent, TouchEvent, WheelEvent};

    use bubble_pop::audio::{AudioManager, SoundEffect};
    use bubble_pop::consts::MAX_FRAME_DT;
    use bubble_pop::persistence::{LocalStorage, MemoryStorage, Storage};
    use bubble_pop::renderer::{DomRenderer, bubble_id_of};
    use bubble_pop::sim::{GameEvent, GamePhase, PopInput, TickInput};
    use bubble_pop::ui::{DurationPicker, format_time, rank_row};
    use bubble_pop::{Game, Tuning, platform};

    /// Game instance holding all state
    struct App {
        game: Game<Box<dyn Storage>>,
        renderer: DomRenderer,
        audio: AudioManager,
        picker: DurationPicker,
        /// Pops collected since the last frame
        input: TickInput,
        last_time: f64,
        menu_shown: bool,
    }

    impl App {
        fn new(renderer: DomRenderer) -> Self {
            let storage: Box<dyn Storage> = match LocalStorage::open() {
                Some(storage) => Box::new(storage),
                None => {
                    log::warn!("LocalStorage unavailable - scores will not persist");
                    Box::new(MemoryStorage::new())
                }
            };
            let game = Game::new(
                storage,
                Tuning::default(),
                platform::window_viewport(),
                platform::session_seed(),
            );
            let audio = AudioManager::new(game.settings.effective_volume());
            let picker = DurationPicker::new(game.settings.duration_secs);
            Self {
                game,
                renderer,
                audio,
                picker,
                input: TickInput::default(),
                last_time: 0.0,
                menu_shown: false,
            }
        }

        /// Advance one animation frame
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            self.game.state.viewport = platform::window_viewport();
            let input = std::mem::take(&mut self.input);
            let events = self.game.advance(&input, dt.min(MAX_FRAME_DT));
            for event in &events {
                self.handle_event(event);
            }

            self.renderer.sync(&self.game.state);
            self.update_hud();

            if self.game.state.phase == GamePhase::Ended
                && !self.menu_shown
                && self.game.state.menu_ready()
            {
                set_hidden("gameOverButtons", false);
                self.menu_shown = true;
            }
        }

        fn handle_event(&mut self, event: &GameEvent) {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
            match event {
                GameEvent::Sparkle { x, y } if self.game.settings.sparkles_enabled() => {
                    self.renderer.spawn_sparkles(*x, *y);
                }
                GameEvent::GameOver { score, .. } => {
                    self.renderer.clear();
                    set_text("finalScore", &score.to_string());
                    set_hidden("hud", true);
                    set_hidden("gameOverButtons", true);
                    set_hidden("gameOverOverlay", false);
                }
                _ => {}
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let state = &self.game.state;
            set_text("hudPlayer", &state.player_name);
            set_text("score", &state.score.to_string());
            set_text("timeRemaining", &format_time(state.remaining.floor() as u32));
            set_text("bestScore", &self.game.best.0.to_string());
        }

        fn start(&mut self) -> bool {
            let name = document()
                .and_then(|d| d.get_element_by_id("playerNameInput"))
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();
            let secs = self.picker.secs();
            if let Err(e) = self.game.start(&name, secs) {
                log::warn!("Start rejected: {e:#}");
                return false;
            }
            self.audio.resume();
            self.last_time = 0.0;
            self.menu_shown = false;
            self.input = TickInput::default();
            set_hidden("startOverlay", true);
            set_hidden("hud", false);
            true
        }

        fn restart(&mut self) {
            self.game.restart(platform::session_seed());
            self.renderer.clear();
            self.input = TickInput::default();
            set_hidden("gameOverOverlay", true);
            set_hidden("startOverlay", false);
            if let Some(input) = document()
                .and_then(|d| d.get_element_by_id("playerNameInput"))
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value(&self.game.settings.player_name);
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bubble Pop starting...");

        let Some(renderer) = DomRenderer::new("playfield") else {
            log::error!("No document to render into");
            return;
        };
        let app = Rc::new(RefCell::new(App::new(renderer)));

        {
            let a = app.borrow();
            set_text("timerDisplay", &a.picker.label());
            if let Some(input) = document()
                .and_then(|d| d.get_element_by_id("playerNameInput"))
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value(&a.game.settings.player_name);
            }
            set_text("muteButton", mute_label(a.game.settings.muted));
            set_text("motionButton", motion_label(a.game.settings.sparkles_enabled()));
        }

        setup_pointer_handler(app.clone());
        setup_duration_picker(app.clone());
        setup_start_button(app.clone());
        setup_settings_toggles(app.clone());
        setup_game_over_buttons(app);

        log::info!("Bubble Pop ready");
    }

    fn request_animation_frame(app: Rc<RefCell<App>>, session: u64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, session, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One frame; reschedules itself until the game-over menu is up
    fn game_loop(app: Rc<RefCell<App>>, session: u64, time: f64) {
        let keep_going = {
            let mut a = app.borrow_mut();
            // A loop left over from an earlier session just stops
            if a.game.state.session_id != session {
                return;
            }
            a.frame(time);
            a.game.state.is_running() || !a.menu_shown
        };

        if keep_going {
            request_animation_frame(app, session);
        }
    }

    fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer_handler(app: Rc<RefCell<App>>) {
        let container = app.borrow().renderer.container().clone();
        listen(&container, "pointerdown", move |event: PointerEvent| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };
            let Some(id) = bubble_id_of(&target) else {
                return;
            };
            event.prevent_default();
            let at = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            app.borrow_mut()
                .input
                .pops
                .push(PopInput { id, at: Some(at) });
        });
    }

    fn setup_duration_picker(app: Rc<RefCell<App>>) {
        let Some(circle) = document().and_then(|d| d.get_element_by_id("timerCircle")) else {
            return;
        };

        {
            let app = app.clone();
            listen(&circle, "wheel", move |event: WheelEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.picker.on_wheel(event.delta_y());
                set_text("timerDisplay", &a.picker.label());
            });
        }
        {
            let app = app.clone();
            listen(&circle, "touchstart", move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut().picker.on_touch_start(touch.client_y() as f32);
                }
            });
        }
        {
            let app = app.clone();
            listen(&circle, "touchmove", move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let mut a = app.borrow_mut();
                if a.picker.on_touch_move(touch.client_y() as f32) {
                    set_text("timerDisplay", &a.picker.label());
                }
            });
        }
        listen(&circle, "touchend", move |_event: TouchEvent| {
            app.borrow_mut().picker.on_touch_end();
        });
    }

    fn setup_start_button(app: Rc<RefCell<App>>) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("startButton")) else {
            return;
        };
        listen(&btn, "click", move |_event: web_sys::MouseEvent| {
            let session = {
                let mut a = app.borrow_mut();
                if !a.start() {
                    return;
                }
                a.game.state.session_id
            };
            request_animation_frame(app.clone(), session);
        });
    }

    fn mute_label(muted: bool) -> &'static str {
        if muted { "🔇" } else { "🔊" }
    }

    fn motion_label(sparkles: bool) -> &'static str {
        if sparkles { "✨ on" } else { "✨ off" }
    }

    fn setup_settings_toggles(app: Rc<RefCell<App>>) {
        let Some(document) = document() else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("muteButton") {
            let app = app.clone();
            listen(&btn, "click", move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                let volume = a.game.toggle_mute();
                a.audio.set_volume(volume);
                set_text("muteButton", mute_label(volume <= 0.0));
            });
        }

        if let Some(btn) = document.get_element_by_id("motionButton") {
            listen(&btn, "click", move |_event: web_sys::MouseEvent| {
                let sparkles = app.borrow_mut().game.toggle_reduced_motion();
                set_text("motionButton", motion_label(sparkles));
            });
        }
    }

    fn setup_game_over_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = document() else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let app = app.clone();
            listen(&btn, "click", move |_event: web_sys::MouseEvent| {
                app.borrow_mut().restart();
            });
        }

        if let Some(btn) = document.get_element_by_id("leaderboardButton") {
            listen(&btn, "click", move |_event: web_sys::MouseEvent| {
                show_leaderboard(&mut app.borrow_mut());
            });
        }
    }

    /// Build the leaderboard overlay from storage
    fn show_leaderboard(app: &mut App) {
        let Some(document) = document() else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        if let Some(old) = document.get_element_by_id("leaderboardOverlay") {
            old.remove();
        }

        let make = |tag: &str| -> Option<HtmlElement> {
            document.create_element(tag).ok()?.dyn_into().ok()
        };
        let (Some(overlay), Some(container), Some(heading), Some(close)) =
            (make("div"), make("div"), make("h2"), make("button"))
        else {
            return;
        };
        overlay.set_id("leaderboardOverlay");
        container.set_class_name("lb-container");
        heading.set_inner_text("Leaderboard");
        let _ = container.append_child(&heading);

        for (index, entry) in app.game.reload_leaderboard().ranked_view().into_iter().enumerate() {
            let row = rank_row(index, entry);
            let Some(el) = make("div") else {
                continue;
            };
            el.set_inner_text(&row.text);
            let style = el.style();
            let _ = style.set_property("font-size", &format!("{}em", row.font_em));
            let _ = style.set_property("color", row.color);
            let _ = style.set_property("margin", "10px 0");
            let _ = container.append_child(&el);
        }

        close.set_inner_text("Close");
        {
            let overlay = overlay.clone();
            listen(&close, "click", move |_event: web_sys::MouseEvent| {
                overlay.remove();
            });
        }
        let _ = container.append_child(&close);
        let _ = overlay.append_child(&container);
        let _ = body.append_child(&overlay);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result, ensure};
    use clap::Parser;

    use bubble_pop::autoplay::Autopilot;
    use bubble_pop::consts::{DEFAULT_DURATION_SECS, DEFAULT_PLAYER_NAME};
    use bubble_pop::persistence::{FileStorage, Storage};
    use bubble_pop::sim::{EndReason, GameEvent, GamePhase};
    use bubble_pop::ui::{format_time, rank_row};
    use bubble_pop::{Game, Tuning, platform};

    #[derive(Debug, Parser)]
    #[command(
        name = "bubble-pop",
        about = "Play a headless Bubble Pop session with a bot and update the leaderboard"
    )]
    pub struct Cli {
        /// Player name recorded on the leaderboard
        #[arg(long, default_value = DEFAULT_PLAYER_NAME)]
        player: String,
        /// Session length in seconds (minimum 10)
        #[arg(long, default_value_t = DEFAULT_DURATION_SECS)]
        duration: u32,
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Simulated frames per second
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Directory holding the leaderboard, best score and settings
        #[arg(long, default_value = ".bubble-pop")]
        data_dir: PathBuf,
        /// JSON balance overrides
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Seconds between bot pops
        #[arg(long, default_value_t = 0.35)]
        reaction: f32,
        /// Let the bot pop bombs too
        #[arg(long)]
        pop_bombs: bool,
        /// Print the leaderboard and exit
        #[arg(long)]
        leaderboard: bool,
    }

    pub fn run(cli: Cli) -> Result<()> {
        ensure!(cli.fps > 0, "fps must be > 0");

        let storage = FileStorage::open(&cli.data_dir)?;
        let tuning = match &cli.tuning {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed reading {}", path.display()))?;
                Tuning::from_json(&json)
                    .with_context(|| format!("failed loading {}", path.display()))?
            }
            None => Tuning::default(),
        };
        let seed = cli.seed.unwrap_or_else(platform::session_seed);
        let mut game = Game::new(storage, tuning, platform::window_viewport(), seed);

        if cli.leaderboard {
            print_leaderboard(&game);
            return Ok(());
        }

        game.start(&cli.player, cli.duration)?;
        log::info!("Seed {seed}, data dir {}", game.storage().dir().display());

        let dt = 1.0 / cli.fps as f32;
        let max_frames = (u64::from(cli.duration) + 5) * u64::from(cli.fps);
        let mut bot = Autopilot::new(cli.reaction, cli.pop_bombs);
        let (mut pops, mut misses) = (0u32, 0u32);

        for _ in 0..max_frames {
            let input = bot.next_input(&game.state, dt);
            for event in game.advance(&input, dt) {
                match event {
                    GameEvent::Popped { .. } => pops += 1,
                    GameEvent::Missed { .. } => misses += 1,
                    _ => {}
                }
            }
            if game.state.phase == GamePhase::Ended {
                break;
            }
        }
        ensure!(
            game.state.phase == GamePhase::Ended,
            "session did not finish within {max_frames} frames"
        );

        let state = &game.state;
        let reason = match state.end_reason {
            Some(EndReason::Bomb) => "bomb",
            Some(EndReason::TimeUp) | None => "time up",
        };
        println!("Game Over! ({reason})");
        println!("  Player:   {}", state.player_name);
        println!("  Score:    {}", state.score);
        println!("  Played:   {}", format_time(state.difficulty.elapsed as u32));
        println!("  Popped:   {pops}  Missed: {misses}");
        println!("  Best:     {}", game.best.0);
        println!();
        print_leaderboard(&game);
        Ok(())
    }

    fn print_leaderboard<S: Storage>(game: &Game<S>) {
        println!("Leaderboard");
        if game.leaderboard.is_empty() {
            println!("  (no entries)");
        }
        for (index, entry) in game.leaderboard.ranked_view().into_iter().enumerate() {
            println!("  {}", rank_row(index, entry).text);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    headless::run(headless::Cli::parse())
}
