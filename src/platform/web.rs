//! Browser platform: `performance.now()` clock and a DOM display
//!
//! Entities are mirrored as absolutely positioned `div`s inside the play
//! area, keyed by entity ID. All required page elements are looked up once
//! at startup; a missing one is a startup error.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Performance, Window};

use super::{Clock, Display, Surface};
use crate::error::StartupError;
use crate::hud::Scoreboard;
use crate::settings::GameConfig;
use crate::sim::{EntityId, Session};

pub const PLAY_AREA_ID: &str = "game-container";
pub const START_MENU_ID: &str = "start-menu";
pub const PAUSE_MENU_ID: &str = "pause-menu";
pub const TIME_ID: &str = "time";
pub const SCORE_ID: &str = "score";
pub const LIVES_ID: &str = "lives";
pub const FPS_ID: &str = "fps";
pub const CONFIG_ID: &str = "game-config";

pub fn window() -> Result<Window, StartupError> {
    web_sys::window().ok_or(StartupError::NoWindow)
}

pub fn document() -> Result<Document, StartupError> {
    window()?.document().ok_or(StartupError::NoDocument)
}

/// Look up a required element
pub fn element(document: &Document, id: &'static str) -> Result<Element, StartupError> {
    document
        .get_element_by_id(id)
        .ok_or(StartupError::MissingElement(id))
}

/// Look up a required element that must be an `HTMLElement`
pub fn html_element(document: &Document, id: &'static str) -> Result<HtmlElement, StartupError> {
    element(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| StartupError::WrongElementType(id))
}

/// Read the optional `<script id="game-config" type="application/json">`
pub fn load_config(document: &Document) -> Result<GameConfig, StartupError> {
    match document
        .get_element_by_id(CONFIG_ID)
        .and_then(|el| el.text_content())
    {
        Some(json) if !json.trim().is_empty() => {
            let config = GameConfig::from_json(&json)?;
            log::info!("Loaded game config from #{}", CONFIG_ID);
            Ok(config)
        }
        _ => {
            log::info!("Using default game config");
            Ok(GameConfig::default())
        }
    }
}

/// Show a blocking alert. Never call this while the game is borrowed.
pub fn alert(message: &str) {
    log::info!("{}", message);
    let shown = web_sys::window().map(|w| w.alert_with_message(message).is_ok());
    if shown != Some(true) {
        log::warn!("Could not show alert: {}", message);
    }
}

/// `performance.now()` in milliseconds
pub struct PerformanceClock {
    performance: Performance,
}

impl PerformanceClock {
    pub fn new() -> Result<Self, StartupError> {
        let performance = window()?.performance().ok_or(StartupError::NoWindow)?;
        Ok(Self { performance })
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance.now()
    }
}

/// Page elements the game draws into
pub struct DomDisplay {
    document: Document,
    play_area: HtmlElement,
    start_menu: HtmlElement,
    pause_menu: HtmlElement,
    time: Element,
    score: Element,
    lives: Element,
    fps: Element,
    player: HtmlElement,
    enemies: HashMap<EntityId, HtmlElement>,
    bullets: HashMap<EntityId, HtmlElement>,
}

impl DomDisplay {
    /// Bind to the page, failing on the first missing element
    pub fn bind(document: &Document) -> Result<Self, StartupError> {
        let play_area = html_element(document, PLAY_AREA_ID)?;
        let player = create_sprite(document, "player")?;
        player.set_id("player");
        play_area
            .append_child(&player)
            .map_err(|_| StartupError::CreateElement("player"))?;

        Ok(Self {
            document: document.clone(),
            start_menu: html_element(document, START_MENU_ID)?,
            pause_menu: html_element(document, PAUSE_MENU_ID)?,
            time: element(document, TIME_ID)?,
            score: element(document, SCORE_ID)?,
            lives: element(document, LIVES_ID)?,
            fps: element(document, FPS_ID)?,
            play_area,
            player,
            enemies: HashMap::new(),
            bullets: HashMap::new(),
        })
    }

    fn surface(&self, surface: Surface) -> &HtmlElement {
        match surface {
            Surface::StartMenu => &self.start_menu,
            Surface::PauseMenu => &self.pause_menu,
            Surface::PlayArea => &self.play_area,
        }
    }

    /// Create, move and remove sprite nodes to match `live`
    fn sync_sprites(
        document: &Document,
        play_area: &HtmlElement,
        nodes: &mut HashMap<EntityId, HtmlElement>,
        live: impl Iterator<Item = (EntityId, Vec2, Vec2)>,
        class: &'static str,
    ) {
        let mut seen = Vec::new();
        for (id, pos, size) in live {
            seen.push(id);
            if !nodes.contains_key(&id) {
                let node = match create_sprite(document, class) {
                    Ok(node) => node,
                    Err(e) => {
                        log::error!("{}", e);
                        continue;
                    }
                };
                if play_area.append_child(&node).is_err() {
                    log::error!("Failed to attach {} {:?}", class, id);
                    continue;
                }
                nodes.insert(id, node);
            }
            if let Some(node) = nodes.get(&id) {
                place(node, pos, size);
            }
        }
        nodes.retain(|id, node| {
            let alive = seen.contains(id);
            if !alive {
                node.remove();
            }
            alive
        });
    }
}

impl Display for DomDisplay {
    fn set_surface_visible(&mut self, surface: Surface, visible: bool) {
        self.surface(surface).set_hidden(!visible);
    }

    fn update_scoreboard(&mut self, board: &Scoreboard) {
        self.time.set_text_content(Some(&board.time));
        self.score.set_text_content(Some(&board.score.to_string()));
        self.lives.set_text_content(Some(&board.lives.to_string()));
        self.fps.set_text_content(Some(&board.fps.to_string()));
    }

    fn sync_entities(&mut self, session: &Session) {
        place(&self.player, session.player.pos, session.player.size);
        Self::sync_sprites(
            &self.document,
            &self.play_area,
            &mut self.enemies,
            session.store.enemies().iter().map(|e| (e.id, e.pos, e.size)),
            "enemy",
        );
        Self::sync_sprites(
            &self.document,
            &self.play_area,
            &mut self.bullets,
            session.store.bullets().iter().map(|b| (b.id, b.pos, b.size)),
            "bullet",
        );
    }
}

fn create_sprite(document: &Document, class: &'static str) -> Result<HtmlElement, StartupError> {
    let node = document
        .create_element("div")
        .map_err(|_| StartupError::CreateElement(class))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| StartupError::CreateElement(class))?;
    node.set_class_name(class);
    let style = node.style();
    let _ = style.set_property("position", "absolute");
    Ok(node)
}

fn place(node: &HtmlElement, pos: Vec2, size: Vec2) {
    let style = node.style();
    let _ = style.set_property("left", &format!("{}px", pos.x));
    let _ = style.set_property("top", &format!("{}px", pos.y));
    let _ = style.set_property("width", &format!("{}px", size.x));
    let _ = style.set_property("height", &format!("{}px", size.y));
}
