//! Top-level game states
//!
//! A [`Session`] holds everything a run of the game owns. Each frame the
//! driver calls [`Session::step`] once; the current state's handler reads
//! the input edges, updates the session and queues the bitmaps it wants on
//! screen as [`DrawRequest`]s. States never touch the flash or the frame
//! buffer themselves.
//!
//! ```text
//! MainMenu --A / B / A+B--> InitGame --> GamePlay --health 0--> GameOver --A--> MainMenu
//! ```

use crate::assets::AssetRef;
use crate::display::{DrawMode, HEIGHT, WIDTH};
use crate::entity::{EnemyPool, MechClass, MechTable, Player, init_player};
use crate::fxdata;
use crate::input::{Button, InputState};

/// Enemy slots per session
pub const ENEMY_SLOTS: usize = 8;

/// Draw requests one state may queue per frame
pub const MAX_DRAWS: usize = 8;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    InitGame,
    GamePlay,
    GameOver,
}

/// One bitmap to stream into the frame buffer
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DrawRequest {
    pub asset: AssetRef,
    pub x: i16,
    pub y: i16,
    pub frame: u8,
    pub mode: DrawMode,
}

impl DrawRequest {
    pub const fn new(asset: AssetRef, x: i16, y: i16, mode: DrawMode) -> Self {
        Self {
            asset,
            x,
            y,
            frame: 0,
            mode,
        }
    }

    /// Request `asset` centred on the screen
    pub const fn centered(asset: AssetRef, mode: DrawMode) -> Self {
        let x = (WIDTH as i16 - asset.width as i16) / 2;
        let y = (HEIGHT as i16 - asset.height as i16) / 2;
        Self::new(asset, x, y, mode)
    }

    pub const fn with_frame(self, frame: u8) -> Self {
        Self { frame, ..self }
    }
}

/// Fixed-capacity queue of draw requests for one frame
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    items: heapless::Vec<DrawRequest, MAX_DRAWS>,
}

impl DrawList {
    pub const fn new() -> Self {
        Self {
            items: heapless::Vec::new(),
        }
    }

    /// Queue a request; when full the request is dropped
    pub fn push(&mut self, request: DrawRequest) {
        if self.items.push(request).is_err() {
            log::warn!("draw list full, dropping {:?}", request.asset);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawRequest> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// All state owned by one run of the game
#[derive(Clone, Debug)]
pub struct Session {
    state: GameState,
    selected: MechClass,
    player: Player,
    enemies: EnemyPool<ENEMY_SLOTS>,
    table: MechTable,
    frame: u32,
}

impl Session {
    pub fn new(table: MechTable) -> Self {
        Self {
            state: GameState::MainMenu,
            selected: MechClass::Light,
            player: Player::EMPTY,
            enemies: EnemyPool::new(),
            table,
            frame: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Class chosen on the main menu
    #[inline]
    pub fn selected(&self) -> MechClass {
        self.selected
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &EnemyPool<ENEMY_SLOTS> {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut EnemyPool<ENEMY_SLOTS> {
        &mut self.enemies
    }

    /// Frames stepped since the session started
    #[inline]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Apply damage to the player; health stops at zero
    pub fn damage_player(&mut self, amount: u8) {
        self.player.take_damage(amount);
    }

    /// Run the current state's handler once
    pub fn step(&mut self, input: &InputState, draws: &mut DrawList) {
        let before = self.state;
        match self.state {
            GameState::MainMenu => self.main_menu(input, draws),
            GameState::InitGame => self.init_game(),
            GameState::GamePlay => self.game_play(input, draws),
            GameState::GameOver => self.game_over(input, draws),
        }
        self.frame = self.frame.wrapping_add(1);
        if self.state != before {
            log::info!("{:?} -> {:?}", before, self.state);
        }
    }

    fn main_menu(&mut self, input: &InputState, draws: &mut DrawList) {
        draws.push(DrawRequest::new(fxdata::MAIN_MENU_128X64, 0, 0, DrawMode::Masked));

        // Independent checks, later ones win: A+B on the same frame is Heavy
        if input.just_pressed(Button::A) {
            self.select(MechClass::Light);
        }
        if input.just_pressed(Button::B) {
            self.select(MechClass::Medium);
        }
        if input.just_pressed(Button::A) && input.just_pressed(Button::B) {
            self.select(MechClass::Heavy);
        }
    }

    fn select(&mut self, class: MechClass) {
        self.selected = class;
        self.state = GameState::InitGame;
    }

    fn init_game(&mut self) {
        self.player = init_player(self.selected, &self.table);
        self.enemies.clear();
        self.state = GameState::GamePlay;
    }

    fn game_play(&mut self, input: &InputState, draws: &mut DrawList) {
        if let Some(cockpit) = self.player.cockpit {
            draws.push(DrawRequest::new(cockpit, 0, 0, DrawMode::Masked));
        }

        let step = self.player.rotation_speed;
        if input.held(Button::Left) {
            self.player.facing_angle = self.player.facing_angle.turn_left(step);
        }
        if input.held(Button::Right) {
            self.player.facing_angle = self.player.facing_angle.turn_right(step);
        }

        self.enemies.tick();

        if !self.player.is_alive() {
            self.state = GameState::GameOver;
        }
    }

    fn game_over(&mut self, input: &InputState, draws: &mut DrawList) {
        draws.push(DrawRequest::centered(fxdata::GAME_OVER_STR, DrawMode::Overwrite));

        if input.just_pressed(Button::A) {
            self.teardown();
            self.state = GameState::MainMenu;
        }
    }

    fn teardown(&mut self) {
        self.player = Player::EMPTY;
        self.enemies.clear();
        self.selected = MechClass::Light;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(MechTable::STOCK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::MechStatus;
    use crate::input::Buttons;
    use crate::types::{Angle, Fix8};
    use pretty_assertions::assert_eq;

    fn step_with(session: &mut Session, input: &mut InputState, held: Buttons) -> DrawList {
        input.update(held);
        let mut draws = DrawList::new();
        session.step(input, &mut draws);
        draws
    }

    fn start(held: Buttons) -> (Session, InputState) {
        let mut session = Session::default();
        let mut input = InputState::new();
        step_with(&mut session, &mut input, held);
        (session, input)
    }

    #[test]
    fn test_menu_idle() {
        let (session, _) = start(Buttons::NONE);
        assert_eq!(session.state(), GameState::MainMenu);
    }

    #[test]
    fn test_menu_draws_title() {
        let mut session = Session::default();
        let mut draws = DrawList::new();
        session.step(&InputState::new(), &mut draws);
        let request = draws.iter().next().unwrap();
        assert_eq!(request.asset, fxdata::MAIN_MENU_128X64);
        assert_eq!((request.x, request.y, request.mode), (0, 0, DrawMode::Masked));
    }

    #[test]
    fn test_menu_selection() {
        let cases = [
            (Buttons::from(Button::A), MechClass::Light),
            (Buttons::from(Button::B), MechClass::Medium),
            (Button::A | Button::B, MechClass::Heavy),
        ];
        for (held, class) in cases {
            let (session, _) = start(held);
            assert_eq!(session.state(), GameState::InitGame);
            assert_eq!(session.selected(), class);
        }
    }

    #[test]
    fn test_held_button_is_not_a_press() {
        let mut session = Session::default();
        let mut input = InputState::new();
        // A went down during a previous state and is still held
        input.update(Buttons::from(Button::A));
        input.update(Buttons::from(Button::A));
        session.step(&input, &mut DrawList::new());
        assert_eq!(session.state(), GameState::MainMenu);
    }

    #[test]
    fn test_init_game_is_immediate() {
        let (mut session, mut input) = start(Buttons::from(Button::B));
        let draws = step_with(&mut session, &mut input, Buttons::NONE);
        assert!(draws.is_empty());
        assert_eq!(session.state(), GameState::GamePlay);

        let player = session.player();
        assert_eq!(player.class, MechClass::Medium);
        assert_eq!(player.move_speed, Fix8::from_raw(51));
        assert_eq!(player.rotation_speed, 2);
        assert_eq!(player.health, 150);
        assert_eq!(player.status, MechStatus::Normal);
        assert_eq!(player.cockpit, Some(fxdata::BATTLE_CAT_COCKPIT_128X64));
    }

    #[test]
    fn test_init_game_ignores_input() {
        let (mut session, mut input) = start(Buttons::from(Button::A));
        // B is a fresh press and Left is held on the init frame
        let draws = step_with(&mut session, &mut input, Buttons::from(Button::B) | Button::Left);
        assert!(draws.is_empty());
        assert_eq!(session.state(), GameState::GamePlay);
        assert_eq!(session.selected(), MechClass::Light);
        assert_eq!(session.player().class, MechClass::Light);
        assert_eq!(session.player().facing_angle, Angle::ZERO);
    }

    #[test]
    fn test_gameplay_rotation_and_cockpit() {
        let (mut session, mut input) = start(Buttons::from(Button::A));
        step_with(&mut session, &mut input, Buttons::NONE);

        let draws = step_with(&mut session, &mut input, Buttons::from(Button::Right));
        assert_eq!(draws.iter().next().unwrap().asset, fxdata::MOTHRA_COCKPIT_128X64);
        let right = session.player().facing_angle;
        assert_eq!(right, Angle::ZERO.turn_right(3));

        step_with(&mut session, &mut input, Buttons::from(Button::Left));
        step_with(&mut session, &mut input, Buttons::from(Button::Left));
        assert_eq!(session.player().facing_angle, Angle::ZERO.turn_left(3));
    }

    #[test]
    fn test_game_over_and_back() {
        let (mut session, mut input) = start(Button::A | Button::B);
        step_with(&mut session, &mut input, Buttons::NONE);
        session.damage_player(250);
        assert_eq!(session.player().health, 0);

        step_with(&mut session, &mut input, Buttons::NONE);
        assert_eq!(session.state(), GameState::GameOver);

        let draws = step_with(&mut session, &mut input, Buttons::NONE);
        let request = draws.iter().next().unwrap();
        assert_eq!(request.asset, fxdata::GAME_OVER_STR);
        assert_eq!((request.x, request.y), (44, 29));

        step_with(&mut session, &mut input, Buttons::from(Button::A));
        assert_eq!(session.state(), GameState::MainMenu);
        assert_eq!(*session.player(), Player::EMPTY);
        assert_eq!(session.enemies().live().count(), 0);
    }

    #[test]
    fn test_draw_list_overflow() {
        let mut draws = DrawList::new();
        for _ in 0..MAX_DRAWS + 2 {
            draws.push(DrawRequest::new(fxdata::DAY_STR, 0, 0, DrawMode::Or));
        }
        assert_eq!(draws.len(), MAX_DRAWS);
    }
}
