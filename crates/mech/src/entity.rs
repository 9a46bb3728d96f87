//! Player and enemy records
//!
//! Entities are plain data. The only behaviour here is stat initialisation
//! from the [`MechTable`] and the enemy pool's slot lifecycle.

use crate::assets::AssetRef;
use crate::fxdata;
use crate::types::{Angle, Fix8, Vec2};

/// Mech weight class, chosen on the main menu
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
#[repr(u8)]
pub enum MechClass {
    #[default]
    Light = 0,
    Medium = 1,
    Heavy = 2,
}

impl MechClass {
    /// All classes in table order
    pub const ALL: [MechClass; 3] = [MechClass::Light, MechClass::Medium, MechClass::Heavy];

    /// Row of this class in a [`MechTable`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decode a stored class byte
    pub const fn from_raw(raw: u8) -> Option<MechClass> {
        match raw {
            0 => Some(MechClass::Light),
            1 => Some(MechClass::Medium),
            2 => Some(MechClass::Heavy),
            _ => None,
        }
    }

    /// Decode a stored class byte, falling back to `Light`
    ///
    /// An unknown byte is a bug upstream: debug builds stop here, release
    /// builds carry on with the lightest mech.
    pub fn from_raw_or_default(raw: u8) -> MechClass {
        match MechClass::from_raw(raw) {
            Some(class) => class,
            None => {
                debug_assert!(false, "invalid mech class byte {raw}");
                log::warn!("invalid mech class byte {}, using light", raw);
                MechClass::Light
            }
        }
    }
}

/// Mech condition
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum MechStatus {
    #[default]
    Normal,
    Overheat,
    LegDamage,
    ArmDamage,
}

/// Enemy slot lifecycle
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum EnemyState {
    Active,
    #[default]
    Inactive,
    Exploding,
}

/// Position shared by everything in the world
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Entity {
    pub x: Fix8,
    pub y: Fix8,
}

impl Entity {
    pub const fn new(x: Fix8, y: Fix8) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Per-class starting stats
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MechStats {
    pub move_speed: Fix8,
    pub rotation_speed: u8,
    pub health: u8,
    pub bullet_damage: u8,
    pub cockpit: AssetRef,
}

/// Stat rows indexed by [`MechClass::index`]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MechTable {
    rows: [MechStats; 3],
}

impl MechTable {
    /// Stock balance
    pub const STOCK: MechTable = MechTable {
        rows: [
            MechStats {
                move_speed: Fix8::from_milli(300),
                rotation_speed: 3,
                health: 100,
                bullet_damage: 10,
                cockpit: fxdata::MOTHRA_COCKPIT_128X64,
            },
            MechStats {
                move_speed: Fix8::from_milli(200),
                rotation_speed: 2,
                health: 150,
                bullet_damage: 15,
                cockpit: fxdata::BATTLE_CAT_COCKPIT_128X64,
            },
            MechStats {
                move_speed: Fix8::from_milli(100),
                rotation_speed: 1,
                health: 200,
                bullet_damage: 20,
                cockpit: fxdata::THOR_HAMMER_COCKPIT_128X64,
            },
        ],
    };

    pub const fn new(rows: [MechStats; 3]) -> Self {
        Self { rows }
    }

    #[inline]
    pub const fn stats(&self, class: MechClass) -> &MechStats {
        &self.rows[class.index()]
    }

    /// Replace one row, for balancing without touching code
    pub fn set(&mut self, class: MechClass, stats: MechStats) {
        self.rows[class.index()] = stats;
    }
}

impl Default for MechTable {
    fn default() -> Self {
        Self::STOCK
    }
}

/// The player's mech
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Player {
    pub entity: Entity,
    pub facing_angle: Angle,
    pub view_angle: Angle,
    pub move_speed: Fix8,
    pub rotation_speed: u8,
    pub health: u8,
    pub bullet_damage: u8,
    pub class: MechClass,
    pub status: MechStatus,
    pub cockpit: Option<AssetRef>,
}

impl Player {
    /// Zeroed player, as it exists before a mech is picked
    pub const EMPTY: Player = Player {
        entity: Entity::new(Fix8::ZERO, Fix8::ZERO),
        facing_angle: Angle::ZERO,
        view_angle: Angle::ZERO,
        move_speed: Fix8::ZERO,
        rotation_speed: 0,
        health: 0,
        bullet_damage: 0,
        class: MechClass::Light,
        status: MechStatus::Normal,
        cockpit: None,
    };

    /// Fresh player of the given class
    pub fn new(class: MechClass, table: &MechTable) -> Self {
        let stats = table.stats(class);
        Player {
            move_speed: stats.move_speed,
            rotation_speed: stats.rotation_speed,
            health: stats.health,
            bullet_damage: stats.bullet_damage,
            class,
            status: MechStatus::Normal,
            cockpit: Some(stats.cockpit),
            ..Player::EMPTY
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage, saturating at zero
    pub fn take_damage(&mut self, amount: u8) {
        self.health = self.health.saturating_sub(amount);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Build a player from the table row for `class`
pub fn init_player(class: MechClass, table: &MechTable) -> Player {
    Player::new(class, table)
}

/// Frames in the explosion animation
pub const EXPLOSION_FRAMES: u8 = fxdata::EXPLOSION_23X23.frames;

/// One enemy slot
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Enemy {
    pub entity: Entity,
    pub state: EnemyState,
    /// Explosion animation frame while exploding
    pub frame: u8,
}

/// Fixed set of reusable enemy slots
#[derive(Clone, Debug)]
pub struct EnemyPool<const N: usize> {
    slots: [Enemy; N],
}

impl<const N: usize> EnemyPool<N> {
    pub const fn new() -> Self {
        Self {
            slots: [Enemy {
                entity: Entity::new(Fix8::ZERO, Fix8::ZERO),
                state: EnemyState::Inactive,
                frame: 0,
            }; N],
        }
    }

    /// Activate the first free slot at `(x, y)`
    pub fn spawn(&mut self, x: Fix8, y: Fix8) -> Option<usize> {
        let index = self
            .slots
            .iter()
            .position(|e| e.state == EnemyState::Inactive)?;
        self.slots[index] = Enemy {
            entity: Entity::new(x, y),
            state: EnemyState::Active,
            frame: 0,
        };
        Some(index)
    }

    /// Start the explosion of an active enemy
    ///
    /// Returns false if the slot was not active.
    pub fn defeat(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(enemy) if enemy.state == EnemyState::Active => {
                enemy.state = EnemyState::Exploding;
                enemy.frame = 0;
                true
            }
            _ => false,
        }
    }

    /// Advance explosions by one frame, freeing finished slots
    pub fn tick(&mut self) {
        for enemy in self.slots.iter_mut().filter(|e| e.state == EnemyState::Exploding) {
            enemy.frame += 1;
            if enemy.frame >= EXPLOSION_FRAMES {
                enemy.state = EnemyState::Inactive;
                enemy.frame = 0;
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&Enemy> {
        self.slots.get(index)
    }

    /// Enemies still in play
    pub fn active(&self) -> impl Iterator<Item = &Enemy> {
        self.slots.iter().filter(|e| e.state == EnemyState::Active)
    }

    /// Enemies that are not free
    pub fn live(&self) -> impl Iterator<Item = &Enemy> {
        self.slots.iter().filter(|e| e.state != EnemyState::Inactive)
    }

    /// Free every slot
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl<const N: usize> Default for EnemyPool<N> {
    fn default() -> Self {
        Self::new()
    }
}
