//! Asset table for the shipped data bank
//!
//! Generated by `fxpack` from `mech.fxm`. Do not edit by hand;
//! re-run the packer instead.

use crate::assets::{AssetDirectory, AssetRef, BankLayout, BitmapFormat, RecordRef};

/// Read-only asset bank
pub const DATA_BANK: BankLayout = BankLayout::new(0xfdb1, 147134);

/// Read/write save bank
pub const SAVE_BANK: BankLayout = BankLayout::new(0xfff0, 4096);

pub const PLAYER_MOTHRA_STATS: RecordRef = RecordRef::data(0x000000, 6);
pub const PLAYER_BATTLE_CAT_STATS: RecordRef = RecordRef::data(0x000006, 6);
pub const PLAYER_THOR_HAMMER_STATS: RecordRef = RecordRef::data(0x00000C, 6);
pub const AVAILABLE_WEAPONS: RecordRef = RecordRef::data(0x000012, 30);
pub const MAIN_MENU_ITEMS: RecordRef = RecordRef::data(0x000030, 12);
pub const SAVE_LOAD_MENU_ITEMS: RecordRef = RecordRef::data(0x00003C, 8);
pub const MISSION_MENU_ITEMS: RecordRef = RecordRef::data(0x000044, 12);
pub const HANGER_MENU_ITEMS: RecordRef = RecordRef::data(0x000050, 24);
pub const CUSTOMIZATION_MENU_ITEMS: RecordRef = RecordRef::data(0x000068, 16);

pub const NO_SAVE_DATA_STR: AssetRef = AssetRef::bitmap(0x000078, 50, 6, BitmapFormat::Plain);
pub const DAY_STR: AssetRef = AssetRef::bitmap(0x0000AE, 20, 6, BitmapFormat::Plain);
pub const ENEMIES_STR: AssetRef = AssetRef::bitmap(0x0000C6, 40, 6, BitmapFormat::Plain);
pub const COST_STR: AssetRef = AssetRef::bitmap(0x0000F2, 25, 6, BitmapFormat::Plain);
pub const DMG_STR: AssetRef = AssetRef::bitmap(0x00010F, 20, 6, BitmapFormat::Plain);
pub const PRESS_A_STR: AssetRef = AssetRef::bitmap(0x000127, 30, 6, BitmapFormat::Plain);
pub const NOT_ENOUGH_MONEY_STR: AssetRef = AssetRef::bitmap(0x000149, 75, 6, BitmapFormat::Plain);
pub const A_OR_B_STR: AssetRef = AssetRef::bitmap(0x000198, 45, 6, BitmapFormat::Plain);
pub const A_YES_B_NO_STR: AssetRef = AssetRef::bitmap(0x0001C9, 45, 6, BitmapFormat::Plain);
pub const SELL_THIS_WEAPON_STR: AssetRef = AssetRef::bitmap(0x0001FA, 75, 6, BitmapFormat::Plain);
pub const MOTHRA_STR: AssetRef = AssetRef::bitmap(0x000249, 30, 6, BitmapFormat::Plain);
pub const BATTLE_CAT_STR: AssetRef = AssetRef::bitmap(0x00026B, 45, 6, BitmapFormat::Plain);
pub const THOR_HAMMER_STR: AssetRef = AssetRef::bitmap(0x00029C, 50, 6, BitmapFormat::Plain);
pub const ARMOR_STR: AssetRef = AssetRef::bitmap(0x0002D2, 25, 6, BitmapFormat::Plain);
pub const WEIGHT_STR: AssetRef = AssetRef::bitmap(0x0002EF, 30, 6, BitmapFormat::Plain);
pub const HEAT_SINK_STR: AssetRef = AssetRef::bitmap(0x000311, 40, 6, BitmapFormat::Plain);
pub const HEAT_STR: AssetRef = AssetRef::bitmap(0x00033D, 25, 6, BitmapFormat::Plain);
pub const MOVE_SPEED_STR: AssetRef = AssetRef::bitmap(0x00035A, 45, 6, BitmapFormat::Plain);
pub const CREDITS_STR: AssetRef = AssetRef::bitmap(0x00038B, 35, 6, BitmapFormat::Plain);
pub const OVERHEAT_STR: AssetRef = AssetRef::bitmap(0x0003B2, 40, 6, BitmapFormat::Plain);
pub const GAME_OVER_STR: AssetRef = AssetRef::bitmap(0x0003DE, 40, 6, BitmapFormat::Plain);
pub const WEAPON_SLOTS_STR: AssetRef = AssetRef::bitmap(0x00040A, 60, 6, BitmapFormat::Plain);
pub const AVAILABLE_WEAPONS_STR: AssetRef = AssetRef::bitmap(0x00044A, 85, 6, BitmapFormat::Plain);
pub const WEAPONS_LIST_STR: AssetRef = AssetRef::bitmap(0x0004A3, 55, 6, BitmapFormat::Plain);
pub const LIGHT_MG_STR: AssetRef = AssetRef::bitmap(0x0004DE, 30, 6, BitmapFormat::Plain);
pub const HEAVY_MG_STR: AssetRef = AssetRef::bitmap(0x000500, 35, 6, BitmapFormat::Plain);
pub const ROCKET_STR: AssetRef = AssetRef::bitmap(0x000527, 30, 6, BitmapFormat::Plain);
pub const MED_ROCKET_STR: AssetRef = AssetRef::bitmap(0x000549, 45, 6, BitmapFormat::Plain);
pub const LASER_STR: AssetRef = AssetRef::bitmap(0x00057A, 25, 6, BitmapFormat::Plain);
pub const EMPTY_STR: AssetRef = AssetRef::bitmap(0x000597, 25, 6, BitmapFormat::Plain);
pub const FONT_4X6: AssetRef = AssetRef::bitmap(0x0005B4, 128, 64, BitmapFormat::Plain);
pub const FONT_3X5: AssetRef = AssetRef::bitmap(0x0009B8, 128, 64, BitmapFormat::Plain);
pub const AVAILABLE_WEAPONS_MENU_90X60: AssetRef = AssetRef::bitmap(0x000DBC, 90, 60, BitmapFormat::Masked);
pub const WEAPONS_STATS_MENU_50X40: AssetRef = AssetRef::bitmap(0x001360, 50, 40, BitmapFormat::Plain);
pub const NOT_ENOUGH_MONEY_86X20: AssetRef = AssetRef::bitmap(0x00145E, 86, 20, BitmapFormat::Plain);
pub const TITLE_SCREEN_128X64: AssetRef = AssetRef::bitmap(0x001564, 128, 64, BitmapFormat::Masked);
pub const MAIN_MENU_128X64: AssetRef = AssetRef::bitmap(0x001D68, 128, 64, BitmapFormat::Masked);
pub const SAVE_LOAD_MENU_128X64: AssetRef = AssetRef::bitmap(0x00256C, 128, 64, BitmapFormat::Masked);
pub const MISSION_MENU_128X64: AssetRef = AssetRef::bitmap(0x002D70, 128, 64, BitmapFormat::Masked);
pub const HANGER_MENU_128X64: AssetRef = AssetRef::bitmap(0x003574, 128, 64, BitmapFormat::Masked);
pub const CUSTOMIZATION_MENU_128X64: AssetRef = AssetRef::bitmap(0x003D78, 128, 64, BitmapFormat::Masked);
pub const LEFT_ARROW_SMALL: AssetRef = AssetRef::bitmap(0x00457C, 7, 13, BitmapFormat::Masked);
pub const RIGHT_ARROW_SMALL: AssetRef = AssetRef::bitmap(0x00459C, 7, 13, BitmapFormat::Masked);
pub const MOTHRA_COCKPIT_128X64: AssetRef = AssetRef::bitmap(0x0045BC, 128, 64, BitmapFormat::Masked);
pub const BATTLE_CAT_COCKPIT_128X64: AssetRef = AssetRef::bitmap(0x004DC0, 128, 64, BitmapFormat::Masked);
pub const THOR_HAMMER_COCKPIT_128X64: AssetRef = AssetRef::bitmap(0x0055C4, 128, 64, BitmapFormat::Masked);
pub const ENEMY_2X3: AssetRef = AssetRef::bitmap(0x005DC8, 2, 3, BitmapFormat::Masked);
pub const MECH_6X8: AssetRef = AssetRef::bitmap(0x005DD0, 6, 8, BitmapFormat::Masked);
pub const MOTHRA_8X11: AssetRef = AssetRef::sheet(0x005DE0, 8, 11, 8, BitmapFormat::Masked);
pub const MOTHRA_16X21: AssetRef = AssetRef::sheet(0x005EE4, 16, 21, 8, BitmapFormat::Masked);
pub const MOTHRA_30X40: AssetRef = AssetRef::sheet(0x0061E8, 30, 42, 8, BitmapFormat::Masked);
pub const MOTHRA_50X67: AssetRef = AssetRef::sheet(0x006D2C, 50, 70, 8, BitmapFormat::Masked);
pub const MOTHRA_70X94: AssetRef = AssetRef::bitmap(0x008950, 70, 98, BitmapFormat::Masked);
pub const MOTHRA_90X121: AssetRef = AssetRef::bitmap(0x009070, 90, 126, BitmapFormat::Masked);
pub const MOTHRA_110X148: AssetRef = AssetRef::bitmap(0x009BB4, 110, 154, BitmapFormat::Masked);
pub const BATTLE_CAT_8X11: AssetRef = AssetRef::bitmap(0x00ACE8, 8, 11, BitmapFormat::Masked);
pub const BATTLE_CAT_16X21: AssetRef = AssetRef::bitmap(0x00AD0C, 16, 21, BitmapFormat::Masked);
pub const BATTLE_CAT_30X40: AssetRef = AssetRef::sheet(0x00AD70, 30, 40, 8, BitmapFormat::Masked);
pub const BATTLE_CAT_50X67: AssetRef = AssetRef::sheet(0x00B6D4, 50, 67, 8, BitmapFormat::Masked);
pub const BATTLE_CAT_70X94: AssetRef = AssetRef::sheet(0x00D2F8, 70, 94, 8, BitmapFormat::Masked);
pub const BATTLE_CAT_90X121: AssetRef = AssetRef::bitmap(0x01077C, 90, 121, BitmapFormat::Masked);
pub const BATTLE_CAT_110X148: AssetRef = AssetRef::bitmap(0x0112C0, 110, 148, BitmapFormat::Masked);
pub const THOR_HAMMER_8X11: AssetRef = AssetRef::sheet(0x012318, 8, 11, 8, BitmapFormat::Masked);
pub const THOR_HAMMER_16X21: AssetRef = AssetRef::sheet(0x01241C, 16, 21, 8, BitmapFormat::Masked);
pub const THOR_HAMMER_30X40: AssetRef = AssetRef::sheet(0x012720, 30, 39, 8, BitmapFormat::Masked);
pub const THOR_HAMMER_50X67: AssetRef = AssetRef::sheet(0x013084, 50, 65, 8, BitmapFormat::Masked);
pub const THOR_HAMMER_70X94: AssetRef = AssetRef::sheet(0x014CA8, 70, 90, 8, BitmapFormat::Masked);
pub const THOR_HAMMER_90X121: AssetRef = AssetRef::bitmap(0x01812C, 90, 116, BitmapFormat::Masked);
pub const THOR_HAMMER_110X148: AssetRef = AssetRef::bitmap(0x018BBC, 110, 142, BitmapFormat::Masked);
pub const EXPLOSION_23X23: AssetRef = AssetRef::sheet(0x019B38, 23, 23, 7, BitmapFormat::Masked);
pub const EXPLOSION_46X46: AssetRef = AssetRef::sheet(0x019F02, 46, 46, 7, BitmapFormat::Masked);
pub const EXPLOSION_92X92: AssetRef = AssetRef::sheet(0x01AE1E, 92, 92, 7, BitmapFormat::Masked);
pub const EXPLOSION_110X110: AssetRef = AssetRef::sheet(0x01EA82, 110, 110, 7, BitmapFormat::Masked);

/// Every bitmap by name, in bank order
pub const ASSETS: &[(&str, AssetRef)] = &[
    ("no_save_data_str", NO_SAVE_DATA_STR),
    ("day_str", DAY_STR),
    ("enemies_str", ENEMIES_STR),
    ("cost_str", COST_STR),
    ("dmg_str", DMG_STR),
    ("press_a_str", PRESS_A_STR),
    ("not_enough_money_str", NOT_ENOUGH_MONEY_STR),
    ("a_or_b_str", A_OR_B_STR),
    ("a_yes_b_no_str", A_YES_B_NO_STR),
    ("sell_this_weapon_str", SELL_THIS_WEAPON_STR),
    ("mothra_str", MOTHRA_STR),
    ("battle_cat_str", BATTLE_CAT_STR),
    ("thor_hammer_str", THOR_HAMMER_STR),
    ("armor_str", ARMOR_STR),
    ("weight_str", WEIGHT_STR),
    ("heat_sink_str", HEAT_SINK_STR),
    ("heat_str", HEAT_STR),
    ("move_speed_str", MOVE_SPEED_STR),
    ("credits_str", CREDITS_STR),
    ("overheat_str", OVERHEAT_STR),
    ("game_over_str", GAME_OVER_STR),
    ("weapon_slots_str", WEAPON_SLOTS_STR),
    ("available_weapons_str", AVAILABLE_WEAPONS_STR),
    ("weapons_list_str", WEAPONS_LIST_STR),
    ("light_mg_str", LIGHT_MG_STR),
    ("heavy_mg_str", HEAVY_MG_STR),
    ("rocket_str", ROCKET_STR),
    ("med_rocket_str", MED_ROCKET_STR),
    ("laser_str", LASER_STR),
    ("empty_str", EMPTY_STR),
    ("font_4x6", FONT_4X6),
    ("font_3x5", FONT_3X5),
    ("available_weapons_menu_90x60", AVAILABLE_WEAPONS_MENU_90X60),
    ("weapons_stats_menu_50x40", WEAPONS_STATS_MENU_50X40),
    ("not_enough_money_86x20", NOT_ENOUGH_MONEY_86X20),
    ("title_screen_128x64", TITLE_SCREEN_128X64),
    ("main_menu_128x64", MAIN_MENU_128X64),
    ("save_load_menu_128x64", SAVE_LOAD_MENU_128X64),
    ("mission_menu_128x64", MISSION_MENU_128X64),
    ("hanger_menu_128x64", HANGER_MENU_128X64),
    ("customization_menu_128x64", CUSTOMIZATION_MENU_128X64),
    ("left_arrow_small", LEFT_ARROW_SMALL),
    ("right_arrow_small", RIGHT_ARROW_SMALL),
    ("mothra_cockpit_128x64", MOTHRA_COCKPIT_128X64),
    ("battle_cat_cockpit_128x64", BATTLE_CAT_COCKPIT_128X64),
    ("thor_hammer_cockpit_128x64", THOR_HAMMER_COCKPIT_128X64),
    ("enemy_2x3", ENEMY_2X3),
    ("mech_6x8", MECH_6X8),
    ("mothra_8x11", MOTHRA_8X11),
    ("mothra_16x21", MOTHRA_16X21),
    ("mothra_30x40", MOTHRA_30X40),
    ("mothra_50x67", MOTHRA_50X67),
    ("mothra_70x94", MOTHRA_70X94),
    ("mothra_90x121", MOTHRA_90X121),
    ("mothra_110x148", MOTHRA_110X148),
    ("battle_cat_8x11", BATTLE_CAT_8X11),
    ("battle_cat_16x21", BATTLE_CAT_16X21),
    ("battle_cat_30x40", BATTLE_CAT_30X40),
    ("battle_cat_50x67", BATTLE_CAT_50X67),
    ("battle_cat_70x94", BATTLE_CAT_70X94),
    ("battle_cat_90x121", BATTLE_CAT_90X121),
    ("battle_cat_110x148", BATTLE_CAT_110X148),
    ("thor_hammer_8x11", THOR_HAMMER_8X11),
    ("thor_hammer_16x21", THOR_HAMMER_16X21),
    ("thor_hammer_30x40", THOR_HAMMER_30X40),
    ("thor_hammer_50x67", THOR_HAMMER_50X67),
    ("thor_hammer_70x94", THOR_HAMMER_70X94),
    ("thor_hammer_90x121", THOR_HAMMER_90X121),
    ("thor_hammer_110x148", THOR_HAMMER_110X148),
    ("explosion_23x23", EXPLOSION_23X23),
    ("explosion_46x46", EXPLOSION_46X46),
    ("explosion_92x92", EXPLOSION_92X92),
    ("explosion_110x110", EXPLOSION_110X110),
];

/// Directory over the shipped banks
pub const fn directory() -> AssetDirectory {
    AssetDirectory::new(DATA_BANK, SAVE_BANK, ASSETS)
}
