//! Character profile record (data.txt)

use serde::{Deserialize, Serialize};

use crate::constants::{
    DAMAGE_COUNT, DamageModifier, IDSZ_COUNT, MAX_BASE_LEVEL, MAX_SKIN, MeshFx, ModelFlags,
    NO_HIDE, SLOT_COUNT, SOUND_COUNT, STAT_COUNT, XP_COUNT,
};
use crate::idsz::{Idsz, IdszMap};
use crate::types::{BloodKind, DamageType, FloatRange, Gender, WeaponAction};

pub const STAT_LIFE: usize = 0;
pub const STAT_MANA: usize = 1;
pub const STAT_MANA_RETURN: usize = 2;
pub const STAT_MANA_FLOW: usize = 3;
pub const STAT_STRENGTH: usize = 4;
pub const STAT_WISDOM: usize = 5;
pub const STAT_INTELLIGENCE: usize = 6;
pub const STAT_DEXTERITY: usize = 7;

pub const STAT_NAMES: [&str; STAT_COUNT] = [
    "Life",
    "Mana",
    "Mana return",
    "Mana flow",
    "Strength",
    "Wisdom",
    "Intelligence",
    "Dexterity",
];

pub const XP_NAMES: [&str; XP_COUNT] = [
    "Finding secrets",
    "Winning a quest",
    "Using unknown",
    "Killing enemy",
    "Killing sleeping",
    "Killing hated",
    "Team killing",
    "Talking",
];

/// A rolled stat: base range plus the range added on each level up
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatPair {
    pub value: FloatRange,
    pub per_level: FloatRange,
}

/// One object archetype as described by its data.txt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapRecord {
    pub loaded: bool,
    pub classname: String,

    // light and ammo
    pub uniform_lit: bool,
    pub ammo_max: i32,
    pub ammo: i32,
    pub gender: Gender,

    pub stats: [StatPair; STAT_COUNT],

    // physics
    pub size: f32,
    pub size_per_level: f32,
    pub shadow_size: i32,
    pub bump_size: i32,
    pub bump_height: i32,
    pub bump_dampen: f32,
    pub weight: i32,
    pub jump_power: f32,
    pub jump_count: i32,
    pub anim_speed_sneak: f32,
    pub anim_speed_walk: f32,
    pub anim_speed_run: f32,
    pub fly_height: i32,

    // graphics
    pub flash_and: i32,
    pub alpha: i32,
    pub light: i32,
    pub transfer_blend: bool,
    pub sheen: i32,
    pub enviro: bool,
    /// Texture scroll speeds in 1/65535 units
    pub uoff_vel: i32,
    pub voff_vel: i32,
    pub sticky_butt: bool,

    // invulnerability
    pub invictus: bool,
    pub iframe_facing: i32,
    pub iframe_angle: i32,
    pub nframe_facing: i32,
    pub nframe_angle: i32,

    // per skin
    pub defense: [u8; MAX_SKIN],
    pub damage_resistance: [[f32; MAX_SKIN]; DAMAGE_COUNT],
    pub damage_modifier: [[DamageModifier; MAX_SKIN]; DAMAGE_COUNT],
    pub max_accel: [f32; MAX_SKIN],

    // experience
    pub experience_for_level: [i32; MAX_BASE_LEVEL],
    pub experience: FloatRange,
    pub experience_worth: i32,
    pub experience_exchange: f32,
    pub experience_rate: [f32; XP_COUNT],

    pub idsz: [Idsz; IDSZ_COUNT],

    // item flags
    pub is_item: bool,
    pub is_mount: bool,
    pub is_stackable: bool,
    pub name_known: bool,
    pub usage_known: bool,
    pub can_carry_to_next_module: bool,
    pub needs_skill_id_to_use: bool,
    pub platform: bool,
    pub can_grab_money: bool,
    pub can_open_stuff: bool,

    // combat
    pub damage_target_damage_type: Option<DamageType>,
    pub weapon_action: WeaponAction,
    pub attached_prt_amount: i32,
    pub attached_prt_reaffirm_damage_type: Option<DamageType>,
    pub attached_prt_lpip: i32,
    pub slot_valid: [bool; SLOT_COUNT],
    pub attack_attached: bool,
    pub attack_lpip: i32,
    pub gopoof_prt_amount: i32,
    pub gopoof_prt_facing_add: i32,
    pub gopoof_prt_lpip: i32,
    pub blood: BloodKind,
    pub blood_lpip: i32,

    // misc
    pub water_walk: bool,
    pub dampen: f32,
    /// 8.8 fixed point
    pub life_heal: i32,
    /// 8.8 fixed point
    pub mana_cost: i32,
    pub life_return: i32,
    pub stopped_by: MeshFx,
    pub skin_name: [String; MAX_SKIN],
    pub skin_cost: [i32; MAX_SKIN],
    pub str_bonus: f32,
    pub rider_cannot_attack: bool,
    pub can_be_dazed: bool,
    pub can_be_grogged: bool,
    pub can_see_invisible: bool,
    pub kurse_chance: i32,
    pub sound_index: [i32; SOUND_COUNT],

    // expansions
    /// Bit `n` set means skin `n` counts as dressy
    pub skin_dressy: u32,
    pub money: i32,
    pub resist_bump_spawn: bool,
    pub is_too_big: bool,
    pub reflect: bool,
    pub always_draw: bool,
    pub is_ranged: bool,
    pub hide_state: i32,
    pub is_equipment: bool,
    pub bump_size_big: f32,
    pub draw_icon: bool,
    pub force_shadow: bool,
    pub skin_override: Option<usize>,
    pub content_override: i32,
    pub state_override: i32,
    pub level_override: i32,
    pub can_use_platforms: bool,
    pub ripple: bool,
    pub is_valuable: i32,
    /// 8.8 fixed point
    pub life_spawn: i32,
    /// 8.8 fixed point
    pub mana_spawn: i32,
    pub spell_effect_type: Option<usize>,
    pub attack_fast: bool,
    pub int_bonus: f32,
    pub wis_bonus: f32,
    pub dex_bonus: f32,
    pub model_flags: ModelFlags,

    /// Every expansion IDSZ without a meaning of its own
    pub skills: IdszMap,
}

impl Default for CapRecord {
    fn default() -> Self {
        Self {
            loaded: false,
            classname: String::new(),
            uniform_lit: false,
            ammo_max: 0,
            ammo: 0,
            gender: Gender::Other,
            stats: [StatPair::default(); STAT_COUNT],
            size: 1.0,
            size_per_level: 0.0,
            shadow_size: 0,
            bump_size: 0,
            bump_height: 0,
            bump_dampen: 0.0,
            weight: 0,
            jump_power: 0.0,
            jump_count: 0,
            anim_speed_sneak: 1.0,
            anim_speed_walk: 1.0,
            anim_speed_run: 1.0,
            fly_height: 0,
            flash_and: 0,
            alpha: 255,
            light: 255,
            transfer_blend: false,
            sheen: 0,
            enviro: false,
            uoff_vel: 0,
            voff_vel: 0,
            sticky_butt: false,
            invictus: false,
            iframe_facing: 0,
            iframe_angle: 0,
            nframe_facing: 0,
            nframe_angle: 0,
            defense: [0; MAX_SKIN],
            damage_resistance: [[0.0; MAX_SKIN]; DAMAGE_COUNT],
            damage_modifier: [[DamageModifier::empty(); MAX_SKIN]; DAMAGE_COUNT],
            max_accel: [0.0; MAX_SKIN],
            experience_for_level: [0; MAX_BASE_LEVEL],
            experience: FloatRange::default(),
            experience_worth: 0,
            experience_exchange: 0.0,
            experience_rate: [0.0; XP_COUNT],
            idsz: [Idsz::NONE; IDSZ_COUNT],
            is_item: false,
            is_mount: false,
            is_stackable: false,
            name_known: false,
            usage_known: false,
            can_carry_to_next_module: false,
            needs_skill_id_to_use: false,
            platform: false,
            can_grab_money: false,
            can_open_stuff: false,
            damage_target_damage_type: None,
            weapon_action: WeaponAction::Dance,
            attached_prt_amount: 0,
            attached_prt_reaffirm_damage_type: None,
            attached_prt_lpip: -1,
            slot_valid: [false; SLOT_COUNT],
            attack_attached: false,
            attack_lpip: -1,
            gopoof_prt_amount: 0,
            gopoof_prt_facing_add: 0,
            gopoof_prt_lpip: -1,
            blood: BloodKind::None,
            blood_lpip: -1,
            water_walk: false,
            dampen: 0.0,
            life_heal: 0,
            mana_cost: 0,
            life_return: 0,
            stopped_by: MeshFx::IMPASSABLE,
            skin_name: Default::default(),
            skin_cost: [0; MAX_SKIN],
            str_bonus: 0.0,
            rider_cannot_attack: false,
            can_be_dazed: false,
            can_be_grogged: false,
            can_see_invisible: false,
            kurse_chance: 0,
            sound_index: [-1; SOUND_COUNT],
            skin_dressy: 0,
            money: 0,
            resist_bump_spawn: false,
            is_too_big: false,
            reflect: true,
            always_draw: false,
            is_ranged: false,
            hide_state: NO_HIDE,
            is_equipment: false,
            bump_size_big: 0.0,
            draw_icon: false,
            force_shadow: false,
            skin_override: None,
            content_override: 0,
            state_override: 0,
            level_override: 0,
            can_use_platforms: true,
            ripple: true,
            is_valuable: -1,
            life_spawn: 0,
            mana_spawn: 0,
            spell_effect_type: None,
            attack_fast: false,
            int_bonus: 0.0,
            wis_bonus: 0.0,
            dex_bonus: 0.0,
            model_flags: ModelFlags::empty(),
            skills: IdszMap::new(),
        }
    }
}

impl CapRecord {
    /// Skin forced on spawned instances. A spell effect type wins over a
    /// plain skin override.
    pub fn get_skin(&self) -> Option<usize> {
        self.spell_effect_type
            .or(self.skin_override)
            .map(|skin| skin % MAX_SKIN)
    }

    /// Sets the fields whose default depends on other fields. The decoder
    /// runs this before the expansion tags so a tag can still override them.
    pub fn apply_derived_defaults(&mut self) {
        self.ripple = !self.is_item;
        self.bump_size_big = self.bump_size as f32 * std::f32::consts::SQRT_2;
        self.draw_icon = self.usage_known;
        self.can_use_platforms = !self.platform;
    }

    pub fn idsz_parent(&self) -> Idsz {
        self.idsz[crate::constants::IDSZ_PARENT]
    }

    pub fn idsz_type(&self) -> Idsz {
        self.idsz[crate::constants::IDSZ_TYPE]
    }

    pub fn is_dressy(&self, skin: usize) -> bool {
        skin < 32 && (self.skin_dressy & (1 << skin)) != 0
    }
}
