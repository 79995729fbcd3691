//! Enchant profile record (enchant.txt)

use serde::{Deserialize, Serialize};

use crate::constants::{DAMAGE_COUNT, DamageModifier, MAX_ENCHANT_ADD};
use crate::idsz::Idsz;
use crate::types::{DamageType, MissileTreatment};

/// An override the enchant applies to its target while it lasts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnchantSet<T> {
    pub enabled: bool,
    pub value: T,
}

impl<T> EnchantSet<T> {
    pub fn new(enabled: bool, value: T) -> Self {
        Self { enabled, value }
    }
}

/// Index into [`EveRecord::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddKind {
    JumpPower = 0,
    BumpDampen,
    Bounciness,
    Damage,
    Size,
    Accel,
    Red,
    Green,
    Blue,
    Defense,
    Mana,
    Life,
    Strength,
    Wisdom,
    Intelligence,
    Dexterity,
}

impl AddKind {
    pub const ALL: [AddKind; MAX_ENCHANT_ADD] = [
        AddKind::JumpPower,
        AddKind::BumpDampen,
        AddKind::Bounciness,
        AddKind::Damage,
        AddKind::Size,
        AddKind::Accel,
        AddKind::Red,
        AddKind::Green,
        AddKind::Blue,
        AddKind::Defense,
        AddKind::Mana,
        AddKind::Life,
        AddKind::Strength,
        AddKind::Wisdom,
        AddKind::Intelligence,
        AddKind::Dexterity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AddKind::JumpPower => "Jump power",
            AddKind::BumpDampen => "Bump dampen",
            AddKind::Bounciness => "Bounciness",
            AddKind::Damage => "Damage",
            AddKind::Size => "Size",
            AddKind::Accel => "Acceleration",
            AddKind::Red => "Red shift",
            AddKind::Green => "Green shift",
            AddKind::Blue => "Blue shift",
            AddKind::Defense => "Defense",
            AddKind::Mana => "Mana",
            AddKind::Life => "Life",
            AddKind::Strength => "Strength",
            AddKind::Wisdom => "Wisdom",
            AddKind::Intelligence => "Intelligence",
            AddKind::Dexterity => "Dexterity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EveRecord {
    pub loaded: bool,

    pub retarget: bool,
    pub override_: bool,
    pub remove_overridden: bool,
    pub kill_target_on_end: bool,
    pub poof_on_end: bool,

    /// Seconds, -1 lasts forever
    pub lifetime: i32,
    pub end_message: i32,

    // drains, 8.8 fixed point
    pub owner_mana: i32,
    pub target_mana: i32,
    pub end_if_cant_pay: bool,
    pub owner_life: i32,
    pub target_life: i32,

    pub required_damage_type: Option<DamageType>,
    pub require_target_damage_type: Option<DamageType>,
    pub removed_by_idsz: Idsz,

    // sets
    pub set_damage_type: EnchantSet<Option<DamageType>>,
    pub set_jump_count: EnchantSet<i32>,
    pub set_life_bar_color: EnchantSet<i32>,
    pub set_mana_bar_color: EnchantSet<i32>,
    pub set_damage_modifier: [EnchantSet<DamageModifier>; DAMAGE_COUNT],
    /// Carried on the modifier lines
    pub resist_add: [f32; DAMAGE_COUNT],
    pub set_flashing_and: EnchantSet<i32>,
    pub set_light_blend: EnchantSet<i32>,
    pub set_alpha_blend: EnchantSet<i32>,
    pub set_sheen: EnchantSet<i32>,
    pub set_fly_height: EnchantSet<i32>,
    pub set_walk_on_water: EnchantSet<bool>,
    pub set_see_invisible: EnchantSet<bool>,
    pub set_missile_treatment: EnchantSet<MissileTreatment>,
    pub set_missile_cost: EnchantSet<f32>,
    pub set_morph: EnchantSet<bool>,
    pub set_channel: EnchantSet<bool>,

    /// Deltas indexed by [`AddKind`]; defense is stored sign-inverted on disk
    pub add: [f32; MAX_ENCHANT_ADD],

    // expansions
    pub contspawn_amount: i32,
    pub contspawn_lpip: i32,
    pub contspawn_delay: i32,
    pub contspawn_facing_add: i32,
    pub end_sound_index: i32,
    pub stay_if_no_owner: bool,
    pub spawn_overlay: bool,
    pub stay_if_target_dead: bool,
    pub see_kurses: i32,
    pub darkvision: i32,
}

impl Default for EveRecord {
    fn default() -> Self {
        Self {
            loaded: false,
            retarget: false,
            override_: false,
            remove_overridden: false,
            kill_target_on_end: false,
            poof_on_end: false,
            lifetime: -1,
            end_message: -1,
            owner_mana: 0,
            target_mana: 0,
            end_if_cant_pay: false,
            owner_life: 0,
            target_life: 0,
            required_damage_type: None,
            require_target_damage_type: None,
            removed_by_idsz: Idsz::NONE,
            set_damage_type: EnchantSet::default(),
            set_jump_count: EnchantSet::default(),
            set_life_bar_color: EnchantSet::default(),
            set_mana_bar_color: EnchantSet::default(),
            set_damage_modifier: [EnchantSet::default(); DAMAGE_COUNT],
            resist_add: [0.0; DAMAGE_COUNT],
            set_flashing_and: EnchantSet::default(),
            set_light_blend: EnchantSet::default(),
            set_alpha_blend: EnchantSet::default(),
            set_sheen: EnchantSet::default(),
            set_fly_height: EnchantSet::default(),
            set_walk_on_water: EnchantSet::default(),
            set_see_invisible: EnchantSet::default(),
            set_missile_treatment: EnchantSet::default(),
            set_missile_cost: EnchantSet::default(),
            set_morph: EnchantSet::new(false, true),
            set_channel: EnchantSet::new(false, true),
            add: [0.0; MAX_ENCHANT_ADD],
            contspawn_amount: 0,
            contspawn_lpip: -1,
            contspawn_delay: 0,
            contspawn_facing_add: 0,
            end_sound_index: -1,
            stay_if_no_owner: false,
            spawn_overlay: false,
            stay_if_target_dead: false,
            see_kurses: 0,
            darkvision: 0,
        }
    }
}

impl EveRecord {
    pub fn add_value(&self, kind: AddKind) -> f32 {
        self.add[kind as usize]
    }

    /// Whether the add slot does anything. Always derived from the value.
    pub fn add_yes_no(&self, kind: AddKind) -> bool {
        self.add[kind as usize] != 0.0
    }

    /// Number of enabled set slots.
    pub fn enabled_sets(&self) -> usize {
        let flags = [
            self.set_damage_type.enabled,
            self.set_jump_count.enabled,
            self.set_life_bar_color.enabled,
            self.set_mana_bar_color.enabled,
            self.set_flashing_and.enabled,
            self.set_light_blend.enabled,
            self.set_alpha_blend.enabled,
            self.set_sheen.enabled,
            self.set_fly_height.enabled,
            self.set_walk_on_water.enabled,
            self.set_see_invisible.enabled,
            self.set_missile_treatment.enabled,
            self.set_missile_cost.enabled,
            self.set_morph.enabled,
            self.set_channel.enabled,
        ];
        flags.iter().filter(|&&on| on).count()
            + self
                .set_damage_modifier
                .iter()
                .filter(|set| set.enabled)
                .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_yes_no_tracks_value() {
        let mut eve = EveRecord::default();
        assert!(!eve.add_yes_no(AddKind::Life));

        eve.add[AddKind::Life as usize] = 0.5;
        assert!(eve.add_yes_no(AddKind::Life));
        assert_eq!(eve.add_value(AddKind::Life), 0.5);

        eve.add[AddKind::Life as usize] = 0.0;
        assert!(!eve.add_yes_no(AddKind::Life));
    }

    #[test]
    fn counts_enabled_sets() {
        let mut eve = EveRecord::default();
        assert_eq!(eve.enabled_sets(), 0);

        eve.set_sheen.enabled = true;
        eve.set_damage_modifier[DamageType::Fire.index()].enabled = true;
        assert_eq!(eve.enabled_sets(), 2);
    }

    #[test]
    fn add_kinds_cover_every_slot() {
        for (i, kind) in AddKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, i);
        }
    }
}
