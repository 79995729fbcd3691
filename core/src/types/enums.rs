//! Small letter-coded enums shared by the profile formats

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::DAMAGE_COUNT;

/// Damage types, in the order the per-skin tables list them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DamageType {
    Slash = 0,
    Crush = 1,
    Poke = 2,
    Holy = 3,
    Evil = 4,
    Fire = 5,
    Ice = 6,
    Zap = 7,
}

impl DamageType {
    pub const ALL: [DamageType; DAMAGE_COUNT] = [
        DamageType::Slash,
        DamageType::Crush,
        DamageType::Poke,
        DamageType::Holy,
        DamageType::Evil,
        DamageType::Fire,
        DamageType::Ice,
        DamageType::Zap,
    ];

    /// Case-insensitive first letter. Anything else (conventionally `N`) is no type.
    pub fn from_letter(letter: char) -> Option<DamageType> {
        match letter.to_ascii_uppercase() {
            'S' => Some(DamageType::Slash),
            'C' => Some(DamageType::Crush),
            'P' => Some(DamageType::Poke),
            'H' => Some(DamageType::Holy),
            'E' => Some(DamageType::Evil),
            'F' => Some(DamageType::Fire),
            'I' => Some(DamageType::Ice),
            'Z' => Some(DamageType::Zap),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            DamageType::Slash => 'S',
            DamageType::Crush => 'C',
            DamageType::Poke => 'P',
            DamageType::Holy => 'H',
            DamageType::Evil => 'E',
            DamageType::Fire => 'F',
            DamageType::Ice => 'I',
            DamageType::Zap => 'Z',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DamageType::Slash => "Slash",
            DamageType::Crush => "Crush",
            DamageType::Poke => "Poke",
            DamageType::Holy => "Holy",
            DamageType::Evil => "Evil",
            DamageType::Fire => "Fire",
            DamageType::Ice => "Ice",
            DamageType::Zap => "Zap",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Letter for an optional damage type, `N` for none.
pub fn damage_type_letter(damage: Option<DamageType>) -> char {
    damage.map_or('N', DamageType::letter)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    /// Rolled when an instance is spawned
    Random,
    #[default]
    Other,
}

impl Gender {
    pub fn from_letter(letter: Option<char>) -> Gender {
        match letter.map(|c| c.to_ascii_uppercase()) {
            Some('M') => Gender::Male,
            Some('F') => Gender::Female,
            Some('R') => Gender::Random,
            _ => Gender::Other,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Gender::Male => 'M',
            Gender::Female => 'F',
            Gender::Random => 'R',
            Gender::Other => 'N',
        }
    }

    /// Picks a concrete gender for a spawned instance.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Gender {
        match self {
            Gender::Random => {
                if rng.gen_bool(0.5) {
                    Gender::Male
                } else {
                    Gender::Female
                }
            }
            other => other,
        }
    }
}

/// Animation a weapon plays when used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponAction {
    /// Fallback for unknown letters
    #[default]
    Dance,
    Unarmed,
    Thrust,
    Chop,
    Slice,
    Bash,
    Longbow,
    Crossbow,
    Fling,
    Parry,
    Zap,
}

impl WeaponAction {
    pub fn from_letter(letter: Option<char>) -> WeaponAction {
        match letter.map(|c| c.to_ascii_uppercase()) {
            Some('U') => WeaponAction::Unarmed,
            Some('T') => WeaponAction::Thrust,
            Some('C') => WeaponAction::Chop,
            Some('S') => WeaponAction::Slice,
            Some('B') => WeaponAction::Bash,
            Some('L') => WeaponAction::Longbow,
            Some('X') => WeaponAction::Crossbow,
            Some('F') => WeaponAction::Fling,
            Some('P') => WeaponAction::Parry,
            Some('Z') => WeaponAction::Zap,
            _ => WeaponAction::Dance,
        }
    }

    pub fn letter(self) -> char {
        match self {
            WeaponAction::Dance => 'D',
            WeaponAction::Unarmed => 'U',
            WeaponAction::Thrust => 'T',
            WeaponAction::Chop => 'C',
            WeaponAction::Slice => 'S',
            WeaponAction::Bash => 'B',
            WeaponAction::Longbow => 'L',
            WeaponAction::Crossbow => 'X',
            WeaponAction::Fling => 'F',
            WeaponAction::Parry => 'P',
            WeaponAction::Zap => 'Z',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BloodKind {
    #[default]
    None,
    Normal,
    /// Bleeds on every hit, even when the damage is blocked
    Ultra,
}

impl BloodKind {
    pub fn from_letter(letter: Option<char>) -> BloodKind {
        match letter.map(|c| c.to_ascii_uppercase()) {
            Some('T') => BloodKind::Normal,
            Some('U') => BloodKind::Ultra,
            _ => BloodKind::None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            BloodKind::None => 'F',
            BloodKind::Normal => 'T',
            BloodKind::Ultra => 'U',
        }
    }
}

/// How an enchanted target treats incoming missiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MissileTreatment {
    #[default]
    Normal,
    Deflect,
    Reflect,
}

impl MissileTreatment {
    pub fn from_letter(letter: Option<char>) -> MissileTreatment {
        match letter.map(|c| c.to_ascii_uppercase()) {
            Some('R') => MissileTreatment::Reflect,
            Some('D') => MissileTreatment::Deflect,
            _ => MissileTreatment::Normal,
        }
    }

    pub fn letter(self) -> char {
        match self {
            MissileTreatment::Normal => 'N',
            MissileTreatment::Deflect => 'D',
            MissileTreatment::Reflect => 'R',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn damage_letters_roundtrip() {
        for damage in DamageType::ALL {
            assert_eq!(DamageType::from_letter(damage.letter()), Some(damage));
            assert_eq!(
                DamageType::from_letter(damage.letter().to_ascii_lowercase()),
                Some(damage)
            );
        }
        assert_eq!(DamageType::from_letter('N'), None);
        assert_eq!(damage_type_letter(None), 'N');
        assert_eq!(DamageType::Zap.index(), 7);
    }

    #[test]
    fn gender_letters() {
        assert_eq!(Gender::from_letter(Some('m')), Gender::Male);
        assert_eq!(Gender::from_letter(Some('F')), Gender::Female);
        assert_eq!(Gender::from_letter(Some('R')), Gender::Random);
        assert_eq!(Gender::from_letter(Some('X')), Gender::Other);
        assert_eq!(Gender::from_letter(None), Gender::Other);
        assert_eq!(Gender::Other.letter(), 'N');
    }

    #[test]
    fn random_gender_resolves_to_concrete() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let g = Gender::Random.resolve(&mut rng);
            assert!(g == Gender::Male || g == Gender::Female);
        }
        assert_eq!(Gender::Other.resolve(&mut rng), Gender::Other);
    }

    #[test]
    fn unknown_weapon_letter_dances() {
        assert_eq!(WeaponAction::from_letter(Some('x')), WeaponAction::Crossbow);
        assert_eq!(WeaponAction::from_letter(Some('?')), WeaponAction::Dance);
        assert_eq!(WeaponAction::Dance.letter(), 'D');
    }

    #[test]
    fn blood_and_missile_letters() {
        assert_eq!(BloodKind::from_letter(Some('U')), BloodKind::Ultra);
        assert_eq!(BloodKind::from_letter(Some('F')), BloodKind::None);
        assert_eq!(MissileTreatment::from_letter(Some('r')), MissileTreatment::Reflect);
        assert_eq!(MissileTreatment::from_letter(Some('D')), MissileTreatment::Deflect);
        assert_eq!(MissileTreatment::from_letter(Some('N')), MissileTreatment::Normal);
    }
}
